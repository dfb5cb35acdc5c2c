//! Free space for circular occupants.
//!
//! The free space of a container is the region in which the center of a new disc of a given
//! radius may fall without leaving the container and without coming closer than the clearance
//! margin to any disc already placed.

use log::debug;

use super::{inflate_polygon, Disc, GeometryError, Polygon, Region};

/// Computes the free space for a disc of `radius` inside `container`:
///
/// 1. erode the container by `radius`,
/// 2. cut a disc of `radius` out of every container corner,
/// 3. cut every occupant inflated by `clearance + radius` out of the rest.
///
/// An empty result means that no disc of this radius fits.
pub fn free_space(
    container: &Polygon,
    radius: f64,
    occupants: &[Disc],
    clearance: f64,
) -> Result<Region, GeometryError> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(GeometryError::InvalidRadius(radius));
    }
    if !(clearance.is_finite() && clearance >= 0.0) {
        return Err(GeometryError::InvalidMargin(clearance));
    }

    let mut region = inflate_polygon(container, -radius)?;

    for corner in container.vertices() {
        if region.is_empty() {
            break;
        }
        region = region.difference(&Disc::new(*corner, radius)?.to_polygon());
    }

    for occupant in occupants {
        if region.is_empty() {
            break;
        }
        region = region.difference(&occupant.inflate(clearance + radius)?.to_polygon());
    }

    if region.is_empty() {
        debug!("no free space left for radius {radius}");
    }

    Ok(region)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    use super::*;
    use crate::{
        domain::{sample_point_in_polygon, Position, DEFAULT_SAMPLE_TRIES},
        tests::{rng, square},
    };

    fn table() -> Polygon {
        Polygon::new(square(5.0)).unwrap()
    }

    #[test]
    fn test_free_space_without_occupants() {
        let region = free_space(&table(), 1.0, &[], 0.1).unwrap();
        assert_abs_diff_eq!(region.area(), 64.0, epsilon = 1e-6);
        assert!(region.contains_point(Position::new(3.9, 3.9)));
        assert!(!region.contains_point(Position::new(4.1, 0.0)));
    }

    #[test]
    fn test_free_space_with_occupant() {
        let occupant = Disc::new(Position::default(), 1.0).unwrap();
        let region = free_space(&table(), 1.0, &[occupant], 0.1).unwrap();

        // The occupant blocks a disc of radius 1.0 + 0.1 + 1.0 around its center
        let blocked = PI * 2.1 * 2.1;
        assert_abs_diff_eq!(region.area(), 64.0 - blocked, epsilon = 0.05);
        assert!(!region.contains_point(Position::new(2.05, 0.0)));
        assert!(region.contains_point(Position::new(2.2, 0.0)));
    }

    #[test]
    fn test_free_space_corners() {
        let triangle =
            Polygon::new([(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)].map(Position::from)).unwrap();
        let region = free_space(&triangle, 0.5, &[], 0.0).unwrap();
        assert!(!region.is_empty());
        for corner in triangle.vertices() {
            assert!(!region.contains_point(*corner));
        }
    }

    #[rstest]
    #[case::half_side(5.0)]
    #[case::larger_than_table(6.0)]
    fn test_free_space_too_large(#[case] radius: f64) {
        assert!(free_space(&table(), radius, &[], 0.1).unwrap().is_empty());
    }

    #[test]
    fn test_free_space_fully_occupied() {
        let occupant = Disc::new(Position::default(), 5.0).unwrap();
        assert!(free_space(&table(), 1.0, &[occupant], 0.5).unwrap().is_empty());
    }

    #[rstest]
    #[case::zero_radius(0.0, 0.1, GeometryError::InvalidRadius(0.0))]
    #[case::negative_clearance(1.0, -0.1, GeometryError::InvalidMargin(-0.1))]
    fn test_free_space_invalid(
        #[case] radius: f64,
        #[case] clearance: f64,
        #[case] error: GeometryError,
    ) {
        assert_eq!(free_space(&table(), radius, &[], clearance), Err(error));
    }

    #[rstest]
    fn test_free_space_samples_respect_constraints(mut rng: ChaCha8Rng) {
        let table = table();
        let occupants = [
            Disc::new(Position::new(-2.0, -2.0), 1.5).unwrap(),
            Disc::new(Position::new(2.5, 1.0), 0.8).unwrap(),
        ];
        let region = free_space(&table, 1.0, &occupants, 0.2).unwrap();

        for _ in 0..200 {
            let center = sample_point_in_polygon(&region, DEFAULT_SAMPLE_TRIES, &mut rng).unwrap();
            let disc = Disc::new(center, 1.0).unwrap();
            assert!(table.contains_disc(&disc));
            for occupant in &occupants {
                assert!(disc.clearance(occupant) >= 0.2);
            }
        }
    }
}
