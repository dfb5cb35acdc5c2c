//! Rejection sampling of table and object footprints.

use log::{debug, warn};
use rand::Rng;
use thiserror::Error;

use super::{
    box_to_polygon, free_space, geometry::try_sample_point, inflate_polygon, Angle, ConfigError,
    Disc, GeometryError, ObjectRequest, PlacementConfig, Polygon, Position, TableRequest,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Accepted table footprint together with the parameters it was built from.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxPlacement {
    pub polygon: Polygon,
    pub width: f64,
    pub height: f64,
    pub origin: Position,
    pub angle: Angle,
}

/// Searches for a box inside `room` that keeps `request.min_clearance` to every sibling.
///
/// Every attempt re-rolls the size and angle the request leaves open and samples a new origin.
/// Returns `Ok(None)` once `request.max_iter` attempts failed.
pub fn place_table<R: Rng + ?Sized>(
    room: &Polygon,
    siblings: &[&Polygon],
    request: &TableRequest,
    config: &PlacementConfig,
    rng: &mut R,
) -> Result<Option<BoxPlacement>, PlacementError> {
    config.validate()?;
    check_clearance(request.min_clearance)?;
    let pinned_dims = request.size.map(|size| size.dims()).transpose()?;

    for iteration in 0..request.max_iter {
        let (width, height) = match pinned_dims {
            Some(dims) => dims,
            None => config.random_table_dims(rng),
        };
        let angle = match request.angle {
            Some(angle) => angle,
            None => Angle::from_deg(rng.random_range(0.0..360.0)),
        };
        let Some(origin) = try_sample_point(room, config.sample_tries, rng) else {
            debug!("no origin found in {} samples", config.sample_tries);
            continue;
        };

        let candidate = box_to_polygon((width, height), origin, angle)?;
        if is_valid_table(room, &candidate, siblings, request.min_clearance)? {
            debug!(
                "placed {width:.2} x {height:.2} table at ({:.2}, {:.2}) after {} attempts",
                origin.x(),
                origin.y(),
                iteration + 1
            );
            return Ok(Some(BoxPlacement {
                polygon: candidate,
                width,
                height,
                origin,
                angle,
            }));
        }
    }

    warn!("no valid table placement within {} iterations", request.max_iter);
    Ok(None)
}

/// A candidate is valid if it lies inside the room and, for every sibling, neither the
/// candidate nor the candidate inflated by `clearance` touches it.
pub fn is_valid_table(
    room: &Polygon,
    candidate: &Polygon,
    siblings: &[&Polygon],
    clearance: f64,
) -> Result<bool, GeometryError> {
    check_clearance(clearance)?;

    if !room.contains(candidate) {
        return Ok(false);
    }

    let reach = candidate.bounds().expanded(clearance);
    let nearby = siblings
        .iter()
        .filter(|sibling| reach.intersects(&sibling.bounds()))
        .collect::<Vec<_>>();
    if nearby.is_empty() {
        return Ok(true);
    }
    if nearby.iter().any(|sibling| candidate.overlaps(sibling)) {
        return Ok(false);
    }

    let inflated = inflate_polygon(candidate, clearance)?;
    Ok(!nearby.iter().any(|sibling| inflated.intersects(sibling)))
}

/// Searches for a disc on `table` that keeps `request.min_clearance` to every occupant.
///
/// A pinned radius computes the free space once and only re-samples the center. An open
/// radius is drawn anew on every attempt.
pub fn place_object<R: Rng + ?Sized>(
    table: &Polygon,
    occupants: &[Disc],
    request: &ObjectRequest,
    config: &PlacementConfig,
    rng: &mut R,
) -> Result<Option<Disc>, PlacementError> {
    config.validate()?;
    check_clearance(request.min_clearance)?;

    match request.size {
        Some(size) => {
            let radius = size.radius()?;
            let region = free_space(table, radius, occupants, request.min_clearance)?;
            if region.is_empty() {
                warn!("no free space for an object of radius {radius}");
                return Ok(None);
            }
            for _ in 0..request.max_iter {
                if let Some(center) = try_sample_point(&region, config.sample_tries, rng) {
                    return Ok(Some(Disc::new(center, radius)?));
                }
            }
        }
        None => {
            for iteration in 0..request.max_iter {
                let radius = config.random_object_radius(rng);
                let region = free_space(table, radius, occupants, request.min_clearance)?;
                if region.is_empty() {
                    continue;
                }
                if let Some(center) = try_sample_point(&region, config.sample_tries, rng) {
                    debug!(
                        "placed object of radius {radius:.2} after {} attempts",
                        iteration + 1
                    );
                    return Ok(Some(Disc::new(center, radius)?));
                }
            }
        }
    }

    warn!("no valid object placement within {} iterations", request.max_iter);
    Ok(None)
}

fn check_clearance(clearance: f64) -> Result<(), GeometryError> {
    if clearance.is_finite() && clearance >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidMargin(clearance))
    }
}
