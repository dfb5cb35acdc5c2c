//! Geometry kernel based on simple polygons.
//!
//! A [`Polygon`] keeps its vertices in the order they were given next to a `geo` polygon used
//! for the predicates and boolean operations. Discs are approximated by circumscribed regular
//! polygons, so every test made against the approximation is conservative with respect to the
//! true disc.

use std::f64::consts::PI;

use geo::{
    Area, BooleanOps, BoundingRect, Centroid, Contains, Coord, Intersects, LineString,
    MultiPolygon,
};
use log::warn;
use rand::Rng;
use thiserror::Error;

use super::{Angle, Bounds, Position};

/// Number of segments of a disc approximation.
pub const DISC_SEGMENTS: usize = 64;

/// Default number of draws of [`sample_point_in_polygon`].
pub const DEFAULT_SAMPLE_TRIES: usize = 100;

/// Areas at or below this value are treated as empty.
const AREA_EPSILON: f64 = 1e-9;

/// Relative tolerance of the right angle test in [`Polygon::is_box`].
const RIGHT_ANGLE_TOLERANCE: f64 = 1e-6;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("polygon needs at least 3 distinct vertices, got {0}")]
    TooFewVertices(usize),
    #[error("coordinate ({x}, {y}) is not finite")]
    NonFiniteCoordinate { x: f64, y: f64 },
    #[error("polygon has zero area")]
    ZeroArea,
    #[error("polygon boundary intersects itself")]
    SelfIntersecting,
    #[error("invalid radius {0}")]
    InvalidRadius(f64),
    #[error("invalid box dimensions {width} x {height}")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("invalid margin {0}")]
    InvalidMargin(f64),
}

/// Simple polygon with at least three distinct vertices and a non-zero area.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Position>,
    shape: geo::Polygon<f64>,
}

impl Polygon {
    /// Creates a polygon from an open or closed vertex list. Consecutive duplicates and a
    /// repeated closing vertex are dropped.
    pub fn new(vertices: impl IntoIterator<Item = Position>) -> Result<Self, GeometryError> {
        let mut vertices = vertices.into_iter().collect::<Vec<_>>();

        if let Some(p) = vertices.iter().find(|p| !p.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate { x: p.x(), y: p.y() });
        }

        vertices.dedup();
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }

        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        if signed_area(&vertices).abs() <= AREA_EPSILON {
            return Err(GeometryError::ZeroArea);
        }
        if is_self_intersecting(&vertices) {
            return Err(GeometryError::SelfIntersecting);
        }

        Ok(Self::from_valid(vertices))
    }

    fn from_valid(vertices: Vec<Position>) -> Self {
        let shape = geo::Polygon::new(
            LineString::from(vertices.iter().map(|v| Coord::from(*v)).collect::<Vec<_>>()),
            vec![],
        );
        Self { vertices, shape }
    }

    pub fn vertices(&self) -> &[Position] {
        &self.vertices
    }

    /// Vertices as a closed ring, the first vertex repeated at the end.
    pub fn ring(&self) -> Vec<Position> {
        let mut ring = self.vertices.clone();
        ring.extend(self.vertices.first().copied());
        ring
    }

    pub fn edges(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
            .map(|(a, b)| (*a, *b))
    }

    pub fn area(&self) -> f64 {
        self.shape.unsigned_area()
    }

    pub fn centroid(&self) -> Position {
        self.shape
            .centroid()
            .map(|c| Position::new(c.x(), c.y()))
            .unwrap_or_else(|| {
                self.vertices
                    .iter()
                    .fold(Position::default(), |sum, v| sum + *v)
                    .scale(1.0 / self.vertices.len() as f64)
            })
    }

    pub fn bounds(&self) -> Bounds {
        self.vertices.iter().fold(
            Bounds::new(
                f64::INFINITY,
                f64::NEG_INFINITY,
                f64::INFINITY,
                f64::NEG_INFINITY,
            ),
            |bounds, v| bounds.union(&Bounds::new(v.x(), v.x(), v.y(), v.y())),
        )
    }

    /// Boundary points are outside.
    pub fn contains_point(&self, point: Position) -> bool {
        self.shape.contains(&Coord::from(point))
    }

    /// True if `other` is fully enclosed. The boundaries may touch.
    pub fn contains(&self, other: &Polygon) -> bool {
        let (bounds, other_bounds) = (self.bounds(), other.bounds());
        other_bounds.x_min() >= bounds.x_min()
            && other_bounds.x_max() <= bounds.x_max()
            && other_bounds.y_min() >= bounds.y_min()
            && other_bounds.y_max() <= bounds.y_max()
            && self.shape.contains(&other.shape)
    }

    /// True if the whole disc lies inside the polygon.
    pub fn contains_disc(&self, disc: &Disc) -> bool {
        self.contains_point(disc.center())
            && self.distance_to_boundary(disc.center()) >= disc.radius()
    }

    /// True if the interiors share area. Touching polygons do not overlap.
    pub fn overlaps(&self, other: &Polygon) -> bool {
        self.bounds().intersects(&other.bounds())
            && self.shape.intersection(&other.shape).unsigned_area() > AREA_EPSILON
    }

    /// True if the polygons share at least one point, touching included.
    pub fn intersects(&self, other: &Polygon) -> bool {
        self.bounds().intersects(&other.bounds()) && self.shape.intersects(&other.shape)
    }

    pub fn distance_to_boundary(&self, point: Position) -> f64 {
        self.edges()
            .map(|(a, b)| distance_to_segment(point, a, b))
            .fold(f64::INFINITY, f64::min)
    }

    /// True for four vertices forming a (possibly rotated) rectangle.
    pub fn is_box(&self) -> bool {
        let n = self.vertices.len();
        n == 4
            && (0..n).all(|i| {
                let v = self.vertices[i];
                let to_prev = self.vertices[(i + n - 1) % n] - v;
                let to_next = self.vertices[(i + 1) % n] - v;
                to_prev.dot(to_next).abs()
                    <= RIGHT_ANGLE_TOLERANCE * to_prev.norm() * to_next.norm()
            })
    }

    pub fn translated(&self, offset: Position) -> Polygon {
        Polygon::from_valid(self.vertices.iter().map(|v| *v + offset).collect())
    }

    pub fn rotated(&self, angle: Angle, origin: Position) -> Polygon {
        Polygon::from_valid(
            self.vertices
                .iter()
                .map(|v| origin + (*v - origin).rotate_vector(angle))
                .collect(),
        )
    }
}

/// Circle footprint.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Disc {
    center: Position,
    radius: f64,
}

impl Disc {
    pub fn new(center: Position, radius: f64) -> Result<Self, GeometryError> {
        if !center.is_finite() {
            return Err(GeometryError::NonFiniteCoordinate {
                x: center.x(),
                y: center.y(),
            });
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.center.x() - self.radius,
            self.center.x() + self.radius,
            self.center.y() - self.radius,
            self.center.y() + self.radius,
        )
    }

    /// Gap between the two discs, negative if they overlap.
    pub fn clearance(&self, other: &Disc) -> f64 {
        self.center.distance(other.center) - self.radius - other.radius
    }

    pub fn inflate(&self, margin: f64) -> Result<Disc, GeometryError> {
        Disc::new(self.center, self.radius + margin)
    }

    /// Circumscribed regular polygon with [`DISC_SEGMENTS`] edges.
    pub fn to_polygon(&self) -> Polygon {
        let circumradius = self.radius / (PI / DISC_SEGMENTS as f64).cos();
        Polygon::from_valid(
            (0..DISC_SEGMENTS)
                .map(|i| {
                    let angle = Angle::new(2.0 * PI * i as f64 / DISC_SEGMENTS as f64);
                    self.center + Position::new(circumradius, 0.0).rotate_vector(angle)
                })
                .collect(),
        )
    }
}

/// Possibly empty or disconnected area, the result of inflation and free-space computations.
#[derive(Clone, Debug, PartialEq)]
pub struct Region(MultiPolygon<f64>);

impl Region {
    pub fn empty() -> Self {
        Self(MultiPolygon::new(vec![]))
    }

    pub fn is_empty(&self) -> bool {
        self.area() <= AREA_EPSILON
    }

    pub fn area(&self) -> f64 {
        self.0.unsigned_area()
    }

    pub fn num_parts(&self) -> usize {
        self.0 .0.len()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        if self.is_empty() {
            return None;
        }
        self.0
            .bounding_rect()
            .map(|r| Bounds::new(r.min().x, r.max().x, r.min().y, r.max().y))
    }

    /// Boundary points are outside.
    pub fn contains_point(&self, point: Position) -> bool {
        let coord = Coord::from(point);
        self.0 .0.iter().any(|p| p.contains(&coord))
    }

    pub fn intersects(&self, polygon: &Polygon) -> bool {
        self.0 .0.iter().any(|p| p.intersects(&polygon.shape))
    }

    pub fn union(&self, polygon: &Polygon) -> Region {
        Region(self.0.union(&MultiPolygon::new(vec![polygon.shape.clone()])))
    }

    pub fn difference(&self, polygon: &Polygon) -> Region {
        match self.bounds() {
            Some(bounds) if bounds.intersects(&polygon.bounds()) => {
                Region(self.0.difference(&MultiPolygon::new(vec![polygon.shape.clone()])))
            }
            _ => self.clone(),
        }
    }
}

impl From<Polygon> for Region {
    fn from(value: Polygon) -> Self {
        Self(MultiPolygon::new(vec![value.shape]))
    }
}

/// Shapes [`sample_point_in_polygon`] can draw from.
pub trait Sampleable {
    fn sampling_bounds(&self) -> Option<Bounds>;

    fn encloses(&self, point: Position) -> bool;
}

impl Sampleable for Polygon {
    fn sampling_bounds(&self) -> Option<Bounds> {
        Some(self.bounds())
    }

    fn encloses(&self, point: Position) -> bool {
        self.contains_point(point)
    }
}

impl Sampleable for Region {
    fn sampling_bounds(&self) -> Option<Bounds> {
        self.bounds()
    }

    fn encloses(&self, point: Position) -> bool {
        self.contains_point(point)
    }
}

/// Builds the rectangle of the given (width, height) centered on `origin` and rotated about it.
/// The corners run counter-clockwise, starting at the (-w/2, -h/2) corner.
pub fn box_to_polygon(
    dims: (f64, f64),
    origin: Position,
    angle: Angle,
) -> Result<Polygon, GeometryError> {
    let (width, height) = dims;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(GeometryError::InvalidDimensions { width, height });
    }
    if !origin.is_finite() {
        return Err(GeometryError::NonFiniteCoordinate {
            x: origin.x(),
            y: origin.y(),
        });
    }

    let (half_width, half_height) = (0.5 * width, 0.5 * height);
    Ok(Polygon::from_valid(vec![
        Position::new(-half_width, -half_height),
        Position::new(half_width, -half_height),
        Position::new(half_width, half_height),
        Position::new(-half_width, half_height),
    ])
    .rotated(angle, Position::default())
    .translated(origin))
}

pub fn polygon_centroid(polygon: &Polygon) -> Position {
    polygon.centroid()
}

pub fn polygon_contains(outer: &Polygon, inner: &Polygon) -> bool {
    outer.contains(inner)
}

pub fn polygons_overlap(a: &Polygon, b: &Polygon) -> bool {
    a.overlaps(b)
}

pub fn polygons_intersect(a: &Polygon, b: &Polygon) -> bool {
    a.intersects(b)
}

/// Minkowski buffer of the polygon. A negative margin erodes it, possibly down to an empty
/// region.
pub fn inflate_polygon(polygon: &Polygon, margin: f64) -> Result<Region, GeometryError> {
    if !margin.is_finite() {
        return Err(GeometryError::InvalidMargin(margin));
    }

    let region = Region::from(polygon.clone());
    if margin == 0.0 {
        return Ok(region);
    }

    let band = boundary_band(polygon, margin.abs());
    Ok(if margin > 0.0 {
        band.iter().fold(region, |r, piece| r.union(piece))
    } else {
        band.iter().fold(region, |r, piece| r.difference(piece))
    })
}

pub fn inflate_circle(disc: &Disc, margin: f64) -> Result<Disc, GeometryError> {
    disc.inflate(margin)
}

/// Draws uniform points from the bounding box of `shape` until one falls inside. Gives up with
/// a warning after `max_tries` draws.
pub fn sample_point_in_polygon<S, R>(shape: &S, max_tries: usize, rng: &mut R) -> Option<Position>
where
    S: Sampleable + ?Sized,
    R: Rng + ?Sized,
{
    if shape.sampling_bounds().is_none() {
        warn!("cannot sample from an empty region");
        return None;
    }

    let point = try_sample_point(shape, max_tries, rng);
    if point.is_none() {
        warn!("exceeded max polygon samples: {max_tries}");
    }
    point
}

/// [`sample_point_in_polygon`] without the diagnostics, for callers that retry on their own.
pub(super) fn try_sample_point<S, R>(shape: &S, max_tries: usize, rng: &mut R) -> Option<Position>
where
    S: Sampleable + ?Sized,
    R: Rng + ?Sized,
{
    let bounds = shape.sampling_bounds()?;
    (0..max_tries)
        .map(|_| {
            Position::new(
                rng.random_range(bounds.x_min()..=bounds.x_max()),
                rng.random_range(bounds.y_min()..=bounds.y_max()),
            )
        })
        .find(|point| shape.encloses(*point))
}

impl From<Position> for Coord<f64> {
    fn from(value: Position) -> Self {
        Coord {
            x: value.x(),
            y: value.y(),
        }
    }
}

/// Pieces covering every point within `distance` of the boundary: one rectangle per edge and
/// one disc per vertex.
fn boundary_band(polygon: &Polygon, distance: f64) -> Vec<Polygon> {
    let mut pieces = Vec::with_capacity(2 * polygon.vertices().len());
    for (a, b) in polygon.edges() {
        let normal = Position::new(a.y() - b.y(), b.x() - a.x()).scale(distance / a.distance(b));
        pieces.push(Polygon::from_valid(vec![
            a + normal,
            b + normal,
            b - normal,
            a - normal,
        ]));
        pieces.push(
            Disc {
                center: a,
                radius: distance,
            }
            .to_polygon(),
        );
    }
    pieces
}

fn cross(a: Position, b: Position) -> f64 {
    a.x() * b.y() - a.y() * b.x()
}

fn signed_area(vertices: &[Position]) -> f64 {
    0.5 * vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| cross(*a, *b))
        .sum::<f64>()
}

fn distance_to_segment(point: Position, a: Position, b: Position) -> f64 {
    let ab = b - a;
    let t = ((point - a).dot(ab) / ab.dot(ab)).clamp(0.0, 1.0);
    point.distance(a + ab.scale(t))
}

fn segments_intersect(p1: Position, p2: Position, q1: Position, q2: Position) -> bool {
    let on_segment = |a: Position, b: Position, p: Position| {
        p.x() >= a.x().min(b.x())
            && p.x() <= a.x().max(b.x())
            && p.y() >= a.y().min(b.y())
            && p.y() <= a.y().max(b.y())
    };

    let d1 = cross(q2 - q1, p1 - q1);
    let d2 = cross(q2 - q1, p2 - q1);
    let d3 = cross(p2 - p1, q1 - p1);
    let d4 = cross(p2 - p1, q2 - p1);

    if d1 * d2 < 0.0 && d3 * d4 < 0.0 {
        return true;
    }

    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

fn is_self_intersecting(vertices: &[Position]) -> bool {
    let n = vertices.len();
    (0..n).any(|i| {
        (i + 2..n)
            .filter(|&j| !(i == 0 && j == n - 1))
            .any(|j| {
                segments_intersect(
                    vertices[i],
                    vertices[(i + 1) % n],
                    vertices[j],
                    vertices[(j + 1) % n],
                )
            })
    })
}
