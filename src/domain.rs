//! The domain module encapsulates the world model. It defines the `Room`, `Table` and `Object`
//! entities, the `World` that owns them, and the geometry used to place them without overlap.
//!
//! Random placement is rejection sampling: candidates are drawn until one satisfies the
//! containment and clearance rules or the iteration budget runs out. Running out is not an
//! error, the placement functions return `Ok(None)` instead.

mod basis;
mod config;
mod entity;
mod free_space;
mod geometry;
mod placement;
mod world;

pub use basis::{Angle, Bounds, Color, Position};
pub use config::{
    ConfigError, ObjectRequest, ObjectSize, PlacementConfig, TableRequest, TableSize,
    UnknownPreset, DEFAULT_OBJECT_CLEARANCE, DEFAULT_OBJECT_MAX_ITER, DEFAULT_TABLE_CLEARANCE,
    DEFAULT_TABLE_MAX_ITER,
};
pub use entity::{
    Entity, EntityId, EntityKind, Object, ObjectId, Patch, Room, RoomId, Table, TableId,
};
pub use free_space::free_space;
pub use geometry::{
    box_to_polygon, inflate_circle, inflate_polygon, polygon_centroid, polygon_contains,
    polygons_intersect, polygons_overlap, sample_point_in_polygon, Disc, GeometryError, Polygon,
    Region, Sampleable, DEFAULT_SAMPLE_TRIES, DISC_SEGMENTS,
};
pub use placement::{is_valid_table, place_object, place_table, BoxPlacement, PlacementError};
pub use world::{LookupError, World, WorldError};
