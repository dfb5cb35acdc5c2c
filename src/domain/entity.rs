//! Rooms, tables and objects.
//!
//! Entities are owned by the [`super::World`] and refer to their parent and children through
//! typed ids. Their footprints never change after creation.

use std::fmt;

use super::{Bounds, Color, Disc, Polygon, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl RoomId {
    pub(super) fn new(id: usize) -> Self {
        Self(id)
    }
}

impl TableId {
    pub(super) fn new(id: usize) -> Self {
        Self(id)
    }
}

impl ObjectId {
    pub(super) fn new(id: usize) -> Self {
        Self(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityId {
    Room(RoomId),
    Table(TableId),
    Object(ObjectId),
}

impl EntityId {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityId::Room(_) => EntityKind::Room,
            EntityId::Table(_) => EntityKind::Table,
            EntityId::Object(_) => EntityKind::Object,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Room,
    Table,
    Object,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            EntityKind::Room => "room",
            EntityKind::Table => "table",
            EntityKind::Object => "object",
        };
        write!(f, "{kind}")
    }
}

/// Everything a viewer needs to draw one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Patch {
    pub name: String,
    pub polygon: Polygon,
    pub color: Color,
    pub z_order: u8,
}

pub trait Entity {
    fn name(&self) -> &str;

    fn footprint(&self) -> &Polygon;

    fn color(&self) -> Color;

    fn kind(&self) -> EntityKind;

    /// Drawing layer, higher values are drawn on top.
    fn z_order(&self) -> u8 {
        match self.kind() {
            EntityKind::Room => 1,
            EntityKind::Table => 2,
            EntityKind::Object => 3,
        }
    }

    fn centroid(&self) -> Position {
        self.footprint().centroid()
    }

    fn bounds(&self) -> Bounds {
        self.footprint().bounds()
    }

    fn patch(&self) -> Patch {
        Patch {
            name: self.name().to_string(),
            polygon: self.footprint().clone(),
            color: self.color(),
            z_order: self.z_order(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    id: RoomId,
    name: String,
    polygon: Polygon,
    color: Color,
    tables: Vec<TableId>,
}

impl Room {
    pub(super) fn new(id: RoomId, name: String, polygon: Polygon, color: Color) -> Self {
        Self {
            id,
            name,
            polygon,
            color,
            tables: vec![],
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn tables(&self) -> &[TableId] {
        &self.tables
    }

    pub(super) fn attach(&mut self, table: TableId) {
        self.tables.push(table);
    }

    pub(super) fn detach(&mut self, table: TableId) {
        self.tables.retain(|t| *t != table);
    }
}

impl Entity for Room {
    fn name(&self) -> &str {
        &self.name
    }

    fn footprint(&self) -> &Polygon {
        &self.polygon
    }

    fn color(&self) -> Color {
        self.color
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Room
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    id: TableId,
    room: RoomId,
    name: String,
    polygon: Polygon,
    color: Color,
    objects: Vec<ObjectId>,
}

impl Table {
    pub(super) fn new(
        id: TableId,
        room: RoomId,
        name: String,
        polygon: Polygon,
        color: Color,
    ) -> Self {
        Self {
            id,
            room,
            name,
            polygon,
            color,
            objects: vec![],
        }
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn room(&self) -> RoomId {
        self.room
    }

    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    /// Lengths of the first and second edge.
    pub fn dims(&self) -> (f64, f64) {
        let v = self.polygon.vertices();
        (v[0].distance(v[1]), v[1].distance(v[2]))
    }

    pub(super) fn attach(&mut self, object: ObjectId) {
        self.objects.push(object);
    }

    pub(super) fn detach(&mut self, object: ObjectId) {
        self.objects.retain(|o| *o != object);
    }
}

impl Entity for Table {
    fn name(&self) -> &str {
        &self.name
    }

    fn footprint(&self) -> &Polygon {
        &self.polygon
    }

    fn color(&self) -> Color {
        self.color
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Table
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    id: ObjectId,
    table: TableId,
    name: String,
    disc: Disc,
    polygon: Polygon,
    color: Color,
}

impl Object {
    pub(super) fn new(
        id: ObjectId,
        table: TableId,
        name: String,
        disc: Disc,
        color: Color,
    ) -> Self {
        Self {
            id,
            table,
            name,
            disc,
            polygon: disc.to_polygon(),
            color,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn table(&self) -> TableId {
        self.table
    }

    pub fn disc(&self) -> Disc {
        self.disc
    }

    pub fn radius(&self) -> f64 {
        self.disc.radius()
    }
}

impl Entity for Object {
    fn name(&self) -> &str {
        &self.name
    }

    /// Polygon approximation of the disc.
    fn footprint(&self) -> &Polygon {
        &self.polygon
    }

    fn color(&self) -> Color {
        self.color
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Object
    }

    fn centroid(&self) -> Position {
        self.disc.center()
    }

    fn bounds(&self) -> Bounds {
        self.disc.bounds()
    }
}
