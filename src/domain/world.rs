//! The world owns every room, table and object and keeps the name registry and the world
//! bounds up to date.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use super::{
    place_object, place_table, Bounds, Color, ConfigError, Disc, Entity, EntityId, EntityKind,
    GeometryError, Object, ObjectId, ObjectRequest, Patch, PlacementConfig, PlacementError,
    Polygon, Position, Room, RoomId, Table, TableId, TableRequest,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("name {0:?} is already taken")]
    DuplicateName(String),
    #[error("unknown room {0:?}")]
    UnknownRoom(RoomId),
    #[error("unknown table {0:?}")]
    UnknownTable(TableId),
    #[error("unknown object {0:?}")]
    UnknownObject(ObjectId),
    #[error("table footprint must be a rectangle")]
    NotABox,
    #[error("table {table:?} is not inside room {room:?}")]
    TableOutsideRoom { table: String, room: String },
    #[error("table {table:?} overlaps table {other:?}")]
    TableOverlap { table: String, other: String },
    #[error("object {object:?} is not inside table {table:?}")]
    ObjectOutsideTable { object: String, table: String },
    #[error("object {object:?} overlaps object {other:?}")]
    ObjectOverlap { object: String, other: String },
    #[error("iteration budget must be positive")]
    InvalidBudget,
}

impl From<PlacementError> for WorldError {
    fn from(value: PlacementError) -> Self {
        match value {
            PlacementError::Geometry(e) => WorldError::Geometry(e),
            PlacementError::Config(e) => WorldError::Config(e),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no entity named {0:?}")]
    NotFound(String),
    #[error("{name:?} is a {found}, not a {expected}")]
    WrongKind {
        name: String,
        expected: EntityKind,
        found: EntityKind,
    },
}

#[derive(Clone, Debug)]
pub struct World {
    name: String,
    rooms: BTreeMap<RoomId, Room>,
    tables: BTreeMap<TableId, Table>,
    objects: BTreeMap<ObjectId, Object>,
    names: HashMap<String, EntityId>,
    bounds: Option<Bounds>,
    next_id: usize,
    num_rooms: usize,
    num_tables: usize,
    config: PlacementConfig,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates an empty world seeded from the thread RNG.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_rng(name, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Creates an empty world whose random placements are reproducible.
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(name, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(name: impl Into<String>, rng: ChaCha8Rng) -> Self {
        Self {
            name: name.into(),
            rooms: BTreeMap::new(),
            tables: BTreeMap::new(),
            objects: BTreeMap::new(),
            names: HashMap::new(),
            bounds: None,
            next_id: 0,
            num_rooms: 0,
            num_tables: 0,
            config: PlacementConfig::default(),
            rng,
        }
    }

    pub fn with_config(self, config: PlacementConfig) -> Result<Self, WorldError> {
        config.validate()?;
        Ok(Self { config, ..self })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Union of all room bounds, `None` while the world has no rooms.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.get(&id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    pub fn tables_in<'a>(&'a self, room: &'a Room) -> impl Iterator<Item = &'a Table> + 'a {
        room.tables().iter().filter_map(|id| self.tables.get(id))
    }

    pub fn objects_on<'a>(&'a self, table: &'a Table) -> impl Iterator<Item = &'a Object> + 'a {
        table.objects().iter().filter_map(|id| self.objects.get(id))
    }

    pub fn entities(&self) -> impl Iterator<Item = &dyn Entity> {
        self.rooms
            .values()
            .map(|r| r as &dyn Entity)
            .chain(self.tables.values().map(|t| t as &dyn Entity))
            .chain(self.objects.values().map(|o| o as &dyn Entity))
    }

    /// Drawing patches of all entities, lowest layer first.
    pub fn patches(&self) -> Vec<Patch> {
        let mut patches = self.entities().map(|e| e.patch()).collect::<Vec<_>>();
        patches.sort_by_key(|p| p.z_order);
        patches
    }

    pub fn add_room(
        &mut self,
        coordinates: impl IntoIterator<Item = Position>,
        name: Option<&str>,
        color: Option<Color>,
    ) -> Result<RoomId, WorldError> {
        let polygon = Polygon::new(coordinates)?;
        let name = match name {
            Some(name) => self.check_name(name)?,
            None => self.auto_name("room", self.num_rooms + 1),
        };

        let id = RoomId::new(self.next_id());
        let bounds = polygon.bounds();
        self.bounds = Some(match self.bounds {
            Some(current) => current.union(&bounds),
            None => bounds,
        });

        debug!("adding room {name}");
        self.names.insert(name.clone(), EntityId::Room(id));
        self.rooms.insert(
            id,
            Room::new(id, name, polygon, color.unwrap_or(Color::GREY)),
        );
        self.num_rooms += 1;
        Ok(id)
    }

    /// Adds a table at the given corners. The footprint must be a rectangle inside `parent`
    /// that does not overlap another table of the room.
    pub fn add_table(
        &mut self,
        coordinates: impl IntoIterator<Item = Position>,
        parent: RoomId,
        name: Option<&str>,
        color: Option<Color>,
    ) -> Result<TableId, WorldError> {
        let room = self.rooms.get(&parent).ok_or(WorldError::UnknownRoom(parent))?;
        let polygon = Polygon::new(coordinates)?;
        if !polygon.is_box() {
            return Err(WorldError::NotABox);
        }
        let name = match name {
            Some(name) => self.check_name(name)?,
            None => self.auto_name("table", self.num_tables + 1),
        };

        if !room.footprint().contains(&polygon) {
            return Err(WorldError::TableOutsideRoom {
                table: name,
                room: room.name().to_string(),
            });
        }
        if let Some(other) = self
            .tables_in(room)
            .find(|t| t.footprint().overlaps(&polygon))
        {
            return Err(WorldError::TableOverlap {
                table: name,
                other: other.name().to_string(),
            });
        }

        Ok(self.insert_table(parent, name, polygon, color.unwrap_or(Color::BLACK)))
    }

    /// Searches a free spot for a table in `parent`. Returns `Ok(None)` if the search ran out
    /// of attempts.
    pub fn add_random_table(
        &mut self,
        parent: RoomId,
        request: &TableRequest,
    ) -> Result<Option<TableId>, WorldError> {
        if request.max_iter == 0 {
            return Err(WorldError::InvalidBudget);
        }
        let name = match &request.name {
            Some(name) => self.check_name(name)?,
            None => self.auto_name("table", self.num_tables + 1),
        };

        let room = self.rooms.get(&parent).ok_or(WorldError::UnknownRoom(parent))?;
        let siblings = room
            .tables()
            .iter()
            .filter_map(|id| self.tables.get(id))
            .map(|t| t.footprint())
            .collect::<Vec<_>>();

        let Some(placement) = place_table(
            room.footprint(),
            &siblings,
            request,
            &self.config,
            &mut self.rng,
        )?
        else {
            return Ok(None);
        };

        let color = request.color.unwrap_or(Color::BLACK);
        Ok(Some(self.insert_table(parent, name, placement.polygon, color)))
    }

    /// Adds a disc shaped object. The disc must lie on `parent` without overlapping another
    /// object of the table.
    pub fn add_object(
        &mut self,
        centroid: Position,
        radius: f64,
        parent: TableId,
        name: Option<&str>,
        color: Option<Color>,
    ) -> Result<ObjectId, WorldError> {
        let table = self.tables.get(&parent).ok_or(WorldError::UnknownTable(parent))?;
        let disc = Disc::new(centroid, radius)?;
        let name = match name {
            Some(name) => self.check_name(name)?,
            None => self.auto_object_name(table),
        };

        if !table.footprint().contains_disc(&disc) {
            return Err(WorldError::ObjectOutsideTable {
                object: name,
                table: table.name().to_string(),
            });
        }
        if let Some(other) = self
            .objects_on(table)
            .find(|o| o.disc().clearance(&disc) < 0.0)
        {
            return Err(WorldError::ObjectOverlap {
                object: name,
                other: other.name().to_string(),
            });
        }

        let color = match color {
            Some(color) => color,
            None => Color::random(&mut self.rng),
        };
        Ok(self.insert_object(parent, name, disc, color))
    }

    /// Searches a free spot for an object on `parent`. Returns `Ok(None)` if no disc fits or
    /// the search ran out of attempts.
    pub fn add_random_object(
        &mut self,
        parent: TableId,
        request: &ObjectRequest,
    ) -> Result<Option<ObjectId>, WorldError> {
        if request.max_iter == 0 {
            return Err(WorldError::InvalidBudget);
        }

        let table = self.tables.get(&parent).ok_or(WorldError::UnknownTable(parent))?;
        let name = match &request.name {
            Some(name) => self.check_name(name)?,
            None => self.auto_object_name(table),
        };
        let occupants = table
            .objects()
            .iter()
            .filter_map(|id| self.objects.get(id))
            .map(Object::disc)
            .collect::<Vec<_>>();

        let Some(disc) = place_object(
            table.footprint(),
            &occupants,
            request,
            &self.config,
            &mut self.rng,
        )?
        else {
            return Ok(None);
        };

        let color = match request.color {
            Some(color) => color,
            None => Color::random(&mut self.rng),
        };
        Ok(Some(self.insert_object(parent, name, disc, color)))
    }

    /// Removes the room together with its tables and their objects.
    pub fn remove_room(&mut self, id: RoomId) -> Result<Room, WorldError> {
        let tables = self
            .rooms
            .get(&id)
            .ok_or(WorldError::UnknownRoom(id))?
            .tables()
            .to_vec();
        for table in tables {
            self.remove_table(table)?;
        }

        let room = self.rooms.remove(&id).ok_or(WorldError::UnknownRoom(id))?;
        self.names.remove(room.name());

        let removed = room.bounds();
        self.bounds = match self.bounds {
            _ if self.rooms.is_empty() => None,
            Some(bounds) if bounds.shares_extreme(&removed) => self
                .rooms
                .values()
                .map(|r| r.bounds())
                .reduce(|a, b| a.union(&b)),
            bounds => bounds,
        };

        debug!("removed room {}", room.name());
        Ok(room)
    }

    /// Removes the table together with its objects.
    pub fn remove_table(&mut self, id: TableId) -> Result<Table, WorldError> {
        let objects = self
            .tables
            .get(&id)
            .ok_or(WorldError::UnknownTable(id))?
            .objects()
            .to_vec();
        for object in objects {
            self.remove_object(object)?;
        }

        let table = self.tables.remove(&id).ok_or(WorldError::UnknownTable(id))?;
        self.names.remove(table.name());
        if let Some(room) = self.rooms.get_mut(&table.room()) {
            room.detach(id);
        }

        debug!("removed table {}", table.name());
        Ok(table)
    }

    pub fn remove_object(&mut self, id: ObjectId) -> Result<Object, WorldError> {
        let object = self
            .objects
            .remove(&id)
            .ok_or(WorldError::UnknownObject(id))?;
        self.names.remove(object.name());
        if let Some(table) = self.tables.get_mut(&object.table()) {
            table.detach(id);
        }
        Ok(object)
    }

    /// Exact, case sensitive name lookup over all kinds.
    pub fn entity_by_name(&self, name: &str) -> Result<EntityId, LookupError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| LookupError::NotFound(name.to_string()))
    }

    pub fn room_by_name(&self, name: &str) -> Result<&Room, LookupError> {
        match self.entity_by_name(name)? {
            EntityId::Room(id) => self
                .rooms
                .get(&id)
                .ok_or_else(|| LookupError::NotFound(name.to_string())),
            other => Err(wrong_kind(name, EntityKind::Room, other)),
        }
    }

    pub fn table_by_name(&self, name: &str) -> Result<&Table, LookupError> {
        match self.entity_by_name(name)? {
            EntityId::Table(id) => self
                .tables
                .get(&id)
                .ok_or_else(|| LookupError::NotFound(name.to_string())),
            other => Err(wrong_kind(name, EntityKind::Table, other)),
        }
    }

    pub fn object_by_name(&self, name: &str) -> Result<&Object, LookupError> {
        match self.entity_by_name(name)? {
            EntityId::Object(id) => self
                .objects
                .get(&id)
                .ok_or_else(|| LookupError::NotFound(name.to_string())),
            other => Err(wrong_kind(name, EntityKind::Object, other)),
        }
    }

    /// Like [`World::room_by_name`], but logs a warning instead of returning the error.
    pub fn get_room_by_name(&self, name: &str) -> Option<&Room> {
        self.room_by_name(name).inspect_err(|e| warn!("{e}")).ok()
    }

    pub fn get_table_by_name(&self, name: &str) -> Option<&Table> {
        self.table_by_name(name).inspect_err(|e| warn!("{e}")).ok()
    }

    pub fn get_object_by_name(&self, name: &str) -> Option<&Object> {
        self.object_by_name(name).inspect_err(|e| warn!("{e}")).ok()
    }

    fn next_id(&mut self) -> usize {
        self.next_id += 1;
        self.next_id
    }

    fn check_name(&self, name: &str) -> Result<String, WorldError> {
        if self.names.contains_key(name) {
            Err(WorldError::DuplicateName(name.to_string()))
        } else {
            Ok(name.to_string())
        }
    }

    /// First free name of the form `<prefix><n>` with `n >= start`.
    fn auto_name(&self, prefix: &str, start: usize) -> String {
        let mut n = start;
        loop {
            let name = format!("{prefix}{n}");
            if !self.names.contains_key(&name) {
                return name;
            }
            n += 1;
        }
    }

    fn auto_object_name(&self, table: &Table) -> String {
        self.auto_name(&format!("{}_obj", table.name()), table.objects().len() + 1)
    }

    fn insert_table(
        &mut self,
        room: RoomId,
        name: String,
        polygon: Polygon,
        color: Color,
    ) -> TableId {
        let id = TableId::new(self.next_id());
        debug!("adding table {name}");
        self.names.insert(name.clone(), EntityId::Table(id));
        if let Some(room) = self.rooms.get_mut(&room) {
            room.attach(id);
        }
        self.tables.insert(id, Table::new(id, room, name, polygon, color));
        self.num_tables += 1;
        id
    }

    fn insert_object(
        &mut self,
        table: TableId,
        name: String,
        disc: Disc,
        color: Color,
    ) -> ObjectId {
        let id = ObjectId::new(self.next_id());
        debug!("adding object {name}");
        self.names.insert(name.clone(), EntityId::Object(id));
        if let Some(table) = self.tables.get_mut(&table) {
            table.attach(id);
        }
        self.objects.insert(id, Object::new(id, table, name, disc, color));
        id
    }
}

fn wrong_kind(name: &str, expected: EntityKind, found: EntityId) -> LookupError {
    LookupError::WrongKind {
        name: name.to_string(),
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::{
        domain::{ObjectSize, TableSize},
        tests::{assert_objects_valid, assert_tables_valid, square, RNG_SEED},
    };

    const TABLE: [(f64, f64); 4] = [(-5.0, -5.0), (-5.0, 5.0), (5.0, 5.0), (5.0, -5.0)];

    fn corners(corners: &[(f64, f64)]) -> Vec<Position> {
        corners.iter().copied().map(Position::from).collect()
    }

    #[fixture]
    fn world() -> World {
        World::with_seed("test", RNG_SEED)
    }

    fn table_footprints<'a>(world: &'a World, room: &'a Room) -> Vec<&'a Polygon> {
        world.tables_in(room).map(|t| t.footprint()).collect()
    }

    fn object_discs(world: &World, table: &Table) -> Vec<Disc> {
        world.objects_on(table).map(Object::disc).collect()
    }

    #[rstest]
    fn test_explicit_table_in_room(mut world: World) {
        let room = world.add_room(square(10.0), None, None).unwrap();
        let table = world.add_table(corners(&TABLE), room, None, None).unwrap();

        let room = world.room(room).unwrap();
        let table = world.table(table).unwrap();
        assert!(room.footprint().contains(table.footprint()));
        assert_eq!(room.tables(), &[table.id()]);
        assert_eq!(table.room(), room.id());
        assert_eq!(world.bounds(), Some(Bounds::new(-10.0, 10.0, -10.0, 10.0)));
        assert_eq!(room.color(), Color::GREY);
        assert_eq!(table.color(), Color::BLACK);
    }

    #[rstest]
    fn test_random_tables_keep_clearance(mut world: World) {
        let room = world.add_room(square(10.0), None, None).unwrap();
        let request = TableRequest::new().with_min_clearance(0.5);

        assert!(world.add_random_table(room, &request).unwrap().is_some());
        assert!(world.add_random_table(room, &request).unwrap().is_some());

        let room = world.room(room).unwrap();
        assert_eq!(room.tables().len(), 2);
        assert_tables_valid(room.footprint(), &table_footprints(&world, room), 0.5);
    }

    #[rstest]
    fn test_random_objects_keep_clearance(mut world: World) {
        let room = world.add_room(square(10.0), None, None).unwrap();
        let table = world.add_table(corners(&TABLE), room, None, None).unwrap();
        let request = ObjectRequest::new().with_min_clearance(0.1);

        for _ in 0..3 {
            assert!(world.add_random_object(table, &request).unwrap().is_some());
        }

        let table = world.table(table).unwrap();
        assert_eq!(table.objects().len(), 3);
        assert_objects_valid(table.footprint(), &object_discs(&world, table), 0.1);
    }

    #[rstest]
    fn test_random_object_on_small_table(mut world: World) {
        let room = world.add_room(square(10.0), None, None).unwrap();
        let table = world
            .add_table(square(1.0), room, Some("tiny"), None)
            .unwrap();
        let request = ObjectRequest::new().with_size(ObjectSize::Radius(1.5));

        assert_eq!(world.add_random_object(table, &request), Ok(None));
        assert!(world.table(table).unwrap().objects().is_empty());
        assert_eq!(world.get_object_by_name("tiny_obj1"), None);
    }

    #[rstest]
    fn test_room_sized_table_fails(mut world: World) {
        let room = world.add_room(square(10.0), None, None).unwrap();
        world.add_table(square(1.0), room, None, None).unwrap();
        let request = TableRequest::new()
            .with_size(TableSize::Custom {
                width: 20.0,
                height: 20.0,
            })
            .with_max_iter(1_000);

        assert_eq!(world.add_random_table(room, &request), Ok(None));
        assert_eq!(world.tables().count(), 1);
    }

    #[test]
    fn test_deterministic_under_seed() {
        let build = || {
            let mut world = World::with_seed("seeded", 3);
            let room = world.add_room(square(10.0), None, None).unwrap();
            let table = world
                .add_random_table(room, &TableRequest::new())
                .unwrap()
                .unwrap();
            world.add_random_table(room, &TableRequest::new()).unwrap();
            for _ in 0..3 {
                world
                    .add_random_object(table, &ObjectRequest::new())
                    .unwrap();
            }
            world.patches()
        };
        assert_eq!(build(), build());
    }

    #[rstest]
    fn test_bounds_add_remove(mut world: World) {
        let first = world.add_room(square(10.0), None, None).unwrap();
        let before = world.bounds();

        let wide = corners(&[(5.0, -2.0), (30.0, -2.0), (30.0, 2.0), (5.0, 2.0)]);
        let second = world.add_room(wide, None, None).unwrap();
        assert_eq!(world.bounds(), Some(Bounds::new(-10.0, 30.0, -10.0, 10.0)));

        world.remove_room(second).unwrap();
        assert_eq!(world.bounds(), before);

        world.remove_room(first).unwrap();
        assert_eq!(world.bounds(), None);
    }

    #[rstest]
    fn test_bounds_remove_inner_room(mut world: World) {
        world.add_room(square(10.0), None, None).unwrap();
        let inner = world.add_room(square(2.0), None, None).unwrap();
        world.remove_room(inner).unwrap();
        assert_eq!(world.bounds(), Some(Bounds::new(-10.0, 10.0, -10.0, 10.0)));
    }

    #[rstest]
    fn test_lookup(mut world: World) {
        let room = world.add_room(square(10.0), Some("kitchen"), None).unwrap();
        let table = world.add_table(square(2.0), room, Some("desk"), None).unwrap();

        assert_eq!(world.entity_by_name("kitchen"), Ok(EntityId::Room(room)));
        assert_eq!(world.entity_by_name("desk"), Ok(EntityId::Table(table)));
        assert_eq!(
            world.entity_by_name("Kitchen"),
            Err(LookupError::NotFound("Kitchen".to_string()))
        );
        assert_eq!(
            world.room_by_name("desk").map(Room::id),
            Err(LookupError::WrongKind {
                name: "desk".to_string(),
                expected: EntityKind::Room,
                found: EntityKind::Table,
            })
        );
        assert_eq!(world.get_room_by_name("kitchen").map(Room::id), Some(room));
        assert_eq!(world.get_room_by_name("desk"), None);
        assert_eq!(world.get_table_by_name("garage"), None);
    }

    #[rstest]
    fn test_duplicate_names(mut world: World) {
        let room = world.add_room(square(10.0), Some("kitchen"), None).unwrap();
        assert_eq!(
            world.add_room(square(5.0), Some("kitchen"), None),
            Err(WorldError::DuplicateName("kitchen".to_string()))
        );
        assert_eq!(
            world.add_random_table(room, &TableRequest::new().with_name("kitchen")),
            Err(WorldError::DuplicateName("kitchen".to_string()))
        );
        assert_eq!(world.rooms().count(), 1);
    }

    #[rstest]
    fn test_auto_names(mut world: World) {
        world.add_room(square(10.0), Some("room2"), None).unwrap();
        let room = world.add_room(square(20.0), None, None).unwrap();
        assert_eq!(world.room(room).unwrap().name(), "room3");

        let table = world.add_table(square(3.0), room, None, None).unwrap();
        assert_eq!(world.table(table).unwrap().name(), "table1");

        let first = world
            .add_object(Position::new(-1.5, 0.0), 1.0, table, None, None)
            .unwrap();
        let second = world
            .add_object(Position::new(1.5, 0.0), 1.0, table, None, None)
            .unwrap();
        assert_eq!(world.object(first).unwrap().name(), "table1_obj1");
        assert_eq!(world.object(second).unwrap().name(), "table1_obj2");
    }

    #[rstest]
    fn test_remove_room_cascades(mut world: World) {
        let room = world.add_room(square(10.0), None, None).unwrap();
        let table = world.add_table(square(3.0), room, None, None).unwrap();
        world
            .add_object(Position::default(), 1.0, table, Some("cup"), None)
            .unwrap();

        world.remove_room(room).unwrap();
        assert_eq!(world.entities().count(), 0);
        assert_eq!(
            world.entity_by_name("cup"),
            Err(LookupError::NotFound("cup".to_string()))
        );
        assert!(matches!(
            world.remove_table(table),
            Err(WorldError::UnknownTable(_))
        ));
    }

    #[rstest]
    fn test_remove_object_frees_space(mut world: World) {
        let room = world.add_room(square(10.0), None, None).unwrap();
        let table = world.add_table(square(3.0), room, None, None).unwrap();
        let cup = world
            .add_object(Position::default(), 2.0, table, Some("cup"), None)
            .unwrap();
        assert!(matches!(
            world.add_object(Position::new(1.0, 1.0), 1.0, table, None, None),
            Err(WorldError::ObjectOverlap { .. })
        ));

        world.remove_object(cup).unwrap();
        assert!(world.table(table).unwrap().objects().is_empty());
        assert!(world
            .add_object(Position::new(1.0, 1.0), 1.0, table, Some("cup"), None)
            .is_ok());
    }

    #[rstest]
    #[case::not_a_box(
        vec![(0.0, 0.0), (4.0, 0.0), (3.0, 1.0), (1.0, 1.0)],
        WorldError::NotABox
    )]
    #[case::outside_room(
        vec![(8.0, 0.0), (12.0, 0.0), (12.0, 2.0), (8.0, 2.0)],
        WorldError::TableOutsideRoom { table: "table2".to_string(), room: "room1".to_string() }
    )]
    #[case::overlapping(
        vec![(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 2.0)],
        WorldError::TableOverlap { table: "table2".to_string(), other: "table1".to_string() }
    )]
    #[case::too_few_vertices(
        vec![(0.0, 0.0), (4.0, 0.0)],
        WorldError::Geometry(GeometryError::TooFewVertices(2))
    )]
    fn test_add_table_invalid(
        mut world: World,
        #[case] coordinates: Vec<(f64, f64)>,
        #[case] error: WorldError,
    ) {
        let room = world.add_room(square(10.0), None, None).unwrap();
        world.add_table(square(1.0), room, None, None).unwrap();
        assert_eq!(
            world.add_table(corners(&coordinates), room, None, None),
            Err(error)
        );
        assert_eq!(world.tables().count(), 1);
    }

    #[rstest]
    fn test_add_object_invalid(mut world: World) {
        let room = world.add_room(square(10.0), None, None).unwrap();
        let table = world.add_table(square(2.0), room, Some("desk"), None).unwrap();

        assert_eq!(
            world.add_object(Position::new(1.5, 0.0), 1.0, table, Some("cup"), None),
            Err(WorldError::ObjectOutsideTable {
                object: "cup".to_string(),
                table: "desk".to_string()
            })
        );
        assert_eq!(
            world.add_object(Position::default(), -1.0, table, None, None),
            Err(WorldError::Geometry(GeometryError::InvalidRadius(-1.0)))
        );
    }

    #[rstest]
    fn test_invalid_parent_and_budget(mut world: World) {
        let room = world.add_room(square(10.0), None, None).unwrap();
        let table = world.add_table(square(2.0), room, None, None).unwrap();
        world.remove_room(room).unwrap();

        assert_eq!(
            world.add_random_table(room, &TableRequest::new()),
            Err(WorldError::UnknownRoom(room))
        );
        assert_eq!(
            world.add_random_object(table, &ObjectRequest::new()),
            Err(WorldError::UnknownTable(table))
        );
        assert_eq!(
            world.add_random_object(table, &ObjectRequest::new().with_max_iter(0)),
            Err(WorldError::InvalidBudget)
        );
    }

    #[rstest]
    fn test_patches_z_order(mut world: World) {
        let room = world.add_room(square(10.0), None, None).unwrap();
        let table = world.add_table(square(3.0), room, None, None).unwrap();
        world
            .add_object(Position::default(), 1.0, table, None, Some(Color::BLACK))
            .unwrap();

        let layers = world
            .patches()
            .iter()
            .map(|p| (p.name.clone(), p.z_order))
            .collect::<Vec<_>>();
        assert_eq!(
            layers,
            vec![
                ("room1".to_string(), 1),
                ("table1".to_string(), 2),
                ("table1_obj1".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_with_config() {
        let config = PlacementConfig {
            object_radius: 0.1..0.2,
            ..PlacementConfig::default()
        };
        let world = World::with_seed("configured", RNG_SEED)
            .with_config(config.clone())
            .unwrap();
        assert_eq!(world.config(), &config);

        assert!(matches!(
            World::with_seed("broken", RNG_SEED).with_config(PlacementConfig {
                table_height: 0.0..=1.0,
                ..PlacementConfig::default()
            }),
            Err(WorldError::Config(ConfigError::TableHeight(_)))
        ));
    }
}
