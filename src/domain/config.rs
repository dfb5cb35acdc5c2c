//! Placement configuration, size presets and placement requests.

use std::{
    ops::{Range, RangeInclusive},
    str::FromStr,
};

use rand::Rng;
use thiserror::Error;

use super::{Angle, Color, GeometryError, DEFAULT_SAMPLE_TRIES};

pub const DEFAULT_TABLE_CLEARANCE: f64 = 0.5;
pub const DEFAULT_TABLE_MAX_ITER: usize = 50_000;
pub const DEFAULT_OBJECT_CLEARANCE: f64 = 0.1;
pub const DEFAULT_OBJECT_MAX_ITER: usize = 1_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown size preset {0:?}, expected \"small\", \"medium\" or \"large\"")]
pub struct UnknownPreset(pub String);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid table width range {0:?}")]
    TableWidth(RangeInclusive<f64>),
    #[error("invalid table height range {0:?}")]
    TableHeight(RangeInclusive<f64>),
    #[error("invalid object radius range {0:?}")]
    ObjectRadius(Range<f64>),
    #[error("at least one sample per point is required")]
    SampleTries,
}

/// Ranges used when a request leaves the size of a table or object open.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementConfig {
    pub table_width: RangeInclusive<f64>,
    pub table_height: RangeInclusive<f64>,
    pub object_radius: Range<f64>,
    /// Draws per point sample, see [`super::sample_point_in_polygon`].
    pub sample_tries: usize,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            table_width: 4.0..=10.0,
            table_height: 2.0..=5.0,
            object_radius: 0.5..2.5,
            sample_tries: DEFAULT_SAMPLE_TRIES,
        }
    }
}

impl PlacementConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = |start: f64, end: f64| {
            start.is_finite() && end.is_finite() && start > 0.0 && start <= end
        };

        if !valid(*self.table_width.start(), *self.table_width.end()) {
            return Err(ConfigError::TableWidth(self.table_width.clone()));
        }
        if !valid(*self.table_height.start(), *self.table_height.end()) {
            return Err(ConfigError::TableHeight(self.table_height.clone()));
        }
        if !valid(self.object_radius.start, self.object_radius.end)
            || self.object_radius.is_empty()
        {
            return Err(ConfigError::ObjectRadius(self.object_radius.clone()));
        }
        if self.sample_tries == 0 {
            return Err(ConfigError::SampleTries);
        }
        Ok(())
    }

    pub fn random_table_dims<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        (
            rng.random_range(self.table_width.clone()),
            rng.random_range(self.table_height.clone()),
        )
    }

    pub fn random_object_radius<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.object_radius.clone())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum TableSize {
    Small,
    Medium,
    Large,
    Custom { width: f64, height: f64 },
}

impl TableSize {
    /// (width, height) of the table.
    pub fn dims(&self) -> Result<(f64, f64), GeometryError> {
        let (width, height) = match *self {
            TableSize::Small => (1.0, 2.0),
            TableSize::Medium => (1.0, 3.0),
            TableSize::Large => (2.0, 4.0),
            TableSize::Custom { width, height } => (width, height),
        };
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok((width, height))
        } else {
            Err(GeometryError::InvalidDimensions { width, height })
        }
    }
}

impl FromStr for TableSize {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(TableSize::Small),
            "medium" => Ok(TableSize::Medium),
            "large" => Ok(TableSize::Large),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum ObjectSize {
    Small,
    Medium,
    Large,
    Radius(f64),
}

impl ObjectSize {
    pub fn radius(&self) -> Result<f64, GeometryError> {
        let radius = match *self {
            ObjectSize::Small => 1.0,
            ObjectSize::Medium => 2.0,
            ObjectSize::Large => 3.0,
            ObjectSize::Radius(radius) => radius,
        };
        if radius.is_finite() && radius > 0.0 {
            Ok(radius)
        } else {
            Err(GeometryError::InvalidRadius(radius))
        }
    }
}

impl FromStr for ObjectSize {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(ObjectSize::Small),
            "medium" => Ok(ObjectSize::Medium),
            "large" => Ok(ObjectSize::Large),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

/// Parameters of a random table placement. Unset size and angle are drawn anew on every
/// attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct TableRequest {
    pub name: Option<String>,
    pub color: Option<Color>,
    pub min_clearance: f64,
    pub size: Option<TableSize>,
    pub angle: Option<Angle>,
    pub max_iter: usize,
}

impl Default for TableRequest {
    fn default() -> Self {
        Self {
            name: None,
            color: None,
            min_clearance: DEFAULT_TABLE_CLEARANCE,
            size: None,
            angle: None,
            max_iter: DEFAULT_TABLE_MAX_ITER,
        }
    }
}

impl TableRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn with_color(self, color: Color) -> Self {
        Self {
            color: Some(color),
            ..self
        }
    }

    pub fn with_min_clearance(self, min_clearance: f64) -> Self {
        Self {
            min_clearance,
            ..self
        }
    }

    pub fn with_size(self, size: TableSize) -> Self {
        Self {
            size: Some(size),
            ..self
        }
    }

    pub fn with_angle(self, angle: Angle) -> Self {
        Self {
            angle: Some(angle),
            ..self
        }
    }

    pub fn with_max_iter(self, max_iter: usize) -> Self {
        Self { max_iter, ..self }
    }
}

/// Parameters of a random object placement. An unset radius is drawn anew on every attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectRequest {
    pub name: Option<String>,
    pub color: Option<Color>,
    pub min_clearance: f64,
    pub size: Option<ObjectSize>,
    pub max_iter: usize,
}

impl Default for ObjectRequest {
    fn default() -> Self {
        Self {
            name: None,
            color: None,
            min_clearance: DEFAULT_OBJECT_CLEARANCE,
            size: None,
            max_iter: DEFAULT_OBJECT_MAX_ITER,
        }
    }
}

impl ObjectRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn with_color(self, color: Color) -> Self {
        Self {
            color: Some(color),
            ..self
        }
    }

    pub fn with_min_clearance(self, min_clearance: f64) -> Self {
        Self {
            min_clearance,
            ..self
        }
    }

    pub fn with_size(self, size: ObjectSize) -> Self {
        Self {
            size: Some(size),
            ..self
        }
    }

    pub fn with_max_iter(self, max_iter: usize) -> Self {
        Self { max_iter, ..self }
    }
}
