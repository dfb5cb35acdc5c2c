//! Basic building blocks.

use std::{
    f64::consts::PI,
    ops::{Add, Sub},
};

use nalgebra::{Rotation2, Vector2};
use rand::Rng;

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, position: Self) -> f64 {
        ((self.x - position.x).powi(2) + (self.y - position.y).powi(2)).sqrt()
    }

    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn norm(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    pub fn scale(&self, factor: f64) -> Position {
        Position::new(self.x * factor, self.y * factor)
    }

    pub fn rotate_vector(&self, angle: Angle) -> Position {
        let rotated = Rotation2::new(angle.0) * Vector2::new(self.x, self.y);
        Position::new(rotated.x, rotated.y)
    }
}

impl From<Position> for (f32, f32) {
    fn from(value: Position) -> Self {
        (value.x as f32, value.y as f32)
    }
}

impl From<Position> for (f64, f64) {
    fn from(value: Position) -> Self {
        (value.x, value.y)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// Angles are stored in radians. Degrees are only accepted at the boundary via
/// [`Angle::from_deg`].
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    pub fn new(radians: f64) -> Self {
        Self(radians)
    }

    pub fn from_deg(degree: f64) -> Self {
        Self(degree * PI / 180.0)
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Bounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Bounds {
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.x_min.min(other.x_min),
            self.x_max.max(other.x_max),
            self.y_min.min(other.y_min),
            self.y_max.max(other.y_max),
        )
    }

    pub fn expanded(&self, margin: f64) -> Bounds {
        Bounds::new(
            self.x_min - margin,
            self.x_max + margin,
            self.y_min - margin,
            self.y_max + margin,
        )
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x_min <= other.x_max
            && other.x_min <= self.x_max
            && self.y_min <= other.y_max
            && other.y_min <= self.y_max
    }

    /// True if `other` lies on at least one of the four extremes of `self`.
    pub fn shares_extreme(&self, other: &Bounds) -> bool {
        self.x_min == other.x_min
            || self.x_max == other.x_max
            || self.y_min == other.y_min
            || self.y_max == other.y_max
    }
}

/// Visualization color, each channel in the range `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const GREY: Color = Color::new(0.4, 0.4, 0.4);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.random(), rng.random(), rng.random())
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn b(&self) -> f64 {
        self.b
    }
}

impl From<(f64, f64, f64)> for Color {
    fn from((r, g, b): (f64, f64, f64)) -> Self {
        Self::new(r, g, b)
    }
}
