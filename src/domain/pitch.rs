//! Pitch reference frames and locations expressed against them.
//!
//! A [`Location`] carries the [`Pitch`] it was measured on. Raw coordinates
//! from two different pitches must go through [`Location::relative`] before
//! they can be compared.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Orientation of a pitch axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Whether coordinates along this axis grow against the canonical sense
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::Down | Direction::Left)
    }
}

/// Dimensions and orientation of a coordinate system.
///
/// Units are provider specific: metres for some, the unit square for others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pitch {
    pub length: f64,
    pub width: f64,
    #[serde(default = "default_length_direction")]
    pub length_direction: Direction,
    #[serde(default = "default_width_direction")]
    pub width_direction: Direction,
}

fn default_length_direction() -> Direction {
    Direction::Up
}

fn default_width_direction() -> Direction {
    Direction::Right
}

impl Pitch {
    pub fn new(length: f64, width: f64) -> Self {
        Self {
            length,
            width,
            length_direction: default_length_direction(),
            width_direction: default_width_direction(),
        }
    }

    pub fn with_length_direction(mut self, direction: Direction) -> Self {
        self.length_direction = direction;
        self
    }

    pub fn with_width_direction(mut self, direction: Direction) -> Self {
        self.width_direction = direction;
        self
    }

    /// Unit square pitch, as used by providers reporting fractions of the field
    pub fn unit() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// A point on a specific pitch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    pub pitch: Arc<Pitch>,
}

impl Location {
    pub fn new(x: f64, y: f64, z: Option<f64>, pitch: Arc<Pitch>) -> Self {
        Self { x, y, z, pitch }
    }

    /// Coordinate-system origin of `pitch`
    pub fn origin(pitch: Arc<Pitch>) -> Self {
        Self::new(0.0, 0.0, None, pitch)
    }

    /// Position as fractions of the pitch, oriented so that values from
    /// differently oriented pitches can be compared directly.
    pub fn relative(&self) -> (f64, f64) {
        let mut fx = if self.pitch.length == 0.0 {
            0.0
        } else {
            self.x / self.pitch.length
        };
        let mut fy = if self.pitch.width == 0.0 {
            0.0
        } else {
            self.y / self.pitch.width
        };
        if self.pitch.length_direction.is_reversed() {
            fx = 1.0 - fx;
        }
        if self.pitch.width_direction.is_reversed() {
            fy = 1.0 - fy;
        }
        (fx, fy)
    }
}
