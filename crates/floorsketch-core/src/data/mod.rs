//! Building data model
//!
//! All lengths are decimal feet. Room polygons are room-local; a room's
//! `origin_x_ft`/`origin_y_ft` places it in floor-plan space. The y axis
//! grows towards the south (screen space), so the north wall of a room is
//! its minimum-y edge.

mod floor_plan;
mod room;
mod wall;

pub use floor_plan::{ConnectionPoint, ConnectionType, FloorPlan, RoomConnection};
pub use room::{
    DamageSeverity, DamageType, DamageZone, DoorStyle, Feature, FeaturePlacement, FeatureType,
    LShapeConfig, NotchCorner, Opening, OpeningKind, PositionFrom, PositionSpec, RoomGeometry,
    RoomShape, SwingDirection, SymbolicPosition, TShapeConfig, WallAttributes,
};
pub use wall::{WallEntity, WallOrientation, WallType};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generates a unique identifier with a readable prefix, e.g. `room-1f0c…`.
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

/// A 2D point in feet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// True when both coordinates are within `tolerance` of `other`.
    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounding box of a point set, `None` when empty.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Bounds::new(first.x, first.y, first.x, first.y);
        Some(points.iter().skip(1).fold(init, |b, p| {
            Bounds::new(
                b.min_x.min(p.x),
                b.min_y.min(p.y),
                b.max_x.max(p.x),
                b.max_y.max(p.y),
            )
        }))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center_x(&self) -> f64 {
        (self.min_x + self.max_x) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.min_y + self.max_y) / 2.0
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Bounds {
        Bounds::new(
            self.min_x + dx,
            self.min_y + dy,
            self.max_x + dx,
            self.max_y + dy,
        )
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Compass direction of a wall, measured as the direction its outward face points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardinalDirection {
    North,
    East,
    South,
    West,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::East,
        CardinalDirection::South,
        CardinalDirection::West,
    ];

    /// Rotates clockwise by `quarter_turns` (north -> east -> south -> west -> north).
    pub fn rotated(self, quarter_turns: u32) -> Self {
        let index = match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        };
        Self::ALL[(index + quarter_turns as usize) % 4]
    }

    pub fn opposite(self) -> Self {
        self.rotated(2)
    }

    /// North and south walls run horizontally.
    pub fn runs_horizontally(self) -> bool {
        matches!(self, Self::North | Self::South)
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::North => write!(f, "north"),
            Self::East => write!(f, "east"),
            Self::South => write!(f, "south"),
            Self::West => write!(f, "west"),
        }
    }
}

impl FromStr for CardinalDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" | "n" | "top" => Ok(Self::North),
            "east" | "e" | "right" => Ok(Self::East),
            "south" | "s" | "bottom" => Ok(Self::South),
            "west" | "w" | "left" => Ok(Self::West),
            _ => Err(format!("Unknown wall direction: {}", s)),
        }
    }
}
