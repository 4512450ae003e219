//! Derived wall entities.
//!
//! Walls are never stored as ground truth. They are recomputed from room
//! polygons whenever a consumer needs them, so moving a room can never leave a
//! stale wall behind.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CardinalDirection, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallOrientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallType {
    Exterior,
    Interior,
}

impl fmt::Display for WallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exterior => write!(f, "exterior"),
            Self::Interior => write!(f, "interior"),
        }
    }
}

/// A wall segment derived from one polygon edge, in floor-plan coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallEntity {
    pub id: String,
    pub start_point: Point,
    pub end_point: Point,
    pub length_ft: f64,
    pub height_ft: f64,
    pub orientation: WallOrientation,
    pub direction: CardinalDirection,
    #[serde(rename = "type")]
    pub wall_type: WallType,
    /// Every room that owns this segment; more than one when shared.
    pub room_ids: Vec<String>,
    pub parent_room_id: String,
    pub wall_index: usize,
    #[serde(default)]
    pub missing: bool,
}

impl WallEntity {
    pub fn is_shared(&self) -> bool {
        self.room_ids.len() > 1
    }

    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start_point.x + self.end_point.x) / 2.0,
            (self.start_point.y + self.end_point.y) / 2.0,
        )
    }

    /// Coordinate on the axis perpendicular to the wall's run
    /// (y for horizontal walls, x for vertical ones).
    pub fn perpendicular_coordinate(&self) -> f64 {
        let mid = self.midpoint();
        match self.orientation {
            WallOrientation::Horizontal => mid.y,
            WallOrientation::Vertical => mid.x,
        }
    }

    pub fn involves_room(&self, room_id: &str) -> bool {
        self.room_ids.iter().any(|id| id == room_id)
    }
}
