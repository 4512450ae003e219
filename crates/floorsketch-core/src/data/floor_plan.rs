//! Floor plan aggregate and room connections.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Bounds, CardinalDirection, RoomGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    #[default]
    Door,
    Opening,
    Hallway,
    Stairway,
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Door => write!(f, "door"),
            Self::Opening => write!(f, "opening"),
            Self::Hallway => write!(f, "hallway"),
            Self::Stairway => write!(f, "stairway"),
        }
    }
}

/// One side of a connection: a position along a named wall of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionPoint {
    pub room_id: String,
    pub wall: CardinalDirection,
    pub position_ft: f64,
}

/// A semantic link between two rooms, independent of geometric adjacency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomConnection {
    pub id: String,
    pub from: ConnectionPoint,
    pub to: ConnectionPoint,
    #[serde(default)]
    pub connection_type: ConnectionType,
}

impl RoomConnection {
    pub fn involves_room(&self, room_id: &str) -> bool {
        self.from.room_id == room_id || self.to.room_id == room_id
    }
}

/// All rooms of one level, placed in a shared coordinate space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rooms: Vec<RoomGeometry>,
    #[serde(default)]
    pub connections: Vec<RoomConnection>,
    /// Aggregate size, refreshed by `recalculate_bounds`.
    #[serde(default)]
    pub width_ft: f64,
    #[serde(default)]
    pub length_ft: f64,
    #[serde(default)]
    pub min_x_ft: f64,
    #[serde(default)]
    pub min_y_ft: f64,
}

impl FloorPlan {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rooms: Vec::new(),
            connections: Vec::new(),
            width_ft: 0.0,
            length_ft: 0.0,
            min_x_ft: 0.0,
            min_y_ft: 0.0,
        }
    }

    /// Finds a room by id or (case-insensitive) name.
    pub fn room(&self, id_or_name: &str) -> Option<&RoomGeometry> {
        self.rooms
            .iter()
            .find(|r| r.id == id_or_name)
            .or_else(|| self.rooms.iter().find(|r| r.matches(id_or_name)))
    }

    pub fn room_mut(&mut self, id_or_name: &str) -> Option<&mut RoomGeometry> {
        let index = self
            .rooms
            .iter()
            .position(|r| r.id == id_or_name)
            .or_else(|| self.rooms.iter().position(|r| r.matches(id_or_name)))?;
        self.rooms.get_mut(index)
    }

    pub fn connection(&self, id: &str) -> Option<&RoomConnection> {
        self.connections.iter().find(|c| c.id == id)
    }

    /// Plan-wide bounds as last computed.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.min_x_ft,
            self.min_y_ft,
            self.min_x_ft + self.width_ft,
            self.min_y_ft + self.length_ft,
        )
    }
}
