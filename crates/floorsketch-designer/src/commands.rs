//! Operation records for undo/redo.
//!
//! Every mutation issued through a store is captured as a typed record
//! holding just enough previous/new state to reverse or replay it. Records
//! apply to a room list in place; the stores clone the caller's rooms first,
//! so callers always get a new list back.

use std::collections::BTreeMap;

use floorsketch_core::{
    DamageZone, Feature, LShapeConfig, Opening, Point, RoomGeometry, RoomShape, TShapeConfig,
    WallAttributes,
};
use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;
use crate::manipulation::shift_frame;

/// Polygon-derived state of a room: everything a rotate, resize, equalize
/// or wall move can change. The plan origin is not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomOutline {
    pub shape: RoomShape,
    pub width_ft: f64,
    pub length_ft: f64,
    pub polygon: Vec<Point>,
    pub l_shape_config: Option<LShapeConfig>,
    pub t_shape_config: Option<TShapeConfig>,
    pub wall_attributes: BTreeMap<usize, WallAttributes>,
}

impl RoomOutline {
    pub fn capture(room: &RoomGeometry) -> Self {
        Self {
            shape: room.shape,
            width_ft: room.width_ft,
            length_ft: room.length_ft,
            polygon: room.polygon.clone(),
            l_shape_config: room.l_shape_config,
            t_shape_config: room.t_shape_config,
            wall_attributes: room.wall_attributes.clone(),
        }
    }

    pub fn restore(&self, room: &mut RoomGeometry) {
        room.shape = self.shape;
        room.width_ft = self.width_ft;
        room.length_ft = self.length_ft;
        room.polygon = self.polygon.clone();
        room.l_shape_config = self.l_shape_config;
        room.t_shape_config = self.t_shape_config;
        room.wall_attributes = self.wall_attributes.clone();
    }
}

/// Openings, features and damage zones of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomContents {
    pub openings: Vec<Opening>,
    pub features: Vec<Feature>,
    pub damage_zones: Vec<DamageZone>,
}

impl RoomContents {
    pub fn capture(room: &RoomGeometry) -> Self {
        Self {
            openings: room.openings.clone(),
            features: room.features.clone(),
            damage_zones: room.damage_zones.clone(),
        }
    }

    pub fn restore(&self, room: &mut RoomGeometry) {
        room.openings = self.openings.clone();
        room.features = self.features.clone();
        room.damage_zones = self.damage_zones.clone();
    }
}

/// The parts of a room a reshape touched. Parts left `None` are not
/// restored, so undoing one edit never rolls back an unrelated later one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomShapeState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<RoomOutline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<RoomContents>,
}

impl RoomShapeState {
    pub fn capture(room: &RoomGeometry, kind: ReshapeKind) -> Self {
        Self {
            outline: kind.changes_outline().then(|| RoomOutline::capture(room)),
            contents: kind.changes_contents().then(|| RoomContents::capture(room)),
        }
    }

    pub fn restore(&self, room: &mut RoomGeometry) {
        if let Some(outline) = &self.outline {
            outline.restore(room);
        }
        if let Some(contents) = &self.contents {
            contents.restore(room);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReshapeKind {
    Rotate,
    Resize,
    Equalize,
    /// Features or damage zones added to a placed room.
    Contents,
}

impl ReshapeKind {
    pub fn changes_outline(self) -> bool {
        !matches!(self, ReshapeKind::Contents)
    }

    /// Rotation relabels the walls of openings, features and damage.
    pub fn changes_contents(self) -> bool {
        matches!(self, ReshapeKind::Rotate | ReshapeKind::Contents)
    }
}

/// Add, remove, move or resize of a single opening. `previous: None` means
/// the opening was added, `new: None` means it was removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningOperation {
    pub room_id: String,
    pub opening_id: String,
    pub previous: Option<Opening>,
    pub new: Option<Opening>,
}

impl OpeningOperation {
    fn set(rooms: &mut [RoomGeometry], room_id: &str, opening_id: &str, state: &Option<Opening>) {
        let Some(room) = rooms.iter_mut().find(|r| r.id == room_id) else {
            return;
        };
        let index = room.openings.iter().position(|o| o.id == opening_id);
        match (index, state) {
            (Some(i), Some(opening)) => room.openings[i] = opening.clone(),
            (Some(i), None) => {
                room.openings.remove(i);
            }
            (None, Some(opening)) => room.openings.push(opening.clone()),
            (None, None) => {}
        }
    }

    pub fn apply(&self, rooms: &mut [RoomGeometry]) {
        Self::set(rooms, &self.room_id, &self.opening_id, &self.new);
    }

    pub fn undo(&self, rooms: &mut [RoomGeometry]) {
        Self::set(rooms, &self.room_id, &self.opening_id, &self.previous);
    }
}

/// Room-manipulation store operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RoomOperation {
    Move {
        room_id: String,
        dx: f64,
        dy: f64,
    },
    /// A copied room; undo removes it by id, redo re-inserts the same room.
    Copy {
        room: RoomGeometry,
    },
    Reshape {
        room_id: String,
        kind: ReshapeKind,
        previous: RoomShapeState,
        new: RoomShapeState,
    },
    Opening(OpeningOperation),
    /// Several operations applied atomically (align, distribute, equalize).
    Batch {
        name: String,
        operations: Vec<RoomOperation>,
    },
}

impl RoomOperation {
    pub fn apply(&self, rooms: &mut Vec<RoomGeometry>) {
        match self {
            RoomOperation::Move { room_id, dx, dy } => {
                if let Some(room) = rooms.iter_mut().find(|r| &r.id == room_id) {
                    room.origin_x_ft += dx;
                    room.origin_y_ft += dy;
                }
            }
            RoomOperation::Copy { room } => {
                if !rooms.iter().any(|r| r.id == room.id) {
                    rooms.push(room.clone());
                }
            }
            RoomOperation::Reshape { room_id, new, .. } => {
                if let Some(room) = rooms.iter_mut().find(|r| &r.id == room_id) {
                    new.restore(room);
                }
            }
            RoomOperation::Opening(op) => op.apply(rooms),
            RoomOperation::Batch { operations, .. } => {
                for op in operations {
                    op.apply(rooms);
                }
            }
        }
    }

    pub fn undo(&self, rooms: &mut Vec<RoomGeometry>) {
        match self {
            RoomOperation::Move { room_id, dx, dy } => {
                if let Some(room) = rooms.iter_mut().find(|r| &r.id == room_id) {
                    room.origin_x_ft -= dx;
                    room.origin_y_ft -= dy;
                }
            }
            RoomOperation::Copy { room } => rooms.retain(|r| r.id != room.id),
            RoomOperation::Reshape {
                room_id, previous, ..
            } => {
                if let Some(room) = rooms.iter_mut().find(|r| &r.id == room_id) {
                    previous.restore(room);
                }
            }
            RoomOperation::Opening(op) => op.undo(rooms),
            RoomOperation::Batch { operations, .. } => {
                for op in operations.iter().rev() {
                    op.undo(rooms);
                }
            }
        }
    }

    /// Ids of every room this operation touches.
    pub fn room_ids(&self) -> Vec<&str> {
        match self {
            RoomOperation::Move { room_id, .. } | RoomOperation::Reshape { room_id, .. } => {
                vec![room_id.as_str()]
            }
            RoomOperation::Copy { room } => vec![room.id.as_str()],
            RoomOperation::Opening(op) => vec![op.room_id.as_str()],
            RoomOperation::Batch { operations, .. } => {
                operations.iter().flat_map(|op| op.room_ids()).collect()
            }
        }
    }
}

impl HistoryEntry for RoomOperation {
    fn description(&self) -> String {
        match self {
            RoomOperation::Move { room_id, .. } => format!("Move {}", room_id),
            RoomOperation::Copy { room } => format!("Copy {}", room.name),
            RoomOperation::Reshape { room_id, kind, .. } => match kind {
                ReshapeKind::Rotate => format!("Rotate {}", room_id),
                ReshapeKind::Resize => format!("Resize {}", room_id),
                ReshapeKind::Equalize => format!("Equalize walls of {}", room_id),
                ReshapeKind::Contents => format!("Edit contents of {}", room_id),
            },
            RoomOperation::Opening(op) => match (&op.previous, &op.new) {
                (None, Some(o)) => format!("Add {}", o.kind.name()),
                (Some(o), None) => format!("Remove {}", o.kind.name()),
                (Some(o), Some(_)) => format!("Edit {}", o.kind.name()),
                (None, None) => "Opening".to_string(),
            },
            RoomOperation::Batch { name, .. } => name.clone(),
        }
    }
}

/// Before/after outline of one room touched by a wall move. `shift` is the
/// frame shift from re-normalizing the polygon; it is applied and reversed
/// as a delta so room moves made in between survive an undo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPatch {
    pub room_id: String,
    pub previous: RoomOutline,
    pub new: RoomOutline,
    #[serde(default)]
    pub shift: Point,
}

impl RoomPatch {
    fn apply(&self, rooms: &mut [RoomGeometry]) {
        if let Some(room) = rooms.iter_mut().find(|r| r.id == self.room_id) {
            self.new.restore(room);
            shift_frame(room, self.shift);
        }
    }

    fn undo(&self, rooms: &mut [RoomGeometry]) {
        if let Some(room) = rooms.iter_mut().find(|r| r.id == self.room_id) {
            self.previous.restore(room);
            shift_frame(room, Point::new(-self.shift.x, -self.shift.y));
        }
    }
}

/// Before/after attribute overrides of one polygon edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributePatch {
    pub room_id: String,
    pub wall_index: usize,
    pub previous: Option<WallAttributes>,
    pub new: Option<WallAttributes>,
}

impl AttributePatch {
    fn set(&self, rooms: &mut [RoomGeometry], state: Option<WallAttributes>) {
        if let Some(room) = rooms.iter_mut().find(|r| r.id == self.room_id) {
            match state {
                Some(attrs) if !attrs.is_empty() => {
                    room.wall_attributes.insert(self.wall_index, attrs);
                }
                _ => {
                    room.wall_attributes.remove(&self.wall_index);
                }
            }
        }
    }
}

/// Wall store operations. A shared wall edit carries one patch per
/// participating room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum WallEditOperation {
    Move {
        wall_id: String,
        patches: Vec<RoomPatch>,
    },
    Attributes {
        wall_id: String,
        name: String,
        patches: Vec<AttributePatch>,
    },
}

impl WallEditOperation {
    pub fn apply(&self, rooms: &mut [RoomGeometry]) {
        match self {
            WallEditOperation::Move { patches, .. } => {
                for patch in patches {
                    patch.apply(rooms);
                }
            }
            WallEditOperation::Attributes { patches, .. } => {
                for patch in patches {
                    patch.set(rooms, patch.new);
                }
            }
        }
    }

    pub fn undo(&self, rooms: &mut [RoomGeometry]) {
        match self {
            WallEditOperation::Move { patches, .. } => {
                for patch in patches.iter().rev() {
                    patch.undo(rooms);
                }
            }
            WallEditOperation::Attributes { patches, .. } => {
                for patch in patches.iter().rev() {
                    patch.set(rooms, patch.previous);
                }
            }
        }
    }
}

impl HistoryEntry for WallEditOperation {
    fn description(&self) -> String {
        match self {
            WallEditOperation::Move { wall_id, .. } => format!("Move wall {}", wall_id),
            WallEditOperation::Attributes { name, .. } => name.clone(),
        }
    }
}
