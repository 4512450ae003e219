//! Command parameter records accepted by [`SketchSession::execute`].
//!
//! These are what the voice grammar or the UI hands to the engine. They are
//! plain serde records tagged by `command`, so a replay script is a JSON
//! array of them.
//!
//! [`SketchSession::execute`]: super::SketchSession::execute

use floorsketch_core::{
    CardinalDirection, ConnectionType, DamageSeverity, DamageType, DoorStyle, FeatureType,
    LShapeConfig, OpeningKind, Point, PositionFrom, PositionSpec, RoomShape, SwingDirection,
    TShapeConfig, WallType,
};
use serde::{Deserialize, Serialize};

use crate::batch::{Alignment, DistributeAxis, EqualizeMode};

/// Opening family as spoken; sill height and door details come alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningType {
    Door,
    Window,
    Archway,
    PassThrough,
}

impl OpeningType {
    /// Default sill height used when a window is dictated without one.
    const DEFAULT_WINDOW_SILL_FT: f64 = 3.0;
    const DEFAULT_PASS_THROUGH_SILL_FT: f64 = 3.5;

    pub(crate) fn into_kind(
        self,
        sill_height_ft: Option<f64>,
        style: Option<DoorStyle>,
        swing: Option<SwingDirection>,
    ) -> OpeningKind {
        match self {
            Self::Door => OpeningKind::Door {
                style: style.unwrap_or_default(),
                swing: swing.unwrap_or_default(),
            },
            Self::Window => OpeningKind::Window {
                sill_height_ft: sill_height_ft.unwrap_or(Self::DEFAULT_WINDOW_SILL_FT),
            },
            Self::Archway => OpeningKind::Archway,
            Self::PassThrough => OpeningKind::PassThrough {
                sill_height_ft: sill_height_ft.unwrap_or(Self::DEFAULT_PASS_THROUGH_SILL_FT),
            },
        }
    }

    pub(crate) fn default_height_ft(self) -> f64 {
        match self {
            Self::Door | Self::Archway => 6.67,
            Self::Window => 4.0,
            Self::PassThrough => 2.0,
        }
    }
}

/// Which undo stack a history command targets. The room and wall stores
/// keep separate histories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryTarget {
    #[default]
    Rooms,
    Walls,
}

/// One engine command. Room references accept an id or a room name; where
/// `room` is optional, the room currently being sketched is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SketchCommand {
    // ---- floor plan ----
    StartFloorPlan {
        name: String,
    },
    /// Starts sketching a new room. It joins the floor plan on
    /// `complete_room` or `add_room_relative`.
    CreateRoom {
        name: String,
        #[serde(default)]
        shape: RoomShape,
        width_ft: f64,
        length_ft: f64,
        #[serde(default)]
        ceiling_height_ft: Option<f64>,
        #[serde(default)]
        l_shape_config: Option<LShapeConfig>,
        #[serde(default)]
        t_shape_config: Option<TShapeConfig>,
    },
    /// Places the room being sketched at an absolute position, or at the
    /// origin when none is given.
    CompleteRoom {
        #[serde(default)]
        x_ft: Option<f64>,
        #[serde(default)]
        y_ft: Option<f64>,
    },
    /// Places the room being sketched against a wall of an existing room.
    AddRoomRelative {
        reference: String,
        direction: CardinalDirection,
        #[serde(default)]
        gap_ft: Option<f64>,
    },
    RemoveRoom {
        room: String,
    },
    ConnectRooms {
        from_room: String,
        from_wall: CardinalDirection,
        #[serde(default)]
        from_position_ft: Option<f64>,
        to_room: String,
        to_wall: CardinalDirection,
        #[serde(default)]
        to_position_ft: Option<f64>,
        #[serde(default)]
        connection_type: ConnectionType,
    },
    DisconnectRooms {
        connection_id: String,
    },

    // ---- room contents ----
    AddOpening {
        #[serde(default)]
        room: Option<String>,
        #[serde(rename = "type")]
        opening_type: OpeningType,
        wall: CardinalDirection,
        width_ft: f64,
        #[serde(default)]
        height_ft: Option<f64>,
        #[serde(default)]
        position: PositionSpec,
        #[serde(default)]
        position_from: PositionFrom,
        #[serde(default)]
        sill_height_ft: Option<f64>,
        #[serde(default)]
        style: Option<DoorStyle>,
        #[serde(default)]
        swing: Option<SwingDirection>,
    },
    MoveOpening {
        room: String,
        opening_id: String,
        #[serde(default)]
        wall: Option<CardinalDirection>,
        position: PositionSpec,
        #[serde(default)]
        position_from: PositionFrom,
    },
    ResizeOpening {
        room: String,
        opening_id: String,
        width_ft: f64,
        height_ft: f64,
    },
    RemoveOpening {
        room: String,
        opening_id: String,
    },
    /// Adds a feature against `wall`, or freestanding at the given offsets
    /// when no wall is named.
    AddFeature {
        #[serde(default)]
        room: Option<String>,
        feature_type: FeatureType,
        width_ft: f64,
        depth_ft: f64,
        #[serde(default)]
        height_ft: Option<f64>,
        #[serde(default)]
        wall: Option<CardinalDirection>,
        #[serde(default)]
        position: PositionSpec,
        #[serde(default)]
        position_from: PositionFrom,
        #[serde(default)]
        x_offset_ft: Option<f64>,
        #[serde(default)]
        y_offset_ft: Option<f64>,
    },
    MarkDamage {
        #[serde(default)]
        room: Option<String>,
        damage_type: DamageType,
        #[serde(default)]
        severity: DamageSeverity,
        #[serde(default)]
        affected_walls: Vec<CardinalDirection>,
        #[serde(default)]
        extent_ft: f64,
        #[serde(default)]
        polygon: Option<Vec<Point>>,
        #[serde(default)]
        water_category: Option<u8>,
        #[serde(default)]
        notes: String,
    },

    // ---- room manipulation ----
    MoveRoom {
        room: String,
        dx_ft: f64,
        dy_ft: f64,
    },
    SetRoomPosition {
        room: String,
        x_ft: f64,
        y_ft: f64,
    },
    CopyRoom {
        room: String,
    },
    RotateRoom {
        room: String,
        degrees: i32,
    },
    ResizeRoom {
        room: String,
        width_ft: f64,
        length_ft: f64,
    },
    SnapRoom {
        room: String,
    },
    SelectRooms {
        rooms: Vec<String>,
        #[serde(default)]
        add: bool,
    },
    SelectAt {
        x_ft: f64,
        y_ft: f64,
        #[serde(default)]
        multi: bool,
    },
    ClearSelection,
    /// Aligns `rooms`, or the current selection when none are named.
    AlignRooms {
        alignment: Alignment,
        #[serde(default)]
        rooms: Option<Vec<String>>,
    },
    DistributeRooms {
        axis: DistributeAxis,
        #[serde(default)]
        rooms: Option<Vec<String>>,
    },
    EqualizeWalls {
        walls: Vec<String>,
        mode: EqualizeMode,
    },

    // ---- wall editing ----
    /// Moves a wall to an absolute perpendicular coordinate, or by a delta.
    MoveWall {
        wall_id: String,
        #[serde(default)]
        coordinate_ft: Option<f64>,
        #[serde(default)]
        delta_ft: Option<f64>,
    },
    SetWallHeight {
        wall_id: String,
        height_ft: f64,
    },
    SetWallType {
        wall_id: String,
        #[serde(default)]
        wall_type: Option<WallType>,
    },
    SetWallMissing {
        wall_id: String,
        missing: bool,
    },

    // ---- history ----
    Undo {
        #[serde(default)]
        target: HistoryTarget,
    },
    Redo {
        #[serde(default)]
        target: HistoryTarget,
    },

    // ---- queries ----
    ValidateRoom {
        #[serde(default)]
        room: Option<String>,
    },
    CheckCompleteness,
    ListWalls,
    Summary,
}

impl SketchCommand {
    /// Name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartFloorPlan { .. } => "start_floor_plan",
            Self::CreateRoom { .. } => "create_room",
            Self::CompleteRoom { .. } => "complete_room",
            Self::AddRoomRelative { .. } => "add_room_relative",
            Self::RemoveRoom { .. } => "remove_room",
            Self::ConnectRooms { .. } => "connect_rooms",
            Self::DisconnectRooms { .. } => "disconnect_rooms",
            Self::AddOpening { .. } => "add_opening",
            Self::MoveOpening { .. } => "move_opening",
            Self::ResizeOpening { .. } => "resize_opening",
            Self::RemoveOpening { .. } => "remove_opening",
            Self::AddFeature { .. } => "add_feature",
            Self::MarkDamage { .. } => "mark_damage",
            Self::MoveRoom { .. } => "move_room",
            Self::SetRoomPosition { .. } => "set_room_position",
            Self::CopyRoom { .. } => "copy_room",
            Self::RotateRoom { .. } => "rotate_room",
            Self::ResizeRoom { .. } => "resize_room",
            Self::SnapRoom { .. } => "snap_room",
            Self::SelectRooms { .. } => "select_rooms",
            Self::SelectAt { .. } => "select_at",
            Self::ClearSelection => "clear_selection",
            Self::AlignRooms { .. } => "align_rooms",
            Self::DistributeRooms { .. } => "distribute_rooms",
            Self::EqualizeWalls { .. } => "equalize_walls",
            Self::MoveWall { .. } => "move_wall",
            Self::SetWallHeight { .. } => "set_wall_height",
            Self::SetWallType { .. } => "set_wall_type",
            Self::SetWallMissing { .. } => "set_wall_missing",
            Self::Undo { .. } => "undo",
            Self::Redo { .. } => "redo",
            Self::ValidateRoom { .. } => "validate_room",
            Self::CheckCompleteness => "check_completeness",
            Self::ListWalls => "list_walls",
            Self::Summary => "summary",
        }
    }
}
