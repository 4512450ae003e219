//! # FloorSketch Designer
//!
//! Geometry and manipulation engine for building floor plans room by room.
//! It turns dictated or drawn rooms into polygons, derives the walls between
//! them, and edits the result like a small CAD tool with full undo/redo.
//!
//! ## Core Components
//!
//! ### Geometry
//! - **Shapes**: Rectangle, L-shape and T-shape polygon generation
//! - **Polygon Math**: Bounds, area, perimeter, centroid, hit testing, rotation
//! - **Positioning**: Resolving symbolic or numeric positions along a wall
//! - **Damage Zones**: Wall bands and outline footprints
//!
//! ### Walls
//! - **Wall Derivation**: Walls derived from room polygons, shared walls
//!   detected by collinear overlap and emitted once
//! - **Wall Editing**: Perpendicular wall moves constrained across every
//!   room sharing the wall, plus height/type/missing overrides
//!
//! ### Manipulation
//! - **Room Transforms**: Move, copy, rotate and resize
//! - **Batch Operations**: Align, distribute and equalize wall lengths
//! - **Snapping**: Grid, corner and alignment-guide snapping during drags
//! - **Floor Plan**: Relative placement, connections and plan bounds
//!
//! ### Support
//! - **History/Undo-Redo**: Typed operation records per editing store
//! - **Validation**: Completeness rules and structured validation results
//! - **Session**: Command dispatch with spoken status lines
//! - **Serialization**: JSON snapshot files
//!
//! ## Architecture
//!
//! ```text
//! SketchSession (command boundary)
//!   ├── FloorPlan (rooms + connections)
//!   ├── RoomManipulationStore (selection, drag, room history)
//!   │     └── Snapping
//!   └── WallStore (wall cache, wall history)
//!         └── Wall Derivation
//!
//! Geometry (pure polygon math, used by every layer)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use floorsketch_designer::{SketchCommand, SketchSession};
//!
//! let mut session = SketchSession::default();
//! session.execute(SketchCommand::StartFloorPlan { name: "Main".into() });
//! let status = session.execute(serde_json::from_str(
//!     r#"{"command":"create_room","name":"Kitchen","width_ft":10,"length_ft":12}"#,
//! )?);
//! ```

pub mod batch;
pub mod commands;
pub mod damage;
pub mod floor_plan;
pub mod geometry;
pub mod history;
pub mod manipulation;
pub mod room_store;
pub mod selection_manager;
pub mod serialization;
pub mod snapping;
pub mod validation;
pub mod wall_editing;
pub mod walls;

// Command boundary
pub mod session;

// Re-export all public types from submodules
pub use batch::{Alignment, DistributeAxis, EqualizeMode, RoomDelta};
pub use commands::{
    AttributePatch, OpeningOperation, ReshapeKind, RoomContents, RoomOperation, RoomOutline,
    RoomPatch, RoomShapeState, WallEditOperation,
};
pub use damage::{damage_zone_area, damage_zone_plan_polygons, damage_zone_polygons};
pub use floor_plan::{
    add_room, add_room_relative, connect_rooms, disconnect_rooms, find_room, find_room_at_point,
    recalculate_bounds, remove_room,
};
pub use geometry::{
    calculate_position_in_feet, generate_l_shape, generate_polygon, generate_rectangle,
    generate_t_shape, point_in_polygon, point_to_segment_distance, polygon_area,
    polygon_perimeter,
};
pub use history::{HistoryEntry, UndoRedoManager};
pub use room_store::{RoomManipulationStore, ToolMode};
pub use selection_manager::SelectionManager;
pub use serialization::{SketchFile, SketchMetadata};
pub use snapping::{snap_point, GuideKind, GuideOrientation, SnapGuide, SnapResult};
pub use validation::{
    check_completeness, is_complete, validate_room_dimensions, validate_room_geometry,
    validate_wall_placement, CompletenessIssue, IssueSeverity, IssueType, ValidationError,
    ValidationResult,
};
pub use wall_editing::{WallConstraint, WallStore};
pub use walls::{derive_walls, detect_exterior_walls, WallCache};

// Session
pub use session::{HistoryTarget, OpeningType, SketchCommand, SketchSession};
