//! Error handling for FloorSketch
//!
//! Provides the error type shared by the geometry engine layers:
//! - Lookup failures (room, opening, wall, connection, floor plan)
//! - Selection failures for batch operations
//! - Geometry and dimension violations
//! - I/O and serialization failures at the snapshot edge
//!
//! All error types use `thiserror` for ergonomic error handling. At the
//! command boundary an error is rendered as a status string starting with
//! `Error:` (see [`SketchError::to_status`]).

use thiserror::Error;

/// Main error type for FloorSketch
#[derive(Error, Debug)]
pub enum SketchError {
    /// No floor plan has been started in the session
    #[error("No floor plan exists. Start a floor plan first")]
    NoFloorPlan,

    /// No room is currently being edited
    #[error("No room is currently selected")]
    NoActiveRoom,

    /// Room lookup failed
    #[error("Room '{id}' not found")]
    RoomNotFound {
        /// The id or name that was looked up.
        id: String,
    },

    /// Opening lookup failed
    #[error("Opening '{id}' not found in room '{room_id}'")]
    OpeningNotFound {
        /// The room that was searched.
        room_id: String,
        /// The opening id that was looked up.
        id: String,
    },

    /// Feature lookup failed
    #[error("Feature '{id}' not found in room '{room_id}'")]
    FeatureNotFound {
        /// The room that was searched.
        room_id: String,
        /// The feature id that was looked up.
        id: String,
    },

    /// Wall lookup failed
    #[error("Wall '{id}' not found")]
    WallNotFound {
        /// The wall id that was looked up.
        id: String,
    },

    /// Connection lookup failed
    #[error("Connection '{id}' not found")]
    ConnectionNotFound {
        /// The connection id that was looked up.
        id: String,
    },

    /// A batch operation was invoked with too few rooms or walls
    #[error("{operation} needs at least {required} items selected, got {actual}")]
    InsufficientSelection {
        /// Name of the batch operation.
        operation: String,
        /// Minimum number of selected items.
        required: usize,
        /// Number of items actually selected.
        actual: usize,
    },

    /// A dimension was outside its allowed range
    #[error("Invalid {field}: {value} ft ({reason})")]
    InvalidDimension {
        /// Field name, e.g. `width_ft`.
        field: String,
        /// The offending value.
        value: f64,
        /// Why the value was rejected.
        reason: String,
    },

    /// A polygon or shape violated a geometric invariant
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry {
        /// Description of the violated invariant.
        reason: String,
    },

    /// Nothing to undo or redo
    #[error("Nothing to {0}")]
    EmptyHistory(&'static str),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl SketchError {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        SketchError::Other(msg.into())
    }

    /// Shorthand for a missing room.
    pub fn room_not_found(id: impl Into<String>) -> Self {
        SketchError::RoomNotFound { id: id.into() }
    }

    /// Check if this is a lookup failure (room, opening, feature, wall, connection)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SketchError::RoomNotFound { .. }
                | SketchError::OpeningNotFound { .. }
                | SketchError::FeatureNotFound { .. }
                | SketchError::WallNotFound { .. }
                | SketchError::ConnectionNotFound { .. }
        )
    }

    /// Renders the error using the `Error:` status convention of the command boundary.
    pub fn to_status(&self) -> String {
        format!("Error: {}", self)
    }
}

/// Result type using SketchError
pub type Result<T> = std::result::Result<T, SketchError>;
