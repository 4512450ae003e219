//! # FloorSketch
//!
//! A floor plan sketching engine for building room-by-room plans from
//! spoken or typed commands:
//! - Rectangle, L-shaped and T-shaped rooms with doors, windows, features
//!   and damage zones
//! - Rooms placed relative to each other, with shared walls detected
//!   automatically
//! - CAD-style editing: move, copy, rotate, resize, align, distribute,
//!   wall dragging and snapping, all undoable
//!
//! ## Architecture
//!
//! FloorSketch is organized as a workspace with multiple crates:
//!
//! 1. **floorsketch-core** - Data model, errors, feet/inch units
//! 2. **floorsketch-settings** - Engine configuration and persistence
//! 3. **floorsketch-designer** - Geometry, walls, manipulation stores, session
//! 4. **floorsketch** - Command-line driver that integrates all crates

pub use floorsketch_core as model;
pub use floorsketch_designer as designer;
pub use floorsketch_settings as settings;

pub use floorsketch_core::{
    format_feet_inches, parse_feet_inches, CardinalDirection, FloorPlan, Opening, Point, Result,
    RoomGeometry, RoomShape, SketchError, WallEntity, WallType,
};

pub use floorsketch_designer::{
    check_completeness, derive_walls, is_complete, CompletenessIssue, IssueSeverity,
    SketchCommand, SketchFile, SketchSession,
};

pub use floorsketch_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatting on stderr, so command output on stdout stays clean
/// - RUST_LOG environment variable support
/// - INFO as the default level
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
