//! FloorSketch Settings Crate
//!
//! Handles engine configuration: snapping thresholds, wall-editing limits,
//! floor-plan placement defaults, validation ranges and history depth, with
//! JSON/TOML persistence.

pub mod config;
pub mod error;

pub use config::{
    Config, FloorPlanSettings, HistorySettings, SnappingConfig, ValidationSettings,
    WallEditSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
