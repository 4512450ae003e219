//! Configuration and settings management for FloorSketch
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Snapping thresholds (grid, corner, alignment guides)
//! - Wall editing limits (minimum room size, grid, shared-wall tolerance)
//! - Floor plan placement defaults (gaps, copy offset, ceiling height)
//! - Validation ranges used by the completeness checks
//! - Undo/redo history depth

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Snapping thresholds consulted on every drag update.
///
/// All distances are in feet. They are configuration rather than constants so
/// hosts can tune them per device and zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnappingConfig {
    /// Master switch
    pub enabled: bool,
    /// Round candidate points to the grid
    pub grid_enabled: bool,
    pub grid_size_ft: f64,
    /// Snap onto other rooms' corners
    pub corner_enabled: bool,
    pub corner_threshold_ft: f64,
    /// Snap to other rooms' edges and centers, emitting guides
    pub alignment_enabled: bool,
    pub alignment_threshold_ft: f64,
}

impl Default for SnappingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            grid_enabled: true,
            grid_size_ft: 0.5,
            corner_enabled: true,
            corner_threshold_ft: 0.5,
            alignment_enabled: true,
            alignment_threshold_ft: 0.25,
        }
    }
}

/// Limits applied when walls are dragged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallEditSettings {
    /// Smallest extent a room may shrink to across a moved wall
    pub min_room_size_ft: f64,
    pub snap_to_grid: bool,
    pub grid_size_ft: f64,
    /// Distance under which two segments count as the same wall
    pub shared_wall_tolerance_ft: f64,
}

impl Default for WallEditSettings {
    fn default() -> Self {
        Self {
            min_room_size_ft: 2.0,
            snap_to_grid: true,
            grid_size_ft: 0.5,
            shared_wall_tolerance_ft: 0.1,
        }
    }
}

/// Defaults for composing rooms into a floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorPlanSettings {
    /// Gap left between a room and the neighbour it is placed against
    pub default_gap_ft: f64,
    /// Offset applied to copied rooms on both axes
    pub copy_offset_ft: f64,
    pub default_ceiling_height_ft: f64,
}

impl Default for FloorPlanSettings {
    fn default() -> Self {
        Self {
            default_gap_ft: 0.0,
            copy_offset_ft: 2.0,
            default_ceiling_height_ft: 8.0,
        }
    }
}

/// Ranges used by the completeness rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub min_ceiling_height_ft: f64,
    pub max_ceiling_height_ft: f64,
    pub min_dimension_ft: f64,
    pub max_dimension_ft: f64,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            min_ceiling_height_ft: 6.0,
            max_ceiling_height_ft: 20.0,
            min_dimension_ft: 3.0,
            max_dimension_ft: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undoable operations kept per store
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 50 }
    }
}

/// Complete engine configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub snapping: SnappingConfig,
    pub wall_editing: WallEditSettings,
    pub floor_plan: FloorPlanSettings,
    pub validation: ValidationSettings,
    pub history: HistorySettings,
}

fn positive(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

fn non_negative(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

fn ordered(key: &str, min: f64, max: f64) -> ConfigResult<()> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange {
            key: key.to_string(),
            min,
            max,
        })
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/floorsketch/config.toml`).
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("floorsketch").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the config at `path`, or fall back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let s = &self.snapping;
        positive("snapping.grid_size_ft", s.grid_size_ft)?;
        non_negative("snapping.corner_threshold_ft", s.corner_threshold_ft)?;
        non_negative("snapping.alignment_threshold_ft", s.alignment_threshold_ft)?;

        let w = &self.wall_editing;
        positive("wall_editing.min_room_size_ft", w.min_room_size_ft)?;
        positive("wall_editing.grid_size_ft", w.grid_size_ft)?;
        non_negative(
            "wall_editing.shared_wall_tolerance_ft",
            w.shared_wall_tolerance_ft,
        )?;

        let f = &self.floor_plan;
        non_negative("floor_plan.default_gap_ft", f.default_gap_ft)?;
        non_negative("floor_plan.copy_offset_ft", f.copy_offset_ft)?;
        positive(
            "floor_plan.default_ceiling_height_ft",
            f.default_ceiling_height_ft,
        )?;

        let v = &self.validation;
        ordered(
            "validation.ceiling_height_ft",
            v.min_ceiling_height_ft,
            v.max_ceiling_height_ft,
        )?;
        ordered(
            "validation.dimension_ft",
            v.min_dimension_ft,
            v.max_dimension_ft,
        )?;

        if self.history.max_depth == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "history.max_depth".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(())
    }
}
