//! Sketch snapshot files.
//!
//! A snapshot is the floor plan wrapped with a format version and metadata,
//! stored as pretty-printed JSON.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use floorsketch_core::FloorPlan;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Snapshot file format version
const FILE_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchFile {
    pub version: String,
    pub metadata: SketchMetadata,
    pub floor_plan: FloorPlan,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
}

impl SketchFile {
    pub fn new(floor_plan: FloorPlan) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: SketchMetadata {
                name: floor_plan.name.clone(),
                created: now,
                modified: now,
                author: String::new(),
                description: String::new(),
            },
            floor_plan,
        }
    }

    /// Wraps `floor_plan` under existing metadata, bumping the modification time.
    pub fn with_metadata(floor_plan: FloorPlan, mut metadata: SketchMetadata) -> Self {
        metadata.name = floor_plan.name.clone();
        metadata.modified = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata,
            floor_plan,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize sketch")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: Self = serde_json::from_str(json).context("Failed to parse sketch")?;
        if file.version != FILE_FORMAT_VERSION {
            tracing::warn!(
                "Sketch format version {} differs from {}",
                file.version,
                FILE_FORMAT_VERSION
            );
        }
        Ok(file)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write sketch to {}", path.display()))?;
        tracing::info!("Saved sketch to {}", path.display());
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sketch from {}", path.display()))?;
        let file = Self::from_json(&content)?;
        tracing::info!(
            "Loaded sketch '{}' with {} room(s)",
            file.metadata.name,
            file.floor_plan.rooms.len()
        );
        Ok(file)
    }
}
