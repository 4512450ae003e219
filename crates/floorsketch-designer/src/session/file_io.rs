//! Snapshot save/load for the session.

use std::path::Path;

use anyhow::Context;

use super::SketchSession;
use crate::serialization::SketchFile;

impl SketchSession {
    /// Saves the floor plan. The creation time of a previously loaded or
    /// saved snapshot is kept.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let plan = self
            .floor_plan
            .clone()
            .context("No floor plan to save")?;
        let file = match self.file_metadata.take() {
            Some(metadata) => SketchFile::with_metadata(plan, metadata),
            None => SketchFile::new(plan),
        };
        let result = file.save_to_file(&path);
        self.file_metadata = Some(file.metadata);
        result?;
        self.current_file_path = Some(path.as_ref().to_path_buf());
        Ok(())
    }

    /// Replaces the session's floor plan with a snapshot. Both histories and
    /// the selection are cleared; an unfinished room is kept.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let file = SketchFile::load_from_file(&path)?;
        self.floor_plan = Some(file.floor_plan);
        self.file_metadata = Some(file.metadata);
        self.room_store.clear_history();
        self.room_store.selection_mut().clear();
        self.wall_store.clear_history();
        self.current_file_path = Some(path.as_ref().to_path_buf());
        Ok(())
    }

    pub fn current_file_path(&self) -> Option<&Path> {
        self.current_file_path.as_deref()
    }
}
