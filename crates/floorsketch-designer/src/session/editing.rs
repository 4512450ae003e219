//! Wall edits and undo/redo.

use floorsketch_core::{format_feet_inches, Result, SketchError, WallType};

use super::{require_plan, HistoryTarget, SketchSession};
use crate::commands::WallEditOperation;

impl SketchSession {
    /// Commits a planned wall edit; `None` means there was nothing to change.
    fn commit_wall_op(&mut self, op: Option<WallEditOperation>) -> Result<bool> {
        let Some(op) = op else {
            return Ok(false);
        };
        let plan = require_plan(&self.floor_plan)?;
        let rooms = self.wall_store.apply(&plan.rooms, op);
        self.replace_rooms(rooms);
        Ok(true)
    }

    pub(super) fn move_wall(
        &mut self,
        wall_id: &str,
        coordinate_ft: Option<f64>,
        delta_ft: Option<f64>,
    ) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let wall = self.wall_store.find_wall(&plan.rooms, wall_id)?;
        let target = match (coordinate_ft, delta_ft) {
            (Some(coordinate), _) => coordinate,
            (None, Some(delta)) => wall.perpendicular_coordinate() + delta,
            (None, None) => {
                return Err(SketchError::other(
                    "Moving a wall needs a coordinate or a distance",
                ))
            }
        };
        let op = self
            .wall_store
            .plan_move_wall(&plan.rooms, wall_id, target)?;
        if !self.commit_wall_op(op)? {
            return Ok(format!("The {} wall cannot move any further", wall.direction));
        }

        let plan = require_plan(&self.floor_plan)?;
        let moved = self
            .wall_store
            .find_wall(&plan.rooms, wall_id)
            .map(|w| w.perpendicular_coordinate())
            .unwrap_or(target);
        Ok(format!(
            "Moved the {} wall of {} to {}",
            wall.direction,
            self.room_name(&wall.parent_room_id),
            format_feet_inches(moved)
        ))
    }

    pub(super) fn set_wall_height(&mut self, wall_id: &str, height_ft: f64) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let op = self
            .wall_store
            .plan_update_wall_height(&plan.rooms, wall_id, height_ft)?;
        self.commit_wall_op(op)?;
        Ok(format!("Wall height set to {}", format_feet_inches(height_ft)))
    }

    pub(super) fn set_wall_type(
        &mut self,
        wall_id: &str,
        wall_type: Option<WallType>,
    ) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let op = self
            .wall_store
            .plan_update_wall_type(&plan.rooms, wall_id, wall_type)?;
        self.commit_wall_op(op)?;
        Ok(match wall_type {
            Some(t) => format!("Wall marked {}", t),
            None => "Wall type reset".to_string(),
        })
    }

    pub(super) fn set_wall_missing(&mut self, wall_id: &str, missing: bool) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let op = self
            .wall_store
            .plan_set_wall_missing(&plan.rooms, wall_id, missing)?;
        self.commit_wall_op(op)?;
        Ok(if missing {
            "Wall marked missing".to_string()
        } else {
            "Wall restored".to_string()
        })
    }

    pub(super) fn undo(&mut self, target: HistoryTarget) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let (rooms, description) = match target {
            HistoryTarget::Rooms => {
                let description = self.room_store.history().undo_description();
                (self.room_store.undo(&plan.rooms)?, description)
            }
            HistoryTarget::Walls => {
                let description = self.wall_store.history().undo_description();
                (self.wall_store.undo(&plan.rooms)?, description)
            }
        };
        self.replace_rooms(rooms);
        Ok(format!("Undid {}", description.unwrap_or_default().to_lowercase()))
    }

    pub(super) fn redo(&mut self, target: HistoryTarget) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let (rooms, description) = match target {
            HistoryTarget::Rooms => {
                let description = self.room_store.history().redo_description();
                (self.room_store.redo(&plan.rooms)?, description)
            }
            HistoryTarget::Walls => {
                let description = self.wall_store.history().redo_description();
                (self.wall_store.redo(&plan.rooms)?, description)
            }
        };
        self.replace_rooms(rooms);
        Ok(format!("Redid {}", description.unwrap_or_default().to_lowercase()))
    }
}
