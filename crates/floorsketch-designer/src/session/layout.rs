//! Floor plan composition and room manipulation commands.

use floorsketch_core::{
    format_feet_inches, CardinalDirection, ConnectionPoint, ConnectionType, Point, Result,
    RoomGeometry, SketchError,
};

use super::{require_plan, require_plan_mut, SketchSession};
use crate::batch::{Alignment, DistributeAxis, EqualizeMode};
use crate::commands::RoomOperation;
use crate::floor_plan::{self, find_room};
use crate::snapping::SnapResult;

/// Unspecified positions sit at the middle of the wall.
fn connection_point(
    rooms: &[RoomGeometry],
    (room, wall, position): (&str, CardinalDirection, Option<f64>),
) -> Result<ConnectionPoint> {
    let found = find_room(rooms, room).ok_or_else(|| SketchError::room_not_found(room))?;
    Ok(ConnectionPoint {
        room_id: found.id.clone(),
        wall,
        position_ft: position.unwrap_or_else(|| found.wall_length(wall) / 2.0),
    })
}

impl SketchSession {
    pub(super) fn add_room_relative(
        &mut self,
        reference: &str,
        direction: CardinalDirection,
        gap_ft: Option<f64>,
    ) -> Result<String> {
        let gap = gap_ft.unwrap_or(self.config.floor_plan.default_gap_ft);
        let plan = require_plan_mut(&mut self.floor_plan)?;
        let room = self.current_room.take().ok_or(SketchError::NoActiveRoom)?;
        let name = room.name.clone();
        if let Err(e) = floor_plan::add_room_relative(plan, room.clone(), reference, direction, gap)
        {
            // Keep the sketch so the user can pick another reference.
            self.current_room = Some(room);
            return Err(e);
        }
        Ok(format!(
            "Added {} {} of {}",
            name,
            direction,
            self.room_name(reference)
        ))
    }

    pub(super) fn remove_room(&mut self, room: &str) -> Result<String> {
        let plan = require_plan_mut(&mut self.floor_plan)?;
        let removed = floor_plan::remove_room(plan, room)?;
        self.room_store
            .selection_mut()
            .retain_existing(&plan.rooms);
        Ok(format!("Removed {}", removed.name))
    }

    pub(super) fn connect_rooms(
        &mut self,
        from: (&str, CardinalDirection, Option<f64>),
        to: (&str, CardinalDirection, Option<f64>),
        connection_type: ConnectionType,
    ) -> Result<String> {
        let plan = require_plan_mut(&mut self.floor_plan)?;
        let from_point = connection_point(&plan.rooms, from)?;
        let to_point = connection_point(&plan.rooms, to)?;
        floor_plan::connect_rooms(plan, from_point, to_point, connection_type)?;
        Ok(format!(
            "Connected {} to {} with a {}",
            self.room_name(from.0),
            self.room_name(to.0),
            connection_type
        ))
    }

    pub(super) fn disconnect_rooms(&mut self, connection_id: &str) -> Result<String> {
        let plan = require_plan_mut(&mut self.floor_plan)?;
        let removed = floor_plan::disconnect_rooms(plan, connection_id)?;
        Ok(format!("Removed {} connection", removed.connection_type))
    }

    /// Commits a planned room operation against the plan rooms.
    fn commit_room_op(&mut self, op: RoomOperation) -> Result<()> {
        let plan = require_plan(&self.floor_plan)?;
        let rooms = self.room_store.commit(&plan.rooms, op);
        self.replace_rooms(rooms);
        Ok(())
    }

    pub(super) fn move_room(&mut self, room: &str, dx_ft: f64, dy_ft: f64) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let op = self.room_store.plan_move(&plan.rooms, room, dx_ft, dy_ft)?;
        self.commit_room_op(op)?;
        Ok(format!(
            "Moved {} by {} east and {} south",
            self.room_name(room),
            format_feet_inches(dx_ft),
            format_feet_inches(dy_ft)
        ))
    }

    pub(super) fn set_room_position(&mut self, room: &str, x_ft: f64, y_ft: f64) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let op = self
            .room_store
            .plan_set_position(&plan.rooms, room, x_ft, y_ft)?;
        self.commit_room_op(op)?;
        Ok(format!(
            "Placed {} at {}, {}",
            self.room_name(room),
            format_feet_inches(x_ft),
            format_feet_inches(y_ft)
        ))
    }

    pub(super) fn copy_room(&mut self, room: &str) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let op = self.room_store.plan_copy(&plan.rooms, room)?;
        let copy_id = match &op {
            RoomOperation::Copy { room } => Some(room.id.clone()),
            _ => None,
        };
        self.commit_room_op(op)?;
        if let Some(id) = copy_id {
            self.room_store.selection_mut().select(id);
        }
        Ok(format!("Copied {}", self.room_name(room)))
    }

    pub(super) fn rotate_room(&mut self, room: &str, degrees: i32) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let op = self.room_store.plan_rotate(&plan.rooms, room, degrees)?;
        self.commit_room_op(op)?;
        Ok(format!("Rotated {} {} degrees", self.room_name(room), degrees))
    }

    pub(super) fn resize_room(&mut self, room: &str, width_ft: f64, length_ft: f64) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let op = self
            .room_store
            .plan_resize(&plan.rooms, room, width_ft, length_ft)?;
        self.commit_room_op(op)?;
        Ok(format!(
            "Resized {} to {} by {}",
            self.room_name(room),
            format_feet_inches(width_ft),
            format_feet_inches(length_ft)
        ))
    }

    pub(super) fn snap_room(&mut self, room: &str) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let op = self.room_store.plan_snap_to_neighbors(&plan.rooms, room)?;
        if let RoomOperation::Move { dx, dy, .. } = &op {
            if *dx == 0.0 && *dy == 0.0 {
                return Ok(format!("{} is already aligned", self.room_name(room)));
            }
        }
        self.commit_room_op(op)?;
        Ok(format!("Snapped {} to its neighbours", self.room_name(room)))
    }

    pub(super) fn select_rooms(&mut self, rooms: &[String], add: bool) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let mut ids = Vec::with_capacity(rooms.len());
        for room in rooms {
            let found =
                find_room(&plan.rooms, room).ok_or_else(|| SketchError::room_not_found(room))?;
            ids.push(found.id.clone());
        }
        let selection = self.room_store.selection_mut();
        if !add {
            selection.clear();
        }
        for id in ids {
            selection.add(id);
        }
        Ok(format!("{} room(s) selected", selection.len()))
    }

    pub(super) fn select_at(&mut self, x_ft: f64, y_ft: f64, multi: bool) -> String {
        let rooms = self
            .floor_plan
            .as_ref()
            .map(|p| p.rooms.as_slice())
            .unwrap_or_default();
        let picked = self
            .room_store
            .selection_mut()
            .select_at_point(rooms, &Point::new(x_ft, y_ft), multi);
        match picked {
            Some(id) => format!("Selected {}", self.room_name(&id)),
            None => "No room there".to_string(),
        }
    }

    /// Selects `rooms` first when given, so batch commands can name their
    /// targets directly.
    fn select_for_batch(&mut self, rooms: Option<&[String]>) -> Result<Vec<String>> {
        if let Some(rooms) = rooms {
            self.select_rooms(rooms, false)?;
        }
        Ok(self.room_store.selection().selected_ids().to_vec())
    }

    pub(super) fn align_rooms(
        &mut self,
        alignment: Alignment,
        rooms: Option<&[String]>,
    ) -> Result<String> {
        let ids = self.select_for_batch(rooms)?;
        let plan = require_plan(&self.floor_plan)?;
        let op = self.room_store.plan_align(&plan.rooms, &ids, alignment)?;
        self.commit_room_op(op)?;
        Ok(format!("Aligned {} rooms {}", ids.len(), alignment))
    }

    pub(super) fn distribute_rooms(
        &mut self,
        axis: DistributeAxis,
        rooms: Option<&[String]>,
    ) -> Result<String> {
        let ids = self.select_for_batch(rooms)?;
        let plan = require_plan(&self.floor_plan)?;
        let op = self.room_store.plan_distribute(&plan.rooms, &ids, axis)?;
        self.commit_room_op(op)?;
        let axis = match axis {
            DistributeAxis::Horizontal => "horizontally",
            DistributeAxis::Vertical => "vertically",
        };
        Ok(format!("Distributed {} rooms {}", ids.len(), axis))
    }

    pub(super) fn equalize_walls(&mut self, wall_ids: &[String], mode: EqualizeMode) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let walls = wall_ids
            .iter()
            .map(|id| self.wall_store.find_wall(&plan.rooms, id))
            .collect::<Result<Vec<_>>>()?;
        let op = self.room_store.plan_equalize(&plan.rooms, &walls, mode)?;
        self.commit_room_op(op)?;
        Ok(format!("Equalized {} walls", walls.len()))
    }

    // ---- drag ----

    /// Starts dragging a placed room from plan-space point `(x, y)`.
    pub fn start_drag(&mut self, room: &str, x_ft: f64, y_ft: f64) -> Result<()> {
        let plan = require_plan(&self.floor_plan)?;
        self.room_store
            .start_drag(&plan.rooms, room, Point::new(x_ft, y_ft))
    }

    /// Applies a pointer update to the dragged room and returns the snap
    /// result for guide rendering.
    pub fn update_drag(&mut self, x_ft: f64, y_ft: f64) -> Result<Option<SnapResult>> {
        let plan = require_plan(&self.floor_plan)?;
        let (rooms, snap) = self
            .room_store
            .update_drag(&plan.rooms, Point::new(x_ft, y_ft));
        self.replace_rooms(rooms);
        Ok(snap)
    }

    /// Finishes the drag; the whole drag undoes as one move.
    pub fn end_drag(&mut self) -> Option<RoomOperation> {
        self.room_store.end_drag()
    }

    /// Abandons the drag and restores the rooms as they were at its start.
    pub fn cancel_drag(&mut self) {
        if let Some(rooms) = self.room_store.cancel_drag() {
            self.replace_rooms(rooms);
        }
    }
}
