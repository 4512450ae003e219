//! Room manipulation store.
//!
//! Owns the editing state of one sketch session: selection, tool mode,
//! snapping configuration, the in-progress drag and the room-level undo
//! history. Every mutating call takes the current rooms and returns a new
//! list; the input is never modified.
//!
//! Each operation exists in two forms. `plan_*` methods validate the request
//! and build the operation record, reporting problems as errors. The plain
//! methods (`move_room`, `align_selected`, ...) commit the record, or log a
//! warning and return the rooms unchanged when the request cannot be served.

use floorsketch_core::{
    CardinalDirection, DamageZone, Feature, Opening, Point, PositionFrom, PositionSpec, Result,
    RoomGeometry, SketchError, WallEntity,
};
use floorsketch_settings::{Config, SnappingConfig};
use serde::{Deserialize, Serialize};

use crate::batch::{self, Alignment, DistributeAxis, EqualizeMode, RoomDelta};
use crate::commands::{OpeningOperation, ReshapeKind, RoomOperation, RoomShapeState};
use crate::floor_plan::find_room;
use crate::history::{HistoryEntry, UndoRedoManager};
use crate::manipulation;
use crate::selection_manager::SelectionManager;
use crate::snapping::{snap_point, snap_room_bounds, SnapResult};

/// Active pointer tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolMode {
    #[default]
    Select,
    Move,
    Rotate,
    WallEdit,
    Pan,
}

#[derive(Debug, Clone)]
struct DragState {
    room_id: String,
    /// Rooms as they were when the drag started; restored on cancel.
    snapshot: Vec<RoomGeometry>,
    /// Snapped pointer position of the previous update.
    reference: Point,
    net_dx: f64,
    net_dy: f64,
}

#[derive(Debug, Clone)]
pub struct RoomManipulationStore {
    selection: SelectionManager,
    tool_mode: ToolMode,
    snapping: SnappingConfig,
    copy_offset_ft: f64,
    history: UndoRedoManager<RoomOperation>,
    drag: Option<DragState>,
}

impl Default for RoomManipulationStore {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

fn lookup<'a>(rooms: &'a [RoomGeometry], id_or_name: &str) -> Result<&'a RoomGeometry> {
    find_room(rooms, id_or_name).ok_or_else(|| SketchError::room_not_found(id_or_name))
}

fn moves(name: String, deltas: Vec<RoomDelta>) -> RoomOperation {
    RoomOperation::Batch {
        name,
        operations: deltas
            .into_iter()
            .filter(|d| d.dx != 0.0 || d.dy != 0.0)
            .map(|d| RoomOperation::Move {
                room_id: d.room_id,
                dx: d.dx,
                dy: d.dy,
            })
            .collect(),
    }
}

impl RoomManipulationStore {
    pub fn new(snapping: SnappingConfig, copy_offset_ft: f64, max_history: usize) -> Self {
        Self {
            selection: SelectionManager::new(),
            tool_mode: ToolMode::default(),
            snapping,
            copy_offset_ft,
            history: UndoRedoManager::new(max_history),
            drag: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.snapping,
            config.floor_plan.copy_offset_ft,
            config.history.max_depth,
        )
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionManager {
        &mut self.selection
    }

    pub fn tool_mode(&self) -> ToolMode {
        self.tool_mode
    }

    pub fn set_tool_mode(&mut self, mode: ToolMode) {
        if self.drag.is_some() {
            tracing::debug!("Tool mode changed during drag; drag state kept");
        }
        self.tool_mode = mode;
    }

    pub fn snapping_config(&self) -> &SnappingConfig {
        &self.snapping
    }

    /// Thresholds are tuned per device and zoom level by the host.
    pub fn set_snapping_config(&mut self, config: SnappingConfig) {
        self.snapping = config;
    }

    pub fn copy_offset_ft(&self) -> f64 {
        self.copy_offset_ft
    }

    pub fn history(&self) -> &UndoRedoManager<RoomOperation> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Applies `op` to a copy of `rooms` and records it.
    pub fn commit(&mut self, rooms: &[RoomGeometry], op: RoomOperation) -> Vec<RoomGeometry> {
        let mut updated = rooms.to_vec();
        op.apply(&mut updated);
        tracing::info!("{}", op.description());
        self.history.record(op);
        updated
    }

    fn commit_or_keep(
        &mut self,
        rooms: &[RoomGeometry],
        planned: Result<RoomOperation>,
    ) -> Vec<RoomGeometry> {
        match planned {
            Ok(op) => self.commit(rooms, op),
            Err(e) => {
                tracing::warn!("{}", e);
                rooms.to_vec()
            }
        }
    }

    // ---- single-room transforms ----

    pub fn plan_move(
        &self,
        rooms: &[RoomGeometry],
        room_id: &str,
        dx: f64,
        dy: f64,
    ) -> Result<RoomOperation> {
        let room = lookup(rooms, room_id)?;
        Ok(RoomOperation::Move {
            room_id: room.id.clone(),
            dx,
            dy,
        })
    }

    pub fn move_room(
        &mut self,
        rooms: &[RoomGeometry],
        room_id: &str,
        dx: f64,
        dy: f64,
    ) -> Vec<RoomGeometry> {
        let planned = self.plan_move(rooms, room_id, dx, dy);
        self.commit_or_keep(rooms, planned)
    }

    pub fn plan_set_position(
        &self,
        rooms: &[RoomGeometry],
        room_id: &str,
        x_ft: f64,
        y_ft: f64,
    ) -> Result<RoomOperation> {
        let room = lookup(rooms, room_id)?;
        Ok(RoomOperation::Move {
            room_id: room.id.clone(),
            dx: x_ft - room.origin_x_ft,
            dy: y_ft - room.origin_y_ft,
        })
    }

    pub fn set_room_position(
        &mut self,
        rooms: &[RoomGeometry],
        room_id: &str,
        x_ft: f64,
        y_ft: f64,
    ) -> Vec<RoomGeometry> {
        let planned = self.plan_set_position(rooms, room_id, x_ft, y_ft);
        self.commit_or_keep(rooms, planned)
    }

    pub fn plan_copy(&self, rooms: &[RoomGeometry], room_id: &str) -> Result<RoomOperation> {
        let room = lookup(rooms, room_id)?;
        Ok(RoomOperation::Copy {
            room: manipulation::copy_room(room, self.copy_offset_ft, self.copy_offset_ft),
        })
    }

    /// Copies a room and selects the copy.
    pub fn copy_room(&mut self, rooms: &[RoomGeometry], room_id: &str) -> Vec<RoomGeometry> {
        match self.plan_copy(rooms, room_id) {
            Ok(op) => {
                if let RoomOperation::Copy { room } = &op {
                    self.selection.select(room.id.clone());
                }
                self.commit(rooms, op)
            }
            Err(e) => {
                tracing::warn!("{}", e);
                rooms.to_vec()
            }
        }
    }

    fn reshape(
        room: &RoomGeometry,
        kind: ReshapeKind,
        updated: &RoomGeometry,
    ) -> RoomOperation {
        RoomOperation::Reshape {
            room_id: room.id.clone(),
            kind,
            previous: RoomShapeState::capture(room, kind),
            new: RoomShapeState::capture(updated, kind),
        }
    }

    pub fn plan_rotate(
        &self,
        rooms: &[RoomGeometry],
        room_id: &str,
        degrees: i32,
    ) -> Result<RoomOperation> {
        let room = lookup(rooms, room_id)?;
        let rotated = manipulation::rotate_room(room, degrees)?;
        Ok(Self::reshape(room, ReshapeKind::Rotate, &rotated))
    }

    pub fn rotate_room(
        &mut self,
        rooms: &[RoomGeometry],
        room_id: &str,
        degrees: i32,
    ) -> Vec<RoomGeometry> {
        let planned = self.plan_rotate(rooms, room_id, degrees);
        self.commit_or_keep(rooms, planned)
    }

    pub fn plan_resize(
        &self,
        rooms: &[RoomGeometry],
        room_id: &str,
        width_ft: f64,
        length_ft: f64,
    ) -> Result<RoomOperation> {
        let room = lookup(rooms, room_id)?;
        let resized = manipulation::resize_room(room, width_ft, length_ft)?;
        Ok(Self::reshape(room, ReshapeKind::Resize, &resized))
    }

    pub fn resize_room(
        &mut self,
        rooms: &[RoomGeometry],
        room_id: &str,
        width_ft: f64,
        length_ft: f64,
    ) -> Vec<RoomGeometry> {
        let planned = self.plan_resize(rooms, room_id, width_ft, length_ft);
        self.commit_or_keep(rooms, planned)
    }

    /// Nudges a room so its edges or centers line up with its neighbours.
    pub fn plan_snap_to_neighbors(
        &self,
        rooms: &[RoomGeometry],
        room_id: &str,
    ) -> Result<RoomOperation> {
        let room = lookup(rooms, room_id)?;
        let (dx, dy, guides) = snap_room_bounds(room, rooms, &self.snapping);
        tracing::debug!("Room bounds snap produced {} guide(s)", guides.len());
        Ok(RoomOperation::Move {
            room_id: room.id.clone(),
            dx,
            dy,
        })
    }

    pub fn snap_to_neighbors(&mut self, rooms: &[RoomGeometry], room_id: &str) -> Vec<RoomGeometry> {
        match self.plan_snap_to_neighbors(rooms, room_id) {
            Ok(RoomOperation::Move { dx, dy, .. }) if dx == 0.0 && dy == 0.0 => rooms.to_vec(),
            planned => self.commit_or_keep(rooms, planned),
        }
    }

    // ---- openings ----

    pub fn plan_add_opening(
        &self,
        rooms: &[RoomGeometry],
        room_id: &str,
        opening: Opening,
    ) -> Result<RoomOperation> {
        let room = lookup(rooms, room_id)?;
        Ok(RoomOperation::Opening(OpeningOperation {
            room_id: room.id.clone(),
            opening_id: opening.id.clone(),
            previous: None,
            new: Some(opening),
        }))
    }

    pub fn add_opening(
        &mut self,
        rooms: &[RoomGeometry],
        room_id: &str,
        opening: Opening,
    ) -> Vec<RoomGeometry> {
        let planned = self.plan_add_opening(rooms, room_id, opening);
        self.commit_or_keep(rooms, planned)
    }

    /// Builds an edit of an existing opening; `edit` mutates a copy.
    pub fn plan_update_opening(
        &self,
        rooms: &[RoomGeometry],
        room_id: &str,
        opening_id: &str,
        edit: impl FnOnce(&mut Opening),
    ) -> Result<RoomOperation> {
        let room = lookup(rooms, room_id)?;
        let previous = room
            .opening(opening_id)
            .ok_or_else(|| SketchError::OpeningNotFound {
                room_id: room.id.clone(),
                id: opening_id.to_string(),
            })?;
        let mut updated = previous.clone();
        edit(&mut updated);
        Ok(RoomOperation::Opening(OpeningOperation {
            room_id: room.id.clone(),
            opening_id: opening_id.to_string(),
            previous: Some(previous.clone()),
            new: Some(updated),
        }))
    }

    pub fn plan_remove_opening(
        &self,
        rooms: &[RoomGeometry],
        room_id: &str,
        opening_id: &str,
    ) -> Result<RoomOperation> {
        let room = lookup(rooms, room_id)?;
        let previous = room
            .opening(opening_id)
            .ok_or_else(|| SketchError::OpeningNotFound {
                room_id: room.id.clone(),
                id: opening_id.to_string(),
            })?;
        Ok(RoomOperation::Opening(OpeningOperation {
            room_id: room.id.clone(),
            opening_id: opening_id.to_string(),
            previous: Some(previous.clone()),
            new: None,
        }))
    }

    pub fn remove_opening(
        &mut self,
        rooms: &[RoomGeometry],
        room_id: &str,
        opening_id: &str,
    ) -> Vec<RoomGeometry> {
        let planned = self.plan_remove_opening(rooms, room_id, opening_id);
        self.commit_or_keep(rooms, planned)
    }

    /// Moves an opening along its wall, or onto another wall.
    pub fn move_opening(
        &mut self,
        rooms: &[RoomGeometry],
        room_id: &str,
        opening_id: &str,
        wall: Option<CardinalDirection>,
        position: PositionSpec,
        position_from: PositionFrom,
    ) -> Vec<RoomGeometry> {
        let planned = self.plan_update_opening(rooms, room_id, opening_id, |o| {
            if let Some(wall) = wall {
                o.wall = wall;
            }
            o.position = position;
            o.position_from = position_from;
        });
        self.commit_or_keep(rooms, planned)
    }

    pub fn resize_opening(
        &mut self,
        rooms: &[RoomGeometry],
        room_id: &str,
        opening_id: &str,
        width_ft: f64,
        height_ft: f64,
    ) -> Vec<RoomGeometry> {
        let planned = if width_ft > 0.0 && height_ft > 0.0 {
            self.plan_update_opening(rooms, room_id, opening_id, |o| {
                o.width_ft = width_ft;
                o.height_ft = height_ft;
            })
        } else {
            Err(SketchError::InvalidDimension {
                field: "opening size".to_string(),
                value: width_ft.min(height_ft),
                reason: "must be greater than zero".to_string(),
            })
        };
        self.commit_or_keep(rooms, planned)
    }

    // ---- features and damage ----

    /// Builds an edit of a placed room's features or damage zones.
    pub fn plan_edit_contents(
        &self,
        rooms: &[RoomGeometry],
        room_id: &str,
        edit: impl FnOnce(&mut RoomGeometry),
    ) -> Result<RoomOperation> {
        let room = lookup(rooms, room_id)?;
        let mut updated = room.clone();
        edit(&mut updated);
        Ok(Self::reshape(room, ReshapeKind::Contents, &updated))
    }

    pub fn add_feature(
        &mut self,
        rooms: &[RoomGeometry],
        room_id: &str,
        feature: Feature,
    ) -> Vec<RoomGeometry> {
        let planned = self.plan_edit_contents(rooms, room_id, |room| room.features.push(feature));
        self.commit_or_keep(rooms, planned)
    }

    pub fn mark_damage(
        &mut self,
        rooms: &[RoomGeometry],
        room_id: &str,
        zone: DamageZone,
    ) -> Vec<RoomGeometry> {
        let planned = self.plan_edit_contents(rooms, room_id, |room| room.damage_zones.push(zone));
        self.commit_or_keep(rooms, planned)
    }

    // ---- batch operations ----

    pub fn plan_align(
        &self,
        rooms: &[RoomGeometry],
        ids: &[String],
        alignment: Alignment,
    ) -> Result<RoomOperation> {
        let deltas = batch::align_rooms(rooms, ids, alignment)?;
        Ok(moves(format!("Align {}", alignment), deltas))
    }

    /// Aligns the current selection; fewer than two rooms is a no-op.
    pub fn align_selected(
        &mut self,
        rooms: &[RoomGeometry],
        alignment: Alignment,
    ) -> Vec<RoomGeometry> {
        let ids = self.selection.selected_ids().to_vec();
        let planned = self.plan_align(rooms, &ids, alignment);
        self.commit_or_keep(rooms, planned)
    }

    pub fn plan_distribute(
        &self,
        rooms: &[RoomGeometry],
        ids: &[String],
        axis: DistributeAxis,
    ) -> Result<RoomOperation> {
        let deltas = batch::distribute_rooms(rooms, ids, axis)?;
        let name = match axis {
            DistributeAxis::Horizontal => "Distribute horizontally",
            DistributeAxis::Vertical => "Distribute vertically",
        };
        Ok(moves(name.to_string(), deltas))
    }

    /// Distributes the current selection; fewer than three rooms is a no-op.
    pub fn distribute_selected(
        &mut self,
        rooms: &[RoomGeometry],
        axis: DistributeAxis,
    ) -> Vec<RoomGeometry> {
        let ids = self.selection.selected_ids().to_vec();
        let planned = self.plan_distribute(rooms, &ids, axis);
        self.commit_or_keep(rooms, planned)
    }

    pub fn plan_equalize(
        &self,
        rooms: &[RoomGeometry],
        walls: &[WallEntity],
        mode: EqualizeMode,
    ) -> Result<RoomOperation> {
        let reshaped = batch::equalize_walls(rooms, walls, mode)?;
        let operations = reshaped
            .iter()
            .filter_map(|updated| {
                rooms
                    .iter()
                    .find(|r| r.id == updated.id)
                    .map(|original| Self::reshape(original, ReshapeKind::Equalize, updated))
            })
            .collect();
        Ok(RoomOperation::Batch {
            name: "Equalize wall lengths".to_string(),
            operations,
        })
    }

    pub fn equalize_walls(
        &mut self,
        rooms: &[RoomGeometry],
        walls: &[WallEntity],
        mode: EqualizeMode,
    ) -> Vec<RoomGeometry> {
        let planned = self.plan_equalize(rooms, walls, mode);
        self.commit_or_keep(rooms, planned)
    }

    // ---- drag ----

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn dragged_room_id(&self) -> Option<&str> {
        self.drag.as_ref().map(|d| d.room_id.as_str())
    }

    /// Starts dragging a room from plan-space point `start`.
    pub fn start_drag(
        &mut self,
        rooms: &[RoomGeometry],
        room_id: &str,
        start: Point,
    ) -> Result<()> {
        let room = lookup(rooms, room_id)?;
        let reference = snap_point(start, rooms, Some(&room.id), &self.snapping).point;
        self.selection.select(room.id.clone());
        self.drag = Some(DragState {
            room_id: room.id.clone(),
            snapshot: rooms.to_vec(),
            reference,
            net_dx: 0.0,
            net_dy: 0.0,
        });
        tracing::debug!("Drag started on {}", room.id);
        Ok(())
    }

    /// Moves the dragged room by the snapped pointer delta since the previous
    /// update, then makes the snapped point the new reference. Returns the
    /// updated rooms and the snap result (for guides). Without an active
    /// drag the rooms come back unchanged.
    pub fn update_drag(
        &mut self,
        rooms: &[RoomGeometry],
        pointer: Point,
    ) -> (Vec<RoomGeometry>, Option<SnapResult>) {
        let Some(drag) = self.drag.as_mut() else {
            return (rooms.to_vec(), None);
        };
        let snapped = snap_point(pointer, rooms, Some(&drag.room_id), &self.snapping);
        let dx = snapped.point.x - drag.reference.x;
        let dy = snapped.point.y - drag.reference.y;
        drag.reference = snapped.point;
        drag.net_dx += dx;
        drag.net_dy += dy;

        let mut updated = rooms.to_vec();
        if let Some(room) = updated.iter_mut().find(|r| r.id == drag.room_id) {
            room.origin_x_ft += dx;
            room.origin_y_ft += dy;
        }
        (updated, Some(snapped))
    }

    /// Finishes the drag, recording a single move for the net displacement.
    /// Returns the recorded operation, if the room actually moved.
    pub fn end_drag(&mut self) -> Option<RoomOperation> {
        let drag = self.drag.take()?;
        if drag.net_dx == 0.0 && drag.net_dy == 0.0 {
            return None;
        }
        let op = RoomOperation::Move {
            room_id: drag.room_id,
            dx: drag.net_dx,
            dy: drag.net_dy,
        };
        tracing::info!("{}", op.description());
        self.history.record(op.clone());
        Some(op)
    }

    /// Abandons the drag and returns the rooms exactly as they were when it
    /// started. Nothing is recorded.
    pub fn cancel_drag(&mut self) -> Option<Vec<RoomGeometry>> {
        let drag = self.drag.take()?;
        tracing::debug!("Drag on {} cancelled", drag.room_id);
        Some(drag.snapshot)
    }

    // ---- history ----

    pub fn undo(&mut self, rooms: &[RoomGeometry]) -> Result<Vec<RoomGeometry>> {
        let op = self
            .history
            .undo()
            .cloned()
            .ok_or(SketchError::EmptyHistory("undo"))?;
        let mut updated = rooms.to_vec();
        op.undo(&mut updated);
        self.selection.retain_existing(&updated);
        tracing::info!("Undo: {}", op.description());
        Ok(updated)
    }

    pub fn redo(&mut self, rooms: &[RoomGeometry]) -> Result<Vec<RoomGeometry>> {
        let op = self
            .history
            .redo()
            .cloned()
            .ok_or(SketchError::EmptyHistory("redo"))?;
        let mut updated = rooms.to_vec();
        op.apply(&mut updated);
        tracing::info!("Redo: {}", op.description());
        Ok(updated)
    }
}
