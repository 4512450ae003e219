//! Wall editing.
//!
//! Walls are edited through their derived [`WallEntity`]. Moving a wall
//! shifts the matching polygon edge of every room that owns it, so a shared
//! wall stays shared. The [`WallStore`] keeps its own undo/redo history,
//! separate from the room manipulation store.

use floorsketch_core::{
    Point, Result, RoomGeometry, RoomShape, SketchError, WallAttributes, WallEntity,
    WallOrientation, WallType,
};
use floorsketch_settings::{Config, WallEditSettings};

use crate::commands::{AttributePatch, RoomOutline, RoomPatch, WallEditOperation};
use crate::geometry::{clean, snap_to_grid, EPSILON};
use crate::history::{HistoryEntry, UndoRedoManager};
use crate::manipulation::renormalize_room;
use crate::walls::{matching_edges, wall_at_point, WallCache};

/// Allowed range of a wall's perpendicular coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallConstraint {
    pub min: f64,
    pub max: f64,
}

impl WallConstraint {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

fn participants<'a>(rooms: &'a [RoomGeometry], wall: &WallEntity) -> Vec<&'a RoomGeometry> {
    wall.room_ids
        .iter()
        .filter_map(|id| rooms.iter().find(|r| &r.id == id))
        .collect()
}

/// Movement range of `wall`: for every touching room, the wall may come no
/// closer than `min_room_size` to that room's opposite bound. Shared walls
/// intersect the ranges of all participants.
pub fn wall_constraints(
    wall: &WallEntity,
    rooms: &[RoomGeometry],
    min_room_size: f64,
) -> Result<WallConstraint> {
    let coordinate = wall.perpendicular_coordinate();
    let mut constraint = WallConstraint {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    for room in participants(rooms, wall) {
        let bounds = room.plan_bounds();
        let (low, high) = match wall.orientation {
            WallOrientation::Horizontal => (bounds.min_y, bounds.max_y),
            WallOrientation::Vertical => (bounds.min_x, bounds.max_x),
        };
        if (coordinate - high).abs() <= (coordinate - low).abs() {
            constraint.min = constraint.min.max(low + min_room_size);
        } else {
            constraint.max = constraint.max.min(high - min_room_size);
        }
    }

    if constraint.min > constraint.max {
        return Err(SketchError::InvalidGeometry {
            reason: format!(
                "wall {} cannot move without shrinking a room below {} ft",
                wall.id, min_room_size
            ),
        });
    }
    Ok(constraint)
}

fn check_axis_aligned(wall: &WallEntity) -> Result<()> {
    let dx = (wall.end_point.x - wall.start_point.x).abs();
    let dy = (wall.end_point.y - wall.start_point.y).abs();
    if dx > EPSILON && dy > EPSILON {
        return Err(SketchError::InvalidGeometry {
            reason: format!("wall {} is diagonal and cannot be moved", wall.id),
        });
    }
    Ok(())
}

/// Result of [`move_wall`]: the updated rooms, one patch per touched room and
/// the coordinate actually applied after snapping and clamping.
#[derive(Debug, Clone)]
pub struct WallMove {
    pub rooms: Vec<RoomGeometry>,
    pub patches: Vec<RoomPatch>,
    pub applied: f64,
}

/// Moves `wall` perpendicular to its run so its coordinate becomes `target`
/// (snapped to grid, then clamped to [`wall_constraints`]).
///
/// Every participating room has the two vertices of its matching edge
/// shifted, is re-normalized and gets its width/length recomputed from the
/// new bounding box. L- and T-shaped rooms become irregular because their
/// polygon no longer follows the parametric form.
pub fn move_wall(
    rooms: &[RoomGeometry],
    wall: &WallEntity,
    target: f64,
    settings: &WallEditSettings,
) -> Result<WallMove> {
    check_axis_aligned(wall)?;

    let snapped = if settings.snap_to_grid {
        snap_to_grid(target, settings.grid_size_ft)
    } else {
        target
    };
    let constraint = wall_constraints(wall, rooms, settings.min_room_size_ft)?;
    let applied = constraint.clamp(snapped);
    if applied != snapped {
        tracing::debug!(
            "Wall {} target {:.2} clamped to {:.2}",
            wall.id,
            snapped,
            applied
        );
    }

    let mut updated = rooms.to_vec();
    let mut patches = Vec::new();
    if (applied - wall.perpendicular_coordinate()).abs() <= EPSILON {
        return Ok(WallMove {
            rooms: updated,
            patches,
            applied,
        });
    }

    for room in updated.iter_mut().filter(|r| wall.involves_room(&r.id)) {
        let indices = matching_edges(
            room,
            &wall.start_point,
            &wall.end_point,
            settings.shared_wall_tolerance_ft,
        );
        if indices.is_empty() {
            continue;
        }
        let previous = RoomOutline::capture(room);
        let n = room.polygon.len();
        for index in indices {
            for vertex in [index, (index + 1) % n] {
                let p = &mut room.polygon[vertex];
                match wall.orientation {
                    WallOrientation::Horizontal => p.y = clean(applied - room.origin_y_ft),
                    WallOrientation::Vertical => p.x = clean(applied - room.origin_x_ft),
                }
            }
        }
        if matches!(room.shape, RoomShape::LShape | RoomShape::TShape) {
            room.shape = RoomShape::Irregular;
            room.l_shape_config = None;
            room.t_shape_config = None;
        }
        let shift = renormalize_room(room);
        patches.push(RoomPatch {
            room_id: room.id.clone(),
            previous,
            new: RoomOutline::capture(room),
            shift,
        });
    }

    Ok(WallMove {
        rooms: updated,
        patches,
        applied,
    })
}

/// Attribute patches for every participant edge of `wall`, produced by
/// applying `edit` to the current overrides.
pub fn attribute_patches(
    rooms: &[RoomGeometry],
    wall: &WallEntity,
    tolerance: f64,
    edit: impl Fn(&mut WallAttributes),
) -> Vec<AttributePatch> {
    let mut patches = Vec::new();
    for room in participants(rooms, wall) {
        for wall_index in matching_edges(room, &wall.start_point, &wall.end_point, tolerance) {
            let previous = room.wall_attributes.get(&wall_index).copied();
            let mut attrs = previous.unwrap_or_default();
            edit(&mut attrs);
            patches.push(AttributePatch {
                room_id: room.id.clone(),
                wall_index,
                previous,
                new: (!attrs.is_empty()).then_some(attrs),
            });
        }
    }
    patches
}

/// Wall selection, derived-wall cache and wall-level undo history.
#[derive(Debug, Clone)]
pub struct WallStore {
    settings: WallEditSettings,
    history: UndoRedoManager<WallEditOperation>,
    cache: WallCache,
    selected_wall: Option<String>,
}

impl Default for WallStore {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl WallStore {
    pub fn new(settings: WallEditSettings, max_history: usize) -> Self {
        Self {
            settings,
            history: UndoRedoManager::new(max_history),
            cache: WallCache::new(),
            selected_wall: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.wall_editing, config.history.max_depth)
    }

    pub fn settings(&self) -> &WallEditSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: WallEditSettings) {
        self.settings = settings;
        self.cache.invalidate();
    }

    pub fn history(&self) -> &UndoRedoManager<WallEditOperation> {
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
        self.selected_wall = None;
    }

    /// Derived walls for `rooms`, memoized on the geometry hash.
    pub fn walls(&mut self, rooms: &[RoomGeometry]) -> &[WallEntity] {
        self.cache.walls(rooms, self.settings.shared_wall_tolerance_ft)
    }

    pub fn find_wall(&mut self, rooms: &[RoomGeometry], wall_id: &str) -> Result<WallEntity> {
        self.walls(rooms)
            .iter()
            .find(|w| w.id == wall_id)
            .cloned()
            .ok_or_else(|| SketchError::WallNotFound {
                id: wall_id.to_string(),
            })
    }

    pub fn selected_wall(&self) -> Option<&str> {
        self.selected_wall.as_deref()
    }

    pub fn select_wall(&mut self, wall_id: Option<String>) {
        self.selected_wall = wall_id;
    }

    /// Selects the wall nearest to a plan-space point within `tolerance`.
    pub fn select_wall_at_point(
        &mut self,
        rooms: &[RoomGeometry],
        point: &Point,
        tolerance: f64,
    ) -> Option<WallEntity> {
        let hit = wall_at_point(self.walls(rooms), point, tolerance).cloned();
        self.selected_wall = hit.as_ref().map(|w| w.id.clone());
        hit
    }

    pub fn constraints(&mut self, rooms: &[RoomGeometry], wall_id: &str) -> Result<WallConstraint> {
        let wall = self.find_wall(rooms, wall_id)?;
        wall_constraints(&wall, rooms, self.settings.min_room_size_ft)
    }

    fn commit(&mut self, rooms: &[RoomGeometry], op: WallEditOperation) -> Vec<RoomGeometry> {
        let mut updated = rooms.to_vec();
        op.apply(&mut updated);
        tracing::info!("{}", op.description());
        self.history.record(op);
        updated
    }

    fn commit_or_keep(
        &mut self,
        rooms: &[RoomGeometry],
        planned: Result<Option<WallEditOperation>>,
    ) -> Vec<RoomGeometry> {
        match planned {
            Ok(Some(op)) => self.commit(rooms, op),
            Ok(None) => rooms.to_vec(),
            Err(e) => {
                tracing::warn!("{}", e);
                rooms.to_vec()
            }
        }
    }

    /// Builds a wall move to an absolute perpendicular coordinate. `None`
    /// when snapping and clamping leave the wall where it is.
    pub fn plan_move_wall(
        &mut self,
        rooms: &[RoomGeometry],
        wall_id: &str,
        coordinate: f64,
    ) -> Result<Option<WallEditOperation>> {
        let wall = self.find_wall(rooms, wall_id)?;
        let result = move_wall(rooms, &wall, coordinate, &self.settings)?;
        if result.patches.is_empty() {
            return Ok(None);
        }
        Ok(Some(WallEditOperation::Move {
            wall_id: wall.id,
            patches: result.patches,
        }))
    }

    pub fn move_wall(
        &mut self,
        rooms: &[RoomGeometry],
        wall_id: &str,
        coordinate: f64,
    ) -> Vec<RoomGeometry> {
        let planned = self.plan_move_wall(rooms, wall_id, coordinate);
        self.commit_or_keep(rooms, planned)
    }

    /// Moves a wall by `delta` feet along its perpendicular axis.
    pub fn move_wall_by(
        &mut self,
        rooms: &[RoomGeometry],
        wall_id: &str,
        delta: f64,
    ) -> Vec<RoomGeometry> {
        let planned = self
            .find_wall(rooms, wall_id)
            .and_then(|wall| self.plan_move_wall(rooms, wall_id, wall.perpendicular_coordinate() + delta));
        self.commit_or_keep(rooms, planned)
    }

    fn plan_attributes(
        &mut self,
        rooms: &[RoomGeometry],
        wall_id: &str,
        name: String,
        edit: impl Fn(&mut WallAttributes),
    ) -> Result<Option<WallEditOperation>> {
        let wall = self.find_wall(rooms, wall_id)?;
        let patches = attribute_patches(rooms, &wall, self.settings.shared_wall_tolerance_ft, edit);
        if patches.iter().all(|p| p.previous == p.new) {
            return Ok(None);
        }
        Ok(Some(WallEditOperation::Attributes {
            wall_id: wall.id,
            name,
            patches,
        }))
    }

    pub fn plan_update_wall_height(
        &mut self,
        rooms: &[RoomGeometry],
        wall_id: &str,
        height_ft: f64,
    ) -> Result<Option<WallEditOperation>> {
        if !(height_ft.is_finite() && height_ft > 0.0) {
            return Err(SketchError::InvalidDimension {
                field: "height_ft".to_string(),
                value: height_ft,
                reason: "must be greater than zero".to_string(),
            });
        }
        self.plan_attributes(rooms, wall_id, format!("Set wall height to {} ft", height_ft), |a| {
            a.height_ft = Some(height_ft);
        })
    }

    pub fn update_wall_height(
        &mut self,
        rooms: &[RoomGeometry],
        wall_id: &str,
        height_ft: f64,
    ) -> Vec<RoomGeometry> {
        let planned = self.plan_update_wall_height(rooms, wall_id, height_ft);
        self.commit_or_keep(rooms, planned)
    }

    /// Overrides the derived interior/exterior type; `None` restores derivation.
    pub fn plan_update_wall_type(
        &mut self,
        rooms: &[RoomGeometry],
        wall_id: &str,
        wall_type: Option<WallType>,
    ) -> Result<Option<WallEditOperation>> {
        let name = match wall_type {
            Some(t) => format!("Mark wall {}", t),
            None => "Reset wall type".to_string(),
        };
        self.plan_attributes(rooms, wall_id, name, |a| a.wall_type = wall_type)
    }

    pub fn update_wall_type(
        &mut self,
        rooms: &[RoomGeometry],
        wall_id: &str,
        wall_type: Option<WallType>,
    ) -> Vec<RoomGeometry> {
        let planned = self.plan_update_wall_type(rooms, wall_id, wall_type);
        self.commit_or_keep(rooms, planned)
    }

    pub fn plan_set_wall_missing(
        &mut self,
        rooms: &[RoomGeometry],
        wall_id: &str,
        missing: bool,
    ) -> Result<Option<WallEditOperation>> {
        let name = if missing {
            "Mark wall missing"
        } else {
            "Restore wall"
        };
        self.plan_attributes(rooms, wall_id, name.to_string(), |a| a.missing = missing)
    }

    pub fn set_wall_missing(
        &mut self,
        rooms: &[RoomGeometry],
        wall_id: &str,
        missing: bool,
    ) -> Vec<RoomGeometry> {
        let planned = self.plan_set_wall_missing(rooms, wall_id, missing);
        self.commit_or_keep(rooms, planned)
    }

    /// Records an already planned operation against `rooms`.
    pub fn apply(&mut self, rooms: &[RoomGeometry], op: WallEditOperation) -> Vec<RoomGeometry> {
        self.commit(rooms, op)
    }

    pub fn undo(&mut self, rooms: &[RoomGeometry]) -> Result<Vec<RoomGeometry>> {
        let op = self
            .history
            .undo()
            .cloned()
            .ok_or(SketchError::EmptyHistory("undo"))?;
        let mut updated = rooms.to_vec();
        op.undo(&mut updated);
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
