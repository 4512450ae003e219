//! Sketch session: the command boundary of the engine.
//!
//! A session owns one floor plan, the room being sketched, both editing
//! stores and the configuration. Commands arrive as [`SketchCommand`]
//! records and come back as a human-readable status line; failures start
//! with `Error:` and never panic.
//!
//! This module is split into submodules:
//! - `rooms`: sketching a room and its openings, features and damage
//! - `layout`: floor plan composition and room manipulation
//! - `editing`: wall edits and undo/redo
//! - `file_io`: snapshot save/load

mod editing;
mod file_io;
mod layout;
mod request;
mod rooms;

pub use request::{HistoryTarget, OpeningType, SketchCommand};

use floorsketch_core::{
    format_feet_inches, FloorPlan, Result, RoomGeometry, SketchError, WallEntity,
};
use floorsketch_settings::Config;
use std::path::PathBuf;

use crate::floor_plan::{find_room, plan_summary, recalculate_bounds};
use crate::room_store::RoomManipulationStore;
use crate::serialization::SketchMetadata;
use crate::validation::{
    check_completeness, is_complete, validate_room_dimensions, validate_room_geometry,
    IssueSeverity,
};
use crate::wall_editing::WallStore;

pub struct SketchSession {
    config: Config,
    floor_plan: Option<FloorPlan>,
    /// Room being dictated; not yet part of the floor plan.
    current_room: Option<RoomGeometry>,
    room_store: RoomManipulationStore,
    wall_store: WallStore,
    current_file_path: Option<PathBuf>,
    file_metadata: Option<SketchMetadata>,
}

impl Default for SketchSession {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn require_plan(plan: &Option<FloorPlan>) -> Result<&FloorPlan> {
    plan.as_ref().ok_or(SketchError::NoFloorPlan)
}

fn require_plan_mut(plan: &mut Option<FloorPlan>) -> Result<&mut FloorPlan> {
    plan.as_mut().ok_or(SketchError::NoFloorPlan)
}

impl SketchSession {
    pub fn new(config: Config) -> Self {
        Self {
            room_store: RoomManipulationStore::from_config(&config),
            wall_store: WallStore::from_config(&config),
            config,
            floor_plan: None,
            current_room: None,
            current_file_path: None,
            file_metadata: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the configuration and pushes the new sections into the stores.
    pub fn set_config(&mut self, config: Config) {
        self.room_store.set_snapping_config(config.snapping);
        self.wall_store.set_settings(config.wall_editing);
        self.config = config;
    }

    pub fn floor_plan(&self) -> Option<&FloorPlan> {
        self.floor_plan.as_ref()
    }

    pub fn current_room(&self) -> Option<&RoomGeometry> {
        self.current_room.as_ref()
    }

    pub fn rooms(&self) -> &[RoomGeometry] {
        self.floor_plan
            .as_ref()
            .map(|p| p.rooms.as_slice())
            .unwrap_or_default()
    }

    pub fn room_store(&self) -> &RoomManipulationStore {
        &self.room_store
    }

    pub fn room_store_mut(&mut self) -> &mut RoomManipulationStore {
        &mut self.room_store
    }

    pub fn wall_store(&self) -> &WallStore {
        &self.wall_store
    }

    pub fn wall_store_mut(&mut self) -> &mut WallStore {
        &mut self.wall_store
    }

    /// Walls derived from the current plan.
    pub fn walls(&mut self) -> Vec<WallEntity> {
        let rooms = self
            .floor_plan
            .as_ref()
            .map(|p| p.rooms.as_slice())
            .unwrap_or_default();
        self.wall_store.walls(rooms).to_vec()
    }

    /// Installs a new room list and refreshes plan bounds and selection.
    fn replace_rooms(&mut self, rooms: Vec<RoomGeometry>) {
        if let Some(plan) = self.floor_plan.as_mut() {
            plan.rooms = rooms;
            recalculate_bounds(plan);
            self.room_store.selection_mut().retain_existing(&plan.rooms);
        }
    }

    fn room_name(&self, id_or_name: &str) -> String {
        find_room(self.rooms(), id_or_name)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| id_or_name.to_string())
    }

    /// Runs one command and renders the outcome as a status line.
    pub fn execute(&mut self, command: SketchCommand) -> String {
        let name = command.name();
        tracing::debug!("Executing {}", name);
        match self.dispatch(command) {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!("{} failed: {}", name, e);
                e.to_status()
            }
        }
    }

    /// Runs one command, keeping the error structured.
    pub fn dispatch(&mut self, command: SketchCommand) -> Result<String> {
        match command {
            SketchCommand::StartFloorPlan { name } => Ok(self.start_floor_plan(name)),
            SketchCommand::CreateRoom {
                name,
                shape,
                width_ft,
                length_ft,
                ceiling_height_ft,
                l_shape_config,
                t_shape_config,
            } => self.create_room(
                name,
                shape,
                width_ft,
                length_ft,
                ceiling_height_ft,
                l_shape_config,
                t_shape_config,
            ),
            SketchCommand::CompleteRoom { x_ft, y_ft } => self.complete_room(x_ft, y_ft),
            SketchCommand::AddRoomRelative {
                reference,
                direction,
                gap_ft,
            } => self.add_room_relative(&reference, direction, gap_ft),
            SketchCommand::RemoveRoom { room } => self.remove_room(&room),
            SketchCommand::ConnectRooms {
                from_room,
                from_wall,
                from_position_ft,
                to_room,
                to_wall,
                to_position_ft,
                connection_type,
            } => self.connect_rooms(
                (&from_room, from_wall, from_position_ft),
                (&to_room, to_wall, to_position_ft),
                connection_type,
            ),
            SketchCommand::DisconnectRooms { connection_id } => {
                self.disconnect_rooms(&connection_id)
            }
            SketchCommand::AddOpening {
                room,
                opening_type,
                wall,
                width_ft,
                height_ft,
                position,
                position_from,
                sill_height_ft,
                style,
                swing,
            } => {
                let kind = opening_type.into_kind(sill_height_ft, style, swing);
                let height_ft = height_ft.unwrap_or_else(|| opening_type.default_height_ft());
                self.add_opening(
                    room.as_deref(),
                    kind,
                    wall,
                    width_ft,
                    height_ft,
                    position,
                    position_from,
                )
            }
            SketchCommand::MoveOpening {
                room,
                opening_id,
                wall,
                position,
                position_from,
            } => self.move_opening(&room, &opening_id, wall, position, position_from),
            SketchCommand::ResizeOpening {
                room,
                opening_id,
                width_ft,
                height_ft,
            } => self.resize_opening(&room, &opening_id, width_ft, height_ft),
            SketchCommand::RemoveOpening { room, opening_id } => {
                self.remove_opening(&room, &opening_id)
            }
            SketchCommand::AddFeature {
                room,
                feature_type,
                width_ft,
                depth_ft,
                height_ft,
                wall,
                position,
                position_from,
                x_offset_ft,
                y_offset_ft,
            } => {
                let placement = rooms::feature_placement(
                    wall,
                    position,
                    position_from,
                    x_offset_ft,
                    y_offset_ft,
                )?;
                self.add_feature(
                    room.as_deref(),
                    feature_type,
                    width_ft,
                    depth_ft,
                    height_ft,
                    placement,
                )
            }
            SketchCommand::MarkDamage {
                room,
                damage_type,
                severity,
                affected_walls,
                extent_ft,
                polygon,
                water_category,
                notes,
            } => {
                let mut zone = crate::damage::new_damage_zone(
                    damage_type,
                    severity,
                    affected_walls,
                    extent_ft,
                );
                zone.polygon = polygon;
                zone.water_category = water_category;
                zone.notes = notes;
                self.mark_damage(room.as_deref(), zone)
            }
            SketchCommand::MoveRoom { room, dx_ft, dy_ft } => self.move_room(&room, dx_ft, dy_ft),
            SketchCommand::SetRoomPosition { room, x_ft, y_ft } => {
                self.set_room_position(&room, x_ft, y_ft)
            }
            SketchCommand::CopyRoom { room } => self.copy_room(&room),
            SketchCommand::RotateRoom { room, degrees } => self.rotate_room(&room, degrees),
            SketchCommand::ResizeRoom {
                room,
                width_ft,
                length_ft,
            } => self.resize_room(&room, width_ft, length_ft),
            SketchCommand::SnapRoom { room } => self.snap_room(&room),
            SketchCommand::SelectRooms { rooms, add } => self.select_rooms(&rooms, add),
            SketchCommand::SelectAt { x_ft, y_ft, multi } => Ok(self.select_at(x_ft, y_ft, multi)),
            SketchCommand::ClearSelection => {
                self.room_store.selection_mut().clear();
                Ok("Selection cleared".to_string())
            }
            SketchCommand::AlignRooms { alignment, rooms } => {
                self.align_rooms(alignment, rooms.as_deref())
            }
            SketchCommand::DistributeRooms { axis, rooms } => {
                self.distribute_rooms(axis, rooms.as_deref())
            }
            SketchCommand::EqualizeWalls { walls, mode } => self.equalize_walls(&walls, mode),
            SketchCommand::MoveWall {
                wall_id,
                coordinate_ft,
                delta_ft,
            } => self.move_wall(&wall_id, coordinate_ft, delta_ft),
            SketchCommand::SetWallHeight { wall_id, height_ft } => {
                self.set_wall_height(&wall_id, height_ft)
            }
            SketchCommand::SetWallType { wall_id, wall_type } => {
                self.set_wall_type(&wall_id, wall_type)
            }
            SketchCommand::SetWallMissing { wall_id, missing } => {
                self.set_wall_missing(&wall_id, missing)
            }
            SketchCommand::Undo { target } => self.undo(target),
            SketchCommand::Redo { target } => self.redo(target),
            SketchCommand::ValidateRoom { room } => self.validate_room(room.as_deref()),
            SketchCommand::CheckCompleteness => self.check_completeness(),
            SketchCommand::ListWalls => self.list_walls(),
            SketchCommand::Summary => self.summary(),
        }
    }

    // ---- queries ----

    fn validate_room(&self, room: Option<&str>) -> Result<String> {
        let room = match room {
            Some(id) => find_room(self.rooms(), id).ok_or_else(|| SketchError::room_not_found(id))?,
            None => self.current_room.as_ref().ok_or(SketchError::NoActiveRoom)?,
        };
        let dimensions = validate_room_dimensions(
            room.width_ft,
            room.length_ft,
            room.ceiling_height_ft,
            &self.config.validation,
        );
        let geometry = validate_room_geometry(room);
        let findings: Vec<String> = dimensions
            .errors
            .iter()
            .chain(&geometry.errors)
            .chain(&dimensions.warnings)
            .chain(&geometry.warnings)
            .map(|f| f.message.clone())
            .collect();
        if findings.is_empty() {
            Ok(format!("{} looks good", room.name))
        } else {
            Ok(format!("{}: {}", room.name, findings.join(". ")))
        }
    }

    fn check_completeness(&self) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let issues = check_completeness(&plan.rooms, &self.config.validation);
        let warnings = issues
            .iter()
            .filter(|i| i.severity >= IssueSeverity::Warning)
            .count();
        let state = if is_complete(&issues) {
            "complete"
        } else {
            "incomplete"
        };
        Ok(format!(
            "Sketch is {} with {} issue(s), {} warning(s)",
            state,
            issues.len(),
            warnings
        ))
    }

    fn list_walls(&mut self) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let walls = self.wall_store.walls(&plan.rooms);
        let interior = walls.iter().filter(|w| w.is_shared()).count();
        Ok(format!(
            "{} wall(s): {} exterior, {} interior",
            walls.len(),
            walls.len() - interior,
            interior
        ))
    }

    fn summary(&self) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let mut status = plan_summary(plan);
        if let Some(room) = &self.current_room {
            status.push_str(&format!(
                ". Currently sketching {}, {} by {}",
                room.name,
                format_feet_inches(room.width_ft),
                format_feet_inches(room.length_ft)
            ));
        }
        Ok(status)
    }
}
