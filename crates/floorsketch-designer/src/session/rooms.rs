//! Sketching a room: shape, openings, features and damage.
//!
//! Commands that name no room act on the room being sketched, which has no
//! history of its own. Commands naming a placed room go through the room
//! store so they can be undone.

use floorsketch_core::{
    format_feet_inches, generate_id, CardinalDirection, DamageSeverity, DamageZone, Feature,
    FeaturePlacement, FeatureType, LShapeConfig, Opening, OpeningKind, PositionFrom,
    PositionSpec, Result, RoomGeometry, RoomShape, SketchError, TShapeConfig,
};

use super::{require_plan, require_plan_mut, SketchSession};
use crate::floor_plan::{add_room, find_room, new_floor_plan};
use crate::geometry::{calculate_position_in_feet, polygon_area};
use crate::manipulation;
use crate::validation::{validate_room_dimensions, validate_wall_placement, ValidationResult};

/// Wall-mounted when a wall is named, freestanding when both offsets are.
pub(super) fn feature_placement(
    wall: Option<CardinalDirection>,
    position: PositionSpec,
    position_from: PositionFrom,
    x_offset_ft: Option<f64>,
    y_offset_ft: Option<f64>,
) -> Result<FeaturePlacement> {
    match (wall, x_offset_ft, y_offset_ft) {
        (Some(wall), _, _) => Ok(FeaturePlacement::Wall {
            wall,
            position,
            position_from,
        }),
        (None, Some(x_offset_ft), Some(y_offset_ft)) => Ok(FeaturePlacement::Freestanding {
            x_offset_ft,
            y_offset_ft,
        }),
        _ => Err(SketchError::other(
            "A feature needs a wall, or both x and y offsets when freestanding",
        )),
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SketchError::InvalidDimension {
            field: field.to_string(),
            value,
            reason: "must be greater than zero".to_string(),
        })
    }
}

/// Appends advisory warnings to a status line.
fn with_warnings(mut status: String, results: &[&ValidationResult]) -> String {
    for result in results {
        for finding in result.errors.iter().chain(&result.warnings) {
            status.push_str(". ");
            status.push_str(&finding.message);
        }
    }
    status
}

impl SketchSession {
    pub(super) fn start_floor_plan(&mut self, name: String) -> String {
        if let Some(previous) = &self.floor_plan {
            tracing::info!(
                "Replacing floor plan '{}' ({} rooms)",
                previous.name,
                previous.rooms.len()
            );
        }
        let status = format!("Started floor plan {}", name);
        self.floor_plan = Some(new_floor_plan(name));
        self.room_store.clear_history();
        self.room_store.selection_mut().clear();
        self.wall_store.clear_history();
        status
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn create_room(
        &mut self,
        name: String,
        shape: RoomShape,
        width_ft: f64,
        length_ft: f64,
        ceiling_height_ft: Option<f64>,
        l_shape_config: Option<LShapeConfig>,
        t_shape_config: Option<TShapeConfig>,
    ) -> Result<String> {
        let ceiling_height_ft =
            ceiling_height_ft.unwrap_or(self.config.floor_plan.default_ceiling_height_ft);
        let room = manipulation::create_room(
            name,
            shape,
            width_ft,
            length_ft,
            ceiling_height_ft,
            l_shape_config,
            t_shape_config,
        )?;
        let check = validate_room_dimensions(
            width_ft,
            length_ft,
            ceiling_height_ft,
            &self.config.validation,
        );

        if let Some(previous) = self.current_room.take() {
            tracing::warn!("Discarding unfinished room '{}'", previous.name);
        }
        let status = format!(
            "Created {} {}, {} by {}, {:.0} square feet",
            room.shape,
            room.name,
            format_feet_inches(width_ft),
            format_feet_inches(length_ft),
            polygon_area(&room.polygon)
        );
        tracing::info!("Created room '{}' ({})", room.name, room.id);
        self.current_room = Some(room);
        Ok(with_warnings(status, &[&check]))
    }

    /// Places the room being sketched on the plan at `(x, y)`, default origin.
    pub(super) fn complete_room(&mut self, x_ft: Option<f64>, y_ft: Option<f64>) -> Result<String> {
        let plan = require_plan_mut(&mut self.floor_plan)?;
        let mut room = self.current_room.take().ok_or(SketchError::NoActiveRoom)?;
        room.origin_x_ft = x_ft.unwrap_or(0.0);
        room.origin_y_ft = y_ft.unwrap_or(0.0);
        let status = format!(
            "Added {} to {}, {} room(s) total",
            room.name,
            plan.name,
            plan.rooms.len() + 1
        );
        add_room(plan, room)?;
        Ok(status)
    }

    /// The room being sketched, or the named placed room's id.
    fn target(&self, room: Option<&str>) -> Result<Option<String>> {
        match room {
            None if self.current_room.is_some() => Ok(None),
            None => Err(SketchError::NoActiveRoom),
            Some(id) => {
                let plan = require_plan(&self.floor_plan)?;
                find_room(&plan.rooms, id)
                    .map(|r| Some(r.id.clone()))
                    .ok_or_else(|| SketchError::room_not_found(id))
            }
        }
    }

    fn target_room(&self, target: &Option<String>) -> Result<&RoomGeometry> {
        match target {
            None => self.current_room.as_ref().ok_or(SketchError::NoActiveRoom),
            Some(id) => find_room(self.rooms(), id).ok_or_else(|| SketchError::room_not_found(id)),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn add_opening(
        &mut self,
        room: Option<&str>,
        kind: OpeningKind,
        wall: CardinalDirection,
        width_ft: f64,
        height_ft: f64,
        position: PositionSpec,
        position_from: PositionFrom,
    ) -> Result<String> {
        positive("width_ft", width_ft)?;
        positive("height_ft", height_ft)?;
        let target = self.target(room)?;

        let mut opening = Opening::new(
            generate_id("opening"),
            kind,
            wall,
            width_ft,
            height_ft,
            position,
        );
        opening.position_from = position_from;

        let owner = self.target_room(&target)?;
        let check = validate_wall_placement(owner, &opening);
        let at = calculate_position_in_feet(
            position,
            position_from,
            owner.wall_length(wall),
            width_ft,
        );
        let status = format!(
            "Added {} {} to the {} wall of {}, centered {} from the start",
            format_feet_inches(width_ft),
            kind.name(),
            wall,
            owner.name,
            format_feet_inches(at)
        );

        match target {
            None => {
                if let Some(current) = self.current_room.as_mut() {
                    current.openings.push(opening);
                }
            }
            Some(id) => {
                let plan = require_plan(&self.floor_plan)?;
                let op = self.room_store.plan_add_opening(&plan.rooms, &id, opening)?;
                let rooms = self.room_store.commit(&plan.rooms, op);
                self.replace_rooms(rooms);
            }
        }
        Ok(with_warnings(status, &[&check]))
    }

    pub(super) fn move_opening(
        &mut self,
        room: &str,
        opening_id: &str,
        wall: Option<CardinalDirection>,
        position: PositionSpec,
        position_from: PositionFrom,
    ) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let op = self
            .room_store
            .plan_update_opening(&plan.rooms, room, opening_id, |o| {
                if let Some(wall) = wall {
                    o.wall = wall;
                }
                o.position = position;
                o.position_from = position_from;
            })?;
        let rooms = self.room_store.commit(&plan.rooms, op);
        self.replace_rooms(rooms);
        Ok(format!("Moved opening in {}", self.room_name(room)))
    }

    pub(super) fn resize_opening(
        &mut self,
        room: &str,
        opening_id: &str,
        width_ft: f64,
        height_ft: f64,
    ) -> Result<String> {
        positive("width_ft", width_ft)?;
        positive("height_ft", height_ft)?;
        let plan = require_plan(&self.floor_plan)?;
        let op = self
            .room_store
            .plan_update_opening(&plan.rooms, room, opening_id, |o| {
                o.width_ft = width_ft;
                o.height_ft = height_ft;
            })?;
        let rooms = self.room_store.commit(&plan.rooms, op);
        self.replace_rooms(rooms);
        Ok(format!(
            "Resized opening to {} by {}",
            format_feet_inches(width_ft),
            format_feet_inches(height_ft)
        ))
    }

    pub(super) fn remove_opening(&mut self, room: &str, opening_id: &str) -> Result<String> {
        let plan = require_plan(&self.floor_plan)?;
        let op = self
            .room_store
            .plan_remove_opening(&plan.rooms, room, opening_id)?;
        let rooms = self.room_store.commit(&plan.rooms, op);
        self.replace_rooms(rooms);
        Ok(format!("Removed opening from {}", self.room_name(room)))
    }

    pub(super) fn add_feature(
        &mut self,
        room: Option<&str>,
        feature_type: FeatureType,
        width_ft: f64,
        depth_ft: f64,
        height_ft: Option<f64>,
        placement: FeaturePlacement,
    ) -> Result<String> {
        positive("width_ft", width_ft)?;
        positive("depth_ft", depth_ft)?;
        let target = self.target(room)?;
        let feature = Feature {
            id: generate_id("feature"),
            feature_type,
            width_ft,
            depth_ft,
            height_ft,
            placement,
        };
        let location = match placement {
            FeaturePlacement::Wall { wall, .. } => format!("on the {} wall", wall),
            FeaturePlacement::Freestanding { .. } => "freestanding".to_string(),
        };
        let status = format!(
            "Added {} by {} {} {} to {}",
            format_feet_inches(width_ft),
            format_feet_inches(depth_ft),
            feature_type,
            location,
            self.target_room(&target)?.name
        );

        match target {
            None => {
                if let Some(current) = self.current_room.as_mut() {
                    current.features.push(feature);
                }
            }
            Some(id) => {
                let plan = require_plan(&self.floor_plan)?;
                let op = self
                    .room_store
                    .plan_edit_contents(&plan.rooms, &id, |r| r.features.push(feature))?;
                let rooms = self.room_store.commit(&plan.rooms, op);
                self.replace_rooms(rooms);
            }
        }
        Ok(status)
    }

    pub(super) fn mark_damage(&mut self, room: Option<&str>, zone: DamageZone) -> Result<String> {
        if zone.polygon.is_none() && zone.affected_walls.is_empty() {
            return Err(SketchError::other(
                "Damage needs at least one affected wall or an outline",
            ));
        }
        if zone.polygon.is_none() {
            positive("extent_ft", zone.extent_ft)?;
        }
        let target = self.target(room)?;
        let area = crate::damage::damage_zone_area(self.target_room(&target)?, &zone);
        let severity = match zone.severity {
            DamageSeverity::Minor => "minor",
            DamageSeverity::Moderate => "moderate",
            DamageSeverity::Severe => "severe",
        };
        let status = format!(
            "Marked {} {} damage, about {:.0} square feet",
            severity, zone.damage_type, area
        );

        match target {
            None => {
                if let Some(current) = self.current_room.as_mut() {
                    current.damage_zones.push(zone);
                }
            }
            Some(id) => {
                let plan = require_plan(&self.floor_plan)?;
                let op = self
                    .room_store
                    .plan_edit_contents(&plan.rooms, &id, |r| r.damage_zones.push(zone))?;
                let rooms = self.room_store.commit(&plan.rooms, op);
                self.replace_rooms(rooms);
            }
        }
        Ok(status)
    }
}
