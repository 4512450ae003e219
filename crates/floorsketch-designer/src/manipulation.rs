//! Single-room transforms: move, copy, rotate, resize and axis reshape.
//!
//! These are pure functions over one [`RoomGeometry`]. The room store wraps
//! them with selection, history and snapping.

use floorsketch_core::{
    generate_id, CardinalDirection, FeaturePlacement, LShapeConfig, Point, Result, RoomGeometry,
    RoomShape, SketchError, TShapeConfig,
};

use crate::geometry::{
    self, clean, default_l_config, default_t_config, generate_polygon, match_edge_indices,
    normalize_polygon, polygon_bounds, polygon_centroid, rotate_l_config,
    rotate_point_quarter_turns, rotate_t_config,
};

/// Builds a new room at the plan origin with a generated polygon.
pub fn create_room(
    name: impl Into<String>,
    shape: RoomShape,
    width_ft: f64,
    length_ft: f64,
    ceiling_height_ft: f64,
    l_shape_config: Option<LShapeConfig>,
    t_shape_config: Option<TShapeConfig>,
) -> Result<RoomGeometry> {
    check_dimension("width_ft", width_ft)?;
    check_dimension("length_ft", length_ft)?;
    check_dimension("ceiling_height_ft", ceiling_height_ft)?;

    // Only the config matching the shape is kept.
    let l_shape_config = l_shape_config.filter(|_| shape == RoomShape::LShape);
    let t_shape_config = t_shape_config.filter(|_| shape == RoomShape::TShape);
    let polygon = generate_polygon(
        shape,
        width_ft,
        length_ft,
        l_shape_config.as_ref(),
        t_shape_config.as_ref(),
    );

    Ok(RoomGeometry {
        id: generate_id("room"),
        name: name.into(),
        shape,
        width_ft,
        length_ft,
        ceiling_height_ft,
        polygon,
        openings: Vec::new(),
        features: Vec::new(),
        damage_zones: Vec::new(),
        notes: String::new(),
        l_shape_config,
        t_shape_config,
        origin_x_ft: 0.0,
        origin_y_ft: 0.0,
        wall_attributes: Default::default(),
        photo_ids: Vec::new(),
        sub_room_ids: Vec::new(),
    })
}

/// Returns a copy of `room` translated by `(dx, dy)` in plan space.
/// The polygon is room-local, so only the origin changes.
pub fn move_room(room: &RoomGeometry, dx: f64, dy: f64) -> RoomGeometry {
    let mut moved = room.clone();
    moved.origin_x_ft += dx;
    moved.origin_y_ft += dy;
    moved
}

/// Deep copy with fresh ids for the room and every nested entity, offset by
/// `(offset_x, offset_y)`. Photos and sub-rooms belong to the original only.
pub fn copy_room(room: &RoomGeometry, offset_x: f64, offset_y: f64) -> RoomGeometry {
    let mut copy = room.clone();
    copy.id = generate_id("room");
    copy.name = format!("{} (copy)", room.name);
    copy.origin_x_ft += offset_x;
    copy.origin_y_ft += offset_y;
    for opening in &mut copy.openings {
        opening.id = generate_id("opening");
    }
    for feature in &mut copy.features {
        feature.id = generate_id("feature");
    }
    for zone in &mut copy.damage_zones {
        zone.id = generate_id("damage");
    }
    copy.photo_ids.clear();
    copy.sub_room_ids.clear();
    copy
}

/// Rotates a room in place by a multiple of 90 degrees (clockwise on screen).
///
/// Vertices rotate about the polygon centroid and the result is re-normalized
/// so its bounding box starts at `(0, 0)`; the origin is left alone. Width and
/// length swap on odd quarter turns. Opening and wall-mounted feature walls,
/// damage-zone walls and shape configs are remapped through the rotation;
/// freestanding features keep their offsets.
pub fn rotate_room(room: &RoomGeometry, degrees: i32) -> Result<RoomGeometry> {
    let turns = geometry::quarter_turns(degrees).ok_or_else(|| SketchError::InvalidDimension {
        field: "rotation".to_string(),
        value: degrees as f64,
        reason: "must be a multiple of 90 degrees".to_string(),
    })?;

    let mut rotated = room.clone();
    if turns == 0 {
        return Ok(rotated);
    }

    let center = polygon_centroid(&room.polygon);
    let turned: Vec<Point> = room
        .polygon
        .iter()
        .map(|p| rotate_point_quarter_turns(p, &center, turns))
        .collect();
    let (polygon, offset) = normalize_polygon(&turned);
    rotated.polygon = polygon;

    if turns % 2 == 1 {
        std::mem::swap(&mut rotated.width_ft, &mut rotated.length_ft);
    }

    for opening in &mut rotated.openings {
        opening.wall = opening.wall.rotated(turns);
    }
    for feature in &mut rotated.features {
        if let FeaturePlacement::Wall { wall, .. } = &mut feature.placement {
            *wall = wall.rotated(turns);
        }
    }
    for zone in &mut rotated.damage_zones {
        for wall in &mut zone.affected_walls {
            *wall = wall.rotated(turns);
        }
        if let Some(points) = &mut zone.polygon {
            for p in points.iter_mut() {
                let r = rotate_point_quarter_turns(p, &center, turns);
                *p = Point::new(clean(r.x - offset.x), clean(r.y - offset.y));
            }
        }
    }

    // A parametric room without a stored config was built from the default
    // one; rotate that so a later resize regenerates the same outline.
    let l_config = room.l_shape_config.or_else(|| {
        (room.shape == RoomShape::LShape).then(|| default_l_config(room.width_ft, room.length_ft))
    });
    let t_config = room.t_shape_config.or_else(|| {
        (room.shape == RoomShape::TShape).then(|| default_t_config(room.width_ft, room.length_ft))
    });
    rotated.l_shape_config = l_config.map(|c| rotate_l_config(&c, turns));
    rotated.t_shape_config =
        t_config.map(|c| rotate_t_config(&c, turns, room.width_ft, room.length_ft));
    canonicalize_outline(&mut rotated);

    tracing::debug!(
        "Rotated room {} by {} degrees ({} -> {} x {})",
        room.id,
        degrees,
        room.shape,
        rotated.width_ft,
        rotated.length_ft
    );
    Ok(rotated)
}

/// Replaces a rotated parametric polygon with the one its shape generates,
/// so vertex order matches what [`resize_room`] rebuilds. Index-keyed wall
/// attributes follow their edges. Outlines that do not match exactly are
/// left alone.
fn canonicalize_outline(room: &mut RoomGeometry) {
    if room.shape == RoomShape::Irregular {
        return;
    }
    let canonical = generate_polygon(
        room.shape,
        room.width_ft,
        room.length_ft,
        room.l_shape_config.as_ref(),
        room.t_shape_config.as_ref(),
    );
    let Some(mapping) = match_edge_indices(&room.polygon, &canonical, 1e-6) else {
        tracing::debug!("Room {} keeps its rotated vertex order", room.id);
        return;
    };
    room.wall_attributes = std::mem::take(&mut room.wall_attributes)
        .into_iter()
        .filter_map(|(index, attrs)| mapping.get(index).map(|j| (*j, attrs)))
        .collect();
    room.polygon = canonical;
}

fn check_dimension(field: &str, value: f64) -> Result<()> {
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

/// Sets width and length and regenerates the polygon for parametric shapes.
/// Irregular rooms are scaled along each axis instead.
pub fn resize_room(room: &RoomGeometry, width_ft: f64, length_ft: f64) -> Result<RoomGeometry> {
    check_dimension("width_ft", width_ft)?;
    check_dimension("length_ft", length_ft)?;

    let mut resized = room.clone();
    if room.shape == RoomShape::Irregular {
        let bounds = polygon_bounds(&room.polygon);
        let sx = if bounds.width() > 0.0 {
            width_ft / bounds.width()
        } else {
            1.0
        };
        let sy = if bounds.height() > 0.0 {
            length_ft / bounds.height()
        } else {
            1.0
        };
        resized.polygon = room
            .polygon
            .iter()
            .map(|p| {
                Point::new(
                    clean((p.x - bounds.min_x) * sx),
                    clean((p.y - bounds.min_y) * sy),
                )
            })
            .collect();
    } else {
        resized.polygon = generate_polygon(
            room.shape,
            width_ft,
            length_ft,
            room.l_shape_config.as_ref(),
            room.t_shape_config.as_ref(),
        );
    }
    resized.width_ft = width_ft;
    resized.length_ft = length_ft;
    Ok(resized)
}

/// Sets the extent of a room along one axis, keeping the other: horizontal
/// walls run along x so they change the width, vertical walls the length.
pub fn reshape_along_wall(
    room: &RoomGeometry,
    wall: CardinalDirection,
    length_ft: f64,
) -> Result<RoomGeometry> {
    if wall.runs_horizontally() {
        resize_room(room, length_ft, room.length_ft)
    } else {
        resize_room(room, room.width_ft, length_ft)
    }
}

/// Moves the room's local frame by `offset` without moving anything in plan
/// space: the origin follows the offset while polygon-relative contents
/// (freestanding features, damage outlines) move the other way.
pub fn shift_frame(room: &mut RoomGeometry, offset: Point) {
    if offset.x == 0.0 && offset.y == 0.0 {
        return;
    }
    room.origin_x_ft = clean(room.origin_x_ft + offset.x);
    room.origin_y_ft = clean(room.origin_y_ft + offset.y);
    for zone in &mut room.damage_zones {
        if let Some(points) = &mut zone.polygon {
            for p in points.iter_mut() {
                *p = Point::new(clean(p.x - offset.x), clean(p.y - offset.y));
            }
        }
    }
    for feature in &mut room.features {
        if let FeaturePlacement::Freestanding {
            x_offset_ft,
            y_offset_ft,
        } = &mut feature.placement
        {
            *x_offset_ft = clean(*x_offset_ft - offset.x);
            *y_offset_ft = clean(*y_offset_ft - offset.y);
        }
    }
}

/// Recomputes width/length from the polygon bounding box and re-normalizes
/// the polygon, shifting the origin so the room stays put in plan space.
/// Returns the frame shift that was applied.
pub fn renormalize_room(room: &mut RoomGeometry) -> Point {
    let (polygon, offset) = normalize_polygon(&room.polygon);
    shift_frame(room, offset);
    room.polygon = polygon;
    let bounds = polygon_bounds(&room.polygon);
    room.width_ft = clean(bounds.width());
    room.length_ft = clean(bounds.height());
    offset
}
