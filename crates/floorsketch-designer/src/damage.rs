//! Damage zone footprints.
//!
//! A zone is either an explicit room-local polygon, or one inward strip per
//! polygon edge facing an affected wall, `extent_ft` deep and clamped to the
//! room's bounding box.

use floorsketch_core::{
    generate_id, Bounds, CardinalDirection, DamageSeverity, DamageType, DamageZone, Point,
    RoomGeometry,
};

use crate::geometry::{
    clean, edges, generate_rectangle, point_in_polygon, polygon_area, EPSILON,
};
use crate::walls::outward_direction;

/// Builds a wall-band damage zone with a fresh id.
pub fn new_damage_zone(
    damage_type: DamageType,
    severity: DamageSeverity,
    affected_walls: Vec<CardinalDirection>,
    extent_ft: f64,
) -> DamageZone {
    DamageZone {
        id: generate_id("damage"),
        damage_type,
        severity,
        affected_walls,
        extent_ft: extent_ft.max(0.0),
        polygon: None,
        water_category: None,
        notes: String::new(),
    }
}

/// Inward band of depth `depth` behind one polygon edge, clamped to the
/// room's bounding box.
fn strip(bounds: &Bounds, a: &Point, b: &Point, wall: CardinalDirection, depth: f64) -> Bounds {
    let run = Bounds::from_points(&[*a, *b]).unwrap_or(*bounds);
    let band = match wall {
        CardinalDirection::North => Bounds::new(run.min_x, run.min_y, run.max_x, run.max_y + depth),
        CardinalDirection::South => Bounds::new(run.min_x, run.min_y - depth, run.max_x, run.max_y),
        CardinalDirection::West => Bounds::new(run.min_x, run.min_y, run.max_x + depth, run.max_y),
        CardinalDirection::East => Bounds::new(run.min_x - depth, run.min_y, run.max_x, run.max_y),
    };
    Bounds::new(
        band.min_x.max(bounds.min_x),
        band.min_y.max(bounds.min_y),
        band.max_x.min(bounds.max_x),
        band.max_y.min(bounds.max_y),
    )
}

/// Strip rectangles for every polygon edge facing one of the affected
/// walls. An L or T room can have several edges facing the same way.
fn strips(room: &RoomGeometry, zone: &DamageZone) -> Vec<Bounds> {
    if zone.extent_ft <= 0.0 {
        return Vec::new();
    }
    let mut walls = zone.affected_walls.clone();
    walls.sort();
    walls.dedup();

    let bounds = room.local_bounds();
    edges(&room.polygon)
        .filter_map(|(index, a, b)| {
            let wall = outward_direction(&room.polygon, index);
            walls
                .contains(&wall)
                .then(|| strip(&bounds, &a, &b, wall, zone.extent_ft))
        })
        .filter(|s| s.width() > EPSILON && s.height() > EPSILON)
        .collect()
}

/// Room-local polygons covering the zone.
pub fn damage_zone_polygons(room: &RoomGeometry, zone: &DamageZone) -> Vec<Vec<Point>> {
    if let Some(polygon) = &zone.polygon {
        return vec![polygon.clone()];
    }
    strips(room, zone)
        .iter()
        .map(|s| {
            generate_rectangle(s.width(), s.height())
                .into_iter()
                .map(|p| p.translated(s.min_x, s.min_y))
                .collect()
        })
        .collect()
}

/// Same polygons translated into floor-plan space.
pub fn damage_zone_plan_polygons(room: &RoomGeometry, zone: &DamageZone) -> Vec<Vec<Point>> {
    damage_zone_polygons(room, zone)
        .into_iter()
        .map(|poly| {
            poly.into_iter()
                .map(|p| p.translated(room.origin_x_ft, room.origin_y_ft))
                .collect()
        })
        .collect()
}

fn breakpoints(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup_by(|a, b| (*a - *b).abs() <= EPSILON);
    values
}

/// Affected floor area: the union of the wall strips, clipped to the room
/// polygon. Exact for axis-aligned outlines.
pub fn damage_zone_area(room: &RoomGeometry, zone: &DamageZone) -> f64 {
    if let Some(polygon) = &zone.polygon {
        return polygon_area(polygon);
    }
    let strips = strips(room, zone);
    if strips.is_empty() {
        return 0.0;
    }

    // Split the plane on every strip and polygon coordinate; each cell is
    // then either fully covered or not at all.
    let xs = breakpoints(
        room.polygon
            .iter()
            .map(|p| p.x)
            .chain(strips.iter().flat_map(|s| [s.min_x, s.max_x])),
    );
    let ys = breakpoints(
        room.polygon
            .iter()
            .map(|p| p.y)
            .chain(strips.iter().flat_map(|s| [s.min_y, s.max_y])),
    );

    let mut area = 0.0;
    for x in xs.windows(2) {
        for y in ys.windows(2) {
            let center = Point::new((x[0] + x[1]) / 2.0, (y[0] + y[1]) / 2.0);
            if strips.iter().any(|s| s.contains_point(&center))
                && point_in_polygon(&center, &room.polygon)
            {
                area += (x[1] - x[0]) * (y[1] - y[0]);
            }
        }
    }
    clean(area)
}
