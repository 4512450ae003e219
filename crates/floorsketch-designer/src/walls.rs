//! Wall derivation.
//!
//! Turns room polygons into [`WallEntity`] records in floor-plan space. Each
//! polygon edge becomes a wall; edges that coincide with an edge of another
//! room (same endpoints, or collinear with overlapping extent) are shared and
//! classified interior. Walls are a pure function of the room list. The
//! [`WallCache`] memoizes the result keyed on a hash of the geometry so it
//! can never drift from the polygons.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use floorsketch_core::{
    CardinalDirection, Point, RoomGeometry, WallEntity, WallOrientation, WallType,
};
use smallvec::SmallVec;

use crate::geometry::{
    edges, point_in_polygon, point_to_segment_distance, polygon_centroid, vec2, EPSILON,
};

/// Default distance under which two segments are treated as one wall.
pub const DEFAULT_SHARED_WALL_TOLERANCE_FT: f64 = 0.1;

/// Offset from an edge midpoint used to sample either side of it.
const NORMAL_STEP_FT: f64 = 0.01;

type Sharers = SmallVec<[(usize, usize); 2]>;

/// Stable wall id derived from the owning room and polygon edge.
pub fn wall_id(room_id: &str, wall_index: usize) -> String {
    format!("wall-{}-{}", room_id, wall_index)
}

/// Horizontal when the edge runs further along x than along y.
pub fn edge_orientation(a: &Point, b: &Point) -> WallOrientation {
    if (b.x - a.x).abs() > (b.y - a.y).abs() {
        WallOrientation::Horizontal
    } else {
        WallOrientation::Vertical
    }
}

/// Cardinal direction the outer face of edge `index` points to.
///
/// Points just off the edge midpoint are tested on both sides; the side that
/// lands outside the polygon wins. When that test is inconclusive
/// (degenerate or self-touching polygons) the normal is flipped until it
/// points away from the area centroid.
pub fn outward_direction(polygon: &[Point], index: usize) -> CardinalDirection {
    let Some((_, a, b)) = edges(polygon).nth(index) else {
        return CardinalDirection::North;
    };
    let d = vec2(&b) - vec2(&a);
    let len = d.norm();
    if len <= EPSILON {
        return CardinalDirection::North;
    }
    let mut normal = nalgebra::Vector2::new(d.y, -d.x) / len;
    let mid = (vec2(&a) + vec2(&b)) / 2.0;

    let inside = |v: nalgebra::Vector2<f64>| point_in_polygon(&Point::new(v.x, v.y), polygon);
    let ahead_inside = inside(mid + normal * NORMAL_STEP_FT);
    let behind_inside = inside(mid - normal * NORMAL_STEP_FT);

    if ahead_inside && !behind_inside {
        normal = -normal;
    } else if ahead_inside == behind_inside {
        let c = polygon_centroid(polygon);
        let away = mid - nalgebra::Vector2::new(c.x, c.y);
        if away.dot(&normal) < 0.0 {
            normal = -normal;
        }
    }

    if normal.x.abs() > normal.y.abs() {
        if normal.x > 0.0 {
            CardinalDirection::East
        } else {
            CardinalDirection::West
        }
    } else if normal.y < 0.0 {
        CardinalDirection::North
    } else {
        CardinalDirection::South
    }
}

/// Shared-wall test between segments `a` and `b`.
///
/// Two segments are shared when their endpoints coincide within `tolerance`
/// (in either order), or when both endpoints of each lie within `tolerance`
/// of the other's line and their projections onto that line overlap by more
/// than `tolerance`.
pub fn segments_shared(a1: &Point, a2: &Point, b1: &Point, b2: &Point, tolerance: f64) -> bool {
    let forward = a1.approx_eq(b1, tolerance) && a2.approx_eq(b2, tolerance);
    let reversed = a1.approx_eq(b2, tolerance) && a2.approx_eq(b1, tolerance);
    if forward || reversed {
        return true;
    }

    let (p, q) = (vec2(a1), vec2(a2));
    let dir = q - p;
    let len = dir.norm();
    if len <= EPSILON {
        return false;
    }
    let unit = dir / len;

    // Cross product scaled by segment length gives perpendicular distance.
    let off_line = |v: nalgebra::Vector2<f64>| (v - p).perp(&unit).abs();
    if off_line(vec2(b1)) >= tolerance || off_line(vec2(b2)) >= tolerance {
        return false;
    }

    let t1 = (vec2(b1) - p).dot(&unit);
    let t2 = (vec2(b2) - p).dot(&unit);
    let (lo, hi) = (t1.min(t2), t1.max(t2));
    let overlap = hi.min(len) - lo.max(0.0);
    overlap > tolerance
}

/// Edge indices of `room` (in plan space) that share the plan-space segment `a`-`b`.
pub fn matching_edges(room: &RoomGeometry, a: &Point, b: &Point, tolerance: f64) -> Vec<usize> {
    let plan = room.plan_polygon();
    edges(&plan)
        .filter(|(_, c, d)| segments_shared(a, b, c, d, tolerance))
        .map(|(i, _, _)| i)
        .collect()
}

fn find_sharers(
    room_index: usize,
    a: &Point,
    b: &Point,
    rooms: &[RoomGeometry],
    plan_polygons: &[Vec<Point>],
    tolerance: f64,
) -> Sharers {
    let mut sharers = Sharers::new();
    for (other_index, other) in rooms.iter().enumerate() {
        if other_index == room_index || other.id == rooms[room_index].id {
            continue;
        }
        if let Some((edge_index, _, _)) = edges(&plan_polygons[other_index])
            .find(|(_, c, d)| segments_shared(a, b, c, d, tolerance))
        {
            sharers.push((other_index, edge_index));
        }
    }
    sharers
}

fn build_wall(
    room: &RoomGeometry,
    edge_index: usize,
    start: Point,
    end: Point,
    sharers: &Sharers,
    rooms: &[RoomGeometry],
) -> WallEntity {
    let attrs = room.wall_attributes(edge_index);
    let mut room_ids = vec![room.id.clone()];
    room_ids.extend(sharers.iter().map(|(ri, _)| rooms[*ri].id.clone()));

    let computed_type = if sharers.is_empty() {
        WallType::Exterior
    } else {
        WallType::Interior
    };
    let missing = attrs.missing
        || sharers
            .iter()
            .any(|(ri, ei)| rooms[*ri].wall_attributes(*ei).missing);

    WallEntity {
        id: wall_id(&room.id, edge_index),
        start_point: start,
        end_point: end,
        length_ft: start.distance_to(&end),
        height_ft: attrs.height_ft.unwrap_or(room.ceiling_height_ft),
        orientation: edge_orientation(&start, &end),
        direction: outward_direction(&room.polygon, edge_index),
        wall_type: attrs.wall_type.unwrap_or(computed_type),
        room_ids,
        parent_room_id: room.id.clone(),
        wall_index: edge_index,
        missing,
    }
}

/// Walls of a single room, each classified against every other room.
/// Shared walls are reported for this room without deduplication.
pub fn detect_exterior_walls(
    room: &RoomGeometry,
    rooms: &[RoomGeometry],
    tolerance: f64,
) -> Vec<WallEntity> {
    let mut all: Vec<RoomGeometry> = Vec::with_capacity(rooms.len() + 1);
    all.push(room.clone());
    all.extend(rooms.iter().filter(|r| r.id != room.id).cloned());
    let plan_polygons: Vec<Vec<Point>> = all.iter().map(RoomGeometry::plan_polygon).collect();

    edges(&plan_polygons[0])
        .map(|(edge_index, a, b)| {
            let sharers = find_sharers(0, &a, &b, &all, &plan_polygons, tolerance);
            build_wall(room, edge_index, a, b, &sharers, &all)
        })
        .collect()
}

/// Rounded, direction-free key for a plan segment.
fn segment_key(a: &Point, b: &Point) -> [(i64, i64); 2] {
    let quantize = |p: &Point| ((p.x * 1e6).round() as i64, (p.y * 1e6).round() as i64);
    let (ka, kb) = (quantize(a), quantize(b));
    if ka <= kb {
        [ka, kb]
    } else {
        [kb, ka]
    }
}

/// Every wall of the plan, with each shared wall emitted once.
///
/// An emitted wall claims its own segment and every sharer's edge segment,
/// so a neighbour edge covered by a longer wall (fully or partly) is not
/// emitted again. The first room in `rooms` that reaches a wall owns it.
pub fn derive_walls(rooms: &[RoomGeometry], tolerance: f64) -> Vec<WallEntity> {
    let plan_polygons: Vec<Vec<Point>> = rooms.iter().map(RoomGeometry::plan_polygon).collect();
    let mut claimed: HashSet<[(i64, i64); 2]> = HashSet::new();
    let mut walls = Vec::new();

    for (room_index, room) in rooms.iter().enumerate() {
        for (edge_index, a, b) in edges(&plan_polygons[room_index]) {
            if claimed.contains(&segment_key(&a, &b)) {
                continue;
            }
            let sharers = find_sharers(room_index, &a, &b, rooms, &plan_polygons, tolerance);

            claimed.insert(segment_key(&a, &b));
            for (other_index, other_edge) in &sharers {
                let polygon = &plan_polygons[*other_index];
                let c = polygon[*other_edge];
                let d = polygon[(*other_edge + 1) % polygon.len()];
                claimed.insert(segment_key(&c, &d));
            }
            walls.push(build_wall(room, edge_index, a, b, &sharers, rooms));
        }
    }

    tracing::debug!("Derived {} walls from {} rooms", walls.len(), rooms.len());
    walls
}

/// Nearest wall within `tolerance` of a plan-space point.
pub fn wall_at_point<'a>(
    walls: &'a [WallEntity],
    point: &Point,
    tolerance: f64,
) -> Option<&'a WallEntity> {
    walls
        .iter()
        .map(|w| {
            (
                w,
                point_to_segment_distance(point, &w.start_point, &w.end_point),
            )
        })
        .filter(|(_, d)| *d <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(w, _)| w)
}

/// Hash of everything wall derivation reads.
pub fn geometry_hash(rooms: &[RoomGeometry], tolerance: f64) -> u64 {
    let mut hasher = DefaultHasher::new();
    tolerance.to_bits().hash(&mut hasher);
    rooms.len().hash(&mut hasher);
    for room in rooms {
        room.id.hash(&mut hasher);
        room.origin_x_ft.to_bits().hash(&mut hasher);
        room.origin_y_ft.to_bits().hash(&mut hasher);
        room.ceiling_height_ft.to_bits().hash(&mut hasher);
        for p in &room.polygon {
            p.x.to_bits().hash(&mut hasher);
            p.y.to_bits().hash(&mut hasher);
        }
        for (index, attrs) in &room.wall_attributes {
            index.hash(&mut hasher);
            attrs.height_ft.map(f64::to_bits).hash(&mut hasher);
            attrs.wall_type.map(|t| t == WallType::Exterior).hash(&mut hasher);
            attrs.missing.hash(&mut hasher);
        }
    }
    hasher.finish()
}

/// Memoized wall list keyed by [`geometry_hash`].
#[derive(Debug, Clone, Default)]
pub struct WallCache {
    key: Option<u64>,
    walls: Vec<WallEntity>,
}

impl WallCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the walls for `rooms`, re-deriving only when the geometry changed.
    pub fn walls(&mut self, rooms: &[RoomGeometry], tolerance: f64) -> &[WallEntity] {
        let key = geometry_hash(rooms, tolerance);
        if self.key != Some(key) {
            self.walls = derive_walls(rooms, tolerance);
            self.key = Some(key);
        }
        &self.walls
    }

    pub fn invalidate(&mut self) {
        self.key = None;
        self.walls.clear();
    }

    pub fn is_current(&self, rooms: &[RoomGeometry], tolerance: f64) -> bool {
        self.key == Some(geometry_hash(rooms, tolerance))
    }
}
