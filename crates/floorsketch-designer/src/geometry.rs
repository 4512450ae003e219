//! Polygon and geometry math.
//!
//! Pure, stateless functions over room-local point lists: shape generation
//! for rectangle, L and T rooms, bounds, area, perimeter, centroid,
//! point-in-polygon, point-to-segment distance, rotation and opening
//! position resolution.
//!
//! Conventions: y grows towards the south. Polygons are implicitly closed
//! (the last vertex connects back to the first) and wound clockwise on
//! screen. For the purpose of measuring positions along a wall, north and
//! south walls start at their west end, east and west walls at their north end.

use floorsketch_core::{
    Bounds, CardinalDirection, LShapeConfig, NotchCorner, Opening, Point, PositionFrom,
    PositionSpec, RoomGeometry, RoomShape, SymbolicPosition, TShapeConfig,
};
use nalgebra::Vector2;

pub use floorsketch_core::generate_id;

/// Tolerance for comparing coordinates that should be identical.
pub const EPSILON: f64 = 1e-9;

/// Tolerance used to decide that two vertices are the same point on a drawing.
pub const POINT_TOLERANCE_FT: f64 = 0.01;

/// Distance kept between a symbolic `left`/`right` element and the wall end.
pub const SYMBOLIC_EDGE_OFFSET_FT: f64 = 0.5;

/// Largest share of a room dimension a notch or stem may take.
const MAX_CUTOUT_RATIO: f64 = 0.9;

pub(crate) fn vec2(p: &Point) -> Vector2<f64> {
    Vector2::new(p.x, p.y)
}

/// Rounds away floating-point noise left by rotations and sums.
pub fn clean(value: f64) -> f64 {
    let rounded = (value * 1e9).round() / 1e9;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Snaps `value` to the nearest multiple of `step`.
pub fn snap_to_grid(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    clean((value / step).round() * step)
}

/// Axis-aligned rectangle `(0,0)-(w,0)-(w,l)-(0,l)`.
pub fn generate_rectangle(width: f64, length: f64) -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, length),
        Point::new(0.0, length),
    ]
}

fn clamp_cutout(value: f64, limit: f64, what: &str) -> f64 {
    let max = limit * MAX_CUTOUT_RATIO;
    let clamped = value.clamp(0.0, max);
    if (clamped - value).abs() > EPSILON {
        tracing::warn!("{} {:.2} ft clamped to {:.2} ft", what, value, clamped);
    }
    clamped
}

/// L-shaped room: a `width x length` box with a rectangular notch removed
/// from one corner. The bounding box stays `width x length`.
pub fn generate_l_shape(width: f64, length: f64, config: &LShapeConfig) -> Vec<Point> {
    let nw = clamp_cutout(config.notch_width_ft, width, "L-shape notch width");
    let nl = clamp_cutout(config.notch_length_ft, length, "L-shape notch length");
    if nw <= EPSILON || nl <= EPSILON {
        return generate_rectangle(width, length);
    }

    let (w, l) = (width, length);
    let points = match config.notch_corner {
        NotchCorner::NorthEast => vec![
            (0.0, 0.0),
            (w - nw, 0.0),
            (w - nw, nl),
            (w, nl),
            (w, l),
            (0.0, l),
        ],
        NotchCorner::SouthEast => vec![
            (0.0, 0.0),
            (w, 0.0),
            (w, l - nl),
            (w - nw, l - nl),
            (w - nw, l),
            (0.0, l),
        ],
        NotchCorner::SouthWest => vec![
            (0.0, 0.0),
            (w, 0.0),
            (w, l),
            (nw, l),
            (nw, l - nl),
            (0.0, l - nl),
        ],
        NotchCorner::NorthWest => vec![
            (nw, 0.0),
            (w, 0.0),
            (w, l),
            (0.0, l),
            (0.0, nl),
            (nw, nl),
        ],
    };
    points.into_iter().map(|(x, y)| Point::new(x, y)).collect()
}

/// Resolved stem placement of a T-shaped room: `(stem width, stem length, start offset)`.
pub fn resolve_t_stem(width: f64, length: f64, config: &TShapeConfig) -> (f64, f64, f64) {
    let (wall_len, depth_limit) = if config.stem_wall.runs_horizontally() {
        (width, length)
    } else {
        (length, width)
    };
    let sw = config.stem_width_ft.clamp(0.0, wall_len);
    let sl = clamp_cutout(config.stem_length_ft, depth_limit, "T-shape stem length");
    let position = config
        .stem_position_ft
        .unwrap_or((wall_len - sw) / 2.0)
        .clamp(0.0, wall_len - sw);
    (sw, sl, position)
}

/// T-shaped room: a bar spanning the full `width x length` box minus a stem
/// band, with a stem rectangle extending outward from the bar on
/// `stem_wall`. The bounding box stays `width x length`.
pub fn generate_t_shape(width: f64, length: f64, config: &TShapeConfig) -> Vec<Point> {
    let (sw, sl, p) = resolve_t_stem(width, length, config);
    if sw <= EPSILON || sl <= EPSILON {
        return generate_rectangle(width, length);
    }

    let (w, l) = (width, length);
    let points = match config.stem_wall {
        CardinalDirection::South => vec![
            (0.0, 0.0),
            (w, 0.0),
            (w, l - sl),
            (p + sw, l - sl),
            (p + sw, l),
            (p, l),
            (p, l - sl),
            (0.0, l - sl),
        ],
        CardinalDirection::North => vec![
            (p, 0.0),
            (p + sw, 0.0),
            (p + sw, sl),
            (w, sl),
            (w, l),
            (0.0, l),
            (0.0, sl),
            (p, sl),
        ],
        CardinalDirection::East => vec![
            (0.0, 0.0),
            (w - sl, 0.0),
            (w - sl, p),
            (w, p),
            (w, p + sw),
            (w - sl, p + sw),
            (w - sl, l),
            (0.0, l),
        ],
        CardinalDirection::West => vec![
            (sl, 0.0),
            (w, 0.0),
            (w, l),
            (sl, l),
            (sl, p + sw),
            (0.0, p + sw),
            (0.0, p),
            (sl, p),
        ],
    };
    simplify_polygon(
        &points
            .into_iter()
            .map(|(x, y)| Point::new(x, y))
            .collect::<Vec<_>>(),
    )
}

/// Notch used for an L-shaped room created without a configuration.
pub fn default_l_config(width: f64, length: f64) -> LShapeConfig {
    LShapeConfig {
        notch_corner: NotchCorner::NorthEast,
        notch_width_ft: width / 2.0,
        notch_length_ft: length / 2.0,
    }
}

/// Stem used for a T-shaped room created without a configuration.
pub fn default_t_config(width: f64, length: f64) -> TShapeConfig {
    TShapeConfig {
        stem_wall: CardinalDirection::South,
        stem_width_ft: width / 3.0,
        stem_length_ft: length / 3.0,
        stem_position_ft: None,
    }
}

/// Generates the polygon for a shape family. Irregular rooms have no
/// parametric form, so they fall back to their bounding rectangle.
pub fn generate_polygon(
    shape: RoomShape,
    width: f64,
    length: f64,
    l_shape: Option<&LShapeConfig>,
    t_shape: Option<&TShapeConfig>,
) -> Vec<Point> {
    match shape {
        RoomShape::Rectangle | RoomShape::Irregular => generate_rectangle(width, length),
        RoomShape::LShape => match l_shape {
            Some(config) => generate_l_shape(width, length, config),
            None => generate_l_shape(width, length, &default_l_config(width, length)),
        },
        RoomShape::TShape => match t_shape {
            Some(config) => generate_t_shape(width, length, config),
            None => generate_t_shape(width, length, &default_t_config(width, length)),
        },
    }
}

/// For each edge of `from`, the index of the edge of `to` covering the same
/// segment in either direction. `None` when the outlines differ.
pub fn match_edge_indices(from: &[Point], to: &[Point], tolerance: f64) -> Option<Vec<usize>> {
    let targets: Vec<(usize, Point, Point)> = edges(to).collect();
    if targets.len() != edges(from).count() {
        return None;
    }
    edges(from)
        .map(|(_, a, b)| {
            targets
                .iter()
                .find(|(_, c, d)| {
                    (a.approx_eq(c, tolerance) && b.approx_eq(d, tolerance))
                        || (a.approx_eq(d, tolerance) && b.approx_eq(c, tolerance))
                })
                .map(|(j, _, _)| *j)
        })
        .collect()
}

/// Drops a repeated closing vertex so edges can be walked pairwise.
pub fn open_ring(points: &[Point]) -> &[Point] {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 3 && first.approx_eq(last, POINT_TOLERANCE_FT) => {
            &points[..points.len() - 1]
        }
        _ => points,
    }
}

/// Removes duplicate consecutive vertices and vertices lying on a straight run.
pub fn simplify_polygon(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in open_ring(points) {
        if out
            .last()
            .map_or(true, |last| !last.approx_eq(p, POINT_TOLERANCE_FT))
        {
            out.push(*p);
        }
    }
    while out.len() > 1 && out[0].approx_eq(&out[out.len() - 1], POINT_TOLERANCE_FT) {
        out.pop();
    }

    let mut changed = true;
    while changed && out.len() > 3 {
        changed = false;
        let n = out.len();
        for i in 0..n {
            let prev = vec2(&out[(i + n - 1) % n]);
            let cur = vec2(&out[i]);
            let next = vec2(&out[(i + 1) % n]);
            let a = cur - prev;
            let b = next - cur;
            if a.perp(&b).abs() <= EPSILON * (a.norm() + b.norm()).max(1.0) && a.dot(&b) > 0.0 {
                out.remove(i);
                changed = true;
                break;
            }
        }
    }
    out
}

/// Iterates over `(index, start, end)` for every edge of an implicitly closed polygon.
pub fn edges(points: &[Point]) -> impl Iterator<Item = (usize, Point, Point)> + '_ {
    let ring = open_ring(points);
    let n = ring.len();
    (0..n).map(move |i| (i, ring[i], ring[(i + 1) % n]))
}

/// Bounding box of a polygon; a zero box at the origin when empty.
pub fn polygon_bounds(points: &[Point]) -> Bounds {
    Bounds::from_points(points).unwrap_or_else(|| Bounds::new(0.0, 0.0, 0.0, 0.0))
}

/// Shoelace signed area. Positive for clockwise-on-screen (y down) winding.
pub fn signed_area(points: &[Point]) -> f64 {
    let sum: f64 = edges(points).map(|(_, a, b)| a.x * b.y - b.x * a.y).sum();
    sum / 2.0
}

/// Absolute polygon area, correct for any simple polygon.
pub fn polygon_area(points: &[Point]) -> f64 {
    signed_area(points).abs()
}

/// Sum of edge lengths including the closing edge.
pub fn polygon_perimeter(points: &[Point]) -> f64 {
    edges(points).map(|(_, a, b)| a.distance_to(&b)).sum()
}

/// Area-weighted centroid; falls back to the vertex average for degenerate polygons.
pub fn polygon_centroid(points: &[Point]) -> Point {
    let ring = open_ring(points);
    if ring.is_empty() {
        return Point::default();
    }
    let area = signed_area(ring);
    if area.abs() <= EPSILON {
        let n = ring.len() as f64;
        let (sx, sy) = ring.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        return Point::new(sx / n, sy / n);
    }
    let (cx, cy) = edges(ring).fold((0.0, 0.0), |(cx, cy), (_, a, b)| {
        let cross = a.x * b.y - b.x * a.y;
        (cx + (a.x + b.x) * cross, cy + (a.y + b.y) * cross)
    });
    Point::new(cx / (6.0 * area), cy / (6.0 * area))
}

/// Ray-casting parity test.
pub fn point_in_polygon(point: &Point, polygon: &[Point]) -> bool {
    let mut inside = false;
    for (_, a, b) in edges(polygon) {
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Shortest distance from `point` to the segment `a`-`b`.
pub fn point_to_segment_distance(point: &Point, a: &Point, b: &Point) -> f64 {
    let (p, a, b) = (vec2(point), vec2(a), vec2(b));
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq <= EPSILON {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

fn segments_cross(a1: &Point, a2: &Point, b1: &Point, b2: &Point) -> bool {
    let (p, r) = (vec2(a1), vec2(a2) - vec2(a1));
    let (q, s) = (vec2(b1), vec2(b2) - vec2(b1));
    let denom = r.perp(&s);
    if denom.abs() <= EPSILON {
        return false;
    }
    let t = (q - p).perp(&s) / denom;
    let u = (q - p).perp(&r) / denom;
    t > EPSILON && t < 1.0 - EPSILON && u > EPSILON && u < 1.0 - EPSILON
}

/// True when two non-adjacent edges cross each other.
pub fn is_self_intersecting(points: &[Point]) -> bool {
    let all: Vec<(usize, Point, Point)> = edges(points).collect();
    let n = all.len();
    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (_, a1, a2) = all[i];
            let (_, b1, b2) = all[j];
            if segments_cross(&a1, &a2, &b1, &b2) {
                return true;
            }
        }
    }
    false
}

/// Rotates `point` about `center` by `degrees` (clockwise on screen).
pub fn rotate_point(point: &Point, center: &Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(
        clean(center.x + dx * cos - dy * sin),
        clean(center.y + dx * sin + dy * cos),
    )
}

/// Exact clockwise quarter-turn rotation about `center`.
pub fn rotate_point_quarter_turns(point: &Point, center: &Point, quarter_turns: u32) -> Point {
    let (mut dx, mut dy) = (point.x - center.x, point.y - center.y);
    for _ in 0..quarter_turns % 4 {
        (dx, dy) = (-dy, dx);
    }
    Point::new(center.x + dx, center.y + dy)
}

/// Translates a polygon so its bounding box starts at `(0, 0)`.
/// Returns the polygon and the offset that was removed.
pub fn normalize_polygon(points: &[Point]) -> (Vec<Point>, Point) {
    let bounds = polygon_bounds(points);
    let normalized = points
        .iter()
        .map(|p| Point::new(clean(p.x - bounds.min_x), clean(p.y - bounds.min_y)))
        .collect();
    (normalized, Point::new(bounds.min_x, bounds.min_y))
}

/// Rotates a polygon by quarter turns about its centroid and re-normalizes it.
pub fn rotate_polygon_quarter_turns(points: &[Point], quarter_turns: u32) -> Vec<Point> {
    let center = polygon_centroid(points);
    let rotated: Vec<Point> = points
        .iter()
        .map(|p| rotate_point_quarter_turns(p, &center, quarter_turns))
        .collect();
    normalize_polygon(&rotated).0
}

/// Converts a rotation in degrees to clockwise quarter turns, if it is a multiple of 90.
pub fn quarter_turns(degrees: i32) -> Option<u32> {
    if degrees % 90 != 0 {
        return None;
    }
    Some((degrees.rem_euclid(360) / 90) as u32)
}

/// Resolves an opening or feature position to the distance of its center
/// from the wall start.
///
/// Symbolic `left`/`right` sit six inches from the corresponding wall end,
/// or half the element's width if that is larger. Numeric positions measure
/// from the start unless `position_from` is `End`. The result is always
/// clamped to `[element_width / 2, wall_length - element_width / 2]` so the
/// element never protrudes past a corner. When the element is wider than the
/// wall the interval is empty and the wall midpoint is returned.
pub fn calculate_position_in_feet(
    position: PositionSpec,
    position_from: PositionFrom,
    wall_length: f64,
    element_width: f64,
) -> f64 {
    let half = element_width / 2.0;
    let min = half;
    let max = wall_length - half;
    if min > max {
        return wall_length / 2.0;
    }

    let edge = SYMBOLIC_EDGE_OFFSET_FT.max(half);
    let raw = match position {
        PositionSpec::Symbolic(SymbolicPosition::Left) => edge,
        PositionSpec::Symbolic(SymbolicPosition::Right) => wall_length - edge,
        PositionSpec::Symbolic(SymbolicPosition::Center) => wall_length / 2.0,
        PositionSpec::Feet(value) => match position_from {
            PositionFrom::Start => value,
            PositionFrom::End => wall_length - value,
        },
    };

    if raw.is_nan() {
        return wall_length / 2.0;
    }
    raw.clamp(min, max)
}

/// Room-local segment occupied by an element of `width` centered at
/// `center_offset` along a cardinal wall of a room with `bounds`.
pub fn wall_segment(
    bounds: &Bounds,
    wall: CardinalDirection,
    center_offset: f64,
    width: f64,
) -> (Point, Point) {
    let start = center_offset - width / 2.0;
    let end = center_offset + width / 2.0;
    match wall {
        CardinalDirection::North => (
            Point::new(bounds.min_x + start, bounds.min_y),
            Point::new(bounds.min_x + end, bounds.min_y),
        ),
        CardinalDirection::South => (
            Point::new(bounds.min_x + start, bounds.max_y),
            Point::new(bounds.min_x + end, bounds.max_y),
        ),
        CardinalDirection::West => (
            Point::new(bounds.min_x, bounds.min_y + start),
            Point::new(bounds.min_x, bounds.min_y + end),
        ),
        CardinalDirection::East => (
            Point::new(bounds.max_x, bounds.min_y + start),
            Point::new(bounds.max_x, bounds.min_y + end),
        ),
    }
}

/// Center of an opening along its wall, measured from the wall start.
pub fn opening_center_ft(room: &RoomGeometry, opening: &Opening) -> f64 {
    calculate_position_in_feet(
        opening.position,
        opening.position_from,
        room.wall_length(opening.wall),
        opening.width_ft,
    )
}

/// Plan-space segment an opening occupies on its wall.
pub fn opening_segment(room: &RoomGeometry, opening: &Opening) -> (Point, Point) {
    let center = opening_center_ft(room, opening);
    let (a, b) = wall_segment(&room.local_bounds(), opening.wall, center, opening.width_ft);
    (
        a.translated(room.origin_x_ft, room.origin_y_ft),
        b.translated(room.origin_x_ft, room.origin_y_ft),
    )
}

/// Remaps a T-shape configuration through clockwise quarter turns of a room
/// that is currently `width x length`.
pub fn rotate_t_config(
    config: &TShapeConfig,
    quarter_turns: u32,
    width: f64,
    length: f64,
) -> TShapeConfig {
    let mut cfg = *config;
    let (mut w, mut l) = (width, length);
    for _ in 0..quarter_turns % 4 {
        // East and west walls run north-to-south; after a clockwise turn they
        // become south/north walls measured west-to-east, which flips the offset.
        let flips = !cfg.stem_wall.runs_horizontally();
        let wall_len = if cfg.stem_wall.runs_horizontally() { w } else { l };
        if flips {
            cfg.stem_position_ft = cfg
                .stem_position_ft
                .map(|p| clean(wall_len - p - cfg.stem_width_ft));
        }
        cfg.stem_wall = cfg.stem_wall.rotated(1);
        (w, l) = (l, w);
    }
    cfg
}

/// Remaps an L-shape configuration through clockwise quarter turns.
pub fn rotate_l_config(config: &LShapeConfig, quarter_turns: u32) -> LShapeConfig {
    let mut cfg = *config;
    cfg.notch_corner = cfg.notch_corner.rotated(quarter_turns);
    if quarter_turns % 2 == 1 {
        std::mem::swap(&mut cfg.notch_width_ft, &mut cfg.notch_length_ft);
    }
    cfg
}
