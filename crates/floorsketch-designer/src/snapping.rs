//! Snapping engine.
//!
//! Applied per drag update, in order: grid rounding, corner snapping (which
//! wins outright), then per-axis alignment against other rooms' edges and
//! centers. The dragged room is always excluded. Each axis snaps to its
//! closest line, but every line within the threshold gets a guide, closest
//! first. All thresholds come from [`SnappingConfig`]; the functions here
//! hold no state.

use floorsketch_core::{Bounds, Point, RoomGeometry};
use floorsketch_settings::SnappingConfig;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::geometry::snap_to_grid;

/// Line direction of an alignment guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideOrientation {
    /// A vertical line at a fixed x.
    Vertical,
    /// A horizontal line at a fixed y.
    Horizontal,
}

/// Which feature of the other room the guide came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideKind {
    /// Collinear with a left/right/top/bottom edge.
    Edge,
    /// Aligned with a center line.
    Center,
    /// Landed exactly on a corner.
    Corner,
}

/// Transient alignment line shown while dragging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapGuide {
    pub orientation: GuideOrientation,
    pub kind: GuideKind,
    /// x for vertical guides, y for horizontal ones.
    pub position: f64,
    pub room_id: String,
}

pub type SnapGuides = SmallVec<[SnapGuide; 4]>;

#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub point: Point,
    pub snapped_x: bool,
    pub snapped_y: bool,
    /// Set when a corner snap fired.
    pub corner: Option<Point>,
    pub guides: SnapGuides,
}

impl SnapResult {
    fn unsnapped(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
            corner: None,
            guides: SnapGuides::new(),
        }
    }
}

fn others<'a>(
    rooms: &'a [RoomGeometry],
    exclude_room_id: Option<&'a str>,
) -> impl Iterator<Item = &'a RoomGeometry> + 'a {
    rooms
        .iter()
        .filter(move |r| Some(r.id.as_str()) != exclude_room_id)
}

fn x_lines(bounds: &Bounds) -> [(f64, GuideKind); 3] {
    [
        (bounds.min_x, GuideKind::Edge),
        (bounds.max_x, GuideKind::Edge),
        (bounds.center_x(), GuideKind::Center),
    ]
}

fn y_lines(bounds: &Bounds) -> [(f64, GuideKind); 3] {
    [
        (bounds.min_y, GuideKind::Edge),
        (bounds.max_y, GuideKind::Edge),
        (bounds.center_y(), GuideKind::Center),
    ]
}

struct AxisMatch<'a> {
    distance: f64,
    target: f64,
    kind: GuideKind,
    room_id: &'a str,
}

/// Every line within `threshold` of any of `values`, closest first, each
/// paired with the index of the value that hit it.
fn axis_matches<'a>(
    values: &[f64],
    rooms: impl Iterator<Item = &'a RoomGeometry>,
    lines: fn(&Bounds) -> [(f64, GuideKind); 3],
    threshold: f64,
) -> Vec<(AxisMatch<'a>, usize)> {
    let mut matches = Vec::new();
    for room in rooms {
        let bounds = room.plan_bounds();
        for (target, kind) in lines(&bounds) {
            let closest = values
                .iter()
                .enumerate()
                .map(|(i, value)| ((value - target).abs(), i))
                .filter(|(distance, _)| *distance <= threshold)
                .min_by(|a, b| a.0.total_cmp(&b.0));
            if let Some((distance, line_index)) = closest {
                matches.push((
                    AxisMatch {
                        distance,
                        target,
                        kind,
                        room_id: &room.id,
                    },
                    line_index,
                ));
            }
        }
    }
    matches.sort_by(|a, b| a.0.distance.total_cmp(&b.0.distance));
    matches
}

fn push_guides(
    guides: &mut SnapGuides,
    orientation: GuideOrientation,
    matches: &[(AxisMatch<'_>, usize)],
) {
    guides.extend(matches.iter().map(|(m, _)| SnapGuide {
        orientation,
        kind: m.kind,
        position: m.target,
        room_id: m.room_id.to_string(),
    }));
}

/// Snaps a plan-space point against the grid, other rooms' corners and other
/// rooms' edge/center lines.
pub fn snap_point(
    point: Point,
    rooms: &[RoomGeometry],
    exclude_room_id: Option<&str>,
    config: &SnappingConfig,
) -> SnapResult {
    if !config.enabled {
        return SnapResult::unsnapped(point);
    }

    let mut result = SnapResult::unsnapped(point);
    if config.grid_enabled {
        result.point = Point::new(
            snap_to_grid(point.x, config.grid_size_ft),
            snap_to_grid(point.y, config.grid_size_ft),
        );
    }

    if config.corner_enabled {
        let candidate = result.point;
        let nearest = others(rooms, exclude_room_id)
            .flat_map(|room| {
                room.plan_polygon()
                    .into_iter()
                    .map(move |corner| (corner, room.id.as_str()))
            })
            .map(|(corner, id)| (corner, id, corner.distance_to(&candidate)))
            .filter(|(_, _, d)| *d <= config.corner_threshold_ft)
            .min_by(|a, b| a.2.total_cmp(&b.2));

        if let Some((corner, room_id, _)) = nearest {
            result.point = corner;
            result.snapped_x = true;
            result.snapped_y = true;
            result.corner = Some(corner);
            result.guides.push(SnapGuide {
                orientation: GuideOrientation::Vertical,
                kind: GuideKind::Corner,
                position: corner.x,
                room_id: room_id.to_string(),
            });
            result.guides.push(SnapGuide {
                orientation: GuideOrientation::Horizontal,
                kind: GuideKind::Corner,
                position: corner.y,
                room_id: room_id.to_string(),
            });
            return result;
        }
    }

    if config.alignment_enabled {
        let threshold = config.alignment_threshold_ft;
        let matches = axis_matches(
            &[result.point.x],
            others(rooms, exclude_room_id),
            x_lines,
            threshold,
        );
        if let Some((best, _)) = matches.first() {
            result.point.x = best.target;
            result.snapped_x = true;
            push_guides(&mut result.guides, GuideOrientation::Vertical, &matches);
        }
        let matches = axis_matches(
            &[result.point.y],
            others(rooms, exclude_room_id),
            y_lines,
            threshold,
        );
        if let Some((best, _)) = matches.first() {
            result.point.y = best.target;
            result.snapped_y = true;
            push_guides(&mut result.guides, GuideOrientation::Horizontal, &matches);
        }
    }

    result
}

/// Snaps a whole room being dragged: its left/right/center-x and
/// top/bottom/center-y lines are tested against every other room's, and the
/// correction for each axis is returned as `(dx, dy)` with the guides.
pub fn snap_room_bounds(
    room: &RoomGeometry,
    rooms: &[RoomGeometry],
    config: &SnappingConfig,
) -> (f64, f64, SnapGuides) {
    let mut guides = SnapGuides::new();
    if !config.enabled || !config.alignment_enabled {
        return (0.0, 0.0, guides);
    }

    let bounds = room.plan_bounds();
    let threshold = config.alignment_threshold_ft;
    let mut dx = 0.0;
    let mut dy = 0.0;

    let edges_x: Vec<f64> = x_lines(&bounds).iter().map(|(v, _)| *v).collect();
    let matches = axis_matches(&edges_x, others(rooms, Some(&room.id)), x_lines, threshold);
    if let Some((best, line)) = matches.first() {
        dx = best.target - edges_x[*line];
        push_guides(&mut guides, GuideOrientation::Vertical, &matches);
    }

    let edges_y: Vec<f64> = y_lines(&bounds).iter().map(|(v, _)| *v).collect();
    let matches = axis_matches(&edges_y, others(rooms, Some(&room.id)), y_lines, threshold);
    if let Some((best, line)) = matches.first() {
        dy = best.target - edges_y[*line];
        push_guides(&mut guides, GuideOrientation::Horizontal, &matches);
    }

    (dx, dy, guides)
}
