//! Multi-room batch operations: align, distribute and wall-length equalize.
//!
//! Align and distribute compute per-room translations; equalize computes
//! per-room reshapes. The room store turns the results into one undoable
//! batch record.

use std::fmt;

use floorsketch_core::{Result, RoomGeometry, SketchError, WallEntity, WallOrientation};
use serde::{Deserialize, Serialize};

use crate::manipulation::resize_room;

/// Alignment target for [`align_rooms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Right,
    Top,
    Bottom,
    /// Centers share one x coordinate (a vertical line).
    CenterH,
    /// Centers share one y coordinate (a horizontal line).
    CenterV,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::CenterH => "center horizontally",
            Self::CenterV => "center vertically",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributeAxis {
    Horizontal,
    Vertical,
}

/// How the common wall length is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualizeMode {
    Average,
    Max,
    Min,
    Explicit(f64),
}

/// Translation for one room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDelta {
    pub room_id: String,
    pub dx: f64,
    pub dy: f64,
}

fn selected<'a>(rooms: &'a [RoomGeometry], ids: &[String]) -> Vec<&'a RoomGeometry> {
    ids.iter()
        .filter_map(|id| rooms.iter().find(|r| &r.id == id))
        .collect()
}

fn require(operation: &str, required: usize, actual: usize) -> Result<()> {
    if actual < required {
        return Err(SketchError::InsufficientSelection {
            operation: operation.to_string(),
            required,
            actual,
        });
    }
    Ok(())
}

/// Aligns the selected rooms. Edges align to the extreme edge of the
/// selection; centers align to the average of the rooms' centers.
pub fn align_rooms(
    rooms: &[RoomGeometry],
    ids: &[String],
    alignment: Alignment,
) -> Result<Vec<RoomDelta>> {
    let targets = selected(rooms, ids);
    require("Align", 2, targets.len())?;

    let bounds: Vec<_> = targets.iter().map(|r| r.plan_bounds()).collect();
    let n = bounds.len() as f64;
    let deltas = match alignment {
        Alignment::Left => {
            let target = bounds.iter().map(|b| b.min_x).fold(f64::INFINITY, f64::min);
            bounds.iter().map(|b| (target - b.min_x, 0.0)).collect::<Vec<_>>()
        }
        Alignment::Right => {
            let target = bounds.iter().map(|b| b.max_x).fold(f64::NEG_INFINITY, f64::max);
            bounds.iter().map(|b| (target - b.max_x, 0.0)).collect()
        }
        Alignment::Top => {
            let target = bounds.iter().map(|b| b.min_y).fold(f64::INFINITY, f64::min);
            bounds.iter().map(|b| (0.0, target - b.min_y)).collect()
        }
        Alignment::Bottom => {
            let target = bounds.iter().map(|b| b.max_y).fold(f64::NEG_INFINITY, f64::max);
            bounds.iter().map(|b| (0.0, target - b.max_y)).collect()
        }
        Alignment::CenterH => {
            let target = bounds.iter().map(|b| b.center_x()).sum::<f64>() / n;
            bounds.iter().map(|b| (target - b.center_x(), 0.0)).collect()
        }
        Alignment::CenterV => {
            let target = bounds.iter().map(|b| b.center_y()).sum::<f64>() / n;
            bounds.iter().map(|b| (0.0, target - b.center_y())).collect()
        }
    };

    Ok(targets
        .iter()
        .zip(deltas)
        .map(|(room, (dx, dy))| RoomDelta {
            room_id: room.id.clone(),
            dx,
            dy,
        })
        .collect())
}

/// Spreads the selected rooms evenly along an axis. The first and last
/// rooms (by leading edge) stay put; the gaps between consecutive rooms
/// become `(span - sum of sizes) / (n - 1)`.
pub fn distribute_rooms(
    rooms: &[RoomGeometry],
    ids: &[String],
    axis: DistributeAxis,
) -> Result<Vec<RoomDelta>> {
    let targets = selected(rooms, ids);
    require("Distribute", 3, targets.len())?;

    let mut spans: Vec<(&RoomGeometry, f64, f64)> = targets
        .iter()
        .map(|room| {
            let b = room.plan_bounds();
            match axis {
                DistributeAxis::Horizontal => (*room, b.min_x, b.width()),
                DistributeAxis::Vertical => (*room, b.min_y, b.height()),
            }
        })
        .collect();
    spans.sort_by(|a, b| a.1.total_cmp(&b.1));

    let first = spans[0].1;
    let last = spans[spans.len() - 1];
    let span = (last.1 + last.2) - first;
    let total: f64 = spans.iter().map(|(_, _, size)| size).sum();
    let spacing = (span - total) / (spans.len() - 1) as f64;

    let mut cursor = first;
    let mut deltas = Vec::with_capacity(spans.len());
    for (index, (room, start, size)) in spans.iter().enumerate() {
        let delta = if index == 0 || index == spans.len() - 1 {
            0.0
        } else {
            cursor - start
        };
        let (dx, dy) = match axis {
            DistributeAxis::Horizontal => (delta, 0.0),
            DistributeAxis::Vertical => (0.0, delta),
        };
        deltas.push(RoomDelta {
            room_id: room.id.clone(),
            dx,
            dy,
        });
        cursor += size + spacing;
    }
    Ok(deltas)
}

/// Target length for a set of wall lengths.
pub fn equalize_target(lengths: &[f64], mode: EqualizeMode) -> Option<f64> {
    if lengths.is_empty() {
        return None;
    }
    let target = match mode {
        EqualizeMode::Average => lengths.iter().sum::<f64>() / lengths.len() as f64,
        EqualizeMode::Max => lengths.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        EqualizeMode::Min => lengths.iter().copied().fold(f64::INFINITY, f64::min),
        EqualizeMode::Explicit(value) => value,
    };
    Some(target)
}

/// Reshapes the rooms on `walls` so every wall gets the same length.
///
/// A horizontal wall sets its rooms' width, a vertical wall their length.
/// Every room sharing a wall is reshaped along with its owner, so the wall
/// stays shared. The polygon is regenerated, so this is a destructive
/// reshape rather than a move. Returns the reshaped rooms (one entry per
/// affected room).
pub fn equalize_walls(
    rooms: &[RoomGeometry],
    walls: &[WallEntity],
    mode: EqualizeMode,
) -> Result<Vec<RoomGeometry>> {
    require("Equalize", 2, walls.len())?;
    let lengths: Vec<f64> = walls.iter().map(|w| w.length_ft).collect();
    let target = equalize_target(&lengths, mode).unwrap_or_default();
    if !(target.is_finite() && target > 0.0) {
        return Err(SketchError::InvalidDimension {
            field: "wall length".to_string(),
            value: target,
            reason: "must be greater than zero".to_string(),
        });
    }

    let mut reshaped: Vec<RoomGeometry> = Vec::new();
    for wall in walls {
        let mut room_ids: Vec<&str> = vec![wall.parent_room_id.as_str()];
        room_ids.extend(
            wall.room_ids
                .iter()
                .map(String::as_str)
                .filter(|id| *id != wall.parent_room_id),
        );
        for room_id in room_ids {
            let current = match reshaped.iter().find(|r| r.id == room_id) {
                Some(room) => room.clone(),
                None => rooms
                    .iter()
                    .find(|r| r.id == room_id)
                    .cloned()
                    .ok_or_else(|| SketchError::room_not_found(room_id))?,
            };
            let updated = match wall.orientation {
                WallOrientation::Horizontal => resize_room(&current, target, current.length_ft)?,
                WallOrientation::Vertical => resize_room(&current, current.width_ft, target)?,
            };
            match reshaped.iter_mut().find(|r| r.id == updated.id) {
                Some(slot) => *slot = updated,
                None => reshaped.push(updated),
            }
        }
    }
    Ok(reshaped)
}
