//! Floor plan composition.
//!
//! Places rooms into the shared plan coordinate space, either absolutely or
//! abutted against a neighbour, maintains semantic connections between
//! rooms and keeps the aggregate plan bounds current.

use floorsketch_core::{
    generate_id, Bounds, CardinalDirection, ConnectionPoint, ConnectionType, FloorPlan, Point,
    Result, RoomConnection, RoomGeometry, SketchError,
};

use crate::geometry::{point_in_polygon, polygon_area};

/// Finds a room by exact id first, then by case-insensitive name.
pub fn find_room<'a>(rooms: &'a [RoomGeometry], id_or_name: &str) -> Option<&'a RoomGeometry> {
    rooms
        .iter()
        .find(|r| r.id == id_or_name)
        .or_else(|| rooms.iter().find(|r| r.matches(id_or_name)))
}

/// Room whose polygon contains `point` (plan space). When rooms overlap the
/// smallest one wins, so nested rooms can be picked.
pub fn find_room_at_point<'a>(rooms: &'a [RoomGeometry], point: &Point) -> Option<&'a RoomGeometry> {
    rooms
        .iter()
        .filter(|room| {
            let local = point.translated(-room.origin_x_ft, -room.origin_y_ft);
            point_in_polygon(&local, &room.polygon)
        })
        .min_by(|a, b| polygon_area(&a.polygon).total_cmp(&polygon_area(&b.polygon)))
}

pub fn new_floor_plan(name: impl Into<String>) -> FloorPlan {
    FloorPlan::new(generate_id("plan"), name)
}

/// Refreshes the plan's aggregate bounds from every room's origin and polygon.
pub fn recalculate_bounds(plan: &mut FloorPlan) {
    let bounds = plan
        .rooms
        .iter()
        .map(RoomGeometry::plan_bounds)
        .reduce(|a, b| a.union(&b))
        .unwrap_or_else(|| Bounds::new(0.0, 0.0, 0.0, 0.0));
    plan.min_x_ft = bounds.min_x;
    plan.min_y_ft = bounds.min_y;
    plan.width_ft = bounds.width();
    plan.length_ft = bounds.height();
}

/// Adds a room at its current origin.
pub fn add_room(plan: &mut FloorPlan, room: RoomGeometry) -> Result<()> {
    if plan.rooms.iter().any(|r| r.id == room.id) {
        return Err(SketchError::InvalidGeometry {
            reason: format!("room '{}' is already on the floor plan", room.id),
        });
    }
    tracing::info!("Added room '{}' to floor plan '{}'", room.name, plan.name);
    plan.rooms.push(room);
    recalculate_bounds(plan);
    Ok(())
}

/// Origin that abuts `room` against `direction` side of `reference`, `gap`
/// feet away, centered along the perpendicular axis.
pub fn relative_origin(
    reference: &RoomGeometry,
    room: &RoomGeometry,
    direction: CardinalDirection,
    gap: f64,
) -> Point {
    let anchor = reference.plan_bounds();
    let local = room.local_bounds();
    let centered_x = anchor.center_x() - local.width() / 2.0 - local.min_x;
    let centered_y = anchor.center_y() - local.height() / 2.0 - local.min_y;

    match direction {
        CardinalDirection::East => Point::new(anchor.max_x + gap - local.min_x, centered_y),
        CardinalDirection::West => Point::new(anchor.min_x - gap - local.max_x, centered_y),
        CardinalDirection::South => Point::new(centered_x, anchor.max_y + gap - local.min_y),
        CardinalDirection::North => Point::new(centered_x, anchor.min_y - gap - local.max_y),
    }
}

/// Adds a room next to `reference_id` on its `direction` side.
pub fn add_room_relative(
    plan: &mut FloorPlan,
    mut room: RoomGeometry,
    reference_id: &str,
    direction: CardinalDirection,
    gap: f64,
) -> Result<()> {
    let reference = find_room(&plan.rooms, reference_id)
        .ok_or_else(|| SketchError::room_not_found(reference_id))?;
    let origin = relative_origin(reference, &room, direction, gap);
    tracing::debug!(
        "Placing '{}' {} of '{}' at ({:.2}, {:.2})",
        room.name,
        direction,
        reference.name,
        origin.x,
        origin.y
    );
    room.origin_x_ft = origin.x;
    room.origin_y_ft = origin.y;
    add_room(plan, room)
}

/// Removes a room and every connection that involves it.
pub fn remove_room(plan: &mut FloorPlan, id_or_name: &str) -> Result<RoomGeometry> {
    let id = find_room(&plan.rooms, id_or_name)
        .map(|r| r.id.clone())
        .ok_or_else(|| SketchError::room_not_found(id_or_name))?;
    let index = plan
        .rooms
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| SketchError::room_not_found(id_or_name))?;
    let room = plan.rooms.remove(index);
    let before = plan.connections.len();
    plan.connections.retain(|c| !c.involves_room(&id));
    tracing::info!(
        "Removed room '{}' and {} connection(s)",
        room.name,
        before - plan.connections.len()
    );
    recalculate_bounds(plan);
    Ok(room)
}

/// Moves a room's origin to an absolute plan position.
pub fn set_room_position(plan: &mut FloorPlan, id_or_name: &str, x_ft: f64, y_ft: f64) -> Result<()> {
    let room = plan
        .room_mut(id_or_name)
        .ok_or_else(|| SketchError::room_not_found(id_or_name))?;
    room.origin_x_ft = x_ft;
    room.origin_y_ft = y_ft;
    recalculate_bounds(plan);
    Ok(())
}

/// Links two rooms. Connections are semantic and independent of whether
/// the rooms actually share a wall. Returns the new connection id.
pub fn connect_rooms(
    plan: &mut FloorPlan,
    from: ConnectionPoint,
    to: ConnectionPoint,
    connection_type: ConnectionType,
) -> Result<String> {
    let from_id = find_room(&plan.rooms, &from.room_id)
        .map(|r| r.id.clone())
        .ok_or_else(|| SketchError::room_not_found(&from.room_id))?;
    let to_id = find_room(&plan.rooms, &to.room_id)
        .map(|r| r.id.clone())
        .ok_or_else(|| SketchError::room_not_found(&to.room_id))?;
    if from_id == to_id {
        return Err(SketchError::other("Cannot connect a room to itself"));
    }

    let connection = RoomConnection {
        id: generate_id("conn"),
        from: ConnectionPoint {
            room_id: from_id,
            ..from
        },
        to: ConnectionPoint {
            room_id: to_id,
            ..to
        },
        connection_type,
    };
    let id = connection.id.clone();
    tracing::info!(
        "Connected {} ({}) to {} ({}) with a {}",
        connection.from.room_id,
        connection.from.wall,
        connection.to.room_id,
        connection.to.wall,
        connection_type
    );
    plan.connections.push(connection);
    Ok(id)
}

pub fn disconnect_rooms(plan: &mut FloorPlan, connection_id: &str) -> Result<RoomConnection> {
    let index = plan
        .connections
        .iter()
        .position(|c| c.id == connection_id)
        .ok_or_else(|| SketchError::ConnectionNotFound {
            id: connection_id.to_string(),
        })?;
    Ok(plan.connections.remove(index))
}

/// Sum of all room floor areas.
pub fn total_area(rooms: &[RoomGeometry]) -> f64 {
    rooms.iter().map(|r| polygon_area(&r.polygon)).sum()
}

/// One-line spoken summary of the plan.
pub fn plan_summary(plan: &FloorPlan) -> String {
    format!(
        "Floor plan '{}' has {} room(s), {} connection(s), {:.0} square feet, overall {:.1} by {:.1} feet",
        plan.name,
        plan.rooms.len(),
        plan.connections.len(),
        total_area(&plan.rooms),
        plan.width_ft,
        plan.length_ft
    )
}
