use floorsketch_core::{CardinalDirection, RoomGeometry, RoomShape, WallAttributes, WallType};
use floorsketch_designer::manipulation::create_room;
use floorsketch_designer::walls::{outward_direction, wall_id};
use floorsketch_designer::{derive_walls, detect_exterior_walls, WallCache};

const TOLERANCE: f64 = 0.1;

fn room_at(name: &str, width: f64, length: f64, x: f64, y: f64) -> RoomGeometry {
    let mut room = create_room(name, RoomShape::Rectangle, width, length, 8.0, None, None).unwrap();
    room.origin_x_ft = x;
    room.origin_y_ft = y;
    room
}

#[test]
fn test_rectangle_edges_face_outward() {
    let room = room_at("Den", 10.0, 12.0, 0.0, 0.0);
    let directions: Vec<_> = (0..4).map(|i| outward_direction(&room.polygon, i)).collect();
    assert_eq!(
        directions,
        vec![
            CardinalDirection::North,
            CardinalDirection::East,
            CardinalDirection::South,
            CardinalDirection::West,
        ]
    );
}

#[test]
fn test_single_room_walls_are_exterior() {
    let room = room_at("Den", 10.0, 12.0, 0.0, 0.0);
    let walls = derive_walls(std::slice::from_ref(&room), TOLERANCE);
    assert_eq!(walls.len(), 4);
    assert!(walls.iter().all(|w| w.wall_type == WallType::Exterior));
    assert!(walls.iter().all(|w| w.height_ft == 8.0));
    assert_eq!(walls[1].id, wall_id(&room.id, 1));
    assert_eq!(walls[1].length_ft, 12.0);
}

#[test]
fn test_shared_wall_is_interior_for_both_rooms() {
    let a = room_at("A", 10.0, 12.0, 0.0, 0.0);
    let b = room_at("B", 10.0, 12.0, 10.0, 0.0);
    let rooms = vec![a.clone(), b.clone()];

    for room in &rooms {
        let walls = detect_exterior_walls(room, &rooms, TOLERANCE);
        let exterior = walls
            .iter()
            .filter(|w| w.wall_type == WallType::Exterior)
            .count();
        let interior: Vec<_> = walls
            .iter()
            .filter(|w| w.wall_type == WallType::Interior)
            .collect();
        assert_eq!(exterior, 3);
        assert_eq!(interior.len(), 1);
        assert_eq!(interior[0].perpendicular_coordinate(), 10.0);
    }
}

#[test]
fn test_shared_wall_is_emitted_once() {
    let a = room_at("A", 10.0, 12.0, 0.0, 0.0);
    let b = room_at("B", 10.0, 12.0, 10.0, 0.0);
    let walls = derive_walls(&[a.clone(), b.clone()], TOLERANCE);
    assert_eq!(walls.len(), 7);

    let shared: Vec<_> = walls.iter().filter(|w| w.is_shared()).collect();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].parent_room_id, a.id);
    assert!(shared[0].involves_room(&b.id));
    assert_eq!(shared[0].direction, CardinalDirection::East);
}

#[test]
fn test_partial_overlap_counts_as_shared() {
    let a = room_at("A", 10.0, 12.0, 0.0, 0.0);
    let b = room_at("B", 8.0, 6.0, 10.0, 3.0);
    let walls = detect_exterior_walls(&b, &[a, b.clone()], TOLERANCE);
    let west = walls
        .iter()
        .find(|w| w.direction == CardinalDirection::West)
        .unwrap();
    assert_eq!(west.wall_type, WallType::Interior);
}

#[test]
fn test_gap_beyond_tolerance_is_not_shared() {
    let a = room_at("A", 10.0, 12.0, 0.0, 0.0);
    let b = room_at("B", 10.0, 12.0, 10.5, 0.0);
    let walls = derive_walls(&[a, b], TOLERANCE);
    assert_eq!(walls.len(), 8);
    assert!(walls.iter().all(|w| !w.is_shared()));
}

#[test]
fn test_wall_attribute_overrides() {
    let mut room = room_at("Den", 10.0, 12.0, 0.0, 0.0);
    room.wall_attributes.insert(
        2,
        WallAttributes {
            height_ft: Some(9.5),
            wall_type: Some(WallType::Interior),
            missing: true,
        },
    );
    let walls = derive_walls(std::slice::from_ref(&room), TOLERANCE);
    assert_eq!(walls[2].height_ft, 9.5);
    assert_eq!(walls[2].wall_type, WallType::Interior);
    assert!(walls[2].missing);
    assert!(!walls[0].missing);
}

#[test]
fn test_wall_cache_rederives_on_change() {
    let mut rooms = vec![room_at("A", 10.0, 12.0, 0.0, 0.0)];
    let mut cache = WallCache::new();
    assert_eq!(cache.walls(&rooms, TOLERANCE).len(), 4);
    assert!(cache.is_current(&rooms, TOLERANCE));

    rooms.push(room_at("B", 10.0, 12.0, 10.0, 0.0));
    assert!(!cache.is_current(&rooms, TOLERANCE));
    assert_eq!(cache.walls(&rooms, TOLERANCE).len(), 7);

    cache.invalidate();
    assert!(!cache.is_current(&rooms, TOLERANCE));
}

#[test]
fn test_partly_shared_wall_is_emitted_once() {
    let a = room_at("A", 20.0, 12.0, 0.0, 0.0);
    let b = room_at("B", 10.0, 6.0, 0.0, 12.0);
    let c = room_at("C", 10.0, 6.0, 10.0, 12.0);
    let walls = derive_walls(&[a.clone(), b.clone(), c.clone()], TOLERANCE);
    assert_eq!(walls.len(), 9);

    let seam: Vec<_> = walls
        .iter()
        .filter(|w| w.start_point.y == 12.0 && w.end_point.y == 12.0)
        .collect();
    assert_eq!(seam.len(), 1);
    assert_eq!(seam[0].parent_room_id, a.id);
    assert!(seam[0].involves_room(&b.id));
    assert!(seam[0].involves_room(&c.id));

    let divider = walls
        .iter()
        .filter(|w| w.start_point.x == 10.0 && w.end_point.x == 10.0)
        .count();
    assert_eq!(divider, 1);
}
