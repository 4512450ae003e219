use floorsketch_core::{
    CardinalDirection, DoorStyle, Opening, OpeningKind, PositionSpec, RoomGeometry, RoomShape,
    SwingDirection, WallAttributes,
};
use floorsketch_designer::geometry::opening_center_ft;
use floorsketch_designer::manipulation::create_room;
use floorsketch_designer::validation::check_room_completeness;
use floorsketch_designer::{
    check_completeness, is_complete, validate_room_dimensions, validate_room_geometry,
    validate_wall_placement, IssueSeverity, IssueType,
};
use floorsketch_settings::ValidationSettings;

fn room() -> RoomGeometry {
    create_room("Kitchen", RoomShape::Rectangle, 10.0, 12.0, 8.0, None, None).unwrap()
}

fn door(width: f64, position: PositionSpec) -> Opening {
    Opening::new(
        "door-1",
        OpeningKind::Door {
            style: DoorStyle::Standard,
            swing: SwingDirection::Inward,
        },
        CardinalDirection::South,
        width,
        6.67,
        position,
    )
}

#[test]
fn test_centered_south_door_resolves_to_midpoint() {
    let room = room();
    let door = door(3.0, PositionSpec::default());
    assert_eq!(opening_center_ft(&room, &door), 5.0);
    let result = validate_wall_placement(&room, &door);
    assert!(result.valid);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_too_wide_opening_is_an_error() {
    let room = room();
    let result = validate_wall_placement(&room, &door(11.0, PositionSpec::default()));
    assert!(!result.valid);
    assert_eq!(result.errors[0].code, "OPENING_TOO_WIDE");
    assert!(result.summary().is_some());
}

#[test]
fn test_clamped_position_is_a_warning() {
    let room = room();
    let result = validate_wall_placement(&room, &door(3.0, PositionSpec::Feet(0.5)));
    assert!(result.valid);
    assert_eq!(result.warnings[0].code, "POSITION_ADJUSTED");
}

#[test]
fn test_overlapping_openings_warn() {
    let mut room = room();
    room.openings.push(door(3.0, PositionSpec::default()));
    let mut second = door(3.0, PositionSpec::Feet(6.0));
    second.id = "door-2".to_string();
    let result = validate_wall_placement(&room, &second);
    assert!(result.warnings.iter().any(|w| w.code == "OPENING_OVERLAP"));
}

#[test]
fn test_window_top_above_ceiling_warns() {
    let room = room();
    let window = Opening::new(
        "window-1",
        OpeningKind::Window { sill_height_ft: 5.0 },
        CardinalDirection::North,
        3.0,
        4.0,
        PositionSpec::default(),
    );
    let result = validate_wall_placement(&room, &window);
    assert!(result
        .warnings
        .iter()
        .any(|w| w.code == "OPENING_ABOVE_CEILING"));
}

#[test]
fn test_dimension_ranges() {
    let settings = ValidationSettings::default();
    assert!(validate_room_dimensions(10.0, 12.0, 8.0, &settings).valid);

    let zero = validate_room_dimensions(0.0, 12.0, 8.0, &settings);
    assert!(!zero.valid);

    let odd = validate_room_dimensions(10.0, 12.0, 25.0, &settings);
    assert!(odd.valid);
    assert!(!odd.warnings.is_empty());
}

#[test]
fn test_geometry_checks() {
    let mut room = room();
    assert!(validate_room_geometry(&room).valid);

    room.polygon.truncate(2);
    let result = validate_room_geometry(&room);
    assert!(!result.valid);
    assert_eq!(result.errors[0].code, "TOO_FEW_POINTS");
}

#[test]
fn test_completeness_is_warnings_only() {
    let settings = ValidationSettings::default();
    let mut bare = room();
    bare.ceiling_height_ft = 30.0;
    bare.wall_attributes.insert(
        1,
        WallAttributes {
            missing: true,
            ..WallAttributes::default()
        },
    );

    let issues = check_room_completeness(&bare, &settings);
    let types: Vec<_> = issues.iter().map(|i| i.issue_type).collect();
    assert!(types.contains(&IssueType::CeilingHeight));
    assert!(types.contains(&IssueType::MissingWall));
    assert!(types.contains(&IssueType::NoOpenings));
    assert!(issues.iter().all(|i| i.severity != IssueSeverity::Error));
    assert!(is_complete(&issues));

    let mut finished = room();
    finished.openings.push(door(3.0, PositionSpec::default()));
    assert!(check_completeness(&[finished], &settings).is_empty());
}
