use floorsketch_core::{CardinalDirection, FeaturePlacement};
use floorsketch_designer::{HistoryTarget, SketchCommand, SketchSession};
use tempfile::tempdir;

fn command(json: &str) -> SketchCommand {
    serde_json::from_str(json).unwrap()
}

fn run(session: &mut SketchSession, json: &str) -> String {
    session.execute(command(json))
}

/// Kitchen at the origin with Den placed east of it.
fn two_rooms() -> SketchSession {
    let mut session = SketchSession::default();
    run(&mut session, r#"{"command":"start_floor_plan","name":"Main"}"#);
    run(
        &mut session,
        r#"{"command":"create_room","name":"Kitchen","width_ft":10,"length_ft":12}"#,
    );
    run(&mut session, r#"{"command":"complete_room"}"#);
    run(
        &mut session,
        r#"{"command":"create_room","name":"Den","width_ft":10,"length_ft":12}"#,
    );
    let status = run(
        &mut session,
        r#"{"command":"add_room_relative","reference":"Kitchen","direction":"east"}"#,
    );
    assert_eq!(status, "Added Den east of Kitchen");
    session
}

#[test]
fn test_commands_without_plan_report_errors() {
    let mut session = SketchSession::default();
    assert!(run(&mut session, r#"{"command":"summary"}"#).starts_with("Error:"));
    assert!(run(&mut session, r#"{"command":"complete_room"}"#).starts_with("Error:"));
    assert!(run(&mut session, r#"{"command":"undo"}"#).starts_with("Error:"));
}

#[test]
fn test_sketch_room_with_door() {
    let mut session = SketchSession::default();
    assert_eq!(
        run(&mut session, r#"{"command":"start_floor_plan","name":"Main"}"#),
        "Started floor plan Main"
    );
    let created = run(
        &mut session,
        r#"{"command":"create_room","name":"Kitchen","width_ft":10,"length_ft":12}"#,
    );
    assert!(created.starts_with("Created rectangle Kitchen"));
    assert!(created.contains("120 square feet"));

    let door = run(
        &mut session,
        r#"{"command":"add_opening","type":"door","wall":"south","width_ft":3,"position":"center"}"#,
    );
    assert!(door.contains("centered 5 feet from the start"), "{}", door);
    assert_eq!(session.current_room().unwrap().openings.len(), 1);
    assert_eq!(session.current_room().unwrap().openings[0].height_ft, 6.67);

    let placed = run(&mut session, r#"{"command":"complete_room"}"#);
    assert_eq!(placed, "Added Kitchen to Main, 1 room(s) total");
    assert!(session.current_room().is_none());
}

#[test]
fn test_invalid_dimension_is_rejected() {
    let mut session = SketchSession::default();
    run(&mut session, r#"{"command":"start_floor_plan","name":"Main"}"#);
    let status = run(
        &mut session,
        r#"{"command":"create_room","name":"Closet","width_ft":0,"length_ft":4}"#,
    );
    assert!(status.starts_with("Error:"));
    assert!(session.current_room().is_none());
}

#[test]
fn test_relative_placement_and_walls() {
    let mut session = two_rooms();
    let den = &session.rooms()[1];
    assert_eq!((den.origin_x_ft, den.origin_y_ft), (10.0, 0.0));

    let walls = run(&mut session, r#"{"command":"list_walls"}"#);
    assert_eq!(walls, "7 wall(s): 6 exterior, 1 interior");
    let shared = session.walls().into_iter().filter(|w| w.is_shared()).count();
    assert_eq!(shared, 1);
}

#[test]
fn test_move_and_undo_room() {
    let mut session = two_rooms();
    let moved = run(
        &mut session,
        r#"{"command":"move_room","room":"Den","dx_ft":5,"dy_ft":0}"#,
    );
    assert!(moved.starts_with("Moved Den"));
    assert_eq!(session.rooms()[1].origin_x_ft, 15.0);

    let undone = session.execute(SketchCommand::Undo {
        target: HistoryTarget::Rooms,
    });
    assert!(undone.starts_with("Undid"));
    assert_eq!(session.rooms()[1].origin_x_ft, 10.0);

    let redone = run(&mut session, r#"{"command":"redo"}"#);
    assert!(redone.starts_with("Redid"));
    assert_eq!(session.rooms()[1].origin_x_ft, 15.0);
}

#[test]
fn test_shared_wall_move_through_session() {
    let mut session = two_rooms();
    let kitchen_id = session.rooms()[0].id.clone();
    let wall_id = format!("wall-{}-1", kitchen_id);
    let status = session.execute(SketchCommand::MoveWall {
        wall_id: wall_id.clone(),
        coordinate_ft: Some(12.0),
        delta_ft: None,
    });
    assert!(status.contains("12 feet"), "{}", status);
    assert_eq!(session.rooms()[0].width_ft, 12.0);
    assert_eq!(session.rooms()[1].origin_x_ft, 12.0);
    assert_eq!(session.rooms()[1].width_ft, 8.0);

    run(&mut session, r#"{"command":"undo","target":"walls"}"#);
    assert_eq!(session.rooms()[0].width_ft, 10.0);
    assert_eq!(session.rooms()[1].origin_x_ft, 10.0);

    let neither = session.execute(SketchCommand::MoveWall {
        wall_id,
        coordinate_ft: None,
        delta_ft: None,
    });
    assert!(neither.starts_with("Error:"));
}

fn freestanding_plan_x(session: &SketchSession) -> f64 {
    let kitchen = &session.rooms()[0];
    match kitchen.features[0].placement {
        FeaturePlacement::Freestanding { x_offset_ft, .. } => kitchen.origin_x_ft + x_offset_ft,
        _ => panic!("expected a freestanding feature"),
    }
}

#[test]
fn test_wall_undo_keeps_later_room_edits() {
    let mut session = two_rooms();
    let kitchen_id = session.rooms()[0].id.clone();
    let west = session.execute(SketchCommand::MoveWall {
        wall_id: format!("wall-{}-3", kitchen_id),
        coordinate_ft: None,
        delta_ft: Some(-2.0),
    });
    assert!(west.starts_with("Moved"), "{}", west);
    assert_eq!(session.rooms()[0].origin_x_ft, -2.0);
    assert_eq!(session.rooms()[0].width_ft, 12.0);

    run(
        &mut session,
        r#"{"command":"move_room","room":"Kitchen","dx_ft":5,"dy_ft":0}"#,
    );
    run(
        &mut session,
        r#"{"command":"add_feature","room":"Kitchen","feature_type":"island","width_ft":4,"depth_ft":2,"x_offset_ft":3,"y_offset_ft":5}"#,
    );
    assert_eq!(session.rooms()[0].origin_x_ft, 3.0);
    let island_x = freestanding_plan_x(&session);

    run(&mut session, r#"{"command":"undo","target":"walls"}"#);
    let kitchen = &session.rooms()[0];
    assert_eq!(kitchen.width_ft, 10.0);
    assert_eq!(kitchen.origin_x_ft, 5.0);
    assert_eq!(kitchen.features.len(), 1);
    assert_eq!(freestanding_plan_x(&session), island_x);

    run(&mut session, r#"{"command":"redo","target":"walls"}"#);
    assert_eq!(session.rooms()[0].origin_x_ft, 3.0);
    assert_eq!(session.rooms()[0].width_ft, 12.0);
    assert_eq!(freestanding_plan_x(&session), island_x);
}

#[test]
fn test_east_wall_undo_keeps_room_move() {
    let mut session = SketchSession::default();
    run(&mut session, r#"{"command":"start_floor_plan","name":"Main"}"#);
    run(
        &mut session,
        r#"{"command":"create_room","name":"Kitchen","width_ft":10,"length_ft":12}"#,
    );
    run(&mut session, r#"{"command":"complete_room"}"#);
    let kitchen_id = session.rooms()[0].id.clone();
    session.execute(SketchCommand::MoveWall {
        wall_id: format!("wall-{}-1", kitchen_id),
        coordinate_ft: None,
        delta_ft: Some(2.0),
    });
    run(
        &mut session,
        r#"{"command":"move_room","room":"Kitchen","dx_ft":5,"dy_ft":0}"#,
    );
    let before = session.rooms()[0].origin_x_ft;

    run(&mut session, r#"{"command":"undo","target":"walls"}"#);
    assert_eq!(session.rooms()[0].origin_x_ft, before);
    assert_eq!(session.rooms()[0].width_ft, 10.0);
}

#[test]
fn test_copy_selects_copy_and_undo_removes_it() {
    let mut session = two_rooms();
    let status = run(&mut session, r#"{"command":"copy_room","room":"Kitchen"}"#);
    assert_eq!(status, "Copied Kitchen");
    assert_eq!(session.rooms().len(), 3);
    let copy_id = session.rooms()[2].id.clone();
    assert_eq!(session.room_store().selection().primary(), Some(copy_id.as_str()));

    run(&mut session, r#"{"command":"undo"}"#);
    assert_eq!(session.rooms().len(), 2);
    assert!(session.room_store().selection().is_empty());
}

#[test]
fn test_align_named_rooms() {
    let mut session = two_rooms();
    run(
        &mut session,
        r#"{"command":"move_room","room":"Den","dx_ft":0,"dy_ft":4}"#,
    );
    let status = run(
        &mut session,
        r#"{"command":"align_rooms","alignment":"top","rooms":["Kitchen","Den"]}"#,
    );
    assert_eq!(status, "Aligned 2 rooms top");
    assert_eq!(session.rooms()[1].origin_y_ft, 0.0);

    let too_few = run(
        &mut session,
        r#"{"command":"align_rooms","alignment":"left","rooms":["Kitchen"]}"#,
    );
    assert!(too_few.starts_with("Error:"));
}

#[test]
fn test_features_and_damage_on_placed_room_are_undoable() {
    let mut session = two_rooms();
    let feature = run(
        &mut session,
        r#"{"command":"add_feature","room":"Kitchen","feature_type":"island","width_ft":4,"depth_ft":2,"x_offset_ft":3,"y_offset_ft":5}"#,
    );
    assert!(feature.contains("island"), "{}", feature);
    assert_eq!(session.rooms()[0].features.len(), 1);

    let damage = run(
        &mut session,
        r#"{"command":"mark_damage","room":"Kitchen","damage_type":"water","severity":"moderate","affected_walls":["north"],"extent_ft":2}"#,
    );
    assert_eq!(damage, "Marked moderate water damage, about 20 square feet");
    assert_eq!(session.rooms()[0].damage_zones.len(), 1);

    run(&mut session, r#"{"command":"undo"}"#);
    assert!(session.rooms()[0].damage_zones.is_empty());
    assert_eq!(session.rooms()[0].features.len(), 1);

    let no_walls = run(
        &mut session,
        r#"{"command":"mark_damage","room":"Kitchen","damage_type":"fire","affected_walls":[],"extent_ft":2}"#,
    );
    assert!(no_walls.starts_with("Error:"));
}

#[test]
fn test_completeness_and_summary() {
    let mut session = two_rooms();
    let status = run(&mut session, r#"{"command":"check_completeness"}"#);
    assert!(status.starts_with("Sketch is complete"), "{}", status);

    let summary = run(&mut session, r#"{"command":"summary"}"#);
    assert!(summary.contains("2 room(s)"));
    assert!(summary.contains("240 square feet"));
}

#[test]
fn test_connect_and_remove_rooms() {
    let mut session = two_rooms();
    let status = run(
        &mut session,
        r#"{"command":"connect_rooms","from_room":"Kitchen","from_wall":"east","to_room":"Den","to_wall":"west"}"#,
    );
    assert_eq!(status, "Connected Kitchen to Den with a door");
    let connection = &session.floor_plan().unwrap().connections[0];
    assert_eq!(connection.from.wall, CardinalDirection::East);
    assert_eq!(connection.from.position_ft, 6.0);

    assert_eq!(run(&mut session, r#"{"command":"remove_room","room":"Den"}"#), "Removed Den");
    assert!(session.floor_plan().unwrap().connections.is_empty());
    assert!(run(&mut session, r#"{"command":"remove_room","room":"Den"}"#).starts_with("Error:"));
}

#[test]
fn test_drag_through_session() {
    let mut session = two_rooms();
    session.start_drag("Den", 15.0, 6.0).unwrap();
    session.update_drag(25.0, 6.0).unwrap();
    assert_eq!(session.rooms()[1].origin_x_ft, 20.0);
    session.cancel_drag();
    assert_eq!(session.rooms()[1].origin_x_ft, 10.0);

    session.start_drag("Den", 15.0, 6.0).unwrap();
    session.update_drag(25.0, 6.0).unwrap();
    assert!(session.end_drag().is_some());
    run(&mut session, r#"{"command":"undo"}"#);
    assert_eq!(session.rooms()[1].origin_x_ft, 10.0);
}

#[test]
fn test_save_and_load_session() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("main.json");
    let mut session = two_rooms();
    session.save_to_file(&path).unwrap();
    assert_eq!(session.current_file_path(), Some(path.as_path()));

    let mut restored = SketchSession::default();
    restored.load_from_file(&path).unwrap();
    assert_eq!(restored.rooms(), session.rooms());
    assert!(!restored.room_store().can_undo());
}

#[test]
fn test_damage_on_opposite_walls_never_exceeds_room() {
    let mut session = two_rooms();
    let status = run(
        &mut session,
        r#"{"command":"mark_damage","room":"Kitchen","damage_type":"water","severity":"moderate","affected_walls":["north","south"],"extent_ft":8}"#,
    );
    assert_eq!(status, "Marked moderate water damage, about 120 square feet");
}
