use floorsketch_core::{
    CardinalDirection, DamageSeverity, DamageType, Feature, FeaturePlacement, FeatureType,
    LShapeConfig, NotchCorner, Opening, OpeningKind, Point, PositionFrom, PositionSpec,
    RoomGeometry, RoomShape, SymbolicPosition, TShapeConfig, WallAttributes,
};
use floorsketch_designer::damage::new_damage_zone;
use floorsketch_designer::geometry::{
    generate_l_shape, generate_rectangle, generate_t_shape, is_self_intersecting, polygon_area,
    polygon_bounds, polygon_centroid, polygon_perimeter,
};
use floorsketch_designer::manipulation::{create_room, resize_room, rotate_room};
use floorsketch_designer::walls::outward_direction;
use floorsketch_designer::{calculate_position_in_feet, point_in_polygon};
use proptest::prelude::*;

fn l_config(corner: NotchCorner, nw: f64, nl: f64) -> LShapeConfig {
    LShapeConfig {
        notch_corner: corner,
        notch_width_ft: nw,
        notch_length_ft: nl,
    }
}

#[test]
fn test_rectangle_area_and_perimeter() {
    let rect = generate_rectangle(10.0, 12.0);
    assert_eq!(rect.len(), 4);
    assert!((polygon_area(&rect) - 120.0).abs() < 1e-9);
    assert!((polygon_perimeter(&rect) - 44.0).abs() < 1e-9);
    let c = polygon_centroid(&rect);
    assert!(c.approx_eq(&Point::new(5.0, 6.0), 1e-9));
}

#[test]
fn test_l_shape_has_six_vertices_and_keeps_bounds() {
    let l = generate_l_shape(20.0, 15.0, &l_config(NotchCorner::NorthEast, 8.0, 6.0));
    assert_eq!(l.len(), 6);
    let b = polygon_bounds(&l);
    assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (0.0, 0.0, 20.0, 15.0));
    assert!((polygon_area(&l) - (300.0 - 48.0)).abs() < 1e-9);
    assert!(!is_self_intersecting(&l));
    // The notch is outside the room.
    assert!(!point_in_polygon(&Point::new(18.0, 1.0), &l));
    assert!(point_in_polygon(&Point::new(2.0, 1.0), &l));
}

#[test]
fn test_l_shape_oversized_notch_is_clamped() {
    let l = generate_l_shape(10.0, 10.0, &l_config(NotchCorner::SouthWest, 50.0, 4.0));
    let b = polygon_bounds(&l);
    assert_eq!(b.width(), 10.0);
    assert!(polygon_area(&l) > 0.0);
    assert!(!is_self_intersecting(&l));
}

#[test]
fn test_t_shape_stem_adds_area() {
    let config = TShapeConfig {
        stem_wall: CardinalDirection::South,
        stem_width_ft: 6.0,
        stem_length_ft: 4.0,
        stem_position_ft: None,
    };
    let t = generate_t_shape(20.0, 14.0, &config);
    assert_eq!(t.len(), 8);
    assert!(!is_self_intersecting(&t));
    let b = polygon_bounds(&t);
    assert!((b.width() - 20.0).abs() < 1e-9);
    assert!((b.height() - 14.0).abs() < 1e-9);
}

#[test]
fn test_symbolic_positions() {
    let left = calculate_position_in_feet(
        PositionSpec::Symbolic(SymbolicPosition::Left),
        PositionFrom::Start,
        10.0,
        3.0,
    );
    assert_eq!(left, 1.5);
    let center = calculate_position_in_feet(PositionSpec::default(), PositionFrom::Start, 10.0, 3.0);
    assert_eq!(center, 5.0);
    let from_end = calculate_position_in_feet(PositionSpec::Feet(2.0), PositionFrom::End, 10.0, 2.0);
    assert_eq!(from_end, 8.0);
}

#[test]
fn test_element_wider_than_wall_sits_at_midpoint() {
    let p = calculate_position_in_feet(PositionSpec::Feet(1.0), PositionFrom::Start, 4.0, 6.0);
    assert_eq!(p, 2.0);
}

#[test]
fn test_rotation_rejects_non_right_angles() {
    let room = create_room("Den", RoomShape::Rectangle, 10.0, 12.0, 8.0, None, None).unwrap();
    assert!(rotate_room(&room, 45).is_err());
}

#[test]
fn test_rotated_wall_attributes_survive_resize() {
    let mut room = create_room("Hall", RoomShape::Rectangle, 10.0, 12.0, 8.0, None, None).unwrap();
    room.wall_attributes.insert(
        3,
        WallAttributes {
            height_ft: Some(9.0),
            ..Default::default()
        },
    );
    assert_eq!(outward_direction(&room.polygon, 3), CardinalDirection::West);

    // The west wall faces north after a clockwise quarter turn.
    let rotated = rotate_room(&room, 90).unwrap();
    assert_eq!(rotated.polygon, generate_rectangle(12.0, 10.0));
    let (index, _) = rotated.wall_attributes.iter().next().unwrap();
    assert_eq!(outward_direction(&rotated.polygon, *index), CardinalDirection::North);

    let resized = resize_room(&rotated, 14.0, 10.0).unwrap();
    assert_eq!(resized.wall_attributes.len(), 1);
    let (index, attrs) = resized.wall_attributes.iter().next().unwrap();
    assert_eq!(outward_direction(&resized.polygon, *index), CardinalDirection::North);
    assert_eq!(attrs.height_ft, Some(9.0));
}

const DIRECTIONS: [CardinalDirection; 4] = [
    CardinalDirection::North,
    CardinalDirection::East,
    CardinalDirection::South,
    CardinalDirection::West,
];

/// A room of the given family carrying an opening, a wall feature, a
/// freestanding feature and a damage zone on each of `walls`.
fn furnished_room(
    family: usize,
    w: f64,
    l: f64,
    ratio: f64,
    side: usize,
    stem_position: Option<f64>,
    walls: &[usize],
) -> RoomGeometry {
    let (shape, l_cfg, t_cfg) = match family {
        0 => (RoomShape::Rectangle, None, None),
        1 => (
            RoomShape::LShape,
            Some(l_config(
                [
                    NotchCorner::NorthEast,
                    NotchCorner::SouthEast,
                    NotchCorner::SouthWest,
                    NotchCorner::NorthWest,
                ][side],
                w * ratio,
                l * ratio,
            )),
            None,
        ),
        _ => {
            let wall = DIRECTIONS[side];
            let (along, across) = if wall.runs_horizontally() { (w, l) } else { (l, w) };
            let stem_width = along * ratio;
            (
                RoomShape::TShape,
                None,
                Some(TShapeConfig {
                    stem_wall: wall,
                    stem_width_ft: stem_width,
                    stem_length_ft: across * ratio,
                    stem_position_ft: stem_position.map(|r| (along - stem_width) * r),
                }),
            )
        }
    };
    let mut room = create_room("R", shape, w, l, 8.0, l_cfg, t_cfg).unwrap();
    for (i, wall) in walls.iter().map(|i| DIRECTIONS[*i]).enumerate() {
        room.openings.push(Opening::new(
            format!("o{}", i),
            OpeningKind::Archway,
            wall,
            1.0,
            7.0,
            PositionSpec::default(),
        ));
        room.features.push(Feature {
            id: format!("f{}", i),
            feature_type: FeatureType::Cabinet,
            width_ft: 1.0,
            depth_ft: 1.0,
            height_ft: None,
            placement: FeaturePlacement::Wall {
                wall,
                position: PositionSpec::default(),
                position_from: PositionFrom::Start,
            },
        });
    }
    room.features.push(Feature {
        id: "island".into(),
        feature_type: FeatureType::Island,
        width_ft: 1.0,
        depth_ft: 1.0,
        height_ft: None,
        placement: FeaturePlacement::Freestanding {
            x_offset_ft: w / 2.0,
            y_offset_ft: l / 2.0,
        },
    });
    room.damage_zones.push(new_damage_zone(
        DamageType::Water,
        DamageSeverity::Minor,
        walls.iter().map(|i| DIRECTIONS[*i]).collect(),
        1.0,
    ));
    room
}

fn t_configs_match(a: &Option<TShapeConfig>, b: &Option<TShapeConfig>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            let close = |x: f64, y: f64| (x - y).abs() < 1e-6;
            a.stem_wall == b.stem_wall
                && close(a.stem_width_ft, b.stem_width_ft)
                && close(a.stem_length_ft, b.stem_length_ft)
                && match (a.stem_position_ft, b.stem_position_ft) {
                    (None, None) => true,
                    (Some(x), Some(y)) => close(x, y),
                    _ => false,
                }
        }
        _ => false,
    }
}

proptest! {
    #[test]
    fn rectangle_area_matches_dimensions(w in 1.0f64..200.0, l in 1.0f64..200.0) {
        let rect = generate_rectangle(w, l);
        prop_assert!((polygon_area(&rect) - w * l).abs() < 1e-6);
        let b = polygon_bounds(&rect);
        prop_assert_eq!((b.min_x, b.min_y), (0.0, 0.0));
        prop_assert!((b.width() - w).abs() < 1e-9);
        prop_assert!((b.height() - l).abs() < 1e-9);
    }

    #[test]
    fn l_shape_area_subtracts_notch(
        w in 4.0f64..100.0,
        l in 4.0f64..100.0,
        nw_ratio in 0.1f64..0.8,
        nl_ratio in 0.1f64..0.8,
        corner in 0usize..4,
    ) {
        let corners = [
            NotchCorner::NorthEast,
            NotchCorner::SouthEast,
            NotchCorner::SouthWest,
            NotchCorner::NorthWest,
        ];
        let (nw, nl) = (w * nw_ratio, l * nl_ratio);
        let poly = generate_l_shape(w, l, &l_config(corners[corner], nw, nl));
        prop_assert!((polygon_area(&poly) - (w * l - nw * nl)).abs() < 1e-6);
        prop_assert!(!is_self_intersecting(&poly));
    }

    #[test]
    fn resolved_position_stays_inside_wall(
        wall in 1.0f64..50.0,
        width in 0.1f64..10.0,
        offset in -100.0f64..100.0,
    ) {
        prop_assume!(width <= wall);
        let p = calculate_position_in_feet(PositionSpec::Feet(offset), PositionFrom::Start, wall, width);
        prop_assert!(p >= width / 2.0 - 1e-9);
        prop_assert!(p <= wall - width / 2.0 + 1e-9);
    }

    #[test]
    fn quarter_turn_round_trip_keeps_footprint(w in 1.0f64..60.0, l in 1.0f64..60.0) {
        let room = create_room("R", RoomShape::Rectangle, w, l, 8.0, None, None).unwrap();
        let back = rotate_room(&rotate_room(&room, 90).unwrap(), 270).unwrap();
        prop_assert!((back.width_ft - w).abs() < 1e-9);
        prop_assert!((back.length_ft - l).abs() < 1e-9);
        let b = polygon_bounds(&back.polygon);
        prop_assert!((b.width() - w).abs() < 1e-6);
        prop_assert!((b.height() - l).abs() < 1e-6);
        prop_assert!((polygon_area(&back.polygon) - w * l).abs() < 1e-6);
    }

    #[test]
    fn rotation_round_trip_restores_labels_and_configs(
        family in 0usize..3,
        w in 6.0f64..40.0,
        l in 6.0f64..40.0,
        ratio in 0.2f64..0.6,
        side in 0usize..4,
        stem_position in prop::option::of(0.0f64..1.0),
        walls in prop::collection::vec(0usize..4, 0..4),
        turns in 0usize..3,
    ) {
        let room = furnished_room(family, w, l, ratio, side, stem_position, &walls);
        let (first, second) = [(90, 270), (180, 180), (270, 90)][turns];
        let back = rotate_room(&rotate_room(&room, first).unwrap(), second).unwrap();

        prop_assert!((back.width_ft - room.width_ft).abs() < 1e-9);
        prop_assert!((back.length_ft - room.length_ft).abs() < 1e-9);
        prop_assert_eq!(&back.openings, &room.openings);
        let wall_features: Vec<_> = back.features.iter().map(|f| f.wall()).collect();
        let expected: Vec<_> = room.features.iter().map(|f| f.wall()).collect();
        prop_assert_eq!(wall_features, expected);
        prop_assert_eq!(
            &back.damage_zones[0].affected_walls,
            &room.damage_zones[0].affected_walls
        );
        prop_assert_eq!(back.shape, room.shape);
        if let (Some(a), Some(b)) = (back.l_shape_config, room.l_shape_config) {
            prop_assert_eq!(a.notch_corner, b.notch_corner);
            prop_assert!((a.notch_width_ft - b.notch_width_ft).abs() < 1e-6);
            prop_assert!((a.notch_length_ft - b.notch_length_ft).abs() < 1e-6);
        }
        prop_assert!(t_configs_match(&back.t_shape_config, &room.t_shape_config));
        prop_assert_eq!(back.polygon.len(), room.polygon.len());
        for (a, b) in back.polygon.iter().zip(&room.polygon) {
            prop_assert!(a.approx_eq(b, 1e-6), "{:?} != {:?}", a, b);
        }
    }
}
