//! # FloorSketch Core
//!
//! Core types and utilities for FloorSketch.
//! Provides the building data model shared by the geometry engine and its
//! consumers (rooms, openings, features, damage zones, derived walls and the
//! floor plan), the error types used across the workspace, and feet/inch
//! unit helpers for voice-friendly output.

pub mod data;
pub mod error;
pub mod units;

pub use data::{
    generate_id, Bounds, CardinalDirection, ConnectionPoint, ConnectionType, DamageSeverity,
    DamageType, DamageZone, DoorStyle, Feature, FeaturePlacement, FeatureType, FloorPlan,
    LShapeConfig, NotchCorner, Opening, OpeningKind, Point, PositionFrom, PositionSpec,
    RoomConnection, RoomGeometry, RoomShape, SwingDirection, SymbolicPosition, TShapeConfig,
    WallAttributes, WallEntity, WallOrientation, WallType,
};

pub use error::{Result, SketchError};

pub use units::{format_feet_inches, format_feet_short, parse_feet_inches};
