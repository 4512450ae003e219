//! Room geometry and the entities attached to it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{Bounds, CardinalDirection, Point, WallType};

/// Footprint family of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomShape {
    Rectangle,
    LShape,
    TShape,
    Irregular,
}

impl Default for RoomShape {
    fn default() -> Self {
        Self::Rectangle
    }
}

impl fmt::Display for RoomShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rectangle => write!(f, "rectangle"),
            Self::LShape => write!(f, "L-shaped"),
            Self::TShape => write!(f, "T-shaped"),
            Self::Irregular => write!(f, "irregular"),
        }
    }
}

/// Corner from which an L-shape notch is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotchCorner {
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl NotchCorner {
    /// Rotates clockwise by `quarter_turns`.
    pub fn rotated(self, quarter_turns: u32) -> Self {
        const ORDER: [NotchCorner; 4] = [
            NotchCorner::NorthEast,
            NotchCorner::SouthEast,
            NotchCorner::SouthWest,
            NotchCorner::NorthWest,
        ];
        let index = match self {
            Self::NorthEast => 0,
            Self::SouthEast => 1,
            Self::SouthWest => 2,
            Self::NorthWest => 3,
        };
        ORDER[(index + quarter_turns as usize) % 4]
    }
}

/// Parameters for an L-shaped room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LShapeConfig {
    pub notch_corner: NotchCorner,
    /// Notch size along x.
    pub notch_width_ft: f64,
    /// Notch size along y.
    pub notch_length_ft: f64,
}

/// Parameters for a T-shaped room: a stem rectangle extending outward from one wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TShapeConfig {
    pub stem_wall: CardinalDirection,
    /// Stem size along the wall it extends from.
    pub stem_width_ft: f64,
    /// How far the stem extends outward.
    pub stem_length_ft: f64,
    /// Offset of the stem's start along the wall; centered when absent.
    #[serde(default)]
    pub stem_position_ft: Option<f64>,
}

/// Symbolic placement along a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolicPosition {
    Left,
    Center,
    Right,
}

/// Position of an opening or wall feature along its wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionSpec {
    Symbolic(SymbolicPosition),
    /// Offset in feet measured from the end named by `position_from`.
    Feet(f64),
}

impl Default for PositionSpec {
    fn default() -> Self {
        Self::Symbolic(SymbolicPosition::Center)
    }
}

/// Which end of the wall numeric positions are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionFrom {
    #[default]
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorStyle {
    #[default]
    Standard,
    Double,
    Sliding,
    French,
    Pocket,
    Bifold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwingDirection {
    #[default]
    Inward,
    Outward,
    None,
}

/// Opening family. Only windows and pass-throughs carry a sill height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpeningKind {
    Door {
        #[serde(default)]
        style: DoorStyle,
        #[serde(default)]
        swing: SwingDirection,
    },
    Window {
        sill_height_ft: f64,
    },
    Archway,
    PassThrough {
        sill_height_ft: f64,
    },
}

impl OpeningKind {
    pub fn sill_height_ft(&self) -> Option<f64> {
        match self {
            Self::Window { sill_height_ft } | Self::PassThrough { sill_height_ft } => {
                Some(*sill_height_ft)
            }
            Self::Door { .. } | Self::Archway => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Door { .. } => "door",
            Self::Window { .. } => "window",
            Self::Archway => "archway",
            Self::PassThrough { .. } => "pass-through",
        }
    }
}

/// A door, window or other opening cut into one wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub id: String,
    #[serde(flatten)]
    pub kind: OpeningKind,
    pub wall: CardinalDirection,
    pub width_ft: f64,
    pub height_ft: f64,
    #[serde(default)]
    pub position: PositionSpec,
    #[serde(default)]
    pub position_from: PositionFrom,
}

impl Opening {
    pub fn new(
        id: impl Into<String>,
        kind: OpeningKind,
        wall: CardinalDirection,
        width_ft: f64,
        height_ft: f64,
        position: PositionSpec,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            wall,
            width_ft,
            height_ft,
            position,
            position_from: PositionFrom::Start,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Closet,
    Cabinet,
    Island,
    Fireplace,
    Vanity,
    Shower,
    Tub,
    Toilet,
    Appliance,
    Stairs,
    BuiltIn,
    Other,
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Closet => "closet",
            Self::Cabinet => "cabinet",
            Self::Island => "island",
            Self::Fireplace => "fireplace",
            Self::Vanity => "vanity",
            Self::Shower => "shower",
            Self::Tub => "tub",
            Self::Toilet => "toilet",
            Self::Appliance => "appliance",
            Self::Stairs => "stairs",
            Self::BuiltIn => "built-in",
            Self::Other => "feature",
        };
        write!(f, "{}", name)
    }
}

/// Where a feature sits: against a wall, or freestanding at absolute room-local offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mount", rename_all = "snake_case")]
pub enum FeaturePlacement {
    Wall {
        wall: CardinalDirection,
        #[serde(default)]
        position: PositionSpec,
        #[serde(default)]
        position_from: PositionFrom,
    },
    Freestanding {
        x_offset_ft: f64,
        y_offset_ft: f64,
    },
}

/// A built-in or fixture inside a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub feature_type: FeatureType,
    pub width_ft: f64,
    pub depth_ft: f64,
    #[serde(default)]
    pub height_ft: Option<f64>,
    #[serde(flatten)]
    pub placement: FeaturePlacement,
}

impl Feature {
    /// The wall this feature is attached to, `None` when freestanding.
    pub fn wall(&self) -> Option<CardinalDirection> {
        match self.placement {
            FeaturePlacement::Wall { wall, .. } => Some(wall),
            FeaturePlacement::Freestanding { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Water,
    Fire,
    Smoke,
    Mold,
    Wind,
    Hail,
    Impact,
    Other,
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Water => "water",
            Self::Fire => "fire",
            Self::Smoke => "smoke",
            Self::Mold => "mold",
            Self::Wind => "wind",
            Self::Hail => "hail",
            Self::Impact => "impact",
            Self::Other => "other",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageSeverity {
    Minor,
    #[default]
    Moderate,
    Severe,
}

/// A marked damage area inside a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageZone {
    pub id: String,
    pub damage_type: DamageType,
    #[serde(default)]
    pub severity: DamageSeverity,
    #[serde(default)]
    pub affected_walls: Vec<CardinalDirection>,
    /// Inward depth of the affected band, measured from each affected wall.
    #[serde(default)]
    pub extent_ft: f64,
    /// Explicit room-local footprint that overrides the wall bands.
    #[serde(default)]
    pub polygon: Option<Vec<Point>>,
    /// IICRC water category (1-3) for water damage.
    #[serde(default)]
    pub water_category: Option<u8>,
    #[serde(default)]
    pub notes: String,
}

/// User overrides for a single wall, keyed on the room by polygon edge index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WallAttributes {
    #[serde(default)]
    pub height_ft: Option<f64>,
    #[serde(default)]
    pub wall_type: Option<WallType>,
    #[serde(default)]
    pub missing: bool,
}

impl WallAttributes {
    pub fn is_empty(&self) -> bool {
        self.height_ft.is_none() && self.wall_type.is_none() && !self.missing
    }
}

/// A single room: footprint polygon plus everything attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomGeometry {
    pub id: String,
    pub name: String,
    pub shape: RoomShape,
    pub width_ft: f64,
    pub length_ft: f64,
    pub ceiling_height_ft: f64,
    /// Room-local, clockwise in screen space, implicitly closed.
    pub polygon: Vec<Point>,
    #[serde(default)]
    pub openings: Vec<Opening>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub damage_zones: Vec<DamageZone>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub l_shape_config: Option<LShapeConfig>,
    #[serde(default)]
    pub t_shape_config: Option<TShapeConfig>,
    #[serde(default)]
    pub origin_x_ft: f64,
    #[serde(default)]
    pub origin_y_ft: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub wall_attributes: BTreeMap<usize, WallAttributes>,
    #[serde(default)]
    pub photo_ids: Vec<String>,
    #[serde(default)]
    pub sub_room_ids: Vec<String>,
}

impl RoomGeometry {
    pub fn origin(&self) -> Point {
        Point::new(self.origin_x_ft, self.origin_y_ft)
    }

    /// Bounding box of the polygon in room-local coordinates.
    pub fn local_bounds(&self) -> Bounds {
        Bounds::from_points(&self.polygon)
            .unwrap_or_else(|| Bounds::new(0.0, 0.0, self.width_ft, self.length_ft))
    }

    /// Bounding box in floor-plan coordinates.
    pub fn plan_bounds(&self) -> Bounds {
        self.local_bounds()
            .translated(self.origin_x_ft, self.origin_y_ft)
    }

    /// Polygon vertices in floor-plan coordinates.
    pub fn plan_polygon(&self) -> Vec<Point> {
        self.polygon
            .iter()
            .map(|p| p.translated(self.origin_x_ft, self.origin_y_ft))
            .collect()
    }

    /// Length of a cardinal wall, taken from the polygon's bounding box.
    pub fn wall_length(&self, wall: CardinalDirection) -> f64 {
        let bounds = self.local_bounds();
        if wall.runs_horizontally() {
            bounds.width()
        } else {
            bounds.height()
        }
    }

    pub fn opening(&self, id: &str) -> Option<&Opening> {
        self.openings.iter().find(|o| o.id == id)
    }

    pub fn opening_mut(&mut self, id: &str) -> Option<&mut Opening> {
        self.openings.iter_mut().find(|o| o.id == id)
    }

    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn wall_attributes(&self, wall_index: usize) -> WallAttributes {
        self.wall_attributes
            .get(&wall_index)
            .copied()
            .unwrap_or_default()
    }

    /// Case-insensitive match on id or name, as spoken room references use names.
    pub fn matches(&self, id_or_name: &str) -> bool {
        self.id == id_or_name || self.name.eq_ignore_ascii_case(id_or_name)
    }
}
