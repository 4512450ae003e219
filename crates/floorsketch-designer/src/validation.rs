//! Completeness rules and structured validation.
//!
//! Two layers:
//! - [`check_completeness`] runs advisory rules over a room list and
//!   reports severity-tagged issues for the UI. A sketch is complete when no
//!   issue has [`IssueSeverity::Error`]; the current rule set only emits
//!   warnings and info, so that is always the case today.
//! - `validate_*` functions return a [`ValidationResult`] with error codes,
//!   voice-friendly messages and a `recoverable` flag. They are advisory:
//!   no engine operation refuses a mutation because validation failed.

use floorsketch_core::{
    format_feet_inches, Opening, PositionFrom, PositionSpec, RoomGeometry, RoomShape,
};
use floorsketch_settings::ValidationSettings;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::{
    calculate_position_in_feet, is_self_intersecting, open_ring, opening_center_ft,
    polygon_area, polygon_bounds, POINT_TOLERANCE_FT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    CeilingHeight,
    MissingWall,
    NoOpenings,
    Dimensions,
    OrphanOpening,
}

/// One completeness finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: IssueSeverity,
    pub message: String,
    pub room_id: String,
}

fn outside(value: f64, min: f64, max: f64) -> bool {
    value < min || value > max
}

/// Completeness rules for one room.
pub fn check_room_completeness(
    room: &RoomGeometry,
    settings: &ValidationSettings,
) -> Vec<CompletenessIssue> {
    let mut issues = Vec::new();
    let mut push = |issue_type, severity, message: String| {
        issues.push(CompletenessIssue {
            issue_type,
            severity,
            message,
            room_id: room.id.clone(),
        })
    };

    if outside(
        room.ceiling_height_ft,
        settings.min_ceiling_height_ft,
        settings.max_ceiling_height_ft,
    ) {
        push(
            IssueType::CeilingHeight,
            IssueSeverity::Warning,
            format!(
                "{} has an unusual ceiling height of {}",
                room.name,
                format_feet_inches(room.ceiling_height_ft)
            ),
        );
    }

    let missing = room.wall_attributes.values().filter(|a| a.missing).count();
    if missing > 0 {
        push(
            IssueType::MissingWall,
            IssueSeverity::Info,
            format!("{} has {} wall(s) marked missing", room.name, missing),
        );
    }

    if room.openings.is_empty() {
        push(
            IssueType::NoOpenings,
            IssueSeverity::Info,
            format!("{} has no doors or windows", room.name),
        );
    }

    for (label, value) in [("width", room.width_ft), ("length", room.length_ft)] {
        if outside(value, settings.min_dimension_ft, settings.max_dimension_ft) {
            push(
                IssueType::Dimensions,
                IssueSeverity::Warning,
                format!(
                    "{} {} of {} looks unusual",
                    room.name,
                    label,
                    format_feet_inches(value)
                ),
            );
        }
    }

    for opening in &room.openings {
        if opening.width_ft > room.wall_length(opening.wall) {
            push(
                IssueType::OrphanOpening,
                IssueSeverity::Warning,
                format!(
                    "The {} on the {} wall of {} is wider than the wall",
                    opening.kind.name(),
                    opening.wall,
                    room.name
                ),
            );
        }
    }

    issues
}

/// Completeness rules across every room.
pub fn check_completeness(
    rooms: &[RoomGeometry],
    settings: &ValidationSettings,
) -> Vec<CompletenessIssue> {
    rooms
        .iter()
        .flat_map(|room| check_room_completeness(room, settings))
        .collect()
}

/// True when no issue has error severity.
pub fn is_complete(issues: &[CompletenessIssue]) -> bool {
    !issues.iter().any(|i| i.severity == IssueSeverity::Error)
}

/// One structured validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub code: String,
    pub message: String,
    pub severity: IssueSeverity,
    /// Whether the user can fix this by adjusting values (as opposed to
    /// redrawing the room).
    pub recoverable: bool,
}

impl ValidationError {
    fn error(code: &str, message: String, recoverable: bool) -> Self {
        Self {
            code: code.to_string(),
            message,
            severity: IssueSeverity::Error,
            recoverable,
        }
    }

    fn warning(code: &str, message: String) -> Self {
        Self {
            code: code.to_string(),
            message,
            severity: IssueSeverity::Warning,
            recoverable: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
}

impl ValidationResult {
    fn from_findings(findings: Vec<ValidationError>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = findings
            .into_iter()
            .partition(|f| f.severity == IssueSeverity::Error);
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// First error message, or the first warning, for spoken feedback.
    pub fn summary(&self) -> Option<&str> {
        self.errors
            .first()
            .or_else(|| self.warnings.first())
            .map(|f| f.message.as_str())
    }
}

/// Checks room dimensions: non-positive values are errors, values outside
/// the configured sanity ranges are warnings.
pub fn validate_room_dimensions(
    width_ft: f64,
    length_ft: f64,
    ceiling_height_ft: f64,
    settings: &ValidationSettings,
) -> ValidationResult {
    let mut findings = Vec::new();
    for (label, code, value) in [
        ("width", "WIDTH", width_ft),
        ("length", "LENGTH", length_ft),
    ] {
        if !(value.is_finite() && value > 0.0) {
            findings.push(ValidationError::error(
                &format!("INVALID_{}", code),
                format!("The {} must be greater than zero", label),
                true,
            ));
        } else if outside(value, settings.min_dimension_ft, settings.max_dimension_ft) {
            findings.push(ValidationError::warning(
                &format!("{}_OUT_OF_RANGE", code),
                format!(
                    "A {} of {} is unusual, expected between {} and {}",
                    label,
                    format_feet_inches(value),
                    format_feet_inches(settings.min_dimension_ft),
                    format_feet_inches(settings.max_dimension_ft)
                ),
            ));
        }
    }

    if !(ceiling_height_ft.is_finite() && ceiling_height_ft > 0.0) {
        findings.push(ValidationError::error(
            "INVALID_CEILING_HEIGHT",
            "The ceiling height must be greater than zero".to_string(),
            true,
        ));
    } else if outside(
        ceiling_height_ft,
        settings.min_ceiling_height_ft,
        settings.max_ceiling_height_ft,
    ) {
        findings.push(ValidationError::warning(
            "CEILING_HEIGHT_OUT_OF_RANGE",
            format!(
                "A ceiling height of {} is unusual",
                format_feet_inches(ceiling_height_ft)
            ),
        ));
    }

    ValidationResult::from_findings(findings)
}

/// Checks that an opening fits on its wall and does not overlap the room's
/// other openings on that wall.
pub fn validate_wall_placement(room: &RoomGeometry, opening: &Opening) -> ValidationResult {
    let mut findings = Vec::new();
    let wall_length = room.wall_length(opening.wall);

    if !(opening.width_ft > 0.0 && opening.height_ft > 0.0) {
        findings.push(ValidationError::error(
            "INVALID_OPENING_SIZE",
            format!("The {} needs a width and height", opening.kind.name()),
            true,
        ));
        return ValidationResult::from_findings(findings);
    }

    if opening.width_ft > wall_length {
        findings.push(ValidationError::error(
            "OPENING_TOO_WIDE",
            format!(
                "A {} wide {} does not fit on the {} foot {} wall",
                format_feet_inches(opening.width_ft),
                opening.kind.name(),
                wall_length,
                opening.wall
            ),
            true,
        ));
    }

    if let PositionSpec::Feet(requested) = opening.position {
        let center = calculate_position_in_feet(
            opening.position,
            opening.position_from,
            wall_length,
            opening.width_ft,
        );
        let raw = match opening.position_from {
            PositionFrom::Start => requested,
            PositionFrom::End => wall_length - requested,
        };
        if (raw - center).abs() > POINT_TOLERANCE_FT && opening.width_ft <= wall_length {
            findings.push(ValidationError::warning(
                "POSITION_ADJUSTED",
                format!(
                    "The {} was moved to {} from the wall start to stay on the wall",
                    opening.kind.name(),
                    format_feet_inches(center)
                ),
            ));
        }
    }

    if opening.height_ft > room.ceiling_height_ft {
        findings.push(ValidationError::warning(
            "OPENING_TALLER_THAN_CEILING",
            format!(
                "The {} is taller than the {} ceiling",
                opening.kind.name(),
                format_feet_inches(room.ceiling_height_ft)
            ),
        ));
    } else if let Some(sill) = opening.kind.sill_height_ft() {
        if sill + opening.height_ft > room.ceiling_height_ft {
            findings.push(ValidationError::warning(
                "OPENING_ABOVE_CEILING",
                format!(
                    "The top of the {} is above the ceiling",
                    opening.kind.name()
                ),
            ));
        }
    }

    let center = opening_center_ft(room, opening);
    let (start, end) = (
        center - opening.width_ft / 2.0,
        center + opening.width_ft / 2.0,
    );
    for other in room
        .openings
        .iter()
        .filter(|o| o.id != opening.id && o.wall == opening.wall)
    {
        let other_center = opening_center_ft(room, other);
        let other_start = other_center - other.width_ft / 2.0;
        let other_end = other_center + other.width_ft / 2.0;
        if start < other_end - POINT_TOLERANCE_FT && other_start < end - POINT_TOLERANCE_FT {
            findings.push(ValidationError::warning(
                "OPENING_OVERLAP",
                format!(
                    "The {} overlaps a {} on the {} wall",
                    opening.kind.name(),
                    other.kind.name(),
                    opening.wall
                ),
            ));
        }
    }

    ValidationResult::from_findings(findings)
}

/// Checks the polygon and dimensions of a room.
pub fn validate_room_geometry(room: &RoomGeometry) -> ValidationResult {
    let mut findings = Vec::new();
    let ring = open_ring(&room.polygon);

    if ring.len() < 3 {
        findings.push(ValidationError::error(
            "TOO_FEW_POINTS",
            format!("{} needs at least three corners", room.name),
            false,
        ));
        return ValidationResult::from_findings(findings);
    }

    let n = ring.len();
    if (0..n).any(|i| ring[i].approx_eq(&ring[(i + 1) % n], POINT_TOLERANCE_FT)) {
        findings.push(ValidationError::warning(
            "DUPLICATE_POINT",
            format!("{} has two corners in the same place", room.name),
        ));
    }

    if is_self_intersecting(ring) {
        findings.push(ValidationError::error(
            "SELF_INTERSECTING",
            format!("The walls of {} cross each other", room.name),
            false,
        ));
    }

    if polygon_area(ring) <= POINT_TOLERANCE_FT {
        findings.push(ValidationError::error(
            "ZERO_AREA",
            format!("{} has no floor area", room.name),
            false,
        ));
    }

    for (label, value) in [
        ("width", room.width_ft),
        ("length", room.length_ft),
        ("ceiling height", room.ceiling_height_ft),
    ] {
        if !(value.is_finite() && value > 0.0) {
            findings.push(ValidationError::error(
                "INVALID_DIMENSION",
                format!("The {} of {} must be greater than zero", label, room.name),
                true,
            ));
        }
    }

    if room.shape == RoomShape::Rectangle {
        let bounds = polygon_bounds(ring);
        if (bounds.width() - room.width_ft).abs() > POINT_TOLERANCE_FT
            || (bounds.height() - room.length_ft).abs() > POINT_TOLERANCE_FT
        {
            findings.push(ValidationError::error(
                "DIMENSION_MISMATCH",
                format!(
                    "{} is drawn {} by {} but recorded as {} by {}",
                    room.name,
                    format_feet_inches(bounds.width()),
                    format_feet_inches(bounds.height()),
                    format_feet_inches(room.width_ft),
                    format_feet_inches(room.length_ft)
                ),
                true,
            ));
        }
    }

    ValidationResult::from_findings(findings)
}
