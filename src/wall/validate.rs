use serde::{Deserialize, Serialize};

use super::{walls_to_polygon, Wall};
use crate::math::polygon_2d::polygon_bounds;
use crate::math::{MIN_WALL_LENGTH, MIN_WALL_LENGTH_INCHES};

/// Bounding-box area (sq ft) above which fitting gets slow enough to warn.
pub const MAX_RECOMMENDED_AREA: f64 = 2000.0;

/// Outcome of [`validate_walls`]. Errors block a shape change; warnings are
/// advisory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Checks wall lengths and overall room size.
#[must_use]
pub fn validate_walls(walls: &[Wall]) -> ShapeValidation {
    let mut result = ShapeValidation {
        is_valid: true,
        ..ShapeValidation::default()
    };

    for wall in walls {
        if wall.length_inches <= 0.0 {
            result
                .errors
                .push(format!("Wall {} must have a length greater than 0", wall.name));
            result.is_valid = false;
        }
        if wall.length_inches < MIN_WALL_LENGTH_INCHES {
            result.warnings.push(format!(
                "Wall {} is very small (minimum recommended: {MIN_WALL_LENGTH} feet)",
                wall.name
            ));
        }
    }

    let vertices = walls_to_polygon(walls);
    if !vertices.is_empty() {
        let area = polygon_bounds(&vertices).area();
        if area > MAX_RECOMMENDED_AREA {
            result.warnings.push(format!(
                "Room area is very large ({area:.1} sq ft). Performance may be affected."
            ));
        }
    }

    result
}
