use serde::{Deserialize, Serialize};

use super::Dimensions;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a cutout in a room.
    pub struct CutoutId;
}

/// Outline of an excluded region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CutoutKind {
    Rectangle,
    #[serde(rename_all = "camelCase")]
    Rounded { corner_radius: f64 },
}

/// An obstruction (skylight, column, duct) subtracted from the tileable area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cutout {
    #[serde(flatten)]
    pub kind: CutoutKind,
    /// Top-left corner in plan feet.
    pub position: Point2,
    pub dimensions: Dimensions,
}

impl Cutout {
    #[must_use]
    pub fn rectangle(position: Point2, dimensions: Dimensions) -> Self {
        Self {
            kind: CutoutKind::Rectangle,
            position,
            dimensions,
        }
    }

    #[must_use]
    pub fn rounded(position: Point2, dimensions: Dimensions, corner_radius: f64) -> Self {
        Self {
            kind: CutoutKind::Rounded { corner_radius },
            position,
            dimensions,
        }
    }

    /// Returns `true` if `point` is inside the cutout or on its edge.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        point_in_cutout(point, self)
    }
}

/// Inclusive point test against a rectangular or rounded-rectangle cutout.
#[must_use]
pub fn point_in_cutout(point: &Point2, cutout: &Cutout) -> bool {
    let left = cutout.position.x;
    let right = left + cutout.dimensions.width;
    let top = cutout.position.y;
    let bottom = top + cutout.dimensions.height;
    let in_bounds = point.x >= left && point.x <= right && point.y >= top && point.y <= bottom;

    let radius = match cutout.kind {
        CutoutKind::Rectangle => return in_bounds,
        CutoutKind::Rounded { corner_radius } => corner_radius,
    };

    // Outside the corner squares the outline is the plain rectangle.
    let in_middle_band = (point.x >= left + radius && point.x <= right - radius)
        || (point.y >= top + radius && point.y <= bottom - radius);
    if in_middle_band {
        return in_bounds;
    }

    let corners = [
        Point2::new(left + radius, top + radius),
        Point2::new(right - radius, top + radius),
        Point2::new(right - radius, bottom - radius),
        Point2::new(left + radius, bottom - radius),
    ];
    corners
        .iter()
        .any(|c| (point - c).norm_squared() <= radius * radius)
}
