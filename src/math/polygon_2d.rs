use super::intersect_2d::has_self_intersection;
use super::{Point2, MIN_WALL_LENGTH, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise (y up).
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Unsigned area of a closed polygon. Zero for fewer than 3 vertices.
#[must_use]
pub fn polygon_area(points: &[Point2]) -> f64 {
    signed_area(points).abs()
}

/// Returns `true` if `point` lies on segment `a–b` within `tolerance`.
///
/// The cross product must be near zero and the projection must fall inside
/// the segment's extent.
#[must_use]
pub fn point_on_segment(point: &Point2, a: &Point2, b: &Point2, tolerance: f64) -> bool {
    let cross = (point.y - a.y) * (b.x - a.x) - (point.x - a.x) * (b.y - a.y);
    if cross.abs() > tolerance {
        return false;
    }
    let dot = (point.x - a.x) * (b.x - a.x) + (point.y - a.y) * (b.y - a.y);
    let len_sq = (b.x - a.x).powi(2) + (b.y - a.y).powi(2);
    dot >= 0.0 && dot <= len_sq
}

/// Returns `true` if `point` lies on any edge of the closed polygon.
#[must_use]
pub fn point_on_boundary(point: &Point2, vertices: &[Point2]) -> bool {
    let n = vertices.len();
    (0..n).any(|i| point_on_segment(point, &vertices[i], &vertices[(i + 1) % n], TOLERANCE))
}

/// Ray-casting point-in-polygon test.
///
/// Points on the boundary are reported as outside so that cells straddling a
/// wall are never counted from both sides.
#[must_use]
pub fn point_in_polygon(point: &Point2, vertices: &[Point2]) -> bool {
    if point_on_boundary(point, vertices) {
        return false;
    }

    let n = vertices.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let vi = &vertices[i];
        let vj = &vertices[j];
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Axis-aligned bounds of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds2 {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds2 {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Area of the box itself, not of the polygon it encloses.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width().abs() * self.height().abs()
    }
}

/// Bounds of `vertices`; all zeros for an empty slice.
#[must_use]
pub fn polygon_bounds(vertices: &[Point2]) -> Bounds2 {
    let Some(first) = vertices.first() else {
        return Bounds2::default();
    };
    vertices.iter().skip(1).fold(
        Bounds2 {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        },
        |b, v| Bounds2 {
            min_x: b.min_x.min(v.x),
            max_x: b.max_x.max(v.x),
            min_y: b.min_y.min(v.y),
            max_y: b.max_y.max(v.y),
        },
    )
}

/// Outcome of [`validate_polygon`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolygonValidation {
    pub valid: bool,
    pub error: Option<String>,
}

impl PolygonValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    fn rejected(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// Checks that a room outline is usable: at least 3 vertices, no crossing
/// edges, and no edge shorter than [`MIN_WALL_LENGTH`].
#[must_use]
pub fn validate_polygon(vertices: &[Point2]) -> PolygonValidation {
    if vertices.len() < 3 {
        return PolygonValidation::rejected("Polygon must have at least 3 vertices");
    }

    if has_self_intersection(vertices) {
        return PolygonValidation::rejected("Polygon cannot have self-intersections");
    }

    let n = vertices.len();
    for i in 0..n {
        let length = (vertices[(i + 1) % n] - vertices[i]).norm();
        if length < MIN_WALL_LENGTH {
            return PolygonValidation::rejected(format!(
                "Edge {} is too short (minimum {MIN_WALL_LENGTH} units)",
                i + 1
            ));
        }
    }

    PolygonValidation::ok()
}

/// Rounds each coordinate to the nearest multiple of `grid_size`.
///
/// A non-positive grid disables snapping and returns the point unchanged.
#[must_use]
pub fn snap_to_grid(point: &Point2, grid_size: f64) -> Point2 {
    if grid_size <= TOLERANCE {
        return *point;
    }
    Point2::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// Returns `true` if edge `index` (from vertex `index` to the next) runs more
/// vertically than horizontally.
#[must_use]
pub fn edge_is_vertical(index: usize, vertices: &[Point2]) -> bool {
    let n = vertices.len();
    if index >= n {
        return false;
    }
    let d = vertices[(index + 1) % n] - vertices[index];
    d.y.abs() > d.x.abs()
}
