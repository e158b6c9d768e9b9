use super::Point2;

/// Orientation of `c` relative to the directed line `a → b`.
///
/// Zero when the three points are collinear; the sign tells which side `c`
/// lies on.
#[must_use]
pub fn direction(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (c.x - a.x) * (b.y - a.y) - (b.x - a.x) * (c.y - a.y)
}

/// Proper crossing test for segments `p1–p2` and `p3–p4`.
///
/// Only strict crossings count. Touching endpoints and collinear overlaps
/// return `false`, which keeps shared vertices of adjacent polygon edges from
/// being reported.
#[must_use]
pub fn segments_cross(p1: &Point2, p2: &Point2, p3: &Point2, p4: &Point2) -> bool {
    let d1 = direction(p3, p4, p1);
    let d2 = direction(p3, p4, p2);
    let d3 = direction(p1, p2, p3);
    let d4 = direction(p1, p2, p4);

    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

/// Returns `true` if any two non-adjacent edges of the closed polygon cross.
#[must_use]
pub fn has_self_intersection(vertices: &[Point2]) -> bool {
    let n = vertices.len();
    for i in 0..n {
        for j in (i + 2)..n {
            // First and last edges share vertex 0.
            if i == 0 && j == n - 1 {
                continue;
            }
            let p1 = &vertices[i];
            let p2 = &vertices[(i + 1) % n];
            let p3 = &vertices[j];
            let p4 = &vertices[(j + 1) % n];
            if segments_cross(p1, p2, p3, p4) {
                return true;
            }
        }
    }
    false
}
