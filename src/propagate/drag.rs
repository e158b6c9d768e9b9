use super::WallPatch;
use crate::error::{Result, WallError};
use crate::math::polygon_2d::{edge_is_vertical, polygon_bounds};
use crate::math::{Vector2, MIN_WALL_LENGTH, TOLERANCE};
use crate::units::{feet_to_inches, inches_to_feet, round_to_nearest_half};
use crate::wall::{find_wall, Shape, ShapeType, Wall};

/// Rounds each component of a drag delta (feet) to the nearest half inch.
#[must_use]
pub fn snap_drag_delta(delta: Vector2) -> Vector2 {
    delta.map(|d| inches_to_feet(round_to_nearest_half(feet_to_inches(d))))
}

/// Drags polygon edge `wall_index` by `delta` (feet) and rewrites the walls
/// to match.
///
/// The edge's two vertices move perpendicular to the edge only: horizontal
/// walls move in y, vertical walls in x. The outline parameters are then read
/// back from the moved vertices, floored at [`MIN_WALL_LENGTH`], and the
/// totals of an L-shape are recomputed from its parts.
///
/// # Errors
///
/// Returns `WallError::MissingWall` if the walls do not describe a complete
/// `shape`, and `WallError::IndexOutOfRange` if the outline has no edge
/// `wall_index`.
pub fn drag_wall(
    shape: ShapeType,
    walls: &[Wall],
    wall_index: usize,
    delta: Vector2,
    mut update: impl FnMut(usize, WallPatch),
) -> Result<()> {
    let mut vertices = Shape::from_named_walls(shape, walls)?.polygon();
    let n = vertices.len();
    if wall_index >= n {
        return Err(WallError::IndexOutOfRange {
            index: wall_index,
            len: n,
        }
        .into());
    }

    let delta = snap_drag_delta(delta);
    let next = (wall_index + 1) % n;
    if edge_is_vertical(wall_index, &vertices) {
        if delta.x.abs() < TOLERANCE {
            return Ok(());
        }
        vertices[wall_index].x += delta.x;
        vertices[next].x += delta.x;
    } else {
        if delta.y.abs() < TOLERANCE {
            return Ok(());
        }
        vertices[wall_index].y += delta.y;
        vertices[next].y += delta.y;
    }

    let floor = |feet: f64| feet.max(MIN_WALL_LENGTH);
    let lengths: Vec<(char, f64)> = match shape {
        ShapeType::Rectangle => {
            let bounds = polygon_bounds(&vertices);
            let width = floor(bounds.width());
            let height = floor(bounds.height());
            vec![('A', width), ('B', height), ('C', width), ('D', height)]
        }
        ShapeType::LShape => {
            let width1 = floor(vertices[1].x - vertices[0].x);
            let height1 = floor(vertices[2].y - vertices[1].y);
            let width2 = floor(vertices[3].x - vertices[2].x);
            let height2 = floor(vertices[4].y - vertices[3].y);
            vec![
                ('A', width1),
                ('B', height1),
                ('C', width2),
                ('D', height2),
                ('E', width1 + width2),
                ('F', height1 + height2),
            ]
        }
    };

    tracing::trace!(wall_index, dx = delta.x, dy = delta.y, "wall dragged");
    for (name, feet) in lengths {
        if let Some(wall) = find_wall(walls, name) {
            update(wall.wall_index, WallPatch::length(feet_to_inches(feet)));
        }
    }
    Ok(())
}
