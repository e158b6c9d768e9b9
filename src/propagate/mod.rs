//! Keeps dependent walls consistent after a single wall edit.
//!
//! Rectangles pair opposite walls (`A`/`C`, `B`/`D`). L-shapes tie the total
//! walls to their parts: `E = A + C` and `F = B + D`. Edits are reported
//! through an update callback `(wall_index, patch)` so the caller owns the
//! wall storage; propagation itself only reads a snapshot.

pub mod drag;

use crate::error::{Result, WallError};
use crate::math::MIN_WALL_LENGTH_INCHES;
use crate::wall::{find_wall, ShapeType, Wall, WallOrientation};

pub use drag::drag_wall;

/// Partial update for one wall. `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WallPatch {
    pub length_inches: Option<f64>,
    pub orientation: Option<WallOrientation>,
}

impl WallPatch {
    /// Patch that only sets the length.
    #[must_use]
    pub fn length(length_inches: f64) -> Self {
        Self {
            length_inches: Some(length_inches),
            orientation: None,
        }
    }

    /// Writes the set fields into `wall`.
    pub fn apply_to(&self, wall: &mut Wall) {
        if let Some(length) = self.length_inches {
            wall.length_inches = length;
        }
        if let Some(orientation) = self.orientation {
            wall.orientation = orientation;
        }
    }
}

/// Sets wall `wall_index` to `new_length_inches` and updates its dependents.
///
/// # Errors
///
/// Returns `WallError::IndexOutOfRange` if there is no wall at `wall_index`,
/// and `WallError::InvalidLength` for negative or non-finite lengths. A zero
/// length is accepted and left for [`crate::wall::validate_walls`] to flag.
pub fn update_wall_length(
    shape: ShapeType,
    walls: &[Wall],
    wall_index: usize,
    new_length_inches: f64,
    mut update: impl FnMut(usize, WallPatch),
) -> Result<()> {
    if wall_index >= walls.len() {
        return Err(WallError::IndexOutOfRange {
            index: wall_index,
            len: walls.len(),
        }
        .into());
    }
    if !new_length_inches.is_finite() || new_length_inches < 0.0 {
        return Err(WallError::InvalidLength(new_length_inches).into());
    }

    update(wall_index, WallPatch::length(new_length_inches));
    propagate_length_change(shape, walls, wall_index, new_length_inches, update);
    Ok(())
}

/// Emits updates for the walls that depend on wall `wall_index`, which has
/// just been set to `new_length_inches`. `walls` is the state before the
/// edit.
///
/// Companion walls that cannot be found by name are skipped, as is a
/// non-finite length.
pub fn propagate_length_change(
    shape: ShapeType,
    walls: &[Wall],
    wall_index: usize,
    new_length_inches: f64,
    mut update: impl FnMut(usize, WallPatch),
) {
    let Some(edited) = walls.get(wall_index) else {
        return;
    };
    if !new_length_inches.is_finite() {
        tracing::debug!(edited = %edited.name, new_length_inches, "non-finite length, skipping");
        return;
    }
    let mut set = |name: char, length: f64| match find_wall(walls, name) {
        Some(wall) => update(wall.wall_index, WallPatch::length(length)),
        None => tracing::debug!(wall = %name, edited = %edited.name, "companion wall missing"),
    };
    let length_of = |name: char| find_wall(walls, name).map(|w| w.length_inches);

    match shape {
        ShapeType::Rectangle => match edited.name {
            'A' => set('C', new_length_inches),
            'C' => set('A', new_length_inches),
            'B' => set('D', new_length_inches),
            'D' => set('B', new_length_inches),
            _ => {}
        },
        ShapeType::LShape => match edited.name {
            'A' | 'C' | 'B' | 'D' => {
                let (partner, total) = match edited.name {
                    'A' => ('C', 'E'),
                    'C' => ('A', 'E'),
                    'B' => ('D', 'F'),
                    _ => ('B', 'F'),
                };
                match length_of(partner) {
                    Some(other) => set(total, new_length_inches + other),
                    None => {
                        tracing::debug!(wall = %partner, "partner wall missing, total not updated");
                    }
                }
            }
            'E' | 'F' => {
                let (first, second) = if edited.name == 'E' { ('A', 'C') } else { ('B', 'D') };
                let (Some(current_first), Some(current_second)) =
                    (length_of(first), length_of(second))
                else {
                    tracing::debug!(edited = %edited.name, "part walls missing, total not split");
                    return;
                };
                let (new_first, new_second) =
                    split_preserving_ratio(new_length_inches, current_first, current_second);
                set(first, new_first);
                set(second, new_second);
                let settled = new_first + new_second;
                if (settled - new_length_inches).abs() > f64::EPSILON * settled.max(1.0) {
                    tracing::debug!(
                        requested = new_length_inches,
                        settled,
                        "total below two minimum walls, raised"
                    );
                    update(edited.wall_index, WallPatch::length(settled));
                }
            }
            _ => {}
        },
    }
}

/// Divides `total` into two parts in the ratio `first : second`.
///
/// Each part is at least [`MIN_WALL_LENGTH_INCHES`]; the second part takes
/// whatever the first leaves. A total too small for two minimum walls gives
/// two minimum walls. Equal parts when there is no current ratio.
#[must_use]
pub fn split_preserving_ratio(total: f64, first: f64, second: f64) -> (f64, f64) {
    let min = MIN_WALL_LENGTH_INCHES;
    if total < 2.0 * min {
        return (min, min);
    }
    let current = first + second;
    let ratio = if current > 0.0 { first / current } else { 0.5 };
    let new_first = (total * ratio).max(min).min(total - min);
    (new_first, total - new_first)
}
