//! Wall-length model of a room boundary.
//!
//! A room is stored as named walls carrying lengths in inches. Four walls
//! describe a rectangle (`A` top, `B` right, `C` bottom, `D` left); six walls
//! describe an L-shape (`A` width1, `B` height1, `C` width2, `D` height2,
//! `E` total width, `F` total height). [`Shape`] is the typed view of either
//! layout and is what the polygon conversion works from.

pub mod validate;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WallError};
use crate::math::Point2;
use crate::units::{feet_to_inches, inches_to_feet};

pub use validate::{validate_walls, ShapeValidation};

/// Direction a wall runs in plan view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallOrientation {
    Horizontal,
    Vertical,
}

/// One named edge-length parameter of the room boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    /// Single-letter name, `A` onwards.
    pub name: char,
    pub length_inches: f64,
    pub orientation: WallOrientation,
    /// Position in the wall sequence.
    pub wall_index: usize,
}

impl Wall {
    #[must_use]
    pub fn new(
        name: char,
        length_inches: f64,
        orientation: WallOrientation,
        wall_index: usize,
    ) -> Self {
        Self {
            name,
            length_inches,
            orientation,
            wall_index,
        }
    }

    #[must_use]
    pub fn length_feet(&self) -> f64 {
        inches_to_feet(self.length_inches)
    }
}

/// Kind of room outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeType {
    #[serde(rename = "rectangle")]
    Rectangle,
    #[serde(rename = "l-shape")]
    LShape,
}

/// Typed room outline. Dimensions are in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Shape {
    Rectangle {
        width: f64,
        height: f64,
    },
    LShape {
        width1: f64,
        height1: f64,
        width2: f64,
        height2: f64,
    },
}

impl Shape {
    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Self::Rectangle { .. } => ShapeType::Rectangle,
            Self::LShape { .. } => ShapeType::LShape,
        }
    }

    /// Builds the wall sequence for this outline.
    #[must_use]
    pub fn walls(&self) -> Vec<Wall> {
        match *self {
            Self::Rectangle { width, height } => generate_rectangle_walls(width, height),
            Self::LShape {
                width1,
                height1,
                width2,
                height2,
            } => generate_l_shape_walls(width1, height1, width2, height2),
        }
    }

    /// Corner points of the outline, clockwise in screen space from the
    /// origin.
    #[must_use]
    pub fn polygon(&self) -> Vec<Point2> {
        match *self {
            Self::Rectangle { width, height } => vec![
                Point2::new(0.0, 0.0),
                Point2::new(width, 0.0),
                Point2::new(width, height),
                Point2::new(0.0, height),
            ],
            Self::LShape {
                width1,
                height1,
                width2,
                height2,
            } => vec![
                Point2::new(0.0, 0.0),
                Point2::new(width1, 0.0),
                Point2::new(width1, height1),
                Point2::new(width1 + width2, height1),
                Point2::new(width1 + width2, height1 + height2),
                Point2::new(0.0, height1 + height2),
            ],
        }
    }

    /// Reads an outline back from its wall sequence, choosing the layout from
    /// the wall count.
    ///
    /// # Errors
    ///
    /// Returns `WallError::UnsupportedWallCount` unless there are exactly 4 or
    /// 6 walls, and `WallError::MissingWall` if a wall the layout needs is
    /// absent.
    pub fn from_walls(walls: &[Wall]) -> Result<Self> {
        match walls.len() {
            4 => Self::from_named_walls(ShapeType::Rectangle, walls),
            6 => Self::from_named_walls(ShapeType::LShape, walls),
            n => Err(WallError::UnsupportedWallCount(n).into()),
        }
    }

    /// Reads an outline of a known kind from its walls, looked up by name.
    ///
    /// # Errors
    ///
    /// Returns `WallError::MissingWall` if a wall the layout needs is absent.
    pub fn from_named_walls(shape_type: ShapeType, walls: &[Wall]) -> Result<Self> {
        let feet = |name: char| {
            find_wall(walls, name)
                .map(Wall::length_feet)
                .ok_or(WallError::MissingWall(name))
        };
        match shape_type {
            ShapeType::Rectangle => Ok(Self::Rectangle {
                width: feet('A')?,
                height: feet('B')?,
            }),
            ShapeType::LShape => Ok(Self::LShape {
                width1: feet('A')?,
                height1: feet('B')?,
                width2: feet('C')?,
                height2: feet('D')?,
            }),
        }
    }
}

/// Checks a stored wall sequence before it replaces the live one and returns
/// the outline it describes.
///
/// # Errors
///
/// Returns `WallError::IndexMismatch` if a wall's `wall_index` is not its
/// position, otherwise the errors of [`Shape::from_walls`].
pub fn check_wall_sequence(walls: &[Wall]) -> Result<Shape> {
    if let Some((position, wall)) = walls
        .iter()
        .enumerate()
        .find(|(position, wall)| wall.wall_index != *position)
    {
        return Err(WallError::IndexMismatch {
            position,
            wall_index: wall.wall_index,
        }
        .into());
    }
    Shape::from_walls(walls)
}

/// Returns the wall called `name`, if present.
#[must_use]
pub fn find_wall(walls: &[Wall], name: char) -> Option<&Wall> {
    walls.iter().find(|w| w.name == name)
}

/// Walls `A`–`D` of a `width` × `height` rectangle (feet in, inches stored).
#[must_use]
pub fn generate_rectangle_walls(width: f64, height: f64) -> Vec<Wall> {
    use WallOrientation::{Horizontal, Vertical};
    vec![
        Wall::new('A', feet_to_inches(width), Horizontal, 0),
        Wall::new('B', feet_to_inches(height), Vertical, 1),
        Wall::new('C', feet_to_inches(width), Horizontal, 2),
        Wall::new('D', feet_to_inches(height), Vertical, 3),
    ]
}

/// Walls `A`–`F` of an L-shape; `E` and `F` start as the width and height
/// totals.
#[must_use]
pub fn generate_l_shape_walls(width1: f64, height1: f64, width2: f64, height2: f64) -> Vec<Wall> {
    use WallOrientation::{Horizontal, Vertical};
    vec![
        Wall::new('A', feet_to_inches(width1), Horizontal, 0),
        Wall::new('B', feet_to_inches(height1), Vertical, 1),
        Wall::new('C', feet_to_inches(width2), Horizontal, 2),
        Wall::new('D', feet_to_inches(height2), Vertical, 3),
        Wall::new('E', feet_to_inches(width1 + width2), Horizontal, 4),
        Wall::new('F', feet_to_inches(height1 + height2), Vertical, 5),
    ]
}

/// Converts a wall sequence to polygon vertices in feet.
///
/// Any sequence that is not a complete rectangle or L-shape yields an empty
/// polygon.
#[must_use]
pub fn walls_to_polygon(walls: &[Wall]) -> Vec<Point2> {
    match Shape::from_walls(walls) {
        Ok(shape) => shape.polygon(),
        Err(err) => {
            tracing::debug!(%err, "no polygon for wall sequence");
            Vec::new()
        }
    }
}

/// Infers the outline kind from the wall count.
///
/// Counts other than 4 and 6 fall back to `Rectangle` so that a sequence in
/// the middle of being replaced still has a kind. Use [`Shape::from_walls`]
/// when malformed input has to be rejected.
#[must_use]
pub fn shape_type_from_walls(walls: &[Wall]) -> ShapeType {
    match walls.len() {
        6 => ShapeType::LShape,
        4 => ShapeType::Rectangle,
        n => {
            tracing::warn!(count = n, "unexpected wall count, assuming rectangle");
            ShapeType::Rectangle
        }
    }
}

/// Label placement data for one polygon edge.
#[derive(Debug, Clone, PartialEq)]
pub struct WallLabel {
    pub midpoint: Point2,
    pub length: f64,
    /// Edge direction in radians.
    pub angle: f64,
    pub wall_index: usize,
    pub letter: char,
}

/// Computes a label for each polygon edge, lettered from `A`.
#[must_use]
pub fn wall_labels(vertices: &[Point2]) -> Vec<WallLabel> {
    let n = vertices.len();
    (0..n)
        .zip('A'..='Z')
        .map(|(i, letter)| {
            let current = vertices[i];
            let next = vertices[(i + 1) % n];
            let d = next - current;
            WallLabel {
                midpoint: nalgebra::center(&current, &next),
                length: d.norm(),
                angle: d.y.atan2(d.x),
                wall_index: i,
                letter,
            }
        })
        .collect()
}
