use thiserror::Error;

use crate::wall::ShapeType;

/// Top-level error type for the ceiling tile estimator.
#[derive(Debug, Error)]
pub enum CeilingError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Wall(#[from] WallError),

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Errors related to plan geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid room outline: {0}")]
    InvalidPolygon(String),
}

/// Errors related to the wall model and its edits.
#[derive(Debug, Error)]
pub enum WallError {
    #[error("unsupported wall count {0} (expected 4 or 6)")]
    UnsupportedWallCount(usize),

    #[error("wall {0} not found")]
    MissingWall(char),

    #[error("wall index {index} out of range for {len} walls")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid wall length {0}")]
    InvalidLength(f64),

    #[error("wall at position {position} carries index {wall_index}")]
    IndexMismatch { position: usize, wall_index: usize },

    #[error("walls describe a {found:?} outline, not {declared:?}")]
    ShapeMismatch {
        declared: ShapeType,
        found: ShapeType,
    },
}

/// Errors related to user-supplied values.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot parse length from {0:?}")]
    Unparseable(String),

    #[error("unknown tile size {0:?}")]
    UnknownTileSize(String),

    #[error("unsupported tile orientation {0} (expected 0 or 90)")]
    UnknownOrientation(u16),

    #[error("cutout not found")]
    CutoutNotFound,
}

/// Convenience type alias for results using [`CeilingError`].
pub type Result<T> = std::result::Result<T, CeilingError>;
