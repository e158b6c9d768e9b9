pub mod intersect_2d;
pub mod polygon_2d;

/// 2D plan point, in feet.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D plan vector, in feet.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Number of inches in one foot.
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Smallest wall or edge length accepted anywhere in the model, in feet.
pub const MIN_WALL_LENGTH: f64 = 0.5;

/// [`MIN_WALL_LENGTH`] expressed in inches.
pub const MIN_WALL_LENGTH_INCHES: f64 = MIN_WALL_LENGTH * INCHES_PER_FOOT;
