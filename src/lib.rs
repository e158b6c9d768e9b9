//! Ceiling tile estimation for rectangular and L-shaped rooms.
//!
//! Rooms are described by named wall lengths ([`wall`]), turned into plan
//! polygons in feet, and covered with a grid of tiles whose coverage is
//! sampled against the outline and any cutouts ([`tiles`]). Wall edits keep
//! the outline closed through [`propagate`]; [`state::RoomState`] ties the
//! pieces together.

pub mod error;
pub mod math;
pub mod propagate;
pub mod state;
pub mod tiles;
pub mod units;
pub mod wall;

pub use error::{CeilingError, Result};
pub use state::RoomState;
pub use tiles::{calculate_tiles, CalculationResult, TileConfig};
pub use wall::{Shape, ShapeType, Wall};
