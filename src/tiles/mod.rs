//! Tile configuration, fitting inputs and results.

pub mod cutout;
pub mod fitting;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CeilingError, InputError};

pub use cutout::{point_in_cutout, Cutout, CutoutId, CutoutKind};
pub use fitting::{calculate_tiles, generate_tile_grid, tile_coverage, waste_factor, CalculateTiles};

/// Width and height in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Same rectangle turned a quarter turn.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self::new(self.height, self.width)
    }
}

/// Nominal tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileSize {
    #[default]
    #[serde(rename = "2x2")]
    TwoByTwo,
    #[serde(rename = "2x4")]
    TwoByFour,
}

impl TileSize {
    /// Unrotated tile footprint, long axis vertical.
    #[must_use]
    pub fn base_dimensions(self) -> Dimensions {
        match self {
            Self::TwoByTwo => Dimensions::new(2.0, 2.0),
            Self::TwoByFour => Dimensions::new(2.0, 4.0),
        }
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoByTwo => f.write_str("2x2"),
            Self::TwoByFour => f.write_str("2x4"),
        }
    }
}

impl FromStr for TileSize {
    type Err = CeilingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2x2" => Ok(Self::TwoByTwo),
            "2x4" => Ok(Self::TwoByFour),
            other => Err(InputError::UnknownTileSize(other.to_owned()).into()),
        }
    }
}

/// Tile rotation in degrees. Only changes anything for 2x4 tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum TileOrientation {
    #[default]
    Horizontal,
    Vertical,
}

impl TryFrom<u16> for TileOrientation {
    type Error = CeilingError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Horizontal),
            90 => Ok(Self::Vertical),
            other => Err(InputError::UnknownOrientation(other).into()),
        }
    }
}

impl From<TileOrientation> for u16 {
    fn from(orientation: TileOrientation) -> Self {
        match orientation {
            TileOrientation::Horizontal => 0,
            TileOrientation::Vertical => 90,
        }
    }
}

/// Catalog entry for a tile pattern. Width and height are in inches.
///
/// Only used as a visual reference; fitting geometry comes from
/// [`TileConfig::size`] and [`TileConfig::orientation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub width: f64,
    pub height: f64,
    pub image_url: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileConfig {
    pub size: TileSize,
    pub orientation: TileOrientation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_tile: Option<TileDefinition>,
}

impl TileConfig {
    #[must_use]
    pub fn new(size: TileSize, orientation: TileOrientation) -> Self {
        Self {
            size,
            orientation,
            selected_tile: None,
        }
    }

    /// Effective tile footprint in feet after applying the orientation.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        let base = self.size.base_dimensions();
        match self.orientation {
            TileOrientation::Horizontal => base,
            TileOrientation::Vertical => base.rotated(),
        }
    }
}

/// Reference point the grid is described from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridOrigin {
    #[default]
    TopLeft,
    Center,
}

/// Placement of the tile grid relative to the room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub origin: GridOrigin,
    /// Horizontal grid shift in feet.
    pub offset_x: f64,
    /// Vertical grid shift in feet.
    pub offset_y: f64,
    /// Snap increment for editing, in feet.
    pub snap_grid: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            origin: GridOrigin::TopLeft,
            offset_x: 0.0,
            offset_y: 0.0,
            snap_grid: 0.5,
        }
    }
}

/// Parameters of the coverage estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittingParams {
    /// Sample points per cell axis; each cell is sampled on an n×n lattice.
    pub samples_per_axis: u32,
    /// Cells covered less than this are dropped as edge noise.
    pub min_coverage: f64,
    /// Cells covered at least this much count as full tiles.
    pub full_coverage: f64,
}

impl Default for FittingParams {
    fn default() -> Self {
        Self {
            samples_per_axis: 10,
            min_coverage: 0.10,
            full_coverage: 0.95,
        }
    }
}

/// One candidate tile position in the fitting grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileCell {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Fraction of the cell inside the room and outside every cutout.
    pub coverage: f64,
    pub is_full: bool,
}

/// Summary of a tile fitting run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub total_tiles: usize,
    pub full_tiles: usize,
    pub partial_tiles: usize,
    pub estimated_total: usize,
    /// Room area in sq ft.
    pub area: f64,
    /// Area of one tile in sq ft.
    pub tile_area: f64,
    /// Percentage of purchased tile area beyond the room area.
    pub waste_factor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_estimate: Option<f64>,
}

impl CalculationResult {
    /// Attaches a cost estimate of `estimated_total * price_per_tile`.
    #[must_use]
    pub fn with_price_per_tile(mut self, price_per_tile: f64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let tiles = self.estimated_total as f64;
        self.cost_estimate = Some(tiles * price_per_tile);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn two_by_four_rotates() {
        let horizontal = TileConfig::new(TileSize::TwoByFour, TileOrientation::Horizontal);
        let vertical = TileConfig::new(TileSize::TwoByFour, TileOrientation::Vertical);
        assert_eq!(horizontal.dimensions(), Dimensions::new(2.0, 4.0));
        assert_eq!(vertical.dimensions(), Dimensions::new(4.0, 2.0));
    }

    #[test]
    fn two_by_two_ignores_orientation() {
        let vertical = TileConfig::new(TileSize::TwoByTwo, TileOrientation::Vertical);
        assert_eq!(vertical.dimensions(), Dimensions::new(2.0, 2.0));
    }

    #[test]
    fn tile_size_parses() {
        assert_eq!("2x4".parse::<TileSize>().unwrap(), TileSize::TwoByFour);
        assert_eq!(TileSize::TwoByTwo.to_string(), "2x2");
        assert!("3x3".parse::<TileSize>().is_err());
    }

    #[test]
    fn orientation_degrees() {
        assert_eq!(TileOrientation::try_from(90).unwrap(), TileOrientation::Vertical);
        assert_eq!(u16::from(TileOrientation::Horizontal), 0);
        assert!(TileOrientation::try_from(45).is_err());
    }

    #[test]
    fn config_serializes_like_the_ui_state() {
        let config = TileConfig::new(TileSize::TwoByFour, TileOrientation::Vertical);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"size":"2x4","orientation":90}"#);
        let back: TileConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert!(serde_json::from_str::<TileConfig>(r#"{"size":"2x4","orientation":45}"#).is_err());
    }

    #[test]
    fn cost_from_estimate() {
        let result = CalculationResult {
            estimated_total: 20,
            ..CalculationResult::default()
        }
        .with_price_per_tile(3.5);
        assert_eq!(result.cost_estimate, Some(70.0));
    }
}
