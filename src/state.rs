//! Application state shared between the editors and the fitting engine.
//!
//! [`RoomState`] owns the walls, cutouts and tile settings. Edits go through
//! its methods, which apply wall propagation in full before anything reads
//! the walls back, so [`RoomState::recalculate`] always sees a consistent
//! outline.

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::error::{CeilingError, GeometryError, InputError, Result, WallError};
use crate::math::polygon_2d::validate_polygon;
use crate::math::{Point2, Vector2};
use crate::propagate::{self, WallPatch};
use crate::tiles::{
    CalculateTiles, CalculationResult, Cutout, CutoutId, FittingParams, GridConfig, TileCell,
    TileConfig, TileDefinition,
};
use crate::units::LengthDraft;
use crate::wall::{
    check_wall_sequence, validate_walls, walls_to_polygon, Shape, ShapeType, ShapeValidation, Wall,
};

/// Side length of the square room a fresh state starts with, in feet.
pub const DEFAULT_ROOM_SIZE: f64 = 12.0;

/// Room outline, obstructions and tile settings.
///
/// Deserializing re-checks the walls, so a stored state whose walls disagree
/// with its shape type or positions is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RoomSnapshot")]
pub struct RoomState {
    shape_type: ShapeType,
    walls: Vec<Wall>,
    #[serde(default)]
    cutouts: SlotMap<CutoutId, Cutout>,
    tile_config: TileConfig,
    grid_config: GridConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price_per_tile: Option<f64>,
    #[serde(default)]
    fitting: FittingParams,
    /// Derived; rebuilt by [`RoomState::recalculate`] and never persisted.
    #[serde(skip)]
    calculation: CalculationResult,
}

/// Persisted form of [`RoomState`], checked on the way in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoomSnapshot {
    shape_type: ShapeType,
    walls: Vec<Wall>,
    #[serde(default)]
    cutouts: SlotMap<CutoutId, Cutout>,
    tile_config: TileConfig,
    grid_config: GridConfig,
    #[serde(default)]
    price_per_tile: Option<f64>,
    #[serde(default)]
    fitting: FittingParams,
}

impl TryFrom<RoomSnapshot> for RoomState {
    type Error = CeilingError;

    fn try_from(snapshot: RoomSnapshot) -> Result<Self> {
        let found = check_wall_sequence(&snapshot.walls)?.shape_type();
        if found != snapshot.shape_type {
            return Err(WallError::ShapeMismatch {
                declared: snapshot.shape_type,
                found,
            }
            .into());
        }
        Ok(Self {
            shape_type: snapshot.shape_type,
            walls: snapshot.walls,
            cutouts: snapshot.cutouts,
            tile_config: snapshot.tile_config,
            grid_config: snapshot.grid_config,
            price_per_tile: snapshot.price_per_tile,
            fitting: snapshot.fitting,
            calculation: CalculationResult::default(),
        })
    }
}

impl Default for RoomState {
    fn default() -> Self {
        let shape = Shape::Rectangle {
            width: DEFAULT_ROOM_SIZE,
            height: DEFAULT_ROOM_SIZE,
        };
        Self {
            shape_type: shape.shape_type(),
            walls: shape.walls(),
            cutouts: SlotMap::with_key(),
            tile_config: TileConfig::default(),
            grid_config: GridConfig::default(),
            price_per_tile: None,
            fitting: FittingParams::default(),
            calculation: CalculationResult::default(),
        }
    }
}

impl RoomState {
    /// Creates the default state: a 12 × 12 ft room with 2x2 tiles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state for `shape` with default tile settings.
    #[must_use]
    pub fn with_shape(shape: Shape) -> Self {
        let mut state = Self::default();
        state.set_shape(shape);
        state
    }

    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    #[must_use]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    #[must_use]
    pub fn tile_config(&self) -> &TileConfig {
        &self.tile_config
    }

    #[must_use]
    pub fn grid_config(&self) -> &GridConfig {
        &self.grid_config
    }

    /// Result of the last [`RoomState::recalculate`].
    #[must_use]
    pub fn calculation(&self) -> &CalculationResult {
        &self.calculation
    }

    /// Replaces every wall with the walls of `shape`.
    pub fn set_shape(&mut self, shape: Shape) {
        tracing::debug!(?shape, "shape replaced");
        self.shape_type = shape.shape_type();
        self.walls = shape.walls();
    }

    /// Replaces the wall sequence wholesale, e.g. from stored state.
    ///
    /// # Errors
    ///
    /// Returns an error if the walls are not a complete rectangle or L-shape,
    /// or if a wall's `wall_index` is not its position.
    pub fn set_walls(&mut self, walls: Vec<Wall>) -> Result<()> {
        self.shape_type = check_wall_sequence(&walls)?.shape_type();
        self.walls = walls;
        Ok(())
    }

    /// Applies `patch` to the wall at `wall_index` without touching any other
    /// wall. Indexes past the end are ignored.
    pub fn update_wall(&mut self, wall_index: usize, patch: WallPatch) {
        if let Some(wall) = self.walls.get_mut(wall_index) {
            patch.apply_to(wall);
        }
    }

    /// Sets a wall length and propagates it to the dependent walls.
    ///
    /// # Errors
    ///
    /// Returns an error if `wall_index` is out of range or the length is
    /// negative or not finite.
    pub fn edit_wall_length(&mut self, wall_index: usize, length_inches: f64) -> Result<()> {
        let snapshot = self.walls.clone();
        propagate::update_wall_length(
            self.shape_type,
            &snapshot,
            wall_index,
            length_inches,
            |i, patch| self.update_wall(i, patch),
        )
    }

    /// Draft text for the wall at `wall_index`.
    #[must_use]
    pub fn draft(&self, wall_index: usize) -> Option<LengthDraft> {
        self.walls
            .get(wall_index)
            .map(|w| LengthDraft::from_inches(w.length_inches))
    }

    /// Commits `draft` to the wall at `wall_index`, returning the committed
    /// length in inches.
    ///
    /// # Errors
    ///
    /// Returns an error if `wall_index` is out of range.
    pub fn commit_draft(&mut self, wall_index: usize, draft: &mut LengthDraft) -> Result<f64> {
        let inches = draft.commit();
        self.edit_wall_length(wall_index, inches)?;
        Ok(inches)
    }

    /// Applies a canvas drag of polygon edge `wall_index` by `delta` feet.
    ///
    /// # Errors
    ///
    /// Returns an error if the walls do not form a complete outline or the
    /// edge does not exist.
    pub fn drag_wall(&mut self, wall_index: usize, delta: Vector2) -> Result<()> {
        let snapshot = self.walls.clone();
        propagate::drag_wall(self.shape_type, &snapshot, wall_index, delta, |i, patch| {
            self.update_wall(i, patch);
        })
    }

    pub fn cutouts(&self) -> impl Iterator<Item = (CutoutId, &Cutout)> {
        self.cutouts.iter()
    }

    pub fn add_cutout(&mut self, cutout: Cutout) -> CutoutId {
        self.cutouts.insert(cutout)
    }

    /// Removes a cutout, returning it if it existed.
    pub fn remove_cutout(&mut self, id: CutoutId) -> Option<Cutout> {
        self.cutouts.remove(id)
    }

    /// Replaces a cutout in place.
    ///
    /// # Errors
    ///
    /// Returns `InputError::CutoutNotFound` if `id` is unknown.
    pub fn update_cutout(&mut self, id: CutoutId, cutout: Cutout) -> Result<()> {
        let slot = self.cutouts.get_mut(id).ok_or(InputError::CutoutNotFound)?;
        *slot = cutout;
        Ok(())
    }

    pub fn set_tile_config(&mut self, tile_config: TileConfig) {
        self.tile_config = tile_config;
    }

    pub fn select_tile(&mut self, tile: TileDefinition) {
        self.tile_config.selected_tile = Some(tile);
    }

    pub fn set_grid_config(&mut self, grid_config: GridConfig) {
        self.grid_config = grid_config;
    }

    pub fn set_fitting_params(&mut self, params: FittingParams) {
        self.fitting = params;
    }

    /// Sets or clears the price used for the cost estimate.
    pub fn set_price_per_tile(&mut self, price: Option<f64>) {
        self.price_per_tile = price;
    }

    /// Restores the default state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Room outline in plan feet.
    #[must_use]
    pub fn polygon(&self) -> Vec<Point2> {
        walls_to_polygon(&self.walls)
    }

    /// Room outline, rejected if it is not a simple polygon.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidPolygon` with the validation message.
    pub fn checked_polygon(&self) -> Result<Vec<Point2>> {
        let polygon = self.polygon();
        let check = validate_polygon(&polygon);
        if check.valid {
            Ok(polygon)
        } else {
            let message = check.error.unwrap_or_default();
            tracing::warn!(%message, "room outline rejected");
            Err(GeometryError::InvalidPolygon(message).into())
        }
    }

    #[must_use]
    pub fn validate(&self) -> ShapeValidation {
        validate_walls(&self.walls)
    }

    fn cutout_list(&self) -> Vec<Cutout> {
        self.cutouts.values().copied().collect()
    }

    /// Classified tile cells for the current outline, for drawing.
    #[must_use]
    pub fn tile_cells(&self) -> Vec<TileCell> {
        let room = self.polygon();
        let cutouts = self.cutout_list();
        CalculateTiles::new(&room, &cutouts, &self.tile_config, &self.grid_config)
            .with_params(self.fitting)
            .cells()
    }

    /// Re-runs tile fitting on the current state and stores the result.
    pub fn recalculate(&mut self) -> &CalculationResult {
        let room = self.polygon();
        let cutouts = self.cutout_list();
        let mut result = CalculateTiles::new(&room, &cutouts, &self.tile_config, &self.grid_config)
            .with_params(self.fitting)
            .execute();
        if let Some(price) = self.price_per_tile {
            result = result.with_price_per_tile(price);
        }
        self.calculation = result;
        &self.calculation
    }
}
