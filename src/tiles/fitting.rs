use super::{
    CalculationResult, Cutout, Dimensions, FittingParams, GridConfig, TileCell, TileConfig,
};
use crate::math::polygon_2d::{point_in_polygon, polygon_area, polygon_bounds};
use crate::math::Point2;

/// Estimates how many tiles cover a room.
///
/// The room bounding box, grown by one tile on every side, is split into a
/// grid of tile-sized cells. Each cell's coverage is sampled on an n×n
/// lattice; cells below [`FittingParams::min_coverage`] are dropped and the
/// rest are full or partial tiles. Inputs are only read, never modified.
#[derive(Debug)]
pub struct CalculateTiles<'a> {
    room: &'a [Point2],
    cutouts: &'a [Cutout],
    tile_config: &'a TileConfig,
    grid_config: &'a GridConfig,
    params: FittingParams,
}

impl<'a> CalculateTiles<'a> {
    /// Creates a new fitting operation with default sampling parameters.
    #[must_use]
    pub fn new(
        room: &'a [Point2],
        cutouts: &'a [Cutout],
        tile_config: &'a TileConfig,
        grid_config: &'a GridConfig,
    ) -> Self {
        Self {
            room,
            cutouts,
            tile_config,
            grid_config,
            params: FittingParams::default(),
        }
    }

    /// Sets custom sampling parameters.
    #[must_use]
    pub fn with_params(mut self, params: FittingParams) -> Self {
        self.params = params;
        self
    }

    /// Returns the retained cells with their coverage and classification.
    #[must_use]
    pub fn cells(&self) -> Vec<TileCell> {
        let tile = self.tile_config.dimensions();
        generate_tile_grid(self.room, tile, self.grid_config)
            .into_iter()
            .filter_map(|mut cell| {
                let coverage =
                    tile_coverage(&cell, self.room, self.cutouts, self.params.samples_per_axis);
                if coverage < self.params.min_coverage {
                    return None;
                }
                cell.coverage = coverage;
                cell.is_full = coverage >= self.params.full_coverage;
                Some(cell)
            })
            .collect()
    }

    /// Executes the fitting, returning counts, areas and waste.
    #[must_use]
    pub fn execute(&self) -> CalculationResult {
        let tile_area = self.tile_config.dimensions().area();
        let area = polygon_area(self.room);

        let cells = self.cells();
        let full_tiles = cells.iter().filter(|c| c.is_full).count();
        let partial_tiles = cells.len() - full_tiles;
        let total_tiles = full_tiles + partial_tiles;
        // Partial cells are bought as whole tiles.
        let estimated_total = full_tiles + partial_tiles;

        #[allow(clippy::cast_precision_loss)]
        let purchased_area = estimated_total as f64 * tile_area;
        let waste = waste_factor(purchased_area, area);

        tracing::debug!(
            full_tiles,
            partial_tiles,
            estimated_total,
            area,
            waste,
            "tile fitting complete"
        );

        CalculationResult {
            total_tiles,
            full_tiles,
            partial_tiles,
            estimated_total,
            area,
            tile_area,
            waste_factor: waste,
            cost_estimate: None,
        }
    }
}

/// Fits tiles with default sampling parameters.
#[must_use]
pub fn calculate_tiles(
    room: &[Point2],
    cutouts: &[Cutout],
    tile_config: &TileConfig,
    grid_config: &GridConfig,
) -> CalculationResult {
    CalculateTiles::new(room, cutouts, tile_config, grid_config).execute()
}

/// Lays tile-sized cells over the room's bounding box extended by one tile
/// on each side, shifted by the grid offset.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn generate_tile_grid(room: &[Point2], tile: Dimensions, grid: &GridConfig) -> Vec<TileCell> {
    let (w, h) = (tile.width, tile.height);
    if w <= 0.0 || h <= 0.0 {
        return Vec::new();
    }

    // Offsets only matter modulo the tile size.
    let bounds = polygon_bounds(room);
    let start_x = ((bounds.min_x - w) / w).floor() * w + grid.offset_x.rem_euclid(w);
    let start_y = ((bounds.min_y - h) / h).floor() * h + grid.offset_y.rem_euclid(h);
    let end_x = ((bounds.max_x + w) / w).ceil() * w;
    let end_y = ((bounds.max_y + h) / h).ceil() * h;

    let columns = steps_before(start_x, end_x, w);
    let rows = steps_before(start_y, end_y, h);

    let mut cells = Vec::with_capacity(columns * rows);
    for i in 0..columns {
        let x = start_x + i as f64 * w;
        for j in 0..rows {
            let y = start_y + j as f64 * h;
            cells.push(TileCell {
                x,
                y,
                width: w,
                height: h,
                coverage: 0.0,
                is_full: false,
            });
        }
    }
    cells
}

/// Number of values `start + k * step` that are strictly below `end`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn steps_before(start: f64, end: f64, step: f64) -> usize {
    let count = ((end - start) / step).ceil();
    if count.is_finite() {
        count.max(0.0) as usize
    } else {
        0
    }
}

/// Fraction of `samples × samples` lattice points in `cell` that lie inside
/// the room and outside every cutout.
#[must_use]
pub fn tile_coverage(cell: &TileCell, room: &[Point2], cutouts: &[Cutout], samples: u32) -> f64 {
    if samples == 0 {
        return 0.0;
    }
    let n = f64::from(samples);
    let step_x = cell.width / n;
    let step_y = cell.height / n;

    let mut covered = 0_u32;
    for i in 0..samples {
        for j in 0..samples {
            let sample = Point2::new(
                cell.x + (f64::from(i) + 0.5) * step_x,
                cell.y + (f64::from(j) + 0.5) * step_y,
            );
            if point_in_room(&sample, room, cutouts) {
                covered += 1;
            }
        }
    }
    f64::from(covered) / (n * n)
}

fn point_in_room(point: &Point2, room: &[Point2], cutouts: &[Cutout]) -> bool {
    point_in_polygon(point, room) && !cutouts.iter().any(|c| c.contains(point))
}

/// Percentage by which `total_tile_area` exceeds `room_area`, floored at 0.
/// An empty room has no waste.
#[must_use]
pub fn waste_factor(total_tile_area: f64, room_area: f64) -> f64 {
    if room_area <= 0.0 {
        return 0.0;
    }
    ((total_tile_area - room_area) / room_area * 100.0).max(0.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tiles::{TileOrientation, TileSize};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn rect(w: f64, h: f64) -> Vec<Point2> {
        vec![p(0.0, 0.0), p(w, 0.0), p(w, h), p(0.0, h)]
    }

    fn two_by_two() -> TileConfig {
        TileConfig::new(TileSize::TwoByTwo, TileOrientation::Horizontal)
    }

    #[test]
    fn exact_fit_has_no_waste() {
        let r = calculate_tiles(&rect(10.0, 8.0), &[], &two_by_two(), &GridConfig::default());
        assert_relative_eq!(r.area, 80.0);
        assert_relative_eq!(r.tile_area, 4.0);
        assert_eq!(r.full_tiles, 20);
        assert_eq!(r.partial_tiles, 0);
        assert_eq!(r.estimated_total, 20);
        assert_relative_eq!(r.waste_factor, 0.0);
        assert!(r.cost_estimate.is_none());
    }

    #[test]
    fn two_by_four_tiles() {
        let config = TileConfig::new(TileSize::TwoByFour, TileOrientation::Horizontal);
        let r = calculate_tiles(&rect(12.0, 8.0), &[], &config, &GridConfig::default());
        assert_relative_eq!(r.area, 96.0);
        assert_relative_eq!(r.tile_area, 8.0);
        assert_eq!(r.estimated_total, 12);
    }

    #[test]
    fn rotated_two_by_four_tiles() {
        let config = TileConfig::new(TileSize::TwoByFour, TileOrientation::Vertical);
        let r = calculate_tiles(&rect(8.0, 12.0), &[], &config, &GridConfig::default());
        assert_relative_eq!(r.tile_area, 8.0);
        assert_eq!(r.estimated_total, 12);
        assert_eq!(r.partial_tiles, 0);
    }

    #[test]
    fn odd_room_has_partial_tiles() {
        let r = calculate_tiles(&rect(9.0, 7.0), &[], &two_by_two(), &GridConfig::default());
        assert_relative_eq!(r.area, 63.0);
        // 4×3 full cells, plus a half-covered column, row and corner.
        assert_eq!(r.full_tiles, 12);
        assert_eq!(r.partial_tiles, 8);
        assert!(r.full_tiles < r.estimated_total);
        assert!(r.waste_factor > 0.0);
    }

    #[test]
    fn estimated_total_is_cell_count() {
        let r = calculate_tiles(&rect(9.0, 7.0), &[], &two_by_two(), &GridConfig::default());
        assert_eq!(r.estimated_total, r.total_tiles);
        assert_eq!(r.total_tiles, r.full_tiles + r.partial_tiles);
    }

    #[test]
    fn l_shape_room() {
        let l = vec![
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(10.0, 6.0),
            p(14.0, 6.0),
            p(14.0, 9.0),
            p(0.0, 9.0),
        ];
        let r = calculate_tiles(&l, &[], &two_by_two(), &GridConfig::default());
        assert_relative_eq!(r.area, 102.0);
        assert!(r.estimated_total > 0);
        assert_eq!(r.total_tiles, r.full_tiles + r.partial_tiles);
    }

    #[test]
    fn cutout_removes_tiles() {
        let room = rect(10.0, 8.0);
        let cutout = Cutout::rectangle(p(2.0, 2.0), Dimensions::new(4.0, 4.0));
        let grid = GridConfig::default();
        let with = calculate_tiles(&room, &[cutout], &two_by_two(), &grid);
        let without = calculate_tiles(&room, &[], &two_by_two(), &grid);
        assert!(with.total_tiles < without.total_tiles);
        assert_eq!(with.total_tiles, 16);
    }

    #[test]
    fn tiny_room_still_needs_a_tile() {
        let r = calculate_tiles(&rect(1.0, 1.0), &[], &two_by_two(), &GridConfig::default());
        assert_relative_eq!(r.area, 1.0);
        assert_eq!(r.estimated_total, 1);
        assert_relative_eq!(r.waste_factor, 300.0);
    }

    #[test]
    fn empty_room_is_all_zero() {
        let r = calculate_tiles(&[], &[], &two_by_two(), &GridConfig::default());
        assert_relative_eq!(r.area, 0.0);
        assert_eq!(r.total_tiles, 0);
        assert_eq!(r.estimated_total, 0);
        assert_relative_eq!(r.waste_factor, 0.0);
    }

    #[test]
    fn large_room_is_reasonable() {
        let r = calculate_tiles(&rect(20.0, 15.0), &[], &two_by_two(), &GridConfig::default());
        assert_relative_eq!(r.area, 300.0);
        assert!(r.total_tiles > 0);
        assert!(r.estimated_total >= r.total_tiles);
        assert!(r.waste_factor >= 0.0 && r.waste_factor < 100.0);
    }

    #[test]
    fn grid_offset_shifts_cells() {
        let grid = GridConfig {
            offset_x: 1.0,
            ..GridConfig::default()
        };
        let r = calculate_tiles(&rect(10.0, 8.0), &[], &two_by_two(), &grid);
        // Columns now straddle both side walls: 4 full + 2 half columns.
        assert_eq!(r.full_tiles, 16);
        assert_eq!(r.partial_tiles, 8);
    }

    #[test]
    fn large_offsets_wrap_to_tile_size() {
        let room = rect(10.0, 8.0);
        let tile = Dimensions::new(2.0, 2.0);
        let near = GridConfig {
            offset_x: 1.0,
            ..GridConfig::default()
        };
        let far = GridConfig {
            offset_x: -1e9 + 1.0,
            offset_y: 4e9,
            ..GridConfig::default()
        };
        let near_cells = generate_tile_grid(&room, tile, &near);
        let far_cells = generate_tile_grid(&room, tile, &far);
        assert_eq!(near_cells.len(), far_cells.len());
        assert_relative_eq!(far_cells[0].x, near_cells[0].x);
        assert_relative_eq!(far_cells[0].y, -2.0);

        let r = calculate_tiles(&room, &[], &two_by_two(), &far);
        assert_eq!(r.full_tiles, 16);
        assert_eq!(r.partial_tiles, 8);
    }

    #[test]
    fn grid_extends_one_tile_past_bounds() {
        let cells = generate_tile_grid(
            &rect(10.0, 8.0),
            Dimensions::new(2.0, 2.0),
            &GridConfig::default(),
        );
        // x from -2 to 10, y from -2 to 8.
        assert_eq!(cells.len(), 7 * 6);
        assert_relative_eq!(cells[0].x, -2.0);
        assert_relative_eq!(cells[0].y, -2.0);
    }

    #[test]
    fn coverage_sampling() {
        let room = rect(1.0, 2.0);
        let cell = TileCell {
            x: 0.0,
            y: 0.0,
            width: 2.0,
            height: 2.0,
            coverage: 0.0,
            is_full: false,
        };
        assert_relative_eq!(tile_coverage(&cell, &room, &[], 10), 0.5);
        assert_relative_eq!(tile_coverage(&cell, &room, &[], 0), 0.0);
    }

    #[test]
    fn custom_thresholds() {
        let room = rect(9.0, 7.0);
        let config = two_by_two();
        let grid = GridConfig::default();
        let strict = CalculateTiles::new(&room, &[], &config, &grid)
            .with_params(FittingParams {
                min_coverage: 0.5,
                ..FittingParams::default()
            })
            .execute();
        // The quarter-covered corner cell falls under the raised threshold.
        assert_eq!(strict.partial_tiles, 7);
    }

    #[test]
    fn waste_factor_edges() {
        assert_relative_eq!(waste_factor(100.0, 0.0), 0.0);
        assert_relative_eq!(waste_factor(80.0, 100.0), 0.0);
        assert_relative_eq!(waste_factor(120.0, 100.0), 20.0);
    }

    fn l_shape(w1: f64, h1: f64, w2: f64, h2: f64) -> Vec<Point2> {
        vec![
            p(0.0, 0.0),
            p(w1, 0.0),
            p(w1, h1),
            p(w1 + w2, h1),
            p(w1 + w2, h1 + h2),
            p(0.0, h1 + h2),
        ]
    }

    fn tile_config() -> impl Strategy<Value = TileConfig> {
        (
            prop_oneof![Just(TileSize::TwoByTwo), Just(TileSize::TwoByFour)],
            prop_oneof![Just(TileOrientation::Horizontal), Just(TileOrientation::Vertical)],
        )
            .prop_map(|(size, orientation)| TileConfig::new(size, orientation))
    }

    fn room_outline() -> impl Strategy<Value = Vec<Point2>> {
        prop_oneof![
            (1.0f64..30.0, 1.0f64..30.0).prop_map(|(w, h)| rect(w, h)),
            prop::array::uniform4(0.5f64..15.0).prop_map(|d| l_shape(d[0], d[1], d[2], d[3])),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn estimate_covers_every_counted_tile(
            room in room_outline(),
            config in tile_config(),
            offset_x in -5.0f64..5.0,
            offset_y in -5.0f64..5.0,
        ) {
            let grid = GridConfig {
                offset_x,
                offset_y,
                ..GridConfig::default()
            };
            let r = calculate_tiles(&room, &[], &config, &grid);
            prop_assert!(r.area > 0.0);
            prop_assert!(r.estimated_total >= r.total_tiles);
            prop_assert_eq!(r.total_tiles, r.full_tiles + r.partial_tiles);
            prop_assert!(r.waste_factor >= 0.0);
        }
    }
}
