#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Path planning system that carves walkable channels into a code grid.
//!
//! The planner turns a [`PathSpec`] into a list of [`Transform`] steps between
//! two anchors, walks them across the [`CodeGrid`] applying one chunk per
//! step, and finally marks the end chunk as [`CellCode::Trigger`].

use cellmaze_core::{
    Anchor, Axis, CellCode, ConfigurationError, GridCoord, MapError, PathKind, PathSpec,
    RegionBox, RegionSize, Transform,
};
use cellmaze_grid::CodeGrid;
use rand::{seq::SliceRandom, Rng};

mod anchors;
mod carving;

pub use anchors::{path_width, AnchorSet};
pub use carving::apply_cell_group;

use carving::{push_axis_transforms, walk};

/// Default number of backtrack carving attempts before giving up.
pub const DEFAULT_MAX_BACKTRACK_ATTEMPTS: u32 = 64;

/// Horizontal cells, in path widths, consumed by the backtrack detour.
const DETOUR_SPAN_IN_WIDTHS: i32 = 4;

/// Configuration parameters required to construct the path planner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    max_backtrack_attempts: u32,
}

impl Config {
    /// Creates a new configuration bounding the backtrack retries.
    #[must_use]
    pub const fn new(max_backtrack_attempts: u32) -> Self {
        Self {
            max_backtrack_attempts,
        }
    }

    /// Maximum number of backtrack carving attempts.
    #[must_use]
    pub const fn max_backtrack_attempts(&self) -> u32 {
        self.max_backtrack_attempts
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BACKTRACK_ATTEMPTS)
    }
}

/// Summary of a single carved path.
#[derive(Clone, Debug, PartialEq)]
pub struct CarveReport {
    /// Path kind the caller asked for.
    pub requested: PathKind,
    /// Path kind that was actually carved.
    pub carved: PathKind,
    /// Anchor the path started from.
    pub start_anchor: Anchor,
    /// Anchor the path ended at.
    pub end_anchor: Anchor,
    /// Bottom-left cell of the first chunk.
    pub start: GridCoord,
    /// Bottom-left cell of the final (trigger) chunk.
    pub end: GridCoord,
    /// Path width in cells.
    pub path_width: i32,
    /// Transforms in the order they were walked, detour included.
    pub transforms: Vec<Transform>,
    /// Origin-list index of the first detour chunk, for backtrack paths.
    pub detour_origin: Option<usize>,
    /// Number of carving attempts, counting the successful one.
    pub attempts: u32,
    /// Number of direction changes along the path.
    pub turns: u32,
}

impl CarveReport {
    /// Reports whether a backtrack request silently degraded to a direct path.
    #[must_use]
    pub fn fell_back(&self) -> bool {
        self.requested != self.carved
    }

    /// Region covered by the first chunk.
    #[must_use]
    pub fn start_region(&self) -> RegionBox {
        chunk_region(self.start, self.path_width)
    }

    /// Region covered by the final chunk.
    #[must_use]
    pub fn end_region(&self) -> RegionBox {
        chunk_region(self.end, self.path_width)
    }
}

/// Carved path before finalisation.
struct Carving {
    carved: PathKind,
    transforms: Vec<Transform>,
    detour_origin: Option<usize>,
    attempts: u32,
}

/// Pure system that carves direct and backtracking paths.
#[derive(Clone, Debug, Default)]
pub struct PathPlanner {
    config: Config,
}

impl PathPlanner {
    /// Creates a new path planner using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration the planner was created with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Carves the path described by `spec` into `grid` and marks its end chunk
    /// as a trigger.
    ///
    /// Anchors left unspecified are drawn uniformly from `rng`, start first.
    /// The grid is carved in place; callers reset it beforehand when a fresh
    /// map is wanted.
    pub fn apply_path<R: Rng>(
        &self,
        grid: &mut CodeGrid,
        spec: &PathSpec,
        rng: &mut R,
    ) -> Result<CarveReport, MapError> {
        let path_width = path_width(spec.width_percentage, grid.dimensions().rows())?;
        let anchors = AnchorSet::compute(grid.dimensions(), path_width)?;

        let start_anchor = spec.start.unwrap_or_else(|| random_anchor(rng));
        let end_anchor = spec.end.unwrap_or_else(|| random_anchor(rng));
        let start = anchors.start(start_anchor);
        let end = anchors.end(end_anchor);

        tracing::debug!(
            ?start_anchor,
            ?end_anchor,
            ?start,
            ?end,
            path_width,
            "selected path anchors"
        );

        let carving = match spec.kind {
            PathKind::Direct => self.carve_direct(grid, start, end, path_width, rng)?,
            PathKind::Backtrack => self.carve_backtrack(grid, start, end, path_width, rng)?,
        };

        set_end_to_trigger(grid, end, path_width)?;

        let report = CarveReport {
            requested: spec.kind,
            carved: carving.carved,
            start_anchor,
            end_anchor,
            start,
            end,
            path_width,
            transforms: carving.transforms,
            detour_origin: carving.detour_origin,
            attempts: carving.attempts,
            turns: grid.turns(),
        };

        tracing::info!(
            requested = %report.requested,
            carved = %report.carved,
            path_width,
            turns = report.turns,
            attempts = report.attempts,
            "carved path"
        );

        Ok(report)
    }

    fn carve_direct<R: Rng>(
        &self,
        grid: &mut CodeGrid,
        start: GridCoord,
        end: GridCoord,
        width: i32,
        rng: &mut R,
    ) -> Result<Carving, MapError> {
        let mut transforms = Vec::new();
        push_axis_transforms(&mut transforms, Axis::Horizontal, end.column() - start.column(), width);
        push_axis_transforms(&mut transforms, Axis::Vertical, end.row() - start.row(), width);
        transforms.shuffle(rng);

        let walked = walk(grid, start, &mut transforms, width, None)?;
        debug_assert_eq!(walked.end, end, "direct path must finish on the end anchor");

        Ok(Carving {
            carved: PathKind::Direct,
            transforms,
            detour_origin: None,
            attempts: 1,
        })
    }

    /// Carves a direct path that undershoots the end horizontally by the
    /// detour span, splicing the detour in once the walk enters the insertion
    /// window.
    ///
    /// Falls back to a direct path when the anchors leave too little room to
    /// the right or above. Each failed attempt resets the grid; after
    /// `max_backtrack_attempts` failures the grid is reset once more and the
    /// request is rejected as infeasible.
    fn carve_backtrack<R: Rng>(
        &self,
        grid: &mut CodeGrid,
        start: GridCoord,
        end: GridCoord,
        width: i32,
        rng: &mut R,
    ) -> Result<Carving, MapError> {
        let removal = DETOUR_SPAN_IN_WIDTHS * width;
        let normal_columns = end.column() - start.column() - removal;
        let normal_rows = end.row() - start.row();

        if normal_columns <= 0 || normal_rows <= removal / 2 {
            tracing::warn!(
                normal_columns,
                normal_rows,
                removal,
                "grid too small for a backtrack detour, carving a direct path instead"
            );
            return self.carve_direct(grid, start, end, width, rng);
        }

        let minimum = grid.dimensions().border() + width;
        let Some(window) = RegionBox::from_corners(
            GridCoord::new(minimum, minimum),
            GridCoord::new(end.column() - removal - 1, end.row() - removal / 2 - 1),
        ) else {
            tracing::warn!(minimum, ?end, removal, "backtrack insertion window is empty");
            return Err(ConfigurationError::BacktrackInfeasible { attempts: 0 }.into());
        };

        for attempt in 1..=self.config.max_backtrack_attempts {
            if attempt > 1 {
                grid.reset();
            }

            let mut transforms = Vec::new();
            push_axis_transforms(&mut transforms, Axis::Horizontal, normal_columns, width);
            push_axis_transforms(&mut transforms, Axis::Vertical, normal_rows, width);
            transforms.shuffle(rng);

            let walked = walk(grid, start, &mut transforms, width, Some(&window))?;
            if let Some(detour_origin) = walked.detour_origin {
                debug_assert_eq!(walked.end, end, "backtrack path must finish on the end anchor");
                return Ok(Carving {
                    carved: PathKind::Backtrack,
                    transforms,
                    detour_origin: Some(detour_origin),
                    attempts: attempt,
                });
            }

            tracing::debug!(attempt, "backtrack walk never entered the insertion window");
        }

        let attempts = self.config.max_backtrack_attempts;
        if attempts > 0 {
            // Drop the last failed walk so no partial path survives the error.
            grid.reset();
        }
        tracing::warn!(attempts, "backtrack generation exhausted its attempts");
        Err(ConfigurationError::BacktrackInfeasible { attempts }.into())
    }
}

/// Overwrites the end chunk with trigger cells regardless of merge precedence.
fn set_end_to_trigger(grid: &mut CodeGrid, end: GridCoord, width: i32) -> Result<(), MapError> {
    grid.force_write_region(&chunk_region(end, width), CellCode::Trigger)
}

fn chunk_region(origin: GridCoord, width: i32) -> RegionBox {
    RegionBox::from_origin_and_size(origin, RegionSize::square(width))
        .unwrap_or_else(|| RegionBox::unit(origin))
}

fn random_anchor<R: Rng>(rng: &mut R) -> Anchor {
    Anchor::ALL[rng.gen_range(0..Anchor::ALL.len())]
}

#[cfg(test)]
mod tests {
    use cellmaze_grid::{query, GridDimensions};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    /// 24 x 24 cells with a border of two.
    fn grid() -> CodeGrid {
        grid_holding(400)
    }

    fn grid_holding(min_grid_size: u32) -> CodeGrid {
        CodeGrid::new(
            GridDimensions::derive(Vec2::new(10.0, 10.0), min_grid_size, 2).expect("valid input"),
        )
    }

    #[test]
    fn direct_path_ends_on_a_trigger_chunk() {
        let mut grid = grid();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let spec = PathSpec::new(
            PathKind::Direct,
            0.16,
            Some(Anchor::BottomCorner),
            Some(Anchor::TopCorner),
        );

        let report = PathPlanner::default()
            .apply_path(&mut grid, &spec, &mut rng)
            .expect("path fits");

        assert_eq!(report.carved, PathKind::Direct);
        assert_eq!(report.path_width, 4);
        assert_eq!(report.start, GridCoord::new(3, 3));
        assert_eq!(report.end, GridCoord::new(17, 17));
        assert_eq!(query::count_code(&grid, CellCode::Trigger), 16);
        for cell in report.end_region().cells() {
            assert_eq!(grid.get(cell), Ok(CellCode::Trigger));
        }
        // 14 columns and 14 rows in chunks of four: 4 + 4 transforms.
        assert_eq!(report.transforms.len(), 8);
        assert_eq!(grid.origins().len(), 9);
        assert!(report.turns >= 1 && report.turns <= 8);
    }

    #[test]
    fn non_positive_width_is_rejected_before_carving() {
        let mut grid = grid();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let spec = PathSpec::new(PathKind::Direct, 0.0, None, None);

        let error = PathPlanner::default()
            .apply_path(&mut grid, &spec, &mut rng)
            .expect_err("zero width");

        assert_eq!(error, ConfigurationError::NonPositiveWidth(0.0).into());
        assert_eq!(query::count_code(&grid, CellCode::Filler), 24 * 24);
    }

    #[test]
    fn backtrack_path_contains_the_detour() {
        // 32 x 32 cells: wide enough for the detour at a width of four.
        let mut grid = grid_holding(784);
        let mut rng = ChaCha8Rng::seed_from_u64(0xba_c7_7a_c4);
        let spec = PathSpec::new(
            PathKind::Backtrack,
            0.12,
            Some(Anchor::BottomCorner),
            Some(Anchor::TopCorner),
        );

        let report = PathPlanner::default()
            .apply_path(&mut grid, &spec, &mut rng)
            .expect("backtrack fits a 32 x 32 grid");

        assert_eq!(report.carved, PathKind::Backtrack);
        assert!(!report.fell_back());
        assert!(report.detour_origin.is_some());
        assert!(report
            .transforms
            .iter()
            .any(|transform| transform.axis() == Axis::Vertical && transform.distance() < 0));
    }

    #[test]
    fn zero_attempts_reject_backtracking() {
        let mut grid = grid();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let planner = PathPlanner::new(Config::new(0));
        let spec = PathSpec::new(
            PathKind::Backtrack,
            0.12,
            Some(Anchor::BottomCorner),
            Some(Anchor::TopCorner),
        );

        assert_eq!(
            planner.apply_path(&mut grid, &spec, &mut rng),
            Err(ConfigurationError::BacktrackInfeasible { attempts: 0 }.into())
        );
    }
}
