#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Map controller orchestrating one stage of map generation.
//!
//! The controller owns the [`CodeGrid`], the random generator and the active
//! [`BuilderTable`]. Each [`MapController::generate`] call resets the grid,
//! asks the [`PathSchedule`] which path to carve, carves it with the
//! [`PathPlanner`] and converts every cell into a [`CellEntity`].

use std::fmt;

use cellmaze_core::MapError;
use cellmaze_grid::{CodeGrid, GridDimensions};
use cellmaze_system_cell_builder::{BuilderTable, CellEntity};
use cellmaze_system_path_planner::{CarveReport, PathPlanner};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

mod config;
mod schedule;

pub use config::MapConfig;
pub use schedule::{DifficultySchedule, PathSchedule};

/// Output of a single generation pass.
#[derive(Clone, Debug)]
pub struct GeneratedMap {
    /// Centre of the start chunk in viewport space.
    pub spawn: Vec2,
    /// One entity per grid cell, column by column from the bottom-left cell.
    pub entities: Vec<CellEntity>,
    /// Details of the carved path.
    pub report: CarveReport,
}

impl GeneratedMap {
    /// Number of direction changes along the carved path.
    #[must_use]
    pub const fn turns(&self) -> u32 {
        self.report.turns
    }
}

/// Stateful generator for one map.
pub struct MapController<R = ChaCha8Rng> {
    grid: CodeGrid,
    planner: PathPlanner,
    schedule: Box<dyn PathSchedule>,
    builders: BuilderTable,
    rng: R,
}

impl MapController<ChaCha8Rng> {
    /// Creates a controller with the default schedule and a seeded generator.
    pub fn seeded(config: &MapConfig, seed: u64) -> Result<Self, MapError> {
        Self::new(config, DifficultySchedule, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a controller with the default schedule, seeded from the
    /// configuration or from the OS when no seed is configured.
    pub fn from_config(config: &MapConfig) -> Result<Self, MapError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::debug!(seed, "seeding map generator");
        Self::seeded(config, seed)
    }
}

impl<R: Rng> MapController<R> {
    /// Creates a controller, validating the configuration and sizing the grid.
    pub fn new(
        config: &MapConfig,
        schedule: impl PathSchedule + 'static,
        rng: R,
    ) -> Result<Self, MapError> {
        let dimensions = config.dimensions()?;

        Ok(Self {
            grid: CodeGrid::new(dimensions),
            planner: PathPlanner::new(config.planner_config()),
            schedule: Box::new(schedule),
            builders: BuilderTable::default(),
            rng,
        })
    }

    /// Replaces the builder table used by subsequent generations.
    pub fn set_builder_table(&mut self, builders: BuilderTable) {
        self.builders = builders;
    }

    /// Builder table used to convert cells into entities.
    #[must_use]
    pub const fn builder_table(&self) -> &BuilderTable {
        &self.builders
    }

    /// Grid as carved by the last generation.
    #[must_use]
    pub const fn grid(&self) -> &CodeGrid {
        &self.grid
    }

    /// Sizing of the controlled grid.
    #[must_use]
    pub const fn dimensions(&self) -> &GridDimensions {
        self.grid.dimensions()
    }

    /// Clears the grid back to filler.
    pub fn reset(&mut self) {
        self.grid.reset();
    }

    /// Generates the map for `difficulty` and `stage`.
    ///
    /// The grid is reset first, so a failed generation leaves at most a
    /// partially carved grid that the next call discards.
    pub fn generate(&mut self, difficulty: u32, stage: u32) -> Result<GeneratedMap, MapError> {
        self.grid.reset();

        let spec = self.schedule.path_for(difficulty, stage)?;
        let report = self.planner.apply_path(&mut self.grid, &spec, &mut self.rng)?;

        let cell_width = self.grid.dimensions().cell_width();
        let entities = self
            .grid
            .iter()
            .map(|(cell, code)| -> Result<CellEntity, MapError> {
                let position = self.grid.position_of(cell)?;
                Ok(self.builders.build(code, position, cell_width))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let centring = (report.path_width - 1) as f32 / 2.0 * cell_width;
        let spawn = self.grid.position_of(report.start)? + Vec2::splat(centring);

        tracing::info!(
            difficulty,
            stage,
            kind = %report.carved,
            entities = entities.len(),
            turns = report.turns,
            spawn_x = spawn.x,
            spawn_y = spawn.y,
            "generated map"
        );

        Ok(GeneratedMap {
            spawn,
            entities,
            report,
        })
    }
}

impl<R> fmt::Debug for MapController<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapController")
            .field("dimensions", self.grid.dimensions())
            .field("planner", &self.planner)
            .field("builders", &self.builders)
            .finish_non_exhaustive()
    }
}
