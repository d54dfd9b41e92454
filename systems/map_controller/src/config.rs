use cellmaze_core::MapError;
use cellmaze_grid::GridDimensions;
use cellmaze_system_path_planner::{Config as PlannerConfig, DEFAULT_MAX_BACKTRACK_ATTEMPTS};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Static per-map configuration.
///
/// Every field falls back to its default when missing from a serialized
/// configuration, so a partial file only lists what it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Half of the viewport width in world units.
    pub viewport_half_width: f32,
    /// Half of the viewport height in world units.
    pub viewport_half_height: f32,
    /// Lower bound on the number of cells inside the border.
    pub min_grid_size: u32,
    /// Number of cells kept free of the path on every edge.
    pub border_size: i32,
    /// Backtrack carving attempts before a stage is rejected.
    pub max_backtrack_attempts: u32,
    /// Seed for the map generator; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl MapConfig {
    /// Viewport half size as a vector.
    #[must_use]
    pub fn viewport_half_size(&self) -> Vec2 {
        Vec2::new(self.viewport_half_width, self.viewport_half_height)
    }

    /// Derives the grid sizing, validating the configuration.
    pub fn dimensions(&self) -> Result<GridDimensions, MapError> {
        GridDimensions::derive(self.viewport_half_size(), self.min_grid_size, self.border_size)
    }

    /// Path planner configuration matching this map.
    #[must_use]
    pub fn planner_config(&self) -> PlannerConfig {
        PlannerConfig::new(self.max_backtrack_attempts)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            viewport_half_width: 8.0,
            viewport_half_height: 4.5,
            min_grid_size: 1200,
            border_size: 2,
            max_backtrack_attempts: DEFAULT_MAX_BACKTRACK_ATTEMPTS,
            seed: None,
        }
    }
}
