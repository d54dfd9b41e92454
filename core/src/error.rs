use thiserror::Error;

use crate::GridCoord;

/// Invalid arguments supplied while configuring a grid or requesting a path.
///
/// These errors surface immediately and are never retried.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigurationError {
    /// The border width was negative.
    #[error("border size must not be negative, got {0}")]
    NegativeBorder(i32),
    /// The requested grid holds fewer cells than the smallest supported grid.
    #[error("grid size {requested} is below the minimum of {minimum} cells")]
    GridTooSmall {
        /// Cell count requested by the caller.
        requested: u32,
        /// Smallest cell count the dimensioner accepts.
        minimum: u32,
    },
    /// The grid derived from the request would exceed the largest supported grid.
    #[error("grid of {min_grid_size} cells with border {border} exceeds the maximum of {maximum} cells")]
    GridTooLarge {
        /// Cell count requested by the caller.
        min_grid_size: u32,
        /// Border width in cells.
        border: i32,
        /// Largest cell count the dimensioner accepts.
        maximum: usize,
    },
    /// The viewport half size was not strictly positive and finite on both axes.
    #[error("viewport half size must be positive and finite, got {half_width} x {half_height}")]
    InvalidViewport {
        /// Requested half width of the viewport.
        half_width: f32,
        /// Requested half height of the viewport.
        half_height: f32,
    },
    /// The path width percentage was zero, negative or not a number.
    #[error("path width percentage is too low: {0}")]
    NonPositiveWidth(f32),
    /// A chunk was requested with a side shorter than one cell.
    #[error("chunk width must be at least one cell, got {0}")]
    NonPositiveChunkWidth(i32),
    /// The path type tag did not name a known path kind.
    #[error("path type unrecognized: {0}")]
    UnknownPathKind(String),
    /// The difficulty did not map to a path under the active schedule.
    #[error("difficulty not in usable range: {0}")]
    UnknownDifficulty(u32),
    /// The path is too wide to leave any usable area inside the border.
    #[error("path width of {path_width} cells leaves no usable area in a {columns} x {rows} grid with border {border}")]
    PathTooWide {
        /// Path width in cells.
        path_width: i32,
        /// Number of grid columns.
        columns: i32,
        /// Number of grid rows.
        rows: i32,
        /// Border width in cells.
        border: i32,
    },
    /// The backtrack detour could not be placed on this grid.
    #[error("requested backtrack topology infeasible for this grid/border/width combination after {attempts} attempts")]
    BacktrackInfeasible {
        /// Number of carving attempts made before giving up.
        attempts: u32,
    },
}

/// Violations of invariants that correct carving logic never produces.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InternalError {
    /// A cell outside the grid was addressed.
    #[error("cell {cell:?} does not exist in a {columns} x {rows} grid")]
    OutOfBounds {
        /// Coordinate that was addressed.
        cell: GridCoord,
        /// Number of grid columns.
        columns: i32,
        /// Number of grid rows.
        rows: i32,
    },
}

/// Umbrella error returned by every fallible map operation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MapError {
    /// Invalid configuration or request.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// Broken internal invariant; callers should fail fast.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl MapError {
    /// Reports whether the error stems from caller-provided configuration.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
