//! Derives grid cell counts and cell size from the viewport.

use cellmaze_core::{
    ConfigurationError, GridCoord, MapError, RegionBox, RegionSize, LARGEST_GRID_SIZE,
    SMALLEST_GRID_SIZE,
};
use glam::Vec2;

/// Immutable sizing of a grid that covers the viewport without gaps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDimensions {
    columns: i32,
    rows: i32,
    border: i32,
    cell_width: f32,
    horizontal_offset: f32,
    vertical_offset: f32,
}

impl GridDimensions {
    /// Dimensions a grid for the viewport described by `viewport_half_size`.
    ///
    /// `min_grid_size` is the number of cells the interior must at least hold
    /// and `border` reserves that many cells on every side. Both cell counts
    /// are rounded up, so the square cell width is the larger of the two
    /// per-axis fits and the grid may overshoot the viewport on one axis.
    ///
    /// Grids holding more than [`LARGEST_GRID_SIZE`] cells are rejected with
    /// [`ConfigurationError::GridTooLarge`].
    pub fn derive(viewport_half_size: Vec2, min_grid_size: u32, border: i32) -> Result<Self, MapError> {
        if border < 0 {
            return Err(ConfigurationError::NegativeBorder(border).into());
        }
        if min_grid_size < SMALLEST_GRID_SIZE {
            return Err(ConfigurationError::GridTooSmall {
                requested: min_grid_size,
                minimum: SMALLEST_GRID_SIZE,
            }
            .into());
        }
        // NaN fails both comparisons.
        if !(viewport_half_size.x > 0.0
            && viewport_half_size.y > 0.0
            && viewport_half_size.is_finite())
        {
            return Err(ConfigurationError::InvalidViewport {
                half_width: viewport_half_size.x,
                half_height: viewport_half_size.y,
            }
            .into());
        }

        // cells = x * y and aspect = y / x, so cells * aspect = y^2.
        let aspect = viewport_half_size.y / viewport_half_size.x;
        let raw_rows = (min_grid_size as f32 * aspect).sqrt();
        let raw_columns = min_grid_size as f32 / raw_rows;

        let too_large = || {
            MapError::from(ConfigurationError::GridTooLarge {
                min_grid_size,
                border,
                maximum: LARGEST_GRID_SIZE,
            })
        };
        let margin = border.checked_mul(2).ok_or_else(too_large)?;
        let rows = whole_cells(raw_rows)
            .and_then(|rows| rows.checked_add(margin))
            .ok_or_else(too_large)?;
        let columns = whole_cells(raw_columns)
            .and_then(|columns| columns.checked_add(margin))
            .ok_or_else(too_large)?;
        let cells = usize::try_from(columns)
            .ok()
            .zip(usize::try_from(rows).ok())
            .and_then(|(columns, rows)| columns.checked_mul(rows))
            .ok_or_else(too_large)?;
        if cells > LARGEST_GRID_SIZE {
            return Err(too_large());
        }

        let vertical_fit = viewport_half_size.y * 2.0 / rows as f32;
        let horizontal_fit = viewport_half_size.x * 2.0 / columns as f32;
        let cell_width = vertical_fit.max(horizontal_fit);

        let dimensions = Self {
            columns,
            rows,
            border,
            cell_width,
            horizontal_offset: cell_width * (columns as f32 - 1.0) / 2.0,
            vertical_offset: cell_width * (rows as f32 - 1.0) / 2.0,
        };

        tracing::debug!(
            columns,
            rows,
            border,
            cell_width,
            "dimensioned cell grid"
        );

        Ok(dimensions)
    }

    /// Number of cells spanning the viewport horizontally, borders included.
    #[must_use]
    pub const fn columns(&self) -> i32 {
        self.columns
    }

    /// Number of cells spanning the viewport vertically, borders included.
    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    /// Width of the margin, in cells, where paths are never carved.
    #[must_use]
    pub const fn border(&self) -> i32 {
        self.border
    }

    /// Side length of a square cell in viewport units.
    #[must_use]
    pub const fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Distance from the viewport centre to the centre of column zero.
    #[must_use]
    pub const fn horizontal_offset(&self) -> f32 {
        self.horizontal_offset
    }

    /// Distance from the viewport centre to the centre of row zero.
    #[must_use]
    pub const fn vertical_offset(&self) -> f32 {
        self.vertical_offset
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Region covering every cell of the grid.
    #[must_use]
    pub fn bounds(&self) -> RegionBox {
        RegionBox::from_origin_and_size(GridCoord::new(0, 0), RegionSize::new(self.columns, self.rows))
            .unwrap_or_else(|| RegionBox::unit(GridCoord::new(0, 0)))
    }
}

/// Rounds a raw cell count up, or `None` when it does not fit an `i32`.
fn whole_cells(raw: f32) -> Option<i32> {
    let rounded = raw.ceil();
    (rounded.is_finite() && rounded >= 1.0 && rounded < i32::MAX as f32).then(|| rounded as i32)
}
