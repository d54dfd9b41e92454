#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative cell grid state for cellmaze.
//!
//! [`GridDimensions`] sizes the grid once per viewport; [`CodeGrid`] holds the
//! mutable cell codes that the path planner carves into and the cell builders
//! read back out.

use cellmaze_core::{CellCode, GridCoord, InternalError, MapError, RegionBox};
use glam::Vec2;

mod dimensions;

pub use dimensions::GridDimensions;

/// Two dimensional array of cell codes plus the carving bookkeeping.
///
/// Cells are stored column by column. Every cell starts as
/// [`CellCode::Filler`]; carving only ever lowers a cell's rank through
/// [`CodeGrid::merge_write`], except for the final forced trigger overwrite.
#[derive(Clone, Debug)]
pub struct CodeGrid {
    dimensions: GridDimensions,
    cells: Vec<CellCode>,
    origins: Vec<GridCoord>,
    turns: u32,
}

impl CodeGrid {
    /// Creates a grid filled with [`CellCode::Filler`].
    #[must_use]
    pub fn new(dimensions: GridDimensions) -> Self {
        Self {
            cells: vec![CellCode::Filler; dimensions.cell_count()],
            origins: Vec::new(),
            turns: 0,
            dimensions,
        }
    }

    /// Sizing the grid was created with.
    #[must_use]
    pub const fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    /// Refills every cell with [`CellCode::Filler`] and clears the turn counter
    /// and the chunk origin list.
    pub fn reset(&mut self) {
        self.cells.fill(CellCode::Filler);
        self.origins.clear();
        self.turns = 0;
    }

    /// Code stored at the provided cell.
    pub fn get(&self, cell: GridCoord) -> Result<CellCode, MapError> {
        let index = self.index(cell)?;
        Ok(self.cells[index])
    }

    /// Writes `code` unless the cell already holds a code of lower rank.
    pub fn merge_write(&mut self, cell: GridCoord, code: CellCode) -> Result<(), MapError> {
        let index = self.index(cell)?;
        self.cells[index] = self.cells[index].prevailing(code);
        Ok(())
    }

    /// Overwrites every cell of `region` with `code`, bypassing merge precedence.
    ///
    /// The region must lie entirely inside the grid; nothing is written otherwise.
    pub fn force_write_region(&mut self, region: &RegionBox, code: CellCode) -> Result<(), MapError> {
        if !self.dimensions.bounds().contains_box(region) {
            return Err(self.out_of_bounds(region.top_right()));
        }

        for cell in region.cells() {
            let index = self.index(cell)?;
            self.cells[index] = code;
        }
        Ok(())
    }

    /// Viewport position of the centre of `cell`.
    ///
    /// Column zero sits at the left edge and row zero at the bottom edge, with
    /// the grid centred on the viewport origin.
    pub fn position_of(&self, cell: GridCoord) -> Result<Vec2, MapError> {
        let _ = self.index(cell)?;
        let width = self.dimensions.cell_width();
        Ok(Vec2::new(
            -self.dimensions.horizontal_offset() + cell.column() as f32 * width,
            -self.dimensions.vertical_offset() + cell.row() as f32 * width,
        ))
    }

    /// Records the bottom-left cell of a carved chunk.
    pub fn record_origin(&mut self, origin: GridCoord) {
        self.origins.push(origin);
    }

    /// Bottom-left cells of every carved chunk in carving order.
    #[must_use]
    pub fn origins(&self) -> &[GridCoord] {
        &self.origins
    }

    /// Counts a change of carving direction.
    pub fn record_turn(&mut self) {
        self.turns = self.turns.saturating_add(1);
    }

    /// Number of direction changes carved since the last reset.
    #[must_use]
    pub const fn turns(&self) -> u32 {
        self.turns
    }

    /// Iterates every cell and its code column by column.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, CellCode)> + '_ {
        self.dimensions.bounds().cells().zip(self.cells.iter().copied())
    }

    fn index(&self, cell: GridCoord) -> Result<usize, MapError> {
        let columns = self.dimensions.columns();
        let rows = self.dimensions.rows();
        if cell.column() < 0 || cell.row() < 0 || cell.column() >= columns || cell.row() >= rows {
            return Err(self.out_of_bounds(cell));
        }

        Ok(cell.column() as usize * rows as usize + cell.row() as usize)
    }

    fn out_of_bounds(&self, cell: GridCoord) -> MapError {
        InternalError::OutOfBounds {
            cell,
            columns: self.dimensions.columns(),
            rows: self.dimensions.rows(),
        }
        .into()
    }
}

/// Read-only queries over a carved grid.
pub mod query {
    use std::collections::{HashSet, VecDeque};

    use cellmaze_core::{CellCode, GridCoord, RegionBox};

    use super::CodeGrid;

    /// Number of cells currently holding `code`.
    #[must_use]
    pub fn count_code(grid: &CodeGrid, code: CellCode) -> usize {
        grid.cells.iter().filter(|stored| **stored == code).count()
    }

    /// Codes of every cell column by column.
    #[must_use]
    pub fn codes(grid: &CodeGrid) -> &[CellCode] {
        &grid.cells
    }

    /// Walkable cells reachable from the walkable cells of `seeds`.
    ///
    /// Movement follows the four cardinal neighbours and only enters
    /// [`CellCode::Path`] or [`CellCode::Trigger`] cells.
    #[must_use]
    pub fn reachable_from(grid: &CodeGrid, seeds: &RegionBox) -> HashSet<GridCoord> {
        let mut reached = HashSet::new();
        let mut queue = VecDeque::new();

        for cell in seeds.cells() {
            if is_walkable(grid, cell) && reached.insert(cell) {
                queue.push_back(cell);
            }
        }

        while let Some(cell) = queue.pop_front() {
            for neighbor in [
                cell.translated(0, 1),
                cell.translated(1, 0),
                cell.translated(0, -1),
                cell.translated(-1, 0),
            ] {
                if is_walkable(grid, neighbor) && reached.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        reached
    }

    /// Reports whether every walkable cell of `to` is reachable from `from`.
    #[must_use]
    pub fn connects(grid: &CodeGrid, from: &RegionBox, to: &RegionBox) -> bool {
        let reached = reachable_from(grid, from);
        let mut targets = to.cells().filter(|cell| is_walkable(grid, *cell)).peekable();
        targets.peek().is_some() && targets.all(|cell| reached.contains(&cell))
    }

    fn is_walkable(grid: &CodeGrid, cell: GridCoord) -> bool {
        grid.get(cell).map_or(false, CellCode::is_walkable)
    }
}
