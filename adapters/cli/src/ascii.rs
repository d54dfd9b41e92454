//! Plain-text rendering of a carved grid.

use cellmaze_core::{CellCode, GridCoord};
use cellmaze_grid::CodeGrid;

/// Glyph marking the spawn cell.
const SPAWN_GLYPH: char = 'S';

fn glyph(code: CellCode) -> char {
    match code {
        CellCode::Path => ' ',
        CellCode::Border => '#',
        CellCode::Filler => '.',
        CellCode::Trigger => 'E',
    }
}

/// Renders the grid top row first, marking `spawn` when it lies on the grid.
pub(crate) fn render(grid: &CodeGrid, spawn: Option<GridCoord>) -> String {
    let columns = usize::try_from(grid.dimensions().columns()).unwrap_or_default();
    let rows = usize::try_from(grid.dimensions().rows()).unwrap_or_default();
    let mut canvas = vec![vec!['.'; columns]; rows];

    for (cell, code) in grid.iter() {
        if let (Ok(column), Ok(row)) = (usize::try_from(cell.column()), usize::try_from(cell.row())) {
            canvas[row][column] = glyph(code);
        }
    }

    if let Some(spawn) = spawn.filter(|cell| grid.get(*cell).is_ok()) {
        if let (Ok(column), Ok(row)) = (usize::try_from(spawn.column()), usize::try_from(spawn.row())) {
            canvas[row][column] = SPAWN_GLYPH;
        }
    }

    canvas
        .iter()
        .rev()
        .map(|line| line.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
