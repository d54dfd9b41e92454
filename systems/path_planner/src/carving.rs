//! Chunked carving of transforms into a code grid.

use cellmaze_core::{
    Axis, CellCode, ConfigurationError, GridCoord, InternalError, MapError, RegionBox, RegionSize,
    Transform,
};
use cellmaze_grid::CodeGrid;

/// Index of the first transform after which a detour may be spliced in.
const DETOUR_EARLIEST_INDEX: usize = 2;

/// Merge-writes one chunk with its bottom-left cell at `origin`.
///
/// The `(width + 2) x (width + 2)` block around the chunk becomes
/// [`CellCode::Border`] on its outer ring and [`CellCode::Path`] inside, so
/// cells already carved by neighbouring chunks are never downgraded.
///
/// Widths below one cell are rejected with
/// [`ConfigurationError::NonPositiveChunkWidth`]. A block reaching past the
/// grid fails with [`InternalError::OutOfBounds`] before any cell is written.
pub fn apply_cell_group(grid: &mut CodeGrid, origin: GridCoord, width: i32) -> Result<(), MapError> {
    if width < 1 {
        return Err(ConfigurationError::NonPositiveChunkWidth(width).into());
    }

    let out_of_bounds = InternalError::OutOfBounds {
        cell: origin,
        columns: grid.dimensions().columns(),
        rows: grid.dimensions().rows(),
    };
    let _ = grid.get(origin)?;
    let near_corner = origin.translated(-1, -1);
    let far_corner = origin
        .column()
        .checked_add(width)
        .zip(origin.row().checked_add(width))
        .map(|(column, row)| GridCoord::new(column, row))
        .ok_or_else(|| out_of_bounds.clone())?;
    let _ = grid.get(near_corner)?;
    let _ = grid.get(far_corner)?;

    let block = RegionBox::from_corners(near_corner, far_corner).ok_or_else(|| out_of_bounds.clone())?;
    let interior =
        RegionBox::from_origin_and_size(origin, RegionSize::square(width)).ok_or(out_of_bounds)?;

    grid.record_origin(origin);
    for cell in block.cells() {
        let code = if interior.contains(cell) {
            CellCode::Path
        } else {
            CellCode::Border
        };
        grid.merge_write(cell, code)?;
    }
    Ok(())
}

/// Appends the transforms covering `distance` cells along `axis`.
///
/// Every transform spans `width` cells except the last, which is clipped to
/// the remainder. Transforms carry the sign of `distance`.
pub(crate) fn push_axis_transforms(out: &mut Vec<Transform>, axis: Axis, distance: i32, width: i32) {
    let direction = distance.signum();
    let mut remaining = distance.abs();

    while remaining > 0 {
        let step = remaining.min(width);
        remaining -= step;
        out.push(Transform::along(axis, direction * step));
    }
}

/// Inserts the reversal detour (up, right twice, down, right twice) at `index`.
pub(crate) fn splice_detour(transforms: &mut Vec<Transform>, index: usize, width: i32) {
    let detour = [
        Transform::along(Axis::Vertical, width),
        Transform::along(Axis::Horizontal, width),
        Transform::along(Axis::Horizontal, width),
        Transform::along(Axis::Vertical, -width),
        Transform::along(Axis::Horizontal, width),
        Transform::along(Axis::Horizontal, width),
    ];

    for (offset, transform) in detour.into_iter().enumerate() {
        transforms.insert(index + offset, transform);
    }
}

/// Result of walking a transform list across the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Walk {
    /// Cell the walk finished on.
    pub(crate) end: GridCoord,
    /// Origin-list index of the first detour chunk, if a detour was spliced in.
    pub(crate) detour_origin: Option<usize>,
}

/// Applies a chunk at every position visited by `transforms`, then one final
/// chunk at the terminal position.
///
/// A turn is recorded whenever a transform moves along a different axis than
/// its predecessor; the first transform always counts. When `detour_window`
/// is provided, the detour is spliced in right after the first transform (from
/// the third onwards) that leaves the cursor inside the window.
pub(crate) fn walk(
    grid: &mut CodeGrid,
    start: GridCoord,
    transforms: &mut Vec<Transform>,
    width: i32,
    detour_window: Option<&RegionBox>,
) -> Result<Walk, MapError> {
    let mut cursor = start;
    let mut last_axis = None;
    let mut detour_origin = None;
    let mut index = 0;

    while index < transforms.len() {
        let transform = transforms[index];
        if last_axis != Some(transform.axis()) {
            grid.record_turn();
        }
        last_axis = Some(transform.axis());

        apply_cell_group(grid, cursor, width)?;
        cursor = cursor.step(transform);

        if let Some(window) = detour_window {
            if detour_origin.is_none() && index >= DETOUR_EARLIEST_INDEX && window.contains(cursor) {
                splice_detour(transforms, index + 1, width);
                detour_origin = Some(grid.origins().len());
            }
        }

        index += 1;
    }

    apply_cell_group(grid, cursor, width)?;

    Ok(Walk {
        end: cursor,
        detour_origin,
    })
}
