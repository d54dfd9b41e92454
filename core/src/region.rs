//! Cell-aligned rectangles used for spatial reasoning about grid chunks.

use serde::{Deserialize, Serialize};

use crate::GridCoord;

/// Size of a [`RegionBox`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionSize {
    width: i32,
    height: i32,
}

impl RegionSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Creates a square size descriptor.
    #[must_use]
    pub const fn square(side: i32) -> Self {
        Self::new(side, side)
    }

    /// Width of the region in cells.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height of the region in cells.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }
}

/// Axis-aligned rectangle anchored at its bottom-left cell.
///
/// Both dimensions are at least one cell; the top-right cell is derived from
/// the origin and size and is included in the region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionBox {
    origin: GridCoord,
    size: RegionSize,
}

impl RegionBox {
    /// Constructs a region from its bottom-left cell and size.
    ///
    /// Returns `None` when either dimension is smaller than one cell.
    #[must_use]
    pub const fn from_origin_and_size(origin: GridCoord, size: RegionSize) -> Option<Self> {
        if size.width > 0 && size.height > 0 {
            Some(Self { origin, size })
        } else {
            None
        }
    }

    /// Constructs the region spanning two inclusive corner cells.
    ///
    /// Returns `None` when `top_right` lies left of or below `bottom_left`.
    #[must_use]
    pub const fn from_corners(bottom_left: GridCoord, top_right: GridCoord) -> Option<Self> {
        Self::from_origin_and_size(
            bottom_left,
            RegionSize::new(
                top_right.column() - bottom_left.column() + 1,
                top_right.row() - bottom_left.row() + 1,
            ),
        )
    }

    /// Single-cell region located at `cell`.
    #[must_use]
    pub const fn unit(cell: GridCoord) -> Self {
        Self {
            origin: cell,
            size: RegionSize::square(1),
        }
    }

    /// Bottom-left cell of the region.
    #[must_use]
    pub const fn origin(&self) -> GridCoord {
        self.origin
    }

    /// Dimensions of the region.
    #[must_use]
    pub const fn size(&self) -> RegionSize {
        self.size
    }

    /// Top-right cell of the region.
    #[must_use]
    pub const fn top_right(&self) -> GridCoord {
        self.origin
            .translated(self.size.width - 1, self.size.height - 1)
    }

    /// Number of cells covered by the region.
    #[must_use]
    pub const fn area(&self) -> i32 {
        self.size.width * self.size.height
    }

    /// Reports whether the cell lies inside the region, edges included.
    #[must_use]
    pub const fn contains(&self, cell: GridCoord) -> bool {
        let top_right = self.top_right();
        cell.column() >= self.origin.column()
            && cell.column() <= top_right.column()
            && cell.row() >= self.origin.row()
            && cell.row() <= top_right.row()
    }

    /// Reports whether `other` lies entirely inside the region.
    #[must_use]
    pub const fn contains_box(&self, other: &RegionBox) -> bool {
        self.contains(other.origin) && self.contains(other.top_right())
    }

    /// Resolves a cell relative to the origin, or `None` when it falls outside.
    #[must_use]
    pub const fn cell_at(&self, column_offset: i32, row_offset: i32) -> Option<GridCoord> {
        let cell = self.origin.translated(column_offset, row_offset);
        if self.contains(cell) {
            Some(cell)
        } else {
            None
        }
    }

    /// Iterates every cell of the region column by column.
    pub fn cells(&self) -> impl Iterator<Item = GridCoord> {
        let origin = self.origin;
        let RegionSize { width, height } = self.size;
        (0..width).flat_map(move |column| {
            (0..height).map(move |row| origin.translated(column, row))
        })
    }

    /// Overlapping sub-rectangle shared with `other`, if any.
    #[must_use]
    pub fn intersection(&self, other: &RegionBox) -> Option<RegionBox> {
        let (column, width) = axis_overlap(
            self.origin.column(),
            self.size.width,
            other.origin.column(),
            other.size.width,
        );
        let (row, height) = axis_overlap(
            self.origin.row(),
            self.size.height,
            other.origin.row(),
            other.size.height,
        );

        Self::from_origin_and_size(GridCoord::new(column, row), RegionSize::new(width, height))
    }

    /// Cells shared with `other`, column by column, or `None` when disjoint.
    #[must_use]
    pub fn intersect(&self, other: &RegionBox) -> Option<Vec<GridCoord>> {
        self.intersection(other)
            .map(|overlap| overlap.cells().collect())
    }
}

/// Start and length of the overlap of two spans along one axis.
///
/// A span beginning at or after the other's start keeps its own start; a span
/// beginning before it adopts the other's start. Either way the overlap ends
/// at the nearer of the two far edges.
fn axis_overlap(start: i32, length: i32, other_start: i32, other_length: i32) -> (i32, i32) {
    let end = start + length - 1;
    let other_end = other_start + other_length - 1;

    if start >= other_start {
        (start, end.min(other_end) - start + 1)
    } else {
        (other_start, end.min(other_end) - other_start + 1)
    }
}
