#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the cellmaze generator.
//!
//! This crate defines the vocabulary that connects the grid, the path planner,
//! the cell builders and the map controller. The grid stores [`CellCode`]
//! values addressed by [`GridCoord`], the planner carves [`PathSpec`] requests
//! into that grid one [`Transform`] at a time, and every fallible step reports
//! failures through [`MapError`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

mod error;
mod region;

pub use error::{ConfigurationError, InternalError, MapError};
pub use region::{RegionBox, RegionSize};

/// Smallest `min_grid_size` accepted when dimensioning a grid.
pub const SMALLEST_GRID_SIZE: u32 = 64;

/// Largest number of cells, borders included, a dimensioned grid may hold.
pub const LARGEST_GRID_SIZE: usize = 1 << 24;

/// Path width, as a fraction of the vertical cell count, used for wide stages.
pub const WIDE_PATH_WIDTH: f32 = 0.16;

/// Path width, as a fraction of the vertical cell count, used for narrow stages.
pub const NARROW_PATH_WIDTH: f32 = 0.12;

/// Code stored in every grid cell.
///
/// The numeric discriminants are stable and match the codes handed to
/// external consumers. Merge precedence is defined by [`CellCode::rank`], not
/// by the discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellCode {
    /// Walkable channel carved by the planner.
    Path = 0,
    /// Solid ring surrounding every carved chunk.
    Border = 1,
    /// Untouched cell outside the carved channel.
    Filler = 2,
    /// End-of-path cell that signals stage completion.
    Trigger = 3,
}

impl CellCode {
    /// Every cell code in discriminant order.
    pub const ALL: [CellCode; 4] = [
        CellCode::Path,
        CellCode::Border,
        CellCode::Filler,
        CellCode::Trigger,
    ];

    /// Merge precedence of the code; lower ranks win overlapping writes.
    ///
    /// `Trigger` only ever reaches the grid through a forced overwrite, so its
    /// rank is never consulted by carving.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Path => 0,
            Self::Border => 1,
            Self::Filler => 2,
            Self::Trigger => 3,
        }
    }

    /// Resolves two writes targeting the same cell into the surviving code.
    #[must_use]
    pub const fn prevailing(self, incoming: CellCode) -> CellCode {
        if incoming.rank() < self.rank() {
            incoming
        } else {
            self
        }
    }

    /// Reports whether the code can be walked on by the player.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Path | Self::Trigger)
    }

    /// Numeric code handed to external consumers.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Looks up the code matching the provided numeric value.
    #[must_use]
    pub const fn from_value(value: u8) -> Option<CellCode> {
        match value {
            0 => Some(Self::Path),
            1 => Some(Self::Border),
            2 => Some(Self::Filler),
            3 => Some(Self::Trigger),
            _ => None,
        }
    }
}

/// Location of a single grid cell; row zero is the bottom of the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    column: i32,
    row: i32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Returns the coordinate shifted by the provided cell offsets.
    #[must_use]
    pub const fn translated(self, columns: i32, rows: i32) -> Self {
        Self::new(self.column + columns, self.row + rows)
    }

    /// Returns the coordinate reached after applying a carving step.
    #[must_use]
    pub const fn step(self, transform: Transform) -> Self {
        self.translated(transform.dx(), transform.dy())
    }
}

/// Grid axis along which a transform moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Movement across columns.
    Horizontal,
    /// Movement across rows.
    Vertical,
}

/// Single carving step with exactly one non-zero axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transform {
    axis: Axis,
    distance: i32,
}

impl Transform {
    /// Creates a step of `distance` cells along `axis`; the sign picks the direction.
    #[must_use]
    pub const fn along(axis: Axis, distance: i32) -> Self {
        Self { axis, distance }
    }

    /// Axis the step moves along.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Signed number of cells covered by the step.
    #[must_use]
    pub const fn distance(&self) -> i32 {
        self.distance
    }

    /// Horizontal component of the step.
    #[must_use]
    pub const fn dx(&self) -> i32 {
        match self.axis {
            Axis::Horizontal => self.distance,
            Axis::Vertical => 0,
        }
    }

    /// Vertical component of the step.
    #[must_use]
    pub const fn dy(&self) -> i32 {
        match self.axis {
            Axis::Horizontal => 0,
            Axis::Vertical => self.distance,
        }
    }
}

/// Named anchor positions inside the usable area of the grid.
///
/// Start anchors sit on the left edge (or the bottom edge for `Middle`), end
/// anchors mirror them on the right edge (or the top edge for `Middle`):
///
/// ```text
/// | [S2]    [E3]    [E2] |
/// | [S1]            [E1] |
/// | [S0]    [S3]    [E0] |
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    /// Lower corner of the edge.
    BottomCorner = 0,
    /// Vertical midpoint of the edge.
    Side = 1,
    /// Upper corner of the edge.
    TopCorner = 2,
    /// Horizontal midpoint of the bottom (start) or top (end) edge.
    Middle = 3,
}

impl Anchor {
    /// Every anchor in index order.
    pub const ALL: [Anchor; 4] = [
        Anchor::BottomCorner,
        Anchor::Side,
        Anchor::TopCorner,
        Anchor::Middle,
    ];

    /// Resolves an anchor index; indices outside `0..=3` yield `None`.
    #[must_use]
    pub fn from_index(index: i32) -> Option<Anchor> {
        usize::try_from(index)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Index of the anchor within [`Anchor::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Topology of the carved channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    /// Monotone path from start to end with a shuffled turn pattern.
    Direct,
    /// Direct path with a single spliced reversal detour.
    Backtrack,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "Direct"),
            Self::Backtrack => write!(f, "Backtrack"),
        }
    }
}

impl FromStr for PathKind {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Direct" => Ok(Self::Direct),
            "Backtrack" => Ok(Self::Backtrack),
            other => Err(ConfigurationError::UnknownPathKind(other.to_owned())),
        }
    }
}

/// Request describing which path to carve into a grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathSpec {
    /// Topology of the path.
    pub kind: PathKind,
    /// Path width as a fraction of the vertical cell count; must be positive.
    pub width_percentage: f32,
    /// Start anchor, or `None` to pick one uniformly at random.
    pub start: Option<Anchor>,
    /// End anchor, or `None` to pick one uniformly at random.
    pub end: Option<Anchor>,
}

impl PathSpec {
    /// Creates a new path request.
    #[must_use]
    pub const fn new(
        kind: PathKind,
        width_percentage: f32,
        start: Option<Anchor>,
        end: Option<Anchor>,
    ) -> Self {
        Self {
            kind,
            width_percentage,
            start,
            end,
        }
    }

    /// Creates a path request from raw anchor indices.
    ///
    /// Indices outside `0..=3` (idiomatically `-1`) request a random anchor.
    #[must_use]
    pub fn from_indices(
        kind: PathKind,
        width_percentage: f32,
        start_index: i32,
        end_index: i32,
    ) -> Self {
        Self::new(
            kind,
            width_percentage,
            Anchor::from_index(start_index),
            Anchor::from_index(end_index),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_rank_prevails_regardless_of_order() {
        for current in [CellCode::Path, CellCode::Border, CellCode::Filler] {
            for incoming in [CellCode::Path, CellCode::Border, CellCode::Filler] {
                assert_eq!(
                    current.prevailing(incoming),
                    incoming.prevailing(current),
                    "merge must be order independent for {current:?} and {incoming:?}",
                );
            }
        }

        assert_eq!(CellCode::Filler.prevailing(CellCode::Border), CellCode::Border);
        assert_eq!(CellCode::Border.prevailing(CellCode::Path), CellCode::Path);
        assert_eq!(CellCode::Path.prevailing(CellCode::Border), CellCode::Path);
    }

    #[test]
    fn cell_code_values_are_stable() {
        for code in CellCode::ALL {
            assert_eq!(CellCode::from_value(code.value()), Some(code));
        }
        assert_eq!(CellCode::from_value(4), None);
    }

    #[test]
    fn out_of_range_anchor_indices_request_random_selection() {
        assert_eq!(Anchor::from_index(0), Some(Anchor::BottomCorner));
        assert_eq!(Anchor::from_index(3), Some(Anchor::Middle));
        assert_eq!(Anchor::from_index(-1), None);
        assert_eq!(Anchor::from_index(4), None);
    }

    #[test]
    fn path_kind_parses_known_tags() {
        assert_eq!("Direct".parse::<PathKind>(), Ok(PathKind::Direct));
        assert_eq!("Backtrack".parse::<PathKind>(), Ok(PathKind::Backtrack));
        assert_eq!(
            "Spiral".parse::<PathKind>(),
            Err(ConfigurationError::UnknownPathKind("Spiral".to_owned()))
        );
    }

    #[test]
    fn transform_components_follow_axis() {
        let right = Transform::along(Axis::Horizontal, 3);
        let down = Transform::along(Axis::Vertical, -2);

        assert_eq!((right.dx(), right.dy()), (3, 0));
        assert_eq!((down.dx(), down.dy()), (0, -2));
        assert_eq!(
            GridCoord::new(1, 5).step(right).step(down),
            GridCoord::new(4, 3)
        );
    }
}
