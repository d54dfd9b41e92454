//! Usable-area and anchor computation.

use cellmaze_core::{Anchor, ConfigurationError, GridCoord, MapError, RegionBox};
use cellmaze_grid::GridDimensions;

/// Converts a width percentage into a path width measured in cells.
///
/// The width is `ceil(width_percentage * rows)`, which is at least one cell
/// for any positive percentage and never more than `rows`.
pub fn path_width(width_percentage: f32, rows: i32) -> Result<i32, MapError> {
    if !(width_percentage > 0.0) {
        return Err(ConfigurationError::NonPositiveWidth(width_percentage).into());
    }

    // The float to int cast saturates, so infinite products land on i32::MAX.
    let cells = (width_percentage * rows as f32).ceil() as i32;
    Ok(cells.clamp(1, rows.max(1)))
}

/// Candidate start and end cells for one path width.
///
/// The usable area holds every cell that the bottom-left corner of a carved
/// chunk may occupy, so a chunk of the current width plus its border ring
/// always stays inside the grid margin:
///
/// ```text
/// [X][X]
/// [O][X]   <- O is the chunk origin for a path width of two
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnchorSet {
    usable_area: RegionBox,
    starts: [GridCoord; 4],
    ends: [GridCoord; 4],
}

impl AnchorSet {
    /// Computes the usable area and the anchors for `path_width`.
    ///
    /// Fails with [`ConfigurationError::PathTooWide`] when the path leaves no
    /// usable cell on either axis and with
    /// [`ConfigurationError::NonPositiveChunkWidth`] when `path_width` is
    /// below one cell.
    pub fn compute(dimensions: &GridDimensions, path_width: i32) -> Result<Self, MapError> {
        if path_width < 1 {
            return Err(ConfigurationError::NonPositiveChunkWidth(path_width).into());
        }

        let border = dimensions.border();
        let too_wide = ConfigurationError::PathTooWide {
            path_width,
            columns: dimensions.columns(),
            rows: dimensions.rows(),
            border,
        };
        let reserved = path_width
            .checked_add(border)
            .and_then(|cells| cells.checked_add(1))
            .ok_or_else(|| too_wide.clone())?;

        let bottom_left = GridCoord::new(border + 1, border + 1);
        let top_right = GridCoord::new(
            dimensions.columns() - reserved,
            dimensions.rows() - reserved,
        );

        let usable_area = RegionBox::from_corners(bottom_left, top_right).ok_or(too_wide)?;

        let middle_column = (bottom_left.column() + top_right.column()) / 2;
        let middle_row = (bottom_left.row() + top_right.row()) / 2;

        let starts = [
            bottom_left,
            GridCoord::new(bottom_left.column(), middle_row),
            GridCoord::new(bottom_left.column(), top_right.row()),
            GridCoord::new(middle_column, bottom_left.row()),
        ];
        let ends = [
            GridCoord::new(top_right.column(), bottom_left.row()),
            GridCoord::new(top_right.column(), middle_row),
            top_right,
            GridCoord::new(middle_column, top_right.row()),
        ];

        Ok(Self {
            usable_area,
            starts,
            ends,
        })
    }

    /// Region holding every legal chunk origin.
    #[must_use]
    pub const fn usable_area(&self) -> RegionBox {
        self.usable_area
    }

    /// Start cell for the provided anchor.
    #[must_use]
    pub const fn start(&self, anchor: Anchor) -> GridCoord {
        self.starts[anchor.index()]
    }

    /// End cell for the provided anchor.
    #[must_use]
    pub const fn end(&self, anchor: Anchor) -> GridCoord {
        self.ends[anchor.index()]
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    fn dimensions() -> GridDimensions {
        // 24 x 24 cells with a border of two.
        GridDimensions::derive(Vec2::new(10.0, 10.0), 400, 2).expect("valid input")
    }

    #[test]
    fn width_is_rounded_up_and_never_zero() {
        assert_eq!(path_width(0.5, 12), Ok(6));
        assert_eq!(path_width(0.16, 24), Ok(4));
        assert_eq!(path_width(0.12, 24), Ok(3));
        assert_eq!(path_width(0.001, 12), Ok(1));
    }

    #[test]
    fn huge_percentages_are_capped_at_the_row_count() {
        assert_eq!(path_width(1.0, 24), Ok(24));
        assert_eq!(path_width(1e9, 24), Ok(24));
        assert_eq!(path_width(f32::INFINITY, 24), Ok(24));
        assert_eq!(path_width(f32::MAX, 30), Ok(30));
    }

    #[test]
    fn non_positive_widths_are_rejected() {
        for width in [0.0, -0.2, f32::NAN] {
            assert!(path_width(width, 12)
                .expect_err("width must be positive")
                .is_configuration());
        }
    }

    #[test]
    fn anchors_sit_on_the_usable_area_edges() {
        let anchors = AnchorSet::compute(&dimensions(), 4).expect("usable area exists");

        // bottom-left (3, 3), top-right (24 - 7, 24 - 7) = (17, 17)
        assert_eq!(anchors.usable_area().origin(), GridCoord::new(3, 3));
        assert_eq!(anchors.usable_area().top_right(), GridCoord::new(17, 17));

        assert_eq!(anchors.start(Anchor::BottomCorner), GridCoord::new(3, 3));
        assert_eq!(anchors.start(Anchor::Side), GridCoord::new(3, 10));
        assert_eq!(anchors.start(Anchor::TopCorner), GridCoord::new(3, 17));
        assert_eq!(anchors.start(Anchor::Middle), GridCoord::new(10, 3));

        assert_eq!(anchors.end(Anchor::BottomCorner), GridCoord::new(17, 3));
        assert_eq!(anchors.end(Anchor::Side), GridCoord::new(17, 10));
        assert_eq!(anchors.end(Anchor::TopCorner), GridCoord::new(17, 17));
        assert_eq!(anchors.end(Anchor::Middle), GridCoord::new(10, 17));
    }

    #[test]
    fn overly_wide_paths_leave_no_usable_area() {
        let error = AnchorSet::compute(&dimensions(), 16).expect_err("path too wide");
        assert!(matches!(
            error,
            MapError::Configuration(ConfigurationError::PathTooWide { path_width: 16, .. })
        ));
    }

    #[test]
    fn extreme_widths_are_rejected_without_overflowing() {
        assert!(matches!(
            AnchorSet::compute(&dimensions(), i32::MAX),
            Err(MapError::Configuration(ConfigurationError::PathTooWide { path_width: i32::MAX, .. }))
        ));
        assert!(matches!(
            AnchorSet::compute(&dimensions(), i32::MAX - 2),
            Err(MapError::Configuration(ConfigurationError::PathTooWide { .. }))
        ));
        for width in [0, -3, i32::MIN] {
            assert_eq!(
                AnchorSet::compute(&dimensions(), width),
                Err(ConfigurationError::NonPositiveChunkWidth(width).into())
            );
        }
    }
}
