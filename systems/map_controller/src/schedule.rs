use cellmaze_core::{
    Anchor, ConfigurationError, MapError, PathKind, PathSpec, NARROW_PATH_WIDTH, WIDE_PATH_WIDTH,
};

/// Maps a `(difficulty, stage)` pair onto the path to carve.
pub trait PathSchedule {
    /// Path request for the provided difficulty and stage.
    fn path_for(&self, difficulty: u32, stage: u32) -> Result<PathSpec, MapError>;
}

impl<F> PathSchedule for F
where
    F: Fn(u32, u32) -> Result<PathSpec, MapError>,
{
    fn path_for(&self, difficulty: u32, stage: u32) -> Result<PathSpec, MapError> {
        self(difficulty, stage)
    }
}

/// Three-level schedule used by the maze game mode.
///
/// | difficulty | kind      | anchors                    |
/// |------------|-----------|----------------------------|
/// | 0          | Direct    | side to side               |
/// | 1          | Direct    | bottom corner to top corner|
/// | 2          | Backtrack | bottom corner to top corner|
///
/// Even stages use [`WIDE_PATH_WIDTH`], odd stages [`NARROW_PATH_WIDTH`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DifficultySchedule;

impl PathSchedule for DifficultySchedule {
    fn path_for(&self, difficulty: u32, stage: u32) -> Result<PathSpec, MapError> {
        let (kind, start, end) = match difficulty {
            0 => (PathKind::Direct, Anchor::Side, Anchor::Side),
            1 => (PathKind::Direct, Anchor::BottomCorner, Anchor::TopCorner),
            2 => (PathKind::Backtrack, Anchor::BottomCorner, Anchor::TopCorner),
            other => return Err(ConfigurationError::UnknownDifficulty(other).into()),
        };

        let width = if stage % 2 == 0 {
            WIDE_PATH_WIDTH
        } else {
            NARROW_PATH_WIDTH
        };

        Ok(PathSpec::new(kind, width, Some(start), Some(end)))
    }
}
