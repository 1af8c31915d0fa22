use thiserror::Error;

/// Invalid configuration handed to a scene primitive. These are programmer
/// errors: they are reported at the call that introduced them and never
/// recovered from at runtime.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("animation duration must be positive and finite, got {0}")]
    InvalidDuration(f32),
    #[error("pulse period must be positive and finite, got {0}")]
    InvalidPeriod(f32),
    #[error("sprite row {row} is out of range (sheet has {rows} rows)")]
    SpriteRowOutOfRange { row: usize, rows: usize },
    #[error("sprite row {row} has no frames")]
    EmptySpriteRow { row: usize },
    #[error("invalid sprite frame layout: {0}")]
    InvalidFrameLayout(String),
    #[error("drawing grid needs at least one column and one row, got {columns}x{rows}")]
    InvalidGridSize { columns: u32, rows: u32 },
    #[error("timer range is inverted: low {low} > high {high}")]
    InvalidTimerRange { low: f32, high: f32 },
}

pub type SceneResult<T> = Result<T, SceneError>;
