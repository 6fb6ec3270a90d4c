//! Error types for the fretboard editor
//!
//! Geometry errors are recovered locally by the editor (they turn into the
//! inline error scene); only malformed shared state reaches callers.

use thiserror::Error;

/// Top-level error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FretboardError {
    #[error("{0}")]
    InvalidFretWindow(#[from] FretWindowError),

    #[error("{0}")]
    InvalidFretSize(#[from] FretSizeError),

    /// The `state` URL parameter could not be decoded, parsed or validated
    #[error("Malformed shared state: {0}")]
    MalformedSharedState(String),
}

/// Fret window validation failures, in the order they are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FretWindowError {
    #[error("Invalid fret value(s)!")]
    OutOfRange { start: i32, end: i32 },

    #[error("End fret must not be smaller than start fret!")]
    EndBeforeStart { start: i32, end: i32 },

    #[error("Maximal number of displayable frets is 16, e.g., 1st to 16th or 4th to 19th!")]
    TooWide { start: i32, end: i32 },
}

/// Fret/string spacing validation failures
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FretSizeError {
    #[error("Invalid fret height value!")]
    Height(f32),

    #[error("Invalid fret width value!")]
    Width(f32),
}

pub type Result<T> = std::result::Result<T, FretboardError>;
