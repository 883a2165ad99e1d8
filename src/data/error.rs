use std::path::PathBuf;

use thiserror::Error;

use super::model::format_names;

// ---------------------------------------------------------------------------
// Load errors – file access and container schema
// ---------------------------------------------------------------------------

/// Everything that can go wrong while materializing a container.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),

    #[error("container has no '{name}' array (found {})", format_names(.available))]
    MissingArray {
        name: String,
        /// Every top-level name the container does have.
        available: Vec<String>,
    },

    #[error("'{name}' is {found}-D, expected {expected}-D")]
    UnexpectedRank {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("'{name}' has unsupported element type: {detail}")]
    UnsupportedType { name: String, detail: String },

    #[error("reading '{name}' failed")]
    Read { name: String },

    #[error(transparent)]
    Hdf5(#[from] hdf5::Error),
}

// ---------------------------------------------------------------------------
// Selection errors – picking a waveform out of the matrix
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("waveform index {index} out of bounds for {rows} rows")]
    OutOfBounds { index: usize, rows: usize },
}
