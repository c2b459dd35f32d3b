//! Error types for geometry loading.

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors surfaced by [`crate::Viewer::load_geometry`] and the model scanner.
///
/// An `Open` error leaves the previous viewer state untouched; every other
/// variant aborts mid-scan and may leave the mesh partially populated, so
/// callers should discard and reload rather than trust partial state.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The model file could not be opened.
    #[error("failed to open model file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line could not be read from the stream.
    #[error("read failed at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// A vertex record held a token that is not a float.
    #[error("line {line}: invalid vertex coordinate {token:?}: {source}")]
    Coordinate {
        line: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },

    /// A vertex record held fewer than three coordinates.
    #[error("line {line}: vertex record holds fewer than 3 coordinates")]
    ShortVertex { line: usize },

    /// A face token's numeric prefix is not a 1-based integer index.
    #[error("line {line}: invalid face index {token:?}: {source}")]
    FaceIndex {
        line: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },

    /// A face token referenced index 0, which has no 0-based equivalent.
    #[error("line {line}: face index 0 is not a valid 1-based reference")]
    ZeroFaceIndex { line: usize },
}
