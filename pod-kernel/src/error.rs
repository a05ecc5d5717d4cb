//! Errors raised while assembling a pod.

use std::io;
use std::path::{Path, PathBuf};

use pod_config::ParseError;
use thiserror::Error;

/// Result alias for assembly operations.
pub type AssembleResult<T> = Result<T, AssembleError>;

/// Failure at one step of the assembly pipeline.
///
/// Every variant carries the document path and the underlying cause.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// The document could not be opened (missing, permission denied, ...).
    #[error("error while opening {}: {source}", .path.display())]
    Open {
        /// Path of the document.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The document was opened but could not be read in full.
    #[error("error while reading {}: {source}", .path.display())]
    Read {
        /// Path of the document.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The document is not valid YAML or has the wrong shape.
    #[error("error while parsing {}: {source}", .path.display())]
    Parse {
        /// Path of the document.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: ParseError,
    },
}

/// Assembly step that failed, for callers matching on the failure class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssembleErrorKind {
    /// See [`AssembleError::Open`].
    Open,
    /// See [`AssembleError::Read`].
    Read,
    /// See [`AssembleError::Parse`].
    Parse,
}

impl AssembleError {
    /// Returns the step that failed.
    #[must_use]
    pub const fn kind(&self) -> AssembleErrorKind {
        match self {
            Self::Open { .. } => AssembleErrorKind::Open,
            Self::Read { .. } => AssembleErrorKind::Read,
            Self::Parse { .. } => AssembleErrorKind::Parse,
        }
    }

    /// Returns the path of the document being assembled.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. } | Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}
