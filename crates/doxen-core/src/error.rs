//! Tree loading errors.

use std::path::{Path, PathBuf};

/// Error raised while building a [`DocTree`](crate::DocTree).
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Source directory does not exist.
    #[error("Documentation directory not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A file or directory could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl TreeError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
