//! Image resolution failures.
//!
//! None of these reach the requester. Every variant is logged and replaced
//! by the error image.

use std::path::PathBuf;

/// Reason an image request could not be served.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ImageError {
    /// The link does not occur in the document source.
    #[error("Image path {0} is not part of the document content")]
    NotReferenced(String),

    /// No file at the constructed path.
    #[error("Image file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The canonical path leaves the document directory.
    #[error("Image path {} is outside {}", resolved.display(), directory.display())]
    OutsideDocument {
        /// Canonical image path.
        resolved: PathBuf,
        /// Canonical document directory.
        directory: PathBuf,
    },

    /// Filesystem error during canonicalization or reading.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a decodable image.
    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),
}
