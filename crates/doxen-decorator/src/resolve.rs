//! Image resolution for the image signal.
//!
//! A request names a page and an `imageLink`. The image is served only if
//!
//! 1. the page is a file leaf,
//! 2. the link occurs verbatim in the page's raw source,
//! 3. `directory(page) / link`, with markdown escapes removed from `link`,
//!    is an existing file, and
//! 4. its canonical path still lies inside the canonical page directory.
//!
//! Check 2 is a heuristic: it proves the document mentions the path, not
//! that the author meant it as an image. Check 4 is the real boundary and
//! runs on canonical paths, so `..` segments and symlinks cannot escape.

use std::path::Path;

use doxen_core::{DocTree, FileLeaf, Leaf, Node};
use doxen_markdown::unescape_destination;
use image::{ImageReader, RgbImage};

use crate::error::ImageError;
use crate::error_image::error_image;

/// Request parameter carrying the document-relative image path.
pub const IMAGE_LINK_PARAM: &str = "imageLink";

/// Resolve the image for `page`, substituting the error image on any failure.
pub(crate) fn resolve_image(tree: &DocTree, page: &str, image_link: Option<&str>) -> RgbImage {
    let file = tree
        .get_node(page)
        .and_then(Node::as_leaf)
        .and_then(Leaf::as_file);
    // An empty link is as good as none
    let image_link = image_link.filter(|link| !link.is_empty());

    let (Some(file), Some(image_link)) = (file, image_link) else {
        tracing::debug!(page = %page, "Image request without document or link");
        return error_image();
    };

    load_document_image(file, image_link).unwrap_or_else(|err| {
        tracing::debug!(page = %page, image_link = %image_link, error = %err, "Image request rejected");
        error_image()
    })
}

/// Load an image referenced from `file`, enforcing containment and confinement.
fn load_document_image(file: &FileLeaf, image_link: &str) -> Result<RgbImage, ImageError> {
    if !file.content.contains(image_link) {
        return Err(ImageError::NotReferenced(image_link.to_owned()));
    }

    let directory = file.directory();
    let candidate = directory.join(&*unescape_destination(image_link));
    if !candidate.is_file() {
        return Err(ImageError::NotFound(candidate));
    }

    // Canonicalize before comparing: the raw path may still contain `..`
    let resolved = candidate.canonicalize()?;
    let boundary = directory.canonicalize()?;
    if !is_confined(&resolved, &boundary) {
        return Err(ImageError::OutsideDocument {
            resolved,
            directory: boundary,
        });
    }

    let image = ImageReader::open(&resolved)?
        .with_guessed_format()?
        .decode()?;
    Ok(image.to_rgb8())
}

/// Component-wise prefix check on canonical paths.
fn is_confined(resolved: &Path, boundary: &Path) -> bool {
    resolved.starts_with(boundary)
}
