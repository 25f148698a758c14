//! Decorator listener for Doxen document trees.
//!
//! [`Decorator`] reacts to two kinds of [`Event`](doxen_core::Event):
//!
//! - node events: text and file leaves are converted from markdown to HTML
//! - the `parsedown2image` signal: an image referenced from the current page
//!   is served as JPEG, or a 400x100 error image if anything goes wrong
//!
//! Image requests are accepted only when the link occurs in the page source
//! and its canonical path stays inside the page's directory.

mod decorator;
mod error;
mod error_image;
mod resolve;
mod response;
mod signal;

pub use decorator::Decorator;
pub use error_image::{ERROR_CAPTION, ERROR_IMAGE_HEIGHT, ERROR_IMAGE_WIDTH, error_image};
pub use resolve::IMAGE_LINK_PARAM;
pub use response::{JPEG_CONTENT_TYPE, JPEG_QUALITY, jpeg_response};
pub use signal::{Signal, UnknownSignal};
