//! JPEG response producer.

use std::io;

use doxen_core::Response;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;

/// Content type of image responses.
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";
/// JPEG encoder quality.
pub const JPEG_QUALITY: u8 = 94;

/// Wrap `image` in a deferred JPEG response.
///
/// The image is moved into the producer and encoded only when the host
/// writes the response.
#[must_use]
pub fn jpeg_response(image: RgbImage) -> Response {
    Response::new(JPEG_CONTENT_TYPE, move |out| {
        let encoder = JpegEncoder::new_with_quality(out, JPEG_QUALITY);
        image.write_with_encoder(encoder).map_err(io::Error::other)
    })
}
