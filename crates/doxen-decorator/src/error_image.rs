//! Placeholder image served when an image cannot be resolved.

use image::{Rgb, RgbImage};

/// Placeholder width in pixels.
pub const ERROR_IMAGE_WIDTH: u32 = 400;
/// Placeholder height in pixels.
pub const ERROR_IMAGE_HEIGHT: u32 = 100;
/// Caption drawn on the placeholder.
pub const ERROR_CAPTION: &str = "Image load problem.";

const BACKGROUND: Rgb<u8> = Rgb([250, 140, 140]);
const FOREGROUND: Rgb<u8> = Rgb([0, 255, 255]);
const CAPTION_X: u32 = 20;
const CAPTION_Y: u32 = 40;

/// Glyph bitmap: 9 rows of 5 columns, most significant of the low 5 bits on
/// the left. Rows 7 and 8 hold descenders.
type Glyph = [u8; 9];

const GLYPH_WIDTH: u32 = 5;
const GLYPH_SCALE: u32 = 2;
/// Horizontal advance per character, including one column of spacing.
const ADVANCE: u32 = (GLYPH_WIDTH + 1) * GLYPH_SCALE;

const BLANK: Glyph = [0; 9];

#[rustfmt::skip]
const GLYPHS: &[(char, Glyph)] = &[
    ('I', [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110, 0, 0]),
    ('a', [0, 0, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111, 0, 0]),
    ('b', [0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b11110, 0, 0]),
    ('d', [0b00001, 0b00001, 0b01101, 0b10011, 0b10001, 0b10001, 0b01111, 0, 0]),
    ('e', [0, 0, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110, 0, 0]),
    ('g', [0, 0, 0b01111, 0b10001, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110]),
    ('l', [0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110, 0, 0]),
    ('m', [0, 0, 0b11010, 0b10101, 0b10101, 0b10101, 0b10101, 0, 0]),
    ('o', [0, 0, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110, 0, 0]),
    ('p', [0, 0, 0b11110, 0b10001, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000]),
    ('r', [0, 0, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000, 0, 0]),
    ('.', [0, 0, 0, 0, 0, 0b01100, 0b01100, 0, 0]),
];

/// Build the placeholder image.
///
/// Pure and deterministic: every call returns a pixel-identical image.
#[must_use]
pub fn error_image() -> RgbImage {
    let mut image = RgbImage::from_pixel(ERROR_IMAGE_WIDTH, ERROR_IMAGE_HEIGHT, BACKGROUND);
    draw_text(&mut image, CAPTION_X, CAPTION_Y, ERROR_CAPTION, FOREGROUND);
    image
}

/// Draw `text` with the built-in bitmap font. Pixels outside the image are
/// clipped; characters without a glyph advance as blanks.
fn draw_text(image: &mut RgbImage, x: u32, y: u32, text: &str, color: Rgb<u8>) {
    let mut cursor = x;
    for c in text.chars() {
        draw_glyph(image, cursor, y, glyph(c), color);
        cursor = cursor.saturating_add(ADVANCE);
    }
}

fn glyph(c: char) -> &'static Glyph {
    GLYPHS
        .iter()
        .find(|(glyph_char, _)| *glyph_char == c)
        .map_or(&BLANK, |(_, glyph)| glyph)
}

fn draw_glyph(image: &mut RgbImage, x: u32, y: u32, glyph: &Glyph, color: Rgb<u8>) {
    for (row, bits) in (0u32..).zip(glyph) {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                continue;
            }
            for dy in 0..GLYPH_SCALE {
                for dx in 0..GLYPH_SCALE {
                    let px = x + col * GLYPH_SCALE + dx;
                    let py = y + row * GLYPH_SCALE + dy;
                    if let Some(pixel) = image.get_pixel_mut_checked(px, py) {
                        *pixel = color;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_image_dimensions() {
        let image = error_image();
        assert_eq!(image.dimensions(), (ERROR_IMAGE_WIDTH, ERROR_IMAGE_HEIGHT));
    }

    #[test]
    fn test_error_image_is_deterministic() {
        assert_eq!(error_image().as_raw(), error_image().as_raw());
    }

    #[test]
    fn test_error_image_background_and_caption() {
        let image = error_image();

        assert_eq!(*image.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*image.get_pixel(399, 99), BACKGROUND);

        let caption_pixels = image.pixels().filter(|p| **p == FOREGROUND).count();
        assert!(caption_pixels > 0);

        // Top bar of the leading 'I' starts one column into its cell
        assert_eq!(*image.get_pixel(CAPTION_X + GLYPH_SCALE, CAPTION_Y), FOREGROUND);
    }

    #[test]
    fn test_caption_has_glyph_for_every_visible_char() {
        for c in ERROR_CAPTION.chars().filter(|c| !c.is_whitespace()) {
            assert!(
                GLYPHS.iter().any(|(g, _)| *g == c),
                "missing glyph for {c:?}"
            );
        }
    }

    #[test]
    fn test_draw_text_clips_at_edges() {
        let mut image = RgbImage::from_pixel(4, 4, BACKGROUND);
        draw_text(&mut image, 2, 2, "II", FOREGROUND);
        assert_eq!(image.dimensions(), (4, 4));
    }
}
