//! Fixed 8x8 bitmap typeface for caption text
//!
//! Glyphs come from `font8x8` (Basic Latin and Latin-1 supplement), so text
//! metrics are identical on every machine.

use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};

/// Glyph cell edge in pixels at scale 1
pub const GLYPH_SIZE: u32 = 8;

const FALLBACK: char = '?';

/// Monospace bitmap font drawn at an integer scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    scale: u32,
}

impl BitmapFont {
    /// Font at the given integer scale (at least 1)
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    /// Horizontal advance of one character in pixels
    pub fn advance(&self) -> u32 {
        GLYPH_SIZE * self.scale
    }

    /// Height of a line in pixels
    pub fn line_height(&self) -> u32 {
        GLYPH_SIZE * self.scale
    }

    /// Pixel width of `text` when drawn with this font
    pub fn text_width(&self, text: &str) -> u32 {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        chars.saturating_mul(self.advance())
    }

    /// Draw `text` with its top-left corner at (`x`, `y`).
    ///
    /// Coordinates may be negative; pixels falling outside the canvas are
    /// dropped.
    pub fn draw(&self, canvas: &mut RgbImage, x: i64, y: i64, text: &str, color: Rgb<u8>) {
        let scale = i64::from(self.scale);
        let advance = i64::from(self.advance());

        for (index, ch) in text.chars().enumerate() {
            let origin_x = x + index as i64 * advance;
            let rows = glyph(ch);

            for (row, bits) in rows.iter().enumerate() {
                for col in 0..8u8 {
                    if bits & (1u8 << col) == 0 {
                        continue;
                    }
                    let px = origin_x + i64::from(col) * scale;
                    let py = y + row as i64 * scale;
                    fill_block(canvas, px, py, self.scale, color);
                }
            }
        }
    }
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self::new(1)
    }
}

fn glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get(FALLBACK))
        .unwrap_or([0; 8])
}

fn fill_block(canvas: &mut RgbImage, x: i64, y: i64, size: u32, color: Rgb<u8>) {
    let (width, height) = (i64::from(canvas.width()), i64::from(canvas.height()));
    for dy in 0..i64::from(size) {
        for dx in 0..i64::from(size) {
            let (px, py) = (x + dx, y + dy);
            if px < 0 || py < 0 || px >= width || py >= height {
                continue;
            }
            canvas.put_pixel(px as u32, py as u32, color);
        }
    }
}
