//! Image composition: QR symbol above a two-line caption band

mod font;

pub use font::{BitmapFont, GLYPH_SIZE};

use crate::error::Result;
use crate::qr::QrEncoder;
use crate::record::Record;
use image::{Rgb, RgbImage, imageops};

/// Height of the caption band below the symbol
pub const DEFAULT_CAPTION_HEIGHT: u32 = 100;

/// Offset of the first caption line from the top of the band
pub const DEFAULT_FIRST_LINE_OFFSET: u32 = 15;

/// Offset of the second caption line from the top of the band
pub const DEFAULT_SECOND_LINE_OFFSET: u32 = 35;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Human-readable text printed under the symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    /// Order code
    pub order_code: String,
    /// Address
    pub address: String,
    /// Task code
    pub task_code: String,
    /// Task description, empty for codes missing from the catalog
    pub description: String,
}

impl Caption {
    /// `"{order} - {address}"`
    pub fn first_line(&self) -> String {
        format!("{} - {}", self.order_code, self.address)
    }

    /// `"Tarea {task}: {description}"`
    pub fn second_line(&self) -> String {
        format!("Tarea {}: {}", self.task_code, self.description)
    }
}

/// Layout of the caption band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionLayout {
    /// Band height in pixels
    pub height: u32,
    /// First line offset from the band top
    pub first_line_offset: u32,
    /// Second line offset from the band top
    pub second_line_offset: u32,
}

impl Default for CaptionLayout {
    fn default() -> Self {
        Self {
            height: DEFAULT_CAPTION_HEIGHT,
            first_line_offset: DEFAULT_FIRST_LINE_OFFSET,
            second_line_offset: DEFAULT_SECOND_LINE_OFFSET,
        }
    }
}

/// Composes the final output image
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    encoder: QrEncoder,
    font: BitmapFont,
    layout: CaptionLayout,
}

impl Renderer {
    /// Renderer with explicit parts
    pub fn new(encoder: QrEncoder, font: BitmapFont, layout: CaptionLayout) -> Self {
        Self {
            encoder,
            font,
            layout,
        }
    }

    /// Encoder used for the symbol
    pub fn encoder(&self) -> &QrEncoder {
        &self.encoder
    }

    /// Caption layout
    pub fn layout(&self) -> &CaptionLayout {
        &self.layout
    }

    /// Encode the record and compose it with the caption.
    ///
    /// Caption lines wider than the canvas overflow both edges and are
    /// clipped; they are never wrapped or truncated.
    pub fn render(&self, record: &Record, caption: &Caption) -> Result<RgbImage> {
        let qr = self.encoder.encode(&record.to_wire())?;
        let (width, qr_height) = qr.dimensions();

        let mut canvas = RgbImage::from_pixel(width, qr_height + self.layout.height, WHITE);
        imageops::replace(&mut canvas, &qr, 0, 0);

        let lines = [
            (caption.first_line(), self.layout.first_line_offset),
            (caption.second_line(), self.layout.second_line_offset),
        ];
        for (line, offset) in &lines {
            let x = centered_x(width, self.font.text_width(line));
            let y = i64::from(qr_height) + i64::from(*offset);
            self.font.draw(&mut canvas, x, y, line, BLACK);
        }

        tracing::debug!(
            width,
            height = canvas.height(),
            qr_height,
            "Composed captioned QR image"
        );

        Ok(canvas)
    }
}

/// Left edge that centers a line of `line_width` on a canvas of `canvas_width`.
///
/// Negative when the line is wider than the canvas.
pub fn centered_x(canvas_width: u32, line_width: u32) -> i64 {
    (i64::from(canvas_width) - i64::from(line_width)) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::QrDecoder;
    use crate::record::build_record;
    use image::DynamicImage;

    fn sample() -> (Record, Caption) {
        let record = build_record("14", "1234", "MU9", "Calle 5", "03");
        let caption = Caption {
            order_code: "1234".into(),
            address: "Calle 5".into(),
            task_code: "14".into(),
            description: "Reparación principal".into(),
        };
        (record, caption)
    }

    #[test]
    fn caption_lines() {
        let (_, caption) = sample();
        assert_eq!(caption.first_line(), "1234 - Calle 5");
        assert_eq!(caption.second_line(), "Tarea 14: Reparación principal");
    }

    #[test]
    fn canvas_is_qr_plus_band() {
        let (record, caption) = sample();
        let renderer = Renderer::default();
        let qr = renderer.encoder().encode(&record.to_wire()).unwrap();
        let image = renderer.render(&record, &caption).unwrap();
        assert_eq!(image.width(), qr.width());
        assert_eq!(image.height(), qr.height() + DEFAULT_CAPTION_HEIGHT);
    }

    #[test]
    fn qr_region_matches_encoder_output() {
        let (record, caption) = sample();
        let renderer = Renderer::default();
        let qr = renderer.encoder().encode(&record.to_wire()).unwrap();
        let image = renderer.render(&record, &caption).unwrap();
        let region = imageops::crop_imm(&image, 0, 0, qr.width(), qr.height()).to_image();
        assert_eq!(region, qr);
    }

    #[test]
    fn caption_ink_stays_in_expected_rows() {
        let (record, caption) = sample();
        let renderer = Renderer::default();
        let image = renderer.render(&record, &caption).unwrap();
        let qr_height = image.height() - DEFAULT_CAPTION_HEIGHT;

        let inked_rows: Vec<u32> = (qr_height..image.height())
            .filter(|y| (0..image.width()).any(|x| *image.get_pixel(x, *y) == BLACK))
            .collect();

        assert!(!inked_rows.is_empty());
        for y in inked_rows {
            let in_first = (qr_height + 15..qr_height + 15 + GLYPH_SIZE).contains(&y);
            let in_second = (qr_height + 35..qr_height + 35 + GLYPH_SIZE).contains(&y);
            assert!(in_first || in_second, "unexpected ink on row {y}");
        }
    }

    #[test]
    fn first_line_is_centered() {
        let (record, caption) = sample();
        let renderer = Renderer::default();
        let image = renderer.render(&record, &caption).unwrap();
        let y0 = image.height() - DEFAULT_CAPTION_HEIGHT + DEFAULT_FIRST_LINE_OFFSET;

        let line_width = BitmapFont::default().text_width(&caption.first_line());
        let left = centered_x(image.width(), line_width);
        let right = left + i64::from(line_width);

        for y in y0..y0 + GLYPH_SIZE {
            for x in 0..image.width() {
                if *image.get_pixel(x, y) == BLACK {
                    let x = i64::from(x);
                    assert!(x >= left && x < right);
                }
            }
        }
    }

    #[test]
    fn centered_x_may_go_negative() {
        assert_eq!(centered_x(100, 40), 30);
        assert_eq!(centered_x(100, 300), -100);
    }

    #[test]
    fn wide_caption_still_renders() {
        let record = build_record("01", "OR1", "M1", "x", "01");
        let caption = Caption {
            order_code: "OR1".into(),
            address: "A".repeat(200),
            task_code: "01".into(),
            description: String::new(),
        };
        let image = Renderer::default().render(&record, &caption).unwrap();
        assert!(image.width() < BitmapFont::default().text_width(&caption.first_line()));
    }

    #[test]
    fn rendered_symbol_decodes_to_record() {
        let (record, caption) = sample();
        let image = Renderer::default().render(&record, &caption).unwrap();
        let payload = QrDecoder::new()
            .decode(&DynamicImage::ImageRgb8(image))
            .unwrap();
        assert_eq!(payload.as_str(), Some(record.to_wire().as_str()));
    }
}
