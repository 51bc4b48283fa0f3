//! QR code encoder

use crate::error::{Error, Result};
use image::{DynamicImage, Luma, RgbImage};
use qrcode::QrCode;
use qrcode::render::unicode;

/// Pixel size of one QR module unless configured otherwise
pub const DEFAULT_MODULE_SIZE: u32 = 10;

/// QR code encoder using the library's default error correction (level M)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrEncoder {
    module_size: u32,
    quiet_zone: bool,
}

impl QrEncoder {
    /// Create a new encoder with 10 px modules and a quiet zone
    pub fn new() -> Self {
        Self {
            module_size: DEFAULT_MODULE_SIZE,
            quiet_zone: true,
        }
    }

    /// Use a specific module size in pixels (clamped to at least 1)
    pub fn with_module_size(mut self, module_size: u32) -> Self {
        self.module_size = module_size.max(1);
        self
    }

    /// Enable or disable the 4-module quiet zone
    pub fn with_quiet_zone(mut self, quiet_zone: bool) -> Self {
        self.quiet_zone = quiet_zone;
        self
    }

    /// Configured module size in pixels
    pub fn module_size(&self) -> u32 {
        self.module_size
    }

    /// Encode text into an RGB QR image
    pub fn encode(&self, data: &str) -> Result<RgbImage> {
        let code = QrCode::new(data.as_bytes())
            .map_err(|e| Error::Encoding(format!("Failed to create QR code: {}", e)))?;

        let image = code
            .render::<Luma<u8>>()
            .module_dimensions(self.module_size, self.module_size)
            .quiet_zone(self.quiet_zone)
            .build();

        tracing::debug!(
            version = ?code.version(),
            modules = code.width(),
            width = image.width(),
            "Encoded QR symbol"
        );

        Ok(DynamicImage::ImageLuma8(image).to_rgb8())
    }

    /// Render text as a QR symbol made of unicode half blocks for terminal preview
    pub fn render_terminal(&self, data: &str) -> Result<String> {
        let code = QrCode::new(data.as_bytes())?;
        Ok(code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .quiet_zone(self.quiet_zone)
            .build())
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_square_rgb_image() {
        let image = QrEncoder::new()
            .encode("NWTA|03|14|1234|MU9||Calle 5||||||I")
            .unwrap();
        assert_eq!(image.width(), image.height());
        assert_eq!(image.width() % DEFAULT_MODULE_SIZE, 0);
    }

    #[test]
    fn module_size_scales_output() {
        let small = QrEncoder::new().with_module_size(2).encode("abc").unwrap();
        let large = QrEncoder::new().with_module_size(4).encode("abc").unwrap();
        assert_eq!(large.width(), small.width() * 2);
    }

    #[test]
    fn zero_module_size_is_clamped() {
        assert_eq!(QrEncoder::new().with_module_size(0).module_size(), 1);
    }

    #[test]
    fn oversized_payload_is_encoding_error() {
        let data = "x".repeat(5000);
        let err = QrEncoder::new().encode(&data).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn terminal_preview_is_multiline() {
        let text = QrEncoder::new().render_terminal("hello").unwrap();
        assert!(text.lines().count() > 5);
    }

    #[test]
    fn test_round_trip() {
        use crate::qr::QrDecoder;

        let encoder = QrEncoder::new();
        let decoder = QrDecoder::new();

        let original = "NWTA|01|01|OR1|M1||Av. Siempre Viva||||||I";
        let qr_image = encoder.encode(original).unwrap();
        let decoded = decoder
            .decode(&DynamicImage::ImageRgb8(qr_image))
            .unwrap();

        assert_eq!(decoded.as_str(), Some(original));
    }
}
