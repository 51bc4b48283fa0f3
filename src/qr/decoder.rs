//! QR code decoder using rqrr

use crate::error::{Error, Result};
use crate::qr::QrPayload;
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// QR code decoder
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Open an image file and decode the first QR code in it
    pub fn decode_file(&self, path: &Path) -> Result<QrPayload> {
        let img = image::open(path)?;
        self.decode(&img)
    }

    /// Decode a QR code from an image
    pub fn decode(&self, img: &DynamicImage) -> Result<QrPayload> {
        self.decode_gray(img.to_luma8())
    }

    /// Decode a QR code from a grayscale image
    pub fn decode_gray(&self, img: GrayImage) -> Result<QrPayload> {
        let mut prepared = rqrr::PreparedImage::prepare(img);

        let grids = prepared.detect_grids();

        let Some(grid) = grids.first() else {
            return Err(Error::NoQrCodeFound);
        };

        match grid.decode() {
            Ok((meta, content)) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                    meta.version,
                    meta.ecc_level,
                    content.len()
                );

                Ok(QrPayload::from_bytes(content.into_bytes()))
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }
}

impl Default for QrDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn blank_image_has_no_qr() {
        let blank = GrayImage::from_pixel(64, 64, Luma([255u8]));
        let err = QrDecoder::new().decode_gray(blank).unwrap_err();
        assert!(matches!(err, Error::NoQrCodeFound));
    }

    #[test]
    fn missing_file_is_image_error() {
        let err = QrDecoder::new()
            .decode_file(Path::new("definitely/not/here.png"))
            .unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }
}
