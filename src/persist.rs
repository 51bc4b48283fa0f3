//! Writing generated images to disk

use crate::error::{Error, Result};
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

/// `QR_{task}_{order}.png`
pub fn output_file_name(task_code: &str, order_code: &str) -> String {
    format!("QR_{task_code}_{order_code}.png")
}

/// Encode `image` as PNG and place it at `dir/name`, replacing any existing file.
///
/// The PNG is fully encoded in memory and written to a temporary file in the
/// same directory before being renamed into place, so a failure never leaves
/// a truncated image behind.
pub fn write_png(dir: &Path, name: &str, image: &RgbImage) -> Result<PathBuf> {
    let path = dir.join(name);
    let persistence = |reason: String| Error::Persistence {
        path: path.clone(),
        reason,
    };

    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image.clone())
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| Error::Encoding(format!("PNG encoding failed: {e}")))?;
    let bytes = bytes.into_inner();

    let mut staged = tempfile::Builder::new()
        .prefix(".nwta-qr-")
        .suffix(".png.tmp")
        .tempfile_in(dir)
        .map_err(|e| persistence(e.to_string()))?;
    staged
        .write_all(&bytes)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| persistence(e.to_string()))?;
    staged
        .persist(&path)
        .map_err(|e| persistence(e.error.to_string()))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote PNG");
    Ok(path)
}
