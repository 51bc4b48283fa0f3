//! Error types for NWTA QR generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for record generation
#[derive(Error, Debug)]
pub enum Error {
    /// No task was selected on the form
    #[error("A task must be selected")]
    MissingSelection,

    /// One or more required form fields were empty
    #[error("Please fill in all required fields (missing: {})", .fields.join(", "))]
    MissingField {
        /// Names of the empty fields, in form order
        fields: Vec<&'static str>,
    },

    /// The QR encoder or image compositor could not encode the record
    #[error("Failed to encode QR code: {0}")]
    Encoding(String),

    /// The generated image could not be written to disk
    #[error("Failed to write {}: {reason}", .path.display())]
    Persistence {
        /// Destination that could not be written
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// A decoded payload is not a well-formed NWTA record
    #[error("Invalid NWTA record: {0}")]
    InvalidRecord(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Short machine-readable label used in JSON reports
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingSelection => "missing_selection",
            Error::MissingField { .. } => "missing_field",
            Error::Encoding(_) => "encoding_failure",
            Error::Persistence { .. } => "persistence_failure",
            Error::InvalidRecord(_) => "invalid_record",
            Error::QrDecode(_) => "qr_decode",
            Error::NoQrCodeFound => "no_qr_code",
            Error::Io(_) => "io",
            Error::Image(_) => "image",
            Error::Config(_) => "config",
            Error::Other(_) => "other",
        }
    }

    /// Whether the user can fix this by correcting the form input
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::MissingSelection | Error::MissingField { .. })
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::Encoding(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_lists_every_field() {
        let err = Error::MissingField {
            fields: vec!["order code", "address"],
        };
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields (missing: order code, address)"
        );
        assert!(err.is_user_error());
        assert_eq!(err.kind(), "missing_field");
    }

    #[test]
    fn qr_capacity_error_is_encoding_failure() {
        let err: Error = qrcode::types::QrError::DataTooLong.into();
        assert_eq!(err.kind(), "encoding_failure");
        assert!(!err.is_user_error());
    }
}
