//! NWTA QR - captioned work-order QR images
//!
//! Builds the 13-field pipe-delimited NWTA record from a task selection and
//! three free-text fields, encodes it into a QR symbol, prints the order,
//! address and task under the symbol, and writes the result to
//! `QR_{task}_{order}.png`.
//!
//! # Example
//!
//! ```no_run
//! use nwta_qr::{Generator, InputForm, Renderer, TaskCatalog};
//!
//! fn main() -> nwta_qr::Result<()> {
//!     let catalog = TaskCatalog::builtin();
//!     let generator = Generator::new(&catalog, Renderer::default(), ".");
//!
//!     let form = InputForm::new("14 - Reparación principal", "1234", "MU9", "Calle 5");
//!     let generated = generator.generate(&form)?;
//!
//!     println!("{} -> {}", generated.wire, generated.file_name);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod generator;
pub mod logging;
pub mod output;
pub mod persist;
pub mod prompt;
pub mod qr;
pub mod record;
pub mod render;

// Re-exports for convenience
pub use error::{Error, Result};

pub use catalog::{TaskCatalog, TaskEntry};
pub use config::{AppConfig, LogRotation, LoggingOptions, OutputOptions, RenderOptions};
pub use form::{InputForm, ValidForm, validate};
pub use generator::{Generated, Generator};
pub use qr::{QrDecoder, QrEncoder, QrPayload};
pub use record::{Record, build_record};
pub use render::{Caption, Renderer};
