//! Request handler: form in, captioned QR image on disk out

use crate::catalog::{TaskCatalog, TaskEntry};
use crate::error::Result;
use crate::form::{InputForm, validate};
use crate::persist::{output_file_name, write_png};
use crate::record::{Record, build_record};
use crate::render::{Caption, Renderer};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of a successful generation request
#[derive(Debug, Clone, Serialize)]
pub struct Generated {
    /// Record as built from the form
    #[serde(skip)]
    pub record: Record,
    /// Pipe-joined record encoded in the symbol
    pub wire: String,
    /// Catalog entry the task code resolved to
    pub task: TaskEntry,
    /// Whether the task code was found in the catalog
    pub known_task: bool,
    /// File name (`QR_{task}_{order}.png`)
    pub file_name: String,
    /// Full path the image was written to
    pub path: PathBuf,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

/// Validates, builds, renders and persists one request at a time
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    catalog: &'a TaskCatalog,
    renderer: Renderer,
    output_dir: PathBuf,
}

impl<'a> Generator<'a> {
    /// Create a generator writing into `output_dir`
    pub fn new(catalog: &'a TaskCatalog, renderer: Renderer, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            renderer,
            output_dir: output_dir.into(),
        }
    }

    /// Directory images are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Renderer used for images
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Handle one request.
    ///
    /// Nothing is written unless validation, encoding and composition all
    /// succeed. An existing file with the same name is replaced.
    pub fn generate(&self, form: &InputForm) -> Result<Generated> {
        let valid = validate(form)?;

        let known_task = self.catalog.contains(&valid.task_code);
        let task = self.catalog.lookup(&valid.task_code);
        if !known_task {
            warn!(
                task_code = %valid.task_code,
                work_code = %task.work_code,
                "Task code not in catalog, using default work code"
            );
        }

        let record = build_record(
            &valid.task_code,
            &valid.order_code,
            &valid.mu_code,
            &valid.address,
            &task.work_code,
        );
        let wire = record.to_wire();
        debug!(record = %wire, "Built record");

        let caption = Caption {
            order_code: valid.order_code.clone(),
            address: valid.address.clone(),
            task_code: valid.task_code.clone(),
            description: task.description.clone(),
        };
        let image = self.renderer.render(&record, &caption)?;

        let file_name = output_file_name(&valid.task_code, &valid.order_code);
        let path = write_png(&self.output_dir, &file_name, &image)?;

        info!(
            file = %path.display(),
            task_code = %valid.task_code,
            order_code = %valid.order_code,
            "Generated QR image"
        );

        Ok(Generated {
            record,
            wire,
            task,
            known_task,
            file_name,
            path,
            width: image.width(),
            height: image.height(),
        })
    }
}
