//! Helpers for rendering results as JSON and terminal text

use crate::catalog::TaskCatalog;
use crate::error::Error;
use crate::generator::Generated;
use crate::qr::QrPayload;
use crate::record::Record;
use hex::encode as hex_encode;
use serde_json::{Value, json};

/// Combined structured and human-readable representation of a result
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Structured JSON representation for scripts
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Success report for a generated image.
pub fn render_generated(generated: &Generated) -> Rendered {
    let json = json!({
        "record": generated.wire,
        "file_name": generated.file_name,
        "path": generated.path.display().to_string(),
        "width": generated.width,
        "height": generated.height,
        "task": {
            "code": generated.task.code,
            "description": generated.task.description,
            "work_code": generated.task.work_code,
            "in_catalog": generated.known_task,
        },
    });

    let mut human = vec![
        "QR generated successfully".to_string(),
        format!("  Record: {}", generated.wire),
        format!("  Saved as: {}", generated.file_name),
        format!("  Size: {}x{}", generated.width, generated.height),
    ];
    if !generated.known_task {
        human.push(format!(
            "  Note: task {} is not in the catalog, work code {} was used",
            generated.task.code, generated.task.work_code
        ));
    }

    Rendered { json, human }
}

/// Report for a payload read back from an image.
pub fn render_decoded(payload: &QrPayload) -> Rendered {
    let record = payload.as_str().map(Record::parse);

    let record_json = match &record {
        Some(Ok(record)) => json!({
            "work_code": record.work_code(),
            "task_code": record.task_code(),
            "order_code": record.order_code(),
            "mu_code": record.mu_code(),
            "address": record.address(),
        }),
        _ => Value::Null,
    };

    let json = json!({
        "text": payload.as_str(),
        "bytes_hex": hex_encode(payload.as_bytes()),
        "byte_length": payload.as_bytes().len(),
        "record": record_json,
    });

    let mut human = Vec::new();
    match payload.as_str() {
        Some(text) => human.push(format!("QR text: {text}")),
        None => human.push(format!(
            "QR binary payload ({} bytes)",
            payload.as_bytes().len()
        )),
    }
    match record {
        Some(Ok(record)) => {
            human.push(format!("  Work code: {}", record.work_code()));
            human.push(format!("  Task code: {}", record.task_code()));
            human.push(format!("  Order code: {}", record.order_code()));
            human.push(format!("  MU code: {}", record.mu_code()));
            human.push(format!("  Address: {}", record.address()));
        }
        Some(Err(err)) => human.push(format!("  Not an NWTA record: {err}")),
        None => {}
    }

    Rendered { json, human }
}

/// Listing of the task catalog.
pub fn render_catalog(catalog: &TaskCatalog) -> Rendered {
    let json = Value::Array(
        catalog
            .iter()
            .map(|entry| {
                json!({
                    "code": entry.code,
                    "description": entry.description,
                    "work_code": entry.work_code,
                    "display": entry.display(),
                })
            })
            .collect(),
    );
    let human = catalog.display_options();
    Rendered { json, human }
}

/// Error report.
pub fn render_error(err: &Error) -> Rendered {
    let mut json = json!({
        "error": err.to_string(),
        "kind": err.kind(),
    });
    if let Error::MissingField { fields } = err {
        json["fields"] = json!(fields);
    }

    let prefix = if err.is_user_error() { "Error" } else { "Failed" };
    Rendered {
        json,
        human: vec![format!("{prefix}: {err}")],
    }
}
