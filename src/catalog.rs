//! Task catalog: task code → (description, work code)
//!
//! The catalog is built once at startup, either from the built-in table or
//! from configuration, and handed by reference to whatever needs it.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Work code reported for task codes missing from the catalog
pub const DEFAULT_WORK_CODE: &str = "03";

/// Separator between code and description in selection strings
pub const SELECTION_SEPARATOR: &str = " - ";

const BUILTIN_TASKS: [(&str, &str, &str); 11] = [
    ("01", "Inspección de red baja tensión", "01"),
    ("02", "Mantenimiento de transformador", "01"),
    ("03", "Cambio de poste", "01"),
    ("04", "Revisión de conexión", "02"),
    ("05", "Instalación de medidor", "02"),
    ("06", "Reparación de línea secundaria", "03"),
    ("07", "Sustitución de fusible", "03"),
    ("08", "Ajuste de acometida", "03"),
    ("09", "Verificación de tensión", "02"),
    ("10", "Reinstalación de suministro", "03"),
    ("14", "Reparación principal", "03"),
];

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    /// Two-digit task code
    pub code: String,
    /// Human readable description shown in the caption
    pub description: String,
    /// Two-digit work classification code embedded in the record
    pub work_code: String,
}

impl TaskEntry {
    /// Create an entry from its three parts
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        work_code: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            work_code: work_code.into(),
        }
    }

    /// `"code - description"` as shown in the selection list
    pub fn display(&self) -> String {
        format!("{}{}{}", self.code, SELECTION_SEPARATOR, self.description)
    }
}

/// Immutable, ordered lookup table of tasks
#[derive(Debug, Clone)]
pub struct TaskCatalog {
    entries: IndexMap<String, TaskEntry>,
}

impl TaskCatalog {
    /// The hand-maintained table of eleven tasks
    pub fn builtin() -> Self {
        let entries = BUILTIN_TASKS
            .iter()
            .map(|(code, description, work)| {
                (code.to_string(), TaskEntry::new(*code, *description, *work))
            })
            .collect();
        Self { entries }
    }

    /// Build a catalog from configured entries, preserving their order.
    ///
    /// Empty or duplicated codes are rejected.
    pub fn from_entries(entries: impl IntoIterator<Item = TaskEntry>) -> Result<Self> {
        let mut map = IndexMap::new();
        for entry in entries {
            if entry.code.trim().is_empty() {
                return Err(Error::Config(format!(
                    "Catalog entry '{}' has an empty task code",
                    entry.description
                )));
            }
            if map.contains_key(&entry.code) {
                return Err(Error::Config(format!(
                    "Duplicate task code '{}' in catalog",
                    entry.code
                )));
            }
            map.insert(entry.code.clone(), entry);
        }
        Ok(Self { entries: map })
    }

    /// Resolve a task code.
    ///
    /// Unknown codes are not an error: they resolve to an empty description
    /// and [`DEFAULT_WORK_CODE`].
    pub fn lookup(&self, code: &str) -> TaskEntry {
        match self.entries.get(code) {
            Some(entry) => entry.clone(),
            None => TaskEntry::new(code, "", DEFAULT_WORK_CODE),
        }
    }

    /// Whether the code is present in the table
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Selection strings in catalog order
    pub fn display_options(&self) -> Vec<String> {
        self.entries.values().map(TaskEntry::display).collect()
    }

    /// Iterate entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &TaskEntry> {
        self.entries.values()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TaskCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Extract the task code from a selection string such as `"14 - Reparación principal"`.
///
/// A bare code (no separator) is returned unchanged.
pub fn selection_code(selection: &str) -> &str {
    selection
        .split(SELECTION_SEPARATOR)
        .next()
        .unwrap_or(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_eleven_entries_in_order() {
        let catalog = TaskCatalog::builtin();
        assert_eq!(catalog.len(), 11);
        let codes: Vec<_> = catalog.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(
            codes,
            ["01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "14"]
        );
    }

    #[test]
    fn lookup_known_code() {
        let entry = TaskCatalog::builtin().lookup("01");
        assert_eq!(entry.description, "Inspección de red baja tensión");
        assert_eq!(entry.work_code, "01");
    }

    #[test]
    fn lookup_unknown_code_defaults() {
        let entry = TaskCatalog::builtin().lookup("99");
        assert_eq!(entry.code, "99");
        assert_eq!(entry.description, "");
        assert_eq!(entry.work_code, DEFAULT_WORK_CODE);
    }

    #[test]
    fn display_options_use_separator() {
        let options = TaskCatalog::builtin().display_options();
        assert_eq!(options[0], "01 - Inspección de red baja tensión");
        assert_eq!(options[10], "14 - Reparación principal");
    }

    #[test]
    fn selection_code_takes_prefix() {
        assert_eq!(selection_code("14 - Reparación principal"), "14");
        assert_eq!(selection_code("14"), "14");
        assert_eq!(selection_code("07 - A - B"), "07");
    }

    #[test]
    fn from_entries_rejects_duplicates() {
        let err = TaskCatalog::from_entries([
            TaskEntry::new("01", "a", "01"),
            TaskEntry::new("01", "b", "02"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn from_entries_rejects_empty_code() {
        let err = TaskCatalog::from_entries([TaskEntry::new(" ", "a", "01")]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
