//! Runtime configuration handling

use crate::catalog::{TaskCatalog, TaskEntry};
use crate::error::{Error, Result};
use crate::qr::{DEFAULT_MODULE_SIZE, QrEncoder};
use crate::render::{
    BitmapFont, CaptionLayout, DEFAULT_CAPTION_HEIGHT, DEFAULT_FIRST_LINE_OFFSET,
    DEFAULT_SECOND_LINE_OFFSET, Renderer,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure read from disk and environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Task catalog override
    pub catalog: CatalogOptions,
    /// Image rendering options
    pub render: RenderOptions,
    /// Output location
    pub output: OutputOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl AppConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No nwta-qr.toml / nwta-qr.yaml found, using defaults");
            Self::default()
        };

        config.apply_overrides(|key| env::var(key).ok());
        config.render.validate()?;
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["nwta-qr.toml", "nwta-qr.yaml", "nwta-qr.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("nwta-qr");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => Self::from_toml(&contents)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display()))),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Parse TOML configuration text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config(format!("Failed to parse TOML: {e}")))
    }

    /// Apply `NWTA_QR_*` overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.render.apply_overrides(&lookup);
        self.output.apply_overrides(&lookup);
        self.logging.apply_overrides(&lookup);
    }

    /// Build the task catalog: configured entries, or the built-in table when none are given.
    pub fn task_catalog(&self) -> Result<TaskCatalog> {
        self.catalog.to_catalog()
    }

    /// Build the image renderer from render options.
    pub fn renderer(&self) -> Result<Renderer> {
        self.render.validate()?;
        Ok(self.render.to_renderer())
    }
}

/// Catalog override; an empty list keeps the built-in table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOptions {
    /// Entries in display order
    pub tasks: Vec<TaskEntry>,
}

impl CatalogOptions {
    /// Resolve into a catalog.
    pub fn to_catalog(&self) -> Result<TaskCatalog> {
        if self.tasks.is_empty() {
            Ok(TaskCatalog::builtin())
        } else {
            TaskCatalog::from_entries(self.tasks.iter().cloned())
        }
    }
}

/// QR and caption rendering options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Pixel size of one QR module
    pub module_size: u32,
    /// Surround the symbol with a 4-module quiet zone
    pub quiet_zone: bool,
    /// Caption band height in pixels
    pub caption_height: u32,
    /// First caption line offset from the band top
    pub first_line_offset: u32,
    /// Second caption line offset from the band top
    pub second_line_offset: u32,
    /// Integer scale of the 8x8 caption font
    pub font_scale: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_size: DEFAULT_MODULE_SIZE,
            quiet_zone: true,
            caption_height: DEFAULT_CAPTION_HEIGHT,
            first_line_offset: DEFAULT_FIRST_LINE_OFFSET,
            second_line_offset: DEFAULT_SECOND_LINE_OFFSET,
            font_scale: 1,
        }
    }
}

impl RenderOptions {
    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(size) = lookup("NWTA_QR_MODULE_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.module_size = parsed;
            }
        }
    }

    /// Reject zero sizes.
    pub fn validate(&self) -> Result<()> {
        if self.module_size == 0 {
            return Err(Error::Config("render.module_size must be at least 1".into()));
        }
        if self.font_scale == 0 {
            return Err(Error::Config("render.font_scale must be at least 1".into()));
        }
        if self.caption_height == 0 {
            return Err(Error::Config(
                "render.caption_height must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Assemble a renderer from these options.
    pub fn to_renderer(&self) -> Renderer {
        let encoder = QrEncoder::new()
            .with_module_size(self.module_size)
            .with_quiet_zone(self.quiet_zone);
        let layout = CaptionLayout {
            height: self.caption_height,
            first_line_offset: self.first_line_offset,
            second_line_offset: self.second_line_offset,
        };
        Renderer::new(encoder, BitmapFont::new(self.font_scale), layout)
    }
}

/// Where generated images go
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Output directory; the working directory by default
    pub directory: PathBuf,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl OutputOptions {
    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("NWTA_QR_OUTPUT_DIR") {
            if !dir.trim().is_empty() {
                self.directory = PathBuf::from(dir);
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `NWTA_QR_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in terminal logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup("NWTA_QR_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = lookup("NWTA_QR_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(color) = lookup("NWTA_QR_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Some(rotation) = lookup("NWTA_QR_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_reference_layout() {
        let config = AppConfig::default();
        assert_eq!(config.render.module_size, 10);
        assert_eq!(config.render.caption_height, 100);
        assert_eq!(config.render.first_line_offset, 15);
        assert_eq!(config.render.second_line_offset, 35);
        assert_eq!(config.output.directory, PathBuf::from("."));
        assert_eq!(config.task_catalog().unwrap().len(), 11);
    }

    #[test]
    fn toml_catalog_override() {
        let config = AppConfig::from_toml(
            r#"
            [render]
            module_size = 4

            [[catalog.tasks]]
            code = "20"
            description = "Poda de árboles"
            work_code = "02"
            "#,
        )
        .unwrap();

        assert_eq!(config.render.module_size, 4);
        assert!(config.render.quiet_zone);
        let catalog = config.task_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup("20").work_code, "02");
        assert_eq!(catalog.lookup("01").work_code, "03");
    }

    #[test]
    fn yaml_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nwta-qr.yaml");
        fs::write(&path, "output:\n  directory: /tmp/qr\nlogging:\n  level: debug\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.output.directory, PathBuf::from("/tmp/qr"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nwta-qr.ini");
        fs::write(&path, "").unwrap();
        assert!(matches!(AppConfig::from_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn env_overrides_apply() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("NWTA_QR_LOG_LEVEL", "trace"),
            ("NWTA_QR_LOG_COLOR", "off"),
            ("NWTA_QR_LOG_ROTATION", "daily"),
            ("NWTA_QR_OUTPUT_DIR", "out"),
            ("NWTA_QR_MODULE_SIZE", "3"),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.logging.level, "trace");
        assert!(!config.logging.color);
        assert_eq!(config.logging.rotation, Some(LogRotation::Daily));
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(config.render.module_size, 3);
    }

    #[test]
    fn zero_module_size_is_invalid() {
        let mut config = AppConfig::default();
        config.render.module_size = 0;
        assert!(matches!(config.renderer(), Err(Error::Config(_))));
    }

    #[test]
    fn duplicate_catalog_codes_are_invalid() {
        let config = AppConfig::from_toml(
            r#"
            [[catalog.tasks]]
            code = "01"
            description = "a"
            work_code = "01"

            [[catalog.tasks]]
            code = "01"
            description = "b"
            work_code = "01"
            "#,
        )
        .unwrap();
        assert!(config.task_catalog().is_err());
    }
}
