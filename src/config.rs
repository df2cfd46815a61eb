//! Configuration file support for txe-quote.
//!
//! Provides YAML-based configuration through `txe-quote.config.yml` files,
//! including data structures, file loading, validation and merging with
//! command-line overrides.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::adapters::outbound::filesystem::DEFAULT_MAX_BACKUPS;
use crate::application::dto::OutputFormat;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "txe-quote.config.yml";

const DEFAULT_CATALOG_PATH: &str = "data/product-catalog.json";
const DEFAULT_BACKUPS_DIR: &str = "data/catalog-backups";
const DEFAULT_CLI_AUTHOR: &str = "cli";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub catalog_path: Option<PathBuf>,
    pub backups_dir: Option<PathBuf>,
    pub max_backups: Option<usize>,
    pub format: Option<String>,
    pub updated_by: Option<String>,
    /// YAML file replacing the built-in compatibility table.
    pub compatibility_path: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty file is a valid, empty configuration
    let config: ConfigFile = if content.trim().is_empty() {
        ConfigFile::default()
    } else {
        serde_yaml_ng::from_str(&content).with_context(|| {
            format!(
                "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
                path.display()
            )
        })?
    };

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.max_backups == Some(0) {
        bail!(
            "Invalid config: max_backups must be at least 1.\n\n\
             💡 Hint: Remove the key to keep the default of {} backups.",
            DEFAULT_MAX_BACKUPS
        );
    }

    if let Some(ref format) = config.format {
        if let Err(e) = format.parse::<OutputFormat>() {
            bail!("Invalid config: {}", e);
        }
    }

    if let Some(ref updated_by) = config.updated_by {
        if updated_by.trim().is_empty() {
            bail!(
                "Invalid config: updated_by must not be empty.\n\n\
                 💡 Hint: Use a name or initials, e.g. \"updated_by: jdoe\"."
            );
        }
    }

    for (key, path) in [
        ("catalog_path", &config.catalog_path),
        ("backups_dir", &config.backups_dir),
        ("compatibility_path", &config.compatibility_path),
    ] {
        if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            bail!("Invalid config: {} must not be empty.", key);
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub catalog_path: Option<PathBuf>,
    pub backups_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}

/// Effective settings after merging CLI, config file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub catalog_path: PathBuf,
    pub backups_dir: PathBuf,
    pub max_backups: usize,
    pub format: OutputFormat,
    pub updated_by: String,
    pub compatibility_path: Option<PathBuf>,
}

impl Settings {
    /// Merges the sources with precedence CLI > config file > defaults.
    pub fn resolve(config: Option<ConfigFile>, overrides: CliOverrides) -> Result<Self> {
        let config = config.unwrap_or_default();

        let format = match (overrides.format, config.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(value)) => value
                .parse::<OutputFormat>()
                .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?,
            (None, None) => OutputFormat::default(),
        };

        Ok(Self {
            catalog_path: overrides
                .catalog_path
                .or(config.catalog_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH)),
            backups_dir: overrides
                .backups_dir
                .or(config.backups_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BACKUPS_DIR)),
            max_backups: config.max_backups.unwrap_or(DEFAULT_MAX_BACKUPS),
            format,
            updated_by: config
                .updated_by
                .unwrap_or_else(|| DEFAULT_CLI_AUTHOR.to_string()),
            compatibility_path: config.compatibility_path,
        })
    }
}
