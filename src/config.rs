//! # Configuration Module
//!
//! JSON configuration for a generation run.
//!
//! ```json
//! {
//!   "project_name": "demo",
//!   "db_config": { "driver_name": "mysql", "table_prefix": "t_", "schema_file": "schema.json" },
//!   "gen_config": { "output_path": "./output", "author": "admin", "strip_table_prefix": true },
//!   "package_config": { "base_package": "com.example", "entity_package": "com.example.entity" },
//!   "template_config": { "root": "templates" }
//! }
//! ```
//!
//! Every key is optional; missing keys take the values of [`Config::default`].
//! When the file does not exist, [`load_or_create_config`] writes the default
//! configuration to that path and returns it.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::ConfigError;

/// Output root used when `gen_config.output_path` is empty.
pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// Format of `gen_config.date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project_name: String,
    pub db_config: DbConfig,
    pub gen_config: GenConfig,
    pub package_config: PackageConfig,
    pub template_config: TemplateConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_name: "demo".to_string(),
            db_config: DbConfig::default(),
            gen_config: GenConfig::default(),
            package_config: PackageConfig::default(),
            template_config: TemplateConfig::default(),
        }
    }
}

/// Database connection and table selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub driver_name: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database_name: String,
    /// Prefix removed from table names when `gen_config.strip_table_prefix` is set
    pub table_prefix: String,
    /// Tables to generate; empty means all
    pub include_tables: Vec<String>,
    pub exclude_tables: Vec<String>,
    /// JSON schema snapshot, relative to the config file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_file: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            driver_name: "mysql".to_string(),
            host: "localhost".to_string(),
            port: 3306,
            username: "root".to_string(),
            password: "password".to_string(),
            database_name: "test_db".to_string(),
            table_prefix: "t_".to_string(),
            include_tables: Vec::new(),
            exclude_tables: Vec::new(),
            schema_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    pub output_path: String,
    pub enable_lombok: bool,
    pub enable_swagger: bool,
    pub author: String,
    /// Stamp written into generated headers; today's date when empty
    pub date: String,
    /// Remove `db_config.table_prefix` before deriving class names
    pub strip_table_prefix: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            enable_lombok: true,
            enable_swagger: true,
            author: "admin".to_string(),
            date: String::new(),
            strip_table_prefix: false,
        }
    }
}

impl GenConfig {
    /// Output root, falling back to [`DEFAULT_OUTPUT_PATH`].
    pub fn output_root(&self) -> &str {
        if self.output_path.is_empty() {
            DEFAULT_OUTPUT_PATH
        } else {
            &self.output_path
        }
    }
}

/// Java package of every generated artifact kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    pub base_package: String,
    pub entity_package: String,
    pub mapper_package: String,
    pub service_package: String,
    pub controller_package: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            base_package: "com.example".to_string(),
            entity_package: "com.example.entity".to_string(),
            mapper_package: "com.example.mapper".to_string(),
            service_package: "com.example.service".to_string(),
            controller_package: "com.example.controller".to_string(),
        }
    }
}

impl PackageConfig {
    /// The four per-artifact packages, in entity/mapper/service/controller order.
    pub fn artifact_packages(&self) -> [&str; 4] {
        [
            &self.entity_package,
            &self.mapper_package,
            &self.service_package,
            &self.controller_package,
        ]
    }
}

/// Where templates live and how their output paths are derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template root directory
    pub root: String,
    /// File suffix marking a template
    pub suffix: String,
    /// Relative-path prefix identifying language sources (`java/`)
    pub source_marker: String,
    /// Prepended to derived output paths that start with `source_marker`
    pub source_root: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            root: "templates".to_string(),
            suffix: ".tpl".to_string(),
            source_marker: "java/".to_string(),
            source_root: "/".to_string(),
        }
    }
}

/// Fill in `gen_config.date` with `today` when it is unset.
pub fn apply_default_date(config: &mut Config, today: chrono::NaiveDate) {
    if config.gen_config.date.is_empty() {
        config.gen_config.date = today.format(DATE_FORMAT).to_string();
    }
}

/// Read the configuration at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `config` to `path` as pretty-printed JSON.
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, json).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the configuration, bootstrapping a default one when the file is missing.
///
/// Returns the configuration and whether it was freshly created.
pub fn load_or_create_config(path: &Path) -> Result<(Config, bool), ConfigError> {
    if path.exists() {
        return Ok((load_config(path)?, false));
    }
    let config = Config::default();
    save_config(&config, path)?;
    info!(path = %path.display(), "wrote default configuration");
    Ok((config, true))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::fs;

    #[test]
    fn test_partial_config_takes_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "project_name": "shop", "gen_config": { "author": "dev" } }"#,
        )
        .unwrap();
        assert_eq!(config.project_name, "shop");
        assert_eq!(config.gen_config.author, "dev");
        assert_eq!(config.gen_config.output_path, DEFAULT_OUTPUT_PATH);
        assert_eq!(config.package_config, PackageConfig::default());
        assert_eq!(config.template_config.suffix, ".tpl");
    }

    #[test]
    fn test_output_root_fallback() {
        let mut gen = GenConfig::default();
        gen.output_path.clear();
        assert_eq!(gen.output_root(), DEFAULT_OUTPUT_PATH);
        gen.output_path = "out".into();
        assert_eq!(gen.output_root(), "out");
    }

    #[test]
    fn test_default_date_only_when_unset() {
        let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let mut config = Config::default();
        apply_default_date(&mut config, today);
        assert_eq!(config.gen_config.date, "2024-03-09");

        config.gen_config.date = "1999-01-01".into();
        apply_default_date(&mut config, today);
        assert_eq!(config.gen_config.date, "1999-01-01");
    }

    #[test]
    fn test_load_or_create_bootstraps_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let (config, created) = load_or_create_config(&path).unwrap();
        assert!(created);
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let (reloaded, created) = load_or_create_config(&path).unwrap();
        assert!(!created);
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }
}
