//! TOML configuration file.
//!
//! ```toml
//! [table]
//! path = "data/hsn_codes.csv"
//! code_column = "HSNCode"
//! description_column = "Description"
//!
//! [suggest]
//! limit = 5
//! min_confidence = 60
//! scorer = "token_set"
//!
//! [validate]
//! hierarchy = "placeholder"
//! ```
//!
//! Every key is optional. Command-line flags and environment variables take
//! precedence over the file; the file takes precedence over built-in defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use hsn_model::{SuggestOptions, ValidateOptions};
use hsn_standards::TableLayout;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "HSN_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub table: TableSettings,
    pub suggest: SuggestOptions,
    pub validate: ValidateOptions,
}

/// `[table]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_column: Option<String>,
}

impl TableSettings {
    /// Column layout with unset names falling back to the defaults.
    pub fn layout(&self) -> TableLayout {
        let defaults = TableLayout::default();
        TableLayout::new(
            self.code_column.clone().unwrap_or(defaults.code_column),
            self.description_column
                .clone()
                .unwrap_or(defaults.description_column),
        )
    }
}

impl AppConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("parse config")
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load the config named by `explicit`, else by `HSN_CONFIG`.
    ///
    /// With neither set, returns the defaults. A named file that cannot be
    /// read or parsed is an error.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let env = env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match config_path(explicit, env.as_deref()) {
            Some(path) => Self::load(&path),
            None => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize config")
    }
}

/// Choose the config file: the flag, then a non-empty environment value.
pub fn config_path(explicit: Option<&Path>, env: Option<&Path>) -> Option<PathBuf> {
    explicit
        .or(env.filter(|p| !p.as_os_str().is_empty()))
        .map(Path::to_path_buf)
}
