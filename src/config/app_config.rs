use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::errors::{Result, WorklogError};
use crate::core::services::audit_trail::DEFAULT_PREVIEW_CHARS;
use crate::core::services::query_engine::DEFAULT_SEARCH_LIMIT;

/// Directory name used under the platform config and data directories.
pub const APP_DIR: &str = "worklog-mcp";

/// Top-level worklog configuration read from `config.toml`.
///
/// Every section is optional; a missing file means all defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub report: ReportSection,
}

impl AppConfig {
    /// Load the configuration from `path`, or defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| WorklogError::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", path.display()),
        })?;

        if config.search.default_limit < 1 {
            return Err(WorklogError::InvalidConfig {
                detail: format!(
                    "search.default_limit must be at least 1, got {}",
                    config.search.default_limit
                ),
            });
        }
        if config.report.preview_chars == 0 {
            return Err(WorklogError::InvalidConfig {
                detail: "report.preview_chars must be at least 1".into(),
            });
        }

        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| WorklogError::InvalidConfig {
            detail: format!("Failed to serialize config: {e}"),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Effective database path: `cli_override`, then `storage.db_path`,
    /// then the platform default.
    pub fn resolve_db_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(path.to_path_buf());
        }
        match &self.storage.db_path {
            Some(custom) => Ok(PathBuf::from(custom)),
            None => default_db_path(),
        }
    }
}

/// `<config dir>/worklog-mcp/config.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join("config.toml"))
        .ok_or_else(|| WorklogError::InvalidConfig {
            detail: "Cannot determine the config directory. Pass --config explicitly.".into(),
        })
}

/// `<data dir>/worklog-mcp/logs.db`.
pub fn default_db_path() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join("logs.db"))
        .ok_or_else(|| WorklogError::InvalidConfig {
            detail: "Cannot determine the data directory. Pass --db explicitly.".into(),
        })
}

/// The `[storage]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSection {
    /// Custom database file; the platform default is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<String>,
}

/// The `[search]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSection {
    #[serde(default = "default_search_limit")]
    pub default_limit: i64,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            default_limit: default_search_limit(),
        }
    }
}

fn default_search_limit() -> i64 {
    DEFAULT_SEARCH_LIMIT
}

/// The `[report]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Characters of content quoted in edit/delete history entries.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            preview_chars: default_preview_chars(),
        }
    }
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}
