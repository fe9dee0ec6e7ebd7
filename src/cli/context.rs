use std::path::{Path, PathBuf};

use crate::config::app_config::{self, AppConfig};
use crate::core::errors::Result;

/// Everything resolved once at startup and handed to each command.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config_path: PathBuf,
    pub config: AppConfig,
    pub db_path: PathBuf,
}

impl AppContext {
    /// Resolve the config file and database location.
    ///
    /// `config_override` and `db_override` come from `--config` / `--db`.
    pub fn resolve(config_override: Option<&Path>, db_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_override {
            Some(path) => path.to_path_buf(),
            None => app_config::default_config_path()?,
        };
        let config = AppConfig::load(&config_path)?;
        let db_path = config.resolve_db_path(db_override)?;
        Ok(Self {
            config_path,
            config,
            db_path,
        })
    }
}

/// Expand a leading `~` and make `raw` absolute against the current directory.
pub fn absolute_path(raw: &str) -> Result<PathBuf> {
    let expanded = match raw.strip_prefix("~") {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => {
            match dirs::home_dir() {
                Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
                None => PathBuf::from(raw),
            }
        }
        _ => PathBuf::from(raw),
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(std::env::current_dir()?.join(expanded))
    }
}
