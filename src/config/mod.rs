// src/config/mod.rs
//
// Runtime configuration
//
// Resolution order:
// 1. Explicit file passed by the caller
// 2. {CONFIG_DIR}/dsmovie/config.toml, if it exists
// 3. Built-in defaults
//
// DSMOVIE_DATABASE overrides the database path in every case.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

pub const DATABASE_ENV: &str = "DSMOVIE_DATABASE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file; `None` means `{DATA_DIR}/dsmovie/dsmovie.db`
    pub path: Option<PathBuf>,
    pub max_connections: u32,
    pub busy_timeout_ms: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: 15,
            busy_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 12,
            max_page_size: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// env_logger filter used when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "dsmovie=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration following the resolution order above
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        if let Ok(db) = std::env::var(DATABASE_ENV) {
            if !db.trim().is_empty() {
                config.database.path = Some(PathBuf::from(db));
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> AppResult<Self> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.database.max_connections == 0 {
            return Err(AppError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.pagination.default_page_size == 0 || self.pagination.max_page_size == 0 {
            return Err(AppError::Config(
                "pagination sizes must be at least 1".to_string(),
            ));
        }
        if self.pagination.default_page_size > self.pagination.max_page_size {
            return Err(AppError::Config(format!(
                "pagination.default_page_size ({}) exceeds max_page_size ({})",
                self.pagination.default_page_size, self.pagination.max_page_size
            )));
        }
        Ok(())
    }
}

/// {CONFIG_DIR}/dsmovie/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dsmovie").join("config.toml"))
}
