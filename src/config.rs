use crate::core::timestamp::{DEFAULT_DATE_FORMAT, TimestampUnit, validate_date_format};
use crate::utils::{get_data_dir, write_atomic};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Persisted application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Unit assumed when `devkit timestamp` gets neither `--seconds` nor `--millis`
    #[serde(default)]
    pub default_unit: TimestampUnit,
    /// strftime format used to render converted timestamps
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Oldest history entries beyond this count are dropped on save
    #[serde(default = "default_max_history_entries")]
    pub max_history_entries: usize,
    /// Write logs to the state directory instead of stderr
    #[serde(default = "default_true")]
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_unit: TimestampUnit::Milliseconds,
            date_format: default_date_format(),
            max_history_entries: default_max_history_entries(),
            log_to_file: true,
        }
    }
}

impl AppConfig {
    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> crate::Result<()> {
        validate_date_format(&self.date_format)?;
        if self.max_history_entries == 0 {
            return Err(crate::Error::Validation {
                field: "max_history_entries".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_max_history_entries() -> usize {
    200
}

fn default_true() -> bool {
    true
}

/// Path of the config file in the data directory
pub fn config_path() -> crate::Result<PathBuf> {
    let mut path = get_data_dir().ok_or(crate::Error::DataDirUnavailable)?;
    path.push(CONFIG_FILE_NAME);
    Ok(path)
}

/// Saves the config to `path` using an atomic write (temp file, 0o600, rename).
///
/// # Errors
///
/// Rejects configs that fail [`AppConfig::validate`] without touching the file.
pub async fn save_config_to(path: &Path, config: &AppConfig) -> crate::Result<()> {
    config.validate()?;
    let json = serde_json::to_string_pretty(config)?;
    write_atomic(path, json.as_bytes()).await?;
    Ok(())
}

/// Loads the config from `path`. A missing file yields the defaults.
///
/// # Errors
///
/// Unreadable or unparsable files, and settings that fail
/// [`AppConfig::validate`], are returned as errors so the caller can report
/// them before falling back.
pub async fn try_load_config_from(path: &Path) -> crate::Result<AppConfig> {
    let json = match tokio::fs::read_to_string(path).await {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => return Err(e.into()),
    };
    let config: AppConfig = serde_json::from_str(&json)?;
    config.validate()?;
    Ok(config)
}

/// Loads the config from `path`, or returns default if missing or invalid.
pub async fn load_config_from(path: &Path) -> AppConfig {
    try_load_config_from(path).await.unwrap_or_else(|e| {
        tracing::warn!("Ignoring settings in {}: {e}", path.display());
        AppConfig::default()
    })
}

/// Saves the config to the data directory.
pub async fn save_config(config: &AppConfig) -> crate::Result<()> {
    save_config_to(&config_path()?, config).await
}

/// Loads the config from the data directory.
///
/// Without a data directory the defaults apply.
pub async fn try_load_config() -> crate::Result<AppConfig> {
    match config_path() {
        Ok(path) => try_load_config_from(&path).await,
        Err(_) => Ok(AppConfig::default()),
    }
}
