use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

const APP_DIR_NAME: &str = "signin";
const CONFIG_FILE_NAME: &str = "config.json";

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub fn filter_directive(&self) -> String {
        let level = self.as_str();
        format!(
            "{level},signin_domain={level},signin_infrastructure={level},signin_app={level},sqlx=warn"
        )
    }
}

/// Connection settings for the bitmap store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub max_connections: u32,

    /// Upper bound for a single store round trip
    pub operation_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: default_data_dir().join("signin.db"),
            max_connections: 5,
            operation_timeout_ms: 3_000,
        }
    }
}

impl StoreConfig {
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

/// Persistent configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LogLevel,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load the config from `path`, or from the platform config dir when `None`.
    ///
    /// A missing file yields defaults; a file that exists but does not parse is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

        if !path.exists() {
            info!(config_path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str::<AppConfig>(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!(
            config_path = %path.display(),
            log_level = config.log_level.as_str(),
            database = %config.store.database_path.display(),
            "Config loaded"
        );
        Ok(config)
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(config_path = %path.display(), "Config saved");
        Ok(())
    }
}

/// `<config dir>/signin/config.json`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// `<local data dir>/signin`
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// `<local data dir>/signin/logs`
pub fn default_log_dir() -> PathBuf {
    default_data_dir().join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_string() {
        assert_eq!(LogLevel::Error.as_str(), "error");
        assert_eq!(LogLevel::Info.as_str(), "info");
        assert_eq!(LogLevel::Trace.as_str(), "trace");
    }

    #[test]
    fn test_filter_directive_covers_workspace_crates() {
        let directive = LogLevel::Debug.filter_directive();
        assert!(directive.starts_with("debug,"));
        assert!(directive.contains("signin_domain=debug"));
        assert!(directive.contains("signin_app=debug"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("absent.json"))).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.store.operation_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "log_level": "debug", "store": { "operation_timeout_ms": 250 } }"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.store.operation_timeout_ms, 250);
        assert_eq!(config.store.max_connections, 5);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            log_level: LogLevel::Warn,
            store: StoreConfig {
                database_path: dir.path().join("bitmaps.db"),
                max_connections: 2,
                operation_timeout_ms: 500,
            },
        };

        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(Some(&path)).unwrap(), config);
    }
}
