//! Client configuration, read from a RON file.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Without `--config` the client looks for `./jobseek.ron` and falls
//! back to defaults when it is absent.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use jobseek_core::SearchSettings;
use jobseek_engine::ApiSettings;
use jobseek_logging::{seek_info, LogDestination};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "jobseek.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid log level `{0}`")]
    LogLevel(String),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub target: LogTarget,
    pub level: String,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            // Keep the terminal free for the result list.
            target: LogTarget::File,
            level: "info".to_string(),
            file: PathBuf::from("jobseek.log"),
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.level).map_err(|_| ConfigError::LogLevel(self.level.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_response_bytes: u64,
    pub page_size: u32,
    pub recommendation_limit: u32,
    pub min_query_len: usize,
    pub debounce_ms: u64,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        let search = SearchSettings::default();
        Self {
            api_base_url: api.base_url,
            connect_timeout_ms: api.connect_timeout.as_millis() as u64,
            request_timeout_ms: api.request_timeout.as_millis() as u64,
            max_response_bytes: api.max_bytes,
            page_size: search.page_size,
            recommendation_limit: search.recommendation_limit,
            min_query_len: search.min_query_len,
            debounce_ms: search.debounce.as_millis() as u64,
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_ron(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = ron::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "page_size",
                reason: "must be at least 1",
            });
        }
        if self.min_query_len == 0 {
            return Err(ConfigError::Invalid {
                field: "min_query_len",
                reason: "must be at least 1",
            });
        }
        self.log.level_filter()?;
        Ok(())
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            min_query_len: self.min_query_len,
            debounce: Duration::from_millis(self.debounce_ms),
            page_size: self.page_size,
            recommendation_limit: self.recommendation_limit,
            ..SearchSettings::default()
        }
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_response_bytes,
        }
    }
}

/// Loads `explicit` if given (it must exist), otherwise `./jobseek.ron` if
/// present, otherwise defaults.
pub fn load(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return Ok(AppConfig::default());
            }
            path
        }
    };

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = AppConfig::from_ron(&path, &content)?;
    seek_info!("Loaded config from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"(
                api_base_url: "https://jobs.example.com/api/",
                debounce_ms: 600,
                log: (level: "debug"),
            )"#
        )
        .unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.api_base_url, "https://jobs.example.com/api/");
        assert_eq!(config.search_settings().debounce, Duration::from_millis(600));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.log.target, LogTarget::File);
        assert_eq!(config.log.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("absent.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let path = Path::new("inline.ron");
        assert!(matches!(
            AppConfig::from_ron(path, "(page_size: 0)"),
            Err(ConfigError::Invalid {
                field: "page_size",
                ..
            })
        ));
        assert!(matches!(
            AppConfig::from_ron(path, r#"(log: (level: "loud"))"#),
            Err(ConfigError::LogLevel(_))
        ));
        assert!(matches!(
            AppConfig::from_ron(path, "(page_size: \"ten\")"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn settings_are_derived_from_config() {
        let config = AppConfig {
            request_timeout_ms: 1500,
            min_query_len: 2,
            ..AppConfig::default()
        };
        assert_eq!(config.api_settings().request_timeout, Duration::from_millis(1500));
        assert_eq!(config.search_settings().min_query_len, 2);
        assert_eq!(config.search_settings().clear_delay, Duration::ZERO);
    }
}
