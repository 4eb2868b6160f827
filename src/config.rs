//! Runtime settings.
//!
//! Values are resolved in this order, first match wins:
//! 1. command-line flags (and their environment variables)
//! 2. the YAML file given with `--config`
//! 3. built-in defaults
//!
//! ```yaml
//! dict_dir: ./charged_dict
//! timeout_secs: 3.5
//! concurrency: 12
//! addr: 127.0.0.1:8080
//! max_urls: 10
//! ```

use crate::cli::{Cli, Command};
use crate::error::ConfigError;
use crate::pipeline::{DEFAULT_CONCURRENCY, REQUEST_TIMEOUT_SEC};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};

pub const DEFAULT_DICT_DIR: &str = "charged_dict";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_MAX_URLS: usize = 10;

/// Contents of the optional YAML settings file.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub dict_dir: Option<PathBuf>,
    pub timeout_secs: Option<f64>,
    pub concurrency: Option<usize>,
    pub addr: Option<String>,
    pub max_urls: Option<usize>,
}

impl FileConfig {
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::parse(&raw).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded settings file");
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub dict_dir: PathBuf,
    pub timeout: Duration,
    pub concurrency: usize,
    pub addr: String,
    pub max_urls: usize,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let (cli_addr, cli_max_urls) = match &cli.command {
            Command::Serve { addr, max_urls } => (addr.clone(), *max_urls),
            Command::Score { .. } => (None, None),
        };

        let timeout_secs = cli
            .timeout
            .or(file.timeout_secs)
            .unwrap_or(REQUEST_TIMEOUT_SEC as f64);
        let timeout = Duration::try_from_secs_f64(timeout_secs)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or_else(|| ConfigError::Invalid {
                key: "timeout_secs",
                reason: format!("{timeout_secs} is not a positive number of seconds"),
            })?;

        let max_urls = cli_max_urls.or(file.max_urls).unwrap_or(DEFAULT_MAX_URLS);
        if max_urls == 0 {
            return Err(ConfigError::Invalid {
                key: "max_urls",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            dict_dir: cli
                .dict_dir
                .clone()
                .or(file.dict_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DICT_DIR)),
            timeout,
            concurrency: cli
                .concurrency
                .or(file.concurrency)
                .unwrap_or(DEFAULT_CONCURRENCY)
                .max(1),
            addr: cli_addr
                .or(file.addr)
                .unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            max_urls,
        })
    }
}
