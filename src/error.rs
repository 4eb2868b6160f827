//! Typed errors for the scoring pipeline.
//!
//! Per-article failures never leave the pipeline as errors: [`FetchError`] and
//! [`ArticleNotFound`](crate::adapters::ArticleNotFound) are folded into a
//! [`ProcessingStatus`](crate::models::ProcessingStatus) by the article task.
//! Only [`PipelineError`] can abort a whole batch.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to build the charged-word lexicon. Always fatal.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read dictionary at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dictionary source {path} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("dictionary at {path} contains no charged words")]
    Empty { path: PathBuf },
}

/// Why a single fetch did not produce page content.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS resolution or TCP/TLS connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The per-request wait bound expired.
    #[error("request timed out")]
    Timeout,

    #[error("server answered with HTTP {0}")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    Body(String),

    /// The server was reached but the exchange broke down, e.g. a redirect loop.
    #[error("HTTP exchange failed: {0}")]
    Protocol(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if e.is_builder() {
            FetchError::InvalidUrl {
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
                reason: e.to_string(),
            }
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else if e.is_body() || e.is_decode() {
            FetchError::Body(e.to_string())
        } else {
            FetchError::Protocol(e.to_string())
        }
    }
}

/// Errors loading the optional YAML settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// The only errors allowed to abort a batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The shared HTTP client could not be built.
    #[error("failed to set up HTTP transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}
