//! Data models for scoring requests and their results.
//!
//! - [`ArticleRequest`]: one URL to score, with an optional caller-supplied title
//! - [`ProcessingStatus`]: the terminal classification of a request
//! - [`ArticleResult`]: the outcome for one request
//!
//! An [`ArticleResult`] can only be built through its terminal constructors,
//! so `score` and `words_count` are present exactly when the status is
//! [`ProcessingStatus::Ok`].

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Title reported when the URL cannot be fetched at all.
pub const FETCH_ERROR_TITLE: &str = "URL not exists";

/// A single article to score.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRequest {
    /// The page to fetch.
    pub url: String,
    /// Title shown in the result unless a failure overrides it.
    pub title: Option<String>,
}

impl ArticleRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
        }
    }

    pub fn with_title(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: Some(title.into()),
        }
    }

    /// Host part of the URL, falling back to the raw URL when it does not parse.
    pub fn host(&self) -> String {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.url.clone())
    }

    fn title_or_default(&self) -> String {
        self.title.clone().unwrap_or_default()
    }
}

/// Terminal classification of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    Ok,
    FetchError,
    Timeout,
    ParsingError,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Ok => "OK",
            ProcessingStatus::FetchError => "FETCH_ERROR",
            ProcessingStatus::Timeout => "TIMEOUT",
            ProcessingStatus::ParsingError => "PARSING_ERROR",
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of scoring one [`ArticleRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleResult {
    url: String,
    title: String,
    status: ProcessingStatus,
    score: Option<f64>,
    words_count: Option<usize>,
}

impl ArticleResult {
    /// Scored successfully.
    pub fn ok(request: &ArticleRequest, score: f64, words_count: usize) -> Self {
        Self {
            url: request.url.clone(),
            title: request.title_or_default(),
            status: ProcessingStatus::Ok,
            score: Some(score),
            words_count: Some(words_count),
        }
    }

    /// The page could not be retrieved. The title is replaced with
    /// [`FETCH_ERROR_TITLE`].
    pub fn fetch_error(request: &ArticleRequest) -> Self {
        Self::failed(request, ProcessingStatus::FetchError, FETCH_ERROR_TITLE.to_string())
    }

    /// The fetch exceeded its wait bound. The title is left as given.
    pub fn timeout(request: &ArticleRequest) -> Self {
        Self::failed(request, ProcessingStatus::Timeout, request.title_or_default())
    }

    /// The page was fetched but is not a recognizable article.
    pub fn parsing_error(request: &ArticleRequest) -> Self {
        let title = format!("Article on {}", request.host());
        Self::failed(request, ProcessingStatus::ParsingError, title)
    }

    /// A task that died without classifying its failure. Keeps the input title.
    pub fn unclassified(request: &ArticleRequest) -> Self {
        Self::failed(request, ProcessingStatus::FetchError, request.title_or_default())
    }

    fn failed(request: &ArticleRequest, status: ProcessingStatus, title: String) -> Self {
        Self {
            url: request.url.clone(),
            title,
            status,
            score: None,
            words_count: None,
        }
    }

    /// The URL exactly as requested.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> ProcessingStatus {
        self.status
    }

    /// Share of charged words in `[0, 1]`, present only for [`ProcessingStatus::Ok`].
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn words_count(&self) -> Option<usize> {
        self.words_count
    }
}
