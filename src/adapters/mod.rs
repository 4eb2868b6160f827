//! Site-specific article extractors.
//!
//! An [`Extractor`] turns a fetched HTML page into the plaintext of the
//! article it carries, or reports [`ArticleNotFound`] when the page is not
//! laid out the way the extractor expects.
//!
//! # Supported Sources
//!
//! | Source | Module | Notes |
//! |--------|--------|-------|
//! | InoSMI | [`inosmi_ru`] | Body lives in `article.article` |

use thiserror::Error;

pub mod inosmi_ru;

pub use inosmi_ru::InosmiExtractor;

/// The page does not contain a recognizable article.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("article not found: {reason}")]
pub struct ArticleNotFound {
    pub reason: String,
}

impl ArticleNotFound {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Converts raw page content into article plaintext.
pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> Result<String, ArticleNotFound>;
}
