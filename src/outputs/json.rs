//! JSON output of a scored batch.
//!
//! ```json
//! {
//!   "generated_at": "2026-10-16T09:30:00Z",
//!   "results": [{"url": "...", "title": "...", "status": "OK", "score": 0.01, "words_count": 812}]
//! }
//! ```

use crate::models::ArticleResult;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub generated_at: String,
    pub results: &'a [ArticleResult],
}

impl<'a> BatchReport<'a> {
    pub fn new(results: &'a [ArticleResult], at: DateTime<Utc>) -> Self {
        Self {
            generated_at: at.to_rfc3339_opts(SecondsFormat::Secs, true),
            results,
        }
    }
}

/// Write a scored batch to a JSON file.
///
/// Wraps `results` in a [`BatchReport`] stamped with the current UTC time and
/// writes it pretty-printed, creating missing parent directories first.
///
/// # Arguments
///
/// * `results` - Batch results, in request order
/// * `path` - Destination file; overwritten if it exists
///
/// # Returns
///
/// `Ok(())` on success, or an error if serialization, directory creation or
/// file writing fails.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_results(results: &[ArticleResult], path: &Path) -> Result<(), Box<dyn Error>> {
    let report = BatchReport::new(results, Utc::now());
    let json = serde_json::to_string_pretty(&report)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!(count = results.len(), "Wrote JSON results");
    Ok(())
}
