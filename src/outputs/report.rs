//! Plaintext rendering of results.

use crate::models::ArticleResult;
use std::fmt::Write;

/// Render one result as a report block.
///
/// The score is shown as a percentage with two decimals; absent values
/// print as `None`.
pub fn render_result(result: &ArticleResult) -> String {
    let score = result
        .score()
        .map(|s| format!("{:.2}", s * 100.0))
        .unwrap_or_else(|| "None".to_string());
    let words = result
        .words_count()
        .map(|w| w.to_string())
        .unwrap_or_else(|| "None".to_string());

    let mut out = String::new();
    let _ = writeln!(out, "Title: {}", result.title());
    let _ = writeln!(out, "Status: {}", result.status());
    let _ = writeln!(out, "Score: {score}");
    let _ = writeln!(out, "Words: {words}");
    out
}

/// Render every result, blocks separated by a blank line.
pub fn render_results(results: &[ArticleResult]) -> String {
    results
        .iter()
        .map(render_result)
        .collect::<Vec<_>>()
        .join("\n")
}
