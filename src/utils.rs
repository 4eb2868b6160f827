//! Logging helpers shared by the pipeline and the front ends.

use std::time::Instant;
use tracing::info;

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes, on a character boundary, with
/// an ellipsis and the number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Run `f` and log how long it took under `name`.
///
/// Timing is for observability only; the closure's value is returned as is.
pub fn timed<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let t0 = Instant::now();
    let value = f();
    let elapsed = t0.elapsed();
    info!(
        name = %truncate_for_log(name, 80),
        elapsed_ms = elapsed.as_millis() as u64,
        "Analysis finished in {:.2} sec",
        elapsed.as_secs_f64()
    );
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        // Cyrillic letters are two bytes each.
        let s = "Нападение";
        let result = truncate_for_log(s, 3);
        assert_eq!(result, format!("Н…(+{} bytes)", s.len() - 2));
    }

    #[test]
    fn test_timed_returns_closure_value() {
        assert_eq!(timed("sum", || 2 + 2), 4);
    }
}
