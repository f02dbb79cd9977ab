//! Heuristic log summarizer.
//!
//! Substring matching against common error/warning markers, including the
//! structured `"level":"error"` form JSON loggers emit. Approximate by
//! design — this is a hint for the report, not a log parser.

/// Summarize a log tail: byte length plus approximate error/warn counts
/// when any markers are found.
pub fn summarize(tail: &str) -> String {
    let lower = tail.to_lowercase();
    let count = |needle: &str| lower.matches(needle).count();

    let errors = count(" error ")
        + count("\terror")
        + count("error:")
        + count(r#""level":"error""#);
    let warns = count(" warn ")
        + count("\twarn")
        + count("warn:")
        + count(r#""level":"warn""#);

    let mut summary = format!("tail={} chars", tail.len());
    if errors > 0 || warns > 0 {
        summary.push_str(&format!(", errors~{errors}, warns~{warns}"));
    }
    summary
}
