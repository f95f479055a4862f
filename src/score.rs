//! Score clock presentation

/// Format elapsed seconds as `m:ss`
///
/// Fractions are truncated, so the display only ticks over on whole seconds.
/// Negative or NaN input reads as zero.
pub fn format_score(seconds: f32) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}
