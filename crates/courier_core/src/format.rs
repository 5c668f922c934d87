//! Human-readable display helpers shared by the view models.

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Formats a byte count with 1024-based unit stepping.
///
/// Values are rounded to two decimals with trailing zeros trimmed, so
/// `1536` renders as `"1.5 KB"` and `1048576` as `"1 MB"`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{} {}", trim_trailing_zeros(value), UNITS[unit])
}

/// Percentage of bytes saved by optimization, computed client-side from the
/// two sizes rather than trusted from the service.
pub fn saved_percent(original: u64, optimized: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original.saturating_sub(optimized)) as f64 / original as f64 * 100.0
}

/// Savings label with one decimal place, e.g. `"37.5%"`.
pub fn format_saved_percent(original: u64, optimized: u64) -> String {
    format!("{:.1}%", saved_percent(original, optimized))
}

fn trim_trailing_zeros(value: f64) -> String {
    let rendered = format!("{value:.2}");
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
