//! Display formatting for practice data.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// `125.4` -> `"2m 05s"`; sub-minute values render as seconds only.
pub fn format_duration(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return "0s".to_owned();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = secs.round() as u64;
    let (minutes, seconds) = (total / 60, total % 60);
    if minutes == 0 { format!("{seconds}s") } else { format!("{minutes}m {seconds:02}s") }
}

/// Number of pages needed for `total` rows at `size` per page (at least one).
pub fn total_pages(total: i64, size: u32) -> u32 {
    let size = i64::from(size.max(1));
    let pages = (total.max(0) + size - 1) / size;
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

/// Render an answer without a trailing `.0` for whole numbers.
pub fn format_number(value: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{value}")
}
