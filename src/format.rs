use std::time::Duration;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

pub const BAR_WIDTH: usize = 20;

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Scales a byte count by 1024 until it drops below one unit, with one decimal.
///
/// Anything that is still at least 1024 TB is reported in PB.
pub fn bytes_to_human(bytes: f64) -> String {
    let mut value = if bytes.is_finite() { bytes } else { 0.0 };
    for unit in BYTE_UNITS {
        if value < 1024.0 {
            return format!("{value:.1}{unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1}PB")
}

pub fn format_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", bytes_to_human(bytes_per_sec))
}

/// Fixed-width usage bar, one filled cell per 5%.
pub fn usage_bar(percent: f64) -> String {
    let filled = if percent.is_finite() {
        ((percent / 5.0).floor().max(0.0) as usize).min(BAR_WIDTH)
    } else {
        0
    };
    let mut bar = "\u{2588}".repeat(filled);
    bar.push_str(&"\u{2591}".repeat(BAR_WIDTH - filled));
    bar
}

pub fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

pub fn with_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
