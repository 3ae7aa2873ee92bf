//! Pure presentation helpers: byte units, dates, percentages.
//!
//! None of these fail. Degenerate input yields a safe default.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

const UNITS: [&str; 6] = ["Bytes", "KB", "MB", "GB", "TB", "PB"];
const STEP: f64 = 1000.0;

/// Human-readable, base-1000 byte count with up to `decimals` fraction
/// digits and trailing zeros trimmed: `1_500_000.0` → `"1.5 MB"`.
pub fn format_bytes(bytes: f64, decimals: usize) -> String {
    if !bytes.is_finite() || bytes <= 0.0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut value = bytes;
    while value >= STEP && unit < UNITS.len() - 1 {
        value /= STEP;
        unit += 1;
    }

    // 999_999 bytes rounds to "1000 KB"; show it as "1 MB" instead.
    let mut rendered = format!("{value:.decimals$}");
    if unit < UNITS.len() - 1 && rendered.parse::<f64>().is_ok_and(|v| v >= STEP) {
        value /= STEP;
        unit += 1;
        rendered = format!("{value:.decimals$}");
    }

    format!("{} {}", trim_fraction(&rendered), UNITS[unit])
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// `"Oct 19, 2026, 03:04 PM"` in the local timezone.
pub fn format_date(iso: &str) -> String {
    format_date_in(iso, &Local)
}

/// Same as [`format_date`] for an explicit timezone.
pub fn format_date_in<Tz: TimeZone>(iso: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match parse_timestamp(iso) {
        Some(at) => at
            .with_timezone(tz)
            .format("%b %-d, %Y, %I:%M %p")
            .to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (UTC midnight).
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
        })
}

/// Integer share of `total` used, clamped to `0..=100`.
/// Zero, absent or non-finite totals give 0.
pub fn format_usage_percentage(used: f64, total: Option<f64>) -> u8 {
    let Some(total) = total.filter(|t| *t != 0.0 && t.is_finite()) else {
        return 0;
    };
    let pct = (used / total * 100.0).round();
    if pct.is_nan() {
        return 0;
    }
    pct.clamp(0.0, 100.0) as u8
}

/// Cut `text` to `max_len` characters, appending `...` when shortened.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    format!("{cut}...")
}

/// `"October 2026"`
pub fn current_month_name(today: NaiveDate) -> String {
    today.format("%B %Y").to_string()
}

/// Show enough of a key to recognise it: first 16 and last 4 characters.
/// Short keys reveal at most 4 characters and never more than half.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 20 {
        let head: String = chars.iter().take((chars.len() / 2).min(4)).collect();
        return format!("{head}...");
    }
    let head: String = chars[..16].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
