//! Display formatting shared by the result table, the detail modal and the
//! spreadsheet export. All helpers are total; absent data renders as a dash
//! rather than failing the page.
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Groups an integral value with thousands separators: `1500000000` becomes
/// `1,500,000,000`.
pub fn group_digits(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// KRW amount for display, e.g. `1,500,000,000원`.
pub fn format_amount(amount: Option<i64>) -> String {
    match amount {
        Some(value) => format!("{}원", group_digits(value)),
        None => "-".to_string(),
    }
}

/// Timestamp in the Korean locale convention, e.g. `2024. 08. 15. 오후 02:30`.
///
/// Collector timestamps are not uniform, so parsing is lenient; a value that
/// still fails to parse is shown verbatim rather than dropped.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "-".to_string();
    };
    if raw.is_empty() {
        return "-".to_string();
    }

    match parse_timestamp(raw) {
        Some(dt) => korean_datetime(dt),
        None => raw.to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y%m%d%H%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn korean_datetime(dt: NaiveDateTime) -> String {
    let meridiem = if dt.hour() < 12 { "오전" } else { "오후" };
    let hour12 = match dt.hour() % 12 {
        0 => 12,
        h => h,
    };

    format!(
        "{}. {:02}. {:02}. {} {:02}:{:02}",
        dt.year(),
        dt.month(),
        dt.day(),
        meridiem,
        hour12,
        dt.minute()
    )
}

/// Similarity score as a percentage with one decimal, e.g. `85.0%`.
pub fn format_similarity(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{:.1}%", score * 100.0),
        None => "-".to_string(),
    }
}

/// Joins order year and month as the upstream data displays them: both
/// present gives `YYYY-MM`, year alone gives the year, otherwise a dash.
/// Empty strings count as absent.
pub fn format_year_month(year: Option<&str>, month: Option<&str>) -> String {
    let year = year.filter(|v| !v.is_empty());
    let month = month.filter(|v| !v.is_empty());

    match (year, month) {
        (Some(y), Some(m)) => format!("{y}-{m}"),
        (Some(y), None) => y.to_string(),
        _ => "-".to_string(),
    }
}

/// Optional text for display; empty counts as absent.
pub fn text_or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}
