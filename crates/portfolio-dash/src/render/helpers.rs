use chrono::{Local, TimeZone};
use portfolio_types::{
    parse_timestamp, PRIORITY_HIGH, PRIORITY_LOW, PRIORITY_MEDIUM, TASK_STATUS_COMPLETED,
    TASK_STATUS_IN_PROGRESS, TASK_STATUS_PENDING,
};

/// Shown in place of a timestamp the backend sent in an unreadable form.
pub const INVALID_TIMESTAMP: &str = "Invalid Date";

pub fn status_label(status: &str) -> &str {
    match status {
        TASK_STATUS_COMPLETED => "Ukończone",
        TASK_STATUS_IN_PROGRESS => "W trakcie",
        TASK_STATUS_PENDING => "Oczekujące",
        other => other,
    }
}

pub fn priority_label(priority: &str) -> &str {
    match priority {
        PRIORITY_HIGH => "Wysoki",
        PRIORITY_MEDIUM => "Średni",
        PRIORITY_LOW => "Niski",
        other => other,
    }
}

/// `dd.mm.yyyy, HH:MM:SS` in the local time zone.
pub fn format_timestamp(raw: &str) -> String {
    format_timestamp_in(raw, &Local)
}

pub fn format_timestamp_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match parse_timestamp(raw, tz) {
        Some(dt) => dt.format("%d.%m.%Y, %H:%M:%S").to_string(),
        None => INVALID_TIMESTAMP.to_string(),
    }
}

/// Class names are space-separated; anything else would split or break out
/// of the attribute.
pub fn class_token(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect()
}
