//! Short date labels for cards and chart axes.
//!
//! Labels are rendered in UTC so a snapshot formats the same on every host.

use chrono::{DateTime, Utc};

use crate::entry::parse_timestamp;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateStyle {
    pub include_time: bool,
    pub include_weekday: bool,
}

impl DateStyle {
    pub const SHORT: DateStyle = DateStyle {
        include_time: false,
        include_weekday: false,
    };

    pub const WITH_TIME: DateStyle = DateStyle {
        include_time: true,
        include_weekday: false,
    };
}

/// `"Jan 15"`, `"Mon, Jan 15"`, `"Jan 15, 10:30 AM"`.
pub fn format_instant(ts: DateTime<Utc>, style: DateStyle) -> String {
    let mut pattern = String::new();
    if style.include_weekday {
        pattern.push_str("%a, ");
    }
    pattern.push_str("%b %-d");
    if style.include_time {
        pattern.push_str(", %I:%M %p");
    }
    ts.format(&pattern).to_string()
}

/// Format a raw source timestamp; unparseable input comes back verbatim.
pub fn format_date(raw: &str, style: DateStyle) -> String {
    match parse_timestamp(raw) {
        Some(ts) => format_instant(ts, style),
        None => raw.to_string(),
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", value.round())
}
