//! Scalar journey metrics over an entry sequence.
//!
//! Every function accepts an empty slice and returns 0 rather than NaN.

use std::collections::HashSet;

use serde::Serialize;

use crate::entry::{LogEntry, MS_PER_DAY};
use crate::palette::{classify_status, StatusClass};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
    pub class: StatusClass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyMetrics {
    pub total_entries: usize,
    pub completion_ratio: f64,
    pub average_intensity: f64,
    pub average_frequency: f64,
    pub mood_diversity: usize,
    pub journey_duration_days: i64,
    pub status_counts: Vec<StatusCount>,
}

impl JourneyMetrics {
    pub fn compute(entries: &[LogEntry]) -> Self {
        Self {
            total_entries: entries.len(),
            completion_ratio: completion_ratio(entries),
            average_intensity: average_intensity(entries),
            average_frequency: average_frequency(entries),
            mood_diversity: mood_diversity(entries),
            journey_duration_days: journey_duration_days(entries),
            status_counts: status_counts(entries),
        }
    }
}

/// Percentage (0–100) of entries flagged final.
pub fn completion_ratio(entries: &[LogEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let finals = entries.iter().filter(|e| e.is_final).count();
    finals as f64 / entries.len() as f64 * 100.0
}

pub fn average_intensity(entries: &[LogEntry]) -> f64 {
    mean(entries.iter().map(|e| e.conflict_intensity))
}

pub fn average_frequency(entries: &[LogEntry]) -> f64 {
    mean(entries.iter().map(|e| e.field_hz))
}

pub fn mood_diversity(entries: &[LogEntry]) -> usize {
    entries
        .iter()
        .map(|e| e.mood_label.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Whole days spanned by the entries, rounded up.
///
/// Computed from elapsed milliseconds between the earliest and latest parsed
/// timestamps, so offsets and midnight boundaries do not shift the result.
/// Fewer than two parseable timestamps yields 0.
pub fn journey_duration_days(entries: &[LogEntry]) -> i64 {
    let mut stamps = entries.iter().filter_map(|e| e.timestamp_ms());
    let Some(first) = stamps.next() else {
        return 0;
    };
    let (min, max) = stamps.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts)));
    let elapsed = max - min;
    // ceil for non-negative integers
    (elapsed + MS_PER_DAY - 1) / MS_PER_DAY
}

/// Occurrences per status string, in first-seen order.
pub fn status_counts(entries: &[LogEntry]) -> Vec<StatusCount> {
    let mut out: Vec<StatusCount> = Vec::new();
    for entry in entries {
        match out.iter_mut().find(|s| s.status == entry.status_code) {
            Some(existing) => existing.count += 1,
            None => out.push(StatusCount {
                status: entry.status_code.clone(),
                count: 1,
                class: classify_status(&entry.status_code),
            }),
        }
    }
    out
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}
