//! Chart rollups: timeline points, phase buckets and frequency bands.
//!
//! Each function takes the entry slice by reference and builds its own
//! accumulator; nothing is shared between calls.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::entry::LogEntry;
use crate::format::{format_date, DateStyle};
use crate::metrics::mean;
use crate::palette::{frequency_color, mood_color, phase_color, DriftColor};

pub const BAND_WIDTH_HZ: i64 = 100;

/// Radial chart magnitude per phase step. Not a share of entries.
pub const PHASE_VALUE_STEP: i64 = 25;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub index: usize,
    pub date: String,
    pub full_date: String,
    pub intensity: f64,
    pub mood: String,
    pub hz: f64,
    pub phase: i64,
    pub petal: String,
    pub constellation: String,
    pub status: String,
    pub desire: String,
    pub color: DriftColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseBucket {
    pub phase: i64,
    pub name: String,
    pub value: i64,
    pub count: usize,
    pub moods: Vec<String>,
    pub color: DriftColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyBucket {
    pub lower_hz: i64,
    pub range: String,
    pub count: usize,
    pub avg_frequency: f64,
    pub moods: Vec<String>,
    pub color: DriftColor,
}

/// One point per entry, in the order given, indexed from 1.
pub fn timeline(entries: &[LogEntry]) -> Vec<TimelinePoint> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| TimelinePoint {
            index: i + 1,
            date: format_date(&entry.created_at, DateStyle::SHORT),
            full_date: entry.created_at.clone(),
            intensity: entry.conflict_intensity,
            mood: entry.mood_label.clone(),
            hz: entry.field_hz,
            phase: entry.bloom_phase,
            petal: entry.bloom_petal.clone(),
            constellation: entry.constellation.clone(),
            status: entry.status_code.clone(),
            desire: entry.input_desire.clone(),
            color: mood_color(&entry.mood_label),
        })
        .collect()
}

/// Buckets per distinct phase, ascending. Out-of-range phases get a bucket too.
pub fn phase_rollup(entries: &[LogEntry]) -> Vec<PhaseBucket> {
    let mut phases: BTreeMap<i64, (usize, Vec<String>)> = BTreeMap::new();
    for entry in entries {
        let (count, moods) = phases.entry(entry.bloom_phase).or_default();
        *count += 1;
        push_distinct(moods, &entry.mood_label);
    }
    phases
        .into_iter()
        .map(|(phase, (count, moods))| PhaseBucket {
            phase,
            name: format!("Phase {}", phase),
            value: phase.saturating_mul(PHASE_VALUE_STEP),
            count,
            moods,
            color: phase_color(phase),
        })
        .collect()
}

/// Lower bound of the 100 Hz band containing `hz`.
pub fn band_floor(hz: f64) -> i64 {
    ((hz / BAND_WIDTH_HZ as f64).floor() as i64).saturating_mul(BAND_WIDTH_HZ)
}

pub fn band_label(lower_hz: i64) -> String {
    format!("{}-{}", lower_hz, lower_hz.saturating_add(BAND_WIDTH_HZ - 1))
}

/// Buckets per 100 Hz band, sorted by the numeric lower bound.
pub fn frequency_rollup(entries: &[LogEntry]) -> Vec<FrequencyBucket> {
    let mut bands: BTreeMap<i64, Vec<&LogEntry>> = BTreeMap::new();
    for entry in entries {
        bands.entry(band_floor(entry.field_hz)).or_default().push(entry);
    }
    bands
        .into_iter()
        .map(|(lower_hz, members)| {
            let mut moods = Vec::new();
            for m in &members {
                push_distinct(&mut moods, &m.mood_label);
            }
            FrequencyBucket {
                lower_hz,
                range: band_label(lower_hz),
                count: members.len(),
                avg_frequency: mean(members.iter().map(|m| m.field_hz)),
                moods,
                color: frequency_color(lower_hz),
            }
        })
        .collect()
}

fn push_distinct(moods: &mut Vec<String>, mood: &str) {
    if !moods.iter().any(|m| m == mood) {
        moods.push(mood.to_string());
    }
}
