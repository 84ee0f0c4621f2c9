//! Drift log entries and the immutable store that holds one loaded snapshot.
//!
//! The JSON source nests an entry's fields under themed sub-objects
//! (`creation`, `law_portion`, `celestium_mapping`, ...). Everything downstream
//! only needs the flattened view, so `RawEntry` is converted into `LogEntry`
//! once at load time and the timestamp is parsed once alongside it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MS_PER_DAY: i64 = 86_400_000;

/// One logged event for a user, flattened from the nested source record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub id: String,
    pub user_id: String,
    /// Timestamp exactly as it appeared in the source.
    pub created_at: String,
    /// Parsed instant; `None` when `created_at` is not a recognised format.
    #[serde(skip)]
    pub created: Option<DateTime<Utc>>,
    pub is_final: bool,
    pub mood_label: String,
    pub conflict_intensity: f64,
    pub field_name: String,
    pub field_hz: f64,
    pub bloom_phase: i64,
    pub bloom_petal: String,
    pub input_desire: String,
    pub constellation: String,
    pub status_code: String,
    pub rules_applied: Vec<String>,
}

impl LogEntry {
    /// Minimal constructor; the remaining fields start at neutral values.
    pub fn new(id: &str, user_id: &str, created_at: &str) -> Self {
        Self {
            id: id.to_string(),
            user_id: user_id.to_string(),
            created_at: created_at.to_string(),
            created: parse_timestamp(created_at),
            is_final: false,
            mood_label: String::new(),
            conflict_intensity: 0.0,
            field_name: String::new(),
            field_hz: 0.0,
            bloom_phase: 1,
            bloom_petal: String::new(),
            input_desire: String::new(),
            constellation: String::new(),
            status_code: String::new(),
            rules_applied: Vec::new(),
        }
    }

    /// Epoch milliseconds of the parsed timestamp.
    pub fn timestamp_ms(&self) -> Option<i64> {
        self.created.map(|ts| ts.timestamp_millis())
    }
}

/// Parse the timestamp shapes the source produces.
///
/// RFC 3339 is tried first. Offset-less date-times and bare dates are read
/// as UTC so the result never depends on the host timezone.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// =============================================================================
// Source record shape
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    pub id: String,
    pub user_id: String,
    pub created_at: String,
    #[serde(default)]
    pub final_payload: bool,
    pub creation: RawCreation,
    pub law_portion: RawLawPortion,
    pub celestium_mapping: RawCelestiumMapping,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCreation {
    #[serde(default)]
    pub input_desire: String,
    pub mood_label: String,
    pub conflict_intensity: f64,
    pub field: RawField,
    pub bloom_phase: i64,
    #[serde(default)]
    pub bloom_petal: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawField {
    #[serde(default)]
    pub name: String,
    pub hz: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLawPortion {
    pub status: String,
    #[serde(default)]
    pub rules_applied: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCelestiumMapping {
    pub constellation: String,
}

impl From<RawEntry> for LogEntry {
    fn from(raw: RawEntry) -> Self {
        let created = parse_timestamp(&raw.created_at);
        Self {
            id: raw.id,
            user_id: raw.user_id,
            created_at: raw.created_at,
            created,
            is_final: raw.final_payload,
            mood_label: raw.creation.mood_label,
            conflict_intensity: raw.creation.conflict_intensity,
            field_name: raw.creation.field.name,
            field_hz: raw.creation.field.hz,
            bloom_phase: raw.creation.bloom_phase,
            bloom_petal: raw.creation.bloom_petal,
            input_desire: raw.creation.input_desire,
            constellation: raw.celestium_mapping.constellation,
            status_code: raw.law_portion.status,
            rules_applied: raw.law_portion.rules_applied,
        }
    }
}

// =============================================================================
// Entry store
// =============================================================================

/// One immutable snapshot of the dataset, in source order.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<LogEntry>,
}

impl EntryStore {
    pub fn new(entries: Vec<LogEntry>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A single user's entries, oldest first.
    ///
    /// The sort is stable, so entries sharing a timestamp keep source order.
    pub fn user_entries(&self, user_id: &str) -> Vec<LogEntry> {
        let mut out: Vec<LogEntry> = self
            .entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        sort_chronological(&mut out);
        out
    }
}

/// Stable ascending sort by parsed timestamp; unparseable timestamps first.
pub fn sort_chronological(entries: &mut [LogEntry]) {
    entries.sort_by_key(|e| e.timestamp_ms());
}
