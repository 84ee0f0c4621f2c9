//! Per-user partitioning and summary cards.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::entry::LogEntry;
use crate::metrics::completion_ratio;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub user_id: String,
    pub latest_entry: LogEntry,
    pub total_entries: usize,
    pub completion_ratio: f64,
    pub latest_mood: String,
    pub last_activity: String,
    pub constellation: String,
    pub status_code: String,
}

impl UserSummary {
    /// Build a summary from one user's entries. `None` only for an empty slice.
    pub fn from_entries(user_id: &str, entries: &[LogEntry]) -> Option<Self> {
        let latest = latest_entry(entries)?;
        Some(Self {
            user_id: user_id.to_string(),
            latest_entry: latest.clone(),
            total_entries: entries.len(),
            completion_ratio: completion_ratio(entries),
            latest_mood: latest.mood_label.clone(),
            last_activity: latest.created_at.clone(),
            constellation: latest.constellation.clone(),
            status_code: latest.status_code.clone(),
        })
    }

    /// Case-insensitive match on user id, latest mood or constellation.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [&self.user_id, &self.latest_mood, &self.constellation]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Entry with the greatest timestamp.
///
/// Ties go to the entry that appears last in the slice. Unparseable
/// timestamps rank below every parseable one.
pub fn latest_entry(entries: &[LogEntry]) -> Option<&LogEntry> {
    let mut best: Option<&LogEntry> = None;
    for entry in entries {
        match best {
            Some(current) if entry.timestamp_ms() < current.timestamp_ms() => {}
            _ => best = Some(entry),
        }
    }
    best
}

/// Partition entries by user, preserving source order inside each group.
pub fn partition_by_user(entries: &[LogEntry]) -> BTreeMap<String, Vec<LogEntry>> {
    let mut groups: BTreeMap<String, Vec<LogEntry>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry(entry.user_id.clone())
            .or_default()
            .push(entry.clone());
    }
    groups
}

pub fn group_by_user(entries: &[LogEntry]) -> BTreeMap<String, UserSummary> {
    partition_by_user(entries)
        .into_iter()
        .filter_map(|(user_id, group)| {
            UserSummary::from_entries(&user_id, &group).map(|summary| (user_id, summary))
        })
        .collect()
}

/// Summaries ordered by user id.
pub fn user_summaries(entries: &[LogEntry]) -> Vec<UserSummary> {
    group_by_user(entries).into_values().collect()
}

/// Search filter for the overview list; an empty term keeps everything.
pub fn filter_summaries<'a>(summaries: &'a [UserSummary], term: &str) -> Vec<&'a UserSummary> {
    let term = term.trim();
    summaries
        .iter()
        .filter(|s| term.is_empty() || s.matches(term))
        .collect()
}
