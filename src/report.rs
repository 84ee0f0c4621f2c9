//! Dashboard views assembled from one store snapshot.

use serde::Serialize;
use serde_json::json;

use crate::entry::{EntryStore, LogEntry};
use crate::grouping::{filter_summaries, latest_entry, user_summaries, UserSummary};
use crate::logging::{log_report, v_str, ProfileScope};
use crate::metrics::JourneyMetrics;
use crate::rollup::{frequency_rollup, phase_rollup, timeline, FrequencyBucket, PhaseBucket, TimelinePoint};

/// All-users overview.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub user_count: usize,
    pub entry_count: usize,
    pub search: String,
    pub users: Vec<UserSummary>,
}

impl Overview {
    /// `user_count` covers every user; `users` only those matching `search`.
    pub fn build(store: &EntryStore, search: &str) -> Self {
        let _scope = ProfileScope::with_context("overview", &[("entries", json!(store.len()))]);
        let summaries = user_summaries(store.entries());
        let users: Vec<UserSummary> = filter_summaries(&summaries, search)
            .into_iter()
            .cloned()
            .collect();
        log_report("overview", None, store.len());
        Self {
            user_count: summaries.len(),
            entry_count: store.len(),
            search: search.to_string(),
            users,
        }
    }
}

/// One user's journey page.
#[derive(Debug, Clone, Serialize)]
pub struct JourneyReport {
    pub user_id: String,
    pub entries: Vec<LogEntry>,
    pub latest_entry: LogEntry,
    pub metrics: JourneyMetrics,
    pub timeline: Vec<TimelinePoint>,
    pub phases: Vec<PhaseBucket>,
    pub frequencies: Vec<FrequencyBucket>,
}

impl JourneyReport {
    /// `None` when the user has no entries in the snapshot.
    pub fn build(store: &EntryStore, user_id: &str) -> Option<Self> {
        let _scope = ProfileScope::with_context("journey", &[("user_id", v_str(user_id))]);
        let entries = store.user_entries(user_id);
        let latest = latest_entry(&entries)?.clone();
        log_report("journey", Some(user_id), entries.len());
        Some(Self {
            user_id: user_id.to_string(),
            latest_entry: latest,
            metrics: JourneyMetrics::compute(&entries),
            timeline: timeline(&entries),
            phases: phase_rollup(&entries),
            frequencies: frequency_rollup(&entries),
            entries,
        })
    }
}
