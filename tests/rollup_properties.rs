//! End-to-end properties of the rollup pipeline over small synthetic datasets.

use driftlog::entry::{EntryStore, LogEntry};
use driftlog::grouping::{group_by_user, user_summaries};
use driftlog::metrics::{
    average_frequency, average_intensity, completion_ratio, journey_duration_days, status_counts, JourneyMetrics,
};
use driftlog::palette::{classify_status, StatusKind};
use driftlog::report::JourneyReport;
use driftlog::rollup::{frequency_rollup, phase_rollup, timeline};

fn entry(id: &str, user: &str, ts: &str, hz: f64, phase: i64, final_: bool) -> LogEntry {
    let mut e = LogEntry::new(id, user, ts);
    e.field_hz = hz;
    e.bloom_phase = phase;
    e.is_final = final_;
    e.mood_label = ["Serene", "Curious", "Anxious"][id.len() % 3].to_string();
    e.conflict_intensity = hz / 1000.0;
    e.status_code = if final_ { "complete".to_string() } else { "pending".to_string() };
    e
}

/// A mixed dataset: several users, unsorted timestamps, odd phases and bands.
fn dataset() -> Vec<LogEntry> {
    vec![
        entry("1", "u1", "2024-03-02T10:00:00Z", 437.0, 2, false),
        entry("22", "u2", "2024-03-01T08:00:00Z", 1010.0, 4, true),
        entry("333", "u1", "2024-03-01T09:00:00Z", 120.0, 1, true),
        entry("4", "u3", "2024-03-05T00:00:00Z", 199.9, 99, false),
        entry("55", "u2", "2024-03-03T08:00:00Z", 550.0, 1, false),
        entry("666", "u1", "2024-03-04T12:00:00Z", 1099.0, 0, false),
        entry("7", "u3", "2024-03-05T00:00:00+00:00", 480.0, 3, true),
    ]
}

#[test]
fn grouping_partitions_every_entry() {
    let entries = dataset();
    let summaries = user_summaries(&entries);
    assert_eq!(summaries.len(), 3);
    let total: usize = summaries.iter().map(|s| s.total_entries).sum();
    assert_eq!(total, entries.len());
    for s in &summaries {
        assert!((0.0..=100.0).contains(&s.completion_ratio));
    }
}

#[test]
fn latest_entry_tie_break_is_last_in_sequence() {
    // u3's two entries share an instant; "7" comes later in the source
    let by_user = group_by_user(&dataset());
    assert_eq!(by_user["u3"].latest_entry.id, "7");
    assert_eq!(by_user["u1"].latest_entry.id, "666");
    assert_eq!(by_user["u2"].latest_mood, by_user["u2"].latest_entry.mood_label);
}

#[test]
fn empty_input_yields_zeroes_everywhere() {
    let empty: Vec<LogEntry> = Vec::new();
    assert_eq!(completion_ratio(&empty), 0.0);
    assert_eq!(average_intensity(&empty), 0.0);
    assert_eq!(average_frequency(&empty), 0.0);
    assert_eq!(journey_duration_days(&empty), 0);
    assert!(status_counts(&empty).is_empty());
    assert!(timeline(&empty).is_empty());
    assert!(phase_rollup(&empty).is_empty());
    assert!(frequency_rollup(&empty).is_empty());
    assert!(user_summaries(&empty).is_empty());
    let m = JourneyMetrics::compute(&empty);
    assert!(!m.average_intensity.is_nan());
    assert!(!m.average_frequency.is_nan());
}

#[test]
fn timeline_preserves_length_and_order() {
    let entries = dataset();
    let points = timeline(&entries);
    assert_eq!(points.len(), entries.len());
    for (i, (p, e)) in points.iter().zip(&entries).enumerate() {
        assert_eq!(p.index, i + 1);
        assert_eq!(p.full_date, e.created_at);
        assert_eq!(p.phase, e.bloom_phase);
    }
}

#[test]
fn phase_rollup_is_total_and_sorted() {
    let entries = dataset();
    let buckets = phase_rollup(&entries);
    assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), entries.len());
    assert!(buckets.windows(2).all(|w| w[0].phase < w[1].phase));
    let odd: Vec<_> = buckets.iter().filter(|b| b.phase == 99).collect();
    assert_eq!(odd.len(), 1);
    assert_eq!(odd[0].count, 1);
    for b in &buckets {
        assert_eq!(b.value, b.phase * 25);
    }
}

#[test]
fn frequency_rollup_is_total_and_numerically_sorted() {
    let entries = dataset();
    let buckets = frequency_rollup(&entries);
    assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), entries.len());
    let ranges: Vec<_> = buckets.iter().map(|b| b.range.as_str()).collect();
    assert_eq!(ranges, vec!["100-199", "400-499", "500-599", "1000-1099"]);
    let band_400 = buckets.iter().find(|b| b.range == "400-499").unwrap();
    assert_eq!(band_400.count, 2);
    assert_eq!(band_400.avg_frequency, (437.0 + 480.0) / 2.0);
    assert!(buckets.windows(2).all(|w| w[0].lower_hz < w[1].lower_hz));
}

#[test]
fn status_with_several_fragments_uses_priority_order() {
    assert_eq!(classify_status("fully_validated_and_compliant").label, "Completed");
    assert_eq!(classify_status("compliant_pending").label, "In Progress");
    assert_eq!(classify_status("mystery").kind, StatusKind::Unknown);
}

#[test]
fn two_entry_scenario() {
    let entries = vec![
        entry("a", "u", "2024-01-01T00:00:00Z", 120.0, 1, false),
        entry("b", "u", "2024-01-01T06:00:00Z", 550.0, 1, true),
    ];
    assert_eq!(completion_ratio(&entries), 50.0);

    let phases = phase_rollup(&entries);
    assert_eq!(phases.len(), 1);
    assert_eq!((phases[0].phase, phases[0].count), (1, 2));

    let bands = frequency_rollup(&entries);
    assert_eq!(bands.len(), 2);
    assert_eq!((bands[0].range.as_str(), bands[0].count), ("100-199", 1));
    assert_eq!((bands[1].range.as_str(), bands[1].count), ("500-599", 1));
}

#[test]
fn single_entry_duration_is_zero() {
    let entries = vec![entry("a", "u", "2024-01-01T00:00:00Z", 100.0, 1, false)];
    assert_eq!(journey_duration_days(&entries), 0);
}

#[test]
fn twenty_five_hours_is_two_days() {
    let entries = vec![
        entry("a", "u", "2024-01-01T00:00:00Z", 100.0, 1, false),
        entry("b", "u", "2024-01-02T01:00:00Z", 100.0, 1, false),
    ];
    assert_eq!(journey_duration_days(&entries), 2);
}

#[test]
fn duration_uses_elapsed_time_across_midnight_and_offsets() {
    // 23:30 to 00:30 the next local day, one hour elapsed
    let entries = vec![
        entry("a", "u", "2024-06-30T23:30:00+05:30", 100.0, 1, false),
        entry("b", "u", "2024-07-01T00:30:00+05:30", 100.0, 1, false),
    ];
    assert_eq!(journey_duration_days(&entries), 1);

    // exactly 48 hours written with different offsets
    let entries = vec![
        entry("a", "u", "2024-01-01T22:00:00-02:00", 100.0, 1, false),
        entry("b", "u", "2024-01-04T00:00:00Z", 100.0, 1, false),
    ];
    assert_eq!(journey_duration_days(&entries), 2);
}

#[test]
fn journey_report_matches_standalone_rollups() {
    let store = EntryStore::new(dataset());
    let report = JourneyReport::build(&store, "u1").unwrap();
    let sorted = store.user_entries("u1");
    assert_eq!(report.entries, sorted);
    assert_eq!(report.timeline, timeline(&sorted));
    assert_eq!(report.phases, phase_rollup(&sorted));
    assert_eq!(report.frequencies, frequency_rollup(&sorted));
    assert_eq!(report.metrics.total_entries, 3);
    // Mar 1 09:00 -> Mar 4 12:00 is 3 days 3 hours
    assert_eq!(report.metrics.journey_duration_days, 4);
}

#[test]
fn rollups_do_not_mutate_input() {
    let entries = dataset();
    let before = entries.clone();
    let _ = user_summaries(&entries);
    let _ = phase_rollup(&entries);
    let _ = frequency_rollup(&entries);
    let _ = timeline(&entries);
    assert_eq!(entries, before);
    assert_eq!(phase_rollup(&entries), phase_rollup(&entries));
}
