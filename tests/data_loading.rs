use driftlog::config::Config;
use driftlog::data::{file_sha256, load_file, load_or_empty};
use driftlog::report::{JourneyReport, Overview};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn record(id: &str, user: &str, ts: &str, hz: f64, phase: i64, final_: bool, status: &str) -> Value {
    json!({
        "id": id,
        "user_id": user,
        "created_at": ts,
        "final_payload": final_,
        "creation": {
            "input_desire": "to understand",
            "mood_label": "Contemplative",
            "conflict_intensity": 0.5,
            "field": { "name": "Theta", "hz": hz },
            "bloom_phase": phase,
            "bloom_petal": "iris",
            "equation": { "formula": "a+b", "description": "balance" }
        },
        "law_portion": { "status": status, "rules_applied": [], "contract_scan": "clear" },
        "bloom_render": { "petal": "iris", "animation": "pulse" },
        "celestium_mapping": { "constellation": "Orion" },
        "mirror_dna": { "dna_string": "GATTACA" }
    })
}

fn write_doc(path: &Path, records: Vec<Value>) {
    let doc = json!({ "resonance_drift_log": records });
    fs::write(path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
}

fn cfg_for(path: &Path) -> Config {
    Config::default().with_data_path(path.to_string_lossy().to_string())
}

#[test]
fn loads_file_and_builds_manifest() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mock_data.json");
    write_doc(
        &path,
        vec![
            record("e1", "u1", "2024-02-01T10:00:00Z", 432.0, 1, false, "pending"),
            record("e2", "u1", "2024-02-03T10:00:00Z", 528.0, 2, true, "complete"),
            record("e3", "u2", "2024-01-20T10:00:00Z", 639.0, 3, false, "compliant"),
        ],
    );

    let (dataset, manifest) = load_file(&path, "resonance_drift_log").unwrap();
    assert_eq!(dataset.store.len(), 3);
    assert_eq!(manifest.entry_count, 3);
    assert_eq!(manifest.user_count, 2);
    assert_eq!(manifest.skipped_records, 0);
    assert_eq!(manifest.ts_min.as_deref(), Some("2024-01-20T10:00:00Z"));
    assert_eq!(manifest.ts_max.as_deref(), Some("2024-02-03T10:00:00Z"));
    assert_eq!(manifest.hash_sha256, file_sha256(&path).unwrap());
    assert_eq!(manifest.hash_sha256.len(), 64);
}

#[test]
fn missing_file_becomes_empty_store() {
    let dir = TempDir::new().unwrap();
    let store = load_or_empty(&cfg_for(&dir.path().join("absent.json")));
    assert!(store.is_empty());

    let view = Overview::build(&store, "");
    assert_eq!(view.user_count, 0);
    assert!(JourneyReport::build(&store, "u1").is_none());
}

#[test]
fn malformed_document_becomes_empty_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"resonance_drift_log\": [ {").unwrap();
    assert!(load_file(&path, "resonance_drift_log").is_err());
    assert!(load_or_empty(&cfg_for(&path)).is_empty());

    let wrong_key = dir.path().join("wrong_key.json");
    fs::write(&wrong_key, r#"{"logs": []}"#).unwrap();
    assert!(load_or_empty(&cfg_for(&wrong_key)).is_empty());
}

#[test]
fn malformed_record_is_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.json");
    write_doc(
        &path,
        vec![
            record("e1", "u1", "2024-02-01T10:00:00Z", 432.0, 1, true, "mastered"),
            json!({ "id": "e2", "user_id": "u1" }),
        ],
    );
    let (dataset, manifest) = load_file(&path, "resonance_drift_log").unwrap();
    assert_eq!(dataset.store.len(), 1);
    assert_eq!(manifest.skipped_records, 1);
    assert_eq!(manifest.warnings.len(), 1);
}

#[test]
fn journey_from_loaded_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mock_data.json");
    write_doc(
        &path,
        vec![
            record("e2", "u1", "2024-02-02T11:00:00Z", 550.0, 1, true, "excellence_achieved"),
            record("e1", "u1", "2024-02-01T10:00:00Z", 120.0, 1, false, "preliminary_scan"),
        ],
    );
    let store = load_or_empty(&cfg_for(&path));
    let report = JourneyReport::build(&store, "u1").unwrap();
    assert_eq!(report.metrics.completion_ratio, 50.0);
    assert_eq!(report.metrics.journey_duration_days, 2);
    assert_eq!(report.latest_entry.id, "e2");
    assert_eq!(report.timeline[0].date, "Feb 1");
    assert_eq!(report.phases.len(), 1);
    assert_eq!(report.phases[0].count, 2);
    let labels: Vec<_> = report.metrics.status_counts.iter().map(|s| s.class.label).collect();
    assert_eq!(labels, vec!["Evaluating", "Completed"]);
}
