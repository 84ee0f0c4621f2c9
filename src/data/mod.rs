//! Dataset loading and data-quality reporting.
//!
//! The aggregation code never sees a loader error: `load_or_empty` logs the
//! failure and hands back an empty store instead.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::entry::{EntryStore, LogEntry, RawEntry};
use crate::logging::{log_dataset_loaded, log_load_failed, log_record_skipped};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadReport {
    pub records: u64,
    pub loaded: u64,
    pub skipped: u64,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetManifest {
    pub path: String,
    pub hash_sha256: String,
    pub collection_key: String,
    pub entry_count: u64,
    pub skipped_records: u64,
    pub user_count: u64,
    pub ts_min: Option<String>,
    pub ts_max: Option<String>,
    pub warnings: Vec<String>,
    pub generated_at: String,
}

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub store: EntryStore,
    pub report: LoadReport,
}

/// Decode the entry array found under `key`.
///
/// The document itself must be valid JSON with an array at `key`. Records
/// that fail to decode are skipped and listed in the report.
pub fn parse_document(text: &str, key: &str) -> Result<LoadedDataset> {
    let mut doc: Value = serde_json::from_str(text).context("dataset is not valid JSON")?;
    let records = match doc.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => items,
        Some(other) => return Err(anyhow!("`{}` is not an array (found {})", key, json_kind(&other))),
        None => return Err(anyhow!("dataset has no `{}` key", key)),
    };

    let mut report = LoadReport {
        records: records.len() as u64,
        ..Default::default()
    };
    let mut entries = Vec::with_capacity(records.len());
    let mut seen_ids = HashSet::new();

    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<RawEntry>(record) {
            Ok(raw) => {
                let entry = LogEntry::from(raw);
                if entry.created.is_none() {
                    report
                        .warnings
                        .push(format!("unparseable_created_at: record={} id={}", index, entry.id));
                }
                if !seen_ids.insert(entry.id.clone()) {
                    report.warnings.push(format!("duplicate_id: record={} id={}", index, entry.id));
                }
                entries.push(entry);
            }
            Err(err) => {
                report.skipped += 1;
                report.warnings.push(format!("bad_record: record={} {}", index, err));
                log_record_skipped(index, &err.to_string());
            }
        }
    }

    report.loaded = entries.len() as u64;
    Ok(LoadedDataset {
        store: EntryStore::new(entries),
        report,
    })
}

/// Read and decode a dataset file, returning it with its manifest.
pub fn load_file(path: &Path, key: &str) -> Result<(LoadedDataset, DatasetManifest)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let dataset = parse_document(&text, key)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    let manifest = build_manifest(path, key, &dataset)?;
    log_dataset_loaded(
        &manifest.path,
        dataset.store.len(),
        dataset.report.skipped as usize,
        manifest.user_count as usize,
    );
    Ok((dataset, manifest))
}

/// Load the configured dataset; any failure becomes an empty store.
pub fn load_or_empty(cfg: &Config) -> EntryStore {
    match load_file(Path::new(&cfg.data_path), &cfg.collection_key) {
        Ok((dataset, _)) => dataset.store,
        Err(err) => {
            log_load_failed(&cfg.data_path, &format!("{:#}", err));
            EntryStore::empty()
        }
    }
}

pub fn build_manifest(path: &Path, key: &str, dataset: &LoadedDataset) -> Result<DatasetManifest> {
    let entries = dataset.store.entries();
    let users: BTreeSet<&str> = entries.iter().map(|e| e.user_id.as_str()).collect();
    let ts_min = entries
        .iter()
        .filter(|e| e.created.is_some())
        .min_by_key(|e| e.created)
        .map(|e| e.created_at.clone());
    let ts_max = entries
        .iter()
        .filter(|e| e.created.is_some())
        .max_by_key(|e| e.created)
        .map(|e| e.created_at.clone());

    Ok(DatasetManifest {
        path: path.display().to_string(),
        hash_sha256: file_sha256(path)?,
        collection_key: key.to_string(),
        entry_count: entries.len() as u64,
        skipped_records: dataset.report.skipped,
        user_count: users.len() as u64,
        ts_min,
        ts_max,
        warnings: dataset.report.warnings.clone(),
        generated_at: crate::logging::ts_now(),
    })
}

pub fn file_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

pub fn default_manifest_path(dataset_path: &Path) -> PathBuf {
    let mut p = dataset_path.to_path_buf();
    let fname = dataset_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset.json");
    p.set_file_name(format!("{}.manifest.json", fname));
    p
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
