//! Append-only correction store with atomic JSON persistence.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::certificate::{CorrectionRecord, ExtractionResult};

/// Owns the correction log and its external JSON representation.
///
/// The log is read fully into memory at load time and only ever grows.
/// Every append rewrites the complete file through a temporary file and
/// rename, so a crash mid-write cannot corrupt the stored log.
#[derive(Debug)]
pub struct CorrectionStore {
    path: Option<PathBuf>,
    records: Vec<CorrectionRecord>,
}

impl CorrectionStore {
    /// Store backed by a JSON file.
    ///
    /// A missing or unreadable file yields an empty log; loading never
    /// fails engine construction.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(records) => records,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unreadable correction log, starting empty");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        debug!(path = %path.display(), count = records.len(), "loaded correction log");

        Self {
            path: Some(path),
            records,
        }
    }

    /// Store with no backing file; appends stay in memory.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            records: Vec::new(),
        }
    }

    /// The correction log, oldest first.
    pub fn records(&self) -> &[CorrectionRecord] {
        &self.records
    }

    /// Number of recorded corrections.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no corrections have been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a correction and persist the complete log.
    ///
    /// The in-memory log keeps the record even when persistence fails; the
    /// failure is reported to the caller instead of being swallowed.
    pub fn append(
        &mut self,
        original: ExtractionResult,
        corrected: ExtractionResult,
        source_text: impl Into<String>,
    ) -> Result<(), StoreError> {
        self.records.push(CorrectionRecord {
            original,
            corrected,
            source_text: source_text.into(),
            timestamp: Utc::now(),
        });
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(&self.records)?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::Persist {
            path: path.clone(),
            source: e,
        })?;
        tmp.write_all(json.as_bytes()).map_err(|e| StoreError::Persist {
            path: path.clone(),
            source: e,
        })?;
        tmp.persist(path).map_err(|e| StoreError::Persist {
            path: path.clone(),
            source: e.error,
        })?;

        debug!(path = %path.display(), count = self.records.len(), "persisted correction log");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_result(cid: &str) -> ExtractionResult {
        ExtractionResult {
            cid: cid.to_string(),
            doctor: "Dr. João Silva".to_string(),
            issue_date: "15/01/2025".to_string(),
            rest_days: "5 dias de repouso".to_string(),
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrections.json");

        let mut store = CorrectionStore::load(&path);
        store
            .append(ExtractionResult::unresolved(), sample_result("J00"), "texto um")
            .unwrap();
        store
            .append(ExtractionResult::unresolved(), sample_result("M54.5"), "texto dois")
            .unwrap();

        let reloaded = CorrectionStore::load(&path);
        assert_eq!(reloaded.records(), store.records());
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.records()[1].corrected.cid, "M54.5");
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CorrectionStore::load(dir.path().join("nonexistent.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_garbage_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrections.json");
        fs::write(&path, "not json at all {").unwrap();

        let store = CorrectionStore::load(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_keeps_record_on_persist_failure() {
        let mut store = CorrectionStore {
            path: Some(PathBuf::from("/nonexistent-dir/deep/corrections.json")),
            records: Vec::new(),
        };

        let result = store.append(
            ExtractionResult::unresolved(),
            sample_result("J00"),
            "texto",
        );

        assert!(result.is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_in_memory_append() {
        let mut store = CorrectionStore::in_memory();
        store
            .append(ExtractionResult::unresolved(), sample_result("J00"), "texto")
            .unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_records_keep_log_order() {
        let mut store = CorrectionStore::in_memory();
        store
            .append(ExtractionResult::unresolved(), sample_result("A10"), "primeiro")
            .unwrap();
        store
            .append(ExtractionResult::unresolved(), sample_result("B20"), "segundo")
            .unwrap();

        let cids: Vec<&str> = store.records().iter().map(|r| r.corrected.cid.as_str()).collect();
        assert_eq!(cids, ["A10", "B20"]);
    }
}
