use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Running counters for one collection pass.
#[derive(Debug, Clone)]
pub struct CollectionProgress {
    pub files_scanned: usize,
    pub files_written: usize,
    pub skipped_by_extension: usize,
    pub skipped_not_text: usize,
    pub bytes_written: u64,
    pub files_by_extension: BTreeMap<String, usize>,
    pub current_file: Option<String>,
    pub start_time: Instant,
    pub started_at: DateTime<Utc>,
}

impl CollectionProgress {
    pub fn new() -> Self {
        Self {
            files_scanned: 0,
            files_written: 0,
            skipped_by_extension: 0,
            skipped_not_text: 0,
            bytes_written: 0,
            files_by_extension: BTreeMap::new(),
            current_file: None,
            start_time: Instant::now(),
            started_at: Utc::now(),
        }
    }

    pub fn record_scanned(&mut self, path: String) {
        self.files_scanned += 1;
        self.current_file = Some(path);
    }

    pub fn record_written(&mut self, extension: Option<&str>, bytes: u64) {
        self.files_written += 1;
        self.bytes_written += bytes;
        let ext = extension.unwrap_or("no_extension").to_string();
        *self.files_by_extension.entry(ext).or_insert(0) += 1;
    }

    pub fn into_summary(self, root: PathBuf, output: PathBuf) -> CollectionSummary {
        CollectionSummary {
            root,
            output,
            files_scanned: self.files_scanned,
            files_written: self.files_written,
            skipped_by_extension: self.skipped_by_extension,
            skipped_not_text: self.skipped_not_text,
            bytes_written: self.bytes_written,
            files_by_extension: self.files_by_extension,
            duration: self.start_time.elapsed(),
            started_at: self.started_at,
        }
    }
}

impl Default for CollectionProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub root: PathBuf,
    pub output: PathBuf,
    pub files_scanned: usize,
    pub files_written: usize,
    pub skipped_by_extension: usize,
    pub skipped_not_text: usize,
    pub bytes_written: u64,
    pub files_by_extension: BTreeMap<String, usize>,
    pub duration: Duration,
    pub started_at: DateTime<Utc>,
}
