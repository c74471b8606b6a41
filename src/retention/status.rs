//! Read-only inspection of the retention file set.
//!
//! This is the boundary a host settings page maps onto: current file
//! sizes, last run time, configured threshold. Pure display data, no
//! decision logic.

use std::path::Path;

use chrono::{DateTime, Utc};

/// Existence and size of one file in the retention set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileStatus {
    pub name: String,
    /// Size in bytes, or `None` when the file is absent.
    pub size_bytes: Option<u64>,
}

/// Snapshot of the retention subsystem for display.
#[derive(Debug, Clone)]
pub struct RetentionStatus {
    /// Time the last purge check fired, if any.
    pub last_run: Option<DateTime<Utc>>,
    /// Configured age threshold.
    pub max_age_hours: u64,
    /// Per-file presence and size, in file-set order.
    pub files: Vec<LogFileStatus>,
}

pub(crate) fn inspect(directory: &Path, files: &[&str]) -> Vec<LogFileStatus> {
    files
        .iter()
        .map(|name| {
            let size_bytes = std::fs::metadata(directory.join(name))
                .ok()
                .filter(|m| m.is_file())
                .map(|m| m.len());
            LogFileStatus {
                name: (*name).to_string(),
                size_bytes,
            }
        })
        .collect()
}
