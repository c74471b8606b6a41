//! Best-effort deletion of the retention file set.

use std::io::ErrorKind;
use std::path::Path;

/// Outcome of a single file deletion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file existed and was removed.
    Deleted,
    /// The file was already gone. Expected steady state after a purge.
    AlreadyAbsent,
    /// The file could not be removed (permissions, I/O). Recorded for
    /// observability only; the purge continues past it.
    Failed,
}

/// Results from a single purge pass.
///
/// Used for observability only, never for control flow.
#[derive(Debug, Default)]
pub struct PurgeReport {
    /// Per-file outcomes, in file-set order. Empty when the purge was
    /// skipped because the directory was missing.
    pub outcomes: Vec<(String, FileOutcome)>,

    /// True when the target directory was absent or not a directory and
    /// the purge was skipped entirely.
    pub directory_missing: bool,
}

impl PurgeReport {
    /// Number of files actually removed this pass.
    pub fn deleted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == FileOutcome::Deleted)
            .count()
    }

    /// Check if any file was removed this pass.
    pub fn has_deletions(&self) -> bool {
        self.deleted() > 0
    }

    /// Look up the outcome recorded for `file`.
    pub fn outcome_of(&self, file: &str) -> Option<FileOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == file)
            .map(|(_, o)| *o)
    }
}

/// Delete each file of `files` under `directory`, best-effort.
///
/// Files are handled independently: there is no all-or-nothing guarantee,
/// no backup, no dry-run. A missing file is tolerated and recorded as
/// [`FileOutcome::AlreadyAbsent`]; any other unlink failure is logged at
/// warning level and recorded, never propagated. A missing directory skips
/// the pass entirely. Calling twice in succession yields `AlreadyAbsent`
/// for every file the second time, never an error.
pub fn purge(directory: &Path, files: &[&str]) -> PurgeReport {
    if !directory.is_dir() {
        tracing::warn!(
            directory = %directory.display(),
            "Log directory missing, skipping purge"
        );
        return PurgeReport {
            outcomes: Vec::new(),
            directory_missing: true,
        };
    }

    let mut outcomes = Vec::with_capacity(files.len());
    for name in files {
        let path = directory.join(name);
        let outcome = match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(file = %path.display(), "Deleted log file");
                FileOutcome::Deleted
            }
            Err(e) if e.kind() == ErrorKind::NotFound => FileOutcome::AlreadyAbsent,
            Err(e) => {
                tracing::warn!(
                    file = %path.display(),
                    error = %e,
                    "Failed to delete log file"
                );
                FileOutcome::Failed
            }
        };
        outcomes.push(((*name).to_string(), outcome));
    }

    PurgeReport {
        outcomes,
        directory_missing: false,
    }
}
