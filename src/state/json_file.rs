use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PersistentState, StateResult};

/// State stored as a single JSON document on disk.
///
/// Every accessor re-reads the file, so writes from other processes are
/// always visible. Updates go through a temp file in the same directory
/// followed by a rename, so a crash never leaves a torn document. A missing
/// file reads as all-absent state (fresh install).
#[derive(Debug, Clone)]
pub struct JsonFileState {
    path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_run: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    schema_version: Option<u32>,
}

impl JsonFileState {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> StateResult<StateDoc> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StateDoc::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, doc: &StateDoc) -> StateResult<()> {
        let bytes = serde_json::to_vec_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PersistentState for JsonFileState {
    fn last_run(&self) -> StateResult<Option<DateTime<Utc>>> {
        Ok(self.read()?.last_run)
    }

    fn set_last_run(&mut self, at: DateTime<Utc>) -> StateResult<()> {
        let mut doc = self.read()?;
        doc.last_run = Some(at);
        self.write(&doc)
    }

    fn schema_version(&self) -> StateResult<Option<u32>> {
        Ok(self.read()?.schema_version)
    }

    fn set_schema_version(&mut self, version: u32) -> StateResult<()> {
        let mut doc = self.read()?;
        doc.schema_version = Some(version);
        self.write(&doc)
    }
}
