use chrono::{DateTime, Utc};

use super::{PersistentState, StateResult};

/// In-process state store.
///
/// Nothing survives the process. Useful for tests and for hosts that
/// persist retention state through their own mechanism and rebuild it on
/// startup.
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    last_run: Option<DateTime<Utc>>,
    schema_version: Option<u32>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentState for MemoryState {
    fn last_run(&self) -> StateResult<Option<DateTime<Utc>>> {
        Ok(self.last_run)
    }

    fn set_last_run(&mut self, at: DateTime<Utc>) -> StateResult<()> {
        self.last_run = Some(at);
        Ok(())
    }

    fn schema_version(&self) -> StateResult<Option<u32>> {
        Ok(self.schema_version)
    }

    fn set_schema_version(&mut self, version: u32) -> StateResult<()> {
        self.schema_version = Some(version);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_starts_absent() {
        let state = MemoryState::new();
        assert_eq!(state.last_run().unwrap(), None);
        assert_eq!(state.schema_version().unwrap(), None);
    }

    #[test]
    fn test_roundtrip() {
        let mut state = MemoryState::new();
        let now = Utc::now();

        state.set_last_run(now).unwrap();
        state.set_schema_version(3).unwrap();

        assert_eq!(state.last_run().unwrap(), Some(now));
        assert_eq!(state.schema_version().unwrap(), Some(3));
    }
}
