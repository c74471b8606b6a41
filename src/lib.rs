//! Periodic log-retention utility.
//!
//! Deletes a fixed set of log files under a configured directory once they
//! exceed a maximum age, and force-purges them once after a schema upgrade.
//! The crate never schedules itself: the embedding host calls
//! [`RetentionScheduler::check_and_maybe_purge`] and
//! [`RetentionScheduler::check_and_maybe_purge_on_upgrade`] on its own
//! cadence (e.g. once per administrative request), and the scheduler decides
//! whether to act.
//!
//! Retention state (last run time, last applied schema version) lives in a
//! host-supplied [`PersistentState`] store. Purging is best-effort and
//! idempotent: a missing file is the expected steady state, never an error.

pub mod config;
pub mod retention;
pub mod state;

pub use config::{ConfigError, RetentionConfig};
pub use retention::{
    FileOutcome, LOG_FILES, LogFileStatus, PurgeReport, RetentionError, RetentionResult,
    RetentionScheduler, RetentionStatus, SCHEMA_VERSION, purge,
};
pub use state::{JsonFileState, MemoryState, PersistentState, StateError, StateResult};
