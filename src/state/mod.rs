//! Persistent retention state.
//!
//! The scheduler keeps two durable values: the time the last purge check
//! fired and the last schema version that forced a cleanup. [`PersistentState`]
//! is the seam the embedding host implements; durability and storage medium
//! are the host's contract. Two implementations ship with the crate:
//! [`MemoryState`] for tests and ephemeral hosts, [`JsonFileState`] for a
//! simple on-disk store.

mod json_file;
mod memory;

use chrono::{DateTime, Utc};
pub use json_file::JsonFileState;
pub use memory::MemoryState;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("State I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("State serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StateResult<T> = Result<T, StateError>;

/// Durable store for retention bookkeeping.
///
/// Implementations must return the freshest stored values on every call:
/// the scheduler re-reads state on each check and never caches it across
/// invocations. A write that returns `Ok` is assumed durable; the scheduler
/// performs no retries of its own.
pub trait PersistentState {
    /// Time the last purge check fired, or `None` if none ever has.
    fn last_run(&self) -> StateResult<Option<DateTime<Utc>>>;

    /// Record the time a purge check fired.
    fn set_last_run(&mut self, at: DateTime<Utc>) -> StateResult<()>;

    /// Last schema version that forced a cleanup, or `None` on a fresh
    /// install.
    fn schema_version(&self) -> StateResult<Option<u32>>;

    /// Record the schema version after an upgrade-triggered cleanup.
    fn set_schema_version(&mut self, version: u32) -> StateResult<()>;
}
