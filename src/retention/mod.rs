//! Log retention: age-based and upgrade-triggered purging.
//!
//! This module decides when to purge and performs the purge itself:
//! 1. An age check fires once the configured threshold has elapsed since
//!    the last check (or immediately on first install).
//! 2. An upgrade check fires exactly once whenever the schema constant of
//!    the running build is newer than the stored one.
//!
//! Both checks delegate to the same best-effort, idempotent [`purge`]
//! operation over the fixed [`LOG_FILES`] set.

mod error;
mod purger;
mod scheduler;
mod status;

pub use error::{RetentionError, RetentionResult};
pub use purger::{FileOutcome, PurgeReport, purge};
pub use scheduler::RetentionScheduler;
pub use status::{LogFileStatus, RetentionStatus};

/// The fixed set of log files subject to retention, in purge order, each
/// relative to the configured log directory. Constant for a given build.
pub const LOG_FILES: [&str; 3] = [
    "audit-queue.log",
    "old-failed-logins.log",
    "failed-logins.log",
];

/// Schema version of this build. Increment to force a one-time cleanup on
/// the first check after an upgrade.
pub const SCHEMA_VERSION: u32 = 3;
