use thiserror::Error;

use crate::state::StateError;

/// Errors surfaced by retention checks.
///
/// Purge-level conditions (missing directory, missing file, failed unlink)
/// are benign and encoded in [`super::PurgeReport`]; the only error path is
/// the state store, whose durability is the host's contract.
#[derive(Debug, Error)]
pub enum RetentionError {
    #[error("State store error: {0}")]
    State(#[from] StateError),
}

pub type RetentionResult<T> = Result<T, RetentionError>;
