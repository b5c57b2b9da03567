use thiserror::Error;

use crate::domain::particle::KindId;

/// Errors raised while building a world, a particle or a content bundle.
///
/// Nothing in here is produced by `update()`: per-step anomalies (blocked moves, out-of-bounds
/// destinations, stale updates) are absorbed by the behaviors and never escape the engine.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid behavior: {0}")]
    InvalidBehavior(String),

    #[error("unknown particle kind {0}")]
    UnknownKind(KindId),

    #[error("content bundle: {0}")]
    Content(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
