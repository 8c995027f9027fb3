//! Error types for the playback engine.
//!
//! Nothing here is fatal to the session: an invalid reset leaves the
//! previous sequence intact, and a history-limit failure pauses playback
//! before any mutation, leaving the session consistent and rewindable.
//! Reentrant starts, stale-generation wakeups, and rewind underflow are
//! normal control flow and have no error value at all.

use std::fmt;

/// Errors surfaced by the engine's control operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Reset requested with fewer than two elements. The previous
    /// sequence is kept and the generation is not bumped.
    InvalidSize { size: usize },

    /// Snapshot history memory limit exceeded. The failing push happens
    /// before any mutation, so the step simply does not occur.
    HistoryLimitExceeded { current: usize, limit: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidSize { size } => {
                write!(f, "Invalid dataset size: {} (must be at least 2)", size)
            }
            EngineError::HistoryLimitExceeded { current, limit } => {
                write!(
                    f,
                    "History memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
        }
    }
}

impl std::error::Error for EngineError {}
