//! Check error types

use thiserror::Error;

/// Errors a single check invocation can hit. Everything here maps to an
/// UNKNOWN verdict at the top level; `CorruptSlot` is additionally tolerated
/// by the selector, which treats the slot as absent.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Configuration error (missing filter, inverted threshold pair, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A slot file exists but cannot be deserialized
    #[error("Corrupt slot {slot}: {source}")]
    CorruptSlot {
        /// Slot name (jstat_1.log / jstat_2.log)
        slot: &'static str,
        source: serde_json::Error,
    },

    /// Slot record could not be serialized for writing
    #[error("Slot encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// jps/jstat produced output the parser cannot use
    #[error("Stat output parse error: {0}")]
    StatParse(String),

    /// IO error (slot write failures terminate the invocation)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for check operations
pub type CheckResult<T> = Result<T, CheckError>;
