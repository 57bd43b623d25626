//! Error types for showtime-engine operations.

use thiserror::Error;

use crate::interval::Instant;

/// Boxed error returned by session and busy-interval collectors.
pub type CollectError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A time value that does not parse under the format its source promises.
    #[error("Malformed time value '{value}': expected {expected}")]
    MalformedTimeValue {
        value: String,
        expected: &'static str,
    },

    /// An interval whose start is not strictly before its end.
    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval { start: Instant, end: Instant },

    /// A showing with no running time, neither given nor cached for its title.
    #[error("Unknown running time for '{0}'")]
    UnknownDuration(String),

    /// An upstream collector failed; filtering was not attempted.
    #[error("{collector} collector failed: {source}")]
    Collection {
        collector: &'static str,
        #[source]
        source: CollectError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn malformed(value: &str, expected: &'static str) -> Self {
        Self::MalformedTimeValue {
            value: value.to_string(),
            expected,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
