//! Error types for the smoke harness.
//!
//! # Design
//! Request building can fail only on encoding (`ApiError`). Executing a
//! step can fail on the transport or on JSON decoding (`StepError`); those
//! are reported inline in the transcript and never abort a run.

use thiserror::Error;

/// Errors raised while building requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The JSON payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The query parameters could not be encoded.
    #[error("query encoding failed: {0}")]
    QueryEncoding(#[from] serde_urlencoded::ser::Error),
}

/// No response was obtained: connection refused, DNS failure, broken body.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Why a single step ended in a failure line.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The body was not valid JSON.
    #[error("invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),
}
