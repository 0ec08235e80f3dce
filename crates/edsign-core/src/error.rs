//! # Error Types
//!
//! Errors raised by the claim model and canonical serialization. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//! Token-level failures live in `edsign-token`, which maps these into its
//! own taxonomy at the signing boundary.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error while building or reading a claim set.
#[derive(Error, Debug)]
pub enum ClaimsError {
    /// The application payload could not be converted to or from JSON.
    #[error("claim data conversion failed: {0}")]
    Data(#[source] serde_json::Error),

    /// An epoch value outside the range chrono can represent.
    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}
