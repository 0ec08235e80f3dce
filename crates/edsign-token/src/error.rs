//! # Token Error Taxonomy
//!
//! Every failure the signing engine can report. Each variant is a distinct,
//! caller-diagnosable condition; none is retried or downgraded internally.
//!
//! ## Disclosure
//!
//! Signature and validity-window failures carry no detail beyond their
//! variant. Structural failures say which segment was wrong but never echo
//! key bytes or signature bytes.

use thiserror::Error;

/// Errors from token construction, signing, and verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Private key bytes of the wrong length or structure.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Public key bytes of the wrong length or structure, or a private key
    /// whose public half does not match its seed.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Wrong segment count, bad base64url, or undecodable JSON.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The header declares an algorithm other than EdDSA.
    #[error("invalid signature algorithm: {0}")]
    InvalidSignatureAlgorithm(String),

    /// The signature does not verify under the held public key.
    #[error("invalid signature")]
    InvalidSignature,

    /// `now` is at or past `exp`.
    #[error("token has expired")]
    TokenExpired,

    /// `now` is before `nbf`.
    #[error("token is not valid yet")]
    TokenNotYetValid,

    /// Producing the token failed. Not expected for a well-formed key.
    #[error("signature computation failed: {0}")]
    SignatureComputationFailed(String),
}
