//! # Cryptographic Error Types
//!
//! Structured errors for key handling and signature operations.
//! Uses `thiserror` for ergonomic error definitions with diagnostic context.
//! None of the messages carry key or signature bytes.

use thiserror::Error;

/// Errors from key handling and Ed25519 operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Private key bytes of the wrong length or structure.
    #[error("invalid Ed25519 private key: {0}")]
    InvalidSigningKey(String),

    /// Public key bytes of the wrong length, or a private key whose public
    /// half does not match its seed.
    #[error("invalid Ed25519 public key: {0}")]
    InvalidPublicKey(String),

    /// Invalid Ed25519 signature length.
    #[error("invalid Ed25519 signature length: expected 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// Producing a signature failed.
    #[error("Ed25519 signing failed: {0}")]
    SigningFailed(String),

    /// Ed25519 signature verification failed.
    #[error("Ed25519 verification failed")]
    VerificationFailed,

    /// Key text is not valid base64.
    #[error("key decode error: {0}")]
    KeyDecode(String),

    /// No key material where one was expected.
    #[error("missing key: {0}")]
    MissingKey(String),
}
