//! # Signer
//!
//! Holds an Ed25519 private key and its derived public key. Issues tokens
//! and verifies them with the same pipeline as [`Verifier`].
//!
//! ## Signing
//!
//! 1. Canonicalize the fixed `{"alg":"EdDSA","typ":"JWT"}` header and the
//!    claim set (JCS: sorted keys, no whitespace).
//! 2. Join their base64url encodings with `.` into the signing input.
//! 3. Sign those exact bytes and append the base64url signature.
//!
//! Ed25519 is deterministic and the serialization is canonical, so the same
//! claim set signed twice with the same key yields the same token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use edsign_core::{CanonicalBytes, ClaimSet, Clock, SystemClock};
use edsign_crypto::{decode_key, CryptoError, SigningKey, VerifyingKey};

use crate::error::TokenError;
use crate::header::Header;
use crate::segment::SigningInput;
use crate::verifier::{verify_token, TokenVerifier, Verifier};

/// Issues and verifies tokens.
pub struct Signer {
    key: SigningKey,
    public_key: VerifyingKey,
    clock: Arc<dyn Clock>,
}

impl Signer {
    /// Build a signer from a 64-byte `seed ‖ public` private key.
    ///
    /// # Errors
    ///
    /// - [`TokenError::InvalidPrivateKey`] if `private_key` is not 64 bytes.
    /// - [`TokenError::InvalidPublicKey`] if its public half does not match
    ///   the key derived from its seed.
    pub fn new(private_key: &[u8]) -> Result<Self, TokenError> {
        let key = SigningKey::from_keypair_bytes(private_key).map_err(|e| {
            tracing::debug!(error = %e, "rejected private key");
            private_key_error(e)
        })?;
        Ok(Self::from_key(key))
    }

    /// Build a signer from a raw 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::from_key(SigningKey::from_seed(seed))
    }

    /// Build a signer from base64 private key text.
    pub fn from_base64(private_key: &str) -> Result<Self, TokenError> {
        let bytes = decode_key(private_key).map_err(private_key_error)?;
        Self::new(&bytes)
    }

    pub fn from_key(key: SigningKey) -> Self {
        let public_key = key.verifying_key();
        Self {
            key,
            public_key,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source used by [`Signer::verify`].
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The public key matching this signer's private key.
    pub fn public_key(&self) -> &VerifyingKey {
        &self.public_key
    }

    /// A public-key-only verifier sharing this signer's clock.
    pub fn verifier(&self) -> Verifier {
        Verifier::from_key(self.public_key).with_clock(Arc::clone(&self.clock))
    }

    /// Sign `claims` into a compact token.
    ///
    /// # Errors
    ///
    /// [`TokenError::SignatureComputationFailed`] if the claim set cannot be
    /// serialized or the signature cannot be produced.
    pub fn sign(&self, claims: &ClaimSet) -> Result<String, TokenError> {
        let header = CanonicalBytes::new(&Header::eddsa())
            .map_err(|e| TokenError::SignatureComputationFailed(e.to_string()))?;
        let payload = CanonicalBytes::new(claims)
            .map_err(|e| TokenError::SignatureComputationFailed(e.to_string()))?;

        let input = SigningInput::new(&header, &payload);
        let signature = self.key.sign(input.as_bytes()).map_err(|e| {
            tracing::debug!(error = %e, "signing failed");
            TokenError::SignatureComputationFailed(e.to_string())
        })?;
        Ok(input.into_token(&signature))
    }

    /// Verify `token` against this signer's clock.
    pub fn verify(&self, token: &str) -> Result<ClaimSet, TokenError> {
        self.verify_at(token, self.clock.now())
    }

    /// Verify `token` as of `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<ClaimSet, TokenError> {
        verify_token(&self.public_key, token, now)
    }
}

impl TokenVerifier for Signer {
    fn verify(&self, token: &str) -> Result<ClaimSet, TokenError> {
        Signer::verify(self, token)
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<ClaimSet, TokenError> {
        Signer::verify_at(self, token, now)
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

fn private_key_error(e: CryptoError) -> TokenError {
    match e {
        CryptoError::InvalidPublicKey(msg) => TokenError::InvalidPublicKey(msg),
        CryptoError::InvalidSigningKey(msg) => TokenError::InvalidPrivateKey(msg),
        other => TokenError::InvalidPrivateKey(other.to_string()),
    }
}
