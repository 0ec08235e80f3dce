//! # Ed25519 Keys and Signatures
//!
//! Thin wrappers over `ed25519_dalek` that check length and structure at
//! construction and keep private material out of diagnostics.
//!
//! ## Key Layouts
//!
//! - **Private key**: 64 bytes, `seed ‖ public`. This is the layout most
//!   Ed25519 libraries export, so keys issued elsewhere load unchanged.
//!   The embedded public half must match the key derived from the seed.
//!   A bare 32-byte seed is accepted through [`SigningKey::from_seed`].
//! - **Public key**: 32 bytes, a compressed Edwards point. Any 32 bytes are
//!   accepted; an encoding that does not decompress to a point simply
//!   fails every verification.
//! - **Signature**: 64 bytes.
//!
//! ## Security Invariants
//!
//! - `SigningKey` does not implement `Serialize` and its `Debug` output is
//!   a fixed placeholder. The inner dalek key zeroizes itself on drop.
//! - Verification is strict: small-order public keys and non-canonical
//!   signature encodings are rejected.

use ed25519_dalek::Signer as _;

use crate::error::CryptoError;

/// Length of an encoded private key (`seed ‖ public`).
pub const PRIVATE_KEY_LENGTH: usize = ed25519_dalek::KEYPAIR_LENGTH;

/// Length of an encoded public key.
pub const PUBLIC_KEY_LENGTH: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;

/// Length of an encoded signature.
pub const SIGNATURE_LENGTH: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// An Ed25519 signature (64 bytes).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519Signature([u8; SIGNATURE_LENGTH]);

/// An Ed25519 private key together with its derived public key.
pub struct SigningKey {
    inner: ed25519_dalek::SigningKey,
}

/// An Ed25519 public key (32 bytes).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct VerifyingKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
    /// `None` when `bytes` is not the encoding of a curve point.
    point: Option<ed25519_dalek::VerifyingKey>,
}

// ---------------------------------------------------------------------------
// Ed25519Signature impls
// ---------------------------------------------------------------------------

impl Ed25519Signature {
    /// Create a signature from raw 64 bytes.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create a signature from a slice, checking its length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; SIGNATURE_LENGTH] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidSignatureLength(bytes.len()))?;
        Ok(Self(arr))
    }

    /// Return the raw 64-byte signature.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }
}

impl std::fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Signature({}...)", hex_prefix(&self.0))
    }
}

// ---------------------------------------------------------------------------
// SigningKey impls
// ---------------------------------------------------------------------------

impl SigningKey {
    /// Load a private key in `seed ‖ public` layout.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidSigningKey`] if `bytes` is not exactly 64 bytes.
    /// - [`CryptoError::InvalidPublicKey`] if the trailing 32 bytes are not
    ///   the public key derived from the leading seed.
    pub fn from_keypair_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let keypair: &[u8; PRIVATE_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidSigningKey(format!(
                "expected {PRIVATE_KEY_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })?;
        let inner = ed25519_dalek::SigningKey::from_keypair_bytes(keypair).map_err(|_| {
            CryptoError::InvalidPublicKey(
                "embedded public key does not match the private seed".to_string(),
            )
        })?;
        Ok(Self { inner })
    }

    /// Create a key from a raw 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            inner: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// Generate a new random key from a caller-supplied CSPRNG.
    pub fn generate<R>(csprng: &mut R) -> Self
    where
        R: rand_core::CryptoRngCore + ?Sized,
    {
        Self {
            inner: ed25519_dalek::SigningKey::generate(csprng),
        }
    }

    /// The public key derived from this private key.
    pub fn verifying_key(&self) -> VerifyingKey {
        let point = self.inner.verifying_key();
        VerifyingKey {
            bytes: point.to_bytes(),
            point: Some(point),
        }
    }

    /// Sign `message`.
    pub fn sign(&self, message: &[u8]) -> Result<Ed25519Signature, CryptoError> {
        let sig = self
            .inner
            .try_sign(message)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        Ok(Ed25519Signature(sig.to_bytes()))
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningKey(<private>)")
    }
}

// ---------------------------------------------------------------------------
// VerifyingKey impls
// ---------------------------------------------------------------------------

impl VerifyingKey {
    /// Load a 32-byte public key.
    ///
    /// Only the length is checked here. Bytes that do not decompress to a
    /// curve point still load, and every [`VerifyingKey::verify`] call on
    /// them fails.
    ///
    /// # Errors
    ///
    /// [`CryptoError::InvalidPublicKey`] on a length mismatch.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidPublicKey(format!(
                "expected {PUBLIC_KEY_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self {
            bytes: arr,
            point: ed25519_dalek::VerifyingKey::from_bytes(&arr).ok(),
        })
    }

    /// Return the raw 32-byte public key.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// Whether the key bytes encode a point on the curve.
    pub fn is_curve_point(&self) -> bool {
        self.point.is_some()
    }

    /// Verify `signature` over `message` with strict checking.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<(), CryptoError> {
        let point = self.point.as_ref().ok_or(CryptoError::VerificationFailed)?;
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        point
            .verify_strict(message, &sig)
            .map_err(|_| CryptoError::VerificationFailed)
    }
}

impl std::fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VerifyingKey({}...)", hex_prefix(self.as_bytes()))
    }
}

fn hex_prefix(bytes: &[u8]) -> String {
    bytes.iter().take(4).map(|b| format!("{b:02x}")).collect()
}
