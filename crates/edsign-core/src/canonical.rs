//! # Canonical Serialization: JCS Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for the
//! JSON bytes that become the header and payload segments of a token.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which serializes with
//! `serde_jcs` (RFC 8785): sorted keys, compact separators, ECMAScript
//! number formatting. Any function that builds a signing input must accept
//! `&CanonicalBytes`, so a claim set cannot reach the signer through a
//! serialization path whose key order depends on insertion order.
//!
//! Signing the same claim set twice therefore yields byte-identical tokens.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - Object keys are sorted by UTF-16 code unit, at every nesting level.
/// - No insignificant whitespace.
/// - Output is valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if the value
    /// cannot be represented as JSON (e.g. a map with non-string keys).
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let bytes = serde_jcs::to_vec(obj)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Re-read `value` through its canonical encoding.
///
/// The result is exactly what a decoder of the canonical bytes yields.
/// JCS writes numbers in ECMAScript form, so whole-valued floats come back
/// as integers (`1.0` becomes `1`, `-0.0` becomes `0`). Applying this twice
/// gives the same value as applying it once.
pub fn canonical_value(value: &Value) -> Result<Value, CanonicalizationError> {
    let bytes = CanonicalBytes::new(value)?;
    Ok(serde_json::from_slice(bytes.as_bytes())?)
}
