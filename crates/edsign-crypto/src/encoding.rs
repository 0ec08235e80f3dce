//! # Key Text Encoding
//!
//! Keys travel as standard base64 (RFC 4648 §4, padded). This module is the
//! only place key text is parsed; everything downstream consumes raw bytes.
//!
//! Decoded bytes are returned in a [`Zeroizing`] buffer so private key
//! material is wiped when the caller drops it.

use base64::{engine::general_purpose::STANDARD, Engine};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Decode base64 key text into raw bytes.
///
/// Leading and trailing whitespace is ignored, so values read from files or
/// environment variables with a trailing newline decode cleanly.
///
/// # Errors
///
/// [`CryptoError::KeyDecode`] if the text is not valid padded base64. The
/// message names the failure, never the input.
pub fn decode_key(text: &str) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    STANDARD
        .decode(text.trim())
        .map(Zeroizing::new)
        .map_err(|e| CryptoError::KeyDecode(e.to_string()))
}

/// Encode raw key bytes as standard base64.
pub fn encode_key(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
