//! # Compact Serialization
//!
//! A token is `B64(header) "." B64(payload) "." B64(signature)`, each
//! segment base64url without padding (RFC 4648 §5).
//!
//! The signature covers the first two segments exactly as they appear in
//! the token text, separator included. On the signing side that text is a
//! [`SigningInput`], which can only be built from [`CanonicalBytes`]. On the
//! verifying side it is sliced straight out of the received token, so the
//! check never depends on re-serializing decoded structures.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use edsign_core::CanonicalBytes;
use edsign_crypto::Ed25519Signature;

use crate::error::TokenError;

/// Segment separator.
pub const SEPARATOR: char = '.';

/// `B64(header) "." B64(payload)`, produced from canonical bytes only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SigningInput(String);

impl SigningInput {
    pub(crate) fn new(header: &CanonicalBytes, payload: &CanonicalBytes) -> Self {
        let mut text = URL_SAFE_NO_PAD.encode(header);
        text.push(SEPARATOR);
        URL_SAFE_NO_PAD.encode_string(payload, &mut text);
        Self(text)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Append the signature segment, yielding the finished token.
    pub(crate) fn into_token(self, signature: &Ed25519Signature) -> String {
        let mut token = self.0;
        token.push(SEPARATOR);
        URL_SAFE_NO_PAD.encode_string(signature.as_bytes(), &mut token);
        token
    }
}

/// A received token split into its segments, each decoded.
#[derive(Debug)]
pub(crate) struct TokenParts<'a> {
    /// The first two segments and the separator between them, verbatim.
    pub signing_input: &'a str,
    pub header: Vec<u8>,
    pub payload: Vec<u8>,
    pub signature: Vec<u8>,
}

impl<'a> TokenParts<'a> {
    /// Split on the separator and base64url-decode every segment.
    ///
    /// # Errors
    ///
    /// [`TokenError::MalformedToken`] unless there are exactly three
    /// segments, each valid unpadded base64url.
    pub(crate) fn split(token: &'a str) -> Result<Self, TokenError> {
        let segments = token.split(SEPARATOR).count();
        if segments != 3 {
            return Err(TokenError::MalformedToken(format!(
                "expected 3 segments, found {segments}"
            )));
        }

        let (signing_input, signature) = token
            .rsplit_once(SEPARATOR)
            .ok_or_else(|| TokenError::MalformedToken("missing signature segment".into()))?;
        let (header, payload) = signing_input
            .split_once(SEPARATOR)
            .ok_or_else(|| TokenError::MalformedToken("missing payload segment".into()))?;

        Ok(Self {
            signing_input,
            header: decode(header, "header")?,
            payload: decode(payload, "payload")?,
            signature: decode(signature, "signature")?,
        })
    }
}

fn decode(segment: &str, name: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::MalformedToken(format!("{name} segment is not base64url: {e}")))
}
