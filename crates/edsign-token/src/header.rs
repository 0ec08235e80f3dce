//! # Token Header
//!
//! The header declares the signature algorithm and token type. It is
//! written explicitly on every token and, on the way in, checked against
//! the one algorithm this crate implements before the public key is used.
//!
//! ## Security Invariant
//!
//! The algorithm is never inferred from the token. A header declaring
//! `none`, `HS256`, `ES256`, a differently cased `eddsa`, a non-string
//! value, or no `alg` at all is rejected with
//! [`TokenError::InvalidSignatureAlgorithm`]. There is no configuration
//! that relaxes this.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::TokenError;

/// The only algorithm identifier this crate signs with or accepts.
pub const ALGORITHM: &str = "EdDSA";

/// Token type declared in every header.
pub const TOKEN_TYPE: &str = "JWT";

/// The header written on signed tokens.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct Header {
    alg: &'static str,
    typ: &'static str,
}

impl Header {
    pub(crate) fn eddsa() -> Self {
        Self {
            alg: ALGORITHM,
            typ: TOKEN_TYPE,
        }
    }
}

/// Parse a decoded header segment and require `alg == "EdDSA"`.
///
/// Fields other than `alg` are ignored.
pub(crate) fn check_algorithm(header: &[u8]) -> Result<(), TokenError> {
    let fields: Map<String, Value> = serde_json::from_slice(header)
        .map_err(|e| TokenError::MalformedToken(format!("header is not a JSON object: {e}")))?;

    match fields.get("alg") {
        Some(Value::String(alg)) if alg == ALGORITHM => Ok(()),
        Some(other) => Err(TokenError::InvalidSignatureAlgorithm(other.to_string())),
        None => Err(TokenError::InvalidSignatureAlgorithm(
            "no algorithm declared".to_string(),
        )),
    }
}
