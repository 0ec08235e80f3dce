//! # Claim Set: Registered Claims Plus an Opaque Payload
//!
//! `ClaimSet` is the record carried inside every token. It holds the seven
//! registered claims and one application-defined `data` value that the
//! signing engine never looks inside.
//!
//! ## Wire Names
//!
//! | Field         | Key    | Encoding                         |
//! |---------------|--------|----------------------------------|
//! | `issuer`      | `iss`  | string                           |
//! | `subject`     | `sub`  | string                           |
//! | `audience`    | `aud`  | array of strings                 |
//! | `expires_at`  | `exp`  | integer seconds since the epoch  |
//! | `not_before`  | `nbf`  | integer seconds since the epoch  |
//! | `issued_at`   | `iat`  | integer seconds since the epoch  |
//! | `id`          | `jti`  | string                           |
//! | `data`        | `Data` | any JSON value                   |
//!
//! ## Absence Invariant
//!
//! Unset fields are omitted from the payload entirely and decode back to
//! `None`. An empty string or an empty audience list is a value, not an
//! absence, and round-trips as such. A JSON `null` payload is the one
//! exception: it is indistinguishable from a missing `Data` key on the
//! wire, so [`ClaimSet::with_data`] stores it as absent.
//!
//! ## Building
//!
//! ```
//! use edsign_core::ClaimSet;
//!
//! let claims = ClaimSet::new()
//!     .with_issuer("svc-a")
//!     .with_subject("user-42")
//!     .with_audience(["dev"])
//!     .with_id("0");
//! assert_eq!(claims.issuer.as_deref(), Some("svc-a"));
//! assert!(claims.expires_at.is_none());
//! ```
//!
//! Nothing is validated at build time. A `not_before` later than
//! `expires_at` is accepted here and rejected at verification.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::canonical::canonical_value;
use crate::error::ClaimsError;
use crate::temporal::Timestamp;

/// The claims carried by a token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Token issuer (`iss`).
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Principal the token is about (`sub`).
    #[serde(rename = "sub", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Intended recipients (`aud`).
    #[serde(rename = "aud", default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,

    /// Instant from which the token is no longer valid (`exp`).
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,

    /// Instant before which the token is not yet valid (`nbf`).
    #[serde(rename = "nbf", default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<Timestamp>,

    /// Instant the token was issued (`iat`). Informational only.
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<Timestamp>,

    /// Unique identifier of this token instance (`jti`).
    #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Application-defined payload, carried unexamined.
    ///
    /// Set it through [`ClaimSet::with_data`] to hold the canonical form. A
    /// value assigned directly is signed canonically too, so a whole-valued
    /// float in it decodes as an integer.
    #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ClaimSet {
    /// An empty claim set: every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the audience. Order is preserved.
    pub fn with_audience<I, S>(mut self, audience: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.audience = Some(Audience::new(audience));
        self
    }

    /// Set `exp`. Sub-second precision is discarded.
    pub fn with_expires_at(mut self, at: impl Into<Timestamp>) -> Self {
        self.expires_at = Some(at.into());
        self
    }

    /// Set `nbf`. Sub-second precision is discarded.
    pub fn with_not_before(mut self, at: impl Into<Timestamp>) -> Self {
        self.not_before = Some(at.into());
        self
    }

    /// Set `iat`. Sub-second precision is discarded.
    pub fn with_issued_at(mut self, at: impl Into<Timestamp>) -> Self {
        self.issued_at = Some(at.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach an opaque payload. `Value::Null` clears it.
    ///
    /// The value is stored in canonical form, exactly as it will decode from
    /// a token: whole-valued floats become integers (`1.0` is kept as `1`).
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = match data.into() {
            Value::Null => None,
            // A `Value` always has a canonical encoding.
            value => Some(canonical_value(&value).unwrap_or(value)),
        };
        self
    }

    /// Attach an application type as the payload.
    ///
    /// # Errors
    ///
    /// Returns [`ClaimsError::Data`] if `data` cannot be represented as JSON.
    pub fn try_with_data<T: Serialize>(self, data: &T) -> Result<Self, ClaimsError> {
        let value = serde_json::to_value(data).map_err(ClaimsError::Data)?;
        Ok(self.with_data(value))
    }

    /// Decode the payload into an application type.
    ///
    /// Returns `Ok(None)` when no payload is present.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<Option<T>, ClaimsError> {
        self.data
            .as_ref()
            .map(|value| T::deserialize(value).map_err(ClaimsError::Data))
            .transpose()
    }
}

// ---------------------------------------------------------------------------
// Audience
// ---------------------------------------------------------------------------

/// Ordered list of intended recipients.
///
/// Always serialized as an array. Deserialization also accepts a bare
/// string, which becomes a one-element list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Audience(Vec<String>);

impl Audience {
    pub fn new<I, S>(recipients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(recipients.into_iter().map(Into::into).collect())
    }

    /// Whether `recipient` is one of the intended recipients.
    pub fn contains(&self, recipient: &str) -> bool {
        self.0.iter().any(|r| r == recipient)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for Audience {
    fn from(recipients: Vec<String>) -> Self {
        Self(recipients)
    }
}

impl<'a> IntoIterator for &'a Audience {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for Audience {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            One(String),
            Many(Vec<String>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::One(recipient) => Self(vec![recipient]),
            Repr::Many(recipients) => Self(recipients),
        })
    }
}
