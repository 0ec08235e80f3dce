//! # Verifier
//!
//! Holds a public key and turns tokens back into claim sets. The same
//! pipeline backs [`Signer`](crate::Signer) verification, so a signer and a
//! verifier built from the matching public key accept exactly the same
//! tokens.
//!
//! ## Pipeline
//!
//! Each step is a hard gate; the first failure is returned and nothing
//! decoded so far escapes.
//!
//! 1. Split into three segments and base64url-decode each
//!    ([`TokenError::MalformedToken`]).
//! 2. Require the header to declare EdDSA
//!    ([`TokenError::InvalidSignatureAlgorithm`]). This runs before the
//!    public key touches the signature.
//! 3. Verify the signature over the received `header.payload` text
//!    ([`TokenError::InvalidSignature`]).
//! 4. Decode the payload into a [`ClaimSet`] ([`TokenError::MalformedToken`]).
//! 5. Check `exp` then `nbf` against `now` ([`TokenError::TokenExpired`],
//!    [`TokenError::TokenNotYetValid`]).
//!
//! Issuer, subject and audience are returned unchecked.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use edsign_core::{ClaimSet, Clock, SystemClock};
use edsign_crypto::{decode_key, CryptoError, Ed25519Signature, VerifyingKey};

use crate::error::TokenError;
use crate::header::check_algorithm;
use crate::segment::TokenParts;

/// Anything that can verify tokens: a [`Verifier`] or a [`Signer`](crate::Signer).
pub trait TokenVerifier: Send + Sync {
    /// Verify `token` against the holder's clock.
    fn verify(&self, token: &str) -> Result<ClaimSet, TokenError>;

    /// Verify `token` as of `now`.
    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<ClaimSet, TokenError>;
}

/// Verifies tokens with a public key only.
#[derive(Clone)]
pub struct Verifier {
    key: VerifyingKey,
    clock: Arc<dyn Clock>,
}

impl Verifier {
    /// Build a verifier from a raw 32-byte public key.
    ///
    /// Any 32 bytes are accepted. A key that is not a curve point cannot
    /// match any signature, so its tokens fail with
    /// [`TokenError::InvalidSignature`].
    ///
    /// # Errors
    ///
    /// [`TokenError::InvalidPublicKey`] on a length mismatch.
    pub fn new(public_key: &[u8]) -> Result<Self, TokenError> {
        let key = VerifyingKey::from_bytes(public_key).map_err(|e| {
            tracing::debug!(error = %e, "rejected public key");
            public_key_error(e)
        })?;
        Ok(Self::from_key(key))
    }

    /// Build a verifier from base64 public key text.
    pub fn from_base64(public_key: &str) -> Result<Self, TokenError> {
        let bytes = decode_key(public_key).map_err(public_key_error)?;
        Self::new(&bytes)
    }

    pub fn from_key(key: VerifyingKey) -> Self {
        Self {
            key,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source used by [`Verifier::verify`].
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn public_key(&self) -> &VerifyingKey {
        &self.key
    }

    /// Verify `token` against this verifier's clock.
    pub fn verify(&self, token: &str) -> Result<ClaimSet, TokenError> {
        self.verify_at(token, self.clock.now())
    }

    /// Verify `token` as of `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<ClaimSet, TokenError> {
        verify_token(&self.key, token, now)
    }
}

impl TokenVerifier for Verifier {
    fn verify(&self, token: &str) -> Result<ClaimSet, TokenError> {
        Verifier::verify(self, token)
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<ClaimSet, TokenError> {
        Verifier::verify_at(self, token, now)
    }
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

fn public_key_error(e: CryptoError) -> TokenError {
    match e {
        CryptoError::InvalidPublicKey(msg) => TokenError::InvalidPublicKey(msg),
        other => TokenError::InvalidPublicKey(other.to_string()),
    }
}

/// The verification pipeline shared by `Verifier` and `Signer`.
pub(crate) fn verify_token(
    key: &VerifyingKey,
    token: &str,
    now: DateTime<Utc>,
) -> Result<ClaimSet, TokenError> {
    run_pipeline(key, token, now).map_err(|e| {
        tracing::debug!(error = %e, "token rejected");
        e
    })
}

fn run_pipeline(
    key: &VerifyingKey,
    token: &str,
    now: DateTime<Utc>,
) -> Result<ClaimSet, TokenError> {
    let parts = TokenParts::split(token)?;

    check_algorithm(&parts.header)?;

    let signature =
        Ed25519Signature::from_slice(&parts.signature).map_err(|_| TokenError::InvalidSignature)?;
    key.verify(parts.signing_input.as_bytes(), &signature)
        .map_err(|_| TokenError::InvalidSignature)?;

    let claims: ClaimSet = serde_json::from_slice(&parts.payload)
        .map_err(|e| TokenError::MalformedToken(format!("payload is not a claim set: {e}")))?;

    check_validity_window(&claims, now)?;
    Ok(claims)
}

/// Absent `exp` never expires; absent `nbf` is valid immediately.
fn check_validity_window(claims: &ClaimSet, now: DateTime<Utc>) -> Result<(), TokenError> {
    if let Some(exp) = claims.expires_at {
        if now >= *exp.as_datetime() {
            return Err(TokenError::TokenExpired);
        }
    }
    if let Some(nbf) = claims.not_before {
        if now < *nbf.as_datetime() {
            return Err(TokenError::TokenNotYetValid);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Signer;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use chrono::{Duration, TimeZone};
    use edsign_core::{ManualClock, Timestamp};
    use edsign_crypto::SigningKey;
    use serde_json::json;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    fn signer() -> Signer {
        Signer::from_seed(&[3u8; 32])
    }

    fn window(exp: Option<i64>, nbf: Option<i64>) -> ClaimSet {
        let mut claims = ClaimSet::new();
        claims.expires_at = exp.map(|s| Timestamp::from_epoch_secs(s).unwrap());
        claims.not_before = nbf.map(|s| Timestamp::from_epoch_secs(s).unwrap());
        claims
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(matches!(
            Verifier::new(&[0u8; 31]),
            Err(TokenError::InvalidPublicKey(_))
        ));
        assert!(matches!(
            Verifier::new(&[0u8; 64]),
            Err(TokenError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_new_accepts_off_curve_key() {
        let mut bytes = [0u8; 32];
        bytes[0] = 2;
        let verifier = Verifier::new(&bytes).unwrap();
        let token = signer().sign(&ClaimSet::new().with_subject("x")).unwrap();
        assert_eq!(verifier.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_from_base64_rejects_bad_text() {
        assert!(matches!(
            Verifier::from_base64("%%%"),
            Err(TokenError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_verify_matches_signer() {
        let signer = signer();
        let verifier = Verifier::new(signer.public_key().as_bytes()).unwrap();
        let claims = ClaimSet::new().with_subject("user-42");
        let token = signer.sign(&claims).unwrap();
        assert_eq!(verifier.verify(&token).unwrap(), claims);
    }

    #[test]
    fn test_window_boundaries() {
        let now = t0();
        let secs = now.timestamp();

        // exp is exclusive: valid strictly before, expired at the instant.
        assert!(check_validity_window(&window(Some(secs + 1), None), now).is_ok());
        assert_eq!(
            check_validity_window(&window(Some(secs), None), now),
            Err(TokenError::TokenExpired)
        );
        assert!(
            check_validity_window(&window(Some(secs), None), now - Duration::milliseconds(1))
                .is_ok()
        );

        // nbf is inclusive: valid at the instant, rejected just before.
        assert!(check_validity_window(&window(None, Some(secs)), now).is_ok());
        assert_eq!(
            check_validity_window(&window(None, Some(secs)), now - Duration::milliseconds(1)),
            Err(TokenError::TokenNotYetValid)
        );
    }

    #[test]
    fn test_absent_window_never_fails() {
        let claims = ClaimSet::new();
        assert!(check_validity_window(&claims, DateTime::<Utc>::MIN_UTC).is_ok());
        assert!(check_validity_window(&claims, DateTime::<Utc>::MAX_UTC).is_ok());
    }

    #[test]
    fn test_expiry_checked_before_not_before() {
        let secs = t0().timestamp();
        // Inverted window: nbf after exp. Both fail; exp is reported.
        let claims = window(Some(secs - 10), Some(secs + 10));
        assert_eq!(
            check_validity_window(&claims, t0()),
            Err(TokenError::TokenExpired)
        );
    }

    #[test]
    fn test_with_clock_controls_verify() {
        let signer = signer();
        let clock = Arc::new(ManualClock::new(t0()));
        let verifier = signer.verifier().with_clock(clock.clone());
        let token = signer
            .sign(&ClaimSet::new().with_expires_at(t0() + Duration::seconds(5)))
            .unwrap();

        assert!(verifier.verify(&token).is_ok());
        clock.advance(Duration::seconds(5));
        assert_eq!(verifier.verify(&token), Err(TokenError::TokenExpired));
    }

    #[test]
    fn test_signature_checked_before_payload_decoded() {
        let signer = signer();
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"EdDSA","typ":"JWT"}"#);
        let token = format!("{header}.bm90IGpzb24.{}", URL_SAFE_NO_PAD.encode([0u8; 64]));
        assert_eq!(signer.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_signed_garbage_payload_is_malformed() {
        let key = SigningKey::from_seed(&[3u8; 32]);
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"EdDSA","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(br#"{"exp":"tomorrow"}"#);
        let input = format!("{header}.{payload}");
        let sig = key.sign(input.as_bytes()).unwrap();
        let token = format!("{input}.{}", URL_SAFE_NO_PAD.encode(sig.as_bytes()));

        let verifier = Verifier::from_key(key.verifying_key());
        assert!(matches!(
            verifier.verify(&token),
            Err(TokenError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_short_signature_is_invalid_signature() {
        let signer = signer();
        let token = signer.sign(&ClaimSet::new()).unwrap();
        let (input, _) = token.rsplit_once('.').unwrap();
        let truncated = format!("{input}.{}", URL_SAFE_NO_PAD.encode([1u8; 63]));
        assert_eq!(signer.verify(&truncated), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_debug_shows_key_prefix_only() {
        let verifier = signer().verifier();
        let debug = format!("{verifier:?}");
        assert!(debug.starts_with("Verifier { key: VerifyingKey("));
    }

    #[test]
    fn test_trait_object_dispatch() {
        let signer = signer();
        let token = signer.sign(&ClaimSet::new().with_data(json!({"n": 1}))).unwrap();
        let verifiers: Vec<Box<dyn TokenVerifier>> =
            vec![Box::new(signer.verifier()), Box::new(signer)];
        for v in &verifiers {
            assert_eq!(v.verify(&token).unwrap().data, Some(json!({"n": 1})));
        }
    }
}
