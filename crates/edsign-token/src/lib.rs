//! # edsign-token: Compact EdDSA Tokens
//!
//! Issues and validates three-segment signed tokens carrying a
//! [`ClaimSet`](edsign_core::ClaimSet):
//!
//! - **Signer** (`signer.rs`): holds a private key; signs claim sets and
//!   verifies tokens.
//! - **Verifier** (`verifier.rs`): holds only a public key; verifies tokens.
//! - **Header** (`header.rs`): the fixed EdDSA header and the algorithm gate.
//! - **Segments** (`segment.rs`): base64url compact serialization.
//!
//! ```
//! use edsign_core::ClaimSet;
//! use edsign_token::{Signer, Verifier};
//!
//! let signer = Signer::from_seed(&[7u8; 32]);
//! let verifier = Verifier::new(signer.public_key().as_bytes())?;
//!
//! let claims = ClaimSet::new().with_issuer("svc-a").with_subject("user-42");
//! let token = signer.sign(&claims)?;
//! assert_eq!(verifier.verify(&token)?, claims);
//! # Ok::<(), edsign_token::TokenError>(())
//! ```
//!
//! ## Security Invariants
//!
//! - EdDSA is the only algorithm. The header's declared algorithm is
//!   checked against it before the public key is used, and there is no
//!   switch to turn that check off.
//! - The signature is checked over the token text as received, never over
//!   re-serialized structures.
//! - `Signer` and `Verifier` are immutable after construction and
//!   `Send + Sync`; share one instance across threads without locking.
//!
//! ## Crate Policy
//!
//! - Depends on `edsign-core` and `edsign-crypto` internally.
//! - Errors are returned, never logged-and-swallowed. Rejections emit a
//!   `debug`-level `tracing` event naming the failure kind only.

pub mod error;
pub mod header;
pub mod segment;
pub mod signer;
pub mod verifier;

pub use error::TokenError;
pub use header::{ALGORITHM, TOKEN_TYPE};
pub use signer::Signer;
pub use verifier::{TokenVerifier, Verifier};

// Re-exported so callers can depend on this crate alone.
pub use edsign_core::{Audience, ClaimSet, Clock, ManualClock, SystemClock, Timestamp};
