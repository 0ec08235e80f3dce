//! # edsign-crypto: Key Material
//!
//! Provides the cryptographic building blocks the token engine is built on:
//!
//! - **Ed25519** signing keys, verifying keys, and signatures, with length
//!   and structure checks at construction.
//! - **Key decoding** from standard base64 text into zeroizing buffers.
//! - **Environment loading** of base64 keys for processes that receive
//!   secrets through their environment.
//!
//! ## Crate Policy
//!
//! - Private key bytes never reach `Debug` output or log events.
//! - Decoded key buffers are zeroized on drop.
//! - No mocking of cryptographic operations in tests; all tests use real
//!   Ed25519 keys.

pub mod ed25519;
pub mod encoding;
pub mod env;
pub mod error;

pub use ed25519::{Ed25519Signature, SigningKey, VerifyingKey};
pub use encoding::{decode_key, encode_key};
pub use env::{read_key_var, PRIVATE_KEY_VAR, PUBLIC_KEY_VAR};
pub use error::CryptoError;
