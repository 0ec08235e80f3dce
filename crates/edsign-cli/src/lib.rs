//! # edsign-cli: Command-Line Interface
//!
//! Provides the `edsign` binary over the `edsign-token` library.
//!
//! ## Subcommands
//!
//! - `edsign sign`: Build a claim set from flags and print the token.
//! - `edsign verify`: Verify a token and print its claims as JSON.
//! - `edsign public-key`: Print the public key for the configured private key.
//!
//! Keys are read from environment variables, base64 encoded:
//!
//! ```bash
//! export EDSIGN_PRIVATE_KEY="jXuOxIQo...Ux6iog=="
//! edsign sign --issuer svc-a --subject user-42 --audience dev --ttl 3600
//! edsign public-key
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in the `*Args` structs; handlers return the
//!   text they print so tests can drive them without a terminal.
//! - All token semantics are delegated to `edsign-token`.

pub mod keys;
pub mod public_key;
pub mod sign;
pub mod verify;
