//! # edsign-core: Foundational Types
//!
//! This crate defines the data model shared by every other crate in the
//! workspace. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Absence is not zero.** Every registered claim in [`ClaimSet`] is an
//!    `Option`. An unset claim is omitted from the serialized payload and
//!    comes back as `None`, never as an empty string or epoch zero.
//!
//! 2. **`CanonicalBytes` newtype.** Everything that ends up in a signing
//!    input flows through [`CanonicalBytes::new()`], which emits RFC 8785
//!    (JCS) output. Identical claim sets always produce identical bytes.
//!
//! 3. **Second-precision UTC timestamps.** [`Timestamp`] truncates at
//!    construction, so a claim set compares equal to its own round trip.
//!
//! 4. **Injectable time.** Validity checks read time through the [`Clock`]
//!    trait. [`SystemClock`] is the production source, [`ManualClock`] the
//!    test source.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `edsign-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod claims;
pub mod error;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::{canonical_value, CanonicalBytes};
pub use claims::{Audience, ClaimSet};
pub use error::{CanonicalizationError, ClaimsError};
pub use temporal::{Clock, ManualClock, SystemClock, Timestamp};
