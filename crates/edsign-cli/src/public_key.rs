//! # Public-Key Subcommand
//!
//! Prints the base64 public key matching the private key in the
//! environment, ready to hand to verifying services.

use anyhow::Result;
use clap::Args;
use edsign_crypto::{encode_key, PRIVATE_KEY_VAR};

use crate::keys::signer_from_env;

/// Arguments for `edsign public-key`.
#[derive(Args, Debug)]
pub struct PublicKeyArgs {
    /// Environment variable holding the base64 private key.
    #[arg(long, default_value = PRIVATE_KEY_VAR)]
    pub key_env: String,
}

/// Execute `edsign public-key`.
pub fn run_public_key(args: &PublicKeyArgs) -> Result<u8> {
    println!("{}", derive_public_key(&args.key_env)?);
    Ok(0)
}

/// Base64 public key for the private key held in `var`.
pub fn derive_public_key(var: &str) -> Result<String> {
    let signer = signer_from_env(var)?;
    Ok(encode_key(signer.public_key().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_known_public_key() {
        std::env::set_var(
            "EDSIGN_CLI_PUBLIC_KEY_TEST",
            "btAuwRbluwkSa8n4UgYGBtLTv9s1Yj8Omi5XddN5lopnwM9X2GlaB8O56D1ejW9zZb8YiFzxWqFzs7S6u8idlg==",
        );
        assert_eq!(
            derive_public_key("EDSIGN_CLI_PUBLIC_KEY_TEST").unwrap(),
            "Z8DPV9hpWgfDueg9Xo1vc2W/GIhc8Vqhc7O0urvInZY="
        );
    }
}
