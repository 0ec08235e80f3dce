//! Loading signers and verifiers from environment variables.

use anyhow::{Context, Result};
use edsign_crypto::read_key_var;
use edsign_token::{Signer, Verifier};

/// Build a [`Signer`] from the base64 private key held in `var`.
pub fn signer_from_env(var: &str) -> Result<Signer> {
    let bytes =
        read_key_var(var).with_context(|| format!("failed to load private key from {var}"))?;
    Signer::new(&bytes).with_context(|| format!("private key in {var} is not usable"))
}

/// Build a [`Verifier`] from the base64 public key held in `var`.
pub fn verifier_from_env(var: &str) -> Result<Verifier> {
    let bytes =
        read_key_var(var).with_context(|| format!("failed to load public key from {var}"))?;
    Verifier::new(&bytes).with_context(|| format!("public key in {var} is not usable"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_KEY: &str =
        "jXuOxIQoLSuKDQxFYTcy0VbBuuSnpaXbLSj25EKtaqB603M7iz3blfnPdFy7m5t3sZZhPp/Bwhf4yGBCUx6iog==";
    const PUBLIC_KEY: &str = "etNzO4s925X5z3Rcu5ubd7GWYT6fwcIX+MhgQlMeoqI=";

    #[test]
    fn loads_matching_pair() {
        std::env::set_var("EDSIGN_CLI_KEYS_TEST_PRIVATE", PRIVATE_KEY);
        std::env::set_var("EDSIGN_CLI_KEYS_TEST_PUBLIC", PUBLIC_KEY);
        let signer = signer_from_env("EDSIGN_CLI_KEYS_TEST_PRIVATE").unwrap();
        let verifier = verifier_from_env("EDSIGN_CLI_KEYS_TEST_PUBLIC").unwrap();
        assert_eq!(signer.public_key(), verifier.public_key());
    }

    #[test]
    fn missing_variable_names_the_variable() {
        let err = signer_from_env("EDSIGN_CLI_KEYS_TEST_UNSET").unwrap_err();
        assert!(format!("{err:#}").contains("EDSIGN_CLI_KEYS_TEST_UNSET"));
    }

    #[test]
    fn public_key_is_not_a_private_key() {
        std::env::set_var("EDSIGN_CLI_KEYS_TEST_SWAPPED", PUBLIC_KEY);
        let err = signer_from_env("EDSIGN_CLI_KEYS_TEST_SWAPPED").unwrap_err();
        assert!(format!("{err:#}").contains("invalid private key"));
    }
}
