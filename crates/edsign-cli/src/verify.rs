//! # Verify Subcommand
//!
//! Verifies a token against a public key and prints the claim set as
//! pretty JSON. The token comes from the positional argument or, when that
//! is omitted, from stdin.

use std::io::Read;

use anyhow::{Context, Result};
use clap::Args;
use edsign_crypto::PUBLIC_KEY_VAR;
use edsign_token::TokenVerifier;

use crate::keys::verifier_from_env;

/// Arguments for `edsign verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Token to verify. Read from stdin when omitted.
    pub token: Option<String>,

    /// Environment variable holding the base64 public key.
    #[arg(long, default_value = PUBLIC_KEY_VAR)]
    pub key_env: String,
}

/// Execute `edsign verify`.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let token = match &args.token {
        Some(token) => token.clone(),
        None => read_token(std::io::stdin().lock())?,
    };
    let verifier = verifier_from_env(&args.key_env)?;
    println!("{}", render_claims(&verifier, token.trim())?);
    Ok(0)
}

/// Read a token from `input`, dropping surrounding whitespace.
pub fn read_token(mut input: impl Read) -> Result<String> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .context("failed to read token from stdin")?;
    let token = text.trim();
    anyhow::ensure!(!token.is_empty(), "no token given on the command line or stdin");
    Ok(token.to_string())
}

/// Verify `token` and render its claim set as pretty-printed JSON.
pub fn render_claims(verifier: &dyn TokenVerifier, token: &str) -> Result<String> {
    let claims = verifier.verify(token).context("token rejected")?;
    serde_json::to_string_pretty(&claims).context("failed to render claims")
}
