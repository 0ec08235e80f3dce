//! # Sign Subcommand
//!
//! Builds a claim set from flags, stamps `iat` with the current time, and
//! prints the signed token on stdout.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use edsign_crypto::PRIVATE_KEY_VAR;
use edsign_token::ClaimSet;
use serde_json::Value;

use crate::keys::signer_from_env;

/// Arguments for `edsign sign`.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Issuer (`iss`).
    #[arg(long)]
    pub issuer: Option<String>,

    /// Subject (`sub`).
    #[arg(long)]
    pub subject: Option<String>,

    /// Intended recipient (`aud`). Repeat or comma-separate for several.
    #[arg(long, value_delimiter = ',')]
    pub audience: Vec<String>,

    /// Token identifier (`jti`). A random UUID when omitted.
    #[arg(long)]
    pub id: Option<String>,

    /// Lifetime in seconds; sets `exp`. The token never expires when omitted.
    #[arg(long, value_name = "SECS")]
    pub ttl: Option<u64>,

    /// Delay in seconds before the token becomes valid; sets `nbf`.
    #[arg(long, value_name = "SECS")]
    pub not_before_in: Option<u64>,

    /// Application payload as a JSON document.
    #[arg(long, value_name = "JSON", value_parser = parse_json)]
    pub data: Option<Value>,

    /// Environment variable holding the base64 private key.
    #[arg(long, default_value = PRIVATE_KEY_VAR)]
    pub key_env: String,
}

/// Execute `edsign sign`.
pub fn run_sign(args: &SignArgs) -> Result<u8> {
    println!("{}", sign_token(args, Utc::now())?);
    Ok(0)
}

/// Sign the claim set described by `args` as of `now`.
pub fn sign_token(args: &SignArgs, now: DateTime<Utc>) -> Result<String> {
    let signer = signer_from_env(&args.key_env)?;
    let claims = build_claims(args, now)?;
    tracing::debug!(id = claims.id.as_deref(), "signing claim set");
    signer.sign(&claims).context("failed to sign claim set")
}

/// Translate flags into a claim set, with every offset relative to `now`.
pub fn build_claims(args: &SignArgs, now: DateTime<Utc>) -> Result<ClaimSet> {
    let id = args
        .id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let mut claims = ClaimSet::new().with_issued_at(now).with_id(id);

    if let Some(issuer) = &args.issuer {
        claims = claims.with_issuer(issuer.as_str());
    }
    if let Some(subject) = &args.subject {
        claims = claims.with_subject(subject.as_str());
    }
    if !args.audience.is_empty() {
        claims = claims.with_audience(args.audience.iter().map(String::as_str));
    }
    if let Some(ttl) = args.ttl {
        claims = claims.with_expires_at(offset(now, ttl, "--ttl")?);
    }
    if let Some(delay) = args.not_before_in {
        claims = claims.with_not_before(offset(now, delay, "--not-before-in")?);
    }
    if let Some(data) = &args.data {
        claims = claims.with_data(data.clone());
    }
    Ok(claims)
}

fn offset(now: DateTime<Utc>, secs: u64, flag: &str) -> Result<DateTime<Utc>> {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|d| now.checked_add_signed(d))
        .with_context(|| format!("{flag} {secs} is out of range"))
}

fn parse_json(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}
