//! # edsign CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use edsign_cli::public_key::{run_public_key, PublicKeyArgs};
use edsign_cli::sign::{run_sign, SignArgs};
use edsign_cli::verify::{run_verify, VerifyArgs};

/// Sign and verify compact EdDSA tokens.
///
/// Keys are base64 text read from environment variables:
/// `EDSIGN_PRIVATE_KEY` (64-byte seed and public key) for signing and
/// `EDSIGN_PUBLIC_KEY` (32 bytes) for verification.
#[derive(Parser, Debug)]
#[command(name = "edsign", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// Ignored when RUST_LOG is set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign a claim set built from flags and print the token.
    Sign(SignArgs),

    /// Verify a token and print its claims as JSON.
    Verify(VerifyArgs),

    /// Print the public key matching the configured private key.
    PublicKey(PublicKeyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Sign(args) => run_sign(&args),
        Commands::Verify(args) => run_verify(&args),
        Commands::PublicKey(args) => run_public_key(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_sign() {
        let cli = Cli::try_parse_from([
            "edsign",
            "sign",
            "--issuer",
            "svc-a",
            "--audience",
            "dev",
            "--ttl",
            "3600",
        ])
        .unwrap();
        match cli.command {
            Commands::Sign(args) => {
                assert_eq!(args.issuer.as_deref(), Some("svc-a"));
                assert_eq!(args.audience, vec!["dev".to_string()]);
                assert_eq!(args.ttl, Some(3600));
            }
            other => panic!("expected sign, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_verify_positional_token() {
        let cli = Cli::try_parse_from(["edsign", "verify", "a.b.c"]).unwrap();
        match cli.command {
            Commands::Verify(args) => {
                assert_eq!(args.token.as_deref(), Some("a.b.c"));
                assert_eq!(args.key_env, "EDSIGN_PUBLIC_KEY");
            }
            other => panic!("expected verify, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_verify_stdin() {
        let cli = Cli::try_parse_from(["edsign", "verify"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Verify(VerifyArgs { token: None, .. })
        ));
    }

    #[test]
    fn cli_parse_public_key_with_key_env() {
        let cli =
            Cli::try_parse_from(["edsign", "-vv", "public-key", "--key-env", "SVC_KEY"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::PublicKey(args) => assert_eq!(args.key_env, "SVC_KEY"),
            other => panic!("expected public-key, got {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_negative_ttl() {
        assert!(Cli::try_parse_from(["edsign", "sign", "--ttl", "-5"]).is_err());
    }

    #[test]
    fn cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
