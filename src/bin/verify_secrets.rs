//! Verify that all SocialClub deployment secrets exist in AWS Secrets Manager.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use socialclub_secrets::error::Result;
use socialclub_secrets::manifest::Manifest;
use socialclub_secrets::store::AwsStore;
use socialclub_secrets::{output, verify};

/// Compare the secrets under the namespace prefix against the manifest.
#[derive(Parser)]
#[command(
    name = "verify-secrets",
    about = "Verify the SocialClub secrets in AWS Secrets Manager",
    version
)]
struct Cli {
    /// Load the manifest from a JSON file instead of the built-in one
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("SOCIALCLUB_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("socialclub_secrets=debug")
        } else {
            EnvFilter::new("socialclub_secrets=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = run(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let manifest = match &cli.manifest {
        Some(path) => Manifest::from_json_file(path)?,
        None => Manifest::builtin(),
    };

    let store = AwsStore::connect()?;

    let verification = verify::run(&store, &manifest.expected_names(), &manifest.prefix)?;
    verify::print_report(&verification, &manifest.prefix);

    // A warning report still exits 0; only a failed listing is an error.
    Ok(())
}
