//! Create or update the SocialClub deployment secrets in AWS Secrets Manager.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use socialclub_secrets::error::Result;
use socialclub_secrets::manifest::Manifest;
use socialclub_secrets::store::AwsStore;
use socialclub_secrets::{output, upsert};

/// Upsert the secrets manifest into AWS Secrets Manager.
#[derive(Parser)]
#[command(
    name = "create-secrets",
    about = "Create or update the SocialClub secrets in AWS Secrets Manager",
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

    output::banner("AWS SECRETS MANAGER CREATION", 88);
    let tally = upsert::run(&store, &manifest.secrets);
    upsert::print_summary(&tally);

    // Per-entry failures are reported in the tally, not in the exit code.
    Ok(())
}
