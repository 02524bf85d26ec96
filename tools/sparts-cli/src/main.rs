//! sparts: command-line client for the Sparts ledger families.
//!
//! Writes are signed with the hex secp256k1 key in `SPARTS_PRIVATE_KEY`;
//! reads need no key.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use shared_crypto::Secp256k1KeyPair;
use sp_01_batch_builder::BatchBuilder;
use sp_02_submission_client::{ClientConfig, RestSubmissionClient, SubmissionApi};
use std::env;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Command, EntityAction};
use commands::{render_entity, submit_payloads};

const ENV_PRIVATE_KEY: &str = "SPARTS_PRIVATE_KEY";

fn main() -> Result<()> {
    let Cli {
        url,
        auth_user,
        auth_password,
        wait,
        verbose,
        command,
    } = Cli::parse();
    init_tracing(verbose)?;

    let action = match command {
        Command::Keygen => return keygen(),
        Command::Status { batch_id } => {
            let api = client(url, auth_user, auth_password)?;
            return status(&api, &batch_id, wait.unwrap_or(0));
        }
        Command::Category(command) => command.into_action(),
        Command::Supplier(command) => command.into_action(),
        Command::Part(command) => command.into_action(),
        Command::Envelope(command) => command.into_action(),
    };

    let api = client(url, auth_user, auth_password)?;
    match action {
        EntityAction::Write(payload) => {
            let builder = BatchBuilder::new(load_keypair()?);
            let wait = wait.map(Duration::from_secs);
            let submission = submit_payloads(&api, &builder, &[payload.as_ref()], wait)?;
            match submission.status {
                Some(status) => println!("{} {}", submission.batch_id, status),
                None => println!("{}", submission.batch_id),
            }
        }
        EntityAction::Show(family, id) => {
            let entity = api
                .show(family, &id)
                .with_context(|| format!("Failed to read {family} {id}"))?
                .with_context(|| format!("{family} {id} not found"))?;
            println!("{}", render_entity(&entity)?);
        }
        EntityAction::List(family) => {
            let entities = api
                .list(family)
                .with_context(|| format!("Failed to list {family} records"))?;
            for entity in &entities {
                println!("{}", render_entity(entity)?);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Client config from the environment, overridden by command-line flags.
fn client(
    url: Option<String>,
    auth_user: Option<String>,
    auth_password: Option<String>,
) -> Result<RestSubmissionClient> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = url {
        config.base_url = url;
    }
    if let Some(user) = auth_user {
        let password = auth_password
            .or_else(|| config.auth.as_ref().and_then(|auth| auth.password.clone()));
        config = config.with_auth(user, password);
    }
    RestSubmissionClient::new(config).context("Failed to create REST client")
}

fn load_keypair() -> Result<Secp256k1KeyPair> {
    let hex = env::var(ENV_PRIVATE_KEY)
        .with_context(|| format!("{ENV_PRIVATE_KEY} must hold a hex signing key for writes"))?;
    Secp256k1KeyPair::from_hex(hex.trim()).context("Invalid signing key")
}

fn keygen() -> Result<()> {
    let keypair = Secp256k1KeyPair::generate();
    println!("private: {}", keypair.to_hex().as_str());
    println!("public:  {}", keypair.public_key().to_hex());
    Ok(())
}

fn status(api: &RestSubmissionClient, batch_id: &str, wait_seconds: u64) -> Result<()> {
    let report = api
        .status_report(batch_id, wait_seconds)
        .context("Failed to fetch batch status")?;

    println!("{} {}", report.id, report.status);
    for invalid in &report.invalid_transactions {
        println!("  {}: {}", invalid.id, invalid.message);
    }
    Ok(())
}
