mod cli;
mod commands;
mod error;
mod output;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use squall_api::{ApiClient, TransportConfig};
use squall_config::TokenStore;
use squall_core::Console;

use crate::cli::{Cli, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let console = build_console(&cli.global)?;

    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &console, &cli.global).await
}

/// Build a `Console` from the config file, profile, and CLI overrides.
fn build_console(global: &GlobalOpts) -> Result<Console, CliError> {
    let cfg = squall_config::load_config_or_default();
    let (profile_name, profile) = cfg.profile(global.profile.as_deref())?;

    let api_url = global
        .api_url
        .clone()
        .unwrap_or_else(|| profile.api_url.clone());
    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(cfg.defaults.timeout);

    let transport = TransportConfig {
        timeout: Duration::from_secs(timeout),
        ..TransportConfig::default()
    };
    let api = ApiClient::new(&api_url, &transport)?;

    Ok(Console::new(api, Box::new(TokenStore::new(profile_name))))
}
