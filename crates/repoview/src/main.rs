mod cli;
mod color;
mod commands;
mod config;
mod logging;
mod output;
mod prompt;
mod session;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use github_backend::GitHubClient;
use output::output_error;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = cli.format;

    color::init(cli.color);
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        output_error(&e, format);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Show {
            ref repository,
            state,
            page,
        } => {
            let client = build_client(&cli)?;
            commands::show::handle_show(&client, repository.clone(), state.into(), page, cli.format)
        }
        Commands::Browse { ref repository } => {
            let client = build_client(&cli)?;
            commands::browse::handle_browse(Arc::new(client), repository.clone(), cli.format)
        }
        Commands::Config { ref action } => {
            commands::config::handle_config(action, cli.config.clone(), cli.api_url.clone(), cli.format)
        }
        Commands::Completions { shell } => {
            Cli::generate_completions(shell);
            Ok(())
        }
    }
}

/// Resolve configuration and create the API client
fn build_client(cli: &Cli) -> Result<GitHubClient> {
    let mut config = Config::load(cli.config.clone())?;
    config.merge_with_cli(cli.api_url.clone());
    config.validate()?;

    tracing::debug!(api_url = %config.api_url, timeout_secs = config.timeout_secs, "Using config");

    Ok(GitHubClient::with_options(
        &config.api_url,
        config.timeout(),
        &config.user_agent,
    ))
}
