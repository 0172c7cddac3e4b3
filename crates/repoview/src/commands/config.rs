use crate::cli::{ConfigCommands, OutputFormat};
use crate::config::{config_paths, Config};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

pub fn handle_config(
    action: &ConfigCommands,
    config_path: Option<PathBuf>,
    cli_api_url: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    match action {
        ConfigCommands::Show => handle_show(config_path, cli_api_url, format),
        ConfigCommands::Path => handle_path(config_path, format),
    }
}

fn handle_show(
    config_path: Option<PathBuf>,
    cli_api_url: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut config = Config::load(config_path)?;
    config.merge_with_cli(cli_api_url);
    config.validate()?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Text => {
            let text = toml::to_string_pretty(&config).context("Failed to format config")?;
            print!("{}", text);
        }
    }
    Ok(())
}

fn handle_path(config_path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let paths = config_paths(config_path.as_deref());

    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = paths
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "path": p.display().to_string(),
                        "exists": p.exists(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            for path in &paths {
                let marker = if path.exists() {
                    "(found)".green().to_string()
                } else {
                    "(missing)".dimmed().to_string()
                };
                println!("{} {}", path.display(), marker);
            }
        }
    }
    Ok(())
}
