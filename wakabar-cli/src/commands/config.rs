//! Config command - inspect configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use wakabar_store::{default_config_dir, resolve_status_bar_params, Config};

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the config file contents (API key masked).
    Show,

    /// Show configuration paths.
    Path,
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli),
        ConfigAction::Path => show_paths(cli),
    }
}

fn show_config(cli: &Cli) -> Result<()> {
    let path = cli.config_path();
    let config = Config::load_from(&path)?;
    let status_bar = resolve_status_bar_params(&config, &cli.overrides(false));
    let config = config.redacted();

    match cli.format {
        OutputFormat::Text => {
            println!("wakabar Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("File:            {}", path.display());
            println!("API key:         {}", display_opt(config.api_key.as_deref()));
            println!("API URL:         {}", display_opt(config.api_url.as_deref()));
            println!(
                "Timeout:         {}",
                config
                    .timeout
                    .map_or_else(|| "default".to_string(), |t| format!("{t}s"))
            );
            println!("Proxy:           {}", display_opt(config.proxy.as_deref()));
            println!("No SSL verify:   {}", config.no_ssl_verify);
            println!("Hostname:        {}", display_opt(config.hostname.as_deref()));
            println!("Hide categories: {}", status_bar.hide_categories);
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&config)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    #[derive(Serialize)]
    struct Paths {
        config_dir: String,
        config_file: String,
        exists: bool,
    }

    let config_file = cli.config_path();
    let paths = Paths {
        config_dir: default_config_dir().display().to_string(),
        config_file: config_file.display().to_string(),
        exists: config_file.exists(),
    };

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:  {}", paths.config_dir);
            println!(
                "Config file: {}{}",
                paths.config_file,
                if paths.exists { "" } else { " (not found)" }
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

fn display_opt(value: Option<&str>) -> &str {
    value.unwrap_or("(not set)")
}
