// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! wakabar - today's coding activity from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Today's activity, one line (default command)
//! wakabar
//!
//! # Grand total only
//! wakabar today --hide-categories
//!
//! # JSON output
//! wakabar --format json
//!
//! # Custom server and key
//! wakabar --api-url https://wakapi.example.com/api --key waka_...
//!
//! # Show the effective configuration
//! wakabar config show
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wakabar_store::{Config, ParamOverrides};

use commands::{config, today};

// ============================================================================
// CLI Definition
// ============================================================================

/// wakabar - today's coding activity for status bars.
#[derive(Parser)]
#[command(name = "wakabar")]
#[command(about = "Today's coding activity from WakaTime, in one line")]
#[command(long_about = r#"
wakabar prints today's coding activity from WakaTime (or any compatible
server) as a single line, for editor status bars and shell prompts.

Exit codes:
  0    success
  1    generic failure (config, bad request, network, rendering)
  102  API error
  104  invalid API key
  112  rate limited

Examples:
  wakabar                          # Today's activity
  wakabar today --hide-categories  # Grand total only
  wakabar --format json            # JSON output
  wakabar config show              # Effective configuration
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'today' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output (config commands).
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Config file path.
    #[arg(long, global = true, env = "WAKABAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// WakaTime API key.
    #[arg(long, global = true, env = "WAKATIME_API_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// API base URL.
    #[arg(long, global = true, env = "WAKATIME_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds (0 disables).
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Proxy URL for API requests.
    #[arg(long, global = true)]
    pub proxy: Option<String>,

    /// Skip TLS certificate verification.
    #[arg(long, global = true)]
    pub no_ssl_verify: bool,

    /// Machine name reported to the API.
    #[arg(long, global = true)]
    pub hostname: Option<String>,

    /// Editor plugin identifier appended to the user agent.
    #[arg(long, global = true)]
    pub plugin: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no error messages).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Returns the config file path, falling back to the default location.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Collects command-line values that override the config file.
    pub fn overrides(&self, hide_categories: bool) -> ParamOverrides {
        ParamOverrides {
            api_key: self.key.clone(),
            api_url: self.api_url.clone(),
            timeout: self.timeout,
            proxy: self.proxy.clone(),
            no_ssl_verify: self.no_ssl_verify,
            hostname: self.hostname.clone(),
            plugin: self.plugin.clone(),
            hide_categories,
        }
    }
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print today's coding activity (default if no command specified).
    #[command(visible_alias = "t")]
    Today(today::TodayArgs),

    /// Inspect configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Plain text, one line.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
///
/// Values match the WakaTime CLI so editor plugins can share handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    ErrGeneric = 1,
    /// The API returned an error.
    ErrApi = 102,
    /// Invalid or missing API key.
    ErrAuth = 104,
    /// Rate limited.
    ErrBackoff = 112,
}

impl ExitCode {
    /// Returns the process exit status.
    pub fn code(self) -> i32 {
        self as i32
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("wakabar=debug,info")
    } else {
        EnvFilter::new("wakabar=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let code = match &cli.command {
        Some(Commands::Today(args)) => run_today(args, &cli).await,
        Some(Commands::Config(args)) => match config::run(args, &cli) {
            Ok(()) => ExitCode::Success,
            Err(e) => {
                report(&cli, &e.to_string());
                ExitCode::ErrGeneric
            }
        },
        None => run_today(&today::TodayArgs::default(), &cli).await,
    };

    if code != ExitCode::Success {
        std::process::exit(code.code());
    }

    Ok(())
}

/// Runs the today command and reports its failure message.
async fn run_today(args: &today::TodayArgs, cli: &Cli) -> ExitCode {
    match today::execute(args, cli).await {
        Ok(code) => code,
        Err(failure) => {
            report(cli, &failure.message);
            failure.code
        }
    }
}

fn report(cli: &Cli, message: &str) {
    if !cli.quiet {
        eprintln!("Error: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::ErrGeneric.code(), 1);
        assert_eq!(ExitCode::ErrApi.code(), 102);
        assert_eq!(ExitCode::ErrAuth.code(), 104);
        assert_eq!(ExitCode::ErrBackoff.code(), 112);
    }

    #[test]
    fn test_default_command_is_today() {
        let cli = Cli::try_parse_from(["wakabar"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_overrides_from_flags() {
        let cli = Cli::try_parse_from([
            "wakabar",
            "today",
            "--hide-categories",
            "--api-url",
            "http://localhost:3000/api",
            "--timeout",
            "10",
            "--no-ssl-verify",
        ])
        .unwrap();

        let Some(Commands::Today(args)) = &cli.command else {
            panic!("expected today command");
        };
        assert!(args.hide_categories);

        let overrides = cli.overrides(args.hide_categories);
        assert_eq!(overrides.api_url.as_deref(), Some("http://localhost:3000/api"));
        assert_eq!(overrides.timeout, Some(10));
        assert!(overrides.no_ssl_verify);
        assert!(overrides.hide_categories);
    }

    #[test]
    fn test_config_flag_overrides_default_path() {
        let cli = Cli::try_parse_from(["wakabar", "--config", "/tmp/w.json"]).unwrap();
        assert_eq!(cli.config_path(), PathBuf::from("/tmp/w.json"));
    }
}
