use anyhow::{Context, Result};
use bookkeeping_client::BookkeepingClient;
use bookkeeping_core::ClientConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "bookkeeping")]
#[command(about = "Command-line client for the ALICE Bookkeeping API", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.config/bookkeeping/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the API, e.g. http://localhost:4000/api
    #[arg(long, global = true)]
    url: Option<String>,

    /// Bearer token
    #[arg(long, global = true)]
    token: Option<String>,

    /// Print records as pretty JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start, end and look up runs
    Run {
        #[command(subcommand)]
        action: commands::run::RunAction,
    },
    /// Register FLPs and report their counters
    Flp {
        #[command(subcommand)]
        action: commands::flp::FlpAction,
    },
    /// Write and read log entries
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Track ECS environments
    Env {
        #[command(subcommand)]
        action: commands::env::EnvAction,
    },
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bookkeeping=info"));

    let _tracing = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => ClientConfig::default_path()?,
    };
    ClientConfig::from_path_with(&path, cli.url.clone(), cli.token.clone())
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let client = BookkeepingClient::from_config(config).context("Failed to create client")?;
    let output = commands::Output::new(cli.json);

    match cli.command {
        Commands::Run { action } => commands::run::execute(&client, action, output).await?,
        Commands::Flp { action } => commands::flp::execute(&client, action, output).await?,
        Commands::Log { action } => commands::log::execute(&client, action, output).await?,
        Commands::Env { action } => commands::env::execute(&client, action, output).await?,
    }

    Ok(())
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
    fn test_parse_run_start() {
        let cli = Cli::try_parse_from([
            "bookkeeping",
            "--url",
            "http://localhost:4000/api",
            "run",
            "start",
            "--run-number",
            "80",
            "--environment-id",
            "env-80",
            "--run-type",
            "cosmics",
            "--n-detectors",
            "5",
            "--detectors",
            "CPV,ITS",
        ])
        .unwrap();

        assert_eq!(cli.url.as_deref(), Some("http://localhost:4000/api"));
        match cli.command {
            Commands::Run {
                action:
                    commands::run::RunAction::Start {
                        run_number,
                        run_type,
                        detectors,
                        ..
                    },
            } => {
                assert_eq!(run_number, 80);
                assert_eq!(run_type, bookkeeping_core::run::RunType::Cosmics);
                assert_eq!(detectors.len(), 2);
            }
            _ => panic!("Expected run start"),
        }
    }

    #[test]
    fn test_end_now_conflicts_with_explicit_time() {
        let result = Cli::try_parse_from([
            "bookkeeping",
            "run",
            "end",
            "80",
            "--now",
            "--o2-end",
            "1647867600000",
        ]);
        assert!(result.is_err());
    }
}
