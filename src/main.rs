//! Cachet - shared local cache for remote files
//!
//! CLI entry point that dispatches to subcommands.

use cachet::cli::{Cli, Commands};
use cachet::config::{Config, ConfigManager};
use cachet::error::CachetResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> CachetResult<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::locate(cli.config).with_cache_root(cli.cache_root);
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);
    debug!("Using config: {}", config_manager.path().display());

    match cli.command {
        Commands::Get(args) => cachet::cli::commands::get(args, &config).await,
        Commands::Tarball(args) => cachet::cli::commands::tarball(args, &config).await,
        Commands::Path(args) => cachet::cli::commands::path(args, &config).await,
        Commands::Config(args) => {
            cachet::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// Logs go to stderr so stdout only carries paths: 0 = info, 1 = debug, 2+ = trace
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("cachet=info"),
        1 => EnvFilter::new("cachet=debug"),
        _ => EnvFilter::new("cachet=trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
