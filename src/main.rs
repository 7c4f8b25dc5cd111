//! Bookstore - book catalog service
//!
//! CLI entry point that dispatches to subcommands.

use bookstore::cli::args::{ConfigAction, ConfigArgs};
use bookstore::cli::{Cli, Commands};
use bookstore::config::{Config, ConfigManager};
use bookstore::error::BookstoreResult;
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

async fn run() -> BookstoreResult<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::locate(cli.config.clone());

    // `config path` and `config init` must work even when the file is broken
    let needs_config = !matches!(
        cli.command,
        Commands::Config(ConfigArgs {
            action: Some(ConfigAction::Path | ConfigAction::Init { .. })
        })
    );
    let config = if needs_config {
        config_manager.load().await?
    } else {
        Config::default()
    };

    init_logging(cli.verbose, &config.general.log_format);
    debug!("Configuration from {}", config_manager.path().display());

    match cli.command {
        Commands::Serve(args) => bookstore::cli::commands::serve(args, &config).await,
        Commands::Import(args) => bookstore::cli::commands::import(args, &config).await,
        Commands::List(args) => bookstore::cli::commands::list(args, &config).await,
        Commands::Config(args) => {
            bookstore::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// 0 = warn, 1 = info, 2+ = debug; RUST_LOG wins when set
fn init_logging(verbose: u8, log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("bookstore=warn"),
        1 => EnvFilter::new("bookstore=info"),
        _ => EnvFilter::new("bookstore=debug"),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log_format == "json" {
        builder.json().init();
    } else {
        builder.with_target(false).without_time().init();
    }
}
