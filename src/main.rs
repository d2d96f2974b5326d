mod cli;
mod handlers;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use ettv_dump::{ConfigManager, DumpKind};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Validate CLI arguments first
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Records go to stdout, so logs stay on stderr
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config_manager = match &args.config {
        Some(path) => ConfigManager::with_path(PathBuf::from(path))?,
        None => ConfigManager::new()?,
    };

    if let Err(e) = handlers::validate_config_for(&args, &config_manager) {
        eprintln!("Configuration validation failed: {:#}", e);
        eprintln!("Run 'ettv-dump config validate' for details");
        eprintln!("Or run 'ettv-dump config reset' to restore the defaults");
        process::exit(1);
    }

    match args.command {
        Commands::Daily { base_url, output } => {
            handlers::handle_fetch(&config_manager, DumpKind::Daily, base_url, output).await?;
        }
        Commands::Full { base_url, output } => {
            handlers::handle_fetch(&config_manager, DumpKind::Full, base_url, output).await?;
        }
        Commands::Parse { file, output } => {
            handlers::handle_parse(&config_manager, file, output).await?;
        }
        Commands::Magnet {
            hash,
            title,
            trackers,
            no_default_trackers,
        } => {
            handlers::handle_magnet(&config_manager, hash, title, trackers, no_default_trackers)?;
        }
        Commands::Config { action } => {
            handlers::handle_config(&mut config_manager, action)?;
        }
    }

    Ok(())
}
