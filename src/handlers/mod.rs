pub mod config;
pub mod fetch;
pub mod magnet;
pub mod output;
pub mod parse;

use anyhow::Result;
use ettv_dump::ConfigManager;

use crate::cli::{Cli, Commands};

// Re-export all handlers
pub use config::handle_config;
pub use fetch::handle_fetch;
pub use magnet::handle_magnet;
pub use parse::handle_parse;

/// Validate only the config sections the command actually reads.
///
/// `config` subcommands are never gated so a broken file can still be
/// inspected or reset.
pub fn validate_config_for(cli: &Cli, config_manager: &ConfigManager) -> Result<()> {
    match cli.command {
        Commands::Daily { .. } | Commands::Full { .. } => config_manager.validate(),
        Commands::Parse { .. } | Commands::Magnet { .. } => config_manager.validate_trackers(),
        Commands::Config { .. } => Ok(()),
    }
}
