use clap::{Args, Parser, Subcommand};
use ettv_dump::OutputFormat;

#[derive(Parser)]
#[command(name = "ettv-dump")]
#[command(about = "Fetch ETTV torrent dumps and print them as records with magnet links")]
#[command(long_about = "
ettv-dump downloads the gzip compressed ETTV dumps, parses every
hash|title|category|link line and prints the records together with a
generated magnet link.

Examples:
  ettv-dump daily                    # Today's dump as JSON lines
  ettv-dump full --format table -n 20
  ettv-dump parse ettv_daily.txt.gz  # Parse a dump saved to disk
  ettv-dump magnet <HASH> --title \"Some Title\"
")]
#[command(version)]
pub struct Cli {
    /// Override config file path
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every command that prints records.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_name = "FORMAT")]
    #[arg(help = "Output format: json, jsonl or table (defaults to config)")]
    pub format: Option<String>,

    /// Fail on lines with fewer than four fields
    #[arg(long)]
    pub strict: bool,

    /// Print at most N records
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,

    /// Write records to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and parse the daily dump
    #[command(visible_alias = "d")]
    Daily {
        /// Base URL override
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Fetch and parse the full dump
    #[command(visible_alias = "f")]
    Full {
        /// Base URL override
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Parse a dump file from disk (gzip or plain text)
    #[command(visible_alias = "p")]
    Parse {
        /// Path to the dump file
        file: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Build a magnet link for a single hash
    #[command(visible_alias = "m")]
    Magnet {
        /// Info hash
        hash: String,

        /// Display name
        #[arg(short, long, value_name = "TITLE")]
        title: Option<String>,

        /// Extra tracker announce URL, given unescaped
        #[arg(long = "tracker", value_name = "URL")]
        trackers: Vec<String>,

        /// Leave out the configured tracker list
        #[arg(long)]
        no_default_trackers: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the config file location
    Path,

    /// Validate configuration file
    Validate,

    /// Write a sample configuration file next to the config
    Sample,

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// Validate CLI arguments
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Commands::Daily { base_url, output } | Commands::Full { base_url, output } => {
                if let Some(url) = base_url {
                    if url.trim().is_empty() {
                        return Err("--base-url cannot be empty".to_string());
                    }
                }
                validate_output(output)
            }
            Commands::Parse { file, output } => {
                if file.trim().is_empty() {
                    return Err("Dump file path cannot be empty".to_string());
                }
                validate_output(output)
            }
            Commands::Magnet { hash, .. } => {
                if hash.trim().is_empty() {
                    return Err("Hash cannot be empty".to_string());
                }
                Ok(())
            }
            Commands::Config { .. } => Ok(()),
        }
    }
}

fn validate_output(output: &OutputArgs) -> Result<(), String> {
    if output.limit == Some(0) {
        return Err("--limit must be greater than 0".to_string());
    }
    if let Some(format) = &output.format {
        format.parse::<OutputFormat>()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["ettv-dump", "daily"]).unwrap();
        assert!(matches!(cli.command, Commands::Daily { .. }));

        let cli = Cli::try_parse_from(["ettv-dump", "f"]).unwrap();
        assert!(matches!(cli.command, Commands::Full { .. }));

        let cli = Cli::try_parse_from(["ettv-dump", "parse", "dump.txt.gz"]).unwrap();
        assert!(matches!(cli.command, Commands::Parse { .. }));
    }

    #[test]
    fn test_output_options() {
        let cli = Cli::try_parse_from([
            "ettv-dump",
            "daily",
            "--format",
            "table",
            "--strict",
            "-n",
            "10",
            "--base-url",
            "https://mirror.example.org/",
        ])
        .unwrap();

        if let Commands::Daily { base_url, output } = cli.command {
            assert_eq!(base_url.as_deref(), Some("https://mirror.example.org/"));
            assert_eq!(output.format.as_deref(), Some("table"));
            assert!(output.strict);
            assert_eq!(output.limit, Some(10));
        } else {
            panic!("Expected Daily command");
        }
    }

    #[test]
    fn test_magnet_options() {
        let cli = Cli::try_parse_from([
            "ettv-dump",
            "magnet",
            "abc123",
            "--title",
            "Some Title",
            "--tracker",
            "udp://a.example:1/announce",
            "--tracker",
            "udp://b.example:2/announce",
            "--no-default-trackers",
        ])
        .unwrap();

        if let Commands::Magnet {
            hash,
            title,
            trackers,
            no_default_trackers,
        } = cli.command
        {
            assert_eq!(hash, "abc123");
            assert_eq!(title.as_deref(), Some("Some Title"));
            assert_eq!(trackers.len(), 2);
            assert!(no_default_trackers);
        } else {
            panic!("Expected Magnet command");
        }
    }

    #[test]
    fn test_validation() {
        let cli = Cli::try_parse_from(["ettv-dump", "daily"]).unwrap();
        assert!(cli.validate().is_ok());

        let cli = Cli::try_parse_from(["ettv-dump", "daily", "--limit", "0"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = Cli::try_parse_from(["ettv-dump", "full", "--format", "yaml"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli =
            Cli::try_parse_from(["ettv-dump", "config", "show", "-v", "-c", "x.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("x.toml"));

        let cli = Cli::try_parse_from(["ettv-dump", "config", "reset", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Reset { yes: true }
            }
        ));
    }
}
