//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// urlkeeper - a local URL shortener
#[derive(Parser)]
#[command(name = "urlkeeper")]
#[command(version)]
#[command(about = "Shorten URLs into expiring shortcodes kept in a local store", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Shorten a URL
    Add {
        /// Original URL (http:// or https://)
        url: String,

        /// Minutes until the short URL expires (default from config, 30)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        validity: Option<u32>,

        /// Custom shortcode, 3-10 letters or digits
        #[arg(long)]
        code: Option<String>,
    },

    /// Shorten several URLs at once
    Batch {
        /// Original URLs
        #[arg(required = true, num_args = 1..)]
        urls: Vec<String>,

        /// Minutes until the short URLs expire
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        validity: Option<u32>,
    },

    /// Resolve a shortcode, count the click and print the original URL
    Open {
        code: String,
    },

    /// Show a shortcode without counting a click
    Show {
        code: String,
    },

    /// List short URLs, newest first
    List {
        /// Only URLs that have not expired
        #[arg(long)]
        active: bool,
    },

    /// Send one entry to the remote log endpoint
    Log {
        /// backend | frontend
        stack: String,
        /// debug | info | warn | error | fatal
        level: String,
        /// Package name valid for the stack
        package: String,
        message: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
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
    fn test_parse_add_with_options() {
        let cli = Cli::try_parse_from([
            "urlkeeper",
            "add",
            "https://example.com",
            "--validity",
            "45",
            "--code",
            "promo1",
        ])
        .unwrap();
        match cli.command {
            Commands::Add {
                url,
                validity,
                code,
            } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(validity, Some(45));
                assert_eq!(code.as_deref(), Some("promo1"));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_zero_validity_is_rejected() {
        assert!(
            Cli::try_parse_from(["urlkeeper", "add", "https://example.com", "--validity", "0"])
                .is_err()
        );
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["urlkeeper", "list", "-c", "custom.toml", "--active"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert!(matches!(cli.command, Commands::List { active: true }));
    }
}
