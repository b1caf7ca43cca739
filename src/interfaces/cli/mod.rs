//! CLI interface module
//!
//! Wires parsed commands to the URL service and the log client.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::UrlKeeperError;
use crate::logclient::{LogClient, RemoteLogger};
use crate::services::{ServiceSettings, UrlService};
use crate::storage::StorageFactory;
use commands::{
    add_link, batch_links, config_management, list_links, open_link, send_log, show_link,
};

#[derive(Debug)]
pub enum CliError {
    Service(UrlKeeperError),
    StorageError(String),
    CommandError(String),
}

impl CliError {
    pub fn format_simple(&self) -> String {
        match self {
            CliError::Service(err) => err.format_simple(),
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::Service(err) => err.format_colored(),
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<UrlKeeperError> for CliError {
    fn from(err: UrlKeeperError) -> Self {
        if err.is_user_error() || matches!(err, UrlKeeperError::Generation(_)) {
            CliError::Service(err)
        } else {
            CliError::StorageError(err.to_string())
        }
    }
}

/// Open the configured store and load the URL service
pub fn open_service(config: &StaticConfig) -> Result<UrlService, CliError> {
    let store = StorageFactory::create(&config.storage)
        .map_err(|e| CliError::StorageError(e.to_string()))?;
    let service = UrlService::open(store, ServiceSettings::from_config(&config.shortcode))?;

    Ok(match RemoteLogger::from_config(&config.remote_log) {
        Some(remote) => service.with_remote_logger(remote),
        None => service,
    })
}

/// Run a CLI command from clap-parsed input
pub fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    match cmd {
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_management::config_generate(output_path, force),

        Commands::Log {
            stack,
            level,
            package,
            message,
        } => {
            let client = LogClient::from_config(&config.remote_log);
            send_log(&client, &stack, &level, &package, &message)
        }

        Commands::Add {
            url,
            validity,
            code,
        } => {
            let mut service = open_service(config)?;
            add_link(&mut service, url, validity, code)
        }

        Commands::Batch { urls, validity } => {
            let mut service = open_service(config)?;
            batch_links(&mut service, urls, validity)
        }

        Commands::Open { code } => {
            let mut service = open_service(config)?;
            open_link(&mut service, &code)
        }

        Commands::Show { code } => {
            let service = open_service(config)?;
            show_link(&service, &code)
        }

        Commands::List { active } => {
            let service = open_service(config)?;
            list_links(&service, active)
        }
    }
}
