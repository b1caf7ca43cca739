//! Remote log command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::logclient::{LogClient, LogEntry};

/// Send one entry; invalid values are rejected before any network call
pub fn send_log(
    client: &LogClient,
    stack: &str,
    level: &str,
    package: &str,
    message: &str,
) -> Result<(), CliError> {
    LogEntry::parse(stack, level, package, message)
        .map_err(|e| CliError::CommandError(e.to_string()))?;

    match client.log(stack, level, package, message) {
        Some(response) => {
            println!("{} Log sent to {}", "✓".bold().green(), client.endpoint().blue());
            if !response.is_null() {
                println!("  {}", response.to_string().dimmed());
            }
            Ok(())
        }
        None => Err(CliError::CommandError(format!(
            "Log was not delivered to {}",
            client.endpoint()
        ))),
    }
}
