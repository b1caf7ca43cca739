//! Resolve and inspect commands

use colored::Colorize;

use super::helpers::{format_time, status_label};
use crate::errors::UrlKeeperError;
use crate::interfaces::cli::CliError;
use crate::services::UrlService;

/// Resolve a shortcode and print the original URL on stdout
pub fn open_link(service: &mut UrlService, code: &str) -> Result<(), CliError> {
    let record = service.resolve(code)?;
    println!("{}", record.original_url);
    Ok(())
}

pub fn show_link(service: &UrlService, code: &str) -> Result<(), CliError> {
    let record = service.find_by_shortcode(code)?.ok_or_else(|| {
        UrlKeeperError::not_found(format!(
            "The URL with shortcode \"{}\" doesn't exist.",
            code
        ))
    })?;
    let expired = service.is_expired(&record);

    println!("{} {}", "Shortcode:".bold(), record.shortcode.cyan());
    println!(
        "{} {}",
        "Original URL:".bold(),
        record.original_url.blue().underline()
    );
    println!("{} {}", "Created:".bold(), format_time(record.created_at));
    println!("{} {}", "Expires:".bold(), format_time(record.expiry_date));
    println!("{} {}", "Clicks:".bold(), record.clicks);
    println!("{} {}", "Status:".bold(), status_label(expired));
    if !expired {
        println!(
            "{} {} min",
            "Remaining:".bold(),
            record.remaining_minutes(service.now())
        );
    }
    Ok(())
}
