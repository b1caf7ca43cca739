//! Add link commands

use colored::Colorize;

use super::helpers::format_time;
use crate::interfaces::cli::CliError;
use crate::services::{CreateUrlRequest, UrlService};
use crate::storage::UrlRecord;

fn print_created(record: &UrlRecord) {
    println!(
        "{} Added short URL: {} -> {} (expires: {})",
        "✓".bold().green(),
        record.shortcode.cyan(),
        record.original_url.blue().underline(),
        format_time(record.expiry_date).yellow()
    );
}

pub fn add_link(
    service: &mut UrlService,
    url: String,
    validity: Option<u32>,
    code: Option<String>,
) -> Result<(), CliError> {
    let generated = code.as_deref().is_none_or(|c| c.trim().is_empty());
    let record = service.create(CreateUrlRequest {
        original_url: url,
        validity_minutes: validity,
        custom_shortcode: code,
    })?;

    if generated {
        println!(
            "{} Generated random code: {}",
            "ℹ".bold().blue(),
            record.shortcode.magenta()
        );
    }
    print_created(&record);
    Ok(())
}

/// Shorten several URLs; failures are reported per URL
pub fn batch_links(
    service: &mut UrlService,
    urls: Vec<String>,
    validity: Option<u32>,
) -> Result<(), CliError> {
    let requests: Vec<_> = urls
        .iter()
        .map(|url| CreateUrlRequest {
            original_url: url.clone(),
            validity_minutes: validity,
            custom_shortcode: None,
        })
        .collect();

    let results = service.create_batch(requests)?;

    let mut failed = 0;
    for (url, result) in urls.iter().zip(results) {
        match result {
            Ok(record) => print_created(&record),
            Err(e) => {
                failed += 1;
                println!("{} {}: {}", "✗".bold().red(), url, e.message().red());
            }
        }
    }

    if failed > 0 {
        return Err(CliError::CommandError(format!(
            "{} of {} URLs could not be shortened",
            failed,
            urls.len()
        )));
    }
    Ok(())
}
