//! List links command

use colored::Colorize;

use super::helpers::{format_time, status_label};
use crate::interfaces::cli::CliError;
use crate::services::UrlService;
use crate::storage::UrlRecord;

/// Records to show, newest first; expiry follows the service clock
fn select_records(service: &UrlService, only_active: bool) -> Vec<&UrlRecord> {
    if !only_active {
        return service.all_by_newest();
    }
    let mut records = service.active();
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    records
}

pub fn list_links(service: &UrlService, only_active: bool) -> Result<(), CliError> {
    let records = select_records(service, only_active);

    if records.is_empty() {
        println!("{} No shortened URLs yet", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "URL Statistics".bold().green());
    println!();
    for record in &records {
        println!(
            "  {} -> {}",
            record.shortcode.cyan(),
            record.original_url.blue().underline()
        );
        println!(
            "      {} {}  {} {}  {} {}  {}",
            "created".dimmed(),
            format_time(record.created_at),
            "expires".dimmed(),
            format_time(record.expiry_date),
            "clicks".dimmed(),
            record.clicks.to_string().cyan(),
            status_label(service.is_expired(record))
        );
    }
    println!();
    println!(
        "{} Total {} short URLs",
        "ℹ".bold().blue(),
        records.len().to_string().green()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::services::{CreateUrlRequest, ServiceSettings};
    use crate::storage::MemoryStore;
    use crate::utils::ManualClock;

    #[test]
    fn test_active_filter_uses_service_clock() {
        // 服务时钟远在未来，墙上时钟判断不出过期
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap());
        let mut service = UrlService::with_clock(
            Box::new(MemoryStore::new()),
            ServiceSettings::default(),
            Arc::new(clock.clone()),
        )
        .unwrap();

        for (code, validity) in [("short1", 5), ("long01", 120), ("long02", 120)] {
            service
                .create(
                    CreateUrlRequest::new("https://example.com")
                        .validity(validity)
                        .shortcode(code),
                )
                .unwrap();
            clock.advance(Duration::minutes(1));
        }
        clock.advance(Duration::minutes(10));

        let codes = |records: Vec<&UrlRecord>| {
            records
                .iter()
                .map(|r| r.shortcode.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(codes(select_records(&service, true)), ["long02", "long01"]);
        assert_eq!(
            codes(select_records(&service, false)),
            ["long02", "long01", "short1"]
        );
    }
}
