use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};

pub(super) fn format_time(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

pub(super) fn status_label(expired: bool) -> ColoredString {
    if expired {
        "Expired".red()
    } else {
        "Active".green()
    }
}
