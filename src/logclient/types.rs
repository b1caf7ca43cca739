//! Closed enumerations accepted by the remote log endpoint

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Stack {
    Backend,
    Frontend,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Which stacks a package may be used with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageScope {
    Backend,
    Frontend,
    Shared,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Package {
    // backend
    Cache,
    Controller,
    #[serde(rename = "cron job")]
    #[strum(serialize = "cron job")]
    CronJob,
    Db,
    Domain,
    Handler,
    Repository,
    Route,
    Service,
    // frontend
    Api,
    Component,
    Hook,
    Page,
    State,
    Style,
    // both
    Auth,
    Config,
    Middleware,
    Utils,
}

impl Package {
    pub fn scope(self) -> PackageScope {
        match self {
            Package::Cache
            | Package::Controller
            | Package::CronJob
            | Package::Db
            | Package::Domain
            | Package::Handler
            | Package::Repository
            | Package::Route
            | Package::Service => PackageScope::Backend,
            Package::Api
            | Package::Component
            | Package::Hook
            | Package::Page
            | Package::State
            | Package::Style => PackageScope::Frontend,
            Package::Auth | Package::Config | Package::Middleware | Package::Utils => {
                PackageScope::Shared
            }
        }
    }

    pub fn allowed_for(self, stack: Stack) -> bool {
        match self.scope() {
            PackageScope::Shared => true,
            PackageScope::Backend => stack == Stack::Backend,
            PackageScope::Frontend => stack == Stack::Frontend,
        }
    }

    /// Shared packages first, then the stack's own
    pub fn allowed(stack: Stack) -> Vec<Package> {
        let shared = Package::iter().filter(|p| p.scope() == PackageScope::Shared);
        let own = Package::iter()
            .filter(move |p| p.scope() != PackageScope::Shared && p.allowed_for(stack));
        shared.chain(own).collect()
    }
}

/// One log event as sent over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub stack: Stack,
    pub level: Level,
    pub package: Package,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogValidationError {
    InvalidStack(String),
    InvalidLevel(String),
    InvalidPackage { package: String, stack: Stack },
}

fn join_names<T: AsRef<str>>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|i| i.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::fmt::Display for LogValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStack(value) => write!(
                f,
                "Invalid stack value: {}. Allowed values: {}",
                value,
                join_names(Stack::iter())
            ),
            Self::InvalidLevel(value) => write!(
                f,
                "Invalid level value: {}. Allowed values: {}",
                value,
                join_names(Level::iter())
            ),
            Self::InvalidPackage { package, stack } => write!(
                f,
                "Invalid package value: {} for stack: {}. Allowed values: {}",
                package,
                stack.as_ref(),
                join_names(Package::allowed(*stack))
            ),
        }
    }
}

impl std::error::Error for LogValidationError {}

impl LogEntry {
    /// Build an entry from raw, case-insensitive strings
    pub fn parse(
        stack: &str,
        level: &str,
        package: &str,
        message: impl Into<String>,
    ) -> Result<Self, LogValidationError> {
        let stack_lower = stack.trim().to_lowercase();
        let level_lower = level.trim().to_lowercase();
        let package_lower = package.trim().to_lowercase();

        let stack = stack_lower
            .parse::<Stack>()
            .map_err(|_| LogValidationError::InvalidStack(stack_lower.clone()))?;
        let level = level_lower
            .parse::<Level>()
            .map_err(|_| LogValidationError::InvalidLevel(level_lower.clone()))?;
        let package = match package_lower.parse::<Package>() {
            Ok(p) if p.allowed_for(stack) => p,
            _ => {
                return Err(LogValidationError::InvalidPackage {
                    package: package_lower,
                    stack,
                });
            }
        };

        Ok(Self {
            stack,
            level,
            package,
            message: message.into(),
        })
    }

    /// Check the stack/package pairing of an already typed entry
    pub fn validate(&self) -> Result<(), LogValidationError> {
        if self.package.allowed_for(self.stack) {
            Ok(())
        } else {
            Err(LogValidationError::InvalidPackage {
                package: self.package.as_ref().to_string(),
                stack: self.stack,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        let entry = LogEntry::parse("Frontend", "INFO", "State", "loaded").unwrap();
        assert_eq!(entry.stack, Stack::Frontend);
        assert_eq!(entry.level, Level::Info);
        assert_eq!(entry.package, Package::State);
    }

    #[test]
    fn test_cron_job_package() {
        let entry = LogEntry::parse("backend", "warn", "cron job", "late").unwrap();
        assert_eq!(entry.package, Package::CronJob);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["package"], "cron job");
    }

    #[test]
    fn test_wire_body_shape() {
        let entry = LogEntry::parse("backend", "fatal", "db", "connection lost").unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "stack": "backend",
                "level": "fatal",
                "package": "db",
                "message": "connection lost"
            })
        );
    }

    #[test]
    fn test_invalid_stack_and_level() {
        assert_eq!(
            LogEntry::parse("mobile", "info", "utils", "x").unwrap_err(),
            LogValidationError::InvalidStack("mobile".to_string())
        );
        assert_eq!(
            LogEntry::parse("backend", "trace", "utils", "x").unwrap_err(),
            LogValidationError::InvalidLevel("trace".to_string())
        );
    }

    #[test]
    fn test_package_must_match_stack() {
        assert!(LogEntry::parse("backend", "info", "component", "x").is_err());
        assert!(LogEntry::parse("frontend", "info", "db", "x").is_err());
        assert!(LogEntry::parse("frontend", "info", "middleware", "x").is_ok());
        assert!(LogEntry::parse("backend", "info", "config", "x").is_ok());
    }

    #[test]
    fn test_allowed_packages_listing() {
        let frontend = Package::allowed(Stack::Frontend);
        assert_eq!(frontend.len(), 10);
        assert_eq!(frontend[0], Package::Auth);
        assert!(frontend.contains(&Package::Style));
        assert!(!frontend.contains(&Package::Db));

        assert_eq!(Package::allowed(Stack::Backend).len(), 13);
    }

    #[test]
    fn test_validation_message_lists_allowed_values() {
        let err = LogEntry::parse("backend", "info", "page", "x").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid package value: page for stack: backend"));
        assert!(msg.contains("cron job"));
    }

    #[test]
    fn test_validate_typed_entry() {
        let entry = LogEntry {
            stack: Stack::Backend,
            level: Level::Debug,
            package: Package::Hook,
            message: "x".to_string(),
        };
        assert!(entry.validate().is_err());
    }
}
