use serde_json::Value;
use tracing::warn;

use super::{Level, LogClient, LogEntry, Package, Stack};
use crate::config::RemoteLogConfig;

/// What a remote event is about; mapped to a package valid for the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTopic {
    Persistence,
    Links,
    Shortcode,
    Redirect,
}

impl LogTopic {
    pub fn package(self, stack: Stack) -> Package {
        match (self, stack) {
            (LogTopic::Shortcode, _) => Package::Utils,
            (LogTopic::Persistence, Stack::Frontend) => Package::State,
            (LogTopic::Persistence, Stack::Backend) => Package::Repository,
            (LogTopic::Links, Stack::Frontend) => Package::Component,
            (LogTopic::Links, Stack::Backend) => Package::Service,
            (LogTopic::Redirect, Stack::Frontend) => Package::Page,
            (LogTopic::Redirect, Stack::Backend) => Package::Handler,
        }
    }
}

/// Leveled facade over `LogClient` bound to one stack.
///
/// Messages carry optional structured details, rendered as
/// `"{message} - {details}"`.
pub struct RemoteLogger {
    client: LogClient,
    stack: Stack,
}

impl RemoteLogger {
    pub fn new(client: LogClient, stack: Stack) -> Self {
        Self { client, stack }
    }

    /// `None` when remote logging is disabled or the stack is unknown
    pub fn from_config(config: &RemoteLogConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        match config.stack.trim().to_lowercase().parse::<Stack>() {
            Ok(stack) => Some(Self::new(LogClient::from_config(config), stack)),
            Err(_) => {
                warn!(
                    "Remote logging disabled: invalid stack '{}' (expected backend or frontend)",
                    config.stack
                );
                None
            }
        }
    }

    pub fn stack(&self) -> Stack {
        self.stack
    }

    pub fn debug(&self, topic: LogTopic, message: &str, details: Option<Value>) {
        self.emit(Level::Debug, topic, message, details);
    }

    pub fn info(&self, topic: LogTopic, message: &str, details: Option<Value>) {
        self.emit(Level::Info, topic, message, details);
    }

    pub fn warn(&self, topic: LogTopic, message: &str, details: Option<Value>) {
        self.emit(Level::Warn, topic, message, details);
    }

    pub fn error(&self, topic: LogTopic, message: &str, details: Option<Value>) {
        self.emit(Level::Error, topic, message, details);
    }

    pub fn fatal(&self, topic: LogTopic, message: &str, details: Option<Value>) {
        self.emit(Level::Fatal, topic, message, details);
    }

    fn emit(&self, level: Level, topic: LogTopic, message: &str, details: Option<Value>) {
        let entry = LogEntry {
            stack: self.stack,
            level,
            package: topic.package(self.stack),
            message: format_message(message, details.as_ref()),
        };
        let _ = self.client.send(&entry);
    }
}

pub(crate) fn format_message(message: &str, details: Option<&Value>) -> String {
    match details {
        None | Some(Value::Null) => message.to_string(),
        Some(details) => format!("{} - {}", message, details),
    }
}
