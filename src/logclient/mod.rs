//! Remote log client
//!
//! Validates `(stack, level, package)` against the endpoint's closed
//! enumerations and POSTs `{stack, level, package, message}` as JSON.
//! Every failure is logged locally and swallowed: callers get `None`.

pub mod remote_logger;
pub mod transport;
pub mod types;

use std::time::Duration;

use serde_json::Value;
use tracing::{error, trace, warn};

use crate::config::RemoteLogConfig;

pub use remote_logger::{LogTopic, RemoteLogger};
pub use transport::{LogTransport, TransportError, UreqTransport};
pub use types::{Level, LogEntry, LogValidationError, Package, PackageScope, Stack};

pub struct LogClient {
    endpoint: String,
    api_key: Option<String>,
    transport: Box<dyn LogTransport>,
}

impl LogClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_transport(endpoint, api_key, Box::new(UreqTransport::default()))
    }

    pub fn with_transport(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        transport: Box<dyn LogTransport>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
            transport,
        }
    }

    pub fn from_config(config: &RemoteLogConfig) -> Self {
        let transport = UreqTransport::new(Duration::from_secs(config.timeout_secs.max(1)));
        Self::with_transport(
            config.endpoint.clone(),
            config.resolve_api_key(),
            Box::new(transport),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Validate raw strings and send.
    ///
    /// Invalid values are reported locally and nothing goes over the network.
    pub fn log(&self, stack: &str, level: &str, package: &str, message: &str) -> Option<Value> {
        match LogEntry::parse(stack, level, package, message) {
            Ok(entry) => self.deliver(&entry),
            Err(e) => {
                error!("{}", e);
                None
            }
        }
    }

    /// Send an already typed entry
    pub fn send(&self, entry: &LogEntry) -> Option<Value> {
        if let Err(e) = entry.validate() {
            error!("{}", e);
            return None;
        }
        self.deliver(entry)
    }

    fn deliver(&self, entry: &LogEntry) -> Option<Value> {
        let body = match serde_json::to_value(entry) {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to encode log entry: {}", e);
                return None;
            }
        };

        match self
            .transport
            .post_json(&self.endpoint, self.api_key.as_deref(), &body)
        {
            Ok(response) => {
                trace!("Remote log accepted: {}", response);
                Some(response)
            }
            Err(TransportError::Unauthorized) => {
                warn!(
                    "Logging API authentication failed. Please set LOGGING_API_KEY environment variable."
                );
                warn!("Log data: {}", body);
                None
            }
            Err(e) => {
                warn!("Failed to send log to {}: {}", self.endpoint, e);
                None
            }
        }
    }
}
