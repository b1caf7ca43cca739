//! Log client tests
//!
//! Use a recording transport so no request leaves the process.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Value, json};
use urlkeeper::logclient::{
    LogClient, LogEntry, LogTopic, LogTransport, Level, Package, RemoteLogger, Stack,
    TransportError,
};

#[derive(Debug, Clone)]
struct SentRequest {
    url: String,
    bearer: Option<String>,
    body: Value,
}

/// Records every request and answers with a fixed outcome
#[derive(Clone)]
struct RecordingTransport {
    sent: Arc<Mutex<Vec<SentRequest>>>,
    reply: Result<Value, TransportError>,
}

impl RecordingTransport {
    fn replying(reply: Result<Value, TransportError>) -> Self {
        Self {
            sent: Arc::default(),
            reply,
        }
    }

    fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().clone()
    }
}

impl LogTransport for RecordingTransport {
    fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &Value,
    ) -> Result<Value, TransportError> {
        self.sent.lock().push(SentRequest {
            url: url.to_string(),
            bearer: bearer.map(str::to_string),
            body: body.clone(),
        });
        self.reply.clone()
    }
}

fn client(transport: &RecordingTransport, api_key: Option<&str>) -> LogClient {
    LogClient::with_transport(
        "http://logs.test/evaluation-service/logs",
        api_key.map(str::to_string),
        Box::new(transport.clone()),
    )
}

#[test]
fn test_valid_entry_is_posted_lowercased() {
    let transport = RecordingTransport::replying(Ok(json!({"logID": "42", "message": "ok"})));
    let client = client(&transport, Some("secret"));

    let response = client.log("Frontend", "INFO", "Component", "button clicked");
    assert_eq!(response, Some(json!({"logID": "42", "message": "ok"})));

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "http://logs.test/evaluation-service/logs");
    assert_eq!(sent[0].bearer.as_deref(), Some("secret"));
    assert_eq!(
        sent[0].body,
        json!({
            "stack": "frontend",
            "level": "info",
            "package": "component",
            "message": "button clicked"
        })
    );
}

#[test]
fn test_invalid_values_never_reach_the_network() {
    let transport = RecordingTransport::replying(Ok(Value::Null));
    let client = client(&transport, None);

    assert!(client.log("mobile", "info", "utils", "m").is_none());
    assert!(client.log("backend", "verbose", "utils", "m").is_none());
    assert!(client.log("backend", "info", "component", "m").is_none());
    assert!(client.log("frontend", "info", "db", "m").is_none());
    assert!(transport.sent().is_empty());
}

#[test]
fn test_cron_job_package_keeps_its_space() {
    let transport = RecordingTransport::replying(Ok(Value::Null));
    let client = client(&transport, None);

    assert!(client.log("backend", "warn", "cron job", "nightly run").is_some());
    assert_eq!(transport.sent()[0].body["package"], "cron job");
    assert_eq!(transport.sent()[0].bearer, None);
}

#[test]
fn test_empty_api_key_sends_no_bearer() {
    let transport = RecordingTransport::replying(Ok(Value::Null));
    let client = client(&transport, Some(""));

    client.log("backend", "debug", "config", "loaded");
    assert_eq!(transport.sent()[0].bearer, None);
}

#[test]
fn test_failures_are_swallowed() {
    for reply in [
        Err(TransportError::Unauthorized),
        Err(TransportError::Status(500)),
        Err(TransportError::Network("connection refused".to_string())),
    ] {
        let transport = RecordingTransport::replying(reply);
        let client = client(&transport, Some("expired-token"));

        assert!(client.log("backend", "error", "db", "write failed").is_none());
        assert_eq!(transport.sent().len(), 1);
    }
}

#[test]
fn test_send_rejects_mismatched_typed_entry() {
    let transport = RecordingTransport::replying(Ok(Value::Null));
    let client = client(&transport, None);

    let entry = LogEntry {
        stack: Stack::Frontend,
        level: Level::Fatal,
        package: Package::Repository,
        message: "boom".to_string(),
    };
    assert!(client.send(&entry).is_none());
    assert!(transport.sent().is_empty());
}

#[test]
fn test_remote_logger_formats_details() {
    let transport = RecordingTransport::replying(Ok(Value::Null));
    let logger = RemoteLogger::new(client(&transport, None), Stack::Frontend);

    logger.info(LogTopic::Links, "Created shortened URL", Some(json!({"shortcode": "abc123"})));
    logger.warn(LogTopic::Redirect, "Shortcode not found: zzz", None);
    logger.debug(LogTopic::Shortcode, "Generated shortcode", None);

    let sent = transport.sent();
    assert_eq!(sent.len(), 3);
    assert_eq!(
        sent[0].body["message"],
        r#"Created shortened URL - {"shortcode":"abc123"}"#
    );
    assert_eq!(sent[0].body["package"], "component");
    assert_eq!(sent[1].body["level"], "warn");
    assert_eq!(sent[1].body["package"], "page");
    assert_eq!(sent[2].body["package"], "utils");
}
