//! Short URL management
//!
//! Keeps the full record set in memory and writes the whole set back to the
//! injected store after every mutation.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::json;
use tracing::{debug, error, info, warn};

use super::shortcode::ShortcodeGenerator;
use crate::config::ShortcodeConfig;
use crate::errors::{Result, UrlKeeperError};
use crate::logclient::{LogTopic, RemoteLogger};
use crate::storage::{UrlRecord, UrlStore};
use crate::utils::url_validator::validate_url;
use crate::utils::{Clock, SystemClock, is_valid_shortcode};

/// Request to shorten one URL
#[derive(Debug, Clone, Default)]
pub struct CreateUrlRequest {
    pub original_url: String,
    /// Minutes until expiry; `None` uses the configured default
    pub validity_minutes: Option<u32>,
    /// Requested shortcode; blank means "generate one"
    pub custom_shortcode: Option<String>,
}

impl CreateUrlRequest {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            ..Default::default()
        }
    }

    pub fn validity(mut self, minutes: u32) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }

    pub fn shortcode(mut self, code: impl Into<String>) -> Self {
        self.custom_shortcode = Some(code.into());
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    pub generator: ShortcodeGenerator,
    pub default_validity_minutes: u32,
    pub max_batch_size: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from_config(&ShortcodeConfig::default())
    }
}

impl ServiceSettings {
    pub fn from_config(config: &ShortcodeConfig) -> Self {
        Self {
            generator: ShortcodeGenerator::from_config(config),
            default_validity_minutes: config.default_validity_minutes.max(1),
            max_batch_size: config.max_batch_size.max(1),
        }
    }
}

pub struct UrlService {
    store: Box<dyn UrlStore>,
    records: Vec<UrlRecord>,
    settings: ServiceSettings,
    clock: Arc<dyn Clock>,
    remote: Option<RemoteLogger>,
}

impl UrlService {
    /// Load the stored record set using the wall clock
    pub fn open(store: Box<dyn UrlStore>, settings: ServiceSettings) -> Result<Self> {
        Self::with_clock(store, settings, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Box<dyn UrlStore>,
        settings: ServiceSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let records = load_unique(&*store)?;
        info!(
            "Loaded {} short URLs from {} store",
            records.len(),
            store.backend_name()
        );

        Ok(Self {
            store,
            records,
            settings,
            clock,
            remote: None,
        })
    }

    /// Mirror key events to the remote log endpoint
    pub fn with_remote_logger(mut self, remote: RemoteLogger) -> Self {
        remote.info(
            LogTopic::Persistence,
            "Loaded URLs from local store",
            Some(json!({ "count": self.records.len() })),
        );
        self.remote = Some(remote);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order
    pub fn records(&self) -> &[UrlRecord] {
        &self.records
    }

    fn contains(&self, code: &str) -> bool {
        self.records.iter().any(|r| r.shortcode == code)
    }

    fn remote(&self) -> Option<&RemoteLogger> {
        self.remote.as_ref()
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.records).inspect_err(|e| {
            error!("Failed to save short URLs: {}", e);
            if let Some(remote) = self.remote() {
                remote.error(
                    LogTopic::Persistence,
                    "Error saving shortened URLs",
                    Some(json!({ "error": e.to_string() })),
                );
            }
        })
    }

    /// Re-read the store, replacing the in-memory set
    pub fn reload(&mut self) -> Result<()> {
        self.records = load_unique(&*self.store)?;
        debug!("Reloaded {} short URLs", self.records.len());
        Ok(())
    }

    // ============ Create ============

    pub fn create(&mut self, req: CreateUrlRequest) -> Result<UrlRecord> {
        let original_url = req.original_url.trim().to_string();
        if let Err(e) = validate_url(&original_url) {
            warn!("URL shortening failed for '{}': {}", original_url, e);
            if let Some(remote) = self.remote() {
                remote.warn(
                    LogTopic::Links,
                    "URL shortening failed - invalid original URL",
                    Some(json!({ "originalUrl": original_url })),
                );
            }
            return Err(UrlKeeperError::validation(e.to_string()));
        }

        let validity = match req.validity_minutes {
            None => self.settings.default_validity_minutes,
            Some(0) => {
                return Err(UrlKeeperError::validation(
                    "Validity must be a positive integer",
                ));
            }
            Some(minutes) => minutes,
        };

        let custom = req
            .custom_shortcode
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let shortcode = match custom {
            Some(code) => {
                if !is_valid_shortcode(&code) {
                    return Err(UrlKeeperError::validation(format!(
                        "Shortcode '{}' must be 3-10 alphanumeric characters",
                        code
                    )));
                }
                if self.contains(&code) {
                    warn!("Custom shortcode already in use: {}", code);
                    if let Some(remote) = self.remote() {
                        remote.warn(
                            LogTopic::Links,
                            "Custom shortcode already in use",
                            Some(json!({ "shortcode": code })),
                        );
                    }
                    return Err(UrlKeeperError::conflict(format!(
                        "The provided shortcode is already in use: {}",
                        code
                    )));
                }
                code
            }
            None => {
                let code = self.settings.generator.generate(|c| self.contains(c))?;
                if let Some(remote) = self.remote() {
                    remote.debug(
                        LogTopic::Shortcode,
                        "Generated shortcode",
                        Some(json!({ "shortcode": code })),
                    );
                }
                code
            }
        };

        let now = self.clock.now();
        let expiry_date = TimeDelta::try_minutes(i64::from(validity))
            .and_then(|d| now.checked_add_signed(d))
            .ok_or_else(|| UrlKeeperError::validation("Validity period is too large"))?;

        let record = UrlRecord {
            id: now.timestamp_millis().to_string(),
            original_url,
            shortcode,
            created_at: now,
            expiry_date,
            clicks: 0,
        };

        self.records.push(record.clone());
        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }

        info!(
            shortcode = %record.shortcode,
            validity,
            "Created short URL -> {}",
            record.original_url
        );
        if let Some(remote) = self.remote() {
            remote.info(
                LogTopic::Links,
                "Created shortened URL",
                Some(json!({
                    "shortcode": record.shortcode,
                    "originalUrl": record.original_url,
                    "validity": validity,
                    "expiryDate": record.expiry_date.to_rfc3339(),
                })),
            );
        }

        Ok(record)
    }

    /// Create several URLs; each item succeeds or fails on its own.
    ///
    /// The batch as a whole is rejected when it is empty or larger than the
    /// configured maximum.
    pub fn create_batch(
        &mut self,
        requests: Vec<CreateUrlRequest>,
    ) -> Result<Vec<Result<UrlRecord>>> {
        if requests.is_empty() {
            return Err(UrlKeeperError::validation("At least one URL is required"));
        }
        if requests.len() > self.settings.max_batch_size {
            return Err(UrlKeeperError::validation(format!(
                "At most {} URLs can be shortened at once, got {}",
                self.settings.max_batch_size,
                requests.len()
            )));
        }

        let results: Vec<_> = requests.into_iter().map(|req| self.create(req)).collect();
        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!("{} of {} URLs in batch failed", failed, results.len());
        }
        Ok(results)
    }

    // ============ Lookup ============

    /// Look a shortcode up, falling back to the persisted snapshot on a miss.
    ///
    /// An unreadable store is an error, not an absent record.
    pub fn find_by_shortcode(&self, code: &str) -> Result<Option<UrlRecord>> {
        if let Some(record) = self.records.iter().find(|r| r.shortcode == code) {
            debug!("Found URL by shortcode in memory: {}", code);
            return Ok(Some(record.clone()));
        }

        let stored = self.store.load().inspect_err(|e| {
            error!("Error reading from store: {}", e);
        })?;
        let found = stored.into_iter().find(|r| r.shortcode == code);
        if found.is_some() {
            debug!("Found URL by shortcode in store: {}", code);
        } else {
            warn!("URL not found by shortcode: {}", code);
        }
        Ok(found)
    }

    /// Current time as seen by the service clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn is_expired(&self, record: &UrlRecord) -> bool {
        let expired = record.is_expired_at(self.clock.now());
        if expired {
            debug!(
                shortcode = %record.shortcode,
                expiry_date = %record.expiry_date,
                "URL expiration check"
            );
        }
        expired
    }

    // ============ Clicks ============

    /// Count one click; unknown codes are ignored without writing
    pub fn record_click(&mut self, code: &str) -> Result<()> {
        let Some(index) = self.records.iter().position(|r| r.shortcode == code) else {
            debug!("Click for unknown shortcode ignored: {}", code);
            return Ok(());
        };

        let previous = self.records[index].clicks;
        self.records[index].clicks = previous.saturating_add(1);
        if let Err(e) = self.persist() {
            self.records[index].clicks = previous;
            return Err(e);
        }

        let record = &self.records[index];
        info!(shortcode = %code, clicks = record.clicks, "URL click recorded");
        if let Some(remote) = self.remote() {
            remote.info(
                LogTopic::Links,
                "URL click recorded",
                Some(json!({
                    "shortcode": code,
                    "clicks": record.clicks,
                    "originalUrl": record.original_url,
                })),
            );
        }
        Ok(())
    }

    /// Redirect lookup: find, check expiry, count the click.
    ///
    /// A code missing from memory triggers a reload so records written by
    /// another process are found and counted.
    pub fn resolve(&mut self, code: &str) -> Result<UrlRecord> {
        if let Some(remote) = self.remote() {
            remote.info(
                LogTopic::Redirect,
                "Processing URL redirection",
                Some(json!({ "shortcode": code })),
            );
        }

        if !self.contains(code) {
            self.reload()?;
        }

        let Some(record) = self.records.iter().find(|r| r.shortcode == code).cloned() else {
            warn!("Shortcode not found: {}", code);
            if let Some(remote) = self.remote() {
                remote.warn(
                    LogTopic::Redirect,
                    &format!("Shortcode not found: {}", code),
                    None,
                );
            }
            return Err(UrlKeeperError::not_found(format!(
                "The URL with shortcode \"{}\" doesn't exist.",
                code
            )));
        };

        if self.is_expired(&record) {
            warn!("URL with shortcode {} has expired", code);
            if let Some(remote) = self.remote() {
                remote.warn(
                    LogTopic::Redirect,
                    &format!("URL with shortcode {} has expired", code),
                    Some(json!({
                        "shortcode": code,
                        "originalUrl": record.original_url,
                        "expiryDate": record.expiry_date.to_rfc3339(),
                    })),
                );
            }
            return Err(UrlKeeperError::expired(format!(
                "The URL with shortcode \"{}\" has expired.",
                code
            )));
        }

        self.record_click(code)?;
        let updated = self
            .records
            .iter()
            .find(|r| r.shortcode == code)
            .cloned()
            .unwrap_or(record);

        if let Some(remote) = self.remote() {
            remote.info(
                LogTopic::Redirect,
                "Redirecting to original URL",
                Some(json!({ "shortcode": code, "originalUrl": updated.original_url })),
            );
        }
        Ok(updated)
    }

    // ============ Views ============

    /// Every record, newest first
    pub fn all_by_newest(&self) -> Vec<&UrlRecord> {
        let mut all: Vec<&UrlRecord> = self.records.iter().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    /// Records that have not expired yet
    pub fn active(&self) -> Vec<&UrlRecord> {
        let now = self.clock.now();
        self.records
            .iter()
            .filter(|r| !r.is_expired_at(now))
            .collect()
    }
}

/// Load the snapshot, dropping records whose shortcode was already seen
fn load_unique(store: &dyn UrlStore) -> Result<Vec<UrlRecord>> {
    let loaded = store.load()?;
    let total = loaded.len();
    let mut seen = HashSet::with_capacity(total);
    let records: Vec<UrlRecord> = loaded
        .into_iter()
        .filter(|r| seen.insert(r.shortcode.clone()))
        .collect();

    if records.len() < total {
        warn!(
            "Dropped {} records with duplicate shortcodes while loading",
            total - records.len()
        );
    }
    Ok(records)
}
