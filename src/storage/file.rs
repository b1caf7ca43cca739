use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use super::{UrlRecord, UrlStore};
use crate::errors::{Result, UrlKeeperError};

/// JSON file holding the whole record set under one storage key.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so readers see either the old or the new snapshot.
pub struct FileStore {
    file_path: PathBuf,
}

impl FileStore {
    /// Open the store, creating an empty `[]` file when none exists yet
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let store = FileStore {
            file_path: file_path.into(),
        };

        if !store.file_path.exists() {
            info!("链接文件不存在，创建空的存储: {}", store.file_path.display());
            if let Some(parent) = store.file_path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            store.write_atomic("[]").map_err(|e| {
                error!("创建链接文件失败: {}", e);
                UrlKeeperError::file_operation(format!(
                    "Failed to create {}: {}",
                    store.file_path.display(),
                    e
                ))
            })?;
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }

    fn write_atomic(&self, content: &str) -> std::io::Result<()> {
        let temp = self.temp_path();
        fs::write(&temp, content)?;
        fs::rename(&temp, &self.file_path)
    }
}

impl UrlStore for FileStore {
    fn load(&self) -> Result<Vec<UrlRecord>> {
        let content = match fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("链接文件已被移除，按空存储处理");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<UrlRecord> = serde_json::from_str(&content).map_err(|e| {
            error!("解析链接文件失败: {}", e);
            UrlKeeperError::serialization(format!(
                "Failed to parse {}: {}",
                self.file_path.display(),
                e
            ))
        })?;

        debug!("Loaded {} records from {}", records.len(), self.file_path.display());
        Ok(records)
    }

    fn save(&self, records: &[UrlRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        self.write_atomic(&json)?;
        debug!("Saved {} records to {}", records.len(), self.file_path.display());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
