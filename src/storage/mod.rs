use std::path::PathBuf;

use crate::config::StorageConfig;
use crate::errors::{Result, UrlKeeperError};

pub mod file;
pub mod memory;
pub mod models;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use models::UrlRecord;

/// Full-snapshot persistence for the record set.
///
/// `load` returns every stored record; `save` replaces the stored set as a
/// whole. Implementations never write partial snapshots.
pub trait UrlStore {
    fn load(&self) -> Result<Vec<UrlRecord>>;
    fn save(&self, records: &[UrlRecord]) -> Result<()>;
    fn backend_name(&self) -> &'static str;
}

impl<S: UrlStore + ?Sized> UrlStore for Box<S> {
    fn load(&self) -> Result<Vec<UrlRecord>> {
        (**self).load()
    }

    fn save(&self, records: &[UrlRecord]) -> Result<()> {
        (**self).save(records)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

pub struct StorageFactory;

impl StorageFactory {
    pub fn create(config: &StorageConfig) -> Result<Box<dyn UrlStore>> {
        let store: Box<dyn UrlStore> = match config.backend.as_str() {
            "file" => {
                let path = PathBuf::from(&config.data_dir).join(format!("{}.json", config.key));
                Box::new(FileStore::open(path)?)
            }
            "memory" => Box::new(MemoryStore::new()),
            other => {
                return Err(UrlKeeperError::validation(format!(
                    "Unknown storage backend: {}. Valid: file, memory",
                    other
                )));
            }
        };

        Ok(store)
    }
}
