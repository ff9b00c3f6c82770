//! Persistence adapters.
//!
//! A collection is persisted as one opaque JSON blob under its collection key.
//! Writes replace the whole value; there is no merge and no partial write.
//! Reads that find nothing, or find something that is not JSON, both come back
//! as "absent" from [`PersistenceAdapter::load`].

use std::collections::HashMap;
use std::fs;
use std::sync::RwLock;

use lmdb::{Database, DatabaseFlags, Environment, Transaction, WriteFlags};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// Scoped key-value storage for whole collections.
pub trait PersistenceAdapter {
    /// Raw bytes stored under `key`, if any.
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Replaces the value under `key`.
    fn write(&self, key: &str, bytes: &[u8]) -> StoreResult<()>;

    /// Drops `key`. Returns whether it existed.
    fn remove(&self, key: &str) -> StoreResult<bool>;

    /// Drops every key.
    fn clear_all_records(&self) -> StoreResult<()>;

    /// Parsed JSON under `key`.
    ///
    /// Storage failures and unparsable values are logged and reported as
    /// absent, exactly like a missing key.
    fn load(&self, key: &str) -> Option<JsonValue> {
        let bytes = match self.read(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read '{key}', treating as absent: {e}");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Stored value under '{key}' is not valid JSON, treating as absent: {e}");
                None
            }
        }
    }

    /// Serializes `value` and overwrites `key` with it.
    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()>
    where
        Self: Sized,
    {
        let bytes = serde_json::to_vec(value)?;
        self.write(key, &bytes)
    }
}

/// LMDB-backed adapter: one environment directory, one named database, one
/// entry per collection key.
pub struct AppDbState {
    env: Environment,
    db: Database,
    config: StoreConfig,
}

impl AppDbState {
    pub fn init(config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;

        let dir = config.env_dir();
        if !dir.exists() {
            info!("Creating storage directory {}", dir.display());
            fs::create_dir_all(&dir)?;
        }

        let env = Environment::new()
            .set_max_dbs(config.max_dbs)
            .set_map_size(config.map_size)
            .open(&dir)?;
        let db = env.create_db(Some(config.db_name.as_str()), DatabaseFlags::empty())?;

        info!("Storage opened at {}", dir.display());
        Ok(Self { env, db, config })
    }
}

impl PersistenceAdapter for AppDbState {
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let txn = self.env.begin_ro_txn()?;
        let result = match txn.get(self.db, &key) {
            Ok(bytes) => Ok(Some(bytes.to_vec())),
            Err(lmdb::Error::NotFound) => Ok(None),
            Err(e) => Err(StoreError::from(e)),
        };
        txn.abort();
        result
    }

    fn write(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        let mut txn = self.env.begin_rw_txn()?;
        txn.put(self.db, &key, &bytes, WriteFlags::empty())?;
        txn.commit()?;
        debug!("Wrote {} bytes under '{key}'", bytes.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut txn = self.env.begin_rw_txn()?;
        match txn.del(self.db, &key, None) {
            Ok(()) => {
                txn.commit()?;
                Ok(true)
            }
            Err(lmdb::Error::NotFound) => Ok(false),
            Err(e) => Err(StoreError::from(e)),
        }
    }

    fn clear_all_records(&self) -> StoreResult<()> {
        let mut txn = self.env.begin_rw_txn()?;
        txn.clear_db(self.db)?;
        txn.commit()?;
        info!("Cleared all collections in '{}'", self.config.db_name);
        Ok(())
    }
}

/// Volatile adapter backed by a `HashMap`, for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryState {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceAdapter for MemoryState {
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let entries = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.remove(key).is_some())
    }

    fn clear_all_records(&self) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        entries.clear();
        Ok(())
    }
}
