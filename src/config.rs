//! Storage configuration.
//!
//! A [`StoreConfig`] is either built in code or read from JSON handed across
//! the FFI boundary:
//!
//! ```rust
//! use dashboard_store::config::StoreConfig;
//!
//! let config = StoreConfig::from_json(r#"{"path":"admin_dashboard","map_size":20971520}"#)?;
//! assert_eq!(config.map_size, 20 * 1024 * 1024);
//! assert_eq!(config.db_name, "dashboard");
//! # Ok::<(), dashboard_store::error::StoreError>(())
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

pub const DEFAULT_MAP_SIZE: usize = 10 * 1024 * 1024;
pub const DEFAULT_MAX_DBS: u32 = 8;
pub const DEFAULT_DB_NAME: &str = "dashboard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base path; the LMDB environment lives in `<path>.lmdb`.
    pub path: PathBuf,
    /// Upper bound on the memory map, in bytes.
    pub map_size: usize,
    /// Named database slots reserved in the environment.
    pub max_dbs: u32,
    /// Name of the LMDB database holding the collections.
    pub db_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("admin_dashboard"),
            map_size: DEFAULT_MAP_SIZE,
            max_dbs: DEFAULT_MAX_DBS,
            db_name: DEFAULT_DB_NAME.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_map_size(mut self, map_size: usize) -> Self {
        self.map_size = map_size;
        self
    }

    pub fn with_max_dbs(mut self, max_dbs: u32) -> Self {
        self.max_dbs = max_dbs;
        self
    }

    pub fn with_db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = db_name.into();
        self
    }

    /// Directory that holds the LMDB data and lock files.
    pub fn env_dir(&self) -> PathBuf {
        let mut dir = self.path.clone().into_os_string();
        dir.push(".lmdb");
        PathBuf::from(dir)
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.path.as_os_str().is_empty() {
            return Err(StoreError::Config("path must not be empty".to_string()));
        }
        if self.map_size == 0 {
            return Err(StoreError::Config("map_size must be positive".to_string()));
        }
        if self.max_dbs == 0 {
            return Err(StoreError::Config("max_dbs must be at least 1".to_string()));
        }
        if self.db_name.is_empty() {
            return Err(StoreError::Config("db_name must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
