use thiserror::Error;

/// Errors raised by the persistence adapter and the entity stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `update`/`delete` targeted an id that is not in the collection.
    #[error("no record with id '{id}' in '{collection}'")]
    NotFound { collection: String, id: String },

    /// The underlying LMDB environment failed.
    #[error("storage error: {0}")]
    Storage(#[from] lmdb::Error),

    /// Filesystem failure while preparing the storage directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The shared session lock was poisoned by a panicking holder.
    #[error("store lock poisoned")]
    LockPoisoned,

    #[error("unknown collection '{0}'")]
    UnknownCollection(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
