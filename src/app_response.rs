use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;

use crate::error::StoreError;

/// Envelope returned by every boundary function, serialized as
/// `{"Variant": "message or payload json"}`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppResponse {
    DatabaseError(String),
    SerializationError(String),
    NotFound(String),
    ValidationError(String),
    BadRequest(String),
    Ok(String),
}

impl Display for AppResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppResponse::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppResponse::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AppResponse::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppResponse::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppResponse::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppResponse::Ok(msg) => write!(f, "Ok: {}", msg),
        }
    }
}

impl From<StoreError> for AppResponse {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => AppResponse::NotFound(err.to_string()),
            StoreError::UnknownCollection(_) => AppResponse::BadRequest(err.to_string()),
            StoreError::Serialization(e) => AppResponse::from(e),
            StoreError::Config(msg) => AppResponse::ValidationError(msg),
            StoreError::Storage(_) | StoreError::Io(_) | StoreError::LockPoisoned => {
                AppResponse::DatabaseError(err.to_string())
            }
        }
    }
}

impl From<SerdeError> for AppResponse {
    fn from(err: SerdeError) -> Self {
        // Shape errors in caller input (missing field, unknown enum value) are
        // validation failures; the rest are plain serialization failures.
        if err.is_data() {
            AppResponse::ValidationError(format!("Invalid record: {}", err))
        } else {
            AppResponse::SerializationError(format!("JSON serialization error: {}", err))
        }
    }
}

impl AppResponse {
    pub fn success(msg: impl Into<String>) -> Self {
        AppResponse::Ok(msg.into())
    }

    /// Wraps a serializable payload as `Ok` with its JSON text.
    pub fn json<T: Serialize + ?Sized>(payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(json) => AppResponse::Ok(json),
            Err(e) => AppResponse::SerializationError(format!("Failed to serialize result: {e}")),
        }
    }
}
