//! Error types for rendezkv

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Client Errors ===
    #[error("Key not found: {0}")]
    NotFound(String),

    #[error("Key already exists: {0}")]
    KeyExists(String),

    #[error("Content length required")]
    LengthRequired,

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    // === Mapping Store Errors ===
    #[error("RocksDB error: {0}")]
    RocksDb(#[from] rocksdb::Error),

    #[error("Mapping corrupted: {0}")]
    MappingCorrupted(String),

    // === Volume Errors ===
    #[error("Volume store failed on {volume}: {detail}")]
    VolumeStore { volume: String, detail: String },

    #[error("Volume remove failed on {volume}: {detail}")]
    VolumeRemove { volume: String, detail: String },

    // === Config Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Insufficient volumes for replication: need {needed}, have {available}")]
    InsufficientReplicas { needed: usize, available: usize },

    #[error("Need at least one volume server")]
    NoVolumes,

    // === Generic ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Convert to HTTP status code
    pub fn to_http_status(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::KeyExists(_) => StatusCode::CONFLICT,
            Error::LengthRequired => StatusCode::LENGTH_REQUIRED,
            Error::InvalidKey(_) => StatusCode::BAD_REQUEST,
            Error::InvalidConfig(_) | Error::InsufficientReplicas { .. } | Error::NoVolumes => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.to_http_status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            Error::NotFound("k".into()).to_http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::KeyExists("k".into()).to_http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            Error::LengthRequired.to_http_status(),
            StatusCode::LENGTH_REQUIRED
        );
        assert_eq!(
            Error::VolumeStore {
                volume: "v1".into(),
                detail: "boom".into()
            }
            .to_http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::InsufficientReplicas {
                needed: 3,
                available: 2
            }
            .to_http_status(),
            StatusCode::BAD_REQUEST
        );
    }
}
