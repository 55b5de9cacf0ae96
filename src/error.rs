//! Error types shared by the API, persistence and storage layers.

use thiserror::Error;

/// Failures talking to the Quran API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server responded with status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failures persisting a user preference remotely.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("could not encode preference `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Failures reading or writing local settings.
#[derive(Debug, Error)]
pub enum DbError {
    #[cfg(not(target_arch = "wasm32"))]
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[cfg(target_arch = "wasm32")]
    #[error("local storage: {0}")]
    Storage(#[from] gloo_storage::errors::StorageError),
    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no data directory available")]
    NoDataDir,
}
