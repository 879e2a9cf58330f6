use crate::redirect::MatchKey;
use thiserror::Error;

/// Result type for redirect store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type for content and media lookups.
pub type ContentResult<T> = std::result::Result<T, ContentError>;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redirect already exists for {0}")]
    Conflict(MatchKey),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage backend failed: {0}")]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content backend unavailable: {0}")]
    Unavailable(String),
    #[error("content lookup failed: {0}")]
    Other(#[from] anyhow::Error),
}
