use signpost_core::error::{ContentError, CoreError, StoreError};
use signpost_core::redirect::MatchKey;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RedirectsError>;

#[derive(Debug, Clone, Error)]
pub enum RedirectsError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid destination: {0}")]
    InvalidDestination(String),
    #[error("redirect already exists for {0}")]
    Conflict(MatchKey),
    #[error("redirect not found: {0}")]
    NotFound(String),
    #[error("store error: {0}")]
    Store(String),
    #[error("content error: {0}")]
    Content(String),
}

impl RedirectsError {
    /// The HTTP-equivalent status of the error, for hosts mapping engine
    /// errors onto API responses.
    pub fn status_code(&self) -> u16 {
        match self {
            RedirectsError::InvalidUrl(_) | RedirectsError::InvalidDestination(_) => 400,
            RedirectsError::NotFound(_) => 404,
            RedirectsError::Conflict(_) => 409,
            RedirectsError::Store(_) | RedirectsError::Content(_) => 500,
        }
    }
}

impl From<CoreError> for RedirectsError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidUrl(message) => Self::InvalidUrl(message),
        }
    }
}

impl From<StoreError> for RedirectsError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Conflict(key) => Self::Conflict(key),
            other => Self::Store(other.to_string()),
        }
    }
}

impl From<ContentError> for RedirectsError {
    fn from(value: ContentError) -> Self {
        Self::Content(value.to_string())
    }
}
