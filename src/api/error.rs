use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {path} failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} returned error {status}")]
    Status {
        path: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("entity not found in response from {path}")]
    EntityNotFound { path: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;
