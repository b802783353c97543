use thiserror::Error;

use crate::classify::Endpoint;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{endpoint}: {source}")]
    Request {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint}: status {status}")]
    Status { endpoint: Endpoint, status: u16 },

    #[error("{phase}: {source}")]
    Body {
        phase: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error("invalid title pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl FetchError {
    /// Status code of the response that aborted the fetch, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
