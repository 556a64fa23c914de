//! Cloudability client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {}", .messages.join("; "))]
    Api {
        status: u16,
        code: Option<u16>,
        messages: Vec<String>,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid path segment: '{0}'")]
    InvalidSegment(String),
}

impl ClientError {
    /// HTTP status of an API error response
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The API reported that the account (or vendor) does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            ClientError::Api { status, code, .. } => *status == 404 || *code == Some(404),
            _ => self.status() == Some(404),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
