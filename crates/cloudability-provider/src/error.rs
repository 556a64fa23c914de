//! Provider error types

use crate::account::VerificationError;
use cloudability_client::ClientError;
use cloudability_poll::{PolicyError, RetryError};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Missing required attribute: {0}")]
    MissingAttribute(String),

    #[error("Invalid value for attribute {name}: {reason}")]
    InvalidAttribute { name: String, reason: String },

    #[error(
        "Invalid import id '{0}': expected <vendor_account_id> or <vendor_key>/<vendor_account_id>"
    )]
    InvalidImportId(String),

    #[error("Unknown resource type: {0}")]
    UnknownType(String),

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Invalid retry settings: {0}")]
    InvalidPolicy(#[from] PolicyError),

    #[error("Could not verify the account")]
    Verification(#[from] RetryError<VerificationError>),

    #[error("Account verification did not finish within {0:?}")]
    Timeout(Duration),

    #[error("Cloudability API error: {0}")]
    Client(#[from] ClientError),

    #[error("Configuration error: {0}")]
    Config(#[from] cloudability_config::ConfigError),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
