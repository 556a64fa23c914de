//! Vendor account data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// A vendor (cloud provider) account linked to Cloudability
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    /// Cloudability credential id
    pub id: String,

    /// The name given to the account at the vendor
    pub vendor_account_name: String,

    /// 12 digit AWS account id
    pub vendor_account_id: String,

    /// Vendor key, e.g. "aws"
    pub vendor_key: String,

    pub verification: Verification,

    pub authorization: Authorization,

    /// Parent (payer) account id when this is a linked account
    pub parent_account_id: String,

    /// Credential creation timestamp
    pub created_at: String,
}

/// Verification details for an account's credentials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Verification {
    pub state: VerificationState,

    /// e.g. 1970-01-01T00:00:00.000Z
    pub last_verification_attempted_at: String,

    /// Error message for credentials in error state
    pub message: String,
}

/// Vendor-specific authorization details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Authorization {
    /// "aws_role" or "aws_user"
    #[serde(rename = "type")]
    pub kind: String,

    pub role_name: String,

    /// External id generated by Cloudability to prevent confused deputies
    pub external_id: String,
}

/// Request body for linking a new account
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLinkedAccountParams {
    pub vendor_account_id: String,

    #[serde(rename = "type")]
    pub kind: String,
}

impl NewLinkedAccountParams {
    pub fn new(vendor_account_id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            vendor_account_id: vendor_account_id.into(),
            kind: kind.into(),
        }
    }
}

/// Vendor-reported verification state
///
/// Unknown strings are kept verbatim so they survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VerificationState {
    #[default]
    Unverified,
    Verified,
    Error,
    Other(String),
}

impl VerificationState {
    pub fn as_str(&self) -> &str {
        match self {
            VerificationState::Unverified => "unverified",
            VerificationState::Verified => "verified",
            VerificationState::Error => "error",
            VerificationState::Other(s) => s,
        }
    }
}

impl From<String> for VerificationState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "unverified" => VerificationState::Unverified,
            "verified" => VerificationState::Verified,
            "error" => VerificationState::Error,
            _ => VerificationState::Other(s),
        }
    }
}

impl From<VerificationState> for String {
    fn from(state: VerificationState) -> Self {
        match state {
            VerificationState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for VerificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ API Envelopes ============

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub(crate) result: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub(crate) error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub(crate) code: Option<u16>,
    #[serde(default)]
    pub(crate) messages: Vec<String>,
}
