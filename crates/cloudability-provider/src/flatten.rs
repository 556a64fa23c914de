//! Nested API objects to flat attribute values

use cloudability_client::{Account, Authorization, Verification};
use serde_json::{Value, json};

/// `verification` attribute: a one-element set
pub fn flatten_verification(verification: &Verification) -> Value {
    json!([{
        "state": verification.state.as_str(),
        "last_verification_attempted_at": verification.last_verification_attempted_at,
        "message": verification.message,
    }])
}

/// `authorization` attribute: a one-element set
pub fn flatten_authorization(authorization: &Authorization) -> Value {
    json!([{
        "type": authorization.kind,
        "role_name": authorization.role_name,
        "external_id": authorization.external_id,
    }])
}

/// Every computed attribute of a linked account
pub fn flatten_account(account: &Account) -> Vec<(&'static str, Value)> {
    vec![
        ("vendor_account_name", json!(account.vendor_account_name)),
        ("vendor_account_id", json!(account.vendor_account_id)),
        ("vendor_key", json!(account.vendor_key)),
        ("verification", flatten_verification(&account.verification)),
        ("authorization", flatten_authorization(&account.authorization)),
        ("external_id", json!(account.authorization.external_id)),
        ("parent_account_id", json!(account.parent_account_id)),
        ("created_at", json!(account.created_at)),
    ]
}
