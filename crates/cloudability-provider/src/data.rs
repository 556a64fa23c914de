//! Resource data: an id plus a flat attribute map

use crate::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Attributes read and written by a resource or data source
///
/// An id of `None` means the object does not exist (never created, deleted,
/// or gone on the vendor side).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    pub id: Option<String>,
    pub attributes: BTreeMap<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Forget the object; attributes are kept for diagnostics
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn exists(&self) -> bool {
        self.id.is_some()
    }

    /// Present and non-null
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn require_str(&self, key: &str) -> Result<&str> {
        match self.get(key) {
            None => Err(ProviderError::MissingAttribute(key.to_string())),
            Some(Value::String(s)) if !s.is_empty() => Ok(s.as_str()),
            Some(Value::String(_)) => Err(ProviderError::InvalidAttribute {
                name: key.to_string(),
                reason: "must not be empty".to_string(),
            }),
            Some(other) => Err(ProviderError::InvalidAttribute {
                name: key.to_string(),
                reason: format!("expected a string, got {}", other),
            }),
        }
    }

    /// A string that addresses one API path segment, e.g. an account id
    pub fn require_id(&self, key: &str) -> Result<&str> {
        let value = self.require_str(key)?;
        if value == "." || value == ".." || value.contains(['/', '?', '#']) {
            return Err(ProviderError::InvalidAttribute {
                name: key.to_string(),
                reason: format!("'{}' is not a valid identifier", value),
            });
        }
        Ok(value)
    }

    pub fn require_int(&self, key: &str) -> Result<i64> {
        match self.get(key) {
            None => Err(ProviderError::MissingAttribute(key.to_string())),
            Some(value) => value.as_i64().ok_or_else(|| ProviderError::InvalidAttribute {
                name: key.to_string(),
                reason: format!("expected an integer, got {}", value),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_getters() {
        let data = ResourceData::new()
            .with_attribute("vendor_key", "aws")
            .with_attribute("retry_count", 20)
            .with_attribute("message", Value::Null);

        assert_eq!(data.get_str("vendor_key"), Some("aws"));
        assert_eq!(data.get_int("retry_count"), Some(20));
        assert_eq!(data.get("message"), None);
        assert!(!data.exists());
    }

    #[test]
    fn test_require_str() {
        let data = ResourceData::new()
            .with_attribute("empty", "")
            .with_attribute("number", 5);

        assert!(matches!(
            data.require_str("missing"),
            Err(ProviderError::MissingAttribute(_))
        ));
        assert!(matches!(
            data.require_str("empty"),
            Err(ProviderError::InvalidAttribute { .. })
        ));
        assert!(matches!(
            data.require_str("number"),
            Err(ProviderError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn test_require_id_rejects_path_characters() {
        let data = ResourceData::new()
            .with_attribute("plain", "123456789012")
            .with_attribute("query", "111111111111?x")
            .with_attribute("fragment", "111111111111#x")
            .with_attribute("traversal", "222/../111111111111")
            .with_attribute("parent", "..");

        assert_eq!(data.require_id("plain").unwrap(), "123456789012");
        for key in ["query", "fragment", "traversal", "parent"] {
            assert!(
                matches!(data.require_id(key), Err(ProviderError::InvalidAttribute { name, .. }) if name == key),
                "{} accepted",
                key
            );
        }
    }

    #[test]
    fn test_require_int_rejects_strings() {
        let data = ResourceData::new().with_attribute("retry_wait", json!("5"));
        assert!(matches!(
            data.require_int("retry_wait"),
            Err(ProviderError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn test_id_lifecycle() {
        let mut data = ResourceData::new();
        data.set_id("aws-123");
        assert!(data.exists());
        data.clear_id();
        assert!(!data.exists());
    }
}
