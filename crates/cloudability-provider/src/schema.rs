//! Attribute schemas for resources and data sources

use crate::data::ResourceData;
use crate::error::{ProviderError, Result};
use serde::Serialize;
use serde_json::Value;

/// Attribute value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int,
    /// List of nested objects described by `elem`
    Set,
}

impl AttributeType {
    fn matches(&self, value: &Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
            AttributeType::Int => value.is_i64() || value.is_u64(),
            AttributeType::Set => value.is_array(),
        }
    }
}

/// One attribute of a schema
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    /// Changing the value means replacing the object
    pub force_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elem: Vec<Attribute>,
}

impl Attribute {
    fn base(name: &'static str, kind: AttributeType) -> Self {
        Self {
            name,
            kind,
            required: false,
            optional: false,
            computed: false,
            force_new: false,
            default: None,
            description: "",
            elem: Vec::new(),
        }
    }

    pub fn required(name: &'static str, kind: AttributeType) -> Self {
        Self {
            required: true,
            ..Self::base(name, kind)
        }
    }

    pub fn optional(name: &'static str, kind: AttributeType) -> Self {
        Self {
            optional: true,
            ..Self::base(name, kind)
        }
    }

    pub fn computed(name: &'static str, kind: AttributeType) -> Self {
        Self {
            computed: true,
            ..Self::base(name, kind)
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn with_elem(mut self, elem: Vec<Attribute>) -> Self {
        self.elem = elem;
        self
    }

    /// Set by the user rather than by the vendor
    pub fn is_input(&self) -> bool {
        self.required || self.optional
    }
}

/// Schema of a resource or data source
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub type_name: &'static str,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(type_name: &'static str, attributes: Vec<Attribute>) -> Self {
        Self {
            type_name,
            attributes,
        }
    }

    /// Fill in defaults for optional attributes the user left unset
    pub fn apply_defaults(&self, data: &mut ResourceData) {
        for attribute in &self.attributes {
            if let Some(default) = &attribute.default {
                if data.get(attribute.name).is_none() {
                    data.set(attribute.name, default.clone());
                }
            }
        }
    }

    /// Check required attributes are present and user inputs have the right type
    pub fn validate(&self, data: &ResourceData) -> Result<()> {
        for attribute in self.attributes.iter().filter(|a| a.is_input()) {
            match data.get(attribute.name) {
                None if attribute.required => {
                    return Err(ProviderError::MissingAttribute(attribute.name.to_string()));
                }
                Some(value) if !attribute.kind.matches(value) => {
                    return Err(ProviderError::InvalidAttribute {
                        name: attribute.name.to_string(),
                        reason: format!("expected {:?}, got {}", attribute.kind, value),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// `apply_defaults` then `validate`
    pub fn prepare(&self, data: &mut ResourceData) -> Result<()> {
        self.apply_defaults(data);
        self.validate(data)
    }
}
