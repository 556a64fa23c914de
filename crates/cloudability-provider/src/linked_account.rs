//! `cloudability_linked_account` resource

use crate::data::ResourceData;
use crate::error::{ProviderError, Result};
use crate::flatten::flatten_account;
use crate::resource::Resource;
use crate::schema::{Attribute, AttributeType, Schema};
use async_trait::async_trait;
use cloudability_client::{Account, NewLinkedAccountParams, VendorsApi};
use std::sync::Arc;

pub const TYPE_NAME: &str = "cloudability_linked_account";

const DEFAULT_VENDOR_KEY: &str = "aws";
const DEFAULT_CREDENTIAL_TYPE: &str = "aws_role";

pub struct LinkedAccountResource {
    vendors: Arc<dyn VendorsApi>,
}

impl LinkedAccountResource {
    pub fn new(vendors: Arc<dyn VendorsApi>) -> Self {
        Self { vendors }
    }
}

/// Split `<vendor_account_id>` or `<vendor_key>/<vendor_account_id>`
pub fn parse_import_id(import_id: &str) -> Result<(&str, &str)> {
    let invalid = || ProviderError::InvalidImportId(import_id.to_string());

    let (vendor_key, account_id) = match import_id.split_once('/') {
        Some((vendor_key, account_id)) => (vendor_key.trim(), account_id.trim()),
        None => (DEFAULT_VENDOR_KEY, import_id.trim()),
    };

    if vendor_key.is_empty() || account_id.is_empty() || account_id.contains(['/', '?', '#']) {
        return Err(invalid());
    }
    Ok((vendor_key, account_id))
}

fn set_account(data: &mut ResourceData, account: &Account) {
    for (key, value) in flatten_account(account) {
        data.set(key, value);
    }
    data.set_id(account.id.as_str());
}

fn verification_elem() -> Vec<Attribute> {
    let kind = AttributeType::String;
    vec![
        Attribute::computed("state", kind).describe("Examples: unverified, verified, error"),
        Attribute::computed("last_verification_attempted_at", kind)
            .describe("Date timestamp, example: 1970-01-01T00:00:00.000Z"),
        Attribute::computed("message", kind)
            .describe("Error message for credentials in error state"),
    ]
}

fn authorization_elem() -> Vec<Attribute> {
    let kind = AttributeType::String;
    vec![
        Attribute::computed("type", kind).describe("'aws_role' or 'aws_user'"),
        Attribute::computed("role_name", kind).describe("currently hardcoded to 'CloudabilityRole'"),
        Attribute::computed("external_id", kind).describe(
            "The external ID used to prevent confused deputies. Generated by Cloudability",
        ),
    ]
}

pub fn schema() -> Schema {
    Schema::new(
        TYPE_NAME,
        vec![
            Attribute::computed("vendor_account_name", AttributeType::String)
                .describe("The name given to your AWS account"),
            Attribute::required("vendor_account_id", AttributeType::String)
                .force_new()
                .describe("12 digit string corresponding to your AWS account ID"),
            Attribute::optional("vendor_key", AttributeType::String)
                .with_default(DEFAULT_VENDOR_KEY)
                .force_new()
                .describe("'aws'"),
            Attribute::computed("verification", AttributeType::Set)
                .with_elem(verification_elem())
                .describe("Object containing details of verification state"),
            Attribute::computed("authorization", AttributeType::Set)
                .with_elem(authorization_elem())
                .describe("Object contain vendor specific authorization details"),
            Attribute::optional("type", AttributeType::String)
                .with_default(DEFAULT_CREDENTIAL_TYPE)
                .force_new()
                .describe("'aws_role' or 'aws_user'"),
            Attribute::computed("external_id", AttributeType::String).describe(
                "The external ID used to prevent confused deputies. Generated by Cloudability",
            ),
            Attribute::computed("parent_account_id", AttributeType::String).describe(
                "12 digit string representing parent's account ID (if current cred is a linked account)",
            ),
            Attribute::computed("created_at", AttributeType::String).describe(
                "Date timestamp corresponding to cloudability credential creation time",
            ),
        ],
    )
}

#[async_trait]
impl Resource for LinkedAccountResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn create(&self, data: &mut ResourceData) -> Result<()> {
        self.schema().prepare(data)?;

        let vendor_key = data.require_id("vendor_key")?.to_string();
        let params = NewLinkedAccountParams::new(
            data.require_id("vendor_account_id")?,
            data.require_str("type")?,
        );

        tracing::debug!("NewLinkedAccount [account_id: {:?}]", params.vendor_account_id);
        self.vendors.new_linked_account(&vendor_key, &params).await?;

        self.read(data).await
    }

    async fn read(&self, data: &mut ResourceData) -> Result<()> {
        self.schema().prepare(data)?;

        let vendor_key = data.require_id("vendor_key")?.to_string();
        let account_id = data.require_id("vendor_account_id")?.to_string();

        tracing::debug!("GetAccount [account_id: {:?}]", account_id);
        match self.vendors.get_account(&vendor_key, &account_id).await {
            Ok(account) => {
                set_account(data, &account);
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("Account {} not found, removing from state", account_id);
                data.clear_id();
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, data: &mut ResourceData) -> Result<()> {
        self.schema().prepare(data)?;

        let vendor_key = data.require_id("vendor_key")?.to_string();
        let account_id = data.require_id("vendor_account_id")?.to_string();

        self.vendors.delete_account(&vendor_key, &account_id).await?;
        data.clear_id();
        Ok(())
    }

    async fn import(&self, import_id: &str) -> Result<ResourceData> {
        let (vendor_key, account_id) = parse_import_id(import_id)?;

        let mut data = ResourceData::new()
            .with_attribute("vendor_key", vendor_key)
            .with_attribute("vendor_account_id", account_id);
        data.set_id(import_id);

        self.read(&mut data).await?;
        if !data.exists() {
            return Err(ProviderError::NotFound(import_id.to_string()));
        }
        Ok(data)
    }
}
