//! Provider: the entry point that hands out resources and data sources

use crate::account::{self, AccountDataSource};
use crate::error::{ProviderError, Result};
use crate::linked_account::{self, LinkedAccountResource};
use crate::resource::{DataSource, Resource};
use cloudability_client::{Client, VendorsApi};
use cloudability_config::Config;
use std::sync::Arc;
use std::time::Duration;

/// Cloudability provider
///
/// Every resource and data source it creates shares one vendors API handle.
pub struct Provider {
    vendors: Arc<dyn VendorsApi>,
    verify_timeout: Option<Duration>,
}

impl Provider {
    pub fn new(vendors: Arc<dyn VendorsApi>) -> Self {
        Self {
            vendors,
            verify_timeout: None,
        }
    }

    /// Connect to the live API using the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::new(config.client_config()?)?;
        tracing::debug!("Using Cloudability API at {}", client.base_url());
        Ok(Self::new(Arc::new(client.vendors())).with_verify_timeout(config.verify_timeout()))
    }

    pub fn with_verify_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.verify_timeout = timeout;
        self
    }

    pub fn linked_account(&self) -> LinkedAccountResource {
        LinkedAccountResource::new(self.vendors.clone())
    }

    pub fn account(&self) -> AccountDataSource {
        AccountDataSource::new(self.vendors.clone()).with_timeout(self.verify_timeout)
    }

    pub fn resources(&self) -> Vec<Box<dyn Resource>> {
        vec![Box::new(self.linked_account())]
    }

    pub fn data_sources(&self) -> Vec<Box<dyn DataSource>> {
        vec![Box::new(self.account())]
    }

    pub fn resource(&self, type_name: &str) -> Result<Box<dyn Resource>> {
        match type_name {
            linked_account::TYPE_NAME => Ok(Box::new(self.linked_account())),
            _ => Err(ProviderError::UnknownType(type_name.to_string())),
        }
    }

    pub fn data_source(&self, type_name: &str) -> Result<Box<dyn DataSource>> {
        match type_name {
            account::TYPE_NAME => Ok(Box::new(self.account())),
            _ => Err(ProviderError::UnknownType(type_name.to_string())),
        }
    }
}
