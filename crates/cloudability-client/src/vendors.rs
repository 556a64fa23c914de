//! Vendor account endpoints

use crate::client::Client;
use crate::error::Result;
use crate::model::{Account, NewLinkedAccountParams};
use async_trait::async_trait;

/// Operations on vendor accounts
///
/// Implemented by [`Vendors`] against the live API; the provider layer only
/// depends on this trait.
#[async_trait]
pub trait VendorsApi: Send + Sync {
    /// List every account linked for a vendor
    async fn list_accounts(&self, vendor_key: &str) -> Result<Vec<Account>>;

    /// Fetch a single linked account
    async fn get_account(&self, vendor_key: &str, account_id: &str) -> Result<Account>;

    /// Register a new linked account
    async fn new_linked_account(
        &self,
        vendor_key: &str,
        params: &NewLinkedAccountParams,
    ) -> Result<Account>;

    /// Ask the vendor to (re)verify the account's credentials
    ///
    /// Verification is asynchronous on the vendor side: the returned account
    /// usually still reports `unverified` and has to be polled.
    async fn verify_account(&self, vendor_key: &str, account_id: &str) -> Result<Account>;

    /// Unlink an account
    async fn delete_account(&self, vendor_key: &str, account_id: &str) -> Result<()>;
}

/// Live vendor endpoints, obtained from [`Client::vendors`]
#[derive(Clone)]
pub struct Vendors {
    client: Client,
}

impl Vendors {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }
}

fn accounts_path(vendor_key: &str) -> [&str; 3] {
    ["vendors", vendor_key, "accounts"]
}

fn account_path<'a>(vendor_key: &'a str, account_id: &'a str) -> [&'a str; 4] {
    ["vendors", vendor_key, "accounts", account_id]
}

#[async_trait]
impl VendorsApi for Vendors {
    async fn list_accounts(&self, vendor_key: &str) -> Result<Vec<Account>> {
        let request = self.client.get(&accounts_path(vendor_key))?;
        self.client.send(request).await
    }

    async fn get_account(&self, vendor_key: &str, account_id: &str) -> Result<Account> {
        let request = self.client.get(&account_path(vendor_key, account_id))?;
        self.client.send(request).await
    }

    async fn new_linked_account(
        &self,
        vendor_key: &str,
        params: &NewLinkedAccountParams,
    ) -> Result<Account> {
        tracing::info!(
            "Linking {} account {} ({})",
            vendor_key,
            params.vendor_account_id,
            params.kind
        );
        let request = self.client.post(&accounts_path(vendor_key))?.json(params);
        self.client.send(request).await
    }

    async fn verify_account(&self, vendor_key: &str, account_id: &str) -> Result<Account> {
        let [vendors, key, accounts, id] = account_path(vendor_key, account_id);
        let request = self.client.post(&[vendors, key, accounts, id, "verification"])?;
        self.client.send(request).await
    }

    async fn delete_account(&self, vendor_key: &str, account_id: &str) -> Result<()> {
        tracing::info!("Unlinking {} account {}", vendor_key, account_id);
        let request = self.client.delete(&account_path(vendor_key, account_id))?;
        self.client.send_empty(request).await
    }
}
