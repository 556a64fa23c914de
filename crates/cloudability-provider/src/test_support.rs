//! In-memory `VendorsApi` for provider tests

use async_trait::async_trait;
use cloudability_client::{
    Account, Authorization, ClientError, NewLinkedAccountParams, Result, Verification,
    VerificationState, VendorsApi,
};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

/// Scripted reply to `verify_account`
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    State(&'static str, &'static str),
    Status(u16),
}

#[derive(Default)]
pub(crate) struct MockVendors {
    /// Keyed by `(vendor_key, vendor_account_id)`
    accounts: Mutex<BTreeMap<(String, String), Account>>,
    verify_replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<String>>,
}

pub(crate) fn account(vendor_account_id: &str, state: &str) -> Account {
    Account {
        id: format!("aws-{}", vendor_account_id),
        vendor_account_name: "production".to_string(),
        vendor_account_id: vendor_account_id.to_string(),
        vendor_key: "aws".to_string(),
        verification: Verification {
            state: VerificationState::from(state.to_string()),
            last_verification_attempted_at: "2024-03-01T10:00:00.000Z".to_string(),
            message: String::new(),
        },
        authorization: Authorization {
            kind: "aws_role".to_string(),
            role_name: "CloudabilityRole".to_string(),
            external_id: "ext-abc".to_string(),
        },
        parent_account_id: "210987654321".to_string(),
        created_at: "2024-02-28T09:00:00.000Z".to_string(),
    }
}

fn key(vendor_key: &str, account_id: &str) -> (String, String) {
    (vendor_key.to_string(), account_id.to_string())
}

fn api_error(status: u16) -> ClientError {
    ClientError::Api {
        status,
        code: Some(status),
        messages: vec![format!("mock error {}", status)],
    }
}

impl MockVendors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_account(self, account: Account) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(key(&account.vendor_key, &account.vendor_account_id), account);
        self
    }

    /// Replies are consumed in order; the last one repeats forever
    pub(crate) fn with_verify_replies(self, replies: Vec<Reply>) -> Self {
        *self.verify_replies.lock().unwrap() = replies.into();
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.split(' ').next() == Some(operation))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_verify_reply(&self) -> Reply {
        let mut replies = self.verify_replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies.front().cloned().unwrap_or(Reply::State("verified", ""))
        }
    }
}

#[async_trait]
impl VendorsApi for MockVendors {
    async fn list_accounts(&self, vendor_key: &str) -> Result<Vec<Account>> {
        self.record(format!("list {}", vendor_key));
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|((vendor, _), _)| vendor == vendor_key)
            .map(|(_, account)| account.clone())
            .collect())
    }

    async fn get_account(&self, vendor_key: &str, account_id: &str) -> Result<Account> {
        self.record(format!("get {}/{}", vendor_key, account_id));
        self.accounts
            .lock()
            .unwrap()
            .get(&key(vendor_key, account_id))
            .cloned()
            .ok_or_else(|| api_error(404))
    }

    async fn new_linked_account(
        &self,
        vendor_key: &str,
        params: &NewLinkedAccountParams,
    ) -> Result<Account> {
        self.record(format!(
            "create {}/{} {}",
            vendor_key, params.vendor_account_id, params.kind
        ));
        let mut created = account(&params.vendor_account_id, "unverified");
        created.vendor_key = vendor_key.to_string();
        created.authorization.kind = params.kind.clone();
        self.accounts
            .lock()
            .unwrap()
            .insert(key(vendor_key, &params.vendor_account_id), created.clone());
        Ok(created)
    }

    async fn verify_account(&self, vendor_key: &str, account_id: &str) -> Result<Account> {
        self.record(format!("verify {}/{}", vendor_key, account_id));
        match self.next_verify_reply() {
            Reply::State(state, message) => {
                let mut verified = account(account_id, state);
                verified.verification.message = message.to_string();
                Ok(verified)
            }
            Reply::Status(status) => Err(api_error(status)),
        }
    }

    async fn delete_account(&self, vendor_key: &str, account_id: &str) -> Result<()> {
        self.record(format!("delete {}/{}", vendor_key, account_id));
        self.accounts
            .lock()
            .unwrap()
            .remove(&key(vendor_key, account_id))
            .map(|_| ())
            .ok_or_else(|| api_error(404))
    }
}
