//! `cloudability_account` data source
//!
//! Triggers vendor verification of an account and polls until the vendor
//! reports a terminal state.

use crate::data::ResourceData;
use crate::error::{ProviderError, Result};
use crate::resource::DataSource;
use crate::schema::{Attribute, AttributeType, Schema};
use async_trait::async_trait;
use cloudability_client::{Account, ClientError, VendorsApi, VerificationState};
use cloudability_poll::{Outcome, PollEvent, Poller, RetryError, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const TYPE_NAME: &str = "cloudability_account";

/// Why a single verification attempt did not succeed
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Verification was not successful: [{state}] - {message}")]
    NotVerified {
        state: VerificationState,
        message: String,
    },
}

/// Map one `verify_account` response to a poll outcome
///
/// | response | outcome |
/// |---|---|
/// | transport or API error | retry |
/// | `error` | fail |
/// | `verified` | done |
/// | anything else | retry |
pub fn classify(response: cloudability_client::Result<Account>) -> Outcome<Account, VerificationError> {
    match Outcome::retry_on_err(response).map_err(VerificationError::from) {
        Outcome::Done(account) => by_state(account),
        outcome => outcome,
    }
}

fn by_state(account: Account) -> Outcome<Account, VerificationError> {
    let not_verified = |account: &Account| VerificationError::NotVerified {
        state: account.verification.state.clone(),
        message: account.verification.message.clone(),
    };

    match account.verification.state {
        VerificationState::Verified => Outcome::Done(account),
        VerificationState::Error => Outcome::Fail(not_verified(&account)),
        VerificationState::Unverified | VerificationState::Other(_) => {
            Outcome::Retry(not_verified(&account))
        }
    }
}

fn log_event(event: &PollEvent<'_, VerificationError>) {
    match event {
        PollEvent::Attempted {
            attempt,
            max_attempts,
        } => tracing::debug!("VerifyAccount attempt {}/{}", attempt, max_attempts),
        PollEvent::Retrying { error, wait, .. } => {
            tracing::debug!("{} (retrying in {:?})", error, wait)
        }
        PollEvent::Succeeded { attempts } => {
            tracing::debug!("Account verified after {} attempt(s)", attempts)
        }
        PollEvent::Failed { error, .. } => tracing::debug!("Error verifying account: {}", error),
        PollEvent::Exhausted { attempts, error } => tracing::debug!(
            "Could not verify the account after {} attempt(s): {}",
            attempts,
            error
        ),
    }
}

/// Poll `verify_account` until the account is verified, in error, or the
/// policy runs out
pub async fn verify_account(
    vendors: &dyn VendorsApi,
    vendor_key: &str,
    account_id: &str,
    policy: RetryPolicy,
) -> std::result::Result<Account, RetryError<VerificationError>> {
    Poller::new(policy)
        .on_event(log_event)
        .retry_async(move || async move {
            classify(vendors.verify_account(vendor_key, account_id).await)
        })
        .await
}

pub struct AccountDataSource {
    vendors: Arc<dyn VendorsApi>,
    timeout: Option<Duration>,
}

impl AccountDataSource {
    pub fn new(vendors: Arc<dyn VendorsApi>) -> Self {
        Self {
            vendors,
            timeout: None,
        }
    }

    /// Bound the whole poll, on top of the attempt budget
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn policy(data: &ResourceData) -> Result<RetryPolicy> {
        let retry_count = data.require_int("retry_count")?;
        let retry_wait = data.require_int("retry_wait")?;

        let retry_count = u32::try_from(retry_count).map_err(|_| ProviderError::InvalidAttribute {
            name: "retry_count".to_string(),
            reason: format!("{} is out of range", retry_count),
        })?;
        let retry_wait = u64::try_from(retry_wait).map_err(|_| ProviderError::InvalidAttribute {
            name: "retry_wait".to_string(),
            reason: format!("{} is negative", retry_wait),
        })?;

        Ok(RetryPolicy::from_secs(retry_count, retry_wait)?)
    }
}

pub fn schema() -> Schema {
    Schema::new(
        TYPE_NAME,
        vec![
            Attribute::required("vendor_account_id", AttributeType::String)
                .force_new()
                .describe("12 digit string corresponding to your AWS account ID"),
            Attribute::optional("vendor_key", AttributeType::String)
                .with_default("aws")
                .force_new()
                .describe("'aws'"),
            Attribute::computed("state", AttributeType::String)
                .describe("Examples: unverified, verified, error"),
            Attribute::computed("last_verification_attempted_at", AttributeType::String)
                .describe("Date timestamp, example: 1970-01-01T00:00:00.000Z"),
            Attribute::computed("message", AttributeType::String)
                .describe("Error message for credentials in error state"),
            Attribute::optional("retry_count", AttributeType::Int)
                .with_default(RetryPolicy::DEFAULT_MAX_ATTEMPTS)
                .force_new()
                .describe("Number of times to retry the verification"),
            Attribute::optional("retry_wait", AttributeType::Int)
                .with_default(RetryPolicy::DEFAULT_WAIT.as_secs())
                .force_new()
                .describe("Number of seconds to wait between verification retries"),
        ],
    )
}

#[async_trait]
impl DataSource for AccountDataSource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn read(&self, data: &mut ResourceData) -> Result<()> {
        self.schema().prepare(data)?;

        let vendor_key = data.require_id("vendor_key")?.to_string();
        let account_id = data.require_id("vendor_account_id")?.to_string();
        let policy = Self::policy(data)?;

        tracing::debug!(
            "Verifying {} account {} (up to {} attempts, {:?} apart)",
            vendor_key,
            account_id,
            policy.max_attempts(),
            policy.wait()
        );

        let poll = verify_account(self.vendors.as_ref(), &vendor_key, &account_id, policy);
        let account = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, poll)
                .await
                .map_err(|_| ProviderError::Timeout(limit))??,
            None => poll.await?,
        };

        data.set("vendor_account_id", account.vendor_account_id.as_str());
        data.set("vendor_key", account.vendor_key.as_str());
        data.set("state", account.verification.state.as_str());
        data.set(
            "last_verification_attempted_at",
            account.verification.last_verification_attempted_at.as_str(),
        );
        data.set("message", account.verification.message.as_str());
        data.set_id(account.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockVendors, Reply, account};

    fn input(account_id: &str) -> ResourceData {
        ResourceData::new().with_attribute("vendor_account_id", account_id)
    }

    #[test]
    fn test_classify_table() {
        assert!(matches!(
            classify(Ok(account("1", "verified"))),
            Outcome::Done(_)
        ));
        assert!(matches!(
            classify(Ok(account("1", "error"))),
            Outcome::Fail(VerificationError::NotVerified { .. })
        ));
        assert!(matches!(
            classify(Ok(account("1", "unverified"))),
            Outcome::Retry(VerificationError::NotVerified { .. })
        ));
        assert!(matches!(
            classify(Ok(account("1", "pending_review"))),
            Outcome::Retry(VerificationError::NotVerified { .. })
        ));
        assert!(matches!(
            classify(Err(ClientError::InvalidConfig("x".to_string()))),
            Outcome::Retry(VerificationError::Client(_))
        ));
    }

    #[test]
    fn test_not_verified_message() {
        let mut errored = account("1", "error");
        errored.verification.message = "Unable to assume role".to_string();

        match classify(Ok(errored)) {
            Outcome::Fail(e) => assert_eq!(
                e.to_string(),
                "Verification was not successful: [error] - Unable to assume role"
            ),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_verified_after_retries() {
        let vendors = Arc::new(MockVendors::new().with_verify_replies(vec![
            Reply::Status(503),
            Reply::State("unverified", "Verification in progress"),
            Reply::State("verified", ""),
        ]));
        let source = AccountDataSource::new(vendors.clone());

        let mut data = input("123456789012");
        let start = tokio::time::Instant::now();
        source.read(&mut data).await.unwrap();

        assert_eq!(vendors.count("verify"), 3);
        assert!(start.elapsed() >= Duration::from_secs(10));
        assert!(start.elapsed() < Duration::from_secs(15));
        assert_eq!(data.id.as_deref(), Some("aws-123456789012"));
        assert_eq!(data.get_str("state"), Some("verified"));
        assert_eq!(data.get_str("vendor_key"), Some("aws"));
        assert_eq!(
            data.get_str("last_verification_attempted_at"),
            Some("2024-03-01T10:00:00.000Z")
        );
        assert_eq!(data.get_int("retry_count"), Some(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_error_state_is_terminal() {
        let vendors = Arc::new(
            MockVendors::new()
                .with_verify_replies(vec![Reply::State("error", "Unable to assume role")]),
        );
        let source = AccountDataSource::new(vendors.clone());

        let mut data = input("123456789012");
        let err = source.read(&mut data).await.unwrap_err();

        assert_eq!(vendors.count("verify"), 1);
        assert!(!data.exists());
        match &err {
            ProviderError::Verification(e) => {
                assert!(!e.is_exhausted());
                assert!(e.error().to_string().contains("Unable to assume role"));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // each layer adds context; the vendor message shows up once in the chain
        let chain: Vec<String> =
            std::iter::successors(Some(&err as &dyn std::error::Error), |e| e.source())
                .map(|e| e.to_string())
                .collect();
        assert_eq!(
            chain,
            vec![
                "Could not verify the account".to_string(),
                "failed on attempt 1".to_string(),
                "Verification was not successful: [error] - Unable to assume role".to_string(),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_exhausts_custom_budget() {
        let vendors = Arc::new(
            MockVendors::new().with_verify_replies(vec![Reply::State("unverified", "")]),
        );
        let source = AccountDataSource::new(vendors.clone());

        let mut data = input("123456789012")
            .with_attribute("retry_count", 3)
            .with_attribute("retry_wait", 1);
        let start = tokio::time::Instant::now();
        let err = source.read(&mut data).await.unwrap_err();

        assert_eq!(vendors.count("verify"), 3);
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(start.elapsed() < Duration::from_secs(3));
        match err {
            ProviderError::Verification(e) => {
                assert!(e.is_exhausted());
                assert_eq!(e.attempts(), 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_timeout() {
        let vendors = Arc::new(
            MockVendors::new().with_verify_replies(vec![Reply::State("unverified", "")]),
        );
        let source =
            AccountDataSource::new(vendors.clone()).with_timeout(Some(Duration::from_secs(12)));

        let mut data = input("123456789012");
        let err = source.read(&mut data).await.unwrap_err();

        assert!(matches!(err, ProviderError::Timeout(d) if d == Duration::from_secs(12)));
        // attempts at 0s, 5s and 10s; the sleep towards 15s is cut short
        assert_eq!(vendors.count("verify"), 3);
    }

    #[tokio::test]
    async fn test_zero_retry_count_rejected() {
        let source = AccountDataSource::new(Arc::new(MockVendors::new()));
        let mut data = input("123456789012").with_attribute("retry_count", 0);

        let err = source.read(&mut data).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidPolicy(_)));
    }

    #[tokio::test]
    async fn test_missing_account_id() {
        let vendors = Arc::new(MockVendors::new());
        let source = AccountDataSource::new(vendors.clone());

        let err = source.read(&mut ResourceData::new()).await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingAttribute(name) if name == "vendor_account_id"));
        assert!(vendors.calls().is_empty());
    }
}
