//! Retry policy

use crate::error::PolicyError;
use std::time::Duration;

/// Fixed-interval retry budget
///
/// Created per polling call and never shared. There is no backoff or jitter:
/// every wait between attempts is the same length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    wait: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;
    pub const DEFAULT_WAIT: Duration = Duration::from_secs(5);

    /// Build a policy allowing `max_attempts` invocations in total, the first
    /// one included
    ///
    /// A budget of zero attempts is rejected rather than treated as a no-op.
    pub fn new(max_attempts: u32, wait: Duration) -> Result<Self, PolicyError> {
        if max_attempts == 0 {
            return Err(PolicyError::ZeroAttempts);
        }
        Ok(Self { max_attempts, wait })
    }

    /// Convenience constructor for the second-granularity knobs the account
    /// data source exposes
    pub fn from_secs(max_attempts: u32, wait_secs: u64) -> Result<Self, PolicyError> {
        Self::new(max_attempts, Duration::from_secs(wait_secs))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Longest total time spent sleeping if every attempt asks for a retry
    ///
    /// No sleep follows the final attempt, so this is `(max_attempts - 1) * wait`.
    pub fn max_total_wait(&self) -> Duration {
        self.wait.saturating_mul(self.max_attempts - 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            wait: Self::DEFAULT_WAIT,
        }
    }
}
