//! Poller error types

use thiserror::Error;

/// Rejected retry policy
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
}

/// Why polling stopped without a result
///
/// The operation's own error is the `source()`, not part of the message.
#[derive(Error, Debug)]
pub enum RetryError<E> {
    /// The operation reported a terminal failure
    #[error("failed on attempt {attempts}")]
    Failed { attempts: u32, source: E },

    /// Every attempt asked for a retry; carries the most recent error
    #[error("gave up after {attempts} attempt(s)")]
    Exhausted {
        attempts: u32,
        #[source]
        last: E,
    },
}

impl<E> RetryError<E> {
    /// Number of times the operation was invoked
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Failed { attempts, .. } | RetryError::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted { .. })
    }

    /// The error the operation returned last
    pub fn error(&self) -> &E {
        match self {
            RetryError::Failed { source, .. } => source,
            RetryError::Exhausted { last, .. } => last,
        }
    }

    pub fn into_inner(self) -> E {
        match self {
            RetryError::Failed { source, .. } => source,
            RetryError::Exhausted { last, .. } => last,
        }
    }
}
