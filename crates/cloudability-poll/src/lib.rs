//! Bounded retry poller
//!
//! Repeatedly invokes an operation until it reports a terminal outcome or the
//! retry budget runs out, sleeping a fixed interval between attempts.
//!
//! The operation decides what is retryable. The poller only counts attempts
//! and sleeps; it never inspects or logs errors. Callers that want to observe
//! progress attach a hook with [`Poller::on_event`].
//!
//! # Example
//!
//! ```
//! use cloudability_poll::{Outcome, RetryPolicy, retry};
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::new(3, Duration::ZERO).unwrap();
//! let mut calls = 0;
//! let result: Result<u32, _> = retry(policy, || {
//!     calls += 1;
//!     if calls < 2 {
//!         Outcome::Retry("pending")
//!     } else {
//!         Outcome::Done(calls)
//!     }
//! });
//! assert_eq!(result.unwrap(), 2);
//! ```

pub mod error;
pub mod outcome;
pub mod policy;
pub mod poller;

// Re-exports
pub use error::{PolicyError, RetryError};
pub use outcome::Outcome;
pub use policy::RetryPolicy;
pub use poller::{PollEvent, Poller, retry, retry_async};
