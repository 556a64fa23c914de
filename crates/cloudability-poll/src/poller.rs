//! Polling loop (blocking and async)

use crate::error::RetryError;
use crate::outcome::Outcome;
use crate::policy::RetryPolicy;
use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;

/// Progress notification handed to a [`Poller::on_event`] hook
#[derive(Debug)]
pub enum PollEvent<'e, E> {
    /// About to invoke the operation (1-based)
    Attempted { attempt: u32, max_attempts: u32 },
    /// The attempt asked for a retry and the poller is about to sleep
    Retrying {
        attempt: u32,
        error: &'e E,
        wait: Duration,
    },
    Succeeded { attempts: u32 },
    Failed { attempts: u32, error: &'e E },
    /// The last allowed attempt still asked for a retry
    Exhausted { attempts: u32, error: &'e E },
}

/// Hook type of a [`Poller`] with nothing attached
pub type Unobserved<E> = for<'r, 'e> fn(&'r PollEvent<'e, E>);

fn unobserved<E>(_: &PollEvent<'_, E>) {}

/// One polling run: a policy plus an event hook
///
/// A `Poller` is `Send` exactly when its hook is.
pub struct Poller<E, O = Unobserved<E>> {
    policy: RetryPolicy,
    observer: O,
    _error: PhantomData<fn() -> E>,
}

enum Step<T, E> {
    Sleep(Duration),
    Finish(Result<T, RetryError<E>>),
}

impl<E> Poller<E> {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            observer: unobserved::<E>,
            _error: PhantomData,
        }
    }
}

impl<E, O> Poller<E, O>
where
    O: for<'e> FnMut(&PollEvent<'e, E>),
{
    /// Attach a hook that sees every attempt and the final outcome
    pub fn on_event<G>(self, observer: G) -> Poller<E, G>
    where
        G: for<'e> FnMut(&PollEvent<'e, E>),
    {
        Poller {
            policy: self.policy,
            observer,
            _error: PhantomData,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` on the current thread, blocking through each wait
    pub fn retry<T, F>(mut self, mut operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Outcome<T, E>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            self.begin(attempt);
            match self.step(attempt, operation()) {
                Step::Finish(result) => return result,
                Step::Sleep(wait) => std::thread::sleep(wait),
            }
        }
    }

    /// Run `operation` on the current task; attempts never overlap
    pub async fn retry_async<T, F, Fut>(mut self, mut operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Outcome<T, E>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            self.begin(attempt);
            let outcome = operation().await;
            match self.step(attempt, outcome) {
                Step::Finish(result) => return result,
                Step::Sleep(wait) => tokio::time::sleep(wait).await,
            }
        }
    }

    fn begin(&mut self, attempt: u32) {
        let max_attempts = self.policy.max_attempts();
        self.emit(&PollEvent::Attempted {
            attempt,
            max_attempts,
        });
    }

    fn step<T>(&mut self, attempt: u32, outcome: Outcome<T, E>) -> Step<T, E> {
        match outcome {
            Outcome::Done(value) => {
                self.emit(&PollEvent::Succeeded { attempts: attempt });
                Step::Finish(Ok(value))
            }
            Outcome::Fail(error) => {
                self.emit(&PollEvent::Failed {
                    attempts: attempt,
                    error: &error,
                });
                Step::Finish(Err(RetryError::Failed {
                    attempts: attempt,
                    source: error,
                }))
            }
            Outcome::Retry(error) if attempt >= self.policy.max_attempts() => {
                self.emit(&PollEvent::Exhausted {
                    attempts: attempt,
                    error: &error,
                });
                Step::Finish(Err(RetryError::Exhausted {
                    attempts: attempt,
                    last: error,
                }))
            }
            Outcome::Retry(error) => {
                let wait = self.policy.wait();
                self.emit(&PollEvent::Retrying {
                    attempt,
                    error: &error,
                    wait,
                });
                Step::Sleep(wait)
            }
        }
    }

    fn emit(&mut self, event: &PollEvent<'_, E>) {
        (self.observer)(event);
    }
}

/// Blocking poll with no event hook
pub fn retry<T, E, F>(policy: RetryPolicy, operation: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Outcome<T, E>,
{
    Poller::new(policy).retry(operation)
}

/// Async poll with no event hook
pub async fn retry_async<T, E, F, Fut>(
    policy: RetryPolicy,
    operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Outcome<T, E>>,
{
    Poller::new(policy).retry_async(operation).await
}
