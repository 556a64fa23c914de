//! Result of a single polled attempt

/// What one invocation of a polled operation reported
///
/// `Done` and `Fail` are terminal: the poller returns immediately without
/// sleeping. `Retry` asks for another attempt if the budget allows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, E> {
    /// Terminal success
    Done(T),
    /// Not finished yet; try again after the wait interval
    Retry(E),
    /// Terminal failure; further attempts are pointless
    Fail(E),
}

impl<T, E> Outcome<T, E> {
    pub fn map_err<F, O>(self, op: O) -> Outcome<T, F>
    where
        O: FnOnce(E) -> F,
    {
        match self {
            Outcome::Done(value) => Outcome::Done(value),
            Outcome::Retry(error) => Outcome::Retry(op(error)),
            Outcome::Fail(error) => Outcome::Fail(op(error)),
        }
    }

    /// Treat an `Err` as retryable, an `Ok` as done
    pub fn retry_on_err(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Done(value),
            Err(error) => Outcome::Retry(error),
        }
    }
}
