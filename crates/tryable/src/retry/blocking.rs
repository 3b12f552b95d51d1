//! Blocking executor: the loop runs on, and sleeps, the calling thread.

use super::outcome::Outcome;
use super::predicate::{IsPresent, Predicate};
use super::sleeper::{Sleeper, ThreadSleeper};
use super::{DEFAULT_INTERVAL, DEFAULT_RETRIES};
use crate::settings::RetrySettings;
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, trace};

/// A configured, not yet started, blocking retry run.
///
/// Created by [`Try::to_execute`](crate::Try::to_execute) or
/// [`Try::to_try_execute`](crate::Try::to_try_execute). Configuration methods
/// consume and return the executor; the terminal call consumes it for good, so
/// an executor runs at most once.
///
/// # Type Parameters
/// - `R`: the result the predicate inspects
/// - `F`: the producer
/// - `P`: the success predicate (defaults to [`IsPresent`])
/// - `S`: how intervals are waited out (defaults to [`ThreadSleeper`])
///
/// # Examples
///
/// ```rust
/// use tryable::Try;
/// use std::time::Duration;
///
/// let mut calls = 0;
/// let outcome = Try::to_execute(|| {
///     calls += 1;
///     "x"
/// })
/// .until(|_| false)
/// .with_interval(Duration::from_millis(1))
/// .with_retries(2)
/// .run_with_outcome();
///
/// assert_eq!(outcome.value, "x");
/// assert_eq!(outcome.invocations, 3);
/// assert!(!outcome.satisfied);
/// ```
pub struct Tryable<R, F, P = IsPresent, S = ThreadSleeper> {
    producer: F,
    predicate: P,
    interval: Duration,
    retries: u32,
    sleeper: S,
    _result: PhantomData<fn() -> R>,
}

impl<R, F> Tryable<R, F> {
    pub(crate) fn from_producer(producer: F) -> Self {
        Self {
            producer,
            predicate: IsPresent,
            interval: DEFAULT_INTERVAL,
            retries: DEFAULT_RETRIES,
            sleeper: ThreadSleeper,
            _result: PhantomData,
        }
    }
}

impl<R, F, P, S> Tryable<R, F, P, S> {
    /// Replace the success predicate.
    ///
    /// The loop stops as soon as the predicate returns `true` for a result.
    pub fn until<Q>(self, predicate: Q) -> Tryable<R, F, Q, S>
    where
        Q: FnMut(&R) -> bool,
    {
        Tryable {
            producer: self.producer,
            predicate,
            interval: self.interval,
            retries: self.retries,
            sleeper: self.sleeper,
            _result: PhantomData,
        }
    }

    /// Replace the wait that follows each retry. Zero means no wait.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Replace the retry budget: the number of invocations allowed after the first.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Apply interval and retry budget from loaded settings.
    pub fn with_settings(self, settings: &RetrySettings) -> Self {
        self.with_interval(settings.interval())
            .with_retries(settings.retries())
    }

    /// Replace how intervals are waited out.
    pub fn with_sleeper<T>(self, sleeper: T) -> Tryable<R, F, P, T>
    where
        T: Sleeper,
    {
        Tryable {
            producer: self.producer,
            predicate: self.predicate,
            interval: self.interval,
            retries: self.retries,
            sleeper,
            _result: PhantomData,
        }
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The configured retry budget.
    pub fn retries(&self) -> u32 {
        self.retries
    }
}

impl<R, F, P, S> Tryable<R, F, P, S>
where
    F: FnMut() -> R,
    P: Predicate<R>,
    S: Sleeper,
{
    /// Run the loop on the calling thread and return the last result.
    ///
    /// Returns as soon as the predicate accepts a result, or once the retry
    /// budget is spent. A panic in the producer unwinds through this call.
    pub fn run(self) -> R {
        self.run_with_outcome().value
    }

    /// Like [`run`](Self::run), but also reports invocation count and whether
    /// the predicate was satisfied.
    pub fn run_with_outcome(self) -> Outcome<R> {
        let Self {
            mut producer,
            mut predicate,
            interval,
            retries,
            sleeper,
            ..
        } = self;

        let outcome = drive(
            || Ok::<R, Infallible>(producer()),
            &mut predicate,
            interval,
            retries,
            &sleeper,
        );

        match outcome {
            Ok(outcome) => outcome,
            Err(never) => match never {},
        }
    }
}

impl<T, F, P, S> Tryable<T, F, P, S>
where
    P: Predicate<T>,
    S: Sleeper,
{
    /// Run a fallible producer on the calling thread.
    ///
    /// The first `Err` ends the loop and is returned unchanged; it is never
    /// retried. `Ok` values are checked against the predicate exactly like
    /// [`run`](Self::run) checks plain results.
    ///
    /// ```rust
    /// use tryable::Try;
    /// use std::time::Duration;
    ///
    /// let mut calls = 0;
    /// let result: Result<Option<u8>, &str> = Try::to_try_execute(|| {
    ///     calls += 1;
    ///     if calls == 2 { Err("connection reset") } else { Ok(None) }
    /// })
    /// .with_interval(Duration::ZERO)
    /// .try_run();
    ///
    /// assert_eq!(result, Err("connection reset"));
    /// assert_eq!(calls, 2);
    /// ```
    pub fn try_run<E>(self) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        let Self {
            producer,
            mut predicate,
            interval,
            retries,
            sleeper,
            ..
        } = self;

        drive(producer, &mut predicate, interval, retries, &sleeper).map(Outcome::into_value)
    }
}

impl<R, F, P, S> fmt::Debug for Tryable<R, F, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tryable")
            .field("interval", &self.interval)
            .field("retries", &self.retries)
            .finish_non_exhaustive()
    }
}

/// The retry loop, blocking flavour.
///
/// The interval is charged after every retry invocation, never before the
/// first one, and still charged after the final retry.
fn drive<T, E, I, P, S>(
    mut invoke: I,
    predicate: &mut P,
    interval: Duration,
    retries: u32,
    sleeper: &S,
) -> Result<Outcome<T>, E>
where
    I: FnMut() -> Result<T, E>,
    P: Predicate<T>,
    S: Sleeper,
{
    debug!(mode = "blocking", ?interval, retries, "starting retry loop");

    let mut attempts: u32 = 0;
    let mut result = invoke().inspect_err(|_| super::log_fault(1))?;
    let mut satisfied = predicate.accept(&result);

    while !satisfied && attempts < retries {
        attempts += 1;
        trace!(attempt = attempts, retries, "result rejected, retrying");

        result = invoke().inspect_err(|_| super::log_fault(u64::from(attempts) + 1))?;
        sleeper.sleep(interval);
        satisfied = predicate.accept(&result);
    }

    Ok(super::finish(result, attempts, satisfied))
}
