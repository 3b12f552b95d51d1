//! Suspending executor: every invocation and every wait is awaited.

use super::outcome::Outcome;
use super::predicate::{IsPresent, Predicate};
use super::sleeper::{AsyncSleeper, TokioSleeper};
use super::{DEFAULT_INTERVAL, DEFAULT_RETRIES};
use crate::settings::RetrySettings;
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, trace};

/// A configured, not yet started, suspending retry run.
///
/// Created by [`Try::to_execute_async`](crate::Try::to_execute_async) or
/// [`Try::to_try_execute_async`](crate::Try::to_try_execute_async). Offers the
/// same configuration surface as [`Tryable`](crate::Tryable); the loop yields
/// the calling task instead of blocking its thread. The producer is never
/// invoked concurrently with itself.
///
/// # Examples
///
/// ```rust
/// use tryable::Try;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::time::Duration;
///
/// # async fn example() {
/// let polls = Arc::new(AtomicU32::new(0));
/// let status = Try::to_execute_async(|| {
///     let polls = Arc::clone(&polls);
///     async move {
///         if polls.fetch_add(1, Ordering::SeqCst) < 2 { "pending" } else { "ready" }
///     }
/// })
/// .until(|status| *status == "ready")
/// .with_interval(Duration::from_millis(10))
/// .with_retries(3)
/// .run_async()
/// .await;
///
/// assert_eq!(status, "ready");
/// # }
/// ```
pub struct AsyncTryable<R, F, P = IsPresent, S = TokioSleeper> {
    producer: F,
    predicate: P,
    interval: Duration,
    retries: u32,
    sleeper: S,
    _result: PhantomData<fn() -> R>,
}

impl<R, F> AsyncTryable<R, F> {
    pub(crate) fn from_producer(producer: F) -> Self {
        Self {
            producer,
            predicate: IsPresent,
            interval: DEFAULT_INTERVAL,
            retries: DEFAULT_RETRIES,
            sleeper: TokioSleeper,
            _result: PhantomData,
        }
    }
}

impl<R, F, P, S> AsyncTryable<R, F, P, S> {
    /// Replace the success predicate.
    pub fn until<Q>(self, predicate: Q) -> AsyncTryable<R, F, Q, S>
    where
        Q: FnMut(&R) -> bool,
    {
        AsyncTryable {
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

    /// Replace the retry budget.
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
    pub fn with_sleeper<T>(self, sleeper: T) -> AsyncTryable<R, F, P, T>
    where
        T: AsyncSleeper,
    {
        AsyncTryable {
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

impl<R, F, Fut, P, S> AsyncTryable<R, F, P, S>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = R>,
    P: Predicate<R>,
    S: AsyncSleeper,
{
    /// Run the loop, awaiting each invocation and each wait.
    pub async fn run_async(self) -> R {
        self.run_async_with_outcome().await.value
    }

    /// Like [`run_async`](Self::run_async), but also reports invocation count
    /// and whether the predicate was satisfied.
    pub async fn run_async_with_outcome(self) -> Outcome<R> {
        let Self {
            mut producer,
            mut predicate,
            interval,
            retries,
            sleeper,
            ..
        } = self;

        let outcome = drive(
            || {
                let pending = producer();
                async move { Ok::<R, Infallible>(pending.await) }
            },
            &mut predicate,
            interval,
            retries,
            &sleeper,
        )
        .await;

        match outcome {
            Ok(outcome) => outcome,
            Err(never) => match never {},
        }
    }
}

impl<T, F, Fut, P, S> AsyncTryable<T, F, P, S>
where
    F: FnMut() -> Fut,
    P: Predicate<T>,
    S: AsyncSleeper,
{
    /// Run a fallible producer, awaiting each invocation and each wait.
    ///
    /// The first `Err` ends the loop and is returned unchanged.
    pub async fn try_run_async<E>(self) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        let Self {
            producer,
            mut predicate,
            interval,
            retries,
            sleeper,
            ..
        } = self;

        drive(producer, &mut predicate, interval, retries, &sleeper)
            .await
            .map(Outcome::into_value)
    }
}

impl<R, F, P, S> fmt::Debug for AsyncTryable<R, F, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncTryable")
            .field("interval", &self.interval)
            .field("retries", &self.retries)
            .finish_non_exhaustive()
    }
}

/// The retry loop, suspending flavour. Same ordering as the blocking loop.
async fn drive<T, E, I, Fut, P, S>(
    mut invoke: I,
    predicate: &mut P,
    interval: Duration,
    retries: u32,
    sleeper: &S,
) -> Result<Outcome<T>, E>
where
    I: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Predicate<T>,
    S: AsyncSleeper,
{
    debug!(mode = "suspending", ?interval, retries, "starting retry loop");

    let mut attempts: u32 = 0;
    let mut result = invoke().await.inspect_err(|_| super::log_fault(1))?;
    let mut satisfied = predicate.accept(&result);

    while !satisfied && attempts < retries {
        attempts += 1;
        trace!(attempt = attempts, retries, "result rejected, retrying");

        result = invoke()
            .await
            .inspect_err(|_| super::log_fault(u64::from(attempts) + 1))?;
        sleeper.sleep(interval).await;
        satisfied = predicate.accept(&result);
    }

    Ok(super::finish(result, attempts, satisfied))
}
