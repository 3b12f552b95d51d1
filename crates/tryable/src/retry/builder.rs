//! Entry points that wrap a producer into an executor.

use super::blocking::Tryable;
use super::suspending::AsyncTryable;
use std::future::Future;

/// Wraps a producer into a configurable, not yet started executor.
///
/// Blocking and suspending producers go through different entry points, so the
/// mode is fixed by the type of the returned executor. Use
/// [`to_execute_async`](Self::to_execute_async) for producers that return a
/// future.
///
/// With the default predicate, handing a future-returning closure to
/// [`to_execute`](Self::to_execute) is caught at compile time: futures have no
/// [`Presence`](crate::Presence), so [`run`](crate::Tryable::run) is not
/// available. A custom predicate over the future type lifts that check. The
/// executor then runs, the predicate only ever sees unpolled futures, and
/// `run` hands back a future that still has to be awaited.
///
/// # Examples
///
/// ```rust
/// use tryable::Try;
/// use std::time::Duration;
///
/// let mut reads = 0;
/// let balance = Try::to_execute(|| {
///     reads += 1;
///     if reads < 2 { None } else { Some(120) }
/// })
/// .with_interval(Duration::from_millis(1))
/// .run();
///
/// assert_eq!(balance, Some(120));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Try;

impl Try {
    /// Wrap a blocking producer.
    pub fn to_execute<R, F>(producer: F) -> Tryable<R, F>
    where
        F: FnMut() -> R,
    {
        Tryable::from_producer(producer)
    }

    /// Wrap a producer that returns a future.
    pub fn to_execute_async<R, F, Fut>(producer: F) -> AsyncTryable<R, F>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = R>,
    {
        AsyncTryable::from_producer(producer)
    }

    /// Wrap a blocking producer that can fail.
    ///
    /// The predicate inspects the `Ok` value; an `Err` ends the run.
    pub fn to_try_execute<T, E, F>(producer: F) -> Tryable<T, F>
    where
        F: FnMut() -> Result<T, E>,
    {
        Tryable::from_producer(producer)
    }

    /// Wrap a future-returning producer that can fail.
    pub fn to_try_execute_async<T, E, F, Fut>(producer: F) -> AsyncTryable<T, F>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        AsyncTryable::from_producer(producer)
    }
}
