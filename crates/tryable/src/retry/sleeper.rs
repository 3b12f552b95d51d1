//! How an executor waits out the interval between attempts.

use async_trait::async_trait;
use std::time::Duration;

/// Blocks the calling thread for an interval.
///
/// Used by [`Tryable`](crate::Tryable). The default, [`ThreadSleeper`], calls
/// [`std::thread::sleep`].
pub trait Sleeper {
    /// Block for `interval`.
    fn sleep(&self, interval: Duration);
}

/// Suspends the calling task for an interval.
///
/// Used by [`AsyncTryable`](crate::AsyncTryable). The default,
/// [`TokioSleeper`], awaits [`tokio::time::sleep`].
#[async_trait]
pub trait AsyncSleeper: Send + Sync {
    /// Suspend for `interval`.
    async fn sleep(&self, interval: Duration);
}

/// Sleeps on the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, interval: Duration) {
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl AsyncSleeper for TokioSleeper {
    async fn sleep(&self, interval: Duration) {
        tokio::time::sleep(interval).await;
    }
}

/// Adapts a closure into a [`Sleeper`].
///
/// Handy in tests, where recording the requested intervals is more useful than
/// actually waiting:
///
/// ```rust
/// use std::cell::RefCell;
/// use std::time::Duration;
/// use tryable::{FnSleeper, Sleeper};
///
/// let waits = RefCell::new(Vec::new());
/// let sleeper = FnSleeper(|d: Duration| waits.borrow_mut().push(d));
///
/// sleeper.sleep(Duration::from_millis(5));
/// assert_eq!(waits.into_inner(), vec![Duration::from_millis(5)]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnSleeper<F>(pub F);

impl<F> Sleeper for FnSleeper<F>
where
    F: Fn(Duration),
{
    fn sleep(&self, interval: Duration) {
        (self.0)(interval)
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, interval: Duration) {
        (**self).sleep(interval)
    }
}

#[async_trait]
impl<S: AsyncSleeper + ?Sized> AsyncSleeper for std::sync::Arc<S> {
    async fn sleep(&self, interval: Duration) {
        (**self).sleep(interval).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_thread_sleeper_waits() {
        let start = Instant::now();
        ThreadSleeper.sleep(Duration::from_millis(5));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_thread_sleeper_zero_returns() {
        let start = Instant::now();
        ThreadSleeper.sleep(Duration::ZERO);
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_sleeper_advances_clock() {
        let start = tokio::time::Instant::now();
        TokioSleeper.sleep(Duration::from_millis(250)).await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[test]
    fn test_fn_sleeper_forwards_interval() {
        let seen = std::cell::Cell::new(Duration::ZERO);
        FnSleeper(|d| seen.set(d)).sleep(Duration::from_millis(42));
        assert_eq!(seen.get(), Duration::from_millis(42));
    }

    #[test]
    fn test_borrowed_sleeper_delegates() {
        let count = std::cell::Cell::new(0);
        let sleeper = FnSleeper(|_| count.set(count.get() + 1));

        let borrowed = &sleeper;
        borrowed.sleep(Duration::ZERO);
        Sleeper::sleep(&borrowed, Duration::ZERO);
        assert_eq!(count.get(), 2);
    }
}
