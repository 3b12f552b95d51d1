//! Retry-until-predicate executors.
//!
//! This module provides the [`Try`] entry points and the two executors they
//! return: [`Tryable`] for blocking producers and [`AsyncTryable`] for
//! producers that return a future. Both run the same loop.
//!
//! # Key Types
//!
//! - [`Try`] - Wraps a producer into a configurable executor
//! - [`Tryable`] / [`AsyncTryable`] - Blocking and suspending executors
//! - [`Predicate`] / [`Presence`] - Success predicates and the default rule
//! - [`Sleeper`] / [`AsyncSleeper`] - How intervals are waited out
//! - [`Outcome`] - Result plus invocation count
//!
//! # Examples
//!
//! ```rust
//! use tryable::retry::Try;
//! use std::time::Duration;
//!
//! let mut pending = vec![None, None, Some("order-17")];
//! let order = Try::to_execute(|| pending.remove(0))
//!     .with_interval(Duration::from_millis(1))
//!     .with_retries(5)
//!     .run();
//!
//! assert_eq!(order, Some("order-17"));
//! ```

mod blocking;
mod builder;
mod outcome;
mod predicate;
mod sleeper;
mod suspending;

use std::time::Duration;
use tracing::debug;

pub use blocking::Tryable;
pub use builder::Try;
pub use outcome::Outcome;
pub use predicate::{IsPresent, Predicate, Presence};
pub use sleeper::{AsyncSleeper, FnSleeper, Sleeper, ThreadSleeper, TokioSleeper};
pub use suspending::AsyncTryable;

/// Interval used when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Retry budget used when none is configured.
pub const DEFAULT_RETRIES: u32 = 20;

fn log_fault(invocation: u64) {
    debug!(invocation, "producer faulted, abandoning retry loop");
}

fn finish<T>(value: T, attempts: u32, satisfied: bool) -> Outcome<T> {
    let invocations = u64::from(attempts) + 1;
    if satisfied {
        debug!(invocations, "predicate satisfied");
    } else {
        debug!(invocations, "retry budget exhausted, returning last result");
    }

    Outcome {
        value,
        invocations,
        satisfied,
    }
}
