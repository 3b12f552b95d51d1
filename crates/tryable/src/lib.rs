#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Run an operation until its result satisfies a predicate.
//!
//! `tryable` wraps a nullary producer in a small, single-shot executor that
//! invokes it, checks the result against a success predicate and, while the
//! predicate rejects the result, invokes it again on a fixed interval until a
//! retry budget is spent.
//!
//! - **Blocking mode** via [`Try::to_execute`] and [`Tryable::run`]
//! - **Suspending mode** via [`Try::to_execute_async`] and [`AsyncTryable::run_async`]
//! - **Fallible producers** via [`Try::to_try_execute`]: an `Err` ends the loop
//!   immediately and is returned unchanged
//! - **Loadable settings** via [`RetrySettings`] (TOML or environment)
//!
//! Defaults: the result must be present (see [`Presence`]), the interval is
//! 500ms and the retry budget is 20.
//!
//! # Loop shape
//!
//! ```text
//! result = producer()
//! while !predicate(result) && attempts < retries:
//!     attempts += 1
//!     result = producer()
//!     sleep(interval)
//! return result
//! ```
//!
//! The first retry follows the initial attempt immediately; every retry is
//! followed by the interval, including the last one.
//!
//! # Examples
//!
//! ```rust
//! use tryable::prelude::*;
//! use std::time::Duration;
//!
//! let mut polls = 0;
//! let status = Try::to_execute(|| {
//!     polls += 1;
//!     if polls < 3 { "pending" } else { "ready" }
//! })
//! .until(|status| *status == "ready")
//! .with_interval(Duration::from_millis(1))
//! .with_retries(5)
//! .run();
//!
//! assert_eq!(status, "ready");
//! ```
//!
//! Suspending mode:
//!
//! ```rust
//! use tryable::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let record = Try::to_execute_async(|| async { Some(42) })
//!     .with_interval(Duration::from_millis(10))
//!     .run_async()
//!     .await;
//!
//! assert_eq!(record, Some(42));
//! # }
//! ```
//!
//! With the default predicate, a future-returning producer handed to the
//! blocking entry point is rejected when the crate using it is compiled. A
//! custom predicate over the future type bypasses this check (see [`Try`]):
//!
//! ```compile_fail
//! use tryable::Try;
//!
//! let value = Try::to_execute(|| async { Some(1) }).run();
//! ```

pub mod error;
pub mod retry;
pub mod settings;

pub use error::{Error, Result};
pub use retry::{
    AsyncSleeper, AsyncTryable, FnSleeper, IsPresent, Outcome, Predicate, Presence, Sleeper,
    ThreadSleeper, TokioSleeper, Try, Tryable,
};
pub use settings::RetrySettings;

/// Convenient re-exports of commonly used items.
///
/// Import everything needed to build and run an executor with:
///
/// ```rust
/// use tryable::prelude::*;
/// ```
pub mod prelude {
    pub use crate::retry::{AsyncTryable, Outcome, Predicate, Presence, Try, Tryable};
    pub use crate::settings::RetrySettings;
}
