//! Example: polling a store until a record shows up
//!
//! This example demonstrates:
//! 1. Blocking retry against an eventually consistent read
//! 2. The same read through the async executor
//! 3. A fallible producer whose error ends the run immediately
//! 4. Loading interval and retry budget from the environment
//!
//! Run with:
//! ```bash
//! RUST_LOG=tryable=debug TRYABLE_INTERVAL_MS=50 cargo run -p tryable --example wait_for_record
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use tryable::prelude::*;

/// A store whose writes become visible only after a few reads.
#[derive(Clone)]
struct LaggingStore {
    reads_until_visible: Arc<Mutex<u32>>,
    records: Arc<Mutex<HashMap<u64, String>>>,
}

impl LaggingStore {
    fn new(lag: u32) -> Self {
        Self {
            reads_until_visible: Arc::new(Mutex::new(lag)),
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn insert(&self, id: u64, name: &str) {
        self.records
            .lock()
            .unwrap()
            .insert(id, name.to_string());
    }

    fn find(&self, id: u64) -> Option<String> {
        let mut lag = self.reads_until_visible.lock().unwrap();
        if *lag > 0 {
            *lag -= 1;
            println!("  read {id}: not visible yet");
            return None;
        }
        println!("  read {id}: found");
        self.records.lock().unwrap().get(&id).cloned()
    }

    fn find_checked(&self, id: u64) -> Result<Option<String>, std::io::Error> {
        if id == 0 {
            return Err(std::io::Error::other("id 0 is reserved"));
        }
        Ok(self.find(id))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== tryable: waiting for records ===\n");

    let settings = RetrySettings::from_env()?;
    println!(
        "Settings: interval={:?}, retries={}\n",
        settings.interval(),
        settings.retries()
    );

    // Example 1: blocking
    println!("1. Blocking read");
    let store = LaggingStore::new(2);
    store.insert(7, "ada");

    let start = Instant::now();
    let outcome = Try::to_execute(|| store.find(7))
        .with_settings(&settings)
        .run_with_outcome();
    println!(
        "  -> {:?} after {} reads in {:?}\n",
        outcome.value,
        outcome.invocations,
        start.elapsed()
    );

    // Example 2: async with a custom predicate
    println!("2. Async read until the name is final");
    let store = LaggingStore::new(1);
    store.insert(9, "grace");

    let name = Try::to_execute_async(|| {
        let store = store.clone();
        async move { store.find(9) }
    })
    .until(|name| name.as_deref() == Some("grace"))
    .with_interval(Duration::from_millis(20))
    .with_retries(5)
    .run_async()
    .await;
    println!("  -> {name:?}\n");

    // Example 3: a fault is not retried
    println!("3. Fallible read");
    let store = LaggingStore::new(0);
    let result = Try::to_try_execute(|| store.find_checked(0))
        .with_interval(Duration::from_millis(20))
        .try_run();
    println!("  -> {result:?}\n");

    // Example 4: budget exhausted
    println!("4. Record that never appears");
    let store = LaggingStore::new(0);
    let outcome = Try::to_execute(|| store.find(404))
        .with_interval(Duration::from_millis(5))
        .with_retries(3)
        .run_with_outcome();
    println!(
        "  -> {:?}, satisfied={}, reads={}",
        outcome.value, outcome.satisfied, outcome.invocations
    );

    Ok(())
}
