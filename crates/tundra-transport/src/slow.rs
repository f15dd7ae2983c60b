//! A [`Transport`] wrapper that adds configurable random IO latency.
//!
//! `SlowTransport` wraps any `Arc<dyn Transport>` and sleeps for a random
//! duration before each operation. The RNG is seeded for deterministic,
//! reproducible behaviour across test runs.
//!
//! # Example
//!
//! ```ignore
//! let slow = SlowTransport::new(inner)
//!     .read_latency(5, 20)    // 5–20 ms per get
//!     .write_latency(10, 30)  // 10–30 ms per put
//!     .seed(42);
//! ```

use std::sync::{Arc, Mutex};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tundra_types::{Address, Record};

use crate::error::TransportError;
use crate::traits::{MutableOpts, Transport};

/// A [`Transport`] wrapper that injects random latency before operations.
///
/// Forces out-of-order completion of parallel sub-stores and sub-fetches,
/// surfacing ordering bugs that an instant in-memory transport hides.
pub struct SlowTransport {
    inner: Arc<dyn Transport>,
    read_latency_ms: (u64, u64),
    write_latency_ms: (u64, u64),
    rng: Mutex<StdRng>,
}

impl SlowTransport {
    /// Wrap an existing transport with zero latency (pass-through) by default.
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        Self {
            inner,
            read_latency_ms: (0, 0),
            write_latency_ms: (0, 0),
            rng: Mutex::new(StdRng::seed_from_u64(0)),
        }
    }

    /// Set the read latency range in milliseconds (uniform random).
    pub fn read_latency(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.read_latency_ms = (min_ms, max_ms);
        self
    }

    /// Set the write latency range in milliseconds (uniform random).
    pub fn write_latency(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.write_latency_ms = (min_ms, max_ms);
        self
    }

    /// Set the RNG seed for deterministic behaviour.
    pub fn seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    /// Sleep for a random duration in `[min, max]` milliseconds.
    async fn delay(&self, range: (u64, u64)) {
        let (min, max) = range;

        if max == 0 {
            return;
        }

        let ms = if min == max {
            min
        } else {
            self.rng.lock().expect("lock poisoned").gen_range(min..=max)
        };

        if ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(ms)).await;
        }
    }
}

#[async_trait::async_trait]
impl Transport for SlowTransport {
    async fn put_immutable(&self, record: &Record) -> Result<Address, TransportError> {
        self.delay(self.write_latency_ms).await;
        self.inner.put_immutable(record).await
    }

    async fn put_mutable(
        &self,
        record: &Record,
        opts: &MutableOpts,
    ) -> Result<Address, TransportError> {
        self.delay(self.write_latency_ms).await;
        self.inner.put_mutable(record, opts).await
    }

    async fn get(&self, address: Address) -> Result<Option<Record>, TransportError> {
        self.delay(self.read_latency_ms).await;
        self.inner.get(address).await
    }

    async fn start(&self) -> Result<(), TransportError> {
        self.inner.start().await
    }

    async fn stop(&self) -> Result<(), TransportError> {
        self.inner.stop().await
    }
}
