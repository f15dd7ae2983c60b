//! Shared test utilities for tundra-engine tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use tundra_crypto::Keypair;
use tundra_transport::{MemoryTransport, MutableOpts, Transport, TransportError};
use tundra_types::{Address, Record};

use crate::config::StoreConfig;
use crate::store::TundraStore;

/// Generate deterministic, non-repeating test data.
pub fn test_data(size: usize) -> Bytes {
    let mut data = Vec::with_capacity(size);
    let mut state: u32 = 0xDEAD_BEEF;
    for _ in 0..size {
        state = state.wrapping_mul(1103515245).wrapping_add(12345);
        data.push((state >> 16) as u8);
    }
    Bytes::from(data)
}

/// A store with keys over a fresh memory transport. Returns the store and
/// the hex form of its public key.
pub fn keyed_store() -> (TundraStore, String) {
    let keys = Keypair::generate();
    let public_hex = keys.public.to_hex();
    let store = TundraStore::new(
        Arc::new(MemoryTransport::new()),
        StoreConfig {
            keys: Some(keys),
            ..StoreConfig::default()
        },
    )
    .unwrap();
    (store, public_hex)
}

/// A keyless store over a fresh memory transport (immutable writes only).
pub fn plain_store() -> TundraStore {
    TundraStore::new(Arc::new(MemoryTransport::new()), StoreConfig::default()).unwrap()
}

/// A [`Transport`] wrapper that counts in-flight operations.
///
/// Each operation bumps an atomic counter, parks briefly to widen the
/// overlap window, and records the high-water mark, so tests can assert
/// the engine's per-level concurrency bound.
pub struct TrackingTransport {
    inner: Arc<dyn Transport>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl TrackingTransport {
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        Self {
            inner,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Highest number of operations observed in flight at once.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    async fn tracked<T>(&self, op: impl std::future::Future<Output = T>) -> T {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let out = op.await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        out
    }
}

#[async_trait::async_trait]
impl Transport for TrackingTransport {
    async fn put_immutable(&self, record: &Record) -> Result<Address, TransportError> {
        self.tracked(self.inner.put_immutable(record)).await
    }

    async fn put_mutable(
        &self,
        record: &Record,
        opts: &MutableOpts,
    ) -> Result<Address, TransportError> {
        self.tracked(self.inner.put_mutable(record, opts)).await
    }

    async fn get(&self, address: Address) -> Result<Option<Record>, TransportError> {
        self.tracked(self.inner.get(address)).await
    }

    async fn start(&self) -> Result<(), TransportError> {
        self.inner.start().await
    }

    async fn stop(&self) -> Result<(), TransportError> {
        self.inner.stop().await
    }
}
