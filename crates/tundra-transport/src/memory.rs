//! Reference in-memory transport backend.
//!
//! Implements the mutable-entry protocol without chunking: every record is
//! stored whole under its derived address. Useful for tests and as the
//! normative reference for how a conforming transport validates signatures
//! and enforces sequence monotonicity.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;
use tundra_crypto::verify_record;
use tundra_types::{Address, Record};

use crate::error::TransportError;
use crate::traits::{MutableOpts, Transport};

/// Origin tag stamped on records read from this backend.
pub const MEMORY_ORIGIN: &str = "memory";

/// In-memory transport backed by a `RwLock<HashMap>`.
///
/// The mapping is scoped to the backend instance. Mutations on the same
/// address are serialized by the write lock, so the check-then-insert that
/// enforces the sequence invariant is atomic.
#[derive(Default)]
pub struct MemoryTransport {
    entries: RwLock<HashMap<Address, Record>>,
}

impl MemoryTransport {
    /// Create a new, empty in-memory transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl Transport for MemoryTransport {
    async fn put_immutable(&self, record: &Record) -> Result<Address, TransportError> {
        let address = Address::from_content(&record.v);
        let stored = Record::immutable(record.v.clone(), record.salt.clone());

        let mut entries = self.entries.write().expect("lock poisoned");
        debug!(%address, size = record.v.len(), "storing immutable entry");
        entries.insert(address, stored);
        Ok(address)
    }

    async fn put_mutable(
        &self,
        record: &Record,
        opts: &MutableOpts,
    ) -> Result<Address, TransportError> {
        let (Some(k), Some(sig)) = (&record.k, &record.sig) else {
            return Err(TransportError::Unsigned);
        };
        if *k != opts.public_key.to_hex() {
            return Err(tundra_crypto::SignatureError::InvalidKey.into());
        }
        verify_record(k, sig, opts.seq, Some(&opts.salt), &record.v)?;

        let address = Address::keyed(&opts.public_key.as_bytes(), &opts.salt);

        let mut entries = self.entries.write().expect("lock poisoned");
        if let Some(stored) = entries.get(&address) {
            // First write at an address is accepted with any seq; afterwards
            // each write must advance the stored seq by exactly one.
            let expected = stored.seq.unwrap_or(0) + 1;
            if opts.seq != expected {
                return Err(TransportError::SequenceConflict {
                    expected,
                    got: opts.seq,
                });
            }
        }

        debug!(%address, seq = opts.seq, size = record.v.len(), "storing mutable entry");
        entries.insert(
            address,
            Record::mutable(
                record.v.clone(),
                opts.seq,
                opts.salt.clone(),
                k.clone(),
                sig.clone(),
            ),
        );
        Ok(address)
    }

    async fn get(&self, address: Address) -> Result<Option<Record>, TransportError> {
        let entries = self.entries.read().expect("lock poisoned");
        Ok(entries.get(&address).map(|stored| {
            let mut record = stored.clone();
            record.id = Some(MEMORY_ORIGIN.to_string());
            record
        }))
    }

    async fn start(&self) -> Result<(), TransportError> {
        Ok(())
    }

    async fn stop(&self) -> Result<(), TransportError> {
        Ok(())
    }
}
