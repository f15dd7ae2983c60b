//! Core trait for address-keyed record storage.

use bytes::Bytes;
use tundra_crypto::VerifyingKey;
use tundra_types::{Address, Record};

use crate::error::TransportError;

/// Addressing inputs for a mutable (signed, sequenced) write.
///
/// The transport derives the entry address from `public_key ‖ salt`; the
/// signature itself travels in the record's `k`/`sig` fields.
#[derive(Debug, Clone)]
pub struct MutableOpts {
    /// Key the entry address is bound to.
    pub public_key: VerifyingKey,
    /// Salt disambiguating entries under the same key.
    pub salt: Bytes,
    /// Sequence number of this write.
    pub seq: u64,
}

/// An abstract address-keyed store with two write modes and one read.
///
/// All implementations must be `Send + Sync` for use across async tasks.
/// Individual entries are size-bounded by the deployment; the chunking
/// engine above this trait never stores a `v` larger than its configured
/// buffer size limit.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Store a content-addressed record. The returned address is a pure
    /// function of the record's content, so equal content yields equal
    /// addresses and repeated calls are idempotent.
    async fn put_immutable(&self, record: &Record) -> Result<Address, TransportError>;

    /// Store a signed record at `digest(public_key ‖ salt)`.
    ///
    /// The transport validates the signature and enforces sequence
    /// monotonicity: a write is accepted only if no record exists at the
    /// address yet, or its `seq` is exactly one greater than the stored
    /// record's.
    async fn put_mutable(
        &self,
        record: &Record,
        opts: &MutableOpts,
    ) -> Result<Address, TransportError>;

    /// Return the most recent record at `address`, or `None` if the address
    /// is unknown. Backends stamp the returned record's `id` field with
    /// their origin tag.
    async fn get(&self, address: Address) -> Result<Option<Record>, TransportError>;

    /// Bring the transport up. A no-op for backends with no connection state.
    async fn start(&self) -> Result<(), TransportError>;

    /// Tear the transport down.
    async fn stop(&self) -> Result<(), TransportError>;
}
