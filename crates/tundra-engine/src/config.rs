//! Store configuration and per-call options.

use bytes::Bytes;
use tundra_crypto::Keypair;
use tundra_types::ADDRESS_HEX_LEN;

/// Default maximum pointer-tree depth.
pub const DEFAULT_MAX_INDIRECTIONS: usize = 2;

/// Default maximum record `v` length in bytes.
pub const DEFAULT_BUFFER_SIZE_LIMIT: usize = 1000;

/// Default cap on in-flight transport operations per tree level.
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 5;

/// Configuration for a [`TundraStore`](crate::TundraStore).
pub struct StoreConfig {
    /// Keypair for mutable (signed, sequenced) writes. Without keys, only
    /// immutable writes are possible.
    pub keys: Option<Keypair>,
    /// Maximum pointer-tree depth; writes needing a deeper tree fail.
    pub max_indirections: usize,
    /// Maximum record `v` length the transport accepts, in bytes.
    pub buffer_size_limit: usize,
    /// Transport address width in hex characters, as serialized inside a
    /// pointer buffer. Must match the transport's digest width.
    pub address_size: usize,
    /// Cap on in-flight transport operations launched from one tree level.
    pub concurrent_requests: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            keys: None,
            max_indirections: DEFAULT_MAX_INDIRECTIONS,
            buffer_size_limit: DEFAULT_BUFFER_SIZE_LIMIT,
            address_size: ADDRESS_HEX_LEN,
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
        }
    }
}

/// Per-call options for [`TundraStore::put`](crate::TundraStore::put).
#[derive(Debug, Clone, Default)]
pub struct PutOptions {
    /// Sequence number. Presence selects the mutable write path
    /// (`seq = 0` included); absence selects the immutable path.
    pub seq: Option<u64>,
    /// Salt for the root record. Ignored by immutable addressing; derived
    /// from content when absent on the mutable path.
    pub salt: Option<Bytes>,
}

/// Per-call options for [`TundraStore::get`](crate::TundraStore::get).
#[derive(Debug, Clone, Copy, Default)]
pub struct GetOptions {
    /// Return the record exactly as stored, suppressing reassembly.
    pub recursive: bool,
}

impl PutOptions {
    /// Options for a mutable write with the given sequence number.
    pub fn sequenced(seq: u64) -> Self {
        Self {
            seq: Some(seq),
            salt: None,
        }
    }

    /// Attach a caller-chosen root salt.
    pub fn with_salt(mut self, salt: impl Into<Bytes>) -> Self {
        self.salt = Some(salt.into());
        self
    }
}

impl GetOptions {
    /// Options for a raw read that skips reassembly.
    pub fn raw() -> Self {
        Self { recursive: true }
    }
}
