//! Error types for transport operations.

use tundra_crypto::SignatureError;

/// Errors that can occur during transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// A mutable write whose `seq` is not exactly one greater than the
    /// stored record's.
    #[error("sequence conflict: expected seq {expected}, got {got}")]
    SequenceConflict {
        /// The only sequence number the store would accept.
        expected: u64,
        /// The sequence number the write carried.
        got: u64,
    },

    /// The record's signature did not verify.
    #[error("signature rejected: {0}")]
    Signature(#[from] SignatureError),

    /// A mutable write arrived without its `k`/`sig` metadata.
    #[error("mutable record is missing signing metadata")]
    Unsigned,

    /// The underlying transport failed or is unreachable.
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}
