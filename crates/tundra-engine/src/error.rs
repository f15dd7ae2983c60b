//! Error types for the engine.

use tundra_crypto::SignatureError;
use tundra_transport::TransportError;
use tundra_types::Address;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A mutable write was requested but no keys are configured.
    #[error("no keys set")]
    NoKeys,

    /// The store configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The payload cannot be represented within the configured tree depth.
    #[error(
        "payload of {size} bytes exceeds the {limit}-byte capacity of a \
         depth-{max_indirections} pointer tree"
    )]
    CapacityExceeded {
        /// Payload length in bytes.
        size: usize,
        /// Maximum representable payload length.
        limit: usize,
        /// Configured depth bound.
        max_indirections: usize,
    },

    /// Tree construction or resolution needed more levels than allowed.
    #[error("pointer tree exceeds {max_indirections} indirections")]
    DepthExceeded {
        /// Configured depth bound.
        max_indirections: usize,
    },

    /// A pointer buffer references an address the transport does not hold.
    #[error("missing chunk at {0}")]
    MissingChunk(Address),

    /// Pointer envelope serialization failed.
    #[error("envelope serialization failed: {0}")]
    Envelope(String),

    /// A parallel storage task died before reporting a result.
    #[error("storage task failed: {0}")]
    TaskFailed(String),

    /// Signing a record failed.
    #[error("signing failed: {0}")]
    Signature(#[from] SignatureError),

    /// The underlying transport reported an error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}
