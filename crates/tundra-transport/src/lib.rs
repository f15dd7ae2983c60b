//! Transport interface and reference backend.
//!
//! This crate provides:
//! - [`Transport`] — the abstract address-keyed store the engine writes
//!   through: one content-addressed write mode, one signed/sequenced write
//!   mode, and one read.
//! - [`MemoryTransport`] — the reference in-memory backend implementing the
//!   mutable-entry protocol (no chunking).
//! - [`SlowTransport`] — a latency-injecting wrapper for scheduling tests.

mod error;
mod memory;
mod slow;
mod traits;

pub use error::TransportError;
pub use memory::{MEMORY_ORIGIN, MemoryTransport};
pub use slow::SlowTransport;
pub use traits::{MutableOpts, Transport};
