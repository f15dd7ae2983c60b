//! Chunking and indirection engine over a size-bounded transport.
//!
//! [`TundraStore`] writes arbitrarily large payloads through a
//! [`Transport`](tundra_transport::Transport) whose entries are size-bounded:
//! payloads exceeding the limit are split into a balanced K-ary tree of
//! content-addressed fragments and published bottom-up, and reads walk the
//! tree back down to reassemble the original bytes.

pub mod config;
pub mod error;
pub mod fanout;
mod reassemble;
pub mod slicer;
mod store;

pub use config::{GetOptions, PutOptions, StoreConfig};
pub use error::EngineError;
pub use fanout::Fanout;
pub use store::TundraStore;

#[cfg(test)]
mod tests;
