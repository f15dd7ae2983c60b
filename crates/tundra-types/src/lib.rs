//! Shared types and identifiers for tundra.
//!
//! This crate defines the core vocabulary used across the tundra workspace:
//! the fixed-width transport [`Address`], the [`Record`] unit stored at one
//! address, and the [`Envelope`] wire format that distinguishes pointer
//! buffers from leaf fragments.

mod address;
mod envelope;
mod record;

pub use address::{ADDRESS_HEX_LEN, ADDRESS_LEN, Address, AddressParseError};
pub use envelope::{Envelope, FRAME_OVERHEAD, PER_POINTER_COST, POINTERS_TAG};
pub use record::Record;
