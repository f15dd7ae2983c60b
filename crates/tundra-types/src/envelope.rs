//! Wire envelope distinguishing pointer buffers from leaf fragments.
//!
//! A pointer buffer's `v` is the canonical JSON serialization of
//! `{"type":"pointers","p":[addr₁,…]}`. The literal `pointers` discriminator
//! is the only signal by which readers identify indirection, so it is part
//! of the wire contract.

use serde::{Deserialize, Serialize};

use crate::address::{ADDRESS_HEX_LEN, Address};

/// Literal discriminator value marking a pointer buffer.
pub const POINTERS_TAG: &str = "pointers";

/// Serialized size of an envelope with an empty pointer array:
/// `{"type":"pointers","p":[]}`.
pub const FRAME_OVERHEAD: usize = 26;

/// Serialized cost of one address slot: the hex digits, two quotes, and the
/// separating comma.
pub const PER_POINTER_COST: usize = ADDRESS_HEX_LEN + 3;

/// Tagged wire envelope carried in a record's `v`.
///
/// Decoding failure means the record is a leaf. A single variant today; the
/// tag leaves room for other envelope kinds without breaking readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Envelope {
    /// An ordered list of child addresses whose resolved contents
    /// concatenate to this record's logical value.
    #[serde(rename = "pointers")]
    Pointers {
        /// Child addresses in payload order.
        p: Vec<Address>,
    },
}

impl Envelope {
    /// Build a pointer envelope from child addresses in payload order.
    pub fn pointers(p: Vec<Address>) -> Self {
        Self::Pointers { p }
    }

    /// Canonical serialized form: stable byte output for equal logical input.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode an envelope from a record's `v`. `None` means the bytes do not
    /// carry the pointer discriminator and the record is a leaf.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }

    /// Serialized size of an envelope holding `n` pointers.
    pub fn encoded_len(n: usize) -> usize {
        if n == 0 {
            FRAME_OVERHEAD
        } else {
            // n slots, but only n - 1 separating commas.
            FRAME_OVERHEAD + n * PER_POINTER_COST - 1
        }
    }
}
