//! Pointer-buffer capacity computation.

use tundra_types::FRAME_OVERHEAD;

/// How many child addresses fit in one pointer buffer, and what that makes
/// the maximum payload at a given tree depth.
///
/// The fan-out `K` is derived from the transport's record size limit `B`,
/// the serialized address width `A`, and the envelope frame: each address
/// costs its hex digits plus quoting and a separating comma, so
/// `K = (B − frame) / (A + 3)`.
#[derive(Debug, Clone, Copy)]
pub struct Fanout {
    max_pointers: usize,
    buffer_size_limit: usize,
}

impl Fanout {
    /// Compute the fan-out for a record size limit and address width.
    pub fn new(buffer_size_limit: usize, address_size: usize) -> Self {
        let per_pointer = address_size + 3;
        let usable = buffer_size_limit.saturating_sub(FRAME_OVERHEAD);
        Self {
            max_pointers: usable / per_pointer,
            buffer_size_limit,
        }
    }

    /// Maximum number of child addresses per pointer buffer (`K`).
    pub fn max_pointers(&self) -> usize {
        self.max_pointers
    }

    /// Maximum number of leaf fragments a tree of `depth` levels can reach
    /// (`K^depth`).
    pub fn max_leaves(&self, depth: usize) -> usize {
        u32::try_from(depth)
            .ok()
            .and_then(|d| self.max_pointers.checked_pow(d))
            .unwrap_or(usize::MAX)
    }

    /// Maximum payload length representable at `depth` levels
    /// (`K^depth · B`).
    pub fn max_payload(&self, depth: usize) -> usize {
        self.max_leaves(depth)
            .saturating_mul(self.buffer_size_limit)
    }
}
