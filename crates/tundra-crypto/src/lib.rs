//! Signing primitives for authenticated mutable entries.
//!
//! Mutable records are signed over a canonical encoding of their
//! `(seq, salt, v)` tuple. This crate provides the ed25519 key wrappers,
//! the [`signable`] canonicalization both signer and verifier share, and
//! the [`sign_record`] / [`verify_record`] helpers built on top.

mod signable;
mod signer;

pub use signable::{sign_record, signable, verify_record};
pub use signer::{Keypair, Signature, SignatureError, SigningKey, VerifyingKey};
