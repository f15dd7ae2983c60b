//! Canonical encoding of the signed `(seq, salt, v)` tuple.
//!
//! Both the writer and the verifying transport must prepare the exact same
//! bytes, so the encoding lives here and nowhere else. The tuple is
//! serialized with postcard: length-prefixed fields, no padding, stable
//! byte output for equal logical input.

use serde::Serialize;

use crate::signer::{Signature, SignatureError, SigningKey, VerifyingKey};

#[derive(Serialize)]
struct Signable<'a> {
    seq: u64,
    salt: Option<&'a [u8]>,
    v: &'a [u8],
}

/// Canonical byte preparation of a mutable record's signed tuple.
pub fn signable(seq: u64, salt: Option<&[u8]>, v: &[u8]) -> Result<Vec<u8>, SignatureError> {
    postcard::to_allocvec(&Signable { seq, salt, v })
        .map_err(|e| SignatureError::Encoding(e.to_string()))
}

/// Sign a mutable record's tuple with the given key.
pub fn sign_record(
    key: &SigningKey,
    seq: u64,
    salt: Option<&[u8]>,
    v: &[u8],
) -> Result<Signature, SignatureError> {
    Ok(key.sign(&signable(seq, salt, v)?))
}

/// Verify a mutable record's hex-encoded `k`/`sig` fields against its tuple.
pub fn verify_record(
    k_hex: &str,
    sig_hex: &str,
    seq: u64,
    salt: Option<&[u8]>,
    v: &[u8],
) -> Result<(), SignatureError> {
    let key = VerifyingKey::from_hex(k_hex)?;
    let sig = Signature::from_hex(sig_hex)?;
    key.verify(&signable(seq, salt, v)?, &sig)
}
