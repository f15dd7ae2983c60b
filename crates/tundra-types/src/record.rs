//! The [`Record`] unit stored at one transport address.

use bytes::Bytes;

/// The unit stored at (and returned from) one transport address.
///
/// A record is either a leaf fragment of user data or a serialized pointer
/// buffer; the two are told apart by decoding `v` as an
/// [`Envelope`](crate::Envelope). Mutable records additionally carry the
/// signing metadata (`seq`, `salt`, `k`, `sig`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Opaque payload bytes: a user-data fragment or a serialized pointer buffer.
    pub v: Bytes,
    /// Monotonic sequence number. Present iff the record is mutable.
    pub seq: Option<u64>,
    /// Short byte string disambiguating same-key writes. Always present for
    /// mutable records.
    pub salt: Option<Bytes>,
    /// Hex-encoded signing public key. Present iff the record is mutable.
    pub k: Option<String>,
    /// Hex-encoded signature over the canonical `(seq, salt, v)` encoding.
    pub sig: Option<String>,
    /// Transport-origin tag, stamped by the backend on reads only.
    pub id: Option<String>,
    /// The root record's own `v` before reassembly replaced it with the
    /// concatenated leaf contents. Set by the reassembler on reads only.
    pub original: Option<Bytes>,
}

impl Record {
    /// An immutable (content-addressed) record.
    pub fn immutable(v: Bytes, salt: Option<Bytes>) -> Self {
        Self {
            v,
            salt,
            ..Self::default()
        }
    }

    /// A mutable (signed, sequenced) record.
    pub fn mutable(v: Bytes, seq: u64, salt: Bytes, k: String, sig: String) -> Self {
        Self {
            v,
            seq: Some(seq),
            salt: Some(salt),
            k: Some(k),
            sig: Some(sig),
            id: None,
            original: None,
        }
    }

    /// Whether this record was published through the mutable write path.
    pub fn is_mutable(&self) -> bool {
        self.seq.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immutable_record_has_no_signing_metadata() {
        let rec = Record::immutable(Bytes::from_static(b"data"), None);
        assert!(!rec.is_mutable());
        assert!(rec.seq.is_none());
        assert!(rec.k.is_none());
        assert!(rec.sig.is_none());
    }

    #[test]
    fn test_mutable_record_carries_metadata() {
        let rec = Record::mutable(
            Bytes::from_static(b"data"),
            3,
            Bytes::from_static(b"salt"),
            "ab".repeat(32),
            "cd".repeat(64),
        );
        assert!(rec.is_mutable());
        assert_eq!(rec.seq, Some(3));
        assert_eq!(rec.salt.as_deref(), Some(&b"salt"[..]));
    }

    #[test]
    fn test_seq_zero_is_mutable() {
        let rec = Record {
            v: Bytes::from_static(b"x"),
            seq: Some(0),
            ..Record::default()
        };
        assert!(rec.is_mutable());
    }
}
