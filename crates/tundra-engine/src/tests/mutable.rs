//! Mutable-entry protocol: sequencing, signing, salt handling.

use bytes::Bytes;
use tundra_crypto::verify_record;
use tundra_transport::TransportError;
use tundra_types::ADDRESS_LEN;

use crate::config::{GetOptions, PutOptions};
use crate::error::EngineError;

use super::helpers::{keyed_store, plain_store};

// -----------------------------------------------------------------------
// Sequence monotonicity
// -----------------------------------------------------------------------

#[tokio::test]
async fn test_sequence_must_advance() {
    let (store, _) = keyed_store();
    let salt = Bytes::from_static(b"pineapple-salt");

    let opts1 = PutOptions::sequenced(1).with_salt(salt.clone());
    let addr = store
        .put(Bytes::from_static(b"furbie"), &opts1)
        .await
        .unwrap();

    // Replaying seq 1 under the same (key, salt) conflicts.
    let err = store
        .put(Bytes::from_static(b"furbie"), &opts1)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Transport(TransportError::SequenceConflict {
            expected: 2,
            got: 1
        })
    ));

    // seq 2 succeeds, lands at the same address, and replaces the value.
    let opts2 = PutOptions::sequenced(2).with_salt(salt);
    let addr2 = store
        .put(Bytes::from_static(b"furbie-foo"), &opts2)
        .await
        .unwrap();
    assert_eq!(addr, addr2, "same (key, salt) must map to the same address");

    let rec = store
        .get(addr, &GetOptions::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rec.v, Bytes::from_static(b"furbie-foo"));
    assert_eq!(rec.seq, Some(2));
}

#[tokio::test]
async fn test_seq_zero_selects_mutable_path() {
    let (store, public_hex) = keyed_store();
    let opts = PutOptions::sequenced(0).with_salt(Bytes::from_static(b"zeroth"));

    let addr = store.put(Bytes::from_static(b"first"), &opts).await.unwrap();
    let rec = store
        .get(addr, &GetOptions::default())
        .await
        .unwrap()
        .unwrap();
    assert!(rec.is_mutable());
    assert_eq!(rec.seq, Some(0));
    assert_eq!(rec.k.as_deref(), Some(public_hex.as_str()));
}

// -----------------------------------------------------------------------
// Keys
// -----------------------------------------------------------------------

#[tokio::test]
async fn test_mutable_write_without_keys_fails() {
    let store = plain_store();
    let err = store
        .put(Bytes::from_static(b"data"), &PutOptions::sequenced(1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NoKeys));
}

// -----------------------------------------------------------------------
// Signatures
// -----------------------------------------------------------------------

#[tokio::test]
async fn test_read_back_record_verifies() {
    let (store, _) = keyed_store();
    let opts = PutOptions::sequenced(1).with_salt(Bytes::from_static(b"checkable"));

    let addr = store
        .put(Bytes::from_static(b"signed payload"), &opts)
        .await
        .unwrap();
    let rec = store
        .get(addr, &GetOptions::default())
        .await
        .unwrap()
        .unwrap();

    verify_record(
        rec.k.as_deref().unwrap(),
        rec.sig.as_deref().unwrap(),
        rec.seq.unwrap(),
        rec.salt.as_deref(),
        &rec.v,
    )
    .unwrap();
}

// -----------------------------------------------------------------------
// Salt derivation
// -----------------------------------------------------------------------

#[tokio::test]
async fn test_auto_salt_is_derived_when_absent() {
    let (store, _) = keyed_store();

    let addr = store
        .put(Bytes::from_static(b"unsalted"), &PutOptions::sequenced(1))
        .await
        .unwrap();
    let rec = store
        .get(addr, &GetOptions::default())
        .await
        .unwrap()
        .unwrap();
    let salt = rec.salt.expect("mutable record must carry a salt");
    assert_eq!(salt.len(), ADDRESS_LEN);
}

#[tokio::test]
async fn test_auto_salt_is_randomized_per_write() {
    // Auto-derived single-record salts mix in a random nonce, so two writes
    // of the same content land at different addresses. Callers wanting a
    // stable root address supply their own salt.
    let (store, _) = keyed_store();

    let a1 = store
        .put(Bytes::from_static(b"same content"), &PutOptions::sequenced(1))
        .await
        .unwrap();
    let a2 = store
        .put(Bytes::from_static(b"same content"), &PutOptions::sequenced(1))
        .await
        .unwrap();
    assert_ne!(a1, a2);
}
