//! Deterministic byte-range splitter.

use bytes::Bytes;

/// Split a payload into ordered fragments of at most `limit` bytes.
///
/// Every fragment except possibly the last is exactly `limit` bytes; order
/// is preserved and no bytes are transformed. An empty payload yields a
/// single empty fragment, so every payload maps to at least one record.
/// Fragments are zero-copy slices of the input. `limit` must be nonzero
/// (guaranteed by store configuration validation).
pub fn slice(payload: &Bytes, limit: usize) -> Vec<Bytes> {
    if payload.is_empty() {
        return vec![Bytes::new()];
    }

    let mut fragments = Vec::with_capacity(payload.len().div_ceil(limit));
    let mut offset = 0;

    while offset < payload.len() {
        let end = usize::min(offset + limit, payload.len());
        fragments.push(payload.slice(offset..end));
        offset = end;
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_is_one_empty_fragment() {
        let fragments = slice(&Bytes::new(), 16);
        assert_eq!(fragments, vec![Bytes::new()]);
    }

    #[test]
    fn test_payload_under_limit_is_one_fragment() {
        let payload = Bytes::from_static(b"short");
        let fragments = slice(&payload, 16);
        assert_eq!(fragments, vec![payload]);
    }

    #[test]
    fn test_payload_exactly_limit() {
        let payload = Bytes::from(vec![0xABu8; 16]);
        let fragments = slice(&payload, 16);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0], payload);
    }

    #[test]
    fn test_limit_plus_one_splits() {
        let payload = Bytes::from(vec![0xCDu8; 17]);
        let fragments = slice(&payload, 16);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].len(), 16);
        assert_eq!(fragments[1].len(), 1);
    }

    #[test]
    fn test_all_but_last_are_full_width() {
        let payload = Bytes::from(vec![7u8; 350]);
        let fragments = slice(&payload, 100);
        assert_eq!(fragments.len(), 4);
        assert!(fragments[..3].iter().all(|f| f.len() == 100));
        assert_eq!(fragments[3].len(), 50);
    }

    #[test]
    fn test_concatenation_restores_payload() {
        let payload = Bytes::from((0..=255u8).cycle().take(1234).collect::<Vec<_>>());
        let fragments = slice(&payload, 100);
        let rejoined: Vec<u8> = fragments.iter().flat_map(|f| f.iter().copied()).collect();
        assert_eq!(rejoined, payload);
    }
}
