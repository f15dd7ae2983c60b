//! Fixed-width transport addresses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Width of a transport address in raw bytes.
pub const ADDRESS_LEN: usize = 20;

/// Width of a transport address in hex characters.
pub const ADDRESS_HEX_LEN: usize = 2 * ADDRESS_LEN;

/// A fixed-width identifier of one transport entry.
///
/// Immutable entries are addressed by their content digest; mutable entries
/// by a digest over `public_key ‖ salt`. Both are BLAKE3 truncated to the
/// transport's 20-byte digest width.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Address of an immutable entry: a pure function of its content.
    pub fn from_content(data: &[u8]) -> Self {
        Self(truncated_digest(blake3::hash(data)))
    }

    /// Address of a mutable entry: `digest(public_key ‖ salt)`.
    pub fn keyed(public_key: &[u8], salt: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(public_key);
        hasher.update(salt);
        Self(truncated_digest(hasher.finalize()))
    }

    /// Parse an address from its 40-character hex form.
    pub fn from_hex(s: &str) -> Result<Self, AddressParseError> {
        if s.len() != ADDRESS_HEX_LEN {
            return Err(AddressParseError::Length(s.len()));
        }
        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| AddressParseError::Encoding)?;
        Ok(Self(bytes))
    }

    /// Return the raw 20-byte representation.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

fn truncated_digest(hash: blake3::Hash) -> [u8; ADDRESS_LEN] {
    let mut out = [0u8; ADDRESS_LEN];
    out.copy_from_slice(&hash.as_bytes()[..ADDRESS_LEN]);
    out
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Addresses travel inside pointer envelopes as hex strings, so an address
// always serializes to exactly ADDRESS_HEX_LEN characters.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Errors from parsing a textual address.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressParseError {
    /// The input was not exactly [`ADDRESS_HEX_LEN`] characters.
    #[error("address must be {ADDRESS_HEX_LEN} hex chars, got {0}")]
    Length(usize),

    /// The input contained non-hex characters.
    #[error("address contains non-hex characters")]
    Encoding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_content_deterministic() {
        let a1 = Address::from_content(b"hello world");
        let a2 = Address::from_content(b"hello world");
        assert_eq!(a1, a2, "same content must produce same address");
    }

    #[test]
    fn test_from_content_different_data() {
        let a1 = Address::from_content(b"hello");
        let a2 = Address::from_content(b"world");
        assert_ne!(a1, a2);
    }

    #[test]
    fn test_keyed_depends_on_both_inputs() {
        let pk = [7u8; 32];
        let a1 = Address::keyed(&pk, b"salt-one");
        let a2 = Address::keyed(&pk, b"salt-two");
        let a3 = Address::keyed(&[8u8; 32], b"salt-one");
        assert_ne!(a1, a2);
        assert_ne!(a1, a3);
        assert_eq!(a1, Address::keyed(&pk, b"salt-one"));
    }

    #[test]
    fn test_display_is_fixed_width_hex() {
        let addr = Address::from_content(b"x");
        let hex = addr.to_string();
        assert_eq!(hex.len(), ADDRESS_HEX_LEN);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hex_roundtrip() {
        let addr = Address::from_content(b"roundtrip");
        let parsed = Address::from_hex(&addr.to_string()).unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn test_from_hex_rejects_bad_length() {
        assert_eq!(
            Address::from_hex("abcd").unwrap_err(),
            AddressParseError::Length(4)
        );
    }

    #[test]
    fn test_from_hex_rejects_non_hex() {
        let s = "zz".repeat(ADDRESS_LEN);
        assert_eq!(
            Address::from_hex(&s).unwrap_err(),
            AddressParseError::Encoding
        );
    }

    #[test]
    fn test_serde_as_hex_string() {
        let addr = Address::from_content(b"wire");
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json.len(), ADDRESS_HEX_LEN + 2, "hex plus two quotes");
        let parsed: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn test_debug_format() {
        let addr = Address::from([0u8; ADDRESS_LEN]);
        let debug = format!("{addr:?}");
        assert!(debug.starts_with("Address("));
        assert!(debug.ends_with(')'));
    }
}
