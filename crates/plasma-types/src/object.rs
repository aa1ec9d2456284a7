use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque identifier for an object in a plasma store.
///
/// An `ObjectId` is exactly 20 bytes, globally unique within a store
/// instance. The store never interprets it; callers usually derive it from a
/// component uid or generate it randomly.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId([u8; Self::LEN]);

impl ObjectId {
    /// Identifier length in bytes.
    pub const LEN: usize = 20;

    /// Create an `ObjectId` from a fixed 20-byte array.
    pub const fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Create an `ObjectId` from a byte slice, which must be exactly 20 bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TypeError> {
        if data.len() != Self::LEN {
            return Err(TypeError::InvalidLength {
                expected: Self::LEN,
                actual: data.len(),
            });
        }
        let mut arr = [0u8; Self::LEN];
        arr.copy_from_slice(data);
        Ok(Self(arr))
    }

    /// Generate a random `ObjectId`.
    pub fn random() -> Self {
        let mut bytes = [0u8; Self::LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Derive an `ObjectId` from a component uid.
    ///
    /// A uid of exactly 20 ASCII characters is used byte-for-byte; anything
    /// else falls back to a random identifier.
    pub fn from_uid(uid: &str) -> Self {
        if uid.len() == Self::LEN && uid.is_ascii() {
            let mut arr = [0u8; Self::LEN];
            arr.copy_from_slice(uid.as_bytes());
            Self(arr)
        } else {
            Self::random()
        }
    }

    /// The raw 20 bytes.
    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Hex-encoded string representation (40 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.short_hex())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; ObjectId::LEN]> for ObjectId {
    fn from(bytes: [u8; ObjectId::LEN]) -> Self {
        Self(bytes)
    }
}

impl From<ObjectId> for [u8; ObjectId::LEN] {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_requires_exact_length() {
        assert!(ObjectId::from_bytes(&[1u8; 20]).is_ok());
        let err = ObjectId::from_bytes(&[1u8; 19]).unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 20,
                actual: 19
            }
        );
        assert!(ObjectId::from_bytes(&[1u8; 21]).is_err());
    }

    #[test]
    fn random_ids_differ() {
        let id1 = ObjectId::random();
        let id2 = ObjectId::random();
        assert_ne!(id1, id2);
    }

    #[test]
    fn from_uid_exact_ascii_is_deterministic() {
        let uid = "abcdefghij0123456789";
        assert_eq!(uid.len(), 20);
        let id1 = ObjectId::from_uid(uid);
        let id2 = ObjectId::from_uid(uid);
        assert_eq!(id1, id2);
        assert_eq!(id1.as_bytes(), uid.as_bytes());
    }

    #[test]
    fn from_uid_wrong_length_is_random() {
        let id1 = ObjectId::from_uid("short");
        let id2 = ObjectId::from_uid("short");
        assert_ne!(id1, id2);
    }

    #[test]
    fn from_uid_non_ascii_is_random() {
        // 20 bytes in UTF-8 but not ASCII
        let uid = "ééééé\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}";
        let id1 = ObjectId::from_uid(uid);
        let id2 = ObjectId::from_uid(uid);
        assert_ne!(id1, id2);
    }

    #[test]
    fn hex_roundtrip() {
        let id = ObjectId::new([0xab; 20]);
        let hex = id.to_hex();
        assert_eq!(hex.len(), 40);
        let parsed = ObjectId::from_hex(&hex).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(matches!(
            ObjectId::from_hex("zz"),
            Err(TypeError::InvalidHex(_))
        ));
        // valid hex, wrong length
        assert!(matches!(
            ObjectId::from_hex("abcd"),
            Err(TypeError::InvalidLength { .. })
        ));
    }

    #[test]
    fn short_hex_is_8_chars() {
        let id = ObjectId::new([0x01; 20]);
        assert_eq!(id.short_hex(), "01010101");
    }

    #[test]
    fn display_is_full_hex() {
        let id = ObjectId::new([0xff; 20]);
        let display = format!("{id}");
        assert_eq!(display.len(), 40);
        assert_eq!(display, id.to_hex());
    }

    #[test]
    fn serde_roundtrip() {
        let id = ObjectId::new([7u8; 20]);
        let json = serde_json::to_string(&id).unwrap();
        let parsed: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
