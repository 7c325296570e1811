use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::CoreError;

/// Length of an [`ObjectId`] in raw bytes.
pub const OBJECT_ID_LEN: usize = 12;

/// A 12-byte document identifier, rendered as 24 hex characters.
///
/// Layout: 4-byte big-endian unix timestamp (seconds) followed by 8 random
/// bytes. Ordering is bytewise, so generated ids sort roughly by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

impl ObjectId {
    /// Generates a fresh id stamped with the current time.
    #[must_use]
    pub fn generate() -> Self {
        let secs = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let random = Uuid::new_v4();

        let mut bytes = [0u8; OBJECT_ID_LEN];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..].copy_from_slice(&random.as_bytes()[..8]);
        Self(bytes)
    }

    /// Creates an `ObjectId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; OBJECT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns `true` if `value` is exactly 24 ASCII hex digits.
    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        value.len() == OBJECT_ID_LEN * 2 && value.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for ObjectId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !Self::is_valid(s) {
            return Err(CoreError::InvalidObjectId { value: s.to_owned() });
        }
        let mut bytes = [0u8; OBJECT_ID_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &s[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| CoreError::InvalidObjectId { value: s.to_owned() })?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Unique identifier of a stored recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub ObjectId);

impl RecipeId {
    /// Creates a new random `RecipeId`.
    #[must_use]
    pub fn generate() -> Self {
        Self(ObjectId::generate())
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecipeId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Identifies a user; also the shape of a recipe's `author` reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub ObjectId);

impl UserId {
    /// Creates a new random `UserId`.
    #[must_use]
    pub fn generate() -> Self {
        Self(ObjectId::generate())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn object_id_display_is_24_lowercase_hex() {
        let id = ObjectId::from_bytes([0xab; OBJECT_ID_LEN]);
        assert_eq!(id.to_string(), "abababababababababababab");
    }

    #[test]
    fn object_id_parse_accepts_mixed_case() {
        let parsed: ObjectId = match "64B7F0C2A1d3e4f5a6b7c8d9".parse() {
            Ok(id) => id,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(parsed.to_string(), "64b7f0c2a1d3e4f5a6b7c8d9");
    }

    #[test]
    fn object_id_parse_rejects_wrong_length_and_non_hex() {
        assert!("".parse::<ObjectId>().is_err());
        assert!("abc".parse::<ObjectId>().is_err());
        assert!("64b7f0c2a1d3e4f5a6b7c8d9aa".parse::<ObjectId>().is_err());
        assert!("zzb7f0c2a1d3e4f5a6b7c8d9".parse::<ObjectId>().is_err());
        assert!("64b7f0c2a1d3e4f5a6b7c8d\u{e9}".parse::<ObjectId>().is_err());
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = RecipeId::generate();
        let b = RecipeId::generate();
        assert_ne!(a, b, "two generated ids must differ");
    }

    #[test]
    fn recipe_id_serializes_as_plain_string() {
        let id = RecipeId(ObjectId::from_bytes([1; OBJECT_ID_LEN]));
        let json = match serde_json::to_string(&id) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, "\"010101010101010101010101\"");
    }

    #[test]
    fn user_id_deserialize_rejects_malformed_string() {
        let result = serde_json::from_str::<UserId>("\"not-an-id\"");
        assert!(result.is_err(), "malformed id must not deserialize");
    }

    proptest! {
        #[test]
        fn display_then_parse_preserves_bytes(bytes in any::<[u8; 12]>()) {
            let id = ObjectId::from_bytes(bytes);
            let parsed: ObjectId = id.to_string().parse().map_err(|e| TestCaseError::fail(format!("{e}")))?;
            prop_assert_eq!(parsed, id);
        }

        #[test]
        fn strings_of_other_lengths_are_never_valid(s in "[0-9a-f]{0,23}|[0-9a-f]{25,40}") {
            prop_assert!(!ObjectId::is_valid(&s));
            prop_assert!(s.parse::<RecipeId>().is_err());
        }

        #[test]
        fn any_non_hex_character_is_rejected(prefix in "[0-9a-f]{0,23}", bad in "[g-zG-Z_ -]") {
            let mut s = prefix.clone();
            s.push_str(&bad);
            while s.len() < 24 {
                s.push('0');
            }
            prop_assert!(!ObjectId::is_valid(&s));
        }
    }
}
