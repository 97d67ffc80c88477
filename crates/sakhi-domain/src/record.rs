//! Content records and their identifiers

use crate::content::ContentBody;
use crate::verification::{ContentStatus, Verification};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Unique identifier for a stored record, based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability for listing endpoints
/// - 128-bit uniqueness
/// - RFC 9562-standard format with broad ecosystem support
/// - No coordination required for distributed generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u128);

impl RecordId {
    /// Generate a new UUIDv7-based RecordId
    ///
    /// # Examples
    ///
    /// ```
    /// use sakhi_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RecordId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RecordId from a UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use sakhi_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// let parsed = RecordId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid record id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct RecordIdVisitor;

impl Visitor<'_> for RecordIdVisitor {
    type Value = RecordId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a UUID string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> {
        RecordId::from_string(v).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(RecordIdVisitor)
    }
}

/// Input to `ContentStore::create`: the author-supplied part of a record
///
/// Identity, timestamps, and the initial verification state are assigned by
/// the store; every new record starts in `AiVerifying`/`Pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDraft {
    /// The type-specific content fields
    pub body: ContentBody,

    /// Identifier of the authoring principal (already authenticated upstream)
    pub created_by: String,
}

/// A persisted piece of editorial content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Unique identifier
    pub id: RecordId,

    /// Type-specific content fields, in two language variants
    pub body: ContentBody,

    /// Publication status; only `Approved` records are publicly visible.
    /// Derived from `verification` for workflow-driven writes, but manual
    /// review may override it independently (last-write-wins).
    pub status: ContentStatus,

    /// Joint verification state (result + notes)
    pub verification: Verification,

    /// Identifier of the authoring principal
    pub created_by: String,

    /// Creation time (Unix epoch seconds)
    pub created_at: u64,

    /// Last update time (Unix epoch seconds)
    pub updated_at: u64,
}

impl ContentRecord {
    /// Whether the verification workflow has finished with this record
    pub fn is_terminal(&self) -> bool {
        self.verification.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_ordering() {
        let id1 = RecordId::from_value(1000);
        let id2 = RecordId::from_value(2000);

        assert!(id1 < id2);
        assert!(id2 > id1);
    }

    #[test]
    fn test_record_id_chronological() {
        // UUIDv7s generated in sequence should be chronologically ordered
        let id1 = RecordId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = RecordId::new();

        assert!(id1 < id2, "Earlier UUIDv7 should be less than later UUIDv7");
        assert!(id1.timestamp() <= id2.timestamp(), "Timestamps should be ordered");
    }

    #[test]
    fn test_record_id_display_and_parse() {
        let id = RecordId::new();
        let id_str = id.to_string();

        // UUID strings are 36 characters (8-4-4-4-12 with hyphens)
        assert_eq!(id_str.len(), 36);

        let parsed = RecordId::from_string(&id_str).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_record_id_invalid_string() {
        assert!(RecordId::from_string("not-a-valid-uuid").is_err());
        assert!(RecordId::from_string("").is_err());
    }

    #[test]
    fn test_record_id_serde_as_string() {
        let id = RecordId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));

        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
