//! Clip catalog records and client-facing descriptors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog-assigned clip identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(pub i64);

impl ClipId {
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ClipId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Error returned when a string is not a valid clip id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid clip id: {0:?}")]
pub struct ClipIdError(pub String);

impl FromStr for ClipId {
    type Err = ClipIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(ClipId)
            .map_err(|_| ClipIdError(s.to_string()))
    }
}

/// A clip row as stored in the relational catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRecord {
    pub id: ClipId,
    /// Client that uploaded the clip.
    pub owner_client_id: String,
    /// Object key of the backing audio file. Never empty.
    pub storage_key: String,
    pub sentence_text: String,
    pub original_sentence_id: String,
    /// Opaque classification tag.
    pub taxonomy: Option<serde_json::Value>,
}

impl ClipRecord {
    /// Sentence reference carried by the descriptor built from this record.
    pub fn sentence(&self) -> SentenceRef {
        SentenceRef {
            id: self.original_sentence_id.clone(),
            text: self.sentence_text.clone(),
            taxonomy: self.taxonomy.clone(),
        }
    }
}

/// Sentence attached to a clip descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRef {
    pub id: String,
    pub text: String,
    pub taxonomy: Option<serde_json::Value>,
}

/// Playable clip metadata handed to the client.
///
/// Built fresh per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipDescriptor {
    pub id: String,
    /// Storage key without its media extension.
    pub glob: String,
    pub sentence: SentenceRef,
    /// Time-limited playback URL.
    pub audio_src: String,
}

impl ClipDescriptor {
    /// Build a descriptor for a validated record.
    pub fn from_record(record: &ClipRecord, media_suffix: &str, audio_src: String) -> Self {
        Self {
            id: record.id.to_string(),
            glob: strip_media_suffix(&record.storage_key, media_suffix).to_string(),
            sentence: record.sentence(),
            audio_src,
        }
    }
}

/// Remove a trailing media extension from a storage key.
///
/// Only a suffix is removed; occurrences elsewhere in the key are kept.
pub fn strip_media_suffix<'a>(key: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return key;
    }
    key.strip_suffix(suffix).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ClipRecord {
        ClipRecord {
            id: ClipId(42),
            owner_client_id: "owner-1".to_string(),
            storage_key: "owner-1/abc123.mp3".to_string(),
            sentence_text: "The quick brown fox.".to_string(),
            original_sentence_id: "abc123".to_string(),
            taxonomy: Some(serde_json::json!({ "source": "wikipedia" })),
        }
    }

    #[test]
    fn test_strip_media_suffix() {
        assert_eq!(strip_media_suffix("a/b.mp3", ".mp3"), "a/b");
        assert_eq!(strip_media_suffix("a/b.wav", ".mp3"), "a/b.wav");
        assert_eq!(strip_media_suffix("a.mp3/b.mp3", ".mp3"), "a.mp3/b");
        assert_eq!(strip_media_suffix("a/b.mp3", ""), "a/b.mp3");
    }

    #[test]
    fn test_clip_id_parse() {
        assert_eq!("17".parse::<ClipId>(), Ok(ClipId(17)));
        assert_eq!(" 17 ".parse::<ClipId>(), Ok(ClipId(17)));
        assert!("abc".parse::<ClipId>().is_err());
        assert!("".parse::<ClipId>().is_err());
    }

    #[test]
    fn test_descriptor_from_record() {
        let descriptor =
            ClipDescriptor::from_record(&record(), ".mp3", "https://signed/url".to_string());

        assert_eq!(descriptor.id, "42");
        assert_eq!(descriptor.glob, "owner-1/abc123");
        assert_eq!(descriptor.sentence.id, "abc123");
        assert_eq!(descriptor.sentence.text, "The quick brown fox.");
        assert_eq!(descriptor.audio_src, "https://signed/url");
    }

    #[test]
    fn test_descriptor_wire_names() {
        let mut rec = record();
        rec.taxonomy = None;
        let descriptor = ClipDescriptor::from_record(&rec, ".mp3", "u".to_string());
        let json = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(json["audioSrc"], "u");
        assert_eq!(json["sentence"]["id"], "abc123");
        assert!(json["sentence"]["taxonomy"].is_null());
        assert!(json.get("audio_src").is_none());
    }
}
