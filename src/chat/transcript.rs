//! Client-side transcript persistence: a capped message cache and a
//! scroll-position snapshot, both stored as JSON blobs.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::ChatMessage;
use crate::error::{Error, Result};

/// Messages kept per cached transcript.
pub const MAX_TRANSCRIPT_ENTRIES: usize = 50;

/// Age after which a saved scroll position is ignored.
pub fn scroll_snapshot_ttl() -> Duration {
    Duration::hours(1)
}

/// The most recent messages of one chat, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptCache {
    entries: VecDeque<ChatMessage>,
    capacity: usize,
}

impl TranscriptCache {
    /// Create an empty cache holding [`MAX_TRANSCRIPT_ENTRIES`] messages.
    pub fn new() -> Self {
        Self::with_capacity(MAX_TRANSCRIPT_ENTRIES)
    }

    /// Create an empty cache holding at most `capacity` messages.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a message, evicting the oldest when full.
    pub fn push(&mut self, message: ChatMessage) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message);
    }

    /// Iterate over cached messages, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter()
    }

    /// Number of cached messages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of messages.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Remove all messages.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serialize for storage.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(store_error)
    }

    /// Restore from storage, re-applying the capacity.
    pub fn from_json(json: &str) -> Result<Self> {
        let stored: TranscriptCache =
            serde_json::from_str(json).map_err(store_error)?;
        let mut cache = Self::with_capacity(stored.capacity);
        for message in stored.entries {
            cache.push(message);
        }
        Ok(cache)
    }
}

fn store_error(e: serde_json::Error) -> Error {
    Error::Store(format!("transcript: {}", e))
}

impl Default for TranscriptCache {
    fn default() -> Self {
        Self::new()
    }
}

/// A saved scroll position of the transcript view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollSnapshot {
    /// Scroll offset in pixels from the top
    pub offset: u32,

    /// When the position was saved
    pub saved_at: DateTime<Utc>,
}

impl ScrollSnapshot {
    /// Snapshot `offset` now.
    pub fn new(offset: u32) -> Self {
        Self::at(offset, Utc::now())
    }

    /// Snapshot `offset` at a given time.
    pub fn at(offset: u32, saved_at: DateTime<Utc>) -> Self {
        Self { offset, saved_at }
    }

    /// Check if the snapshot is older than [`scroll_snapshot_ttl`] at `now`.
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.saved_at) > scroll_snapshot_ttl()
    }

    /// Offset to restore at `now`; `None` means scroll to the bottom.
    pub fn restore_offset(&self, now: DateTime<Utc>) -> Option<u32> {
        if self.is_stale_at(now) {
            None
        } else {
            Some(self.offset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_is_capped() {
        let mut cache = TranscriptCache::new();
        for i in 0..60 {
            cache.push(ChatMessage::user(format!("m{}", i)));
        }
        assert_eq!(cache.len(), MAX_TRANSCRIPT_ENTRIES);
        assert_eq!(cache.iter().next().unwrap().content, "m10");
        assert_eq!(cache.iter().last().unwrap().content, "m59");
    }

    #[test]
    fn test_cache_json_round_trip() {
        let mut cache = TranscriptCache::with_capacity(2);
        cache.push(ChatMessage::user("a"));
        cache.push(ChatMessage::assistant("b"));

        let json = cache.to_json().unwrap();
        let restored = TranscriptCache::from_json(&json).unwrap();
        assert_eq!(restored, cache);
        assert!(TranscriptCache::from_json("not json").is_err());
    }

    #[test]
    fn test_cache_json_errors_are_store_errors() {
        match TranscriptCache::from_json("{not json") {
            Err(Error::Store(msg)) => assert!(msg.starts_with("transcript: ")),
            other => panic!("expected store error, got {:?}", other),
        }

        let io = serde_json::Error::io(std::io::Error::other("disk full"));
        assert!(matches!(store_error(io), Error::Store(_)));
    }

    #[test]
    fn test_scroll_snapshot_staleness() {
        let saved = Utc::now();
        let snapshot = ScrollSnapshot::at(420, saved);

        let soon = saved + Duration::minutes(59);
        assert!(!snapshot.is_stale_at(soon));
        assert_eq!(snapshot.restore_offset(soon), Some(420));

        let later = saved + Duration::minutes(61);
        assert!(snapshot.is_stale_at(later));
        assert_eq!(snapshot.restore_offset(later), None);
    }
}
