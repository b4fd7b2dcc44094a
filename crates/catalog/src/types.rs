//! Core domain types for playlist curation.
//!
//! Everything here is plain data fetched fresh from the video platform on
//! every run. Nothing is persisted between runs.

use crate::duration::decode_duration;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

/// External identifier of a video (e.g. `"m3q8CjvK0i0"`).
///
/// A newtype rather than a bare `String` so video ids and playlist ids
/// cannot be swapped by accident.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of the destination playlist.
pub type PlaylistId = String;

/// Identifier of a created playlist entry, returned by an insertion.
pub type PlaylistItemId = String;

// =============================================================================
// Visibility
// =============================================================================

/// Privacy status of a video as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
}

impl Visibility {
    /// Parse the platform's `privacyStatus` string. Unknown values are `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Some(Visibility::Public),
            "unlisted" => Some(Visibility::Unlisted),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }

    pub fn is_private(self) -> bool {
        matches!(self, Visibility::Private)
    }
}

// =============================================================================
// Platform records
// =============================================================================

/// One row of a search response: identifier, title and channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub video_id: VideoId,
    pub title: String,
    pub channel: String,
}

impl SearchHit {
    pub fn new(
        video_id: impl Into<VideoId>,
        title: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            video_id: video_id.into(),
            title: title.into(),
            channel: channel.into(),
        }
    }
}

/// Detail lookup result for one video.
///
/// `duration` keeps the raw compact encoding (`"PT24M47S"`); decoding
/// happens when the detail is merged into a [`CandidateItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDetails {
    pub video_id: VideoId,
    pub duration: String,
    pub visibility: Option<Visibility>,
}

/// A fully described candidate video.
///
/// Built from a [`SearchHit`] and, when the detail lookup succeeded, a
/// [`VideoDetails`]. A missing detail leaves both `duration_secs` and
/// `visibility` as `None`, which every hard floor treats as a rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub video_id: VideoId,
    pub title: String,
    pub channel: String,
    /// Total seconds, `None` when the encoding was unknown or missing
    pub duration_secs: Option<u64>,
    pub visibility: Option<Visibility>,
}

impl CandidateItem {
    /// Build an item from a search hit, with no detail attached yet.
    pub fn from_hit(hit: SearchHit) -> Self {
        Self {
            video_id: hit.video_id,
            title: hit.title,
            channel: hit.channel,
            duration_secs: None,
            visibility: None,
        }
    }

    /// Attach a detail lookup result, decoding its duration.
    pub fn with_details(mut self, details: &VideoDetails) -> Self {
        self.duration_secs = decode_duration(&details.duration);
        self.visibility = details.visibility;
        self
    }

    /// Whether a detail lookup was merged into this item.
    pub fn has_details(&self) -> bool {
        self.visibility.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_parse() {
        assert_eq!(Visibility::parse("public"), Some(Visibility::Public));
        assert_eq!(Visibility::parse("Unlisted"), Some(Visibility::Unlisted));
        assert_eq!(Visibility::parse(" PRIVATE "), Some(Visibility::Private));
        assert_eq!(Visibility::parse("members-only"), None);
        assert!(Visibility::Private.is_private());
        assert!(!Visibility::Unlisted.is_private());
    }

    #[test]
    fn test_candidate_item_with_details() {
        let hit = SearchHit::new("abc123", "Surah Yasin", "Alafasy Official");
        let item = CandidateItem::from_hit(hit);
        assert!(!item.has_details());
        assert_eq!(item.duration_secs, None);

        let details = VideoDetails {
            video_id: VideoId::new("abc123"),
            duration: "PT24M47S".to_string(),
            visibility: Some(Visibility::Public),
        };
        let item = item.with_details(&details);

        assert!(item.has_details());
        assert_eq!(item.duration_secs, Some(1487));
        assert_eq!(item.visibility, Some(Visibility::Public));
    }

    #[test]
    fn test_candidate_item_with_malformed_duration() {
        let item = CandidateItem::from_hit(SearchHit::new("x", "t", "c")).with_details(
            &VideoDetails {
                video_id: VideoId::new("x"),
                duration: "P0D".to_string(),
                visibility: Some(Visibility::Public),
            },
        );
        assert_eq!(item.duration_secs, None);
        assert!(item.has_details());
    }

    #[test]
    fn test_video_id_display() {
        let id = VideoId::from("abc123");
        assert_eq!(id.to_string(), "abc123");
        assert_eq!(id.as_str(), "abc123");
    }
}
