//! Types shared by candidate sourcing and the filter pipeline.

use catalog::{CandidateItem, PlaylistId, SearchHit, VideoId};
use std::collections::HashSet;

/// Which kind of query produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// General query not tied to a creator
    Broad,
    /// Creator × topic query
    Boosted,
    /// Randomly chosen creator × topic query
    Random,
}

/// A candidate video plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub item: CandidateItem,
    pub source: CandidateSource,
    /// The query text that surfaced this candidate
    pub query: String,
    /// Position in the overall discovery sequence, used for stable ranking
    pub discovery_order: usize,
}

impl Candidate {
    pub fn new(
        hit: SearchHit,
        source: CandidateSource,
        query: impl Into<String>,
        discovery_order: usize,
    ) -> Self {
        Self {
            item: CandidateItem::from_hit(hit),
            source,
            query: query.into(),
            discovery_order,
        }
    }

    pub fn video_id(&self) -> &VideoId {
        &self.item.video_id
    }

    pub fn title(&self) -> &str {
        &self.item.title
    }

    pub fn channel(&self) -> &str {
        &self.item.channel
    }
}

/// Per-run state: the destination playlist and what it already holds.
///
/// The membership set is captured once before any filtering starts. Items
/// accepted during the run are added to it immediately through
/// [`RunContext::record_accepted`], so nothing is selected twice.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub playlist_id: PlaylistId,
    members: HashSet<VideoId>,
    accepted: Vec<VideoId>,
}

impl RunContext {
    pub fn new(playlist_id: impl Into<PlaylistId>, members: impl IntoIterator<Item = VideoId>) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            members: members.into_iter().collect(),
            accepted: Vec::new(),
        }
    }

    /// Whether `video_id` is already in the playlist or was accepted this run.
    pub fn contains(&self, video_id: &VideoId) -> bool {
        self.members.contains(video_id)
    }

    /// Mark `video_id` as taken. Returns `false` if it already was.
    pub fn record_accepted(&mut self, video_id: VideoId) -> bool {
        if self.members.insert(video_id.clone()) {
            self.accepted.push(video_id);
            true
        } else {
            false
        }
    }

    /// Items accepted during this run, in acceptance order.
    pub fn accepted(&self) -> &[VideoId] {
        &self.accepted
    }

    /// Every known member, in no particular order.
    pub fn members(&self) -> impl Iterator<Item = &VideoId> {
        self.members.iter()
    }

    /// Size of the membership set, including items accepted this run.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_context_membership() {
        let mut context = RunContext::new("PL1", vec![VideoId::new("abc123")]);

        assert!(context.contains(&VideoId::new("abc123")));
        assert!(!context.contains(&VideoId::new("def456")));

        assert!(context.record_accepted(VideoId::new("def456")));
        assert!(context.contains(&VideoId::new("def456")));
        assert!(!context.record_accepted(VideoId::new("def456")));
        assert!(!context.record_accepted(VideoId::new("abc123")));

        assert_eq!(context.accepted(), [VideoId::new("def456")]);
        assert_eq!(context.member_count(), 2);
    }

    #[test]
    fn test_candidate_accessors() {
        let candidate = Candidate::new(
            SearchHit::new("abc123", "Surah Yasin", "Alafasy Official"),
            CandidateSource::Broad,
            "surah yasin recitation",
            0,
        );
        assert_eq!(candidate.video_id(), &VideoId::new("abc123"));
        assert_eq!(candidate.title(), "Surah Yasin");
        assert_eq!(candidate.channel(), "Alafasy Official");
        assert!(!candidate.item.has_details());
    }
}
