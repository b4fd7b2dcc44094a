//! Insertion driver.
//!
//! Appends selected videos to the destination playlist one at a time,
//! consulting the duplicate guard before every call.
//!
//! ## Failure classification
//! - Not found: the video is skipped and the next one is tried
//! - Quota exceeded: no further insertions are attempted this run
//! - Anything else: the run fails with [`SelectorError::Insertion`]

use catalog::{PlaylistItemId, VideoId};
use sources::RunContext;
use tracing::{error, info, warn};

use crate::error::{Result, SelectorError};
use crate::orchestrator::{SelectedVideo, SelectionOrchestrator};

/// Result of a single insertion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Added(PlaylistItemId),
    /// The guard found it in the playlist already; no call was made
    AlreadyPresent,
    NotFound,
    QuotaExceeded,
}

/// A video that made it into the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedVideo {
    pub video: SelectedVideo,
    pub item_id: PlaylistItemId,
}

/// What happened to each selected video.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertionReport {
    pub added: Vec<InsertedVideo>,
    pub skipped_present: Vec<VideoId>,
    pub skipped_not_found: Vec<VideoId>,
    /// Left untouched after the quota ran out
    pub not_attempted: Vec<VideoId>,
    pub halted_on_quota: bool,
}

impl SelectionOrchestrator {
    /// Insert one video, guarded against duplicates.
    ///
    /// On success the id is recorded in `context` before returning.
    pub async fn insert_video(
        &self,
        context: &mut RunContext,
        video_id: &VideoId,
    ) -> Result<InsertOutcome> {
        if context.contains(video_id) {
            warn!("{} is already in playlist {}, skipping", video_id, context.playlist_id);
            return Ok(InsertOutcome::AlreadyPresent);
        }

        match self
            .platform
            .insert_into_playlist(&context.playlist_id, video_id)
            .await
        {
            Ok(item_id) => {
                context.record_accepted(video_id.clone());
                info!("Added {} to playlist (item {})", video_id, item_id);
                Ok(InsertOutcome::Added(item_id))
            }
            Err(e) if e.is_not_found() => {
                warn!("{} could not be added: {}", video_id, e);
                Ok(InsertOutcome::NotFound)
            }
            Err(e) if e.is_quota_exceeded() => {
                error!("Quota exhausted while adding {}: {}", video_id, e);
                Ok(InsertOutcome::QuotaExceeded)
            }
            Err(source) => Err(SelectorError::Insertion {
                video_id: video_id.clone(),
                source,
            }),
        }
    }

    /// Insert `videos` in order, stopping early if the quota runs out.
    pub async fn insert_selected(
        &self,
        context: &mut RunContext,
        videos: Vec<SelectedVideo>,
    ) -> Result<InsertionReport> {
        let mut report = InsertionReport::default();
        let mut pending = videos.into_iter();

        while let Some(video) = pending.next() {
            match self.insert_video(context, &video.video_id).await? {
                InsertOutcome::Added(item_id) => report.added.push(InsertedVideo { video, item_id }),
                InsertOutcome::AlreadyPresent => report.skipped_present.push(video.video_id),
                InsertOutcome::NotFound => report.skipped_not_found.push(video.video_id),
                InsertOutcome::QuotaExceeded => {
                    report.halted_on_quota = true;
                    report.not_attempted = pending.by_ref().map(|v| v.video_id).collect();
                    break;
                }
            }
        }

        info!(
            "Insertion finished: {} added, {} not found, {} already present{}",
            report.added.len(),
            report.skipped_not_found.len(),
            report.skipped_present.len(),
            if report.halted_on_quota { ", halted on quota" } else { "" }
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectionConfig;
    use catalog::PreferenceRules;
    use sources::CandidateSource;
    use std::sync::Arc;
    use youtube_client::{InMemoryPlatform, InsertFailure};

    fn selected(id: &str) -> SelectedVideo {
        SelectedVideo {
            video_id: VideoId::new(id),
            title: format!("Title {id}"),
            channel: "Channel".into(),
            duration_secs: Some(1500),
            score: 0,
            source: CandidateSource::Broad,
            query: "q".into(),
        }
    }

    fn orchestrator(platform: Arc<InMemoryPlatform>) -> SelectionOrchestrator {
        SelectionOrchestrator::new(
            platform,
            Arc::new(PreferenceRules::default()),
            SelectionConfig::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_guard_blocks_present_video() {
        let platform = Arc::new(InMemoryPlatform::new());
        let orchestrator = orchestrator(platform.clone());
        let mut context = RunContext::new("PL1", vec![VideoId::new("abc123")]);

        let outcome = orchestrator
            .insert_video(&mut context, &VideoId::new("abc123"))
            .await
            .unwrap();

        assert_eq!(outcome, InsertOutcome::AlreadyPresent);
        assert!(platform.calls().insert_attempts.is_empty());
    }

    #[tokio::test]
    async fn test_duplicates_within_one_batch_are_inserted_once() {
        let platform = Arc::new(InMemoryPlatform::new());
        let orchestrator = orchestrator(platform.clone());
        let mut context = RunContext::new("PL1", Vec::new());

        let report = orchestrator
            .insert_selected(&mut context, vec![selected("a"), selected("a"), selected("b")])
            .await
            .unwrap();

        assert_eq!(report.added.len(), 2);
        assert_eq!(report.added[0].item_id, "item-1");
        assert_eq!(report.skipped_present, vec![VideoId::new("a")]);
        assert_eq!(context.accepted(), [VideoId::new("a"), VideoId::new("b")]);
        assert_eq!(platform.calls().insert_attempts.len(), 2);
    }

    #[tokio::test]
    async fn test_quota_leaves_rest_untouched() {
        let platform = Arc::new(
            InMemoryPlatform::new().fail_insert("b", InsertFailure::QuotaExceeded),
        );
        let orchestrator = orchestrator(platform.clone());
        let mut context = RunContext::new("PL1", Vec::new());

        let report = orchestrator
            .insert_selected(
                &mut context,
                vec![selected("a"), selected("b"), selected("c"), selected("d")],
            )
            .await
            .unwrap();

        assert!(report.halted_on_quota);
        assert_eq!(report.added.len(), 1);
        assert_eq!(report.not_attempted, vec![VideoId::new("c"), VideoId::new("d")]);
        assert!(!context.contains(&VideoId::new("b")));
    }

    #[tokio::test]
    async fn test_not_found_is_skipped() {
        let platform = Arc::new(InMemoryPlatform::new().fail_insert("a", InsertFailure::NotFound));
        let orchestrator = orchestrator(platform.clone());
        let mut context = RunContext::new("PL1", Vec::new());

        let report = orchestrator
            .insert_selected(&mut context, vec![selected("a"), selected("b")])
            .await
            .unwrap();

        assert_eq!(report.skipped_not_found, vec![VideoId::new("a")]);
        assert_eq!(report.added.len(), 1);
        assert_eq!(report.added[0].video.video_id, VideoId::new("b"));
        assert!(!report.halted_on_quota);
        assert_eq!(context.accepted(), [VideoId::new("b")]);
    }

    #[tokio::test]
    async fn test_other_failures_are_fatal() {
        let platform = Arc::new(InMemoryPlatform::new().fail_insert("b", InsertFailure::Backend));
        let orchestrator = orchestrator(platform.clone());
        let mut context = RunContext::new("PL1", Vec::new());

        let err = orchestrator
            .insert_selected(&mut context, vec![selected("a"), selected("b"), selected("c")])
            .await
            .unwrap_err();

        match err {
            SelectorError::Insertion { video_id, .. } => assert_eq!(video_id, VideoId::new("b")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(context.accepted(), [VideoId::new("a")]);
        assert_eq!(platform.calls().insert_attempts.len(), 2);
    }
}
