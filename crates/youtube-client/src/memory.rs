//! In-memory video platform.
//!
//! Serves canned search results, details and playlist membership, records
//! every call it receives, and can be told to fail specific insertions. Used
//! for offline rehearsal runs (`--fixtures`) and throughout the test suites.

use crate::error::PlatformError;
use crate::{PlaylistPage, VideoPlatform, MAX_BATCH_SIZE};
use anyhow::{Context, Result};
use async_trait::async_trait;
use catalog::{PlaylistItemId, SearchHit, VideoDetails, VideoId, Visibility};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// How a scripted insertion should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertFailure {
    NotFound,
    QuotaExceeded,
    /// Any non-transient failure (surfaces as `PlatformError::Api` 500)
    Backend,
}

impl InsertFailure {
    fn to_error(self, video_id: &VideoId) -> PlatformError {
        match self {
            InsertFailure::NotFound => PlatformError::NotFound(format!("video {video_id}")),
            InsertFailure::QuotaExceeded => PlatformError::QuotaExceeded("daily quota".into()),
            InsertFailure::Backend => PlatformError::Api {
                status: 500,
                reason: Some("backendError".into()),
                message: format!("backend failure inserting {video_id}"),
            },
        }
    }
}

/// Everything the platform was asked to do, in order.
#[derive(Debug, Default, Clone)]
pub struct CallLog {
    pub searches: Vec<String>,
    pub detail_batches: Vec<usize>,
    pub page_requests: usize,
    pub insert_attempts: Vec<VideoId>,
}

#[derive(Default)]
struct State {
    members: Vec<VideoId>,
    calls: CallLog,
    next_item: u64,
}

/// Fixture-backed [`VideoPlatform`].
#[derive(Default)]
pub struct InMemoryPlatform {
    searches: HashMap<String, Vec<SearchHit>>,
    fallback: Vec<SearchHit>,
    details: HashMap<VideoId, VideoDetails>,
    insert_failures: HashMap<VideoId, InsertFailure>,
    state: Mutex<State>,
}

impl InMemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Results returned for exactly `query`.
    pub fn with_search(mut self, query: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        self.searches.insert(query.into(), hits);
        self
    }

    /// Results returned for any query without its own entry.
    pub fn with_fallback_search(mut self, hits: Vec<SearchHit>) -> Self {
        self.fallback = hits;
        self
    }

    /// Detail record served for `video_id`.
    pub fn with_details(
        mut self,
        video_id: impl Into<VideoId>,
        duration: impl Into<String>,
        visibility: Visibility,
    ) -> Self {
        let video_id = video_id.into();
        self.details.insert(
            video_id.clone(),
            VideoDetails {
                video_id,
                duration: duration.into(),
                visibility: Some(visibility),
            },
        );
        self
    }

    /// Pre-existing playlist member.
    pub fn with_member(self, video_id: impl Into<VideoId>) -> Self {
        self.lock().members.push(video_id.into());
        self
    }

    /// Make every insertion of `video_id` fail with `failure`.
    pub fn fail_insert(mut self, video_id: impl Into<VideoId>, failure: InsertFailure) -> Self {
        self.insert_failures.insert(video_id.into(), failure);
        self
    }

    /// Load a platform from a JSON fixture file.
    ///
    /// ```json
    /// {
    ///   "searches": {"surah yasin recitation": [{"video_id": "a", "title": "..", "channel": ".."}]},
    ///   "fallback": [],
    ///   "details": [{"video_id": "a", "duration": "PT20M", "visibility": "public"}],
    ///   "members": ["b"]
    /// }
    /// ```
    pub fn from_fixture_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Reading fixture file {}", path.display()))?;
        let fixture: Fixture = serde_json::from_str(&text)
            .with_context(|| format!("Parsing fixture file {}", path.display()))?;

        let mut platform = Self::new().with_fallback_search(fixture.fallback);
        platform.searches = fixture.searches;
        platform.details = fixture
            .details
            .into_iter()
            .map(|d| (d.video_id.clone(), d))
            .collect();
        platform.lock().members = fixture.members;
        Ok(platform)
    }

    /// Snapshot of the calls received so far.
    pub fn calls(&self) -> CallLog {
        self.lock().calls.clone()
    }

    /// Successfully inserted videos, excluding pre-existing members.
    pub fn inserted(&self) -> Vec<VideoId> {
        let state = self.lock();
        state
            .calls
            .insert_attempts
            .iter()
            .filter(|id| !self.insert_failures.contains_key(*id))
            .cloned()
            .collect()
    }

    /// Current playlist contents.
    pub fn members(&self) -> Vec<VideoId> {
        self.lock().members.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl VideoPlatform for InMemoryPlatform {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>, PlatformError> {
        self.lock().calls.searches.push(query.to_string());
        let hits = self.searches.get(query).unwrap_or(&self.fallback);
        Ok(hits.iter().take(max_results as usize).cloned().collect())
    }

    async fn video_details(&self, ids: &[VideoId]) -> Result<Vec<VideoDetails>, PlatformError> {
        if ids.len() > MAX_BATCH_SIZE {
            return Err(PlatformError::BatchTooLarge {
                requested: ids.len(),
                max: MAX_BATCH_SIZE,
            });
        }
        self.lock().calls.detail_batches.push(ids.len());
        Ok(ids
            .iter()
            .filter_map(|id| self.details.get(id).cloned())
            .collect())
    }

    async fn playlist_page(
        &self,
        _playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, PlatformError> {
        let offset = match page_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| PlatformError::InvalidResponse(format!("bad page token {token:?}")))?,
            None => 0,
        };
        let mut state = self.lock();
        state.calls.page_requests += 1;
        let end = (offset + MAX_BATCH_SIZE).min(state.members.len());
        let video_ids = state.members.get(offset..end).unwrap_or_default().to_vec();
        let next_page_token = (end < state.members.len()).then(|| end.to_string());
        Ok(PlaylistPage {
            video_ids,
            next_page_token,
        })
    }

    async fn insert_into_playlist(
        &self,
        _playlist_id: &str,
        video_id: &VideoId,
    ) -> Result<PlaylistItemId, PlatformError> {
        let mut state = self.lock();
        state.calls.insert_attempts.push(video_id.clone());
        if let Some(failure) = self.insert_failures.get(video_id) {
            return Err(failure.to_error(video_id));
        }
        state.members.push(video_id.clone());
        state.next_item += 1;
        Ok(format!("item-{}", state.next_item))
    }
}

#[derive(Deserialize)]
struct Fixture {
    #[serde(default)]
    searches: HashMap<String, Vec<SearchHit>>,
    #[serde(default)]
    fallback: Vec<SearchHit>,
    #[serde(default)]
    details: Vec<VideoDetails>,
    #[serde(default)]
    members: Vec<VideoId>,
}
