//! Video platform client for the playlist filler.
//!
//! This crate defines the [`VideoPlatform`] seam the rest of the workspace
//! talks to, and two implementations of it:
//! - [`YouTubeClient`]: the YouTube Data API v3 over HTTPS
//! - [`InMemoryPlatform`]: fixture-backed, for offline runs and tests
//!
//! It handles:
//! - Searching for videos by keyword
//! - Looking up duration and privacy status in batches of up to 50
//! - Listing playlist membership one page at a time
//! - Inserting a video into a playlist, classifying failures

use async_trait::async_trait;
use catalog::{PlaylistItemId, SearchHit, VideoDetails, VideoId};

pub mod client;
pub mod error;
pub mod memory;

pub use client::{YouTubeClient, DEFAULT_BASE_URL};
pub use error::PlatformError;
pub use memory::{CallLog, InMemoryPlatform, InsertFailure};

/// Largest batch the platform accepts for detail lookups and page listings.
pub const MAX_BATCH_SIZE: usize = 50;

/// One page of a playlist listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistPage {
    pub video_ids: Vec<VideoId>,
    /// Continuation token, `None` on the last page
    pub next_page_token: Option<String>,
}

/// The remote operations the playlist filler depends on.
///
/// ## Design Note
/// - `Send + Sync` so one client can be shared behind an `Arc`
/// - No retries here or in callers; a failure is reported once
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Search for videos matching `query`, returning at most `max_results`
    /// hits in the platform's relevance order.
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>, PlatformError>;

    /// Look up duration and privacy status for up to [`MAX_BATCH_SIZE`] ids.
    ///
    /// Ids the platform does not know are simply absent from the result.
    async fn video_details(&self, ids: &[VideoId]) -> Result<Vec<VideoDetails>, PlatformError>;

    /// Fetch one page (up to [`MAX_BATCH_SIZE`] ids) of a playlist.
    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, PlatformError>;

    /// Append `video_id` to the playlist, returning the new playlist item id.
    async fn insert_into_playlist(
        &self,
        playlist_id: &str,
        video_id: &VideoId,
    ) -> Result<PlaylistItemId, PlatformError>;
}
