//! Build a [`RunContext`] from the destination playlist.
//!
//! The playlist is listed once, page by page, before any filtering starts.
//! Every later duplicate check consults the resulting set.

use crate::types::RunContext;
use anyhow::{Context, Result};
use catalog::VideoId;
use tracing::{debug, info, instrument};
use youtube_client::VideoPlatform;

/// List every member of `playlist_id` and wrap them in a [`RunContext`].
///
/// Follows continuation tokens until the platform reports the last page. An
/// empty playlist yields an empty context.
#[instrument(skip(platform))]
pub async fn build_run_context(platform: &dyn VideoPlatform, playlist_id: &str) -> Result<RunContext> {
    let mut members: Vec<VideoId> = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = platform
            .playlist_page(playlist_id, page_token.as_deref())
            .await
            .with_context(|| format!("Listing playlist {} (page {})", playlist_id, pages + 1))?;
        pages += 1;
        debug!("Page {} held {} items", pages, page.video_ids.len());
        members.extend(page.video_ids);

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    let context = RunContext::new(playlist_id, members);
    info!(
        "Playlist {} has {} distinct members across {} pages",
        playlist_id,
        context.member_count(),
        pages
    );
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use youtube_client::InMemoryPlatform;

    #[tokio::test]
    async fn test_empty_playlist() {
        let platform = InMemoryPlatform::new();
        let context = build_run_context(&platform, "PL1").await.unwrap();
        assert_eq!(context.member_count(), 0);
        assert_eq!(platform.calls().page_requests, 1);
    }

    #[tokio::test]
    async fn test_follows_every_page() {
        let mut platform = InMemoryPlatform::new();
        for i in 0..130 {
            platform = platform.with_member(format!("v{i}"));
        }

        let context = build_run_context(&platform, "PL1").await.unwrap();

        assert_eq!(context.member_count(), 130);
        assert!(context.contains(&VideoId::new("v0")));
        assert!(context.contains(&VideoId::new("v129")));
        assert_eq!(platform.calls().page_requests, 3);
        assert_eq!(context.playlist_id, "PL1");
    }
}
