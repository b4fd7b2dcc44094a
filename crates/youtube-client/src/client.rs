//! HTTPS client for the YouTube Data API v3.
//!
//! Only the four calls the playlist filler needs are implemented:
//! `search.list`, `videos.list`, `playlistItems.list` and
//! `playlistItems.insert`. Authentication is a bearer access token supplied
//! by the caller; refreshing it is somebody else's job.

use crate::error::PlatformError;
use crate::{PlaylistPage, VideoPlatform, MAX_BATCH_SIZE};
use async_trait::async_trait;
use catalog::{PlaylistItemId, SearchHit, VideoDetails, VideoId, Visibility};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Public endpoint of the Data API.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Client for the YouTube Data API.
#[derive(Clone)]
pub struct YouTubeClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl YouTubeClient {
    /// Build a client that authenticates with `access_token`.
    pub fn new(access_token: impl Into<String>) -> Result<Self, PlatformError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("playlist-filler/", env!("CARGO_PKG_VERSION")))
            .build()?;
        info!("YouTube client ready");
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: access_token.into(),
        })
    }

    /// Point the client at another API root (e.g. a local proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, resource: &str) -> RequestBuilder {
        self.http
            .get(format!("{}/{}", self.base_url, resource))
            .bearer_auth(&self.access_token)
    }

    /// Send a request and decode a successful JSON body.
    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, PlatformError> {
        let response = Self::check_status(request.send().await?).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            error!("Failed to decode platform response: {}", e);
            PlatformError::InvalidResponse(e.to_string())
        })
    }

    async fn check_status(response: Response) -> Result<Response, PlatformError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = PlatformError::from_response(status.as_u16(), &body);
        debug!("Platform error ({}): {}", status, err);
        Err(err)
    }
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>, PlatformError> {
        let max_results = max_results.clamp(1, MAX_BATCH_SIZE as u32).to_string();
        let request = self.get("search").query(&[
            ("part", "snippet"),
            ("type", "video"),
            ("q", query),
            ("maxResults", max_results.as_str()),
        ]);
        let response: SearchResponse = Self::send_json(request).await?;

        let hits: Vec<SearchHit> = response
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                let snippet = item.snippet.unwrap_or_default();
                Some(SearchHit::new(video_id, snippet.title, snippet.channel_title))
            })
            .collect();
        debug!("Search returned {} hits", hits.len());
        Ok(hits)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn video_details(&self, ids: &[VideoId]) -> Result<Vec<VideoDetails>, PlatformError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        if ids.len() > MAX_BATCH_SIZE {
            return Err(PlatformError::BatchTooLarge {
                requested: ids.len(),
                max: MAX_BATCH_SIZE,
            });
        }
        let joined = ids.iter().map(VideoId::as_str).collect::<Vec<_>>().join(",");
        let request = self
            .get("videos")
            .query(&[("part", "contentDetails,status"), ("id", joined.as_str())]);
        let response: VideosResponse = Self::send_json(request).await?;

        Ok(response
            .items
            .into_iter()
            .map(|item| VideoDetails {
                video_id: VideoId::new(item.id),
                duration: item
                    .content_details
                    .map(|c| c.duration)
                    .unwrap_or_default(),
                visibility: item
                    .status
                    .and_then(|s| Visibility::parse(&s.privacy_status)),
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, PlatformError> {
        let page_size = MAX_BATCH_SIZE.to_string();
        let mut request = self.get("playlistItems").query(&[
            ("part", "contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", page_size.as_str()),
        ]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }
        let response: PlaylistItemsResponse = Self::send_json(request).await?;

        Ok(PlaylistPage {
            video_ids: response
                .items
                .into_iter()
                .map(|item| VideoId::new(item.content_details.video_id))
                .collect(),
            next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    #[instrument(skip(self))]
    async fn insert_into_playlist(
        &self,
        playlist_id: &str,
        video_id: &VideoId,
    ) -> Result<PlaylistItemId, PlatformError> {
        let body = json!({
            "snippet": {
                "playlistId": playlist_id,
                "resourceId": {
                    "kind": "youtube#video",
                    "videoId": video_id.as_str(),
                }
            }
        });
        let request = self
            .http
            .post(format!("{}/playlistItems", self.base_url))
            .bearer_auth(&self.access_token)
            .query(&[("part", "snippet")])
            .json(&body);
        let response: InsertResponse = Self::send_json(request).await?;
        info!("Inserted {} as playlist item {}", video_id, response.id);
        Ok(response.id)
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Option<Snippet>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
}

#[derive(Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    content_details: Option<ContentDetails>,
    status: Option<Status>,
}

#[derive(Deserialize)]
struct ContentDetails {
    #[serde(default)]
    duration: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Status {
    #[serde(default)]
    privacy_status: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItem {
    content_details: PlaylistItemContentDetails,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemContentDetails {
    video_id: String,
}

#[derive(Deserialize)]
struct InsertResponse {
    id: String,
}
