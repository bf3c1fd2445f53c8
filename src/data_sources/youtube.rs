//! YouTube Data API v3 client.
//!
//! Reads public channel statistics (subscriber count and lifetime views)
//! with an API key. No OAuth is involved.
//!
//! # API Reference
//!
//! See: <https://developers.google.com/youtube/v3/docs/channels/list>

use async_trait::async_trait;
use serde::Deserialize;

use super::http::{decode_json, send_text};
use super::{AdapterContext, StatsProvider};
use crate::cache::TtlCache;
use crate::error::SourceError;
use crate::model::ChannelStats;

/// Base URL for the YouTube Data API.
const YOUTUBE_DATA_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Client for a single channel's statistics.
#[derive(Clone)]
pub struct YouTubeStatsClient {
    ctx: AdapterContext,
    base_url: String,
    api_key: String,
    channel_id: String,
    cache: TtlCache<ChannelStats>,
}

impl YouTubeStatsClient {
    pub fn new(ctx: AdapterContext, api_key: &str, channel_id: &str) -> Self {
        Self::with_base_url(ctx, YOUTUBE_DATA_API_BASE, api_key, channel_id)
    }

    /// Create a client with a custom base URL (for testing).
    pub fn with_base_url(ctx: AdapterContext, base_url: &str, api_key: &str, channel_id: &str) -> Self {
        Self {
            cache: TtlCache::new(ctx.cache_ttl),
            ctx,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            channel_id: channel_id.to_string(),
        }
    }

    /// Fetch subscriber and lifetime view counts, served from cache when fresh.
    ///
    /// An unknown channel id (empty `items`) and a rejected key (HTTP 400)
    /// both fail with `NotFound`.
    pub async fn get_channel_stats(&self) -> Result<ChannelStats, SourceError> {
        let key = format!("channel_stats:{}", self.channel_id);
        self.cache
            .get_or_try_insert_with(&key, || self.fetch_channel_stats())
            .await
    }

    async fn fetch_channel_stats(&self) -> Result<ChannelStats, SourceError> {
        let url = format!("{}/channels", self.base_url);
        let request = self.ctx.http.get(&url).query(&[
            ("part", "statistics"),
            ("id", self.channel_id.as_str()),
            ("key", self.api_key.as_str()),
        ]);

        let (status, body) = send_text(request, "youtube channels", &self.ctx.retry).await?;
        if status == reqwest::StatusCode::BAD_REQUEST {
            return Err(SourceError::NotFound(
                "YouTube rejected the API key or channel id".to_string(),
            ));
        }

        let response: ChannelListResponse = decode_json(status, &body, "youtube channels")?;
        response.into_stats(&self.channel_id)
    }
}

#[async_trait]
impl StatsProvider for YouTubeStatsClient {
    async fn channel_stats(&self) -> Result<ChannelStats, SourceError> {
        self.get_channel_stats().await
    }
}

// ============================================================================
// Response types
// ============================================================================

/// Response from `channels.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelItem {
    #[serde(default)]
    pub statistics: Option<ChannelStatistics>,
}

/// Counts arrive as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelStatistics {
    #[serde(default, rename = "subscriberCount")]
    pub subscriber_count: Option<String>,

    #[serde(default, rename = "viewCount")]
    pub view_count: Option<String>,

    #[serde(default, rename = "hiddenSubscriberCount")]
    pub hidden_subscriber_count: bool,
}

impl ChannelListResponse {
    /// Normalize the first item into [`ChannelStats`].
    pub fn into_stats(self, channel_id: &str) -> Result<ChannelStats, SourceError> {
        let item = self
            .items
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::NotFound(format!("channel {}", channel_id)))?;

        let stats = item
            .statistics
            .ok_or_else(|| SourceError::Malformed("channel has no statistics part".to_string()))?;

        Ok(ChannelStats {
            subscriber_count: parse_count(stats.subscriber_count.as_deref(), "subscriberCount")?,
            lifetime_view_count: parse_count(stats.view_count.as_deref(), "viewCount")?,
        })
    }
}

fn parse_count(raw: Option<&str>, field: &str) -> Result<u64, SourceError> {
    match raw {
        None => Ok(0),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| SourceError::Malformed(format!("{} is not a count: {:?}", field, value))),
    }
}
