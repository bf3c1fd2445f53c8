//! TikTok Business API client.
//!
//! Every response is HTTP 200 with an envelope; a nonzero `code` is the
//! real error signal.
//!
//! # API Reference
//!
//! See: <https://business-api.tiktok.com/portal/docs?id=1765938734186498>

use async_trait::async_trait;
use serde::Deserialize;

use super::http::send_json;
use super::{AdapterContext, SocialProvider};
use crate::cache::TtlCache;
use crate::daily::ReportingWindow;
use crate::error::SourceError;
use crate::model::SocialStats;

/// Base URL for the TikTok Business API.
const TIKTOK_API_BASE: &str = "https://business-api.tiktok.com/open_api/v1.3";

/// Envelope codes for a rejected or expired access token.
const AUTH_ERROR_CODES: &[i64] = &[40001, 40104, 40105];

/// Too many requests.
const RATE_LIMIT_CODE: i64 = 40100;

#[derive(Clone)]
pub struct TikTokClient {
    ctx: AdapterContext,
    base_url: String,
    access_token: String,
    business_id: String,
    cache: TtlCache<SocialStats>,
}

impl TikTokClient {
    pub fn new(ctx: AdapterContext, access_token: &str, business_id: &str) -> Self {
        Self::with_base_url(ctx, TIKTOK_API_BASE, access_token, business_id)
    }

    /// Create a client with a custom base URL (for testing).
    pub fn with_base_url(
        ctx: AdapterContext,
        base_url: &str,
        access_token: &str,
        business_id: &str,
    ) -> Self {
        Self {
            cache: TtlCache::new(ctx.cache_ttl),
            ctx,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            business_id: business_id.to_string(),
        }
    }

    pub async fn get_stats(&self, window: ReportingWindow) -> Result<SocialStats, SourceError> {
        let key = format!("tiktok:{}:{}:{}", self.business_id, window.start, window.end);
        self.cache
            .get_or_try_insert_with(&key, || self.fetch_stats(window))
            .await
    }

    async fn fetch_stats(&self, window: ReportingWindow) -> Result<SocialStats, SourceError> {
        let url = format!("{}/business/get/", self.base_url);
        let fields = r#"["followers_count","video_views"]"#;
        let start = window.start.format("%Y-%m-%d").to_string();
        let end = window.end.format("%Y-%m-%d").to_string();

        let request = self
            .ctx
            .http
            .get(&url)
            .header("Access-Token", &self.access_token)
            .query(&[
                ("business_id", self.business_id.as_str()),
                ("start_date", start.as_str()),
                ("end_date", end.as_str()),
                ("fields", fields),
            ]);

        let envelope: Envelope = send_json(request, "tiktok business", &self.ctx.retry).await?;
        envelope.into_stats()
    }
}

#[async_trait]
impl SocialProvider for TikTokClient {
    async fn social_stats(&self, window: ReportingWindow) -> Result<SocialStats, SourceError> {
        self.get_stats(window).await
    }
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<BusinessData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusinessData {
    /// Daily rows; account-level fields repeat on each.
    #[serde(default)]
    pub metrics: Vec<DailyMetrics>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyMetrics {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub video_views: u64,
}

impl Envelope {
    pub fn into_stats(self) -> Result<SocialStats, SourceError> {
        if self.code != 0 {
            return Err(classify_code(self.code, &self.message));
        }

        let data = self
            .data
            .ok_or_else(|| SourceError::Malformed("tiktok response has no data".to_string()))?;

        // The newest row carries the current follower count.
        let followers = data
            .metrics
            .iter()
            .filter_map(|m| m.followers_count.map(|f| (m.date.as_deref().unwrap_or(""), f)))
            .max_by(|a, b| a.0.cmp(b.0))
            .map(|(_, f)| f)
            .unwrap_or(0);

        let views_7d = data
            .metrics
            .iter()
            .fold(0u64, |acc, m| acc.saturating_add(m.video_views));

        Ok(SocialStats { followers, views_7d })
    }
}

fn classify_code(code: i64, message: &str) -> SourceError {
    let detail = format!("tiktok code {}: {}", code, message);
    if code == RATE_LIMIT_CODE || code >= 50000 {
        SourceError::Unavailable(detail)
    } else if AUTH_ERROR_CODES.contains(&code) {
        SourceError::Unauthorized(detail)
    } else {
        SourceError::Malformed(detail)
    }
}
