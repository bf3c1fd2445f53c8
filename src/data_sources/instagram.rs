//! Instagram Graph API client (business accounts).
//!
//! Followers come from the user node, trailing views from the daily
//! `reach` insight summed over the reporting window.

use async_trait::async_trait;
use chrono::{Duration, NaiveTime};
use serde::Deserialize;

use super::http::{decode_json, excerpt, send_text};
use super::{AdapterContext, SocialProvider};
use crate::cache::TtlCache;
use crate::daily::ReportingWindow;
use crate::error::SourceError;
use crate::model::SocialStats;

/// Base URL for the Graph API.
const GRAPH_API_BASE: &str = "https://graph.facebook.com/v19.0";

#[derive(Clone)]
pub struct InstagramClient {
    ctx: AdapterContext,
    base_url: String,
    access_token: String,
    user_id: String,
    cache: TtlCache<SocialStats>,
}

impl InstagramClient {
    pub fn new(ctx: AdapterContext, access_token: &str, user_id: &str) -> Self {
        Self::with_base_url(ctx, GRAPH_API_BASE, access_token, user_id)
    }

    /// Create a client with a custom base URL (for testing).
    pub fn with_base_url(ctx: AdapterContext, base_url: &str, access_token: &str, user_id: &str) -> Self {
        Self {
            cache: TtlCache::new(ctx.cache_ttl),
            ctx,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            user_id: user_id.to_string(),
        }
    }

    pub async fn get_stats(&self, window: ReportingWindow) -> Result<SocialStats, SourceError> {
        let key = format!("instagram:{}:{}:{}", self.user_id, window.start, window.end);
        self.cache
            .get_or_try_insert_with(&key, || async {
                let followers = self.fetch_followers().await?;
                let views_7d = self.fetch_reach(window).await?;
                Ok(SocialStats { followers, views_7d })
            })
            .await
    }

    async fn fetch_followers(&self) -> Result<u64, SourceError> {
        let url = format!("{}/{}", self.base_url, self.user_id);
        let request = self.ctx.http.get(&url).query(&[
            ("fields", "followers_count"),
            ("access_token", self.access_token.as_str()),
        ]);

        let user: UserNode = self.send(request, "instagram user").await?;
        user.followers()
    }

    async fn fetch_reach(&self, window: ReportingWindow) -> Result<u64, SourceError> {
        let since = window.start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let until = (window.end + Duration::days(1))
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();

        let url = format!("{}/{}/insights", self.base_url, self.user_id);
        let request = self.ctx.http.get(&url).query(&[
            ("metric", "reach".to_string()),
            ("period", "day".to_string()),
            ("since", since.to_string()),
            ("until", until.to_string()),
            ("access_token", self.access_token.clone()),
        ]);

        let insights: InsightsResponse = self.send(request, "instagram insights").await?;
        Ok(insights.total("reach"))
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<T, SourceError> {
        let (status, body) = send_text(request, context, &self.ctx.retry).await?;
        if status == reqwest::StatusCode::BAD_REQUEST && body.contains("OAuthException") {
            return Err(SourceError::Unauthorized(format!(
                "{}: {}",
                context,
                excerpt(&body)
            )));
        }
        decode_json(status, &body, context)
    }
}

#[async_trait]
impl SocialProvider for InstagramClient {
    async fn social_stats(&self, window: ReportingWindow) -> Result<SocialStats, SourceError> {
        self.get_stats(window).await
    }
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct UserNode {
    #[serde(default)]
    pub followers_count: Option<u64>,
}

impl UserNode {
    /// A node without `followers_count` is not a business account.
    pub fn followers(&self) -> Result<u64, SourceError> {
        self.followers_count.ok_or_else(|| {
            SourceError::Malformed("instagram user: followers_count missing".to_string())
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightsResponse {
    #[serde(default)]
    pub data: Vec<InsightMetric>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightMetric {
    pub name: String,
    #[serde(default)]
    pub values: Vec<InsightValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightValue {
    #[serde(default)]
    pub value: u64,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl InsightsResponse {
    /// Sum of every daily value reported for `metric`.
    pub fn total(&self, metric: &str) -> u64 {
        self.data
            .iter()
            .filter(|m| m.name == metric)
            .flat_map(|m| m.values.iter())
            .fold(0u64, |acc, v| acc.saturating_add(v.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reach_summed_across_days() {
        let json = r#"{
            "data": [{
                "name": "reach",
                "period": "day",
                "values": [
                    {"value": 6000, "end_time": "2025-08-16T07:00:00+0000"},
                    {"value": 6300, "end_time": "2025-08-17T07:00:00+0000"},
                    {"value": 30000, "end_time": "2025-08-18T07:00:00+0000"}
                ],
                "id": "1789/insights/reach/day"
            }],
            "paging": {}
        }"#;
        let insights: InsightsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(insights.total("reach"), 42_300);
        assert_eq!(insights.total("impressions"), 0);
    }

    #[test]
    fn test_user_node_without_followers() {
        let user: UserNode = serde_json::from_str(r#"{"id": "1789"}"#).unwrap();
        assert_eq!(user.followers_count, None);
        assert!(matches!(user.followers(), Err(SourceError::Malformed(_))));

        let user: UserNode =
            serde_json::from_str(r#"{"id": "1789", "followers_count": 0}"#).unwrap();
        assert_eq!(user.followers().unwrap(), 0);
    }
}
