//! YouTube Analytics v2 reports for the authenticated channel.
//!
//! Day buckets are UTC and only complete days are requested; local-day
//! labeling happens later in [`crate::daily`].
//!
//! # API Reference
//!
//! See: <https://developers.google.com/youtube/analytics/reference/reports/query>

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::http::send_json;
use super::{AdapterContext, ReportingProvider, TokenSource};
use crate::cache::TtlCache;
use crate::daily::ReportingWindow;
use crate::error::SourceError;
use crate::model::{CountryViewRecord, RawDailyRow};

/// Base URL for the YouTube Analytics reports endpoint.
const YOUTUBE_ANALYTICS_BASE: &str = "https://youtubeanalytics.googleapis.com/v2/reports";

const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Row cap for the per-country report. The API's default is lower.
const COUNTRY_MAX_RESULTS: &str = "200";

/// Client for the channel the OAuth credentials belong to.
#[derive(Clone)]
pub struct YouTubeAnalyticsClient {
    ctx: AdapterContext,
    base_url: String,
    tokens: TokenSource,
    daily_cache: TtlCache<Vec<RawDailyRow>>,
    country_cache: TtlCache<Vec<CountryViewRecord>>,
}

impl YouTubeAnalyticsClient {
    pub fn new(ctx: AdapterContext, tokens: TokenSource) -> Self {
        Self::with_base_url(ctx, YOUTUBE_ANALYTICS_BASE, tokens)
    }

    /// Create a client with a custom base URL (for testing).
    pub fn with_base_url(ctx: AdapterContext, base_url: &str, tokens: TokenSource) -> Self {
        Self {
            daily_cache: TtlCache::new(ctx.cache_ttl),
            country_cache: TtlCache::new(ctx.cache_ttl),
            ctx,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Views per UTC day across `window`, ascending.
    pub async fn get_daily_views(&self, window: ReportingWindow) -> Result<Vec<RawDailyRow>, SourceError> {
        let key = format!("daily:{}:{}", window.start, window.end);
        self.daily_cache
            .get_or_try_insert_with(&key, || async {
                let report = self.query(window, "day", Some("day"), None).await?;
                report.daily_rows()
            })
            .await
    }

    /// Total views per country across `window`. Countries with no views are absent.
    pub async fn get_country_views(
        &self,
        window: ReportingWindow,
    ) -> Result<Vec<CountryViewRecord>, SourceError> {
        let key = format!("country:{}:{}", window.start, window.end);
        self.country_cache
            .get_or_try_insert_with(&key, || async {
                let report = self
                    .query(window, "country", Some("-views"), Some(COUNTRY_MAX_RESULTS))
                    .await?;
                report.country_rows()
            })
            .await
    }

    async fn query(
        &self,
        window: ReportingWindow,
        dimension: &str,
        sort: Option<&str>,
        max_results: Option<&str>,
    ) -> Result<ReportResponse, SourceError> {
        let token = self.tokens.access_token().await?;
        let start = window.start.format(REPORT_DATE_FORMAT).to_string();
        let end = window.end.format(REPORT_DATE_FORMAT).to_string();

        let mut params = vec![
            ("ids", "channel==MINE"),
            ("startDate", start.as_str()),
            ("endDate", end.as_str()),
            ("metrics", "views"),
            ("dimensions", dimension),
        ];
        if let Some(sort) = sort {
            params.push(("sort", sort));
        }
        if let Some(max_results) = max_results {
            params.push(("maxResults", max_results));
        }

        let request = self
            .ctx
            .http
            .get(&self.base_url)
            .bearer_auth(token)
            .query(&params);

        send_json(request, "youtube analytics", &self.ctx.retry).await
    }
}

#[async_trait]
impl ReportingProvider for YouTubeAnalyticsClient {
    async fn daily_series(&self, window: ReportingWindow) -> Result<Vec<RawDailyRow>, SourceError> {
        self.get_daily_views(window).await
    }

    async fn country_series(
        &self,
        window: ReportingWindow,
    ) -> Result<Vec<CountryViewRecord>, SourceError> {
        self.get_country_views(window).await
    }
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnHeader {
    pub name: String,
}

/// A tabular report: header names plus positional rows.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportResponse {
    #[serde(default, rename = "columnHeaders")]
    pub column_headers: Vec<ColumnHeader>,

    /// Absent entirely when the window has no data.
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl ReportResponse {
    fn column(&self, name: &str) -> Result<usize, SourceError> {
        self.column_headers
            .iter()
            .position(|h| h.name == name)
            .ok_or_else(|| SourceError::Malformed(format!("report has no '{}' column", name)))
    }

    pub fn daily_rows(&self) -> Result<Vec<RawDailyRow>, SourceError> {
        let day_idx = self.column("day")?;
        let views_idx = self.column("views")?;

        self.rows
            .iter()
            .map(|row| {
                let day = cell_str(row, day_idx)?;
                let views = cell_count(row, views_idx)?;
                Ok(RawDailyRow::new(day, views))
            })
            .collect()
    }

    pub fn country_rows(&self) -> Result<Vec<CountryViewRecord>, SourceError> {
        let country_idx = self.column("country")?;
        let views_idx = self.column("views")?;

        self.rows
            .iter()
            .map(|row| {
                let country = cell_str(row, country_idx)?;
                let views = cell_count(row, views_idx)?;
                Ok(CountryViewRecord::new(country, views))
            })
            .collect()
    }
}

fn cell_str(row: &[Value], idx: usize) -> Result<&str, SourceError> {
    row.get(idx)
        .and_then(Value::as_str)
        .ok_or_else(|| SourceError::Malformed(format!("report cell {} is not a string", idx)))
}

/// Metric cells are JSON numbers, occasionally floats (`12.0`).
fn cell_count(row: &[Value], idx: usize) -> Result<u64, SourceError> {
    match row.get(idx) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .ok_or_else(|| SourceError::Malformed(format!("negative metric {}", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| SourceError::Malformed(format!("metric is not a count: {:?}", s))),
        _ => Err(SourceError::Malformed(format!("report cell {} is missing", idx))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(json: &str) -> ReportResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_daily_rows_by_header_name() {
        let r = report(
            r#"{
                "kind": "youtubeAnalytics#resultTable",
                "columnHeaders": [
                    {"name": "day", "columnType": "DIMENSION", "dataType": "STRING"},
                    {"name": "views", "columnType": "METRIC", "dataType": "INTEGER"}
                ],
                "rows": [["2025-08-20", 100], ["2025-08-21", 200]]
            }"#,
        );
        assert_eq!(
            r.daily_rows().unwrap(),
            vec![RawDailyRow::new("2025-08-20", 100), RawDailyRow::new("2025-08-21", 200)]
        );
    }

    #[test]
    fn test_reordered_columns() {
        let r = report(
            r#"{
                "columnHeaders": [{"name": "views"}, {"name": "country"}],
                "rows": [[52000, "US"], [22000.0, "MY"]]
            }"#,
        );
        assert_eq!(
            r.country_rows().unwrap(),
            vec![CountryViewRecord::new("US", 52_000), CountryViewRecord::new("MY", 22_000)]
        );
    }

    #[test]
    fn test_no_rows_is_empty_not_error() {
        let r = report(r#"{"columnHeaders": [{"name": "day"}, {"name": "views"}]}"#);
        assert!(r.daily_rows().unwrap().is_empty());
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let r = report(r#"{"columnHeaders": [{"name": "views"}], "rows": [[1]]}"#);
        assert!(matches!(r.daily_rows(), Err(SourceError::Malformed(_))));
    }

    #[test]
    fn test_negative_metric_is_malformed() {
        let r = report(r#"{"columnHeaders": [{"name": "day"}, {"name": "views"}], "rows": [["2025-08-20", -3]]}"#);
        assert!(matches!(r.daily_rows(), Err(SourceError::Malformed(_))));
    }
}
