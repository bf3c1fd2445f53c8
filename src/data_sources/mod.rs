//! Provider adapters for every external source the dashboard reads.
//!
//! Each adapter fetches raw data, normalizes it into a [`crate::model`]
//! record and reports failure as a [`SourceError`]. The traits below are the
//! seams the render pass depends on, so fakes can stand in for any of them.
//!
//! # Data Sources
//!
//! - [`youtube`]: YouTube Data API, public channel statistics
//! - [`youtube_analytics`]: YouTube Analytics, daily and per-country views
//! - [`instagram`]: Instagram Graph API followers and reach
//! - [`tiktok`]: TikTok Business API followers and video views
//! - [`clickup`]: ClickUp open tasks
//! - [`sheets`]: Google Sheets values (ministry tally, filming schedule)

pub mod clickup;
pub mod http;
pub mod instagram;
pub mod oauth;
pub mod sheets;
pub mod tiktok;
pub mod youtube;
pub mod youtube_analytics;

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

pub use clickup::ClickUpClient;
pub use http::RetryPolicy;
pub use instagram::InstagramClient;
pub use oauth::TokenSource;
pub use sheets::SheetsClient;
pub use tiktok::TikTokClient;
pub use youtube::YouTubeStatsClient;
pub use youtube_analytics::YouTubeAnalyticsClient;

use crate::config::DashboardConfig;
use crate::daily::ReportingWindow;
use crate::error::SourceError;
use crate::model::{ChannelStats, CountryViewRecord, RawDailyRow, SheetRow, SocialStats, TaskRecord};

/// Channel-level statistics (subscribers, lifetime views).
#[async_trait]
pub trait StatsProvider: Send + Sync {
    async fn channel_stats(&self) -> Result<ChannelStats, SourceError>;
}

/// Reporting data for the authenticated account's own channel.
#[async_trait]
pub trait ReportingProvider: Send + Sync {
    /// Raw UTC day rows covering `window`.
    async fn daily_series(&self, window: ReportingWindow) -> Result<Vec<RawDailyRow>, SourceError>;

    /// Sparse per-country totals over `window`.
    async fn country_series(
        &self,
        window: ReportingWindow,
    ) -> Result<Vec<CountryViewRecord>, SourceError>;
}

/// Followers and trailing views on a short-form platform.
#[async_trait]
pub trait SocialProvider: Send + Sync {
    async fn social_stats(&self, window: ReportingWindow) -> Result<SocialStats, SourceError>;
}

/// Open (not done) tasks from the project tracker.
#[async_trait]
pub trait TaskProvider: Send + Sync {
    async fn open_tasks(&self, today: NaiveDate, limit: usize) -> Result<Vec<TaskRecord>, SourceError>;
}

/// Raw spreadsheet access.
#[async_trait]
pub trait SheetProvider: Send + Sync {
    /// Rows below the detected header row, keyed by header.
    async fn read_rows(&self, sheet: &str) -> Result<Vec<SheetRow>, SourceError>;

    /// Append a single row. No transactional guarantees.
    async fn append_row(&self, sheet: &str, cells: Vec<String>) -> Result<(), SourceError>;
}

/// Stand-in for any provider whose credentials were never configured.
#[derive(Debug, Clone)]
pub struct Unconfigured {
    missing: String,
}

impl Unconfigured {
    pub fn new(missing: &str) -> Self {
        Self {
            missing: missing.to_string(),
        }
    }

    fn err(&self) -> SourceError {
        SourceError::NotConfigured(self.missing.clone())
    }
}

#[async_trait]
impl StatsProvider for Unconfigured {
    async fn channel_stats(&self) -> Result<ChannelStats, SourceError> {
        Err(self.err())
    }
}

#[async_trait]
impl ReportingProvider for Unconfigured {
    async fn daily_series(&self, _window: ReportingWindow) -> Result<Vec<RawDailyRow>, SourceError> {
        Err(self.err())
    }

    async fn country_series(
        &self,
        _window: ReportingWindow,
    ) -> Result<Vec<CountryViewRecord>, SourceError> {
        Err(self.err())
    }
}

#[async_trait]
impl SocialProvider for Unconfigured {
    async fn social_stats(&self, _window: ReportingWindow) -> Result<SocialStats, SourceError> {
        Err(self.err())
    }
}

#[async_trait]
impl TaskProvider for Unconfigured {
    async fn open_tasks(&self, _today: NaiveDate, _limit: usize) -> Result<Vec<TaskRecord>, SourceError> {
        Err(self.err())
    }
}

#[async_trait]
impl SheetProvider for Unconfigured {
    async fn read_rows(&self, _sheet: &str) -> Result<Vec<SheetRow>, SourceError> {
        Err(self.err())
    }

    async fn append_row(&self, _sheet: &str, _cells: Vec<String>) -> Result<(), SourceError> {
        Err(self.err())
    }
}

/// What every HTTP adapter is built with.
#[derive(Debug, Clone)]
pub struct AdapterContext {
    pub http: reqwest::Client,
    pub cache_ttl: Duration,
    pub retry: RetryPolicy,
}

impl AdapterContext {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            http: http::build_client(config.http_timeout),
            cache_ttl: config.cache_ttl,
            retry: RetryPolicy::attempts(config.retry_attempts),
        }
    }
}
