//! The render pass.
//!
//! One call to [`Dashboard::render`] fetches every section concurrently,
//! settles each against its mock through [`crate::fallback::compose`] and
//! returns a fully formatted [`DashboardView`]. No section can fail the
//! render; the worst case is every section on mock data.
//!
//! # Usage
//!
//! ```ignore
//! let dashboard = Dashboard::from_config(DashboardConfig::from_env());
//! let view = dashboard.render(Utc::now()).await;
//! ```

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::daily::{self, ReportingWindow};
use crate::data_sources::{
    AdapterContext, ClickUpClient, InstagramClient, ReportingProvider, SheetProvider, SheetsClient,
    SocialProvider, StatsProvider, TaskProvider, TikTokClient, TokenSource, Unconfigured,
    YouTubeAnalyticsClient, YouTubeStatsClient,
};
use crate::error::SourceError;
use crate::fallback::{Sourced, compose};
use crate::format::{bar_percent, format_count};
use crate::geo::{self, CoverageBounds, MapMarker};
use crate::mock;
use crate::model::{
    ChannelStats, CountryViewRecord, DailyViewPoint, FilmingSlot, MinistryKind, MinistryTally,
    SocialStats, SourceHealth, SourceName, TaskRecord, WorldCoverageRow, status_label_is_done,
};
use crate::spreadsheet;

/// Header timestamp, in the configured zone.
const TIMESTAMP_FORMAT: &str = "%a, %b %-d %Y, %-I:%M %p %Z";

const WEEKDAY_FORMAT: &str = "%a";
const SLOT_DAY_FORMAT: &str = "%a, %b %-d";

// ============================================================================
// Providers
// ============================================================================

/// Every upstream the render pass reads, behind its trait seam.
#[derive(Clone)]
pub struct Providers {
    pub stats: Arc<dyn StatsProvider>,
    pub reporting: Arc<dyn ReportingProvider>,
    pub instagram: Arc<dyn SocialProvider>,
    pub tiktok: Arc<dyn SocialProvider>,
    pub tasks: Arc<dyn TaskProvider>,
    pub sheets: Arc<dyn SheetProvider>,
}

impl Providers {
    /// Real clients for every configured source, [`Unconfigured`] for the rest.
    pub fn from_config(config: &DashboardConfig) -> Self {
        let ctx = AdapterContext::from_config(config);
        let tokens = config
            .google_oauth
            .clone()
            .map(|credentials| TokenSource::new(ctx.http.clone(), credentials));

        let stats: Arc<dyn StatsProvider> =
            match (&config.youtube_api_key, &config.youtube_channel_id) {
                (Some(key), Some(channel)) => {
                    Arc::new(YouTubeStatsClient::new(ctx.clone(), key, channel))
                }
                (None, _) => Arc::new(Unconfigured::new("YOUTUBE_API_KEY")),
                (_, None) => Arc::new(Unconfigured::new("YT_PRIMARY_CHANNEL_ID")),
            };

        let reporting: Arc<dyn ReportingProvider> = match &tokens {
            Some(tokens) => Arc::new(YouTubeAnalyticsClient::new(ctx.clone(), tokens.clone())),
            None => Arc::new(Unconfigured::new("YT_REFRESH_TOKEN")),
        };

        let instagram: Arc<dyn SocialProvider> =
            match (&config.instagram_token, &config.instagram_user_id) {
                (Some(token), Some(user)) => Arc::new(InstagramClient::new(ctx.clone(), token, user)),
                (None, _) => Arc::new(Unconfigured::new("IG_ACCESS_TOKEN")),
                (_, None) => Arc::new(Unconfigured::new("IG_BUSINESS_ID")),
            };

        let tiktok: Arc<dyn SocialProvider> =
            match (&config.tiktok_token, &config.tiktok_business_id) {
                (Some(token), Some(business)) => {
                    Arc::new(TikTokClient::new(ctx.clone(), token, business))
                }
                (None, _) => Arc::new(Unconfigured::new("TT_ACCESS_TOKEN")),
                (_, None) => Arc::new(Unconfigured::new("TT_BUSINESS_ID")),
            };

        let tasks: Arc<dyn TaskProvider> = match (&config.clickup_token, &config.clickup_list_id) {
            (Some(token), Some(list)) => Arc::new(ClickUpClient::new(
                ctx.clone(),
                token,
                list,
                config.timezone,
            )),
            (None, _) => Arc::new(Unconfigured::new("CLICKUP_TOKEN")),
            (_, None) => Arc::new(Unconfigured::new("CLICKUP_LIST_ID")),
        };

        let sheets: Arc<dyn SheetProvider> = match &config.sheets_document_id {
            Some(document) if config.sheets_api_key.is_some() || tokens.is_some() => {
                Arc::new(SheetsClient::new(
                    ctx.clone(),
                    document,
                    config.sheets_api_key.clone(),
                    tokens.clone(),
                ))
            }
            Some(_) => Arc::new(Unconfigured::new("SHEETS_API_KEY")),
            None => Arc::new(Unconfigured::new("SHEETS_DOCUMENT_ID")),
        };

        Self {
            stats,
            reporting,
            instagram,
            tiktok,
            tasks,
            sheets,
        }
    }

    /// Every source unconfigured. Renders entirely from mocks.
    pub fn unconfigured() -> Self {
        Self {
            stats: Arc::new(Unconfigured::new("YOUTUBE_API_KEY")),
            reporting: Arc::new(Unconfigured::new("YT_REFRESH_TOKEN")),
            instagram: Arc::new(Unconfigured::new("IG_ACCESS_TOKEN")),
            tiktok: Arc::new(Unconfigured::new("TT_ACCESS_TOKEN")),
            tasks: Arc::new(Unconfigured::new("CLICKUP_TOKEN")),
            sheets: Arc::new(Unconfigured::new("SHEETS_DOCUMENT_ID")),
        }
    }
}

// ============================================================================
// View model
// ============================================================================

/// One platform card: a headline count and a secondary count, both formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelCard {
    pub platform: String,
    pub primary_label: String,
    pub primary_count: u64,
    pub primary_value: String,
    pub secondary_label: String,
    pub secondary_count: u64,
    pub secondary_value: String,
    pub is_live: bool,
}

impl ChannelCard {
    fn youtube(stats: &Sourced<ChannelStats>) -> Self {
        Self {
            platform: "YouTube".to_string(),
            primary_label: "Subscribers".to_string(),
            primary_count: stats.value.subscriber_count,
            primary_value: format_count(stats.value.subscriber_count),
            secondary_label: "Total views".to_string(),
            secondary_count: stats.value.lifetime_view_count,
            secondary_value: format_count(stats.value.lifetime_view_count),
            is_live: stats.is_live(),
        }
    }

    fn social(platform: &str, stats: &Sourced<SocialStats>) -> Self {
        Self {
            platform: platform.to_string(),
            primary_label: "Followers".to_string(),
            primary_count: stats.value.followers,
            primary_value: format_count(stats.value.followers),
            secondary_label: "Views (7d)".to_string(),
            secondary_count: stats.value.views_7d,
            secondary_value: format_count(stats.value.views_7d),
            is_live: stats.is_live(),
        }
    }
}

/// A bar in the daily views chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub weekday: String,
    pub view_count: u64,
    pub value_label: String,
    pub percent: u8,
}

/// Bars for a complete series, scaled to its largest day.
pub fn daily_bars(points: &[DailyViewPoint]) -> Vec<DailyBar> {
    let max = points.iter().map(|p| p.view_count).max().unwrap_or(0);
    points
        .iter()
        .map(|p| DailyBar {
            date: p.date,
            weekday: p.date.format(WEEKDAY_FORMAT).to_string(),
            view_count: p.view_count,
            value_label: format_count(p.view_count),
            percent: bar_percent(p.view_count, max),
        })
        .collect()
}

/// Everything the choropleth and marker map need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldMapView {
    pub coverage: Vec<WorldCoverageRow>,
    pub bounds: CoverageBounds,
    pub markers: Vec<MapMarker>,
    pub is_live: bool,
}

impl WorldMapView {
    fn from_records(countries: &Sourced<Vec<CountryViewRecord>>) -> Self {
        let coverage = geo::build_coverage(&countries.value);
        Self {
            bounds: CoverageBounds::of(&coverage),
            markers: geo::build_markers(&coverage),
            coverage,
            is_live: countries.is_live(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinistryCard {
    pub kind: MinistryKind,
    pub label: String,
    pub count: u64,
    pub value_label: String,
}

fn ministry_cards(tally: &MinistryTally) -> Vec<MinistryCard> {
    [
        (MinistryKind::Prayer, tally.prayer),
        (MinistryKind::Studies, tally.studies),
        (MinistryKind::Baptisms, tally.baptisms),
    ]
    .into_iter()
    .map(|(kind, count)| MinistryCard {
        kind,
        label: kind.label().to_string(),
        count,
        value_label: format_count(count),
    })
    .collect()
}

/// Progress bar color for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressTone {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: TaskRecord,
    pub progress_percent: u8,
    pub tone: ProgressTone,
}

impl From<TaskRecord> for TaskView {
    fn from(task: TaskRecord) -> Self {
        let status = task.status_label.to_lowercase();
        let (progress_percent, tone) = if status_label_is_done(&status) {
            (100, ProgressTone::Green)
        } else if status.contains("progress") {
            (50, ProgressTone::Yellow)
        } else {
            (10, ProgressTone::Red)
        };
        Self {
            task,
            progress_percent,
            tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilmingView {
    pub date: NaiveDate,
    pub day_label: String,
    pub time_range: String,
    pub title: String,
}

impl From<FilmingSlot> for FilmingView {
    fn from(slot: FilmingSlot) -> Self {
        Self {
            day_label: slot.date.format(SLOT_DAY_FORMAT).to_string(),
            date: slot.date,
            time_range: slot.time_range,
            title: slot.title,
        }
    }
}

/// The output of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub generated_at: DateTime<Utc>,
    pub timestamp_label: String,
    pub window: ReportingWindow,
    pub channels: Vec<ChannelCard>,
    pub daily_views: Vec<DailyBar>,
    pub world_map: WorldMapView,
    pub ministry: Vec<MinistryCard>,
    pub tasks: Vec<TaskView>,
    pub filming: Vec<FilmingView>,
    pub sources: Vec<SourceHealth>,
    pub notices: Vec<String>,
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Clone)]
pub struct Dashboard {
    config: Arc<DashboardConfig>,
    providers: Providers,
}

impl Dashboard {
    pub fn from_config(config: DashboardConfig) -> Self {
        let providers = Providers::from_config(&config);
        Self::with_providers(config, providers)
    }

    pub fn with_providers(config: DashboardConfig, providers: Providers) -> Self {
        Self {
            config: Arc::new(config),
            providers,
        }
    }

    fn window(&self, now: DateTime<Utc>) -> ReportingWindow {
        ReportingWindow::ending_yesterday(now, self.config.window_days)
    }

    fn local_today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.config.timezone).date_naive()
    }

    /// Fetch every section and build the view.
    pub async fn render(&self, now: DateTime<Utc>) -> DashboardView {
        let tz = self.config.timezone;
        let window = self.window(now);
        let today = self.local_today(now);

        let (stats, daily, countries, instagram, tiktok, tasks, ministry, filming) = tokio::join!(
            self.channel_stats(),
            self.daily_views(window),
            self.country_views(window),
            self.social(SourceName::Instagram, self.providers.instagram.clone(), mock::INSTAGRAM, window),
            self.social(SourceName::Tiktok, self.providers.tiktok.clone(), mock::TIKTOK, window),
            self.tasks(today),
            self.ministry(),
            self.filming(today),
        );

        let sources = vec![
            stats.health.clone(),
            daily.health.clone(),
            countries.health.clone(),
            instagram.health.clone(),
            tiktok.health.clone(),
            tasks.health.clone(),
            ministry.health.clone(),
            filming.health.clone(),
        ];
        let notices: Vec<String> = sources.iter().filter_map(SourceHealth::notice).collect();
        let live = sources.iter().filter(|s| s.is_live).count();

        info!(
            live_sources = live,
            degraded_sources = sources.len() - live,
            window_start = %window.start,
            window_end = %window.end,
            "Dashboard rendered"
        );

        DashboardView {
            generated_at: now,
            timestamp_label: now.with_timezone(&tz).format(TIMESTAMP_FORMAT).to_string(),
            window,
            channels: vec![
                ChannelCard::youtube(&stats),
                ChannelCard::social("Instagram", &instagram),
                ChannelCard::social("TikTok", &tiktok),
            ],
            daily_views: daily_bars(&daily::zero_fill(&daily.value, &window.local_days(tz))),
            world_map: WorldMapView::from_records(&countries),
            ministry: ministry_cards(&ministry.value),
            tasks: tasks.value.into_iter().map(TaskView::from).collect(),
            filming: filming.value.into_iter().map(FilmingView::from).collect(),
            sources,
            notices,
        }
    }

    /// Only the world map section.
    pub async fn world_map(&self, now: DateTime<Utc>) -> WorldMapView {
        let countries = self.country_views(self.window(now)).await;
        WorldMapView::from_records(&countries)
    }

    /// Append one ministry count, then render afresh.
    ///
    /// The append is not retried and has no transactional guarantee.
    pub async fn record_ministry(
        &self,
        kind: MinistryKind,
        now: DateTime<Utc>,
    ) -> Result<DashboardView, SourceError> {
        let cells = spreadsheet::ministry_row(kind, now, self.config.timezone);
        let append = self
            .providers
            .sheets
            .append_row(&self.config.ministry_sheet, cells);

        match tokio::time::timeout(self.config.source_deadline(), append).await {
            Ok(Ok(())) => info!(kind = kind.label(), "Ministry count recorded"),
            Ok(Err(e)) => {
                warn!(kind = kind.label(), error = %e, "Failed to record ministry count");
                return Err(e);
            }
            Err(_) => {
                warn!(kind = kind.label(), "Ministry append timed out");
                return Err(SourceError::Unavailable("sheet append timed out".to_string()));
            }
        }

        Ok(self.render(now).await)
    }

    async fn channel_stats(&self) -> Sourced<ChannelStats> {
        let provider = self.providers.stats.clone();
        compose(
            SourceName::YoutubeStats,
            mock::CHANNEL_STATS,
            self.config.source_deadline(),
            async move { provider.channel_stats().await },
        )
        .await
    }

    async fn daily_views(&self, window: ReportingWindow) -> Sourced<Vec<DailyViewPoint>> {
        let provider = self.providers.reporting.clone();
        let tz = self.config.timezone;
        let min_points = self.config.min_daily_points;

        compose(
            SourceName::YoutubeDailyViews,
            daily::mock_series(&window, tz, &mock::DAILY_VIEWS),
            self.config.source_deadline(),
            async move {
                let raw = provider.daily_series(window).await?;
                daily::ensure_viable(daily::normalize(&raw, tz, &window), min_points)
            },
        )
        .await
    }

    async fn country_views(
        &self,
        window: ReportingWindow,
    ) -> Sourced<Vec<CountryViewRecord>> {
        let provider = self.providers.reporting.clone();
        compose(
            SourceName::YoutubeCountryViews,
            mock::country_views(),
            self.config.source_deadline(),
            async move { provider.country_series(window).await },
        )
        .await
    }

    async fn social(
        &self,
        source: SourceName,
        provider: Arc<dyn SocialProvider>,
        fallback: SocialStats,
        window: ReportingWindow,
    ) -> Sourced<SocialStats> {
        compose(source, fallback, self.config.source_deadline(), async move {
            provider.social_stats(window).await
        })
        .await
    }

    async fn tasks(&self, today: NaiveDate) -> Sourced<Vec<TaskRecord>> {
        let provider = self.providers.tasks.clone();
        let limit = self.config.task_limit;
        compose(
            SourceName::Tasks,
            mock::tasks(today),
            self.config.source_deadline(),
            async move { provider.open_tasks(today, limit).await },
        )
        .await
    }

    async fn ministry(&self) -> Sourced<MinistryTally> {
        let provider = self.providers.sheets.clone();
        let sheet = self.config.ministry_sheet.clone();
        compose(
            SourceName::MinistrySheet,
            mock::MINISTRY,
            self.config.source_deadline(),
            async move {
                let rows = provider.read_rows(&sheet).await?;
                Ok(spreadsheet::tally_ministry(&rows))
            },
        )
        .await
    }

    async fn filming(&self, today: NaiveDate) -> Sourced<Vec<FilmingSlot>> {
        let provider = self.providers.sheets.clone();
        let sheet = self.config.filming_sheet.clone();
        let limit = self.config.filming_limit;
        compose(
            SourceName::FilmingSheet,
            mock::filming_slots(today),
            self.config.source_deadline(),
            async move {
                let rows = provider.read_rows(&sheet).await?;
                Ok(spreadsheet::upcoming_slots(&rows, today, limit))
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;

    use crate::model::{RawDailyRow, SheetRow};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 22, 15, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct FixedStats(ChannelStats);

    #[async_trait]
    impl StatsProvider for FixedStats {
        async fn channel_stats(&self) -> Result<ChannelStats, SourceError> {
            Ok(self.0)
        }
    }

    struct DownStats;

    #[async_trait]
    impl StatsProvider for DownStats {
        async fn channel_stats(&self) -> Result<ChannelStats, SourceError> {
            Err(SourceError::Unavailable("connection reset".into()))
        }
    }

    struct GappyReports;

    #[async_trait]
    impl ReportingProvider for GappyReports {
        async fn daily_series(&self, _window: ReportingWindow) -> Result<Vec<RawDailyRow>, SourceError> {
            Ok(vec![
                RawDailyRow::new("2025-08-19", 400),
                RawDailyRow::new("2025-08-21", 800),
                RawDailyRow::new("2025-08-22", 5),
            ])
        }

        async fn country_series(
            &self,
            _window: ReportingWindow,
        ) -> Result<Vec<CountryViewRecord>, SourceError> {
            Ok(vec![
                CountryViewRecord::new("US", 52_000),
                CountryViewRecord::new("South Korea", 1_000),
                CountryViewRecord::new("Atlantis", 9),
            ])
        }
    }

    struct PanickySocial;

    #[async_trait]
    impl SocialProvider for PanickySocial {
        async fn social_stats(&self, _window: ReportingWindow) -> Result<SocialStats, SourceError> {
            panic!("index out of bounds");
        }
    }

    struct FixedSheet;

    #[async_trait]
    impl SheetProvider for FixedSheet {
        async fn read_rows(&self, sheet: &str) -> Result<Vec<SheetRow>, SourceError> {
            let row = |pairs: &[(&str, &str)]| -> SheetRow {
                pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
            };
            Ok(match sheet {
                "Ministry" => vec![
                    row(&[("Type", "Prayer"), ("Count", "4")]),
                    row(&[("Type", "Baptism")]),
                ],
                _ => vec![row(&[("Date", "2025-08-24"), ("Time", "9–11 AM"), ("Title", "B-roll")])],
            })
        }

        async fn append_row(&self, _sheet: &str, _cells: Vec<String>) -> Result<(), SourceError> {
            Ok(())
        }
    }

    fn providers() -> Providers {
        Providers::unconfigured()
    }

    #[tokio::test]
    async fn test_all_unconfigured_renders_mocks() {
        let dashboard = Dashboard::with_providers(DashboardConfig::default(), providers());
        let view = dashboard.render(now()).await;

        assert_eq!(view.sources.len(), 8);
        assert!(view.sources.iter().all(|s| !s.is_live));
        assert_eq!(view.notices.len(), 8);
        assert_eq!(view.channels[0].primary_value, "15.9K");
        assert_eq!(view.channels[0].secondary_value, "145M");
        assert_eq!(view.daily_views.len(), 7);
        assert_eq!(view.daily_views.last().unwrap().date, date(2025, 8, 21));
        assert_eq!(view.daily_views.last().unwrap().percent, 100);
        assert_eq!(view.world_map.coverage.len(), geo::COUNTRIES.len());
        assert_eq!(view.tasks.len(), 3);
        assert_eq!(view.filming.len(), 3);
        assert_eq!(view.ministry[0].count, 15);
    }

    #[tokio::test]
    async fn test_sections_degrade_independently() {
        let providers = Providers {
            stats: Arc::new(DownStats),
            reporting: Arc::new(GappyReports),
            instagram: Arc::new(PanickySocial),
            sheets: Arc::new(FixedSheet),
            ..Providers::unconfigured()
        };
        let dashboard = Dashboard::with_providers(DashboardConfig::default(), providers);
        let view = dashboard.render(now()).await;

        let live: Vec<SourceName> = view
            .sources
            .iter()
            .filter(|s| s.is_live)
            .map(|s| s.source)
            .collect();
        assert_eq!(
            live,
            vec![
                SourceName::YoutubeDailyViews,
                SourceName::YoutubeCountryViews,
                SourceName::MinistrySheet,
                SourceName::FilmingSheet,
            ]
        );

        // Yesterday's row kept, today's partial row dropped, gaps zero-filled.
        let counts: Vec<u64> = view.daily_views.iter().map(|b| b.view_count).collect();
        assert_eq!(counts, vec![0, 0, 0, 0, 400, 0, 800]);
        assert_eq!(view.daily_views[4].percent, 50);

        let kor = view.world_map.coverage.iter().find(|r| r.iso3 == "KOR").unwrap();
        assert_eq!(kor.view_count, 1_000);
        assert_eq!(view.world_map.bounds, CoverageBounds { min: 0, max: 52_000 });

        assert_eq!(view.ministry[0].count, 4);
        assert_eq!(view.ministry[2].count, 1);
        assert_eq!(view.filming[0].day_label, "Sun, Aug 24");

        let instagram = view
            .sources
            .iter()
            .find(|s| s.source == SourceName::Instagram)
            .unwrap();
        assert!(
            instagram
                .error_message
                .as_deref()
                .unwrap()
                .starts_with("internal adapter failure")
        );
    }

    #[tokio::test]
    async fn test_live_stats_are_formatted() {
        let providers = Providers {
            stats: Arc::new(FixedStats(ChannelStats {
                subscriber_count: 999,
                lifetime_view_count: 1_500_000,
            })),
            ..Providers::unconfigured()
        };
        let dashboard = Dashboard::with_providers(DashboardConfig::default(), providers);
        let view = dashboard.render(now()).await;

        assert!(view.channels[0].is_live);
        assert_eq!(view.channels[0].primary_value, "999");
        assert_eq!(view.channels[0].secondary_value, "1.5M");
    }

    #[tokio::test]
    async fn test_record_ministry_needs_sheet() {
        let dashboard = Dashboard::with_providers(DashboardConfig::default(), providers());
        let err = dashboard
            .record_ministry(MinistryKind::Prayer, now())
            .await
            .unwrap_err();
        assert_eq!(err, SourceError::NotConfigured("SHEETS_DOCUMENT_ID".into()));

        let dashboard = Dashboard::with_providers(
            DashboardConfig::default(),
            Providers {
                sheets: Arc::new(FixedSheet),
                ..Providers::unconfigured()
            },
        );
        let view = dashboard
            .record_ministry(MinistryKind::Prayer, now())
            .await
            .unwrap();
        assert_eq!(view.ministry[0].count, 4);
    }

    #[test]
    fn test_task_progress_tones() {
        let today = date(2025, 8, 22);
        let view = |status: &str| TaskView::from(TaskRecord::new("t", status, None, today));
        assert_eq!(view("In Progress").tone, ProgressTone::Yellow);
        assert_eq!(view("In Progress").progress_percent, 50);
        assert_eq!(view("Done").progress_percent, 100);
        assert_eq!(view("Complete").tone, ProgressTone::Green);
        assert_eq!(view("Not Done").tone, ProgressTone::Red);
        assert_eq!(view("Incomplete").tone, ProgressTone::Red);
        assert_eq!(view("to do").tone, ProgressTone::Red);
    }

    #[test]
    fn test_daily_bars_zero_max() {
        let bars = daily_bars(&[DailyViewPoint {
            date: date(2025, 8, 21),
            view_count: 0,
        }]);
        assert_eq!(bars[0].percent, 0);
        assert_eq!(bars[0].weekday, "Thu");
        assert_eq!(bars[0].value_label, "0");
    }
}
