//! Integration tests for LoudVoice API endpoints.
//!
//! These tests drive the full request/response cycle through the HTTP API
//! with fake providers standing in for the upstream services.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_test::TestServer;
use chrono::NaiveDate;
use serde_json::Value;
use tower::ServiceExt;

use loudvoice::api::AppState;
use loudvoice::config::DashboardConfig;
use loudvoice::daily::ReportingWindow;
use loudvoice::dashboard::{Dashboard, Providers};
use loudvoice::data_sources::{ReportingProvider, SheetProvider, StatsProvider, TaskProvider};
use loudvoice::error::SourceError;
use loudvoice::geo::COUNTRIES;
use loudvoice::model::{ChannelStats, CountryViewRecord, RawDailyRow, SheetRow, TaskRecord};

struct LiveStats;

#[async_trait]
impl StatsProvider for LiveStats {
    async fn channel_stats(&self) -> Result<ChannelStats, SourceError> {
        Ok(ChannelStats {
            subscriber_count: 20_400,
            lifetime_view_count: 151_250_000,
        })
    }
}

struct OneCountry;

#[async_trait]
impl ReportingProvider for OneCountry {
    async fn daily_series(&self, _window: ReportingWindow) -> Result<Vec<RawDailyRow>, SourceError> {
        Err(SourceError::Unauthorized("refresh token expired or revoked".into()))
    }

    async fn country_series(
        &self,
        _window: ReportingWindow,
    ) -> Result<Vec<CountryViewRecord>, SourceError> {
        Ok(vec![CountryViewRecord::new("US", 52_000)])
    }
}

struct StuckTasks;

#[async_trait]
impl TaskProvider for StuckTasks {
    async fn open_tasks(&self, _today: NaiveDate, _limit: usize) -> Result<Vec<TaskRecord>, SourceError> {
        Err(SourceError::Unavailable("clickup returned HTTP 503".into()))
    }
}

/// An in-memory ministry sheet that records appends.
#[derive(Default)]
struct MemorySheet {
    rows: Mutex<Vec<SheetRow>>,
}

#[async_trait]
impl SheetProvider for MemorySheet {
    async fn read_rows(&self, sheet: &str) -> Result<Vec<SheetRow>, SourceError> {
        if sheet != "Ministry" {
            return Err(SourceError::NotFound(format!("sheet {}", sheet)));
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn append_row(&self, _sheet: &str, cells: Vec<String>) -> Result<(), SourceError> {
        let row: SheetRow = ["Timestamp", "Type", "Count"]
            .iter()
            .map(|h| h.to_string())
            .zip(cells)
            .collect();
        self.rows.lock().unwrap().push(row);
        Ok(())
    }
}

fn create_test_server(providers: Providers) -> TestServer {
    let dashboard = Dashboard::with_providers(DashboardConfig::default(), providers);
    let app = loudvoice::router(AppState { dashboard });
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server(Providers::unconfigured());

    let response = server.get("/health").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_unconfigured_dashboard_is_all_mock() {
    let server = create_test_server(Providers::unconfigured());

    let response = server.get("/dashboard").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let sources = body["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 8);
    assert!(sources.iter().all(|s| s["is_live"] == false));
    assert_eq!(body["notices"].as_array().unwrap().len(), 8);
    assert_eq!(
        body["notices"][0],
        "Using mock data for YouTube stats: YOUTUBE_API_KEY is not configured"
    );
    assert_eq!(body["channels"][0]["primary_value"], "15.9K");
    assert_eq!(body["daily_views"].as_array().unwrap().len(), 7);
    assert_eq!(
        body["world_map"]["coverage"].as_array().unwrap().len(),
        COUNTRIES.len()
    );
}

#[tokio::test]
async fn test_mixed_sources() {
    let server = create_test_server(Providers {
        stats: Arc::new(LiveStats),
        reporting: Arc::new(OneCountry),
        tasks: Arc::new(StuckTasks),
        ..Providers::unconfigured()
    });

    let body: Value = server.get("/dashboard").await.json();

    assert_eq!(body["channels"][0]["is_live"], true);
    assert_eq!(body["channels"][0]["primary_value"], "20.4K");
    assert_eq!(body["channels"][0]["secondary_value"], "151.3M");

    // Daily views degraded, country views live.
    let sources = body["sources"].as_array().unwrap();
    assert_eq!(sources[1]["source"], "youtube_daily_views");
    assert_eq!(sources[1]["is_live"], false);
    assert_eq!(sources[2]["source"], "youtube_country_views");
    assert_eq!(sources[2]["is_live"], true);

    // Mock tasks still render when the tracker is down.
    assert_eq!(body["tasks"].as_array().unwrap().len(), 3);
    assert_eq!(body["tasks"][0]["tone"], "yellow");
}

#[tokio::test]
async fn test_world_map_zero_fills_every_country() {
    let server = create_test_server(Providers {
        reporting: Arc::new(OneCountry),
        ..Providers::unconfigured()
    });

    let response = server.get("/dashboard/map").await;
    response.assert_status_ok();

    let map: Value = response.json();
    let coverage = map["coverage"].as_array().unwrap();
    assert_eq!(coverage.len(), COUNTRIES.len());

    let usa = coverage.iter().find(|r| r["iso3"] == "USA").unwrap();
    assert_eq!(usa["view_count"], 52_000);
    let nonzero = coverage.iter().filter(|r| r["view_count"] != 0).count();
    assert_eq!(nonzero, 1);

    assert_eq!(map["bounds"]["max"], 52_000);
    assert_eq!(map["markers"].as_array().unwrap().len(), 1);
    assert_eq!(map["markers"][0]["size_px"], 22.0);
}

#[tokio::test]
async fn test_sources_endpoint() {
    let server = create_test_server(Providers {
        stats: Arc::new(LiveStats),
        ..Providers::unconfigured()
    });

    let sources: Value = server.get("/dashboard/sources").await.json();
    assert_eq!(sources[0]["source"], "youtube_stats");
    assert_eq!(sources[0]["is_live"], true);
    assert_eq!(sources[0]["error_message"], Value::Null);
}

#[tokio::test]
async fn test_record_prayer() {
    let sheet = Arc::new(MemorySheet::default());
    let server = create_test_server(Providers {
        sheets: sheet.clone(),
        ..Providers::unconfigured()
    });

    let response = server.post("/ministry/prayer").await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["ministry"][0]["label"], "Prayer");
    assert_eq!(body["ministry"][0]["count"], 1);

    server.post("/ministry/baptisms").await.assert_status(StatusCode::CREATED);

    let rows = sheet.rows.lock().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["Type"], "Baptisms");
    assert_eq!(rows[1]["Count"], "1");
}

#[tokio::test]
async fn test_record_unknown_kind() {
    let server = create_test_server(Providers::unconfigured());

    let response = server.post("/ministry/offering").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_record_without_sheet() {
    let server = create_test_server(Providers::unconfigured());

    let response = server.post("/ministry/studies").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_router_as_tower_service() {
    let dashboard = Dashboard::with_providers(DashboardConfig::default(), Providers::unconfigured());
    let app = loudvoice::router(AppState { dashboard });

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
