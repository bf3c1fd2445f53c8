//! HTTP API handlers for LoudVoice.
//!
//! The display consumes these as JSON. Every read renders live where it can
//! and falls back to mock data per section, so read endpoints never fail.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::dashboard::{Dashboard, DashboardView, WorldMapView};
use crate::error::SourceError;
use crate::model::{MinistryKind, SourceHealth};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
}

/// HTTP status for a failed write to an upstream.
///
/// Credential problems are ours to fix (503); anything else is the
/// upstream's fault (502).
pub fn status_for(error: &SourceError) -> StatusCode {
    match error {
        SourceError::NotConfigured(_) | SourceError::Unauthorized(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// GET /dashboard - One full render pass.
///
/// # Response
///
/// ```json
/// {
///     "generated_at": "2025-08-22T15:00:00Z",
///     "timestamp_label": "Fri, Aug 22 2025, 10:00 AM CDT",
///     "window": {"start": "2025-08-15", "end": "2025-08-21"},
///     "channels": [...],
///     "daily_views": [...],
///     "world_map": {"coverage": [...], "bounds": {...}, "markers": [...]},
///     "ministry": [...],
///     "tasks": [...],
///     "filming": [...],
///     "sources": [{"source": "youtube_stats", "is_live": true, "error_message": null}],
///     "notices": []
/// }
/// ```
#[instrument(skip(state))]
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    let view = state.dashboard.render(Utc::now()).await;
    info!(notices = view.notices.len(), "Dashboard served");
    Json(view)
}

/// GET /dashboard/map - World coverage dataset only.
#[instrument(skip(state))]
pub async fn get_world_map(State(state): State<AppState>) -> Json<WorldMapView> {
    let map = state.dashboard.world_map(Utc::now()).await;
    info!(
        countries = map.coverage.len(),
        markers = map.markers.len(),
        live = map.is_live,
        "World map served"
    );
    Json(map)
}

/// GET /dashboard/sources - Live/mock status per source.
#[instrument(skip(state))]
pub async fn get_sources(State(state): State<AppState>) -> Json<Vec<SourceHealth>> {
    let view = state.dashboard.render(Utc::now()).await;
    Json(view.sources)
}

/// POST /ministry/:kind - Append one count to the ministry sheet.
///
/// `kind` is `prayer`, `studies` or `baptisms`. Returns `201 Created` with
/// a freshly rendered dashboard.
#[instrument(skip(state))]
pub async fn post_ministry(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let kind: MinistryKind = kind.parse().map_err(|e: String| {
        warn!(error = %e, "Invalid ministry kind");
        StatusCode::BAD_REQUEST
    })?;

    match state.dashboard.record_ministry(kind, Utc::now()).await {
        Ok(view) => Ok((StatusCode::CREATED, Json(view))),
        Err(e) => {
            warn!(kind = kind.label(), error = %e, "Ministry count not recorded");
            Err(status_for(&e))
        }
    }
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}
