//! LoudVoice - a ministry media dashboard.
//!
//! # Overview
//!
//! LoudVoice pulls channel statistics, daily and per-country views, social
//! follower counts, open tasks and spreadsheet tallies from their upstream
//! services and renders them into one view for a wall display.
//!
//! Every section degrades on its own: when a source is missing, slow,
//! unauthorized or broken, that section shows built-in mock data with a
//! notice while the rest stays live.
//!
//! # Modules
//!
//! - [`model`]: Records shared by every section
//! - [`config`]: Environment-driven configuration
//! - [`data_sources`]: Provider adapters behind trait seams
//! - [`cache`]: Short-TTL read-through cache
//! - [`fallback`]: Per-section fallback to mock data
//! - [`format`]: Count and percentage formatting
//! - [`geo`]: Country resolution and world coverage
//! - [`daily`]: UTC-to-local daily series normalization
//! - [`spreadsheet`]: Ministry tally and filming schedule parsing
//! - [`dashboard`]: The render pass and view model
//! - [`api`]: HTTP API handlers

pub mod api;
pub mod cache;
pub mod config;
pub mod daily;
pub mod dashboard;
pub mod data_sources;
pub mod error;
pub mod fallback;
pub mod format;
pub mod geo;
pub mod mock;
pub mod model;
pub mod spreadsheet;

use axum::{Router, routing::get, routing::post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use api::{AppState, get_dashboard, get_sources, get_world_map, health_check, post_ministry};

/// The full HTTP surface.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/map", get(get_world_map))
        .route("/dashboard/sources", get(get_sources))
        .route("/ministry/:kind", post(post_ministry))
        .route("/health", get(health_check))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
