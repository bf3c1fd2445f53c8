//! LoudVoice - a ministry media dashboard.
//!
//! # API Endpoints
//!
//! - `GET /dashboard` - Full dashboard view
//! - `GET /dashboard/map` - World coverage dataset
//! - `GET /dashboard/sources` - Live/mock status per source
//! - `POST /ministry/:kind` - Record a prayer, study or baptism
//! - `GET /health` - Health check

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use loudvoice::api::AppState;
use loudvoice::config::DashboardConfig;
use loudvoice::dashboard::Dashboard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("loudvoice=info".parse()?))
        .init();

    let config = DashboardConfig::from_env();
    let port = config.port;

    info!(
        port,
        timezone = %config.timezone,
        window_days = config.window_days,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        "Starting LoudVoice server"
    );

    let state = AppState {
        dashboard: Dashboard::from_config(config),
    };
    let app = loudvoice::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "LoudVoice is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
