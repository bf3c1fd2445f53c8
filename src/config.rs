//! Dashboard configuration.
//!
//! Built once at startup from environment variables and handed to each
//! adapter at construction. Nothing below this layer reads the environment.

use std::env;
use std::time::Duration;

use chrono_tz::Tz;
use tracing::warn;

use crate::daily::MAX_WINDOW_DAYS;

/// Default Google OAuth token endpoint.
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_WINDOW_DAYS: u32 = 7;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 25;
const DEFAULT_TASK_LIMIT: usize = 8;
const DEFAULT_FILMING_LIMIT: usize = 3;
const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Refresh-token credentials for Google APIs (Analytics, Sheets).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub token_uri: String,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// YouTube Data API key for public channel statistics.
    pub youtube_api_key: Option<String>,

    /// Channel whose statistics are shown.
    pub youtube_channel_id: Option<String>,

    /// OAuth credentials for the authenticated channel's Analytics and for Sheets.
    pub google_oauth: Option<OAuthCredentials>,

    pub instagram_token: Option<String>,
    pub instagram_user_id: Option<String>,
    pub tiktok_token: Option<String>,
    pub tiktok_business_id: Option<String>,

    pub clickup_token: Option<String>,
    pub clickup_list_id: Option<String>,

    /// Spreadsheet holding the ministry and filming tabs.
    pub sheets_document_id: Option<String>,

    /// API key for read-only sheet access. Appends still need OAuth.
    pub sheets_api_key: Option<String>,
    pub ministry_sheet: String,
    pub filming_sheet: String,

    /// Zone the display labels days in.
    pub timezone: Tz,

    /// Length of the trailing daily window.
    pub window_days: u32,

    /// Daily series shorter than this fall back to mock data.
    pub min_daily_points: usize,

    pub cache_ttl: Duration,
    pub http_timeout: Duration,

    /// Attempts per adapter call, 1..=3. Only `Unavailable` is retried.
    pub retry_attempts: u32,

    pub task_limit: usize,
    pub filming_limit: usize,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            youtube_api_key: None,
            youtube_channel_id: None,
            google_oauth: None,
            instagram_token: None,
            instagram_user_id: None,
            tiktok_token: None,
            tiktok_business_id: None,
            clickup_token: None,
            clickup_list_id: None,
            sheets_document_id: None,
            sheets_api_key: None,
            ministry_sheet: "Ministry".to_string(),
            filming_sheet: "Filming".to_string(),
            timezone: chrono_tz::UTC,
            window_days: DEFAULT_WINDOW_DAYS,
            min_daily_points: 1,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            retry_attempts: 1,
            task_limit: DEFAULT_TASK_LIMIT,
            filming_limit: DEFAULT_FILMING_LIMIT,
            port: DEFAULT_PORT,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Blank values count as unset. Unparsable numbers and zones fall back
    /// to defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let google_oauth = match (
            get("YT_CLIENT_ID"),
            get("YT_CLIENT_SECRET"),
            get("YT_REFRESH_TOKEN"),
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => Some(OAuthCredentials {
                client_id,
                client_secret,
                refresh_token,
                token_uri: get("YT_TOKEN_URI").unwrap_or_else(|| GOOGLE_TOKEN_URI.to_string()),
            }),
            _ => None,
        };

        let timezone = match get("LOUDVOICE_TIMEZONE") {
            Some(name) => name.parse::<Tz>().unwrap_or_else(|_| {
                warn!(timezone = %name, "Unknown timezone, using UTC");
                chrono_tz::UTC
            }),
            None => defaults.timezone,
        };

        Self {
            youtube_api_key: get("YOUTUBE_API_KEY"),
            youtube_channel_id: get("YT_PRIMARY_CHANNEL_ID").or_else(|| get("YOUTUBE_CHANNEL_ID")),
            google_oauth,
            instagram_token: get("IG_ACCESS_TOKEN"),
            instagram_user_id: get("IG_BUSINESS_ID"),
            tiktok_token: get("TT_ACCESS_TOKEN"),
            tiktok_business_id: get("TT_BUSINESS_ID"),
            clickup_token: get("CLICKUP_TOKEN"),
            clickup_list_id: get("CLICKUP_LIST_ID"),
            sheets_document_id: get("SHEETS_DOCUMENT_ID"),
            sheets_api_key: get("SHEETS_API_KEY"),
            ministry_sheet: get("MINISTRY_SHEET_NAME").unwrap_or(defaults.ministry_sheet),
            filming_sheet: get("FILMING_SHEET_NAME").unwrap_or(defaults.filming_sheet),
            timezone,
            window_days: parse_or(get("LOUDVOICE_WINDOW_DAYS"), defaults.window_days)
                .clamp(1, MAX_WINDOW_DAYS),
            min_daily_points: parse_or(get("LOUDVOICE_MIN_DAILY_POINTS"), defaults.min_daily_points),
            cache_ttl: Duration::from_secs(parse_or(
                get("LOUDVOICE_CACHE_TTL_SECS"),
                DEFAULT_CACHE_TTL_SECS,
            )),
            http_timeout: Duration::from_secs(
                parse_or(get("LOUDVOICE_HTTP_TIMEOUT_SECS"), DEFAULT_HTTP_TIMEOUT_SECS).max(1),
            ),
            retry_attempts: parse_or(get("LOUDVOICE_RETRY_ATTEMPTS"), defaults.retry_attempts)
                .clamp(1, MAX_RETRY_ATTEMPTS),
            task_limit: parse_or(get("LOUDVOICE_TASK_LIMIT"), defaults.task_limit),
            filming_limit: defaults.filming_limit,
            port: parse_or(get("LOUDVOICE_PORT"), defaults.port),
        }
    }

    /// Outer deadline for one adapter call, covering retries.
    pub fn source_deadline(&self) -> Duration {
        self.http_timeout * (self.retry_attempts + 1)
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(value = %raw, "Unparsable numeric setting, using default");
            default
        }),
        None => default,
    }
}
