//! OAuth2 refresh-token flow for Google APIs.
//!
//! Refresh tokens are provisioned out of band. This module only exchanges
//! them for short-lived access tokens and caches those until shortly before
//! expiry.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::http::excerpt;
use crate::config::OAuthCredentials;
use crate::error::SourceError;

/// Refresh this long before the provider's stated expiry.
const EXPIRY_SKEW_SECS: i64 = 60;

/// Lifetime assumed when the token endpoint omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

#[derive(Debug, Clone)]
struct AccessToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - Duration::seconds(EXPIRY_SKEW_SECS)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Hands out valid access tokens, refreshing at most one at a time.
#[derive(Clone)]
pub struct TokenSource {
    client: reqwest::Client,
    credentials: OAuthCredentials,
    cached: Arc<Mutex<Option<AccessToken>>>,
}

impl TokenSource {
    pub fn new(client: reqwest::Client, credentials: OAuthCredentials) -> Self {
        Self {
            client,
            credentials,
            cached: Arc::new(Mutex::new(None)),
        }
    }

    /// A bearer token valid for at least the next minute.
    pub async fn access_token(&self) -> Result<String, SourceError> {
        // Held across the refresh so concurrent callers share one exchange.
        let mut guard = self.cached.lock().await;

        if let Some(token) = guard.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.token.clone());
            }
        }

        let token = self.refresh().await?;
        let value = token.token.clone();
        *guard = Some(token);
        Ok(value)
    }

    async fn refresh(&self) -> Result<AccessToken, SourceError> {
        debug!(token_uri = %self.credentials.token_uri, "Refreshing access token");

        let response = self
            .client
            .post(&self.credentials.token_uri)
            .form(&[
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("refresh_token", self.credentials.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(status = %status, body = %excerpt(&body), "Token refresh rejected");
            return Err(map_refresh_error(status.as_u16(), &body));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| SourceError::Malformed(format!("token response: {}", e)))?;

        Ok(AccessToken {
            token: parsed.access_token,
            expires_at: Utc::now()
                + Duration::seconds(parsed.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS)),
        })
    }
}

fn map_refresh_error(status: u16, body: &str) -> SourceError {
    if status >= 500 || status == 429 {
        return SourceError::Unavailable(format!("token endpoint returned HTTP {}", status));
    }

    let lowered = body.to_lowercase();
    if lowered.contains("invalid_grant") || lowered.contains("expired") || lowered.contains("revoked") {
        SourceError::Unauthorized("refresh token expired or revoked".to_string())
    } else if lowered.contains("invalid_client") {
        SourceError::Unauthorized("OAuth client id or secret rejected".to_string())
    } else {
        SourceError::Unauthorized(format!("token refresh failed with HTTP {}", status))
    }
}
