//! Shared HTTP plumbing for provider adapters.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::SourceError;

/// Pause between attempts. No backoff is needed for one or two retries.
const RETRY_PAUSE: Duration = Duration::from_millis(250);

/// Longest upstream body excerpt carried into an error message.
const MAX_BODY_EXCERPT: usize = 200;

/// How many times a single adapter call may go upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub pause: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::attempts(1)
    }
}

impl RetryPolicy {
    pub fn attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            pause: RETRY_PAUSE,
        }
    }
}

/// Build the client every adapter shares, with a bounded request timeout.
pub fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
}

/// Send a request and return the final status and body text.
///
/// Transport failures and 408/429/5xx responses are retried per `policy`;
/// every other status is returned to the caller to classify.
pub async fn send_text(
    request: RequestBuilder,
    context: &str,
    policy: &RetryPolicy,
) -> Result<(StatusCode, String), SourceError> {
    let attempts = policy.max_attempts.max(1);

    for attempt in 1..=attempts {
        let Some(cloned) = request.try_clone() else {
            return send_once(request).await;
        };

        match send_once(cloned).await {
            Ok((status, _)) if is_retryable_status(status) && attempt < attempts => {
                warn!(context, attempt, status = %status, "Retryable upstream status");
            }
            Err(e) if e.is_retryable() && attempt < attempts => {
                warn!(context, attempt, error = %e, "Upstream request failed, retrying");
            }
            other => return other,
        }

        tokio::time::sleep(policy.pause).await;
    }

    Err(SourceError::Unavailable(format!("{}: retries exhausted", context)))
}

async fn send_once(request: RequestBuilder) -> Result<(StatusCode, String), SourceError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

/// Classify a finished response and decode its JSON body.
pub fn decode_json<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    context: &str,
) -> Result<T, SourceError> {
    if !status.is_success() {
        let err = SourceError::from_status(status, context);
        warn!(context, status = %status, body = %excerpt(body), "Upstream rejected request");
        return Err(err);
    }

    serde_json::from_str(body)
        .map_err(|e| SourceError::Malformed(format!("{}: {}", context, e)))
}

/// Send, retry per policy, and decode a JSON response.
pub async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    context: &str,
    policy: &RetryPolicy,
) -> Result<T, SourceError> {
    let (status, body) = send_text(request, context, policy).await?;
    decode_json(status, &body, context)
}

/// First few hundred characters of a body, for logs.
pub fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
