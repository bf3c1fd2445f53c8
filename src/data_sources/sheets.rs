//! Google Sheets v4 values client.
//!
//! Reads return rows keyed by the detected header row. Appends always go
//! through OAuth; reads prefer the API key when one is configured.
//!
//! # API Reference
//!
//! See: <https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets.values>

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::http::{RetryPolicy, send_json};
use super::{AdapterContext, SheetProvider, TokenSource};
use crate::cache::TtlCache;
use crate::error::SourceError;
use crate::model::SheetRow;

/// Base URL for the Sheets API.
const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// Reported when an append is attempted without OAuth credentials.
const OAUTH_KEYS: &str = "YT_CLIENT_ID/YT_CLIENT_SECRET/YT_REFRESH_TOKEN";

#[derive(Clone)]
pub struct SheetsClient {
    ctx: AdapterContext,
    base_url: String,
    document_id: String,
    api_key: Option<String>,
    tokens: Option<TokenSource>,
    cache: TtlCache<Vec<SheetRow>>,
}

impl SheetsClient {
    pub fn new(
        ctx: AdapterContext,
        document_id: &str,
        api_key: Option<String>,
        tokens: Option<TokenSource>,
    ) -> Self {
        Self::with_base_url(ctx, SHEETS_API_BASE, document_id, api_key, tokens)
    }

    /// Create a client with a custom base URL (for testing).
    pub fn with_base_url(
        ctx: AdapterContext,
        base_url: &str,
        document_id: &str,
        api_key: Option<String>,
        tokens: Option<TokenSource>,
    ) -> Self {
        Self {
            cache: TtlCache::new(ctx.cache_ttl),
            ctx,
            base_url: base_url.trim_end_matches('/').to_string(),
            document_id: document_id.to_string(),
            api_key,
            tokens,
        }
    }

    fn values_url(&self, sheet: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url,
            self.document_id,
            urlencoding::encode(sheet)
        )
    }

    fn cache_key(&self, sheet: &str) -> String {
        format!("sheet:{}:{}", self.document_id, sheet)
    }

    pub async fn get_rows(&self, sheet: &str) -> Result<Vec<SheetRow>, SourceError> {
        let key = self.cache_key(sheet);
        self.cache
            .get_or_try_insert_with(&key, || async {
                let range = self.fetch_values(sheet).await?;
                Ok(rows_from_values(&range.values))
            })
            .await
    }

    async fn fetch_values(&self, sheet: &str) -> Result<ValueRange, SourceError> {
        let mut request = self.ctx.http.get(self.values_url(sheet));
        request = match (&self.api_key, &self.tokens) {
            (Some(key), _) => request.query(&[("key", key.as_str())]),
            (None, Some(tokens)) => request.bearer_auth(tokens.access_token().await?),
            (None, None) => return Err(SourceError::NotConfigured("SHEETS_API_KEY".to_string())),
        };

        send_json(request, "sheets values", &self.ctx.retry).await
    }

    /// Append one row below the sheet's data. Last write wins.
    ///
    /// Sent once regardless of the retry policy: a retried POST could store
    /// the row twice.
    pub async fn append(&self, sheet: &str, cells: Vec<String>) -> Result<(), SourceError> {
        let tokens = self
            .tokens
            .as_ref()
            .ok_or_else(|| SourceError::NotConfigured(OAUTH_KEYS.to_string()))?;
        let token = tokens.access_token().await?;

        let url = format!("{}:append", self.values_url(sheet));
        let body = ValueRange {
            values: vec![cells.into_iter().map(Value::String).collect()],
        };
        let request = self
            .ctx
            .http
            .post(&url)
            .bearer_auth(token)
            .query(&[("valueInputOption", "USER_ENTERED"), ("insertDataOption", "INSERT_ROWS")])
            .json(&body);

        let response: AppendResponse =
            send_json(request, "sheets append", &RetryPolicy::attempts(1)).await?;
        let range = response
            .updates
            .and_then(|u| u.updated_range)
            .unwrap_or_default();
        info!(sheet, range = %range, "Appended sheet row");

        self.cache.remove(&self.cache_key(sheet));
        Ok(())
    }
}

#[async_trait]
impl SheetProvider for SheetsClient {
    async fn read_rows(&self, sheet: &str) -> Result<Vec<SheetRow>, SourceError> {
        self.get_rows(sheet).await
    }

    async fn append_row(&self, sheet: &str, cells: Vec<String>) -> Result<(), SourceError> {
        self.append(sheet, cells).await
    }
}

/// Key rows by the first row that has any non-blank cell.
///
/// Cells are trimmed, blank rows below the header are skipped and short
/// rows are padded with empty strings.
pub fn rows_from_values(values: &[Vec<Value>]) -> Vec<SheetRow> {
    let cells: Vec<Vec<String>> = values
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let Some(header_idx) = cells
        .iter()
        .position(|row| row.iter().any(|c| !c.is_empty()))
    else {
        return Vec::new();
    };
    let header = &cells[header_idx];

    cells[header_idx + 1..]
        .iter()
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .map(|row| {
            header
                .iter()
                .enumerate()
                .filter(|(_, name)| !name.is_empty())
                .map(|(i, name)| (name.clone(), row.get(i).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppendResponse {
    #[serde(default)]
    pub updates: Option<AppendUpdates>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppendUpdates {
    #[serde(default, rename = "updatedRange")]
    pub updated_range: Option<String>,
}
