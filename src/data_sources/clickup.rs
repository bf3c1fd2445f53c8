//! ClickUp v2 client for the open-task list.
//!
//! # API Reference
//!
//! See: <https://clickup.com/api/clickupreference/operation/GetTasks/>

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::debug;

use super::http::send_json;
use super::{AdapterContext, TaskProvider};
use crate::cache::TtlCache;
use crate::error::SourceError;
use crate::model::{TaskRecord, status_label_is_done};

/// Base URL for the ClickUp API.
const CLICKUP_API_BASE: &str = "https://api.clickup.com/api/v2";

/// Status types ClickUp itself treats as finished.
const DONE_STATUS_TYPES: &[&str] = &["closed", "done"];

#[derive(Clone)]
pub struct ClickUpClient {
    ctx: AdapterContext,
    base_url: String,
    token: String,
    list_id: String,
    timezone: Tz,
    cache: TtlCache<Vec<ClickUpTask>>,
}

impl ClickUpClient {
    pub fn new(ctx: AdapterContext, token: &str, list_id: &str, timezone: Tz) -> Self {
        Self::with_base_url(ctx, CLICKUP_API_BASE, token, list_id, timezone)
    }

    /// Create a client with a custom base URL (for testing).
    pub fn with_base_url(
        ctx: AdapterContext,
        base_url: &str,
        token: &str,
        list_id: &str,
        timezone: Tz,
    ) -> Self {
        Self {
            cache: TtlCache::new(ctx.cache_ttl),
            ctx,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            list_id: list_id.to_string(),
            timezone,
        }
    }

    /// Open tasks, soonest due first, undated last, at most `limit`.
    ///
    /// Overdue is judged against `today`, the caller's local date.
    pub async fn list_open_tasks(
        &self,
        today: NaiveDate,
        limit: usize,
    ) -> Result<Vec<TaskRecord>, SourceError> {
        let key = format!("clickup:{}", self.list_id);
        let tasks = self
            .cache
            .get_or_try_insert_with(&key, || self.fetch_tasks())
            .await?;

        Ok(open_tasks(&tasks, self.timezone, today, limit))
    }

    async fn fetch_tasks(&self) -> Result<Vec<ClickUpTask>, SourceError> {
        let url = format!("{}/list/{}/task", self.base_url, self.list_id);
        let request = self
            .ctx
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .query(&[
                ("archived", "false"),
                ("include_closed", "false"),
                ("subtasks", "true"),
            ]);

        let response: TaskListResponse = send_json(request, "clickup tasks", &self.ctx.retry).await?;
        debug!(list_id = %self.list_id, count = response.tasks.len(), "Fetched ClickUp tasks");
        Ok(response.tasks)
    }
}

#[async_trait]
impl TaskProvider for ClickUpClient {
    async fn open_tasks(&self, today: NaiveDate, limit: usize) -> Result<Vec<TaskRecord>, SourceError> {
        self.list_open_tasks(today, limit).await
    }
}

/// Filter out finished tasks, convert, order and truncate.
pub fn open_tasks(tasks: &[ClickUpTask], tz: Tz, today: NaiveDate, limit: usize) -> Vec<TaskRecord> {
    let mut records: Vec<TaskRecord> = tasks
        .iter()
        .filter(|task| !task.status.is_done())
        .map(|task| task.to_record(tz, today))
        .collect();

    records.sort_by(|a, b| match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    records.truncate(limit);
    records
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct TaskListResponse {
    #[serde(default)]
    pub tasks: Vec<ClickUpTask>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClickUpTask {
    pub id: String,
    pub name: String,
    pub status: TaskStatus,

    /// Unix milliseconds as a string.
    #[serde(default)]
    pub due_date: Option<String>,

    #[serde(default)]
    pub assignees: Vec<Assignee>,

    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskStatus {
    pub status: String,
    #[serde(default, rename = "type")]
    pub status_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assignee {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        let by_type = self
            .status_type
            .as_deref()
            .is_some_and(|t| DONE_STATUS_TYPES.contains(&t.to_lowercase().as_str()));
        by_type || status_label_is_done(&self.status)
    }
}

impl ClickUpTask {
    /// Local calendar date of the due timestamp.
    pub fn due_date_in(&self, tz: Tz) -> Option<NaiveDate> {
        let millis: i64 = self.due_date.as_deref()?.trim().parse().ok()?;
        DateTime::from_timestamp_millis(millis).map(|utc| utc.with_timezone(&tz).date_naive())
    }

    pub fn to_record(&self, tz: Tz, today: NaiveDate) -> TaskRecord {
        let mut record = TaskRecord::new(&self.name, &self.status.status, self.due_date_in(tz), today);

        let assignee = self
            .assignees
            .iter()
            .find_map(|a| a.username.as_deref().or(a.email.as_deref()));
        if let Some(name) = assignee {
            record = record.with_assignee(name);
        }
        if let Some(url) = &self.url {
            record = record.with_url(url);
        }
        record
    }
}
