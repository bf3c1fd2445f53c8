//! Data models for LoudVoice.
//!
//! Every record here is a transient value: built fresh on each render (or
//! served from the short-TTL cache), never mutated after construction, and
//! dropped when the render completes.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Live subscriber and lifetime view totals for the primary channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub subscriber_count: u64,
    pub lifetime_view_count: u64,
}

/// Follower count and trailing 7-day views for a short-form platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialStats {
    pub followers: u64,
    pub views_7d: u64,
}

/// One row of a reporting API's day-bucketed series, as returned.
///
/// `day` is the provider's `YYYY-MM-DD` label for a UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDailyRow {
    pub day: String,
    pub views: u64,
}

impl RawDailyRow {
    pub fn new(day: &str, views: u64) -> Self {
        Self {
            day: day.to_string(),
            views,
        }
    }
}

/// Views for a single local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyViewPoint {
    pub date: NaiveDate,
    pub view_count: u64,
}

/// Sparse per-country views as returned by the reporting source.
///
/// `country_code` may be ISO alpha-2, alpha-3 or a colloquial name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryViewRecord {
    pub country_code: String,
    pub view_count: u64,
}

impl CountryViewRecord {
    pub fn new(country_code: &str, view_count: u64) -> Self {
        Self {
            country_code: country_code.to_string(),
            view_count,
        }
    }
}

/// One canonical country in the zero-filled choropleth dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldCoverageRow {
    pub iso3: String,
    pub display_name: String,
    pub view_count: u64,
}

/// An open task from the project tracker.
///
/// `is_overdue` is a point-in-time value computed when the record is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub title: String,
    pub status_label: String,
    pub due_date: Option<NaiveDate>,
    pub is_overdue: bool,
    pub assignee: Option<String>,
    pub detail_url: Option<String>,
}

impl TaskRecord {
    /// Build a task, deriving `is_overdue` against `today`.
    pub fn new(title: &str, status_label: &str, due_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            title: title.to_string(),
            status_label: status_label.to_string(),
            due_date,
            is_overdue: due_date.is_some_and(|due| due < today),
            assignee: None,
            detail_url: None,
        }
    }

    pub fn with_assignee(mut self, assignee: &str) -> Self {
        self.assignee = Some(assignee.to_string());
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.detail_url = Some(url.to_string());
        self
    }
}

/// Substrings of a status label that mean finished.
const DONE_LABEL_MARKERS: &[&str] = &["done", "complete", "closed"];

/// Substrings that cancel a done marker ("incomplete", "undone").
const NEGATED_LABEL_MARKERS: &[&str] = &["incomplete", "uncomplete", "undone", "unclosed"];

/// Whether a free-text status label reads as finished.
///
/// "Not Done", "Incomplete" and "not complete" stay open.
pub fn status_label_is_done(label: &str) -> bool {
    let label = label.to_lowercase();
    let negated = label
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == "not")
        || NEGATED_LABEL_MARKERS.iter().any(|m| label.contains(m));
    !negated && DONE_LABEL_MARKERS.iter().any(|m| label.contains(m))
}

/// A booked filming slot from the schedule sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmingSlot {
    pub date: NaiveDate,
    pub time_range: String,
    pub title: String,
}

/// One spreadsheet row keyed by its (trimmed) header cell.
pub type SheetRow = HashMap<String, String>;

/// Ministry activity tracked in the spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinistryKind {
    Prayer,
    Studies,
    Baptisms,
}

impl MinistryKind {
    pub fn label(&self) -> &'static str {
        match self {
            MinistryKind::Prayer => "Prayer",
            MinistryKind::Studies => "Studies",
            MinistryKind::Baptisms => "Baptisms",
        }
    }

    /// Classify a free-form sheet cell ("Prayer request", "Bible study", ...).
    pub fn classify(cell: &str) -> Option<Self> {
        let lowered = cell.to_lowercase();
        if lowered.contains("pray") {
            Some(MinistryKind::Prayer)
        } else if lowered.contains("stud") {
            Some(MinistryKind::Studies)
        } else if lowered.contains("bapt") {
            Some(MinistryKind::Baptisms)
        } else {
            None
        }
    }
}

impl FromStr for MinistryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prayer" | "prayers" => Ok(MinistryKind::Prayer),
            "study" | "studies" => Ok(MinistryKind::Studies),
            "baptism" | "baptisms" => Ok(MinistryKind::Baptisms),
            other => Err(format!("unknown ministry kind '{}'", other)),
        }
    }
}

/// Running ministry totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinistryTally {
    pub prayer: u64,
    pub studies: u64,
    pub baptisms: u64,
}

impl MinistryTally {
    pub fn add(&mut self, kind: MinistryKind, count: u64) {
        match kind {
            MinistryKind::Prayer => self.prayer += count,
            MinistryKind::Studies => self.studies += count,
            MinistryKind::Baptisms => self.baptisms += count,
        }
    }
}

/// Every integration point that can independently degrade to mock data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceName {
    YoutubeStats,
    YoutubeDailyViews,
    YoutubeCountryViews,
    Instagram,
    Tiktok,
    Tasks,
    MinistrySheet,
    FilmingSheet,
}

impl SourceName {
    pub fn label(&self) -> &'static str {
        match self {
            SourceName::YoutubeStats => "YouTube stats",
            SourceName::YoutubeDailyViews => "YouTube daily views",
            SourceName::YoutubeCountryViews => "YouTube country views",
            SourceName::Instagram => "Instagram",
            SourceName::Tiktok => "TikTok",
            SourceName::Tasks => "ClickUp tasks",
            SourceName::MinistrySheet => "Ministry tracker",
            SourceName::FilmingSheet => "Filming schedule",
        }
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a section is showing live data, and why not if it isn't.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceHealth {
    pub source: SourceName,
    pub is_live: bool,
    pub error_message: Option<String>,
}

impl SourceHealth {
    pub fn live(source: SourceName) -> Self {
        Self {
            source,
            is_live: true,
            error_message: None,
        }
    }

    pub fn degraded(source: SourceName, message: &str) -> Self {
        Self {
            source,
            is_live: false,
            error_message: Some(message.to_string()),
        }
    }

    /// One-line notice for the display, `None` when live.
    pub fn notice(&self) -> Option<String> {
        if self.is_live {
            return None;
        }
        Some(match &self.error_message {
            Some(message) => format!("Using mock data for {}: {}", self.source, message),
            None => format!("Using mock data for {}", self.source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_task_overdue_when_due_before_today() {
        let today = date(2025, 8, 22);
        let task = TaskRecord::new("Edit reel", "open", Some(date(2025, 8, 21)), today);
        assert!(task.is_overdue);
    }

    #[test]
    fn test_task_not_overdue_on_due_date_or_undated() {
        let today = date(2025, 8, 22);
        assert!(!TaskRecord::new("a", "open", Some(today), today).is_overdue);
        assert!(!TaskRecord::new("b", "open", None, today).is_overdue);
    }

    #[test]
    fn test_status_label_done_rule() {
        assert!(status_label_is_done("Done"));
        assert!(status_label_is_done("COMPLETE"));
        assert!(status_label_is_done("Completed"));
        assert!(status_label_is_done("closed - archived"));
        assert!(!status_label_is_done("Not Done"));
        assert!(!status_label_is_done("not complete"));
        assert!(!status_label_is_done("Incomplete"));
        assert!(!status_label_is_done("In Progress"));
        assert!(!status_label_is_done("to do"));
    }

    #[test]
    fn test_ministry_kind_classify() {
        assert_eq!(MinistryKind::classify("Prayer request"), Some(MinistryKind::Prayer));
        assert_eq!(MinistryKind::classify("Bible Study"), Some(MinistryKind::Studies));
        assert_eq!(MinistryKind::classify("BAPTISM"), Some(MinistryKind::Baptisms));
        assert_eq!(MinistryKind::classify("visit"), None);
    }

    #[test]
    fn test_ministry_kind_parse() {
        assert_eq!("prayer".parse::<MinistryKind>(), Ok(MinistryKind::Prayer));
        assert_eq!("Studies".parse::<MinistryKind>(), Ok(MinistryKind::Studies));
        assert!("offering".parse::<MinistryKind>().is_err());
    }

    #[test]
    fn test_source_health_notice() {
        assert_eq!(SourceHealth::live(SourceName::Tasks).notice(), None);
        let degraded = SourceHealth::degraded(SourceName::Instagram, "token expired");
        assert_eq!(
            degraded.notice().unwrap(),
            "Using mock data for Instagram: token expired"
        );
    }
}
