//! Daily series normalization.
//!
//! The reporting API buckets views by UTC day and only finalizes a day once
//! it is over, so the newest trustworthy day is always yesterday (UTC). The
//! display, on the other hand, labels bars by local calendar day. This module
//! reconciles the two.

use std::collections::BTreeMap;
use std::iter;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::error::SourceError;
use crate::model::{DailyViewPoint, RawDailyRow};

/// Longest reporting window, in days.
pub const MAX_WINDOW_DAYS: u32 = 90;

/// Date format the reporting API uses for day buckets.
const DAY_FORMAT: &str = "%Y-%m-%d";

/// An inclusive range of UTC days to request from the reporting API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportingWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportingWindow {
    /// The trailing `days` complete UTC days, ending yesterday relative to `now`.
    ///
    /// `days` is clamped to `1..=MAX_WINDOW_DAYS`.
    pub fn ending_yesterday(now: DateTime<Utc>, days: u32) -> Self {
        let end = now.date_naive() - Duration::days(1);
        let start = end - Duration::days(i64::from(days.clamp(1, MAX_WINDOW_DAYS)) - 1);
        Self { start, end }
    }

    pub fn len_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Local calendar days spanned by this window, ascending.
    pub fn local_days(&self, tz: Tz) -> Vec<NaiveDate> {
        let first = local_date_of(self.start, tz);
        let last = local_date_of(self.end, tz);
        first.iter_days().take_while(|d| *d <= last).collect()
    }
}

/// The local calendar date of midnight UTC on `utc_day`.
pub fn local_date_of(utc_day: NaiveDate, tz: Tz) -> NaiveDate {
    Utc.from_utc_datetime(&utc_day.and_time(NaiveTime::MIN))
        .with_timezone(&tz)
        .date_naive()
}

/// Turn raw UTC day rows into a local-day series.
///
/// Rows outside `window` (notably today's partial figures) and rows with
/// unparsable dates are dropped. Rows that land on the same local day are
/// summed. The result is strictly ascending by date. Missing days are left
/// absent; see [`zero_fill`].
pub fn normalize(raw: &[RawDailyRow], tz: Tz, window: &ReportingWindow) -> Vec<DailyViewPoint> {
    let mut buckets: BTreeMap<NaiveDate, u64> = BTreeMap::new();

    for row in raw {
        let day = match NaiveDate::parse_from_str(row.day.trim(), DAY_FORMAT) {
            Ok(day) => day,
            Err(e) => {
                debug!(day = %row.day, error = %e, "Skipping unparsable daily row");
                continue;
            }
        };

        if !window.contains(day) {
            debug!(%day, start = %window.start, end = %window.end, "Skipping daily row outside window");
            continue;
        }

        let bucket = buckets.entry(local_date_of(day, tz)).or_insert(0);
        *bucket = bucket.saturating_add(row.views);
    }

    buckets
        .into_iter()
        .map(|(date, view_count)| DailyViewPoint { date, view_count })
        .collect()
}

/// Reject a series too short to display.
pub fn ensure_viable(
    points: Vec<DailyViewPoint>,
    min_points: usize,
) -> Result<Vec<DailyViewPoint>, SourceError> {
    if points.len() < min_points {
        return Err(SourceError::TooFewPoints {
            got: points.len(),
            needed: min_points,
        });
    }
    Ok(points)
}

/// One point per label day; days with no data get zero.
pub fn zero_fill(points: &[DailyViewPoint], days: &[NaiveDate]) -> Vec<DailyViewPoint> {
    let by_date: BTreeMap<NaiveDate, u64> =
        points.iter().map(|p| (p.date, p.view_count)).collect();

    days.iter()
        .map(|&date| DailyViewPoint {
            date,
            view_count: by_date.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// Synthetic series labeled exactly like a live one.
///
/// `values` are aligned to the most recent days; if there are fewer values
/// than days, the oldest days are zero.
pub fn mock_series(window: &ReportingWindow, tz: Tz, values: &[u64]) -> Vec<DailyViewPoint> {
    let days = window.local_days(tz);
    let mut points: Vec<DailyViewPoint> = days
        .iter()
        .rev()
        .zip(values.iter().rev().chain(iter::repeat(&0)))
        .map(|(&date, &view_count)| DailyViewPoint { date, view_count })
        .collect();
    points.reverse();
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::{America, Asia};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 22, 10, 30, 0).unwrap()
    }

    fn point(y: i32, m: u32, d: u32, view_count: u64) -> DailyViewPoint {
        DailyViewPoint {
            date: date(y, m, d),
            view_count,
        }
    }

    #[test]
    fn test_window_ends_yesterday() {
        let window = ReportingWindow::ending_yesterday(now(), 7);
        assert_eq!(window.end, date(2025, 8, 21));
        assert_eq!(window.start, date(2025, 8, 15));
        assert_eq!(window.len_days(), 7);
    }

    #[test]
    fn test_window_length_is_capped() {
        let window = ReportingWindow::ending_yesterday(now(), 4_000_000_000);
        assert_eq!(window.end, date(2025, 8, 21));
        assert_eq!(window.len_days(), MAX_WINDOW_DAYS as usize);
    }

    #[test]
    fn test_window_at_utc_midnight() {
        let midnight = Utc.with_ymd_and_hms(2025, 8, 22, 0, 0, 0).unwrap();
        let window = ReportingWindow::ending_yesterday(midnight, 1);
        assert_eq!(window.start, date(2025, 8, 21));
        assert_eq!(window.end, date(2025, 8, 21));
    }

    #[test]
    fn test_utc_rows_pass_through_in_order() {
        let window = ReportingWindow::ending_yesterday(now(), 7);
        let raw = vec![
            RawDailyRow::new("2025-08-20", 100),
            RawDailyRow::new("2025-08-21", 200),
        ];
        let points = normalize(&raw, chrono_tz::UTC, &window);
        assert_eq!(points, vec![point(2025, 8, 20, 100), point(2025, 8, 21, 200)]);
    }

    #[test]
    fn test_same_day_figures_are_dropped() {
        let window = ReportingWindow::ending_yesterday(now(), 7);
        let raw = vec![
            RawDailyRow::new("2025-08-21", 200),
            RawDailyRow::new("2025-08-22", 999),
            RawDailyRow::new("2025-08-23", 999),
        ];
        let points = normalize(&raw, chrono_tz::UTC, &window);
        assert_eq!(points, vec![point(2025, 8, 21, 200)]);
        assert!(points.iter().all(|p| p.date <= window.end));
    }

    #[test]
    fn test_west_of_utc_shifts_to_previous_local_day() {
        let window = ReportingWindow::ending_yesterday(now(), 7);
        let raw = vec![RawDailyRow::new("2025-08-21", 50)];
        let points = normalize(&raw, America::New_York, &window);
        assert_eq!(points, vec![point(2025, 8, 20, 50)]);
    }

    #[test]
    fn test_east_of_utc_keeps_date() {
        let window = ReportingWindow::ending_yesterday(now(), 7);
        let raw = vec![RawDailyRow::new("2025-08-21", 50)];
        let points = normalize(&raw, Asia::Manila, &window);
        assert_eq!(points, vec![point(2025, 8, 21, 50)]);
    }

    #[test]
    fn test_duplicate_days_are_summed() {
        let window = ReportingWindow::ending_yesterday(now(), 7);
        let raw = vec![
            RawDailyRow::new("2025-08-19", 10),
            RawDailyRow::new("2025-08-18", 5),
            RawDailyRow::new("2025-08-19", 32),
            RawDailyRow::new("2025-08-18", 1),
        ];
        let points = normalize(&raw, chrono_tz::UTC, &window);
        assert_eq!(points, vec![point(2025, 8, 18, 6), point(2025, 8, 19, 42)]);
    }

    #[test]
    fn test_output_strictly_ascending_for_shuffled_input() {
        let window = ReportingWindow::ending_yesterday(now(), 7);
        let raw: Vec<RawDailyRow> = ["2025-08-17", "2025-08-21", "2025-08-15", "2025-08-21", "2025-08-16"]
            .iter()
            .map(|d| RawDailyRow::new(d, 1))
            .collect();

        for tz in [chrono_tz::UTC, America::Los_Angeles, Asia::Tokyo] {
            let points = normalize(&raw, tz, &window);
            assert!(points.windows(2).all(|w| w[0].date < w[1].date));
            assert_eq!(points.iter().map(|p| p.view_count).sum::<u64>(), 5);
        }
    }

    #[test]
    fn test_unparsable_rows_skipped() {
        let window = ReportingWindow::ending_yesterday(now(), 7);
        let raw = vec![
            RawDailyRow::new("Tue", 10),
            RawDailyRow::new("2025-08-20", 7),
        ];
        assert_eq!(normalize(&raw, chrono_tz::UTC, &window), vec![point(2025, 8, 20, 7)]);
    }

    #[test]
    fn test_ensure_viable() {
        assert_eq!(
            ensure_viable(vec![], 1),
            Err(SourceError::TooFewPoints { got: 0, needed: 1 })
        );
        assert!(ensure_viable(vec![point(2025, 8, 20, 1)], 1).is_ok());
    }

    #[test]
    fn test_zero_fill_pads_gaps() {
        let window = ReportingWindow::ending_yesterday(now(), 4);
        let days = window.local_days(chrono_tz::UTC);
        let filled = zero_fill(&[point(2025, 8, 19, 9), point(2025, 8, 21, 4)], &days);
        assert_eq!(
            filled,
            vec![
                point(2025, 8, 18, 0),
                point(2025, 8, 19, 9),
                point(2025, 8, 20, 0),
                point(2025, 8, 21, 4),
            ]
        );
    }

    #[test]
    fn test_local_days_follow_timezone() {
        let window = ReportingWindow::ending_yesterday(now(), 3);
        assert_eq!(
            window.local_days(America::Chicago),
            vec![date(2025, 8, 18), date(2025, 8, 19), date(2025, 8, 20)]
        );
    }

    #[test]
    fn test_mock_series_ends_yesterday() {
        let window = ReportingWindow::ending_yesterday(now(), 7);
        let series = mock_series(&window, chrono_tz::UTC, &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(series.len(), 7);
        assert_eq!(series.first().unwrap(), &point(2025, 8, 15, 1));
        assert_eq!(series.last().unwrap(), &point(2025, 8, 21, 7));
    }

    #[test]
    fn test_mock_series_aligns_short_values_to_latest() {
        let window = ReportingWindow::ending_yesterday(now(), 3);
        let series = mock_series(&window, chrono_tz::UTC, &[8, 9]);
        assert_eq!(
            series,
            vec![point(2025, 8, 19, 0), point(2025, 8, 20, 8), point(2025, 8, 21, 9)]
        );
    }
}
