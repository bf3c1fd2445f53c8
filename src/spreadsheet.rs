//! Sections derived from spreadsheet rows: the ministry tally and the
//! filming schedule.
//!
//! Sheets are maintained by hand, so column names and date formats are
//! matched loosely.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::model::{FilmingSlot, MinistryKind, MinistryTally, SheetRow};

const KIND_COLUMNS: &[&str] = &["type", "kind", "category", "metric"];
const COUNT_COLUMNS: &[&str] = &["count", "qty", "amount", "number"];

const DATE_COLUMNS: &[&str] = &["date", "day", "filming date", "shoot date"];
const TIME_COLUMNS: &[&str] = &["time", "time range", "timeslot", "slot", "hours"];
const TITLE_COLUMNS: &[&str] = &["title", "label", "event", "description", "shoot"];

/// Accepted filming dates, tried in order.
const SLOT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%a, %b %d, %Y",
    "%A, %B %d, %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Timestamp written into appended ministry rows.
const APPEND_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The value of the first column whose header matches one of `candidates`
/// (case-insensitive, trimmed).
pub fn column<'a>(row: &'a SheetRow, candidates: &[&str]) -> Option<&'a str> {
    candidates.iter().find_map(|wanted| {
        row.iter()
            .find(|(header, _)| header.trim().eq_ignore_ascii_case(wanted))
            .map(|(_, value)| value.as_str())
    })
}

/// Sum ministry rows by kind. Rows with no recognizable kind are ignored.
pub fn tally_ministry(rows: &[SheetRow]) -> MinistryTally {
    let mut tally = MinistryTally::default();

    for row in rows {
        let Some(kind) = column(row, KIND_COLUMNS).and_then(MinistryKind::classify) else {
            continue;
        };
        let count = column(row, COUNT_COLUMNS)
            .and_then(|c| c.trim().parse::<u64>().ok())
            .unwrap_or(1);
        tally.add(kind, count);
    }

    tally
}

/// Cells for one appended ministry row: local timestamp, kind, count of one.
pub fn ministry_row(kind: MinistryKind, now: DateTime<Utc>, tz: Tz) -> Vec<String> {
    vec![
        now.with_timezone(&tz).format(APPEND_TIMESTAMP_FORMAT).to_string(),
        kind.label().to_string(),
        "1".to_string(),
    ]
}

pub fn parse_slot_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    SLOT_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Slots on or after `today`, soonest first, at most `limit`.
pub fn upcoming_slots(rows: &[SheetRow], today: NaiveDate, limit: usize) -> Vec<FilmingSlot> {
    let mut slots: Vec<FilmingSlot> = rows
        .iter()
        .filter_map(|row| {
            let raw_date = column(row, DATE_COLUMNS)?;
            let Some(date) = parse_slot_date(raw_date) else {
                debug!(date = %raw_date, "Skipping filming row with unparsable date");
                return None;
            };
            Some(FilmingSlot {
                date,
                time_range: column(row, TIME_COLUMNS).unwrap_or_default().to_string(),
                title: column(row, TITLE_COLUMNS).unwrap_or_default().to_string(),
            })
        })
        .filter(|slot| slot.date >= today)
        .collect();

    slots.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time_range.cmp(&b.time_range)));
    slots.truncate(limit);
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(pairs: &[(&str, &str)]) -> SheetRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_tally_counts_and_defaults() {
        let rows = vec![
            row(&[("Timestamp", "2025-08-20 10:00"), ("Type", "Prayer request"), ("Count", "2")]),
            row(&[("Timestamp", "2025-08-20 11:00"), ("Type", "Bible Study"), ("Count", "")]),
            row(&[("Timestamp", "2025-08-21 09:00"), ("Type", "baptism")]),
            row(&[("Timestamp", "2025-08-21 09:30"), ("Type", "Prayer"), ("Count", "many")]),
            row(&[("Timestamp", "2025-08-21 09:45"), ("Type", "Potluck"), ("Count", "40")]),
        ];
        assert_eq!(
            tally_ministry(&rows),
            MinistryTally {
                prayer: 3,
                studies: 1,
                baptisms: 1,
            }
        );
    }

    #[test]
    fn test_tally_alternate_headers() {
        let rows = vec![row(&[(" CATEGORY ", "Studies"), ("Qty", "4")])];
        assert_eq!(tally_ministry(&rows).studies, 4);
    }

    #[test]
    fn test_ministry_row_uses_local_time() {
        let now = Utc.with_ymd_and_hms(2025, 8, 22, 2, 15, 0).unwrap();
        assert_eq!(
            ministry_row(MinistryKind::Baptisms, now, chrono_tz::America::Chicago),
            vec!["2025-08-21 21:15", "Baptisms", "1"]
        );
    }

    #[test]
    fn test_slot_date_formats() {
        let expected = Some(date(2025, 8, 23));
        assert_eq!(parse_slot_date("2025-08-23"), expected);
        assert_eq!(parse_slot_date("08/23/2025"), expected);
        assert_eq!(parse_slot_date("Sat, Aug 23, 2025"), expected);
        assert_eq!(parse_slot_date("Saturday, August 23, 2025"), expected);
        assert_eq!(parse_slot_date(" Aug 23, 2025 "), expected);
        assert_eq!(parse_slot_date("August 23, 2025"), expected);
        assert_eq!(parse_slot_date("next saturday"), None);
    }

    #[test]
    fn test_upcoming_slots_filtered_sorted_limited() {
        let today = date(2025, 8, 22);
        let rows = vec![
            row(&[("Date", "2025-08-28"), ("Time", "9:00–10:30 AM"), ("Title", "Youth Reels")]),
            row(&[("Date", "2025-08-21"), ("Time", "1:00–3:00 PM"), ("Title", "Past")]),
            row(&[("Date", "TBD"), ("Time", "?"), ("Title", "Someday")]),
            row(&[("Date", "2025-08-22"), ("Time", "1:00–3:00 PM"), ("Title", "Worship Set")]),
            row(&[("Date", "Aug 25, 2025"), ("Time Range", "10:30–12:00"), ("Event", "Testimony")]),
            row(&[("Date", "2025-09-02"), ("Time", "all day"), ("Title", "Overflow")]),
        ];

        let slots = upcoming_slots(&rows, today, 3);
        let titles: Vec<&str> = slots.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Worship Set", "Testimony", "Youth Reels"]);
        assert_eq!(slots[1].time_range, "10:30–12:00");
    }
}
