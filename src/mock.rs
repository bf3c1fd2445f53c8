//! Built-in mock records, one per section.
//!
//! Shown whenever a section's source fails. Dated records are built
//! relative to the render's own clock so they never look stale.

use chrono::{Duration, NaiveDate};

use crate::model::{
    ChannelStats, CountryViewRecord, FilmingSlot, MinistryTally, SocialStats, TaskRecord,
};

pub const CHANNEL_STATS: ChannelStats = ChannelStats {
    subscriber_count: 15_890,
    lifetime_view_count: 145_000_000,
};

/// Oldest first; aligned so the last value lands on yesterday.
pub const DAILY_VIEWS: [u64; 7] = [23_500, 27_100, 24_800, 30_100, 28_900, 33_000, 35_120];

pub const INSTAGRAM: SocialStats = SocialStats {
    followers: 6_050,
    views_7d: 42_300,
};

pub const TIKTOK: SocialStats = SocialStats {
    followers: 11_032,
    views_7d: 57_900,
};

pub const MINISTRY: MinistryTally = MinistryTally {
    prayer: 15,
    studies: 8,
    baptisms: 1,
};

const COUNTRY_VIEWS: &[(&str, u64)] = &[
    ("US", 52_000),
    ("MY", 22_000),
    ("PH", 15_000),
    ("IN", 30_000),
    ("KE", 12_000),
    ("AU", 9_000),
];

pub fn country_views() -> Vec<CountryViewRecord> {
    COUNTRY_VIEWS
        .iter()
        .map(|(code, views)| CountryViewRecord::new(code, *views))
        .collect()
}

pub fn tasks(today: NaiveDate) -> Vec<TaskRecord> {
    vec![
        TaskRecord::new(
            "Shoot testimony interview",
            "In Progress",
            Some(today + Duration::days(1)),
            today,
        ),
        TaskRecord::new(
            "Schedule weekend posts",
            "In Progress",
            Some(today + Duration::days(2)),
            today,
        ),
        TaskRecord::new("Outline next video", "Not Done", None, today),
    ]
}

pub fn filming_slots(today: NaiveDate) -> Vec<FilmingSlot> {
    let slot = |offset: i64, time_range: &str, title: &str| FilmingSlot {
        date: today + Duration::days(offset),
        time_range: time_range.to_string(),
        title: title.to_string(),
    };
    vec![
        slot(1, "1:00–3:00 PM", "Worship Set"),
        slot(3, "10:30–12:00", "Testimony Recording"),
        slot(6, "9:00–10:30 AM", "Youth Reels"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_dates_are_upcoming() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 22).unwrap();
        assert!(filming_slots(today).iter().all(|s| s.date > today));
        assert!(tasks(today).iter().all(|t| !t.is_overdue));
    }
}
