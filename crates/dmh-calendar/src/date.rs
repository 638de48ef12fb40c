use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::season::Season;

/// Days in every season. Seasons never vary in length.
pub const DAYS_PER_SEASON: i64 = 30;
/// Seasons in a year.
pub const SEASONS_PER_YEAR: i64 = 4;
/// Days in a year (120).
pub const DAYS_PER_YEAR: i64 = DAYS_PER_SEASON * SEASONS_PER_YEAR;

/// Hours in a day.
pub const HOURS_PER_DAY: i64 = 24;
/// Minutes in an hour.
pub const MINUTES_PER_HOUR: i64 = 60;
/// Minutes in a day (1440).
pub const MINUTES_PER_DAY: i64 = HOURS_PER_DAY * MINUTES_PER_HOUR;

/// Year of the epoch date.
pub const EPOCH_YEAR: i64 = 1000;

/// The reference point of the linear timeline: year 1000, spring, day 1, 05:00.
pub const EPOCH_DATE: WorldDate = WorldDate {
    year: EPOCH_YEAR,
    season: Season::Spring,
    day: 1,
    hour: 5,
    minute: 0,
};

/// A moment in the world calendar.
///
/// Serializes to the persisted shape
/// `{"year": 1000, "season": "spring", "day": 1, "hour": 5, "minute": 0}`.
///
/// Dates produced by this module always have `day` in `1..=30`, `hour` in
/// `0..=23` and `minute` in `0..=59`. Arithmetic goes through the linear
/// minute count ([`WorldDate::minutes_since_epoch`]) so carrying between
/// fields happens in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorldDate {
    /// Calendar year. The timeline starts at [`EPOCH_YEAR`].
    pub year: i64,
    /// Season within the year.
    pub season: Season,
    /// Day within the season, 1-based.
    pub day: u32,
    /// Hour of the day (0..=23).
    pub hour: u32,
    /// Minute of the hour (0..=59).
    pub minute: u32,
}

impl Default for WorldDate {
    fn default() -> Self {
        EPOCH_DATE
    }
}

impl WorldDate {
    /// Create a date from its five fields. No normalization is applied.
    pub fn new(year: i64, season: Season, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            year,
            season,
            day,
            hour,
            minute,
        }
    }

    /// True if every field is within its calendar range.
    pub fn is_valid(&self) -> bool {
        self.validated().is_ok()
    }

    /// Return the date unchanged if it is valid, or describe the offending field.
    pub fn validated(self) -> CalendarResult<Self> {
        if !(1..=DAYS_PER_SEASON as u32).contains(&self.day) {
            return Err(CalendarError::InvalidDate(format!(
                "day {} outside 1..={DAYS_PER_SEASON}",
                self.day
            )));
        }
        if self.hour >= HOURS_PER_DAY as u32 {
            return Err(CalendarError::InvalidDate(format!(
                "hour {} outside 0..{HOURS_PER_DAY}",
                self.hour
            )));
        }
        if self.minute >= MINUTES_PER_HOUR as u32 {
            return Err(CalendarError::InvalidDate(format!(
                "minute {} outside 0..{MINUTES_PER_HOUR}",
                self.minute
            )));
        }
        Ok(self)
    }

    /// Number of days between the epoch and this date, ignoring time of day.
    ///
    /// Dates before the epoch give negative values; nothing is clamped here.
    pub fn day_index(&self) -> i64 {
        let year_offset = self.year.saturating_sub(EPOCH_YEAR);
        let day_of_year = self.season.index() as i64 * DAYS_PER_SEASON + (i64::from(self.day) - 1);
        year_offset
            .saturating_mul(DAYS_PER_YEAR)
            .saturating_add(day_of_year)
    }

    /// Inverse of [`WorldDate::day_index`].
    ///
    /// Negative indices clamp to the epoch day. `hour` and `minute` are
    /// clamped into their ranges.
    pub fn from_day_index(idx: i64, hour: u32, minute: u32) -> Self {
        let idx = idx.max(0);

        let year = EPOCH_YEAR + idx / DAYS_PER_YEAR;
        let day_of_year = idx % DAYS_PER_YEAR;
        let season = Season::ALL[(day_of_year / DAYS_PER_SEASON) as usize];
        let day = (day_of_year % DAYS_PER_SEASON) as u32 + 1;

        Self {
            year,
            season,
            day,
            hour: hour.min(HOURS_PER_DAY as u32 - 1),
            minute: minute.min(MINUTES_PER_HOUR as u32 - 1),
        }
    }

    /// Position of this date on the linear timeline, in minutes since the epoch day's midnight.
    pub fn minutes_since_epoch(&self) -> i64 {
        self.day_index()
            .saturating_mul(MINUTES_PER_DAY)
            .saturating_add(i64::from(self.hour) * MINUTES_PER_HOUR)
            .saturating_add(i64::from(self.minute))
    }

    /// Rebuild a date from a linear minute count. Negative totals clamp to 0.
    pub fn from_minutes(total_minutes: i64) -> Self {
        let total = total_minutes.max(0);

        let day_index = total / MINUTES_PER_DAY;
        let minutes_in_day = total % MINUTES_PER_DAY;

        let hour = (minutes_in_day / MINUTES_PER_HOUR) as u32;
        let minute = (minutes_in_day % MINUTES_PER_HOUR) as u32;

        Self::from_day_index(day_index, hour, minute)
    }

    /// A new date `delta` minutes away from this one (negative goes back).
    ///
    /// Results never fall before the start of the epoch day.
    pub fn add_minutes(&self, delta: i64) -> Self {
        Self::from_minutes(self.minutes_since_epoch().saturating_add(delta))
    }

    /// A new date `delta` hours away from this one.
    pub fn add_hours(&self, delta: i64) -> Self {
        self.add_minutes(delta.saturating_mul(MINUTES_PER_HOUR))
    }

    /// A new date `delta` days away from this one.
    pub fn add_days(&self, delta: i64) -> Self {
        self.add_minutes(delta.saturating_mul(MINUTES_PER_DAY))
    }

    /// Same calendar day at a different time of day.
    pub fn at_time(&self, hour: u32, minute: u32) -> Self {
        Self::from_day_index(self.day_index(), hour, minute)
    }
}

impl fmt::Display for WorldDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Day {} of {}, Year {}, {:02}:{:02}",
            self.day,
            self.season.label(),
            self.year,
            self.hour,
            self.minute
        )
    }
}

/// Day index of `date` relative to the epoch.
pub fn day_index(date: &WorldDate) -> i64 {
    date.day_index()
}

/// Date for a day index at the given time of day.
pub fn date_from_day_index(idx: i64, hour: u32, minute: u32) -> WorldDate {
    WorldDate::from_day_index(idx, hour, minute)
}

/// Minutes elapsed on the linear timeline at `date`.
pub fn minutes_since_epoch(date: &WorldDate) -> i64 {
    date.minutes_since_epoch()
}

/// Date at a linear minute count.
pub fn date_from_minutes(total_minutes: i64) -> WorldDate {
    WorldDate::from_minutes(total_minutes)
}

/// `date` moved by `delta` minutes.
pub fn add_minutes(date: &WorldDate, delta: i64) -> WorldDate {
    date.add_minutes(delta)
}

/// `date` moved by `delta` hours.
pub fn add_hours(date: &WorldDate, delta: i64) -> WorldDate {
    date.add_hours(delta)
}

/// `date` moved by `delta` days.
pub fn add_days(date: &WorldDate, delta: i64) -> WorldDate {
    date.add_days(delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i64, season: Season, day: u32, hour: u32, minute: u32) -> WorldDate {
        WorldDate::new(year, season, day, hour, minute)
    }

    #[test]
    fn epoch_is_origin_of_timeline() {
        assert_eq!(EPOCH_DATE.day_index(), 0);
        assert_eq!(EPOCH_DATE.minutes_since_epoch(), 5 * 60);
        assert_eq!(WorldDate::default(), EPOCH_DATE);
    }

    #[test]
    fn day_index_counts_seasons_and_years() {
        assert_eq!(date(1000, Season::Summer, 1, 0, 0).day_index(), 30);
        assert_eq!(date(1000, Season::Winter, 30, 0, 0).day_index(), 119);
        assert_eq!(date(1001, Season::Spring, 1, 0, 0).day_index(), 120);
        assert_eq!(date(1002, Season::Autumn, 15, 0, 0).day_index(), 240 + 60 + 14);
    }

    #[test]
    fn day_index_before_epoch_is_negative() {
        assert_eq!(date(999, Season::Winter, 30, 0, 0).day_index(), -1);
        assert_eq!(date(999, Season::Spring, 1, 0, 0).day_index(), -120);
    }

    #[test]
    fn from_day_index_clamps_negative() {
        let d = WorldDate::from_day_index(-42, 6, 0);
        assert_eq!(d, date(1000, Season::Spring, 1, 6, 0));
    }

    #[test]
    fn from_day_index_decomposes() {
        assert_eq!(
            WorldDate::from_day_index(119, 23, 59),
            date(1000, Season::Winter, 30, 23, 59)
        );
        assert_eq!(
            WorldDate::from_day_index(365, 0, 0),
            date(1003, Season::Spring, 6, 0, 0)
        );
    }

    #[test]
    fn from_day_index_clamps_time_fields() {
        let d = WorldDate::from_day_index(0, 99, 75);
        assert_eq!((d.hour, d.minute), (23, 59));
    }

    #[test]
    fn from_minutes_clamps_negative() {
        assert_eq!(
            WorldDate::from_minutes(-1),
            date(1000, Season::Spring, 1, 0, 0)
        );
    }

    #[test]
    fn add_hours_rolls_into_next_day() {
        let d = EPOCH_DATE.add_hours(20);
        assert_eq!(d, date(1000, Season::Spring, 2, 1, 0));
    }

    #[test]
    fn add_minutes_carries_through_every_field() {
        let last_minute = date(1004, Season::Winter, 30, 23, 59);
        assert_eq!(
            last_minute.add_minutes(1),
            date(1005, Season::Spring, 1, 0, 0)
        );
    }

    #[test]
    fn add_days_crosses_season_boundary() {
        let d = date(1000, Season::Spring, 29, 12, 30).add_days(3);
        assert_eq!(d, date(1000, Season::Summer, 2, 12, 30));
    }

    #[test]
    fn negative_delta_goes_back() {
        let d = date(1001, Season::Spring, 1, 0, 0).add_minutes(-1);
        assert_eq!(d, date(1000, Season::Winter, 30, 23, 59));
    }

    #[test]
    fn negative_delta_clamps_at_epoch() {
        let d = EPOCH_DATE.add_days(-10);
        assert_eq!(d, date(1000, Season::Spring, 1, 0, 0));
    }

    #[test]
    fn add_days_full_year_keeps_season_and_day() {
        let d = date(1010, Season::Autumn, 17, 8, 45);
        let next = d.add_days(DAYS_PER_YEAR);
        assert_eq!(next, date(1011, Season::Autumn, 17, 8, 45));
    }

    #[test]
    fn add_is_pure() {
        let d = EPOCH_DATE;
        let _ = d.add_days(5);
        assert_eq!(d, EPOCH_DATE);
    }

    #[test]
    fn huge_deltas_saturate_instead_of_overflowing() {
        let d = EPOCH_DATE.add_days(i64::MIN);
        assert_eq!(d, date(1000, Season::Spring, 1, 0, 0));
        let far = EPOCH_DATE.add_days(i64::MAX);
        assert!(far.is_valid());
    }

    #[test]
    fn ordering_is_chronological() {
        let a = date(1000, Season::Winter, 30, 23, 59);
        let b = date(1001, Season::Spring, 1, 0, 0);
        assert!(a < b);
        assert_eq!(
            a.cmp(&b),
            a.minutes_since_epoch().cmp(&b.minutes_since_epoch())
        );
    }

    #[test]
    fn at_time_keeps_day() {
        let d = date(1003, Season::Summer, 12, 17, 5).at_time(6, 0);
        assert_eq!(d, date(1003, Season::Summer, 12, 6, 0));
    }

    #[test]
    fn validity() {
        assert!(EPOCH_DATE.is_valid());
        assert!(!date(1000, Season::Spring, 0, 0, 0).is_valid());
        assert!(!date(1000, Season::Spring, 31, 0, 0).is_valid());
        assert!(!date(1000, Season::Spring, 1, 24, 0).is_valid());
        assert!(!date(1000, Season::Spring, 1, 0, 60).is_valid());
    }

    #[test]
    fn validated_reports_field() {
        assert!(EPOCH_DATE.validated().is_ok());
        let err = date(1000, Season::Spring, 31, 0, 0).validated().unwrap_err();
        assert_eq!(err.to_string(), "invalid date: day 31 outside 1..=30");
        let err = date(1000, Season::Spring, 1, 24, 0).validated().unwrap_err();
        assert_eq!(err.to_string(), "invalid date: hour 24 outside 0..24");
    }

    #[test]
    fn display() {
        let s = date(1000, Season::Summer, 7, 9, 5).to_string();
        assert_eq!(s, "Day 7 of Verão, Year 1000, 09:05");
    }

    #[test]
    fn serde_persisted_shape() {
        let json = serde_json::to_value(EPOCH_DATE).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "year": 1000,
                "season": "spring",
                "day": 1,
                "hour": 5,
                "minute": 0,
            })
        );
    }

    #[test]
    fn free_functions_match_methods() {
        let d = date(1002, Season::Winter, 3, 14, 20);
        assert_eq!(day_index(&d), d.day_index());
        assert_eq!(minutes_since_epoch(&d), d.minutes_since_epoch());
        assert_eq!(date_from_minutes(minutes_since_epoch(&d)), d);
        assert_eq!(date_from_day_index(d.day_index(), 14, 20), d);
        assert_eq!(add_minutes(&d, 90), d.add_minutes(90));
        assert_eq!(add_hours(&d, -3), d.add_hours(-3));
        assert_eq!(add_days(&d, 7), d.add_days(7));
    }
}
