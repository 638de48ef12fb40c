use tracing::debug;

use crate::date::{EPOCH_DATE, WorldDate};
use crate::events::{CalendarEvent, events_for_date};
use crate::moon::{MoonInfo, moon_info};
use crate::weekday::{Weekday, weekday};

/// Tracks the campaign's current in-world date.
///
/// All movement goes through [`WorldDate`] arithmetic, so the clock never
/// holds an out-of-range date and never moves before the epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldClock {
    current: WorldDate,
}

impl Default for WorldClock {
    fn default() -> Self {
        Self::new(EPOCH_DATE)
    }
}

impl WorldClock {
    /// Create a clock showing `date`.
    pub fn new(date: WorldDate) -> Self {
        Self { current: date }
    }

    /// The current date.
    pub fn current(&self) -> WorldDate {
        self.current
    }

    /// Jump to `date`.
    pub fn set(&mut self, date: WorldDate) {
        debug!(from = %self.current, to = %date, "clock set");
        self.current = date;
    }

    /// Return to the epoch date.
    pub fn reset(&mut self) {
        self.set(EPOCH_DATE);
    }

    /// Move by `delta` minutes. Returns the new date.
    pub fn advance_minutes(&mut self, delta: i64) -> WorldDate {
        let next = self.current.add_minutes(delta);
        debug!(delta, from = %self.current, to = %next, "clock advanced");
        self.current = next;
        next
    }

    /// Move by `delta` hours. Returns the new date.
    pub fn advance_hours(&mut self, delta: i64) -> WorldDate {
        let next = self.current.add_hours(delta);
        debug!(delta_hours = delta, to = %next, "clock advanced");
        self.current = next;
        next
    }

    /// Move by `delta` days. Returns the new date.
    pub fn advance_days(&mut self, delta: i64) -> WorldDate {
        let next = self.current.add_days(delta);
        debug!(delta_days = delta, to = %next, "clock advanced");
        self.current = next;
        next
    }

    /// Weekday of the current date.
    pub fn weekday(&self) -> Weekday {
        weekday(&self.current)
    }

    /// Moon phase of the current date.
    pub fn moon(&self) -> MoonInfo {
        moon_info(&self.current)
    }

    /// Festivals on the current date.
    pub fn events_today<'a>(&self, table: &'a [CalendarEvent]) -> Vec<&'a CalendarEvent> {
        events_for_date(&self.current, table)
    }
}
