use serde::Serialize;

use crate::date::{DAYS_PER_SEASON, WorldDate};
use crate::events::{CalendarEvent, events_for_date};
use crate::moon::{MoonInfo, moon_info};
use crate::season::Season;
use crate::weekday::{Weekday, weekday};

/// Hour at which grid cells are evaluated. Time of day does not affect any
/// derived value, so this only fixes the date handed to the lookups.
pub const GRID_HOUR: u32 = 6;

/// One day of a season grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell<'a> {
    /// Day of the season (1..=30).
    pub day: u32,
    /// Weekday of that day.
    pub weekday: Weekday,
    /// Moon phase on that day.
    pub moon: MoonInfo,
    /// Festivals falling on that day.
    pub events: Vec<&'a CalendarEvent>,
}

/// Build the 30 day cells of a season, in order.
pub fn build_season_grid(year: i64, season: Season, table: &[CalendarEvent]) -> Vec<DayCell<'_>> {
    (1..=DAYS_PER_SEASON as u32)
        .map(|day| {
            let date = WorldDate::new(year, season, day, GRID_HOUR, 0);
            DayCell {
                day,
                weekday: weekday(&date),
                moon: moon_info(&date),
                events: events_for_date(&date, table),
            }
        })
        .collect()
}

/// Number of empty cells before day 1 when the season is laid out in
/// weekday-aligned rows starting at [`Weekday::Segunda`].
pub fn leading_blanks(year: i64, season: Season) -> usize {
    let first = WorldDate::new(year, season, 1, GRID_HOUR, 0);
    usize::from(weekday(&first).index())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CALENDAR_EVENTS;
    use crate::moon::MoonPhase;

    #[test]
    fn grid_has_thirty_ordered_days() {
        for season in Season::ALL {
            let grid = build_season_grid(1003, season, CALENDAR_EVENTS);
            assert_eq!(grid.len(), 30);
            let days: Vec<u32> = grid.iter().map(|c| c.day).collect();
            assert_eq!(days, (1..=30).collect::<Vec<_>>());
        }
    }

    #[test]
    fn grid_cells_carry_derived_values() {
        let grid = build_season_grid(1000, Season::Spring, CALENDAR_EVENTS);
        assert_eq!(grid[0].weekday, Weekday::Segunda);
        assert_eq!(grid[6].weekday, Weekday::Domingo);
        assert_eq!(grid[0].moon.phase, MoonPhase::New);
        assert_eq!(grid[14].moon.phase, MoonPhase::Full);
        assert_eq!(grid[0].events.len(), 1);
        assert_eq!(grid[9].events[0].id, "spring-10-atronos");
        assert!(grid[1].events.is_empty());
    }

    #[test]
    fn grid_with_empty_table_has_no_events() {
        let grid = build_season_grid(1000, Season::Winter, &[]);
        assert!(grid.iter().all(|c| c.events.is_empty()));
    }

    #[test]
    fn leading_blanks_follow_first_weekday() {
        assert_eq!(leading_blanks(1000, Season::Spring), 0);
        // Summer 1 is day index 30, 30 mod 7 = 2.
        assert_eq!(leading_blanks(1000, Season::Summer), 2);
    }
}
