//! World calendar for the Dungeon Master helper.
//!
//! The calendar has four 30-day seasons, a seven-day week and a 30-day moon
//! cycle. Every date maps onto a single linear count of minutes since the
//! epoch ([`EPOCH_DATE`], year 1000, spring, day 1, 05:00); arithmetic goes
//! through that count so overflow between fields is normalized in one place.
//!
//! The engine is pure. Reference data (the festival table) is passed in
//! explicitly, and persistence lives in [`store`].

/// World clock holding the campaign's current date.
pub mod clock;
/// The date type, calendar constants, and linear time arithmetic.
pub mod date;
/// Error types for the calendar crate.
pub mod error;
/// Festival table and event lookup.
pub mod events;
/// Season grid builder for month-view rendering.
pub mod grid;
/// Moon phase derivation.
pub mod moon;
/// The four seasons.
pub mod season;
pub mod store;
/// Weekday derivation.
pub mod weekday;

/// Re-export of [`clock::WorldClock`].
pub use clock::WorldClock;
/// Re-export date type, constants and arithmetic.
pub use date::{
    DAYS_PER_SEASON, DAYS_PER_YEAR, EPOCH_DATE, EPOCH_YEAR, MINUTES_PER_DAY, WorldDate, add_days,
    add_hours, add_minutes, date_from_day_index, date_from_minutes, day_index,
    minutes_since_epoch,
};
/// Re-export error types.
pub use error::{CalendarError, CalendarResult};
/// Re-export event types and lookups.
pub use events::{CALENDAR_EVENTS, CalendarEvent, Deity, events_for_date};
/// Re-export grid builder.
pub use grid::{DayCell, build_season_grid};
/// Re-export moon types.
pub use moon::{MoonInfo, MoonPhase, moon_info};
/// Re-export of [`season::Season`].
pub use season::Season;
/// Re-export date store.
pub use store::{DateStore, date_from_value};
/// Re-export weekday types.
pub use weekday::{Weekday, weekday, weekday_label};
