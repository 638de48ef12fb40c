pub mod date;
pub mod encounter;
pub mod events;
pub mod grid;

use dmh_calendar::Season;

/// Parse a season name from the command line.
fn parse_season(raw: &str) -> Result<Season, String> {
    raw.parse::<Season>().map_err(|e| e.to_string())
}
