use serde::{Deserialize, Serialize};

use crate::date::{DAYS_PER_SEASON, WorldDate};

/// Phase of the moon. The moon runs a fixed 30-day cycle aligned with the seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoonPhase {
    /// Cycle days 1 and 30.
    New,
    /// Cycle days 2 to 7.
    Waxing,
    /// Cycle days 8 to 17.
    Full,
    /// Cycle days 18 to 29.
    Waning,
}

impl MoonPhase {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            MoonPhase::New => "Lua Nova",
            MoonPhase::Waxing => "Lua Crescente",
            MoonPhase::Full => "Lua Cheia",
            MoonPhase::Waning => "Lua Minguante",
        }
    }

    /// Single-glyph symbol for compact views.
    pub fn symbol(self) -> char {
        match self {
            MoonPhase::New => '○',
            MoonPhase::Waxing => '☽',
            MoonPhase::Full => '●',
            MoonPhase::Waning => '☾',
        }
    }
}

/// Moon phase together with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoonInfo {
    /// The phase.
    pub phase: MoonPhase,
    /// The phase's display label.
    pub label: &'static str,
}

impl From<MoonPhase> for MoonInfo {
    fn from(phase: MoonPhase) -> Self {
        Self {
            phase,
            label: phase.label(),
        }
    }
}

/// Phase for a day index. Position in the cycle is `idx mod 30` (Euclidean),
/// which equals the day of the season for every date.
pub fn moon_phase_for_day_index(day_index: i64) -> MoonPhase {
    let day_in_cycle = day_index.rem_euclid(DAYS_PER_SEASON) + 1;

    match day_in_cycle {
        2..=7 => MoonPhase::Waxing,
        8..=17 => MoonPhase::Full,
        18..=29 => MoonPhase::Waning,
        _ => MoonPhase::New,
    }
}

/// Moon phase and label on `date`.
pub fn moon_info(date: &WorldDate) -> MoonInfo {
    moon_phase_for_day_index(date.day_index()).into()
}
