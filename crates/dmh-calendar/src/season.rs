use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// One of the four seasons of the world year, in fixed cyclical order.
///
/// Every season is exactly [`DAYS_PER_SEASON`](crate::date::DAYS_PER_SEASON)
/// days long; seasons play the role months play in other calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// First season of the year.
    Spring,
    /// Second season of the year.
    Summer,
    /// Third season of the year.
    Autumn,
    /// Fourth and last season of the year.
    Winter,
}

impl Season {
    /// All seasons in calendar order.
    pub const ALL: [Season; 4] = [
        Season::Spring,
        Season::Summer,
        Season::Autumn,
        Season::Winter,
    ];

    /// Position of the season within the year (0..=3).
    pub fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Autumn => 2,
            Season::Winter => 3,
        }
    }

    /// Look up a season by its position within the year.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The literal used in persisted data (`"spring"`, `"summer"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }

    /// Display label in the world's language.
    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Primavera",
            Season::Summer => "Verão",
            Season::Autumn => "Outono",
            Season::Winter => "Inverno",
        }
    }

    /// Display colour used when rendering the season (hex RGB).
    pub fn color(self) -> &'static str {
        match self {
            Season::Spring => "#9ae6b4",
            Season::Summer => "#f6e05e",
            Season::Autumn => "#f6ad55",
            Season::Winter => "#90cdf4",
        }
    }

    /// The season that follows this one, wrapping from winter to spring.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Season {
    type Err = CalendarError;

    /// Accepts the persisted literal or the display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|season| season.as_str() == needle || season.label().to_lowercase() == needle)
            .ok_or_else(|| CalendarError::UnknownSeason(s.to_string()))
    }
}
