use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::WorldDate;

/// Days in a week.
pub const DAYS_PER_WEEK: i64 = 7;

/// Day of the seven-day week. The epoch day is a [`Weekday::Segunda`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Weekday {
    /// Index 0.
    Segunda,
    /// Index 1.
    Terca,
    /// Index 2.
    Quarta,
    /// Index 3.
    Quinta,
    /// Index 4.
    Sexta,
    /// Index 5.
    Sabado,
    /// Index 6.
    Domingo,
}

impl Weekday {
    /// All weekdays starting from index 0.
    pub const ALL: [Weekday; 7] = [
        Weekday::Segunda,
        Weekday::Terca,
        Weekday::Quarta,
        Weekday::Quinta,
        Weekday::Sexta,
        Weekday::Sabado,
        Weekday::Domingo,
    ];

    /// Weekday for a day index. Uses the Euclidean remainder, so days
    /// before the epoch still land in `0..=6`.
    pub fn from_day_index(day_index: i64) -> Self {
        Self::ALL[day_index.rem_euclid(DAYS_PER_WEEK) as usize]
    }

    /// Position in the week (0..=6).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Segunda => "Segunda",
            Weekday::Terca => "Terça",
            Weekday::Quarta => "Quarta",
            Weekday::Quinta => "Quinta",
            Weekday::Sexta => "Sexta",
            Weekday::Sabado => "Sábado",
            Weekday::Domingo => "Domingo",
        }
    }

    /// Three-letter label for grid headers.
    pub fn short_label(self) -> String {
        self.label().chars().take(3).collect()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day.index()
    }
}

impl TryFrom<u8> for Weekday {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| format!("weekday index out of range: {value}"))
    }
}

/// Weekday of `date`.
pub fn weekday(date: &WorldDate) -> Weekday {
    Weekday::from_day_index(date.day_index())
}

/// Display label of the weekday of `date`.
pub fn weekday_label(date: &WorldDate) -> &'static str {
    weekday(date).label()
}
