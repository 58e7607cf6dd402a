use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

/// The academic season a course was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    /// `FA`
    Fall,
    /// `WI`
    Winter,
    /// `SP`
    Spring,
    /// `SU`
    Summer,
}

impl Season {
    /// The two-letter code used in audit text.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Fall => "FA",
            Self::Winter => "WI",
            Self::Spring => "SP",
            Self::Summer => "SU",
        }
    }

    /// Parses a two-letter season code. Codes are case-sensitive.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FA" => Some(Self::Fall),
            "WI" => Some(Self::Winter),
            "SP" => Some(Self::Spring),
            "SU" => Some(Self::Summer),
            _ => None,
        }
    }
}

/// A season plus a two-digit year, rendered as a four character code such as
/// `FA23`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term {
    season: Season,
    year: u8,
}

impl Term {
    /// Creates a term, returning `None` if `year` has more than two digits.
    #[must_use]
    pub const fn new(season: Season, year: u8) -> Option<Self> {
        if year > 99 {
            return None;
        }
        Some(Self { season, year })
    }

    /// The season component.
    #[must_use]
    pub const fn season(self) -> Season {
        self.season
    }

    /// The two-digit year component (`23` for `FA23`).
    #[must_use]
    pub const fn year(self) -> u8 {
        self.year
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{:02}", self.season.code(), self.year)
    }
}

/// Error returned when a string is not a four character term code.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid term '{0}': expected a season code (FA, WI, SP, SU) followed by two digits")]
pub struct InvalidTermError(String);

impl FromStr for Term {
    type Err = InvalidTermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTermError(s.to_string());

        let (season, year) = s.split_at_checked(2).ok_or_else(invalid)?;
        let season = Season::from_code(season).ok_or_else(invalid)?;
        if year.len() != 2 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year = year.parse().map_err(|_| invalid())?;

        Self::new(season, year).ok_or_else(invalid)
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
