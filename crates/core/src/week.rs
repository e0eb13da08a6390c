//! # ISO week and weekday keys
//!
//! Weekly slot documents are addressed by an ISO-8601 week label
//! (`YYYY-WNN`) and, inside a document, by a French weekday name. This module
//! maps calendar dates onto those keys and back.
//!
//! Weeks start on Monday and week 1 is the week holding the year's first
//! Thursday, so the year part of a key is the ISO week-year: 2024-12-30 is in
//! `2025-W01` and 2027-01-01 is in `2026-W53`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::BookingError;

/// Day bucket inside a weekly slots document, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Lundi,
    Mardi,
    Mercredi,
    Jeudi,
    Vendredi,
    Samedi,
    Dimanche,
}

impl DayKey {
    pub const ALL: [DayKey; 7] = [
        DayKey::Lundi,
        DayKey::Mardi,
        DayKey::Mercredi,
        DayKey::Jeudi,
        DayKey::Vendredi,
        DayKey::Samedi,
        DayKey::Dimanche,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayKey::Lundi => "lundi",
            DayKey::Mardi => "mardi",
            DayKey::Mercredi => "mercredi",
            DayKey::Jeudi => "jeudi",
            DayKey::Vendredi => "vendredi",
            DayKey::Samedi => "samedi",
            DayKey::Dimanche => "dimanche",
        }
    }

    /// Offset from Monday (0..=6).
    pub fn index(&self) -> usize {
        self.weekday().num_days_from_monday() as usize
    }

    pub fn weekday(&self) -> Weekday {
        match self {
            DayKey::Lundi => Weekday::Mon,
            DayKey::Mardi => Weekday::Tue,
            DayKey::Mercredi => Weekday::Wed,
            DayKey::Jeudi => Weekday::Thu,
            DayKey::Vendredi => Weekday::Fri,
            DayKey::Samedi => Weekday::Sat,
            DayKey::Dimanche => Weekday::Sun,
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayKey::Lundi,
            Weekday::Tue => DayKey::Mardi,
            Weekday::Wed => DayKey::Mercredi,
            Weekday::Thu => DayKey::Jeudi,
            Weekday::Fri => DayKey::Vendredi,
            Weekday::Sat => DayKey::Samedi,
            Weekday::Sun => DayKey::Dimanche,
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayKey {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayKey::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| BookingError::Validation(format!("Unknown day key: \"{}\"", s)))
    }
}

/// An ISO week label such as `2025-W19`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekKey {
    year: i32,
    week: u32,
}

impl WeekKey {
    /// Builds a key, rejecting week numbers the ISO year does not have.
    pub fn new(year: i32, week: u32) -> Option<Self> {
        monday_of(year, week).map(|_| Self { year, week })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn monday(&self) -> NaiveDate {
        // Construction guarantees the week exists.
        monday_of(self.year, self.week).unwrap_or(NaiveDate::MIN)
    }

    /// The seven dates of the week, Monday first.
    pub fn dates(&self) -> [NaiveDate; 7] {
        let monday = self.monday();
        std::array::from_fn(|offset| monday + Duration::days(offset as i64))
    }

    pub fn date_of(&self, day: DayKey) -> NaiveDate {
        self.monday() + Duration::days(day.index() as i64)
    }

    pub fn next(&self) -> Self {
        if self.week >= weeks_in_year(self.year) {
            Self { year: self.year + 1, week: 1 }
        } else {
            Self { year: self.year, week: self.week + 1 }
        }
    }

    pub fn previous(&self) -> Self {
        if self.week <= 1 {
            let year = self.year - 1;
            Self { year, week: weeks_in_year(year) }
        } else {
            Self { year: self.year, week: self.week - 1 }
        }
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

impl FromStr for WeekKey {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            BookingError::Validation(format!(
                "Invalid week format: \"{}\". Expected YYYY-WNN (e.g. 2025-W19)",
                s
            ))
        };

        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 8
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && &bytes[4..6] == b"-W"
            && bytes[6..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(invalid());
        }

        let year: i32 = s[..4].parse().map_err(|_| invalid())?;
        let week: u32 = s[6..].parse().map_err(|_| invalid())?;

        WeekKey::new(year, week).ok_or_else(|| {
            BookingError::Validation(format!(
                "Week {} does not exist in ISO year {} ({} weeks)",
                week,
                year,
                weeks_in_year(year)
            ))
        })
    }
}

impl TryFrom<String> for WeekKey {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekKey> for String {
    fn from(key: WeekKey) -> Self {
        key.to_string()
    }
}

/// ISO week label of `date`, using the ISO week-year.
pub fn week_key_of(date: NaiveDate) -> WeekKey {
    let iso = date.iso_week();
    WeekKey {
        year: iso.year(),
        week: iso.week(),
    }
}

pub fn day_key_of(date: NaiveDate) -> DayKey {
    DayKey::from_weekday(date.weekday())
}

/// Monday of ISO week `week` in ISO year `year`, if that week exists.
pub fn monday_of(year: i32, week: u32) -> Option<NaiveDate> {
    if week == 0 || week > weeks_in_year(year) {
        return None;
    }
    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
}

/// Number of ISO weeks (52 or 53) in `year`.
pub fn weeks_in_year(year: i32) -> u32 {
    // December 28th always falls in the last ISO week of its year.
    NaiveDate::from_ymd_opt(year, 12, 28)
        .map(|date| date.iso_week().week())
        .unwrap_or(52)
}
