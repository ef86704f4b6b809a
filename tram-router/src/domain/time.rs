//! Minute-based schedule time.
//!
//! Tram schedules repeat on a short cycle, so all times in the network are
//! plain integer minutes. A `Minutes` value is either a point in time
//! (minutes after the start of the day) or a span, depending on context.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::DomainError;

/// A whole number of minutes.
///
/// # Examples
///
/// ```
/// use tram_router::domain::Minutes;
///
/// assert_eq!(Minutes(12).to_string(), "12m");
/// assert_eq!(Minutes(65).to_string(), "1h5m");
/// assert_eq!(Minutes(120).to_string(), "2h0m");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Minutes(pub i64);

/// Largest departure magnitude accepted from user input: one leap year.
pub const MAX_DEPARTURE_MINUTES: i64 = 366 * 24 * 60;

impl Minutes {
    /// Zero minutes.
    pub const ZERO: Minutes = Minutes(0);

    /// Returns the raw minute count.
    pub fn get(self) -> i64 {
        self.0
    }

    /// Position of this time within a repeating schedule cycle, in `[0, cycle)`.
    ///
    /// Negative times wrap the same way as positive ones.
    pub fn cycle_phase(self, cycle: i64) -> i64 {
        self.0.rem_euclid(cycle)
    }

    /// Parse a departure time given either as `HH:MM` or as a plain minute count.
    ///
    /// Minute counts must lie within `±MAX_DEPARTURE_MINUTES`.
    ///
    /// ```
    /// use tram_router::domain::Minutes;
    ///
    /// assert_eq!(Minutes::parse_departure("08:15").unwrap(), Minutes(495));
    /// assert_eq!(Minutes::parse_departure("42").unwrap(), Minutes(42));
    /// assert!(Minutes::parse_departure("8h15").is_err());
    /// assert!(Minutes::parse_departure("9223372036854775807").is_err());
    /// ```
    pub fn parse_departure(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();

        if let Ok(mins) = s.parse::<i64>() {
            if !(-MAX_DEPARTURE_MINUTES..=MAX_DEPARTURE_MINUTES).contains(&mins) {
                return Err(DomainError::InvalidTime {
                    input: s.to_string(),
                });
            }
            return Ok(Minutes(mins));
        }

        let time = NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| DomainError::InvalidTime {
            input: s.to_string(),
        })?;

        Ok(Minutes::from_clock(time))
    }

    /// `self + rhs`, or `None` on overflow.
    pub fn checked_add(self, rhs: Minutes) -> Option<Minutes> {
        self.0.checked_add(rhs.0).map(Minutes)
    }

    /// Minutes after midnight for a wall-clock time.
    pub fn from_clock(time: NaiveTime) -> Self {
        Minutes(i64::from(time.hour() * 60 + time.minute()))
    }
}

impl FromStr for Minutes {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Minutes::parse_departure(s)
    }
}

impl Add for Minutes {
    type Output = Minutes;

    fn add(self, rhs: Minutes) -> Minutes {
        Minutes(self.0 + rhs.0)
    }
}

impl Sub for Minutes {
    type Output = Minutes;

    fn sub(self, rhs: Minutes) -> Minutes {
        Minutes(self.0 - rhs.0)
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let total = self.0.unsigned_abs();

        if total >= 60 {
            write!(f, "{sign}{}h{}m", total / 60, total % 60)
        } else {
            write!(f, "{sign}{total}m")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_under_an_hour() {
        assert_eq!(Minutes(0).to_string(), "0m");
        assert_eq!(Minutes(59).to_string(), "59m");
    }

    #[test]
    fn display_with_hours() {
        assert_eq!(Minutes(60).to_string(), "1h0m");
        assert_eq!(Minutes(125).to_string(), "2h5m");
    }

    #[test]
    fn display_negative() {
        assert_eq!(Minutes(-5).to_string(), "-5m");
        assert_eq!(Minutes(-65).to_string(), "-1h5m");
    }

    #[test]
    fn display_extremes() {
        assert_eq!(Minutes(i64::MIN).to_string(), "-153722867280912930h8m");
        assert_eq!(Minutes(i64::MAX).to_string(), "153722867280912930h7m");
    }

    #[test]
    fn checked_add_detects_overflow() {
        assert_eq!(Minutes(5).checked_add(Minutes(7)), Some(Minutes(12)));
        assert_eq!(Minutes(i64::MAX - 3).checked_add(Minutes(4)), None);
    }

    #[test]
    fn cycle_phase_wraps_into_range() {
        assert_eq!(Minutes(0).cycle_phase(10), 0);
        assert_eq!(Minutes(13).cycle_phase(10), 3);
        assert_eq!(Minutes(-3).cycle_phase(10), 7);
    }

    #[test]
    fn arithmetic() {
        assert_eq!(Minutes(5) + Minutes(7), Minutes(12));
        assert_eq!(Minutes(12) - Minutes(5), Minutes(7));
    }

    #[test]
    fn parse_clock_and_minutes() {
        assert_eq!(Minutes::parse_departure("00:00").unwrap(), Minutes(0));
        assert_eq!(Minutes::parse_departure("23:59").unwrap(), Minutes(1439));
        assert_eq!(Minutes::parse_departure(" 7 ").unwrap(), Minutes(7));
        assert_eq!("13:05".parse::<Minutes>().unwrap(), Minutes(785));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Minutes::parse_departure("").is_err());
        assert!(Minutes::parse_departure("25:00").is_err());
        assert!(Minutes::parse_departure("noon").is_err());
    }

    #[test]
    fn parse_bounds_minute_counts() {
        assert_eq!(
            Minutes::parse_departure("527040").unwrap(),
            Minutes(MAX_DEPARTURE_MINUTES)
        );
        assert_eq!(
            Minutes::parse_departure("-527040").unwrap(),
            Minutes(-MAX_DEPARTURE_MINUTES)
        );
        assert_eq!(
            Minutes::parse_departure("527041"),
            Err(DomainError::InvalidTime {
                input: "527041".into()
            })
        );
        assert!(Minutes::parse_departure("9223372036854775807").is_err());
        assert!(Minutes::parse_departure("-9223372036854775808").is_err());
    }
}
