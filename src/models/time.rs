//! Clock-time and weekday primitives.
//!
//! Timetables are weekly: every time is a wall-clock minute within a
//! school day, every day is one of the five weekdays. There are no
//! dates anywhere in the model.
//!
//! # Wire Format
//! `ClockTime` serializes as an `"HH:MM"` string and `Weekday` as the
//! full English day name, matching the persisted timetable rows.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A day of the school week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// The five school days in week order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Full English day name.
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A wall-clock time of day, stored as minutes since midnight.
///
/// Ordered, hashable, and cheap to copy — busy-set keys during solving
/// are `(Weekday, ClockTime)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Creates a clock time from an hour and minute.
    pub fn hm(hour: u16, minute: u16) -> Self {
        ClockTime(hour * 60 + minute)
    }

    /// Creates a clock time from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Self {
        ClockTime(minutes)
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Error parsing an `"HH:MM"` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockTimeParseError {
    input: String,
}

impl fmt::Display for ClockTimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid clock time '{}', expected HH:MM", self.input)
    }
}

impl std::error::Error for ClockTimeParseError {}

impl FromStr for ClockTime {
    type Err = ClockTimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ClockTimeParseError {
            input: s.to_string(),
        };
        let (h, m) = s.split_once(':').ok_or_else(err)?;
        let hour: u16 = h.parse().map_err(|_| err())?;
        let minute: u16 = m.parse().map_err(|_| err())?;
        if hour >= 24 || minute >= 60 {
            return Err(err());
        }
        Ok(ClockTime::hm(hour, minute))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A clock-time interval [start, end).
///
/// Half-open: includes start, excludes end. Used for generated periods
/// and for break/lunch windows in the schedule configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: ClockTime,
    /// Interval end (exclusive).
    pub end: ClockTime,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Length of this window in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Whether a clock time falls within this window.
    #[inline]
    pub fn contains(&self, time: ClockTime) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_time_display() {
        assert_eq!(ClockTime::hm(8, 0).to_string(), "08:00");
        assert_eq!(ClockTime::hm(13, 5).to_string(), "13:05");
    }

    #[test]
    fn test_clock_time_parse() {
        let t: ClockTime = "09:45".parse().unwrap();
        assert_eq!(t, ClockTime::hm(9, 45));
        assert!("9:45".parse::<ClockTime>().is_ok());
        assert!("25:00".parse::<ClockTime>().is_err());
        assert!("09:61".parse::<ClockTime>().is_err());
        assert!("0945".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_clock_time_serde_string() {
        let t = ClockTime::hm(10, 15);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"10:15\"");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_weekday_name_and_order() {
        assert_eq!(Weekday::Monday.to_string(), "Monday");
        assert_eq!(Weekday::ALL.len(), 5);
        assert!(Weekday::Monday < Weekday::Friday);
    }

    #[test]
    fn test_window_contains() {
        let w = TimeWindow::new(ClockTime::hm(10, 0), ClockTime::hm(10, 30));
        assert!(w.contains(ClockTime::hm(10, 0)));
        assert!(w.contains(ClockTime::hm(10, 29)));
        assert!(!w.contains(ClockTime::hm(10, 30)));
        assert_eq!(w.duration_minutes(), 30);
    }

    #[test]
    fn test_window_overlaps() {
        let a = TimeWindow::new(ClockTime::hm(10, 0), ClockTime::hm(11, 0));
        let b = TimeWindow::new(ClockTime::hm(10, 30), ClockTime::hm(11, 30));
        let c = TimeWindow::new(ClockTime::hm(11, 0), ClockTime::hm(12, 0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
