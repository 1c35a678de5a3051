//! Temporal cell values
//!
//! The store keeps date-times as local wall-clock fields with no zone attached.
//! A value that looked like a date-time but failed strict field validation is kept
//! as an *invalid* temporal rather than raising an error.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};

/// A wall-clock date-time, or the invalid sentinel
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Temporal(Option<NaiveDateTime>);

impl Temporal {
    /// Wrap a wall-clock date-time
    pub fn new(datetime: NaiveDateTime) -> Self {
        Temporal(Some(datetime))
    }

    /// The invalid sentinel
    pub fn invalid() -> Self {
        Temporal(None)
    }

    /// Build from wall-clock fields; out-of-range fields give the invalid sentinel
    pub fn from_fields(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .map(Temporal::new)
            .unwrap_or_else(Temporal::invalid)
    }

    /// The current local wall-clock time
    pub fn now() -> Self {
        Temporal::new(Local::now().naive_local())
    }

    /// Check whether this is a real date-time
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// The underlying date-time, if valid
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        self.0
    }

    pub fn year(&self) -> Option<i32> {
        self.0.map(|dt| dt.year())
    }

    pub fn month(&self) -> Option<u32> {
        self.0.map(|dt| dt.month())
    }

    pub fn day(&self) -> Option<u32> {
        self.0.map(|dt| dt.day())
    }

    pub fn hour(&self) -> Option<u32> {
        self.0.map(|dt| dt.hour())
    }

    pub fn minute(&self) -> Option<u32> {
        self.0.map(|dt| dt.minute())
    }

    pub fn second(&self) -> Option<u32> {
        self.0.map(|dt| dt.second())
    }

    /// ISO-8601 instant text with millisecond precision and a `Z` suffix.
    ///
    /// Wall-clock fields are emitted as-is (the store is zone-less).
    pub fn to_iso_string(&self) -> Option<String> {
        self.0
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
    }
}

impl From<NaiveDateTime> for Temporal {
    fn from(datetime: NaiveDateTime) -> Self {
        Temporal::new(datetime)
    }
}

impl fmt::Debug for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(dt) => write!(f, "Temporal({dt})"),
            None => write!(f, "Temporal(invalid)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields() {
        let t = Temporal::from_fields(2026, 1, 27, 9, 5, 7);
        assert!(t.is_valid());
        assert_eq!(t.year(), Some(2026));
        assert_eq!(t.hour(), Some(9));
        assert_eq!(t.minute(), Some(5));
        assert_eq!(t.second(), Some(7));
    }

    #[test]
    fn test_out_of_range_fields_are_invalid() {
        assert!(!Temporal::from_fields(2026, 13, 1, 0, 0, 0).is_valid());
        assert!(!Temporal::from_fields(2026, 2, 30, 0, 0, 0).is_valid());
        assert!(!Temporal::from_fields(2026, 1, 1, 24, 0, 0).is_valid());
        assert_eq!(Temporal::invalid().hour(), None);
    }

    #[test]
    fn test_iso_string() {
        let t = Temporal::from_fields(2026, 1, 27, 9, 0, 0);
        assert_eq!(t.to_iso_string().as_deref(), Some("2026-01-27T09:00:00.000Z"));
        assert_eq!(Temporal::invalid().to_iso_string(), None);
    }
}
