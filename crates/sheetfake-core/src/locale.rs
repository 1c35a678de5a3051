//! Display locales
//!
//! A [`Locale`] is fixed when a grid store is created. It decides how temporal
//! values are rendered by a display read.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Marker meaning "before noon" in the compact 12-hour form
pub const BEFORE_NOON_MARKER: &str = "上午";

/// Marker meaning "at or after noon" in the compact 12-hour form
pub const AFTER_NOON_MARKER: &str = "下午";

/// Latin "at or after noon" marker
pub const LATIN_PM: &str = "PM";

/// Text rendered for an invalid temporal value, in every locale
pub const INVALID_TEMPORAL_TEXT: &str = "Invalid Date";

/// Display locale of a grid store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Locale {
    /// Traditional Chinese, compact 12-hour form: `2026/1/27上午9:00:00`
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "zh-TW"))]
    ZhTw,
    /// US English, spaced 12-hour form: `1/27/2026, 9:00:00 AM`
    #[cfg_attr(feature = "serde", serde(rename = "en-US"))]
    EnUs,
    /// ISO-8601 instant: `2026-01-27T09:00:00.000Z`
    ///
    /// Temporal values are zone-less, so the wall-clock fields are printed as-is
    /// behind the `Z`. A value from [`crate::Temporal::now`] shows local time, not the
    /// UTC instant.
    #[cfg_attr(feature = "serde", serde(rename = "iso"))]
    Iso,
}

impl Locale {
    /// All supported locales
    pub const ALL: [Locale; 3] = [Locale::ZhTw, Locale::EnUs, Locale::Iso];

    /// The identifier used in configuration (`zh-TW`, `en-US`, `iso`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::ZhTw => "zh-TW",
            Locale::EnUs => "en-US",
            Locale::Iso => "iso",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh-tw" | "zh_tw" => Ok(Locale::ZhTw),
            "en-us" | "en_us" => Ok(Locale::EnUs),
            "iso" => Ok(Locale::Iso),
            _ => Err(Error::UnknownLocale(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("zh-TW".parse::<Locale>().unwrap(), Locale::ZhTw);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::EnUs);
        assert_eq!("ISO".parse::<Locale>().unwrap(), Locale::Iso);
        assert_eq!(
            "fr-FR".parse::<Locale>(),
            Err(Error::UnknownLocale("fr-FR".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for locale in Locale::ALL {
            assert_eq!(locale.to_string().parse::<Locale>().unwrap(), locale);
        }
    }

    #[test]
    fn test_default_is_compact() {
        assert_eq!(Locale::default(), Locale::ZhTw);
    }
}
