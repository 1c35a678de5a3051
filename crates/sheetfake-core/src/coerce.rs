//! Type coercion engine
//!
//! The real store silently turns date-time-looking text into date-time values when
//! it is written, and renders date-times through the spreadsheet locale when a
//! display value is requested. Everything here is pure; the grid store and range
//! views call into it on every write and read.
//!
//! Recognized text forms:
//!
//! | Form | Example |
//! |------|---------|
//! | compact 12-hour | `2026/1/27上午9:00:00` |
//! | spaced Latin 12-hour | `2026/1/27 PM 6:00:00`, `2026/1/27AM9:00:00` |
//! | ISO-like | `2026-01-27 09:00:00`, `2026-01-27T09:00:00.000Z` |
//!
//! Date-only text such as `2026/1/27` or `2026-01-27` is never coerced.

use chrono::{Datelike, Timelike};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::cell::{CellValue, Temporal};
use crate::locale::{
    Locale, AFTER_NOON_MARKER, BEFORE_NOON_MARKER, INVALID_TEMPORAL_TEXT, LATIN_PM,
};

static COMPACT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})/([0-9]{1,2})/([0-9]{1,2})(上午|下午)([0-9]{1,2}):([0-9]{2}):([0-9]{2})$")
        .expect("compact date-time pattern is valid")
});

static LATIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9]{4})/([0-9]{1,2})/([0-9]{1,2})\s*(AM|PM)\s*([0-9]{1,2}):([0-9]{2}):([0-9]{2})$",
    )
    .expect("latin date-time pattern is valid")
});

static ISO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})[ T]([0-9]{2}):([0-9]{2}):([0-9]{2})")
        .expect("iso date-time pattern is valid")
});

/// Which recognized date-time form a piece of text matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeForm {
    /// `YYYY/M/D<marker>h:mm:ss` with no whitespace
    Compact,
    /// `YYYY/M/D [AM|PM] h:mm:ss` with optional spaces
    Latin,
    /// `YYYY-MM-DD[ T]HH:MM:SS` with any suffix
    Iso,
}

/// Classify text as one of the recognized date-time forms
pub fn classify(text: &str) -> Option<DateTimeForm> {
    if COMPACT_RE.is_match(text) {
        Some(DateTimeForm::Compact)
    } else if LATIN_RE.is_match(text) {
        Some(DateTimeForm::Latin)
    } else if ISO_RE.is_match(text) {
        Some(DateTimeForm::Iso)
    } else {
        None
    }
}

/// Check whether text would be coerced to a temporal value on write
pub fn is_date_time_text(text: &str) -> bool {
    classify(text).is_some()
}

/// Parse date-time text.
///
/// Returns `None` when the text is not date-time-like at all, and
/// `Some(Temporal::invalid())` when it matches a pattern but its fields do not form
/// a real date-time (e.g. month 13).
pub fn parse_date_time(text: &str) -> Option<Temporal> {
    let form = classify(text)?;
    let temporal = match form {
        DateTimeForm::Compact => COMPACT_RE
            .captures(text)
            .and_then(|c| twelve_hour_fields(&c, AFTER_NOON_MARKER)),
        DateTimeForm::Latin => LATIN_RE
            .captures(text)
            .and_then(|c| twelve_hour_fields(&c, LATIN_PM)),
        DateTimeForm::Iso => ISO_RE.captures(text).and_then(|c| iso_fields(&c)),
    };
    let temporal = temporal.unwrap_or_else(Temporal::invalid);
    if !temporal.is_valid() {
        tracing::trace!("date-time text {text:?} failed strict parsing");
    }
    Some(temporal)
}

fn field(caps: &Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index).and_then(|m| m.as_str().parse().ok())
}

/// Fields of the compact and Latin forms: year, month, day, marker, hour, minute, second.
fn twelve_hour_fields(caps: &Captures<'_>, after_noon: &str) -> Option<Temporal> {
    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    let marker = caps.get(4)?.as_str();
    let hour = to_24_hour(field(caps, 5)?, marker == after_noon);
    Some(Temporal::from_fields(
        year,
        field(caps, 2)?,
        field(caps, 3)?,
        hour,
        field(caps, 6)?,
        field(caps, 7)?,
    ))
}

/// Fields of the ISO-like form; only the leading `YYYY-MM-DD HH:MM:SS` is used.
fn iso_fields(caps: &Captures<'_>) -> Option<Temporal> {
    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    Some(Temporal::from_fields(
        year,
        field(caps, 2)?,
        field(caps, 3)?,
        field(caps, 4)?,
        field(caps, 5)?,
        field(caps, 6)?,
    ))
}

/// Convert a 12-hour clock reading to 24-hour.
///
/// 12 before noon is midnight; any other hour after noon gains 12; everything else is
/// left alone (so out-of-range input stays out of range and fails validation).
pub fn to_24_hour(hour: u32, after_noon: bool) -> u32 {
    match (hour, after_noon) {
        (12, false) => 0,
        (h, true) if h != 12 => h + 12,
        (h, _) => h,
    }
}

/// Write-side conversion applied to every incoming value
pub fn coerce_on_write(value: CellValue) -> CellValue {
    match value {
        CellValue::Text(text) => match parse_date_time(&text) {
            Some(temporal) => CellValue::Temporal(temporal),
            None => CellValue::Text(text),
        },
        other @ (CellValue::Empty
        | CellValue::Boolean(_)
        | CellValue::Number(_)
        | CellValue::Temporal(_)) => other,
    }
}

/// Read-side conversion applied by a raw read.
///
/// Stored `Empty` reads as empty text, date-time-like text reads as a temporal value,
/// everything else passes through unchanged.
pub fn coerce_on_read(value: &CellValue) -> CellValue {
    match value {
        CellValue::Empty => CellValue::empty_text(),
        CellValue::Text(text) => match parse_date_time(text) {
            Some(temporal) => CellValue::Temporal(temporal),
            None => value.clone(),
        },
        CellValue::Boolean(_) | CellValue::Number(_) | CellValue::Temporal(_) => value.clone(),
    }
}

/// Render a temporal value in the given locale
pub fn format_temporal(temporal: &Temporal, locale: Locale) -> String {
    let Some(dt) = temporal.datetime() else {
        return INVALID_TEMPORAL_TEXT.to_string();
    };
    match locale {
        Locale::ZhTw => {
            let marker = if dt.hour() >= 12 {
                AFTER_NOON_MARKER
            } else {
                BEFORE_NOON_MARKER
            };
            format!(
                "{}/{}/{}{}{}:{:02}:{:02}",
                dt.year(),
                dt.month(),
                dt.day(),
                marker,
                to_12_hour(dt.hour()),
                dt.minute(),
                dt.second(),
            )
        }
        Locale::EnUs => dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        Locale::Iso => temporal.to_iso_string().unwrap_or_default(),
    }
}

/// Convert a 24-hour clock reading to 12-hour (0 and 12 both render as 12)
pub fn to_12_hour(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

/// Render any cell value the way a display read does
pub fn format_for_display(value: &CellValue, locale: Locale) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Temporal(t) => format_temporal(t, locale),
        CellValue::Text(_) | CellValue::Boolean(_) | CellValue::Number(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_forms() {
        assert_eq!(classify("2026/1/27上午9:00:00"), Some(DateTimeForm::Compact));
        assert_eq!(classify("2026/12/31下午11:59:59"), Some(DateTimeForm::Compact));
        assert_eq!(classify("2026/1/27 AM9:00:00"), Some(DateTimeForm::Latin));
        assert_eq!(classify("2026/1/27 PM 06:00:00"), Some(DateTimeForm::Latin));
        assert_eq!(classify("2026/1/27PM6:00:00"), Some(DateTimeForm::Latin));
        assert_eq!(classify("2026-01-27 09:00:00"), Some(DateTimeForm::Iso));
        assert_eq!(classify("2026-01-27T09:00:00.000Z"), Some(DateTimeForm::Iso));
        assert_eq!(classify("2026-01-27T09:00:00+08:00"), Some(DateTimeForm::Iso));
    }

    #[test]
    fn test_date_only_and_plain_text_not_recognized() {
        assert!(!is_date_time_text("2026/1/27"));
        assert!(!is_date_time_text("2026-01-27"));
        assert!(!is_date_time_text("上班"));
        assert!(!is_date_time_text("2026/1/27 上午9:00:00"));
        assert!(!is_date_time_text(" 2026-01-27 09:00:00"));
        assert!(!is_date_time_text(""));
    }

    #[test]
    fn test_meridiem_conversion() {
        let t = parse_date_time("2026/1/27上午12:30:00").unwrap();
        assert_eq!(t.hour(), Some(0));
        let t = parse_date_time("2026/1/27下午12:30:00").unwrap();
        assert_eq!(t.hour(), Some(12));
        let t = parse_date_time("2026/1/27下午6:05:09").unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (Some(18), Some(5), Some(9)));
        let t = parse_date_time("2026/1/27 PM 06:00:00").unwrap();
        assert_eq!(t.hour(), Some(18));
        let t = parse_date_time("2026/1/27 AM 12:00:00").unwrap();
        assert_eq!(t.hour(), Some(0));
    }

    #[test]
    fn test_iso_ignores_suffix() {
        let t = parse_date_time("2026-01-27T09:15:30.999+08:00").unwrap();
        assert_eq!(t, Temporal::from_fields(2026, 1, 27, 9, 15, 30));
    }

    #[test]
    fn test_ambiguous_text_yields_invalid_sentinel() {
        let t = parse_date_time("2026/13/40上午9:00:00").unwrap();
        assert!(!t.is_valid());
        let t = parse_date_time("2026/1/27下午13:00:00").unwrap();
        assert!(!t.is_valid());
        let t = parse_date_time("2026-02-30 10:00:00").unwrap();
        assert!(!t.is_valid());
        assert_eq!(format_temporal(&t, Locale::ZhTw), "Invalid Date");
    }

    #[test]
    fn test_coerce_on_write() {
        assert!(coerce_on_write(CellValue::from("2026/1/27上午9:00:00")).is_temporal());
        assert_eq!(coerce_on_write(CellValue::from("上班")), CellValue::from("上班"));
        assert_eq!(coerce_on_write(CellValue::from(7)), CellValue::from(7));
        assert_eq!(coerce_on_write(CellValue::Empty), CellValue::Empty);
    }

    #[test]
    fn test_coerce_on_read() {
        assert_eq!(coerce_on_read(&CellValue::Empty), CellValue::empty_text());
        assert!(coerce_on_read(&CellValue::from("2026-01-27 09:00:00")).is_temporal());
        assert_eq!(coerce_on_read(&CellValue::from(true)), CellValue::from(true));
    }

    #[test]
    fn test_format_temporal_per_locale() {
        let morning = Temporal::from_fields(2026, 1, 27, 9, 0, 0);
        let evening = Temporal::from_fields(2026, 1, 27, 18, 5, 3);
        let midnight = Temporal::from_fields(2026, 1, 27, 0, 0, 0);

        assert_eq!(format_temporal(&morning, Locale::ZhTw), "2026/1/27上午9:00:00");
        assert_eq!(format_temporal(&evening, Locale::ZhTw), "2026/1/27下午6:05:03");
        assert_eq!(format_temporal(&midnight, Locale::ZhTw), "2026/1/27上午12:00:00");

        assert_eq!(format_temporal(&morning, Locale::EnUs), "1/27/2026, 9:00:00 AM");
        assert_eq!(format_temporal(&evening, Locale::EnUs), "1/27/2026, 6:05:03 PM");

        assert_eq!(format_temporal(&morning, Locale::Iso), "2026-01-27T09:00:00.000Z");
    }

    #[test]
    fn test_format_for_display() {
        assert_eq!(format_for_display(&CellValue::Empty, Locale::Iso), "");
        assert_eq!(format_for_display(&CellValue::from(true), Locale::Iso), "TRUE");
        assert_eq!(format_for_display(&CellValue::from(false), Locale::ZhTw), "FALSE");
        assert_eq!(format_for_display(&CellValue::from(12.5), Locale::EnUs), "12.5");
        assert_eq!(format_for_display(&CellValue::from("abc"), Locale::EnUs), "abc");
    }

    #[test]
    fn test_12_hour_round_trip() {
        for hour in 0..24 {
            assert_eq!(to_24_hour(to_12_hour(hour), hour >= 12), hour);
        }
    }

    proptest! {
        #[test]
        fn prop_compact_text_round_trips(
            year in 1970i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            hour in 1u32..=12,
            minute in 0u32..60,
            second in 0u32..60,
            after_noon in any::<bool>(),
        ) {
            let marker = if after_noon { "下午" } else { "上午" };
            let text = format!("{year}/{month}/{day}{marker}{hour}:{minute:02}:{second:02}");
            let temporal = parse_date_time(&text).unwrap();

            prop_assert!(temporal.is_valid());
            prop_assert_eq!(temporal.hour(), Some(to_24_hour(hour, after_noon)));
            prop_assert_eq!(temporal.minute(), Some(minute));
            prop_assert_eq!(temporal.second(), Some(second));
            prop_assert_eq!(format_temporal(&temporal, Locale::ZhTw), text);
        }
    }
}
