//! # sheetfake
//!
//! An in-process test double for a remote spreadsheet store and the asynchronous
//! client/server call boundary in front of it.
//!
//! Business logic written against a hosted spreadsheet can be exercised locally:
//! sheets live in memory, values are coerced the way the hosted store coerces them,
//! and calls from client code are delivered on a later turn with the same
//! serialization rules the real boundary applies.
//!
//! ## Features
//!
//! - Grid stores with header rows, 1-based range views and per-locale display reads
//! - Date-time text recognition (`2026/1/27上午9:00:00`, `2026/1/27 AM 9:00:00`, ISO)
//! - A deferred call boundary with strict and lenient serialization checks
//! - Platform services: utilities, session, properties and logger
//!
//! ## Example
//!
//! ```rust
//! use sheetfake::prelude::*;
//!
//! let mut sheet = GridStore::new(["Name", "Joined"], StoreOptions::with_locale(Locale::EnUs));
//! sheet.append(["Ada", "2026/1/27下午2:30:00"]);
//!
//! let cell = sheet.cell_at(2, 2).unwrap();
//! assert!(cell.value().is_temporal());
//! assert_eq!(cell.display_value(), "1/27/2026, 2:30:00 PM");
//! ```

pub mod environment;
pub mod prelude;
pub mod services;

pub use environment::{Environment, EnvironmentConfig, ScriptContext, SheetConfig};
pub use services::{Logger, PropertiesService, PropertyStore, Session, Utilities};

// Re-export core types
pub use sheetfake_core::{
    format_for_display,
    format_number,
    format_temporal,
    is_date_time_text,
    parse_date_time,
    // Cell types
    CellValue,
    // Error types
    Error,
    // Main types
    GridStore,
    Locale,
    Range,
    RangeMut,
    RangeRef,
    Result,
    Spreadsheet,
    StoreOptions,
    Temporal,

    // Constants
    MAX_COLS,
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export boundary types
pub use sheetfake_run::{
    check_serializable, to_json, Call, CallState, Operation, OperationRegistry, RunError,
    RunOptions, Runner, ScriptRun, TaskQueue, Unserializable, UnsupportedKind, Value,
};

/// Extension trait for range views to hand their contents to the call boundary
pub trait RangeExt {
    /// Raw values as a nested array; temporal cells stay temporal.
    fn raw_value(&self) -> Value;

    /// Display text as a nested array of strings. Always serializable.
    fn display_value_tree(&self) -> Value;
}

impl RangeExt for Range<'_> {
    fn raw_value(&self) -> Value {
        Value::from(self.read_raw())
    }

    fn display_value_tree(&self) -> Value {
        Value::from(self.read_display())
    }
}

impl RangeExt for RangeMut<'_> {
    fn raw_value(&self) -> Value {
        self.as_range().raw_value()
    }

    fn display_value_tree(&self) -> Value {
        self.as_range().display_value_tree()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_ext() {
        let mut sheet = GridStore::with_header(["When"]);
        sheet.append(["2026/1/27上午9:00:00"]);
        let range = sheet.data_range();

        let raw = range.raw_value();
        assert!(check_serializable(&raw).is_err());
        assert_eq!(raw.at(1).and_then(|r| r.at(0)).map(Value::kind), Some("temporal"));

        let display = range.display_value_tree();
        assert!(check_serializable(&display).is_ok());
        assert_eq!(
            display.at(1).and_then(|r| r.at(0)).and_then(Value::as_str),
            Some("2026/1/27上午9:00:00")
        );
    }
}
