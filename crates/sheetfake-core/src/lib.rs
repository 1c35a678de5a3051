//! # sheetfake-core
//!
//! In-memory stand-in for a remote spreadsheet store, reproducing the store's
//! implicit type coercion.
//!
//! This crate provides:
//! - [`CellValue`] and [`Temporal`] - Tagged cell values
//! - [`coerce`] - Date-time text recognition, write/read conversion and display formatting
//! - [`GridStore`] - A single sheet of jagged rows with 1-based addressing
//! - [`Range`] and [`RangeMut`] - Rectangular views with raw/display reads and coercing writes
//! - [`Spreadsheet`] - Named sheets sharing one [`Locale`]
//!
//! ## Example
//!
//! ```rust
//! use sheetfake_core::{GridStore, Locale};
//!
//! let mut sheet = GridStore::empty(Locale::ZhTw);
//! sheet.cell_at_mut(1, 1).unwrap().write_value("2026/1/27上午9:00:00").unwrap();
//!
//! // The store turned the text into a date-time...
//! let raw = sheet.cell_at(1, 1).unwrap().value();
//! assert_eq!(raw.as_temporal().and_then(|t| t.hour()), Some(9));
//!
//! // ...and renders it back through the locale
//! assert_eq!(sheet.cell_at(1, 1).unwrap().display_value(), "2026/1/27上午9:00:00");
//!
//! // Out-of-range origins are rejected with the platform's wording
//! assert!(sheet.range_at(0, 1, 1, 1).is_err());
//! ```

pub mod cell;
pub mod coerce;
pub mod error;
pub mod grid;
pub mod locale;
pub mod range;
pub mod spreadsheet;

// Re-exports for convenience
pub use cell::{format_number, CellValue, Temporal};
pub use coerce::{format_for_display, format_temporal, is_date_time_text, parse_date_time};
pub use error::{Error, Result};
pub use grid::{GridStore, StoreOptions};
pub use locale::Locale;
pub use range::{Range, RangeMut, RangeRef};
pub use spreadsheet::Spreadsheet;

/// Highest 1-based row a write may reach
pub const MAX_ROWS: usize = 1_048_576;

/// Highest 1-based column a write may reach
pub const MAX_COLS: usize = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 100;
