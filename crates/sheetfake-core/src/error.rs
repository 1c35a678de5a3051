//! Error types for sheetfake-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetfake-core
///
/// The two address variants carry the exact wording the real platform uses, so
/// business logic that matches on error text behaves the same against the double.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Range requested with a starting row below 1
    #[error("The starting row of the range is too small.")]
    RowTooSmall,

    /// Range requested with a starting column below 1
    #[error("The starting column of the range is too small.")]
    ColumnTooSmall,

    /// Write target row past [`crate::MAX_ROWS`]
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(usize, usize),

    /// Write target column past [`crate::MAX_COLS`]
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(usize, usize),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("A sheet with the name \"{0}\" already exists")]
    DuplicateSheetName(String),

    /// Locale identifier not recognized
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}

impl Error {
    /// Whether this error is an addressing contract violation (row/column < 1)
    pub fn is_address_error(&self) -> bool {
        matches!(self, Error::RowTooSmall | Error::ColumnTooSmall)
    }
}
