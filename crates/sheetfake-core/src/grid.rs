//! Grid store
//!
//! An in-memory stand-in for one remote sheet: an insertion-ordered list of jagged
//! rows. Rows and columns are 1-based at the API and 0-based in storage.

use crate::cell::CellValue;
use crate::coerce::coerce_on_write;
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::range::{Range, RangeMut, RangeRef};

/// Default name given to a grid store created outside a spreadsheet
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Construction-time settings for a grid store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoreOptions {
    /// Locale used by display reads
    pub locale: Locale,
}

impl StoreOptions {
    pub fn with_locale(locale: Locale) -> Self {
        Self { locale }
    }
}

/// A grid of cell values (single sheet)
#[derive(Debug, Clone)]
pub struct GridStore {
    /// Sheet name
    name: String,
    /// Header row given at construction, restored by [`GridStore::clear`]
    header: Option<Vec<String>>,
    /// Row storage (0-based)
    rows: Vec<Vec<CellValue>>,
    /// Display locale
    locale: Locale,
}

impl GridStore {
    /// Create a grid store.
    ///
    /// A non-empty `header` becomes row 1 and survives [`GridStore::clear`]; an empty
    /// one leaves the store without rows.
    pub fn new<I, S>(header: I, options: StoreOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header: Vec<String> = header.into_iter().map(Into::into).collect();
        let header = (!header.is_empty()).then_some(header);
        let mut store = Self {
            name: DEFAULT_SHEET_NAME.to_string(),
            header,
            rows: Vec::new(),
            locale: options.locale,
        };
        store.clear();
        store
    }

    /// Create a store with no header row
    pub fn empty(locale: Locale) -> Self {
        Self::new(Vec::<String>::new(), StoreOptions::with_locale(locale))
    }

    /// Create a store with a header row and the default locale
    pub fn with_header<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(header, StoreOptions::default())
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Get the display locale
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Get the header row, if the store was created with one
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    // === Shape ===

    /// Number of rows, including the header row and any rows created by writes
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row, or 0 with no rows
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if the store has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    // === Mutation ===

    /// Append a row at the end, coercing each value on the way in
    pub fn append<I, V>(&mut self, row: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let row: Vec<CellValue> = row
            .into_iter()
            .map(|v| coerce_on_write(v.into()))
            .collect();
        tracing::trace!("{}: appending row {} ({} cells)", self.name, self.rows.len() + 1, row.len());
        self.rows.push(row);
        self
    }

    /// Reset to the header row only, or to no rows for a headerless store
    pub fn clear(&mut self) -> &mut Self {
        self.rows = match &self.header {
            Some(header) => vec![header.iter().map(CellValue::text).collect()],
            None => Vec::new(),
        };
        self
    }

    // === Ranges ===

    /// Get a range by 1-based origin and extent.
    ///
    /// Only the origin is validated; reads past the data yield empty text and writes
    /// past it grow the grid.
    pub fn range_at(&self, row: i64, col: i64, num_rows: usize, num_cols: usize) -> Result<Range<'_>> {
        let range = RangeRef::new(row, col, num_rows, num_cols)?;
        Ok(Range::new(self, range))
    }

    /// Get a single cell range (`range_at(row, col, 1, 1)`)
    pub fn cell_at(&self, row: i64, col: i64) -> Result<Range<'_>> {
        self.range_at(row, col, 1, 1)
    }

    /// Get a writable range by 1-based origin and extent
    pub fn range_at_mut(
        &mut self,
        row: i64,
        col: i64,
        num_rows: usize,
        num_cols: usize,
    ) -> Result<RangeMut<'_>> {
        let range = RangeRef::new(row, col, num_rows, num_cols)?;
        Ok(RangeMut::new(self, range))
    }

    /// Get a writable single cell range
    pub fn cell_at_mut(&mut self, row: i64, col: i64) -> Result<RangeMut<'_>> {
        self.range_at_mut(row, col, 1, 1)
    }

    /// The range covering all populated rows and columns (0x0 when there are none)
    pub fn data_range(&self) -> Range<'_> {
        Range::new(self, self.data_range_ref())
    }

    /// Writable form of [`GridStore::data_range`]
    pub fn data_range_mut(&mut self) -> RangeMut<'_> {
        let range = self.data_range_ref();
        RangeMut::new(self, range)
    }

    fn data_range_ref(&self) -> RangeRef {
        let (rows, cols) = (self.row_count(), self.column_count());
        if rows == 0 || cols == 0 {
            RangeRef::empty()
        } else {
            RangeRef::from_origin(1, 1, rows, cols)
        }
    }

    // === Raw storage ===

    /// Stored rows, exactly as held (no read-side conversion)
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Replace stored rows without write-side coercion.
    ///
    /// Lets tests seed text that a real store would have coerced, to exercise the
    /// read-side conversion.
    pub fn set_rows(&mut self, rows: Vec<Vec<CellValue>>) {
        self.rows = rows;
    }

    /// Stored value at a 0-based position, if the row and column exist
    pub(crate) fn stored(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Store an already-coerced value at a 0-based position, growing the grid.
    ///
    /// Missing rows are created empty; a short row is padded with empty text up to
    /// the target column.
    pub(crate) fn put(&mut self, row: usize, col: usize, value: CellValue) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize_with(col, CellValue::empty_text);
            cells.push(value);
        } else {
            cells[col] = value;
        }
    }
}

impl Default for GridStore {
    fn default() -> Self {
        Self::empty(Locale::default())
    }
}

/// Check a 1-based origin
pub(crate) fn validate_origin(row: i64, col: i64) -> Result<(usize, usize)> {
    if row < 1 {
        return Err(Error::RowTooSmall);
    }
    if col < 1 {
        return Err(Error::ColumnTooSmall);
    }
    Ok((row as usize, col as usize))
}
