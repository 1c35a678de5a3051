//! Range views over a grid store
//!
//! A range is a 1-based origin plus an extent. Reads never fail: cells outside the
//! populated data read as empty text. Writes grow the grid as needed, up to
//! [`MAX_ROWS`] by [`MAX_COLS`].

use crate::cell::CellValue;
use crate::coerce::{coerce_on_read, coerce_on_write, format_for_display};
use crate::error::{Error, Result};
use crate::grid::{validate_origin, GridStore};
use crate::locale::Locale;
use crate::{MAX_COLS, MAX_ROWS};

/// Origin and extent of a range (1-based origin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeRef {
    /// Starting row (1-based)
    pub row: usize,
    /// Starting column (1-based)
    pub col: usize,
    /// Number of rows
    pub num_rows: usize,
    /// Number of columns
    pub num_cols: usize,
}

impl RangeRef {
    /// Validate a caller-supplied origin and build a range descriptor
    pub fn new(row: i64, col: i64, num_rows: usize, num_cols: usize) -> Result<Self> {
        let (row, col) = validate_origin(row, col)?;
        Ok(Self::from_origin(row, col, num_rows, num_cols))
    }

    /// Build from an origin already known to be valid
    pub(crate) fn from_origin(row: usize, col: usize, num_rows: usize, num_cols: usize) -> Self {
        Self {
            row,
            col,
            num_rows,
            num_cols,
        }
    }

    /// The 0x0 range at A1
    pub fn empty() -> Self {
        Self::from_origin(1, 1, 0, 0)
    }

    /// Check whether the range covers no cells
    pub fn is_empty(&self) -> bool {
        self.num_rows == 0 || self.num_cols == 0
    }

    /// 0-based storage position of a cell given its offset inside the range
    fn storage_position(&self, row_offset: usize, col_offset: usize) -> (usize, usize) {
        (self.row - 1 + row_offset, self.col - 1 + col_offset)
    }
}

/// Walk every cell of `range`, mapping stored values (or `None` for missing cells)
fn traverse<T>(
    store: &GridStore,
    range: &RangeRef,
    mut f: impl FnMut(Option<&CellValue>) -> T,
) -> Vec<Vec<T>> {
    (0..range.num_rows)
        .map(|i| {
            (0..range.num_cols)
                .map(|j| {
                    let (row, col) = range.storage_position(i, j);
                    f(store.stored(row, col))
                })
                .collect()
        })
        .collect()
}

fn read_raw(store: &GridStore, range: &RangeRef) -> Vec<Vec<CellValue>> {
    traverse(store, range, |cell| match cell {
        Some(value) => coerce_on_read(value),
        None => CellValue::empty_text(),
    })
}

fn read_display(store: &GridStore, range: &RangeRef) -> Vec<Vec<String>> {
    let locale = store.locale();
    traverse(store, range, |cell| match cell {
        Some(value) => format_for_display(value, locale),
        None => String::new(),
    })
}

/// A read-only view of a range of cells
#[derive(Debug, Clone, Copy)]
pub struct Range<'a> {
    store: &'a GridStore,
    range: RangeRef,
}

impl<'a> Range<'a> {
    /// Create a new range view
    pub fn new(store: &'a GridStore, range: RangeRef) -> Self {
        Self { store, range }
    }

    /// Get the range descriptor
    pub fn range(&self) -> &RangeRef {
        &self.range
    }

    /// Starting row (1-based)
    pub fn row(&self) -> usize {
        self.range.row
    }

    /// Starting column (1-based)
    pub fn col(&self) -> usize {
        self.range.col
    }

    /// Get the number of rows
    pub fn num_rows(&self) -> usize {
        self.range.num_rows
    }

    /// Get the number of columns
    pub fn num_cols(&self) -> usize {
        self.range.num_cols
    }

    /// Locale of the underlying store
    pub fn locale(&self) -> Locale {
        self.store.locale()
    }

    /// Values in the range, with date-time-like text read back as temporal values
    pub fn read_raw(&self) -> Vec<Vec<CellValue>> {
        read_raw(self.store, &self.range)
    }

    /// Values in the range formatted as display text in the store's locale
    pub fn read_display(&self) -> Vec<Vec<String>> {
        read_display(self.store, &self.range)
    }

    /// Top-left raw value (empty text for a 0x0 range)
    pub fn value(&self) -> CellValue {
        self.read_raw()
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .unwrap_or_else(CellValue::empty_text)
    }

    /// Top-left display value
    pub fn display_value(&self) -> String {
        self.read_display()
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .unwrap_or_default()
    }
}

/// A writable view of a range of cells
#[derive(Debug)]
pub struct RangeMut<'a> {
    store: &'a mut GridStore,
    range: RangeRef,
}

impl<'a> RangeMut<'a> {
    /// Create a new mutable range view
    pub fn new(store: &'a mut GridStore, range: RangeRef) -> Self {
        Self { store, range }
    }

    /// Get the range descriptor
    pub fn range(&self) -> &RangeRef {
        &self.range
    }

    /// Borrow as a read-only view
    pub fn as_range(&self) -> Range<'_> {
        Range::new(self.store, self.range)
    }

    /// See [`Range::read_raw`]
    pub fn read_raw(&self) -> Vec<Vec<CellValue>> {
        read_raw(self.store, &self.range)
    }

    /// See [`Range::read_display`]
    pub fn read_display(&self) -> Vec<Vec<String>> {
        read_display(self.store, &self.range)
    }

    /// Write a 2D block starting at the range origin.
    ///
    /// The block's own shape decides which cells are written; the range extent is not
    /// consulted. Every value is coerced on the way in. A block reaching past
    /// [`MAX_ROWS`] or [`MAX_COLS`] is rejected and nothing is written.
    pub fn write<R, I, V>(&mut self, values: R) -> Result<&mut Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let block: Vec<Vec<CellValue>> = values
            .into_iter()
            .map(|row| row.into_iter().map(|v| coerce_on_write(v.into())).collect())
            .collect();
        check_write_bounds(&self.range, &block)?;

        for (i, row) in block.into_iter().enumerate() {
            for (j, value) in row.into_iter().enumerate() {
                let (r, c) = self.range.storage_position(i, j);
                self.store.put(r, c, value);
            }
        }
        Ok(self)
    }

    /// Write one value at the range origin (a 1x1 [`RangeMut::write`])
    pub fn write_value<V: Into<CellValue>>(&mut self, value: V) -> Result<&mut Self> {
        self.write([[value]])
    }
}

/// Check that every cell `block` would touch lies inside the grid limits
fn check_write_bounds(range: &RangeRef, block: &[Vec<CellValue>]) -> Result<()> {
    let Some(last_row) = block.iter().rposition(|row| !row.is_empty()) else {
        return Ok(());
    };
    let row = range.row.saturating_add(last_row);
    if row > MAX_ROWS {
        return Err(Error::RowOutOfBounds(row, MAX_ROWS));
    }
    let width = block.iter().map(Vec::len).max().unwrap_or(0);
    let col = range.col.saturating_add(width - 1);
    if col > MAX_COLS {
        return Err(Error::ColumnOutOfBounds(col, MAX_COLS));
    }
    Ok(())
}
