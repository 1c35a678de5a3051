//! Spreadsheet - a named collection of grid stores sharing one locale

use crate::error::{Error, Result};
use crate::grid::{GridStore, StoreOptions};
use crate::locale::Locale;
use crate::MAX_SHEET_NAME_LEN;

/// Name reported by [`Spreadsheet::name`]
pub const SPREADSHEET_NAME: &str = "Mock Spreadsheet";

/// A spreadsheet document holding named sheets
///
/// Every sheet inserted here inherits the spreadsheet's locale.
#[derive(Debug, Clone, Default)]
pub struct Spreadsheet {
    /// Sheets in insertion order
    sheets: Vec<GridStore>,
    /// Locale shared by all sheets
    locale: Locale,
}

impl Spreadsheet {
    /// Create an empty spreadsheet
    pub fn new(locale: Locale) -> Self {
        Self {
            sheets: Vec::new(),
            locale,
        }
    }

    /// Spreadsheet display name
    pub fn name(&self) -> &str {
        SPREADSHEET_NAME
    }

    /// Locale shared by all sheets
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the spreadsheet has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get a sheet by exact name
    pub fn sheet_by_name(&self, name: &str) -> Option<&GridStore> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    /// Get a mutable sheet by exact name
    pub fn sheet_by_name_mut(&mut self, name: &str) -> Option<&mut GridStore> {
        self.sheets.iter_mut().find(|s| s.name() == name)
    }

    /// Get a sheet by name, failing if it does not exist
    pub fn require_sheet(&self, name: &str) -> Result<&GridStore> {
        self.sheet_by_name(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Mutable form of [`Spreadsheet::require_sheet`]
    pub fn require_sheet_mut(&mut self, name: &str) -> Result<&mut GridStore> {
        self.sheet_by_name_mut(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Iterate over all sheets
    pub fn sheets(&self) -> impl Iterator<Item = &GridStore> {
        self.sheets.iter()
    }

    /// Iterate over all sheets mutably
    pub fn sheets_mut(&mut self) -> impl Iterator<Item = &mut GridStore> {
        self.sheets.iter_mut()
    }

    /// Names of all sheets in insertion order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(GridStore::name).collect()
    }

    /// Insert a new headerless sheet
    pub fn insert_sheet(&mut self, name: &str) -> Result<&mut GridStore> {
        self.insert_sheet_with_header(name, Vec::<String>::new())
    }

    /// Insert a new sheet whose first row is `header`
    pub fn insert_sheet_with_header<I, S>(&mut self, name: &str, header: I) -> Result<&mut GridStore>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.validate_sheet_name(name)?;

        let mut sheet = GridStore::new(header, StoreOptions::with_locale(self.locale));
        sheet.set_name(name);
        self.sheets.push(sheet);
        tracing::debug!("inserted sheet {name:?}");

        let index = self.sheets.len() - 1;
        Ok(&mut self.sheets[index])
    }

    /// Get an existing sheet, or insert it with `header`.
    ///
    /// An existing sheet is returned untouched; `header` is ignored for it.
    pub fn get_or_create_sheet<I, S>(&mut self, name: &str, header: I) -> Result<&mut GridStore>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.sheets.iter().position(|s| s.name() == name) {
            Some(index) => Ok(&mut self.sheets[index]),
            None => self.insert_sheet_with_header(name, header),
        }
    }

    /// Remove a sheet by name
    pub fn remove_sheet(&mut self, name: &str) -> Result<GridStore> {
        let index = self
            .sheets
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))?;
        Ok(self.sheets.remove(index))
    }

    /// Drop every sheet
    pub fn reset(&mut self) {
        self.sheets.clear();
    }

    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }
        if self.sheet_by_name(name).is_some() {
            return Err(Error::DuplicateSheetName(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    #[test]
    fn test_new_spreadsheet() {
        let ss = Spreadsheet::new(Locale::ZhTw);
        assert!(ss.is_empty());
        assert_eq!(ss.name(), "Mock Spreadsheet");
        assert!(ss.sheet_by_name("打卡記錄").is_none());
    }

    #[test]
    fn test_insert_sheet() {
        let mut ss = Spreadsheet::new(Locale::EnUs);
        ss.insert_sheet("Data").unwrap().append(["x", "y"]);

        let sheet = ss.sheet_by_name("Data").unwrap();
        assert_eq!(sheet.name(), "Data");
        assert_eq!(sheet.locale(), Locale::EnUs);
        assert_eq!(sheet.row_count(), 1);
        assert_eq!(ss.sheet_names(), vec!["Data"]);
    }

    #[test]
    fn test_invalid_and_duplicate_names() {
        let mut ss = Spreadsheet::new(Locale::Iso);
        ss.insert_sheet("Trips").unwrap();

        assert_eq!(
            ss.insert_sheet("Trips").unwrap_err(),
            Error::DuplicateSheetName("Trips".into())
        );
        assert!(matches!(ss.insert_sheet("  "), Err(Error::InvalidSheetName(_))));
        assert!(ss.insert_sheet(&"x".repeat(MAX_SHEET_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_get_or_create_keeps_existing_header() {
        let mut ss = Spreadsheet::new(Locale::ZhTw);
        ss.get_or_create_sheet("Log", ["Type", "Time"]).unwrap();
        let sheet = ss.get_or_create_sheet("Log", ["Other"]).unwrap();

        assert_eq!(sheet.header(), Some(&["Type".to_string(), "Time".to_string()][..]));
        assert_eq!(ss.sheet_count(), 1);
    }

    #[test]
    fn test_require_and_remove() {
        let mut ss = Spreadsheet::new(Locale::ZhTw);
        ss.insert_sheet_with_header("A", ["h"]).unwrap();

        assert_eq!(ss.require_sheet("A").unwrap().rows()[0][0], CellValue::from("h"));
        assert_eq!(
            ss.require_sheet("B").unwrap_err().to_string(),
            "Sheet not found: B"
        );
        assert_eq!(ss.remove_sheet("A").unwrap().name(), "A");
        assert!(ss.is_empty());

        ss.insert_sheet("C").unwrap();
        ss.reset();
        assert_eq!(ss.sheet_count(), 0);
    }
}
