//! Prescription index loaded from the reference spreadsheet

use crate::io::configuration::{IMAGE_COLUMN, MISSING_PRESCRIPTION_TEXT, PRESCRIPTION_COLUMN};
use crate::io::error::{DatasetError, Result};
use calamine::{Reader, open_workbook_auto};
use std::collections::HashMap;
use std::path::Path;

/// Read-only lookup from image base name to prescription text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrescriptionIndex {
    entries: HashMap<String, String>,
}

impl PrescriptionIndex {
    /// Load the first worksheet of a workbook (`.xlsx`, `.xls`, `.ods`)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The workbook cannot be opened or parsed
    /// - It contains no worksheet
    /// - The header row lacks the `Image` or `Prescription` column
    pub fn from_workbook(path: &Path) -> Result<Self> {
        let spreadsheet_error = |source| DatasetError::SpreadsheetRead {
            path: path.to_path_buf(),
            source,
        };

        let mut workbook = open_workbook_auto(path).map_err(spreadsheet_error)?;
        let first_sheet = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| DatasetError::InvalidSourceData {
                reason: format!("workbook '{}' has no worksheets", path.display()),
            })?;
        let range = workbook
            .worksheet_range(&first_sheet)
            .map_err(spreadsheet_error)?;

        let index = Self::from_rows(
            range
                .rows()
                .map(|row| row.iter().map(ToString::to_string).collect::<Vec<_>>()),
        )?;
        log::info!(
            "Loaded {} prescriptions from {}",
            index.len(),
            path.display()
        );
        Ok(index)
    }

    /// Build the index from rows of cell text, the first row being the header
    ///
    /// Image names are trimmed, rows with an empty name are skipped, and a
    /// repeated name keeps its last prescription.
    ///
    /// # Errors
    ///
    /// Returns an error if the header lacks the `Image` or `Prescription` column
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut rows = rows.into_iter();
        let header = rows.next().unwrap_or_default();
        let column = |name: &'static str| {
            header
                .iter()
                .position(|cell| cell == name)
                .ok_or(DatasetError::MissingColumn { column: name })
        };
        let image_col = column(IMAGE_COLUMN)?;
        let text_col = column(PRESCRIPTION_COLUMN)?;

        let mut entries = HashMap::new();
        for row in rows {
            let name = row.get(image_col).map_or("", |cell| cell.trim());
            if name.is_empty() {
                continue;
            }
            let text = row.get(text_col).cloned().unwrap_or_default();
            entries.insert(name.to_string(), text);
        }

        Ok(Self { entries })
    }

    /// Prescription text for an image base name
    pub fn get(&self, base_name: &str) -> Option<&str> {
        self.entries.get(base_name).map(String::as_str)
    }

    /// Prescription text, or the fallback shown to the operator
    pub fn text_for(&self, base_name: &str) -> &str {
        self.get(base_name).unwrap_or(MISSING_PRESCRIPTION_TEXT)
    }

    /// Number of indexed images
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the spreadsheet held no usable rows
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
