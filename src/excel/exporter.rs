//! Excel exporter implementation

use crate::error::{ConvertError, ConvertResult};
use crate::types::{Column, ColumnValue, Dataset};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;
use tracing::debug;

/// Writes a `Dataset` to a single-sheet .xlsx workbook.
///
/// Row 0 holds the column names; data starts at row 1. There is no index
/// column, so column A is the first source column.
pub struct ExcelExporter<'a> {
    dataset: &'a Dataset,
    header_format: Format,
}

impl<'a> ExcelExporter<'a> {
    /// Create a new Excel exporter
    pub fn new(dataset: &'a Dataset) -> Self {
        let header_format = Format::new()
            .set_bold()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center);

        Self {
            dataset,
            header_format,
        }
    }

    /// Export the dataset to an Excel .xlsx file, replacing any existing file
    pub fn export(&self, output_path: &Path) -> ConvertResult<()> {
        let mut workbook = self.build_workbook()?;

        workbook
            .save(output_path)
            .map_err(|e| ConvertError::Export(format!("Failed to save Excel file: {}", e)))?;

        debug!(path = %output_path.display(), "saved workbook");
        Ok(())
    }

    fn build_workbook(&self) -> ConvertResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(super::SHEET_NAME)
            .map_err(|e| ConvertError::Export(format!("Failed to set worksheet name: {}", e)))?;

        for (col_idx, column) in self.dataset.columns.iter().enumerate() {
            let col = column_index(col_idx)?;
            self.write_header(worksheet, col, &column.name)?;
            self.write_column(worksheet, col, column)?;
        }

        Ok(workbook)
    }

    fn write_header(&self, worksheet: &mut Worksheet, col: u16, name: &str) -> ConvertResult<()> {
        worksheet
            .write_string_with_format(0, col, name, &self.header_format)
            .map_err(|e| ConvertError::Export(format!("Failed to write header: {}", e)))?;
        Ok(())
    }

    /// Write one column's data cells; empty cells are left blank
    fn write_column(
        &self,
        worksheet: &mut Worksheet,
        col: u16,
        column: &Column,
    ) -> ConvertResult<()> {
        match &column.values {
            ColumnValue::Number(nums) => {
                for (row_idx, value) in nums.iter().enumerate() {
                    if let Some(value) = value {
                        worksheet
                            .write_number(row_index(row_idx)?, col, *value)
                            .map_err(|e| {
                                ConvertError::Export(format!("Failed to write number: {}", e))
                            })?;
                    }
                }
            }
            ColumnValue::Boolean(bools) => {
                for (row_idx, value) in bools.iter().enumerate() {
                    if let Some(value) = value {
                        worksheet
                            .write_boolean(row_index(row_idx)?, col, *value)
                            .map_err(|e| {
                                ConvertError::Export(format!("Failed to write boolean: {}", e))
                            })?;
                    }
                }
            }
            ColumnValue::Text(texts) => {
                for (row_idx, value) in texts.iter().enumerate() {
                    if let Some(value) = value {
                        worksheet
                            .write_string(row_index(row_idx)?, col, value)
                            .map_err(|e| {
                                ConvertError::Export(format!("Failed to write text: {}", e))
                            })?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn column_index(idx: usize) -> ConvertResult<u16> {
    u16::try_from(idx).map_err(|_| {
        ConvertError::Export(format!("Too many columns for a worksheet: {}", idx + 1))
    })
}

/// Worksheet row for data row `idx` (row 0 is the header)
fn row_index(idx: usize) -> ConvertResult<u32> {
    u32::try_from(idx + 1).map_err(|_| {
        ConvertError::Export(format!("Too many rows for a worksheet: {}", idx + 1))
    })
}
