//! Excel export for the converted dataset
//!
//! Serialization needs the `xlsx` cargo feature (on by default). Without it,
//! [`export_dataset`] reports a missing capability instead of writing.

#[cfg(feature = "xlsx")]
mod exporter;

#[cfg(feature = "xlsx")]
pub use exporter::ExcelExporter;

use crate::error::ConvertResult;
use crate::types::Dataset;
use std::path::Path;

/// Name of the single worksheet in the output workbook
pub const SHEET_NAME: &str = "Sheet1";

/// Write `dataset` to `output_path` as a single-sheet workbook
#[cfg(feature = "xlsx")]
pub fn export_dataset(dataset: &Dataset, output_path: &Path) -> ConvertResult<()> {
    ExcelExporter::new(dataset).export(output_path)
}

#[cfg(not(feature = "xlsx"))]
pub fn export_dataset(_dataset: &Dataset, _output_path: &Path) -> ConvertResult<()> {
    Err(crate::error::ConvertError::MissingCapability(
        "xlsx writer support was not compiled in".to_string(),
    ))
}
