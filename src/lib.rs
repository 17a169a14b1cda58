//! kb-convert - knowledge base CSV to Excel converter
//!
//! Reads `data/knowledge-base.csv`, infers column types, and writes the same
//! rows and columns to `data/knowledge-base.xlsx` as a single worksheet.
//!
//! # Features
//!
//! - Header row names the columns (blank and duplicate names are made unique)
//! - Row and column order preserved, no index column
//! - Conservative type inference: a column is numeric or boolean only when
//!   every non-empty cell is, otherwise text is kept verbatim
//! - `xlsx` cargo feature (default) provides the spreadsheet writer
//!
//! # Example
//!
//! ```no_run
//! use kb_convert::cli::convert;
//! use kb_convert::config::ConvertPaths;
//!
//! let report = convert(&ConvertPaths::default())?;
//! println!("Total rows: {}", report.rows);
//! # Ok::<(), kb_convert::error::ConvertError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use config::ConvertPaths;
pub use error::{ConvertError, ConvertResult};
pub use types::{CellValue, Column, ColumnKind, ColumnValue, Dataset};
