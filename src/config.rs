//! Fixed file layout
//!
//! The converter always reads `data/knowledge-base.csv` and writes
//! `data/knowledge-base.xlsx`, both relative to the working directory.

use std::path::{Path, PathBuf};

/// Directory holding both files
pub const DATA_DIR: &str = "data";

/// Source CSV file name
pub const SOURCE_FILE: &str = "knowledge-base.csv";

/// Destination workbook file name
pub const DESTINATION_FILE: &str = "knowledge-base.xlsx";

/// Resolved source and destination paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertPaths {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl ConvertPaths {
    /// Fixed layout rooted at `root` (used by tests with a temporary directory)
    pub fn in_dir<P: AsRef<Path>>(root: P) -> Self {
        let data = root.as_ref().join(DATA_DIR);
        Self {
            source: data.join(SOURCE_FILE),
            destination: data.join(DESTINATION_FILE),
        }
    }
}

impl Default for ConvertPaths {
    /// Fixed layout relative to the current working directory
    fn default() -> Self {
        Self {
            source: Path::new(DATA_DIR).join(SOURCE_FILE),
            destination: Path::new(DATA_DIR).join(DESTINATION_FILE),
        }
    }
}
