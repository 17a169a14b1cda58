use std::path::PathBuf;
use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("{} not found!", .0.display())]
    MissingInput(PathBuf),

    #[error("Required packages not installed: {0}")]
    MissingCapability(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl ConvertError {
    /// Source file was absent at its expected path
    pub fn is_missing_input(&self) -> bool {
        matches!(self, ConvertError::MissingInput(_))
    }

    /// Serialization support was compiled out
    pub fn is_missing_capability(&self) -> bool {
        matches!(self, ConvertError::MissingCapability(_))
    }
}
