use crate::config::ConvertPaths;
use crate::error::{ConvertError, ConvertResult};
use crate::excel;
use crate::parser;
use colored::Colorize;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Data rows written, not counting the header row
    pub rows: usize,
    pub columns: usize,
}

/// Convert the source CSV into the destination workbook.
///
/// The whole file is parsed before the destination is touched, so a parse
/// failure leaves an existing workbook as it was. Nothing is printed here.
pub fn convert(paths: &ConvertPaths) -> ConvertResult<ConversionReport> {
    if !paths.source.exists() {
        return Err(ConvertError::MissingInput(paths.source.clone()));
    }

    debug!(path = %paths.source.display(), "reading CSV");
    let dataset = parser::parse_csv(&paths.source)?;
    info!(
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "parsed CSV"
    );

    debug!(path = %paths.destination.display(), "writing workbook");
    excel::export_dataset(&dataset, &paths.destination)?;

    Ok(ConversionReport {
        source: paths.source.clone(),
        destination: paths.destination.clone(),
        rows: dataset.row_count(),
        columns: dataset.column_count(),
    })
}

/// Execute the conversion and map the outcome to a process exit code
pub fn run(paths: &ConvertPaths) -> ExitCode {
    match convert(paths) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &ConversionReport) {
    println!(
        "{}",
        format!(
            "✅ Successfully converted {} to {}",
            report.source.display(),
            report.destination.display()
        )
        .bold()
        .green()
    );
    println!("📊 Total rows: {}", report.rows);
}

/// Print a failure to stderr in the operator-facing format
pub fn report_error(error: &ConvertError) {
    // colored only looks at stdout when deciding
    if !std::io::stderr().is_terminal() {
        colored::control::set_override(false);
    }
    eprintln!("{}", format_error(error).join("\n"));
}

fn format_error(error: &ConvertError) -> Vec<String> {
    let prefix = "Error:".bold().red();
    match error {
        ConvertError::MissingCapability(_) => vec![
            format!("{} Required packages not installed.", prefix),
            format!(
                "Please rebuild with: {}",
                "cargo install kb-convert --features xlsx".cyan()
            ),
        ],
        _ => vec![format!("{} {}", prefix, error)],
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
