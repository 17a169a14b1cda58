use clap::Parser;
use kb_convert::cli;
use kb_convert::config::ConvertPaths;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "kb-convert")]
#[command(about = "Convert data/knowledge-base.csv to data/knowledge-base.xlsx")]
#[command(long_about = "kb-convert - Knowledge base CSV to Excel converter

Reads data/knowledge-base.csv (relative to the current directory) and writes
every row to data/knowledge-base.xlsx, replacing any existing workbook.

OUTPUT:
  Single worksheet (Sheet1), header row first, no index column.
  Numeric and true/false columns become numbers and booleans;
  anything else is kept as text.

EXIT STATUS:
  0  conversion succeeded
  1  input missing, writer support missing, or read/write failure

Set RUST_LOG=kb_convert=debug for diagnostic logging on stderr.")]
#[command(version)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kb_convert=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    cli::run(&ConvertPaths::default())
}
