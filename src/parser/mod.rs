use crate::error::{ConvertError, ConvertResult};
use crate::types::{Column, ColumnValue, Dataset};
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Integers longer than this no longer survive a trip through an f64 cell
const MAX_INTEGER_DIGITS: usize = 15;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse a comma-separated file into a `Dataset`.
///
/// The first record is the header row and names the columns. Every following
/// record becomes one row, in file order.
///
/// # Header handling
/// - A blank header cell at position `i` is named `Unnamed: i`
/// - A repeated name gets a `.1`, `.2`, ... suffix on later occurrences
///
/// # Records
/// - Blank lines are skipped
/// - Short records are padded with empty cells
/// - Records with more fields than the header are rejected
///
/// # Example
/// ```no_run
/// use kb_convert::parser::parse_csv;
/// use std::path::Path;
///
/// let dataset = parse_csv(Path::new("data/knowledge-base.csv"))?;
/// println!("Columns: {:?}", dataset.column_names());
/// println!("Rows: {}", dataset.row_count());
/// # Ok::<(), kb_convert::error::ConvertError>(())
/// ```
pub fn parse_csv(path: &Path) -> ConvertResult<Dataset> {
    let file = File::open(path)?;
    parse_reader(file)
}

/// Parse comma-separated text from any reader (see [`parse_csv`])
pub fn parse_reader<R: Read>(reader: R) -> ConvertResult<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = csv_reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => {
            return Err(ConvertError::Parse(
                "No columns to parse from file".to_string(),
            ))
        }
    };
    let column_names = build_column_names(&header);
    let width = column_names.len();
    debug!(columns = ?column_names, "parsed header row");

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); width];
    for record in records {
        let record = record?;
        if record.len() > width {
            let line = record.position().map_or(0, |p| p.line());
            return Err(ConvertError::Parse(format!(
                "Expected {} fields in line {}, saw {}",
                width,
                line,
                record.len()
            )));
        }
        for (col, column_cells) in cells.iter_mut().enumerate() {
            column_cells.push(record.get(col).unwrap_or_default().to_string());
        }
    }

    let classifier = CellClassifier::new()?;
    let mut dataset = Dataset::new();
    for (name, column_cells) in column_names.into_iter().zip(cells) {
        let column = classifier.infer_column(name, column_cells);
        debug!(column = %column.name, kind = ?column.kind(), "inferred column type");
        dataset.add_column(column);
    }

    dataset.validate_lengths().map_err(ConvertError::Parse)?;
    Ok(dataset)
}

/// Name header cells, filling blanks and de-duplicating repeats
fn build_column_names(header: &csv::StringRecord) -> Vec<String> {
    let raw: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let field = if idx == 0 {
                field.trim_start_matches(BYTE_ORDER_MARK)
            } else {
                field
            };
            if field.is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                field.to_string()
            }
        })
        .collect();

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(raw.len());
    for name in raw {
        let mut candidate = name;
        let mut count = counts.get(&candidate).copied().unwrap_or(0);
        while count > 0 {
            counts.insert(candidate.clone(), count + 1);
            candidate = format!("{}.{}", candidate, count);
            count = counts.get(&candidate).copied().unwrap_or(0);
        }
        counts.insert(candidate.clone(), count + 1);
        names.push(candidate);
    }
    names
}

/// Decides the type of each column from its raw cell text
struct CellClassifier {
    number: Regex,
}

impl CellClassifier {
    fn new() -> ConvertResult<Self> {
        let number = Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$")
            .map_err(|e| ConvertError::Parse(format!("Invalid number pattern: {}", e)))?;
        Ok(Self { number })
    }

    /// Number column if every non-empty cell is numeric, then boolean, else text
    fn infer_column(&self, name: String, cells: Vec<String>) -> Column {
        let filled: Vec<&String> = cells.iter().filter(|c| !c.is_empty()).collect();

        if !filled.is_empty() && filled.iter().all(|c| self.parse_number(c).is_some()) {
            let values = cells
                .iter()
                .map(|c| self.parse_number(c))
                .collect();
            return Column::new(name, ColumnValue::Number(values));
        }

        if !filled.is_empty() && filled.iter().all(|c| parse_boolean(c).is_some()) {
            let values = cells.iter().map(|c| parse_boolean(c)).collect();
            return Column::new(name, ColumnValue::Boolean(values));
        }

        let values = cells
            .into_iter()
            .map(|c| if c.is_empty() { None } else { Some(c) })
            .collect();
        Column::new(name, ColumnValue::Text(values))
    }

    /// Parse `raw` only when it is unambiguously a number
    fn parse_number(&self, raw: &str) -> Option<f64> {
        if !self.number.is_match(raw) {
            return None;
        }

        let unsigned = raw.trim_start_matches(['+', '-']);
        let integer_part = unsigned
            .split(['.', 'e', 'E'])
            .next()
            .unwrap_or_default();
        // "007" is an identifier, not seven
        if integer_part.len() > 1 && integer_part.starts_with('0') {
            return None;
        }
        if integer_part.len() == unsigned.len() && integer_part.len() > MAX_INTEGER_DIGITS {
            return None;
        }

        raw.parse::<f64>().ok().filter(|n| n.is_finite())
    }
}

fn parse_boolean(raw: &str) -> Option<bool> {
    match raw {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellValue, ColumnKind};

    fn parse(text: &str) -> ConvertResult<Dataset> {
        parse_reader(text.as_bytes())
    }

    #[test]
    fn test_parse_simple_csv() {
        let dataset = parse("id,name,value\n1,Alpha,10\n2,Beta,20\n").unwrap();
        assert_eq!(dataset.column_names(), vec!["id", "name", "value"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(
            dataset.row(1),
            vec![
                CellValue::Number(2.0),
                CellValue::Text("Beta".to_string()),
                CellValue::Number(20.0)
            ]
        );
    }

    #[test]
    fn test_empty_input_is_error() {
        let err = parse("").unwrap_err();
        assert!(err.to_string().contains("No columns to parse"));
    }

    #[test]
    fn test_header_only() {
        let dataset = parse("a,b,c\n").unwrap();
        assert_eq!(dataset.column_count(), 3);
        assert_eq!(dataset.row_count(), 0);
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() {
        let dataset = parse("a,b,a,a\n1,2,3,4\n").unwrap();
        assert_eq!(dataset.column_names(), vec!["a", "b", "a.1", "a.2"]);
    }

    #[test]
    fn test_duplicate_suffix_skips_taken_name() {
        let dataset = parse("a,a.1,a\n1,2,3\n").unwrap();
        assert_eq!(dataset.column_names(), vec!["a", "a.1", "a.1.1"]);
    }

    #[test]
    fn test_blank_header_named_by_position() {
        let dataset = parse("id,,note\n1,x,y\n").unwrap();
        assert_eq!(dataset.column_names(), vec!["id", "Unnamed: 1", "note"]);
    }

    #[test]
    fn test_byte_order_mark_stripped() {
        let dataset = parse("\u{feff}id,name\n1,a\n").unwrap();
        assert_eq!(dataset.column_names(), vec!["id", "name"]);
    }

    #[test]
    fn test_short_record_padded() {
        let dataset = parse("a,b,c\n1,2\n").unwrap();
        assert_eq!(dataset.row_count(), 1);
        assert_eq!(dataset.row(0)[2], CellValue::Empty);
    }

    #[test]
    fn test_long_record_rejected_with_line() {
        let err = parse("a,b\n1,2\n3,4,5\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error: Expected 2 fields in line 3, saw 3"
        );
    }

    #[test]
    fn test_blank_lines_skipped() {
        let dataset = parse("a,b\n1,2\n\n3,4\n").unwrap();
        assert_eq!(dataset.row_count(), 2);
    }

    #[test]
    fn test_crlf_blank_lines_skipped() {
        let dataset = parse("\u{feff}id,name\r\n1,a\r\n\r\n2,b\r\n").unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.row(1)[1], CellValue::Text("b".to_string()));
    }

    #[test]
    fn test_quoted_empty_record_is_a_row() {
        let dataset = parse("a\n1\n\"\"\n2\n").unwrap();
        assert_eq!(dataset.row_count(), 3);
        assert_eq!(dataset.row(1), vec![CellValue::Empty]);
        assert_eq!(
            dataset.column("a").unwrap().values,
            ColumnValue::Number(vec![Some(1.0), None, Some(2.0)])
        );
    }

    #[test]
    fn test_quoted_empty_record_padded_in_wide_file() {
        let dataset = parse("a,b\nx,y\n\"\"\nz,w\n").unwrap();
        assert_eq!(dataset.row_count(), 3);
        assert_eq!(dataset.row(1), vec![CellValue::Empty, CellValue::Empty]);
    }

    #[test]
    fn test_whitespace_record_is_a_row() {
        let dataset = parse("a\nx\n   \ny\n").unwrap();
        assert_eq!(dataset.row_count(), 3);
        assert_eq!(dataset.row(1), vec![CellValue::Text("   ".to_string())]);
    }

    #[test]
    fn test_quoted_fields_preserved() {
        let dataset = parse("q,a\n\"Hello, world\",\"She said \"\"hi\"\"\nbye\"\n").unwrap();
        assert_eq!(
            dataset.row(0),
            vec![
                CellValue::Text("Hello, world".to_string()),
                CellValue::Text("She said \"hi\"\nbye".to_string())
            ]
        );
    }

    #[test]
    fn test_mixed_column_stays_text() {
        let dataset = parse("v\n10\nten\n").unwrap();
        let column = dataset.column("v").unwrap();
        assert_eq!(
            column.values,
            ColumnValue::Text(vec![Some("10".to_string()), Some("ten".to_string())])
        );
    }

    #[test]
    fn test_leading_zero_stays_text() {
        let dataset = parse("code\n007\n123\n").unwrap();
        assert_eq!(dataset.column("code").unwrap().kind(), ColumnKind::Text);
    }

    #[test]
    fn test_decimal_and_exponent_numbers() {
        let dataset = parse("x\n0.5\n-1.25\n3e2\n.75\n").unwrap();
        assert_eq!(
            dataset.column("x").unwrap().values,
            ColumnValue::Number(vec![Some(0.5), Some(-1.25), Some(300.0), Some(0.75)])
        );
    }

    #[test]
    fn test_long_integer_stays_text() {
        let dataset = parse("phone\n1234567890123456\n").unwrap();
        assert_eq!(dataset.column("phone").unwrap().kind(), ColumnKind::Text);
    }

    #[test]
    fn test_boolean_column() {
        let dataset = parse("flag\nTrue\nfalse\n\n").unwrap();
        assert_eq!(
            dataset.column("flag").unwrap().values,
            ColumnValue::Boolean(vec![Some(true), Some(false)])
        );
    }

    #[test]
    fn test_empty_cells_in_numeric_column() {
        let dataset = parse("a,b\n1,\n,2\n").unwrap();
        assert_eq!(
            dataset.column("a").unwrap().values,
            ColumnValue::Number(vec![Some(1.0), None])
        );
        assert_eq!(
            dataset.column("b").unwrap().values,
            ColumnValue::Number(vec![None, Some(2.0)])
        );
    }

    #[test]
    fn test_all_empty_column_is_text() {
        let dataset = parse("a,b\n1,\n2,\n").unwrap();
        assert_eq!(
            dataset.column("b").unwrap().values,
            ColumnValue::Text(vec![None, None])
        );
    }

    #[test]
    fn test_na_markers_kept_as_text() {
        let dataset = parse("a\nNA\nnull\n").unwrap();
        assert_eq!(
            dataset.column("a").unwrap().values,
            ColumnValue::Text(vec![Some("NA".to_string()), Some("null".to_string())])
        );
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let bytes: &[u8] = b"a\n\xff\xfe\n";
        assert!(parse_reader(bytes).is_err());
    }

    #[test]
    fn test_number_pattern_rejects_padding() {
        let classifier = CellClassifier::new().unwrap();
        assert_eq!(classifier.parse_number(" 10"), None);
        assert_eq!(classifier.parse_number("1,000"), None);
        assert_eq!(classifier.parse_number("inf"), None);
        assert_eq!(classifier.parse_number("0"), Some(0.0));
        assert_eq!(classifier.parse_number("+5"), Some(5.0));
    }
}
