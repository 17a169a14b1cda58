//==============================================================================
// Tabular Dataset Types
//==============================================================================

/// A single cell as read from the source and written to the workbook
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Boolean(bool),
    Text(String),
}

/// Inferred column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Number,
    Boolean,
    Text,
}

/// Column value types (homogeneous arrays, `None` marks an empty cell)
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// Array of numbers (f64)
    Number(Vec<Option<f64>>),
    /// Array of booleans
    Boolean(Vec<Option<bool>>),
    /// Array of text strings, preserved verbatim
    Text(Vec<Option<String>>),
}

impl ColumnValue {
    /// Get the length of the array
    pub fn len(&self) -> usize {
        match self {
            ColumnValue::Number(v) => v.len(),
            ColumnValue::Boolean(v) => v.len(),
            ColumnValue::Text(v) => v.len(),
        }
    }

    /// Check if array is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnValue::Number(_) => ColumnKind::Number,
            ColumnValue::Boolean(_) => ColumnKind::Boolean,
            ColumnValue::Text(_) => ColumnKind::Text,
        }
    }

    /// Cell at `index`, `Empty` when missing or out of range
    pub fn cell(&self, index: usize) -> CellValue {
        match self {
            ColumnValue::Number(v) => match v.get(index) {
                Some(Some(n)) => CellValue::Number(*n),
                _ => CellValue::Empty,
            },
            ColumnValue::Boolean(v) => match v.get(index) {
                Some(Some(b)) => CellValue::Boolean(*b),
                _ => CellValue::Empty,
            },
            ColumnValue::Text(v) => match v.get(index) {
                Some(Some(s)) => CellValue::Text(s.clone()),
                _ => CellValue::Empty,
            },
        }
    }
}

/// A named column of the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValue,
}

impl Column {
    pub fn new(name: String, values: ColumnValue) -> Self {
        Self { name, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn kind(&self) -> ColumnKind {
        self.values.kind()
    }
}

/// Ordered rows of uniform columns, held column-wise.
///
/// Column order is the header order of the source file and row order is the
/// record order; both carry through to the workbook unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<Column>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Get the number of rows (length of first column, all should be same)
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |col| col.len())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Cells of row `index` in column order
    pub fn row(&self, index: usize) -> Vec<CellValue> {
        self.columns.iter().map(|c| c.values.cell(index)).collect()
    }

    /// Validate all columns have the same length
    pub fn validate_lengths(&self) -> Result<(), String> {
        let row_count = self.row_count();
        for column in &self.columns {
            if column.len() != row_count {
                return Err(format!(
                    "Column '{}' has {} rows, expected {} rows",
                    column.name,
                    column.len(),
                    row_count
                ));
            }
        }
        Ok(())
    }
}
