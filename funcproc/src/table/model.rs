//! In-memory table with named, typed columns.
//!
//! Column types are resolved once, when raw cells are turned into a
//! [`Column`]: a column whose every non-missing cell parses as a number is
//! [`ColumnData::Numeric`], anything else stays [`ColumnData::Text`].

use crate::error::{TableError, TableResult};

/// Cell spellings treated as a missing value.
const MISSING_TOKENS: [&str; 7] = ["", "NaN", "nan", "NA", "N/A", "null", "NULL"];

/// Whether a raw cell denotes a missing value.
pub fn is_missing(raw: &str) -> bool {
    MISSING_TOKENS.contains(&raw.trim())
}

/// Parse a raw cell as a number.
///
/// Surrounding whitespace is ignored. Missing tokens and anything `f64`
/// cannot parse give `None`; a parsed NaN is also `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if is_missing(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Text form of a number as it is written to disk.
///
/// Shortest representation that parses back to the same `f64`
/// (`-4`, `2.5`, `-inf`).
pub fn format_number(value: f64) -> String {
    value.to_string()
}

/// Resolved type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Numeric,
    Text,
}

/// Column values, tagged by type.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Numbers, `None` for missing cells.
    Numeric(Vec<Option<f64>>),
    /// Raw strings, as read.
    Text(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::Numeric(_) => ColumnType::Numeric,
            Self::Text(_) => ColumnType::Text,
        }
    }

    /// Cell as written to a CSV file (missing numbers are empty).
    pub fn csv_cell(&self, row: usize) -> String {
        match self {
            Self::Numeric(values) => values
                .get(row)
                .copied()
                .flatten()
                .map(format_number)
                .unwrap_or_default(),
            Self::Text(values) => values.get(row).cloned().unwrap_or_default(),
        }
    }

    /// Cell as shown in a report (missing numbers are `NaN`).
    pub fn display_cell(&self, row: usize) -> String {
        match self {
            Self::Numeric(values) => match values.get(row).copied().flatten() {
                Some(v) => format_number(v),
                None => "NaN".to_string(),
            },
            Self::Text(values) => values.get(row).cloned().unwrap_or_default(),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    /// Numeric column without missing values.
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values.into_iter().map(Some).collect()),
        }
    }

    /// Text column, kept as-is.
    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }

    /// Build a column from raw cells, resolving its type.
    pub fn from_raw(name: impl Into<String>, cells: Vec<String>) -> Self {
        let all_numeric = cells
            .iter()
            .all(|cell| is_missing(cell) || parse_number(cell).is_some());

        let data = if all_numeric {
            ColumnData::Numeric(cells.iter().map(|cell| parse_number(cell)).collect())
        } else {
            ColumnData::Text(cells)
        };

        Self {
            name: name.into(),
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }

    /// Non-missing numeric values, in row order. Empty for text columns.
    pub fn numeric_values(&self) -> Vec<f64> {
        match &self.data {
            ColumnData::Numeric(values) => values.iter().flatten().copied().collect(),
            ColumnData::Text(_) => Vec::new(),
        }
    }
}

/// Ordered collection of equally long columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Build a table, checking that every column has the same length.
    pub fn new(columns: Vec<Column>) -> TableResult<Self> {
        let rows = columns.first().map(Column::len).unwrap_or(0);

        if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
            return Err(TableError::RaggedColumns {
                column: bad.name.clone(),
                expected: rows,
                found: bad.len(),
            });
        }

        Ok(Self { columns, rows })
    }

    /// Table holding a single column.
    pub fn single(column: Column) -> Self {
        Self {
            rows: column.len(),
            columns: vec![column],
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// First column with the given name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("3"), Some(3.0));
        assert_eq!(parse_number(" -2.5 "), Some(-2.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1), "0.1");
    }

    #[test]
    fn test_numeric_column_resolution() {
        let col = Column::from_raw("x", raw(&["1", "", "3.5"]));
        assert_eq!(col.column_type(), ColumnType::Numeric);
        assert_eq!(col.data, ColumnData::Numeric(vec![Some(1.0), None, Some(3.5)]));
        assert_eq!(col.numeric_values(), vec![1.0, 3.5]);
    }

    #[test]
    fn test_text_column_resolution() {
        let col = Column::from_raw("x", raw(&["1", "two", "3"]));
        assert_eq!(col.column_type(), ColumnType::Text);
        assert!(col.numeric_values().is_empty());
    }

    #[test]
    fn test_cells() {
        let data = ColumnData::Numeric(vec![Some(-4.0), None]);
        assert_eq!(data.csv_cell(0), "-4");
        assert_eq!(data.csv_cell(1), "");
        assert_eq!(data.display_cell(1), "NaN");
    }

    #[test]
    fn test_table_rejects_ragged_columns() {
        let result = Table::new(vec![
            Column::numeric("a", vec![1.0, 2.0]),
            Column::numeric("b", vec![1.0]),
        ]);
        assert!(matches!(result, Err(TableError::RaggedColumns { found: 1, .. })));
    }

    #[test]
    fn test_table_lookup() {
        let table = Table::new(vec![
            Column::numeric("x", vec![1.0, 2.0]),
            Column::text("label", raw(&["a", "b"])),
        ])
        .unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_names(), vec!["x", "label"]);
        assert!(table.column("x").is_some());
        assert!(table.column("y").is_none());
    }
}
