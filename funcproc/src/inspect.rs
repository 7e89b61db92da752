//! Reload a written table, render it, and summarize its numeric columns.
//!
//! The `render_*` functions build the report text; `display_data`,
//! `load_and_display` and `print_summary` print it.

use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::logs::{log_error, log_success};
use crate::table::{load_table, Column, ColumnType, Table};

/// Descriptive statistics of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    /// Rows in the column, missing cells included
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Statistics of `values`. NaN where undefined (empty input, or std of
    /// a single value).
    pub fn compute(values: &[f64]) -> Self {
        let mut acc = RunningStats::default();
        for &v in values {
            acc.update(v);
        }
        acc.finish()
    }

    /// Statistics of a column: `count` is its row count, the rest are
    /// computed over the non-missing values.
    pub fn for_column(column: &Column) -> Self {
        Self {
            count: column.len(),
            ..Self::compute(&column.numeric_values())
        }
    }

    /// `(name, value)` pairs in report order.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("max", self.max),
        ]
    }
}

/// Single-pass mean/variance (Welford) with running min and max.
#[derive(Debug, Clone, Copy)]
struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl Default for RunningStats {
    fn default() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl RunningStats {
    fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn finish(self) -> ColumnStats {
        if self.count == 0 {
            return ColumnStats {
                count: 0,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
            };
        }

        let std = if self.count > 1 {
            (self.m2 / (self.count - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        ColumnStats {
            count: self.count,
            mean: self.mean,
            std,
            min: self.min,
            max: self.max,
        }
    }
}

/// Statistics of a named column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub stats: ColumnStats,
}

/// Per-column statistics, in table column order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Summary {
    pub columns: Vec<ColumnSummary>,
}

impl Summary {
    /// Statistics for every numeric column of `table`.
    pub fn of(table: &Table) -> Self {
        let columns = table
            .columns()
            .iter()
            .filter(|c| c.column_type() == ColumnType::Numeric)
            .map(|c| ColumnSummary {
                column: c.name.clone(),
                stats: ColumnStats::for_column(c),
            })
            .collect();

        Self { columns }
    }

    pub fn get(&self, column: &str) -> Option<&ColumnStats> {
        self.columns.iter().find(|c| c.column == column).map(|c| &c.stats)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Load a table, logging the outcome. `None` on any failure.
pub fn read_output_csv(path: &Path) -> Option<Table> {
    match load_table(path) {
        Ok(table) => {
            log_success(format!("Successfully loaded data from: {}", path.display()));
            Some(table)
        }
        Err(e) => {
            log_error(format!("Error reading CSV file: {}", e));
            None
        }
    }
}

/// Fixed-width report of a table: shape, column names and every row.
pub fn render_table(table: &Table) -> String {
    let columns = table.columns();

    let cells: Vec<Vec<String>> = columns
        .iter()
        .map(|c| (0..table.row_count()).map(|row| c.data.display_cell(row)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .zip(&cells)
        .map(|(c, col_cells)| {
            col_cells
                .iter()
                .map(|s| s.chars().count())
                .chain(std::iter::once(c.name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "=== Data Display ===");
    let _ = writeln!(out, "Shape: {} rows, {} columns", table.row_count(), table.column_count());
    let _ = writeln!(out, "Columns: [{}]", table.column_names().join(", "));
    let _ = writeln!(out);
    let _ = writeln!(out, "Data:");

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, &w)| format!("{:>w$}", c.name, w = w))
        .collect();
    let _ = writeln!(out, "{}", header.join("  "));

    for row in 0..table.row_count() {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(col_cells, &w)| format!("{:>w$}", col_cells[row], w = w))
            .collect();
        let _ = writeln!(out, "{}", line.join("  "));
    }

    let _ = writeln!(out, "===================");
    out
}

/// Report for an optional table.
pub fn display_data(table: Option<&Table>) -> String {
    match table {
        Some(t) => render_table(t),
        None => "No data to display.\n".to_string(),
    }
}

/// Load a table and print its report.
pub fn load_and_display(path: &Path) -> Option<Table> {
    let table = read_output_csv(path);
    println!("{}", display_data(table.as_ref()));
    table
}

/// Summary of an optional table; `None` in, `None` out.
pub fn get_data_summary(table: Option<&Table>) -> Option<Summary> {
    table.map(Summary::of)
}

/// Report with every statistic to four decimal places.
pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Data Summary ===");
    for col in &summary.columns {
        let _ = writeln!(out);
        let _ = writeln!(out, "Column: {}", col.column);
        for (name, value) in col.stats.entries() {
            let _ = writeln!(out, "  {}: {:.4}", name, value);
        }
    }
    let _ = writeln!(out, "====================");
    out
}

/// Print the report for an optional summary.
pub fn print_summary(summary: Option<&Summary>) {
    match summary {
        Some(s) => println!("{}", render_summary(s)),
        None => println!("No summary available."),
    }
}
