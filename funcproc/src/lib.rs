//! # funcproc - apply `y = -5 * x + 1` to a CSV column
//!
//! Reads the `x` column of `<input>/data.csv`, applies the transform and
//! writes a single `data` column to `<output>/data.csv`. Inspection helpers
//! reload a written table, render it and summarize its numeric columns.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  data.csv   │────▶│   Table     │────▶│  Coerce +   │────▶│  data.csv   │
//! │  (column x) │     │  (typed)    │     │  Transform  │     │ (col. data) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use funcproc::{process, ProcessOptions};
//! use std::path::Path;
//!
//! let report = process(Path::new("in"), Path::new("out"), &ProcessOptions::default())?;
//! println!("{} rows written, {} dropped", report.rows_written, report.discarded.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per layer
//! - [`logs`] - Console log sink with subscribers
//! - [`table`] - Typed table model and CSV adapter
//! - [`coerce`] - Numeric coercion with an explicit discard list
//! - [`transform`] - The affine transform
//! - [`pipeline`] - Input folder to output folder orchestration
//! - [`inspect`] - Table report and summary statistics

// Core modules
pub mod error;
pub mod logs;

// Data
pub mod table;
pub mod coerce;
pub mod transform;

// Orchestration
pub mod pipeline;

// Inspection
pub mod inspect;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ProcessError, ProcessResult, TableError, TableResult};

// =============================================================================
// Re-exports - Tables
// =============================================================================

pub use table::{load_table, parse_table, save_table, Column, ColumnData, ColumnType, Table};

// =============================================================================
// Re-exports - Coercion & Transform
// =============================================================================

pub use coerce::{coerce_numeric, coerce_with_policy, Coerced, CoercionPolicy, Discarded};
pub use transform::{apply_function, apply_to_values};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{
    process,
    process_data,
    run_logged,
    ProcessOptions,
    ProcessReport,
    DATA_FILE,
    INPUT_COLUMN,
    OUTPUT_COLUMN,
};

// =============================================================================
// Re-exports - Inspection
// =============================================================================

pub use inspect::{
    display_data,
    get_data_summary,
    load_and_display,
    print_summary,
    read_output_csv,
    render_summary,
    render_table,
    ColumnStats,
    Summary,
};
