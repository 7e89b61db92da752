//! Error types for the funcproc pipeline.
//!
//! Two layers, each with its own enum:
//!
//! - [`TableError`] - loading and saving delimited tables
//! - [`ProcessError`] - top-level orchestration (validation, coercion, I/O)
//!
//! `From` conversions let `?` carry a [`TableError`] up into a
//! [`ProcessError`].

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Table I/O Errors
// =============================================================================

/// Errors while reading or writing a table file.
#[derive(Debug, Error)]
pub enum TableError {
    /// The file does not exist.
    #[error("File {0} does not exist")]
    NotFound(PathBuf),

    /// Failed to read or write the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Content could not be decoded to text.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// Malformed delimited content, or a failed record write.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// Header row has no usable column names.
    #[error("No headers found in CSV")]
    NoHeaders,

    /// Columns of a table disagree on their length.
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        found: usize,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::pipeline::process`].
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Input folder is absent.
    #[error("Input folder '{0}' does not exist")]
    MissingInputFolder(PathBuf),

    /// Input folder exists but holds no data file.
    #[error("Input file {0} does not exist")]
    MissingInputFile(PathBuf),

    /// Required column is absent from the input table.
    #[error("Input CSV must have '{0}' column")]
    MissingColumn(String),

    /// A value failed numeric coercion under the strict policy.
    #[error("Row {row}: value '{value}' could not be converted to a number")]
    Coercion { row: usize, value: String },

    /// Table load or save failed.
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Filesystem error outside table I/O (creating the output folder).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Result type for pipeline operations.
pub type ProcessResult<T> = Result<T, ProcessError>;
