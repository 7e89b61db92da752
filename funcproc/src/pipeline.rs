//! Input folder to output folder: validate, coerce, transform, persist.
//!
//! # Example
//!
//! ```rust,ignore
//! use funcproc::{process, ProcessOptions};
//! use std::path::Path;
//!
//! let report = process(Path::new("in"), Path::new("out"), &ProcessOptions::default())?;
//! println!("Wrote {} rows to {}", report.rows_written, report.output_file.display());
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::coerce::{coerce_with_policy, CoercionPolicy, Discarded};
use crate::error::{ProcessError, ProcessResult};
use crate::logs::{log_error, log_info, log_success, log_warning, log_warning_detail};
use crate::table::{load_table, save_table, Column, Table};
use crate::transform::apply_to_values;

/// File name read from the input folder and written to the output folder.
pub const DATA_FILE: &str = "data.csv";

/// Column holding the inputs.
pub const INPUT_COLUMN: &str = "x";

/// Column holding the results.
pub const OUTPUT_COLUMN: &str = "data";

/// Companion files copied next to the output by default.
pub const DEFAULT_COMPANIONS: [&str; 3] = ["lib.rs", "main.rs", "data.md"];

/// How many discarded rows are listed individually in the log.
const DISCARD_LOG_LIMIT: usize = 5;

/// Options for [`process`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessOptions {
    /// What to do with `x` values that are not numbers
    pub coercion: CoercionPolicy,

    /// Copy companion files into the output folder
    pub copy_companions: bool,

    /// Where companion files are looked up (default: the executable's folder)
    pub companion_dir: Option<PathBuf>,

    /// Companion file names
    pub companions: Vec<String>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            coercion: CoercionPolicy::Drop,
            copy_companions: true,
            companion_dir: None,
            companions: DEFAULT_COMPANIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ProcessOptions {
    /// Defaults overridden by the environment (and a `.env` file, if present).
    ///
    /// - `FUNCPROC_COERCION`: `drop` or `strict`
    /// - `FUNCPROC_COPY_COMPANIONS`: `0` or `false` disables the copy
    /// - `FUNCPROC_COMPANION_DIR`: folder holding companion files
    ///
    /// Unrecognised values are ignored with a warning.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let mut options = Self::default();

        if let Ok(value) = env::var("FUNCPROC_COERCION") {
            match value.parse() {
                Ok(policy) => options.coercion = policy,
                Err(e) => log_warning(format!("FUNCPROC_COERCION ignored: {}", e)),
            }
        }

        if let Ok(value) = env::var("FUNCPROC_COPY_COMPANIONS") {
            options.copy_companions = !matches!(value.trim().to_lowercase().as_str(), "0" | "false" | "no");
        }

        if let Ok(dir) = env::var("FUNCPROC_COMPANION_DIR") {
            options.companion_dir = Some(PathBuf::from(dir));
        }

        options
    }

    pub fn with_coercion(mut self, policy: CoercionPolicy) -> Self {
        self.coercion = policy;
        self
    }

    pub fn without_companions(mut self) -> Self {
        self.copy_companions = false;
        self
    }

    pub fn with_companion_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.companion_dir = Some(dir.into());
        self
    }
}

/// Result of a successful [`process`] run
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    /// Data rows in the input table
    pub rows_read: usize,
    /// Rows in the output table
    pub rows_written: usize,
    /// Input rows whose `x` was not a number
    pub discarded: Vec<Discarded>,
    /// Companion files copied into the output folder
    pub companions_copied: Vec<String>,
}

/// Transform `input_dir/data.csv` into `output_dir/data.csv`.
///
/// Nothing is written when the input is missing, lacks the `x` column, or
/// (under [`CoercionPolicy::Strict`]) holds a non-numeric `x`. The output
/// folder is created if needed and an existing output file is replaced.
/// Companion-file problems are logged and never fail the run.
///
/// # Errors
/// See [`ProcessError`].
pub fn process(input_dir: &Path, output_dir: &Path, options: &ProcessOptions) -> ProcessResult<ProcessReport> {
    if !input_dir.exists() {
        return Err(ProcessError::MissingInputFolder(input_dir.to_path_buf()));
    }

    let input_file = input_dir.join(DATA_FILE);
    if !input_file.exists() {
        return Err(ProcessError::MissingInputFile(input_file));
    }

    log_info(format!("📖 Reading input data from: {}", input_file.display()));
    let input = load_table(&input_file)?;
    log_success(format!("Read {} rows, columns: {}", input.row_count(), input.column_names().join(", ")));

    let x = input
        .column(INPUT_COLUMN)
        .ok_or_else(|| ProcessError::MissingColumn(INPUT_COLUMN.to_string()))?;

    let coerced = coerce_with_policy(x, options.coercion)?;
    if !coerced.is_clean() {
        log_warning(format!(
            "{} x value(s) could not be converted to numbers and were dropped",
            coerced.discarded.len()
        ));
        for d in coerced.discarded.iter().take(DISCARD_LOG_LIMIT) {
            log_warning_detail(format!("row {}: '{}'", d.row, d.raw));
        }
        if coerced.discarded.len() > DISCARD_LOG_LIMIT {
            log_warning_detail(format!("... +{}", coerced.discarded.len() - DISCARD_LOG_LIMIT));
        }
    }

    log_info("⚙️  Applying y = -5 * x + 1...");
    let output = Table::single(Column::numeric(OUTPUT_COLUMN, apply_to_values(&coerced.values)));

    fs::create_dir_all(output_dir)?;
    let output_file = output_dir.join(DATA_FILE);
    save_table(&output, &output_file)?;
    log_success(format!("Output data saved to: {}", output_file.display()));

    let companions_copied = if options.copy_companions {
        copy_companions(output_dir, options)
    } else {
        Vec::new()
    };

    Ok(ProcessReport {
        input_file,
        output_file,
        rows_read: input.row_count(),
        rows_written: output.row_count(),
        discarded: coerced.discarded,
        companions_copied,
    })
}

/// Boolean facade over [`process`] with default options.
///
/// Any failure is logged with its cause and reported as `false`.
pub fn process_data(input_dir: &Path, output_dir: &Path) -> bool {
    run_logged(input_dir, output_dir, &ProcessOptions::default())
}

/// Run [`process`], logging the outcome, and report success.
pub fn run_logged(input_dir: &Path, output_dir: &Path, options: &ProcessOptions) -> bool {
    match process(input_dir, output_dir, options) {
        Ok(_) => true,
        Err(e) => {
            log_error(format!("Error during processing: {}", e));
            false
        }
    }
}

/// Folder companion files are taken from.
fn companion_source(options: &ProcessOptions) -> Option<PathBuf> {
    if let Some(ref dir) = options.companion_dir {
        return Some(dir.clone());
    }
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Copy companion files that exist into `output_dir`; returns the names copied.
fn copy_companions(output_dir: &Path, options: &ProcessOptions) -> Vec<String> {
    let Some(source_dir) = companion_source(options) else {
        log_warning("Cannot locate the companion file folder, nothing copied");
        return Vec::new();
    };

    let mut copied = Vec::new();
    for name in &options.companions {
        let src = source_dir.join(name);
        if !src.is_file() {
            log_warning(format!("{} not found in {}", name, source_dir.display()));
            continue;
        }

        match fs::copy(&src, output_dir.join(name)) {
            Ok(_) => {
                log_info(format!("Copied {} to output folder", name));
                copied.push(name.clone());
            }
            Err(e) => log_warning(format!("Error copying {}: {}", name, e)),
        }
    }

    copied
}
