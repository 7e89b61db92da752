//! Numeric coercion of a single column.
//!
//! Coercion never mutates the source column: it returns the kept values
//! and an explicit list of what was discarded, and the caller decides
//! what a discard means through [`CoercionPolicy`].

use serde::{Deserialize, Serialize};

use crate::error::{ProcessError, ProcessResult};
use crate::table::{parse_number, Column, ColumnData};

/// What to do with a value that is not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionPolicy {
    /// Drop the row and keep going.
    #[default]
    Drop,
    /// Fail the whole batch on the first bad value.
    Strict,
}

impl std::str::FromStr for CoercionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown coercion policy '{}' (expected drop or strict)", other)),
        }
    }
}

/// A value that failed coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discarded {
    /// Zero-based data row index in the source table
    pub row: usize,
    /// Cell text as read (empty for a missing cell)
    pub raw: String,
}

/// Outcome of coercing a column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coerced {
    /// Numbers that survived, in row order
    pub values: Vec<f64>,
    /// Rows that did not
    pub discarded: Vec<Discarded>,
}

impl Coerced {
    pub fn is_clean(&self) -> bool {
        self.discarded.is_empty()
    }
}

/// Coerce every cell of `column` to a number.
pub fn coerce_numeric(column: &Column) -> Coerced {
    let mut out = Coerced::default();

    match &column.data {
        ColumnData::Numeric(values) => {
            for (row, value) in values.iter().enumerate() {
                match value {
                    Some(v) => out.values.push(*v),
                    None => out.discarded.push(Discarded { row, raw: String::new() }),
                }
            }
        }
        ColumnData::Text(cells) => {
            for (row, cell) in cells.iter().enumerate() {
                match parse_number(cell) {
                    Some(v) => out.values.push(v),
                    None => out.discarded.push(Discarded { row, raw: cell.clone() }),
                }
            }
        }
    }

    out
}

/// Coerce `column` and apply `policy` to the discards.
///
/// # Errors
/// [`ProcessError::Coercion`] for the first discarded row when `policy`
/// is [`CoercionPolicy::Strict`].
pub fn coerce_with_policy(column: &Column, policy: CoercionPolicy) -> ProcessResult<Coerced> {
    let coerced = coerce_numeric(column);

    if policy == CoercionPolicy::Strict {
        if let Some(first) = coerced.discarded.first() {
            return Err(ProcessError::Coercion {
                row: first.row,
                value: first.raw.clone(),
            });
        }
    }

    Ok(coerced)
}
