//! Tables: the typed in-memory model and its delimited-text adapter.
//!
//! - `model`: [`Table`], [`Column`], [`ColumnData`] and cell parsing
//! - `io`: encoding/delimiter detection, [`load_table`], [`save_table`]

pub mod io;
pub mod model;

pub use io::{
    decode_content, detect_delimiter, detect_encoding, load_table, parse_str, parse_table,
    save_table, write_table,
};
pub use model::{format_number, is_missing, parse_number, Column, ColumnData, ColumnType, Table};
