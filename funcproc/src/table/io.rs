//! Delimited-text adapter for [`Table`].
//!
//! Loading auto-detects the encoding and the delimiter, then hands the
//! decoded text to the `csv` reader. Saving always writes comma-separated
//! UTF-8 with a header row and no index column.

use std::io::Write;
use std::path::Path;

use crate::error::{TableError, TableResult};

use super::model::{Column, Table};

/// Delimiters considered by [`detect_delimiter`], in priority order on ties.
const DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> TableResult<String> {
    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(e) => return Err(TableError::Encoding(e.to_string())),
        },
        // WHATWG maps the latin1 labels to windows-1252, which agrees with
        // ISO-8859-1 outside 0x80..=0x9F
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        // Unknown charset: best effort
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };

    Ok(text)
}

/// Detect the delimiter by counting occurrences in the header line.
///
/// Falls back to `,` when the header holds none of the candidates
/// (a single-column file).
pub fn detect_delimiter(content: &str) -> u8 {
    let first_line = content.lines().next().unwrap_or("");

    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &DELIMITERS {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep as u8
}

/// Parse decoded text with an explicit delimiter.
pub fn parse_str(content: &str, delimiter: u8) -> TableResult<Table> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if content.trim().is_empty() {
        return Err(TableError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        // Header names are taken verbatim
        .trim(csv::Trim::Fields)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(TableError::NoHeaders);
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        // Short rows are padded, extra fields ignored
        for (i, column) in cells.iter_mut().enumerate() {
            column.push(record.get(i).unwrap_or("").to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| Column::from_raw(name, raw))
        .collect();

    Table::new(columns)
}

/// Parse raw bytes with auto-detection of encoding and delimiter.
pub fn parse_table(bytes: &[u8]) -> TableResult<Table> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);
    parse_str(&content, delimiter)
}

/// Load a table file.
///
/// # Errors
/// [`TableError::NotFound`] when `path` does not exist; any read, decode
/// or parse failure otherwise.
pub fn load_table<P: AsRef<Path>>(path: P) -> TableResult<Table> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(TableError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    parse_table(&bytes)
}

/// Write a table as comma-separated text with a header row.
pub fn write_table<W: Write>(table: &Table, writer: W) -> TableResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(table.column_names())?;
    for row in 0..table.row_count() {
        let record: Vec<String> = table.columns().iter().map(|c| c.data.csv_cell(row)).collect();
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Save a table to `path`, replacing any existing file.
pub fn save_table<P: AsRef<Path>>(table: &Table, path: P) -> TableResult<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_table(table, std::io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::model::{ColumnData, ColumnType};
    use tempfile::tempdir;

    #[test]
    fn test_simple_csv() {
        let table = parse_table(b"x,label\n1,a\n3,b\n").unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_names(), vec!["x", "label"]);
        assert_eq!(table.column("x").unwrap().numeric_values(), vec![1.0, 3.0]);
        assert_eq!(table.column("label").unwrap().column_type(), ColumnType::Text);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let table = parse_table(b"a;b\n1;2\n").unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_quoted_values() {
        let table = parse_table(b"x,note\n\"5\",\"hello, world\"\n").unwrap();
        assert_eq!(table.column("x").unwrap().numeric_values(), vec![5.0]);
        assert_eq!(
            table.column("note").unwrap().data,
            ColumnData::Text(vec!["hello, world".to_string()])
        );
    }

    #[test]
    fn test_empty_lines_skipped() {
        let table = parse_table(b"x\n1\n\n3\n").unwrap();
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_missing_values_padded() {
        let table = parse_table(b"a,b,c\n1,,3\n4\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column("b").unwrap().data,
            ColumnData::Numeric(vec![None, None])
        );
        assert_eq!(
            table.column("c").unwrap().data,
            ColumnData::Numeric(vec![Some(3.0), None])
        );
    }

    #[test]
    fn test_header_only() {
        let table = parse_table(b"x\n").unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_names(), vec!["x"]);
    }

    #[test]
    fn test_empty_csv_error() {
        assert!(matches!(parse_table(b""), Err(TableError::EmptyFile)));
        assert!(matches!(parse_table(b"  \n"), Err(TableError::EmptyFile)));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), b',');
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), b';');
        assert_eq!(detect_delimiter("a\tb\tc"), b'\t');
        assert_eq!(detect_delimiter("a|b|c"), b'|');
        assert_eq!(detect_delimiter("x\n1"), b',');
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_latin1_currency_sign() {
        let decoded = decode_content(&[0x78, 0x0A, 0xA4], "iso-8859-1").unwrap();
        assert_eq!(decoded, "x\n¤");
    }

    #[test]
    fn test_header_names_not_trimmed() {
        let table = parse_table(b" x ,y\n 1 ,2\n").unwrap();
        assert_eq!(table.column_names(), vec![" x ", "y"]);
        assert!(table.column("x").is_none());
        assert_eq!(table.column(" x ").unwrap().numeric_values(), vec![1.0]);
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let result = decode_content(&[0xFF, 0xFE, 0x00], "utf-8");
        assert!(matches!(result, Err(TableError::Encoding(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_table(dir.path().join("nope.csv"));
        assert!(matches!(result, Err(TableError::NotFound(_))));
    }

    #[test]
    fn test_write_format() {
        let table = Table::single(Column::numeric("data", vec![-4.0, 2.5]));
        let mut out = Vec::new();
        write_table(&table, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "data\n-4\n2.5\n");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let values = vec![-4.0, -14.0, 0.1, -3319.0, 1e-7];

        save_table(&Table::single(Column::numeric("data", values.clone())), &path).unwrap();
        let loaded = load_table(&path).unwrap();

        assert_eq!(loaded.column_names(), vec!["data"]);
        assert_eq!(loaded.column("data").unwrap().numeric_values(), values);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "old,content\n1,2\n3,4\n").unwrap();

        save_table(&Table::single(Column::numeric("data", vec![1.0])), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "data\n1\n");
    }
}
