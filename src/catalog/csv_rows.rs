//! Row-level reading of the catalog export files.
//!
//! The export is a headered CSV. Every row is zipped positionally against the
//! header row, values are trimmed, and short rows read missing columns as "".
//! Bytes that are not valid UTF-8 are decoded lossily; the row is kept.
//! Both the product and the category loaders go through [`RowReader`].

use std::collections::HashMap;
use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder, Trim};

use super::source::CatalogError;

/// Split a single CSV line into trimmed fields.
///
/// Commas inside double quotes do not split, and `""` inside a quoted field is
/// a literal quote. An empty line yields one empty field.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());

    match rdr.records().next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        _ => vec![String::new()],
    }
}

/// A data row keyed by header name.
#[derive(Debug, Clone)]
pub struct Row {
    /// Index of the row among the file's physical lines, header excluded (first data
    /// line is 1). Blank lines advance the count.
    pub number: u64,
    values: HashMap<String, String>,
}

impl Row {
    fn zip(number: u64, headers: &[String], record: &ByteRecord) -> Self {
        let values = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = record.get(idx).map(decode_field).unwrap_or_default();
                (header.clone(), value)
            })
            .collect();
        Self { number, values }
    }

    /// Value for `column`, or "" when the column or the value is absent.
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    /// Value for `column` when it is present and non-empty.
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        Some(self.get(column)).filter(|v| !v.is_empty())
    }
}

/// Trimmed field text. Bytes that are not UTF-8 (Latin-1 exports) become U+FFFD.
fn decode_field(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim().to_string()
}

/// Reader over a headered catalog file held in memory.
///
/// The whole file is buffered so row numbers can be taken from byte offsets;
/// the csv reader's own line counter does not see skipped blank lines.
pub struct RowReader {
    rdr: csv::Reader<Cursor<Vec<u8>>>,
    path: PathBuf,
    headers: Vec<String>,
    record: ByteRecord,
    /// Byte offset up to which newlines have been counted.
    scanned: usize,
    /// Newlines seen before `scanned`.
    line: u64,
    done: bool,
}

impl RowReader {
    /// Read `path` and consume its header row.
    ///
    /// A missing file is reported as [`CatalogError::SourceMissing`] so callers
    /// can tell "no catalog" apart from "broken catalog".
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let data = fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => CatalogError::SourceMissing {
                path: path.to_path_buf(),
            },
            _ => CatalogError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Self::from_bytes(data, path)
    }

    pub fn from_bytes(data: Vec<u8>, path: &Path) -> Result<Self, CatalogError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(Cursor::new(data));

        let headers = rdr
            .byte_headers()
            .map_err(|source| CatalogError::Csv {
                path: path.to_path_buf(),
                source,
            })?
            .iter()
            .enumerate()
            .map(|(idx, raw)| {
                let header = decode_field(raw);
                // Exports saved from spreadsheet tools often lead with a byte-order mark.
                match header.strip_prefix('\u{feff}') {
                    Some(rest) if idx == 0 => rest.trim().to_string(),
                    _ => header,
                }
            })
            .collect();

        Ok(Self {
            rdr,
            path: path.to_path_buf(),
            headers,
            record: ByteRecord::new(),
            scanned: 0,
            line: 0,
            done: false,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Line index of the record read last, counted from the file start.
    ///
    /// The record's position is where the previous record ended, so any blank
    /// lines csv skipped in between are stepped over first.
    fn record_line(&mut self) -> u64 {
        let data = self.rdr.get_ref().get_ref();
        let mut start = self
            .record
            .position()
            .map(|p| p.byte() as usize)
            .unwrap_or(self.scanned)
            .clamp(self.scanned, data.len());
        while start < data.len() && matches!(data[start], b'\r' | b'\n') {
            start += 1;
        }
        self.line += data[self.scanned..start]
            .iter()
            .filter(|&&b| b == b'\n')
            .count() as u64;
        self.scanned = start;
        self.line
    }

    fn is_blank(&self) -> bool {
        self.record
            .iter()
            .all(|field| field.iter().all(u8::is_ascii_whitespace))
    }
}

impl Iterator for RowReader {
    type Item = Result<Row, CatalogError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.rdr.read_byte_record(&mut self.record) {
                Ok(true) => {
                    let number = self.record_line();
                    // Whitespace-only lines carry no data.
                    if self.record.len() <= 1 && self.is_blank() {
                        continue;
                    }
                    return Some(Ok(Row::zip(number, &self.headers, &self.record)));
                }
                Ok(false) => self.done = true,
                Err(source) => {
                    self.done = true;
                    return Some(Err(CatalogError::Csv {
                        path: self.path.clone(),
                        source,
                    }));
                }
            }
        }
        None
    }
}

/// Parse the leading decimal number of `raw`, returning 0.0 when there is none.
///
/// "12.50 EUR" reads as 12.5 and "abc" as 0.0; non-finite results read as 0.0.
pub fn lenient_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Parse the leading signed integer of `raw`, returning 0 when there is none.
pub fn lenient_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return 0;
    }
    s[..end].parse::<i64>().unwrap_or(0)
}
