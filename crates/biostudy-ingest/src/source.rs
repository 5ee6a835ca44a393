//! Reading raw records from a knowledge-base source.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use serde_json::Value;

use crate::error::{Result, SourceError};

/// One source row keyed by its (trimmed) column name.
pub type RawRecord = BTreeMap<String, String>;

/// Where a knowledge base is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDescriptor {
    /// CSV file with a single header row.
    Csv(PathBuf),
    /// JSON file holding an array of objects.
    Json(PathBuf),
    /// Records supplied directly by the caller.
    Inline(Vec<RawRecord>),
}

impl SourceDescriptor {
    /// Picks the format from the file extension (`.json`, otherwise CSV).
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::Json(path)
        } else {
            Self::Csv(path)
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Csv(path) | Self::Json(path) => Some(path),
            Self::Inline(_) => None,
        }
    }

    /// Human-readable label used in logs and corpus origins.
    pub fn describe(&self) -> String {
        match self {
            Self::Csv(path) | Self::Json(path) => path.display().to_string(),
            Self::Inline(records) => format!("inline ({} records)", records.len()),
        }
    }
}

/// Binary workbook formats people tend to point the loader at.
const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Reads the raw bytes behind a file source.
pub(crate) fn read_source_bytes(path: &Path) -> Result<Vec<u8>> {
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str())
        && SPREADSHEET_EXTENSIONS
            .iter()
            .any(|known| extension.eq_ignore_ascii_case(known))
    {
        return Err(SourceError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: extension.to_lowercase(),
        });
    }
    std::fs::read(path).map_err(|e| SourceError::io(path, e))
}

/// Raw bytes behind a file source; `None` for inline records.
pub(crate) fn read_source(descriptor: &SourceDescriptor) -> Result<Option<Vec<u8>>> {
    match descriptor {
        SourceDescriptor::Csv(path) | SourceDescriptor::Json(path) => {
            read_source_bytes(path).map(Some)
        }
        SourceDescriptor::Inline(_) => Ok(None),
    }
}

/// Decodes records from bytes returned by [`read_source`]. Inline sources ignore `bytes`.
pub(crate) fn decode_records(
    descriptor: &SourceDescriptor,
    bytes: &[u8],
) -> Result<Vec<RawRecord>> {
    match descriptor {
        SourceDescriptor::Csv(path) => parse_csv(path, bytes),
        SourceDescriptor::Json(path) => parse_json(path, bytes),
        SourceDescriptor::Inline(records) => Ok(records.clone()),
    }
}

/// Reads all records from a source.
pub fn read_records(descriptor: &SourceDescriptor) -> Result<Vec<RawRecord>> {
    let bytes = read_source(descriptor)?;
    decode_records(descriptor, bytes.as_deref().unwrap_or_default())
}

/// Parses CSV bytes into records.
///
/// Handles a UTF-8 BOM on the first header and trims header names. Ragged
/// rows are tolerated; missing trailing cells are simply absent.
fn parse_csv(path: &Path, bytes: &[u8]) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| SourceError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| SourceError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut row = RawRecord::new();
        for (idx, value) in record.iter().enumerate() {
            let Some(key) = headers.get(idx) else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            row.insert(key.clone(), value.trim().to_string());
        }
        records.push(row);
    }
    Ok(records)
}

/// Parses a JSON array of objects into records.
fn parse_json(path: &Path, bytes: &[u8]) -> Result<Vec<RawRecord>> {
    let json_error = |message: String| SourceError::Json {
        path: path.to_path_buf(),
        message,
    };

    let value: Value = serde_json::from_slice(bytes).map_err(|e| json_error(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(json_error("expected an array of objects".to_string()));
    };

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let Value::Object(fields) = item else {
            return Err(json_error(format!("element {idx} is not an object")));
        };
        let row = fields
            .into_iter()
            .map(|(key, value)| (key.trim().to_string(), json_cell(value)))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        records.push(row);
    }
    Ok(records)
}

/// Flattens a JSON value into cell text. Arrays become newline-joined lines.
fn json_cell(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.trim().to_string(),
        Value::Array(items) => items
            .into_iter()
            .map(json_cell)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}
