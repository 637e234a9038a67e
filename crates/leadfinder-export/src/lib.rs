//! CSV export of matched business records.
//!
//! The output format deliberately matches what downstream consumers of this
//! tool already ingest: every data field is double-quote-wrapped, and
//! internal quotes are escaped with a backslash (`\"`), not doubled. That is
//! not RFC-4180, and it stays that way on purpose.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use leadfinder_stream::BusinessRecord;

const FALLBACK_FILE_NAME: &str = "business_leads.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Serialize records to CSV text.
///
/// The header row is taken from the first record's keys; every record is
/// rendered against those same columns, with missing or null values as
/// empty fields. Returns an empty string when there are no records.
#[must_use]
pub fn records_to_csv(records: &[BusinessRecord]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(headers.join(","));
    for record in records {
        let fields: Vec<String> = headers
            .iter()
            .map(|header| quote_field(record.get(*header)))
            .collect();
        rows.push(fields.join(","));
    }
    rows.join("\n")
}

fn quote_field(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    format!("\"{}\"", text.replace('"', "\\\""))
}

/// Derive a CSV filename from a free-text label: first word, alphanumerics
/// only, `_leads.csv` suffix. Falls back to a constant name when nothing
/// usable remains.
#[must_use]
pub fn csv_file_label(label: &str) -> String {
    let first_word: String = label
        .split_whitespace()
        .next()
        .unwrap_or("")
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    if first_word.is_empty() {
        FALLBACK_FILE_NAME.to_owned()
    } else {
        format!("{first_word}_leads.csv")
    }
}

/// Serialize `records` and write them to `path`.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be written.
pub fn write_csv(path: &Path, records: &[BusinessRecord]) -> Result<(), ExportError> {
    std::fs::write(path, records_to_csv(records)).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}
