//! Sample formats and the registry that dispatches on their names

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{InferenceError, InferenceResult};

/// Format used when neither a name nor a file extension is given
pub const DEFAULT_FORMAT: &str = "csv";

/// A header row plus the data records that follow it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub header: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<Vec<String>>,
}

impl Sample {
    /// The first data record
    pub fn first_record(&self) -> InferenceResult<&[String]> {
        self.records
            .first()
            .map(Vec::as_slice)
            .ok_or(InferenceError::MissingRecord)
    }
}

/// Parser for one sample format
pub trait SampleFormat: Send + Sync {
    /// Read a header and at least one record
    fn parse(&self, reader: &mut dyn Read) -> InferenceResult<Sample>;

    /// Imports needed by the marshal code generated for this format
    fn deps(&self) -> &[&'static str];
}

/// Delimiter-separated values with RFC 4180 quoting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvFormat {
    delimiter: char,
}

impl CsvFormat {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn comma() -> Self {
        Self::new(',')
    }

    pub fn tab() -> Self {
        Self::new('\t')
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Split `input` into records. Empty lines are skipped; quoted fields may
    /// span lines and escape quotes by doubling them.
    pub fn read_records(&self, input: &str) -> InferenceResult<Vec<Vec<String>>> {
        let mut records = Vec::new();
        let mut record = Vec::new();
        let mut field = String::new();
        let mut line = 1;
        // Line on which the current record started, for error reporting
        let mut record_line = 1;
        let mut in_quotes = false;
        let mut quoted = false;
        let mut field_start = true;
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if in_quotes {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    '"' => in_quotes = false,
                    '\n' => {
                        line += 1;
                        field.push(c);
                    }
                    _ => field.push(c),
                }
                continue;
            }
            match c {
                '"' if field_start => {
                    in_quotes = true;
                    quoted = true;
                    field_start = false;
                }
                '"' if !quoted => {
                    return Err(InferenceError::Csv {
                        line,
                        message: "bare \" in non-quoted field".into(),
                    });
                }
                c if c == self.delimiter => {
                    record.push(std::mem::take(&mut field));
                    quoted = false;
                    field_start = true;
                }
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' => {
                    finish_record(&mut records, &mut record, &mut field, quoted);
                    line += 1;
                    record_line = line;
                    quoted = false;
                    field_start = true;
                }
                _ if quoted => {
                    return Err(InferenceError::Csv {
                        line,
                        message: "extraneous or missing \" in quoted-field".into(),
                    });
                }
                _ => {
                    field.push(c);
                    field_start = false;
                }
            }
        }
        if in_quotes {
            return Err(InferenceError::Csv {
                line: record_line,
                message: "extraneous or missing \" in quoted-field".into(),
            });
        }
        finish_record(&mut records, &mut record, &mut field, quoted);
        Ok(records)
    }
}

fn finish_record(
    records: &mut Vec<Vec<String>>,
    record: &mut Vec<String>,
    field: &mut String,
    quoted: bool,
) {
    if record.is_empty() && field.is_empty() && !quoted {
        return;
    }
    record.push(std::mem::take(field));
    records.push(std::mem::take(record));
}

impl SampleFormat for CsvFormat {
    fn parse(&self, reader: &mut dyn Read) -> InferenceResult<Sample> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        let mut records = self.read_records(&input)?.into_iter();
        let header = records.next().ok_or(InferenceError::EmptyHeader)?;
        let records: Vec<Vec<String>> = records.collect();
        if records.is_empty() {
            return Err(InferenceError::MissingRecord);
        }
        debug!(
            columns = header.len(),
            records = records.len(),
            "Parsed delimited sample"
        );
        Ok(Sample { header, records })
    }

    fn deps(&self) -> &[&'static str] {
        &["fmt", "strconv"]
    }
}

/// Table of sample formats keyed by name.
///
/// Built once by the caller and passed to whatever needs to parse samples.
#[derive(Clone, Default)]
pub struct FormatRegistry {
    formats: BTreeMap<String, Arc<dyn SampleFormat>>,
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.formats.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FormatRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with `csv`, `txt` and `tsv`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("csv", CsvFormat::comma());
        registry.register("txt", CsvFormat::comma());
        registry.register("tsv", CsvFormat::tab());
        registry
    }

    /// Register a format, replacing any previous one with the same name
    pub fn register(&mut self, name: impl Into<String>, format: impl SampleFormat + 'static) {
        self.formats.insert(name.into(), Arc::new(format));
    }

    /// Registered format names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.formats.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> InferenceResult<&dyn SampleFormat> {
        self.formats
            .get(name)
            .map(|format| format.as_ref())
            .ok_or_else(|| InferenceError::UnsupportedFormat(name.to_string()))
    }

    /// Pick the format name for an input: the explicit name when non-empty,
    /// otherwise the file extension, otherwise `csv`.
    pub fn resolve_name(explicit: Option<&str>, path: Option<&Path>) -> String {
        if let Some(name) = explicit.filter(|name| !name.is_empty()) {
            return name.to_string();
        }
        path.and_then(|p| p.extension())
            .and_then(|ext| ext.to_str())
            .unwrap_or(DEFAULT_FORMAT)
            .to_string()
    }

    /// Parse `reader` with the named format
    pub fn parse(&self, name: &str, reader: &mut dyn Read) -> InferenceResult<Sample> {
        self.get(name)?.parse(reader)
    }
}
