//! Struct inference from tabular samples

use tracing::{debug, warn};

use crate::models::{Field, Struct};

use super::config::InferenceConfig;
use super::error::{InferenceError, InferenceResult};
use super::formats::Sample;
use super::layout::TimeLayout;
use super::naming::to_field_name;
use super::types::SampleValueKind;

/// Literals accepted as booleans, matching Go's `strconv.ParseBool`
const BOOL_LITERALS: &[&str] = &[
    "1", "t", "T", "TRUE", "true", "True", "0", "f", "F", "FALSE", "false", "False",
];

/// Infers a Go struct from a header row and sample records.
///
/// Fields keep header order, which generated marshal code relies on to pair
/// record positions with fields.
#[derive(Debug, Clone)]
pub struct StructInferrer {
    config: InferenceConfig,
    layout: TimeLayout,
}

impl Default for StructInferrer {
    fn default() -> Self {
        Self::new()
    }
}

impl StructInferrer {
    /// Create an inferrer with the default configuration
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    /// Create an inferrer with a custom configuration
    pub fn with_config(config: InferenceConfig) -> Self {
        let layout = TimeLayout::new(&config.time_format);
        Self { config, layout }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Classify a single value. The first of bool, int64, float64 and
    /// timestamp that parses wins; empty values are strings.
    pub fn sniff(&self, value: &str) -> SampleValueKind {
        if value.is_empty() {
            SampleValueKind::String
        } else if BOOL_LITERALS.contains(&value) {
            SampleValueKind::Bool
        } else if value.parse::<i64>().is_ok() {
            SampleValueKind::Int64
        } else if value.parse::<f64>().is_ok() {
            SampleValueKind::Float64
        } else if self.layout.matches(value) {
            SampleValueKind::Timestamp
        } else {
            SampleValueKind::String
        }
    }

    /// Infer a struct from a header and one representative record.
    ///
    /// Columns without a value in the record are typed as strings.
    pub fn infer<H, R>(&self, header: &[H], record: &[R]) -> InferenceResult<Struct>
    where
        H: AsRef<str>,
        R: AsRef<str>,
    {
        check_lengths(header, record.len())?;
        let fields = header
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let kind = record
                    .get(i)
                    .map(|value| self.sniff(value.as_ref()))
                    .unwrap_or(SampleValueKind::String);
                field(cell.as_ref(), kind)
            })
            .collect();
        Ok(Struct::new(fields))
    }

    /// Infer a struct from a header and every record of a sample, merging the
    /// kinds seen in each column.
    pub fn infer_all<H, R>(&self, header: &[H], records: &[Vec<R>]) -> InferenceResult<Struct>
    where
        H: AsRef<str>,
        R: AsRef<str>,
    {
        if header.is_empty() {
            return Err(InferenceError::EmptyHeader);
        }
        let mut kinds: Vec<Option<SampleValueKind>> = vec![None; header.len()];
        for record in records {
            check_lengths(header, record.len())?;
            for (slot, value) in kinds.iter_mut().zip(record) {
                let value = value.as_ref();
                if value.is_empty() {
                    continue;
                }
                let kind = self.sniff(value);
                *slot = Some(slot.map_or(kind, |seen| seen.merge(kind)));
            }
        }
        let fields = header
            .iter()
            .zip(kinds)
            .map(|(cell, kind)| field(cell.as_ref(), kind.unwrap_or(SampleValueKind::String)))
            .collect();
        Ok(Struct::new(fields))
    }

    /// Infer a struct from a parsed sample, using its first record
    pub fn infer_sample(&self, sample: &Sample) -> InferenceResult<Struct> {
        self.infer(&sample.header, sample.first_record()?)
    }

    /// Infer a struct from a parsed sample, merging all of its records
    pub fn infer_sample_all(&self, sample: &Sample) -> InferenceResult<Struct> {
        self.infer_all(&sample.header, &sample.records)
    }
}

fn check_lengths<H: AsRef<str>>(header: &[H], record_len: usize) -> InferenceResult<()> {
    if header.is_empty() {
        return Err(InferenceError::EmptyHeader);
    }
    if record_len > header.len() {
        return Err(InferenceError::InvalidRecordLength {
            header: header.len(),
            record: record_len,
        });
    }
    if record_len < header.len() {
        warn!(
            header = header.len(),
            record = record_len,
            "Sample record is shorter than the header; missing columns default to string"
        );
    }
    Ok(())
}

fn field(cell: &str, kind: SampleValueKind) -> Field {
    let name = to_field_name(cell);
    debug!(column = %cell, field = %name, kind = %kind, "Inferred column type");
    Field::new(name, kind.to_type())
}

/// Infer a struct from a header and one record with the default configuration
pub fn infer_struct<H, R>(header: &[H], record: &[R]) -> InferenceResult<Struct>
where
    H: AsRef<str>,
    R: AsRef<str>,
{
    StructInferrer::new().infer(header, record)
}
