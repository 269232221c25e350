//! Kinds of sample values and their Go types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Type;

/// The kind a sample value was sniffed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleValueKind {
    String,
    Bool,
    Int64,
    Float64,
    Timestamp,
}

impl SampleValueKind {
    /// Go spelling of the type, as it appears in generated source
    pub fn go_name(&self) -> &'static str {
        match self {
            SampleValueKind::String => "string",
            SampleValueKind::Bool => "bool",
            SampleValueKind::Int64 => "int64",
            SampleValueKind::Float64 => "float64",
            SampleValueKind::Timestamp => "time.Time",
        }
    }

    /// The field type emitted for this kind
    pub fn to_type(&self) -> Type {
        match self {
            SampleValueKind::Timestamp => Type::named("Time", "time", "time"),
            other => Type::builtin(other.go_name()),
        }
    }

    /// Recover the kind from a field type produced by [`SampleValueKind::to_type`]
    pub fn from_type(typ: &Type) -> Option<Self> {
        if typ.is_pointer || typ.is_composite {
            return None;
        }
        match (typ.name.as_str(), typ.import_path.as_str()) {
            ("string", "") => Some(SampleValueKind::String),
            ("bool", "") => Some(SampleValueKind::Bool),
            ("int64", "") => Some(SampleValueKind::Int64),
            ("float64", "") => Some(SampleValueKind::Float64),
            ("Time", "time") | ("time.Time", "time") => Some(SampleValueKind::Timestamp),
            _ => None,
        }
    }

    /// Combine the kinds of two samples from the same column
    pub fn merge(self, other: SampleValueKind) -> SampleValueKind {
        match (self, other) {
            (a, b) if a == b => a,
            (SampleValueKind::Int64, SampleValueKind::Float64)
            | (SampleValueKind::Float64, SampleValueKind::Int64) => SampleValueKind::Float64,
            _ => SampleValueKind::String,
        }
    }
}

impl fmt::Display for SampleValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.go_name())
    }
}
