//! Schema inference engine for tabular samples
//!
//! Derives a Go struct from a header row and sample records: each header cell
//! becomes an exported field name and each column is typed by sniffing its
//! values.
//!
//! ## Features
//!
//! - **Type sniffing** - bool, int64, float64 and timestamps, tried in that order
//! - **Configurable timestamps** - layouts written in Go reference-time form
//! - **Column merging** - combine the kinds seen across many records
//! - **Format registry** - pluggable sample parsers (`csv`, `txt`, `tsv` built in)
//!
//! ## Example
//!
//! ```rust
//! use shapegen_core::inference::{FormatRegistry, StructInferrer};
//!
//! let registry = FormatRegistry::with_defaults();
//! let sample = registry.parse("csv", &mut "user_id,score\n7,9.5\n".as_bytes())?;
//!
//! let fields = StructInferrer::new().infer_sample(&sample)?;
//! let types: Vec<String> = fields.iter().map(|f| f.ty.to_string()).collect();
//! assert_eq!(types, ["int64", "float64"]);
//! assert_eq!(fields.fields()[0].name, "UserID");
//! # Ok::<(), shapegen_core::inference::InferenceError>(())
//! ```

mod config;
mod error;
mod formats;
mod inferrer;
mod layout;
mod naming;
mod types;

pub use config::{DEFAULT_TIME_FORMAT, InferenceConfig, InferenceConfigBuilder};
pub use error::{InferenceError, InferenceResult};
pub use formats::{CsvFormat, DEFAULT_FORMAT, FormatRegistry, Sample, SampleFormat};
pub use inferrer::{StructInferrer, infer_struct};
pub use layout::TimeLayout;
pub use naming::{camelcase, to_field_name};
pub use types::SampleValueKind;
