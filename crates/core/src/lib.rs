//! Shapegen Core - type and struct models for Go code generators
//!
//! Provides:
//! - A Go type-information boundary with an in-memory arena implementation
//! - Interface building from a named type's method set
//! - Struct inference from tabular samples
//! - The value model (`Type`, `Func`, `Interface`, `Field`, `Struct`) handed to
//!   renderers

pub mod inference;
pub mod interface;
pub mod models;
pub mod typeinfo;

pub use inference::{
    FormatRegistry, InferenceConfig, InferenceError, Sample, SampleFormat, StructInferrer,
    infer_struct,
};
pub use interface::{
    InterfaceBuilder, InterfaceError, InterfaceOptions, Query, QueryError, build_interface,
    build_interface_for,
};
pub use models::{Field, Func, Interface, Struct, Tag, Tags, Type};
pub use typeinfo::{TypeCatalog, TypeInfoProvider, TypeKind, TypeRef, TypeUniverse};
