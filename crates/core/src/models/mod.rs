//! Immutable value objects produced by the builders and read by renderers

pub mod func;
pub mod structs;
pub mod types;

pub use func::{Func, Interface};
pub use structs::{Field, Struct, Tag, Tags};
pub use types::Type;
