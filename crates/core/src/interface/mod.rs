//! Interface model builder
//!
//! Builds the minimal interface satisfied by a named type: its declared methods
//! plus those promoted from embedded fields, with every parameter and result
//! normalized and rewritten for emission.
//!
//! ## Example
//!
//! ```rust
//! use shapegen_core::interface::build_interface_for;
//! use shapegen_core::typeinfo::{Signature, TypeUniverse};
//!
//! let mut universe = TypeUniverse::new();
//! let error = universe.basic("error");
//! let file = universe.declare_named("os", "os", "File");
//! universe.add_method(file, "Close", Signature::new(vec![], vec![error]));
//!
//! let iface = build_interface_for(&universe, r#""os".File"#)?;
//! assert_eq!(iface.funcs()[0].to_string(), "Close() error");
//! # Ok::<(), shapegen_core::interface::InterfaceError>(())
//! ```

mod builder;
mod collector;
mod config;
mod error;
mod fixup;
mod normalize;
mod query;

pub use builder::{InterfaceBuilder, build_interface, build_interface_for};
pub use collector::{MethodTable, collect_methods};
pub use config::{InterfaceOptions, InterfaceOptionsBuilder, MAX_DEPTH};
pub use error::{InterfaceError, InterfaceResult, QueryError};
pub use fixup::{fixup, trim_vendor_path};
pub use normalize::Normalizer;
pub use query::Query;
