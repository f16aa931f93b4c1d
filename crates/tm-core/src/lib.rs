//! tm-core - Core library for Tidemark
//!
//! This crate provides the pure, synchronous heart of the migration engine:
//! script value types, the `name#hash` execution-identity codec, the inline
//! dependency resolver, and the pre-execution filter pipeline. It performs no
//! I/O; persistence lives in `tm-db`.

pub mod checksum;
pub mod error;
pub mod filter;
pub mod name_hash;
mod newtype_string;
pub mod resolver;
pub mod script;

pub use checksum::compute_checksum;
pub use error::{CoreError, CoreResult};
pub use filter::{hash_names, ScriptFilter, SortFn};
pub use name_hash::NameWithHash;
pub use resolver::order_by_dependency;
pub use script::{with_prefix, Script, ScriptName};
