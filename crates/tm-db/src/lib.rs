//! tm-db - Persistence layer for Tidemark
//!
//! This crate provides the storage collaborator traits consumed by the core
//! (`SqlRunner`, `ScriptExecutor`, `IdentifierQuoter`), the hashing journal
//! that records executed scripts by name and content hash, and a DuckDB
//! implementation used as the reference backend and in tests.

pub mod dialect;
pub mod duckdb;
pub mod error;
pub mod journal;
pub mod traits;
pub mod upgrade;

pub use dialect::{AnsiDialect, AnsiQuoter, JournalDialect};
pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult, UpgradeError, UpgradeResult};
pub use journal::{HashingJournal, JournalConfig, JournalEntry};
pub use traits::{IdentifierQuoter, ScriptExecutor, SqlParam, SqlRunner, SqlValue};
pub use upgrade::{UpgradeBuilder, UpgradePipeline, UpgradeReport};
