//! Storage collaborator traits.
//!
//! The core is synchronous and CPU-bound; every blocking operation lives
//! behind these traits. Implementations either return a result or fail with a
//! [`DbError`](crate::error::DbError) — the core does no buffering, batching,
//! or retrying around them. Concurrent runs against one target are not
//! supported; callers must serialize runs externally.

use crate::error::DbResult;
use tm_core::Script;

/// A query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Text value, including timestamps rendered as text at this boundary
    Text(String),
}

/// A named query parameter.
///
/// Parameters are supplied as an explicit ordered slice matching the
/// statement's placeholders in order; the name travels alongside for backends
/// whose drivers support named placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlParam {
    pub name: &'static str,
    pub value: SqlValue,
}

impl SqlParam {
    /// Create a text parameter.
    pub fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: SqlValue::Text(value.into()),
        }
    }
}

/// Managed command/query execution against the target store.
pub trait SqlRunner: Send + Sync {
    /// Execute a statement, returning the number of affected rows.
    fn execute(&self, sql: &str, params: &[SqlParam]) -> DbResult<usize>;

    /// Execute a scalar query, returning `None` when it yields no row.
    ///
    /// Used for catalog-metadata probes such as the journal's
    /// table-existence check.
    fn query_scalar(&self, sql: &str) -> DbResult<Option<i64>>;

    /// Execute a query returning two text columns per row.
    fn query_pairs(&self, sql: &str) -> DbResult<Vec<(String, String)>>;
}

/// Executes raw script text against the target store.
pub trait ScriptExecutor: Send + Sync {
    fn execute_script(&self, script: &Script) -> DbResult<()>;
}

/// Dialect-specific identifier quoting strategy.
pub trait IdentifierQuoter: Send + Sync {
    /// Quote a single schema or table identifier for the target dialect.
    fn quote(&self, identifier: &str) -> String;
}
