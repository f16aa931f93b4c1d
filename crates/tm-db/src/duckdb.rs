//! DuckDB backend implementation.
//!
//! The reference backend: implements [`SqlRunner`] for journal storage and
//! [`ScriptExecutor`] for running script text. Also used throughout the
//! integration tests.

use duckdb::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::error::{DbError, DbResult};
use crate::traits::{ScriptExecutor, SqlParam, SqlRunner, SqlValue};
use tm_core::Script;

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from a path string (handles the `:memory:` special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }
}

impl SqlRunner for DuckDbBackend {
    fn execute(&self, sql: &str, params: &[SqlParam]) -> DbResult<usize> {
        let conn = self.lock()?;
        conn.execute(
            sql,
            duckdb::params_from_iter(params.iter().map(|p| match &p.value {
                SqlValue::Text(s) => s.as_str(),
            })),
        )
        .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
    }

    fn query_scalar(&self, sql: &str) -> DbResult<Option<i64>> {
        let conn = self.lock()?;
        match conn.query_row(sql, [], |row| row.get::<_, i64>(0)) {
            Ok(value) => Ok(Some(value)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DbError::QueryError(e.to_string())),
        }
    }

    fn query_pairs(&self, sql: &str) -> DbResult<Vec<(String, String)>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        let mut pairs = Vec::new();
        for row in rows {
            pairs.push(row.map_err(|e| DbError::QueryError(e.to_string()))?);
        }
        Ok(pairs)
    }
}

impl ScriptExecutor for DuckDbBackend {
    fn execute_script(&self, script: &Script) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(&script.contents)
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, script.name)))
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
