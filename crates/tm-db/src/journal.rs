//! Hashing journal: persisted record of executed scripts.
//!
//! Each row stores a script's plain name, a hash of the contents it ran
//! with, and when it ran. Storing is a replacement: the row for a plain name
//! is deleted and re-inserted, so at most one row per script exists at any
//! time. A script is due for re-execution precisely when its freshly
//! computed hash differs from the stored one, which unifies "run once" and
//! "run on change" without separate script categories.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

use crate::dialect::JournalDialect;
use crate::error::DbResult;
use crate::traits::{SqlParam, SqlRunner};
use tm_core::{NameWithHash, Script};

/// Default journal table name.
pub const DEFAULT_TABLE: &str = "SchemaVersionHash";

/// Where the journal table lives.
///
/// `schema: None` means the store's default schema; SQL Server deployments
/// typically pass `dbo`.
#[derive(Debug, Clone)]
pub struct JournalConfig {
    pub schema: Option<String>,
    pub table: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            schema: None,
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl JournalConfig {
    /// Override the schema name.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Override the table name.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }
}

/// One persisted journal row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    pub script_name: String,
    pub contents_hash: String,
    pub applied: DateTime<Utc>,
}

/// Journal that keys executed scripts by name and content hash.
///
/// The journal exclusively owns the persisted table; no other component
/// mutates it.
pub struct HashingJournal {
    runner: Arc<dyn SqlRunner>,
    dialect: Box<dyn JournalDialect>,
    config: JournalConfig,
}

impl HashingJournal {
    pub fn new(
        runner: Arc<dyn SqlRunner>,
        dialect: Box<dyn JournalDialect>,
        config: JournalConfig,
    ) -> Self {
        Self {
            runner,
            dialect,
            config,
        }
    }

    /// Whether the journal table exists, per the catalog-metadata probe.
    pub fn table_exists(&self) -> DbResult<bool> {
        let sql = self.dialect.table_exists_sql(&self.config);
        Ok(self.runner.query_scalar(&sql)?.is_some())
    }

    /// Create the journal table if it does not already exist.
    ///
    /// Idempotent; never alters an existing table.
    pub fn ensure_schema(&self) -> DbResult<()> {
        if self.table_exists()? {
            return Ok(());
        }

        log::info!(
            "Creating journal table {}",
            self.dialect.qualified_table(&self.config)
        );
        self.runner
            .execute(&self.dialect.create_table_sql(&self.config), &[])?;
        Ok(())
    }

    /// One encoded `name#hash` identifier per persisted row.
    ///
    /// Returns the empty set when the table does not exist; reading never
    /// creates it.
    pub fn executed_scripts(&self) -> DbResult<HashSet<String>> {
        if !self.table_exists()? {
            log::info!("Journal table does not exist");
            return Ok(HashSet::new());
        }

        log::info!("Fetching list of already executed scripts");
        let rows = self
            .runner
            .query_pairs(&self.dialect.select_entries_sql(&self.config))?;
        Ok(rows
            .into_iter()
            .map(|(name, hash)| NameWithHash::new(name, hash).to_string())
            .collect())
    }

    /// Record a successful execution, replacing any prior row for the
    /// script's plain name.
    ///
    /// Delete and insert run as two statements at the storage boundary;
    /// concurrent runs against the same target must be serialized externally.
    pub fn store_executed_script(&self, script: &Script) -> DbResult<JournalEntry> {
        let identity = NameWithHash::from_script(script);
        let applied = Utc::now();

        self.runner.execute(
            &self.dialect.delete_entry_sql(&self.config),
            &[SqlParam::text("scriptName", identity.plain_name.as_str())],
        )?;

        self.runner.execute(
            &self.dialect.insert_entry_sql(&self.config),
            &[
                SqlParam::text("scriptName", identity.plain_name.as_str()),
                SqlParam::text("contentsHash", identity.contents_hash.as_str()),
                SqlParam::text("applied", format_timestamp(&applied)),
            ],
        )?;

        log::debug!("Journaled {} as {}", identity.plain_name, identity);
        Ok(JournalEntry {
            script_name: identity.plain_name,
            contents_hash: identity.contents_hash,
            applied,
        })
    }
}

/// Render a UTC timestamp for binding into the `Applied` column.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

#[cfg(test)]
#[path = "journal_test.rs"]
mod tests;
