//! Journal SQL construction per target dialect.
//!
//! [`JournalDialect`] builds the five statements the journal needs over the
//! configured schema and table. The default method bodies produce portable
//! ANSI SQL with `?` placeholders; a dialect for a store with different
//! catalog views or placeholder syntax overrides the relevant methods.

use crate::journal::JournalConfig;
use crate::traits::IdentifierQuoter;

/// ANSI identifier quoting: double quotes, embedded quotes doubled.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiQuoter;

impl IdentifierQuoter for AnsiQuoter {
    fn quote(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }
}

/// Builds the journal's SQL statements for a target dialect.
pub trait JournalDialect: Send + Sync {
    /// The quoting strategy for schema/table identifiers.
    fn quoter(&self) -> &dyn IdentifierQuoter;

    /// Fully-qualified, quoted journal table name.
    fn qualified_table(&self, config: &JournalConfig) -> String {
        let quoted_table = self.quoter().quote(&config.table);
        match &config.schema {
            Some(schema) => format!("{}.{}", self.quoter().quote(schema), quoted_table),
            None => quoted_table,
        }
    }

    /// Create the journal table. Only ever executed when the probe says the
    /// table does not exist; never alters an existing table.
    fn create_table_sql(&self, config: &JournalConfig) -> String {
        format!(
            "create table {} (\n    \"ScriptName\" varchar(255) not null,\n    \"ContentsHash\" varchar(255) not null,\n    \"Applied\" timestamp not null\n)",
            self.qualified_table(config)
        )
    }

    /// Catalog-metadata probe: yields a row exactly when the table exists.
    fn table_exists_sql(&self, config: &JournalConfig) -> String {
        let mut sql = format!(
            "select 1 from information_schema.tables where table_name = '{}'",
            escape_literal(&config.table)
        );
        if let Some(schema) = &config.schema {
            sql.push_str(&format!(
                " and table_schema = '{}'",
                escape_literal(schema)
            ));
        }
        sql
    }

    /// Select `(ScriptName, ContentsHash)` for every journal row.
    fn select_entries_sql(&self, config: &JournalConfig) -> String {
        format!(
            "select \"ScriptName\", \"ContentsHash\" from {}",
            self.qualified_table(config)
        )
    }

    /// Insert one row; placeholders bind `(scriptName, contentsHash, applied)`.
    fn insert_entry_sql(&self, config: &JournalConfig) -> String {
        format!(
            "insert into {} (\"ScriptName\", \"ContentsHash\", \"Applied\") values (?, ?, ?)",
            self.qualified_table(config)
        )
    }

    /// Delete the row for a plain script name; placeholder binds `scriptName`.
    fn delete_entry_sql(&self, config: &JournalConfig) -> String {
        format!(
            "delete from {} where \"ScriptName\" = ?",
            self.qualified_table(config)
        )
    }
}

/// The default dialect: ANSI SQL over an `information_schema` catalog.
///
/// DuckDB is served by the defaults unchanged.
#[derive(Debug, Default)]
pub struct AnsiDialect {
    quoter: AnsiQuoter,
}

impl JournalDialect for AnsiDialect {
    fn quoter(&self) -> &dyn IdentifierQuoter {
        &self.quoter
    }
}

fn escape_literal(s: &str) -> String {
    s.replace('\'', "''")
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
