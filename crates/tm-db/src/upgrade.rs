//! Upgrade pipeline: order, filter, execute, journal.
//!
//! Ties the pieces together for one migration run. Resolution and codec
//! errors abort before anything executes; a storage failure aborts the run
//! mid-way, and scripts already journaled stay journaled, so the next run
//! resumes from the first unexecuted-or-changed script.

use std::sync::Arc;

use crate::dialect::{AnsiDialect, JournalDialect};
use crate::error::UpgradeResult;
use crate::journal::{HashingJournal, JournalConfig};
use crate::traits::{ScriptExecutor, SqlRunner};
use tm_core::{order_by_dependency, NameWithHash, Script, ScriptFilter, SortFn};

/// Configures a migration run.
#[derive(Default)]
pub struct UpgradeBuilder {
    scripts: Vec<Script>,
    dependency_prefix: Option<String>,
    sort: Option<Box<SortFn>>,
    config: JournalConfig,
    dialect: Option<Box<dyn JournalDialect>>,
}

impl UpgradeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add scripts to the batch. May be called repeatedly.
    pub fn with_scripts(mut self, scripts: impl IntoIterator<Item = Script>) -> Self {
        self.scripts.extend(scripts);
        self
    }

    /// Sort the batch by inline dependency comments before filtering.
    ///
    /// `comment_prefix` marks the dependency line inside a script's contents,
    /// for example `#requires`.
    pub fn order_by_dependency(mut self, comment_prefix: impl Into<String>) -> Self {
        self.dependency_prefix = Some(comment_prefix.into());
        self
    }

    /// Install a user-supplied sort/filter, run before the executed-set
    /// exclusion.
    pub fn with_sort(mut self, sort: impl Fn(Vec<Script>) -> Vec<Script> + 'static) -> Self {
        self.sort = Some(Box::new(sort));
        self
    }

    /// Override where the journal table lives.
    pub fn journal_config(mut self, config: JournalConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the journal SQL dialect. Defaults to [`AnsiDialect`].
    pub fn journal_dialect(mut self, dialect: Box<dyn JournalDialect>) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Build the pipeline over a backend that both runs journal SQL and
    /// executes script text (such as [`DuckDbBackend`](crate::DuckDbBackend)).
    pub fn build<B>(self, backend: Arc<B>) -> UpgradePipeline
    where
        B: SqlRunner + ScriptExecutor + 'static,
    {
        self.build_split(backend.clone(), backend)
    }

    /// Build the pipeline with separate journal storage and script executor
    /// collaborators.
    pub fn build_split(
        self,
        runner: Arc<dyn SqlRunner>,
        executor: Arc<dyn ScriptExecutor>,
    ) -> UpgradePipeline {
        let dialect = self.dialect.unwrap_or_else(|| Box::new(AnsiDialect::default()));
        let journal = HashingJournal::new(runner, dialect, self.config);

        let mut filter = ScriptFilter::hashed();
        if let Some(sort) = self.sort {
            filter = filter.with_sort(sort);
        }

        UpgradePipeline {
            scripts: self.scripts,
            dependency_prefix: self.dependency_prefix,
            filter,
            journal,
            executor,
        }
    }
}

/// A configured migration run.
pub struct UpgradePipeline {
    scripts: Vec<Script>,
    dependency_prefix: Option<String>,
    filter: ScriptFilter,
    journal: HashingJournal,
    executor: Arc<dyn ScriptExecutor>,
}

/// What a run did.
#[derive(Debug, Default)]
pub struct UpgradeReport {
    /// Plain names of the scripts executed this run, in execution order
    pub executed: Vec<String>,

    /// Scripts excluded because their identity was already journaled
    pub skipped: usize,
}

impl UpgradePipeline {
    /// Perform the run.
    ///
    /// Ordering happens first and fails eagerly: on any resolution error
    /// nothing executes. Each remaining script is executed and then
    /// journaled, one at a time, in order.
    pub fn perform(&self) -> UpgradeResult<UpgradeReport> {
        let batch = match &self.dependency_prefix {
            Some(prefix) => order_by_dependency(self.scripts.clone(), prefix)?,
            None => self.scripts.clone(),
        };
        let batch_len = batch.len();

        self.journal.ensure_schema()?;
        let executed = self.journal.executed_scripts()?;
        let to_run = self.filter.filter(batch, &executed);

        let mut report = UpgradeReport {
            executed: Vec::with_capacity(to_run.len()),
            skipped: batch_len - to_run.len(),
        };

        for script in &to_run {
            let identity = NameWithHash::from_script(script);
            log::info!("Executing {}", identity.plain_name);

            self.executor.execute_script(script)?;
            self.journal.store_executed_script(script)?;
            report.executed.push(identity.plain_name);
        }

        log::info!(
            "Upgrade complete: {} executed, {} already current",
            report.executed.len(),
            report.skipped
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "upgrade_test.rs"]
mod tests;
