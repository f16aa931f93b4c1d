use super::*;

use crate::duckdb::DuckDbBackend;
use crate::error::UpgradeError;
use tm_core::CoreError;

fn hashes(backend: &DuckDbBackend) -> Vec<(String, String)> {
    let mut rows = backend
        .query_pairs("select ScriptName, ContentsHash from SchemaVersionHash")
        .unwrap();
    rows.sort();
    rows
}

#[test]
fn test_runs_scripts_once() {
    let backend = Arc::new(DuckDbBackend::in_memory().unwrap());

    let pipeline = UpgradeBuilder::new()
        .with_scripts([
            Script::new("test1", "create table Frog (Eyes int)"),
            Script::new("test2", "insert into Frog (Eyes) values (2)"),
        ])
        .build(backend.clone());

    let report = pipeline.perform().unwrap();
    assert_eq!(report.executed, vec!["test1", "test2"]);
    assert_eq!(report.skipped, 0);

    assert_eq!(
        backend.query_scalar("select Eyes from Frog").unwrap(),
        Some(2)
    );
    assert_eq!(hashes(&backend).len(), 2);
}

#[test]
fn test_rerun_is_a_no_op_when_nothing_changed() {
    let backend = Arc::new(DuckDbBackend::in_memory().unwrap());
    let scripts = [
        Script::new("test1", "create table Frog (Eyes int)"),
        Script::new("test2", "insert into Frog (Eyes) values (2)"),
    ];

    UpgradeBuilder::new()
        .with_scripts(scripts.clone())
        .build(backend.clone())
        .perform()
        .unwrap();

    let report = UpgradeBuilder::new()
        .with_scripts(scripts)
        .build(backend.clone())
        .perform()
        .unwrap();

    assert!(report.executed.is_empty());
    assert_eq!(report.skipped, 2);
    assert_eq!(
        backend.query_scalar("select count(*) from Frog").unwrap(),
        Some(1)
    );
}

#[test]
fn test_changed_script_reruns_and_replaces_hash() {
    let backend = Arc::new(DuckDbBackend::in_memory().unwrap());

    UpgradeBuilder::new()
        .with_scripts([
            Script::new("test1", "create table Frog (Eyes int)"),
            Script::new("test2", "insert into Frog (Eyes) values (2)"),
        ])
        .build(backend.clone())
        .perform()
        .unwrap();
    let before = hashes(&backend);

    let report = UpgradeBuilder::new()
        .with_scripts([
            Script::new("test1", "create table Frog (Eyes int)"),
            Script::new(
                "test2",
                "delete from Frog; insert into Frog (Eyes) values (3);",
            ),
        ])
        .build(backend.clone())
        .perform()
        .unwrap();

    // Only the changed script runs again
    assert_eq!(report.executed, vec!["test2"]);
    assert_eq!(report.skipped, 1);
    assert_eq!(
        backend.query_scalar("select Eyes from Frog").unwrap(),
        Some(3)
    );

    // Still one row per script; test1's hash unchanged, test2's replaced
    let after = hashes(&backend);
    assert_eq!(after.len(), 2);
    assert_eq!(before[0], after[0]);
    assert_eq!(before[1].0, after[1].0);
    assert_ne!(before[1].1, after[1].1);
}

#[test]
fn test_dependency_ordering_applies_before_execution() {
    let backend = Arc::new(DuckDbBackend::in_memory().unwrap());

    // Supplied out of order; the insert declares the create as a dependency
    let report = UpgradeBuilder::new()
        .with_scripts([
            Script::new(
                "insert_frog.sql",
                "-- #requires create_frog\ninsert into Frog (Eyes) values (2);",
            ),
            Script::new("create_frog.sql", "create table Frog (Eyes int)"),
        ])
        .order_by_dependency("#requires")
        .build(backend.clone())
        .perform()
        .unwrap();

    assert_eq!(report.executed, vec!["create_frog.sql", "insert_frog.sql"]);
}

#[test]
fn test_resolution_errors_abort_before_anything_executes() {
    let backend = Arc::new(DuckDbBackend::in_memory().unwrap());

    let result = UpgradeBuilder::new()
        .with_scripts([
            Script::new("a.sql", "-- #requires missing\ncreate table A (n int)"),
            Script::new("b.sql", "create table B (n int)"),
        ])
        .order_by_dependency("#requires")
        .build(backend.clone())
        .perform();

    assert!(matches!(
        result,
        Err(UpgradeError::Core(CoreError::DependencyNotFound { .. }))
    ));

    // Nothing ran and the journal was never consulted into existence
    assert_eq!(
        backend
            .query_scalar(
                "select count(*) from information_schema.tables where table_name in ('A', 'B', 'SchemaVersionHash')"
            )
            .unwrap(),
        Some(0)
    );
}

#[test]
fn test_storage_failure_preserves_prior_journal_entries() {
    let backend = Arc::new(DuckDbBackend::in_memory().unwrap());

    let result = UpgradeBuilder::new()
        .with_scripts([
            Script::new("good.sql", "create table G (n int)"),
            Script::new("bad.sql", "this is not sql"),
        ])
        .build(backend.clone())
        .perform();

    assert!(matches!(result, Err(UpgradeError::Db(_))));

    // The script that ran before the failure stays journaled, so a rerun
    // resumes from the failing script
    let rows = hashes(&backend);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, "good.sql");
}

#[test]
fn test_user_sort_composes_with_hashing() {
    let backend = Arc::new(DuckDbBackend::in_memory().unwrap());

    let report = UpgradeBuilder::new()
        .with_scripts([
            Script::new("b.sql", "create table B (n int)"),
            Script::new("a.sql", "create table A (n int)"),
        ])
        .with_sort(|mut scripts| {
            scripts.sort_by(|x, y| x.name.cmp(&y.name));
            scripts
        })
        .build(backend.clone())
        .perform()
        .unwrap();

    assert_eq!(report.executed, vec!["a.sql", "b.sql"]);
}

#[test]
fn test_custom_journal_location() {
    let backend = Arc::new(DuckDbBackend::in_memory().unwrap());
    backend.execute("create schema meta", &[]).unwrap();

    UpgradeBuilder::new()
        .with_scripts([Script::new("test1", "create table T (n int)")])
        .journal_config(
            JournalConfig::default()
                .with_schema("meta")
                .with_table("Applied"),
        )
        .build(backend.clone())
        .perform()
        .unwrap();

    let rows = backend
        .query_pairs("select ScriptName, ContentsHash from meta.Applied")
        .unwrap();
    assert_eq!(rows.len(), 1);
}
