use super::*;

#[test]
fn test_execute_with_params() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute("create table t (name varchar, v varchar)", &[])
        .unwrap();

    let affected = db
        .execute(
            "insert into t values (?, ?)",
            &[SqlParam::text("name", "a"), SqlParam::text("v", "1")],
        )
        .unwrap();
    assert_eq!(affected, 1);

    let affected = db
        .execute(
            "delete from t where name = ?",
            &[SqlParam::text("name", "a")],
        )
        .unwrap();
    assert_eq!(affected, 1);
}

#[test]
fn test_query_scalar_returns_none_without_rows() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute("create table t (n int)", &[]).unwrap();

    assert_eq!(db.query_scalar("select n from t").unwrap(), None);
    db.execute("insert into t values (7)", &[]).unwrap();
    assert_eq!(db.query_scalar("select n from t").unwrap(), Some(7));
}

#[test]
fn test_query_pairs() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute("create table t (a varchar, b varchar)", &[])
        .unwrap();
    db.execute("insert into t values ('x', '1'), ('y', '2')", &[])
        .unwrap();

    let mut pairs = db.query_pairs("select a, b from t").unwrap();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("x".to_string(), "1".to_string()),
            ("y".to_string(), "2".to_string())
        ]
    );
}

#[test]
fn test_execute_script_runs_batches() {
    let db = DuckDbBackend::in_memory().unwrap();
    let script = Script::new(
        "setup.sql",
        "create table t1 (id int); create table t2 (id int); insert into t1 values (1);",
    );

    db.execute_script(&script).unwrap();

    assert_eq!(db.query_scalar("select id from t1").unwrap(), Some(1));
}

#[test]
fn test_execute_error_carries_context() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.execute("select * from missing", &[]).unwrap_err();
    assert!(matches!(err, DbError::ExecutionError(_)));
}

#[test]
fn test_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tidemark.duckdb");

    let db = DuckDbBackend::new(path.to_str().unwrap()).unwrap();
    db.execute("create table t (n int)", &[]).unwrap();
    drop(db);

    let reopened = DuckDbBackend::from_path(&path).unwrap();
    assert_eq!(
        reopened
            .query_scalar("select count(*) from t")
            .unwrap(),
        Some(0)
    );
}
