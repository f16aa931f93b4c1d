use super::*;

#[test]
fn test_script_new() {
    let script = Script::new("001_init.sql", "create table t (id int)");
    assert_eq!(script.name, "001_init.sql");
    assert_eq!(script.contents, "create table t (id int)");
}

#[test]
fn test_try_new_rejects_empty_name() {
    let result = Script::try_new("", "contents");
    assert!(matches!(result, Err(CoreError::EmptyName { .. })));
}

#[test]
fn test_with_prefix_filters_and_strips() {
    let scripts = vec![
        Script::new("x.a", "contents of x.a"),
        Script::new("x.b", "contents of x.b"),
        Script::new("y.a", "contents of y.a"),
    ];

    let filtered = with_prefix(&scripts, &["x."]);

    let names: Vec<&str> = filtered.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(filtered[0].contents, "contents of x.a");
}

#[test]
fn test_with_prefix_is_case_insensitive() {
    let scripts = vec![Script::new("Pre.setup", "s")];
    let filtered = with_prefix(&scripts, &["pre."]);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "setup");
}

#[test]
fn test_with_prefix_first_matching_prefix_wins() {
    let scripts = vec![Script::new("ab.script", "s")];
    let filtered = with_prefix(&scripts, &["ab.", "a"]);
    assert_eq!(filtered[0].name, "script");
}

#[test]
fn test_with_prefix_drops_non_matching() {
    let scripts = vec![Script::new("other", "s")];
    assert!(with_prefix(&scripts, &["x."]).is_empty());
}
