use super::*;

#[test]
fn test_combines_parts() {
    assert_eq!(NameWithHash::new("name", "hash").to_string(), "name#hash");
}

#[test]
fn test_splits_parts() {
    let parsed = NameWithHash::try_parse("name#hash").unwrap();
    assert_eq!(parsed.plain_name, "name");
    assert_eq!(parsed.contents_hash, "hash");
}

#[test]
fn test_splits_at_first_separator() {
    let parsed = NameWithHash::try_parse("name#ha#sh").unwrap();
    assert_eq!(parsed.plain_name, "name");
    assert_eq!(parsed.contents_hash, "ha#sh");
}

#[test]
fn test_rejects_non_hashed() {
    assert!(NameWithHash::try_parse("random").is_none());
    assert!(matches!(
        NameWithHash::parse("random"),
        Err(CoreError::MalformedIdentifier { .. })
    ));
}

#[test]
fn test_round_trips() {
    for (name, hash) in [("a", "b"), ("001_users.sql", "deadbeef"), ("n", "")] {
        let combined = NameWithHash::new(name, hash).to_string();
        let parsed = NameWithHash::try_parse(&combined).unwrap();
        assert_eq!(parsed.plain_name, name);
        assert_eq!(parsed.contents_hash, hash);
    }
}

#[test]
fn test_adds_hash() {
    let hashed = NameWithHash::from_script(&Script::new("name", "contents"));

    assert_eq!(hashed.plain_name, "name");
    assert_eq!(hashed.contents_hash, NameWithHash::generate_hash("contents"));
}

#[test]
fn test_corrects_existing_hash() {
    let hashed = NameWithHash::from_script(&Script::new("name#blah", "contents"));

    assert_eq!(hashed.plain_name, "name");
    assert_eq!(hashed.contents_hash, NameWithHash::generate_hash("contents"));
}

#[test]
fn test_generate_hash_is_deterministic() {
    let hash1 = NameWithHash::generate_hash("select 1");
    let hash2 = NameWithHash::generate_hash("select 1");
    let hash3 = NameWithHash::generate_hash("select 2");

    assert_eq!(hash1, hash2);
    assert_ne!(hash1, hash3);
    assert_eq!(hash1.len(), 64); // SHA256 produces 64 hex chars
}
