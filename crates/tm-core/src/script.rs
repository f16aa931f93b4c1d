//! Script value types.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// Strongly-typed wrapper for script names.
    ///
    /// Prevents accidental mixing of script names with table names, hashes,
    /// or other string types. The name may already carry a `#hash` suffix;
    /// see [`NameWithHash`](crate::name_hash::NameWithHash).
    pub struct ScriptName;
}

/// A named unit of migration content.
///
/// Immutable once constructed: identity for ordering and dependency purposes
/// is the name, change detection is driven by a hash of the contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Script name, typically a file name such as `001_create_users.sql`
    pub name: ScriptName,

    /// Raw script text as supplied by the caller
    pub contents: String,
}

impl Script {
    /// Create a new script, panicking if the name is empty.
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: ScriptName::new(name),
            contents: contents.into(),
        }
    }

    /// Try to create a new script, failing if the name is empty.
    pub fn try_new(name: impl Into<String>, contents: impl Into<String>) -> CoreResult<Self> {
        let name = ScriptName::try_new(name).ok_or_else(|| CoreError::EmptyName {
            context: "script name".into(),
        })?;
        Ok(Self {
            name,
            contents: contents.into(),
        })
    }
}

/// Keep only scripts whose name starts with one of `prefixes`, stripping the
/// matched prefix from the returned script's name.
///
/// Matching is case-insensitive. Useful for routing one embedded-resource
/// sweep into several differently-ordered batches.
pub fn with_prefix(scripts: &[Script], prefixes: &[&str]) -> Vec<Script> {
    scripts
        .iter()
        .filter_map(|script| {
            let name = script.name.as_str();
            prefixes
                .iter()
                .find(|p| starts_with_ignore_case(name, p))
                .and_then(|p| ScriptName::try_new(&name[p.len()..]))
                .map(|stripped| Script {
                    name: stripped,
                    contents: script.contents.clone(),
                })
        })
        .collect()
}

fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    name.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
