//! Execution-identity codec: `name#hash`.
//!
//! The journal records which scripts have run as flat strings, so the content
//! hash travels inside the script name itself. A script whose contents change
//! produces a different combined identity and is therefore re-selected for
//! execution, without any run-once/run-always distinction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::checksum::compute_checksum;
use crate::error::{CoreError, CoreResult};
use crate::script::Script;

/// Separator between the plain name and the contents hash.
const SEPARATOR: char = '#';

/// A script's execution identity: logical name plus content digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameWithHash {
    /// Logical script name without any hash suffix
    pub plain_name: String,

    /// Digest of the script contents, see [`generate_hash`](Self::generate_hash)
    pub contents_hash: String,
}

impl NameWithHash {
    /// Create an identity from already-separated parts.
    pub fn new(plain_name: impl Into<String>, contents_hash: impl Into<String>) -> Self {
        Self {
            plain_name: plain_name.into(),
            contents_hash: contents_hash.into(),
        }
    }

    /// Split a combined string at the first `#`.
    ///
    /// Returns `None` when no separator is present. Everything after the
    /// first separator is taken as the hash.
    pub fn try_parse(combined: &str) -> Option<Self> {
        let pos = combined.find(SEPARATOR)?;
        Some(Self::new(&combined[..pos], &combined[pos + 1..]))
    }

    /// Split a combined string at the first `#`, failing if there is none.
    pub fn parse(combined: &str) -> CoreResult<Self> {
        Self::try_parse(combined).ok_or_else(|| CoreError::MalformedIdentifier {
            combined: combined.to_string(),
        })
    }

    /// Derive a script's execution identity from its current state.
    ///
    /// If the script name already carries a `#hash` suffix the plain name is
    /// taken from it and the old suffix is discarded, not validated: the hash
    /// is always recomputed from the live contents, which are the only source
    /// of truth.
    pub fn from_script(script: &Script) -> Self {
        let plain_name = match Self::try_parse(script.name.as_str()) {
            Some(parsed) => parsed.plain_name,
            None => script.name.as_str().to_string(),
        };
        Self {
            plain_name,
            contents_hash: Self::generate_hash(&script.contents),
        }
    }

    /// SHA-256 digest of the supplied content, as lowercase hex.
    pub fn generate_hash(content: &str) -> String {
        compute_checksum(content)
    }
}

impl fmt::Display for NameWithHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.plain_name, SEPARATOR, self.contents_hash)
    }
}

#[cfg(test)]
#[path = "name_hash_test.rs"]
mod tests;
