//! Pre-execution filter pipeline.
//!
//! Composes a user-supplied sort/filter with the "already executed"
//! exclusion: user ordering first, then each script's name is stamped with
//! its execution identity, then scripts whose identity already appears in the
//! journal's record set are dropped. Because the identity embeds the content
//! hash, a changed script never matches a recorded entry and is naturally
//! selected for re-execution.

use std::collections::HashSet;

use crate::name_hash::NameWithHash;
use crate::script::{Script, ScriptName};

/// User-supplied sort/filter applied before the executed-set exclusion.
pub type SortFn = dyn Fn(Vec<Script>) -> Vec<Script>;

/// Rewrite each script's name to its combined `name#hash` identity.
///
/// Contents are unchanged. Names that already carry a hash suffix have it
/// replaced with the freshly computed one.
pub fn hash_names(scripts: Vec<Script>) -> Vec<Script> {
    scripts
        .into_iter()
        .map(|script| {
            let stamped = NameWithHash::from_script(&script).to_string();
            Script {
                name: ScriptName::new(stamped),
                contents: script.contents,
            }
        })
        .collect()
}

/// Layered, stateless script filter.
///
/// Each [`filter`](Self::filter) call is a pure function of its inputs; no
/// state is carried between pipeline invocations.
pub struct ScriptFilter {
    sort: Option<Box<SortFn>>,
    hashing: bool,
}

impl ScriptFilter {
    /// Filter that stamps execution identities and excludes executed scripts.
    pub fn hashed() -> Self {
        Self {
            sort: None,
            hashing: true,
        }
    }

    /// Filter that only excludes scripts by plain name, without hashing.
    pub fn plain() -> Self {
        Self {
            sort: None,
            hashing: false,
        }
    }

    /// Install a user-supplied sort/filter, run before the exclusion step.
    pub fn with_sort(mut self, sort: impl Fn(Vec<Script>) -> Vec<Script> + 'static) -> Self {
        self.sort = Some(Box::new(sort));
        self
    }

    /// Apply the pipeline: user sort, identity stamping, executed exclusion.
    ///
    /// `executed` holds the journal's record set; comparison is exact string
    /// equality on the (stamped) script name.
    pub fn filter(&self, scripts: Vec<Script>, executed: &HashSet<String>) -> Vec<Script> {
        let sorted = match &self.sort {
            Some(sort) => sort(scripts),
            None => scripts,
        };

        let stamped = if self.hashing {
            hash_names(sorted)
        } else {
            sorted
        };

        stamped
            .into_iter()
            .filter(|script| !executed.contains(script.name.as_str()))
            .collect()
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
