//! Dependency-aware script ordering.
//!
//! A script declares the scripts it requires by listing their comma-separated
//! names after a comment prefix somewhere in its contents, for example
//!
//! ```sql
//! -- #requires 001_create_users, 002_create_roles
//! ```
//!
//! Only the first line containing the prefix is honored. References resolve
//! by case-insensitive suffix match against the candidates' filename stems,
//! so `ear` matches `bear.sql` as long as exactly one candidate matches.

use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::script::Script;

/// Sort scripts so that every depended-on script precedes its dependents.
///
/// The output is a permutation of the input containing every script exactly
/// once. Scripts with no dependency relation to each other keep their
/// relative input order, and repeated runs over the same input produce the
/// same order.
///
/// Fails before returning any order when a reference matches zero candidates
/// ([`CoreError::DependencyNotFound`]), more than one
/// ([`CoreError::AmbiguousDependency`]), or when resolution re-enters a
/// script on the active path ([`CoreError::CyclicDependency`]).
pub fn order_by_dependency(scripts: Vec<Script>, comment_prefix: &str) -> CoreResult<Vec<Script>> {
    let mut walk = Walk::new(&scripts, comment_prefix);

    for index in 0..scripts.len() {
        walk.visit(index)?;
    }

    let Walk { sorted, .. } = walk;
    log::debug!(
        "Dependency order: {}",
        sorted
            .iter()
            .map(|&i| scripts[i].name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    // Indices are a permutation, so each script is taken exactly once.
    let mut slots: Vec<Option<Script>> = scripts.into_iter().map(Some).collect();
    Ok(sorted
        .iter()
        .map(|&i| slots[i].take().expect("index visited twice"))
        .collect())
}

/// Three-color depth-first traversal state.
///
/// `Marking::Done` scripts are already in `sorted`; `Marking::InProgress`
/// scripts are on the active recursion path (`path`), so meeting one again
/// means a cycle.
struct Walk<'a> {
    scripts: &'a [Script],
    comment_prefix: &'a str,
    marking: Vec<Marking>,
    path: Vec<usize>,
    sorted: Vec<usize>,
}

#[derive(Clone, Copy, PartialEq)]
enum Marking {
    Unvisited,
    InProgress,
    Done,
}

impl<'a> Walk<'a> {
    fn new(scripts: &'a [Script], comment_prefix: &'a str) -> Self {
        Self {
            scripts,
            comment_prefix,
            marking: vec![Marking::Unvisited; scripts.len()],
            path: Vec::new(),
            sorted: Vec::with_capacity(scripts.len()),
        }
    }

    fn visit(&mut self, index: usize) -> CoreResult<()> {
        match self.marking[index] {
            Marking::Done => return Ok(()),
            Marking::InProgress => {
                let cycle = self
                    .path
                    .iter()
                    .map(|&i| self.scripts[i].name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(CoreError::CyclicDependency { cycle });
            }
            Marking::Unvisited => {}
        }

        self.marking[index] = Marking::InProgress;
        self.path.push(index);

        for required in requirements(&self.scripts[index], self.scripts, self.comment_prefix)? {
            self.visit(required)?;
        }

        self.path.pop();
        self.marking[index] = Marking::Done;
        self.sorted.push(index);
        Ok(())
    }
}

/// Resolve the indices of the scripts required by `script`, in declared order.
fn requirements(
    script: &Script,
    candidates: &[Script],
    comment_prefix: &str,
) -> CoreResult<Vec<usize>> {
    let Some(references) = dependency_line(&script.contents, comment_prefix) else {
        return Ok(Vec::new());
    };

    references
        .split(',')
        .map(|reference| resolve_reference(reference.trim(), candidates))
        .collect()
}

/// Find the first line containing the comment prefix (case-insensitive) and
/// return the text after the prefix. Later matching lines are ignored.
fn dependency_line<'c>(contents: &'c str, comment_prefix: &str) -> Option<&'c str> {
    contents.lines().find_map(|line| {
        find_ignore_ascii_case(line, comment_prefix).map(|pos| &line[pos + comment_prefix.len()..])
    })
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    (0..=haystack.len().checked_sub(needle.len())?).find(|&start| {
        haystack
            .get(start..start + needle.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(needle))
    })
}

/// Resolve a single reference against the full candidate set.
///
/// A reference matches a candidate when the candidate's filename stem ends
/// with the reference, case-insensitively. Exactly one match is required.
fn resolve_reference(reference: &str, candidates: &[Script]) -> CoreResult<usize> {
    let wanted = reference.to_lowercase();
    let matches: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| {
            file_stem(candidate.name.as_str())
                .to_lowercase()
                .ends_with(&wanted)
        })
        .map(|(i, _)| i)
        .collect();

    match matches.as_slice() {
        [index] => Ok(*index),
        [] => Err(CoreError::DependencyNotFound {
            reference: reference.to_string(),
        }),
        _ => Err(CoreError::AmbiguousDependency {
            reference: reference.to_string(),
            candidates: matches
                .iter()
                .map(|&i| format!("'{}'", file_stem(candidates[i].name.as_str())))
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Strip any directory components and the extension from a script name.
fn file_stem(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name)
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
