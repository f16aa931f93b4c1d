//! Error types for tm-core

use thiserror::Error;

/// Core error type for Tidemark
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: A declared dependency reference matched no script
    #[error("[E001] The required script '{reference}' could not be found")]
    DependencyNotFound { reference: String },

    /// E002: A declared dependency reference matched more than one script
    #[error("[E002] The required script '{reference}' is ambiguous, could be {candidates}")]
    AmbiguousDependency {
        reference: String,
        candidates: String,
    },

    /// E003: Dependency resolution re-entered a script on the active path
    #[error("[E003] Cyclic dependency between {cycle}")]
    CyclicDependency { cycle: String },

    /// E004: A combined identifier was required to contain a '#' separator
    #[error("[E004] Could not find expected '#' in '{combined}'")]
    MalformedIdentifier { combined: String },

    /// E005: An empty string where a non-empty name was required
    #[error("[E005] Empty name: {context}")]
    EmptyName { context: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
