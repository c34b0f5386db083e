//! Error types for IR-to-SQL compilation.
//!
//! Compilation is all-or-nothing: any error aborts the whole compile and no
//! partial AST is returned. Handlers propagate with `?` and never recover
//! internally; the compilation context unwinds its scope stack on every
//! failure path, so a failed compile leaves no corrupted state behind.

use thiserror::Error;

/// Error produced while lowering query IR to the target AST.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The referenced function has no native mapping in the target dialect.
    ///
    /// Carries the function's catalog display name. The compiler never
    /// guesses a SQL-level identifier from display metadata.
    #[error("unsupported function: {name}")]
    UnsupportedFunction { name: String },

    /// The IR violates a shape invariant the resolver is expected to uphold
    /// (e.g. a CASE with no branches). Internal, not user-recoverable.
    #[error("malformed query IR: {0}")]
    Malformed(String),

    /// Expression nesting exceeded the compiler's recursion budget.
    #[error("expression nesting exceeds the depth limit of {limit}")]
    TooDeeplyNested { limit: usize },
}
