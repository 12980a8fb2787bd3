//! # Error Types — Misuse Signals and Resolution Failure
//!
//! Two distinct failure families, neither of which is a diagnostic:
//!
//! - [`ResolveError`] — returned by the resolver. `MalformedSchema`
//!   means the caller skipped checking construction diagnostics (a
//!   contract violation); `ResolutionFailed` is the soft, coarse-grained
//!   failure carrying the full diagnostics list after rollback.
//! - [`MatchError`] — contract violations of the matcher: the schema
//!   graph is not in a state where membership is decidable.
//!
//! Construction diagnostics themselves live on the nodes (see
//! `verist_core::DiagnosticList`) and never abort anything.

use thiserror::Error;
use verist_core::DiagnosticList;

/// Failure of [`SchemaGraph::resolve_local_references`](crate::SchemaGraph::resolve_local_references).
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The root carries error-level construction diagnostics. Resolving
    /// a malformed schema is a caller programming error, not a soft
    /// failure.
    #[error("cannot resolve references on a malformed schema")]
    MalformedSchema,

    /// One or more references could not be resolved, an anchor was
    /// redefined, or a reference cycle exists. Every edge set during
    /// the failed call has been rolled back.
    #[error("local reference resolution failed:\n{0}")]
    ResolutionFailed(DiagnosticList),
}

impl ResolveError {
    /// The diagnostics of a `ResolutionFailed`, if any.
    pub fn diagnostics(&self) -> Option<&DiagnosticList> {
        match self {
            ResolveError::MalformedSchema => None,
            ResolveError::ResolutionFailed(diagnostics) => Some(diagnostics),
        }
    }
}

/// Contract violation of [`SchemaGraph::is_match`](crate::SchemaGraph::is_match).
///
/// Each variant names the precondition the caller skipped. These are
/// distinct signals rather than boolean outcomes: evaluating a
/// malformed or unresolved schema has no meaningful answer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// The node or one of its descendants carries an error diagnostic.
    #[error("cannot validate against a malformed schema")]
    MalformedSchema,

    /// The node or one of its descendants is an external reference,
    /// which this engine does not fetch.
    #[error("cannot validate against external references")]
    ExternalReference,

    /// The node or one of its descendants is an unresolved local
    /// reference. A successful call to `resolve_local_references` is
    /// required first.
    #[error("schema references have not been resolved")]
    UnresolvedReference,
}
