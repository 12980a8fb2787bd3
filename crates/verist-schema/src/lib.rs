//! # verist-schema — The Verist Schema Engine
//!
//! Validates arbitrary JSON instance documents against a JSON Schema
//! document (2020-12-style dialect) without ever raising for malformed
//! input. Outcomes and diagnostics are returned as values, so the engine
//! can run in latency-sensitive or exception-hostile contexts such as
//! server-side request validation.
//!
//! ## Pipeline
//!
//! 1. **Decode** — [`SchemaGraph::decode`] turns an already-parsed
//!    `serde_json::Value` into an arena of [`SchemaNode`]s, bottom-up.
//!    Decoding is total: malformed fragments attach error diagnostics to
//!    the offending node instead of failing.
//! 2. **Resolve** — [`SchemaGraph::resolve_local_references`] maps
//!    anchors to addresses, turns every local `$ref`/`$dynamicRef` into
//!    a graph edge, detects cycles, and rolls back entirely on any
//!    failure. All-or-nothing: partial resolution is never observable.
//! 3. **Match** — [`SchemaGraph::is_match`] decides instance membership.
//!    Side-effect-free; after successful resolution the graph is safe
//!    for unlimited concurrent readers.
//!
//! ## Misuse vs. malformed input
//!
//! Malformed *schemas* are soft: they decode, carry error diagnostics,
//! and simply refuse to match. Calling the resolver or matcher on a
//! graph that is not ready for it is a caller contract violation and
//! surfaces as a typed error ([`ResolveError`], [`MatchError`]), never
//! as a boolean outcome.

pub mod decode;
pub mod error;
pub mod graph;
pub mod index;
pub mod matcher;
pub mod node;
pub mod resolve;

// Re-export primary types for ergonomic imports.
pub use error::{MatchError, ResolveError};
pub use graph::{NodeId, SchemaGraph};
pub use matcher::MatchHook;
pub use node::{PatternProperty, SchemaNode, TypeSet};

// Re-export the foundational vocabulary so downstream crates need not
// depend on verist-core directly.
pub use verist_core::{deep_equivalent, Diagnostic, DiagnosticList, JsonPointer, Severity, ValueKind};
