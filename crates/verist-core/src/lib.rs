//! # verist-core — Foundational Types for the Verist Schema Engine
//!
//! This crate is the leaf of the Verist workspace. It defines the small
//! vocabulary every other crate speaks:
//!
//! 1. **`JsonPointer`** — an RFC 6901 address used to label schema graph
//!    nodes and diagnostics. Escape/unescape, parsing, and composition;
//!    nothing schema-specific.
//!
//! 2. **Soft diagnostics.** `Diagnostic` / `DiagnosticList` carry
//!    validation outcomes as values. Decoding a malformed schema never
//!    fails — it accumulates error-level diagnostics on the offending
//!    node. This is the backbone of the non-throwing contract.
//!
//! 3. **Value-kind discrimination.** `ValueKind` partitions
//!    `serde_json::Value` into the seven JSON Schema simple types
//!    (`integer` is distinct from `number` and requires exact 64-bit
//!    signed representability), plus structural deep equivalence that
//!    ignores numeric representation (`17` ≡ `17.0`).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `verist-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod diagnostics;
pub mod error;
pub mod pointer;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use diagnostics::{Diagnostic, DiagnosticList, Severity};
pub use error::PointerParseError;
pub use pointer::JsonPointer;
pub use value::{deep_equivalent, ValueKind};
