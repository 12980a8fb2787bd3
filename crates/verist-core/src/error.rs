//! # Error Types
//!
//! Typed failures for the foundational crate. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Error parsing a string as an RFC 6901 JSON Pointer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointerParseError {
    /// A non-empty pointer must start with `/`.
    #[error("pointer must be empty or start with '/': {0:?}")]
    MissingLeadingSlash(String),

    /// A reference token contained a `~` not followed by `0` or `1`.
    #[error("invalid escape sequence in reference token {0:?}")]
    InvalidEscape(String),
}
