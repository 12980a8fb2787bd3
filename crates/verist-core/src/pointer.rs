//! # JSON Pointer Addresses
//!
//! An immutable RFC 6901 JSON Pointer. Schema graph nodes and their
//! diagnostics are labeled with root-relative pointers; the resolver
//! matches `$ref` strings against them.
//!
//! Reference tokens are stored unescaped. `~` and `/` are encoded as
//! `~0` and `~1` only in the textual form produced by `Display` and
//! consumed by `parse`.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::PointerParseError;

/// A root-relative JSON document address.
///
/// The empty pointer addresses the whole document. Composition appends
/// the right operand's tokens: `/a/b` joined with `/c` is `/a/b/c`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// The pointer addressing the whole document.
    pub fn root() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Builds a pointer from unescaped reference tokens.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// A single-token pointer.
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            tokens: vec![token.into()],
        }
    }

    /// Parses the textual JSON Pointer form.
    ///
    /// The empty string is the root pointer; any other value must start
    /// with `/` and every reference token must be validly escaped.
    pub fn parse(value: &str) -> Result<Self, PointerParseError> {
        if value.is_empty() {
            return Ok(Self::root());
        }

        let Some(rest) = value.strip_prefix('/') else {
            return Err(PointerParseError::MissingLeadingSlash(value.to_string()));
        };

        let mut tokens = Vec::new();
        for raw in rest.split('/') {
            match unescape(raw) {
                Some(token) => tokens.push(token),
                None => return Err(PointerParseError::InvalidEscape(raw.to_string())),
            }
        }

        Ok(Self { tokens })
    }

    /// Number of reference tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True for the root pointer.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The unescaped reference token at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Returns this pointer extended by one unescaped token.
    pub fn child(&self, token: impl Into<String>) -> Self {
        let mut tokens = self.tokens.clone();
        tokens.push(token.into());
        Self { tokens }
    }

    /// Composes two pointers: the right operand's tokens are appended.
    pub fn join(&self, other: &JsonPointer) -> Self {
        let mut tokens = self.tokens.clone();
        tokens.extend(other.tokens.iter().cloned());
        Self { tokens }
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", escape(token))?;
        }
        Ok(())
    }
}

impl Serialize for JsonPointer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Encodes `~` as `~0` and `/` as `~1`.
pub fn escape(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for c in token.chars() {
        match c {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            _ => out.push(c),
        }
    }
    out
}

/// Decodes an escaped reference token; `None` if the escaping is invalid.
pub fn unescape(token: &str) -> Option<String> {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        match c {
            '/' => return None,
            '~' => match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            },
            _ => out.push(c),
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_pointer_is_empty_string() {
        assert_eq!(JsonPointer::root().to_string(), "");
        assert!(JsonPointer::root().is_empty());
    }

    #[test]
    fn test_escape_round_trip() {
        assert_eq!(escape("a/b"), "a~1b");
        assert_eq!(escape("m~n"), "m~0n");
        assert_eq!(unescape("a~1b").as_deref(), Some("a/b"));
        assert_eq!(unescape("m~0n").as_deref(), Some("m~n"));
        assert_eq!(unescape("m~n"), None);
        assert_eq!(unescape("a/b"), None);
    }

    #[test]
    fn test_display_escapes_tokens() {
        let p = JsonPointer::new(["a/b", "m~n"]);
        assert_eq!(p.to_string(), "/a~1b/m~0n");
    }

    #[test]
    fn test_parse_round_trip() {
        let p = JsonPointer::parse("/$defs/foo/items").unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.get(0), Some("$defs"));
        assert_eq!(p.get(2), Some("items"));
        assert_eq!(p.to_string(), "/$defs/foo/items");
    }

    #[test]
    fn test_parse_unescapes() {
        let p = JsonPointer::parse("/a~1b").unwrap();
        assert_eq!(p.get(0), Some("a/b"));
    }

    #[test]
    fn test_parse_rejects_missing_slash() {
        assert!(matches!(
            JsonPointer::parse("foo"),
            Err(PointerParseError::MissingLeadingSlash(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_escape() {
        assert!(matches!(
            JsonPointer::parse("/a~2b"),
            Err(PointerParseError::InvalidEscape(_))
        ));
    }

    #[test]
    fn test_parse_empty_token() {
        // "/" addresses the member with the empty key.
        let p = JsonPointer::parse("/").unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.get(0), Some(""));
    }

    #[test]
    fn test_join_composes() {
        let a = JsonPointer::parse("/a/b").unwrap();
        let b = JsonPointer::parse("/c").unwrap();
        assert_eq!(a.join(&b).to_string(), "/a/b/c");
    }

    #[test]
    fn test_child_appends_unescaped() {
        let p = JsonPointer::root().child("patternProperties").child("^a/b$");
        assert_eq!(p.to_string(), "/patternProperties/^a~1b$");
    }

    #[test]
    fn test_serializes_as_string() {
        let p = JsonPointer::parse("/a/b").unwrap();
        assert_eq!(serde_json::to_value(&p).unwrap(), serde_json::json!("/a/b"));
    }
}
