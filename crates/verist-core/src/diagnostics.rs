//! # Soft Diagnostics
//!
//! Validation outcomes as values. A schema node accumulates diagnostics
//! while it is decoded; a parent absorbs each child's list with the
//! child's slot address prefixed, so the root ends up holding every
//! message in the document, each addressed from the root.
//!
//! Severity is three-level: information and warnings never block
//! matching; a single error makes the graph unusable until fixed.

use std::fmt;
use std::slice;

use serde::Serialize;

use crate::pointer::JsonPointer;

/// How bad a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Information,
    Warning,
    Error,
}

/// A single message attached to a schema document address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Human-readable description of the finding.
    pub message: String,
    /// Severity of the finding.
    pub severity: Severity,
    /// Root-relative address of the offending slot, when known.
    pub address: Option<JsonPointer>,
}

impl Diagnostic {
    /// Builds a diagnostic with no address.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            address: None,
        }
    }

    /// Builds a diagnostic addressed at `address`.
    pub fn at(message: impl Into<String>, severity: Severity, address: JsonPointer) -> Self {
        Self {
            message: message.into(),
            severity,
            address: Some(address),
        }
    }

    /// The same diagnostic re-addressed under `prefix`.
    ///
    /// An absent address becomes the prefix itself; a present address is
    /// composed onto the prefix. Used when a parent absorbs a child's
    /// diagnostics under the child's slot.
    pub fn prefixed(&self, prefix: &JsonPointer) -> Self {
        let address = match &self.address {
            Some(address) => prefix.join(address),
            None => prefix.clone(),
        };
        Self {
            message: self.message.clone(),
            severity: self.severity,
            address: Some(address),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Information => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match &self.address {
            Some(address) if !address.is_empty() => {
                write!(f, "[{tag}] {}: {}", address, self.message)
            }
            _ => write!(f, "[{tag}] (root): {}", self.message),
        }
    }
}

/// An ordered collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticList {
    entries: Vec<Diagnostic>,
}

impl DiagnosticList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Logs an error with no address.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Diagnostic::new(message, Severity::Error));
    }

    /// Logs an error addressed at `address`.
    pub fn error_at(&mut self, message: impl Into<String>, address: JsonPointer) {
        self.push(Diagnostic::at(message, Severity::Error, address));
    }

    /// Logs a warning with no address.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Diagnostic::new(message, Severity::Warning));
    }

    /// Logs a warning addressed at `address`.
    pub fn warning_at(&mut self, message: impl Into<String>, address: JsonPointer) {
        self.push(Diagnostic::at(message, Severity::Warning, address));
    }

    /// True if any entry has the given severity.
    pub fn has(&self, severity: Severity) -> bool {
        self.entries.iter().any(|d| d.severity == severity)
    }

    /// Number of entries with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|d| d.severity == severity).count()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Absorbs every entry of `other`, re-addressed under `prefix`.
    pub fn absorb_prefixed(&mut self, other: &DiagnosticList, prefix: &JsonPointer) {
        for diagnostic in &other.entries {
            self.entries.push(diagnostic.prefixed(prefix));
        }
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl fmt::Display for DiagnosticList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DiagnosticList {
    type Item = &'a Diagnostic;
    type IntoIter = slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_severity() {
        let mut list = DiagnosticList::new();
        list.warning("loose bound");
        assert!(list.has(Severity::Warning));
        assert!(!list.has(Severity::Error));
        list.error("bad regex");
        assert!(list.has(Severity::Error));
    }

    #[test]
    fn test_absorb_prefixed_readdresses() {
        let slot = JsonPointer::parse("/properties/foo").unwrap();

        let mut child = DiagnosticList::new();
        child.error("unaddressed");
        child.error_at("addressed", JsonPointer::parse("/pattern").unwrap());

        let mut parent = DiagnosticList::new();
        parent.absorb_prefixed(&child, &slot);

        let entries = parent.into_inner();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].address.as_ref().map(ToString::to_string).as_deref(),
            Some("/properties/foo")
        );
        assert_eq!(
            entries[1].address.as_ref().map(ToString::to_string).as_deref(),
            Some("/properties/foo/pattern")
        );
    }

    #[test]
    fn test_display_format() {
        let d = Diagnostic::at(
            "at least one item expected",
            Severity::Error,
            JsonPointer::parse("/allOf").unwrap(),
        );
        let text = d.to_string();
        assert!(text.contains("[error]"));
        assert!(text.contains("/allOf"));
    }

    #[test]
    fn test_display_root_address() {
        let d = Diagnostic::new("lower bound cannot exceed upper bound", Severity::Error);
        assert!(d.to_string().contains("(root)"));
    }
}
