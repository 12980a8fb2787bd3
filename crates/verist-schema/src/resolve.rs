//! # Local Reference Resolution
//!
//! Turns every local `$ref`/`$dynamicRef` in a graph into a resolved
//! edge. Anchors (`$anchor`/`$dynamicAnchor`) become named landmarks;
//! the implicit anchor `#` maps to the root. A reference resolves by
//! its longest anchor prefix: the remainder — empty, or a `/`-rooted
//! pointer suffix — is appended to the anchor's address and looked up
//! directly in the node index.
//!
//! Resolution is all-or-nothing at root granularity. Any failure — an
//! unresolvable reference, a redefined anchor, a reference cycle —
//! rolls back every edge set during the call and reports the full
//! diagnostics list. Partial resolution is never observable, and a
//! second call on a resolved graph is a no-op.

use std::collections::{HashMap, HashSet};

use verist_core::{DiagnosticList, JsonPointer, Severity};

use crate::error::ResolveError;
use crate::graph::{NodeId, SchemaGraph};

impl SchemaGraph {
    /// Resolves every local reference in the graph, in place.
    ///
    /// Idempotent: succeeding again on an already-resolved graph does
    /// nothing and duplicates no diagnostics.
    ///
    /// # Errors
    ///
    /// [`ResolveError::MalformedSchema`] when the root carries
    /// error-level construction diagnostics — resolving a malformed
    /// schema is a caller contract violation. Otherwise
    /// [`ResolveError::ResolutionFailed`] with the accumulated
    /// diagnostics; the graph is back in its pre-call state.
    pub fn resolve_local_references(&mut self) -> Result<(), ResolveError> {
        if self.root_node().diagnostics.has(Severity::Error) {
            return Err(ResolveError::MalformedSchema);
        }

        if !self.root_node().owns_unresolved_local_references {
            return Ok(());
        }

        let index = self.index_addresses();
        let by_address: HashMap<&str, NodeId> =
            index.iter().map(|(address, id)| (address.as_str(), *id)).collect();

        let mut diagnostics = DiagnosticList::new();

        let anchors = self.map_local_anchors(&index, &mut diagnostics);

        // Every local static or dynamic reference awaits an edge.
        let worklist: Vec<(String, NodeId)> = index
            .iter()
            .filter(|(_, id)| self.node(*id).local_reference().is_some())
            .cloned()
            .collect();

        let mut resolved_now = Vec::with_capacity(worklist.len());
        for (address, id) in &worklist {
            let Some(reference) = self.node(*id).local_reference().map(str::to_string) else {
                continue;
            };

            match resolve_one(&reference, &anchors, &by_address) {
                Some(target) => {
                    self.node_mut(*id).resolved_reference = Some(target);
                    resolved_now.push(*id);
                }
                None => diagnostics.error_at(
                    format!("reference \"{reference}\" could not be resolved"),
                    address_pointer(address),
                ),
            }
        }

        self.check_circular_references(&index, &mut diagnostics);

        if diagnostics.has(Severity::Error) {
            // Revert to the pre-call state: resolution never leaks
            // partial results.
            for id in resolved_now {
                self.node_mut(id).resolved_reference = None;
            }
            return Err(ResolveError::ResolutionFailed(diagnostics));
        }

        // All-or-nothing: success means no node owns an unresolved
        // local reference any more.
        for node in &mut self.nodes {
            node.owns_unresolved_local_references = false;
        }

        Ok(())
    }

    /// Registers `"#" + anchor → address` for every anchor in the
    /// graph, seeded with the implicit root anchor `"#" → ""`. The
    /// first registration of a name wins; later ones are errors at the
    /// duplicate's address.
    fn map_local_anchors(
        &self,
        index: &[(String, NodeId)],
        diagnostics: &mut DiagnosticList,
    ) -> HashMap<String, String> {
        let mut anchors = HashMap::from([("#".to_string(), String::new())]);

        for (address, id) in index {
            let node = self.node(*id);
            let declared = [node.static_anchor.as_deref(), node.dynamic_anchor.as_deref()];

            for anchor in declared.into_iter().flatten() {
                let key = format!("#{anchor}");
                if anchors.contains_key(&key) {
                    diagnostics.error_at(
                        format!("anchor \"{key}\" cannot be redefined"),
                        address_pointer(address),
                    );
                } else {
                    anchors.insert(key, address.clone());
                }
            }
        }

        anchors
    }

    /// Reports a cycle for every node whose resolved-reference chain
    /// revisits a node, including length-0 self-references.
    fn check_circular_references(
        &self,
        index: &[(String, NodeId)],
        diagnostics: &mut DiagnosticList,
    ) {
        for (address, id) in index {
            let mut trace = HashSet::new();
            let mut current = *id;

            while let Some(next) = self.node(current).resolved_reference {
                if !trace.insert(current) {
                    diagnostics.error_at(
                        format!("circular reference originating at \"#{address}\""),
                        address_pointer(address),
                    );
                    break;
                }
                current = next;
            }
        }
    }
}

/// Resolves one local reference string against the anchor map and the
/// address index. The winning anchor is the longest key that prefixes
/// the reference and leaves an empty or `/`-rooted remainder.
fn resolve_one(
    reference: &str,
    anchors: &HashMap<String, String>,
    by_address: &HashMap<&str, NodeId>,
) -> Option<NodeId> {
    let mut best: Option<&str> = None;

    for key in anchors.keys() {
        if let Some(rest) = reference.strip_prefix(key.as_str()) {
            if (rest.is_empty() || rest.starts_with('/'))
                && best.map_or(true, |b| key.len() > b.len())
            {
                best = Some(key);
            }
        }
    }

    let key = best?;
    let rest = &reference[key.len()..];
    let resolved_address = format!("{}{rest}", anchors[key]);
    by_address.get(resolved_address.as_str()).copied()
}

/// The diagnostics address for an index entry. Index addresses are
/// produced by the pointer type itself, so parsing cannot fail; the
/// fallback keeps this total regardless.
fn address_pointer(address: &str) -> JsonPointer {
    JsonPointer::parse(address).unwrap_or_default()
}
