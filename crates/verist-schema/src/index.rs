//! # Graph Indexer
//!
//! Maps every node a root transitively owns to its root-relative
//! address. Ownership is structural: direct slots contribute one entry
//! at `<slot>`, list slots at `<slot>/<index>`, map slots at
//! `<slot>/<key>` (escaped). The walk is depth-first pre-order over the
//! explicit slot registry, so the order is deterministic:
//! field-then-index-then-key at every level, root first.
//!
//! The decoder never shares a node between slots, so every node has
//! exactly one address. Debug builds assert this; a violation would be
//! a decoder defect, not caller input.

use std::collections::HashSet;

use verist_core::JsonPointer;

use crate::graph::{NodeId, SchemaGraph};

impl SchemaGraph {
    /// Addresses of every node the root transitively owns, root first,
    /// keyed by root-relative JSON Pointer text (the root itself at the
    /// empty address).
    pub fn index_addresses(&self) -> Vec<(String, NodeId)> {
        let mut index = Vec::with_capacity(self.len());
        let mut seen = HashSet::with_capacity(self.len());
        self.index_into(self.root, &JsonPointer::root(), &mut index, &mut seen);
        index
    }

    fn index_into(
        &self,
        id: NodeId,
        address: &JsonPointer,
        index: &mut Vec<(String, NodeId)>,
        seen: &mut HashSet<NodeId>,
    ) {
        if !seen.insert(id) {
            debug_assert!(false, "schema node {id} is owned by two slots");
            return;
        }

        index.push((address.to_string(), id));

        for (slot, child) in self.node(id).immediate_children() {
            self.index_into(child, &address.join(&slot), index, seen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_only() {
        let graph = SchemaGraph::decode(&json!({}));
        let index = graph.index_addresses();
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].0, "");
        assert_eq!(index[0].1, graph.root());
    }

    #[test]
    fn test_addresses_cover_every_slot_kind() {
        let graph = SchemaGraph::decode(&json!({
            "items": { "type": "string" },
            "prefixItems": [true, false],
            "$defs": { "foo": {}, "bar": {} },
            "properties": { "x": { "not": {} } }
        }));

        let index = graph.index_addresses();
        let addresses: Vec<&str> = index
            .iter()
            .map(|(a, _)| a.as_str())
            .collect::<Vec<_>>()
            .into_iter()
            .collect();

        for expected in [
            "",
            "/items",
            "/prefixItems/0",
            "/prefixItems/1",
            "/$defs/foo",
            "/$defs/bar",
            "/properties/x",
            "/properties/x/not",
        ] {
            assert!(
                addresses.contains(&expected),
                "missing {expected}, got {addresses:?}"
            );
        }
        assert_eq!(addresses.len(), 8);
    }

    #[test]
    fn test_index_is_deterministic_and_root_first() {
        let graph = SchemaGraph::decode(&json!({
            "$defs": { "a": {}, "b": {} },
            "items": {}
        }));
        let first = graph.index_addresses();
        let second = graph.index_addresses();
        assert_eq!(first, second);
        assert_eq!(first[0].0, "");
        // Singular slots come before map slots at the same level.
        let items_at = first.iter().position(|(a, _)| a == "/items");
        let defs_at = first.iter().position(|(a, _)| a == "/$defs/a");
        assert!(items_at < defs_at);
    }

    #[test]
    fn test_map_keys_are_escaped() {
        let graph = SchemaGraph::decode(&json!({
            "properties": { "a/b": {}, "m~n": {} }
        }));
        let addresses: Vec<String> = graph
            .index_addresses()
            .into_iter()
            .map(|(a, _)| a)
            .collect();
        assert!(addresses.contains(&"/properties/a~1b".to_string()));
        assert!(addresses.contains(&"/properties/m~0n".to_string()));
    }

    #[test]
    fn test_every_arena_node_is_reachable() {
        let graph = SchemaGraph::decode(&json!({
            "allOf": [{ "items": { "$defs": { "x": true } } }],
            "contains": {},
            "dependentSchemas": { "k": {} }
        }));
        assert_eq!(graph.index_addresses().len(), graph.len());
    }
}
