//! # Schema Nodes
//!
//! One [`SchemaNode`] per JSON Schema (sub)document. Every recognized
//! keyword is a typed field; child schemas are arena handles
//! ([`NodeId`]) into the owning [`SchemaGraph`](crate::SchemaGraph), so
//! the graph can hold the reference cycles a schema document may spell
//! out without any ownership cycles.
//!
//! Nodes are built once by the decoder, leaves first, and are logically
//! immutable afterwards — the only later write is `resolved_reference`,
//! which the resolver sets as a unit for the whole graph or not at all.
//!
//! Child-schema slots are enumerated through an explicit per-type
//! registry (`SINGULAR_SLOTS` / `LIST_SLOTS` / `MAP_SLOTS`): a fixed
//! ordered table of `(address segment, accessor)` pairs. The indexer
//! and the diagnostic aggregation both walk this registry, so a slot
//! added to the struct without a registry entry is invisible to both —
//! keep them in sync.

use std::collections::BTreeMap;

use regex::Regex;
use serde_json::Value;

use verist_core::{DiagnosticList, JsonPointer, ValueKind};

use crate::graph::NodeId;

/// A set of JSON Schema simple types, backed by a bit per kind.
///
/// The empty set means the `type` keyword is absent: the instance kind
/// is unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeSet(u8);

impl TypeSet {
    /// The empty set (no `type` constraint).
    pub const EMPTY: TypeSet = TypeSet(0);

    fn bit(kind: ValueKind) -> u8 {
        // Bit positions follow the canonical trial order.
        let index = ValueKind::CANONICAL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or(0);
        1 << index
    }

    /// Adds a kind to the set.
    pub fn insert(&mut self, kind: ValueKind) {
        self.0 |= Self::bit(kind);
    }

    /// True if the set contains `kind`.
    pub fn contains(self, kind: ValueKind) -> bool {
        self.0 & Self::bit(kind) != 0
    }

    /// True if no kind is declared.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of declared kinds.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl FromIterator<ValueKind> for TypeSet {
    fn from_iter<I: IntoIterator<Item = ValueKind>>(iter: I) -> Self {
        let mut set = TypeSet::EMPTY;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

/// One `patternProperties` entry: the compiled key and its child schema.
///
/// `regex` is `None` when the key failed to compile; the decoder has
/// already logged an error diagnostic in that case, so the node can
/// never reach the matcher with a missing pattern.
#[derive(Debug)]
pub struct PatternProperty {
    /// The compiled key, matched anywhere in a property name.
    pub regex: Option<Regex>,
    /// The child schema applied to matching members.
    pub schema: NodeId,
}

/// One JSON Schema document or subschema, decoded into typed keywords.
#[derive(Debug)]
pub struct SchemaNode {
    // ─── Triviality ──────────────────────────────────────────────────
    /// `Some(true)`/`Some(false)` only for nodes decoded from the bare
    /// JSON literals `true`/`false`. Such nodes carry defaults for
    /// every other field and zero diagnostics.
    pub trivial: Option<bool>,

    // ─── Core identifiers ────────────────────────────────────────────
    /// `$id` — informational, shape-validated only.
    pub id_reference: Option<String>,
    /// `$schema` — dialect reference, shape-validated only.
    pub schema_reference: Option<String>,
    /// `$comment`.
    pub comment: Option<String>,
    /// `$vocabulary` — URI → required flag, shape-validated only.
    pub vocabulary: BTreeMap<String, bool>,
    /// `$ref`.
    pub static_reference: Option<String>,
    /// `$anchor`.
    pub static_anchor: Option<String>,
    /// `$dynamicRef`.
    pub dynamic_reference: Option<String>,
    /// `$dynamicAnchor`.
    pub dynamic_anchor: Option<String>,
    /// `$defs`.
    pub definitions: BTreeMap<String, NodeId>,

    /// Back-edge populated only by a successful resolution pass.
    /// A non-owning handle into the same graph.
    pub resolved_reference: Option<NodeId>,

    // ─── Type & value constraints ────────────────────────────────────
    /// `type` — empty set means unconstrained.
    pub declared_type: TypeSet,
    /// `const`. `Some(Value::Null)` is a constraint; `None` is absence.
    pub const_value: Option<Value>,
    /// `enum`. Present and empty rejects every instance.
    pub permissible_values: Option<Vec<Value>>,
    /// `multipleOf` — must be positive.
    pub multiple_of: Option<f64>,
    /// `minimum`.
    pub minimum: Option<f64>,
    /// `exclusiveMinimum`.
    pub exclusive_minimum: Option<f64>,
    /// `maximum`.
    pub maximum: Option<f64>,
    /// `exclusiveMaximum`.
    pub exclusive_maximum: Option<f64>,
    /// `minLength`, default 0.
    pub min_length: u64,
    /// `maxLength`.
    pub max_length: Option<u64>,
    /// `pattern`, compiled; `None` matches every string.
    pub pattern: Option<Regex>,
    /// `minItems`, default 0.
    pub min_items: u64,
    /// `maxItems`.
    pub max_items: Option<u64>,
    /// `uniqueItems`, default false.
    pub unique_items: bool,
    /// `minContains`, default 1.
    pub min_contains: u64,
    /// `maxContains`.
    pub max_contains: Option<u64>,
    /// `minProperties`, default 0.
    pub min_properties: u64,
    /// `maxProperties`.
    pub max_properties: Option<u64>,
    /// `required` — names must be pairwise distinct.
    pub required_property_names: Vec<String>,
    /// `dependentRequired` — each list pairwise distinct.
    pub dependent_required: BTreeMap<String, Vec<String>>,

    // ─── Structural children ─────────────────────────────────────────
    /// `prefixItems`, positional.
    pub prefix_items: Vec<NodeId>,
    /// `items` — applies past the prefix when present.
    pub items: Option<NodeId>,
    /// `contains`.
    pub contains: Option<NodeId>,
    /// `additionalProperties`.
    pub additional_properties: Option<NodeId>,
    /// `properties`.
    pub properties: BTreeMap<String, NodeId>,
    /// `patternProperties` — every key must compile as a regex.
    pub pattern_properties: BTreeMap<String, PatternProperty>,
    /// `dependentSchemas`.
    pub dependent_schemas: BTreeMap<String, NodeId>,
    /// `propertyNames`.
    pub property_names: Option<NodeId>,
    /// `if`.
    pub if_schema: Option<NodeId>,
    /// `then`.
    pub then_schema: Option<NodeId>,
    /// `else`.
    pub else_schema: Option<NodeId>,
    /// `allOf` — present implies non-empty.
    pub all_of: Option<Vec<NodeId>>,
    /// `anyOf` — present implies non-empty.
    pub any_of: Option<Vec<NodeId>>,
    /// `oneOf` — present implies non-empty.
    pub one_of: Option<Vec<NodeId>>,
    /// `not`.
    pub not_schema: Option<NodeId>,
    /// `unevaluatedItems`.
    pub unevaluated_items: Option<NodeId>,
    /// `unevaluatedProperties`.
    pub unevaluated_properties: Option<NodeId>,

    // ─── Content block ───────────────────────────────────────────────
    /// `contentEncoding`, informational.
    pub content_encoding: Option<String>,
    /// `contentMediaType`, informational.
    pub content_media_type: Option<String>,
    /// `contentSchema`.
    pub content_schema: Option<NodeId>,

    // ─── Metadata block ──────────────────────────────────────────────
    /// `title`.
    pub title: Option<String>,
    /// `description`.
    pub description: Option<String>,
    /// `default` — not validated against the node.
    pub default_value: Option<Value>,
    /// `deprecated`, default false.
    pub deprecated: bool,
    /// `readOnly`, default false.
    pub read_only: bool,
    /// `writeOnly`, default false.
    pub write_only: bool,
    /// `examples` — each validated against the completed node.
    pub examples: Vec<Value>,
    /// `format` — accepted and stored verbatim, never enforced.
    pub format: Option<String>,

    // ─── Bookkeeping, computed bottom-up at decode ───────────────────
    /// This node or a descendant is a local `$ref`.
    pub owns_local_static_references: bool,
    /// This node or a descendant is a local `$dynamicRef`.
    pub owns_local_dynamic_references: bool,
    /// This node or a descendant is an external reference.
    pub owns_external_references: bool,
    /// This node or a descendant is an unresolved local reference.
    /// Cleared graph-wide by a successful resolution pass.
    pub owns_unresolved_local_references: bool,

    /// Construction diagnostics: this node's own findings plus every
    /// descendant's, re-addressed under the owning slot.
    pub diagnostics: DiagnosticList,
}

impl Default for SchemaNode {
    fn default() -> Self {
        Self {
            trivial: None,
            id_reference: None,
            schema_reference: None,
            comment: None,
            vocabulary: BTreeMap::new(),
            static_reference: None,
            static_anchor: None,
            dynamic_reference: None,
            dynamic_anchor: None,
            definitions: BTreeMap::new(),
            resolved_reference: None,
            declared_type: TypeSet::EMPTY,
            const_value: None,
            permissible_values: None,
            multiple_of: None,
            minimum: None,
            exclusive_minimum: None,
            maximum: None,
            exclusive_maximum: None,
            min_length: 0,
            max_length: None,
            pattern: None,
            min_items: 0,
            max_items: None,
            unique_items: false,
            // minContains defaults to 1 per the 2020-12 dialect.
            min_contains: 1,
            max_contains: None,
            min_properties: 0,
            max_properties: None,
            required_property_names: Vec::new(),
            dependent_required: BTreeMap::new(),
            prefix_items: Vec::new(),
            items: None,
            contains: None,
            additional_properties: None,
            properties: BTreeMap::new(),
            pattern_properties: BTreeMap::new(),
            dependent_schemas: BTreeMap::new(),
            property_names: None,
            if_schema: None,
            then_schema: None,
            else_schema: None,
            all_of: None,
            any_of: None,
            one_of: None,
            not_schema: None,
            unevaluated_items: None,
            unevaluated_properties: None,
            content_encoding: None,
            content_media_type: None,
            content_schema: None,
            title: None,
            description: None,
            default_value: None,
            deprecated: false,
            read_only: false,
            write_only: false,
            examples: Vec::new(),
            format: None,
            owns_local_static_references: false,
            owns_local_dynamic_references: false,
            owns_external_references: false,
            owns_unresolved_local_references: false,
            diagnostics: DiagnosticList::new(),
        }
    }
}

impl SchemaNode {
    /// The node decoded from a bare JSON `true`.
    pub(crate) fn trivial_true() -> Self {
        Self {
            trivial: Some(true),
            ..Self::default()
        }
    }

    /// The node decoded from a bare JSON `false`.
    pub(crate) fn trivial_false() -> Self {
        Self {
            trivial: Some(false),
            ..Self::default()
        }
    }

    /// True for the match-everything node.
    pub fn is_trivial_true(&self) -> bool {
        self.trivial == Some(true)
    }

    /// True for the match-nothing node.
    pub fn is_trivial_false(&self) -> bool {
        self.trivial == Some(false)
    }

    /// True for either trivial node.
    pub fn is_trivial(&self) -> bool {
        self.trivial.is_some()
    }

    /// `$ref` starting with `#`.
    pub fn is_local_static_reference(&self) -> bool {
        matches!(&self.static_reference, Some(r) if r.starts_with('#'))
    }

    /// `$dynamicRef` starting with `#`.
    pub fn is_local_dynamic_reference(&self) -> bool {
        matches!(&self.dynamic_reference, Some(r) if r.starts_with('#'))
    }

    /// `$ref` or `$dynamicRef` pointing outside this document.
    pub fn is_external_reference(&self) -> bool {
        matches!(&self.static_reference, Some(r) if !r.starts_with('#'))
            || matches!(&self.dynamic_reference, Some(r) if !r.starts_with('#'))
    }

    /// The effective lower bound as `(bound, exclusive)`.
    ///
    /// When both `minimum` and `exclusiveMinimum` are present the more
    /// restrictive one wins; construction has already warned about the
    /// other.
    pub fn lower_bound(&self) -> Option<(f64, bool)> {
        match (self.minimum, self.exclusive_minimum) {
            (Some(minimum), Some(exclusive)) => {
                if minimum > exclusive {
                    Some((minimum, false))
                } else {
                    Some((exclusive, true))
                }
            }
            (Some(minimum), None) => Some((minimum, false)),
            (None, Some(exclusive)) => Some((exclusive, true)),
            (None, None) => None,
        }
    }

    /// The effective upper bound as `(bound, exclusive)`.
    pub fn upper_bound(&self) -> Option<(f64, bool)> {
        match (self.maximum, self.exclusive_maximum) {
            (Some(maximum), Some(exclusive)) => {
                if maximum < exclusive {
                    Some((maximum, false))
                } else {
                    Some((exclusive, true))
                }
            }
            (Some(maximum), None) => Some((maximum, false)),
            (None, Some(exclusive)) => Some((exclusive, true)),
            (None, None) => None,
        }
    }

    /// The local reference string to resolve, static first.
    pub(crate) fn local_reference(&self) -> Option<&str> {
        if self.is_local_static_reference() {
            self.static_reference.as_deref()
        } else if self.is_local_dynamic_reference() {
            self.dynamic_reference.as_deref()
        } else {
            None
        }
    }

    /// Immediate child slots in field-then-index-then-key order.
    ///
    /// Each physical child appears exactly once: the decoder never
    /// shares a node between slots.
    pub(crate) fn immediate_children(&self) -> Vec<(JsonPointer, NodeId)> {
        let mut slots = Vec::new();

        for (segment, accessor) in SINGULAR_SLOTS {
            if let Some(child) = accessor(self) {
                slots.push((JsonPointer::token(*segment), child));
            }
        }

        for (segment, accessor) in LIST_SLOTS {
            for (index, child) in accessor(self).iter().enumerate() {
                slots.push((
                    JsonPointer::token(*segment).child(index.to_string()),
                    *child,
                ));
            }
        }

        for (segment, accessor) in MAP_SLOTS {
            for (key, child) in accessor(self) {
                slots.push((JsonPointer::token(*segment).child(key), child));
            }
        }

        slots
    }
}

type SingularSlot = (&'static str, fn(&SchemaNode) -> Option<NodeId>);
type ListSlot = (&'static str, for<'a> fn(&'a SchemaNode) -> &'a [NodeId]);
type MapSlot = (
    &'static str,
    for<'a> fn(&'a SchemaNode) -> Vec<(&'a str, NodeId)>,
);

/// Directly schema-valued slots.
const SINGULAR_SLOTS: &[SingularSlot] = &[
    ("items", |n| n.items),
    ("contains", |n| n.contains),
    ("additionalProperties", |n| n.additional_properties),
    ("propertyNames", |n| n.property_names),
    ("if", |n| n.if_schema),
    ("then", |n| n.then_schema),
    ("else", |n| n.else_schema),
    ("not", |n| n.not_schema),
    ("contentSchema", |n| n.content_schema),
    ("unevaluatedItems", |n| n.unevaluated_items),
    ("unevaluatedProperties", |n| n.unevaluated_properties),
];

/// List-of-schemas slots, addressed by index.
const LIST_SLOTS: &[ListSlot] = &[
    ("prefixItems", |n| &n.prefix_items),
    ("allOf", |n| n.all_of.as_deref().unwrap_or(&[])),
    ("anyOf", |n| n.any_of.as_deref().unwrap_or(&[])),
    ("oneOf", |n| n.one_of.as_deref().unwrap_or(&[])),
];

/// Map-of-schemas slots, addressed by (escaped) key.
const MAP_SLOTS: &[MapSlot] = &[
    ("properties", |n| {
        n.properties.iter().map(|(k, v)| (k.as_str(), *v)).collect()
    }),
    ("patternProperties", |n| {
        n.pattern_properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.schema))
            .collect()
    }),
    ("dependentSchemas", |n| {
        n.dependent_schemas
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect()
    }),
    ("$defs", |n| {
        n.definitions.iter().map(|(k, v)| (k.as_str(), *v)).collect()
    }),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_set_insert_contains() {
        let mut set = TypeSet::EMPTY;
        assert!(set.is_empty());
        set.insert(ValueKind::Boolean);
        set.insert(ValueKind::String);
        assert!(set.contains(ValueKind::Boolean));
        assert!(set.contains(ValueKind::String));
        assert!(!set.contains(ValueKind::Null));
        assert_eq!(set.count(), 2);
    }

    #[test]
    fn test_type_set_kinds_have_distinct_bits() {
        let all: TypeSet = ValueKind::CANONICAL.into_iter().collect();
        assert_eq!(all.count(), 7);
    }

    #[test]
    fn test_trivial_nodes_are_mutually_exclusive() {
        let t = SchemaNode::trivial_true();
        let f = SchemaNode::trivial_false();
        assert!(t.is_trivial_true() && !t.is_trivial_false());
        assert!(f.is_trivial_false() && !f.is_trivial_true());
        assert!(t.diagnostics.is_empty());
        assert!(f.diagnostics.is_empty());
    }

    #[test]
    fn test_reference_locality() {
        let mut node = SchemaNode::default();
        node.static_reference = Some("#/$defs/foo".into());
        assert!(node.is_local_static_reference());
        assert!(!node.is_external_reference());

        let mut node = SchemaNode::default();
        node.dynamic_reference = Some("https://example.org/s.json#x".into());
        assert!(!node.is_local_dynamic_reference());
        assert!(node.is_external_reference());
    }

    #[test]
    fn test_immediate_children_order_and_addresses() {
        let mut node = SchemaNode::default();
        node.items = Some(NodeId(1));
        node.prefix_items = vec![NodeId(2), NodeId(3)];
        node.definitions.insert("a/b".into(), NodeId(4));

        let slots = node.immediate_children();
        let addresses: Vec<String> = slots.iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(
            addresses,
            vec!["/items", "/prefixItems/0", "/prefixItems/1", "/$defs/a~1b"]
        );
    }

    #[test]
    fn test_default_contains_floor() {
        let node = SchemaNode::default();
        assert_eq!(node.min_contains, 1);
    }
}
