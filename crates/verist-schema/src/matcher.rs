//! # The Matching Engine
//!
//! Decides whether a JSON instance satisfies a resolved schema graph.
//! Matching is recursive, side-effect-free, and never writes to a node,
//! so a resolved graph serves unlimited concurrent readers.
//!
//! Composition order per node: trivial verdicts, the resolved
//! reference, `if`/`then`/`else`, `allOf`/`anyOf`/`oneOf`, `not`, the
//! `const`/`enum` gate, then type dispatch. Dispatch tries every kind
//! in canonical order (array, boolean, integer, null, number, object,
//! string), restricted to the declared set when `type` is present, and
//! succeeds on the first kind whose value-kind check and kind-specific
//! constraints both pass.
//!
//! Array and object validation track which items/properties were
//! *evaluated* — matched by `prefixItems`/`items`/`contains` or
//! `properties`/`patternProperties`/`additionalProperties` — so that
//! `unevaluatedItems`/`unevaluatedProperties` apply exactly to the
//! rest.

use std::collections::HashSet;

use serde_json::{Map, Value};

use verist_core::{deep_equivalent, Severity, ValueKind};

use crate::error::MatchError;
use crate::graph::{NodeId, SchemaGraph};
use crate::node::SchemaNode;

/// Extra acceptance constraints consulted after all base checks pass.
///
/// This is the engine's only extension point. The hook is consulted
/// once per node whose base checks accepted the instance — never for
/// the trivial-true node, whose verdict cannot be overridden. The
/// default (no hook installed) simply confirms the match.
pub trait MatchHook: Send + Sync {
    /// Returns false to reject an instance the base checks accepted.
    fn accept(&self, node: &SchemaNode, instance: &Value) -> bool;
}

impl SchemaGraph {
    /// Decides whether `instance` satisfies the root schema.
    ///
    /// # Errors
    ///
    /// Matching a schema that is not ready is a caller contract
    /// violation, reported as a typed error rather than a verdict:
    /// [`MatchError::MalformedSchema`] when construction left error
    /// diagnostics, [`MatchError::ExternalReference`] when the graph
    /// contains references outside the document, and
    /// [`MatchError::UnresolvedReference`] until a successful
    /// [`resolve_local_references`](SchemaGraph::resolve_local_references).
    pub fn is_match(&self, instance: &Value) -> Result<bool, MatchError> {
        self.is_match_at(self.root, instance)
    }

    /// Decides whether `instance` satisfies the subschema at `id`.
    ///
    /// Preconditions are those of [`is_match`](SchemaGraph::is_match),
    /// applied to the subschema: its own diagnostics aggregate its
    /// descendants', and the ownership flags are transitive, so one
    /// check at the entry point covers the whole subtree.
    pub fn is_match_at(&self, id: NodeId, instance: &Value) -> Result<bool, MatchError> {
        let node = self.node(id);

        if node.diagnostics.has(Severity::Error) {
            return Err(MatchError::MalformedSchema);
        }
        if node.owns_external_references {
            return Err(MatchError::ExternalReference);
        }
        if node.owns_unresolved_local_references {
            return Err(MatchError::UnresolvedReference);
        }

        Ok(matches(&self.nodes, self.hook.as_deref(), id, instance))
    }
}

/// The unchecked recursive matcher.
///
/// Shared with the decoder, which validates `const`/`enum`/`examples`
/// against a node mid-construction and therefore cannot satisfy the
/// public preconditions.
pub(crate) fn matches(
    nodes: &[SchemaNode],
    hook: Option<&dyn MatchHook>,
    id: NodeId,
    instance: &Value,
) -> bool {
    let node = &nodes[id.0];

    if node.is_trivial_true() {
        return true;
    }
    if node.is_trivial_false() {
        return false;
    }

    if let Some(target) = node.resolved_reference {
        if !matches(nodes, hook, target, instance) {
            return false;
        }
    }

    if let Some(condition) = node.if_schema {
        if matches(nodes, hook, condition, instance) {
            if let Some(then_schema) = node.then_schema {
                if !matches(nodes, hook, then_schema, instance) {
                    return false;
                }
            }
        } else if let Some(else_schema) = node.else_schema {
            if !matches(nodes, hook, else_schema, instance) {
                return false;
            }
        }
    }

    if let Some(all_of) = &node.all_of {
        if !all_of.iter().all(|m| matches(nodes, hook, *m, instance)) {
            return false;
        }
    }

    if let Some(any_of) = &node.any_of {
        if !any_of.iter().any(|m| matches(nodes, hook, *m, instance)) {
            return false;
        }
    }

    if let Some(one_of) = &node.one_of {
        let hits = one_of
            .iter()
            .filter(|m| matches(nodes, hook, **m, instance))
            .count();
        if hits != 1 {
            return false;
        }
    }

    if let Some(negated) = node.not_schema {
        if matches(nodes, hook, negated, instance) {
            return false;
        }
    }

    if !is_permissible(node, instance) {
        return false;
    }

    for kind in ValueKind::CANONICAL {
        if !node.declared_type.is_empty() && !node.declared_type.contains(kind) {
            continue;
        }
        if !kind.accepts(instance) {
            continue;
        }
        if check_kind(nodes, hook, node, kind, instance) {
            return match hook {
                Some(hook) => hook.accept(node, instance),
                None => true,
            };
        }
    }

    false
}

/// The `const`/`enum` gate. A constant demands deep equivalence; a
/// permissible-value list demands membership, so an empty list rejects
/// every instance.
fn is_permissible(node: &SchemaNode, instance: &Value) -> bool {
    if let Some(constant) = &node.const_value {
        return deep_equivalent(instance, constant);
    }
    match &node.permissible_values {
        Some(values) => values.iter().any(|v| deep_equivalent(instance, v)),
        None => true,
    }
}

fn check_kind(
    nodes: &[SchemaNode],
    hook: Option<&dyn MatchHook>,
    node: &SchemaNode,
    kind: ValueKind,
    instance: &Value,
) -> bool {
    match kind {
        ValueKind::Null | ValueKind::Boolean => true,
        ValueKind::Integer | ValueKind::Number => match instance.as_f64() {
            Some(value) => check_numeric(node, value),
            None => false,
        },
        ValueKind::String => match instance.as_str() {
            Some(value) => check_string(node, value),
            None => false,
        },
        ValueKind::Array => match instance.as_array() {
            Some(items) => check_array(nodes, hook, node, items),
            None => false,
        },
        ValueKind::Object => match instance.as_object() {
            Some(members) => check_object(nodes, hook, node, instance, members),
            None => false,
        },
    }
}

fn check_numeric(node: &SchemaNode, value: f64) -> bool {
    if let Some(multiple) = node.multiple_of {
        if value % multiple != 0.0 {
            return false;
        }
    }

    if let Some((bound, exclusive)) = node.lower_bound() {
        if value < bound || (exclusive && value == bound) {
            return false;
        }
    }

    if let Some((bound, exclusive)) = node.upper_bound() {
        if value > bound || (exclusive && value == bound) {
            return false;
        }
    }

    true
}

fn check_string(node: &SchemaNode, value: &str) -> bool {
    // Length counts Unicode scalar values, not bytes.
    let length = value.chars().count() as u64;

    if length < node.min_length {
        return false;
    }
    if matches!(node.max_length, Some(max) if length > max) {
        return false;
    }
    match &node.pattern {
        Some(pattern) => pattern.is_match(value),
        None => true,
    }
}

fn check_array(
    nodes: &[SchemaNode],
    hook: Option<&dyn MatchHook>,
    node: &SchemaNode,
    items: &[Value],
) -> bool {
    let count = items.len() as u64;

    if count < node.min_items {
        return false;
    }
    if matches!(node.max_items, Some(max) if count > max) {
        return false;
    }

    if node.unique_items {
        for (i, item) in items.iter().enumerate() {
            if items[i + 1..].iter().any(|other| deep_equivalent(item, other)) {
                return false;
            }
        }
    }

    // Indices accounted for by prefixItems, items, or contains.
    let mut evaluated = vec![false; items.len()];

    for (index, child) in node.prefix_items.iter().enumerate() {
        let Some(item) = items.get(index) else { break };
        if !matches(nodes, hook, *child, item) {
            return false;
        }
        evaluated[index] = true;
    }

    if let Some(items_schema) = node.items {
        for index in node.prefix_items.len()..items.len() {
            if !matches(nodes, hook, items_schema, &items[index]) {
                return false;
            }
            evaluated[index] = true;
        }
    }

    if let Some(contains) = node.contains {
        let mut hits: u64 = 0;
        for (index, item) in items.iter().enumerate() {
            if matches(nodes, hook, contains, item) {
                evaluated[index] = true;
                hits += 1;
            }
        }
        if hits < node.min_contains {
            return false;
        }
        if matches!(node.max_contains, Some(max) if hits > max) {
            return false;
        }
    }

    if let Some(unevaluated) = node.unevaluated_items {
        for (index, item) in items.iter().enumerate() {
            if evaluated[index] {
                continue;
            }
            if !matches(nodes, hook, unevaluated, item) {
                return false;
            }
        }
    }

    true
}

fn check_object(
    nodes: &[SchemaNode],
    hook: Option<&dyn MatchHook>,
    node: &SchemaNode,
    instance: &Value,
    members: &Map<String, Value>,
) -> bool {
    let count = members.len() as u64;

    if count < node.min_properties {
        return false;
    }
    if matches!(node.max_properties, Some(max) if count > max) {
        return false;
    }

    for name in &node.required_property_names {
        if !members.contains_key(name) {
            return false;
        }
    }

    for (name, dependents) in &node.dependent_required {
        if members.contains_key(name) && !dependents.iter().all(|d| members.contains_key(d)) {
            return false;
        }
    }

    if let Some(property_names) = node.property_names {
        for name in members.keys() {
            let name_value = Value::String(name.clone());
            if !matches(nodes, hook, property_names, &name_value) {
                return false;
            }
        }
    }

    // Names accounted for by properties, patternProperties, or
    // additionalProperties.
    let mut evaluated: HashSet<&str> = HashSet::new();

    for (name, value) in members {
        if let Some(child) = node.properties.get(name) {
            if !matches(nodes, hook, *child, value) {
                return false;
            }
            evaluated.insert(name.as_str());
        }

        for property in node.pattern_properties.values() {
            let Some(regex) = &property.regex else { continue };
            if regex.is_match(name) {
                if !matches(nodes, hook, property.schema, value) {
                    return false;
                }
                evaluated.insert(name.as_str());
            }
        }
    }

    if let Some(additional) = node.additional_properties {
        for (name, value) in members {
            if evaluated.contains(name.as_str()) {
                continue;
            }
            if !matches(nodes, hook, additional, value) {
                return false;
            }
            evaluated.insert(name.as_str());
        }
    }

    // Dependent schemas constrain the whole object, not one member.
    for (name, schema) in &node.dependent_schemas {
        if members.contains_key(name) && !matches(nodes, hook, *schema, instance) {
            return false;
        }
    }

    if let Some(unevaluated) = node.unevaluated_properties {
        for (name, value) in members {
            if evaluated.contains(name.as_str()) {
                continue;
            }
            if !matches(nodes, hook, unevaluated, value) {
                return false;
            }
        }
    }

    true
}
