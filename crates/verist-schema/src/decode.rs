//! # Non-Throwing Schema Decoder
//!
//! Turns an already-parsed `serde_json::Value` into a [`SchemaGraph`].
//! Decoding is total: a malformed fragment attaches error diagnostics
//! to the partially built node and never aborts siblings or parents.
//!
//! Construction is leaves-first. Child slots decode before the parent's
//! keyword blocks run, so a block initializer may reference children;
//! last of all the parent absorbs every child's diagnostics,
//! re-addressed under the owning slot.
//!
//! Each keyword block owns its diagnostics:
//!
//! - **core** — `$id`/`$schema`/`$ref`/`$anchor` shape rules, and the
//!   static-vs-dynamic reference exclusivity error;
//! - **applicator** — `patternProperties` keys must compile,
//!   `allOf`/`anyOf`/`oneOf` must be non-empty, inert `if`/`then`/
//!   `else` combinations warn;
//! - **validation** — sign/ordering rules for the numeric and size
//!   keywords, and the plain-vs-exclusive bound reconciliation warning.
//!
//! `const`, `enum`, and `examples` are validated against the node
//! itself with those three keywords temporarily cleared, so a value
//! never has to satisfy the constraint it is in the middle of defining.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use verist_core::{DiagnosticList, JsonPointer, ValueKind};

use crate::graph::{NodeId, SchemaGraph};
use crate::matcher;
use crate::node::{PatternProperty, SchemaNode, TypeSet};

impl SchemaGraph {
    /// Decodes a schema document into a graph.
    ///
    /// Total: the JSON literals `true`/`false` become the two trivial
    /// nodes, `null` and `{}` become the unconstrained node, and any
    /// other non-object value becomes a node carrying an error
    /// diagnostic. Inspect the root's diagnostics before resolving.
    pub fn decode(document: &Value) -> SchemaGraph {
        let mut decoder = Decoder { nodes: Vec::new() };
        let root = decoder.decode_value(document);
        SchemaGraph {
            nodes: decoder.nodes,
            root,
            hook: None,
        }
    }
}

struct Decoder {
    nodes: Vec<SchemaNode>,
}

impl Decoder {
    fn push(&mut self, node: SchemaNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn decode_value(&mut self, value: &Value) -> NodeId {
        match value {
            Value::Bool(true) => self.push(SchemaNode::trivial_true()),
            Value::Bool(false) => self.push(SchemaNode::trivial_false()),
            // A null schema constrains nothing, like the empty object.
            Value::Null => self.push(SchemaNode::default()),
            Value::Object(members) => self.decode_object(members),
            _ => {
                let mut node = SchemaNode::default();
                node.diagnostics.error("boolean or object expected");
                self.push(node)
            }
        }
    }

    fn decode_object(&mut self, members: &Map<String, Value>) -> NodeId {
        let mut node = SchemaNode::default();

        for (key, value) in members {
            self.decode_keyword(&mut node, key, value);
        }

        core_block(&mut node);
        applicator_block(&mut node);
        validation_block(&mut node);

        self.compute_ownership(&mut node);

        let id = self.push(node);
        self.validate_reflexive_values(id);
        self.aggregate_child_diagnostics(id);
        id
    }

    /// Dispatches a single member to its typed field. Unknown keys are
    /// ignored; deprecated keys are recognized and warn.
    fn decode_keyword(&mut self, node: &mut SchemaNode, key: &str, value: &Value) {
        let diags = &mut node.diagnostics;
        match key {
            // ─── Core identifiers ────────────────────────────────────
            "$id" => node.id_reference = expect_string(key, value, diags),
            "$schema" => node.schema_reference = expect_string(key, value, diags),
            "$comment" => node.comment = expect_string(key, value, diags),
            "$ref" => node.static_reference = expect_string(key, value, diags),
            "$anchor" => node.static_anchor = expect_string(key, value, diags),
            "$dynamicRef" => node.dynamic_reference = expect_string(key, value, diags),
            "$dynamicAnchor" => node.dynamic_anchor = expect_string(key, value, diags),
            "$vocabulary" => {
                if let Some(members) = expect_object(key, value, diags) {
                    for (uri, flag) in members {
                        match flag.as_bool() {
                            Some(required) => {
                                node.vocabulary.insert(uri.clone(), required);
                            }
                            None => diags.error_at(
                                "boolean expected",
                                JsonPointer::token(key).child(uri.as_str()),
                            ),
                        }
                    }
                }
            }
            "$defs" => {
                if let Some(members) = expect_object(key, value, diags) {
                    for (name, subschema) in members {
                        let child = self.decode_value(subschema);
                        node.definitions.insert(name.clone(), child);
                    }
                }
            }

            // ─── Type & value constraints ────────────────────────────
            "type" => node.declared_type = decode_type(value, diags),
            "const" => node.const_value = Some(value.clone()),
            "enum" => match value.as_array() {
                Some(values) => node.permissible_values = Some(values.clone()),
                None => diags.error_at("array expected", JsonPointer::token(key)),
            },
            "multipleOf" => node.multiple_of = expect_number(key, value, diags),
            "minimum" => node.minimum = expect_number(key, value, diags),
            "exclusiveMinimum" => node.exclusive_minimum = expect_number(key, value, diags),
            "maximum" => node.maximum = expect_number(key, value, diags),
            "exclusiveMaximum" => node.exclusive_maximum = expect_number(key, value, diags),
            "minLength" => node.min_length = expect_size(key, value, diags).unwrap_or(0),
            "maxLength" => node.max_length = expect_size(key, value, diags),
            "pattern" => node.pattern = decode_pattern(value, diags),
            "minItems" => node.min_items = expect_size(key, value, diags).unwrap_or(0),
            "maxItems" => node.max_items = expect_size(key, value, diags),
            "uniqueItems" => node.unique_items = expect_bool(key, value, diags).unwrap_or(false),
            "minContains" => node.min_contains = expect_size(key, value, diags).unwrap_or(1),
            "maxContains" => node.max_contains = expect_size(key, value, diags),
            "minProperties" => node.min_properties = expect_size(key, value, diags).unwrap_or(0),
            "maxProperties" => node.max_properties = expect_size(key, value, diags),
            "required" => node.required_property_names = decode_string_list(key, value, diags),
            "dependentRequired" => {
                if let Some(members) = expect_object(key, value, diags) {
                    for (name, list) in members {
                        let address = JsonPointer::token(key).child(name.as_str());
                        match list.as_array() {
                            Some(entries) => {
                                let mut names = Vec::with_capacity(entries.len());
                                for (i, entry) in entries.iter().enumerate() {
                                    match entry.as_str() {
                                        Some(s) => names.push(s.to_string()),
                                        None => diags.error_at(
                                            "string expected",
                                            address.child(i.to_string()),
                                        ),
                                    }
                                }
                                node.dependent_required.insert(name.clone(), names);
                            }
                            None => diags.error_at("string array expected", address),
                        }
                    }
                }
            }

            // ─── Applicators ─────────────────────────────────────────
            "prefixItems" => match value.as_array() {
                Some(entries) => {
                    node.prefix_items =
                        entries.iter().map(|v| self.decode_value(v)).collect();
                }
                None => diags.error_at("array expected", JsonPointer::token(key)),
            },
            "items" => node.items = Some(self.decode_value(value)),
            "contains" => node.contains = Some(self.decode_value(value)),
            "additionalProperties" => {
                node.additional_properties = Some(self.decode_value(value));
            }
            "properties" => {
                if let Some(members) = expect_object(key, value, diags) {
                    for (name, subschema) in members {
                        let child = self.decode_value(subschema);
                        node.properties.insert(name.clone(), child);
                    }
                }
            }
            "patternProperties" => {
                if let Some(members) = expect_object(key, value, diags) {
                    for (source, subschema) in members {
                        let child = self.decode_value(subschema);
                        node.pattern_properties.insert(
                            source.clone(),
                            PatternProperty {
                                regex: Regex::new(source).ok(),
                                schema: child,
                            },
                        );
                    }
                }
            }
            "dependentSchemas" => {
                if let Some(members) = expect_object(key, value, diags) {
                    for (name, subschema) in members {
                        let child = self.decode_value(subschema);
                        node.dependent_schemas.insert(name.clone(), child);
                    }
                }
            }
            "propertyNames" => node.property_names = Some(self.decode_value(value)),
            "if" => node.if_schema = Some(self.decode_value(value)),
            "then" => node.then_schema = Some(self.decode_value(value)),
            "else" => node.else_schema = Some(self.decode_value(value)),
            "allOf" => node.all_of = self.decode_schema_list(key, value, diags),
            "anyOf" => node.any_of = self.decode_schema_list(key, value, diags),
            "oneOf" => node.one_of = self.decode_schema_list(key, value, diags),
            "not" => node.not_schema = Some(self.decode_value(value)),
            "unevaluatedItems" => node.unevaluated_items = Some(self.decode_value(value)),
            "unevaluatedProperties" => {
                node.unevaluated_properties = Some(self.decode_value(value));
            }

            // ─── Content ─────────────────────────────────────────────
            "contentEncoding" => node.content_encoding = expect_string(key, value, diags),
            "contentMediaType" => node.content_media_type = expect_string(key, value, diags),
            "contentSchema" => node.content_schema = Some(self.decode_value(value)),

            // ─── Metadata ────────────────────────────────────────────
            "title" => node.title = expect_string(key, value, diags),
            "description" => node.description = expect_string(key, value, diags),
            "default" => node.default_value = Some(value.clone()),
            "deprecated" => node.deprecated = expect_bool(key, value, diags).unwrap_or(false),
            "readOnly" => node.read_only = expect_bool(key, value, diags).unwrap_or(false),
            "writeOnly" => node.write_only = expect_bool(key, value, diags).unwrap_or(false),
            "examples" => match value.as_array() {
                Some(values) => node.examples = values.clone(),
                None => diags.error_at("array expected", JsonPointer::token(key)),
            },
            "format" => node.format = expect_string(key, value, diags),

            // ─── Deprecated, recognized for the warning only ─────────
            "definitions" => diags.warning_at(
                "\"definitions\" has been replaced by \"$defs\"",
                JsonPointer::token(key),
            ),
            "dependencies" => diags.warning_at(
                "\"dependencies\" has been split into \"dependentSchemas\" and \"dependentRequired\"",
                JsonPointer::token(key),
            ),
            "$recursiveAnchor" => diags.warning_at(
                "\"$recursiveAnchor\" has been replaced by \"$dynamicAnchor\"",
                JsonPointer::token(key),
            ),
            "$recursiveRef" => diags.warning_at(
                "\"$recursiveRef\" has been replaced by \"$dynamicRef\"",
                JsonPointer::token(key),
            ),

            // Unknown keywords are ignored.
            _ => {}
        }
    }

    fn decode_schema_list(
        &mut self,
        key: &str,
        value: &Value,
        diags: &mut DiagnosticList,
    ) -> Option<Vec<NodeId>> {
        match value.as_array() {
            Some(entries) => Some(entries.iter().map(|v| self.decode_value(v)).collect()),
            None => {
                diags.error_at("array expected", JsonPointer::token(key));
                None
            }
        }
    }

    /// Folds the reference-ownership flags over the immediate children.
    /// Children are fully decoded at this point, so their flags are
    /// already transitive.
    fn compute_ownership(&self, node: &mut SchemaNode) {
        node.owns_local_static_references = node.is_local_static_reference();
        node.owns_local_dynamic_references = node.is_local_dynamic_reference();
        node.owns_external_references = node.is_external_reference();

        for (_, child) in node.immediate_children() {
            let child = &self.nodes[child.0];
            node.owns_local_static_references |= child.owns_local_static_references;
            node.owns_local_dynamic_references |= child.owns_local_dynamic_references;
            node.owns_external_references |= child.owns_external_references;
        }

        node.owns_unresolved_local_references =
            node.owns_local_static_references || node.owns_local_dynamic_references;
    }

    /// Validates `const`, `enum`, and `examples` against the node they
    /// sit on, with those keywords temporarily cleared.
    ///
    /// `const` is restored before `enum` is checked, so permissible
    /// values are also held to the constant. A node that owns any
    /// reference skips the self-validation: it cannot be evaluated
    /// before resolution.
    fn validate_reflexive_values(&mut self, id: NodeId) {
        let (const_value, permissible_values, examples, skip) = {
            let node = &mut self.nodes[id.0];
            let skip = node.owns_local_static_references
                || node.owns_local_dynamic_references
                || node.owns_external_references;
            (
                node.const_value.take(),
                node.permissible_values.take(),
                std::mem::take(&mut node.examples),
                skip,
            )
        };

        let mut found = DiagnosticList::new();

        if let Some(constant) = &const_value {
            if !skip && !matcher::matches(&self.nodes, None, id, constant) {
                found.error_at(
                    format!("constant value {constant} does not pass schema validation"),
                    JsonPointer::token("const"),
                );
            }
        }
        self.nodes[id.0].const_value = const_value;

        if let Some(values) = &permissible_values {
            if !skip {
                for value in values {
                    if !matcher::matches(&self.nodes, None, id, value) {
                        found.error_at(
                            format!("permissible value {value} does not pass schema validation"),
                            JsonPointer::token("enum"),
                        );
                    }
                }
            }
        }
        self.nodes[id.0].permissible_values = permissible_values;

        {
            let node = &self.nodes[id.0];
            // Non-empty lists were just held to the constant entry-wise.
            if node.const_value.is_some()
                && matches!(&node.permissible_values, Some(values) if values.is_empty())
            {
                found.error_at(
                    "constant value is not present in the permissible value list",
                    JsonPointer::token("enum"),
                );
            }
        }

        if !skip {
            for example in &examples {
                if !matcher::matches(&self.nodes, None, id, example) {
                    found.error_at(
                        format!("example {example} does not pass schema validation"),
                        JsonPointer::token("examples"),
                    );
                }
            }
        }
        self.nodes[id.0].examples = examples;

        for diagnostic in found.into_inner() {
            self.nodes[id.0].diagnostics.push(diagnostic);
        }
    }

    /// Absorbs every immediate child's diagnostics, re-addressed under
    /// the child's slot. Children have already absorbed theirs, so the
    /// parent ends up with the whole subtree's findings.
    fn aggregate_child_diagnostics(&mut self, id: NodeId) {
        let slots = self.nodes[id.0].immediate_children();
        let mut absorbed = DiagnosticList::new();
        for (slot, child) in slots {
            absorbed.absorb_prefixed(&self.nodes[child.0].diagnostics, &slot);
        }
        for diagnostic in absorbed.into_inner() {
            self.nodes[id.0].diagnostics.push(diagnostic);
        }
    }
}

// ─── Keyword value extraction ────────────────────────────────────────

fn expect_string(key: &str, value: &Value, diags: &mut DiagnosticList) -> Option<String> {
    match value.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            diags.error_at("string expected", JsonPointer::token(key));
            None
        }
    }
}

fn expect_bool(key: &str, value: &Value, diags: &mut DiagnosticList) -> Option<bool> {
    match value.as_bool() {
        Some(b) => Some(b),
        None => {
            diags.error_at("boolean expected", JsonPointer::token(key));
            None
        }
    }
}

fn expect_number(key: &str, value: &Value, diags: &mut DiagnosticList) -> Option<f64> {
    match value.as_f64() {
        Some(n) => Some(n),
        None => {
            diags.error_at("number expected", JsonPointer::token(key));
            None
        }
    }
}

fn expect_size(key: &str, value: &Value, diags: &mut DiagnosticList) -> Option<u64> {
    match value.as_u64() {
        Some(n) => Some(n),
        None => {
            diags.error_at("non-negative integer expected", JsonPointer::token(key));
            None
        }
    }
}

fn expect_object<'a>(
    key: &str,
    value: &'a Value,
    diags: &mut DiagnosticList,
) -> Option<&'a Map<String, Value>> {
    match value.as_object() {
        Some(members) => Some(members),
        None => {
            diags.error_at("object expected", JsonPointer::token(key));
            None
        }
    }
}

fn decode_string_list(key: &str, value: &Value, diags: &mut DiagnosticList) -> Vec<String> {
    match value.as_array() {
        Some(entries) => {
            let mut out = Vec::with_capacity(entries.len());
            for (i, entry) in entries.iter().enumerate() {
                match entry.as_str() {
                    Some(s) => out.push(s.to_string()),
                    None => diags.error_at(
                        "string expected",
                        JsonPointer::token(key).child(i.to_string()),
                    ),
                }
            }
            out
        }
        None => {
            diags.error_at("string array expected", JsonPointer::token(key));
            Vec::new()
        }
    }
}

fn decode_type(value: &Value, diags: &mut DiagnosticList) -> TypeSet {
    let mut set = TypeSet::EMPTY;
    match value {
        Value::String(name) => match ValueKind::from_name(name) {
            Some(kind) => set.insert(kind),
            None => diags.error_at("type name not recognized", JsonPointer::token("type")),
        },
        Value::Array(entries) => {
            for (i, entry) in entries.iter().enumerate() {
                let address = JsonPointer::token("type").child(i.to_string());
                match entry.as_str() {
                    Some(name) => match ValueKind::from_name(name) {
                        Some(kind) => set.insert(kind),
                        None => diags.error_at("type name not recognized", address),
                    },
                    None => diags.error_at("string expected", address),
                }
            }
        }
        _ => diags.error_at("string or array expected", JsonPointer::token("type")),
    }
    set
}

fn decode_pattern(value: &Value, diags: &mut DiagnosticList) -> Option<Regex> {
    match value.as_str() {
        Some(source) => match Regex::new(source) {
            Ok(regex) => Some(regex),
            Err(_) => {
                diags.error_at("regular expression expected", JsonPointer::token("pattern"));
                None
            }
        },
        None => {
            diags.error_at("string expected", JsonPointer::token("pattern"));
            None
        }
    }
}

// ─── Keyword blocks ──────────────────────────────────────────────────

fn id_fragment_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^[^#]*#?$").expect("literal regex"))
}

fn anchor_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^[A-Za-z_][-A-Za-z0-9._]*$").expect("literal regex"))
}

fn absolute_uri_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^[A-Za-z][A-Za-z0-9+.-]*:").expect("literal regex"))
}

/// A URI or relative reference cannot contain whitespace.
fn has_uri_reference_shape(value: &str) -> bool {
    !value.chars().any(char::is_whitespace)
}

/// `$id`/`$schema`/anchor/reference shape rules.
fn core_block(node: &mut SchemaNode) {
    let diags = &mut node.diagnostics;

    if let Some(id) = &node.id_reference {
        if !has_uri_reference_shape(id) {
            diags.error_at("URI or relative reference expected", JsonPointer::token("$id"));
        }
        if !id_fragment_shape().is_match(id) {
            diags.error_at("non-empty fragments are not allowed", JsonPointer::token("$id"));
        }
    }

    if let Some(schema) = &node.schema_reference {
        if !has_uri_reference_shape(schema) || !absolute_uri_shape().is_match(schema) {
            diags.error_at("absolute URI expected", JsonPointer::token("$schema"));
        }
    }

    if let Some(reference) = &node.static_reference {
        if !has_uri_reference_shape(reference) {
            diags.error_at("URI or relative reference expected", JsonPointer::token("$ref"));
        }
    }

    if let Some(reference) = &node.dynamic_reference {
        if !has_uri_reference_shape(reference) {
            diags.error_at(
                "URI or relative reference expected",
                JsonPointer::token("$dynamicRef"),
            );
        }
    }

    if node.static_reference.is_some() && node.dynamic_reference.is_some() {
        diags.error_at(
            "a schema cannot hold both \"$ref\" and \"$dynamicRef\"",
            JsonPointer::token("$dynamicRef"),
        );
    }

    if let Some(anchor) = &node.static_anchor {
        if !anchor_shape().is_match(anchor) {
            diags.error_at("invalid anchor name", JsonPointer::token("$anchor"));
        }
    }

    if let Some(anchor) = &node.dynamic_anchor {
        if !anchor_shape().is_match(anchor) {
            diags.error_at("invalid anchor name", JsonPointer::token("$dynamicAnchor"));
        }
    }

    for uri in node.vocabulary.keys() {
        if !has_uri_reference_shape(uri) {
            diags.error_at(
                "URI or relative reference expected",
                JsonPointer::token("$vocabulary").child(uri.clone()),
            );
        }
    }
}

/// Applicator consistency rules.
fn applicator_block(node: &mut SchemaNode) {
    let mut found = DiagnosticList::new();

    for (source, property) in &node.pattern_properties {
        if property.regex.is_none() {
            found.error_at(
                "regular expression expected",
                JsonPointer::token("patternProperties").child(source.clone()),
            );
        }
    }

    for (key, list) in [
        ("allOf", &node.all_of),
        ("anyOf", &node.any_of),
        ("oneOf", &node.one_of),
    ] {
        if matches!(list, Some(entries) if entries.is_empty()) {
            found.error_at("at least one item expected", JsonPointer::token(key));
        }
    }

    let has_if = node.if_schema.is_some();
    let has_then = node.then_schema.is_some();
    let has_else = node.else_schema.is_some();

    if !has_if && (has_then || has_else) {
        found.warning("\"then\" and \"else\" are ignored when \"if\" is not present");
    }
    if has_if && !has_then && !has_else {
        found.warning("\"if\" has no effect without \"then\" or \"else\"");
    }

    for diagnostic in found.into_inner() {
        node.diagnostics.push(diagnostic);
    }
}

/// Sign, ordering, and reconciliation rules for the validation keywords.
fn validation_block(node: &mut SchemaNode) {
    let mut found = DiagnosticList::new();

    if let Some(multiple) = node.multiple_of {
        if multiple <= 0.0 {
            found.error_at("positive number expected", JsonPointer::token("multipleOf"));
        }
    }

    // When both the plain and the exclusive bound are present, the more
    // restrictive one wins silently; the loser earns exactly one warning.
    if let (Some(minimum), Some(exclusive)) = (node.minimum, node.exclusive_minimum) {
        if minimum > exclusive {
            found.warning("\"exclusiveMinimum\" is ignored because \"minimum\" is more restrictive");
        } else {
            found.warning("\"minimum\" is ignored because \"exclusiveMinimum\" is more restrictive");
        }
    }

    if let (Some(maximum), Some(exclusive)) = (node.maximum, node.exclusive_maximum) {
        if maximum < exclusive {
            found.warning("\"exclusiveMaximum\" is ignored because \"maximum\" is more restrictive");
        } else {
            found.warning("\"maximum\" is ignored because \"exclusiveMaximum\" is more restrictive");
        }
    }

    if let (Some((lower, lower_exclusive)), Some((upper, upper_exclusive))) =
        (node.lower_bound(), node.upper_bound())
    {
        if lower > upper {
            found.error("lower bound cannot exceed upper bound");
        } else if lower == upper && (lower_exclusive || upper_exclusive) {
            found.error("bounds admit no values");
        }
    }

    for (pair, maximum, minimum) in [
        ("\"maxLength\" cannot be less than \"minLength\"", node.max_length, node.min_length),
        ("\"maxItems\" cannot be less than \"minItems\"", node.max_items, node.min_items),
        (
            "\"maxProperties\" cannot be less than \"minProperties\"",
            node.max_properties,
            node.min_properties,
        ),
    ] {
        if matches!(maximum, Some(max) if max < minimum) {
            found.error(pair);
        }
    }

    if node.max_contains.is_some() && node.contains.is_none() {
        found.warning("\"maxContains\" is ignored when \"contains\" is not present");
    }
    if node.min_contains > 1 && node.contains.is_none() {
        found.warning("\"minContains\" is ignored when \"contains\" is not present");
    }
    if matches!(node.max_contains, Some(max) if max < node.min_contains) {
        found.error("\"maxContains\" cannot be less than \"minContains\"");
    }

    if !is_pairwise_distinct(&node.required_property_names) {
        found.error_at("distinct items expected", JsonPointer::token("required"));
    }

    for (name, dependents) in &node.dependent_required {
        if !is_pairwise_distinct(dependents) {
            found.error_at(
                "distinct items expected",
                JsonPointer::token("dependentRequired").child(name.clone()),
            );
        }
    }

    for diagnostic in found.into_inner() {
        node.diagnostics.push(diagnostic);
    }
}

fn is_pairwise_distinct(names: &[String]) -> bool {
    for (i, name) in names.iter().enumerate() {
        if names[i + 1..].contains(name) {
            return false;
        }
    }
    true
}
