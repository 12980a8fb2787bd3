//! End-to-end conformance suite: decode → resolve → match, exercising
//! the public surface the way a request-validation caller would.

use serde_json::{json, Value};
use verist_schema::{MatchError, ResolveError, SchemaGraph, Severity};

/// Decodes and resolves, panicking on any failure. For schemas that are
/// expected to be fully usable.
fn ready(schema: Value) -> SchemaGraph {
    let graph = SchemaGraph::decode(&schema);
    assert!(
        !graph.root_node().diagnostics.has(Severity::Error),
        "unexpected construction errors:\n{}",
        graph.root_node().diagnostics
    );
    let mut graph = graph;
    graph.resolve_local_references().expect("resolution failed");
    graph
}

fn accepts(graph: &SchemaGraph, instance: Value) -> bool {
    graph.is_match(&instance).expect("schema should be usable")
}

#[test]
fn bare_boolean_schemas_are_trivial() {
    let graph = SchemaGraph::decode(&json!(true));
    assert!(graph.root_node().is_trivial_true());
    assert!(!graph.root_node().is_trivial_false());
    assert!(graph.root_node().diagnostics.is_empty());

    let graph = SchemaGraph::decode(&json!(false));
    assert!(graph.root_node().is_trivial_false());
    assert!(!graph.root_node().is_trivial_true());
    assert!(graph.root_node().diagnostics.is_empty());
}

#[test]
fn empty_enum_matches_nothing() {
    let graph = ready(json!({ "enum": [] }));
    for instance in [json!(17), json!(2.9), json!(""), json!(null), json!(false)] {
        assert!(!accepts(&graph, instance));
    }
}

#[test]
fn minimum_seventeen() {
    let graph = ready(json!({ "minimum": 17 }));
    assert!(accepts(&graph, json!(17)));
    assert!(accepts(&graph, json!(17.0)));
    assert!(accepts(&graph, json!(18)));
    assert!(!accepts(&graph, json!(16)));
    assert!(!accepts(&graph, json!(16.9)));
}

#[test]
fn exclusive_maximum_twenty_nine() {
    let graph = ready(json!({ "exclusiveMaximum": 29 }));
    assert!(accepts(&graph, json!(28)));
    assert!(accepts(&graph, json!(28.9)));
    assert!(!accepts(&graph, json!(29)));
    assert!(!accepts(&graph, json!(29.0)));
    assert!(!accepts(&graph, json!(30)));
}

#[test]
fn bound_pair_reconciles_with_exactly_one_warning() {
    let graph = SchemaGraph::decode(&json!({ "minimum": 3, "exclusiveMinimum": 5 }));
    let root = graph.root_node();
    assert_eq!(root.diagnostics.count(Severity::Warning), 1);
    assert!(!root.diagnostics.has(Severity::Error));

    let mut graph = graph;
    graph.resolve_local_references().unwrap();
    // The effective bound is the exclusive one.
    assert!(!graph.is_match(&json!(5)).unwrap());
    assert!(graph.is_match(&json!(6)).unwrap());
}

#[test]
fn defs_from_false_and_null_decode_as_two_children() {
    let graph = SchemaGraph::decode(&json!({ "$defs": { "foo": false, "bar": null } }));
    let root = graph.root_node();
    assert_eq!(root.definitions.len(), 2);
    assert!(!root.diagnostics.has(Severity::Error));
}

#[test]
fn pointer_reference_is_identical_to_definition() {
    let mut graph = SchemaGraph::decode(&json!({
        "$defs": { "foo": false },
        "items": { "$ref": "#/$defs/foo" }
    }));
    graph.resolve_local_references().unwrap();

    let root = graph.root_node();
    let items = root.items.expect("items slot");
    let foo = *root.definitions.get("foo").expect("foo definition");
    assert_eq!(graph.node(items).resolved_reference, Some(foo));
}

#[test]
fn anchored_reference_is_identical_to_definition() {
    let mut graph = SchemaGraph::decode(&json!({
        "$defs": { "foo": { "$anchor": "bar" } },
        "items": { "$ref": "#bar" }
    }));
    graph.resolve_local_references().unwrap();

    let root = graph.root_node();
    let items = root.items.expect("items slot");
    let foo = *root.definitions.get("foo").expect("foo definition");
    assert_eq!(graph.node(items).resolved_reference, Some(foo));
}

#[test]
fn reference_cycles_fail_resolution_and_leave_no_edges() {
    // Length-0 self-reference.
    let mut graph = SchemaGraph::decode(&json!({
        "$defs": { "foo": { "$ref": "#/$defs/foo" } }
    }));
    let err = graph.resolve_local_references().unwrap_err();
    assert!(matches!(err, ResolveError::ResolutionFailed(_)));
    let foo = *graph.root_node().definitions.get("foo").unwrap();
    assert_eq!(graph.node(foo).resolved_reference, None);

    // Length-2 cycle.
    let mut graph = SchemaGraph::decode(&json!({
        "$defs": {
            "foo": { "$ref": "#/$defs/bar" },
            "bar": { "$ref": "#/$defs/foo" }
        }
    }));
    assert!(graph.resolve_local_references().is_err());
    for name in ["foo", "bar"] {
        let id = *graph.root_node().definitions.get(name).unwrap();
        assert_eq!(graph.node(id).resolved_reference, None);
    }
}

#[test]
fn invalid_pattern_property_key_makes_schema_unusable() {
    let graph = SchemaGraph::decode(&json!({
        "patternProperties": { "invalid (( pattern": true }
    }));
    assert!(graph.root_node().diagnostics.has(Severity::Error));
    assert_eq!(graph.is_match(&json!({})), Err(MatchError::MalformedSchema));
}

#[test]
fn resolution_is_idempotent_and_duplicates_nothing() {
    let mut graph = SchemaGraph::decode(&json!({
        "$defs": { "foo": {} },
        "items": { "$ref": "#/$defs/foo" }
    }));
    graph.resolve_local_references().unwrap();
    let before = graph.root_node().diagnostics.len();
    graph.resolve_local_references().unwrap();
    assert_eq!(graph.root_node().diagnostics.len(), before);
}

#[test]
fn warnings_never_block_matching() {
    // Deprecated keyword plus an inert conditional: two warnings, zero
    // errors, fully usable.
    let graph = SchemaGraph::decode(&json!({
        "definitions": { "old": {} },
        "then": { "type": "string" },
        "type": "integer"
    }));
    let root = graph.root_node();
    assert!(root.diagnostics.has(Severity::Warning));
    assert!(!root.diagnostics.has(Severity::Error));

    let mut graph = graph;
    graph.resolve_local_references().unwrap();
    assert!(graph.is_match(&json!(5)).unwrap());
    assert!(!graph.is_match(&json!("five")).unwrap());
}

#[test]
fn request_validation_round_trip() {
    // The shape of a realistic request body schema, exercising object
    // dispatch, references, and unevaluated tracking together.
    let graph = ready(json!({
        "type": "object",
        "required": ["kind", "payload"],
        "properties": {
            "kind": { "enum": ["create", "update"] },
            "payload": { "$ref": "#/$defs/payload" },
            "tags": {
                "type": "array",
                "uniqueItems": true,
                "items": { "type": "string", "pattern": "^[a-z][a-z0-9-]*$" }
            }
        },
        "additionalProperties": false,
        "$defs": {
            "payload": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": { "type": "string", "minLength": 1, "maxLength": 64 },
                    "weight": { "type": "number", "exclusiveMinimum": 0 }
                }
            }
        }
    }));

    assert!(accepts(
        &graph,
        json!({
            "kind": "create",
            "payload": { "name": "rotor", "weight": 2.5 },
            "tags": ["alpha", "heavy-duty"]
        })
    ));

    // Unknown top-level member.
    assert!(!accepts(
        &graph,
        json!({ "kind": "create", "payload": { "name": "rotor" }, "extra": 1 })
    ));
    // Bad enum member.
    assert!(!accepts(
        &graph,
        json!({ "kind": "delete", "payload": { "name": "rotor" } })
    ));
    // Referenced payload constraints apply.
    assert!(!accepts(
        &graph,
        json!({ "kind": "update", "payload": { "name": "" } })
    ));
    // Duplicate tags.
    assert!(!accepts(
        &graph,
        json!({
            "kind": "update",
            "payload": { "name": "rotor" },
            "tags": ["a", "a"]
        })
    ));
}

#[test]
fn resolved_graph_is_shareable_across_threads() {
    let graph = ready(json!({
        "type": "object",
        "properties": { "n": { "type": "integer", "minimum": 0 } }
    }));

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let graph = &graph;
            scope.spawn(move || {
                for i in 0..100 {
                    let verdict = graph
                        .is_match(&json!({ "n": worker * 100 + i }))
                        .expect("usable schema");
                    assert!(verdict);
                }
            });
        }
    });
}

#[test]
fn diagnostics_address_every_offender_in_one_pass() {
    let graph = SchemaGraph::decode(&json!({
        "properties": {
            "a": { "pattern": "((" },
            "b": { "allOf": [] }
        },
        "items": { "minLength": -1 }
    }));

    let addresses: Vec<String> = graph
        .root_node()
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .filter_map(|d| d.address.as_ref().map(ToString::to_string))
        .collect();

    for expected in ["/properties/a/pattern", "/properties/b/allOf", "/items/minLength"] {
        assert!(
            addresses.contains(&expected.to_string()),
            "missing {expected}, got {addresses:?}"
        );
    }
}
