use serde_json::json;

use super::support::{DEPLOYMENTS, PETSTORE_V3, document, registry};
use crate::generator::schema_graph::SchemaGraph;

#[test]
fn test_detect_cycles_in_fixture() {
  let document = document(DEPLOYMENTS);
  let cycles = SchemaGraph::from_registry(document.registry()).detect_cycles();
  assert_eq!(
    cycles,
    vec![
      vec!["Dependency".to_string()],
      vec!["Edge".to_string(), "Node".to_string()],
      vec!["ErrorResponse".to_string()],
    ]
  );
}

#[test]
fn test_acyclic_document_has_no_cycles() {
  let document = document(PETSTORE_V3);
  assert!(SchemaGraph::from_registry(document.registry()).detect_cycles().is_empty());
}

#[test]
fn test_cycles_through_all_of_and_items() {
  let registry = registry(json!({
    "Base": { "properties": { "children": { "type": "array", "items": { "$ref": "#/definitions/Derived" } } } },
    "Derived": { "allOf": [{ "$ref": "#/definitions/Base" }] },
    "Leaf": { "properties": { "base": { "$ref": "#/definitions/Base" } } }
  }));
  let cycles = SchemaGraph::from_registry(&registry).detect_cycles();
  assert_eq!(cycles, vec![vec!["Base".to_string(), "Derived".to_string()]]);
}
