use serde_json::{Value, json};

use crate::spec::{ApiDocument, Schema, SchemaRegistry};

pub(super) const PETSTORE_V2: &str = include_str!("../../../fixtures/petstore_v2.json");
pub(super) const PETSTORE_V3: &str = include_str!("../../../fixtures/petstore_v3.json");
pub(super) const DEPLOYMENTS: &str = include_str!("../../../fixtures/deployments.json");

pub(super) fn document(raw: &str) -> ApiDocument {
  ApiDocument::from_value(serde_json::from_str(raw).expect("fixture is valid JSON")).expect("fixture is valid")
}

/// Registry over `definitions`, with every definition reachable as `#/definitions/<name>`.
pub(super) fn registry(definitions: Value) -> SchemaRegistry {
  let index: Vec<Value> = definitions
    .as_object()
    .expect("definitions must be an object")
    .keys()
    .map(|name| json!({ "$ref": format!("#/definitions/{name}") }))
    .collect();
  SchemaRegistry::from_document(&json!({ "definitions": definitions, "x-index": index })).unwrap()
}

pub(super) fn reference(pointer: &str) -> Schema {
  Schema::from(json!({ "$ref": pointer }))
}

pub(super) fn component(name: &str) -> Schema {
  reference(&format!("#/components/schemas/{name}"))
}
