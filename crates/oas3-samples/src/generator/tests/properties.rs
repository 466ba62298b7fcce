use serde_json::json;

use super::support::{reference, registry};
use crate::{
  generator::properties::PropertyResolver,
  spec::{Schema, SchemaRegistry, SchemaType},
};

#[test]
fn test_direct_properties_come_first_and_win() {
  let registry = registry(json!({
    "Base": {
      "properties": {
        "id": { "type": "string" },
        "name": { "type": "integer" }
      }
    },
    "Derived": {
      "allOf": [{ "$ref": "#/definitions/Base" }],
      "properties": {
        "name": { "type": "string" },
        "extra": { "type": "boolean" }
      }
    }
  }));
  let derived = reference("#/definitions/Derived");
  let resolver = PropertyResolver::new(&registry);

  let properties = resolver.resolve_properties(&derived);
  let names: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
  assert_eq!(names, ["name", "extra", "id"]);
  assert_eq!(properties[0].1.schema_type, Some(SchemaType::String));
}

#[test]
fn test_only_first_all_of_entry_is_merged() {
  let registry = SchemaRegistry::default();
  let schema = Schema::from(json!({
    "allOf": [
      { "properties": { "first": { "type": "string" } } },
      { "properties": { "second": { "type": "string" } } }
    ]
  }));
  let properties = PropertyResolver::new(&registry).resolve_properties(&schema);
  let names: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
  assert_eq!(names, ["first"]);
}

#[test]
fn test_all_of_chains_are_followed() {
  let registry = registry(json!({
    "A": { "allOf": [{ "$ref": "#/definitions/B" }], "properties": { "a": { "type": "string" } } },
    "B": { "allOf": [{ "$ref": "#/definitions/C" }] },
    "C": { "properties": { "c": { "type": "number" } } }
  }));
  let schema = reference("#/definitions/A");
  let properties = PropertyResolver::new(&registry).resolve_properties(&schema);
  let names: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
  assert_eq!(names, ["a", "c"]);
}

#[test]
fn test_self_inheriting_schema_terminates() {
  let registry = registry(json!({
    "Loop": { "allOf": [{ "$ref": "#/definitions/Loop" }], "properties": { "x": { "type": "string" } } }
  }));
  let schema = reference("#/definitions/Loop");
  let properties = PropertyResolver::new(&registry).resolve_properties(&schema);
  assert_eq!(properties.len(), 1);
}

#[test]
fn test_has_properties() {
  let registry = registry(json!({
    "Thing": { "type": "object", "properties": { "id": { "type": "string" } } }
  }));
  let resolver = PropertyResolver::new(&registry);

  let empty = Schema::default();
  let bare_object = Schema::from(json!({ "type": "object" }));
  let thing = reference("#/definitions/Thing");
  let dangling = reference("#/definitions/Missing");
  assert!(!resolver.has_properties(&empty));
  assert!(!resolver.has_properties(&bare_object));
  assert!(!resolver.has_properties(&dangling));
  assert!(resolver.has_properties(&thing));
}
