use std::sync::Arc;

use serde_json::json;

use super::support::{DEPLOYMENTS, PETSTORE_V3, component, document};
use crate::{
  generator::{
    CycleGuard,
    model::{FieldType, ModelDeclaration, ModelField, ModelSynthesizer},
  },
  naming::{EnglishSingularizer, Singularize},
  spec::{Schema, SchemaRegistry, SchemaType, UnsupportedConstruct},
};

fn english() -> Arc<dyn Singularize> {
  Arc::new(EnglishSingularizer)
}

fn field(name: &str, field_type: FieldType) -> ModelField {
  ModelField {
    name: name.to_string(),
    field_type,
  }
}

fn named(name: &str) -> FieldType {
  FieldType::Named(name.to_string())
}

fn list(element: FieldType) -> FieldType {
  FieldType::List(Box::new(element))
}

fn names(model: &ModelDeclaration) -> Vec<&str> {
  model.flatten().into_iter().map(|declaration| declaration.name.as_str()).collect()
}

#[test]
fn test_model_for_mixed_properties() {
  let registry = SchemaRegistry::default();
  let schema = Schema::from(json!({
    "properties": {
      "name": { "type": "string" },
      "tags": { "type": "object" },
      "providers": { "type": "array", "items": { "properties": { "id": { "type": "string" } } } }
    }
  }));
  let model = ModelSynthesizer::new(&registry, CycleGuard::Structural, english())
    .synthesize(&schema, "Deployment")
    .output;

  assert_eq!(
    model,
    ModelDeclaration {
      name: "Deployment".to_string(),
      fields: vec![
        field("name", FieldType::Primitive(SchemaType::String)),
        field("tags", FieldType::Object),
        field("providers", list(named("Provider"))),
      ],
      nested: vec![ModelDeclaration {
        name: "Provider".to_string(),
        fields: vec![field("id", FieldType::Primitive(SchemaType::String))],
        nested: Vec::new(),
      }],
    }
  );
}

#[test]
fn test_explicit_object_fields_are_not_declared() {
  let registry = SchemaRegistry::default();
  let schema = Schema::from(json!({
    "properties": {
      "settings": { "type": "object", "properties": { "level": { "type": "string" } } },
      "entries": {
        "type": "array",
        "items": { "type": "object", "properties": { "key": { "type": "string" } } }
      },
      "labels": {
        "type": "array",
        "items": { "type": "string", "properties": { "ignored": { "type": "integer" } } }
      }
    }
  }));
  let model = ModelSynthesizer::new(&registry, CycleGuard::Structural, english())
    .synthesize(&schema, "Config_Get")
    .output;

  assert_eq!(
    model.fields,
    vec![
      field("settings", FieldType::Object),
      field("entries", list(named("Entry"))),
      field("labels", list(FieldType::Primitive(SchemaType::String))),
    ]
  );
  assert_eq!(names(&model), ["Entry", "Config_Get"]);
}

#[test]
fn test_class_names_are_unique_within_a_model() {
  let registry = SchemaRegistry::default();
  let schema = Schema::from(json!({
    "properties": {
      "tags": { "properties": { "a": { "type": "string" } } },
      "nodes": {
        "type": "array",
        "items": {
          "properties": {
            "nodes": { "type": "array", "items": { "properties": { "id": { "type": "string" } } } }
          }
        }
      },
      "owner": { "properties": { "name": { "type": "string" } } },
      "owners": { "type": "array", "items": { "properties": { "email": { "type": "string" } } } }
    }
  }));
  let model = ModelSynthesizer::new(&registry, CycleGuard::Structural, english())
    .synthesize(&schema, "tags")
    .output;

  assert_eq!(model.name, "Tags");
  assert_eq!(
    model.fields,
    vec![
      field("tags", named("Tags2")),
      field("nodes", list(named("Node"))),
      field("owner", named("Owner")),
      field("owners", list(named("Owner2"))),
    ]
  );
  let node = model.nested.iter().find(|nested| nested.name == "Node").unwrap();
  assert_eq!(node.fields, vec![field("nodes", list(named("Node2")))]);
  assert_eq!(names(&model), ["Tags2", "Owner", "Node2", "Node", "Owner2", "Tags"]);
}

#[test]
fn test_recursion_into_a_renamed_class_refers_to_the_renamed_class() {
  let document = document(DEPLOYMENTS);
  let root = component("DeploymentExtended");
  let model = ModelSynthesizer::new(document.registry(), CycleGuard::Structural, english())
    .synthesize(&root, "Error")
    .output;

  let properties = &model.nested[0];
  assert_eq!(properties.fields[3], field("error", named("Error2")));
  let error = properties.nested.iter().find(|nested| nested.name == "Error2").unwrap();
  assert_eq!(error.fields[2], field("details", list(named("Error2"))));
}

#[test]
fn test_model_keeps_read_only_fields_and_orders_nested_declarations() {
  let document = document(PETSTORE_V3);
  let root = component("Pet");
  let model = ModelSynthesizer::new(document.registry(), CycleGuard::Structural, english())
    .synthesize(&root, "Pets_Get")
    .output;

  let fields: Vec<&str> = model.fields.iter().map(|field| field.name.as_str()).collect();
  assert_eq!(
    fields,
    ["id", "name", "tag", "vaccinated", "weight", "owner", "photoUrls", "toys", "metadata"]
  );
  assert_eq!(model.fields[0].field_type, FieldType::Primitive(SchemaType::Integer));
  assert_eq!(model.fields[4].field_type, FieldType::Primitive(SchemaType::Number));
  assert_eq!(model.fields[5].field_type, named("Owner"));
  assert_eq!(model.fields[6].field_type, list(FieldType::Primitive(SchemaType::String)));
  assert_eq!(model.fields[7].field_type, list(named("Toy")));
  assert_eq!(model.fields[8].field_type, FieldType::Object);

  assert_eq!(names(&model), ["Owner", "Toy", "Pets_Get"]);
}

#[test]
fn test_model_edge_cases() {
  let registry = SchemaRegistry::default();
  let schema = Schema::from(json!({
    "properties": {
      "mystery": { "description": "skipped" },
      "nothing": { "type": "null" },
      "bare": { "type": "array" },
      "blobs": { "type": "array", "items": { "type": "object" } },
      "matrix": { "type": "array", "items": { "type": "array", "items": { "type": "integer" } } },
      "flags": { "type": "array", "items": { "type": "boolean" } }
    }
  }));
  let model = ModelSynthesizer::new(&registry, CycleGuard::Structural, english())
    .synthesize(&schema, "things_list")
    .output;

  assert_eq!(model.name, "Things_list");
  assert_eq!(
    model.fields,
    vec![
      field("nothing", FieldType::Any),
      field("bare", list(FieldType::Any)),
      field("blobs", list(FieldType::Any)),
      field("matrix", list(list(FieldType::Primitive(SchemaType::Integer)))),
      field("flags", list(FieldType::Primitive(SchemaType::Boolean))),
    ]
  );
  assert!(model.nested.is_empty());
}

#[test]
fn test_self_reference_under_structural_guard() {
  let document = document(DEPLOYMENTS);
  let root = component("ErrorResponse");
  let synthesis = ModelSynthesizer::new(document.registry(), CycleGuard::Structural, english())
    .synthesize(&root, "Operations_GetError");

  let model = synthesis.output;
  assert_eq!(model.fields[2], field("details", list(FieldType::Root)));
  assert!(model.nested.is_empty());
  assert_eq!(synthesis.report.cycles_cut, 1);
}

#[test]
fn test_self_reference_under_named_guard() {
  let document = document(DEPLOYMENTS);
  let root = component("ErrorResponse");
  let model = ModelSynthesizer::new(document.registry(), CycleGuard::Named, english())
    .synthesize(&root, "Operations_GetError")
    .output;

  assert_eq!(model.fields[2], field("details", list(named("Detail"))));
  assert_eq!(names(&model), ["Detail", "Operations_GetError"]);
  let detail = &model.nested[0];
  assert_eq!(detail.fields[2], field("details", list(named("Detail"))));
  assert!(detail.nested.is_empty());
}

#[test]
fn test_mutual_recursion_under_structural_guard() {
  let document = document(DEPLOYMENTS);
  let root = component("Node");
  let model = ModelSynthesizer::new(document.registry(), CycleGuard::Structural, english())
    .synthesize(&root, "Graph_Get")
    .output;

  assert_eq!(model.fields[1], field("edges", list(named("Edge"))));
  assert_eq!(names(&model), ["Edge", "Graph_Get"]);
  assert_eq!(
    model.nested[0].fields,
    vec![
      field("weight", FieldType::Primitive(SchemaType::Number)),
      field("target", FieldType::Root),
    ]
  );
}

#[test]
fn test_mutual_recursion_under_named_guard() {
  let document = document(DEPLOYMENTS);
  let root = component("Node");
  let model = ModelSynthesizer::new(document.registry(), CycleGuard::Named, english())
    .synthesize(&root, "Graph_Get")
    .output;

  assert_eq!(names(&model), ["Edge", "Target", "Edge", "Graph_Get"]);
  let inner_edge = &model.nested[0].nested[0].nested[0];
  assert_eq!(inner_edge.fields[1], field("target", named("Target")));
  assert!(inner_edge.nested.is_empty());
}

#[test]
fn test_deep_model_with_shared_recursion() {
  let document = document(DEPLOYMENTS);
  let root = component("DeploymentExtended");
  let model = ModelSynthesizer::new(document.registry(), CycleGuard::Structural, english())
    .synthesize(&root, "Deployments_CreateOrUpdate")
    .output;

  assert_eq!(model.fields[2], field("properties", named("Properties")));
  let properties = &model.nested[0];
  assert_eq!(properties.fields[1], field("providers", list(named("Provider"))));
  assert_eq!(properties.fields[3], field("error", named("Error")));

  let error = properties.nested.iter().find(|nested| nested.name == "Error").unwrap();
  assert_eq!(error.fields[2], field("details", list(named("Error"))));
  assert_eq!(
    names(&model),
    ["Error", "Provider", "Dependency", "Properties", "Deployments_CreateOrUpdate"]
  );
}

#[test]
fn test_injected_singularizer_names_element_types() {
  let registry = SchemaRegistry::default();
  let schema = Schema::from(json!({
    "properties": {
      "data": { "type": "array", "items": { "properties": { "id": { "type": "string" } } } }
    }
  }));
  let singularizer: Arc<dyn Singularize> = Arc::new(|word: &str| format!("{word}Item"));
  let model = ModelSynthesizer::new(&registry, CycleGuard::Structural, singularizer)
    .synthesize(&schema, "Data_List")
    .output;

  assert_eq!(model.fields[0], field("data", list(named("DataItem"))));
  assert_eq!(model.nested[0].name, "DataItem");
}

#[test]
fn test_unsupported_composition_is_reported() {
  let registry = SchemaRegistry::default();
  let schema = Schema::from(json!({
    "anyOf": [{ "type": "string" }],
    "properties": { "id": { "type": "string" } }
  }));
  let synthesis = ModelSynthesizer::new(&registry, CycleGuard::Structural, english()).synthesize(&schema, "Things_Get");
  assert!(
    synthesis
      .report
      .unsupported
      .contains(&("Things_Get".to_string(), UnsupportedConstruct::AnyOf))
  );
}
