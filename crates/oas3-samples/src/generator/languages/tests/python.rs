use super::{deployment, keywords, self_referencing};
use crate::{
  generator::{
    languages::{ModelLanguage, Python},
    model::FieldType,
  },
  spec::SchemaType,
};

#[test]
fn test_python_types() {
  assert_eq!(Python.primitive_type(SchemaType::Boolean), "bool");
  assert_eq!(Python.primitive_type(SchemaType::Integer), "int");
  assert_eq!(Python.primitive_type(SchemaType::Number), "float");
  assert_eq!(Python.object_type(), "dict");
  assert_eq!(Python.list_type("str"), "List[str]");
  assert_eq!(Python.line_comment(), "#");
}

#[test]
fn test_python_render() {
  let source = Python.render(&deployment());
  assert_eq!(
    source,
    "\
from __future__ import annotations

from typing import Any, List


class _Provider:
    id: str
    namespace: str


class Deployment:
    name: str
    tags: dict
    providers: List[_Provider]
"
  );
  assert!(source.starts_with(Python.file_header().unwrap()));
}

#[test]
fn test_python_keywords_are_escaped() {
  let model = Python.response_model(&keywords());
  let fields: Vec<&str> = model.declarations[0]
    .fields
    .iter()
    .map(|field| field.name.as_str())
    .collect();
  assert_eq!(fields, ["class_", "namespace", "from_", "_odata_type"]);
}

#[test]
fn test_python_empty_class() {
  let model = crate::generator::model::ModelDeclaration {
    name: "Empty".to_string(),
    fields: Vec::new(),
    nested: Vec::new(),
  };
  assert!(Python.render(&model).ends_with("class Empty:\n    pass\n"));
}

#[test]
fn test_python_root_references_are_not_prefixed() {
  assert_eq!(Python.type_name(&FieldType::Root, "Tags"), "Tags");
  assert_eq!(Python.type_name(&FieldType::Named("Tags".to_string()), "Tags"), "_Tags");

  let source = Python.render(&self_referencing());
  assert_eq!(
    source,
    "\
from __future__ import annotations

from typing import Any, List


class _Tags2:
    name: str


class Tags:
    tags: _Tags2
    parents: List[Tags]
"
  );
}
