use itertools::Itertools;

use super::{ModelLanguage, TargetLanguage};
use crate::{
  generator::model::ModelDeclaration,
  naming::reserved::PYTHON_KEYWORDS,
  spec::SchemaType,
  utils::indent,
};

const HEADER: &str = "from __future__ import annotations\n\nfrom typing import Any, List";

/// Annotated Python classes. Python has no member classes here, so nested declarations are
/// rendered as module-level `_`-prefixed classes ahead of the root.
#[derive(Debug, Clone, Copy, Default)]
pub struct Python;

impl Python {
  fn class(&self, declaration: &ModelDeclaration, root: &ModelDeclaration) -> String {
    let name = self.class_name(&declaration.name, std::ptr::eq(declaration, root));
    let body = if declaration.fields.is_empty() {
      "pass".to_string()
    } else {
      declaration
        .fields
        .iter()
        .map(|field| {
          format!(
            "{}: {}",
            self.field_name(&field.name),
            self.type_name(&field.field_type, &root.name)
          )
        })
        .join("\n")
    };
    format!("class {name}:\n{}", indent(&body, 4))
  }
}

impl ModelLanguage for Python {
  fn target(&self) -> TargetLanguage {
    TargetLanguage::Python
  }

  fn primitive_type(&self, schema_type: SchemaType) -> &'static str {
    match schema_type {
      SchemaType::Boolean => "bool",
      SchemaType::Integer => "int",
      SchemaType::Number => "float",
      SchemaType::String => "str",
      SchemaType::Object => "dict",
      SchemaType::Array | SchemaType::Null => "Any",
    }
  }

  fn object_type(&self) -> &'static str {
    "dict"
  }

  fn any_type(&self) -> &'static str {
    "Any"
  }

  fn list_type(&self, element: &str) -> String {
    format!("List[{element}]")
  }

  fn is_reserved(&self, identifier: &str) -> bool {
    PYTHON_KEYWORDS.contains(identifier)
  }

  fn escape_reserved(&self, identifier: &str) -> String {
    format!("{identifier}_")
  }

  fn file_header(&self) -> Option<&'static str> {
    Some(HEADER)
  }

  fn line_comment(&self) -> &'static str {
    "#"
  }

  fn class_name(&self, name: &str, is_root: bool) -> String {
    if is_root { name.to_string() } else { format!("_{name}") }
  }

  fn render(&self, model: &ModelDeclaration) -> String {
    let mut classes = model.flatten().into_iter().map(|declaration| self.class(declaration, model));
    let mut source = HEADER.to_string();
    source.push_str("\n\n\n");
    source.push_str(&classes.join("\n\n\n"));
    source.push('\n');
    source
  }
}
