use itertools::Itertools;

use super::{ModelLanguage, TargetLanguage};
use crate::{
  generator::model::ModelDeclaration,
  naming::reserved::JAVA_KEYWORDS,
  spec::SchemaType,
  utils::{indent, join_blocks},
};

/// Plain Java classes with boxed field types; nested objects become `static` member classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Java;

impl Java {
  fn class(&self, declaration: &ModelDeclaration, root: &str, nested: bool) -> String {
    let fields = declaration
      .fields
      .iter()
      .map(|field| format!("{} {};", self.type_name(&field.field_type, root), self.field_name(&field.name)))
      .join("\n");
    let members = declaration
      .nested
      .iter()
      .map(|nested| self.class(nested, root, true))
      .collect::<Vec<_>>();

    let body = join_blocks(std::iter::once(fields).chain(members));
    let keyword = if nested { "static class" } else { "class" };
    if body.is_empty() {
      return format!("{keyword} {} {{\n}}", declaration.name);
    }
    format!("{keyword} {} {{\n{}\n}}", declaration.name, indent(body.trim_end(), 2))
  }
}

impl ModelLanguage for Java {
  fn target(&self) -> TargetLanguage {
    TargetLanguage::Java
  }

  fn primitive_type(&self, schema_type: SchemaType) -> &'static str {
    match schema_type {
      SchemaType::Boolean => "Boolean",
      SchemaType::Integer => "Integer",
      SchemaType::Number => "Number",
      SchemaType::String => "String",
      SchemaType::Object | SchemaType::Array | SchemaType::Null => "Object",
    }
  }

  fn object_type(&self) -> &'static str {
    "Object"
  }

  fn any_type(&self) -> &'static str {
    "Object"
  }

  fn list_type(&self, element: &str) -> String {
    format!("List<{element}>")
  }

  fn is_reserved(&self, identifier: &str) -> bool {
    JAVA_KEYWORDS.contains(identifier)
  }

  fn escape_reserved(&self, identifier: &str) -> String {
    format!("{identifier}_")
  }

  fn render(&self, model: &ModelDeclaration) -> String {
    let mut source = self.class(model, &model.name, false);
    source.push('\n');
    source
  }
}
