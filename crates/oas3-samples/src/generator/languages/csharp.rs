use itertools::Itertools;

use super::{ModelLanguage, TargetLanguage};
use crate::{
  generator::model::ModelDeclaration,
  naming::reserved::CSHARP_KEYWORDS,
  spec::SchemaType,
  utils::{indent, join_blocks},
};

/// C# classes with public fields and Allman braces; nested objects become member classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharp;

impl CSharp {
  fn class(&self, declaration: &ModelDeclaration, root: &str) -> String {
    let fields = declaration
      .fields
      .iter()
      .map(|field| {
        format!(
          "public {} {};",
          self.type_name(&field.field_type, root),
          self.field_name(&field.name)
        )
      })
      .join("\n");
    let members = declaration
      .nested
      .iter()
      .map(|nested| self.class(nested, root))
      .collect::<Vec<_>>();

    let body = join_blocks(std::iter::once(fields).chain(members));
    if body.is_empty() {
      return format!("public class {}\n{{\n}}", declaration.name);
    }
    format!("public class {}\n{{\n{}\n}}", declaration.name, indent(body.trim_end(), 4))
  }
}

impl ModelLanguage for CSharp {
  fn target(&self) -> TargetLanguage {
    TargetLanguage::CSharp
  }

  fn primitive_type(&self, schema_type: SchemaType) -> &'static str {
    match schema_type {
      SchemaType::Boolean => "bool",
      SchemaType::Integer => "long",
      SchemaType::Number => "double",
      SchemaType::String => "string",
      SchemaType::Object | SchemaType::Array | SchemaType::Null => "object",
    }
  }

  fn object_type(&self) -> &'static str {
    "object"
  }

  fn any_type(&self) -> &'static str {
    "object"
  }

  fn list_type(&self, element: &str) -> String {
    format!("List<{element}>")
  }

  fn is_reserved(&self, identifier: &str) -> bool {
    CSHARP_KEYWORDS.contains(identifier)
  }

  fn escape_reserved(&self, identifier: &str) -> String {
    format!("@{identifier}")
  }

  fn render(&self, model: &ModelDeclaration) -> String {
    let mut source = self.class(model, &model.name);
    source.push('\n');
    source
  }
}
