//! Target languages for response models.
//!
//! The model walk produces one language-neutral [`ModelDeclaration`] tree; each language
//! implements [`ModelLanguage`] to name its types, escape its identifiers and render source.

mod csharp;
mod java;
mod python;

use clap::ValueEnum;
use serde::Serialize;
use strum::{Display, EnumString};

pub use csharp::CSharp;
pub use java::Java;
pub use python::Python;

use super::model::{FieldType, ModelDeclaration};
use crate::{naming::to_field_identifier, spec::SchemaType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, ValueEnum, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
  Java,
  #[value(name = "csharp", alias = "cs")]
  #[strum(to_string = "csharp", serialize = "cs")]
  CSharp,
  Python,
}

impl TargetLanguage {
  pub const ALL: [Self; 3] = [Self::Java, Self::CSharp, Self::Python];

  #[must_use]
  pub fn strategy(self) -> &'static dyn ModelLanguage {
    match self {
      Self::Java => &Java,
      Self::CSharp => &CSharp,
      Self::Python => &Python,
    }
  }

  /// File extension of rendered source.
  #[must_use]
  pub fn extension(self) -> &'static str {
    match self {
      Self::Java => "java",
      Self::CSharp => "cs",
      Self::Python => "py",
    }
  }
}

/// A response model rendered for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseModel {
  pub language: TargetLanguage,
  /// Nested declarations first, depth-first; the root declaration is last.
  pub declarations: Vec<TypeDeclaration>,
  pub source: String,
}

impl ResponseModel {
  #[must_use]
  pub fn root(&self) -> Option<&TypeDeclaration> {
    self.declarations.last()
  }

  #[must_use]
  pub fn declaration(&self, name: &str) -> Option<&TypeDeclaration> {
    self.declarations.iter().find(|declaration| declaration.name == name)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDeclaration {
  pub name: String,
  pub fields: Vec<FieldDeclaration>,
}

impl TypeDeclaration {
  #[must_use]
  pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
    self.fields.iter().find(|field| field.name == name)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDeclaration {
  pub name: String,
  pub type_name: String,
}

/// Naming and rendering rules of one target language.
pub trait ModelLanguage: Send + Sync {
  fn target(&self) -> TargetLanguage;

  fn primitive_type(&self, schema_type: SchemaType) -> &'static str;

  /// Type of an explicit `type: object` field without properties.
  fn object_type(&self) -> &'static str;

  /// Type of an element whose schema is unconstrained.
  fn any_type(&self) -> &'static str;

  fn list_type(&self, element: &str) -> String;

  fn is_reserved(&self, identifier: &str) -> bool;

  fn escape_reserved(&self, identifier: &str) -> String;

  /// Source text of the whole model, including [`ModelLanguage::file_header`].
  fn render(&self, model: &ModelDeclaration) -> String;

  /// Lines that must appear once at the top of a file of models.
  fn file_header(&self) -> Option<&'static str> {
    None
  }

  fn line_comment(&self) -> &'static str {
    "//"
  }

  /// Rendered name of a declaration. `is_root` is true for the operation's own class.
  fn class_name(&self, name: &str, _is_root: bool) -> String {
    name.to_string()
  }

  fn field_name(&self, name: &str) -> String {
    let identifier = to_field_identifier(name);
    if self.is_reserved(&identifier) {
      self.escape_reserved(&identifier)
    } else {
      identifier
    }
  }

  /// Rendered type of a field inside the model rooted at `root`.
  fn type_name(&self, field_type: &FieldType, root: &str) -> String {
    match field_type {
      FieldType::Primitive(schema_type) => self.primitive_type(*schema_type).to_string(),
      FieldType::Object => self.object_type().to_string(),
      FieldType::Any => self.any_type().to_string(),
      FieldType::List(element) => self.list_type(&self.type_name(element, root)),
      FieldType::Named(name) => self.class_name(name, false),
      FieldType::Root => self.class_name(root, true),
    }
  }

  /// Flattens and renders `model` into its output record.
  fn response_model(&self, model: &ModelDeclaration) -> ResponseModel {
    let declarations = model
      .flatten()
      .into_iter()
      .map(|declaration| TypeDeclaration {
        name: self.class_name(&declaration.name, std::ptr::eq(declaration, model)),
        fields: declaration
          .fields
          .iter()
          .map(|field| FieldDeclaration {
            name: self.field_name(&field.name),
            type_name: self.type_name(&field.field_type, &model.name),
          })
          .collect(),
      })
      .collect();

    ResponseModel {
      language: self.target(),
      declarations,
      source: self.render(model),
    }
  }
}

#[cfg(test)]
mod tests;
