mod csharp;
mod python;

use crate::{
  generator::model::{FieldType, ModelDeclaration, ModelField},
  spec::SchemaType,
};

pub(super) fn field(name: &str, field_type: FieldType) -> ModelField {
  ModelField {
    name: name.to_string(),
    field_type,
  }
}

/// `Deployment { name, tags, providers: List<Provider { id }> }`.
pub(super) fn deployment() -> ModelDeclaration {
  ModelDeclaration {
    name: "Deployment".to_string(),
    fields: vec![
      field("name", FieldType::Primitive(SchemaType::String)),
      field("tags", FieldType::Object),
      field(
        "providers",
        FieldType::List(Box::new(FieldType::Named("Provider".to_string()))),
      ),
    ],
    nested: vec![ModelDeclaration {
      name: "Provider".to_string(),
      fields: vec![
        field("id", FieldType::Primitive(SchemaType::String)),
        field("namespace", FieldType::Primitive(SchemaType::String)),
      ],
      nested: Vec::new(),
    }],
  }
}

/// `Tags { tags: Tags2 { name }, parents: List<Tags> }`.
pub(super) fn self_referencing() -> ModelDeclaration {
  ModelDeclaration {
    name: "Tags".to_string(),
    fields: vec![
      field("tags", FieldType::Named("Tags2".to_string())),
      field("parents", FieldType::List(Box::new(FieldType::Root))),
    ],
    nested: vec![ModelDeclaration {
      name: "Tags2".to_string(),
      fields: vec![field("name", FieldType::Primitive(SchemaType::String))],
      nested: Vec::new(),
    }],
  }
}

/// Fields named after keywords of every target language.
pub(super) fn keywords() -> ModelDeclaration {
  ModelDeclaration {
    name: "Keywords".to_string(),
    fields: vec![
      field("class", FieldType::Primitive(SchemaType::String)),
      field("namespace", FieldType::Primitive(SchemaType::String)),
      field("from", FieldType::Primitive(SchemaType::String)),
      field("@odata.type", FieldType::Primitive(SchemaType::String)),
    ],
    nested: Vec::new(),
  }
}

#[test]
fn test_target_language_parsing() {
  use std::str::FromStr;

  use crate::generator::TargetLanguage;

  assert_eq!(TargetLanguage::from_str("java").unwrap(), TargetLanguage::Java);
  assert_eq!(TargetLanguage::from_str("csharp").unwrap(), TargetLanguage::CSharp);
  assert_eq!(TargetLanguage::from_str("cs").unwrap(), TargetLanguage::CSharp);
  assert!(TargetLanguage::from_str("go").is_err());
  assert_eq!(TargetLanguage::CSharp.to_string(), "csharp");
  assert_eq!(TargetLanguage::Python.extension(), "py");
  assert_eq!(TargetLanguage::CSharp.strategy().target(), TargetLanguage::CSharp);
}
