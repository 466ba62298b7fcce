use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use super::refs::REF_KEY;

/// Primitive `type` of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
  Boolean,
  Integer,
  Number,
  String,
  Object,
  Array,
  Null,
}

/// Composition keywords that are recognized but not modeled by the synthesizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum UnsupportedConstruct {
  #[strum(to_string = "oneOf")]
  OneOf,
  #[strum(to_string = "anyOf")]
  AnyOf,
  #[strum(to_string = "not")]
  Not,
}

/// A schema node, reduced to the keywords the generators use.
///
/// Deserialization is total: unknown keywords are ignored, unknown `type` strings read as
/// "no type", boolean schemas and malformed sub-schemas read as empty schemas. Property
/// declaration order is preserved because it drives output field order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct Schema {
  /// Internal `$ref` pointer, when this node is a reference.
  pub reference: Option<String>,
  pub schema_type: Option<SchemaType>,
  pub properties: IndexMap<String, Schema>,
  pub items: Option<Box<Schema>>,
  pub read_only: bool,
  pub all_of: Vec<Schema>,
  pub unsupported: Vec<UnsupportedConstruct>,
}

pub(crate) static EMPTY_SCHEMA: LazyLock<Schema> = LazyLock::new(Schema::default);

impl Schema {
  #[must_use]
  pub fn is_reference(&self) -> bool {
    self.reference.is_some()
  }

  #[must_use]
  pub fn is_array(&self) -> bool {
    self.schema_type == Some(SchemaType::Array)
  }
}

impl From<Value> for Schema {
  fn from(value: Value) -> Self {
    Self::from(&value)
  }
}

impl From<&Value> for Schema {
  fn from(value: &Value) -> Self {
    let Value::Object(map) = value else {
      return Self::default();
    };

    let reference = map.get(REF_KEY).and_then(Value::as_str).map(String::from);

    let properties = map
      .get("properties")
      .and_then(Value::as_object)
      .map(|properties| {
        properties
          .iter()
          .map(|(name, schema)| (name.clone(), Self::from(schema)))
          .collect()
      })
      .unwrap_or_default();

    let items = match map.get("items") {
      Some(object @ Value::Object(_)) => Some(Box::new(Self::from(object))),
      Some(Value::Array(tuple)) => tuple.first().map(|first| Box::new(Self::from(first))),
      _ => None,
    };

    let all_of = map
      .get("allOf")
      .and_then(Value::as_array)
      .map(|parts| parts.iter().map(Self::from).collect())
      .unwrap_or_default();

    let unsupported = [
      ("oneOf", UnsupportedConstruct::OneOf),
      ("anyOf", UnsupportedConstruct::AnyOf),
      ("not", UnsupportedConstruct::Not),
    ]
    .into_iter()
    .filter(|(keyword, _)| map.contains_key(*keyword))
    .map(|(_, construct)| construct)
    .collect();

    Self {
      reference,
      schema_type: map.get("type").and_then(parse_type),
      properties,
      items,
      read_only: map.get("readOnly").and_then(Value::as_bool).unwrap_or(false),
      all_of,
      unsupported,
    }
  }
}

/// Reads `type` as a single string or a 3.1-style list, where the first non-`null` entry wins.
fn parse_type(value: &Value) -> Option<SchemaType> {
  match value {
    Value::String(name) => name.parse().ok(),
    Value::Array(names) => {
      let types: Vec<SchemaType> = names
        .iter()
        .filter_map(Value::as_str)
        .filter_map(|name| name.parse().ok())
        .collect();
      types
        .iter()
        .copied()
        .find(|schema_type| *schema_type != SchemaType::Null)
        .or_else(|| types.first().copied())
    }
    _ => None,
  }
}
