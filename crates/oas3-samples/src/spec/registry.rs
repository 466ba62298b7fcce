use indexmap::IndexMap;
use serde_json::Value;

use super::{
  SpecError,
  refs::{MAX_REF_HOPS, for_each_ref, lookup_internal},
  schema::{EMPTY_SCHEMA, Schema},
};

/// A schema node after reference resolution.
///
/// `identity` is the canonical `$ref` pointer the node was reached through, or `None` for an
/// inline schema. Inline schemas are plain JSON subtrees and cannot recur, so the pointer is
/// the only identity the cycle guard needs.
#[derive(Debug, Clone, Copy)]
pub struct SchemaNode<'a> {
  pub schema: &'a Schema,
  pub identity: Option<&'a str>,
}

/// Dereferences `$ref`s lazily.
///
/// Every internal reference in the document is looked up once at construction and kept as
/// a typed [`Schema`] keyed by its pointer; traversal then follows references on demand
/// instead of inlining them, so self-referential specifications stay finite.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
  schemas: IndexMap<String, Schema>,
}

impl SchemaRegistry {
  /// Builds the registry for a bundled document.
  ///
  /// Fails when a reference is external (the document was not bundled) or when an internal
  /// pointer does not resolve.
  pub fn from_document(document: &Value) -> Result<Self, SpecError> {
    let mut references: Vec<&str> = Vec::new();
    for_each_ref(document, &mut |reference| references.push(reference));

    let mut schemas = IndexMap::new();
    for reference in references {
      if schemas.contains_key(reference) {
        continue;
      }
      if !reference.starts_with('#') {
        return Err(SpecError::resolution(reference, "external reference was not bundled"));
      }
      let target = lookup_internal(document, reference)
        .ok_or_else(|| SpecError::resolution(reference, "reference target does not exist"))?;
      schemas.insert(reference.to_string(), Schema::from(target));
    }

    Ok(Self { schemas })
  }

  #[must_use]
  pub fn get(&self, pointer: &str) -> Option<&Schema> {
    self.schemas.get(pointer)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.schemas.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.schemas.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
    self.schemas.iter().map(|(pointer, schema)| (pointer.as_str(), schema))
  }

  /// Follows `schema`'s reference chain to a concrete node.
  ///
  /// Chains that loop on themselves or exceed [`MAX_REF_HOPS`] resolve to an empty schema,
  /// which every generator treats as contributing nothing.
  #[must_use]
  pub fn resolve<'a>(&'a self, schema: &'a Schema) -> SchemaNode<'a> {
    let mut current = schema;
    let mut identity = None;

    for _ in 0..MAX_REF_HOPS {
      let Some(pointer) = current.reference.as_deref() else {
        return SchemaNode {
          schema: current,
          identity,
        };
      };
      match self.schemas.get_key_value(pointer) {
        Some((key, target)) => {
          identity = Some(key.as_str());
          current = target;
        }
        None => break,
      }
    }

    SchemaNode {
      schema: &*EMPTY_SCHEMA,
      identity,
    }
  }
}
