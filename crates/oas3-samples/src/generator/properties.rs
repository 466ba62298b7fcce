use std::collections::HashSet;

use indexmap::IndexMap;

use crate::spec::{Schema, SchemaRegistry};

/// Produces the effective, ordered property list of a schema node.
///
/// Direct `properties` come first in declaration order; the properties of `allOf[0]` are then
/// merged in recursively. On a name collision the direct property wins. Later `allOf` entries
/// are not merged.
#[derive(Debug, Clone, Copy)]
pub struct PropertyResolver<'r> {
  registry: &'r SchemaRegistry,
}

impl<'r> PropertyResolver<'r> {
  #[must_use]
  pub fn new(registry: &'r SchemaRegistry) -> Self {
    Self { registry }
  }

  /// Returns `(name, schema)` pairs. Property schemas are returned as declared, so a `$ref`
  /// property stays a reference until the caller resolves it.
  #[must_use]
  pub fn resolve_properties(&self, schema: &'r Schema) -> Vec<(&'r str, &'r Schema)> {
    let mut merged: IndexMap<&'r str, &'r Schema> = IndexMap::new();
    let mut seen = HashSet::new();
    let mut current = Some(schema);

    while let Some(candidate) = current.take() {
      let node = self.registry.resolve(candidate);
      if let Some(identity) = node.identity
        && !seen.insert(identity)
      {
        break;
      }

      for (name, property) in &node.schema.properties {
        merged.entry(name.as_str()).or_insert(property);
      }
      current = node.schema.all_of.first();
    }

    merged.into_iter().collect()
  }

  #[must_use]
  pub fn has_properties(&self, schema: &'r Schema) -> bool {
    !self.resolve_properties(schema).is_empty()
  }
}
