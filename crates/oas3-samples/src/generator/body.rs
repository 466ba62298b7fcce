use serde_json::{Map, Value};

use super::{
  cycle::{Ancestry, CycleGuard, Visit},
  properties::PropertyResolver,
  report::{Synthesis, SynthesisReport},
};
use crate::spec::{Schema, SchemaNode, SchemaRegistry, SchemaType};

/// Canonical value for a primitive schema type. `None` for container types.
#[must_use]
pub fn default_value(schema_type: SchemaType) -> Option<Value> {
  match schema_type {
    SchemaType::Boolean => Some(Value::Bool(true)),
    SchemaType::Integer | SchemaType::Number => Some(Value::from(0)),
    SchemaType::String => Some(Value::String(String::new())),
    SchemaType::Null => Some(Value::Null),
    SchemaType::Object | SchemaType::Array => None,
  }
}

/// Builds an example request body populated with default values.
///
/// Read-only properties are left out and primitives get [`default_value`]. Implicit objects (no
/// `type`, with properties) and arrays of objects are expanded recursively, while an explicit
/// `type: object` is always `{}`. Fields whose schema carries neither a type nor properties are
/// omitted. A nested schema that recurs on the current path becomes `{}`.
#[derive(Debug, Clone, Copy)]
pub struct BodySynthesizer<'r> {
  registry: &'r SchemaRegistry,
  resolver: PropertyResolver<'r>,
  guard: CycleGuard,
}

struct Walk<'a> {
  ancestry: Ancestry<'a>,
  report: SynthesisReport,
}

impl<'r> BodySynthesizer<'r> {
  #[must_use]
  pub fn new(registry: &'r SchemaRegistry, guard: CycleGuard) -> Self {
    Self {
      registry,
      resolver: PropertyResolver::new(registry),
      guard,
    }
  }

  /// Synthesizes the body for `root`. `owner` names the root object (the operation id) and
  /// takes part in the name-based guard.
  #[must_use]
  pub fn synthesize(&self, root: &'r Schema, owner: &str) -> Synthesis<Value> {
    let node = self.registry.resolve(root);
    let mut walk = Walk {
      ancestry: Ancestry::new(self.guard, node.identity, owner),
      report: SynthesisReport::default(),
    };
    walk.report.record_unsupported(owner, node.schema);

    let output = Value::Object(self.object(node.schema, &mut walk));
    Synthesis {
      output,
      report: walk.report,
    }
  }

  fn object(&self, schema: &'r Schema, walk: &mut Walk<'r>) -> Map<String, Value> {
    let mut body = Map::new();

    for (name, declared) in self.resolver.resolve_properties(schema) {
      let node = self.registry.resolve(declared);
      if declared.read_only || node.schema.read_only {
        continue;
      }
      walk.report.record_unsupported(name, node.schema);

      if let Some(value) = self.field(name, node, walk) {
        body.insert(name.to_string(), value);
      }
    }

    body
  }

  fn field(&self, name: &str, node: SchemaNode<'r>, walk: &mut Walk<'r>) -> Option<Value> {
    match node.schema.schema_type {
      Some(SchemaType::Array) => Some(self.array(name, node.schema, walk)),
      None if self.resolver.has_properties(node.schema) => Some(self.nested(name, node, None, walk)),
      Some(SchemaType::Object) => Some(Value::Object(Map::new())),
      None => None,
      Some(primitive) => default_value(primitive),
    }
  }

  /// `[X]` for an array field: the element object, the element default, or a nested array.
  fn array(&self, name: &str, schema: &'r Schema, walk: &mut Walk<'r>) -> Value {
    let Some(items) = schema.items.as_deref() else {
      return Value::Array(Vec::new());
    };
    let item = self.registry.resolve(items);
    walk.report.record_unsupported(name, item.schema);

    let element = match item.schema.schema_type {
      Some(scalar @ (SchemaType::Boolean | SchemaType::Integer | SchemaType::Number | SchemaType::String)) => {
        default_value(scalar)
      }
      _ if self.resolver.has_properties(item.schema) => Some(self.nested(name, item, Some(name), walk)),
      Some(SchemaType::Array) => Some(self.array(name, item.schema, walk)),
      Some(SchemaType::Object) => Some(Value::Object(Map::new())),
      Some(other) => default_value(other),
      None => None,
    };

    Value::Array(element.into_iter().collect())
  }

  fn nested(&self, name: &str, node: SchemaNode<'r>, candidate: Option<&str>, walk: &mut Walk<'r>) -> Value {
    if let Visit::Recurrent { .. } = walk.ancestry.visit(node.identity, candidate) {
      walk.report.record_cycle();
      return Value::Object(Map::new());
    }

    walk.ancestry.enter(node.identity, name);
    let body = self.object(node.schema, walk);
    walk.ancestry.leave();
    Value::Object(body)
  }
}
