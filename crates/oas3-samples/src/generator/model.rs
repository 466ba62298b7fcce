use std::{collections::HashSet, sync::Arc};

use super::{
  cycle::{Ancestry, CycleGuard, Visit},
  properties::PropertyResolver,
  report::{Synthesis, SynthesisReport},
};
use crate::{
  naming::{Singularize, to_type_identifier},
  spec::{Schema, SchemaNode, SchemaRegistry, SchemaType},
};

/// Language-neutral type of a model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
  Primitive(SchemaType),
  /// An explicit `type: object` without properties.
  Object,
  /// An array element whose schema says nothing about its shape.
  Any,
  List(Box<FieldType>),
  /// A class declared inside this model, either nested below the field or an ancestor on the
  /// recursion path.
  Named(String),
  /// A reference back to the model's root declaration.
  Root,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelField {
  /// Property name as written in the schema.
  pub name: String,
  pub field_type: FieldType,
}

/// A class declaration and the classes declared for its nested objects.
///
/// `nested` holds implicit-object declarations first, then array-element declarations, each
/// group in property order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDeclaration {
  pub name: String,
  pub fields: Vec<ModelField>,
  pub nested: Vec<ModelDeclaration>,
}

impl ModelDeclaration {
  /// Depth-first, nested declarations before their owner; the root comes last.
  #[must_use]
  pub fn flatten(&self) -> Vec<&ModelDeclaration> {
    let mut ordered = Vec::new();
    self.collect(&mut ordered);
    ordered
  }

  fn collect<'a>(&'a self, ordered: &mut Vec<&'a ModelDeclaration>) {
    for nested in &self.nested {
      nested.collect(ordered);
    }
    ordered.push(self);
  }
}

/// Builds the declaration tree of a response model.
///
/// Implicit objects (no `type`, with properties) become a nested class named after the
/// capitalized field; arrays of objects become `List` of a nested class named after the
/// singularized, capitalized field. An explicit `type: object` stays an opaque object, and fields
/// with neither a type nor properties are skipped.
///
/// Under [`CycleGuard::Structural`] class names are unique within one model: a name already taken
/// by another class gets a numeric suffix (`Tags2`).
#[derive(Clone)]
pub struct ModelSynthesizer<'r> {
  registry: &'r SchemaRegistry,
  resolver: PropertyResolver<'r>,
  guard: CycleGuard,
  singularizer: Arc<dyn Singularize>,
}

struct Walk<'a> {
  ancestry: Ancestry<'a>,
  report: SynthesisReport,
  /// Class names in use, when names are kept unique.
  taken: Option<HashSet<String>>,
}

impl Walk<'_> {
  fn claim(&mut self, candidate: String) -> String {
    let Some(taken) = self.taken.as_mut() else {
      return candidate;
    };
    let mut name = candidate.clone();
    let mut suffix = 2;
    while taken.contains(&name) {
      name = format!("{candidate}{suffix}");
      suffix += 1;
    }
    taken.insert(name.clone());
    name
  }
}

impl<'r> ModelSynthesizer<'r> {
  #[must_use]
  pub fn new(registry: &'r SchemaRegistry, guard: CycleGuard, singularizer: Arc<dyn Singularize>) -> Self {
    Self {
      registry,
      resolver: PropertyResolver::new(registry),
      guard,
      singularizer,
    }
  }

  #[must_use]
  pub fn synthesize(&self, root: &'r Schema, class_name: &str) -> Synthesis<ModelDeclaration> {
    let node = self.registry.resolve(root);
    let name = to_type_identifier(class_name);
    let mut walk = Walk {
      ancestry: Ancestry::new(self.guard, node.identity, name.clone()),
      report: SynthesisReport::default(),
      taken: (self.guard == CycleGuard::Structural).then(|| HashSet::from([name.clone()])),
    };
    walk.report.record_unsupported(class_name, node.schema);

    let output = self.declaration(name, node.schema, &mut walk);
    Synthesis {
      output,
      report: walk.report,
    }
  }

  fn declaration(&self, name: String, schema: &'r Schema, walk: &mut Walk<'r>) -> ModelDeclaration {
    let mut fields = Vec::new();
    let mut objects = Vec::new();
    let mut elements = Vec::new();

    for (property, declared) in self.resolver.resolve_properties(schema) {
      let node = self.registry.resolve(declared);
      walk.report.record_unsupported(property, node.schema);

      let field_type = match node.schema.schema_type {
        Some(SchemaType::Array) => self.array(property, node.schema, &mut elements, walk),
        None if self.resolver.has_properties(node.schema) => {
          let type_name = to_type_identifier(property);
          self.nested(type_name, node, &mut objects, walk)
        }
        Some(SchemaType::Object) => FieldType::Object,
        Some(SchemaType::Null) => FieldType::Any,
        None => continue,
        Some(primitive) => FieldType::Primitive(primitive),
      };

      fields.push(ModelField {
        name: property.to_string(),
        field_type,
      });
    }

    objects.append(&mut elements);
    ModelDeclaration {
      name,
      fields,
      nested: objects,
    }
  }

  fn array(
    &self,
    property: &str,
    schema: &'r Schema,
    declared: &mut Vec<ModelDeclaration>,
    walk: &mut Walk<'r>,
  ) -> FieldType {
    let Some(items) = schema.items.as_deref() else {
      return FieldType::List(Box::new(FieldType::Any));
    };
    let item = self.registry.resolve(items);
    walk.report.record_unsupported(property, item.schema);

    let element = match item.schema.schema_type {
      Some(scalar @ (SchemaType::Boolean | SchemaType::Integer | SchemaType::Number | SchemaType::String)) => {
        FieldType::Primitive(scalar)
      }
      _ if self.resolver.has_properties(item.schema) => {
        let type_name = to_type_identifier(&self.singularizer.singularize(property));
        self.nested(type_name, item, declared, walk)
      }
      Some(SchemaType::Array) => self.array(property, item.schema, declared, walk),
      Some(SchemaType::Object | SchemaType::Null) | None => FieldType::Any,
    };

    FieldType::List(Box::new(element))
  }

  /// Declares `node` as `type_name` unless it recurs, in which case the field refers to the
  /// declaration already on the path.
  fn nested(
    &self,
    type_name: String,
    node: SchemaNode<'r>,
    declared: &mut Vec<ModelDeclaration>,
    walk: &mut Walk<'r>,
  ) -> FieldType {
    if let Visit::Recurrent { declared_as, root } = walk.ancestry.visit(node.identity, Some(&type_name)) {
      walk.report.record_cycle();
      return if root { FieldType::Root } else { FieldType::Named(declared_as) };
    }

    let type_name = walk.claim(type_name);
    walk.ancestry.enter(node.identity, type_name.clone());
    let declaration = self.declaration(type_name.clone(), node.schema, walk);
    walk.ancestry.leave();

    declared.push(declaration);
    FieldType::Named(type_name)
  }
}
