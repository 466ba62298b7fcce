use std::collections::{BTreeMap, BTreeSet};

use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use crate::spec::{Schema, SchemaRegistry, refs::pointer_leaf};

/// Reference graph between the document's referenced schemas: pointer -> pointers it uses.
#[derive(Debug, Clone, Default)]
pub(crate) struct SchemaGraph {
  dependencies: BTreeMap<String, BTreeSet<String>>,
}

impl SchemaGraph {
  pub(crate) fn from_registry(registry: &SchemaRegistry) -> Self {
    let dependencies = registry
      .iter()
      .map(|(pointer, schema)| {
        let mut references = BTreeSet::new();
        collect_references(schema, &mut references);
        (pointer.to_string(), references)
      })
      .collect();
    Self { dependencies }
  }

  /// Strongly connected components that form cycles, named by their schema names.
  pub(crate) fn detect_cycles(&self) -> Vec<Vec<String>> {
    let mut graph = DiGraphMap::<&str, ()>::new();
    for (node, deps) in &self.dependencies {
      graph.add_node(node.as_str());
      for dep in deps {
        graph.add_edge(node.as_str(), dep.as_str(), ());
      }
    }

    let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
      .into_iter()
      .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
      .map(|scc| {
        let mut names: Vec<String> = scc
          .into_iter()
          .map(|pointer| pointer_leaf(pointer).unwrap_or_else(|| pointer.to_string()))
          .collect();
        names.sort();
        names
      })
      .collect();
    cycles.sort();
    cycles
  }
}

fn collect_references(schema: &Schema, references: &mut BTreeSet<String>) {
  if let Some(reference) = &schema.reference {
    references.insert(reference.clone());
    return;
  }
  for property in schema.properties.values() {
    collect_references(property, references);
  }
  if let Some(items) = &schema.items {
    collect_references(items, references);
  }
  for part in &schema.all_of {
    collect_references(part, references);
  }
}
