mod model;
mod properties;
mod schema_graph;
mod snippets;
mod support;
