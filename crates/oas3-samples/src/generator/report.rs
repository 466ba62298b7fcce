use indexmap::IndexSet;

use crate::spec::{Schema, UnsupportedConstruct};

/// Side observations of one synthesis walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisReport {
  /// Nested schemas that were not expanded because they recur on the current path.
  pub cycles_cut: usize,
  /// `(location, construct)` pairs for composition keywords that were ignored.
  pub unsupported: IndexSet<(String, UnsupportedConstruct)>,
}

impl SynthesisReport {
  pub(crate) fn record_cycle(&mut self) {
    self.cycles_cut += 1;
  }

  pub(crate) fn record_unsupported(&mut self, location: &str, schema: &Schema) {
    for construct in &schema.unsupported {
      self.unsupported.insert((location.to_string(), *construct));
    }
  }
}

/// Output of a synthesizer together with what it observed on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis<T> {
  pub output: T,
  pub report: SynthesisReport,
}
