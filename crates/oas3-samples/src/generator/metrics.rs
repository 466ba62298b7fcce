use serde::{Serialize, Serializer};
use strum::Display;

use super::report::SynthesisReport;
use crate::spec::UnsupportedConstruct;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStats {
  pub operations_processed: usize,
  pub request_bodies_generated: usize,
  pub response_models_generated: usize,
  /// Declarations per language, counted once per model.
  pub declarations_generated: usize,
  /// Nested schemas left unexpanded by the cycle guard.
  pub cycles_cut: usize,
  /// Reference cycles among the document's schemas.
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_operation(&mut self) {
    self.operations_processed += 1;
  }

  pub fn record_request_body(&mut self) {
    self.request_bodies_generated += 1;
  }

  pub fn record_response_model(&mut self, declarations: usize) {
    self.response_models_generated += 1;
    self.declarations_generated += declarations;
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  pub fn record_report(&mut self, operation_id: &str, report: &SynthesisReport) {
    self.cycles_cut += report.cycles_cut;
    for (location, construct) in &report.unsupported {
      let warning = GenerationWarning::UnsupportedSchema {
        operation_id: operation_id.to_string(),
        location: location.clone(),
        construct: *construct,
      };
      if !self.warnings.contains(&warning) {
        self.warnings.push(warning);
      }
    }
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "[{operation_id}] '{location}' uses {construct}, which is not modeled")]
  UnsupportedSchema {
    operation_id: String,
    location: String,
    construct: UnsupportedConstruct,
  },
  #[strum(to_string = "Skipped '{method} {path}': operation has no operationId")]
  MissingOperationId { method: String, path: String },
}

impl GenerationWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(self, Self::MissingOperationId { .. })
  }
}

impl Serialize for GenerationWarning {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}
