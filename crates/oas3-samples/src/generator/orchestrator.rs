//! Per-operation sample generation.
//!
//! [`Orchestrator`] takes a resolved [`ApiDocument`], extracts its operations and, for each
//! one, renders request snippets, synthesizes the request body when the body schema has
//! properties, and synthesizes the response model when the `200` schema has properties.
//!
//! ## Usage
//!
//! ```no_run
//! # async fn example() -> anyhow::Result<()> {
//! let source = "openapi.json".parse()?;
//! let output = generate(source, Some("Pets_List"), SynthesisConfig::default()).await?;
//! println!("{} operations", output.generated.len());
//! # Ok(())
//! # }
//! ```

use std::{fmt, sync::Arc};

use bon::Builder;
use serde::Serialize;
use serde_json::Value;

use super::{
  body::BodySynthesizer,
  cycle::CycleGuard,
  languages::{ResponseModel, TargetLanguage},
  metrics::{GenerationStats, GenerationWarning},
  model::ModelSynthesizer,
  operations::{OperationRecord, extract_operations},
  properties::PropertyResolver,
  schema_graph::SchemaGraph,
  snippets::{RequestSnippet, SnippetRequest, render_snippet, request_url},
};
use crate::{
  naming::{EnglishSingularizer, Singularize},
  spec::{ApiDocument, ApiInfo, SpecError, SpecificationSource},
};

/// Options shared by every synthesis of one run.
#[derive(Clone, Builder)]
pub struct SynthesisConfig {
  /// Languages to render snippets and response models for, in output order.
  #[builder(default = TargetLanguage::ALL.to_vec())]
  pub languages: Vec<TargetLanguage>,
  #[builder(default)]
  pub cycle_guard: CycleGuard,
  /// Names array-element types after the singular of their field.
  #[builder(default = Arc::new(EnglishSingularizer))]
  pub singularizer: Arc<dyn Singularize>,
}

impl Default for SynthesisConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl fmt::Debug for SynthesisConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SynthesisConfig")
      .field("languages", &self.languages)
      .field("cycle_guard", &self.cycle_guard)
      .finish_non_exhaustive()
  }
}

/// Everything generated for one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutput {
  pub operation_id: String,
  pub path: String,
  pub method: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub summary: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub snippets: Vec<RequestSnippet>,
  /// Present iff the request-body schema has at least one property.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub request_body: Option<Value>,
  /// One per configured language; empty iff the `200` schema has no properties.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub response_models: Vec<ResponseModel>,
}

impl OperationOutput {
  #[must_use]
  pub fn snippet(&self, language: TargetLanguage) -> Option<&RequestSnippet> {
    self.snippets.iter().find(|snippet| snippet.language == language)
  }

  #[must_use]
  pub fn response_model(&self, language: TargetLanguage) -> Option<&ResponseModel> {
    self.response_models.iter().find(|model| model.language == language)
  }
}

/// Result of a generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutput {
  pub api_info: ApiInfo,
  pub base_url: String,
  /// In path and method declaration order.
  pub generated: Vec<OperationOutput>,
  pub stats: GenerationStats,
}

/// Resolves `source` and generates samples for all operations, or for `operation_id` only.
///
/// A filter that matches nothing yields an empty `generated` list. Resolution and validation
/// failures are returned unchanged.
pub async fn generate(
  source: SpecificationSource,
  operation_id: Option<&str>,
  config: SynthesisConfig,
) -> Result<GenerationOutput, SpecError> {
  let document = crate::spec::resolve(source).await?;
  Ok(Orchestrator::new(document, config).generate(operation_id))
}

pub struct Orchestrator {
  document: ApiDocument,
  config: SynthesisConfig,
}

impl Orchestrator {
  #[must_use]
  pub fn new(document: ApiDocument, config: SynthesisConfig) -> Self {
    Self { document, config }
  }

  #[must_use]
  pub fn generate(&self, operation_id: Option<&str>) -> GenerationOutput {
    let mut stats = GenerationStats::default();
    let extraction = extract_operations(&self.document);

    stats.record_warnings(extraction.skipped.iter().map(|skipped| GenerationWarning::MissingOperationId {
      method: skipped.method.as_upper(),
      path: skipped.path.clone(),
    }));

    let base_url = self.document.base_url();
    let generated = extraction
      .operations
      .iter()
      .filter(|operation| operation_id.is_none_or(|wanted| operation.operation_id == wanted))
      .map(|operation| self.generate_operation(operation, &base_url, &mut stats))
      .collect();

    stats.record_cycles(SchemaGraph::from_registry(self.document.registry()).detect_cycles());

    GenerationOutput {
      api_info: self.document.info().clone(),
      base_url,
      generated,
      stats,
    }
  }

  fn generate_operation(
    &self,
    operation: &OperationRecord,
    base_url: &str,
    stats: &mut GenerationStats,
  ) -> OperationOutput {
    let registry = self.document.registry();
    let resolver = PropertyResolver::new(registry);
    stats.record_operation();

    let request_body = operation
      .request_body
      .as_ref()
      .filter(|schema| resolver.has_properties(schema))
      .map(|schema| {
        let synthesis =
          BodySynthesizer::new(registry, self.config.cycle_guard).synthesize(schema, &operation.operation_id);
        stats.record_request_body();
        stats.record_report(&operation.operation_id, &synthesis.report);
        synthesis.output
      });

    let response_models = operation
      .response
      .as_ref()
      .filter(|schema| resolver.has_properties(schema))
      .map(|schema| {
        let synthesizer =
          ModelSynthesizer::new(registry, self.config.cycle_guard, Arc::clone(&self.config.singularizer));
        let synthesis = synthesizer.synthesize(schema, &operation.operation_id);
        stats.record_response_model(synthesis.output.flatten().len());
        stats.record_report(&operation.operation_id, &synthesis.report);
        self
          .config
          .languages
          .iter()
          .map(|language| language.strategy().response_model(&synthesis.output))
          .collect()
      })
      .unwrap_or_default();

    let url = request_url(base_url, &operation.path, &self.document.info().version);
    let request = SnippetRequest {
      operation_id: &operation.operation_id,
      method: operation.method,
      url: &url,
      has_body: request_body.is_some(),
    };
    let snippets = self
      .config
      .languages
      .iter()
      .map(|language| render_snippet(*language, &request))
      .collect();

    OperationOutput {
      operation_id: operation.operation_id.clone(),
      path: operation.path.clone(),
      method: operation.method.as_upper(),
      summary: operation.summary.clone(),
      snippets,
      request_body,
      response_models,
    }
  }
}
