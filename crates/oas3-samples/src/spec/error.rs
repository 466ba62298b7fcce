use thiserror::Error;

/// Failures of the specification pipeline (loading, bundling, validation, dereferencing).
///
/// Synthesis itself never fails: these errors only originate before traversal begins and are
/// propagated unchanged to the caller.
#[derive(Debug, Error)]
pub enum SpecError {
  /// The source cannot be fetched, parsed, or reference-resolved.
  #[error("cannot resolve specification '{source_name}': {reason}")]
  Resolution { source_name: String, reason: String },

  /// The resolved document does not have the structure of a Swagger 2.0 or OpenAPI 3.x document.
  #[error("specification is invalid at '{location}': {message}")]
  Validation { location: String, message: String },
}

impl SpecError {
  pub(crate) fn resolution(source_name: impl Into<String>, reason: impl ToString) -> Self {
    Self::Resolution {
      source_name: source_name.into(),
      reason: reason.to_string(),
    }
  }

  pub(crate) fn validation(location: impl Into<String>, message: impl ToString) -> Self {
    Self::Validation {
      location: location.into(),
      message: message.to_string(),
    }
  }

  pub fn is_resolution(&self) -> bool {
    matches!(self, Self::Resolution { .. })
  }

  pub fn is_validation(&self) -> bool {
    matches!(self, Self::Validation { .. })
  }
}
