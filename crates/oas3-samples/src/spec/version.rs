use serde::Serialize;
use serde_json::Value;
use strum::Display;

/// Version discriminator of a specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum SpecVersion {
  /// Swagger 2.0 (`swagger: "2.0"`).
  #[strum(to_string = "Swagger 2.0")]
  Swagger2,
  /// OpenAPI 3.x (`openapi: "3.x.y"`).
  #[strum(to_string = "OpenAPI 3")]
  OpenApi3,
}

impl SpecVersion {
  /// Reads the discriminator field of a raw document.
  #[must_use]
  pub fn detect(document: &Value) -> Option<Self> {
    if document.get("swagger").and_then(Value::as_str) == Some("2.0") {
      return Some(Self::Swagger2);
    }
    match document.get("openapi").and_then(Value::as_str) {
      Some(version) if version.starts_with("3.") => Some(Self::OpenApi3),
      _ => None,
    }
  }

  /// JSON pointer of the container holding reusable schemas.
  #[must_use]
  pub fn schemas_pointer(self) -> &'static str {
    match self {
      Self::Swagger2 => "/definitions",
      Self::OpenApi3 => "/components/schemas",
    }
  }
}
