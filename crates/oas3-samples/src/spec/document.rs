use serde::Serialize;
use serde_json::Value;

use super::{SchemaRegistry, SpecError, SpecVersion, refs, validate::validate};

/// Title, version and description from the `info` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiInfo {
  pub title: String,
  pub version: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

/// A bundled, validated specification with its dereferencing registry.
#[derive(Debug, Clone)]
pub struct ApiDocument {
  raw: Value,
  version: SpecVersion,
  info: ApiInfo,
  registry: SchemaRegistry,
}

impl ApiDocument {
  /// Validates a bundled document and builds its schema registry.
  pub fn from_value(raw: Value) -> Result<Self, SpecError> {
    let version = validate(&raw)?;
    let registry = SchemaRegistry::from_document(&raw)?;

    let text = |field: &str| raw["info"].get(field).and_then(Value::as_str).map(String::from);
    let info = ApiInfo {
      title: text("title").unwrap_or_default(),
      version: text("version").unwrap_or_default(),
      description: text("description"),
    };

    Ok(Self {
      raw,
      version,
      info,
      registry,
    })
  }

  #[must_use]
  pub fn version(&self) -> SpecVersion {
    self.version
  }

  #[must_use]
  pub fn info(&self) -> &ApiInfo {
    &self.info
  }

  #[must_use]
  pub fn raw(&self) -> &Value {
    &self.raw
  }

  #[must_use]
  pub fn registry(&self) -> &SchemaRegistry {
    &self.registry
  }

  /// Base URL requests are sent to.
  ///
  /// OpenAPI 3.x uses the first server; Swagger 2.0 builds it from the first scheme (default
  /// `https`), `host` and `basePath`. Empty when the document declares neither.
  #[must_use]
  pub fn base_url(&self) -> String {
    match self.version {
      SpecVersion::OpenApi3 => self
        .raw
        .pointer("/servers/0/url")
        .and_then(Value::as_str)
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_default(),
      SpecVersion::Swagger2 => {
        let Some(host) = self.raw.get("host").and_then(Value::as_str) else {
          return String::new();
        };
        let scheme = self
          .raw
          .pointer("/schemes/0")
          .and_then(Value::as_str)
          .unwrap_or("https");
        let base_path = self.raw.get("basePath").and_then(Value::as_str).unwrap_or_default();
        format!("{scheme}://{host}{}", base_path.trim_end_matches('/'))
      }
    }
  }

  /// Follows `$ref`s on a raw node (path items, parameters, request bodies, responses).
  #[must_use]
  pub fn follow<'a>(&'a self, value: &'a Value) -> Option<&'a Value> {
    refs::follow(&self.raw, value)
  }
}
