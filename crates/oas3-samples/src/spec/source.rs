use std::{fmt, path::PathBuf, str::FromStr};

use reqwest::Url;
use serde_json::Value;

use super::SpecError;

/// Where a specification comes from.
#[derive(Debug, Clone)]
pub enum SpecificationSource {
  Url(Url),
  Path(PathBuf),
  /// An already-parsed Swagger 2.0 or OpenAPI 3.x document.
  Document(Value),
}

impl SpecificationSource {
  /// Wraps an in-memory document, rejecting `null` and non-object values up front.
  pub fn document(value: Value) -> Result<Self, SpecError> {
    ensure_object(&value)?;
    Ok(Self::Document(value))
  }
}

pub(crate) fn ensure_object(value: &Value) -> Result<(), SpecError> {
  match value {
    Value::Object(_) => Ok(()),
    Value::Null => Err(SpecError::resolution("<document>", "specification document is null")),
    other => Err(SpecError::resolution(
      "<document>",
      format!("expected a JSON object, found {}", json_kind(other)),
    )),
  }
}

impl FromStr for SpecificationSource {
  type Err = SpecError;

  fn from_str(input: &str) -> Result<Self, Self::Err> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
      return Err(SpecError::resolution(input, "specification source is empty"));
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
      let url = Url::parse(trimmed).map_err(|e| SpecError::resolution(trimmed, e))?;
      return Ok(Self::Url(url));
    }

    Ok(Self::Path(PathBuf::from(trimmed)))
  }
}

impl fmt::Display for SpecificationSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Url(url) => write!(f, "{url}"),
      Self::Path(path) => write!(f, "{}", path.display()),
      Self::Document(_) => write!(f, "<document>"),
    }
  }
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
