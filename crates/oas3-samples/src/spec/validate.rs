use std::collections::HashMap;

use serde_json::Value;

use super::{SpecError, SpecVersion, refs::follow};
use crate::generator::operations::HttpMethod;

/// Checks the structure of a bundled document and returns its version.
///
/// Both versions must carry `info.title`, `info.version` and a `paths` object whose
/// operations are objects with unique `operationId`s. OpenAPI 3.x documents must also
/// deserialize into [`oas3::Spec`].
pub fn validate(document: &Value) -> Result<SpecVersion, SpecError> {
  let version = SpecVersion::detect(document).ok_or_else(|| {
    let found = document
      .get("openapi")
      .or_else(|| document.get("swagger"))
      .map_or_else(|| "nothing".to_string(), ToString::to_string);
    SpecError::validation("#", format!("expected `swagger: \"2.0\"` or `openapi: \"3.x\"`, found {found}"))
  })?;

  let info = document
    .get("info")
    .filter(|info| info.is_object())
    .ok_or_else(|| SpecError::validation("#/info", "missing info object"))?;
  for field in ["title", "version"] {
    if !info.get(field).is_some_and(Value::is_string) {
      return Err(SpecError::validation(format!("#/info/{field}"), "must be a string"));
    }
  }

  let paths = match document.get("paths") {
    Some(Value::Object(paths)) => paths,
    Some(_) => return Err(SpecError::validation("#/paths", "must be an object")),
    None if version == SpecVersion::OpenApi3 => return validate_openapi3(document).map(|()| version),
    None => return Err(SpecError::validation("#/paths", "missing paths object")),
  };

  let mut operation_ids: HashMap<&str, String> = HashMap::new();
  for (path, item) in paths {
    let Some(item) = follow(document, item).and_then(Value::as_object) else {
      return Err(SpecError::validation(format!("#/paths/{path}"), "path item must be an object"));
    };
    for (key, operation) in item {
      if key.parse::<HttpMethod>().is_err() {
        continue;
      }
      let location = format!("#/paths/{path}/{key}");
      if !operation.is_object() {
        return Err(SpecError::validation(location, "operation must be an object"));
      }
      if let Some(operation_id) = operation.get("operationId").and_then(Value::as_str)
        && let Some(previous) = operation_ids.insert(operation_id, location.clone())
      {
        return Err(SpecError::validation(
          location,
          format!("duplicate operationId '{operation_id}' (first declared at {previous})"),
        ));
      }
    }
  }

  if version == SpecVersion::OpenApi3 {
    validate_openapi3(document)?;
  }

  Ok(version)
}

fn validate_openapi3(document: &Value) -> Result<(), SpecError> {
  serde_path_to_error::deserialize::<_, oas3::Spec>(document)
    .map(|_| ())
    .map_err(|error| SpecError::validation(format!("#/{}", error.path()), error.inner()))
}
