use mediatype::MediaType;
use serde::Serialize;
use serde_json::Value;
use strum::{Display, EnumString};

use crate::spec::{ApiDocument, Schema, SpecVersion};

const JSON_MEDIA_TYPE: &str = "application/json";
const SUCCESS_STATUS: &str = "200";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
  Get,
  Put,
  Post,
  Delete,
  Options,
  Head,
  Patch,
  Trace,
}

impl HttpMethod {
  #[must_use]
  pub fn as_upper(self) -> String {
    self.to_string().to_ascii_uppercase()
  }

  /// `Get`, `Post`, ... as used by .NET's `HttpMethod` properties.
  #[must_use]
  pub fn as_capitalized(self) -> String {
    crate::naming::capitalize(&self.to_string())
  }
}

/// One operation of the specification, with the schemas the synthesizers consume.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
  pub path: String,
  pub method: HttpMethod,
  pub operation_id: String,
  pub summary: Option<String>,
  /// JSON request-body schema, when the operation declares one.
  pub request_body: Option<Schema>,
  /// Schema of the `200` response, when declared.
  pub response: Option<Schema>,
}

/// An operation left out of extraction because it has no `operationId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedOperation {
  pub path: String,
  pub method: HttpMethod,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
  pub operations: Vec<OperationRecord>,
  pub skipped: Vec<SkippedOperation>,
}

/// Flattens the `paths` map into operation records in declaration order.
///
/// Swagger 2.0 bodies come from the `in: body` parameter (operation level, then path level)
/// and responses from `responses.200.schema`. OpenAPI 3.x bodies and responses come from
/// `content`, preferring `application/json` and otherwise the first JSON-like media type.
#[must_use]
pub fn extract_operations(document: &ApiDocument) -> Extraction {
  let mut extraction = Extraction::default();
  let Some(paths) = document.raw().get("paths").and_then(Value::as_object) else {
    return extraction;
  };

  for (path, item) in paths {
    let Some(item) = document.follow(item).and_then(Value::as_object) else {
      continue;
    };
    let shared = item.get("parameters").and_then(Value::as_array);

    for (key, operation) in item {
      let Ok(method) = key.parse::<HttpMethod>() else {
        continue;
      };
      let Some(operation_id) = operation.get("operationId").and_then(Value::as_str) else {
        extraction.skipped.push(SkippedOperation {
          path: path.clone(),
          method,
        });
        continue;
      };

      let (request_body, response) = match document.version() {
        SpecVersion::Swagger2 => (
          swagger2_body(document, operation, shared),
          swagger2_response(document, operation),
        ),
        SpecVersion::OpenApi3 => (openapi3_body(document, operation), openapi3_response(document, operation)),
      };

      extraction.operations.push(OperationRecord {
        path: path.clone(),
        method,
        operation_id: operation_id.to_string(),
        summary: operation.get("summary").and_then(Value::as_str).map(String::from),
        request_body: request_body.map(Schema::from),
        response: response.map(Schema::from),
      });
    }
  }

  extraction
}

fn swagger2_body<'d>(
  document: &'d ApiDocument,
  operation: &'d Value,
  shared: Option<&'d Vec<Value>>,
) -> Option<&'d Value> {
  let own = operation.get("parameters").and_then(Value::as_array);
  own
    .into_iter()
    .chain(shared)
    .flatten()
    .filter_map(|parameter| document.follow(parameter))
    .find(|parameter| parameter.get("in").and_then(Value::as_str) == Some("body"))
    .and_then(|parameter| parameter.get("schema"))
}

fn swagger2_response<'d>(document: &'d ApiDocument, operation: &'d Value) -> Option<&'d Value> {
  let response = operation.get("responses")?.get(SUCCESS_STATUS)?;
  document.follow(response)?.get("schema")
}

fn openapi3_body<'d>(document: &'d ApiDocument, operation: &'d Value) -> Option<&'d Value> {
  let body = document.follow(operation.get("requestBody")?)?;
  json_schema(body.get("content")?)
}

fn openapi3_response<'d>(document: &'d ApiDocument, operation: &'d Value) -> Option<&'d Value> {
  let response = operation.get("responses")?.get(SUCCESS_STATUS)?;
  json_schema(document.follow(response)?.get("content")?)
}

/// Schema of the preferred JSON media type in a `content` map.
fn json_schema(content: &Value) -> Option<&Value> {
  let content = content.as_object()?;
  let media = content
    .get(JSON_MEDIA_TYPE)
    .or_else(|| content.iter().find(|(media_type, _)| is_json(media_type)).map(|(_, media)| media))?;
  media.get("schema")
}

/// `application/json`, `application/merge-patch+json`, `text/json`, ...
pub(crate) fn is_json(content_type: &str) -> bool {
  let Ok(media) = MediaType::parse(content_type) else {
    return false;
  };
  let suffix = media.suffix.as_ref().map(mediatype::Name::as_str);
  media.subty.as_str() == "json" || suffix == Some("json")
}
