use serde_json::{Map, Value, json};

use super::{SpecError, SpecVersion, refs::rewrite_refs};
use crate::generator::operations::HttpMethod;

const OPENAPI_VERSION: &str = "3.0.3";
const DEFAULT_MEDIA_TYPE: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART_FORM: &str = "multipart/form-data";

/// Parameter keywords that move into the parameter's `schema` in OpenAPI 3.
const SCHEMA_KEYWORDS: &[&str] = &[
  "type",
  "format",
  "items",
  "enum",
  "default",
  "minimum",
  "maximum",
  "exclusiveMinimum",
  "exclusiveMaximum",
  "minLength",
  "maxLength",
  "pattern",
  "minItems",
  "maxItems",
  "uniqueItems",
  "multipleOf",
];

/// Converts a Swagger 2.0 document into an equivalent OpenAPI 3.0.3 document.
pub fn convert_swagger2(document: &Value) -> Result<Value, SpecError> {
  if SpecVersion::detect(document) != Some(SpecVersion::Swagger2) {
    return Err(SpecError::validation("#/swagger", "expected a Swagger 2.0 document"));
  }
  Swagger2Converter::new(document).convert()
}

struct Swagger2Converter<'a> {
  source: &'a Value,
  consumes: Vec<String>,
  produces: Vec<String>,
}

impl<'a> Swagger2Converter<'a> {
  fn new(source: &'a Value) -> Self {
    Self {
      source,
      consumes: media_types(source.get("consumes")),
      produces: media_types(source.get("produces")),
    }
  }

  fn convert(&self) -> Result<Value, SpecError> {
    let mut output = Map::new();
    output.insert("openapi".into(), json!(OPENAPI_VERSION));
    output.insert("info".into(), self.source.get("info").cloned().unwrap_or_else(|| json!({})));

    let servers = self.servers();
    if !servers.is_empty() {
      output.insert("servers".into(), Value::Array(servers));
    }

    output.insert("paths".into(), Value::Object(self.paths()?));
    output.insert("components".into(), Value::Object(self.components()));

    for key in ["security", "tags", "externalDocs"] {
      if let Some(value) = self.source.get(key) {
        output.insert(key.into(), value.clone());
      }
    }
    copy_extensions(self.source, &mut output);

    let mut converted = Value::Object(output);
    rewrite_refs(&mut converted, &mut |reference| self.rewrite_reference(reference));
    Ok(converted)
  }

  fn servers(&self) -> Vec<Value> {
    let Some(host) = self.source.get("host").and_then(Value::as_str) else {
      return Vec::new();
    };
    let base_path = self.source.get("basePath").and_then(Value::as_str).unwrap_or_default();
    let schemes: Vec<&str> = self
      .source
      .get("schemes")
      .and_then(Value::as_array)
      .map(|schemes| schemes.iter().filter_map(Value::as_str).collect())
      .filter(|schemes: &Vec<&str>| !schemes.is_empty())
      .unwrap_or_else(|| vec!["https"]);

    schemes
      .into_iter()
      .map(|scheme| json!({ "url": format!("{scheme}://{host}{base_path}") }))
      .collect()
  }

  fn paths(&self) -> Result<Map<String, Value>, SpecError> {
    let mut paths = Map::new();
    let Some(source_paths) = self.source.get("paths").and_then(Value::as_object) else {
      return Ok(paths);
    };

    for (path, item) in source_paths {
      let Some(item) = item.as_object() else {
        return Err(SpecError::validation(format!("#/paths/{path}"), "path item must be an object"));
      };
      let shared = item.get("parameters").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();

      let mut converted = Map::new();
      for (key, value) in item {
        if key == "parameters" {
          let parameters = self.plain_parameters(shared);
          if !parameters.is_empty() {
            converted.insert(key.clone(), Value::Array(parameters));
          }
        } else if key.parse::<HttpMethod>().is_ok() {
          converted.insert(key.clone(), self.operation(value, shared));
        } else {
          converted.insert(key.clone(), value.clone());
        }
      }
      paths.insert(path.clone(), Value::Object(converted));
    }

    Ok(paths)
  }

  fn operation(&self, operation: &Value, shared: &[Value]) -> Value {
    let Some(source) = operation.as_object() else {
      return operation.clone();
    };

    let consumes = Some(media_types(source.get("consumes")))
      .filter(|types| !types.is_empty())
      .unwrap_or_else(|| self.consumes.clone());
    let produces = Some(media_types(source.get("produces")))
      .filter(|types| !types.is_empty())
      .unwrap_or_else(|| self.produces.clone());
    let own = source.get("parameters").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();

    let mut converted = Map::new();
    for (key, value) in source {
      match key.as_str() {
        "consumes" | "produces" | "schemes" => {}
        "parameters" => {
          let parameters = self.plain_parameters(own);
          if !parameters.is_empty() {
            converted.insert(key.clone(), Value::Array(parameters));
          }
        }
        "responses" => {
          converted.insert(key.clone(), self.responses(value, &produces));
        }
        _ => {
          converted.insert(key.clone(), value.clone());
        }
      }
    }

    if let Some(body) = self.request_body(own, shared, &consumes) {
      converted.insert("requestBody".into(), body);
    }

    Value::Object(converted)
  }

  /// Non-body parameters, with their type keywords moved into `schema`.
  fn plain_parameters(&self, parameters: &[Value]) -> Vec<Value> {
    parameters
      .iter()
      .filter(|parameter| !matches!(self.location_of(parameter), Some("body" | "formData")))
      .map(|parameter| {
        if parameter.get("$ref").is_some() {
          parameter.clone()
        } else {
          convert_parameter(parameter)
        }
      })
      .collect()
  }

  /// Builds `requestBody` from an `in: body` parameter (operation level wins over path level)
  /// or from `formData` parameters.
  fn request_body(&self, own: &[Value], shared: &[Value], consumes: &[String]) -> Option<Value> {
    let body = own
      .iter()
      .chain(shared)
      .find(|parameter| self.location_of(parameter) == Some("body"));

    if let Some(parameter) = body {
      if let Some(reference) = parameter.get("$ref").and_then(Value::as_str) {
        return Some(json!({ "$ref": reference }));
      }
      return Some(body_from_parameter(parameter, consumes));
    }

    let form: Vec<&Value> = own
      .iter()
      .chain(shared)
      .filter_map(|parameter| self.resolve_parameter(parameter))
      .filter(|parameter| parameter.get("in").and_then(Value::as_str) == Some("formData"))
      .collect();
    if form.is_empty() {
      return None;
    }
    Some(form_body(&form))
  }

  fn responses(&self, responses: &Value, produces: &[String]) -> Value {
    let Some(responses) = responses.as_object() else {
      return responses.clone();
    };
    Value::Object(
      responses
        .iter()
        .map(|(status, response)| (status.clone(), convert_response(response, produces)))
        .collect(),
    )
  }

  fn components(&self) -> Map<String, Value> {
    let mut components = Map::new();

    if let Some(definitions) = self.source.get("definitions").filter(|value| value.is_object()) {
      components.insert("schemas".into(), definitions.clone());
    }

    if let Some(parameters) = self.source.get("parameters").and_then(Value::as_object) {
      let mut plain = Map::new();
      let mut bodies = Map::new();
      for (name, parameter) in parameters {
        match parameter.get("in").and_then(Value::as_str) {
          Some("body") => {
            bodies.insert(name.clone(), body_from_parameter(parameter, &self.consumes));
          }
          Some("formData") => {}
          _ => {
            plain.insert(name.clone(), convert_parameter(parameter));
          }
        }
      }
      if !plain.is_empty() {
        components.insert("parameters".into(), Value::Object(plain));
      }
      if !bodies.is_empty() {
        components.insert("requestBodies".into(), Value::Object(bodies));
      }
    }

    if let Some(responses) = self.source.get("responses").and_then(Value::as_object) {
      let converted = responses
        .iter()
        .map(|(name, response)| (name.clone(), convert_response(response, &self.produces)))
        .collect();
      components.insert("responses".into(), Value::Object(converted));
    }

    if let Some(schemes) = self.source.get("securityDefinitions").and_then(Value::as_object) {
      let converted = schemes
        .iter()
        .map(|(name, scheme)| (name.clone(), convert_security_scheme(scheme)))
        .collect();
      components.insert("securitySchemes".into(), Value::Object(converted));
    }

    components
  }

  fn resolve_parameter<'p>(&self, parameter: &'p Value) -> Option<&'p Value>
  where
    'a: 'p,
  {
    match parameter.get("$ref").and_then(Value::as_str) {
      Some(reference) => reference
        .strip_prefix("#/parameters/")
        .and_then(|name| self.source.get("parameters")?.get(name)),
      None => Some(parameter),
    }
  }

  fn location_of<'p>(&self, parameter: &'p Value) -> Option<&'p str>
  where
    'a: 'p,
  {
    match parameter.get("$ref").and_then(Value::as_str) {
      Some(reference) => reference
        .strip_prefix("#/parameters/")
        .and_then(|name| self.source.get("parameters")?.get(name)?.get("in")?.as_str()),
      None => parameter.get("in").and_then(Value::as_str),
    }
  }

  fn rewrite_reference(&self, reference: &str) -> Option<String> {
    if let Some(name) = reference.strip_prefix("#/definitions/") {
      return Some(format!("#/components/schemas/{name}"));
    }
    if let Some(name) = reference.strip_prefix("#/responses/") {
      return Some(format!("#/components/responses/{name}"));
    }
    if let Some(name) = reference.strip_prefix("#/parameters/") {
      let is_body = self
        .source
        .pointer(&format!("/parameters/{name}/in"))
        .and_then(Value::as_str)
        == Some("body");
      let container = if is_body { "requestBodies" } else { "parameters" };
      return Some(format!("#/components/{container}/{name}"));
    }
    None
  }
}

fn media_types(value: Option<&Value>) -> Vec<String> {
  value
    .and_then(Value::as_array)
    .map(|types| types.iter().filter_map(Value::as_str).map(String::from).collect())
    .unwrap_or_default()
}

fn content_for(schema: &Value, media_types: &[String]) -> Value {
  let types: Vec<&str> = if media_types.is_empty() {
    vec![DEFAULT_MEDIA_TYPE]
  } else {
    media_types.iter().map(String::as_str).collect()
  };
  Value::Object(
    types
      .into_iter()
      .map(|media_type| (media_type.to_string(), json!({ "schema": convert_file_type(schema) })))
      .collect(),
  )
}

fn body_from_parameter(parameter: &Value, consumes: &[String]) -> Value {
  let mut body = Map::new();
  if let Some(description) = parameter.get("description") {
    body.insert("description".into(), description.clone());
  }
  let schema = parameter.get("schema").cloned().unwrap_or_else(|| json!({}));
  body.insert("content".into(), content_for(&schema, consumes));
  if parameter.get("required").and_then(Value::as_bool) == Some(true) {
    body.insert("required".into(), Value::Bool(true));
  }
  copy_extensions(parameter, &mut body);
  Value::Object(body)
}

fn form_body(parameters: &[&Value]) -> Value {
  let mut properties = Map::new();
  let mut required = Vec::new();
  let mut has_file = false;

  for parameter in parameters {
    let Some(name) = parameter.get("name").and_then(Value::as_str) else {
      continue;
    };
    has_file |= parameter.get("type").and_then(Value::as_str) == Some("file");
    properties.insert(name.to_string(), convert_file_type(&schema_of(parameter)));
    if parameter.get("required").and_then(Value::as_bool) == Some(true) {
      required.push(json!(name));
    }
  }

  let mut schema = Map::new();
  schema.insert("type".into(), json!("object"));
  schema.insert("properties".into(), Value::Object(properties));
  if !required.is_empty() {
    schema.insert("required".into(), Value::Array(required));
  }

  let media_type = if has_file { MULTIPART_FORM } else { FORM_URLENCODED };
  json!({ "content": { media_type: { "schema": Value::Object(schema) } } })
}

fn convert_parameter(parameter: &Value) -> Value {
  let Some(source) = parameter.as_object() else {
    return parameter.clone();
  };
  let mut converted = Map::new();
  for (key, value) in source {
    if !SCHEMA_KEYWORDS.contains(&key.as_str()) && key != "collectionFormat" && key != "allowEmptyValue" {
      converted.insert(key.clone(), value.clone());
    }
  }
  converted.insert("schema".into(), schema_of(parameter));
  Value::Object(converted)
}

fn schema_of(parameter: &Value) -> Value {
  let mut schema = Map::new();
  if let Some(source) = parameter.as_object() {
    for keyword in SCHEMA_KEYWORDS {
      if let Some(value) = source.get(*keyword) {
        schema.insert((*keyword).to_string(), value.clone());
      }
    }
  }
  Value::Object(schema)
}

fn convert_response(response: &Value, produces: &[String]) -> Value {
  let Some(source) = response.as_object() else {
    return response.clone();
  };
  if source.contains_key("$ref") {
    return response.clone();
  }

  let mut converted = Map::new();
  converted.insert(
    "description".into(),
    source.get("description").cloned().unwrap_or_else(|| json!("")),
  );
  if let Some(schema) = source.get("schema") {
    converted.insert("content".into(), content_for(schema, produces));
  }
  if let Some(headers) = source.get("headers").and_then(Value::as_object) {
    let headers = headers
      .iter()
      .map(|(name, header)| {
        let mut converted = Map::new();
        if let Some(description) = header.get("description") {
          converted.insert("description".into(), description.clone());
        }
        converted.insert("schema".into(), schema_of(header));
        (name.clone(), Value::Object(converted))
      })
      .collect();
    converted.insert("headers".into(), Value::Object(headers));
  }
  copy_extensions(response, &mut converted);
  Value::Object(converted)
}

fn convert_security_scheme(scheme: &Value) -> Value {
  let kind = scheme.get("type").and_then(Value::as_str).unwrap_or_default();
  let description = scheme.get("description").cloned();
  let mut converted = match kind {
    "basic" => json!({ "type": "http", "scheme": "basic" }),
    "oauth2" => {
      let flow = match scheme.get("flow").and_then(Value::as_str) {
        Some("implicit") => "implicit",
        Some("password") => "password",
        Some("application") => "clientCredentials",
        _ => "authorizationCode",
      };
      let mut flow_object = Map::new();
      for (from, to) in [("authorizationUrl", "authorizationUrl"), ("tokenUrl", "tokenUrl")] {
        if let Some(value) = scheme.get(from) {
          flow_object.insert(to.into(), value.clone());
        }
      }
      flow_object.insert("scopes".into(), scheme.get("scopes").cloned().unwrap_or_else(|| json!({})));
      json!({ "type": "oauth2", "flows": { flow: Value::Object(flow_object) } })
    }
    _ => scheme.clone(),
  };
  if let (Some(description), Value::Object(map)) = (description, &mut converted) {
    map.insert("description".into(), description);
  }
  converted
}

/// Swagger 2.0's `type: file` becomes a binary string.
fn convert_file_type(schema: &Value) -> Value {
  if schema.get("type").and_then(Value::as_str) == Some("file") {
    return json!({ "type": "string", "format": "binary" });
  }
  schema.clone()
}

fn copy_extensions(source: &Value, target: &mut Map<String, Value>) {
  if let Some(source) = source.as_object() {
    for (key, value) in source.iter().filter(|(key, _)| key.starts_with("x-")) {
      target.insert(key.clone(), value.clone());
    }
  }
}
