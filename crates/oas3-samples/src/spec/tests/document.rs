use serde_json::json;

use super::{PETSTORE_V2, PETSTORE_V3, fixture};
use crate::spec::{ApiDocument, ApiInfo, SpecVersion, SpecificationSource, resolve};

#[test]
fn test_document_metadata() {
  let document = ApiDocument::from_value(fixture(PETSTORE_V3)).unwrap();
  assert_eq!(document.version(), SpecVersion::OpenApi3);
  assert_eq!(
    document.info(),
    &ApiInfo {
      title: "Swagger Petstore".to_string(),
      version: "2024-05-01".to_string(),
      description: Some("A sample pet store.".to_string()),
    }
  );
  assert_eq!(document.base_url(), "https://petstore.example.com/v1");

  let document = ApiDocument::from_value(fixture(PETSTORE_V2)).unwrap();
  assert_eq!(document.version(), SpecVersion::Swagger2);
  assert_eq!(document.base_url(), "https://petstore.example.com/v1");
}

#[test]
fn test_swagger2_base_url_variants() {
  let base = |extra: serde_json::Value| {
    let mut document = json!({ "swagger": "2.0", "info": { "title": "t", "version": "1" }, "paths": {} });
    if let (Some(target), Some(extra)) = (document.as_object_mut(), extra.as_object()) {
      target.extend(extra.clone());
    }
    ApiDocument::from_value(document).unwrap().base_url()
  };

  assert_eq!(base(json!({})), "");
  assert_eq!(base(json!({ "host": "api.example.com" })), "https://api.example.com");
  assert_eq!(
    base(json!({ "host": "api.example.com", "schemes": ["http"], "basePath": "/v2/" })),
    "http://api.example.com/v2"
  );
}

#[test]
fn test_openapi3_base_url_without_servers() {
  let document = json!({ "openapi": "3.0.3", "info": { "title": "t", "version": "1" }, "paths": {} });
  assert_eq!(ApiDocument::from_value(document).unwrap().base_url(), "");

  let document = json!({
    "openapi": "3.0.3",
    "info": { "title": "t", "version": "1" },
    "servers": [{ "url": "https://api.example.com/" }, { "url": "https://backup.example.com" }],
    "paths": {}
  });
  assert_eq!(ApiDocument::from_value(document).unwrap().base_url(), "https://api.example.com");
}

#[test]
fn test_follow_path_item_reference() {
  let document = json!({
    "swagger": "2.0",
    "info": { "title": "t", "version": "1" },
    "paths": { "/a": { "$ref": "#/x-paths/shared" } },
    "x-paths": { "shared": { "get": { "operationId": "Shared_Get", "responses": {} } } }
  });
  let document = ApiDocument::from_value(document).unwrap();
  let item = &document.raw()["paths"]["/a"];
  let followed = document.follow(item).unwrap();
  assert_eq!(followed["get"]["operationId"], "Shared_Get");
}

#[tokio::test]
async fn test_resolve_in_memory_document() {
  let source = SpecificationSource::document(fixture(PETSTORE_V3)).unwrap();
  let document = resolve(source).await.unwrap();
  assert_eq!(document.info().title, "Swagger Petstore");
  assert_eq!(document.registry().len(), 3);
}

#[tokio::test]
async fn test_resolve_rejects_invalid_documents() {
  let source = SpecificationSource::Document(json!({ "openapi": "4.0.0", "paths": {} }));
  assert!(resolve(source).await.unwrap_err().is_validation());

  let source = SpecificationSource::Document(json!({ "openapi": "3.0.3", "info": { "title": "t", "version": "1" },
    "paths": { "/a": { "get": { "responses": { "200": { "$ref": "#/components/responses/Gone" } } } } } }));
  assert!(resolve(source).await.unwrap_err().is_resolution());
}
