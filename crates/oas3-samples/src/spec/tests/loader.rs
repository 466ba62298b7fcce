use std::path::PathBuf;

use serde_json::json;

use super::{PETSTORE_V3, PETSTORE_V3_YAML};
use crate::spec::{Location, SpecFormat, SpecLoader, SpecificationSource};

#[test]
fn test_format_detection() {
  assert_eq!(SpecFormat::detect(Some("yaml"), b"{}"), SpecFormat::Yaml);
  assert_eq!(SpecFormat::detect(Some("yml"), b"{}"), SpecFormat::Yaml);
  assert_eq!(SpecFormat::detect(Some("json"), b"openapi: 3.0.3"), SpecFormat::Json);
  assert_eq!(SpecFormat::detect(None, b"  \n{\"openapi\": \"3.0.3\"}"), SpecFormat::Json);
  assert_eq!(SpecFormat::detect(Some("txt"), b"openapi: 3.0.3"), SpecFormat::Yaml);
  assert_eq!(SpecFormat::detect(None, b""), SpecFormat::Json);
}

#[test]
fn test_location_join() {
  let base = Location::File(PathBuf::from("/specs/network/stable/network.json"));
  assert_eq!(
    base.join("../../common/types.json").unwrap(),
    Location::File(PathBuf::from("/specs/common/types.json"))
  );
  assert_eq!(
    base.join("./routes.json").unwrap(),
    Location::File(PathBuf::from("/specs/network/stable/routes.json"))
  );

  let remote = Location::Url("https://example.com/specs/main.json".parse().unwrap());
  assert_eq!(
    remote.join("common/types.json").unwrap().to_string(),
    "https://example.com/specs/common/types.json"
  );
  assert_eq!(
    base.join("https://example.com/shared.json").unwrap().to_string(),
    "https://example.com/shared.json"
  );
}

#[tokio::test]
async fn test_load_json_and_yaml_files() {
  let dir = tempfile::tempdir().unwrap();
  let json_path = dir.path().join("petstore.json");
  let yaml_path = dir.path().join("petstore.yaml");
  tokio::fs::write(&json_path, PETSTORE_V3).await.unwrap();
  tokio::fs::write(&yaml_path, PETSTORE_V3_YAML).await.unwrap();

  let loader = SpecLoader::new();
  let json = loader.load(SpecificationSource::Path(json_path.clone())).await.unwrap();
  assert_eq!(json.value["info"]["title"], "Swagger Petstore");
  assert_eq!(json.location, Some(Location::File(json_path)));

  let yaml = loader.load(SpecificationSource::Path(yaml_path)).await.unwrap();
  assert_eq!(yaml.value["openapi"], "3.0.3");
  assert_eq!(yaml.value["info"]["version"], "2024-05-01");
  assert_eq!(
    yaml.value.pointer("/components/schemas/NewPet/properties/name/type"),
    Some(&json!("string"))
  );
}

#[tokio::test]
async fn test_load_failures_are_resolution_errors() {
  let dir = tempfile::tempdir().unwrap();
  let empty = dir.path().join("empty.json");
  let broken = dir.path().join("broken.json");
  tokio::fs::write(&empty, "").await.unwrap();
  tokio::fs::write(&broken, "{ \"openapi\": ").await.unwrap();

  let loader = SpecLoader::new();
  for path in [empty, broken, dir.path().join("missing.json")] {
    let error = loader.load(SpecificationSource::Path(path.clone())).await.unwrap_err();
    assert!(error.is_resolution(), "{} should fail to resolve", path.display());
  }
}

#[tokio::test]
async fn test_load_in_memory_document() {
  let loader = SpecLoader::new();
  let loaded = loader
    .load(SpecificationSource::Document(json!({ "swagger": "2.0" })))
    .await
    .unwrap();
  assert_eq!(loaded.location, None);

  let error = loader
    .load(SpecificationSource::Document(json!(null)))
    .await
    .unwrap_err();
  assert!(error.is_resolution());
}
