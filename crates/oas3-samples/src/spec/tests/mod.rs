mod document;
mod loader;

pub(super) const PETSTORE_V2: &str = include_str!("../../../fixtures/petstore_v2.json");
pub(super) const PETSTORE_V3: &str = include_str!("../../../fixtures/petstore_v3.json");
pub(super) const PETSTORE_V3_YAML: &str = include_str!("../../../fixtures/petstore_v3.yaml");

pub(super) fn fixture(raw: &str) -> serde_json::Value {
  serde_json::from_str(raw).unwrap()
}
