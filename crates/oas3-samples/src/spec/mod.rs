//! Loading, bundling, validating and dereferencing API specifications.

mod bundle;
mod convert;
mod document;
mod error;
mod loader;
pub(crate) mod refs;
mod registry;
mod schema;
mod source;
mod validate;
mod version;

pub use bundle::Bundler;
pub use convert::convert_swagger2;
pub use document::{ApiDocument, ApiInfo};
pub use error::SpecError;
pub use loader::{LoadedDocument, Location, SpecFormat, SpecLoader};
pub use registry::{SchemaNode, SchemaRegistry};
pub use schema::{Schema, SchemaType, UnsupportedConstruct};
pub use source::SpecificationSource;
pub use validate::validate;
pub use version::SpecVersion;

/// Loads `source`, inlines its external references and validates the result.
pub async fn resolve(source: SpecificationSource) -> Result<ApiDocument, SpecError> {
  let loader = SpecLoader::new();
  resolve_with(&loader, source).await
}

/// [`resolve`] with a caller-supplied loader.
pub async fn resolve_with(loader: &SpecLoader, source: SpecificationSource) -> Result<ApiDocument, SpecError> {
  let loaded = loader.load(source).await?;
  let bundled = Bundler::new(loader).bundle(loaded).await?;
  ApiDocument::from_value(bundled)
}

#[cfg(test)]
mod tests;
