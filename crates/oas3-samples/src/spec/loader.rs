use std::{
  ffi::OsStr,
  fmt,
  path::{Path, PathBuf},
};

use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use reqwest::Url;
use serde_json::Value;

use super::{SpecError, SpecificationSource, source::ensure_object};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  /// Picks a format from an optional file extension, sniffing the content when there is none.
  #[must_use]
  pub fn detect(extension: Option<&str>, content: &[u8]) -> Self {
    if let Some(ext) = extension
      && matches!(ext, "json" | "yaml" | "yml")
    {
      return Self::from_extension(ext);
    }
    match content.iter().find(|byte| !byte.is_ascii_whitespace()) {
      Some(b'{' | b'[') | None => Self::Json,
      Some(_) => Self::Yaml,
    }
  }

  pub fn parse(self, content: &[u8]) -> Result<Value, String> {
    match self {
      Self::Json => serde_json::from_slice(content).map_err(|e| e.to_string()),
      Self::Yaml => serde_yaml::from_slice(content).map_err(|e| e.to_string()),
    }
  }
}

/// Absolute location of a loaded document, used to resolve relative external references.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
  Url(Url),
  File(PathBuf),
}

impl Location {
  /// Resolves a relative document reference (`../common/types.json`) against this location.
  pub fn join(&self, relative: &str) -> Result<Self, SpecError> {
    if relative.starts_with("http://") || relative.starts_with("https://") {
      let url = Url::parse(relative).map_err(|e| SpecError::resolution(relative, e))?;
      return Ok(Self::Url(url));
    }

    match self {
      Self::Url(base) => base
        .join(relative)
        .map(Self::Url)
        .map_err(|e| SpecError::resolution(relative, e)),
      Self::File(path) => {
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::File(normalize(&base.join(relative))))
      }
    }
  }

  fn extension(&self) -> Option<&str> {
    match self {
      Self::Url(url) => Path::new(url.path()).extension().and_then(OsStr::to_str),
      Self::File(path) => path.extension().and_then(OsStr::to_str),
    }
  }
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Url(url) => write!(f, "{url}"),
      Self::File(path) => write!(f, "{}", path.display()),
    }
  }
}

/// A parsed document together with where it was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
  pub value: Value,
  /// `None` for in-memory documents.
  pub location: Option<Location>,
}

/// Fetches and parses specification documents from URLs, files, or memory.
#[derive(Debug, Clone, Default)]
pub struct SpecLoader {
  client: reqwest::Client,
}

impl SpecLoader {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn load(&self, source: SpecificationSource) -> Result<LoadedDocument, SpecError> {
    match source {
      SpecificationSource::Document(value) => {
        ensure_object(&value)?;
        Ok(LoadedDocument { value, location: None })
      }
      SpecificationSource::Url(url) => {
        let location = Location::Url(url);
        let value = self.fetch(&location).await?;
        Ok(LoadedDocument {
          value,
          location: Some(location),
        })
      }
      SpecificationSource::Path(path) => {
        let location = Location::File(path);
        let value = self.fetch(&location).await?;
        Ok(LoadedDocument {
          value,
          location: Some(location),
        })
      }
    }
  }

  /// Reads and parses the document at `location`.
  pub async fn fetch(&self, location: &Location) -> Result<Value, SpecError> {
    let content = match location {
      Location::Url(url) => self.fetch_url(url).await?,
      Location::File(path) => Self::read_file(path).await?,
    };

    let format = SpecFormat::detect(location.extension(), &content);
    let value = format
      .parse(&content)
      .map_err(|reason| SpecError::resolution(location.to_string(), reason))?;

    if value.is_null() {
      return Err(SpecError::resolution(location.to_string(), "document is empty"));
    }
    Ok(value)
  }

  async fn fetch_url(&self, url: &Url) -> Result<Vec<u8>, SpecError> {
    let response = self
      .client
      .get(url.clone())
      .send()
      .await
      .and_then(reqwest::Response::error_for_status)
      .map_err(|e| SpecError::resolution(url.as_str(), e))?;
    let body = response
      .bytes()
      .await
      .map_err(|e| SpecError::resolution(url.as_str(), e))?;
    Ok(body.to_vec())
  }

  async fn read_file(path: &Path) -> Result<Vec<u8>, SpecError> {
    let source_name = path.display().to_string();
    let metadata = tokio::fs::metadata(path)
      .await
      .map_err(|e| SpecError::resolution(&source_name, e))?;
    if metadata.len() == 0 {
      return Err(SpecError::resolution(source_name, "file is empty"));
    }

    let file = AsyncMmapFile::open(path)
      .await
      .map_err(|e| SpecError::resolution(&source_name, e))?;
    Ok(file.as_slice().to_vec())
  }
}

/// Collapses `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      std::path::Component::CurDir => {}
      std::path::Component::ParentDir => {
        if !normalized.pop() {
          normalized.push("..");
        }
      }
      other => normalized.push(other),
    }
  }
  normalized
}
