use std::{
  collections::{HashMap, HashSet, VecDeque},
  path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::{
  SpecError, SpecVersion,
  loader::{LoadedDocument, Location, SpecLoader},
  refs::{escape_pointer_segment, for_each_ref, fragment_to_pointer, pointer_leaf, rewrite_refs, split_ref},
};

/// A referenced fragment: the document it lives in plus its URI fragment (without `#`).
type Target = (Location, String);

/// Pulls every external `$ref` target into the root document and rewrites the reference to
/// an internal pointer, so later stages only ever deal with `#/...` references.
///
/// Each external document is fetched once. Fragments land in the root's reusable-object
/// container (`definitions`, `parameters`, `responses` for Swagger 2.0; `components/*` for
/// OpenAPI 3.x) under a key derived from the last pointer segment.
pub struct Bundler<'l> {
  loader: &'l SpecLoader,
}

impl<'l> Bundler<'l> {
  #[must_use]
  pub fn new(loader: &'l SpecLoader) -> Self {
    Self { loader }
  }

  pub async fn bundle(&self, document: LoadedDocument) -> Result<Value, SpecError> {
    let LoadedDocument { mut value, location } = document;
    let base = location
      .clone()
      .unwrap_or_else(|| Location::File(PathBuf::from("document.json")));

    let mut queue = VecDeque::new();
    for_each_ref(&value, &mut |reference| {
      if !reference.starts_with('#') {
        queue.push_back(reference.to_string());
      }
    });
    if queue.is_empty() {
      return Ok(value);
    }

    let mut pending: VecDeque<Target> = VecDeque::new();
    for reference in queue {
      pending.push_back(resolve_target(&base, &reference)?);
    }

    let imported = self.collect_imports(pending, location.as_ref()).await?;

    let version = SpecVersion::detect(&value).unwrap_or(SpecVersion::OpenApi3);
    let pointers = assign_pointers(&value, version, imported.keys());

    let mut failure = None;
    rewrite_refs(&mut value, &mut |reference| {
      if reference.starts_with('#') {
        return None;
      }
      let rewritten = rewrite_target(&base, reference, location.as_ref(), &pointers);
      if rewritten.is_none() && failure.is_none() {
        failure = Some(reference.to_string());
      }
      rewritten
    });

    for (target, mut fragment) in imported {
      rewrite_refs(&mut fragment, &mut |reference| {
        rewrite_target(&target.0, reference, location.as_ref(), &pointers)
      });
      let pointer = &pointers[&target];
      insert_at_pointer(&mut value, pointer, fragment);
    }

    match failure {
      Some(reference) => Err(SpecError::resolution(reference, "external reference could not be bundled")),
      None => Ok(value),
    }
  }

  async fn collect_imports(
    &self,
    mut pending: VecDeque<Target>,
    root: Option<&Location>,
  ) -> Result<IndexMap<Target, Value>, SpecError> {
    let mut documents: HashMap<Location, Value> = HashMap::new();
    let mut imported: IndexMap<Target, Value> = IndexMap::new();

    while let Some(target) = pending.pop_front() {
      if imported.contains_key(&target) || root == Some(&target.0) {
        continue;
      }

      if !documents.contains_key(&target.0) {
        let document = self.loader.fetch(&target.0).await?;
        documents.insert(target.0.clone(), document);
      }
      let document = &documents[&target.0];

      let fragment = if target.1.is_empty() {
        document.clone()
      } else {
        document
          .pointer(&fragment_to_pointer(&target.1))
          .cloned()
          .ok_or_else(|| SpecError::resolution(format!("{}#{}", target.0, target.1), "fragment not found"))?
      };

      let mut nested = Vec::new();
      for_each_ref(&fragment, &mut |reference| nested.push(reference.to_string()));
      for reference in nested {
        pending.push_back(resolve_target(&target.0, &reference)?);
      }

      imported.insert(target, fragment);
    }

    Ok(imported)
  }
}

fn resolve_target(base: &Location, reference: &str) -> Result<Target, SpecError> {
  let (document, fragment) = split_ref(reference);
  let location = if document.is_empty() {
    base.clone()
  } else {
    base.join(document)?
  };
  Ok((location, fragment.unwrap_or_default().to_string()))
}

fn rewrite_target(
  base: &Location,
  reference: &str,
  root: Option<&Location>,
  pointers: &HashMap<Target, String>,
) -> Option<String> {
  let target = resolve_target(base, reference).ok()?;
  if root == Some(&target.0) {
    return Some(format!("#{}", target.1));
  }
  pointers.get(&target).cloned()
}

fn assign_pointers<'t>(
  document: &Value,
  version: SpecVersion,
  targets: impl Iterator<Item = &'t Target>,
) -> HashMap<Target, String> {
  let mut taken: HashSet<(String, String)> = HashSet::new();
  let mut pointers = HashMap::new();

  for target in targets {
    let container = container_for(version, &target.1);
    let base_name = pointer_leaf(&target.1)
      .or_else(|| file_stem(&target.0))
      .unwrap_or_else(|| "Imported".to_string());

    let existing = document.pointer(&container).and_then(Value::as_object);
    let mut key = base_name.clone();
    let mut suffix = 2;
    while existing.is_some_and(|map| map.contains_key(&key)) || taken.contains(&(container.clone(), key.clone())) {
      key = format!("{base_name}_{suffix}");
      suffix += 1;
    }

    taken.insert((container.clone(), key.clone()));
    pointers.insert(target.clone(), format!("#{container}/{}", escape_pointer_segment(&key)));
  }

  pointers
}

fn container_for(version: SpecVersion, fragment: &str) -> String {
  let pointer = fragment_to_pointer(fragment);
  let mut segments = pointer.split('/').skip(1);
  match (version, segments.next(), segments.next()) {
    (SpecVersion::Swagger2, Some(kind @ ("parameters" | "responses")), _) => format!("/{kind}"),
    (SpecVersion::OpenApi3, Some("components"), Some(kind)) => format!("/components/{kind}"),
    (version, _, _) => version.schemas_pointer().to_string(),
  }
}

fn file_stem(location: &Location) -> Option<String> {
  let path = match location {
    Location::Url(url) => PathBuf::from(url.path()),
    Location::File(path) => path.clone(),
  };
  Path::new(&path).file_stem().and_then(|stem| stem.to_str()).map(String::from)
}

fn insert_at_pointer(document: &mut Value, pointer: &str, fragment: Value) {
  let segments: Vec<String> = pointer
    .trim_start_matches('#')
    .split('/')
    .skip(1)
    .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
    .collect();
  let Some((leaf, containers)) = segments.split_last() else {
    return;
  };

  let mut current = document;
  for segment in containers {
    let Value::Object(map) = current else {
      return;
    };
    current = map
      .entry(segment.clone())
      .or_insert_with(|| Value::Object(Map::new()));
  }
  if let Value::Object(map) = current {
    map.insert(leaf.clone(), fragment);
  }
}
