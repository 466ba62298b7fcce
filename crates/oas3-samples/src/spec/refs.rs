use percent_encoding::percent_decode_str;
use serde_json::Value;

pub(crate) const REF_KEY: &str = "$ref";

/// Visits every `$ref` string in a document, depth first, in document order.
pub(crate) fn for_each_ref<'a>(value: &'a Value, visit: &mut impl FnMut(&'a str)) {
  match value {
    Value::Object(map) => {
      if let Some(Value::String(reference)) = map.get(REF_KEY) {
        visit(reference);
      }
      for (key, child) in map {
        if key != REF_KEY {
          for_each_ref(child, visit);
        }
      }
    }
    Value::Array(items) => items.iter().for_each(|child| for_each_ref(child, visit)),
    _ => {}
  }
}

/// Rewrites every `$ref` string in a document in place.
pub(crate) fn rewrite_refs(value: &mut Value, rewrite: &mut impl FnMut(&str) -> Option<String>) {
  match value {
    Value::Object(map) => {
      if let Some(Value::String(reference)) = map.get_mut(REF_KEY)
        && let Some(replacement) = rewrite(reference)
      {
        *reference = replacement;
      }
      for (key, child) in map.iter_mut() {
        if key != REF_KEY {
          rewrite_refs(child, rewrite);
        }
      }
    }
    Value::Array(items) => items.iter_mut().for_each(|child| rewrite_refs(child, rewrite)),
    _ => {}
  }
}

/// Splits a reference into its document part and its fragment (`common.json#/definitions/Id`).
pub(crate) fn split_ref(reference: &str) -> (&str, Option<&str>) {
  match reference.split_once('#') {
    Some((document, fragment)) => (document, Some(fragment)),
    None => (reference, None),
  }
}

/// Converts a URI fragment (`/definitions/Foo%20Bar`) into a JSON pointer.
pub(crate) fn fragment_to_pointer(fragment: &str) -> String {
  percent_decode_str(fragment).decode_utf8_lossy().into_owned()
}

/// Looks up an internal reference (`#/...`) in a document.
pub(crate) fn lookup_internal<'a>(document: &'a Value, reference: &str) -> Option<&'a Value> {
  let fragment = reference.strip_prefix('#')?;
  if fragment.is_empty() {
    return Some(document);
  }
  document.pointer(&fragment_to_pointer(fragment))
}

/// Last segment of a JSON pointer, unescaped (`/definitions/Foo` -> `Foo`).
pub(crate) fn pointer_leaf(pointer: &str) -> Option<String> {
  let leaf = pointer.rsplit('/').next().filter(|segment| !segment.is_empty())?;
  Some(leaf.replace("~1", "/").replace("~0", "~"))
}

/// Escapes a key for use as a JSON pointer segment.
pub(crate) fn escape_pointer_segment(segment: &str) -> String {
  segment.replace('~', "~0").replace('/', "~1")
}

/// Follows a chain of internal `$ref`s starting at `value`, returning the first non-reference node.
///
/// Chains longer than [`MAX_REF_HOPS`] or pointing nowhere yield `None`.
pub(crate) fn follow<'a>(document: &'a Value, value: &'a Value) -> Option<&'a Value> {
  let mut current = value;
  for _ in 0..MAX_REF_HOPS {
    match current.get(REF_KEY).and_then(Value::as_str) {
      Some(reference) => current = lookup_internal(document, reference)?,
      None => return Some(current),
    }
  }
  None
}

pub(crate) const MAX_REF_HOPS: usize = 32;
