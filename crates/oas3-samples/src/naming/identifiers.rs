use std::sync::LazyLock;

use any_ascii::any_ascii;
use regex::Regex;

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Transliterates to ASCII, replaces invalid characters with underscores, collapses
/// consecutive underscores, and trims any leading or trailing underscores.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Uppercases the first character and leaves the rest untouched.
///
/// Schema field names are not guaranteed to be capitalized, so every synthesized
/// type name goes through here: `providers` -> `Providers`, `templateLink` -> `TemplateLink`.
pub(crate) fn capitalize(input: &str) -> String {
  let mut chars = input.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
  }
}

/// Converts a schema-derived name into a type identifier shared by every target language.
///
/// # Rules:
/// 1. Sanitizes the base string (underscores inside the name are kept, so
///    `ResourceGroups_CreateOrUpdate` survives unchanged).
/// 2. Capitalizes the first character.
/// 3. If the result starts with a digit, it's prefixed with `T`.
/// 4. If the result is empty, it becomes `Unnamed`.
pub(crate) fn to_type_identifier(name: &str) -> String {
  let mut ident = capitalize(&sanitize(name));

  if ident.is_empty() {
    return "Unnamed".to_string();
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, 'T');
  }

  ident
}

/// Converts a JSON property name into a field identifier, keeping its spelling where possible.
///
/// Unlike [`sanitize`], leading underscores are preserved (`_etag` stays `_etag`) since
/// field names mirror the wire format. Keyword escaping is left to each target language.
pub(crate) fn to_field_identifier(name: &str) -> String {
  let ascii = any_ascii(name);
  let mut ident = INVALID_CHARS_RE.replace_all(&ascii, "_").into_owned();

  if ident.is_empty() {
    return "_".to_string();
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, '_');
  }

  ident
}
