use itertools::Itertools;

/// Prefixes every non-empty line with `width` spaces.
#[must_use]
pub(crate) fn indent(text: &str, width: usize) -> String {
  let padding = " ".repeat(width);
  text
    .lines()
    .map(|line| {
      if line.is_empty() {
        String::new()
      } else {
        format!("{padding}{line}")
      }
    })
    .join("\n")
}

/// Joins rendered blocks with one blank line between them and a trailing newline.
#[must_use]
pub(crate) fn join_blocks(blocks: impl IntoIterator<Item = String>) -> String {
  let mut joined = blocks
    .into_iter()
    .filter(|block| !block.is_empty())
    .join("\n\n");
  if !joined.is_empty() {
    joined.push('\n');
  }
  joined
}
