/// Turns a plural field name into the name of one of its elements.
///
/// Array-of-object properties name their element type after the singular form of the
/// field (`providers` -> `provider`). English pluralization is heuristic, so the model
/// synthesizer takes this as an injected capability rather than calling a library directly.
pub trait Singularize: Send + Sync {
  fn singularize(&self, word: &str) -> String;
}

/// Default [`Singularize`] implementation backed by `cruet`'s English inflection rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishSingularizer;

impl Singularize for EnglishSingularizer {
  fn singularize(&self, word: &str) -> String {
    if word.is_empty() {
      return String::new();
    }
    cruet::to_singular(word)
  }
}

impl<F> Singularize for F
where
  F: Fn(&str) -> String + Send + Sync,
{
  fn singularize(&self, word: &str) -> String {
    self(word)
  }
}
