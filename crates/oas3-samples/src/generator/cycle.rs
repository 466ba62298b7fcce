use clap::ValueEnum;
use serde::Serialize;
use strum::Display;

/// How the synthesizers decide that a nested schema recurs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CycleGuard {
  /// A `$ref` already on the current root-to-node path is not expanded again.
  #[default]
  Structural,
  /// A nested schema whose synthesized name equals the owner's name is not expanded.
  ///
  /// Distinct schemas sharing a name are cut too. A `$ref` appears at most twice on one path,
  /// so recursion without a name clash still ends.
  Named,
}

pub(crate) const NAMED_REPEAT_LIMIT: usize = 2;

/// Outcome of checking a nested schema against the current path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Visit {
  Expand,
  /// The schema is already being synthesized; `declared_as` is the name it was given there.
  /// `root` is set when that declaration is the root of the walk.
  Recurrent { declared_as: String, root: bool },
}

#[derive(Debug, Clone)]
struct Frame<'a> {
  identity: Option<&'a str>,
  name: String,
}

/// The root-to-node path of a synthesis walk.
#[derive(Debug, Clone)]
pub(crate) struct Ancestry<'a> {
  guard: CycleGuard,
  frames: Vec<Frame<'a>>,
}

impl<'a> Ancestry<'a> {
  pub(crate) fn new(guard: CycleGuard, identity: Option<&'a str>, name: impl Into<String>) -> Self {
    Self {
      guard,
      frames: vec![Frame {
        identity,
        name: name.into(),
      }],
    }
  }

  /// Name of the object or class currently being synthesized.
  pub(crate) fn owner(&self) -> &str {
    self.frames.last().map_or("", |frame| frame.name.as_str())
  }

  /// Checks whether the schema identified by `identity` may be expanded below the owner.
  ///
  /// `candidate` is the name the nested schema would get. `None` means the caller applies no
  /// name comparison at this position.
  pub(crate) fn visit(&self, identity: Option<&str>, candidate: Option<&str>) -> Visit {
    match self.guard {
      CycleGuard::Structural => match identity.and_then(|id| self.declared(id)) {
        Some(depth) => self.recurrent_at(depth),
        None => Visit::Expand,
      },
      CycleGuard::Named => {
        if let Some(candidate) = candidate
          && candidate == self.owner()
        {
          return self.recurrent_at(self.frames.len() - 1);
        }
        let Some(identity) = identity else {
          return Visit::Expand;
        };
        let repeats = self.frames.iter().filter(|frame| frame.identity == Some(identity)).count();
        match self.declared(identity) {
          Some(depth) if repeats >= NAMED_REPEAT_LIMIT => self.recurrent_at(depth),
          _ => Visit::Expand,
        }
      }
    }
  }

  pub(crate) fn enter(&mut self, identity: Option<&'a str>, name: impl Into<String>) {
    self.frames.push(Frame {
      identity,
      name: name.into(),
    });
  }

  pub(crate) fn leave(&mut self) {
    if self.frames.len() > 1 {
      self.frames.pop();
    }
  }

  /// Depth of the innermost frame that declared `identity`.
  fn declared(&self, identity: &str) -> Option<usize> {
    self.frames.iter().rposition(|frame| frame.identity == Some(identity))
  }

  fn recurrent_at(&self, depth: usize) -> Visit {
    Visit::Recurrent {
      declared_as: self.frames[depth].name.clone(),
      root: depth == 0,
    }
  }
}
