pub(crate) mod identifiers;
pub(crate) mod reserved;
pub(crate) mod singular;

pub(crate) use identifiers::{capitalize, to_field_identifier, to_type_identifier};
pub use singular::{EnglishSingularizer, Singularize};
