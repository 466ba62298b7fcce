pub(crate) mod text;

pub(crate) use text::{indent, join_blocks};
