pub mod convert;
pub mod generate;
pub mod list;

pub use convert::convert_spec;
pub use generate::{GenerateConfig, generate_samples};
pub use list::list_operations;
