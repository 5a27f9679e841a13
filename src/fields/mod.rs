pub mod parse;
pub mod types;

pub use parse::{load_fields, parse_fields};
pub use types::{Field, FieldEntry, FieldKey};
