pub mod cli;
pub mod error;
pub mod fields;
pub mod kibana;

pub use error::{GeneratorError, Result};
pub use kibana::Generator;
