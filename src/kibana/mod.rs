pub mod generator;
pub mod transform;

pub use generator::{
    clean_name, GeneratedPattern, Generator, IndexPatternAttributes, SavedObjects,
};
pub use transform::{FieldFormat, FieldFormatMap, KibanaField};
