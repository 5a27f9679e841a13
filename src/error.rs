use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeneratorError>;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("fields file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse fields YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("field '{name}' is defined more than once")]
    DuplicateField { name: String },
}

/// Wraps an I/O error with the action and path that failed.
pub(crate) fn io_with_path(
    err: std::io::Error,
    action: &str,
    path: &std::path::Path,
) -> GeneratorError {
    GeneratorError::Io(std::io::Error::new(
        err.kind(),
        format!("failed to {} '{}': {}", action, path.display(), err),
    ))
}

impl GeneratorError {
    /// The underlying I/O error kind, if this is an I/O failure.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            GeneratorError::Io(e) => Some(e.kind()),
            _ => None,
        }
    }
}
