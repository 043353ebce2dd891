use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlfigError {
    #[error("Corrupted settings document: root is '{found}', expected '{expected}'")]
    CorruptDocument { expected: String, found: String },

    #[error("Corrupted settings document: missing '{path}' node")]
    MissingNode { path: String },

    #[error("Setting {path} has invalid value \"{raw}\": {reason}")]
    ValueConversion {
        path: String,
        raw: String,
        reason: String,
    },

    #[error("Unsupported schema for '{path}': {reason}")]
    UnsupportedSchema { path: String, reason: String },

    #[error("Failed to parse {path}: {reason}")]
    DocumentRead { path: PathBuf, reason: String },

    #[error("Failed to render {path}: {reason}")]
    DocumentWrite { path: PathBuf, reason: String },

    #[error("Failed to access {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Settings location could not be resolved; check .location() on the builder")]
    NoLocation,

    #[error("App name is required; call .app_name() on the builder")]
    AppNameRequired,
}

impl XmlfigError {
    /// Shorthand for a conversion failure on `path`.
    pub fn conversion(path: &str, raw: &str, reason: impl ToString) -> Self {
        XmlfigError::ValueConversion {
            path: path.into(),
            raw: raw.into(),
            reason: reason.to_string(),
        }
    }

    pub fn unsupported(path: &str, reason: impl ToString) -> Self {
        XmlfigError::UnsupportedSchema {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
