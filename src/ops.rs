//! Settings operations: default document generation, key lookup, listing, and
//! result types.
//!
//! Provides the logic behind `settings list`, `settings gen`, `settings get`,
//! and the `ConfigResult` enum that callers use to display results. Every
//! operation works on the tree the schema walker builds, so what is listed is
//! exactly what would be saved.

use std::fmt;
use std::path::PathBuf;

use crate::error::XmlfigError;
use crate::flatten;
use crate::node::Node;
use crate::schema::{self, Settings};

const NOT_SET: &str = "<not set>";

/// Result of a settings operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A rendered document holding every default value.
    Document(String),
    /// Confirmation that a default document was written to a file.
    DocumentWritten { path: PathBuf },
    /// A key's current value.
    KeyValue { key: String, value: String },
    /// All current settings as key-value pairs.
    Listing { entries: Vec<(String, String)> },
    /// Confirmation that defaults were restored and saved.
    Reset { path: PathBuf },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Document(d) => write!(f, "{d}"),
            ConfigResult::DocumentWritten { path } => {
                write!(f, "Settings document written to {}", path.display())
            }
            ConfigResult::KeyValue { key, value } => write!(f, "{key} = {value}"),
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
            ConfigResult::Reset { path } => {
                write!(f, "Settings reset to defaults in {}", path.display())
            }
        }
    }
}

/// Build the tree of a settings value holding every declared default.
///
/// Members without a default keep their `Default::default()` value.
pub fn generate_document<S: Settings + Default>() -> Result<Node, XmlfigError> {
    let mut settings = S::default();
    schema::apply_defaults(&mut settings);
    schema::save(&settings)
}

/// Get a current value by dotted document key (e.g. `"Window.Width"`) or by
/// registered member name (e.g. `"width"`).
pub fn get_value<S: Settings>(settings: &S, key: &str) -> Result<ConfigResult, XmlfigError> {
    let path = S::schema()
        .members()
        .into_iter()
        .find(|member| member.name == key)
        .map(|member| member.path)
        .unwrap_or_else(|| key.to_string());

    let tree = schema::save(settings)?;
    let node = tree
        .resolve(&path)
        .ok_or_else(|| XmlfigError::KeyNotFound(key.into()))?;

    let value = if node.is_empty() {
        NOT_SET.to_string()
    } else {
        flatten::display_value(node)
    };

    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value,
    })
}

/// List all current values as flattened dotted key-value pairs.
pub fn list_values<S: Settings>(settings: &S) -> Result<ConfigResult, XmlfigError> {
    let tree = schema::save(settings)?;
    let entries = flatten::flatten(&tree)
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_else(|| NOT_SET.to_string())))
        .collect();
    Ok(ConfigResult::Listing { entries })
}
