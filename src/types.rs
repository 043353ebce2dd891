use std::path::PathBuf;

/// Where a settings file lives.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
}

/// A settings operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Show every setting as a dotted `key = value` pair.
    List,
    /// Render a document holding every default value.
    Gen { output: Option<PathBuf> },
    /// Show one setting by dotted key.
    Get { key: String },
    /// Restore defaults and save.
    Reset,
}
