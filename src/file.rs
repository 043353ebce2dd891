//! Settings file location.
//!
//! A settings object owns exactly one location, fixed when it is built. The
//! builder describes it as a [`SearchPath`] (which directory) plus a file
//! name; this module turns that pair into a concrete path.
//!
//! Nothing here checks whether the file exists: a missing file is the normal
//! first-run state and makes `load_or_default` fall back to defaults.

use std::path::PathBuf;

use crate::error::XmlfigError;
use crate::types::SearchPath;

/// Resolve a [`SearchPath`] to a concrete directory.
///
/// `app_name` is used by `SearchPath::Platform` to construct the platform-specific
/// config directory (e.g. `~/.config/{app_name}/` on Linux).
///
/// Returns `None` if the path cannot be resolved (e.g. no home directory found).
pub fn resolve_search_path(sp: &SearchPath, app_name: &str) -> Option<PathBuf> {
    match sp {
        SearchPath::Platform => {
            let proj = directories::ProjectDirs::from("", "", app_name)?;
            Some(proj.config_dir().to_path_buf())
        }
        SearchPath::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        SearchPath::Cwd => std::env::current_dir().ok(),
        SearchPath::Path(p) => Some(p.clone()),
    }
}

/// Resolve the full path of the settings file.
pub fn resolve_location(
    sp: &SearchPath,
    file_name: &str,
    app_name: &str,
) -> Result<PathBuf, XmlfigError> {
    resolve_search_path(sp, app_name)
        .map(|dir| dir.join(file_name))
        .ok_or(XmlfigError::NoLocation)
}
