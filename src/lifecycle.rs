//! The settings lifecycle: load, load defaults, save.
//!
//! A [`SettingsFile`] binds one settings value to one location and one
//! [`Persistence`] collaborator. Each instance owns its location; two
//! instances never share or overwrite each other's path.

use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::XmlfigError;
use crate::persist::{Persistence, XmlFile};
use crate::schema::{self, Settings};

/// Where [`SettingsFile::load_or_default`] took its values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// The persisted document.
    Document,
    /// No document existed; defaults were applied.
    Defaults,
}

/// A settings value bound to its persisted location.
///
/// Derefs to the settings value, so fields read as `file.port`.
#[derive(Debug)]
pub struct SettingsFile<S, P = XmlFile> {
    location: PathBuf,
    persistence: P,
    settings: S,
}

impl<S: Settings> SettingsFile<S, XmlFile> {
    /// Bind `settings` to an XML file at `location`.
    pub fn new(location: impl Into<PathBuf>, settings: S) -> Self {
        Self::with_persistence(location, settings, XmlFile::new())
    }
}

impl<S: Settings, P: Persistence> SettingsFile<S, P> {
    pub fn with_persistence(location: impl Into<PathBuf>, settings: S, persistence: P) -> Self {
        Self {
            location: location.into(),
            persistence,
            settings,
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut S {
        &mut self.settings
    }

    pub fn into_inner(self) -> S {
        self.settings
    }

    /// Load the persisted document if one exists, otherwise apply defaults.
    ///
    /// Errors from reading or mapping an existing document are returned
    /// unchanged; falling back to defaults in that case is the caller's call.
    pub fn load_or_default(&mut self) -> Result<LoadSource, XmlfigError> {
        if !self.persistence.exists(&self.location) {
            debug!(path = %self.location.display(), "no settings document, applying defaults");
            self.load_defaults();
            return Ok(LoadSource::Defaults);
        }

        let tree = self.persistence.read_tree(&self.location)?;
        schema::load(&mut self.settings, &tree)?;
        debug!(path = %self.location.display(), "settings loaded");
        Ok(LoadSource::Document)
    }

    /// Assign every member its declared default; members without one keep their value.
    pub fn load_defaults(&mut self) {
        schema::apply_defaults(&mut self.settings);
    }

    /// Build the full document, then hand it to the persistence collaborator.
    pub fn save(&self) -> Result<(), XmlfigError> {
        let tree = schema::save(&self.settings)?;
        self.persistence.write_tree(&self.location, &tree)?;
        debug!(path = %self.location.display(), "settings saved");
        Ok(())
    }
}

impl<S, P> Deref for SettingsFile<S, P> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.settings
    }
}

impl<S, P> DerefMut for SettingsFile<S, P> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.settings
    }
}
