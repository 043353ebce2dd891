use std::marker::PhantomData;

use crate::error::XmlfigError;
use crate::file;
use crate::lifecycle::SettingsFile;
use crate::ops::{self, ConfigResult};
use crate::persist::{Persistence, XmlFile};
use crate::schema::Settings;
use crate::types::{ConfigAction, SearchPath};

/// Entry point for building an xmlfig settings file.
pub struct Xmlfig;

impl Xmlfig {
    pub fn builder<S: Settings>() -> XmlfigBuilder<S> {
        XmlfigBuilder::new()
    }
}

/// Builder for locating, loading and managing a settings file.
///
/// - **Location**: [`location()`](Self::location) plus
///   [`file_name()`](Self::file_name), both derived from
///   [`app_name()`](Self::app_name) unless set.
/// - **Storage**: [`indent()`](Self::indent) for the default XML files, or
///   [`persistence()`](Self::persistence) to swap the collaborator.
pub struct XmlfigBuilder<S: Settings, P = XmlFile> {
    app_name: Option<String>,
    file_name: Option<String>,
    location: SearchPath,
    persistence: P,
    _phantom: PhantomData<S>,
}

impl<S: Settings> XmlfigBuilder<S, XmlFile> {
    fn new() -> Self {
        Self {
            app_name: None,
            file_name: None,
            location: SearchPath::Platform,
            persistence: XmlFile::new(),
            _phantom: PhantomData,
        }
    }

    /// Spaces per nesting level in written documents (default: 2).
    pub fn indent(mut self, indent: usize) -> Self {
        self.persistence = XmlFile::with_indent(indent);
        self
    }
}

impl<S: Settings, P: Persistence> XmlfigBuilder<S, P> {
    /// Set the application name. This derives sensible defaults:
    /// - `file_name` → `"{app_name}.xml"`
    /// - `location` → [`SearchPath::Platform`], the platform config directory for `app_name`
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Override the settings file name (default: `"{app_name}.xml"`).
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Set the directory holding the settings file (default: [`SearchPath::Platform`]).
    pub fn location(mut self, location: SearchPath) -> Self {
        self.location = location;
        self
    }

    /// Replace the storage collaborator.
    pub fn persistence<Q: Persistence>(self, persistence: Q) -> XmlfigBuilder<S, Q> {
        XmlfigBuilder {
            app_name: self.app_name,
            file_name: self.file_name,
            location: self.location,
            persistence,
            _phantom: PhantomData,
        }
    }

    /// Resolve the effective app name, or error if not set.
    fn effective_app_name(&self) -> Result<&str, XmlfigError> {
        self.app_name
            .as_deref()
            .ok_or(XmlfigError::AppNameRequired)
    }

    /// Resolve the effective file name.
    fn effective_file_name(&self) -> Result<String, XmlfigError> {
        if let Some(name) = &self.file_name {
            return Ok(name.clone());
        }
        let app = self.effective_app_name()?;
        Ok(format!("{app}.xml"))
    }

    /// Resolve the full path of the settings file.
    fn effective_location(&self) -> Result<std::path::PathBuf, XmlfigError> {
        let app_name = self.effective_app_name()?;
        let file_name = self.effective_file_name()?;
        file::resolve_location(&self.location, &file_name, app_name)
    }

    /// Bind `S::default()` to the resolved location without reading anything.
    pub fn build(self) -> Result<SettingsFile<S, P>, XmlfigError>
    where
        S: Default,
    {
        let location = self.effective_location()?;
        Ok(SettingsFile::with_persistence(
            location,
            S::default(),
            self.persistence,
        ))
    }

    /// Build, then load the persisted document or fall back to defaults.
    pub fn load(self) -> Result<SettingsFile<S, P>, XmlfigError>
    where
        S: Default,
    {
        let mut settings = self.build()?;
        settings.load_or_default()?;
        Ok(settings)
    }

    /// Handle a `ConfigAction` and print the result to stdout.
    pub fn handle_and_print(self, action: &ConfigAction) -> Result<(), XmlfigError>
    where
        S: Default,
    {
        let result = self.handle(action)?;
        print!("{result}");
        Ok(())
    }

    /// Handle a `ConfigAction` (list / gen / get / reset).
    pub fn handle(self, action: &ConfigAction) -> Result<ConfigResult, XmlfigError>
    where
        S: Default,
    {
        match action {
            ConfigAction::List => {
                let settings = self.load()?;
                ops::list_values(settings.settings())
            }
            ConfigAction::Gen { output } => {
                let tree = ops::generate_document::<S>()?;
                match output {
                    Some(path) => {
                        self.persistence.write_tree(path, &tree)?;
                        Ok(ConfigResult::DocumentWritten { path: path.clone() })
                    }
                    None => {
                        let location = self.effective_location()?;
                        let document = self.persistence.render_tree(&location, &tree)?;
                        Ok(ConfigResult::Document(document))
                    }
                }
            }
            ConfigAction::Get { key } => {
                let settings = self.load()?;
                ops::get_value(settings.settings(), key)
            }
            ConfigAction::Reset => {
                let mut settings = self.build()?;
                settings.load_defaults();
                settings.save()?;
                Ok(ConfigResult::Reset {
                    path: settings.location().to_path_buf(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::TestSettings;
    use crate::lifecycle::LoadSource;
    use crate::node::Node;
    use std::cell::RefCell;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn in_dir(dir: &TempDir) -> XmlfigBuilder<TestSettings> {
        Xmlfig::builder::<TestSettings>()
            .app_name("test")
            .location(SearchPath::Path(dir.path().to_path_buf()))
    }

    const DOCUMENT: &str = "<TestSettings><Port>3000</Port><ApiKey>k</ApiKey></TestSettings>";

    #[test]
    fn app_name_sets_defaults() {
        let builder = Xmlfig::builder::<TestSettings>().app_name("myapp");
        assert_eq!(builder.effective_file_name().unwrap(), "myapp.xml");
        assert_eq!(builder.location, SearchPath::Platform);
    }

    #[test]
    fn override_file_name() {
        let builder = Xmlfig::builder::<TestSettings>()
            .app_name("myapp")
            .file_name("custom.xml");
        assert_eq!(builder.effective_file_name().unwrap(), "custom.xml");
    }

    #[test]
    fn location_joins_directory_and_file_name() {
        let builder = Xmlfig::builder::<TestSettings>()
            .app_name("myapp")
            .location(SearchPath::Path(PathBuf::from("/etc/myapp")));
        assert_eq!(
            builder.effective_location().unwrap(),
            PathBuf::from("/etc/myapp/myapp.xml")
        );
    }

    #[test]
    fn indent_configures_xml_file() {
        let builder = Xmlfig::builder::<TestSettings>().indent(4);
        assert_eq!(builder.persistence.indent(), 4);
    }

    #[test]
    fn missing_app_name_errors() {
        let result = Xmlfig::builder::<TestSettings>().load();
        assert!(matches!(result, Err(XmlfigError::AppNameRequired)));
    }

    #[test]
    fn explicit_file_name_still_needs_app_name() {
        let result = Xmlfig::builder::<TestSettings>()
            .file_name("x.xml")
            .build();
        assert!(matches!(result, Err(XmlfigError::AppNameRequired)));
    }

    // --- Load tests ---

    #[test]
    fn load_with_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("test.xml"), DOCUMENT).unwrap();

        let settings = in_dir(&dir).load().unwrap();
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.host, "localhost");
    }

    #[test]
    fn load_defaults_only() {
        let dir = TempDir::new().unwrap();
        let mut settings = in_dir(&dir).build().unwrap();
        assert_eq!(settings.load_or_default().unwrap(), LoadSource::Defaults);
        assert_eq!(settings.port, 8080);
        assert!(!settings.debug);
        assert!(!dir.path().join("test.xml").exists());
    }

    #[test]
    fn build_does_not_read() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("test.xml"), DOCUMENT).unwrap();
        let settings = in_dir(&dir).build().unwrap();
        assert_eq!(settings.port, 0);
        assert_eq!(settings.location(), dir.path().join("test.xml"));
    }

    #[test]
    fn load_surfaces_corrupt_document() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("test.xml"), "<Other/>").unwrap();
        let result = in_dir(&dir).load();
        assert!(matches!(result, Err(XmlfigError::CorruptDocument { .. })));
    }

    // --- handle tests ---

    #[test]
    fn handle_list() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("test.xml"), DOCUMENT).unwrap();

        let result = in_dir(&dir).handle(&ConfigAction::List).unwrap();
        match result {
            ConfigResult::Listing { entries } => {
                let port = entries.iter().find(|(k, _)| k == "Port").unwrap();
                assert_eq!(port.1, "3000");
            }
            other => panic!("Expected Listing, got {other:?}"),
        }
    }

    #[test]
    fn handle_get() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("test.xml"), DOCUMENT).unwrap();

        let result = in_dir(&dir)
            .handle(&ConfigAction::Get {
                key: "Window.Width".into(),
            })
            .unwrap();
        assert_eq!(
            result,
            ConfigResult::KeyValue {
                key: "Window.Width".into(),
                value: "800".into(),
            }
        );
    }

    #[test]
    fn handle_gen_to_stdout() {
        let dir = TempDir::new().unwrap();
        let result = in_dir(&dir)
            .handle(&ConfigAction::Gen { output: None })
            .unwrap();
        match result {
            ConfigResult::Document(d) => {
                assert!(d.starts_with("<?xml"));
                assert!(d.contains("<Host>localhost</Host>"));
                assert!(d.contains("<Width>800</Width>"));
            }
            other => panic!("Expected Document, got {other:?}"),
        }
        assert!(!dir.path().join("test.xml").exists());
    }

    #[test]
    fn handle_gen_to_file_is_loadable() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("generated").join("defaults.xml");
        let result = in_dir(&dir)
            .handle(&ConfigAction::Gen {
                output: Some(out.clone()),
            })
            .unwrap();
        assert_eq!(result, ConfigResult::DocumentWritten { path: out.clone() });

        let loaded = Xmlfig::builder::<TestSettings>()
            .app_name("test")
            .file_name("defaults.xml")
            .location(SearchPath::Path(dir.path().join("generated")))
            .load()
            .unwrap();
        assert_eq!(loaded.port, 8080);
        assert_eq!(loaded.scale, 1.0);
    }

    #[test]
    fn handle_reset_overwrites_document() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("test.xml"), DOCUMENT).unwrap();

        let result = in_dir(&dir).handle(&ConfigAction::Reset).unwrap();
        assert_eq!(
            result,
            ConfigResult::Reset {
                path: dir.path().join("test.xml")
            }
        );

        let settings = in_dir(&dir).load().unwrap();
        assert_eq!(settings.port, 8080);
    }

    /// Keeps written trees in memory.
    #[derive(Default)]
    struct MemoryStore {
        trees: RefCell<Vec<(PathBuf, Node)>>,
    }

    impl Persistence for MemoryStore {
        fn exists(&self, location: &Path) -> bool {
            self.trees.borrow().iter().any(|(p, _)| p == location)
        }

        fn read_tree(&self, location: &Path) -> Result<Node, XmlfigError> {
            self.trees
                .borrow()
                .iter()
                .rev()
                .find(|(p, _)| p == location)
                .map(|(_, tree)| tree.clone())
                .ok_or_else(|| XmlfigError::DocumentRead {
                    path: location.to_path_buf(),
                    reason: "not stored".into(),
                })
        }

        fn write_tree(&self, location: &Path, tree: &Node) -> Result<(), XmlfigError> {
            self.trees
                .borrow_mut()
                .push((location.to_path_buf(), tree.clone()));
            Ok(())
        }

        fn render_tree(&self, _location: &Path, tree: &Node) -> Result<String, XmlfigError> {
            Ok(format!("{tree:?}"))
        }
    }

    #[test]
    fn custom_persistence_receives_trees() {
        let builder = Xmlfig::builder::<TestSettings>()
            .app_name("test")
            .location(SearchPath::Path(PathBuf::from("/virtual")))
            .persistence(MemoryStore::default());

        let mut settings = builder.build().unwrap();
        settings.load_defaults();
        settings.port = 4242;
        settings.save().unwrap();

        let stored = settings.persistence().read_tree(settings.location()).unwrap();
        assert_eq!(stored.child("Port").unwrap().text(), "4242");

        settings.port = 0;
        assert_eq!(settings.load_or_default().unwrap(), LoadSource::Document);
        assert_eq!(settings.port, 4242);
    }
}
