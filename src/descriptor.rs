use crate::error::XmlfigError;
use crate::node::Node;

/// Custom member loader: builds the value from the resolved node.
pub type Loader<T> = fn(&Node) -> Result<T, XmlfigError>;

/// Custom member saver: fills a freshly created, empty node from the value.
pub type Saver<T> = fn(&mut Node, &T) -> Result<(), XmlfigError>;

/// Static metadata bound to one schema member.
pub struct MemberDescriptor<T> {
    path: String,
    loader: Option<Loader<T>>,
    saver: Option<Saver<T>>,
    default: Option<T>,
}

impl<T> MemberDescriptor<T> {
    /// A descriptor whose document path is the member's own name.
    pub fn new(name: &str) -> Self {
        Self {
            path: name.to_string(),
            loader: None,
            saver: None,
            default: None,
        }
    }

    /// Dotted document path, e.g. `"Window.Width"`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn loader(&self) -> Option<Loader<T>> {
        self.loader
    }

    pub fn saver(&self) -> Option<Saver<T>> {
        self.saver
    }

    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    pub(crate) fn set_path(&mut self, path: &str) {
        self.path = path.to_string();
    }

    pub(crate) fn set_loader(&mut self, loader: Loader<T>) {
        self.loader = Some(loader);
    }

    pub(crate) fn set_saver(&mut self, saver: Saver<T>) {
        self.saver = Some(saver);
    }

    pub(crate) fn set_default(&mut self, value: T) {
        self.default = Some(value);
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for MemberDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("path", &self.path)
            .field("loader", &self.loader.is_some())
            .field("saver", &self.saver.is_some())
            .field("default", &self.default)
            .finish()
    }
}
