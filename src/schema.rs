//! Schema registration and the load/save walk.
//!
//! A settings type lists its members once, in [`Settings::schema`]. Each
//! [`Member`] pairs a [`MemberDescriptor`] with typed accessors into the
//! settings struct, so the walker can read and write fields without any
//! runtime type inspection.
//!
//! ```ignore
//! impl Settings for AppSettings {
//!     fn schema() -> Schema<Self> {
//!         Schema::new()
//!             .member(member!(host => "Host").default("localhost".into()))
//!             .member(member!(width => "Window.Width").default(800))
//!             .member(member!(api_key => "ApiKey"))
//!     }
//! }
//! ```
//!
//! # Loading
//!
//! [`load`] checks that the document root is named after the settings type,
//! then for every member:
//!
//! 1. resolves the member path with [`Node::resolve`];
//! 2. runs the custom loader if one is registered, otherwise the member type's
//!    [`FieldType::load`];
//! 3. falls back to the default when the node is missing, or fails with
//!    [`XmlfigError::MissingNode`] when there is none.
//!
//! Values are written into the settings struct only after every member has
//! been read successfully: a failing document leaves the struct untouched.
//!
//! # Saving
//!
//! [`save`] creates one node per member under a root named after the settings
//! type. Dotted paths create intermediate nodes, shared between members with a
//! common prefix.

use tracing::{debug, trace};

use crate::descriptor::{Loader, MemberDescriptor, Saver};
use crate::error::XmlfigError;
use crate::field::{FieldType, Shape};
use crate::node::Node;

/// A struct whose fields map onto a settings document.
pub trait Settings: Sized + 'static {
    /// The member registration table.
    fn schema() -> Schema<Self>;

    /// Name of the document root. Defaults to the type's own name.
    fn root_name() -> &'static str {
        short_type_name::<Self>()
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// One schema member: descriptor plus accessors into `S`.
pub struct Member<S, T> {
    name: &'static str,
    descriptor: MemberDescriptor<T>,
    get: fn(&S) -> &T,
    get_mut: fn(&mut S) -> &mut T,
}

impl<S, T> Member<S, T> {
    pub fn new(name: &'static str, get: fn(&S) -> &T, get_mut: fn(&mut S) -> &mut T) -> Self {
        Self {
            name,
            descriptor: MemberDescriptor::new(name),
            get,
            get_mut,
        }
    }

    /// Override the document path (default: the member name).
    pub fn path(mut self, path: &str) -> Self {
        self.descriptor.set_path(path);
        self
    }

    /// Value used when the member's node is missing, and by `load_defaults`.
    pub fn default(mut self, value: T) -> Self {
        self.descriptor.set_default(value);
        self
    }

    /// Parse the member's node with `loader` instead of the type's conversion.
    pub fn loader(mut self, loader: Loader<T>) -> Self {
        self.descriptor.set_loader(loader);
        self
    }

    /// Render the member's node with `saver` instead of the type's conversion.
    pub fn saver(mut self, saver: Saver<T>) -> Self {
        self.descriptor.set_saver(saver);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn descriptor(&self) -> &MemberDescriptor<T> {
        &self.descriptor
    }
}

/// Build a [`Member`] from a field of `Self`.
///
/// `member!(port)` uses the field name as document path;
/// `member!(port => "Network.Port")` sets it explicitly.
#[macro_export]
macro_rules! member {
    ($field:ident) => {
        $crate::Member::new(
            stringify!($field),
            |s: &Self| &s.$field,
            |s: &mut Self| &mut s.$field,
        )
    };
    ($field:ident => $path:expr) => {
        $crate::member!($field).path($path)
    };
}

/// Summary of a registered member.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberInfo {
    pub name: &'static str,
    pub path: String,
    pub shape: Shape,
    pub has_default: bool,
}

type Assign<S> = Box<dyn FnOnce(&mut S)>;

/// Hook failures surface as conversion errors on the member path.
fn hook_error(path: &str, raw: String, err: XmlfigError) -> XmlfigError {
    match err {
        XmlfigError::ValueConversion { .. } => err,
        other => XmlfigError::ValueConversion {
            path: path.into(),
            raw,
            reason: other.to_string(),
        },
    }
}

/// Type-erased view of a [`Member`], one per registered field.
trait Binding<S> {
    fn info(&self) -> MemberInfo;
    fn read(&self, root: &Node) -> Result<Assign<S>, XmlfigError>;
    fn write(&self, settings: &S, root: &mut Node) -> Result<(), XmlfigError>;
    fn apply_default(&self, settings: &mut S) -> bool;
}

impl<S: 'static, T: FieldType + Clone + 'static> Binding<S> for Member<S, T> {
    fn info(&self) -> MemberInfo {
        MemberInfo {
            name: self.name,
            path: self.descriptor.path().to_string(),
            shape: T::shape(),
            has_default: self.descriptor.default_value().is_some(),
        }
    }

    fn read(&self, root: &Node) -> Result<Assign<S>, XmlfigError> {
        let path = self.descriptor.path();
        let value = match root.resolve(path) {
            Some(node) => match self.descriptor.loader() {
                Some(loader) => {
                    trace!(path, "loading member with custom loader");
                    loader(node).map_err(|e| hook_error(path, node.value(), e))?
                }
                None => {
                    trace!(path, shape = ?T::shape(), "loading member");
                    T::load(node, path)?
                }
            },
            None => match self.descriptor.default_value() {
                Some(default) => {
                    trace!(path, "member node missing, using default");
                    default.clone()
                }
                None => {
                    return Err(XmlfigError::MissingNode { path: path.into() });
                }
            },
        };
        let get_mut = self.get_mut;
        Ok(Box::new(move |settings: &mut S| *get_mut(settings) = value))
    }

    fn write(&self, settings: &S, root: &mut Node) -> Result<(), XmlfigError> {
        let path = self.descriptor.path();
        let value = (self.get)(settings);
        let (parents, leaf) = match path.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, path),
        };

        let mut node = Node::new(leaf);
        if let Some(saver) = self.descriptor.saver() {
            trace!(path, "saving member with custom saver");
            saver(&mut node, value).map_err(|e| hook_error(path, node.value(), e))?;
        } else if value.is_absent() {
            trace!(path, "member unset, writing empty node");
        } else {
            value.save(&mut node, path)?;
        }

        let mut parent = root;
        if let Some(parents) = parents {
            for segment in parents.split('.') {
                parent = parent.ensure_child(segment);
            }
        }
        parent.push(node);
        Ok(())
    }

    fn apply_default(&self, settings: &mut S) -> bool {
        match self.descriptor.default_value() {
            Some(default) => {
                *(self.get_mut)(settings) = default.clone();
                true
            }
            None => false,
        }
    }
}

/// The registration table of a settings type.
pub struct Schema<S> {
    members: Vec<Box<dyn Binding<S>>>,
}

impl<S: 'static> Schema<S> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Register a member.
    pub fn member<T: FieldType + Clone + 'static>(mut self, member: Member<S, T>) -> Self {
        self.members.push(Box::new(member));
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> Vec<MemberInfo> {
        self.members.iter().map(|m| m.info()).collect()
    }
}

impl<S: 'static> Default for Schema<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Populate `settings` from `tree`.
///
/// Fails with [`XmlfigError::CorruptDocument`] when the root is not named
/// [`Settings::root_name`]. On any error, `settings` is left unchanged.
pub fn load<S: Settings>(settings: &mut S, tree: &Node) -> Result<(), XmlfigError> {
    let expected = S::root_name();
    if tree.name() != expected {
        return Err(XmlfigError::CorruptDocument {
            expected: expected.into(),
            found: tree.name().into(),
        });
    }

    let schema = S::schema();
    let assignments = schema
        .members
        .iter()
        .map(|member| member.read(tree))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(root = expected, members = assignments.len(), "settings document loaded");
    for assign in assignments {
        assign(settings);
    }
    Ok(())
}

/// Render `settings` as a tree rooted at [`Settings::root_name`].
pub fn save<S: Settings>(settings: &S) -> Result<Node, XmlfigError> {
    let mut root = Node::new(S::root_name());
    let schema = S::schema();
    for member in &schema.members {
        member.write(settings, &mut root)?;
    }
    debug!(root = root.name(), members = schema.len(), "settings document built");
    Ok(root)
}

/// Assign every member its default. Members without one keep their value.
///
/// Returns the number of members that received a default.
pub fn apply_defaults<S: Settings>(settings: &mut S) -> usize {
    let schema = S::schema();
    let applied = schema
        .members
        .iter()
        .filter(|member| member.apply_default(settings))
        .count();
    debug!(root = S::root_name(), applied, "defaults applied");
    applied
}
