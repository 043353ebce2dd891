//! Settings persistence: read and write settings documents.
//!
//! The mapping engine itself never touches storage. It consumes a [`Node`]
//! tree and produces one; a [`Persistence`] implementation moves trees in and
//! out of wherever they live. [`XmlFile`] is the default, backed by XML files
//! on disk: `roxmltree` parses, `quick-xml` renders.
//!
//! Saving always renders the whole document in memory before the file is
//! touched, so a failure while building or rendering the tree leaves the
//! previously persisted document as it was.

use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use crate::error::XmlfigError;
use crate::node::Node;

/// Indentation width used when none is configured.
pub const DEFAULT_INDENT: usize = 2;

/// Storage collaborator for settings documents.
pub trait Persistence {
    fn exists(&self, location: &Path) -> bool;
    fn read_tree(&self, location: &Path) -> Result<Node, XmlfigError>;
    fn write_tree(&self, location: &Path, tree: &Node) -> Result<(), XmlfigError>;
    /// Render `tree` to text without storing it. `location` is only used in errors.
    fn render_tree(&self, location: &Path, tree: &Node) -> Result<String, XmlfigError>;
}

/// XML files on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlFile {
    indent: usize,
}

impl XmlFile {
    pub fn new() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }

    /// Spaces per nesting level in written documents. `0` writes one line.
    pub fn with_indent(indent: usize) -> Self {
        Self { indent }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }
}

impl Default for XmlFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Persistence for XmlFile {
    fn exists(&self, location: &Path) -> bool {
        location.is_file()
    }

    fn read_tree(&self, location: &Path) -> Result<Node, XmlfigError> {
        let content = std::fs::read_to_string(location).map_err(|e| XmlfigError::IoError {
            path: location.to_path_buf(),
            source: e,
        })?;
        parse_document(&content, location)
    }

    fn render_tree(&self, location: &Path, tree: &Node) -> Result<String, XmlfigError> {
        render_document(tree, self.indent).map_err(|reason| XmlfigError::DocumentWrite {
            path: location.to_path_buf(),
            reason,
        })
    }

    fn write_tree(&self, location: &Path, tree: &Node) -> Result<(), XmlfigError> {
        let content = self.render_tree(location, tree)?;

        if let Some(parent) = location.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| XmlfigError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        std::fs::write(location, content).map_err(|e| XmlfigError::IoError {
            path: location.to_path_buf(),
            source: e,
        })?;
        debug!(path = %location.display(), "settings document written");
        Ok(())
    }
}

/// Pure function: parse XML text into a tree. `path` is only used in errors.
///
/// Element names and text are kept; attributes, comments and processing
/// instructions are dropped. Whitespace-only text is ignored in elements that
/// have element children; leaf text is kept verbatim.
pub fn parse_document(content: &str, path: &Path) -> Result<Node, XmlfigError> {
    let doc = roxmltree::Document::parse(content).map_err(|e| XmlfigError::DocumentRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(convert_element(doc.root_element()))
}

fn convert_element(element: roxmltree::Node<'_, '_>) -> Node {
    let mut node = Node::new(element.tag_name().name());
    let has_elements = element.children().any(|c| c.is_element());
    let mut text = String::new();
    for child in element.children() {
        if child.is_element() {
            node.push(convert_element(child));
        } else if child.is_text()
            && let Some(t) = child.text()
            && !(has_elements && t.trim().is_empty())
        {
            text.push_str(t);
        }
    }
    node.set_text(text);
    node
}

/// Pure function: render a tree as an XML document with declaration.
pub fn render_document(tree: &Node, indent: usize) -> Result<String, String> {
    let mut writer = if indent > 0 {
        Writer::new_with_indent(Vec::new(), b' ', indent)
    } else {
        Writer::new(Vec::new())
    };
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| e.to_string())?;
    write_element(&mut writer, tree)?;
    let mut content = String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())?;
    content.push('\n');
    Ok(content)
}

fn write_element(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<(), String> {
    if node.is_empty() {
        return writer
            .write_event(Event::Empty(BytesStart::new(node.name())))
            .map_err(|e| e.to_string());
    }

    writer
        .write_event(Event::Start(BytesStart::new(node.name())))
        .map_err(|e| e.to_string())?;
    if !node.text().is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(node.text())))
            .map_err(|e| e.to_string())?;
    }
    for child in node.children() {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(node.name())))
        .map_err(|e| e.to_string())
}
