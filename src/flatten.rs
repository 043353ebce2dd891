//! Flattens a settings tree into dotted key-value pairs.
//!
//! Empty nodes are represented as `(key, None)`. Nodes whose children are all
//! collection entries are collapsed into a single value; any other node with
//! children is recursed into, building dotted key paths:
//! `<Root><Window><Width>800</Width></Window></Root>` → `[("Window.Width", Some("800"))]`

use crate::collection::ENTRY;
use crate::node::Node;

/// Flatten every child of `root` into dotted key-value pairs, in document order.
pub fn flatten(root: &Node) -> Vec<(String, Option<String>)> {
    let mut out = Vec::new();
    for child in root.children() {
        flatten_into(child, child.name().to_string(), &mut out);
    }
    out
}

fn flatten_into(node: &Node, key: String, out: &mut Vec<(String, Option<String>)>) {
    if node.is_empty() {
        out.push((key, None));
        return;
    }
    if !node.has_children() || is_entry_group(node) {
        out.push((key, Some(display_value(node))));
        return;
    }
    for child in node.children() {
        flatten_into(child, dotted(&key, child.name()), out);
    }
}

fn dotted(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn is_entry_group(node: &Node) -> bool {
    node.has_children() && node.children().iter().all(|c| c.name() == ENTRY)
}

/// Render a node as a one-line display string.
///
/// Leaves show their text, entry groups join their entries with `", "`, and
/// any other composite shows `{Name: value, ...}`.
pub fn display_value(node: &Node) -> String {
    if !node.has_children() {
        return node.text().to_string();
    }
    if is_entry_group(node) {
        return node
            .children()
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", ");
    }
    let fields = node
        .children()
        .iter()
        .map(|c| format!("{}: {}", c.name(), display_value(c)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{fields}}}")
}
