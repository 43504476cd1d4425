//! Valve KeyValues (VDF) text documents
//!
//! Both inputs of the pipeline are VDF text: the remote app-info payload for an
//! application and the local `config.vdf` key store. This module parses that
//! format into an immutable tree of [`VdfNode`]s and provides the small path
//! lookup helpers the resolver and key store use to stay declarative.
//!
//! # Format
//!
//! ```text
//! "730"
//! {
//!     "appid"     "730"
//!     "common"
//!     {
//!         "name"  "Counter-Strike 2"
//!     }
//!     "depots"
//!     {
//!         "731"
//!         {
//!             "manifests" { "public" { "gid" "123" "size" "5000" } }
//!         }
//!     }
//! }
//! ```
//!
//! Each key is followed either by a string value (an attribute) or by a braced
//! block (a child node). [`parse`] returns the first top-level block as the root.
//!
//! # Lookup
//!
//! ```rust
//! use permascript::vdf;
//!
//! let root = vdf::parse(r#""app" { "common" { "name" "Demo" } }"#).unwrap();
//! assert_eq!(root.attribute_path(&["common"], "name"), Some("Demo"));
//! assert_eq!(root.attribute_ci_path(&["COMMON"], "NAME"), Some("Demo"));
//! ```

mod parser;

pub use parser::{VdfParseError, parse};

use std::fmt;

/// One node of a parsed VDF document.
///
/// Attributes keep insertion order and unique keys (a repeated key replaces the
/// earlier value). Children keep insertion order and may share a key; lookups by
/// key return the last such child.
///
/// Dropping and debug-printing never recurse, so a tree of any depth the
/// parser accepts can be released safely.
#[derive(Default)]
pub struct VdfNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<(String, VdfNode)>,
}

impl Drop for VdfNode {
    fn drop(&mut self) {
        let mut pending: Vec<VdfNode> =
            std::mem::take(&mut self.children).into_iter().map(|(_, node)| node).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(std::mem::take(&mut node.children).into_iter().map(|(_, child)| child));
        }
    }
}

impl fmt::Debug for VdfNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VdfNode")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .field("children", &self.children.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}

impl VdfNode {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn insert_attribute(&mut self, key: String, value: String) {
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub(crate) fn push_child(&mut self, key: String, child: VdfNode) {
        self.children.push((key, child));
    }

    /// Key this node was stored under in its parent.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the attribute `key` (exact match).
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Iterate attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Child stored under `key` (exact match, last one wins).
    pub fn child(&self, key: &str) -> Option<&VdfNode> {
        self.children.iter().rev().find(|(k, _)| k == key).map(|(_, node)| node)
    }

    /// Iterate children in document order, including duplicate keys.
    pub fn children(&self) -> impl Iterator<Item = (&str, &VdfNode)> {
        self.children.iter().map(|(k, node)| (k.as_str(), node))
    }

    /// Walk a sequence of child keys from this node.
    ///
    /// An empty path returns `self`.
    pub fn child_path(&self, path: &[&str]) -> Option<&VdfNode> {
        path.iter().try_fold(self, |node, segment| node.child(segment))
    }

    /// Read `attribute` on the node reached by `path`.
    pub fn attribute_path(&self, path: &[&str], attribute: &str) -> Option<&str> {
        self.child_path(path)?.attribute(attribute)
    }

    /// Attribute lookup ignoring ASCII case.
    pub fn attribute_ci(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// All children whose key matches `key` ignoring ASCII case, in document order.
    pub fn children_ci<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a VdfNode> {
        self.children.iter().filter(move |(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, node)| node)
    }

    /// Case-insensitive version of [`attribute_path`](Self::attribute_path).
    ///
    /// Every child matching a segment is explored, so a document that has both
    /// `Software` and `software` blocks is searched in full. The first match in
    /// document order wins.
    pub fn attribute_ci_path(&self, path: &[&str], attribute: &str) -> Option<&str> {
        match path.split_first() {
            None => self.attribute_ci(attribute),
            Some((segment, rest)) => self
                .children_ci(segment)
                .find_map(|child| child.attribute_ci_path(rest, attribute)),
        }
    }

    /// Case-insensitive version of [`child_path`](Self::child_path), returning every match.
    pub fn child_ci_path<'a>(&'a self, path: &[&str]) -> Vec<&'a VdfNode> {
        let mut frontier = vec![self];
        for segment in path {
            frontier = frontier.into_iter().flat_map(|node| node.children_ci(segment)).collect();
            if frontier.is_empty() {
                break;
            }
        }
        frontier
    }
}
