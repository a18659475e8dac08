//! Loading trees from JSON and YAML documents
//!
//! A node is either a plain string (a leaf) or an object:
//!
//! ```text
//! { "label": "src", "open": false, "children": ["main.rs", { "label": "bin" }] }
//! ```
//!
//! `open` is optional. A node with children starts open unless it says
//! otherwise. The top-level node becomes the root of the tree.

use arbor::Node;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Errors that can occur while loading a tree document
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
    UnsupportedFormat(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "Failed to read tree: {}", err),
            LoadError::Json(err) => write!(f, "Invalid JSON tree: {}", err),
            LoadError::Yaml(err) => write!(f, "Invalid YAML tree: {}", err),
            LoadError::UnsupportedFormat(ext) => write!(
                f,
                "Unsupported tree format '{}' (expected .json, .yaml or .yml)",
                ext
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Json(err) => Some(err),
            LoadError::Yaml(err) => Some(err),
            LoadError::UnsupportedFormat(_) => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Json(err)
    }
}

impl From<serde_yaml::Error> for LoadError {
    fn from(err: serde_yaml::Error) -> Self {
        LoadError::Yaml(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            _ => Err(LoadError::UnsupportedFormat(ext)),
        }
    }
}

/// One node of a tree document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NodeSource {
    Leaf(String),
    Branch {
        label: String,
        #[serde(default)]
        children: Vec<NodeSource>,
        #[serde(default)]
        open: Option<bool>,
    },
}

impl NodeSource {
    /// Build a tree with this node as the root
    pub fn into_root(self) -> Node<String> {
        match self {
            NodeSource::Leaf(label) => Node::root(label),
            NodeSource::Branch {
                label,
                children,
                open,
            } => with_children(Node::root(label), children, open),
        }
    }

    fn into_node(self) -> Node<String> {
        match self {
            NodeSource::Leaf(label) => Node::new(label),
            NodeSource::Branch {
                label,
                children,
                open,
            } => with_children(Node::new(label), children, open),
        }
    }
}

fn with_children(
    mut node: Node<String>,
    children: Vec<NodeSource>,
    open: Option<bool>,
) -> Node<String> {
    for child in children {
        node = node.subtree(child.into_node());
    }
    match open {
        Some(open) => node.with_open(open),
        None => node,
    }
}

/// Parse a tree document
pub fn parse_tree(content: &str, format: Format) -> Result<Node<String>, LoadError> {
    let source: NodeSource = match format {
        Format::Json => serde_json::from_str(content)?,
        Format::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(source.into_root())
}

/// Load a tree document, picking the format from the extension
pub fn load_tree(path: &Path) -> Result<Node<String>, LoadError> {
    let format = Format::from_path(path)?;
    let content = fs::read_to_string(path)?;
    parse_tree(&content, format)
}

fn leaf(label: &str) -> Node<String> {
    Node::new(label.to_string())
}

fn dir(label: &str, files: &[&str]) -> Node<String> {
    files
        .iter()
        .fold(Node::new(label.to_string()), |node, f| node.subtree(leaf(f)))
}

/// Tree shown when no document is given
pub fn demo_tree() -> Node<String> {
    Node::root("arbor".to_string())
        .subtree(dir(
            "src",
            &[
                "lib.rs",
                "flatten.rs",
                "keymap.rs",
                "layout.rs",
                "model.rs",
                "navigator.rs",
                "node.rs",
                "render.rs",
                "viewport.rs",
            ],
        ))
        .subtree(dir(
            "tests",
            &["layout_proptest.rs", "navigation_proptest.rs", "scenarios.rs"],
        ))
        .subtree(
            Node::new("arbor-config".to_string())
                .subtree(dir("defaults", &["arbor.default.toml"]))
                .subtree(dir("src", &["lib.rs"]))
                .subtree(leaf("Cargo.toml"))
                .close(),
        )
        .subtree(
            Node::new("arbor-viewer".to_string())
                .subtree(dir(
                    "src",
                    &["main.rs", "viewer/app.rs", "viewer/source.rs", "viewer/ui.rs"],
                ))
                .subtree(leaf("build.rs"))
                .subtree(leaf("Cargo.toml"))
                .close(),
        )
        .subtree(leaf("Cargo.toml"))
        .subtree(leaf("DESIGN.md"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_json_tree() {
        let json = r#"{
            "label": "root",
            "children": [
                "a",
                { "label": "b", "children": ["b1", "b2"] },
                { "label": "c", "children": ["c1"], "open": false }
            ]
        }"#;
        let root = parse_tree(json, Format::Json).unwrap();
        assert!(root.is_root());
        assert_eq!(root.children().len(), 3);
        assert!(root.children()[1].is_open());
        assert!(!root.children()[2].is_open());
        // root, a, b, b1, b2, c
        assert_eq!(root.size(), 6);
    }

    #[test]
    fn test_parse_yaml_tree() {
        let yaml = "label: root\nchildren:\n  - a\n  - label: b\n    children: [b1]\n";
        let root = parse_tree(yaml, Format::Yaml).unwrap();
        assert_eq!(root.value(), "root");
        assert_eq!(root.children()[1].children()[0].value(), "b1");
        assert_eq!(root.size(), 4);
    }

    #[test]
    fn test_leaf_document_is_a_lone_root() {
        let root = parse_tree("\"alone\"", Format::Json).unwrap();
        assert!(root.is_root());
        assert!(!root.has_children());
        assert_eq!(root.size(), 1);
    }

    #[test]
    fn test_closed_root() {
        let root = parse_tree(r#"{"label": "r", "children": ["x"], "open": false}"#, Format::Json)
            .unwrap();
        assert!(!root.is_open());
        assert_eq!(root.size(), 1);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = parse_tree("{\"children\": []}", Format::Json).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
        assert!(err.to_string().starts_with("Invalid JSON tree"));
    }

    #[rstest]
    #[case("tree.json", Some(Format::Json))]
    #[case("tree.yaml", Some(Format::Yaml))]
    #[case("TREE.YML", Some(Format::Yaml))]
    #[case("tree.toml", None)]
    #[case("tree", None)]
    fn test_format_from_path(#[case] path: &str, #[case] expected: Option<Format>) {
        assert_eq!(Format::from_path(Path::new(path)).ok(), expected);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_tree(Path::new("/nonexistent/arbor/tree.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_demo_tree_shape() {
        let root = demo_tree();
        assert!(root.is_open());
        let closed: Vec<_> = root
            .children()
            .iter()
            .filter(|n| n.has_children() && !n.is_open())
            .map(|n| n.value().as_str())
            .collect();
        assert_eq!(closed, vec!["arbor-config", "arbor-viewer"]);
    }
}
