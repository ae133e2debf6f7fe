//! Tree-sitter based parser producing immutable, queryable syntax trees
//! for Java source files.
//!
//! Trees are converted into owned nodes so they can be held across threads
//! and outlive the parser that produced them.

use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser};

/// A point in source code (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// Zero-indexed row number
    pub row: usize,
    /// Zero-indexed column (byte offset within line)
    pub column: usize,
}

impl From<tree_sitter::Point> for Point {
    fn from(p: tree_sitter::Point) -> Self {
        Self {
            row: p.row,
            column: p.column,
        }
    }
}

/// A syntax node with exact source location
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    /// Node kind (e.g., "class_declaration", "annotation")
    pub kind: String,
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// Start point (row, column)
    pub start_point: Point,
    /// End point (row, column)
    pub end_point: Point,
    /// Whether this is a named node (vs anonymous like punctuation)
    pub is_named: bool,
    /// Child nodes
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Create a `SyntaxNode` from a tree-sitter `Node`
    fn from_ts_node(node: Node<'_>) -> Self {
        let children = (0..node.child_count())
            .filter_map(|i| node.child(i))
            .map(Self::from_ts_node)
            .collect();

        Self {
            kind: node.kind().to_string(),
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_point: node.start_position().into(),
            end_point: node.end_position().into(),
            is_named: node.is_named(),
            children,
        }
    }

    /// Direct children of a specific kind, in document order
    pub fn children_of_kind<'a>(&'a self, kind: &str) -> impl Iterator<Item = &'a SyntaxNode> {
        let kind = kind.to_string();
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// First direct child of a specific kind
    #[must_use]
    pub fn child_of_kind(&self, kind: &str) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Find all nodes of a specific kind, preorder
    #[must_use]
    pub fn find_by_kind(&self, kind: &str) -> Vec<&SyntaxNode> {
        let mut result = Vec::new();
        self.find_by_kind_recursive(kind, &mut result);
        result
    }

    fn find_by_kind_recursive<'a>(&'a self, kind: &str, result: &mut Vec<&'a SyntaxNode>) {
        if self.kind == kind {
            result.push(self);
        }
        for child in &self.children {
            child.find_by_kind_recursive(kind, result);
        }
    }

    /// First node of a specific kind in document order, including self
    #[must_use]
    pub fn find_first(&self, kind: &str) -> Option<&SyntaxNode> {
        if self.kind == kind {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_first(kind))
    }
}

/// A parsed source file: path, raw text, and tree root. Immutable once built.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    /// Path of the file this tree was parsed from, relative to its project root
    pub path: PathBuf,
    /// Root node of the tree
    pub root: SyntaxNode,
    /// Original source text
    pub source: String,
}

impl SyntaxTree {
    /// Extract a slice of source text by byte range
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.source[start..end]
    }

    /// The source text covered by a node
    #[must_use]
    pub fn text(&self, node: &SyntaxNode) -> &str {
        self.slice(node.start_byte, node.end_byte)
    }
}

/// Error during tree construction
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    /// Failed to create the underlying parser
    #[error("failed to create Java parser: {0}")]
    ParserCreation(String),
    /// The parser returned no tree at all
    #[error("parser produced no tree")]
    ParseFailed,
    /// The source contains syntax errors
    #[error("source is not valid Java")]
    Malformed,
}

/// Tree-sitter based Java parser
pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    /// Create a new parser for Java
    ///
    /// # Errors
    /// Returns error if parser creation fails
    pub fn new() -> Result<Self, SyntaxError> {
        let mut parser = Parser::new();

        // Use the LANGUAGE constant exported by the tree-sitter-java crate
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .map_err(|e| SyntaxError::ParserCreation(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Parse source text into a tree tagged with its file path
    ///
    /// # Errors
    /// Returns `Malformed` for sources containing syntax errors. Such files
    /// contribute no matches; callers record the failure and move on.
    pub fn parse(&mut self, path: &Path, source: &str) -> Result<SyntaxTree, SyntaxError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(SyntaxError::ParseFailed)?;

        if tree.root_node().has_error() {
            return Err(SyntaxError::Malformed);
        }

        let root = SyntaxNode::from_ts_node(tree.root_node());

        Ok(SyntaxTree {
            path: path.to_path_buf(),
            root,
            source: source.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SyntaxTree {
        let mut parser = JavaParser::new().unwrap();
        parser.parse(Path::new("Sample.java"), source).unwrap()
    }

    #[test]
    fn test_parse_simple_class() {
        let tree = parse("package com.acme;\n\npublic class Sample {\n}\n");

        assert_eq!(tree.root.kind, "program");
        let classes = tree.root.find_by_kind("class_declaration");
        assert_eq!(classes.len(), 1);
    }

    #[test]
    fn test_byte_ranges_accurate() {
        let source = "class A {}";
        let tree = parse(source);

        assert_eq!(tree.root.start_byte, 0);
        assert_eq!(tree.root.end_byte, source.len());
    }

    #[test]
    fn test_malformed_source_rejected() {
        let mut parser = JavaParser::new().unwrap();
        let result = parser.parse(Path::new("Broken.java"), "public class {{{");
        assert!(matches!(result, Err(SyntaxError::Malformed)));
    }

    #[test]
    fn test_find_first_is_document_order() {
        let tree = parse("package a.b;\n\nclass First {}\n\nclass Second {}\n");
        let first = tree.root.find_first("class_declaration").unwrap();
        let name = first.child_of_kind("identifier").unwrap();
        assert_eq!(tree.text(name), "First");
    }

    #[test]
    fn test_annotation_visible_under_modifiers() {
        let tree = parse("package a;\n\n@Feature(\"Echo\")\npublic class EchoService {}\n");
        let class = tree.root.find_first("class_declaration").unwrap();
        let modifiers = class.child_of_kind("modifiers").unwrap();
        assert_eq!(modifiers.children_of_kind("annotation").count(), 1);
    }
}
