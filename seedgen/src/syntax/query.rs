//! Tree-path queries over parsed syntax trees.
//!
//! A path expression selects nodes by kind, walking from the root:
//!
//! ```text
//! /program//class_declaration|interface_declaration
//! ```
//!
//! `/kind` steps to direct children, `//kind` to any descendant, and `|`
//! separates alternative kinds within one step. Evaluation returns matches
//! in document order, tagged with the owning file.

use rustc_hash::FxHashSet;

use super::parser::{SyntaxNode, SyntaxTree};

/// Error while parsing a tree-path expression
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryParseError {
    /// The expression is empty
    #[error("tree-path expression is empty")]
    Empty,
    /// The expression does not start at the root
    #[error("tree-path expression must start with `/`")]
    MissingLeadingSlash,
    /// A step has no kind, e.g. `/a//` or `/a||b`
    #[error("tree-path step {0} has no node kind")]
    EmptyStep(usize),
}

#[derive(Debug, Clone, PartialEq)]
struct Step {
    /// `//` step: match at any depth below the current frontier
    any_depth: bool,
    kinds: Vec<String>,
}

impl Step {
    fn accepts(&self, node: &SyntaxNode) -> bool {
        self.kinds.iter().any(|k| *k == node.kind)
    }
}

/// A compiled tree-path expression
#[derive(Debug, Clone, PartialEq)]
pub struct TreePath {
    steps: Vec<Step>,
}

impl TreePath {
    /// Compile a path expression
    ///
    /// # Errors
    /// Returns an error for empty expressions, expressions not rooted with
    /// `/`, or steps without a node kind.
    pub fn parse(expr: &str) -> Result<Self, QueryParseError> {
        if expr.is_empty() {
            return Err(QueryParseError::Empty);
        }
        if !expr.starts_with('/') {
            return Err(QueryParseError::MissingLeadingSlash);
        }

        let mut steps = Vec::new();
        let mut rest = expr;
        while !rest.is_empty() {
            let any_depth = if let Some(r) = rest.strip_prefix("//") {
                rest = r;
                true
            } else if let Some(r) = rest.strip_prefix('/') {
                rest = r;
                false
            } else {
                // Unreachable by construction: each iteration consumes
                // through the next separator.
                return Err(QueryParseError::EmptyStep(steps.len()));
            };

            let (segment, tail) = match rest.find('/') {
                Some(i) => rest.split_at(i),
                None => (rest, ""),
            };
            rest = tail;

            if segment.is_empty() {
                return Err(QueryParseError::EmptyStep(steps.len()));
            }
            let kinds: Vec<String> = segment.split('|').map(str::to_owned).collect();
            if kinds.iter().any(String::is_empty) {
                return Err(QueryParseError::EmptyStep(steps.len()));
            }

            steps.push(Step { any_depth, kinds });
        }

        Ok(Self { steps })
    }

    /// Evaluate against a single tree, returning matches in document order
    #[must_use]
    pub fn evaluate<'t>(&self, tree: &'t SyntaxTree) -> Vec<&'t SyntaxNode> {
        let mut frontier: Vec<&SyntaxNode> = Vec::new();

        for (i, step) in self.steps.iter().enumerate() {
            let candidates: Vec<&SyntaxNode> = if i == 0 {
                if step.any_depth {
                    subtree_preorder(&tree.root)
                } else {
                    vec![&tree.root]
                }
            } else if step.any_depth {
                frontier.iter().flat_map(|n| descendants(n)).collect()
            } else {
                frontier.iter().flat_map(|n| n.children.iter()).collect()
            };

            frontier = dedup_in_order(candidates.into_iter().filter(|n| step.accepts(n)));
            if frontier.is_empty() {
                break;
            }
        }

        frontier
    }
}

/// A matched node together with its owning tree (source-file provenance)
#[derive(Debug, Clone, Copy)]
pub struct QueryMatch<'t> {
    /// The matched node
    pub node: &'t SyntaxNode,
    /// The tree the node belongs to
    pub tree: &'t SyntaxTree,
}

impl QueryMatch<'_> {
    /// Path of the file the match came from
    #[must_use]
    pub fn file(&self) -> &std::path::Path {
        &self.tree.path
    }
}

/// Evaluate a path against many trees, preserving tree order then document
/// order within each tree.
#[must_use]
pub fn evaluate_all<'t>(path: &TreePath, trees: &'t [SyntaxTree]) -> Vec<QueryMatch<'t>> {
    trees
        .iter()
        .flat_map(|tree| {
            path.evaluate(tree)
                .into_iter()
                .map(move |node| QueryMatch { node, tree })
        })
        .collect()
}

fn subtree_preorder(node: &SyntaxNode) -> Vec<&SyntaxNode> {
    let mut out = vec![node];
    out.extend(node.children.iter().flat_map(subtree_preorder));
    out
}

fn descendants(node: &SyntaxNode) -> Vec<&SyntaxNode> {
    node.children.iter().flat_map(subtree_preorder).collect()
}

/// Overlapping `//` frontiers can surface the same node twice; keep the
/// first occurrence only.
fn dedup_in_order<'t>(nodes: impl Iterator<Item = &'t SyntaxNode>) -> Vec<&'t SyntaxNode> {
    let mut seen: FxHashSet<*const SyntaxNode> = FxHashSet::default();
    nodes
        .filter(|n| seen.insert(std::ptr::from_ref::<SyntaxNode>(n)))
        .collect()
}
