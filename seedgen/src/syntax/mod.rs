//! Syntax trees and the queries that run over them.
//!
//! `parser` turns raw file text into immutable owned trees; `query`
//! evaluates tree-path expressions against them. [`load_trees`] is the
//! batch entry point: it lists, reads, and parses every matching file of a
//! project, fanning the parse out across threads.

/// Owned syntax trees parsed from Java sources.
pub mod parser;
/// Tree-path expressions evaluated over parsed trees.
pub mod query;

pub use parser::{JavaParser, Point, SyntaxError, SyntaxNode, SyntaxTree};
pub use query::{evaluate_all, QueryMatch, QueryParseError, TreePath};

use rayon::prelude::*;

use crate::errors::{Warning, WarningKind};
use crate::project::{FilePattern, ProjectHandle};

/// Parses every file of `project` matching `pattern`.
///
/// Files parse in parallel. A file that cannot be read or parsed
/// contributes no tree and one [`Warning`]; the rest of the batch is
/// unaffected. Tree order follows the sorted file listing, so results are
/// deterministic.
///
/// # Errors
/// Only listing failures are fatal; per-file read and parse failures are
/// returned as warnings.
pub fn load_trees(
    project: &(dyn ProjectHandle + Sync),
    pattern: &FilePattern,
) -> std::io::Result<(Vec<SyntaxTree>, Vec<Warning>)> {
    let files = project.list_files(pattern)?;

    let outcomes: Vec<Result<SyntaxTree, Warning>> = files
        .par_iter()
        .map(|path| {
            let source = project.read_file(path).map_err(|e| {
                Warning::new(path, WarningKind::ParseFailure, format!("read failed: {e}"))
            })?;
            let mut parser = JavaParser::new()
                .map_err(|e| Warning::new(path, WarningKind::ParseFailure, e.to_string()))?;
            parser
                .parse(path, &source)
                .map_err(|e| Warning::new(path, WarningKind::ParseFailure, e.to_string()))
        })
        .collect();

    let mut trees = Vec::with_capacity(outcomes.len());
    let mut warnings = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(tree) => trees.push(tree),
            Err(warning) => warnings.push(warning),
        }
    }
    Ok((trees, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::DirProject;
    use std::path::Path;

    #[test]
    fn test_load_trees_skips_malformed_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let mut project = DirProject::open(dir.path()).unwrap();
        project
            .write_file(Path::new("Good.java"), "package a;\n\nclass Good {}\n")
            .unwrap();
        project
            .write_file(Path::new("Bad.java"), "public class {{{")
            .unwrap();

        let (trees, warnings) = load_trees(&project, &FilePattern::extension("java")).unwrap();

        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].path, Path::new("Good.java"));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::ParseFailure);
        assert_eq!(warnings[0].file, Path::new("Bad.java"));
    }

    #[test]
    fn test_load_trees_is_sorted_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut project = DirProject::open(dir.path()).unwrap();
        project
            .write_file(Path::new("b/Second.java"), "class Second {}")
            .unwrap();
        project
            .write_file(Path::new("a/First.java"), "class First {}")
            .unwrap();

        let (trees, warnings) = load_trees(&project, &FilePattern::extension("java")).unwrap();

        assert!(warnings.is_empty());
        let paths: Vec<&Path> = trees.iter().map(|t| t.path.as_path()).collect();
        assert_eq!(paths, vec![Path::new("a/First.java"), Path::new("b/Second.java")]);
    }
}
