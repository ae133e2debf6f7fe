//! Error and warning types for the transform engine.
//!
//! Fatal conditions abort the run and surface as [`TransformError`].
//! Per-file conditions (unparsable sources, annotations without a value)
//! are collected as [`Warning`]s and reported at the end of a successful
//! run instead of aborting it.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::syntax::QueryParseError;

/// Classifies a non-fatal, per-file condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The file could not be parsed; it contributes no matches.
    ParseFailure,
    /// A marker annotation carries no decodable string literal; the
    /// declaration is treated as untagged.
    MissingAnnotationValue,
    /// A relocated file has no package declaration to rewrite; its content
    /// is copied unchanged.
    MissingPackageDeclaration,
}

/// A recorded non-fatal condition, tied to the file it occurred in.
#[derive(Debug, Clone, Serialize)]
pub struct Warning {
    /// File the condition occurred in
    pub file: PathBuf,
    /// Condition category
    pub kind: WarningKind,
    /// Human-readable detail
    pub message: String,
}

impl Warning {
    /// Creates a warning for `file`.
    pub fn new(file: &Path, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            file: file.to_path_buf(),
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Fatal errors that abort a transform run.
///
/// Operations already committed when one of these is raised are not rolled
/// back; the seed project is left in the state produced by them.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// A required invocation parameter is absent.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// A required invocation parameter is present but blank.
    #[error("parameter `{0}` must not be blank")]
    BlankParameter(&'static str),

    /// The seed project's base package could not be resolved from its
    /// entry-point file.
    #[error("cannot resolve seed base package: {reason} (entry point pattern `{pattern}`)")]
    BasePackageNotFound {
        /// Glob used to locate the entry point
        pattern: String,
        /// Why resolution failed
        reason: String,
    },

    /// A relocation destination already exists (or two relocations target
    /// the same destination) and overwriting is not permitted.
    #[error("relocation destination `{0}` already exists; enable overwriting to replace it")]
    FileWriteConflict(PathBuf),

    /// Cloning a remote project failed. Raised before any seed mutation.
    #[error("failed to fetch {owner}/{name}@{branch}: {reason}")]
    RemoteFetchFailure {
        /// Repository owner
        owner: String,
        /// Repository name
        name: String,
        /// Requested branch
        branch: String,
        /// Underlying clone failure
        reason: String,
    },

    /// A tree-path expression failed to compile.
    #[error("invalid tree-path expression: {0}")]
    Query(#[from] QueryParseError),

    /// Filesystem failure while listing, reading, writing, or deleting.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display_names_file() {
        let w = Warning::new(
            Path::new("src/Bad.java"),
            WarningKind::ParseFailure,
            "source is not valid Java",
        );
        assert_eq!(w.to_string(), "src/Bad.java: source is not valid Java");
    }

    #[test]
    fn test_warning_kind_serializes_snake_case() {
        let w = Warning::new(Path::new("A.java"), WarningKind::MissingAnnotationValue, "x");
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["kind"], "missing_annotation_value");
    }
}
