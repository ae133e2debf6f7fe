//! The transform run: planning and committing deletions and relocations
//! against one seed project.
//!
//! Planners produce an explicit command list; a single committing loop
//! applies it through the project handle. Every `Write` commits before any
//! `Delete` executes, so a feature that is both copied and removed ends up
//! at its relocated path instead of vanishing with its original file.

/// Deletion planning.
pub mod deletion;
/// Relocation planning.
pub mod relocation;

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::constants::{
    DEFAULT_ENTRY_POINT, DEFAULT_MARKER, DEFAULT_SOURCE_EXTENSION, TYPE_DECLARATION_QUERY,
};
use crate::errors::{TransformError, Warning};
use crate::feature::{classify_all, FeatureSet};
use crate::project::{FetchedProject, FilePattern, ProjectHandle, RemoteFetcher, RepoRef};
use crate::syntax::TreePath;

pub use relocation::{feature_sub_package, feature_sub_path, BasePackage};

/// One filesystem mutation, applied by the committing loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write `content` to `path`, creating parent directories
    Write {
        /// Destination path, relative to the seed root
        path: PathBuf,
        /// Full file content
        content: String,
    },
    /// Delete the file at `path`; absent paths are a no-op
    Delete {
        /// Path relative to the seed root
        path: PathBuf,
    },
}

impl Command {
    /// The path this command touches
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Write { path, .. } | Self::Delete { path } => path,
        }
    }
}

/// Counters summarizing a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct TransformSummary {
    /// Files parsed from the seed project
    pub seed_files: usize,
    /// Files parsed from the reference project (0 when nothing is copied)
    pub reference_files: usize,
    /// Files written by relocation
    pub files_written: usize,
    /// Files deleted
    pub files_deleted: usize,
    /// Warnings recorded
    pub warnings: usize,
}

/// The outcome of a successful run.
#[derive(Debug, Serialize)]
pub struct TransformReport {
    /// Paths written, in commit order
    pub written: Vec<String>,
    /// Paths deleted, in commit order
    pub deleted: Vec<String>,
    /// Non-fatal conditions recorded along the way
    pub warnings: Vec<Warning>,
    /// Counters
    pub summary: TransformSummary,
}

/// A configured transform, ready to run against a seed project.
#[derive(Debug, Clone)]
pub struct SeedTransform {
    remove: FeatureSet,
    copy: FeatureSet,
    marker: String,
    extension: String,
    entry_point: String,
    overwrite: bool,
}

impl SeedTransform {
    /// Creates a transform for the given remove and copy sets.
    #[must_use]
    pub fn new(remove: FeatureSet, copy: FeatureSet) -> Self {
        Self {
            remove,
            copy,
            marker: DEFAULT_MARKER.to_owned(),
            extension: DEFAULT_SOURCE_EXTENSION.to_owned(),
            entry_point: DEFAULT_ENTRY_POINT.to_owned(),
            overwrite: false,
        }
    }

    /// Overrides the marker annotation name.
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Overrides the scanned source extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Overrides the entry-point file name.
    #[must_use]
    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    /// Allows relocation to replace existing destination files.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Runs the transform, fetching the reference project when the copy set
    /// is non-empty.
    ///
    /// The fetch happens once, before any seed mutation, so a fetch failure
    /// aborts a still-pristine run.
    ///
    /// # Errors
    /// Any fatal [`TransformError`]; committed operations are not rolled
    /// back.
    pub fn run(
        &self,
        seed: &mut (dyn ProjectHandle + Sync),
        fetcher: &dyn RemoteFetcher,
        reference: &RepoRef,
    ) -> Result<TransformReport, TransformError> {
        let fetched: Option<FetchedProject> = if self.copy.is_empty() {
            None
        } else {
            Some(fetcher.fetch(reference)?)
        };
        self.run_with_reference(
            seed,
            fetched
                .as_ref()
                .map(|f| f.handle() as &(dyn ProjectHandle + Sync)),
        )
    }

    /// Runs the transform against an already-available reference project.
    ///
    /// `reference` may be `None` only when the copy set is empty.
    ///
    /// # Errors
    /// Any fatal [`TransformError`]; committed operations are not rolled
    /// back.
    pub fn run_with_reference(
        &self,
        seed: &mut (dyn ProjectHandle + Sync),
        reference: Option<&(dyn ProjectHandle + Sync)>,
    ) -> Result<TransformReport, TransformError> {
        let mut warnings = Vec::new();
        let pattern = FilePattern::extension(&self.extension);
        let query = TreePath::parse(TYPE_DECLARATION_QUERY)?;

        let (seed_trees, mut seed_warnings) = crate::syntax::load_trees(seed, &pattern)?;
        warnings.append(&mut seed_warnings);
        let seed_declarations = classify_all(&query, &seed_trees, &self.marker, &mut warnings);

        let mut commands: Vec<Command> = Vec::new();
        let mut reference_files = 0;

        if !self.copy.is_empty() {
            let reference =
                reference.ok_or(TransformError::MissingParameter(crate::params::REFERENCE_NAME))?;
            let base = relocation::resolve_base_package(seed, &self.entry_point)?;

            let (reference_trees, mut reference_warnings) =
                crate::syntax::load_trees(reference, &pattern)?;
            warnings.append(&mut reference_warnings);
            reference_files = reference_trees.len();

            let reference_declarations =
                classify_all(&query, &reference_trees, &self.marker, &mut warnings);
            commands.extend(relocation::plan(
                &reference_trees,
                &reference_declarations,
                &base,
                &self.copy,
                seed,
                self.overwrite,
                &mut warnings,
            )?);
        }

        commands.extend(deduplicate_deletes(deletion::plan(
            &seed_declarations,
            &self.remove,
        )));

        let (written, deleted) = commit(seed, &commands)?;

        let summary = TransformSummary {
            seed_files: seed_trees.len(),
            reference_files,
            files_written: written.len(),
            files_deleted: deleted.len(),
            warnings: warnings.len(),
        };
        Ok(TransformReport {
            written,
            deleted,
            warnings,
            summary,
        })
    }
}

/// Collapses repeated deletes of one path onto the first occurrence.
fn deduplicate_deletes(commands: Vec<Command>) -> Vec<Command> {
    let mut seen: FxHashSet<PathBuf> = FxHashSet::default();
    commands
        .into_iter()
        .filter(|command| seen.insert(command.path().to_path_buf()))
        .collect()
}

/// Applies the command list: writes first, then deletes.
///
/// A delete whose path was written in the same run is dropped, keeping the
/// relocated content; each path is touched at most once.
fn commit(
    seed: &mut (dyn ProjectHandle + Sync),
    commands: &[Command],
) -> Result<(Vec<String>, Vec<String>), TransformError> {
    let mut written = Vec::new();
    let mut written_paths: FxHashSet<&Path> = FxHashSet::default();
    for command in commands {
        if let Command::Write { path, content } = command {
            seed.write_file(path, content)?;
            written_paths.insert(path.as_path());
            written.push(display_path(path));
        }
    }

    let mut deleted = Vec::new();
    for command in commands {
        if let Command::Delete { path } = command {
            if written_paths.contains(path.as_path()) {
                continue;
            }
            seed.delete_file(path)?;
            deleted.push(display_path(path));
        }
    }

    Ok((written, deleted))
}

/// Forward slashes regardless of platform, for stable report output.
fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicate_deletes_keeps_first() {
        let commands = vec![
            Command::Delete {
                path: PathBuf::from("a/A.java"),
            },
            Command::Delete {
                path: PathBuf::from("b/B.java"),
            },
            Command::Delete {
                path: PathBuf::from("a/A.java"),
            },
        ];
        let deduped = deduplicate_deletes(commands);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].path(), Path::new("a/A.java"));
        assert_eq!(deduped[1].path(), Path::new("b/B.java"));
    }

    #[test]
    fn test_command_path_accessor() {
        let write = Command::Write {
            path: PathBuf::from("x/Y.java"),
            content: String::new(),
        };
        assert_eq!(write.path(), Path::new("x/Y.java"));
    }
}
