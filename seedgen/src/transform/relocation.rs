//! Relocation planning: copying feature-tagged files from a reference
//! project into the seed, under the seed's own package.
//!
//! The destination is fully determined by the seed's base package and the
//! feature name, so relocation is reproducible across runs and independent
//! of file ordering. The copied content is written unchanged except for
//! one byte-range edit replacing the first package declaration.

use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::errors::{TransformError, Warning, WarningKind};
use crate::feature::{FeatureSet, TypeDeclaration};
use crate::project::{FilePattern, ProjectHandle};
use crate::syntax::{JavaParser, SyntaxTree};
use crate::transform::Command;

/// The seed's resolved root package and the directory it corresponds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePackage {
    /// Package name, e.g. `com.acme.seed`
    pub package: String,
    /// Directory of the entry-point file, relative to the seed root
    pub dir: PathBuf,
}

/// Resolves the seed's base package from its entry-point file.
///
/// Exactly one file named `entry_point` must exist in the seed tree, and
/// it must open with a package declaration. Zero candidates, several
/// candidates, an unparsable entry point, and a missing package
/// declaration all fail the same way: there is no base package to relocate
/// under, so the transform cannot proceed.
///
/// # Errors
/// [`TransformError::BasePackageNotFound`] as described above.
pub fn resolve_base_package(
    seed: &(dyn ProjectHandle + Sync),
    entry_point: &str,
) -> Result<BasePackage, TransformError> {
    let pattern = format!("**/{entry_point}");
    let not_found = |reason: String| TransformError::BasePackageNotFound {
        pattern: pattern.clone(),
        reason,
    };

    let candidates = seed.list_files(&FilePattern::file_name(entry_point))?;
    if candidates.len() != 1 {
        return Err(not_found(format!(
            "found {} candidate files, expected exactly one",
            candidates.len()
        )));
    }

    let path = &candidates[0];
    let source = seed.read_file(path)?;
    let mut parser = JavaParser::new().map_err(|e| not_found(e.to_string()))?;
    let tree = parser
        .parse(path, &source)
        .map_err(|_| not_found(format!("entry point `{}` failed to parse", path.display())))?;

    let package = first_package_name(&tree)
        .ok_or_else(|| {
            not_found(format!(
                "entry point `{}` has no package declaration",
                path.display()
            ))
        })?
        .to_owned();

    let dir = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
    Ok(BasePackage { package, dir })
}

/// Lower-cased, word-delimited form of a feature name as a relative path:
/// `"Order Management"` becomes `order/management`.
#[must_use]
pub fn feature_sub_path(feature: &str) -> PathBuf {
    feature
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// The dotted equivalent of [`feature_sub_path`]: `order.management`.
#[must_use]
pub fn feature_sub_package(feature: &str) -> String {
    feature
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(".")
}

/// Plans one `Write` per reference declaration tagged with a member of
/// `copy`.
///
/// Destinations are checked up front: a destination that already exists in
/// the seed conflicts unless `overwrite` is set, and two relocations
/// claiming the same destination always conflict. Content comes from the
/// already-parsed reference tree, so no reread can disagree with what was
/// matched.
///
/// # Errors
/// [`TransformError::FileWriteConflict`] on the conflicts above.
pub fn plan(
    reference_trees: &[SyntaxTree],
    declarations: &[TypeDeclaration],
    base: &BasePackage,
    copy: &FeatureSet,
    seed: &(dyn ProjectHandle + Sync),
    overwrite: bool,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<Command>, TransformError> {
    if copy.is_empty() {
        return Ok(Vec::new());
    }

    let trees_by_path: FxHashMap<&Path, &SyntaxTree> = reference_trees
        .iter()
        .map(|tree| (tree.path.as_path(), tree))
        .collect();

    let mut claimed: FxHashSet<PathBuf> = FxHashSet::default();
    let mut commands = Vec::new();

    for decl in declarations.iter().filter(|d| d.matches_any(copy)) {
        // matches_any implies a tag is present
        let Some(feature) = decl.feature_name() else {
            continue;
        };
        let Some(tree) = trees_by_path.get(decl.file.as_path()) else {
            continue;
        };
        let Some(file_name) = decl.file.file_name() else {
            continue;
        };

        let destination = base.dir.join(feature_sub_path(feature)).join(file_name);
        if !claimed.insert(destination.clone()) {
            return Err(TransformError::FileWriteConflict(destination));
        }
        if !overwrite && seed.exists(&destination) {
            return Err(TransformError::FileWriteConflict(destination));
        }

        let package = format!("{}.{}", base.package, feature_sub_package(feature));
        let content = rewrite_package(tree, &package, warnings);
        commands.push(Command::Write {
            path: destination,
            content,
        });
    }

    Ok(commands)
}

/// Replaces the first package declaration of `tree` with `new_package`.
///
/// The edit reuses the node span recorded at parse time, so everything
/// outside the declaration survives byte for byte. A file without a
/// package declaration is copied unchanged with a recorded warning.
fn rewrite_package(tree: &SyntaxTree, new_package: &str, warnings: &mut Vec<Warning>) -> String {
    match tree.root.find_first("package_declaration") {
        Some(node) => {
            let mut content = tree.source.clone();
            content.replace_range(
                node.start_byte..node.end_byte,
                &format!("package {new_package};"),
            );
            content
        }
        None => {
            warnings.push(Warning::new(
                &tree.path,
                WarningKind::MissingPackageDeclaration,
                "no package declaration to rewrite; copied unchanged",
            ));
            tree.source.clone()
        }
    }
}

fn first_package_name(tree: &SyntaxTree) -> Option<&str> {
    let declaration = tree.root.find_first("package_declaration")?;
    let name = declaration
        .child_of_kind("scoped_identifier")
        .or_else(|| declaration.child_of_kind("identifier"))?;
    Some(tree.text(name))
}
