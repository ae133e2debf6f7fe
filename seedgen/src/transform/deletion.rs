//! Deletion planning: a "remove" feature set becomes delete commands.

use crate::feature::{FeatureSet, TypeDeclaration};
use crate::transform::Command;

/// Emits one `Delete` for the owning file of every declaration tagged with
/// a member of `remove`.
///
/// Several tagged declarations in one file each request the deletion
/// independently; the orchestrator deduplicates by path before committing.
#[must_use]
pub fn plan(declarations: &[TypeDeclaration], remove: &FeatureSet) -> Vec<Command> {
    if remove.is_empty() {
        return Vec::new();
    }

    declarations
        .iter()
        .filter(|decl| decl.matches_any(remove))
        .map(|decl| Command::Delete {
            path: decl.file.clone(),
        })
        .collect()
}
