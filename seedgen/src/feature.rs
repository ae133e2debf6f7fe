//! Feature identity: which declarations carry a feature tag, and which
//! tags a request asks for.
//!
//! A type declaration is classified exactly once, at match time, into
//! `Plain` or `Annotated`. Both the deletion and the relocation paths test
//! membership through [`TypeDeclaration::matches_any`], so "remove" and
//! "copy" share one notion of feature identity: exact, case-sensitive
//! string equality of the decoded annotation literal.

use std::path::PathBuf;

use rustc_hash::FxHashSet;

use crate::errors::{Warning, WarningKind};
use crate::syntax::{QueryMatch, SyntaxNode, SyntaxTree, TreePath};

/// A decoded feature tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureAnnotation {
    /// Feature name, quote-stripped
    pub name: String,
}

/// Classification of a type declaration, decided once at match time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureTag {
    /// No feature annotation; never matched by any feature operation
    Plain,
    /// Carries a decoded feature annotation
    Annotated(FeatureAnnotation),
}

/// A matched type declaration and the file that owns it (1:1 assumption).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    /// Owning source file, relative to its project root
    pub file: PathBuf,
    /// Feature classification
    pub tag: FeatureTag,
}

impl TypeDeclaration {
    /// Whether the declaration carries a feature tag at all.
    #[must_use]
    pub fn is_tagged(&self) -> bool {
        matches!(self.tag, FeatureTag::Annotated(_))
    }

    /// Decoded feature name, if tagged.
    #[must_use]
    pub fn feature_name(&self) -> Option<&str> {
        match &self.tag {
            FeatureTag::Plain => None,
            FeatureTag::Annotated(annotation) => Some(&annotation.name),
        }
    }

    /// Whether the declaration's tag is a member of `features`.
    #[must_use]
    pub fn matches_any(&self, features: &FeatureSet) -> bool {
        self.feature_name().is_some_and(|name| features.contains(name))
    }
}

/// The feature annotation carries no decodable string literal.
#[derive(Debug, thiserror::Error)]
#[error("feature annotation has no literal value")]
pub struct MissingAnnotationValue;

/// Decodes the feature name from an annotation node.
///
/// The name is the annotation's first string-literal argument with exactly
/// one pair of surrounding double quotes stripped. Escape sequences pass
/// through untouched.
///
/// # Errors
/// [`MissingAnnotationValue`] when the annotation has no argument list or
/// no string literal in it (e.g. `@Feature` or `@Feature(SOME_CONSTANT)`).
pub fn decode(
    annotation: &SyntaxNode,
    tree: &SyntaxTree,
) -> Result<FeatureAnnotation, MissingAnnotationValue> {
    let arguments = annotation
        .child_of_kind("annotation_argument_list")
        .ok_or(MissingAnnotationValue)?;
    let literal = arguments
        .find_first("string_literal")
        .ok_or(MissingAnnotationValue)?;
    let name = strip_quotes(tree.text(literal)).ok_or(MissingAnnotationValue)?;
    Ok(FeatureAnnotation {
        name: name.to_owned(),
    })
}

/// Simple name of an annotation, `Feature` for both `@Feature` and
/// `@com.acme.Feature`.
fn annotation_name<'t>(annotation: &'t SyntaxNode, tree: &'t SyntaxTree) -> Option<&'t str> {
    let name = annotation
        .child_of_kind("identifier")
        .or_else(|| annotation.child_of_kind("scoped_identifier"))?;
    tree.text(name).rsplit('.').next()
}

fn strip_quotes(raw: &str) -> Option<&str> {
    raw.strip_prefix('"')?.strip_suffix('"')
}

/// Classifies one matched type declaration.
///
/// Only annotations in the declaration's own modifier list count; an
/// annotation on a member or on a nested type never tags the outer
/// declaration. A marker annotation without a value records a warning and
/// leaves the declaration untagged.
pub fn classify(m: &QueryMatch<'_>, marker: &str, warnings: &mut Vec<Warning>) -> TypeDeclaration {
    let mut tag = FeatureTag::Plain;

    if let Some(modifiers) = m.node.child_of_kind("modifiers") {
        let annotations = modifiers
            .children
            .iter()
            .filter(|c| c.kind == "annotation" || c.kind == "marker_annotation");
        for annotation in annotations {
            if annotation_name(annotation, m.tree) != Some(marker) {
                continue;
            }
            match decode(annotation, m.tree) {
                Ok(feature) => {
                    tag = FeatureTag::Annotated(feature);
                    break;
                }
                Err(MissingAnnotationValue) => {
                    warnings.push(Warning::new(
                        m.file(),
                        WarningKind::MissingAnnotationValue,
                        format!(
                            "`@{marker}` at line {} has no literal value",
                            annotation.start_point.row + 1
                        ),
                    ));
                }
            }
        }
    }

    TypeDeclaration {
        file: m.file().to_path_buf(),
        tag,
    }
}

/// Classifies every declaration `query` selects across `trees`.
pub fn classify_all(
    query: &TreePath,
    trees: &[SyntaxTree],
    marker: &str,
    warnings: &mut Vec<Warning>,
) -> Vec<TypeDeclaration> {
    crate::syntax::evaluate_all(query, trees)
        .iter()
        .map(|m| classify(m, marker, warnings))
        .collect()
}

/// A deduplicated, order-preserving, case-sensitive set of requested
/// feature names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    names: Vec<String>,
}

impl FeatureSet {
    /// Parses a comma-separated request string.
    ///
    /// Blank entries are discarded and duplicates collapse onto their first
    /// occurrence. Entries are not trimmed: feature names may contain
    /// spaces, and matching is exact.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let names = raw
            .split(',')
            .filter(|entry| !entry.is_empty())
            .filter(|entry| seen.insert(entry))
            .map(str::to_owned)
            .collect();
        Self { names }
    }

    /// Exact membership test.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Whether the set has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Entries in request order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::JavaParser;
    use std::path::Path;

    fn declarations(source: &str, marker: &str) -> (Vec<TypeDeclaration>, Vec<Warning>) {
        let mut parser = JavaParser::new().unwrap();
        let tree = parser.parse(Path::new("Sample.java"), source).unwrap();
        let trees = vec![tree];
        let query = TreePath::parse(crate::constants::TYPE_DECLARATION_QUERY).unwrap();
        let mut warnings = Vec::new();
        let decls = classify_all(&query, &trees, marker, &mut warnings);
        (decls, warnings)
    }

    #[test]
    fn test_annotated_class_is_tagged() {
        let (decls, warnings) = declarations(
            "package a;\n\n@Feature(\"Echo\")\npublic class EchoService {}\n",
            "Feature",
        );
        assert!(warnings.is_empty());
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].feature_name(), Some("Echo"));
    }

    #[test]
    fn test_plain_class_is_never_matched() {
        let (decls, _) = declarations("package a;\n\npublic class Plain {}\n", "Feature");
        assert_eq!(decls.len(), 1);
        assert!(!decls[0].is_tagged());
        assert!(!decls[0].matches_any(&FeatureSet::parse("Plain,Echo")));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let (decls, _) = declarations(
            "package a;\n\n@Feature(\"Echo\")\npublic class EchoService {}\n",
            "Feature",
        );
        assert!(decls[0].matches_any(&FeatureSet::parse("Echo")));
        assert!(!decls[0].matches_any(&FeatureSet::parse("echo")));
    }

    #[test]
    fn test_other_annotations_do_not_tag() {
        let (decls, warnings) = declarations(
            "package a;\n\n@Deprecated\n@Service(\"orders\")\npublic class Orders {}\n",
            "Feature",
        );
        assert!(warnings.is_empty());
        assert!(!decls[0].is_tagged());
    }

    #[test]
    fn test_marker_without_value_warns_and_stays_untagged() {
        let (decls, warnings) = declarations("package a;\n\n@Feature\npublic class X {}\n", "Feature");
        assert!(!decls[0].is_tagged());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::MissingAnnotationValue);
    }

    #[test]
    fn test_constant_argument_is_not_a_literal() {
        let (decls, warnings) = declarations(
            "package a;\n\n@Feature(Names.ECHO)\npublic class X {}\n",
            "Feature",
        );
        assert!(!decls[0].is_tagged());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_named_value_argument_decodes() {
        let (decls, _) = declarations(
            "package a;\n\n@Feature(value = \"Billing\")\npublic class Billing {}\n",
            "Feature",
        );
        assert_eq!(decls[0].feature_name(), Some("Billing"));
    }

    #[test]
    fn test_member_annotations_do_not_tag_the_type() {
        let (decls, _) = declarations(
            "package a;\n\npublic class Holder {\n    @Feature(\"Inner\")\n    void run() {}\n}\n",
            "Feature",
        );
        let holder = decls
            .iter()
            .find(|d| d.file == Path::new("Sample.java") && !d.is_tagged());
        assert!(holder.is_some());
        assert!(decls.iter().all(|d| d.feature_name() != Some("Inner")));
    }

    #[test]
    fn test_quotes_stripped_exactly_once() {
        let (decls, _) = declarations(
            "package a;\n\n@Feature(\"\\\"Quoted\\\"\")\npublic class Q {}\n",
            "Feature",
        );
        // Escapes are not processed; only the surrounding pair goes.
        assert_eq!(decls[0].feature_name(), Some("\\\"Quoted\\\""));
    }

    #[test]
    fn test_feature_set_discards_blanks_and_duplicates() {
        let set = FeatureSet::parse(",Echo,,Billing,Echo,");
        assert_eq!(set.len(), 2);
        let names: Vec<&str> = set.iter().collect();
        assert_eq!(names, vec!["Echo", "Billing"]);
    }

    #[test]
    fn test_feature_set_does_not_trim() {
        let set = FeatureSet::parse("Order Management, Billing");
        assert!(set.contains("Order Management"));
        assert!(set.contains(" Billing"));
        assert!(!set.contains("Billing"));
    }

    #[test]
    fn test_empty_request_parses_to_empty_set() {
        assert!(FeatureSet::parse("").is_empty());
        assert!(FeatureSet::parse(",,,").is_empty());
    }
}
