//! Shared constants.

/// Configuration file discovered by walking up from the working directory.
pub const CONFIG_FILENAME: &str = ".seedgen.toml";

/// Annotation name marking a type declaration as belonging to a feature.
pub const DEFAULT_MARKER: &str = "Feature";

/// Extension of the source files scanned for declarations.
pub const DEFAULT_SOURCE_EXTENSION: &str = "java";

/// File whose package declaration defines the seed's base package.
pub const DEFAULT_ENTRY_POINT: &str = "Application.java";

/// Forge repositories are cloned from when no other base URL is configured.
pub const DEFAULT_REMOTE_BASE_URL: &str = "https://github.com";

/// Tree-path selecting every type declaration of a compilation unit.
/// One declaration per file is assumed; nested declarations that also match
/// resolve to the same owning file.
pub const TYPE_DECLARATION_QUERY: &str = "/program//class_declaration|interface_declaration|enum_declaration|record_declaration|annotation_type_declaration";
