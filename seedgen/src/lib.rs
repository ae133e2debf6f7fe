//! Core library for the seedgen project customizer.
//!
//! seedgen parses a seed project's Java sources into queryable syntax
//! trees, locates type declarations tagged with a feature annotation, and
//! deletes or relocates their files to produce a customized variant of the
//! seed. Relocated files move from a read-only reference project into the
//! seed's own package, with their package declaration rewritten to match.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

/// Command-line argument definitions.
pub mod cli;

/// Command execution: argument handling through transform and output.
pub mod commands;

/// Configuration file loading.
pub mod config;

/// Shared constants.
pub mod constants;

/// Fatal errors and collected warnings.
pub mod errors;

/// Feature identity: annotations, classification, and requested sets.
pub mod feature;

/// Styled terminal output.
pub mod output;

/// Invocation parameter map and validation.
pub mod params;

/// Project handles and remote fetching.
pub mod project;

/// Syntax trees and tree-path queries.
pub mod syntax;

/// Transform planning and the committing orchestrator.
pub mod transform;
