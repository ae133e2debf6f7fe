//! Command-line interface definition.

use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.seedgen.toml):
  Create this file in your project root to set defaults.

  [seedgen]
  annotation = \"Feature\"          # Marker annotation name
  source_extension = \"java\"       # Scanned source extension
  entry_point = \"Application.java\" # File resolving the base package
  overwrite = false               # Allow relocation to replace files
  remote_base_url = \"https://github.com\"
";

/// Feature selection arguments.
#[derive(Args, Debug, Default, Clone)]
pub struct FeatureArgs {
    /// Comma-separated features to delete from the seed project.
    #[arg(long, value_name = "LIST")]
    pub remove_features: String,

    /// Comma-separated features to copy from the reference project.
    #[arg(long, value_name = "LIST")]
    pub copy_features: String,
}

/// Seed repository coordinates (not needed with --seed-dir).
#[derive(Args, Debug, Default, Clone)]
pub struct SeedArgs {
    /// Seed repository owner.
    #[arg(long, value_name = "USER", required_unless_present = "seed_dir")]
    pub seed_owner: Option<String>,

    /// Seed repository name.
    #[arg(long, value_name = "REPO", required_unless_present = "seed_dir")]
    pub seed_name: Option<String>,

    /// Seed branch to check out.
    #[arg(long, value_name = "BRANCH", required_unless_present = "seed_dir")]
    pub seed_branch: Option<String>,
}

/// Reference repository coordinates (not needed with --reference-dir).
#[derive(Args, Debug, Default, Clone)]
pub struct ReferenceArgs {
    /// Reference repository owner.
    #[arg(long, value_name = "USER", required_unless_present = "reference_dir")]
    pub reference_owner: Option<String>,

    /// Reference repository name.
    #[arg(long, value_name = "REPO", required_unless_present = "reference_dir")]
    pub reference_name: Option<String>,

    /// Reference branch to check out.
    #[arg(long, value_name = "BRANCH", required_unless_present = "reference_dir")]
    pub reference_branch: Option<String>,
}

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output the run report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Quiet mode: print the summary line only, no operations table.
    #[arg(long)]
    pub quiet: bool,

    /// Verbose output for debugging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Command line interface configuration using `clap`.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "seedgen - customize a seed project by deleting and relocating feature-tagged types",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Feature selection.
    #[command(flatten)]
    pub features: FeatureArgs,

    /// Seed repository coordinates.
    #[command(flatten)]
    pub seed: SeedArgs,

    /// Reference repository coordinates.
    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Output options.
    #[command(flatten)]
    pub output: OutputOptions,

    /// Transform an existing local checkout instead of cloning the seed.
    #[arg(long, value_name = "DIR")]
    pub seed_dir: Option<PathBuf>,

    /// Read the reference project from a local directory instead of cloning.
    #[arg(long, value_name = "DIR")]
    pub reference_dir: Option<PathBuf>,

    /// Directory the cloned seed is written to (defaults to ./<seed.name>).
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Allow relocation to overwrite existing destination files.
    #[arg(long)]
    pub overwrite: bool,

    /// Marker annotation name (overrides config).
    #[arg(long, value_name = "NAME")]
    pub annotation: Option<String>,

    /// Scanned source extension, without the dot (overrides config).
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Entry-point file name used to resolve the base package.
    #[arg(long, value_name = "FILE")]
    pub entry_point: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_local_dirs_relax_remote_requirements() {
        let cli = Cli::try_parse_from([
            "seedgen",
            "--remove-features",
            "Echo",
            "--copy-features",
            ",",
            "--seed-dir",
            "seed",
            "--reference-dir",
            "reference",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_remote_coordinates_required_without_dirs() {
        let cli = Cli::try_parse_from([
            "seedgen",
            "--remove-features",
            "Echo",
            "--copy-features",
            ",",
        ]);
        assert!(cli.is_err());
    }
}
