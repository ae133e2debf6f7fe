//! CLI command execution: wires parsed arguments through configuration,
//! parameter validation, fetching, and the transform itself.

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::Config;
use crate::constants::{
    DEFAULT_ENTRY_POINT, DEFAULT_MARKER, DEFAULT_REMOTE_BASE_URL, DEFAULT_SOURCE_EXTENSION,
};
use crate::errors::TransformError;
use crate::output;
use crate::params::{self, InvocationParams};
use crate::project::{DirProject, GitFetcher, ProjectHandle, RemoteFetcher};
use crate::transform::{SeedTransform, TransformReport};

/// Run seedgen with the given arguments, writing output to stdout.
///
/// # Errors
/// Returns an error only for output failures; transform and argument
/// failures are reported and mapped to the exit code.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run seedgen with the given arguments, writing output to the specified
/// writer.
///
/// This is the testable version of [`run_with_args`] that allows output
/// capture. Exit codes: 0 on success, 1 on a failed transform, 2 on
/// argument errors.
///
/// # Errors
/// Returns an error only for output failures.
pub fn run_with_args_to<W: Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["seedgen".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(2);
            }
        },
    };

    if cli.output.verbose && !cli.output.json {
        eprintln!("[VERBOSE] seedgen v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("[VERBOSE] Using {} threads", rayon::current_num_threads());
    }

    match execute(&cli) {
        Ok(report) => {
            if cli.output.json {
                writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                output::print_report(writer, &report, cli.output.quiet)?;
            }
            writer.flush()?;
            Ok(0)
        }
        Err(error) => {
            output::print_error(&mut std::io::stderr(), &error)?;
            Ok(1)
        }
    }
}

/// Resolves configuration, validates parameters, acquires both projects,
/// and runs the transform.
fn execute(cli: &Cli) -> Result<TransformReport, TransformError> {
    let config_root = cli.seed_dir.as_deref().unwrap_or(Path::new("."));
    let config = Config::load_from_path(config_root);

    let marker = cli
        .annotation
        .clone()
        .or_else(|| config.seedgen.annotation.clone())
        .unwrap_or_else(|| DEFAULT_MARKER.to_owned());
    let extension = cli
        .extension
        .clone()
        .or_else(|| config.seedgen.source_extension.clone())
        .unwrap_or_else(|| DEFAULT_SOURCE_EXTENSION.to_owned());
    let entry_point = cli
        .entry_point
        .clone()
        .or_else(|| config.seedgen.entry_point.clone())
        .unwrap_or_else(|| DEFAULT_ENTRY_POINT.to_owned());
    let overwrite = cli.overwrite || config.seedgen.overwrite.unwrap_or(false);
    let base_url = config
        .seedgen
        .remote_base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_REMOTE_BASE_URL.to_owned());

    let params = collect_params(cli);
    if cli.seed_dir.is_none() && cli.reference_dir.is_none() {
        params.validate()?;
    }
    let remove = params.remove_features()?;
    let copy = params.copy_features()?;

    let fetcher = GitFetcher::with_base_url(base_url);

    let mut seed = match &cli.seed_dir {
        Some(dir) => DirProject::open(dir)?,
        None => {
            let repo = params.seed()?;
            let dest = cli
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(&repo.name));
            let spinner = output::create_spinner(&format!("cloning seed {repo}…"));
            let seed = fetcher.fetch_into(&repo, &dest);
            spinner.finish_and_clear();
            seed?
        }
    };

    let transform = SeedTransform::new(remove, copy)
        .with_marker(marker)
        .with_extension(extension)
        .with_entry_point(entry_point)
        .with_overwrite(overwrite);

    match &cli.reference_dir {
        Some(dir) => {
            let reference = DirProject::open(dir)?;
            transform.run_with_reference(&mut seed, Some(&reference as &(dyn ProjectHandle + Sync)))
        }
        None => {
            let repo = params.reference()?;
            let spinner = output::create_spinner("applying feature toggles…");
            let report = transform.run(&mut seed, &fetcher, &repo);
            spinner.finish_and_clear();
            report
        }
    }
}

fn collect_params(cli: &Cli) -> InvocationParams {
    let mut map = InvocationParams::new();
    map.insert(params::REMOVE_FEATURES, cli.features.remove_features.clone());
    map.insert(params::COPY_FEATURES, cli.features.copy_features.clone());

    let optional = [
        (params::SEED_OWNER, &cli.seed.seed_owner),
        (params::SEED_NAME, &cli.seed.seed_name),
        (params::SEED_BRANCH, &cli.seed.seed_branch),
        (params::REFERENCE_OWNER, &cli.reference.reference_owner),
        (params::REFERENCE_NAME, &cli.reference.reference_name),
        (params::REFERENCE_BRANCH, &cli.reference.reference_branch),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            map.insert(key, value.clone());
        }
    }
    map
}
