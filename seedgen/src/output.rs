//! Styled terminal output for transform runs.

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;

use crate::errors::TransformError;
use crate::transform::TransformReport;

/// Create and return a spinner for long-running steps (cloning, parsing).
///
/// In test mode, returns a hidden progress bar to avoid polluting test
/// output.
#[must_use]
pub fn create_spinner(message: &str) -> ProgressBar {
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print the main header with box-drawing characters.
///
/// # Errors
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}",
        "╔════════════════════════════════════════╗".cyan()
    )?;
    writeln!(
        writer,
        "{}",
        "║  Seed Transform Results                ║".cyan().bold()
    )?;
    writeln!(
        writer,
        "{}",
        "╚════════════════════════════════════════╝".cyan()
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Print the report: summary pills, then the operations table and warnings
/// unless `quiet` is set.
///
/// # Errors
/// Returns an error if writing to the output fails.
pub fn print_report(
    writer: &mut impl Write,
    report: &TransformReport,
    quiet: bool,
) -> std::io::Result<()> {
    if !quiet {
        print_header(writer)?;
    }

    let summary = &report.summary;
    writeln!(
        writer,
        "{} {} {} {}",
        format!("[{} seed files]", summary.seed_files).cyan(),
        format!("[{} written]", summary.files_written).green(),
        format!("[{} deleted]", summary.files_deleted).red(),
        format!("[{} warnings]", summary.warnings).yellow(),
    )?;

    if quiet {
        return Ok(());
    }

    if !report.written.is_empty() || !report.deleted.is_empty() {
        writeln!(writer)?;
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Action", "Path"]);
        for path in &report.written {
            table.add_row(vec![Cell::new("write").fg(Color::Green), Cell::new(path)]);
        }
        for path in &report.deleted {
            table.add_row(vec![Cell::new("delete").fg(Color::Red), Cell::new(path)]);
        }
        writeln!(writer, "{table}")?;
    } else {
        writeln!(writer)?;
        writeln!(writer, "{}", "No files changed.".dimmed())?;
    }

    if !report.warnings.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "{}", "Warnings:".yellow().bold())?;
        for warning in &report.warnings {
            writeln!(writer, "  {} {}", "!".yellow(), warning)?;
        }
    }

    Ok(())
}

/// Print a fatal error.
///
/// # Errors
/// Returns an error if writing to the output fails.
pub fn print_error(writer: &mut impl Write, error: &TransformError) -> std::io::Result<()> {
    writeln!(writer, "{} {}", "[FAIL]".red().bold(), error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TransformSummary;

    fn sample_report() -> TransformReport {
        TransformReport {
            written: vec!["src/echo/Echo.java".to_owned()],
            deleted: vec!["src/old/Old.java".to_owned()],
            warnings: Vec::new(),
            summary: TransformSummary {
                seed_files: 4,
                reference_files: 2,
                files_written: 1,
                files_deleted: 1,
                warnings: 0,
            },
        }
    }

    #[test]
    fn test_report_lists_operations() {
        let mut buffer = Vec::new();
        print_report(&mut buffer, &sample_report(), false).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("src/echo/Echo.java"));
        assert!(text.contains("src/old/Old.java"));
    }

    #[test]
    fn test_quiet_report_is_one_line() {
        let mut buffer = Vec::new();
        print_report(&mut buffer, &sample_report(), true).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("[1 written]"));
    }

    #[test]
    fn test_error_output_names_the_failure() {
        let mut buffer = Vec::new();
        let error = TransformError::FileWriteConflict("src/echo/Echo.java".into());
        print_error(&mut buffer, &error).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("src/echo/Echo.java"));
    }
}
