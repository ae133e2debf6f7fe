//! Main binary entry point for the `seedgen` tool.
//!
//! Delegates to the shared `commands::run_with_args()` function so the
//! binary and embedding callers behave identically.

use anyhow::Result;

fn main() -> Result<()> {
    let code = seedgen::commands::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
