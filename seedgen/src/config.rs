//! Configuration loading.
//!
//! Defaults live in a `.seedgen.toml` discovered by walking up from the
//! seed directory (or the working directory). Command-line flags override
//! whatever the file provides.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::CONFIG_FILENAME;

/// Top-level configuration struct.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// The `[seedgen]` section.
    #[serde(default)]
    pub seedgen: SeedgenConfig,
    /// Path of the file this was loaded from; `None` for defaults.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

/// Engine defaults configurable per project.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct SeedgenConfig {
    /// Marker annotation name (defaults to `Feature`).
    pub annotation: Option<String>,
    /// Scanned source extension (defaults to `java`).
    pub source_extension: Option<String>,
    /// Entry-point file name (defaults to `Application.java`).
    pub entry_point: Option<String>,
    /// Allow relocation to overwrite existing files.
    pub overwrite: Option<bool>,
    /// Base URL repositories are cloned from.
    pub remote_base_url: Option<String>,
}

impl Config {
    /// Loads configuration from the current directory upward.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from `path` and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                if let Ok(content) = fs::read_to_string(&candidate) {
                    if let Ok(mut config) = toml::from_str::<Config>(&content) {
                        config.config_file_path = Some(candidate);
                        return config;
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }
}
