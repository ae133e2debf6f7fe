//! Project handles: the filesystem seam every transform runs through.
//!
//! Reads may fan out across threads; writes and deletes take `&mut self`
//! so all mutations against one project are serialized through a single
//! writer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The two glob shapes the engine needs: `**/*.<ext>` for source listing
/// and `**/<FileName>` for entry-point resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePattern {
    /// Matches any file with the extension (without the dot)
    Extension(String),
    /// Matches any file with exactly this file name
    FileName(String),
}

impl FilePattern {
    /// Pattern matching `**/*.<ext>`
    pub fn extension(ext: impl Into<String>) -> Self {
        Self::Extension(ext.into())
    }

    /// Pattern matching `**/<name>`
    pub fn file_name(name: impl Into<String>) -> Self {
        Self::FileName(name.into())
    }

    /// Parses the supported glob forms; anything else yields `None`.
    #[must_use]
    pub fn parse(glob: &str) -> Option<Self> {
        let rest = glob.strip_prefix("**/")?;
        if rest.is_empty() || rest.contains('/') {
            return None;
        }
        if let Some(ext) = rest.strip_prefix("*.") {
            return (!ext.is_empty() && !ext.contains('*')).then(|| Self::extension(ext));
        }
        (!rest.contains('*')).then(|| Self::file_name(rest))
    }

    /// Whether `path` matches this pattern.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Self::Extension(ext) => path.extension().is_some_and(|e| e == ext.as_str()),
            Self::FileName(name) => path.file_name().is_some_and(|n| n == name.as_str()),
        }
    }
}

/// Contract the engine holds against a project tree.
///
/// `list_files` returns paths relative to the project root, sorted, so
/// downstream planning is deterministic regardless of walk order.
/// Deleting an absent path is a no-op, which makes repeated runs of the
/// same removal idempotent.
pub trait ProjectHandle {
    /// Root directory of the project
    fn root(&self) -> &Path;

    /// Lists files matching `pattern`, relative to the root, sorted
    fn list_files(&self, pattern: &FilePattern) -> io::Result<Vec<PathBuf>>;

    /// Reads a file's content by root-relative path
    fn read_file(&self, path: &Path) -> io::Result<String>;

    /// Whether a root-relative path exists
    fn exists(&self, path: &Path) -> bool;

    /// Writes a file, creating parent directories as needed
    fn write_file(&mut self, path: &Path, content: &str) -> io::Result<()>;

    /// Deletes a file; absent paths are a no-op
    fn delete_file(&mut self, path: &Path) -> io::Result<()>;
}

/// A project handle over a plain directory.
#[derive(Debug)]
pub struct DirProject {
    root: PathBuf,
}

impl DirProject {
    /// Opens an existing directory as a project.
    ///
    /// # Errors
    /// Returns an error if `root` is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("project root `{}` is not a directory", root.display()),
            ));
        }
        Ok(Self { root })
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl ProjectHandle for DirProject {
    fn root(&self) -> &Path {
        &self.root
    }

    fn list_files(&self, pattern: &FilePattern) -> io::Result<Vec<PathBuf>> {
        use ignore::WalkBuilder;

        // Honor .gitignore but do not skip hidden files.
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        let mut files = Vec::new();
        for entry in walker.flatten() {
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let path = entry.path();
            if !pattern.matches(path) {
                continue;
            }
            if let Ok(relative) = path.strip_prefix(&self.root) {
                files.push(relative.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(self.absolute(path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.absolute(path).exists()
    }

    fn write_file(&mut self, path: &Path, content: &str) -> io::Result<()> {
        let absolute = self.absolute(path);
        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(absolute, content)
    }

    fn delete_file(&mut self, path: &Path) -> io::Result<()> {
        let absolute = self.absolute(path);
        if !absolute.exists() {
            return Ok(());
        }
        fs::remove_file(absolute)
    }
}
