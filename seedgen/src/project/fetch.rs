//! Fetching remote projects.
//!
//! The engine only needs a read-only checkout of the reference project and
//! a working checkout of the seed, so the contract is small: clone a
//! repository at a branch and hand back a [`DirProject`]. The `git2`-backed
//! implementation lives behind the [`RemoteFetcher`] trait so tests and
//! embedders can substitute local directories.

use std::fmt;
use std::path::Path;

use super::handle::DirProject;
use crate::errors::TransformError;

/// Coordinates of a remote repository at a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
    /// Branch to check out
    pub branch: String,
}

impl RepoRef {
    /// Creates a repository reference.
    pub fn new(owner: impl Into<String>, name: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            branch: branch.into(),
        }
    }

    /// Clone URL under `base_url`, e.g. `https://github.com/acme/shop.git`.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}/{}.git", base_url.trim_end_matches('/'), self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.name, self.branch)
    }
}

/// A fetched read-only project, keeping its backing directory alive for the
/// lifetime of the run.
#[derive(Debug)]
pub struct FetchedProject {
    project: DirProject,
    _workdir: tempfile::TempDir,
}

impl FetchedProject {
    /// Handle to the fetched checkout
    #[must_use]
    pub fn handle(&self) -> &DirProject {
        &self.project
    }
}

/// Clones remote repositories into local checkouts.
pub trait RemoteFetcher {
    /// Clones `repo` into `dest`.
    ///
    /// # Errors
    /// Returns [`TransformError::RemoteFetchFailure`] if the clone fails.
    fn fetch_into(&self, repo: &RepoRef, dest: &Path) -> Result<DirProject, TransformError>;

    /// Clones `repo` into a fresh temporary directory.
    ///
    /// # Errors
    /// Returns [`TransformError::RemoteFetchFailure`] if the clone fails.
    fn fetch(&self, repo: &RepoRef) -> Result<FetchedProject, TransformError> {
        let workdir = tempfile::TempDir::new()?;
        let project = self.fetch_into(repo, workdir.path())?;
        Ok(FetchedProject {
            project,
            _workdir: workdir,
        })
    }
}

/// `git2`-backed fetcher.
pub struct GitFetcher {
    base_url: String,
}

impl GitFetcher {
    /// Fetcher cloning from github.com.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(crate::constants::DEFAULT_REMOTE_BASE_URL)
    }

    /// Fetcher cloning from a different forge or mirror.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteFetcher for GitFetcher {
    fn fetch_into(&self, repo: &RepoRef, dest: &Path) -> Result<DirProject, TransformError> {
        let url = repo.url(&self.base_url);
        git2::build::RepoBuilder::new()
            .branch(&repo.branch)
            .clone(&url, dest)
            .map_err(|e| TransformError::RemoteFetchFailure {
                owner: repo.owner.clone(),
                name: repo.name.clone(),
                branch: repo.branch.clone(),
                reason: e.message().to_owned(),
            })?;
        Ok(DirProject::open(dest)?)
    }
}
