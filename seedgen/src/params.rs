//! Invocation parameters: the flat, string-keyed contract a transform is
//! requested through.
//!
//! All eight keys are required and validated non-empty before anything
//! runs. Feature lists and repository coordinates are derived views over
//! the validated map.

use std::collections::BTreeMap;

use crate::errors::TransformError;
use crate::feature::FeatureSet;
use crate::project::RepoRef;

/// Comma-separated features to delete from the seed.
pub const REMOVE_FEATURES: &str = "remove.features";
/// Comma-separated features to copy from the reference project.
pub const COPY_FEATURES: &str = "copy.features";
/// Seed repository owner.
pub const SEED_OWNER: &str = "seed.owner";
/// Seed repository name.
pub const SEED_NAME: &str = "seed.name";
/// Seed branch.
pub const SEED_BRANCH: &str = "seed.branch";
/// Reference repository owner.
pub const REFERENCE_OWNER: &str = "reference.owner";
/// Reference repository name.
pub const REFERENCE_NAME: &str = "reference.name";
/// Reference branch.
pub const REFERENCE_BRANCH: &str = "reference.branch";

/// Every key a transform request must carry.
pub const REQUIRED_KEYS: [&str; 8] = [
    REMOVE_FEATURES,
    COPY_FEATURES,
    SEED_OWNER,
    SEED_NAME,
    SEED_BRANCH,
    REFERENCE_OWNER,
    REFERENCE_NAME,
    REFERENCE_BRANCH,
];

/// A transform request's raw parameters.
#[derive(Debug, Clone, Default)]
pub struct InvocationParams {
    values: BTreeMap<String, String>,
}

impl InvocationParams {
    /// An empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from key/value pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Sets one parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Fetches a required parameter.
    ///
    /// # Errors
    /// `MissingParameter` if absent, `BlankParameter` if present but
    /// whitespace-only.
    pub fn get(&self, key: &'static str) -> Result<&str, TransformError> {
        let value = self
            .values
            .get(key)
            .ok_or(TransformError::MissingParameter(key))?;
        if value.trim().is_empty() {
            return Err(TransformError::BlankParameter(key));
        }
        Ok(value)
    }

    /// Validates that every required key is present and non-blank.
    ///
    /// # Errors
    /// The first missing or blank key, by [`REQUIRED_KEYS`] order.
    pub fn validate(&self) -> Result<(), TransformError> {
        for key in REQUIRED_KEYS {
            self.get(key)?;
        }
        Ok(())
    }

    /// The parsed remove set.
    ///
    /// # Errors
    /// If `remove.features` is missing or blank.
    pub fn remove_features(&self) -> Result<FeatureSet, TransformError> {
        Ok(FeatureSet::parse(self.get(REMOVE_FEATURES)?))
    }

    /// The parsed copy set.
    ///
    /// # Errors
    /// If `copy.features` is missing or blank.
    pub fn copy_features(&self) -> Result<FeatureSet, TransformError> {
        Ok(FeatureSet::parse(self.get(COPY_FEATURES)?))
    }

    /// Seed repository coordinates.
    ///
    /// # Errors
    /// If any `seed.*` key is missing or blank.
    pub fn seed(&self) -> Result<RepoRef, TransformError> {
        Ok(RepoRef::new(
            self.get(SEED_OWNER)?,
            self.get(SEED_NAME)?,
            self.get(SEED_BRANCH)?,
        ))
    }

    /// Reference repository coordinates.
    ///
    /// # Errors
    /// If any `reference.*` key is missing or blank.
    pub fn reference(&self) -> Result<RepoRef, TransformError> {
        Ok(RepoRef::new(
            self.get(REFERENCE_OWNER)?,
            self.get(REFERENCE_NAME)?,
            self.get(REFERENCE_BRANCH)?,
        ))
    }
}
