//! Original gatherer contract: the last known identifier is passed to `gather`

use tracing::debug;

use crate::gatherer::contract::VersionsGatherer;
use crate::gatherer::error::GatherError;
use crate::gatherer::record::VersionRecord;
use crate::gatherer::versions::{LatestPolicy, VersionSet};

/// Checks an external source for releases, told the last known release on each call
#[async_trait::async_trait]
pub trait BinaryVersionGatherer: Send + Sync {
    /// Fetches versions from the external source, replacing the previous results.
    ///
    /// # Arguments
    /// * `last_known` - Identifier of the newest version the host already has.
    ///   Implementations may skip versions older than it; hosts must not rely on that.
    async fn gather(&mut self, last_known: Option<&str>) -> Result<(), GatherError>;

    /// Returns the most recent version of the last gather, or None if nothing was gathered
    fn latest_version(&self) -> Option<&VersionRecord>;

    /// Returns all versions the last gather recognized
    fn versions(&self) -> &[VersionRecord];
}

/// Exposes a configured [`VersionsGatherer`] through the original contract
pub struct LegacyAdapter<G> {
    inner: G,
    versions: VersionSet,
    latest: Option<String>,
}

impl<G: VersionsGatherer> LegacyAdapter<G> {
    /// Wraps a gatherer that already had its binary and metadata set
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            versions: VersionSet::default(),
            latest: None,
        }
    }
}

#[async_trait::async_trait]
impl<G: VersionsGatherer> BinaryVersionGatherer for LegacyAdapter<G> {
    async fn gather(&mut self, last_known: Option<&str>) -> Result<(), GatherError> {
        self.inner.gather().await?;

        let mut versions =
            VersionSet::from_records(self.inner.versions().iter().cloned(), LatestPolicy::Semver);
        if let Some(identifier) = last_known {
            let before = versions.len();
            versions.retain_not_older_than(identifier);
            debug!(
                "Skipped {} versions older than {}",
                before - versions.len(),
                identifier
            );
        }

        self.latest = self
            .inner
            .latest_version()
            .map(|r| r.identifier.clone())
            .filter(|id| versions.contains(id));
        self.versions = versions;
        Ok(())
    }

    fn latest_version(&self) -> Option<&VersionRecord> {
        match &self.latest {
            Some(id) => self.versions.records().iter().find(|r| &r.identifier == id),
            None => self.versions.latest(),
        }
    }

    fn versions(&self) -> &[VersionRecord] {
        self.versions.records()
    }
}
