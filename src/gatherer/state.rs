//! Configuration and result bookkeeping shared by gatherer implementations

use tracing::debug;

use crate::gatherer::binary::Binary;
use crate::gatherer::error::GathererError;
use crate::gatherer::record::VersionRecord;
use crate::gatherer::versions::VersionSet;

/// Lifecycle phase of a gatherer instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No binary attached yet
    Unconfigured,
    /// Binary attached, never successfully gathered
    Configured,
    /// Results of the most recent successful gather are available
    Gathered,
}

/// Holds the attached binary and the results of the most recent successful gather
#[derive(Debug, Clone, Default)]
pub struct GathererState {
    binary: Option<Binary>,
    versions: Option<VersionSet>,
}

impl GathererState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_binary(&mut self, binary: Binary) {
        debug!("Binary set to {}", binary.name);
        self.binary = Some(binary);
    }

    /// Returns the attached binary, or `NotConfigured` if none was set
    pub fn binary(&self) -> Result<&Binary, GathererError> {
        self.binary
            .as_ref()
            .ok_or(GathererError::NotConfigured("binary"))
    }

    pub fn phase(&self) -> Phase {
        match (&self.binary, &self.versions) {
            (_, Some(_)) => Phase::Gathered,
            (Some(_), None) => Phase::Configured,
            (None, None) => Phase::Unconfigured,
        }
    }

    /// Replaces the held results with a fresh result set
    pub fn replace(&mut self, versions: VersionSet) {
        self.versions = Some(versions);
    }

    /// Stores the outcome of a gather call.
    ///
    /// Results are only replaced on success; a failure keeps the previous
    /// results and is handed back to the caller.
    pub fn record_outcome(
        &mut self,
        outcome: Result<VersionSet, GathererError>,
    ) -> Result<(), GathererError> {
        let versions = outcome?;
        self.replace(versions);
        Ok(())
    }

    pub fn versions(&self) -> &[VersionRecord] {
        self.versions
            .as_ref()
            .map(VersionSet::records)
            .unwrap_or_default()
    }

    pub fn latest(&self) -> Option<&VersionRecord> {
        self.versions.as_ref().and_then(VersionSet::latest)
    }
}
