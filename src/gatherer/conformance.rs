//! Checks that a gatherer's results honor the contract
//!
//! Gatherer authors can run [`verify_gatherer`] after each gather in their own
//! tests; hosts can run [`verify`] before persisting results.

use std::collections::HashSet;

use thiserror::Error;

use crate::gatherer::contract::VersionsGatherer;
use crate::gatherer::record::VersionRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConformanceError {
    #[error("Identifier {0} appears more than once")]
    DuplicateIdentifier(String),

    #[error("Record at position {0} has an empty identifier")]
    EmptyIdentifier(usize),

    #[error("Latest version {0} is not among the gathered versions")]
    LatestNotMember(String),

    #[error("Versions were gathered but no latest version is reported")]
    MissingLatest,

    #[error("Latest version {0} reported although no versions were gathered")]
    LatestWithoutVersions(String),
}

pub fn verify(
    versions: &[VersionRecord],
    latest: Option<&VersionRecord>,
) -> Result<(), ConformanceError> {
    let mut seen = HashSet::with_capacity(versions.len());
    for (position, record) in versions.iter().enumerate() {
        if record.identifier.trim().is_empty() {
            return Err(ConformanceError::EmptyIdentifier(position));
        }
        if !seen.insert(record.identifier.as_str()) {
            return Err(ConformanceError::DuplicateIdentifier(
                record.identifier.clone(),
            ));
        }
    }

    match latest {
        Some(latest) if versions.is_empty() => Err(ConformanceError::LatestWithoutVersions(
            latest.identifier.clone(),
        )),
        Some(latest) if !versions.contains(latest) => {
            Err(ConformanceError::LatestNotMember(latest.identifier.clone()))
        }
        None if !versions.is_empty() => Err(ConformanceError::MissingLatest),
        _ => Ok(()),
    }
}

pub fn verify_gatherer(gatherer: &dyn VersionsGatherer) -> Result<(), ConformanceError> {
    verify(gatherer.versions(), gatherer.latest_version())
}
