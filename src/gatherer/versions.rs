//! Result set of a single gather cycle

use std::collections::HashSet;
use std::str::FromStr;

use crate::gatherer::record::VersionRecord;
use crate::gatherer::semver::parse_identifier;

/// How the latest release is chosen from a result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LatestPolicy {
    /// Greatest identifier by semantic version; falls back to the first
    /// listed record when no identifier parses as a version.
    #[default]
    Semver,
    /// The first record the source listed
    FirstListed,
    /// The last record the source listed
    LastListed,
}

impl LatestPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LatestPolicy::Semver => "semver",
            LatestPolicy::FirstListed => "first",
            LatestPolicy::LastListed => "last",
        }
    }
}

impl FromStr for LatestPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "semver" => Ok(LatestPolicy::Semver),
            "first" => Ok(LatestPolicy::FirstListed),
            "last" => Ok(LatestPolicy::LastListed),
            _ => Err(()),
        }
    }
}

/// Versions discovered by one gather call, in source order.
///
/// Identifiers are unique: a record whose identifier is already present is
/// not inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSet {
    records: Vec<VersionRecord>,
    seen: HashSet<String>,
    policy: LatestPolicy,
}

impl VersionSet {
    pub fn new(policy: LatestPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Builds a set from records, keeping the first occurrence of each identifier
    pub fn from_records(
        records: impl IntoIterator<Item = VersionRecord>,
        policy: LatestPolicy,
    ) -> Self {
        let mut set = Self::new(policy);
        for record in records {
            set.insert(record);
        }
        set
    }

    /// Inserts a record. Returns false if its identifier was already present.
    pub fn insert(&mut self, record: VersionRecord) -> bool {
        if !self.seen.insert(record.identifier.clone()) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn records(&self) -> &[VersionRecord] {
        &self.records
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.seen.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn policy(&self) -> LatestPolicy {
        self.policy
    }

    /// Returns the record judged most recent, or None if the set is empty
    pub fn latest(&self) -> Option<&VersionRecord> {
        match self.policy {
            LatestPolicy::FirstListed => self.records.first(),
            LatestPolicy::LastListed => self.records.last(),
            LatestPolicy::Semver => self
                .records
                .iter()
                .filter_map(|r| parse_identifier(&r.identifier).map(|v| (v, r)))
                // max_by keeps the last maximum; reverse so the first listed wins ties
                .rev()
                .max_by(|(a, _), (b, _)| a.cmp(b))
                .map(|(_, r)| r)
                .or_else(|| self.records.first()),
        }
    }

    /// Drops records strictly older than `identifier`.
    ///
    /// Filtering is advisory: records that do not parse as versions are kept,
    /// and an unparseable bound keeps everything.
    pub fn retain_not_older_than(&mut self, identifier: &str) {
        let Some(bound) = parse_identifier(identifier) else {
            return;
        };

        let seen = &mut self.seen;
        self.records.retain(|record| {
            let keep = parse_identifier(&record.identifier).is_none_or(|v| v >= bound);
            if !keep {
                seen.remove(&record.identifier);
            }
            keep
        });
    }
}

impl IntoIterator for VersionSet {
    type Item = VersionRecord;
    type IntoIter = std::vec::IntoIter<VersionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
