//! Gatherer test utilities

use std::collections::VecDeque;

use async_trait::async_trait;

use version_gatherer::gatherer::binary::Binary;
use version_gatherer::gatherer::contract::VersionsGatherer;
use version_gatherer::gatherer::error::{GathererError, MetaError};
use version_gatherer::gatherer::meta::GathererMeta;
use version_gatherer::gatherer::record::VersionRecord;
use version_gatherer::gatherer::state::GathererState;
use version_gatherer::gatherer::versions::{LatestPolicy, VersionSet};

/// One scripted gather outcome
pub enum Step {
    Found(Vec<&'static str>),
    Unreachable,
}

/// Gatherer that replays scripted outcomes, one per gather call
pub struct ScriptedGatherer {
    steps: VecDeque<Step>,
    state: GathererState,
    policy: LatestPolicy,
}

impl ScriptedGatherer {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            state: GathererState::new(),
            policy: LatestPolicy::Semver,
        }
    }

    /// Scripted gatherer with binary "toolX" already attached
    pub fn configured(steps: Vec<Step>) -> Self {
        let mut gatherer = Self::new(steps);
        gatherer.set_binary(Binary::new("toolX"));
        gatherer
    }
}

#[async_trait]
impl VersionsGatherer for ScriptedGatherer {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn description(&self) -> &'static str {
        "Replays scripted results. Meta keys: ORDER=semver|first|last"
    }

    fn set_binary(&mut self, binary: Binary) -> &mut dyn VersionsGatherer {
        self.state.set_binary(binary);
        self
    }

    fn set_meta(
        &mut self,
        meta: &GathererMeta,
    ) -> Result<&mut dyn VersionsGatherer, GathererError> {
        meta.reject_unknown(&["ORDER"])?;
        if let Some(order) = meta.get("ORDER") {
            self.policy = order.parse::<LatestPolicy>().map_err(|_| MetaError::InvalidValue {
                key: "ORDER".to_string(),
                value: order.to_string(),
                reason: "expected semver, first or last".to_string(),
            })?;
        }
        Ok(self)
    }

    async fn gather(&mut self) -> Result<(), GathererError> {
        let binary = self.state.binary()?.name.clone();
        let outcome = match self.steps.pop_front() {
            Some(Step::Found(ids)) => Ok(VersionSet::from_records(
                ids.into_iter().filter_map(VersionRecord::new),
                self.policy,
            )),
            Some(Step::Unreachable) | None => Err(GathererError::NotFound(binary)),
        };
        self.state.record_outcome(outcome)
    }

    fn latest_version(&self) -> Option<&VersionRecord> {
        self.state.latest()
    }

    fn versions(&self) -> &[VersionRecord] {
        self.state.versions()
    }
}

pub fn identifiers(records: &[VersionRecord]) -> Vec<&str> {
    records.iter().map(|r| r.identifier.as_str()).collect()
}
