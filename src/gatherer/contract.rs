//! Gatherer contract for hosts that construct gatherers generically
//!
//! A host creates a gatherer (usually through a
//! [`GathererRegistry`](crate::gatherer::registry::GathererRegistry)), calls
//! [`set_binary`](VersionsGatherer::set_binary) and
//! [`set_meta`](VersionsGatherer::set_meta) right after construction, and
//! later runs [`gather`](VersionsGatherer::gather) and reads the results.
//!
//! ```text
//! Unconfigured ──set_binary/set_meta──▶ Configured ──gather──▶ Gathered ◀─┐
//!                                                                 └──gather─┘
//! ```

use crate::gatherer::binary::Binary;
use crate::gatherer::error::GathererError;
use crate::gatherer::meta::GathererMeta;
use crate::gatherer::record::VersionRecord;

/// Checks an external source for releases of one binary
#[async_trait::async_trait]
pub trait VersionsGatherer: Send + Sync {
    /// Short, stable name of this gatherer kind (e.g. "tags-feed")
    fn name(&self) -> &'static str;

    /// Human-readable explanation of the gatherer and its metadata keys
    fn description(&self) -> &'static str;

    /// Attaches the binary to gather versions for.
    ///
    /// Results of an earlier gather stay available until the next gather.
    fn set_binary(&mut self, binary: Binary) -> &mut dyn VersionsGatherer;

    /// Attaches the user-supplied metadata, validating it against the
    /// gatherer's options.
    ///
    /// # Returns
    /// * `Ok(&mut dyn VersionsGatherer)` - The gatherer, for chaining
    /// * `Err(GathererError::InvalidMeta)` - If the metadata is malformed or incomplete
    fn set_meta(&mut self, meta: &GathererMeta)
    -> Result<&mut dyn VersionsGatherer, GathererError>;

    /// Fetches versions from the external source, replacing the previous results.
    ///
    /// On failure the previous results are left unchanged.
    async fn gather(&mut self) -> Result<(), GathererError>;

    /// Returns the most recent version of the last gather, or None if nothing was gathered
    fn latest_version(&self) -> Option<&VersionRecord>;

    /// Returns all versions the last gather recognized
    fn versions(&self) -> &[VersionRecord];
}

#[async_trait::async_trait]
impl VersionsGatherer for Box<dyn VersionsGatherer> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn description(&self) -> &'static str {
        (**self).description()
    }

    fn set_binary(&mut self, binary: Binary) -> &mut dyn VersionsGatherer {
        (**self).set_binary(binary)
    }

    fn set_meta(
        &mut self,
        meta: &GathererMeta,
    ) -> Result<&mut dyn VersionsGatherer, GathererError> {
        (**self).set_meta(meta)
    }

    async fn gather(&mut self) -> Result<(), GathererError> {
        (**self).gather().await
    }

    fn latest_version(&self) -> Option<&VersionRecord> {
        (**self).latest_version()
    }

    fn versions(&self) -> &[VersionRecord] {
        (**self).versions()
    }
}
