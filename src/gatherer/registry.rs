//! Gatherer registry
//!
//! Hosts look up gatherers by the name stored in a binary's configuration and
//! get back an instance with binary and metadata already attached.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::HttpConfig;
use crate::gatherer::binary::Binary;
use crate::gatherer::contract::VersionsGatherer;
use crate::gatherer::error::GathererError;
use crate::gatherer::gatherers::TagsFeedGatherer;
use crate::gatherer::meta::GathererMeta;
use crate::gatherer::source::TagSource;
use crate::gatherer::sources::HttpTagSource;

type Factory = Arc<dyn Fn() -> Box<dyn VersionsGatherer> + Send + Sync>;

struct Entry {
    description: &'static str,
    factory: Factory,
}

/// Maps gatherer names to constructors
#[derive(Default)]
pub struct GathererRegistry {
    entries: BTreeMap<&'static str, Entry>,
}

impl GathererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the registry with every built-in gatherer, sharing one HTTP client
    pub fn with_defaults(config: &HttpConfig) -> Result<Self, GathererError> {
        let source: Arc<dyn TagSource> = Arc::new(HttpTagSource::new(config)?);

        let mut registry = Self::new();
        registry.register(move || Box::new(TagsFeedGatherer::new(source.clone())));
        Ok(registry)
    }

    /// Registers a gatherer kind under the name its instances report.
    ///
    /// A kind registered under an existing name replaces the earlier one.
    pub fn register<F>(&mut self, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn VersionsGatherer> + Send + Sync + 'static,
    {
        let probe = factory();
        let name = probe.name();
        let entry = Entry {
            description: probe.description(),
            factory: Arc::new(factory),
        };

        if self.entries.insert(name, entry).is_some() {
            info!("Replaced gatherer registration for {}", name);
        } else {
            debug!("Registered gatherer {}", name);
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in ascending order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    /// Name and description of every registered gatherer, sorted by name
    pub fn catalog(&self) -> Vec<(&'static str, &'static str)> {
        self.entries
            .iter()
            .map(|(name, entry)| (*name, entry.description))
            .collect()
    }

    /// Constructs the named gatherer and attaches `binary` and `meta` to it
    pub fn create(
        &self,
        name: &str,
        binary: Binary,
        meta: &GathererMeta,
    ) -> Result<Box<dyn VersionsGatherer>, GathererError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| GathererError::UnknownGatherer(name.to_string()))?;

        let mut gatherer = (entry.factory)();
        gatherer.set_binary(binary).set_meta(meta)?;
        Ok(gatherer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gatherer::error::MetaError;
    use crate::gatherer::source::{Listing, MockTagSource};

    fn tags_feed_registry(source: MockTagSource) -> GathererRegistry {
        let source: Arc<dyn TagSource> = Arc::new(source);
        let mut registry = GathererRegistry::new();
        registry.register(move || Box::new(TagsFeedGatherer::new(source.clone())));
        registry
    }

    #[tokio::test]
    async fn create_returns_configured_gatherer() {
        let mut source = MockTagSource::new();
        source
            .expect_fetch()
            .with(mockall::predicate::eq("http://example.test/toolX/tags"))
            .returning(|_| Ok(Listing::new("v1.0\nv2.0\n")));
        let registry = tags_feed_registry(source);

        let mut gatherer = registry
            .create(
                "tags-feed",
                Binary::new("toolX"),
                &GathererMeta::parse("URL=http://example.test/{binary}/tags").unwrap(),
            )
            .unwrap();
        gatherer.gather().await.unwrap();

        assert_eq!(gatherer.name(), "tags-feed");
        assert_eq!(gatherer.latest_version().unwrap().identifier, "v2.0");
    }

    #[test]
    fn create_fails_for_unknown_name() {
        let registry = tags_feed_registry(MockTagSource::new());

        let result = registry.create("rss", Binary::new("toolX"), &GathererMeta::default());

        assert!(matches!(result, Err(GathererError::UnknownGatherer(name)) if name == "rss"));
    }

    #[test]
    fn create_fails_for_invalid_meta() {
        let registry = tags_feed_registry(MockTagSource::new());

        let result = registry.create("tags-feed", Binary::new("toolX"), &GathererMeta::default());

        assert!(matches!(
            result,
            Err(GathererError::InvalidMeta(MetaError::MissingKey(_)))
        ));
    }

    #[test]
    fn catalog_lists_names_with_descriptions() {
        let registry = tags_feed_registry(MockTagSource::new());

        let catalog = registry.catalog();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].0, "tags-feed");
        assert!(catalog[0].1.contains("PATTERN"));
        assert!(registry.contains("tags-feed"));
        assert!(!registry.contains("rss"));
    }

    #[test]
    fn register_same_name_replaces_previous_entry() {
        let mut registry = tags_feed_registry(MockTagSource::new());
        let source: Arc<dyn TagSource> = Arc::new(MockTagSource::new());

        registry.register(move || Box::new(TagsFeedGatherer::new(source.clone())));

        assert_eq!(registry.names(), vec!["tags-feed"]);
    }

    #[test]
    fn with_defaults_registers_built_in_gatherers() {
        let registry = GathererRegistry::with_defaults(&HttpConfig::default()).unwrap();

        assert_eq!(registry.names(), vec!["tags-feed"]);
    }
}
