//! Gatherer reading release tags from a listing URL
//!
//! The listing can be a JSON array of tag names, a JSON array of objects
//! (GitHub's tags and releases endpoints both fit), or plain text with one
//! tag per line.

use std::str::FromStr;
use std::sync::Arc;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::HttpConfig;
use crate::gatherer::binary::Binary;
use crate::gatherer::contract::VersionsGatherer;
use crate::gatherer::error::{GathererError, MetaError};
use crate::gatherer::meta::GathererMeta;
use crate::gatherer::record::{Eol, VersionRecord};
use crate::gatherer::source::{Listing, TagSource};
use crate::gatherer::sources::HttpTagSource;
use crate::gatherer::state::GathererState;
use crate::gatherer::versions::{LatestPolicy, VersionSet};

pub const NAME: &str = "tags-feed";

const DESCRIPTION: &str = "Reads release tags from a URL. The listing may be a JSON array of \
tag names, a JSON array of objects with an identifier, name or tag_name field (optional note \
or body, and eol), or plain text with one tag per line.\n\
Meta keys:\n\
URL=<http(s) url> (required, {binary} is replaced by the binary name)\n\
FORMAT=auto|json|lines (default auto)\n\
ORDER=semver|first|last (how the latest tag is chosen, default semver)\n\
PATTERN=<regex> (only matching tags are kept)";

/// Placeholder in the URL that is replaced by the binary's name
const BINARY_PLACEHOLDER: &str = "{binary}";

const META_KEYS: &[&str] = &["URL", "FORMAT", "ORDER", "PATTERN"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedFormat {
    #[default]
    Auto,
    Json,
    Lines,
}

impl FromStr for FeedFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(FeedFormat::Auto),
            "json" => Ok(FeedFormat::Json),
            "lines" => Ok(FeedFormat::Lines),
            other => Err(format!("expected auto, json or lines, got {}", other)),
        }
    }
}

/// Typed options of the tags-feed gatherer
#[derive(Debug, Clone)]
pub struct TagsFeedOptions {
    pub url: String,
    pub format: FeedFormat,
    pub order: LatestPolicy,
    pub pattern: Option<Regex>,
}

impl TagsFeedOptions {
    /// Returns the listing URL for `binary`
    pub fn location_for(&self, binary: &Binary) -> String {
        self.url.replace(BINARY_PLACEHOLDER, &binary.name)
    }
}

impl TryFrom<&GathererMeta> for TagsFeedOptions {
    type Error = MetaError;

    fn try_from(meta: &GathererMeta) -> Result<Self, Self::Error> {
        meta.reject_unknown(META_KEYS)?;

        let url = meta.require("URL")?.to_string();
        let invalid_url = |reason: String| MetaError::InvalidValue {
            key: "URL".to_string(),
            value: url.clone(),
            reason,
        };
        let parsed = reqwest::Url::parse(&url.replace(BINARY_PLACEHOLDER, "binary"))
            .map_err(|e| invalid_url(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid_url(format!(
                "unsupported scheme {}",
                parsed.scheme()
            )));
        }

        let order = match meta.get("ORDER") {
            Some(value) => value.parse::<LatestPolicy>().map_err(|_| MetaError::InvalidValue {
                key: "ORDER".to_string(),
                value: value.to_string(),
                reason: "expected semver, first or last".to_string(),
            })?,
            None => LatestPolicy::default(),
        };

        Ok(Self {
            format: meta.get_parsed("FORMAT")?.unwrap_or_default(),
            pattern: meta.get_parsed("PATTERN")?,
            url,
            order,
        })
    }
}

/// Converts one entry of a JSON listing into a record.
///
/// Strings are tag names. Objects take their identifier from the first string
/// among `identifier`, `tag_name` and `name`, and their note from `note` or
/// `body`. An `eol` value that is not a known marker is dropped.
fn record_from_entry(entry: Value) -> Option<VersionRecord> {
    let mut obj = match entry {
        Value::String(tag) => return VersionRecord::new(tag),
        Value::Object(obj) => obj,
        _ => return None,
    };

    let mut record =
        VersionRecord::new(take_first_string(&mut obj, &["identifier", "tag_name", "name"])?)?;
    if let Some(note) = take_first_string(&mut obj, &["note", "body"]) {
        record = record.with_note(note);
    }
    record.eol = obj
        .remove("eol")
        .filter(|eol| !eol.is_null())
        .and_then(|eol| match serde_json::from_value::<Eol>(eol) {
            Ok(eol) => Some(eol),
            Err(e) => {
                debug!("Ignoring eol marker of {}: {}", record.identifier, e);
                None
            }
        });
    Some(record)
}

fn take_first_string(obj: &mut Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.remove(*key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    })
}

fn is_json(listing: &Listing) -> bool {
    listing
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.contains("json"))
        || listing.body.trim_start().starts_with('[')
}

/// Turns a fetched listing into a result set according to `options`
pub fn parse_listing(
    listing: &Listing,
    options: &TagsFeedOptions,
) -> Result<VersionSet, GathererError> {
    let format = match options.format {
        FeedFormat::Auto if is_json(listing) => FeedFormat::Json,
        FeedFormat::Auto => FeedFormat::Lines,
        explicit => explicit,
    };

    let records: Vec<VersionRecord> = match format {
        FeedFormat::Json => {
            let entries: Vec<Value> = serde_json::from_str(&listing.body).map_err(|e| {
                warn!("Failed to parse JSON release listing: {}", e);
                GathererError::InvalidResponse(e.to_string())
            })?;
            let total = entries.len();
            let records: Vec<_> = entries
                .into_iter()
                .filter_map(record_from_entry)
                .collect();
            if records.len() < total {
                debug!(
                    "Skipped {} entries without a usable identifier",
                    total - records.len()
                );
            }
            records
        }
        _ => listing
            .body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(VersionRecord::new)
            .collect(),
    };

    let records = records.into_iter().filter(|r| {
        options
            .pattern
            .as_ref()
            .is_none_or(|p| p.is_match(&r.identifier))
    });

    Ok(VersionSet::from_records(records, options.order))
}

/// Gatherer reading release tags from a URL given in the metadata
pub struct TagsFeedGatherer {
    source: Arc<dyn TagSource>,
    options: Option<TagsFeedOptions>,
    state: GathererState,
}

impl TagsFeedGatherer {
    pub fn new(source: Arc<dyn TagSource>) -> Self {
        Self {
            source,
            options: None,
            state: GathererState::new(),
        }
    }

    /// Creates a gatherer fetching over HTTP with the given client settings
    pub fn from_config(config: &HttpConfig) -> Result<Self, GathererError> {
        Ok(Self::new(Arc::new(HttpTagSource::new(config)?)))
    }

    pub fn options(&self) -> Option<&TagsFeedOptions> {
        self.options.as_ref()
    }

    pub fn state(&self) -> &GathererState {
        &self.state
    }
}

#[async_trait::async_trait]
impl VersionsGatherer for TagsFeedGatherer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn set_binary(&mut self, binary: Binary) -> &mut dyn VersionsGatherer {
        self.state.set_binary(binary);
        self
    }

    fn set_meta(
        &mut self,
        meta: &GathererMeta,
    ) -> Result<&mut dyn VersionsGatherer, GathererError> {
        self.options = Some(TagsFeedOptions::try_from(meta)?);
        Ok(self)
    }

    async fn gather(&mut self) -> Result<(), GathererError> {
        let binary = self.state.binary()?;
        let options = self
            .options
            .as_ref()
            .ok_or(GathererError::NotConfigured("meta"))?;
        let location = options.location_for(binary);
        let binary_name = binary.name.clone();

        let outcome = match self.source.fetch(&location).await {
            Ok(listing) => parse_listing(&listing, options),
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(versions) => info!(
                "Gathered {} versions for {} from {}",
                versions.len(),
                binary_name,
                location
            ),
            Err(e) => warn!("Gathering versions for {} failed: {}", binary_name, e),
        }

        self.state.record_outcome(outcome)
    }

    fn latest_version(&self) -> Option<&VersionRecord> {
        self.state.latest()
    }

    fn versions(&self) -> &[VersionRecord] {
        self.state.versions()
    }
}
