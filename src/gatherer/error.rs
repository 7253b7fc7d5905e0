use thiserror::Error;

/// Errors raised while reading gatherer metadata
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetaError {
    #[error("Line {line}: expected KEY=VALUE, got {content:?}")]
    Malformed { line: usize, content: String },

    #[error("Line {line}: empty key")]
    EmptyKey { line: usize },

    #[error("Line {line}: duplicate key {key}")]
    DuplicateKey { line: usize, key: String },

    #[error("Missing required key: {0}")]
    MissingKey(String),

    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Unknown key: {0}")]
    UnknownKey(String),
}

/// The single failure kind raised by [`VersionsGatherer`](crate::gatherer::contract::VersionsGatherer) operations
#[derive(Debug, Error)]
pub enum GathererError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Source not found: {0}")]
    NotFound(String),

    #[error("Unexpected status {status} from {location}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        location: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid meta: {0}")]
    InvalidMeta(#[from] MetaError),

    #[error("Gatherer not configured: {0} missing")]
    NotConfigured(&'static str),

    #[error("Unknown gatherer: {0}")]
    UnknownGatherer(String),
}

/// The single failure kind raised by [`BinaryVersionGatherer`](crate::gatherer::legacy::BinaryVersionGatherer) operations
#[derive(Debug, Error)]
pub enum GatherError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Parse failed: {0}")]
    Parse(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),
}

impl From<GathererError> for GatherError {
    fn from(err: GathererError) -> Self {
        match err {
            GathererError::InvalidResponse(msg) => GatherError::Parse(msg),
            GathererError::InvalidMeta(e) => GatherError::NotConfigured(e.to_string()),
            GathererError::NotConfigured(what) => GatherError::NotConfigured(what.to_string()),
            GathererError::UnknownGatherer(name) => {
                GatherError::NotConfigured(format!("unknown gatherer {}", name))
            }
            other => GatherError::Fetch(other.to_string()),
        }
    }
}
