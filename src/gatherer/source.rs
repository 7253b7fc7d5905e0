//! Source trait for fetching raw release listings

#[cfg(test)]
use mockall::automock;

use crate::gatherer::error::GathererError;

/// A fetched release listing, before it is parsed into records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Content type reported by the source, if any
    pub content_type: Option<String>,
    pub body: String,
}

impl Listing {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            content_type: None,
            body: body.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Trait for fetching a release listing from a location
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait TagSource: Send + Sync {
    /// Fetches the listing at `location`
    ///
    /// # Returns
    /// * `Ok(Listing)` - The raw listing body
    /// * `Err(GathererError)` - If the location is unreachable or answers with an error
    async fn fetch(&self, location: &str) -> Result<Listing, GathererError>;
}
