use crate::error::ContentResult;
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

/// A content or media node exposed by the host.
///
/// Only the fields the engine needs for destination resolution are carried:
/// identity, display name, publication state and URLs. Cultures map to
/// variant URLs for content that is published per language.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: i64,
    pub key: Uuid,
    pub name: String,
    /// Default URL of the node.
    pub url: String,
    /// Variant URLs per culture, consulted before the default URL.
    pub culture_urls: HashMap<String, String>,
    pub published: bool,
    pub trashed: bool,
}

impl Resource {
    /// Creates a published, non-trashed resource without culture variants.
    pub fn new(id: i64, key: Uuid, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            key,
            name: name.into(),
            url: url.into(),
            culture_urls: HashMap::new(),
            published: true,
            trashed: false,
        }
    }

    /// Adds a variant URL for a culture.
    pub fn with_culture_url(mut self, culture: impl Into<String>, url: impl Into<String>) -> Self {
        self.culture_urls.insert(culture.into(), url.into());
        self
    }

    /// The URL of the node in the given culture, falling back to the
    /// default URL when the culture carries no variant.
    pub fn url_for(&self, culture: Option<&str>) -> &str {
        culture
            .and_then(|c| self.culture_urls.get(c))
            .map(String::as_str)
            .unwrap_or(&self.url)
    }
}

/// Read access to the host's content tree.
#[async_trait]
pub trait ContentRepository: Send + Sync + 'static {
    /// Looks up a content node by its numeric id.
    async fn get_by_id(&self, id: i64) -> ContentResult<Option<Resource>>;

    /// Looks up a content node by its key.
    async fn get_by_key(&self, key: Uuid) -> ContentResult<Option<Resource>>;

    /// Looks up a content node by its route, e.g. `/about/contact`.
    async fn get_by_route(&self, route: &str) -> ContentResult<Option<Resource>>;
}

/// Read access to the host's media library.
///
/// Same shape as [`ContentRepository`]. Media nodes have no culture
/// variants and no publication state; only the trashed flag applies.
#[async_trait]
pub trait MediaRepository: Send + Sync + 'static {
    /// Looks up a media node by its numeric id.
    async fn get_by_id(&self, id: i64) -> ContentResult<Option<Resource>>;

    /// Looks up a media node by its key.
    async fn get_by_key(&self, key: Uuid) -> ContentResult<Option<Resource>>;

    /// Looks up a media node by its path, e.g. `/media/cats.jpg`.
    async fn get_by_route(&self, route: &str) -> ContentResult<Option<Resource>>;
}
