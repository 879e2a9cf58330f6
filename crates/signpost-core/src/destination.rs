use crate::content::Resource;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// The kind of resource a redirect destination points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    /// A literal URL, possibly external.
    Url,
    /// A content node in the host.
    Content,
    /// A media node in the host.
    Media,
}

impl Display for DestinationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DestinationKind::Url => f.write_str("url"),
            DestinationKind::Content => f.write_str("content"),
            DestinationKind::Media => f.write_str("media"),
        }
    }
}

/// Where a redirect sends a matched request.
///
/// `Content` and `Media` destinations reference a node in the host and carry
/// a cached snapshot of its name and URL. The snapshot keeps the redirect
/// displayable and resolvable after the node is deleted or unpublished; when
/// the node is still available, resolution uses its live URL instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Destination {
    /// A literal URL.
    Url {
        url: String,
        /// Query string of the destination, without the leading `?`.
        #[serde(default)]
        query: Option<String>,
        /// Fragment of the destination, including the leading `#`.
        #[serde(default)]
        fragment: Option<String>,
    },
    /// A content node, re-resolved by `key` at read time.
    Content {
        id: i64,
        key: Uuid,
        /// Cached name of the node; may lag behind the live node.
        name: String,
        /// Cached URL of the node; may lag behind the live node.
        url: String,
        #[serde(default)]
        query: Option<String>,
        #[serde(default)]
        fragment: Option<String>,
        /// Culture whose variant URL resolution should prefer, if any.
        #[serde(default)]
        culture: Option<String>,
    },
    /// A media node, re-resolved by `key` at read time.
    Media {
        id: i64,
        key: Uuid,
        name: String,
        url: String,
        #[serde(default)]
        query: Option<String>,
        #[serde(default)]
        fragment: Option<String>,
    },
}

impl Destination {
    /// Creates a literal URL destination without query or fragment.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::Url {
            url: url.into(),
            query: None,
            fragment: None,
        }
    }

    /// Creates a content destination snapshotting the given node.
    pub fn from_content(resource: &Resource) -> Self {
        Self::Content {
            id: resource.id,
            key: resource.key,
            name: resource.name.clone(),
            url: resource.url.clone(),
            query: None,
            fragment: None,
            culture: None,
        }
    }

    /// Creates a media destination snapshotting the given node.
    pub fn from_media(resource: &Resource) -> Self {
        Self::Media {
            id: resource.id,
            key: resource.key,
            name: resource.name.clone(),
            url: resource.url.clone(),
            query: None,
            fragment: None,
        }
    }

    pub fn kind(&self) -> DestinationKind {
        match self {
            Destination::Url { .. } => DestinationKind::Url,
            Destination::Content { .. } => DestinationKind::Content,
            Destination::Media { .. } => DestinationKind::Media,
        }
    }

    /// The destination URL as stored, without query or fragment.
    pub fn url(&self) -> &str {
        match self {
            Destination::Url { url, .. }
            | Destination::Content { url, .. }
            | Destination::Media { url, .. } => url,
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            Destination::Url { query, .. }
            | Destination::Content { query, .. }
            | Destination::Media { query, .. } => query.as_deref(),
        }
    }

    pub fn fragment(&self) -> Option<&str> {
        match self {
            Destination::Url { fragment, .. }
            | Destination::Content { fragment, .. }
            | Destination::Media { fragment, .. } => fragment.as_deref(),
        }
    }

    /// Cached name of the referenced node; `None` for literal URLs.
    pub fn name(&self) -> Option<&str> {
        match self {
            Destination::Url { .. } => None,
            Destination::Content { name, .. } | Destination::Media { name, .. } => Some(name),
        }
    }

    /// Numeric id of the referenced node; `None` for literal URLs.
    pub fn node_id(&self) -> Option<i64> {
        match self {
            Destination::Url { .. } => None,
            Destination::Content { id, .. } | Destination::Media { id, .. } => Some(*id),
        }
    }

    /// Key of the referenced node; `None` for literal URLs.
    pub fn node_key(&self) -> Option<Uuid> {
        match self {
            Destination::Url { .. } => None,
            Destination::Content { key, .. } | Destination::Media { key, .. } => Some(*key),
        }
    }

    /// Culture the destination pins; always `None` for URLs and media.
    pub fn culture(&self) -> Option<&str> {
        match self {
            Destination::Content { culture, .. } => culture.as_deref(),
            _ => None,
        }
    }

    /// Backfills the node id cached alongside a content or media reference.
    /// No-op for literal URL destinations.
    pub fn set_node_id(&mut self, node_id: i64) {
        match self {
            Destination::Url { .. } => {}
            Destination::Content { id, .. } | Destination::Media { id, .. } => *id = node_id,
        }
    }

    /// Overwrites the cached name and URL snapshot.
    /// No-op for literal URL destinations, which have no snapshot.
    pub fn set_snapshot(&mut self, name: &str, url: &str) {
        match self {
            Destination::Url { .. } => {}
            Destination::Content {
                name: cached_name,
                url: cached_url,
                ..
            }
            | Destination::Media {
                name: cached_name,
                url: cached_url,
                ..
            } => {
                *cached_name = name.to_string();
                *cached_url = url.to_string();
            }
        }
    }

    /// The full destination URL: the stored URL with the destination's own
    /// query string and fragment appended.
    ///
    /// The query is separated by `&` when the URL already contains a `?`,
    /// otherwise by `?`. The fragment carries its own `#` and goes last.
    pub fn display_url(&self) -> String {
        let mut full = self.url().to_string();
        if let Some(query) = self.query().filter(|q| !q.is_empty()) {
            full.push(if full.contains('?') { '&' } else { '?' });
            full.push_str(query);
        }
        if let Some(fragment) = self.fragment().filter(|f| !f.is_empty()) {
            full.push_str(fragment);
        }
        full
    }
}
