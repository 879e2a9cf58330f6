use async_trait::async_trait;
use dashmap::DashMap;
use signpost_core::content::{ContentRepository, MediaRepository, Resource};
use signpost_core::error::ContentResult;
use uuid::Uuid;

/// In-memory content tree keyed by node key.
///
/// Implements the lookup contract the engine consumes from the host;
/// useful both for embedding and as the test double for the engine crate.
/// Id and route lookups scan the map.
#[derive(Debug, Default)]
pub struct InMemoryContentRepository {
    nodes: DashMap<Uuid, Resource>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self {
            nodes: DashMap::new(),
        }
    }

    /// Adds or replaces a node.
    pub fn insert(&self, resource: Resource) {
        self.nodes.insert(resource.key, resource);
    }

    /// Removes a node, as the host does when content is deleted.
    pub fn remove(&self, key: Uuid) {
        self.nodes.remove(&key);
    }

    pub fn set_published(&self, key: Uuid, published: bool) {
        if let Some(mut node) = self.nodes.get_mut(&key) {
            node.published = published;
        }
    }

    pub fn set_trashed(&self, key: Uuid, trashed: bool) {
        if let Some(mut node) = self.nodes.get_mut(&key) {
            node.trashed = trashed;
        }
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn get_by_id(&self, id: i64) -> ContentResult<Option<Resource>> {
        Ok(self
            .nodes
            .iter()
            .find(|node| node.value().id == id)
            .map(|node| node.value().clone()))
    }

    async fn get_by_key(&self, key: Uuid) -> ContentResult<Option<Resource>> {
        Ok(self.nodes.get(&key).map(|node| node.clone()))
    }

    async fn get_by_route(&self, route: &str) -> ContentResult<Option<Resource>> {
        Ok(self
            .nodes
            .iter()
            .find(|node| {
                node.value().url == route || node.value().culture_urls.values().any(|u| u == route)
            })
            .map(|node| node.value().clone()))
    }
}

/// In-memory media library keyed by node key.
///
/// Same shape as [`InMemoryContentRepository`]; media has no publication
/// state, so only the trashed flag can be toggled.
#[derive(Debug, Default)]
pub struct InMemoryMediaRepository {
    nodes: DashMap<Uuid, Resource>,
}

impl InMemoryMediaRepository {
    pub fn new() -> Self {
        Self {
            nodes: DashMap::new(),
        }
    }

    /// Adds or replaces a node.
    pub fn insert(&self, resource: Resource) {
        self.nodes.insert(resource.key, resource);
    }

    /// Removes a node, as the host does when media is deleted.
    pub fn remove(&self, key: Uuid) {
        self.nodes.remove(&key);
    }

    pub fn set_trashed(&self, key: Uuid, trashed: bool) {
        if let Some(mut node) = self.nodes.get_mut(&key) {
            node.trashed = trashed;
        }
    }
}

#[async_trait]
impl MediaRepository for InMemoryMediaRepository {
    async fn get_by_id(&self, id: i64) -> ContentResult<Option<Resource>> {
        Ok(self
            .nodes
            .iter()
            .find(|node| node.value().id == id)
            .map(|node| node.value().clone()))
    }

    async fn get_by_key(&self, key: Uuid) -> ContentResult<Option<Resource>> {
        Ok(self.nodes.get(&key).map(|node| node.clone()))
    }

    async fn get_by_route(&self, route: &str) -> ContentResult<Option<Resource>> {
        Ok(self
            .nodes
            .iter()
            .find(|node| node.value().url == route)
            .map(|node| node.value().clone()))
    }
}
