use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use signpost_core::destination::DestinationKind;
use signpost_core::error::{StoreError, StoreResult};
use signpost_core::redirect::{MatchKey, Redirect};
use signpost_core::repository::{NewRedirect, ReadRepository, Repository};
use std::sync::atomic::{AtomicI64, Ordering};
use uuid::Uuid;

/// In-memory implementation of the redirect repository using DashMap.
///
/// Reads go straight to the sharded maps and never block on writers.
/// Mutations serialize on a single writer lock, which keeps the match-key
/// uniqueness check and the insert that follows it atomic.
#[derive(Debug)]
pub struct InMemoryRepository {
    redirects: DashMap<i64, Redirect>,
    by_key: DashMap<Uuid, i64>,
    by_match_key: DashMap<MatchKey, i64>,
    next_id: AtomicI64,
    writer: Mutex<()>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            redirects: DashMap::new(),
            by_key: DashMap::new(),
            by_match_key: DashMap::new(),
            next_id: AtomicI64::new(1),
            writer: Mutex::new(()),
        }
    }

    /// Removes a record and its index entries. Caller holds the writer lock.
    fn remove_locked(&self, id: i64) -> Option<Redirect> {
        let (_, redirect) = self.redirects.remove(&id)?;
        self.by_key.remove(&redirect.key);
        self.by_match_key.remove(&redirect.match_key());
        Some(redirect)
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Redirect>> {
        Ok(self.redirects.get(&id).map(|r| r.clone()))
    }

    async fn get_by_key(&self, key: Uuid) -> StoreResult<Option<Redirect>> {
        let Some(id) = self.by_key.get(&key).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.redirects.get(&id).map(|r| r.clone()))
    }

    async fn get_by_match_key(&self, key: &MatchKey) -> StoreResult<Option<Redirect>> {
        let Some(id) = self.by_match_key.get(key).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.redirects.get(&id).map(|r| r.clone()))
    }

    async fn get_by_destination(
        &self,
        kind: DestinationKind,
        node_key: Uuid,
        culture: Option<&str>,
    ) -> StoreResult<Vec<Redirect>> {
        let matches = self
            .redirects
            .iter()
            .filter(|entry| {
                let destination = &entry.value().destination;
                destination.kind() == kind
                    && destination.node_key() == Some(node_key)
                    && culture.is_none_or(|c| destination.culture() == Some(c))
            })
            .map(|entry| entry.value().clone())
            .collect();
        Ok(matches)
    }

    async fn get_all(&self) -> StoreResult<Vec<Redirect>> {
        Ok(self.redirects.iter().map(|entry| entry.value().clone()).collect())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, redirect: NewRedirect, overwrite: bool) -> StoreResult<Redirect> {
        let match_key = redirect.match_key();
        let _writer = self.writer.lock();

        if let Some(occupant) = self.by_match_key.get(&match_key).map(|id| *id) {
            if !overwrite {
                return Err(StoreError::Conflict(match_key));
            }
            // Overwrite retires the occupant entirely; the new record gets
            // a fresh id below.
            self.remove_locked(occupant);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let stored = redirect.into_redirect(id);
        self.by_key.insert(stored.key, id);
        self.by_match_key.insert(match_key, id);
        self.redirects.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, redirect: Redirect) -> StoreResult<bool> {
        let _writer = self.writer.lock();

        let Some(previous) = self.redirects.get(&redirect.id).map(|r| r.clone()) else {
            return Ok(false);
        };

        let match_key = redirect.match_key();
        if let Some(occupant) = self.by_match_key.get(&match_key).map(|id| *id) {
            if occupant != redirect.id {
                return Err(StoreError::Conflict(match_key));
            }
        }

        self.by_match_key.remove(&previous.match_key());
        self.by_match_key.insert(match_key, redirect.id);
        self.redirects.insert(redirect.id, redirect);
        Ok(true)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let _writer = self.writer.lock();
        Ok(self.remove_locked(id).is_some())
    }

    async fn set_destination_snapshot(&self, id: i64, name: &str, url: &str) -> StoreResult<()> {
        let _writer = self.writer.lock();
        if let Some(mut entry) = self.redirects.get_mut(&id) {
            entry.destination.set_snapshot(name, url);
        }
        Ok(())
    }
}
