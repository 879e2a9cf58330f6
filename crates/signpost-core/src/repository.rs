use crate::destination::{Destination, DestinationKind};
use crate::error::StoreResult;
use crate::redirect::{MatchKey, Redirect, RedirectType};
use async_trait::async_trait;
use jiff::Timestamp;
use uuid::Uuid;

/// A redirect draft ready for insertion; the store assigns the numeric id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRedirect {
    pub key: Uuid,
    pub root_key: Uuid,
    pub path: String,
    pub query_string: Option<String>,
    pub destination: Destination,
    pub redirect_type: RedirectType,
    pub forward_query_string: bool,
    pub create_date: Timestamp,
    pub update_date: Timestamp,
}

impl NewRedirect {
    /// The natural key the draft will occupy once inserted.
    pub fn match_key(&self) -> MatchKey {
        MatchKey::new(self.root_key, self.path.clone(), self.query_string.clone())
    }

    /// Completes the draft with a store-assigned id.
    pub fn into_redirect(self, id: i64) -> Redirect {
        Redirect {
            id,
            key: self.key,
            root_key: self.root_key,
            path: self.path,
            query_string: self.query_string,
            destination: self.destination,
            redirect_type: self.redirect_type,
            forward_query_string: self.forward_query_string,
            create_date: self.create_date,
            update_date: self.update_date,
        }
    }
}

/// A read-only view of a redirect store.
///
/// This trait provides only the read operations from [`Repository`],
/// allowing the matching path to run against read-only handles.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves a redirect by its numeric id.
    /// Returns `None` if the id does not exist.
    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Redirect>>;

    /// Retrieves a redirect by its key.
    async fn get_by_key(&self, key: Uuid) -> StoreResult<Option<Redirect>>;

    /// Retrieves the redirect occupying a match key. Exact match only;
    /// scope precedence and query fallback live in the engine.
    async fn get_by_match_key(&self, key: &MatchKey) -> StoreResult<Option<Redirect>>;

    /// Retrieves the redirects whose destination references the given
    /// content or media node.
    ///
    /// `Some` culture narrows the result to destinations pinning exactly
    /// that culture; `None` returns every redirect referencing the node.
    async fn get_by_destination(
        &self,
        kind: DestinationKind,
        node_key: Uuid,
        culture: Option<&str>,
    ) -> StoreResult<Vec<Redirect>>;

    /// Retrieves every stored redirect, in no guaranteed order.
    async fn get_all(&self) -> StoreResult<Vec<Redirect>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new redirect and returns the stored record.
    ///
    /// Fails with `Conflict` when the match key is already occupied and
    /// `overwrite` is false. With `overwrite`, the occupant is deleted and
    /// the new record takes the key under a fresh id; callers holding the
    /// occupant's id or key will no longer find it.
    async fn insert(&self, redirect: NewRedirect, overwrite: bool) -> StoreResult<Redirect>;

    /// Replaces the stored redirect carrying the same id.
    ///
    /// Fails with `Conflict` when the (possibly changed) match key is
    /// occupied by a different redirect. Returns `false` when no redirect
    /// with that id exists.
    async fn update(&self, redirect: Redirect) -> StoreResult<bool>;

    /// Deletes the redirect with the given id.
    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, id: i64) -> StoreResult<bool>;

    /// Overwrites the cached destination name and URL snapshot of a stored
    /// redirect, leaving `update_date` untouched. No-op when the id no
    /// longer exists.
    async fn set_destination_snapshot(&self, id: i64, name: &str, url: &str) -> StoreResult<()>;
}
