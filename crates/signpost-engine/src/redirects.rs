use crate::destinations::ResolvedDestination;
use crate::error::Result;
use crate::options::{AddRedirectOptions, EditRedirectOptions};
use crate::search::{SearchOptions, SearchResult};
use async_trait::async_trait;
use signpost_core::content::Resource;
use signpost_core::destination::DestinationKind;
use signpost_core::redirect::Redirect;
use uuid::Uuid;

/// The redirect engine's public surface.
///
/// Request handling is two calls: [`match_url`](Self::match_url) picks the
/// winning redirect for an inbound URL and [`destination_url`](Self::destination_url)
/// turns it into a concrete outbound location. Everything else backs
/// management UIs and editorial workflows.
#[async_trait]
pub trait Redirects: Send + Sync + 'static {
    /// Creates a redirect from the given options.
    ///
    /// The inbound URL is normalized before storing. Fails with
    /// [`Conflict`](crate::RedirectsError::Conflict) when another redirect
    /// already claims the same scope, path and query string, unless the
    /// options ask to overwrite, in which case the occupant is replaced.
    async fn add(&self, options: AddRedirectOptions) -> Result<Redirect>;

    /// Replaces the inbound URL, destination and flags of an existing
    /// redirect, keeping its id, key and creation date.
    async fn edit(&self, key: Uuid, options: EditRedirectOptions) -> Result<Redirect>;

    /// Deletes a redirect by id, returning what was removed.
    async fn delete_by_id(&self, id: i64) -> Result<Redirect>;

    /// Deletes a redirect by key, returning what was removed.
    async fn delete_by_key(&self, key: Uuid) -> Result<Redirect>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Redirect>>;

    async fn get_by_key(&self, key: Uuid) -> Result<Option<Redirect>>;

    async fn get_all(&self) -> Result<Vec<Redirect>>;

    /// All redirects whose destination references the given node. A culture
    /// narrows to destinations pinning exactly that culture; `None` spans
    /// all of them.
    async fn get_by_destination(
        &self,
        kind: DestinationKind,
        node_key: Uuid,
        culture: Option<&str>,
    ) -> Result<Vec<Redirect>>;

    /// Finds the redirect that applies to an inbound request URL.
    ///
    /// `scope` is the root key of the site serving the request; the nil UUID
    /// consults global redirects only. Query-exact rules beat path-only
    /// rules and site-scoped rules beat global ones.
    async fn match_url(&self, scope: Uuid, raw_url: &str) -> Result<Option<Redirect>>;

    /// Resolves a redirect's destination into the outbound parts, looking
    /// up content and media nodes live and forwarding `inbound_query` when
    /// the redirect asks for it.
    async fn destination_url(
        &self,
        redirect: &Redirect,
        inbound_query: Option<&str>,
    ) -> Result<ResolvedDestination>;

    /// Lists redirects matching the given filters, one page at a time.
    async fn search(&self, options: SearchOptions) -> Result<SearchResult>;

    /// Refreshes the cached destination name and URL of every redirect
    /// pointing at a content or media node that was just saved.
    async fn handle_resource_saved(&self, kind: DestinationKind, resource: &Resource)
        -> Result<()>;
}
