use crate::destinations::{self, ResolvedDestination};
use crate::error::{RedirectsError, Result};
use crate::matcher;
use crate::options::{AddRedirectOptions, EditRedirectOptions};
use crate::redirects::Redirects;
use crate::search::{self, SearchOptions, SearchResult};
use async_trait::async_trait;
use jiff::Timestamp;
use signpost_core::content::{ContentRepository, MediaRepository, Resource};
use signpost_core::destination::{Destination, DestinationKind};
use signpost_core::inbound::InboundUrl;
use signpost_core::redirect::Redirect;
use signpost_core::repository::{NewRedirect, Repository};
use std::sync::Arc;
use tracing::{debug, trace};
use uuid::Uuid;

/// The default [`Redirects`] implementation over a redirect store and the
/// host's content and media repositories.
pub struct RedirectsService<R, C, M> {
    repository: Arc<R>,
    content: Arc<C>,
    media: Arc<M>,
}

impl<R, C, M> RedirectsService<R, C, M>
where
    R: Repository,
    C: ContentRepository,
    M: MediaRepository,
{
    pub fn new(repository: R, content: C, media: M) -> Self {
        Self {
            repository: Arc::new(repository),
            content: Arc::new(content),
            media: Arc::new(media),
        }
    }

    /// Swaps a destination for what it actually points at.
    ///
    /// A literal local URL that routes to a known content or media node
    /// becomes a reference to that node, so the redirect survives the node
    /// moving. A node reference carrying only a key gets its id backfilled.
    /// Anything else passes through untouched.
    async fn upgrade_destination(&self, mut destination: Destination) -> Result<Destination> {
        if let Destination::Url { url, .. } = &destination {
            if url.starts_with("/media/") {
                if let Some(node) = self.media.get_by_route(url).await? {
                    trace!(url = %url, key = %node.key, "upgraded literal url to media reference");
                    return Ok(Destination::from_media(&node));
                }
            } else if url.starts_with('/') {
                if let Some(node) = self.content.get_by_route(url).await? {
                    trace!(url = %url, key = %node.key, "upgraded literal url to content reference");
                    return Ok(Destination::from_content(&node));
                }
            }
            return Ok(destination);
        }

        if destination.node_id() == Some(0) {
            if let Some(key) = destination.node_key().filter(|key| !key.is_nil()) {
                let node = match destination.kind() {
                    DestinationKind::Content => self.content.get_by_key(key).await?,
                    DestinationKind::Media => self.media.get_by_key(key).await?,
                    DestinationKind::Url => None,
                };
                if let Some(node) = node {
                    destination.set_node_id(node.id);
                }
            }
        }
        Ok(destination)
    }
}

#[async_trait]
impl<R, C, M> Redirects for RedirectsService<R, C, M>
where
    R: Repository,
    C: ContentRepository,
    M: MediaRepository,
{
    async fn add(&self, options: AddRedirectOptions) -> Result<Redirect> {
        let inbound = InboundUrl::parse(&options.original_url)?;
        validate_destination(&options.destination)?;
        let destination = self.upgrade_destination(options.destination).await?;

        let now = Timestamp::now();
        let (path, query_string) = inbound.into_parts();
        let draft = NewRedirect {
            key: Uuid::new_v4(),
            root_key: options.root_key,
            path,
            query_string,
            destination,
            redirect_type: options.redirect_type,
            forward_query_string: options.forward_query_string,
            create_date: now,
            update_date: now,
        };
        let redirect = self.repository.insert(draft, options.overwrite).await?;
        debug!(id = redirect.id, key = %redirect.key, url = %redirect.url(), "added redirect");
        Ok(redirect)
    }

    async fn edit(&self, key: Uuid, options: EditRedirectOptions) -> Result<Redirect> {
        let Some(previous) = self.repository.get_by_key(key).await? else {
            return Err(RedirectsError::NotFound(format!("key {key}")));
        };
        let inbound = InboundUrl::parse(&options.original_url)?;
        validate_destination(&options.destination)?;
        let destination = self.upgrade_destination(options.destination).await?;

        let (path, query_string) = inbound.into_parts();
        let updated = Redirect {
            root_key: options.root_key,
            path,
            query_string,
            destination,
            redirect_type: options.redirect_type,
            forward_query_string: options.forward_query_string,
            update_date: Timestamp::now(),
            ..previous
        };
        if !self.repository.update(updated.clone()).await? {
            return Err(RedirectsError::NotFound(format!("key {key}")));
        }
        debug!(id = updated.id, key = %updated.key, url = %updated.url(), "edited redirect");
        Ok(updated)
    }

    async fn delete_by_id(&self, id: i64) -> Result<Redirect> {
        let Some(redirect) = self.repository.get_by_id(id).await? else {
            return Err(RedirectsError::NotFound(format!("id {id}")));
        };
        self.repository.delete(id).await?;
        debug!(id, key = %redirect.key, "deleted redirect");
        Ok(redirect)
    }

    async fn delete_by_key(&self, key: Uuid) -> Result<Redirect> {
        let Some(redirect) = self.repository.get_by_key(key).await? else {
            return Err(RedirectsError::NotFound(format!("key {key}")));
        };
        self.repository.delete(redirect.id).await?;
        debug!(id = redirect.id, key = %redirect.key, "deleted redirect");
        Ok(redirect)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Redirect>> {
        Ok(self.repository.get_by_id(id).await?)
    }

    async fn get_by_key(&self, key: Uuid) -> Result<Option<Redirect>> {
        Ok(self.repository.get_by_key(key).await?)
    }

    async fn get_all(&self) -> Result<Vec<Redirect>> {
        Ok(self.repository.get_all().await?)
    }

    async fn get_by_destination(
        &self,
        kind: DestinationKind,
        node_key: Uuid,
        culture: Option<&str>,
    ) -> Result<Vec<Redirect>> {
        Ok(self
            .repository
            .get_by_destination(kind, node_key, culture)
            .await?)
    }

    async fn match_url(&self, scope: Uuid, raw_url: &str) -> Result<Option<Redirect>> {
        let inbound = InboundUrl::parse(raw_url)?;
        trace!(scope = %scope, url = %inbound, "matching inbound url");
        let matched = matcher::resolve(self.repository.as_ref(), scope, &inbound).await?;
        if let Some(redirect) = &matched {
            debug!(id = redirect.id, path = %redirect.path, "matched redirect");
        }
        Ok(matched)
    }

    async fn destination_url(
        &self,
        redirect: &Redirect,
        inbound_query: Option<&str>,
    ) -> Result<ResolvedDestination> {
        destinations::resolve(
            self.content.as_ref(),
            self.media.as_ref(),
            redirect,
            inbound_query,
        )
        .await
    }

    async fn search(&self, options: SearchOptions) -> Result<SearchResult> {
        let redirects = self.repository.get_all().await?;
        Ok(search::execute(&options, redirects))
    }

    async fn handle_resource_saved(
        &self,
        kind: DestinationKind,
        resource: &Resource,
    ) -> Result<()> {
        if kind == DestinationKind::Url {
            return Ok(());
        }
        let affected = self
            .repository
            .get_by_destination(kind, resource.key, None)
            .await?;
        if affected.is_empty() {
            return Ok(());
        }
        debug!(node = %resource.key, count = affected.len(), "refreshing destination snapshots");
        for redirect in affected {
            let url = resource.url_for(redirect.destination.culture());
            self.repository
                .set_destination_snapshot(redirect.id, &resource.name, url)
                .await?;
        }
        Ok(())
    }
}

fn validate_destination(destination: &Destination) -> Result<()> {
    let url = destination.url().trim();
    if url.is_empty() {
        return Err(RedirectsError::InvalidDestination(
            "destination url is empty".to_string(),
        ));
    }
    if url.starts_with('#') {
        return Err(RedirectsError::InvalidDestination(format!(
            "destination url {url} is only a fragment"
        )));
    }
    Ok(())
}
