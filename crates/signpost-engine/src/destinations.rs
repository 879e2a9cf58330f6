use crate::error::Result;
use serde::Serialize;
use signpost_core::content::{ContentRepository, MediaRepository};
use signpost_core::destination::Destination;
use signpost_core::redirect::Redirect;
use tracing::{debug, warn};

/// Why destination resolution fell back to the cached snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationWarning {
    /// The referenced node no longer exists.
    Deleted,
    /// The referenced node sits in the recycle bin.
    Trashed,
    /// The referenced node exists but is not published.
    Unpublished,
}

/// The outcome of resolving a redirect's destination.
///
/// `url` and `name` come from the live node when it was available, and from
/// the cached snapshot otherwise, with `warning` saying why.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDestination {
    /// Destination URL without query or fragment.
    pub url: String,
    /// Display name; `None` for literal URL destinations.
    pub name: Option<String>,
    /// Query string of the destination itself.
    pub query: Option<String>,
    /// Fragment of the destination, including the leading `#`.
    pub fragment: Option<String>,
    /// Inbound query string to append; present only when the redirect
    /// forwards query strings and the request carried one.
    pub forwarded_query: Option<String>,
    /// Set when resolution degraded to the cached snapshot.
    pub warning: Option<DestinationWarning>,
}

impl ResolvedDestination {
    /// The final outbound URL: the destination's own query string first,
    /// then the forwarded inbound query, fragment last.
    pub fn location(&self) -> String {
        let mut full = self.url.clone();
        for query in [self.query.as_deref(), self.forwarded_query.as_deref()] {
            if let Some(query) = query.filter(|q| !q.is_empty()) {
                full.push(if full.contains('?') { '&' } else { '?' });
                full.push_str(query);
            }
        }
        if let Some(fragment) = self.fragment.as_deref().filter(|f| !f.is_empty()) {
            full.push_str(fragment);
        }
        full
    }

    /// Whether resolution fell back to the cached snapshot.
    pub fn is_stale(&self) -> bool {
        self.warning.is_some()
    }
}

/// Computes the outbound parts for a redirect's destination.
///
/// Literal URLs pass through untouched. Content and media destinations are
/// re-resolved live by node key, preferring the culture the destination
/// pins; missing, trashed or unpublished nodes fall back to the cached
/// snapshot with a warning instead of failing. The stored redirect is never
/// mutated here.
pub(crate) async fn resolve<C, M>(
    content: &C,
    media: &M,
    redirect: &Redirect,
    inbound_query: Option<&str>,
) -> Result<ResolvedDestination>
where
    C: ContentRepository,
    M: MediaRepository,
{
    let destination = &redirect.destination;
    let forwarded_query = if redirect.forward_query_string {
        inbound_query.filter(|q| !q.is_empty()).map(str::to_string)
    } else {
        None
    };

    let mut resolved = ResolvedDestination {
        url: destination.url().to_string(),
        name: destination.name().map(str::to_string),
        query: destination.query().map(str::to_string),
        fragment: destination.fragment().map(str::to_string),
        forwarded_query,
        warning: None,
    };

    match destination {
        Destination::Url { .. } => {}
        Destination::Content { key, culture, .. } => {
            match content.get_by_key(*key).await? {
                None => resolved.warning = Some(DestinationWarning::Deleted),
                Some(node) if node.trashed => resolved.warning = Some(DestinationWarning::Trashed),
                Some(node) if !node.published => {
                    resolved.warning = Some(DestinationWarning::Unpublished)
                }
                Some(node) => {
                    resolved.url = node.url_for(culture.as_deref()).to_string();
                    resolved.name = Some(node.name);
                }
            }
        }
        Destination::Media { key, .. } => match media.get_by_key(*key).await? {
            None => resolved.warning = Some(DestinationWarning::Deleted),
            Some(node) if node.trashed => resolved.warning = Some(DestinationWarning::Trashed),
            Some(node) => {
                resolved.url = node.url.clone();
                resolved.name = Some(node.name);
            }
        },
    }

    if let Some(warning) = resolved.warning {
        warn!(
            redirect = %redirect.key,
            warning = ?warning,
            url = %resolved.url,
            "destination degraded to cached snapshot"
        );
    } else if !matches!(destination, Destination::Url { .. }) {
        debug!(redirect = %redirect.key, url = %resolved.url, "resolved live destination");
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use signpost_core::content::Resource;
    use signpost_core::redirect::RedirectType;
    use signpost_storage::{InMemoryContentRepository, InMemoryMediaRepository};
    use uuid::Uuid;

    fn redirect(destination: Destination, forward: bool) -> Redirect {
        Redirect {
            id: 1,
            key: Uuid::new_v4(),
            root_key: Uuid::nil(),
            path: "/old-page".to_string(),
            query_string: None,
            destination,
            redirect_type: RedirectType::Permanent,
            forward_query_string: forward,
            create_date: Timestamp::now(),
            update_date: Timestamp::now(),
        }
    }

    fn content_destination(node_key: Uuid, culture: Option<&str>) -> Destination {
        Destination::Content {
            id: 7,
            key: node_key,
            name: "Cached name".to_string(),
            url: "/cached-url".to_string(),
            query: None,
            fragment: None,
            culture: culture.map(str::to_string),
        }
    }

    fn empty_repos() -> (InMemoryContentRepository, InMemoryMediaRepository) {
        (
            InMemoryContentRepository::new(),
            InMemoryMediaRepository::new(),
        )
    }

    #[tokio::test]
    async fn url_destination_passes_through() {
        let (content, media) = empty_repos();
        let redirect = redirect(Destination::from_url("/new-page"), false);

        let resolved = resolve(&content, &media, &redirect, Some("ref=1"))
            .await
            .unwrap();

        assert_eq!(resolved.location(), "/new-page");
        assert!(resolved.warning.is_none());
        assert!(resolved.name.is_none());
    }

    #[tokio::test]
    async fn forwarding_appends_inbound_query() {
        let (content, media) = empty_repos();
        let redirect = redirect(Destination::from_url("/new-page"), true);

        let resolved = resolve(&content, &media, &redirect, Some("ref=1"))
            .await
            .unwrap();
        assert_eq!(resolved.location(), "/new-page?ref=1");

        let resolved = resolve(&content, &media, &redirect, None).await.unwrap();
        assert_eq!(resolved.location(), "/new-page");

        let resolved = resolve(&content, &media, &redirect, Some("")).await.unwrap();
        assert_eq!(resolved.location(), "/new-page");
    }

    #[tokio::test]
    async fn location_orders_query_then_forwarded_then_fragment() {
        let (content, media) = empty_repos();
        let destination = Destination::Url {
            url: "/new-page".to_string(),
            query: Some("a=1".to_string()),
            fragment: Some("#top".to_string()),
        };
        let redirect = redirect(destination, true);

        let resolved = resolve(&content, &media, &redirect, Some("ref=1"))
            .await
            .unwrap();
        assert_eq!(resolved.location(), "/new-page?a=1&ref=1#top");
    }

    #[tokio::test]
    async fn content_resolves_live_url_and_name() {
        let (content, media) = empty_repos();
        let node_key = Uuid::new_v4();
        content.insert(Resource::new(7, node_key, "Live name", "/live-url"));
        let redirect = redirect(content_destination(node_key, None), false);

        let resolved = resolve(&content, &media, &redirect, None).await.unwrap();

        assert_eq!(resolved.url, "/live-url");
        assert_eq!(resolved.name.as_deref(), Some("Live name"));
        assert!(resolved.warning.is_none());
    }

    #[tokio::test]
    async fn content_prefers_pinned_culture() {
        let (content, media) = empty_repos();
        let node_key = Uuid::new_v4();
        content.insert(
            Resource::new(7, node_key, "Contact", "/contact")
                .with_culture_url("da-DK", "/da/kontakt"),
        );
        let redirect = redirect(content_destination(node_key, Some("da-DK")), false);

        let resolved = resolve(&content, &media, &redirect, None).await.unwrap();
        assert_eq!(resolved.url, "/da/kontakt");
    }

    #[tokio::test]
    async fn deleted_content_degrades_to_snapshot() {
        let (content, media) = empty_repos();
        let redirect = redirect(content_destination(Uuid::new_v4(), None), false);

        let resolved = resolve(&content, &media, &redirect, None).await.unwrap();

        assert_eq!(resolved.warning, Some(DestinationWarning::Deleted));
        assert_eq!(resolved.url, "/cached-url");
        assert_eq!(resolved.name.as_deref(), Some("Cached name"));
        assert!(resolved.is_stale());
    }

    #[tokio::test]
    async fn trashed_beats_unpublished() {
        let (content, media) = empty_repos();
        let node_key = Uuid::new_v4();
        let mut node = Resource::new(7, node_key, "Gone", "/gone");
        node.published = false;
        node.trashed = true;
        content.insert(node);
        let redirect = redirect(content_destination(node_key, None), false);

        let resolved = resolve(&content, &media, &redirect, None).await.unwrap();
        assert_eq!(resolved.warning, Some(DestinationWarning::Trashed));
    }

    #[tokio::test]
    async fn unpublished_content_degrades() {
        let (content, media) = empty_repos();
        let node_key = Uuid::new_v4();
        let mut node = Resource::new(7, node_key, "Draft", "/draft");
        node.published = false;
        content.insert(node);
        let redirect = redirect(content_destination(node_key, None), false);

        let resolved = resolve(&content, &media, &redirect, None).await.unwrap();
        assert_eq!(resolved.warning, Some(DestinationWarning::Unpublished));
        assert_eq!(resolved.url, "/cached-url");
    }

    #[tokio::test]
    async fn media_resolves_live_and_degrades_when_trashed() {
        let (content, media) = empty_repos();
        let node_key = Uuid::new_v4();
        media.insert(Resource::new(9, node_key, "cats.jpg", "/media/cats.jpg"));
        let destination = Destination::Media {
            id: 9,
            key: node_key,
            name: "old.jpg".to_string(),
            url: "/media/old.jpg".to_string(),
            query: None,
            fragment: None,
        };
        let redirect = redirect(destination, false);

        let resolved = resolve(&content, &media, &redirect, None).await.unwrap();
        assert_eq!(resolved.url, "/media/cats.jpg");
        assert!(resolved.warning.is_none());

        media.set_trashed(node_key, true);
        let resolved = resolve(&content, &media, &redirect, None).await.unwrap();
        assert_eq!(resolved.warning, Some(DestinationWarning::Trashed));
        assert_eq!(resolved.url, "/media/old.jpg");
    }
}
