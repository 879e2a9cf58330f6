use signpost_core::error::StoreResult;
use signpost_core::inbound::InboundUrl;
use signpost_core::redirect::{MatchKey, Redirect};
use signpost_core::repository::ReadRepository;
use uuid::Uuid;

/// Finds the single redirect applying to a normalized inbound URL.
///
/// Narrower rules win: a site-scoped rule beats a global one, and within a
/// scope an exact query-string match beats a path-only rule. A rule stored
/// without a query string matches any inbound query on its path.
pub(crate) async fn resolve<R: ReadRepository>(
    repository: &R,
    scope: Uuid,
    url: &InboundUrl,
) -> StoreResult<Option<Redirect>> {
    let query = url.query().map(str::to_string);

    let scoped = MatchKey::new(scope, url.path(), query.clone());
    if let Some(redirect) = lookup(repository, &scoped).await? {
        return Ok(Some(redirect));
    }

    if !scope.is_nil() {
        let global = MatchKey::new(Uuid::nil(), url.path(), query);
        if let Some(redirect) = lookup(repository, &global).await? {
            return Ok(Some(redirect));
        }
    }

    Ok(None)
}

/// Exact key first, then the path-only rule that matches any query string.
async fn lookup<R: ReadRepository>(
    repository: &R,
    key: &MatchKey,
) -> StoreResult<Option<Redirect>> {
    if let Some(redirect) = repository.get_by_match_key(key).await? {
        return Ok(Some(redirect));
    }
    if key.query.is_some() {
        return repository.get_by_match_key(&key.without_query()).await;
    }
    Ok(None)
}
