use serde::Serialize;
use signpost_core::destination::DestinationKind;
use signpost_core::redirect::Redirect;
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Filters and paging for [`Redirects::search`](crate::Redirects::search).
///
/// All filters are optional; the default options return the first twenty
/// redirects across every scope.
#[derive(Debug, Clone, TypedBuilder)]
pub struct SearchOptions {
    /// 1-based page to return.
    #[builder(default = 1)]
    pub page: u64,
    /// Maximum number of redirects per page.
    #[builder(default = 20)]
    pub limit: u64,
    /// Restrict to one scope: the nil UUID selects global redirects only,
    /// any other value selects that site. `None` spans all scopes.
    #[builder(default, setter(strip_option))]
    pub root_key: Option<Uuid>,
    /// Restrict to destinations of these kinds; empty means all kinds.
    #[builder(default)]
    pub kinds: Vec<DestinationKind>,
    /// Case-insensitive text filter matched against the inbound path, the
    /// destination URL and the destination name.
    #[builder(default, setter(into, strip_option))]
    pub text: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Paging metadata for a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of redirects matching the filters.
    pub total: u64,
    /// Page size that was applied.
    pub limit: u64,
    /// Number of redirects skipped before this page.
    pub offset: u64,
    /// The returned 1-based page.
    pub page: u64,
    /// Total number of pages, at least 1 even when empty.
    pub pages: u64,
}

/// One page of redirects matching a search.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub pagination: Pagination,
    pub items: Vec<Redirect>,
}

/// Applies filters, ordering and paging over the full redirect list.
///
/// Filtering happens before paging, so `pagination.total` counts matches,
/// not stored rows. Matches are ordered oldest first with the id as a
/// tie-breaker; a page past the end yields empty items rather than an error.
pub(crate) fn execute(options: &SearchOptions, redirects: Vec<Redirect>) -> SearchResult {
    let needle = options.text.as_deref().map(str::to_lowercase);
    let mut matches: Vec<Redirect> = redirects
        .into_iter()
        .filter(|redirect| is_match(options, needle.as_deref(), redirect))
        .collect();
    matches.sort_by(|a, b| {
        a.create_date
            .cmp(&b.create_date)
            .then_with(|| a.id.cmp(&b.id))
    });

    let page = options.page.max(1);
    let limit = options.limit.max(1);
    let offset = (page - 1).saturating_mul(limit);
    let total = matches.len() as u64;
    let pages = total.div_ceil(limit).max(1);

    let items = matches
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();

    SearchResult {
        pagination: Pagination {
            total,
            limit,
            offset,
            page,
            pages,
        },
        items,
    }
}

fn is_match(options: &SearchOptions, needle: Option<&str>, redirect: &Redirect) -> bool {
    if let Some(root_key) = options.root_key {
        if redirect.root_key != root_key {
            return false;
        }
    }
    if !options.kinds.is_empty() && !options.kinds.contains(&redirect.destination.kind()) {
        return false;
    }
    if let Some(needle) = needle {
        let destination = &redirect.destination;
        let in_path = redirect.path.to_lowercase().contains(needle);
        let in_url = destination.display_url().to_lowercase().contains(needle);
        let in_name = destination
            .name()
            .map(|name| name.to_lowercase().contains(needle))
            .unwrap_or(false);
        if !in_path && !in_url && !in_name {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use signpost_core::destination::Destination;
    use signpost_core::redirect::RedirectType;

    fn draft(id: i64, root_key: Uuid, path: &str, destination: Destination) -> Redirect {
        Redirect {
            id,
            key: Uuid::new_v4(),
            root_key,
            path: path.to_string(),
            query_string: None,
            destination,
            redirect_type: RedirectType::Permanent,
            forward_query_string: false,
            create_date: Timestamp::from_second(id).unwrap(),
            update_date: Timestamp::from_second(id).unwrap(),
        }
    }

    fn seed(count: i64) -> Vec<Redirect> {
        (1..=count)
            .map(|i| {
                draft(
                    i,
                    Uuid::nil(),
                    &format!("/page-{i}"),
                    Destination::from_url(&format!("/target-{i}")),
                )
            })
            .collect()
    }

    #[test]
    fn paginates_oldest_first() {
        let result = execute(&SearchOptions::default(), seed(45));

        assert_eq!(result.pagination.total, 45);
        assert_eq!(result.pagination.pages, 3);
        assert_eq!(result.pagination.offset, 0);
        assert_eq!(result.items.len(), 20);
        assert_eq!(result.items[0].path, "/page-1");
        assert_eq!(result.items[19].path, "/page-20");
    }

    #[test]
    fn last_page_is_partial() {
        let options = SearchOptions::builder().page(3).build();
        let result = execute(&options, seed(45));

        assert_eq!(result.items.len(), 5);
        assert_eq!(result.pagination.offset, 40);
        assert_eq!(result.items[0].path, "/page-41");
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let options = SearchOptions::builder().page(4).build();
        let result = execute(&options, seed(45));

        assert!(result.items.is_empty());
        assert_eq!(result.pagination.page, 4);
        assert_eq!(result.pagination.pages, 3);
        assert_eq!(result.pagination.total, 45);
    }

    #[test]
    fn empty_match_still_reports_one_page() {
        let options = SearchOptions::builder().text("nowhere").build();
        let result = execute(&options, seed(3));

        assert_eq!(result.pagination.total, 0);
        assert_eq!(result.pagination.pages, 1);
        assert!(result.items.is_empty());
    }

    #[test]
    fn zero_page_and_limit_clamp_to_one() {
        let options = SearchOptions::builder().page(0).limit(0).build();
        let result = execute(&options, seed(3));

        assert_eq!(result.pagination.page, 1);
        assert_eq!(result.pagination.limit, 1);
        assert_eq!(result.items.len(), 1);
    }

    #[test]
    fn scope_filter_distinguishes_global_from_site() {
        let site = Uuid::new_v4();
        let redirects = vec![
            draft(1, Uuid::nil(), "/a", Destination::from_url("/x")),
            draft(2, site, "/b", Destination::from_url("/y")),
        ];

        let global = SearchOptions::builder().root_key(Uuid::nil()).build();
        let result = execute(&global, redirects.clone());
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].path, "/a");

        let scoped = SearchOptions::builder().root_key(site).build();
        let result = execute(&scoped, redirects.clone());
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].path, "/b");

        let all = SearchOptions::default();
        assert_eq!(execute(&all, redirects).items.len(), 2);
    }

    #[test]
    fn kind_filter_narrows_destinations() {
        let node = signpost_core::content::Resource::new(7, Uuid::new_v4(), "News", "/news");
        let redirects = vec![
            draft(1, Uuid::nil(), "/a", Destination::from_url("/x")),
            draft(2, Uuid::nil(), "/b", Destination::from_content(&node)),
        ];

        let options = SearchOptions::builder()
            .kinds(vec![DestinationKind::Content])
            .build();
        let result = execute(&options, redirects);

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].path, "/b");
    }

    #[test]
    fn text_filter_is_case_insensitive() {
        let node = signpost_core::content::Resource::new(7, Uuid::new_v4(), "Contact Page", "/kontakt");
        let redirects = vec![
            draft(1, Uuid::nil(), "/old-contact", Destination::from_url("/x")),
            draft(2, Uuid::nil(), "/b", Destination::from_content(&node)),
            draft(3, Uuid::nil(), "/c", Destination::from_url("/contact-us")),
            draft(4, Uuid::nil(), "/d", Destination::from_url("/unrelated")),
        ];

        let options = SearchOptions::builder().text("CONTACT").build();
        let result = execute(&options, redirects);

        let paths: Vec<&str> = result.items.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/old-contact", "/b", "/c"]);
    }

    #[test]
    fn ties_on_create_date_break_by_id() {
        let mut redirects = seed(2);
        redirects[1].create_date = redirects[0].create_date;
        redirects.swap(0, 1);

        let result = execute(&SearchOptions::default(), redirects);
        assert_eq!(result.items[0].id, 1);
        assert_eq!(result.items[1].id, 2);
    }
}
