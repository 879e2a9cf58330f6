use crate::error::CoreError;
use std::fmt::Display;

/// A normalized inbound URL, split into the parts used for matching.
///
/// Fragments never take part in matching and are discarded. The path keeps
/// no trailing slashes except for the root path `/` itself, and a blank
/// query string is stored as `None`, so equal URLs always normalize to the
/// same parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundUrl {
    path: String,
    query: Option<String>,
}

impl InboundUrl {
    /// Parses and normalizes a raw inbound URL.
    ///
    /// The raw value is split on the first `#` (fragment discarded) and the
    /// remainder on the first `?`. Trailing slashes are trimmed from the
    /// path; a path consisting only of slashes collapses to `/`.
    ///
    /// Returns `Err(InvalidUrl)` for blank input.
    pub fn parse(raw: &str) -> std::result::Result<Self, CoreError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CoreError::InvalidUrl("url is empty".to_string()));
        }

        let without_fragment = match raw.split_once('#') {
            Some((before, _)) => before,
            None => raw,
        };

        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (without_fragment, None),
        };

        let path = path.trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };

        let query = query.filter(|q| !q.is_empty()).map(str::to_string);

        Ok(Self {
            path: path.to_string(),
            query,
        })
    }

    /// The normalized path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The normalized query string, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Consumes the URL and returns its path and query parts.
    pub fn into_parts(self) -> (String, Option<String>) {
        (self.path, self.query)
    }

    /// Re-joins path and query into a single URL string.
    pub fn url(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }
}

impl Display for InboundUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_path_and_query() {
        let url = InboundUrl::parse("/old-page?ref=1").unwrap();
        assert_eq!(url.path(), "/old-page");
        assert_eq!(url.query(), Some("ref=1"));
    }

    #[test]
    fn discards_fragment() {
        let url = InboundUrl::parse("/old-page?ref=1#section").unwrap();
        assert_eq!(url.path(), "/old-page");
        assert_eq!(url.query(), Some("ref=1"));

        let url = InboundUrl::parse("/old-page#section?not-a-query").unwrap();
        assert_eq!(url.path(), "/old-page");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn trims_trailing_slashes() {
        assert_eq!(InboundUrl::parse("/old-page/").unwrap().path(), "/old-page");
        assert_eq!(
            InboundUrl::parse("/old-page///").unwrap().path(),
            "/old-page"
        );
    }

    #[test]
    fn preserves_root_path() {
        assert_eq!(InboundUrl::parse("/").unwrap().path(), "/");
        assert_eq!(InboundUrl::parse("///").unwrap().path(), "/");
        assert_eq!(InboundUrl::parse("?a=1").unwrap().path(), "/");
    }

    #[test]
    fn blank_query_becomes_none() {
        assert_eq!(InboundUrl::parse("/old-page?").unwrap().query(), None);
        assert_eq!(InboundUrl::parse("/old-page?#x").unwrap().query(), None);
    }

    #[test]
    fn rejects_blank_input() {
        assert!(InboundUrl::parse("").is_err());
        assert!(InboundUrl::parse("   ").is_err());
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["/old-page/?ref=1#top", "///", "/a//", "/a?", "/a?b=c&d=e"] {
            let once = InboundUrl::parse(raw).unwrap();
            let twice = InboundUrl::parse(&once.url()).unwrap();
            assert_eq!(once, twice, "normalizing {:?} twice diverged", raw);
        }
    }

    #[test]
    fn display_matches_url() {
        let url = InboundUrl::parse("/old-page?ref=1").unwrap();
        assert_eq!(url.to_string(), "/old-page?ref=1");
        assert_eq!(url.to_string(), url.url());
    }
}
