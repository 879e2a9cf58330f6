use crate::destination::Destination;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// The HTTP semantics of a redirect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectType {
    /// The resource moved for good; clients may cache the redirect.
    #[default]
    Permanent,
    /// The resource is reachable elsewhere for now.
    Temporary,
}

impl RedirectType {
    /// The status code of the redirect response: `301 Moved Permanently`
    /// or `307 Temporary Redirect`.
    pub fn status_code(&self) -> u16 {
        match self {
            RedirectType::Permanent => 301,
            RedirectType::Temporary => 307,
        }
    }

    pub fn is_permanent(&self) -> bool {
        matches!(self, RedirectType::Permanent)
    }
}

/// The natural key a redirect is matched on.
///
/// At most one redirect may occupy a given scope, path and query string
/// combination; the store enforces this on insert and update.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchKey {
    /// Scope of the redirect; the nil key means global.
    pub root_key: Uuid,
    /// Normalized path.
    pub path: String,
    /// Normalized query string, `None` for a path-only redirect.
    pub query: Option<String>,
}

impl MatchKey {
    pub fn new(root_key: Uuid, path: impl Into<String>, query: Option<String>) -> Self {
        Self {
            root_key,
            path: path.into(),
            query,
        }
    }

    /// The same key without its query string part.
    pub fn without_query(&self) -> Self {
        Self {
            root_key: self.root_key,
            path: self.path.clone(),
            query: None,
        }
    }
}

impl Display for MatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if self.root_key.is_nil() {
            write!(f, " (global)")
        } else {
            write!(f, " (scope {})", self.root_key)
        }
    }
}

/// A stored redirect rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    /// Store-assigned numeric id.
    pub id: i64,
    /// Stable identifier, immutable once created.
    pub key: Uuid,
    /// Scope the redirect applies to; the nil key means it is global,
    /// any other value pins it to the site with that root node key.
    pub root_key: Uuid,
    /// Normalized inbound path.
    pub path: String,
    /// Normalized inbound query string; `None` when the rule matches any
    /// query string on its path.
    pub query_string: Option<String>,
    /// Where the redirect points.
    pub destination: Destination,
    #[serde(rename = "type")]
    pub redirect_type: RedirectType,
    /// Whether the inbound query string is appended to the destination.
    #[serde(rename = "forward")]
    pub forward_query_string: bool,
    pub create_date: Timestamp,
    pub update_date: Timestamp,
}

impl Redirect {
    /// The inbound URL the redirect matches, path and query re-joined.
    pub fn url(&self) -> String {
        match &self.query_string {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }

    /// The natural key the redirect occupies.
    pub fn match_key(&self) -> MatchKey {
        MatchKey::new(self.root_key, self.path.clone(), self.query_string.clone())
    }

    /// Whether the redirect applies to every site rather than to one root.
    pub fn is_global(&self) -> bool {
        self.root_key.is_nil()
    }

    pub fn is_permanent(&self) -> bool {
        self.redirect_type.is_permanent()
    }
}
