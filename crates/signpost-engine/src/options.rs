use signpost_core::destination::Destination;
use signpost_core::redirect::RedirectType;
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Describes a redirect to be added.
#[derive(Debug, Clone, TypedBuilder)]
pub struct AddRedirectOptions {
    /// Scope of the redirect; the nil key adds a global redirect.
    #[builder(default = Uuid::nil())]
    pub root_key: Uuid,
    /// The inbound URL the redirect should match, with an optional query
    /// string. Normalized before storage.
    #[builder(setter(into))]
    pub original_url: String,
    /// Where the redirect points.
    pub destination: Destination,
    #[builder(default)]
    pub redirect_type: RedirectType,
    /// Whether the inbound query string is appended to the destination.
    #[builder(default)]
    pub forward_query_string: bool,
    /// Replaces an existing redirect occupying the same match key instead
    /// of failing with a conflict.
    #[builder(default)]
    pub overwrite: bool,
}

/// Describes the new state of an existing redirect.
#[derive(Debug, Clone, TypedBuilder)]
pub struct EditRedirectOptions {
    /// Scope of the redirect; the nil key makes it global.
    #[builder(default = Uuid::nil())]
    pub root_key: Uuid,
    /// The inbound URL the redirect should match. Normalized before storage.
    #[builder(setter(into))]
    pub original_url: String,
    /// Where the redirect points.
    pub destination: Destination,
    #[builder(default)]
    pub redirect_type: RedirectType,
    /// Whether the inbound query string is appended to the destination.
    #[builder(default)]
    pub forward_query_string: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_options_defaults() {
        let options = AddRedirectOptions::builder()
            .original_url("/old-page")
            .destination(Destination::from_url("/new-page"))
            .build();

        assert!(options.root_key.is_nil());
        assert_eq!(options.redirect_type, RedirectType::Permanent);
        assert!(!options.forward_query_string);
        assert!(!options.overwrite);
    }
}
