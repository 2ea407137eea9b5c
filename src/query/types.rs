/// Page size used when the caller supplies no limit; counting always walks
/// pages at this size.
pub const DEFAULT_PAGE_SIZE: usize = 200;

/// A bridge query split into its routing slugs and the re-encoded filter
/// query ready for the submissions endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedQuery {
    /// Slug of the kapp the query is scoped to. Always present; translation
    /// fails without one.
    pub kapp_slug: String,
    /// Slug of the form, when the query narrows to a single form.
    pub form_slug: Option<String>,
    /// Encoded filter parameters plus inclusion/pagination directives,
    /// joined with `&`.
    pub query: String,
}
