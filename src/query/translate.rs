use regex::Regex;
use std::sync::LazyLock;

use crate::errors::BridgeError;

use super::types::{DEFAULT_PAGE_SIZE, TranslatedQuery};

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^id=([^&]*)").expect("id pattern is valid"));

/// Routing fields pulled out of the raw bridge query before re-encoding.
struct RoutedQuery {
    kapp_slug: Option<String>,
    form_slug: Option<String>,
    limit: Option<String>,
    filters: Vec<String>,
}

fn encode(part: &str) -> String {
    url::form_urlencoded::byte_serialize(part.as_bytes()).collect()
}

fn route_params(raw_query: &str) -> RoutedQuery {
    let mut routed =
        RoutedQuery { kapp_slug: None, form_slug: None, limit: None, filters: Vec::new() };
    for part in raw_query.split('&') {
        // Split on the first '=' only; a bare field carries an empty value.
        let (field, value) = match part.split_once('=') {
            Some((field, value)) => (field.trim(), value.trim()),
            None => (part.trim(), ""),
        };
        match field {
            "formSlug" => routed.form_slug = Some(value.to_string()),
            "kappSlug" => routed.kapp_slug = Some(value.to_string()),
            "limit" => routed.limit = Some(value.to_string()),
            _ => routed.filters.push(format!("{}={}", encode(field), encode(value))),
        }
    }
    routed
}

fn require_kapp_slug(kapp_slug: Option<String>) -> Result<String, BridgeError> {
    kapp_slug.ok_or_else(|| {
        BridgeError::InvalidRequest("the bridge query needs to include a kappSlug".to_string())
    })
}

/// Translates a bridge query for a search call.
///
/// Filter parameters are form-urlencoded and the `include=values,details`
/// directive is appended together with the effective limit (the caller's
/// `limit` when present and non-empty, else [`DEFAULT_PAGE_SIZE`]). A page
/// token supplied through request metadata is appended verbatim.
///
/// # Errors
/// Returns `InvalidRequest` when the query carries no `kappSlug`.
pub fn translate_search(
    raw_query: &str,
    page_token: Option<&str>,
) -> Result<TranslatedQuery, BridgeError> {
    let mut routed = route_params(raw_query);

    let effective_limit = match routed.limit.filter(|limit| !limit.is_empty()) {
        Some(limit) => limit,
        None => DEFAULT_PAGE_SIZE.to_string(),
    };
    routed.filters.push(format!("include=values,details&limit={effective_limit}"));
    if let Some(token) = page_token {
        routed.filters.push(format!("pageToken={token}"));
    }

    Ok(TranslatedQuery {
        kapp_slug: require_kapp_slug(routed.kapp_slug)?,
        form_slug: routed.form_slug,
        query: routed.filters.join("&"),
    })
}

/// Translates a bridge query for the counting walk.
///
/// The caller's `limit` is dropped entirely: counting always pages at
/// [`DEFAULT_PAGE_SIZE`] regardless of what the request asked for, and the
/// per-page token is appended later by the walk itself.
///
/// # Errors
/// Returns `InvalidRequest` when the query carries no `kappSlug`.
pub fn translate_count(raw_query: &str) -> Result<TranslatedQuery, BridgeError> {
    let mut routed = route_params(raw_query);

    routed.filters.push(format!("limit={DEFAULT_PAGE_SIZE}"));

    Ok(TranslatedQuery {
        kapp_slug: require_kapp_slug(routed.kapp_slug)?,
        form_slug: routed.form_slug,
        query: routed.filters.join("&"),
    })
}

/// Extracts a submission id from a query of the shape `id=<value>[&...]`.
///
/// The `id` term must lead the query (case-insensitive); an id anywhere else
/// is an ordinary filter parameter.
pub fn submission_id(raw_query: &str) -> Option<String> {
    ID_PATTERN.captures(raw_query).map(|caps| caps[1].to_string())
}
