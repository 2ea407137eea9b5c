use crate::client::SubmissionSource;
use crate::errors::BridgeError;
use crate::query::{submission_id, translate_count, translate_search};
use crate::record::{Record, RecordSet, project_one, project_records};
use crate::request::{BridgeRequest, normalize_pagination_metadata};

/// Counts every submission matching the request by walking all continuation
/// pages at the fixed count page size. The caller's `limit` and any metadata
/// page token are ignored here.
///
/// Each iteration rebuilds the page query from the original filter string
/// plus at most one `pageToken`, so tokens never accumulate across passes.
/// The walk has no iteration cap; it ends when the server stops returning a
/// token.
///
/// # Errors
/// Propagates translation and fetch failures; any single page failure aborts
/// the count.
pub fn count_records(
    source: &impl SubmissionSource,
    request: &BridgeRequest,
) -> Result<usize, BridgeError> {
    let translated = translate_count(&request.query)?;

    let mut total = 0usize;
    // Empty token means first pass: fetch without a pageToken parameter.
    let mut next_token = Some(String::new());
    while let Some(token) = next_token {
        let mut page_query = translated.query.clone();
        if !token.is_empty() {
            page_query.push_str("&pageToken=");
            page_query.push_str(&token);
        }
        let page =
            source.search_page(&translated.kapp_slug, translated.form_slug.as_deref(), &page_query)?;
        total += page.submissions.len();
        next_token = page.next_page_token.filter(|token| !token.is_empty());
    }

    Ok(total)
}

/// Resolves a single submission and shapes it into a record.
///
/// A query leading with `id=<value>` fetches the submission directly by id;
/// anything else runs a one-page search that must match at most once. Zero
/// matches produce an empty record.
///
/// # Errors
/// `AmbiguousResult` when a search matched more than one submission, plus
/// translation, fetch, and projection failures.
pub fn retrieve_record(
    source: &impl SubmissionSource,
    request: &BridgeRequest,
) -> Result<Record, BridgeError> {
    if let Some(id) = submission_id(&request.query) {
        return match source.fetch_submission(&id)? {
            Some(submission) => project_one(&request.fields, &submission),
            None => Ok(Record::new()),
        };
    }

    let translated = translate_search(&request.query, request.metadata("pageToken"))?;
    let page =
        source.search_page(&translated.kapp_slug, translated.form_slug.as_deref(), &translated.query)?;

    match page.submissions.as_slice() {
        [] => Ok(Record::new()),
        [submission] => project_one(&request.fields, submission),
        _ => Err(BridgeError::AmbiguousResult),
    }
}

/// Runs a one-page search and shapes every submission on the page.
///
/// No cross-page aggregation happens here: the page is capped by the resolved
/// limit, and the upstream continuation token is handed back through the
/// result metadata for the caller to page with.
///
/// # Errors
/// Propagates translation, fetch, and projection failures.
pub fn search_records(
    source: &impl SubmissionSource,
    request: &BridgeRequest,
) -> Result<RecordSet, BridgeError> {
    let translated = translate_search(&request.query, request.metadata("pageToken"))?;
    let page =
        source.search_page(&translated.kapp_slug, translated.form_slug.as_deref(), &translated.query)?;

    let records = project_records(&request.fields, &page.submissions)?;

    let mut metadata = normalize_pagination_metadata(&request.metadata);
    metadata.insert("size".to_string(), page.submissions.len().to_string());
    if let Some(token) = page.next_page_token {
        metadata.insert("nextPageToken".to_string(), token);
    }

    Ok(RecordSet { fields: request.fields.clone(), records, metadata })
}
