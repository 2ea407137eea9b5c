use corebridge::client::{Page, SubmissionSource};
use corebridge::errors::BridgeError;
use corebridge::ops::{count_records, retrieve_record, search_records};
use corebridge::request::BridgeRequest;
use corebridge::types::Submission;
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;

/// Scripted stand-in for the remote server: hands out pages front-first and
/// records every query it was asked.
#[derive(Default)]
struct FakeSource {
    pages: RefCell<Vec<Page>>,
    submissions_by_id: HashMap<String, Submission>,
    search_queries: RefCell<Vec<String>>,
    fetched_ids: RefCell<Vec<String>>,
}

impl FakeSource {
    fn with_pages(pages: Vec<Page>) -> Self {
        Self { pages: RefCell::new(pages), ..Self::default() }
    }
}

impl SubmissionSource for FakeSource {
    fn search_page(
        &self,
        _kapp_slug: &str,
        _form_slug: Option<&str>,
        query: &str,
    ) -> Result<Page, BridgeError> {
        self.search_queries.borrow_mut().push(query.to_string());
        let mut pages = self.pages.borrow_mut();
        if pages.is_empty() { Ok(Page::default()) } else { Ok(pages.remove(0)) }
    }

    fn fetch_submission(&self, id: &str) -> Result<Option<Submission>, BridgeError> {
        self.fetched_ids.borrow_mut().push(id.to_string());
        Ok(self.submissions_by_id.get(id).cloned())
    }
}

fn page(size: usize, token: Option<&str>) -> Page {
    Page {
        submissions: (0..size).map(|n| json!({"id": n.to_string()})).collect(),
        next_page_token: token.map(String::from),
        messages: Vec::new(),
    }
}

fn request(query: &str) -> BridgeRequest {
    BridgeRequest::new(vec!["id".to_string()], query)
}

#[test]
fn count_walks_every_page() {
    let source =
        FakeSource::with_pages(vec![page(3, Some("A")), page(5, Some("B")), page(2, None)]);
    let total = count_records(&source, &request("kappSlug=services&status=Open")).unwrap();
    assert_eq!(total, 10);

    let queries = source.search_queries.borrow();
    assert_eq!(queries.len(), 3);
    assert_eq!(queries[0], "status=Open&limit=200");
    assert_eq!(queries[1], "status=Open&limit=200&pageToken=A");
    assert_eq!(queries[2], "status=Open&limit=200&pageToken=B");
    // Tokens never accumulate: one pageToken parameter per page at most.
    for query in queries.iter() {
        assert!(query.matches("pageToken=").count() <= 1);
    }
}

#[test]
fn count_treats_empty_token_as_last_page() {
    let source = FakeSource::with_pages(vec![page(4, Some(""))]);
    let total = count_records(&source, &request("kappSlug=services")).unwrap();
    assert_eq!(total, 4);
    assert_eq!(source.search_queries.borrow().len(), 1);
}

#[test]
fn count_without_kapp_slug_is_invalid() {
    let source = FakeSource::default();
    let result = count_records(&source, &request("status=Open"));
    assert!(matches!(result, Err(BridgeError::InvalidRequest(_))));
    assert!(source.search_queries.borrow().is_empty());
}

#[test]
fn retrieve_with_no_match_yields_empty_record() {
    let source = FakeSource::with_pages(vec![page(0, None)]);
    let record = retrieve_record(&source, &request("kappSlug=services&status=Open")).unwrap();
    assert!(record.is_empty());
}

#[test]
fn retrieve_with_two_matches_is_ambiguous() {
    let source = FakeSource::with_pages(vec![page(2, None)]);
    let result = retrieve_record(&source, &request("kappSlug=services&status=Open"));
    assert!(matches!(result, Err(BridgeError::AmbiguousResult)));
}

#[test]
fn retrieve_with_one_match_projects_it() {
    let source = FakeSource::with_pages(vec![page(1, None)]);
    let record = retrieve_record(&source, &request("kappSlug=services&status=Open")).unwrap();
    assert_eq!(record.get("id"), Some(&json!("0")));
}

#[test]
fn leading_id_term_bypasses_the_search() {
    let mut source = FakeSource::default();
    source.submissions_by_id.insert("42".to_string(), json!({"id": "42"}));
    let record = retrieve_record(&source, &request("id=42&other=x")).unwrap();
    assert_eq!(record.get("id"), Some(&json!("42")));
    assert_eq!(source.fetched_ids.borrow().as_slice(), ["42"]);
    assert!(source.search_queries.borrow().is_empty());
}

#[test]
fn direct_fetch_without_submission_member_yields_empty_record() {
    let source = FakeSource::default();
    let record = retrieve_record(&source, &request("id=42")).unwrap();
    assert!(record.is_empty());
}

#[test]
fn search_attaches_pagination_metadata() {
    let source = FakeSource::with_pages(vec![page(2, Some("next"))]);
    let mut req = request("kappSlug=services&status=Open");
    req.metadata.insert("pageSize".to_string(), "25".to_string());
    let result = search_records(&source, &req).unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.fields, ["id"]);
    assert_eq!(result.metadata.get("size").map(String::as_str), Some("2"));
    assert_eq!(result.metadata.get("nextPageToken").map(String::as_str), Some("next"));
    assert_eq!(result.metadata.get("pageSize").map(String::as_str), Some("25"));
    assert_eq!(result.metadata.get("pageNumber").map(String::as_str), Some("0"));
    assert_eq!(result.metadata.get("offset").map(String::as_str), Some("0"));
}

#[test]
fn search_on_empty_page_reports_size_zero_and_no_token() {
    let source = FakeSource::with_pages(vec![page(0, None)]);
    let result = search_records(&source, &request("kappSlug=services")).unwrap();
    assert!(result.records.is_empty());
    assert_eq!(result.metadata.get("size").map(String::as_str), Some("0"));
    assert!(!result.metadata.contains_key("nextPageToken"));
}

#[test]
fn search_forwards_the_metadata_page_token() {
    let source = FakeSource::with_pages(vec![page(1, None)]);
    let mut req = request("kappSlug=services");
    req.metadata.insert("pageToken".to_string(), "zzz".to_string());
    search_records(&source, &req).unwrap();
    let queries = source.search_queries.borrow();
    assert!(queries[0].ends_with("&pageToken=zzz"));
}

#[test]
fn search_fetches_exactly_one_page() {
    let source = FakeSource::with_pages(vec![page(2, Some("more")), page(2, None)]);
    search_records(&source, &request("kappSlug=services")).unwrap();
    assert_eq!(source.search_queries.borrow().len(), 1);
}
