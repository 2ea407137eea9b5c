use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;
use serde_json::Value;

use crate::config::BridgeConfig;
use crate::errors::BridgeError;
use crate::types::Submission;

/// One page of results from the submissions endpoint. The continuation token
/// is absent on the last page; `messages` are informational only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Page {
    pub submissions: Vec<Submission>,
    pub next_page_token: Option<String>,
    pub messages: Vec<String>,
}

/// The seam between the operation layer and the remote server. Operations are
/// written against this trait so they can be driven by fakes in tests.
pub trait SubmissionSource {
    /// Fetches one page of submissions for the given slugs and encoded query.
    fn search_page(
        &self,
        kapp_slug: &str,
        form_slug: Option<&str>,
        query: &str,
    ) -> Result<Page, BridgeError>;

    /// Fetches a single submission by id. `None` when the response carried no
    /// submission member.
    fn fetch_submission(&self, id: &str) -> Result<Option<Submission>, BridgeError>;
}

/// Blocking HTTP client for the submissions API of one Core space.
///
/// Holds the immutable configuration and the precomputed Basic authorization
/// header; carries no other state between calls.
pub struct SubmissionClient {
    config: BridgeConfig,
    http: reqwest::blocking::Client,
    authorization: String,
}

impl SubmissionClient {
    /// Builds the HTTP client with the transport-default timeout.
    ///
    /// # Errors
    /// Returns `Connection` when the underlying client cannot be constructed.
    pub fn new(config: BridgeConfig) -> Result<Self, BridgeError> {
        let http = reqwest::blocking::Client::builder().build().map_err(|err| {
            log::error!("failed building the http client: {err}");
            BridgeError::Connection
        })?;
        let credentials = format!("{}:{}", config.username, config.password);
        let authorization = format!("Basic {}", STANDARD.encode(credentials));
        Ok(Self { config, http, authorization })
    }

    fn get(&self, url: &str) -> Result<(reqwest::StatusCode, String), BridgeError> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, self.authorization.as_str())
            .send()
            .map_err(|err| {
                log::error!("{err}");
                BridgeError::Connection
            })?;
        let status = response.status();
        log::trace!("request response code: {}", status.as_u16());
        let body = response.text().map_err(|err| {
            log::error!("{err}");
            BridgeError::Connection
        })?;
        Ok((status, body))
    }
}

impl SubmissionSource for SubmissionClient {
    fn search_page(
        &self,
        kapp_slug: &str,
        form_slug: Option<&str>,
        query: &str,
    ) -> Result<Page, BridgeError> {
        let url = submissions_url(&self.config.base_url, kapp_slug, form_slug, query);
        let (status, body) = self.get(&url)?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BridgeError::NotFound(format!(
                "Invalid kappSlug or formSlug: {}",
                upstream_error(&body)
            )));
        }
        if !status.is_success() {
            return Err(BridgeError::Remote(upstream_error(&body)));
        }

        let page: Page = serde_json::from_str(&body)
            .map_err(|err| BridgeError::Remote(format!("unexpected response body: {err}")))?;
        if !page.messages.is_empty() {
            log::trace!(
                "messages from the submissions API for query {query}: {}",
                page.messages.join("; ")
            );
        }
        Ok(page)
    }

    fn fetch_submission(&self, id: &str) -> Result<Option<Submission>, BridgeError> {
        let url = format!(
            "{}/app/api/v1/submissions/{}?include=values,details",
            self.config.base_url, id
        );
        let (status, body) = self.get(&url)?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BridgeError::NotFound(format!(
                "The submission with the id '{id}' cannot be found"
            )));
        }
        if !status.is_success() {
            return Err(BridgeError::Remote(upstream_error(&body)));
        }

        let json: Value = serde_json::from_str(&body)
            .map_err(|err| BridgeError::Remote(format!("unexpected response body: {err}")))?;
        Ok(json.get("submission").filter(|value| !value.is_null()).cloned())
    }
}

/// Resource URL for a submissions search; the form segment is present only
/// when the query was scoped to one form.
fn submissions_url(
    base_url: &str,
    kapp_slug: &str,
    form_slug: Option<&str>,
    query: &str,
) -> String {
    match form_slug {
        Some(form_slug) => format!(
            "{base_url}/app/api/v1/kapps/{kapp_slug}/forms/{form_slug}/submissions?{query}"
        ),
        None => format!("{base_url}/app/api/v1/kapps/{kapp_slug}/submissions?{query}"),
    }
}

/// Pulls the upstream `error` member out of a response body, falling back to
/// the re-rendered JSON, then to the raw body.
fn upstream_error(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => match json.get("error") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => json.to_string(),
        },
        Err(_) => body.to_string(),
    }
}
