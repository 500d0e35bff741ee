//! Upstream fetch client
//!
//! Posts the rendered filtering query to the upstream SPARQL endpoint and
//! returns the serialized graph payload. One attempt per request, no
//! retry; the timeout is fixed on the underlying client at construction
//! so a stalled upstream cannot retain the request forever.

use crate::error::{IntentError, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

/// Basic credentials forwarded to the upstream endpoint
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// How the filtering query travels in the POST body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryBodyMode {
    /// `application/x-www-form-urlencoded` body with a `query` field
    #[default]
    UrlEncoded,
    /// Raw `application/sparql-query` body
    Direct,
}

/// A successful upstream response: the payload and its declared format
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Response body, a serialized graph payload
    pub body: String,
    /// The `Content-Type` the upstream declared for the body
    pub content_type: String,
}

/// HTTP client for the upstream data source
pub struct UpstreamClient {
    client: Client,
    endpoint: String,
    accept: String,
    credentials: Option<BasicCredentials>,
    body_mode: QueryBodyMode,
}

impl UpstreamClient {
    /// Create a client for `endpoint`. Content negotiation (`accept`) and
    /// the request timeout are fixed here, at configuration time.
    pub fn new(
        endpoint: impl Into<String>,
        accept: impl Into<String>,
        credentials: Option<BasicCredentials>,
        body_mode: QueryBodyMode,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build upstream HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
            accept: accept.into(),
            credentials,
            body_mode,
        }
    }

    /// The configured endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the filtering query and return the graph payload.
    ///
    /// A non-success status fails with the upstream body as detail. The
    /// response body is read in full before the status check so the error
    /// detail is available either way.
    pub async fn fetch(&self, query: &str) -> Result<UpstreamResponse> {
        tracing::debug!(endpoint = %self.endpoint, "fetching role snapshot");

        let mut request = self.client.post(&self.endpoint).header(ACCEPT, &self.accept);

        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        request = match self.body_mode {
            QueryBodyMode::UrlEncoded => request.form(&[("query", query)]),
            QueryBodyMode::Direct => request
                .header(CONTENT_TYPE, "application/sparql-query")
                .body(query.to_string()),
        };

        let response = request
            .send()
            .await
            .map_err(IntentError::UpstreamTransport)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response
            .text()
            .await
            .map_err(IntentError::UpstreamTransport)?;

        if !status.is_success() {
            tracing::debug!(status = %status, "upstream rejected filtering query");
            return Err(IntentError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(bytes = body.len(), %content_type, "received snapshot payload");
        Ok(UpstreamResponse { body, content_type })
    }
}
