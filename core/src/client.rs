//! Request helper for the backend JSON API.
//!
//! # Design
//! `RequestClient` holds its configuration plus two injected collaborators:
//! a `CredentialProvider` consulted on every call and a `Transport` that
//! performs the round trip. Building a request (`build_request`) and
//! classifying a response (`parse_response`) are pure functions of their
//! inputs; `request` glues them around the transport call. There is no
//! retry, no timeout of its own, and no state carried between calls.

use std::sync::Arc;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::credentials::{CredentialProvider, NoCredentials};
use crate::error::{ApiError, Result};
use crate::http::{merge_headers, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{RequestOptions, ResponseBody};

const CONTENT_TYPE: &str = "Content-Type";
const AUTHORIZATION: &str = "Authorization";
const APPLICATION_JSON: &str = "application/json";

/// Stateless client for the backend API.
///
/// Cloning is cheap; clones share the same collaborators.
#[derive(Clone)]
pub struct RequestClient {
    config: ClientConfig,
    credentials: Arc<dyn CredentialProvider>,
    transport: Arc<dyn Transport>,
}

impl RequestClient {
    /// Client with no credentials and the default `ureq` transport.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            credentials: Arc::new(NoCredentials),
            transport: Arc::new(UreqTransport::new()),
        }
    }

    pub fn with_credentials(mut self, credentials: impl CredentialProvider + 'static) -> Self {
        self.credentials = Arc::new(credentials);
        self
    }

    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn get(&self, path: &str) -> Result<ResponseBody> {
        self.request(path, RequestOptions::new(HttpMethod::Get))
    }

    pub fn post(&self, path: &str, json: Option<Value>) -> Result<ResponseBody> {
        self.request(path, RequestOptions::new(HttpMethod::Post).json(json))
    }

    pub fn put(&self, path: &str, json: Option<Value>) -> Result<ResponseBody> {
        self.request(path, RequestOptions::new(HttpMethod::Put).json(json))
    }

    pub fn del(&self, path: &str) -> Result<ResponseBody> {
        self.request(path, RequestOptions::new(HttpMethod::Delete))
    }

    /// Issue one request and normalize the outcome.
    ///
    /// A transport failure becomes `ApiError::Network` (status 0); any
    /// received response is classified by `parse_response`.
    pub fn request(&self, path: &str, options: RequestOptions) -> Result<ResponseBody> {
        let request = self.build_request(path, options);
        tracing::trace!(method = %request.method, url = %request.url, "sending request");

        let response = match self.transport.execute(&request) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    method = %request.method,
                    url = %request.url,
                    error = %e,
                    "API network error"
                );
                return Err(e.into());
            }
        };

        tracing::trace!(status = response.status, url = %request.url, "received response");
        parse_response(response)
    }

    /// Assemble headers, body and URL for one call.
    ///
    /// Defaults are `Content-Type: application/json` and, when a non-empty
    /// token is available, `Authorization: Bearer <token>`; caller headers
    /// override them. A non-null `json` value replaces `body`.
    pub fn build_request(&self, path: &str, options: RequestOptions) -> HttpRequest {
        let mut headers = vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())];
        if let Some(token) = self.credentials.token().filter(|t| !t.is_empty()) {
            headers.push((AUTHORIZATION.to_string(), format!("Bearer {token}")));
        }
        merge_headers(&mut headers, &options.headers);

        let body = match options.json {
            Some(json) if !json.is_null() => Some(json.to_string().into_bytes()),
            _ => options.body,
        };

        HttpRequest {
            method: options.method,
            url: format!("{}{}", self.config.base_url, path),
            headers,
            body,
        }
    }
}

/// Classify a received response.
///
/// 2xx yields the decoded JSON (or raw text when it isn't JSON); anything
/// else yields `ApiError::Http` carrying whichever form decoded.
pub fn parse_response(response: HttpResponse) -> Result<ResponseBody> {
    let ok = response.is_success();
    let body = ResponseBody::from_text(response.body);
    if ok {
        return Ok(body);
    }
    Err(ApiError::Http {
        status: response.status,
        body,
    })
}
