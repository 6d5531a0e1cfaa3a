//! Main HAL HTTP client implementation.
//!
//! Provides [`HalClient`] for issuing requests against a HAL API and getting
//! parsed resources back.
//!
//! # Request Flow
//!
//! 1. Resolve the URI against the configured base URL
//! 2. Merge default and request headers, then force `Accept: application/hal+json`
//! 3. Send through the transport; follow `302`/`303`/`307` with a GET if enabled
//! 4. Parse a HAL body, or produce an empty resource for `204` and empty bodies
//! 5. Return the response, or a [`HalError::Request`] for non-success statuses
//!
//! The `Accept` override is built into each request, so concurrent requests
//! on one client never see each other's headers.
//!
//! # Examples
//!
//! ## Simple GET request
//!
//! ```ignore
//! use hal_client::{ClientConfig, HalClient};
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default()
//!         .with_base_url(Url::parse("http://api.example.com/")?);
//!     let client = HalClient::with_config(config)?;
//!
//!     let response = client.get("/orders").await?;
//!     for order in response.resource.embedded_for("ea:order") {
//!         println!("{:?}", order.state_value("status"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Inspecting an error payload
//!
//! ```ignore
//! use hal_client::{HalClient, HalError};
//!
//! match client.delete("/orders/123").await {
//!     Err(HalError::Request { status, resource: Some(body), .. }) => {
//!         println!("{}: {:?}", status, body.state_value("message"));
//!     }
//!     other => println!("{:?}", other.map(|r| r.status)),
//! }
//! ```

use crate::client::config::{ClientConfig, ContentTypePolicy, ResponseParseBehavior};
use crate::client::utils::{is_followed_redirect, resolve_uri};
use crate::error::{HalError, Result};
use crate::parser::HalParser;
use crate::protocol;
use crate::types::{HalRequest, HalResponse, RootResourceObject};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use http::{HeaderMap, Method, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// The HAL HTTP client
///
/// Wraps a `reqwest::Client` transport, forcing the HAL media type on every
/// request and parsing HAL responses into [`RootResourceObject`] trees.
/// Cloning is cheap; clones share the transport and configuration.
#[derive(Clone, Debug)]
pub struct HalClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    parser: HalParser,
    cached_root: Option<Arc<RootResourceObject>>,
}

impl HalClient {
    /// Create a new HAL client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new HAL client with custom configuration
    ///
    /// Builds a transport that does not follow redirects on its own, so
    /// redirect handling stays under [`ClientConfig::auto_follow_redirects`].
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(config.max_idle_connections);

        if !config.proxy_url.is_empty() {
            let proxy = reqwest::Proxy::all(&config.proxy_url)
                .map_err(|e| HalError::Config(format!("invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let http = builder
            .build()
            .map_err(|e| HalError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::from_parts(http, config))
    }

    /// Create a HAL client over a caller supplied transport
    ///
    /// The transport's own redirect policy still applies; build it with
    /// `redirect::Policy::none()` to let this client handle redirects.
    pub fn with_http_client(http: reqwest::Client, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(http, config))
    }

    fn from_parts(http: reqwest::Client, config: ClientConfig) -> Self {
        HalClient {
            http,
            config: Arc::new(config),
            parser: HalParser::new(),
            cached_root: None,
        }
    }

    /// Attach a previously fetched root resource
    #[must_use]
    pub fn with_cached_root(mut self, root: Arc<RootResourceObject>) -> Self {
        self.cached_root = Some(root);
        self
    }

    /// The API root cached when this client was created, if any
    pub fn cached_root(&self) -> Option<&Arc<RootResourceObject>> {
        self.cached_root.as_ref()
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The underlying transport, for requests that bypass HAL handling
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Make a GET request
    pub async fn get(&self, uri: &str) -> Result<HalResponse> {
        self.send(HalRequest::get(uri)).await
    }

    /// Make a POST request with `data` serialized as JSON
    pub async fn post<T: Serialize + ?Sized>(&self, uri: &str, data: &T) -> Result<HalResponse> {
        self.send(HalRequest::new(Method::POST, uri).json(data)?).await
    }

    /// Make a PUT request with `data` serialized as JSON
    pub async fn put<T: Serialize + ?Sized>(&self, uri: &str, data: &T) -> Result<HalResponse> {
        self.send(HalRequest::new(Method::PUT, uri).json(data)?).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, uri: &str) -> Result<HalResponse> {
        self.send(HalRequest::delete(uri)).await
    }

    /// Fetch the resource at the configured base URL
    ///
    /// # Errors
    ///
    /// [`HalError::Config`] if no base URL is configured.
    pub async fn get_root(&self) -> Result<RootResourceObject> {
        let base = self.config.base_url.as_ref().ok_or_else(|| {
            HalError::Config(
                "the root resource can only be requested when a base URL is configured".into(),
            )
        })?;
        let response = self.get(base.as_str()).await?;
        Ok(response.resource)
    }

    /// The API root: the cached copy if the client carries one, otherwise a
    /// fresh fetch from the base URL.
    pub async fn root(&self) -> Result<Arc<RootResourceObject>> {
        match &self.cached_root {
            Some(root) => Ok(Arc::clone(root)),
            None => Ok(Arc::new(self.get_root().await?)),
        }
    }

    /// Send an arbitrary request
    ///
    /// # Arguments
    ///
    /// * `request` - Method, URI, headers and body to send
    pub async fn send(&self, request: HalRequest) -> Result<HalResponse> {
        let mut url = resolve_uri(self.config.base_url.as_ref(), &request.uri)?;
        let mut response = self.execute(&request.method, url.clone(), &request).await?;
        let mut redirects = 0;

        while self.config.auto_follow_redirects && is_followed_redirect(response.status().as_u16()) {
            let status = response.status();
            redirects += 1;
            if redirects > self.config.max_redirects {
                if self.config.enable_logging {
                    tracing::warn!(
                        redirects,
                        max = self.config.max_redirects,
                        "too many redirects"
                    );
                }
                return Err(HalError::RedirectLimitExceeded(self.config.max_redirects));
            }

            let location = protocol::location(response.headers())
                .ok_or(HalError::MissingLocation(status))?;
            url = url
                .join(location)
                .map_err(|e| HalError::InvalidUri(format!("{}: {}", location, e)))?;

            tracing::debug!(%status, %url, "following redirect");

            let follow_up = HalRequest::get(url.as_str());
            response = self.execute(&Method::GET, url.clone(), &follow_up).await?;
        }

        self.process_response(response).await
    }

    /// Issue a single request through the transport
    async fn execute(
        &self,
        method: &Method,
        url: Url,
        request: &HalRequest,
    ) -> Result<reqwest::Response> {
        let mut headers = merge_headers(&self.config.default_headers, &request.headers);
        protocol::force_hal_accept(&mut headers);

        tracing::debug!(%method, %url, "sending HAL request");

        let mut builder = self
            .http
            .request(method.clone(), url)
            .headers(headers)
            .timeout(Duration::from_millis(self.config.request_timeout_ms));

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        Ok(builder.send().await?)
    }

    /// Turn a transport response into a [`HalResponse`] or an error
    async fn process_response(&self, response: reqwest::Response) -> Result<HalResponse> {
        let status = response.status();
        let headers = response.headers().clone();
        let content_type = protocol::content_type(&headers).map(str::to_string);
        let is_hal = content_type
            .as_deref()
            .is_some_and(protocol::is_hal_content_type);

        let body = self.read_body(response).await?;

        tracing::debug!(%status, is_hal, bytes = body.len(), "received HAL response");

        let success = status.is_success();
        let parsed = if status == StatusCode::NO_CONTENT || body.is_empty() {
            Some(RootResourceObject::empty(status))
        } else if is_hal {
            self.parse_body(status, &body)?
        } else if success && self.config.content_type_policy == ContentTypePolicy::Strict {
            return Err(HalError::UnsupportedContentType {
                status,
                content_type,
            });
        } else {
            if self.config.enable_logging {
                tracing::warn!(
                    %status,
                    content_type = content_type.as_deref().unwrap_or(""),
                    "discarding non-HAL response body"
                );
            }
            None
        };

        if success || !self.config.throw_on_error {
            return Ok(HalResponse {
                status,
                headers,
                is_hal,
                resource: parsed.unwrap_or_else(|| RootResourceObject::empty(status)),
                body,
            });
        }

        Err(HalError::Request {
            status,
            reason: status.canonical_reason().unwrap_or("").to_string(),
            resource: parsed.filter(|_| is_hal).map(Box::new),
        })
    }

    /// Buffer the response body, stopping as soon as it passes
    /// `max_response_bytes`
    async fn read_body(&self, response: reqwest::Response) -> Result<Bytes> {
        let limit = self.config.max_response_bytes;
        if let Some(length) = response.content_length() {
            if length > limit as u64 {
                return Err(HalError::ResponseTooLarge {
                    limit,
                    actual: usize::try_from(length).unwrap_or(usize::MAX),
                });
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if body.len() + chunk.len() > limit {
                return Err(HalError::ResponseTooLarge {
                    limit,
                    actual: body.len() + chunk.len(),
                });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body.freeze())
    }

    /// Parse a HAL body
    ///
    /// Bodies of error responses are best effort: `None` when the payload is
    /// skipped or broken, so the status still reaches the caller.
    fn parse_body(&self, status: StatusCode, body: &[u8]) -> Result<Option<RootResourceObject>> {
        if status.is_success() {
            return Ok(Some(self.parser.parse_bytes(body)?.with_status(status)));
        }
        if self.config.parse_behavior == ResponseParseBehavior::SuccessOnly {
            return Ok(None);
        }

        match self.parser.parse_bytes(body) {
            Ok(root) => Ok(Some(root.with_status(status))),
            Err(e) => {
                if self.config.enable_logging {
                    tracing::warn!(%status, error = %e, "failed to parse HAL error payload");
                }
                Ok(None)
            }
        }
    }
}

/// Overlay request headers on the defaults
///
/// A name present on the request replaces every default value of that name;
/// repeated request values are all kept.
fn merge_headers(defaults: &HeaderMap, request: &HeaderMap) -> HeaderMap {
    let mut headers = defaults.clone();
    for name in request.keys() {
        headers.remove(name);
    }
    for (name, value) in request {
        headers.append(name.clone(), value.clone());
    }
    headers
}
