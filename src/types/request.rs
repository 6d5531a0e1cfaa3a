//! Outgoing HAL requests.

use crate::error::Result;
use crate::protocol::constants::JSON;
use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use http::Method;
use serde::Serialize;

/// A request to issue through [`HalClient::send`](crate::HalClient::send).
///
/// The `Accept` header is always overridden with `application/hal+json` when
/// the request is sent.
///
/// # Examples
///
/// ```
/// use hal_client::HalRequest;
/// use http::Method;
///
/// let request = HalRequest::new(Method::PATCH, "/orders/123")
///     .json(&serde_json::json!({"status": "cancelled"}))
///     .unwrap();
/// assert_eq!(request.method, Method::PATCH);
/// assert!(request.body.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct HalRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URI, or a URI relative to the client's base URL
    pub uri: String,
    /// Extra request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Bytes>,
}

impl HalRequest {
    /// Create a request without headers or body.
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        HalRequest {
            method,
            uri: uri.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// A `GET` request.
    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(Method::GET, uri)
    }

    /// A `DELETE` request.
    pub fn delete(uri: impl Into<String>) -> Self {
        Self::new(Method::DELETE, uri)
    }

    /// Add a header, replacing earlier values of the same name.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set a raw body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `data` as the JSON body and set `Content-Type: application/json`.
    pub fn json<T: Serialize + ?Sized>(mut self, data: &T) -> Result<Self> {
        let body = serde_json::to_vec(data)?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        self.body = Some(Bytes::from(body));
        Ok(self)
    }
}
