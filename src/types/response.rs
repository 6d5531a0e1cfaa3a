//! Responses returned by the HAL client.

use super::RootResourceObject;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};

/// A processed HAL response.
///
/// `resource` holds the parsed body for HAL responses, and an empty resource
/// for `204 No Content`, empty bodies and (under the lenient content type
/// policy) non-HAL bodies.
#[derive(Debug, Clone)]
pub struct HalResponse {
    /// Response status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Whether the response declared `application/hal+json`
    pub is_hal: bool,
    /// Parsed resource
    pub resource: RootResourceObject,
    /// Raw response body
    pub body: Bytes,
}

impl HalResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Reason phrase for the status code.
    pub fn reason(&self) -> &str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// Unwrap into the parsed resource.
    pub fn into_resource(self) -> RootResourceObject {
        self.resource
    }
}
