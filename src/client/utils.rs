//! Utility functions for the HAL HTTP client.
//!
//! This module provides helper functions for:
//! - Status code classification (redirects, retryable errors)
//! - Resolving request URIs against a base URL

use crate::error::{HalError, Result};
use url::Url;

/// Check if status code indicates retryable error
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 425 | 429 | 502 | 503 | 504)
}

/// Check if status code is a redirect the client follows.
///
/// `302 Found`, `303 See Other` and `307 Temporary Redirect` are re-issued
/// as a GET to the `Location` header.
pub fn is_followed_redirect(status: u16) -> bool {
    matches!(status, 302 | 303 | 307)
}

/// Resolve a request URI.
///
/// Absolute URIs are used as they are; anything else is joined onto `base`.
///
/// # Examples
///
/// ```
/// use hal_client::client::resolve_uri;
/// use url::Url;
///
/// let base = Url::parse("http://api.example.com/v1/").unwrap();
/// assert_eq!(resolve_uri(Some(&base), "orders").unwrap().as_str(), "http://api.example.com/v1/orders");
/// assert_eq!(resolve_uri(Some(&base), "/orders").unwrap().as_str(), "http://api.example.com/orders");
/// assert!(resolve_uri(None, "/orders").is_err());
/// ```
pub fn resolve_uri(base: Option<&Url>, uri: &str) -> Result<Url> {
    match Url::parse(uri) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = base.ok_or_else(|| {
                HalError::InvalidUri(format!("relative URI '{}' without a base URL", uri))
            })?;
            base.join(uri)
                .map_err(|e| HalError::InvalidUri(format!("{}: {}", uri, e)))
        }
        Err(e) => Err(HalError::InvalidUri(format!("{}: {}", uri, e))),
    }
}
