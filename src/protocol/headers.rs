//! Header parsing and formatting for HAL requests and responses.
//!
//! # Header Formats
//!
//! | Header | Format | Example |
//! |--------|--------|---------|
//! | Accept | Media type | `application/hal+json` |
//! | Content-Type | Media type with optional parameters | `application/hal+json; charset=utf-8` |
//! | Location | Absolute or relative URI | `/orders/124` |
//!
//! # Examples
//!
//! ```
//! use hal_client::protocol::{is_hal_content_type, parse_media_type};
//!
//! assert!(is_hal_content_type("Application/HAL+JSON; charset=utf-8"));
//! assert!(!is_hal_content_type("application/json"));
//! assert_eq!(parse_media_type(" text/html ; q=1").as_deref(), Some("text/html"));
//! ```

use super::constants::HAL_JSON;
use http::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, LOCATION};

/// Extract the lowercase media type (`type/subtype`) from a `Content-Type` value.
///
/// Parameters such as `charset` are dropped. Returns `None` for an empty value
/// or one without a `/`.
///
/// # Examples
///
/// ```
/// use hal_client::protocol::parse_media_type;
///
/// assert_eq!(parse_media_type("application/hal+json;charset=UTF-8").as_deref(), Some("application/hal+json"));
/// assert_eq!(parse_media_type(""), None);
/// assert_eq!(parse_media_type("garbage"), None);
/// ```
pub fn parse_media_type(value: &str) -> Option<String> {
    let essence = value.split(';').next()?.trim();
    if essence.is_empty() || !essence.contains('/') {
        return None;
    }
    Some(essence.to_ascii_lowercase())
}

/// Check whether a `Content-Type` value names the HAL media type.
///
/// The comparison is case-insensitive and ignores media type parameters.
pub fn is_hal_content_type(value: &str) -> bool {
    parse_media_type(value).is_some_and(|m| m == HAL_JSON)
}

/// The `Content-Type` header of a response as a string, if present and valid.
pub fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}

/// The `Location` header of a response as a string, if present and valid.
pub fn location(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Force the `Accept` header to the HAL media type.
///
/// Every existing `Accept` value is replaced, whatever the caller configured.
pub fn force_hal_accept(headers: &mut HeaderMap) {
    headers.insert(ACCEPT, HeaderValue::from_static(HAL_JSON));
}
