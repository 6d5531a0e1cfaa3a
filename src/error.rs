//! Error types for HAL parsing and HTTP operations.
//!
//! This module defines all error types that can occur when parsing HAL+JSON
//! documents or talking to a HAL API. The [`Result`] type alias provides a
//! convenient shorthand for operations that may fail.
//!
//! # Error Categories
//!
//! | Category | Variants | Retryable |
//! |----------|----------|-----------|
//! | Document | `Format`, `Json` | No |
//! | Arguments | `InvalidArgument`, `InvalidUri`, `Config` | No |
//! | Network | `Http`, `Timeout` | Yes |
//! | Response | `Request`, `UnsupportedContentType`, `ResponseTooLarge` | Depends on status |
//! | Redirects | `MissingLocation`, `RedirectLimitExceeded` | No |
//!
//! Broken `href`, `deprecation` or `profile` URIs inside a link object are
//! never reported here; they are stored as `None` on the [`LinkObject`].
//!
//! # Examples
//!
//! ```
//! use hal_client::HalError;
//!
//! let err = HalError::Format("Invalid value for _links: 42".into());
//! assert!(!err.is_retryable());
//! assert!(err.to_string().contains("_links"));
//! ```
//!
//! [`LinkObject`]: crate::types::LinkObject

use crate::types::RootResourceObject;
use http::StatusCode;
use thiserror::Error;

/// Result type for HAL operations.
///
/// Provides a convenient shorthand for `Result<T, HalError>`.
pub type Result<T> = std::result::Result<T, HalError>;

/// Errors that can occur while parsing HAL documents or issuing HAL requests.
///
/// # Examples
///
/// ```
/// use hal_client::HalError;
///
/// fn describe(err: &HalError) -> String {
///     match err {
///         HalError::Request { status, resource, .. } => {
///             format!("{} (body parsed: {})", status, resource.is_some())
///         }
///         HalError::Timeout => "timed out".to_string(),
///         other => other.to_string(),
///     }
/// }
///
/// assert_eq!(describe(&HalError::Timeout), "timed out");
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HalError {
    /// The document is not a well-formed HAL resource.
    ///
    /// Raised for `_links`/`_embedded` values that are not an object, an
    /// array of objects or `null`, for repeated custom link attributes and
    /// for qualified relations with more than one colon.
    #[error("Invalid HAL document: {0}")]
    Format(String),

    /// A required argument was empty or otherwise unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON syntax or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-success status code.
    ///
    /// Carries the parsed HAL body when the response declared the HAL media
    /// type, so callers can inspect server supplied error payloads.
    #[error("HTTP request failed with status {status}: {reason}")]
    Request {
        /// Response status code
        status: StatusCode,
        /// Reason phrase for the status code
        reason: String,
        /// Parsed HAL body, if the response carried one
        resource: Option<Box<RootResourceObject>>,
    },

    /// A successful response did not declare the HAL media type.
    #[error("Expected application/hal+json response (status {status}), got {}", content_type.as_deref().unwrap_or("no content type"))]
    UnsupportedContentType {
        /// Response status code
        status: StatusCode,
        /// The `Content-Type` the server sent, if any
        content_type: Option<String>,
    },

    /// The transport failed to complete the request.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The request timed out.
    #[error("Operation timed out")]
    Timeout,

    /// A request URI could not be resolved.
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// A redirect response had no usable `Location` header.
    #[error("Redirect ({0}) without Location header")]
    MissingLocation(StatusCode),

    /// Too many consecutive redirects.
    #[error("Exceeded the limit of {0} redirects")]
    RedirectLimitExceeded(usize),

    /// The response body exceeded the configured buffer size.
    #[error("Response body of {actual} bytes exceeds the limit of {limit} bytes")]
    ResponseTooLarge {
        /// Configured limit in bytes
        limit: usize,
        /// Actual body size in bytes
        actual: usize,
    },

    /// Invalid client or factory configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HalError {
    /// Check if this error is retryable.
    ///
    /// Returns `true` for timeouts, transport failures and request errors
    /// with status 408, 425, 429, 502, 503 or 504. The client never retries
    /// on its own; this is a hint for callers implementing a retry policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use hal_client::HalError;
    ///
    /// assert!(HalError::Timeout.is_retryable());
    /// assert!(!HalError::RedirectLimitExceeded(10).is_retryable());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            HalError::Timeout | HalError::Http(_) => true,
            HalError::Request { status, .. } => {
                crate::client::is_retryable_status(status.as_u16())
            }
            _ => false,
        }
    }

    /// Status code of the response that caused this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HalError::Request { status, .. }
            | HalError::UnsupportedContentType { status, .. }
            | HalError::MissingLocation(status) => Some(*status),
            _ => None,
        }
    }

    /// The HAL body carried by a [`HalError::Request`], if any.
    #[must_use]
    pub fn resource(&self) -> Option<&RootResourceObject> {
        match self {
            HalError::Request { resource, .. } => resource.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HalError::Timeout
        } else {
            HalError::Http(err.to_string())
        }
    }
}
