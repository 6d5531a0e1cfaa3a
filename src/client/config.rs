//! Configuration for the HAL HTTP client.
//!
//! This module defines the [`ClientConfig`] struct that controls how a
//! [`HalClient`](crate::HalClient) resolves URIs, follows redirects, treats
//! error responses and content types, and builds its default transport.
//!
//! # Configuration Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `base_url` | `None` | Base for relative request URIs and root caching |
//! | `request_timeout_ms` | 30000 | Per-request timeout |
//! | `auto_follow_redirects` | true | Follow 302/303/307 with a GET |
//! | `max_redirects` | 10 | Redirect hop limit |
//! | `throw_on_error` | true | Turn non-success responses into errors |
//! | `parse_behavior` | `Always` | Whether error bodies are parsed |
//! | `content_type_policy` | `Strict` | What to do with non-HAL success bodies |
//! | `max_response_bytes` | 2 GiB | Response buffer limit |
//! | `default_headers` | empty | Headers sent with every request |
//! | `enable_logging` | false | Emit warnings via `tracing` |
//! | `proxy_url` | `""` | Proxy for the default transport |
//! | `max_idle_connections` | 100 | Idle pool size of the default transport |
//!
//! # Examples
//!
//! ```
//! use hal_client::client::{ClientConfig, ContentTypePolicy};
//! use url::Url;
//!
//! let config = ClientConfig::default()
//!     .with_base_url(Url::parse("http://api.example.com/").unwrap())
//!     .with_timeout_ms(5_000)
//!     .with_content_type_policy(ContentTypePolicy::Lenient);
//!
//! assert!(config.validate().is_ok());
//! assert!(config.auto_follow_redirects);
//! ```

use crate::error::{HalError, Result};
use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use url::Url;

/// Whether response bodies of error responses are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseParseBehavior {
    /// Only parse bodies of successful responses
    SuccessOnly,
    /// Parse every HAL body, including error payloads
    #[default]
    Always,
}

/// How a successful response without the HAL media type is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentTypePolicy {
    /// Fail with [`HalError::UnsupportedContentType`]
    #[default]
    Strict,
    /// Return an empty resource
    Lenient,
}

/// Configuration for the HAL HTTP client.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Base URL used to resolve relative request URIs.
    ///
    /// Also the address the root resource is fetched from when caching.
    pub base_url: Option<Url>,

    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,

    /// Re-issue `302`, `303` and `307` responses as a GET to `Location`.
    pub auto_follow_redirects: bool,

    /// Maximum number of consecutive redirects to follow.
    pub max_redirects: usize,

    /// Turn non-success responses into [`HalError::Request`].
    pub throw_on_error: bool,

    /// Whether error response bodies are parsed.
    pub parse_behavior: ResponseParseBehavior,

    /// Treatment of successful non-HAL responses.
    pub content_type_policy: ContentTypePolicy,

    /// Maximum response body size in bytes.
    pub max_response_bytes: usize,

    /// Headers sent with every request.
    ///
    /// `Accept` is always replaced by `application/hal+json`.
    pub default_headers: HeaderMap,

    /// Enable warning logs.
    ///
    /// When enabled, discarded bodies and unparseable error payloads are
    /// reported using the `tracing` crate.
    pub enable_logging: bool,

    /// Proxy URL (optional).
    ///
    /// Only applies to the transport the client builds itself.
    pub proxy_url: String,

    /// Maximum idle connections per host in the default transport.
    pub max_idle_connections: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: None,
            request_timeout_ms: 30_000,
            auto_follow_redirects: true,
            max_redirects: 10,
            throw_on_error: true,
            parse_behavior: ResponseParseBehavior::Always,
            content_type_policy: ContentTypePolicy::Strict,
            max_response_bytes: 2 * 1024 * 1024 * 1024,
            default_headers: HeaderMap::new(),
            enable_logging: false,
            proxy_url: String::new(),
            max_idle_connections: 100,
        }
    }
}

impl ClientConfig {
    /// Create a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set the request timeout in milliseconds.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    /// Enable or disable redirect following.
    #[must_use]
    pub fn with_auto_follow_redirects(mut self, follow: bool) -> Self {
        self.auto_follow_redirects = follow;
        self
    }

    /// Set the redirect hop limit.
    #[must_use]
    pub fn with_max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Enable or disable errors for non-success responses.
    #[must_use]
    pub fn with_throw_on_error(mut self, throw: bool) -> Self {
        self.throw_on_error = throw;
        self
    }

    /// Set the response parse behavior.
    #[must_use]
    pub fn with_parse_behavior(mut self, behavior: ResponseParseBehavior) -> Self {
        self.parse_behavior = behavior;
        self
    }

    /// Set the content type policy.
    #[must_use]
    pub fn with_content_type_policy(mut self, policy: ContentTypePolicy) -> Self {
        self.content_type_policy = policy;
        self
    }

    /// Set the response size limit.
    #[must_use]
    pub fn with_max_response_bytes(mut self, limit: usize) -> Self {
        self.max_response_bytes = limit;
        self
    }

    /// Add a default header.
    #[must_use]
    pub fn with_default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    /// Enable or disable warning logs.
    #[must_use]
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }

    /// Check the configuration for values the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        if let Some(base) = &self.base_url {
            if !matches!(base.scheme(), "http" | "https") {
                return Err(HalError::Config(format!(
                    "base URL must use http or https, got '{}'",
                    base
                )));
            }
        }
        if self.max_response_bytes == 0 {
            return Err(HalError::Config(
                "max_response_bytes must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, None);
        assert_eq!(config.request_timeout_ms, 30_000);
        assert!(config.auto_follow_redirects);
        assert_eq!(config.max_redirects, 10);
        assert!(config.throw_on_error);
        assert_eq!(config.parse_behavior, ResponseParseBehavior::Always);
        assert_eq!(config.content_type_policy, ContentTypePolicy::Strict);
        assert!(!config.enable_logging);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = ClientConfig::new()
            .with_auto_follow_redirects(false)
            .with_max_redirects(3)
            .with_throw_on_error(false)
            .with_parse_behavior(ResponseParseBehavior::SuccessOnly)
            .with_max_response_bytes(1024)
            .with_logging(true);
        assert!(!config.auto_follow_redirects);
        assert_eq!(config.max_redirects, 3);
        assert!(!config.throw_on_error);
        assert_eq!(config.parse_behavior, ResponseParseBehavior::SuccessOnly);
        assert_eq!(config.max_response_bytes, 1024);
        assert!(config.enable_logging);
    }

    #[test]
    fn test_partial_override() {
        let config = ClientConfig {
            max_redirects: 1,
            ..Default::default()
        };
        assert_eq!(config.max_redirects, 1);
        assert_eq!(config.request_timeout_ms, 30_000);
    }

    #[test]
    fn test_validate_rejects_non_http_base() {
        let config = ClientConfig::default()
            .with_base_url(Url::parse("ftp://example.com/").unwrap());
        assert!(matches!(config.validate(), Err(HalError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let config = ClientConfig::default().with_max_response_bytes(0);
        assert!(matches!(config.validate(), Err(HalError::Config(_))));
    }

    #[test]
    fn test_policies_deserialize() {
        let policy: ContentTypePolicy = serde_json::from_str("\"lenient\"").unwrap();
        assert_eq!(policy, ContentTypePolicy::Lenient);
        let behavior: ResponseParseBehavior = serde_json::from_str("\"success_only\"").unwrap();
        assert_eq!(behavior, ResponseParseBehavior::SuccessOnly);
    }
}
