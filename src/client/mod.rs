//! HAL HTTP client implementation.
//!
//! This module wraps an HTTP transport with HAL handling, enabling clients to:
//!
//! - **Force the HAL media type** on every request's `Accept` header
//! - **Parse HAL responses** into resource trees
//! - **Follow redirects** (`302`, `303`, `307`) with a hop limit
//! - **Surface error payloads** through [`HalError::Request`](crate::HalError::Request)
//! - **Cache the API root** per client or per factory
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── fetch   - HalClient and HTTP operations
//! ├── factory - HalClientFactory, hooks and caching behavior
//! ├── cache   - Single-slot root resource cache
//! ├── config  - Client configuration
//! └── utils   - Utility functions
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`HalClient`] | HTTP client returning parsed HAL resources |
//! | [`HalClientFactory`] | Builds clients with hooks and root caching |
//! | [`CachingBehavior`] | `Never`, `PerClient` or `Once` |
//! | [`RootCache`] | At-most-once root fetch shared across clones |
//! | [`ClientConfig`] | Client configuration options |
//!
//! # Examples
//!
//! ## Creating a Client
//!
//! ```
//! use hal_client::client::{ClientConfig, HalClient};
//!
//! // Default configuration
//! let client = HalClient::new().unwrap();
//!
//! // Custom configuration
//! let config = ClientConfig {
//!     max_redirects: 3,
//!     throw_on_error: false,
//!     ..Default::default()
//! };
//! let client = HalClient::with_config(config).unwrap();
//! assert!(!client.config().throw_on_error);
//! ```
//!
//! ## Utility Functions
//!
//! ```
//! use hal_client::client::{is_followed_redirect, is_retryable_status};
//!
//! assert!(is_followed_redirect(303));
//! assert!(!is_followed_redirect(301));
//! assert!(is_retryable_status(503));
//! ```

mod cache;
mod config;
mod factory;
mod fetch;
mod utils;

pub use cache::RootCache;
pub use config::{ClientConfig, ContentTypePolicy, ResponseParseBehavior};
pub use factory::{CachingBehavior, HalClientFactory};
pub use fetch::HalClient;
pub use utils::*;
