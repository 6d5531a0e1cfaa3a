#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # HAL Client: Hypermedia for HTTP
//!
//! This crate parses [HAL+JSON](https://datatracker.ietf.org/doc/html/draft-kelly-json-hal)
//! documents into typed resource trees and wraps an HTTP transport so that a
//! HAL API can be navigated by following links instead of building URLs.
//!
//! ## Overview
//!
//! A HAL document is a JSON object with three kinds of content:
//!
//! 1. **State** - plain properties, kept as raw text plus their JSON kind
//! 2. **Links** - the reserved `_links` property, grouped by relation
//! 3. **Embedded resources** - the reserved `_embedded` property, nested to any depth
//!
//! Relations may be CURIEs (`ea:order`) whose documentation URL is declared by
//! a `curies` link, and links may be RFC 6570 URI templates.
//!
//! ## Parsing
//!
//! ```
//! use hal_client::{HalParser, TemplateParams};
//!
//! let root = HalParser::new().parse(r#"{
//!     "_links": {
//!         "self": { "href": "/orders" },
//!         "curies": [{ "name": "ea", "href": "http://example.com/docs/rels/{rel}", "templated": true }],
//!         "ea:find": { "href": "/orders{?id}", "templated": true }
//!     },
//!     "currentlyProcessing": 14
//! }"#).unwrap();
//!
//! assert_eq!(root.state_value("currentlyProcessing").unwrap().raw(), "14");
//!
//! let mut params = TemplateParams::new();
//! params.insert("id".to_string(), "123".into());
//! let find = root.link("ea:find").unwrap().resolve_templated(&params);
//! assert_eq!(find.href().unwrap().as_str(), "/orders?id=123");
//!
//! let docs = root.documentation_uri("ea:find").unwrap().unwrap();
//! assert_eq!(docs.as_str(), "http://example.com/docs/rels/find");
//! ```
//!
//! ## Client Usage
//!
//! ```no_run
//! use hal_client::{ClientConfig, HalClient};
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default()
//!         .with_base_url(Url::parse("http://api.example.com/")?);
//!     let client = HalClient::with_config(config)?;
//!
//!     let root = client.get_root().await?;
//!     if let Some(next) = root.link("next").and_then(|l| l.href()) {
//!         let page = client.get(next.as_str()).await?;
//!         println!("{} orders", page.resource.embedded_for("ea:order").len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[types]** - Resource model (StateValue, LinkObject, ResourceObject, ...)
//! - **[parser]** - HAL+JSON document parser
//! - **[error]** - Error types and result handling
//! - **[client]** - HTTP client, factory and root caching
//! - **[protocol]** - Constants, header handling and URI templates

pub mod client;
pub mod error;
pub mod parser;
pub mod protocol;
pub mod types;

pub use client::{CachingBehavior, ClientConfig, HalClient, HalClientFactory};
pub use error::{HalError, Result};
pub use parser::HalParser;
pub use protocol::{TemplateParams, TemplateValue, UriTemplate};
pub use types::{
    AttributeValue, HalRequest, HalResponse, Href, LinkObject, ResourceObject,
    RootResourceObject, StateValue, ValueKind,
};
