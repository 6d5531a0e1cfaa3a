//! HAL protocol constants, header handling and URI templates.
//!
//! # Module Organization
//!
//! ```text
//! protocol/
//! ├── constants - Media types and reserved property names
//! ├── headers   - Accept / Content-Type / Location handling
//! └── template  - RFC 6570 URI template expansion
//! ```

mod headers;
mod template;

pub use headers::{content_type, force_hal_accept, is_hal_content_type, location, parse_media_type};
pub use template::{TemplateParams, TemplateValue, UriTemplate};

/// Protocol constants.
pub mod constants {
    /// The HAL+JSON media type.
    pub const HAL_JSON: &str = "application/hal+json";

    /// Media type used for request bodies.
    pub const JSON: &str = "application/json";

    /// Reserved property holding link objects.
    pub const LINKS: &str = "_links";

    /// Reserved property holding embedded resources.
    pub const EMBEDDED: &str = "_embedded";

    /// Link relation declaring CURIE prefixes.
    pub const CURIES: &str = "curies";

    /// Template variable substituted by CURIE resolution.
    pub const CURIE_REL_VARIABLE: &str = "rel";
}
