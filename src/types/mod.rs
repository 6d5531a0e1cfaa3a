//! Core HAL types: the resource model and request/response wrappers.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StateValue`] | A plain property with its raw text and JSON kind |
//! | [`LinkObject`] | One entry of `_links` |
//! | [`ResourceObject`] | State, links and embedded resources grouped by relation |
//! | [`RootResourceObject`] | Top-level resource with status and CURIE resolution |
//! | [`HalRequest`] / [`HalResponse`] | Client request and response |

mod link;
mod request;
mod resource;
mod response;
mod state;

pub use link::{AttributeValue, Href, LinkObject};
pub use request::HalRequest;
pub use resource::{ResourceObject, RootResourceObject};
pub use response::HalResponse;
pub use state::{StateValue, ValueKind};
