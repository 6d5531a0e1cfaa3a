//! HAL+JSON document parser.
//!
//! Turns a HAL+JSON text into a [`RootResourceObject`] tree in a single pass
//! over the JSON object's properties.
//!
//! # Parsing Flow
//!
//! 1. **Decode**: the text is read into a `serde_json::Value`, keeping
//!    property order and the exact source text of numbers
//! 2. **Walk**: each property of the object is classified:
//!    - `_links` → one [`LinkObject`] per link object, tagged with its relation
//!    - `_embedded` → one resource per inner object, parsed recursively
//!    - anything else → a [`StateValue`]
//! 3. **Group**: links and embedded resources are grouped by relation,
//!    keeping document order within each group
//! 4. **Validate**: relations qualified with a declared CURIE prefix must
//!    have exactly one colon
//!
//! Parsing is all-or-nothing: any format error aborts the whole document.
//!
//! # Shape Rules
//!
//! `_links` and `_embedded` must be an object or `null`. Each relation inside
//! must map to an object or an array of objects. Anything else is a
//! [`HalError::Format`].
//!
//! # Examples
//!
//! ```
//! use hal_client::HalParser;
//!
//! let root = HalParser::new().parse(r#"{
//!     "_links": {
//!         "self": {"href": "/orders"},
//!         "ea:admin": [{"href": "/admins/2", "title": "Fred"}, {"href": "/admins/5", "title": "Kate"}]
//!     },
//!     "currentlyProcessing": 14
//! }"#).unwrap();
//!
//! assert_eq!(root.links_for("ea:admin").len(), 2);
//! assert_eq!(root.state_value("currentlyProcessing").unwrap().raw(), "14");
//! ```
//!
//! [`LinkObject`]: crate::types::LinkObject
//! [`StateValue`]: crate::types::StateValue

mod link;

use crate::error::{HalError, Result};
use crate::protocol::constants::{EMBEDDED, LINKS};
use crate::types::{ResourceObject, RootResourceObject, StateValue};
use http::StatusCode;
use link::parse_link_object;
use serde_json::{Map, Value};

/// Parser for HAL+JSON documents.
///
/// Stateless and cheap to copy; safe to share between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct HalParser;

impl HalParser {
    /// Create a parser.
    pub fn new() -> Self {
        HalParser
    }

    /// Parse a HAL+JSON document.
    ///
    /// The returned root reports `200 OK` as its status.
    ///
    /// # Errors
    ///
    /// - [`HalError::InvalidArgument`] if `json` is empty or whitespace
    /// - [`HalError::Json`] if `json` is not valid JSON
    /// - [`HalError::Format`] if the document violates the HAL shape rules
    pub fn parse(&self, json: &str) -> Result<RootResourceObject> {
        if json.trim().is_empty() {
            return Err(HalError::InvalidArgument(
                "HAL document must not be empty".into(),
            ));
        }
        let value: Value = serde_json::from_str(json)?;
        self.parse_value(&value)
    }

    /// Parse a HAL+JSON document from raw bytes.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<RootResourceObject> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(HalError::InvalidArgument(
                "HAL document must not be empty".into(),
            ));
        }
        let value: Value = serde_json::from_slice(bytes)?;
        self.parse_value(&value)
    }

    /// Parse an already decoded JSON value.
    ///
    /// Numbers keep their source text only if the value was decoded by this
    /// crate's `serde_json` build (which enables `arbitrary_precision`).
    pub fn parse_value(&self, value: &Value) -> Result<RootResourceObject> {
        let Value::Object(obj) = value else {
            return Err(HalError::Format(format!(
                "HAL document must be a JSON object, got {}",
                kind_name(value)
            )));
        };

        let resource = parse_resource(obj)?;
        validate_relations(&resource, &[])?;

        tracing::trace!(
            state = resource.state().len(),
            links = resource.links().len(),
            embedded = resource.embedded().len(),
            "parsed HAL document"
        );

        Ok(RootResourceObject::new(resource, StatusCode::OK))
    }
}

/// Parse one resource object, recursing into `_embedded`.
fn parse_resource(obj: &Map<String, Value>) -> Result<ResourceObject> {
    let mut state = Vec::new();
    let mut links = Vec::new();
    let mut embedded = Vec::new();

    for (key, value) in obj {
        match key.as_str() {
            LINKS => {
                for (rel, inner) in relation_objects(LINKS, value)? {
                    links.push(parse_link_object(inner, rel)?);
                }
            }
            EMBEDDED => {
                for (rel, inner) in relation_objects(EMBEDDED, value)? {
                    embedded.push((rel.to_string(), parse_resource(inner)?));
                }
            }
            "" => {
                return Err(HalError::Format("Empty property name".into()));
            }
            _ => state.push(StateValue::from_json(key, value)?),
        }
    }

    Ok(ResourceObject::from_parts(state, links, embedded))
}

/// Flatten a `_links` / `_embedded` value into `(relation, object)` pairs.
///
/// `null` yields no pairs. Every relation must map to an object or an array
/// of objects.
fn relation_objects<'a>(
    property: &str,
    value: &'a Value,
) -> Result<Vec<(&'a str, &'a Map<String, Value>)>> {
    let groups = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(groups) => groups,
        other => {
            return Err(HalError::Format(format!(
                "Invalid value for {}: {}",
                property, other
            )))
        }
    };

    let mut pairs = Vec::new();
    for (rel, entry) in groups {
        if rel.is_empty() {
            return Err(HalError::Format(format!("Empty relation in {}", property)));
        }
        match entry {
            Value::Object(obj) => pairs.push((rel.as_str(), obj)),
            Value::Array(items) => {
                for item in items {
                    let Value::Object(obj) = item else {
                        return Err(HalError::Format(format!(
                            "Invalid entry for {} relation '{}': {}",
                            property, rel, item
                        )));
                    };
                    pairs.push((rel.as_str(), obj));
                }
            }
            other => {
                return Err(HalError::Format(format!(
                    "Invalid value for {} relation '{}': {}",
                    property, rel, other
                )))
            }
        }
    }

    Ok(pairs)
}

/// Reject CURIE-qualified relations with more than one colon.
///
/// CURIE prefixes declared by a resource apply to it and to everything
/// embedded below it.
fn validate_relations<'a>(resource: &'a ResourceObject, inherited: &[&'a str]) -> Result<()> {
    let mut prefixes = inherited.to_vec();
    prefixes.extend(resource.curie_names());

    for rel in resource.relations() {
        if let Some((prefix, local)) = rel.split_once(':') {
            if local.contains(':') && prefixes.contains(&prefix) {
                return Err(HalError::Format(format!(
                    "Invalid qualified link relation: {}",
                    rel
                )));
            }
        }
    }

    for child in resource.embedded().values().flatten() {
        validate_relations(child, &prefixes)?;
    }

    Ok(())
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
