//! Link object parsing.

use crate::error::{HalError, Result};
use crate::types::{AttributeValue, Href, LinkObject};
use serde_json::{Map, Value};
use url::Url;

/// Parse one link object listed under relation `rel`.
///
/// Attribute names are matched case-insensitively. Empty values are skipped
/// so they never overwrite an earlier value. Attributes outside the HAL
/// vocabulary are kept as custom attributes; a repeated one is a format error.
pub(crate) fn parse_link_object(obj: &Map<String, Value>, rel: &str) -> Result<LinkObject> {
    let mut link = LinkObject::new(rel);
    let mut href = None;

    for (key, value) in obj {
        let Some(text) = attribute_text(value) else {
            continue;
        };
        let attribute = key.to_lowercase();

        match attribute.as_str() {
            "href" => href = Some(text),
            "templated" => link.templated = text.eq_ignore_ascii_case("true"),
            "type" => link.media_type = Some(text),
            "deprecation" => link.deprecation = Url::parse(&text).ok(),
            "name" => link.name = Some(text),
            "profile" => link.profile = Url::parse(&text).ok(),
            "title" => link.title = Some(text),
            "hreflang" => link.hreflang = Some(text),
            _ => {
                if link.custom_attributes.contains_key(&attribute) {
                    return Err(HalError::Format(format!(
                        "Duplicate custom attribute '{}' on link '{}'",
                        key, rel
                    )));
                }
                link.custom_attributes
                    .insert(attribute, custom_value(value, text));
            }
        }
    }

    if link.templated {
        link.template = href;
    } else {
        link.href = href.as_deref().and_then(Href::parse);
    }

    Ok(link)
}

/// Textual form of an attribute value; `None` when empty.
fn attribute_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

fn custom_value(value: &Value, text: String) -> AttributeValue {
    match value {
        Value::Array(items) => AttributeValue::Multiple(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        _ => AttributeValue::Single(text),
    }
}
