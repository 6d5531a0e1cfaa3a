//! URI template expansion ([RFC 6570]).
//!
//! Templated HAL links (`"templated": true`) carry an unresolved template in
//! their `href`, and CURIE links use a `{rel}` template to point at relation
//! documentation. This module expands both.
//!
//! Supported: all level 4 operators (`+ # . / ; ? &`), the prefix modifier
//! (`{var:3}`) and the explode modifier (`{list*}`). Variables with no value
//! are dropped from the expansion, as the RFC requires.
//!
//! # Examples
//!
//! ```
//! use hal_client::protocol::UriTemplate;
//!
//! let uri = UriTemplate::new("/orders{?id,page}")
//!     .with("id", "42")
//!     .expand();
//! assert_eq!(uri, "/orders?id=42");
//!
//! let docs = UriTemplate::new("http://example.com/docs/rels/{rel}")
//!     .with("rel", "order")
//!     .expand();
//! assert_eq!(docs, "http://example.com/docs/rels/order");
//! ```
//!
//! [RFC 6570]: https://datatracker.ietf.org/doc/html/rfc6570

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Everything except RFC 3986 unreserved characters is encoded.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Unreserved plus reserved characters pass through (`+` and `#` operators).
const RESERVED: &AsciiSet = &UNRESERVED
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

/// A value bound to a template variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValue {
    /// A single string
    String(String),
    /// An ordered list of strings
    List(Vec<String>),
    /// Ordered name/value pairs
    Map(Vec<(String, String)>),
}

impl TemplateValue {
    /// Empty lists and maps count as undefined.
    fn is_defined(&self) -> bool {
        match self {
            TemplateValue::String(_) => true,
            TemplateValue::List(items) => !items.is_empty(),
            TemplateValue::Map(pairs) => !pairs.is_empty(),
        }
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::String(value.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::String(value)
    }
}

impl From<Vec<String>> for TemplateValue {
    fn from(value: Vec<String>) -> Self {
        TemplateValue::List(value)
    }
}

impl From<Vec<&str>> for TemplateValue {
    fn from(value: Vec<&str>) -> Self {
        TemplateValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<(String, String)>> for TemplateValue {
    fn from(value: Vec<(String, String)>) -> Self {
        TemplateValue::Map(value)
    }
}

/// Variable bindings for a template expansion.
pub type TemplateParams = BTreeMap<String, TemplateValue>;

/// A parsed-on-demand URI template with its variable bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    template: String,
    params: TemplateParams,
}

impl UriTemplate {
    /// Create a template with no variables bound.
    pub fn new(template: impl Into<String>) -> Self {
        UriTemplate {
            template: template.into(),
            params: TemplateParams::new(),
        }
    }

    /// Bind a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<TemplateValue>) -> &mut Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Bind a variable, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<TemplateValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Bind every variable in `params`, replacing earlier bindings.
    #[must_use]
    pub fn with_params(mut self, params: &TemplateParams) -> Self {
        for (name, value) in params {
            self.params.insert(name.clone(), value.clone());
        }
        self
    }

    /// The raw template text.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Names of all variables referenced by the template, in order.
    pub fn variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        for caps in expression_regex().captures_iter(&self.template) {
            let (_, body) = split_operator(&caps[1]);
            for spec in body.split(',') {
                let name = VarSpec::parse(spec).name.to_string();
                if !name.is_empty() && !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Expand the template with the bound variables.
    pub fn expand(&self) -> String {
        expression_regex()
            .replace_all(&self.template, |caps: &regex::Captures<'_>| {
                expand_expression(&caps[1], &self.params)
            })
            .into_owned()
    }
}

fn expression_regex() -> &'static Regex {
    static EXPRESSION: OnceLock<Regex> = OnceLock::new();
    EXPRESSION.get_or_init(|| Regex::new(r"\{([^{}]*)\}").expect("static template pattern is valid"))
}

/// Expansion rules for one operator (RFC 6570, appendix A).
struct Operator {
    first: &'static str,
    separator: &'static str,
    named: bool,
    if_empty: &'static str,
    allow_reserved: bool,
}

const SIMPLE: Operator = Operator { first: "", separator: ",", named: false, if_empty: "", allow_reserved: false };
const RESERVED_OP: Operator = Operator { first: "", separator: ",", named: false, if_empty: "", allow_reserved: true };
const FRAGMENT: Operator = Operator { first: "#", separator: ",", named: false, if_empty: "", allow_reserved: true };
const LABEL: Operator = Operator { first: ".", separator: ".", named: false, if_empty: "", allow_reserved: false };
const PATH: Operator = Operator { first: "/", separator: "/", named: false, if_empty: "", allow_reserved: false };
const PARAMETER: Operator = Operator { first: ";", separator: ";", named: true, if_empty: "", allow_reserved: false };
const QUERY: Operator = Operator { first: "?", separator: "&", named: true, if_empty: "=", allow_reserved: false };
const CONTINUATION: Operator = Operator { first: "&", separator: "&", named: true, if_empty: "=", allow_reserved: false };

fn split_operator(expression: &str) -> (&'static Operator, &str) {
    let op = match expression.chars().next() {
        Some('+') => &RESERVED_OP,
        Some('#') => &FRAGMENT,
        Some('.') => &LABEL,
        Some('/') => &PATH,
        Some(';') => &PARAMETER,
        Some('?') => &QUERY,
        Some('&') => &CONTINUATION,
        _ => return (&SIMPLE, expression),
    };
    (op, &expression[1..])
}

struct VarSpec<'a> {
    name: &'a str,
    explode: bool,
    prefix: Option<usize>,
}

impl<'a> VarSpec<'a> {
    fn parse(spec: &'a str) -> Self {
        let spec = spec.trim();
        if let Some(name) = spec.strip_suffix('*') {
            return VarSpec { name, explode: true, prefix: None };
        }
        if let Some((name, len)) = spec.split_once(':') {
            return VarSpec { name, explode: false, prefix: len.parse().ok() };
        }
        VarSpec { name: spec, explode: false, prefix: None }
    }
}

fn expand_expression(expression: &str, params: &TemplateParams) -> String {
    let (op, body) = split_operator(expression);
    let mut parts = Vec::new();

    for spec in body.split(',') {
        let var = VarSpec::parse(spec);
        let Some(value) = params.get(var.name).filter(|v| v.is_defined()) else {
            continue;
        };

        let part = match value {
            TemplateValue::String(s) => {
                let s: String = match var.prefix {
                    Some(len) => s.chars().take(len).collect(),
                    None => s.clone(),
                };
                named_value(op, var.name, &encode(&s, op.allow_reserved))
            }
            TemplateValue::List(items) if var.explode => items
                .iter()
                .map(|item| {
                    let encoded = encode(item, op.allow_reserved);
                    if op.named {
                        named_value(op, var.name, &encoded)
                    } else {
                        encoded
                    }
                })
                .collect::<Vec<_>>()
                .join(op.separator),
            TemplateValue::List(items) => {
                let joined = items
                    .iter()
                    .map(|item| encode(item, op.allow_reserved))
                    .collect::<Vec<_>>()
                    .join(",");
                if op.named {
                    named_value(op, var.name, &joined)
                } else {
                    joined
                }
            }
            TemplateValue::Map(pairs) if var.explode => pairs
                .iter()
                .map(|(k, v)| {
                    let key = encode(k, op.allow_reserved);
                    let encoded = encode(v, op.allow_reserved);
                    if op.named && encoded.is_empty() {
                        format!("{}{}", key, op.if_empty)
                    } else {
                        format!("{}={}", key, encoded)
                    }
                })
                .collect::<Vec<_>>()
                .join(op.separator),
            TemplateValue::Map(pairs) => {
                let joined = pairs
                    .iter()
                    .flat_map(|(k, v)| [encode(k, op.allow_reserved), encode(v, op.allow_reserved)])
                    .collect::<Vec<_>>()
                    .join(",");
                if op.named {
                    named_value(op, var.name, &joined)
                } else {
                    joined
                }
            }
        };
        parts.push(part);
    }

    if parts.is_empty() {
        return String::new();
    }
    format!("{}{}", op.first, parts.join(op.separator))
}

fn named_value(op: &Operator, name: &str, encoded: &str) -> String {
    if !op.named {
        return encoded.to_string();
    }
    if encoded.is_empty() {
        format!("{}{}", name, op.if_empty)
    } else {
        format!("{}={}", name, encoded)
    }
}

fn encode(value: &str, allow_reserved: bool) -> String {
    if !allow_reserved {
        return utf8_percent_encode(value, UNRESERVED).to_string();
    }

    // existing pct-encoded triplets pass through untouched
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find('%') {
        out.extend(utf8_percent_encode(&rest[..pos], RESERVED));
        let tail = &rest[pos..];
        if is_pct_triplet(tail.as_bytes()) {
            out.push_str(&tail[..3]);
            rest = &tail[3..];
        } else {
            out.push_str("%25");
            rest = &tail[1..];
        }
    }
    out.extend(utf8_percent_encode(rest, RESERVED));
    out
}

fn is_pct_triplet(bytes: &[u8]) -> bool {
    bytes.len() >= 3 && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit()
}
