//! Link objects parsed from `_links`.

use crate::protocol::{TemplateParams, UriTemplate};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Base used only to check that a relative reference is well formed.
const VALIDATION_BASE: &str = "http://validation.invalid/";

/// The target of a link: an absolute URL or a relative reference.
///
/// Relative references are kept as written and resolved against a base
/// with [`Href::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Href {
    /// Absolute URL
    Absolute(Url),
    /// Relative reference, e.g. `/orders?page=2`
    Relative(String),
}

impl Href {
    /// Parse an absolute URL or a relative reference.
    ///
    /// Returns `None` when the text is empty or not a valid URI reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use hal_client::Href;
    ///
    /// assert!(matches!(Href::parse("/orders"), Some(Href::Relative(_))));
    /// assert!(matches!(Href::parse("http://example.com/orders"), Some(Href::Absolute(_))));
    /// assert_eq!(Href::parse("http://[::1"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Href> {
        if text.is_empty() {
            return None;
        }
        match Url::parse(text) {
            Ok(url) => Some(Href::Absolute(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = Url::parse(VALIDATION_BASE).ok()?;
                base.join(text).ok()?;
                Some(Href::Relative(text.to_string()))
            }
            Err(_) => None,
        }
    }

    /// Resolve against `base`, returning an absolute URL.
    pub fn resolve(&self, base: &Url) -> Option<Url> {
        match self {
            Href::Absolute(url) => Some(url.clone()),
            Href::Relative(reference) => base.join(reference).ok(),
        }
    }

    /// The URL, if this href is absolute.
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Href::Absolute(url) => Some(url),
            Href::Relative(_) => None,
        }
    }

    /// Whether this href is a relative reference.
    pub fn is_relative(&self) -> bool {
        matches!(self, Href::Relative(_))
    }

    /// The href as text.
    pub fn as_str(&self) -> &str {
        match self {
            Href::Absolute(url) => url.as_str(),
            Href::Relative(reference) => reference,
        }
    }
}

impl fmt::Display for Href {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a link attribute outside the HAL vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// A single value
    Single(String),
    /// An array of values
    Multiple(Vec<String>),
}

impl AttributeValue {
    /// The first (or only) value.
    pub fn first(&self) -> Option<&str> {
        match self {
            AttributeValue::Single(value) => Some(value),
            AttributeValue::Multiple(values) => values.first().map(String::as_str),
        }
    }
}

/// A single entry of a resource's `_links`.
///
/// A templated link keeps its unresolved template in [`template`](Self::template)
/// and has no [`href`](Self::href) until [`resolve_templated`](Self::resolve_templated)
/// is called. A non-templated link whose href is not a valid URI has `href == None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkObject {
    pub(crate) rel: String,
    pub(crate) href: Option<Href>,
    pub(crate) templated: bool,
    pub(crate) template: Option<String>,
    pub(crate) media_type: Option<String>,
    pub(crate) deprecation: Option<Url>,
    pub(crate) name: Option<String>,
    pub(crate) profile: Option<Url>,
    pub(crate) title: Option<String>,
    pub(crate) hreflang: Option<String>,
    pub(crate) custom_attributes: BTreeMap<String, AttributeValue>,
}

impl LinkObject {
    /// An empty link for relation `rel`.
    pub(crate) fn new(rel: impl Into<String>) -> Self {
        LinkObject {
            rel: rel.into(),
            href: None,
            templated: false,
            template: None,
            media_type: None,
            deprecation: None,
            name: None,
            profile: None,
            title: None,
            hreflang: None,
            custom_attributes: BTreeMap::new(),
        }
    }

    /// The relation this link was listed under.
    pub fn rel(&self) -> &str {
        &self.rel
    }

    /// The link target, `None` for templated links and unparseable hrefs.
    pub fn href(&self) -> Option<&Href> {
        self.href.as_ref()
    }

    /// Whether the href is a URI template.
    pub fn is_templated(&self) -> bool {
        self.templated
    }

    /// The raw URI template of a templated link.
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Media type hint (`type` attribute).
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    /// Deprecation notice URL.
    pub fn deprecation(&self) -> Option<&Url> {
        self.deprecation.as_ref()
    }

    /// Secondary key for selecting among links of the same relation.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Profile URL of the target resource.
    pub fn profile(&self) -> Option<&Url> {
        self.profile.as_ref()
    }

    /// Human readable label.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Language of the target resource.
    pub fn hreflang(&self) -> Option<&str> {
        self.hreflang.as_deref()
    }

    /// Attributes outside the HAL vocabulary, keyed by lowercase name.
    pub fn custom_attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.custom_attributes
    }

    /// Look up a custom attribute, ignoring case.
    pub fn custom_attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.custom_attributes.get(&name.to_ascii_lowercase())
    }

    /// Expand a templated link into a concrete one.
    ///
    /// Returns a new link with `templated == false` and `href` set to the
    /// expansion (or `None` if the expansion is not a valid URI). The link
    /// itself is left untouched; non-templated links are returned as a copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use hal_client::{HalParser, TemplateParams};
    ///
    /// let root = HalParser::new()
    ///     .parse(r#"{"_links": {"find": {"href": "/orders{?id}", "templated": true}}}"#)
    ///     .unwrap();
    /// let find = root.link("find").unwrap();
    ///
    /// let mut params = TemplateParams::new();
    /// params.insert("id".into(), "42".into());
    /// let resolved = find.resolve_templated(&params);
    ///
    /// assert!(!resolved.is_templated());
    /// assert_eq!(resolved.href().unwrap().as_str(), "/orders?id=42");
    /// assert!(find.is_templated());
    /// ```
    #[must_use]
    pub fn resolve_templated(&self, params: &TemplateParams) -> LinkObject {
        let mut resolved = self.clone();
        if !self.templated {
            return resolved;
        }
        resolved.href = self.template.as_deref().and_then(|template| {
            Href::parse(&UriTemplate::new(template).with_params(params).expand())
        });
        resolved.templated = false;
        resolved.template = None;
        resolved
    }
}
