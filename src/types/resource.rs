//! Resource trees produced by the HAL parser.

use super::{LinkObject, StateValue};
use crate::error::{HalError, Result};
use crate::protocol::constants::{CURIES, CURIE_REL_VARIABLE};
use crate::protocol::UriTemplate;
use http::StatusCode;
use std::collections::BTreeMap;
use std::ops::Deref;
use url::Url;

/// A HAL resource: state, links and embedded resources.
///
/// Links and embedded resources are grouped by relation; every group holds at
/// least one entry and keeps document order. Embedded resources are full
/// resources, so the structure nests to any depth. The relation an embedded
/// resource was listed under is its key in [`embedded`](Self::embedded).
///
/// A `ResourceObject` is an immutable snapshot built once by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceObject {
    state: BTreeMap<String, StateValue>,
    links: BTreeMap<String, Vec<LinkObject>>,
    embedded: BTreeMap<String, Vec<ResourceObject>>,
}

impl ResourceObject {
    /// Build a resource by grouping flat, document-ordered entries.
    pub(crate) fn from_parts(
        state: Vec<StateValue>,
        links: Vec<LinkObject>,
        embedded: Vec<(String, ResourceObject)>,
    ) -> Self {
        let state = state
            .into_iter()
            .map(|value| (value.name().to_string(), value))
            .collect();

        let mut link_groups: BTreeMap<String, Vec<LinkObject>> = BTreeMap::new();
        for link in links {
            link_groups.entry(link.rel.clone()).or_default().push(link);
        }

        let mut embedded_groups: BTreeMap<String, Vec<ResourceObject>> = BTreeMap::new();
        for (rel, resource) in embedded {
            embedded_groups.entry(rel).or_default().push(resource);
        }

        ResourceObject {
            state,
            links: link_groups,
            embedded: embedded_groups,
        }
    }

    /// State values keyed by property name.
    pub fn state(&self) -> &BTreeMap<String, StateValue> {
        &self.state
    }

    /// Links keyed by relation.
    pub fn links(&self) -> &BTreeMap<String, Vec<LinkObject>> {
        &self.links
    }

    /// Embedded resources keyed by relation.
    pub fn embedded(&self) -> &BTreeMap<String, Vec<ResourceObject>> {
        &self.embedded
    }

    /// A single state value.
    pub fn state_value(&self, name: &str) -> Option<&StateValue> {
        self.state.get(name)
    }

    /// All links for `rel`; empty if the relation is absent.
    pub fn links_for(&self, rel: &str) -> &[LinkObject] {
        self.links.get(rel).map(Vec::as_slice).unwrap_or_default()
    }

    /// The first link for `rel`.
    pub fn link(&self, rel: &str) -> Option<&LinkObject> {
        self.links_for(rel).first()
    }

    /// All embedded resources for `rel`; empty if the relation is absent.
    pub fn embedded_for(&self, rel: &str) -> &[ResourceObject] {
        self.embedded.get(rel).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether the resource has no state, links or embedded resources.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty() && self.links.is_empty() && self.embedded.is_empty()
    }

    /// Every relation used by links or embedded resources in this resource.
    pub(crate) fn relations(&self) -> impl Iterator<Item = &str> {
        self.links.keys().chain(self.embedded.keys()).map(String::as_str)
    }

    /// Names declared by this resource's `curies` links.
    pub(crate) fn curie_names(&self) -> impl Iterator<Item = &str> {
        self.links_for(CURIES).iter().filter_map(LinkObject::name)
    }
}

/// The top-level resource of a response, with its status code.
///
/// Dereferences to [`ResourceObject`] for state, link and embedded access.
///
/// # Examples
///
/// ```
/// use hal_client::HalParser;
///
/// let root = HalParser::new().parse(r#"{
///     "_links": {
///         "curies": [{"name": "ea", "href": "http://example.com/docs/rels/{rel}", "templated": true}]
///     },
///     "_embedded": {"ea:order": {"total": 30.00}}
/// }"#).unwrap();
///
/// let docs = root.documentation_uri("ea:order").unwrap().unwrap();
/// assert_eq!(docs.as_str(), "http://example.com/docs/rels/order");
/// assert_eq!(root.embedded_for("ea:order").len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootResourceObject {
    resource: ResourceObject,
    status: StatusCode,
}

impl RootResourceObject {
    /// Wrap a parsed resource.
    pub fn new(resource: ResourceObject, status: StatusCode) -> Self {
        RootResourceObject { resource, status }
    }

    /// A resource with no content, e.g. for `204 No Content`.
    pub fn empty(status: StatusCode) -> Self {
        RootResourceObject::new(ResourceObject::default(), status)
    }

    /// Replace the status code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Status code of the response this resource was parsed from.
    ///
    /// Documents parsed outside of a response report `200 OK`.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The wrapped resource.
    pub fn resource(&self) -> &ResourceObject {
        &self.resource
    }

    /// Unwrap into the plain resource.
    pub fn into_resource(self) -> ResourceObject {
        self.resource
    }

    /// Resolve the documentation URL of a CURIE-qualified relation.
    ///
    /// Looks for a `curies` link whose `name` is the prefix of `rel` and
    /// expands its template with the local part as `{rel}`. Only the first
    /// matching CURIE is used.
    ///
    /// Returns `Ok(None)` if there are no CURIEs, none matches, or the
    /// expansion is not an absolute URL.
    ///
    /// # Errors
    ///
    /// [`HalError::Format`] if `rel` matches a CURIE but contains more than
    /// one colon (e.g. `ea:order:extra`).
    pub fn documentation_uri(&self, rel: &str) -> Result<Option<Url>> {
        for curie in self.resource.links_for(CURIES) {
            let Some(name) = curie.name() else {
                continue;
            };
            let prefix = format!("{}:", name);
            if !rel.starts_with(&prefix) {
                continue;
            }

            let parts: Vec<&str> = rel.split(':').collect();
            if parts.len() > 2 {
                return Err(HalError::Format(format!(
                    "Invalid qualified link relation: {}",
                    rel
                )));
            }

            let template = match (curie.template(), curie.href()) {
                (Some(template), _) => template.to_string(),
                (None, Some(href)) => href.to_string(),
                (None, None) => return Ok(None),
            };
            let expanded = UriTemplate::new(template)
                .with(CURIE_REL_VARIABLE, parts[1])
                .expand();
            return Ok(Url::parse(&expanded).ok());
        }

        Ok(None)
    }
}

impl Deref for RootResourceObject {
    type Target = ResourceObject;

    fn deref(&self) -> &ResourceObject {
        &self.resource
    }
}

impl From<RootResourceObject> for ResourceObject {
    fn from(root: RootResourceObject) -> Self {
        root.resource
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Href, ValueKind};

    fn link(rel: &str, href: &str) -> LinkObject {
        let mut link = LinkObject::new(rel);
        link.href = Href::parse(href);
        link
    }

    fn curie(name: &str, template: &str) -> LinkObject {
        let mut link = LinkObject::new(CURIES);
        link.name = Some(name.to_string());
        link.templated = true;
        link.template = Some(template.to_string());
        link
    }

    #[test]
    fn test_grouping_preserves_order() {
        let resource = ResourceObject::from_parts(
            vec![],
            vec![
                link("item", "/a"),
                link("self", "/"),
                link("item", "/b"),
            ],
            vec![],
        );

        assert_eq!(resource.links().len(), 2);
        let items: Vec<_> = resource
            .links_for("item")
            .iter()
            .map(|l| l.href().unwrap().as_str())
            .collect();
        assert_eq!(items, vec!["/a", "/b"]);
        assert_eq!(resource.link("self").unwrap().href().unwrap().as_str(), "/");
    }

    #[test]
    fn test_empty_resource() {
        let resource = ResourceObject::default();
        assert!(resource.is_empty());
        assert!(resource.links_for("self").is_empty());
        assert!(resource.embedded_for("item").is_empty());
        assert!(resource.link("self").is_none());
    }

    #[test]
    fn test_state_keyed_by_name() {
        let resource = ResourceObject::from_parts(
            vec![StateValue::new("total", "30.00", ValueKind::Float).unwrap()],
            vec![],
            vec![],
        );
        assert_eq!(resource.state_value("total").unwrap().raw(), "30.00");
        assert!(!resource.is_empty());
    }

    #[test]
    fn test_documentation_uri_without_curies() {
        let root = RootResourceObject::empty(StatusCode::OK);
        assert_eq!(root.documentation_uri("ea:order").unwrap(), None);
    }

    #[test]
    fn test_documentation_uri_first_match_wins() {
        let resource = ResourceObject::from_parts(
            vec![],
            vec![
                curie("ea", "http://example.com/docs/rels/{rel}"),
                curie("ea", "http://other.example.com/{rel}"),
            ],
            vec![],
        );
        let root = RootResourceObject::new(resource, StatusCode::OK);

        let uri = root.documentation_uri("ea:order").unwrap().unwrap();
        assert_eq!(uri.as_str(), "http://example.com/docs/rels/order");
    }

    #[test]
    fn test_documentation_uri_no_matching_prefix() {
        let resource = ResourceObject::from_parts(
            vec![],
            vec![curie("ea", "http://example.com/docs/rels/{rel}")],
            vec![],
        );
        let root = RootResourceObject::new(resource, StatusCode::OK);

        assert_eq!(root.documentation_uri("acme:order").unwrap(), None);
        assert_eq!(root.documentation_uri("self").unwrap(), None);
    }

    #[test]
    fn test_documentation_uri_rejects_extra_colon() {
        let resource = ResourceObject::from_parts(
            vec![],
            vec![curie("ea", "http://example.com/docs/rels/{rel}")],
            vec![],
        );
        let root = RootResourceObject::new(resource, StatusCode::OK);

        let err = root.documentation_uri("ea:order:extra").unwrap_err();
        assert!(matches!(err, HalError::Format(_)));
    }

    #[test]
    fn test_root_deref_and_status() {
        let root = RootResourceObject::empty(StatusCode::NO_CONTENT);
        assert!(root.is_empty());
        assert_eq!(root.status(), StatusCode::NO_CONTENT);
        let root = root.with_status(StatusCode::OK);
        assert_eq!(root.status(), StatusCode::OK);
        assert_eq!(ResourceObject::from(root), ResourceObject::default());
    }
}
