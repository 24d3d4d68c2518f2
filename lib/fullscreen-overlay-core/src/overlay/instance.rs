use crate::document::{Document, NodeRef};
use crate::overlay::markup::OverlayMarkup;
use crate::overlay::{container_id, OverlayConfig, OverlayId};

/// One overlay: the element it was attached to, its settings and the container built for it.
///
/// `is_open` is the source of truth; the container's visibility follows it.
#[derive(Debug)]
pub struct OverlayInstance {
    id: OverlayId,
    container_id: String,
    config: OverlayConfig,
    element: NodeRef,
    markup: OverlayMarkup,
    is_open: bool,
}

impl OverlayInstance {
    pub(crate) fn new(
        id: OverlayId,
        element: NodeRef,
        config: OverlayConfig,
        markup: OverlayMarkup,
    ) -> Self {
        Self {
            id,
            container_id: container_id(id),
            config,
            element,
            markup,
            is_open: false,
        }
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// The element this overlay was attached to
    pub fn element(&self) -> &NodeRef {
        &self.element
    }

    pub fn container(&self) -> &NodeRef {
        &self.markup.container
    }

    pub fn header_region(&self) -> Option<&NodeRef> {
        self.markup.header_region.as_ref()
    }

    pub fn body_region(&self) -> &NodeRef {
        &self.markup.body_region
    }

    pub fn close_button(&self) -> Option<&NodeRef> {
        self.markup.close_button.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub(crate) fn set_open(&mut self, open: bool) {
        self.is_open = open;
        self.markup.container.set_visible(open);
    }

    /// Nodes that belong in the body region: the configured content, or the element itself
    pub fn body_sources(&self, document: &Document) -> Vec<NodeRef> {
        match &self.config.body_content {
            Some(selector) => document.query(selector),
            None => vec![self.element.clone()],
        }
    }

    /// Nodes that belong in the header region. Empty without a fixed header.
    pub fn header_sources(&self, document: &Document) -> Vec<NodeRef> {
        match (&self.config.header_content, self.config.has_header()) {
            (Some(selector), true) => document.query(selector),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::tests::{new_div_with_id, selector};

    fn new_instance(config: OverlayConfig) -> (Document, OverlayInstance) {
        let document = Document::new();
        let element = new_div_with_id("element");
        let panel = new_div_with_id("panel");
        let title = new_div_with_id("title");
        document.body().append_child(element.clone());
        document.body().append_child(panel);
        document.body().append_child(title);

        let markup = OverlayMarkup::build(7, &config);
        (document, OverlayInstance::new(7, element, config, markup))
    }

    #[test]
    fn test_identity() {
        let (_, instance) = new_instance(OverlayConfig::default());
        assert_eq!(instance.id(), 7);
        assert_eq!(instance.container_id(), "full-screen-overlay-7");
        assert_eq!(
            instance.container().dom_id().as_deref(),
            Some("full-screen-overlay-7")
        );
        assert!(!instance.is_open());
    }

    #[test]
    fn test_set_open_drives_container_visibility() {
        let (_, mut instance) = new_instance(OverlayConfig::default());
        instance.set_open(true);
        assert!(instance.container().is_visible());
        instance.set_open(false);
        assert!(!instance.container().is_visible());
    }

    #[test]
    fn test_body_sources_default_to_element() {
        let (document, instance) = new_instance(OverlayConfig::default());
        assert_eq!(
            instance.body_sources(&document),
            vec![instance.element().clone()]
        );
    }

    #[test]
    fn test_body_sources_from_selector() {
        let config = OverlayConfig::default().with_body_content(selector("#panel"));
        let (document, instance) = new_instance(config);
        let sources = instance.body_sources(&document);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].dom_id().as_deref(), Some("panel"));
    }

    #[test]
    fn test_header_sources_need_fixed_header() {
        let config = OverlayConfig::default().with_header_content(selector("#title"));
        let (document, instance) = new_instance(config.clone());
        assert!(instance.header_sources(&document).is_empty());

        let (document, instance) = new_instance(config.with_fixed_header(true));
        assert_eq!(instance.header_sources(&document).len(), 1);
    }
}
