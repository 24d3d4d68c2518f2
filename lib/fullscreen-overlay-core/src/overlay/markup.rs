use crate::document::{Node, NodeRef};
use crate::overlay::{container_id, OverlayConfig, OverlayId};

/// Class names of the generated overlay structure. Stylesheets hook onto these.
pub mod classes {
    pub const WRAP: &str = "full-screen-overlay-wrap";
    pub const FIXED_HEADER: &str = "full-screen-overlay-fixed-header";
    pub const NO_FIXED_HEADER: &str = "full-screen-overlay-no-fixed-header";
    pub const OVERLAY: &str = "full-screen-overlay";
    pub const HEADER_WRAP: &str = "full-screen-overlay-header-wrap";
    pub const HEADER: &str = "full-screen-overlay-header";
    pub const BODY_WRAP: &str = "full-screen-overlay-body-wrap";
    pub const BODY: &str = "full-screen-overlay-body";
    pub const OPEN: &str = "full-screen-overlay-open";
    pub const CLOSE: &str = "full-screen-overlay-close";
    pub const NO_SCROLL: &str = "full-screen-overlay-no-scroll";
}

const CLOSE_BUTTON_TITLE: &str = "Click to close overlay.";

/// The nodes of one overlay's container, built once per overlay
#[derive(Debug, Clone)]
pub(crate) struct OverlayMarkup {
    pub container: NodeRef,
    pub header_region: Option<NodeRef>,
    pub body_region: NodeRef,
    pub close_button: Option<NodeRef>,
}

impl OverlayMarkup {
    /// ```text
    /// div#full-screen-overlay-N.full-screen-overlay-wrap (hidden)
    ///   div.full-screen-overlay
    ///     div.full-screen-overlay-header-wrap > div.full-screen-overlay-header   (fixed header)
    ///     div.full-screen-overlay-body-wrap > div.full-screen-overlay-body
    /// ```
    pub fn build(id: OverlayId, config: &OverlayConfig) -> Self {
        let container = element(classes::WRAP);
        container.set_dom_id(&container_id(id));
        container.add_class(if config.has_header() {
            classes::FIXED_HEADER
        } else {
            classes::NO_FIXED_HEADER
        });
        container.hide();

        let overlay = element(classes::OVERLAY);
        container.append_child(overlay.clone());

        let header_region = if config.has_header() {
            let header_wrap = element(classes::HEADER_WRAP);
            if let Some(height) = &config.header_height {
                header_wrap.set_attribute("data-header-height", height);
            }
            let header = element(classes::HEADER);
            header_wrap.append_child(header.clone());
            overlay.append_child(header_wrap);
            Some(header)
        } else {
            None
        };

        let body_wrap = element(classes::BODY_WRAP);
        let body_region = element(classes::BODY);
        body_wrap.append_child(body_region.clone());
        overlay.append_child(body_wrap);

        let close_button = if config.has_close_button() {
            let button = close_button(config.close_button_markup.as_deref());
            match &header_region {
                Some(header) if config.close_button_location.is_header() => {
                    header.append_child(button.clone())
                }
                _ => body_region.append_child(button.clone()),
            };
            Some(button)
        } else {
            None
        };

        Self {
            container,
            header_region,
            body_region,
            close_button,
        }
    }
}

fn element(class: &str) -> NodeRef {
    let node = Node::new("div");
    node.add_class(class);
    node
}

fn close_button(markup: Option<&str>) -> NodeRef {
    let button = element(classes::CLOSE);
    button.set_attribute("title", CLOSE_BUTTON_TITLE);
    button.set_attribute("role", "button");

    match markup {
        Some(markup) => button.set_text(markup),
        None => {
            let icon = Node::new("i");
            icon.add_class("fa");
            icon.add_class("fa-times");
            button.append_child(icon);
        }
    }

    button
}
