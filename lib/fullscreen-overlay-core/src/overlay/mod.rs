mod config;
mod error;
mod event;
mod handle;
mod instance;
mod markup;
mod page;
mod registry;
mod scroll_lock;

pub use config::{CloseButtonLocation, Hook, HookPhase, OverlayConfig, OverlayHooks, OverlayOptions};
pub use error::{HookError, OverlayError, OverlayResult};
pub use event::{TriggerAction, TriggerBinding, TriggerEvent, TriggerKind};
pub use handle::Overlay;
pub use instance::OverlayInstance;
pub use markup::classes;
pub use page::{DispatchedAction, OverlayPage};
pub use registry::OverlayRegistry;
pub use scroll_lock::{ScrollLock, ScrollLockPolicy};

pub type OverlayId = u64;

pub const CONTAINER_ID_PREFIX: &str = "full-screen-overlay-";

/// The DOM id of the container owned by overlay `id`
pub fn container_id(id: OverlayId) -> String {
    format!("{}{}", CONTAINER_ID_PREFIX, id)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::Config;
    use crate::document::tests::new_div_with_id;
    use crate::document::{Document, NodeRef};

    /// A page with a trigger button and a hidden panel for each of `names`, e.g. `#open-a` and
    /// `#panel-a`.
    pub fn new_page(names: &[&str]) -> OverlayPage {
        let document = Document::new();
        for name in names {
            let open = new_div_with_id(&format!("open-{}", name));
            let panel = new_div_with_id(&format!("panel-{}", name));
            document.body().append_child(open);
            document.body().append_child(panel);
        }
        OverlayPage::with_config(document, &Config::default())
    }

    pub fn panel_config(name: &str) -> OverlayConfig {
        OverlayConfig::default()
            .with_open_trigger(format!("#open-{}", name).parse().unwrap())
            .with_body_content(format!("#panel-{}", name).parse().unwrap())
    }

    pub fn node(page: &OverlayPage, dom_id: &str) -> NodeRef {
        page.document()
            .get_by_dom_id(dom_id)
            .unwrap_or_else(|| panic!("Expected #{} to exist", dom_id))
    }

    #[test]
    fn test_container_id() {
        assert_eq!(container_id(0), "full-screen-overlay-0");
        assert_eq!(container_id(12), "full-screen-overlay-12");
    }
}
