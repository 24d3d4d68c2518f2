use crate::document::{Node, NodeRef, Selector};
use crate::overlay::OverlayId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Click,
    KeyPress,
    /// Called directly through an overlay handle rather than by a user activation
    Programmatic,
}

/// An activation passed to hooks and to `OverlayPage::dispatch`
#[derive(Debug, Clone)]
pub struct TriggerEvent {
    pub kind: TriggerKind,
    pub target: Option<NodeRef>,
}

impl TriggerEvent {
    pub fn click(target: NodeRef) -> Self {
        Self {
            kind: TriggerKind::Click,
            target: Some(target),
        }
    }

    pub fn key_press(target: NodeRef) -> Self {
        Self {
            kind: TriggerKind::KeyPress,
            target: Some(target),
        }
    }

    pub fn programmatic() -> Self {
        Self {
            kind: TriggerKind::Programmatic,
            target: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerAction {
    Open,
    Close,
}

/// A handler registered once per overlay and action. Matching happens at dispatch time, so
/// triggers added to the page later still work.
#[derive(Debug, Clone)]
pub struct TriggerBinding {
    pub overlay: OverlayId,
    pub action: TriggerAction,
    pub selector: Selector,
}

impl TriggerBinding {
    pub fn matches(&self, target: &Node) -> bool {
        self.selector.matches_or_ancestor(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::tests::{new_div, new_div_with_class, selector};

    #[test]
    fn test_binding_matches_descendant_of_trigger() {
        let binding = TriggerBinding {
            overlay: 0,
            action: TriggerAction::Close,
            selector: selector(".full-screen-overlay-close"),
        };
        let button = new_div_with_class("full-screen-overlay-close");
        let icon = new_div();
        button.append_child(icon.clone());

        assert!(binding.matches(&button));
        assert!(binding.matches(&icon));
        assert!(!binding.matches(&new_div()));
    }

    #[test]
    fn test_programmatic_has_no_target() {
        let event = TriggerEvent::programmatic();
        assert_eq!(event.kind, TriggerKind::Programmatic);
        assert!(event.target.is_none());
    }
}
