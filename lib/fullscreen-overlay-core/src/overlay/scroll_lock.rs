use crate::document::Node;
use crate::overlay::OverlayId;
use indexmap::IndexSet;
use log::trace;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScrollLockPolicy {
    /// The marker stays while any overlay still holds it
    #[default]
    RefCounted,
    /// Any close clears the marker, even if another overlay still holds it
    Unconditional,
}

/// The page-wide no-scroll marker, kept as a class on `body`
#[derive(Debug)]
pub struct ScrollLock {
    policy: ScrollLockPolicy,
    class: String,
    holders: IndexSet<OverlayId>,
}

impl ScrollLock {
    pub fn new(policy: ScrollLockPolicy, class: &str) -> Self {
        Self {
            policy,
            class: class.to_owned(),
            holders: IndexSet::new(),
        }
    }

    pub fn policy(&self) -> ScrollLockPolicy {
        self.policy
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn is_locked(&self) -> bool {
        !self.holders.is_empty()
    }

    pub fn is_held_by(&self, overlay: OverlayId) -> bool {
        self.holders.contains(&overlay)
    }

    pub fn acquire(&mut self, overlay: OverlayId, body: &Node) {
        if self.holders.insert(overlay) {
            trace!("Overlay {} acquired the scroll lock", overlay);
        }
        body.add_class(&self.class);
    }

    pub fn release(&mut self, overlay: OverlayId, body: &Node) {
        match self.policy {
            ScrollLockPolicy::RefCounted => {
                self.holders.shift_remove(&overlay);
            }
            ScrollLockPolicy::Unconditional => self.holders.clear(),
        }

        if self.holders.is_empty() {
            body.remove_class(&self.class);
        }
    }
}
