use crate::config::{Config, OverlayDefaults};
use crate::document::{Document, Node, NodeId, NodeRef, Selector};
use crate::overlay::markup::OverlayMarkup;
use crate::overlay::{
    classes, HookPhase, Overlay, OverlayConfig, OverlayError, OverlayId, OverlayInstance,
    OverlayRegistry, OverlayResult, ScrollLock, TriggerAction, TriggerBinding, TriggerEvent,
};
use indexmap::IndexMap;
use log::{debug, trace, warn};
use serde::Serialize;
use std::collections::HashMap;

const TRANSITION_ATTRIBUTE: &str = "data-transition";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchedAction {
    pub overlay: OverlayId,
    pub action: TriggerAction,
}

/// Owns a page and every overlay attached to it.
///
/// All overlay state lives here: id allocation, the element to overlay mapping, trigger
/// bindings, the no-scroll marker and the most recently opened overlay.
#[derive(Debug)]
pub struct OverlayPage {
    document: Document,
    defaults: OverlayDefaults,
    close_fade_ms: u32,
    registry: OverlayRegistry,
    instances: IndexMap<OverlayId, OverlayInstance>,
    owners: HashMap<NodeId, OverlayId>,
    bindings: Vec<TriggerBinding>,
    scroll_lock: ScrollLock,
    last_opened: Option<OverlayId>,
}

impl OverlayPage {
    /// Create a page controller using the current global config
    pub fn new(document: Document) -> Self {
        let config = Config::current().clone();
        Self::with_config(document, &config)
    }

    pub fn with_config(document: Document, config: &Config) -> Self {
        Self {
            document,
            defaults: config.defaults.clone(),
            close_fade_ms: config.close_fade_ms,
            registry: OverlayRegistry::new(),
            instances: IndexMap::new(),
            owners: HashMap::new(),
            bindings: Vec::new(),
            scroll_lock: ScrollLock::new(config.scroll_lock, &config.no_scroll_class),
            last_opened: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// A fresh overlay config seeded from this page's defaults
    pub fn default_overlay_config(&self) -> OverlayConfig {
        OverlayConfig::from_defaults(&self.defaults)
    }

    /// Attach an overlay to every element matching `target`. Elements that already own an
    /// overlay are skipped.
    pub fn attach(&mut self, target: &Selector, config: OverlayConfig) -> Vec<OverlayId> {
        let elements = self.document.query(target);
        if elements.is_empty() {
            warn!("No elements match '{}', nothing to attach", target);
        }

        elements
            .into_iter()
            .filter_map(
                |element| match self.attach_element(element, config.clone()) {
                    Ok(id) => Some(id),
                    Err(e) => {
                        debug!("Skipping element: {}", e);
                        None
                    }
                },
            )
            .collect()
    }

    pub fn attach_element(
        &mut self,
        element: NodeRef,
        config: OverlayConfig,
    ) -> OverlayResult<OverlayId> {
        if self.owners.contains_key(&element.id()) {
            return Err(OverlayError::AlreadyAttached(element.id()));
        }

        let id = self.registry.allocate();

        // Content must not show in its original place before the overlay exists
        match &config.body_content {
            Some(selector) => self.hide_matching(selector),
            None => element.hide(),
        }
        if config.has_header() {
            if let Some(selector) = &config.header_content {
                self.hide_matching(selector);
            }
        }

        let markup = OverlayMarkup::build(id, &config);
        self.document.body().append_child(markup.container.clone());

        self.bindings.push(TriggerBinding {
            overlay: id,
            action: TriggerAction::Open,
            selector: config.open_trigger.clone(),
        });
        self.bindings.push(TriggerBinding {
            overlay: id,
            action: TriggerAction::Close,
            selector: config.close_trigger.clone(),
        });

        self.owners.insert(element.id(), id);
        let instance = OverlayInstance::new(id, element, config, markup);
        debug!("Attached overlay {} as #{}", id, instance.container_id());
        self.instances.insert(id, instance);

        Ok(id)
    }

    fn hide_matching(&self, selector: &Selector) {
        let nodes = self.document.query(selector);
        if nodes.is_empty() {
            trace!("Content '{}' matches nothing", selector);
        }
        for node in nodes {
            node.hide();
        }
    }

    pub fn overlay(&mut self, id: OverlayId) -> Option<Overlay<'_>> {
        if self.instances.contains_key(&id) {
            Some(Overlay::new(id, self))
        } else {
            None
        }
    }

    /// The overlay attached to `element`, if any
    pub fn overlay_for(&mut self, element: &Node) -> Option<Overlay<'_>> {
        let id = self.owners.get(&element.id()).copied()?;
        self.overlay(id)
    }

    pub fn instance(&self, id: OverlayId) -> Option<&OverlayInstance> {
        self.instances.get(&id)
    }

    /// Overlays in attach order
    pub fn instances(&self) -> impl Iterator<Item = &OverlayInstance> {
        self.instances.values()
    }

    pub fn bindings(&self) -> &[TriggerBinding] {
        &self.bindings
    }

    pub fn registry(&self) -> &OverlayRegistry {
        &self.registry
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.document.body().has_class(self.scroll_lock.class())
    }

    /// The most recently opened overlay, while it stays open
    pub fn active(&self) -> Option<OverlayId> {
        self.last_opened
    }

    pub fn open_overlays(&self) -> Vec<OverlayId> {
        self.instances()
            .filter(|instance| instance.is_open())
            .map(|instance| instance.id())
            .collect()
    }

    /// Overlays whose container is currently shown
    pub fn visible_overlays(&self) -> Vec<OverlayId> {
        self.instances()
            .filter(|instance| instance.container().is_displayed())
            .map(|instance| instance.id())
            .collect()
    }

    fn run_hook(&self, id: OverlayId, phase: HookPhase, event: &TriggerEvent) -> OverlayResult<()> {
        let instance = self.instance(id).ok_or(OverlayError::UnknownOverlay(id))?;
        match instance.config().hooks.get(phase) {
            Some(hook) => hook(event, instance).map_err(|source| OverlayError::Hook {
                overlay: id,
                phase,
                source,
            }),
            None => Ok(()),
        }
    }

    /// Move the overlay's content into its container and make it the only visible overlay.
    ///
    /// A failing before-open hook aborts with nothing changed. Calling this on an open overlay
    /// re-applies the same steps; content already in place is left where it is.
    pub fn open(&mut self, id: OverlayId, event: &TriggerEvent) -> OverlayResult<()> {
        self.run_hook(id, HookPhase::BeforeOpen, event)?;

        let instance = self
            .instances
            .get(&id)
            .ok_or(OverlayError::UnknownOverlay(id))?;

        if let Some(header) = instance.header_region() {
            for node in instance.header_sources(&self.document) {
                relocate(&node, header);
            }
        }
        for node in instance.body_sources(&self.document) {
            relocate(&node, instance.body_region());
        }

        // Only one overlay container is shown at a time, including ones this page did not build
        for container in self.document.query(&Selector::class(classes::WRAP)) {
            container.hide();
        }

        let body = self.document.body();
        for other in self
            .instances
            .values_mut()
            .filter(|other| other.id() != id && other.is_open())
        {
            other.set_open(false);
            self.scroll_lock.release(other.id(), body);
            debug!("Overlay {} hidden by overlay {}", other.id(), id);
        }

        self.scroll_lock.acquire(id, body);
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.container().remove_attribute(TRANSITION_ATTRIBUTE);
            instance.set_open(true);
        }
        self.last_opened = Some(id);
        debug!("Opened overlay {}", id);

        self.run_hook(id, HookPhase::AfterOpen, event)
    }

    /// Hide the overlay's container. Content stays inside it for the next open.
    pub fn close(&mut self, id: OverlayId, event: &TriggerEvent) -> OverlayResult<()> {
        self.run_hook(id, HookPhase::BeforeClose, event)?;

        let instance = self
            .instances
            .get_mut(&id)
            .ok_or(OverlayError::UnknownOverlay(id))?;

        instance.set_open(false);
        if self.close_fade_ms > 0 {
            instance.container().set_attribute(
                TRANSITION_ATTRIBUTE,
                &format!("fade-out {}ms", self.close_fade_ms),
            );
        }

        self.scroll_lock.release(id, self.document.body());
        if self.last_opened == Some(id) {
            self.last_opened = None;
        }
        debug!("Closed overlay {}", id);

        self.run_hook(id, HookPhase::AfterClose, event)
    }

    /// Detach the overlay's bindings and remove its container, along with any content that was
    /// moved into it. The id is not reused.
    pub fn destroy(&mut self, id: OverlayId) -> OverlayResult<()> {
        let instance = self
            .instances
            .shift_remove(&id)
            .ok_or(OverlayError::UnknownOverlay(id))?;

        self.bindings.retain(|binding| binding.overlay != id);
        self.owners.remove(&instance.element().id());
        if self.scroll_lock.is_held_by(id) {
            self.scroll_lock.release(id, self.document.body());
        }
        if self.last_opened == Some(id) {
            self.last_opened = None;
        }
        instance.container().detach();
        debug!("Destroyed overlay {}", id);

        Ok(())
    }

    /// Run every binding whose trigger matches the event target or one of its ancestors.
    ///
    /// Open bindings all run, in attach order, so the last matching overlay ends up visible.
    /// A close trigger shared by several overlays dismisses the most recently opened one when it
    /// is among them, otherwise every matching overlay.
    pub fn dispatch(&mut self, event: &TriggerEvent) -> OverlayResult<Vec<DispatchedAction>> {
        let Some(target) = &event.target else {
            return Ok(Vec::new());
        };

        let matched: Vec<TriggerBinding> = self
            .bindings
            .iter()
            .filter(|binding| binding.matches(target))
            .cloned()
            .collect();
        if matched.is_empty() {
            trace!("No trigger matches node {}", target.id());
            return Ok(Vec::new());
        }

        let matching_close: Vec<OverlayId> = matched
            .iter()
            .filter(|binding| binding.action == TriggerAction::Close)
            .map(|binding| binding.overlay)
            .collect();
        let close_targets = match self.last_opened {
            Some(active) if matching_close.contains(&active) => vec![active],
            _ => matching_close,
        };

        let mut dispatched = Vec::new();
        for binding in matched {
            match binding.action {
                TriggerAction::Open => self.open(binding.overlay, event)?,
                TriggerAction::Close if close_targets.contains(&binding.overlay) => {
                    self.close(binding.overlay, event)?
                }
                TriggerAction::Close => continue,
            }

            dispatched.push(DispatchedAction {
                overlay: binding.overlay,
                action: binding.action,
            });
        }

        Ok(dispatched)
    }
}

fn relocate(node: &NodeRef, region: &NodeRef) {
    node.show();
    if node.is_child_of(region) {
        trace!("Node {} already in place", node.id());
        return;
    }

    if !region.append_child(node.clone()) {
        warn!(
            "Cannot move node {} into its own overlay container",
            node.id()
        );
    }
}
