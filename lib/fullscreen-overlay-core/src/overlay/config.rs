use crate::config::OverlayDefaults;
use crate::document::Selector;
use crate::overlay::{HookError, OverlayInstance, TriggerEvent};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

pub type Hook = Rc<dyn Fn(&TriggerEvent, &OverlayInstance) -> Result<(), HookError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CloseButtonLocation {
    /// Inside the fixed header. No button is generated when there is no fixed header.
    #[default]
    Header,
    /// At the top of the overlay body
    Body,
}

impl CloseButtonLocation {
    pub fn is_header(&self) -> bool {
        matches!(self, CloseButtonLocation::Header)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    BeforeOpen,
    AfterOpen,
    BeforeClose,
    AfterClose,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HookPhase::BeforeOpen => "before-open",
            HookPhase::AfterOpen => "after-open",
            HookPhase::BeforeClose => "before-close",
            HookPhase::AfterClose => "after-close",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Default)]
pub struct OverlayHooks {
    pub on_before_open: Option<Hook>,
    pub on_after_open: Option<Hook>,
    pub on_before_close: Option<Hook>,
    pub on_after_close: Option<Hook>,
}

impl OverlayHooks {
    pub fn get(&self, phase: HookPhase) -> Option<&Hook> {
        match phase {
            HookPhase::BeforeOpen => self.on_before_open.as_ref(),
            HookPhase::AfterOpen => self.on_after_open.as_ref(),
            HookPhase::BeforeClose => self.on_before_close.as_ref(),
            HookPhase::AfterClose => self.on_after_close.as_ref(),
        }
    }
}

impl fmt::Debug for OverlayHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayHooks")
            .field("on_before_open", &self.on_before_open.is_some())
            .field("on_after_open", &self.on_after_open.is_some())
            .field("on_before_close", &self.on_before_close.is_some())
            .field("on_after_close", &self.on_after_close.is_some())
            .finish()
    }
}

/// Settings captured when an overlay is attached. They do not change afterwards.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Activating an element matching this opens the overlay
    pub open_trigger: Selector,
    /// Activating an element matching this closes the overlay
    pub close_trigger: Selector,
    /// Whether the overlay has a header region outside the scrolling body
    pub fixed_header: bool,
    /// Content moved into the header region. Only used with `fixed_header`.
    pub header_content: Option<Selector>,
    /// Presentation hint recorded on the header wrapper
    pub header_height: Option<String>,
    /// Content moved into the body region. `None` uses the element the overlay is attached to.
    pub body_content: Option<Selector>,
    /// Replaces the default close icon
    pub close_button_markup: Option<String>,
    pub close_button_location: CloseButtonLocation,
    pub close_button_omit: bool,
    pub hooks: OverlayHooks,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::from_defaults(&OverlayDefaults::default())
    }
}

impl OverlayConfig {
    pub fn from_defaults(defaults: &OverlayDefaults) -> Self {
        Self {
            open_trigger: defaults.open_trigger.clone(),
            close_trigger: defaults.close_trigger.clone(),
            fixed_header: defaults.fixed_header,
            header_content: None,
            header_height: defaults.header_height.clone(),
            body_content: None,
            close_button_markup: None,
            close_button_location: defaults.close_button_location,
            close_button_omit: defaults.close_button_omit,
            hooks: OverlayHooks::default(),
        }
    }

    pub fn with_open_trigger(mut self, selector: Selector) -> Self {
        self.open_trigger = selector;
        self
    }

    pub fn with_close_trigger(mut self, selector: Selector) -> Self {
        self.close_trigger = selector;
        self
    }

    pub fn with_fixed_header(mut self, fixed_header: bool) -> Self {
        self.fixed_header = fixed_header;
        self
    }

    pub fn with_header_content(mut self, selector: Selector) -> Self {
        self.header_content = Some(selector);
        self
    }

    pub fn with_body_content(mut self, selector: Selector) -> Self {
        self.body_content = Some(selector);
        self
    }

    pub fn with_close_button_markup(mut self, markup: impl Into<String>) -> Self {
        self.close_button_markup = Some(markup.into());
        self
    }

    pub fn with_close_button_location(mut self, location: CloseButtonLocation) -> Self {
        self.close_button_location = location;
        self
    }

    pub fn with_close_button_omit(mut self, omit: bool) -> Self {
        self.close_button_omit = omit;
        self
    }

    pub fn on_before_open<F>(mut self, f: F) -> Self
    where
        F: Fn(&TriggerEvent, &OverlayInstance) -> Result<(), HookError> + 'static,
    {
        self.hooks.on_before_open = Some(Rc::new(f));
        self
    }

    pub fn on_after_open<F>(mut self, f: F) -> Self
    where
        F: Fn(&TriggerEvent, &OverlayInstance) -> Result<(), HookError> + 'static,
    {
        self.hooks.on_after_open = Some(Rc::new(f));
        self
    }

    pub fn on_before_close<F>(mut self, f: F) -> Self
    where
        F: Fn(&TriggerEvent, &OverlayInstance) -> Result<(), HookError> + 'static,
    {
        self.hooks.on_before_close = Some(Rc::new(f));
        self
    }

    pub fn on_after_close<F>(mut self, f: F) -> Self
    where
        F: Fn(&TriggerEvent, &OverlayInstance) -> Result<(), HookError> + 'static,
    {
        self.hooks.on_after_close = Some(Rc::new(f));
        self
    }

    /// Whether a header region is built and filled
    pub fn has_header(&self) -> bool {
        self.fixed_header
    }

    pub fn has_close_button(&self) -> bool {
        if self.close_button_omit {
            return false;
        }

        match self.close_button_location {
            CloseButtonLocation::Header => self.fixed_header,
            CloseButtonLocation::Body => true,
        }
    }
}

/// Per overlay settings as written in a scenario file. Unset fields keep the page defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayOptions {
    pub open_trigger: Option<Selector>,
    pub close_trigger: Option<Selector>,
    pub fixed_header: Option<bool>,
    pub header_content: Option<Selector>,
    pub header_height: Option<String>,
    pub body_content: Option<Selector>,
    pub close_button_markup: Option<String>,
    pub close_button_location: Option<CloseButtonLocation>,
    pub close_button_omit: Option<bool>,
}

impl OverlayOptions {
    pub fn apply(self, mut config: OverlayConfig) -> OverlayConfig {
        if let Some(selector) = self.open_trigger {
            config.open_trigger = selector;
        }
        if let Some(selector) = self.close_trigger {
            config.close_trigger = selector;
        }
        if let Some(fixed_header) = self.fixed_header {
            config.fixed_header = fixed_header;
        }
        if self.header_content.is_some() {
            config.header_content = self.header_content;
        }
        if self.header_height.is_some() {
            config.header_height = self.header_height;
        }
        if self.body_content.is_some() {
            config.body_content = self.body_content;
        }
        if self.close_button_markup.is_some() {
            config.close_button_markup = self.close_button_markup;
        }
        if let Some(location) = self.close_button_location {
            config.close_button_location = location;
        }
        if let Some(omit) = self.close_button_omit {
            config.close_button_omit = omit;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_triggers() {
        let config = OverlayConfig::default();
        assert_eq!(config.open_trigger.as_str(), ".full-screen-overlay-open");
        assert_eq!(config.close_trigger.as_str(), ".full-screen-overlay-close");
        assert!(!config.fixed_header);
        assert!(config.body_content.is_none());
        assert_eq!(config.close_button_location, CloseButtonLocation::Header);
    }

    #[test]
    fn test_has_close_button() {
        let config = OverlayConfig::default();
        assert!(!config.has_close_button());
        assert!(config.clone().with_fixed_header(true).has_close_button());
        assert!(config
            .clone()
            .with_close_button_location(CloseButtonLocation::Body)
            .has_close_button());
        assert!(!config
            .with_fixed_header(true)
            .with_close_button_omit(true)
            .has_close_button());
    }

    #[test]
    fn test_hooks_debug_hides_closures() {
        let config = OverlayConfig::default().on_after_open(|_, _| Ok(()));
        let debug = format!("{:?}", config.hooks);
        assert!(debug.contains("on_after_open: true"));
        assert!(debug.contains("on_before_open: false"));
    }

    #[test]
    fn test_options_apply() {
        let options: OverlayOptions = serde_yaml::from_str(
            r##"
body_content: "#panel"
fixed_header: true
header_content: "#title"
close_button_location: body
"##,
        )
        .unwrap();

        let config = options.apply(OverlayConfig::default());
        assert_eq!(config.body_content, Some(Selector::id("panel")));
        assert_eq!(config.header_content, Some(Selector::id("title")));
        assert!(config.fixed_header);
        assert_eq!(config.close_button_location, CloseButtonLocation::Body);
        assert_eq!(config.open_trigger.as_str(), ".full-screen-overlay-open");
    }

    #[test]
    fn test_options_reject_unknown_fields() {
        assert!(serde_yaml::from_str::<OverlayOptions>("fixedHeader: true").is_err());
    }
}
