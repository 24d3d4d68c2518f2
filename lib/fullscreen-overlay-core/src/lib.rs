pub mod config;
pub mod document;
pub mod overlay;
pub mod paths;
pub mod scenario;

pub use config::{Config, ConfigError};
pub use document::{Document, Node, NodeRef, Selector, SelectorError};
pub use overlay::{
    Overlay, OverlayConfig, OverlayError, OverlayId, OverlayInstance, OverlayPage, OverlayResult,
    TriggerEvent,
};
pub use scenario::{Scenario, ScenarioError, ScenarioReport, ScenarioRunner};

pub fn version() -> &'static str {
    option_env!("VERSION").unwrap_or("v0.0.0-dev")
}
