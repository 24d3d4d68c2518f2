use crate::document::NodeId;
use crate::overlay::{HookPhase, OverlayId};
use thiserror::Error;

/// Raised by an overlay hook to abort the step that invoked it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for HookError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("Element {0} already owns an overlay")]
    AlreadyAttached(NodeId),
    #[error("No overlay with id {0}")]
    UnknownOverlay(OverlayId),
    #[error("Overlay {overlay} {phase} hook failed: {source}")]
    Hook {
        overlay: OverlayId,
        phase: HookPhase,
        #[source]
        source: HookError,
    },
}

pub type OverlayResult<T> = Result<T, OverlayError>;
