use crate::overlay::{OverlayId, OverlayInstance, OverlayPage, OverlayResult, TriggerEvent};

/// Handle to one overlay on a page. Borrowing the page keeps every change going through it.
pub struct Overlay<'a> {
    id: OverlayId,
    page: &'a mut OverlayPage,
}

impl<'a> Overlay<'a> {
    /// Create a new overlay handle (use OverlayPage::overlay() instead)
    pub(crate) fn new(id: OverlayId, page: &'a mut OverlayPage) -> Self {
        Self { id, page }
    }

    /// Open the overlay as if called from code
    pub fn open(&mut self) -> OverlayResult<()> {
        self.open_with(&TriggerEvent::programmatic())
    }

    pub fn open_with(&mut self, event: &TriggerEvent) -> OverlayResult<()> {
        self.page.open(self.id, event)
    }

    /// Close the overlay as if called from code
    pub fn close(&mut self) -> OverlayResult<()> {
        self.close_with(&TriggerEvent::programmatic())
    }

    pub fn close_with(&mut self, event: &TriggerEvent) -> OverlayResult<()> {
        self.page.close(self.id, event)
    }

    /// Remove the overlay from the page. The handle is consumed.
    pub fn destroy(self) -> OverlayResult<()> {
        self.page.destroy(self.id)
    }

    pub fn is_open(&self) -> bool {
        self.instance().is_some_and(|instance| instance.is_open())
    }

    pub fn instance(&self) -> Option<&OverlayInstance> {
        self.page.instance(self.id)
    }

    pub fn container_id(&self) -> Option<&str> {
        self.instance().map(|instance| instance.container_id())
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }
}
