use crate::overlay::OverlayId;

/// Hands out overlay ids for one page session. Ids are never reused, even after an overlay is
/// destroyed.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    next_id: OverlayId,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> OverlayId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// How many ids have been handed out so far
    pub fn allocated(&self) -> u64 {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let mut registry = OverlayRegistry::new();
        assert_eq!(registry.allocated(), 0);
        assert_eq!(registry.allocate(), 0);
        assert_eq!(registry.allocated(), 1);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut registry = OverlayRegistry::new();
        let ids: Vec<OverlayId> = (0..50).map(|_| registry.allocate()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(ids.first(), Some(&0));
        assert_eq!(ids.last(), Some(&49));
    }

    #[test]
    fn test_registries_are_independent() {
        let mut a = OverlayRegistry::new();
        let mut b = OverlayRegistry::new();
        a.allocate();
        a.allocate();
        assert_eq!(b.allocate(), 0);
    }
}
