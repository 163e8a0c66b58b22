//! Visibility check standing in for an intersection observer.

/// Decides when the last card of a feed counts as visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollObserver {
    margin: u32,
}

impl ScrollObserver {
    /// Observer with a margin (in rows) below the viewport.
    pub fn new(margin: u32) -> Self {
        Self { margin }
    }

    /// Check if a card starting at row `card_top` intersects the viewport
    /// ending at row `viewport_bottom`, extended by the margin.
    pub fn is_visible(&self, card_top: u32, viewport_bottom: u32) -> bool {
        card_top <= viewport_bottom.saturating_add(self.margin)
    }
}
