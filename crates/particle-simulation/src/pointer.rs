//! Pointer sampling state

use glam::Vec2;

/// Current and previous pointer samples in normalized canvas coordinates.
///
/// Both start at the origin, so the first sample after the cursor enters the
/// window yields one large velocity, matching a pointer that "jumped" there.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    current: Vec2,
    previous: Vec2,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this frame's sample
    pub fn sample(&mut self, position: Vec2) {
        self.current = position;
    }

    /// Promote the current sample to "previous" for the next frame
    pub fn commit(&mut self) {
        self.previous = self.current;
    }

    pub fn position(&self) -> Vec2 {
        self.current
    }

    pub fn previous(&self) -> Vec2 {
        self.previous
    }

    /// Displacement since the last committed sample
    pub fn velocity(&self) -> Vec2 {
        self.current - self.previous
    }
}
