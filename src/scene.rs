//! Per-frame scene state.
//!
//! Everything that changes between frames is gathered into a
//! [`FrameContext`] and handed to the renderer, instead of living in
//! globals that the loop and the event handlers both poke at.

use glam::Vec2;

use crate::spiral::scaled_time;

/// Spin added per frame for a pointer at the right edge of the window.
pub const SPIN_RATE: f32 = 0.02;

/// Snapshot of the scene for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Wall-clock milliseconds since startup.
    pub elapsed_ms: f64,
    /// `elapsed_ms` in shader time units.
    pub scaled_time: f32,
    /// Pointer offset in normalized device coordinates.
    ///
    /// Only `x` steers the galaxy; `y` is carried along unused.
    pub pointer: Vec2,
    /// Accumulated rotation of the whole galaxy about z, in radians.
    pub spin: f32,
    /// Frame number, starting at 1.
    pub frame: u64,
}

/// State that persists across frames.
#[derive(Debug, Default)]
pub struct SceneState {
    spin: f32,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current accumulated spin.
    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Advance one frame.
    ///
    /// A pointer right of centre spins the galaxy clockwise, left of centre
    /// counter-clockwise, faster the further out it is.
    pub fn advance(&mut self, elapsed_ms: f64, pointer: Vec2, frame: u64) -> FrameContext {
        self.spin += -pointer.x * SPIN_RATE;
        FrameContext {
            elapsed_ms,
            scaled_time: scaled_time(elapsed_ms),
            pointer,
            spin: self.spin,
            frame,
        }
    }
}
