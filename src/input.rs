//! Pointer input.
//!
//! The `Input` struct turns raw window events into the state the render loop
//! reads once per frame: the pointer offset in normalized device coordinates,
//! which mouse buttons are held, and the drag and scroll accumulated since
//! the last frame.
//!
//! Pointer moves simply overwrite the stored offset; the loop always sees the
//! latest one.

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Back, forward and extra buttons have no mapping and are rejected.
impl TryFrom<WinitMouseButton> for MouseButton {
    type Error = WinitMouseButton;

    fn try_from(btn: WinitMouseButton) -> Result<Self, Self::Error> {
        match btn {
            WinitMouseButton::Left => Ok(MouseButton::Left),
            WinitMouseButton::Right => Ok(MouseButton::Right),
            WinitMouseButton::Middle => Ok(MouseButton::Middle),
            other => Err(other),
        }
    }
}

/// Map a pointer position in pixels to normalized device coordinates.
///
/// The viewport centre is `(0, 0)`, the top-left corner `(-1, 1)`.
/// Returns `None` for a zero-sized viewport.
pub fn pointer_ndc(x: f64, y: f64, width: u32, height: u32) -> Option<Vec2> {
    if width == 0 || height == 0 {
        return None;
    }
    Some(Vec2::new(
        (x / width as f64 * 2.0 - 1.0) as f32,
        (1.0 - y / height as f64 * 2.0) as f32, // Y flipped
    ))
}

/// Mouse state tracking.
#[derive(Debug, Default)]
pub struct Input {
    mouse_held: HashSet<MouseButton>,

    mouse_position: Option<Vec2>,
    mouse_ndc: Vec2,
    mouse_delta: Vec2,

    scroll_delta: f32,

    window_size: (u32, u32),
}

impl Input {
    /// Create a new input tracker.
    pub fn new() -> Self {
        Self {
            window_size: (800, 600),
            ..Default::default()
        }
    }

    /// Check if a mouse button is currently held down.
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Pointer offset in normalized device coordinates (-1 to 1).
    ///
    /// Origin is at center of window. X increases to the right, Y increases upward.
    pub fn mouse_ndc(&self) -> Vec2 {
        self.mouse_ndc
    }

    /// Pointer movement since last frame in pixels.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Scroll wheel lines since last frame. Positive is up/forward.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Clear per-frame state. Called after each rendered frame.
    pub(crate) fn end_frame(&mut self) {
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }

    /// Update window size for NDC calculations.
    pub(crate) fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// Record a pointer position in window pixels.
    pub(crate) fn move_pointer(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if let Some(last) = self.mouse_position {
            self.mouse_delta += new_pos - last;
        }
        self.mouse_position = Some(new_pos);

        let (w, h) = self.window_size;
        if let Some(ndc) = pointer_ndc(x, y, w, h) {
            self.mouse_ndc = ndc;
        }
    }

    /// Record a button press or release. Unmapped buttons are ignored.
    pub(crate) fn set_button(&mut self, button: WinitMouseButton, state: ElementState) {
        let Ok(btn) = MouseButton::try_from(button) else {
            return;
        };
        match state {
            ElementState::Pressed => {
                self.mouse_held.insert(btn);
            }
            ElementState::Released => {
                self.mouse_held.remove(&btn);
            }
        }
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                self.set_button(*button, *state);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.move_pointer(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
            }

            WindowEvent::Resized(size) => {
                self.set_window_size(size.width, size.height);
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_ndc_center_and_corners() {
        let center = pointer_ndc(400.0, 300.0, 800, 600).unwrap();
        assert!(center.x.abs() < 1e-6);
        assert!(center.y.abs() < 1e-6);

        assert_eq!(pointer_ndc(0.0, 0.0, 800, 600), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pointer_ndc(800.0, 600.0, 800, 600), Some(Vec2::new(1.0, -1.0)));
    }

    #[test]
    fn test_pointer_ndc_zero_viewport() {
        assert_eq!(pointer_ndc(10.0, 10.0, 0, 600), None);
        assert_eq!(pointer_ndc(10.0, 10.0, 800, 0), None);
    }

    #[test]
    fn test_last_move_wins() {
        let mut input = Input::new();
        input.set_window_size(800, 600);
        input.move_pointer(0.0, 0.0);
        input.move_pointer(800.0, 300.0);
        assert_eq!(input.mouse_ndc(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_delta_accumulates_until_end_frame() {
        let mut input = Input::new();
        input.move_pointer(10.0, 10.0);
        // First sample has no previous position
        assert_eq!(input.mouse_delta(), Vec2::ZERO);

        input.move_pointer(15.0, 10.0);
        input.move_pointer(20.0, 13.0);
        assert_eq!(input.mouse_delta(), Vec2::new(10.0, 3.0));

        input.end_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        // Position survives the frame boundary
        input.move_pointer(21.0, 13.0);
        assert_eq!(input.mouse_delta(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_zero_window_keeps_previous_offset() {
        let mut input = Input::new();
        input.set_window_size(800, 600);
        input.move_pointer(400.0, 0.0);
        input.set_window_size(800, 0);
        input.move_pointer(0.0, 0.0);
        assert_eq!(input.mouse_ndc(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_extra_buttons_do_not_touch_left_drag() {
        let mut input = Input::new();
        input.set_button(WinitMouseButton::Back, ElementState::Pressed);
        assert!(!input.mouse_held(MouseButton::Left));

        input.set_button(WinitMouseButton::Left, ElementState::Pressed);
        input.set_button(WinitMouseButton::Forward, ElementState::Pressed);
        input.set_button(WinitMouseButton::Forward, ElementState::Released);
        input.set_button(WinitMouseButton::Other(7), ElementState::Released);
        assert!(input.mouse_held(MouseButton::Left));

        input.set_button(WinitMouseButton::Left, ElementState::Released);
        assert!(!input.mouse_held(MouseButton::Left));
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(MouseButton::try_from(WinitMouseButton::Right), Ok(MouseButton::Right));
        assert!(MouseButton::try_from(WinitMouseButton::Back).is_err());
    }
}
