//! Orbit, zoom and pan controls for the [`Camera`].
//!
//! Input handlers only accumulate; the camera moves once per frame when the
//! render loop calls [`OrbitControls::update`].

use glam::Vec2;

use crate::gpu::Camera;

/// Accumulates pointer gestures and applies them to a camera.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Radians per pixel of drag.
    pub rotate_speed: f32,
    /// Zoom factor per scroll line.
    pub zoom_speed: f32,
    /// World units per pixel per unit of distance.
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Pitch limit in radians, keeps the camera off the poles.
    pub max_pitch: f32,
    pending_rotate: Vec2,
    pending_pan: Vec2,
    pending_zoom: f32,
}

impl OrbitControls {
    pub fn new() -> Self {
        Self {
            rotate_speed: 0.005,
            zoom_speed: 0.95,
            pan_speed: 0.001,
            min_distance: 10.0,
            max_distance: 1500.0,
            max_pitch: 1.5,
            pending_rotate: Vec2::ZERO,
            pending_pan: Vec2::ZERO,
            pending_zoom: 0.0,
        }
    }

    /// Queue an orbit by a drag of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.pending_rotate += delta;
    }

    /// Queue a pan by a drag of `delta` pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.pending_pan += delta;
    }

    /// Queue a zoom. Positive values move closer.
    pub fn zoom(&mut self, scroll: f32) {
        self.pending_zoom += scroll;
    }

    /// Whether there is input waiting to be applied.
    pub fn has_pending(&self) -> bool {
        self.pending_rotate != Vec2::ZERO || self.pending_pan != Vec2::ZERO || self.pending_zoom != 0.0
    }

    /// Apply all queued input to `camera` and clear it.
    ///
    /// Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.has_pending() {
            return false;
        }

        camera.yaw -= self.pending_rotate.x * self.rotate_speed;
        camera.pitch = (camera.pitch + self.pending_rotate.y * self.rotate_speed)
            .clamp(-self.max_pitch, self.max_pitch);

        if self.pending_pan != Vec2::ZERO {
            let (right, up) = camera.screen_axes();
            let scale = camera.distance * self.pan_speed;
            camera.target += (-right * self.pending_pan.x + up * self.pending_pan.y) * scale;
        }

        camera.distance = (camera.distance * self.zoom_speed.powf(self.pending_zoom))
            .clamp(self.min_distance, self.max_distance);

        self.pending_rotate = Vec2::ZERO;
        self.pending_pan = Vec2::ZERO;
        self.pending_zoom = 0.0;
        true
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}
