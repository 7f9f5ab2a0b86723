//! Camera for 3D orbit view.

use glam::{Mat4, Vec3};

/// Perspective orbit camera.
///
/// The default looks straight down the z axis at the galaxy plane from
/// 500 units away.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    aspect: f32,
}

impl Camera {
    /// Create a new camera with default positioning.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 500.0,
            target: Vec3::ZERO,
            fov_y: 50.0,
            near: 0.1,
            far: 2000.0,
            aspect: 1.0,
        }
    }

    /// Update the aspect ratio for a viewport of `width` x `height` pixels.
    ///
    /// Zero-sized viewports are ignored and leave the projection as it was.
    /// Returns whether the aspect ratio was updated.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.aspect = width as f32 / height as f32;
        true
    }

    /// Current aspect ratio (width / height).
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Calculate the projection matrix for the current aspect ratio.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }

    /// Combined projection * view.
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit vectors pointing right and up on screen, in world space.
    pub fn screen_axes(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_down_z() {
        let camera = Camera::new();
        let pos = camera.position();
        assert!(pos.x.abs() < 1e-4);
        assert!(pos.y.abs() < 1e-4);
        assert!((pos.z - 500.0).abs() < 1e-4);
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut a = Camera::new();
        assert!(a.set_viewport(800, 600));
        assert!(a.set_viewport(1920, 1080));
        assert!(a.set_viewport(1920, 1080));

        let mut b = Camera::new();
        b.set_viewport(1920, 1080);

        assert_eq!(a.aspect(), b.aspect());
        assert_eq!(a.projection_matrix(), b.projection_matrix());
        assert!((a.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_height_ignored() {
        let mut camera = Camera::new();
        camera.set_viewport(800, 600);
        assert!(!camera.set_viewport(800, 0));
        assert!(!camera.set_viewport(0, 600));
        assert!((camera.aspect() - 800.0 / 600.0).abs() < 1e-6);
        assert!(camera.projection_matrix().is_finite());
    }

    #[test]
    fn test_origin_projects_to_center() {
        let mut camera = Camera::new();
        camera.set_viewport(1280, 720);
        let clip = camera.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth));
    }

    #[test]
    fn test_screen_axes_orthonormal() {
        let mut camera = Camera::new();
        camera.yaw = 0.7;
        camera.pitch = 0.3;
        let (right, up) = camera.screen_axes();
        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!((up.length() - 1.0).abs() < 1e-5);
        assert!(right.dot(up).abs() < 1e-5);
    }
}
