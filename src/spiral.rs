//! The spiral transform.
//!
//! Every frame each particle's position is computed from scratch:
//!
//! 1. Place it on its ring's ellipse (`radius_x = ring * base_radius`,
//!    `radius_y = 0.4 * radius_x`) at `slot * angle_increment + t`.
//! 2. Add the particle's random x/y offset.
//! 3. Rotate the result by `ring * 0.15 - t`. The opposite sign of `t`
//!    between the two steps is what winds the rings into arms.
//!
//! The GPU does this in the vertex shader (see [`crate::shader`]). The CPU
//! kernel here follows the same math and is used for tests and benchmarks.

use glam::{Mat2, Vec2, Vec3};
use rayon::prelude::*;

use crate::particle::Particle;

/// Elapsed milliseconds to shader time units.
pub const TIME_SCALE: f64 = 2.0e-5;

/// Ratio of the vertical to the horizontal ellipse radius.
pub const ELLIPSE_RATIO: f32 = 0.4;

/// Twist per ring. Larger values give looser arms.
pub const SPIRAL_TWIST: f32 = 0.15;

/// Convert elapsed wall-clock milliseconds to shader time.
#[inline]
pub fn scaled_time(elapsed_ms: f64) -> f32 {
    (elapsed_ms * TIME_SCALE) as f32
}

/// Constants of the transform shared by every particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralParams {
    /// Radius step between rings.
    pub base_radius: f32,
    /// Angle between neighbouring slots on a ring.
    pub angle_increment: f32,
}

impl SpiralParams {
    /// Parameters for rings of `particles_per_ring` slots.
    ///
    /// `particles_per_ring` must be at least 1.
    pub fn new(base_radius: f32, particles_per_ring: u32) -> Self {
        Self {
            base_radius,
            angle_increment: std::f32::consts::TAU / particles_per_ring as f32,
        }
    }

    /// World-space position of `particle` at `scaled_time`, before the global spin.
    pub fn position(&self, particle: &Particle, scaled_time: f32) -> Vec3 {
        let ci = particle.ring_index as f32;
        let cj = particle.slot_index as f32;

        let radius_x = ci * self.base_radius;
        let radius_y = radius_x * ELLIPSE_RATIO;

        let angle = cj * self.angle_increment + scaled_time;
        let on_ring = Vec2::new(angle.cos() * radius_x, angle.sin() * radius_y);
        let world = on_ring + particle.base_xy();

        let twist = Mat2::from_angle(ci * SPIRAL_TWIST - scaled_time);
        let rotated = twist * world;

        Vec3::new(rotated.x, rotated.y, particle.base_position[2])
    }
}

/// Evaluate the transform for every particle in parallel.
///
/// The output is in the same order as `particles`.
pub fn spiral_positions(particles: &[Particle], params: &SpiralParams, scaled_time: f32) -> Vec<Vec3> {
    particles
        .par_iter()
        .map(|p| params.position(p, scaled_time))
        .collect()
}

/// Rotate a sprite texture coordinate (`[0, 1]²`) about the sprite centre.
pub fn rotate_sprite_uv(uv: Vec2, angle: f32) -> Vec2 {
    let center = Vec2::splat(0.5);
    Mat2::from_angle(angle) * (uv - center) + center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalaxyConfig;
    use crate::particle::ParticleBuffer;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    fn particle(ring: u32, slot: u32, base: [f32; 3]) -> Particle {
        Particle {
            base_position: base,
            color: [1.0; 3],
            size: 10.0,
            rotation: 0.0,
            growth_scale: 0.001,
            ring_index: ring,
            slot_index: slot,
        }
    }

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_scaled_time() {
        assert_eq!(scaled_time(0.0), 0.0);
        assert!((scaled_time(50_000.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_angle_increment() {
        let params = SpiralParams::new(5.0, 1000);
        assert!((params.angle_increment - TAU / 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_time_zero_collapse() {
        let params = SpiralParams::new(5.0, 1000);
        let p = particle(7, 123, [1.5, -2.0, 3.0]);

        let ci = 7.0_f32;
        let a = 123.0 * params.angle_increment;
        let x = a.cos() * ci * 5.0 + 1.5;
        let y = a.sin() * ci * 5.0 * 0.4 - 2.0;
        let t = ci * 0.15;
        let expected = Vec3::new(x * t.cos() - y * t.sin(), x * t.sin() + y * t.cos(), 3.0);

        assert!(approx(params.position(&p, 0.0), expected));
    }

    #[test]
    fn test_transform_is_pure() {
        let params = SpiralParams::new(5.0, 1000);
        let p = particle(42, 500, [3.0, 4.0, -5.0]);
        let a = params.position(&p, 0.75);
        let b = params.position(&p, 0.75);
        assert_eq!(a, b);
    }

    #[test]
    fn test_depth_is_untouched() {
        let params = SpiralParams::new(5.0, 1000);
        let p = particle(3, 9, [0.0, 0.0, -17.25]);
        for t in [0.0, 0.3, 12.0] {
            assert_eq!(params.position(&p, t).z, -17.25);
        }
    }

    #[test]
    fn test_rings_move_over_time() {
        let params = SpiralParams::new(5.0, 1000);
        let p = particle(30, 250, [2.0, -1.0, 0.5]);
        let at_zero = params.position(&p, 0.0);
        let later = params.position(&p, 0.5);
        assert!(!approx(at_zero, later));
        assert_eq!(at_zero.z, later.z);
    }

    #[test]
    fn test_slot_quarter_turn() {
        // Ring 1, slot 1 of 4 sits at a quarter turn: (0, radius_y) before the twist.
        let params = SpiralParams::new(5.0, 4);
        let p = particle(1, 1, [0.0; 3]);
        let twist = 0.15_f32;
        let y = 5.0 * 0.4;
        let expected = Vec3::new(-y * twist.sin(), y * twist.cos(), 0.0);
        assert!(approx(params.position(&p, 0.0), expected));
        assert!((params.angle_increment - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = GalaxyConfig::new()
            .with_ring_count(20)
            .with_particles_per_ring(100)
            .with_seed(9);
        let buffer = ParticleBuffer::from_config(&config).unwrap();
        let params = config.spiral_params();

        let parallel = spiral_positions(buffer.as_slice(), &params, 0.4);
        assert_eq!(parallel.len(), buffer.len());
        for (p, pos) in buffer.as_slice().iter().zip(&parallel) {
            assert_eq!(*pos, params.position(p, 0.4));
        }
    }

    #[test]
    fn test_sprite_uv_rotation_keeps_center() {
        let center = Vec2::splat(0.5);
        assert!((rotate_sprite_uv(center, 1.234) - center).length() < 1e-6);

        let flipped = rotate_sprite_uv(Vec2::new(1.0, 0.5), PI);
        assert!((flipped - Vec2::new(0.0, 0.5)).length() < 1e-5);

        let unchanged = rotate_sprite_uv(Vec2::new(0.2, 0.9), 0.0);
        assert!((unchanged - Vec2::new(0.2, 0.9)).length() < 1e-6);
    }
}
