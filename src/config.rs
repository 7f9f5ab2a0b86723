//! Galaxy configuration.
//!
//! Every knob has a default matching the classic look: 100 rings of 1000
//! stars each, filling a 100 000 particle buffer exactly.
//!
//! ```ignore
//! use galaxy::prelude::*;
//!
//! let config = GalaxyConfig::new()
//!     .with_ring_count(40)
//!     .with_particles_per_ring(500)
//!     .with_seed(7);
//! config.validate()?;
//! ```

use crate::error::ConfigError;
use crate::spiral::SpiralParams;
use crate::textures::TextureSource;

/// Sprite image used when no other source is configured.
pub const DEFAULT_SPRITE_URL: &str = "https://klevron.github.io/codepen/misc/star.png";

/// Configuration for a galaxy.
#[derive(Debug, Clone)]
pub struct GalaxyConfig {
    /// Number of concentric rings.
    pub ring_count: u32,
    /// Number of particles on each ring.
    pub particles_per_ring: u32,
    /// Upper bound on the particle buffer size.
    pub max_capacity: u32,
    /// Radius step between consecutive rings.
    pub base_radius: f32,
    /// Where the point sprite image comes from.
    pub sprite: TextureSource,
    /// Seed for attribute generation. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl GalaxyConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self {
            ring_count: 100,
            particles_per_ring: 1000,
            max_capacity: 100_000,
            base_radius: 5.0,
            sprite: TextureSource::Url(DEFAULT_SPRITE_URL.to_string()),
            seed: None,
        }
    }

    /// Set the number of rings.
    pub fn with_ring_count(mut self, count: u32) -> Self {
        self.ring_count = count;
        self
    }

    /// Set the number of particles on each ring.
    pub fn with_particles_per_ring(mut self, count: u32) -> Self {
        self.particles_per_ring = count;
        self
    }

    /// Set the maximum particle buffer capacity.
    pub fn with_max_capacity(mut self, capacity: u32) -> Self {
        self.max_capacity = capacity;
        self
    }

    /// Set the radius step between rings.
    pub fn with_base_radius(mut self, radius: f32) -> Self {
        self.base_radius = radius;
        self
    }

    /// Set the sprite texture source.
    pub fn with_sprite(mut self, source: impl Into<TextureSource>) -> Self {
        self.sprite = source.into();
        self
    }

    /// Pin the random seed so generation is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of particles the rings need.
    ///
    /// Only meaningful after [`validate`](Self::validate) succeeded.
    pub fn particle_count(&self) -> u32 {
        self.ring_count.saturating_mul(self.particles_per_ring)
    }

    /// Check that the configuration describes a drawable galaxy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ring_count == 0 {
            return Err(ConfigError::NoRings);
        }
        if self.particles_per_ring == 0 {
            return Err(ConfigError::EmptyRing);
        }
        let requested = self.ring_count as u64 * self.particles_per_ring as u64;
        if requested > self.max_capacity as u64 {
            return Err(ConfigError::CapacityExceeded {
                requested,
                capacity: self.max_capacity,
            });
        }
        if !self.base_radius.is_finite() || self.base_radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.base_radius));
        }
        Ok(())
    }

    /// Parameters of the per-frame spiral transform.
    pub fn spiral_params(&self) -> SpiralParams {
        SpiralParams::new(self.base_radius, self.particles_per_ring.max(1))
    }
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_capacity_exactly() {
        let config = GalaxyConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.particle_count(), config.max_capacity);
    }

    #[test]
    fn test_zero_rings_rejected() {
        let config = GalaxyConfig::new().with_ring_count(0);
        assert_eq!(config.validate(), Err(ConfigError::NoRings));
    }

    #[test]
    fn test_empty_ring_rejected() {
        let config = GalaxyConfig::new().with_particles_per_ring(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyRing));
    }

    #[test]
    fn test_over_capacity_rejected() {
        let config = GalaxyConfig::new().with_ring_count(101);
        assert_eq!(
            config.validate(),
            Err(ConfigError::CapacityExceeded {
                requested: 101_000,
                capacity: 100_000,
            })
        );
    }

    #[test]
    fn test_spare_capacity_is_fine() {
        let config = GalaxyConfig::new().with_ring_count(10);
        assert!(config.validate().is_ok());
        assert_eq!(config.particle_count(), 10_000);
    }

    #[test]
    fn test_overflowing_product_rejected() {
        let config = GalaxyConfig::new()
            .with_ring_count(u32::MAX)
            .with_particles_per_ring(u32::MAX)
            .with_max_capacity(u32::MAX);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_bad_radius_rejected() {
        for r in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = GalaxyConfig::new().with_base_radius(r);
            assert!(matches!(config.validate(), Err(ConfigError::InvalidRadius(_))));
        }
    }

    #[test]
    fn test_spiral_params_angle_increment() {
        let params = GalaxyConfig::new().with_particles_per_ring(4).spiral_params();
        assert!((params.angle_increment - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(params.base_radius, 5.0);
    }
}
