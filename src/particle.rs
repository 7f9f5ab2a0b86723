//! Static per-particle attributes.
//!
//! The galaxy is a set of concentric elliptical rings. Each particle knows
//! which ring it belongs to and its slot on that ring; everything else
//! (jitter, color, size, sprite rotation) is drawn once at startup and never
//! changes. Positions are never stored: the spiral transform derives them
//! every frame from these attributes and the elapsed time.

use std::f32::consts::PI;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GalaxyConfig;
use crate::error::ConfigError;

/// Half-width of the x/y jitter around the ring ellipse.
const XY_SPREAD: f32 = 10.0;
const SIZE_RANGE: (f32, f32) = (5.0, 20.0);
const GROWTH_SCALE_RANGE: (f32, f32) = (0.0001, 0.005);

/// One galaxy particle, laid out exactly as the vertex buffer expects it.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Random offset added to the ring position. `z` is the particle's depth.
    pub base_position: [f32; 3],
    /// RGB color, each channel in `[0, 1]`.
    pub color: [f32; 3],
    /// Sprite size in pixels.
    pub size: f32,
    /// Sprite rotation in radians, `[0, π]`.
    pub rotation: f32,
    /// Generated but not read by the renderer.
    pub growth_scale: f32,
    /// Ring this particle sits on, starting at 1.
    pub ring_index: u32,
    /// Slot on the ring, starting at 1.
    pub slot_index: u32,
}

impl Particle {
    /// `x`/`y` of the base position.
    #[inline]
    pub fn base_xy(&self) -> Vec2 {
        Vec2::new(self.base_position[0], self.base_position[1])
    }
}

/// The immutable particle population of a galaxy.
///
/// Built once; afterwards only shared access is handed out.
#[derive(Debug, Clone)]
pub struct ParticleBuffer {
    particles: Box<[Particle]>,
    ring_count: u32,
    particles_per_ring: u32,
}

impl ParticleBuffer {
    /// Generate the population described by `config` using `rng`.
    ///
    /// Particles are ordered ring by ring: index `particles_per_ring * i + j`
    /// holds ring `i + 1`, slot `j + 1`.
    pub fn generate<R: Rng>(
        config: &GalaxyConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let rings = config.ring_count;
        let per_ring = config.particles_per_ring;
        let mut particles = Vec::with_capacity(config.particle_count() as usize);

        for i in 0..rings {
            // Depth spread shrinks as the ring index grows.
            let depth = (rings - i) as f32;
            for j in 0..per_ring {
                particles.push(Particle {
                    base_position: [
                        rng.gen_range(-XY_SPREAD..XY_SPREAD),
                        rng.gen_range(-XY_SPREAD..XY_SPREAD),
                        rng.gen_range(-depth..depth),
                    ],
                    color: [rng.gen(), rng.gen(), rng.gen()],
                    size: rng.gen_range(SIZE_RANGE.0..SIZE_RANGE.1),
                    growth_scale: rng.gen_range(GROWTH_SCALE_RANGE.0..GROWTH_SCALE_RANGE.1),
                    rotation: rng.gen_range(0.0..PI),
                    ring_index: i + 1,
                    slot_index: j + 1,
                });
            }
        }

        Ok(Self {
            particles: particles.into_boxed_slice(),
            ring_count: rings,
            particles_per_ring: per_ring,
        })
    }

    /// Generate the population for `config`, seeded from `config.seed` or OS entropy.
    pub fn from_config(config: &GalaxyConfig) -> Result<Self, ConfigError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::generate(config, &mut rng)
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the buffer holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of rings.
    #[inline]
    pub fn ring_count(&self) -> u32 {
        self.ring_count
    }

    /// Number of particles on each ring.
    #[inline]
    pub fn particles_per_ring(&self) -> u32 {
        self.particles_per_ring
    }

    /// All particles in generation order.
    #[inline]
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Raw bytes for uploading to a vertex buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }

    /// Particle at 1-based `ring` and `slot`, if it exists.
    pub fn get(&self, ring: u32, slot: u32) -> Option<&Particle> {
        if ring == 0 || slot == 0 || ring > self.ring_count || slot > self.particles_per_ring {
            return None;
        }
        let index = (ring - 1) as usize * self.particles_per_ring as usize + (slot - 1) as usize;
        self.particles.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn small_config() -> GalaxyConfig {
        GalaxyConfig::new()
            .with_ring_count(12)
            .with_particles_per_ring(50)
            .with_seed(42)
    }

    #[test]
    fn test_particle_layout() {
        assert_eq!(std::mem::size_of::<Particle>(), 44);
        assert_eq!(std::mem::offset_of!(Particle, color), 12);
        assert_eq!(std::mem::offset_of!(Particle, ring_index), 36);
        assert_eq!(std::mem::offset_of!(Particle, slot_index), 40);
    }

    #[test]
    fn test_indices_cover_every_pair_once() {
        let buffer = ParticleBuffer::from_config(&small_config()).unwrap();
        assert_eq!(buffer.len(), 12 * 50);

        let mut seen = HashSet::new();
        for p in buffer.as_slice() {
            assert!((1..=12).contains(&p.ring_index));
            assert!((1..=50).contains(&p.slot_index));
            assert!(seen.insert((p.ring_index, p.slot_index)));
        }
        assert_eq!(seen.len(), 600);
    }

    #[test]
    fn test_generation_order() {
        let buffer = ParticleBuffer::from_config(&small_config()).unwrap();
        let p = &buffer.as_slice()[50 * 3 + 7];
        assert_eq!(p.ring_index, 4);
        assert_eq!(p.slot_index, 8);
        assert_eq!(buffer.get(4, 8), Some(p));
        assert_eq!(buffer.get(0, 1), None);
        assert_eq!(buffer.get(13, 1), None);
        assert_eq!(buffer.get(1, 51), None);
    }

    #[test]
    fn test_attribute_ranges() {
        let buffer = ParticleBuffer::from_config(&small_config()).unwrap();
        for p in buffer.as_slice() {
            for c in p.color {
                assert!((0.0..=1.0).contains(&c));
            }
            assert!((5.0..=20.0).contains(&p.size));
            assert!((0.0..=PI).contains(&p.rotation));
            assert!((0.0001..=0.005).contains(&p.growth_scale));
            assert!(p.base_position[0].abs() <= 10.0);
            assert!(p.base_position[1].abs() <= 10.0);
        }
    }

    #[test]
    fn test_depth_shrinks_with_ring_index() {
        let buffer = ParticleBuffer::from_config(&small_config()).unwrap();
        for p in buffer.as_slice() {
            // ring_index = i + 1, so depth = ring_count - i = ring_count + 1 - ring_index
            let depth = (12 + 1 - p.ring_index) as f32;
            assert!(p.base_position[2].abs() <= depth);
        }
        // The last ring only spans [-1, 1]
        for slot in 1..=50 {
            assert!(buffer.get(12, slot).unwrap().base_position[2].abs() <= 1.0);
        }
    }

    #[test]
    fn test_full_default_galaxy_matches_capacity() {
        let config = GalaxyConfig::new().with_seed(1);
        let buffer = ParticleBuffer::from_config(&config).unwrap();
        assert_eq!(buffer.len(), 100_000);
        assert_eq!(buffer.len(), config.max_capacity as usize);
        assert_eq!(buffer.as_bytes().len(), 100_000 * 44);
        let last = buffer.as_slice().last().unwrap();
        assert_eq!((last.ring_index, last.slot_index), (100, 1000));
    }

    #[test]
    fn test_over_capacity_fails() {
        let config = GalaxyConfig::new().with_max_capacity(99_999);
        assert!(matches!(
            ParticleBuffer::from_config(&config),
            Err(ConfigError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = ParticleBuffer::from_config(&small_config()).unwrap();
        let b = ParticleBuffer::from_config(&small_config()).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());

        let c = ParticleBuffer::from_config(&small_config().with_seed(43)).unwrap();
        assert_ne!(a.as_slice(), c.as_slice());
    }
}
