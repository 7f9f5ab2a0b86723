//! # Galaxy
//!
//! A spiral galaxy of point sprites, animated entirely on the GPU.
//!
//! The galaxy is built from overlapping elliptical rings. Each particle gets
//! its attributes (ring, slot, jitter, color, size, sprite rotation) once at
//! startup; from then on its position is a closed-form function of those
//! attributes and the elapsed time, evaluated in the vertex shader. Nothing
//! is simulated and nothing is written back.
//!
//! ## Quick Start
//!
//! ```ignore
//! use galaxy::prelude::*;
//!
//! fn main() -> Result<(), GalaxyError> {
//!     Galaxy::new()
//!         .with_config(GalaxyConfig::new().with_ring_count(60).with_particles_per_ring(800))
//!         .run()
//! }
//! ```
//!
//! ## Controls
//!
//! | Input | Effect |
//! |-------|--------|
//! | Pointer left/right of centre | Spin the galaxy |
//! | Left drag | Orbit the camera |
//! | Right drag | Pan |
//! | Wheel | Zoom |
//! | Escape | Quit |
//!
//! ## Without a window
//!
//! [`ParticleBuffer`] and [`spiral_positions`] run the same generation and
//! transform on the CPU, which is handy for tests and offline tooling.

mod app;
pub mod config;
pub mod controls;
pub mod error;
mod gpu;
pub mod input;
pub mod particle;
pub mod scene;
pub mod shader;
pub mod spiral;
pub mod textures;
pub mod time;

pub use app::Galaxy;
pub use config::{GalaxyConfig, DEFAULT_SPRITE_URL};
pub use controls::OrbitControls;
pub use error::{ConfigError, GalaxyError, GpuError, TextureError};
pub use glam::{Vec2, Vec3};
pub use gpu::Camera;
pub use input::{pointer_ndc, Input, MouseButton};
pub use particle::{Particle, ParticleBuffer};
pub use scene::{FrameContext, SceneState};
pub use spiral::{rotate_sprite_uv, scaled_time, spiral_positions, SpiralParams};
pub use textures::{FilterMode, TextureConfig, TextureLoader, TextureSource};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use galaxy::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::Galaxy;
    pub use crate::config::GalaxyConfig;
    pub use crate::error::GalaxyError;
    pub use crate::particle::{Particle, ParticleBuffer};
    pub use crate::spiral::SpiralParams;
    pub use crate::textures::TextureSource;
    pub use crate::{Vec2, Vec3};
}
