//! Error types for the galaxy renderer.
//!
//! This module provides error types for configuration, GPU initialization,
//! sprite texture loading and running the render loop.

use std::fmt;

/// Errors raised when a [`GalaxyConfig`](crate::GalaxyConfig) cannot produce a galaxy.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The galaxy has no rings.
    NoRings,
    /// Rings hold no particles, so the angular step between slots is undefined.
    EmptyRing,
    /// `ring_count * particles_per_ring` does not fit in the particle buffer.
    CapacityExceeded {
        /// Number of particles the rings would need.
        requested: u64,
        /// Configured maximum buffer capacity.
        capacity: u32,
    },
    /// The base ring radius is zero, negative or not finite.
    InvalidRadius(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoRings => write!(f, "Galaxy must have at least one ring"),
            ConfigError::EmptyRing => write!(f, "Each ring must hold at least one particle"),
            ConfigError::CapacityExceeded { requested, capacity } => write!(
                f,
                "Rings need {} particles but the buffer capacity is {}",
                requested, capacity
            ),
            ConfigError::InvalidRadius(r) => {
                write!(f, "Base ring radius must be positive and finite, got {}", r)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur while resolving the sprite texture.
#[derive(Debug)]
pub enum TextureError {
    /// Failed to decode the image.
    ImageLoad(image::ImageError),
    /// Failed to read the file or the response body.
    Io(std::io::Error),
    /// The HTTP request failed.
    Http(ureq::Error),
    /// Pixel data does not match the stated dimensions.
    Malformed { width: u32, height: u32, len: usize },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::ImageLoad(e) => write!(f, "Failed to load image: {}", e),
            TextureError::Io(e) => write!(f, "Failed to read texture data: {}", e),
            TextureError::Http(e) => write!(f, "Failed to fetch texture: {}", e),
            TextureError::Malformed { width, height, len } => write!(
                f,
                "Texture of {}x{} pixels cannot hold {} bytes of RGBA data",
                width, height, len
            ),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::ImageLoad(e) => Some(e),
            TextureError::Io(e) => Some(e),
            TextureError::Http(e) => Some(e),
            TextureError::Malformed { .. } => None,
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::ImageLoad(e)
    }
}

impl From<std::io::Error> for TextureError {
    fn from(e: std::io::Error) -> Self {
        TextureError::Io(e)
    }
}

impl From<ureq::Error> for TextureError {
    fn from(e: ureq::Error) -> Self {
        TextureError::Http(e)
    }
}

/// Errors that can occur when running the galaxy.
#[derive(Debug)]
pub enum GalaxyError {
    /// The configuration was rejected before any buffers were built.
    Config(ConfigError),
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for GalaxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalaxyError::Config(e) => write!(f, "Invalid configuration: {}", e),
            GalaxyError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            GalaxyError::Window(e) => write!(f, "Failed to create window: {}", e),
            GalaxyError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for GalaxyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GalaxyError::Config(e) => Some(e),
            GalaxyError::EventLoop(e) => Some(e),
            GalaxyError::Window(e) => Some(e),
            GalaxyError::Gpu(e) => Some(e),
        }
    }
}

impl From<ConfigError> for GalaxyError {
    fn from(e: ConfigError) -> Self {
        GalaxyError::Config(e)
    }
}

impl From<winit::error::EventLoopError> for GalaxyError {
    fn from(e: winit::error::EventLoopError) -> Self {
        GalaxyError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for GalaxyError {
    fn from(e: winit::error::OsError) -> Self {
        GalaxyError::Window(e)
    }
}

impl From<GpuError> for GalaxyError {
    fn from(e: GpuError) -> Self {
        GalaxyError::Gpu(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_capacity_message_names_both_sizes() {
        let err = ConfigError::CapacityExceeded {
            requested: 101_000,
            capacity: 100_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("101000"));
        assert!(msg.contains("100000"));
    }

    #[test]
    fn test_galaxy_error_wraps_config_source() {
        let err = GalaxyError::from(ConfigError::EmptyRing);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_texture_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = TextureError::from(io);
        assert!(matches!(err, TextureError::Io(_)));
        assert!(err.source().is_some());
    }
}
