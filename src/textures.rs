//! Sprite texture loading.
//!
//! Every particle is drawn with the same sprite image. It is fetched once at
//! startup on a background thread and installed whenever it arrives; until
//! then (or forever, if the fetch fails) particles are drawn with a blank
//! texture.
//!
//! # Supported Formats
//!
//! - PNG (recommended)
//! - JPEG

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use image::imageops::FilterType;

use crate::error::TextureError;

/// Largest sprite response body accepted over HTTP.
pub const MAX_SPRITE_BYTES: u64 = 10 * 1024 * 1024;

/// Filter mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Smooth linear filtering (default).
    #[default]
    Linear,
    /// Sharp nearest-neighbor filtering. Good for pixel art.
    Nearest,
}

impl From<FilterMode> for wgpu::FilterMode {
    fn from(mode: FilterMode) -> Self {
        match mode {
            FilterMode::Linear => wgpu::FilterMode::Linear,
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
        }
    }
}

/// Decoded RGBA8 image plus sampling settings.
#[derive(Debug, Clone)]
pub struct TextureConfig {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// Filter mode for magnification/minification.
    pub filter: FilterMode,
}

impl TextureConfig {
    /// Decode an encoded image (PNG, JPEG) from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
            filter: FilterMode::Linear,
        })
    }

    /// Load and decode an image file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Create a solid color texture (1x1 pixel).
    pub fn solid(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            data: vec![r, g, b, a],
            width: 1,
            height: 1,
            filter: FilterMode::Nearest,
        }
    }

    /// Fully transparent 1x1 texture used before the sprite arrives.
    pub fn blank() -> Self {
        Self::solid(0, 0, 0, 0)
    }

    /// Check that `data` holds exactly `width * height` RGBA pixels.
    pub fn validate(&self) -> Result<(), TextureError> {
        let expected = self.width as u64 * self.height as u64 * 4;
        if self.width == 0 || self.height == 0 || self.data.len() as u64 != expected {
            return Err(TextureError::Malformed {
                width: self.width,
                height: self.height,
                len: self.data.len(),
            });
        }
        Ok(())
    }

    /// Downscale so neither side exceeds `max_dimension`, keeping the aspect ratio.
    ///
    /// Textures that already fit are returned unchanged.
    pub fn fit_within(self, max_dimension: u32) -> Result<Self, TextureError> {
        self.validate()?;
        if self.width <= max_dimension && self.height <= max_dimension {
            return Ok(self);
        }

        let max_dimension = max_dimension.max(1);
        let scale = max_dimension as f64 / self.width.max(self.height) as f64;
        let width = ((self.width as f64 * scale).round() as u32).clamp(1, max_dimension);
        let height = ((self.height as f64 * scale).round() as u32).clamp(1, max_dimension);

        let malformed = TextureError::Malformed {
            width: self.width,
            height: self.height,
            len: self.data.len(),
        };
        let filter = self.filter;
        let img = image::RgbaImage::from_raw(self.width, self.height, self.data).ok_or(malformed)?;
        let resized = image::imageops::resize(&img, width, height, FilterType::Triangle);

        Ok(Self {
            data: resized.into_raw(),
            width,
            height,
            filter,
        })
    }

    /// Bytes per row of pixel data.
    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

/// Where the sprite image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureSource {
    /// Fetch over HTTP(S).
    Url(String),
    /// Read from the local filesystem.
    Path(PathBuf),
}

impl TextureSource {
    /// Fetch and decode the image. Blocks until done.
    pub fn load(&self) -> Result<TextureConfig, TextureError> {
        match self {
            TextureSource::Url(url) => fetch(&ureq::agent(), url, MAX_SPRITE_BYTES),
            TextureSource::Path(path) => TextureConfig::from_file(path),
        }
    }
}

/// Download and decode an image, reading at most `limit` bytes of body.
fn fetch(agent: &ureq::Agent, url: &str, limit: u64) -> Result<TextureConfig, TextureError> {
    let mut response = agent.get(url).call()?;
    let bytes = response.body_mut().with_config().limit(limit).read_to_vec()?;
    TextureConfig::from_bytes(&bytes)
}

impl std::fmt::Display for TextureSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureSource::Url(url) => write!(f, "{}", url),
            TextureSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Strings starting with `http://` or `https://` are URLs, anything else a path.
impl From<&str> for TextureSource {
    fn from(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            TextureSource::Url(s.to_string())
        } else {
            TextureSource::Path(PathBuf::from(s))
        }
    }
}

impl From<String> for TextureSource {
    fn from(s: String) -> Self {
        TextureSource::from(s.as_str())
    }
}

impl From<&Path> for TextureSource {
    fn from(path: &Path) -> Self {
        TextureSource::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for TextureSource {
    fn from(path: PathBuf) -> Self {
        TextureSource::Path(path)
    }
}

/// One-shot background load of a [`TextureSource`].
///
/// The render loop polls it each frame; it never blocks.
#[derive(Debug)]
pub struct TextureLoader {
    receiver: Option<Receiver<Result<TextureConfig, TextureError>>>,
}

impl TextureLoader {
    /// Start loading `source` on a background thread.
    pub fn spawn(source: TextureSource) -> Self {
        let (sender, receiver) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("sprite-texture".into())
            .spawn(move || {
                // The receiver may be gone if the window closed first.
                let _ = sender.send(source.load());
            });

        match spawned {
            Ok(_) => Self {
                receiver: Some(receiver),
            },
            Err(e) => {
                log::warn!("Could not start texture loader thread: {}", e);
                Self { receiver: None }
            }
        }
    }

    /// Whether the load is still in flight.
    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Take the result if the load has finished.
    ///
    /// Returns `Some` exactly once.
    pub fn poll(&mut self) -> Option<Result<TextureConfig, TextureError>> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(result) => {
                self.receiver = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::warn!("Texture loader thread exited without a result");
                self.receiver = None;
                None
            }
        }
    }
}
