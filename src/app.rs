//! Galaxy builder and runner

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::GalaxyConfig;
use crate::controls::OrbitControls;
use crate::error::GalaxyError;
use crate::gpu::GpuState;
use crate::input::{Input, MouseButton};
use crate::particle::ParticleBuffer;
use crate::scene::SceneState;
use crate::textures::TextureLoader;
use crate::time::Time;

/// A galaxy window builder.
///
/// Use method chaining to configure, then call `.run()` to start.
pub struct Galaxy {
    config: GalaxyConfig,
    title: String,
    window_size: (u32, u32),
}

impl Galaxy {
    /// Create a galaxy with default settings.
    pub fn new() -> Self {
        Self {
            config: GalaxyConfig::new(),
            title: "Galaxy".to_string(),
            window_size: (1280, 720),
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: GalaxyConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Open the window and run until it is closed.
    ///
    /// Particles are generated and the sprite fetch is started before the
    /// window opens.
    pub fn run(self) -> Result<(), GalaxyError> {
        let particles = ParticleBuffer::from_config(&self.config)?;
        log::info!(
            "Generated {} particles ({} rings x {})",
            particles.len(),
            particles.ring_count(),
            particles.particles_per_ring()
        );

        log::info!("Loading sprite from {}", self.config.sprite);
        let loader = TextureLoader::spawn(self.config.sprite.clone());

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self, particles, loader);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Galaxy {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    galaxy: Galaxy,
    particles: ParticleBuffer,
    loader: TextureLoader,
    input: Input,
    controls: OrbitControls,
    time: Time,
    scene: SceneState,
    error: Option<GalaxyError>,
}

impl App {
    fn new(galaxy: Galaxy, particles: ParticleBuffer, loader: TextureLoader) -> Self {
        Self {
            window: None,
            gpu_state: None,
            galaxy,
            particles,
            loader,
            input: Input::new(),
            controls: OrbitControls::new(),
            time: Time::new(),
            scene: SceneState::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), GalaxyError> {
        let (width, height) = self.galaxy.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.galaxy.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let size = window.inner_size();
        self.input.set_window_size(size.width, size.height);
        self.window = Some(window.clone());

        let gpu_state = pollster::block_on(GpuState::new(
            window,
            self.particles.as_slice(),
            self.galaxy.config.spiral_params(),
        ))?;
        self.gpu_state = Some(gpu_state);
        // Animation time starts with the first frame, not with startup work.
        self.time = Time::new();
        Ok(())
    }

    /// Run one tick of the render loop.
    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };

        let elapsed_ms = self.time.update();
        let frame = self
            .scene
            .advance(elapsed_ms, self.input.mouse_ndc(), self.time.frame());

        if let Some(result) = self.loader.poll() {
            match result {
                Ok(texture) => {
                    log::info!("Sprite loaded ({}x{})", texture.width, texture.height);
                    if let Err(e) = gpu_state.set_sprite_texture(texture) {
                        log::warn!("Sprite rejected, drawing without it: {}", e);
                    }
                }
                Err(e) => log::warn!("Sprite unavailable, drawing without it: {}", e),
            }
        }

        let drag = self.input.mouse_delta();
        if drag != Vec2::ZERO {
            if self.input.mouse_held(MouseButton::Left) {
                self.controls.rotate(drag);
            } else if self.input.mouse_held(MouseButton::Right) {
                self.controls.pan(drag);
            }
        }
        let scroll = self.input.scroll_delta();
        if scroll != 0.0 {
            self.controls.zoom(scroll);
        }
        self.controls.update(&mut gpu_state.camera);

        match gpu_state.render(&frame) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu_state.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }

        self.input.end_frame();

        if let Some(window) = &self.window {
            if self.time.fps_refreshed() {
                window.set_title(&format!("{} | {:.0} FPS", self.galaxy.title, self.time.fps()));
            }
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("{}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.set_scale_factor(scale_factor);
                }
            }
            WindowEvent::RedrawRequested => {
                self.tick(event_loop);
            }
            _ => {}
        }
    }
}
