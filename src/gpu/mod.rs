pub mod camera;

use std::mem::{offset_of, size_of};
use std::sync::Arc;

use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::window::Window;

pub use camera::Camera;

use crate::error::{GpuError, TextureError};
use crate::particle::Particle;
use crate::scene::FrameContext;
use crate::shader::{shader_source, Uniforms};
use crate::spiral::SpiralParams;
use crate::textures::TextureConfig;

/// Vertices per particle quad.
const QUAD_VERTICES: u32 = 6;

/// Instance-rate vertex attributes read from [`Particle`].
///
/// `growth_scale` is left out; nothing in the shader reads it.
const PARTICLE_ATTRIBUTES: [wgpu::VertexAttribute; 6] = [
    wgpu::VertexAttribute {
        offset: offset_of!(Particle, base_position) as wgpu::BufferAddress,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    },
    wgpu::VertexAttribute {
        offset: offset_of!(Particle, color) as wgpu::BufferAddress,
        shader_location: 1,
        format: wgpu::VertexFormat::Float32x3,
    },
    wgpu::VertexAttribute {
        offset: offset_of!(Particle, size) as wgpu::BufferAddress,
        shader_location: 2,
        format: wgpu::VertexFormat::Float32,
    },
    wgpu::VertexAttribute {
        offset: offset_of!(Particle, rotation) as wgpu::BufferAddress,
        shader_location: 3,
        format: wgpu::VertexFormat::Float32,
    },
    wgpu::VertexAttribute {
        offset: offset_of!(Particle, ring_index) as wgpu::BufferAddress,
        shader_location: 4,
        format: wgpu::VertexFormat::Uint32,
    },
    wgpu::VertexAttribute {
        offset: offset_of!(Particle, slot_index) as wgpu::BufferAddress,
        shader_location: 5,
        format: wgpu::VertexFormat::Uint32,
    },
];

/// Sprite texels are sampled as stored, without sRGB decoding.
const SPRITE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Additive blending: overlapping sprites brighten toward white.
const ADDITIVE_BLENDING: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    particle_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    texture_bind_group: wgpu::BindGroup,
    num_particles: u32,
    params: SpiralParams,
    pixel_ratio: f32,
    pub camera: Camera,
}

/// Choose a surface format that stores shader output unchanged.
///
/// Colors are blended and presented as written, so a linear (non-sRGB) format
/// is preferred. Falls back to the first supported format.
fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .find(|f| !f.is_srgb())
        .copied()
        .or_else(|| formats.first().copied())
}

/// Physical pixels per logical pixel, treating nonsense scale factors as 1.
fn pixel_ratio(scale_factor: f64) -> f32 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor as f32
    } else {
        1.0
    }
}

impl GpuState {
    pub async fn new(
        window: Arc<Window>,
        particles: &[Particle],
        params: SpiralParams,
    ) -> Result<Self, GpuError> {
        let size = window.inner_size();
        let pixel_ratio = pixel_ratio(window.scale_factor());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format =
            pick_surface_format(&surface_caps.formats).ok_or(GpuError::NoAdapter)?;
        log::debug!("Surface format {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut camera = Camera::new();
        camera.set_viewport(config.width, config.height);

        // Written once; the spiral transform never writes back.
        let particle_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Buffer"),
            contents: bytemuck::cast_slice(particles),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniforms = Uniforms::new(
            camera.view_proj(),
            0.0,
            Vec2::new(config.width as f32, config.height as f32),
            pixel_ratio,
            0.0,
            &params,
        );

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Sprite Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let texture_bind_group = create_sprite_bind_group(
            &device,
            &queue,
            &texture_bind_group_layout,
            &TextureConfig::blank(),
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Galaxy Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source().into()),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout, &texture_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: size_of::<Particle>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &PARTICLE_ATTRIBUTES,
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(ADDITIVE_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            // No depth test: particles are composited in generation order.
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_pipeline,
            particle_buffer,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group_layout,
            texture_bind_group,
            num_particles: particles.len() as u32,
            params,
            pixel_ratio,
            camera,
        })
    }

    /// Resize the surface and camera. Zero-sized windows are ignored.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.camera.set_viewport(new_size.width, new_size.height);
            log::debug!("Resized surface to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Track a change of the window's DPI scale factor.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.pixel_ratio = pixel_ratio(scale_factor);
        log::debug!("Pixel ratio is now {}", self.pixel_ratio);
    }

    /// Replace the sprite every particle is drawn with.
    ///
    /// Images larger than the device allows are downscaled first. On error
    /// the current sprite stays bound.
    pub fn set_sprite_texture(&mut self, texture: TextureConfig) -> Result<(), TextureError> {
        let max_dimension = self.device.limits().max_texture_dimension_2d;
        let (width, height) = (texture.width, texture.height);
        let texture = texture.fit_within(max_dimension)?;
        if (texture.width, texture.height) != (width, height) {
            log::warn!(
                "Sprite of {}x{} exceeds the {} pixel limit, downscaled to {}x{}",
                width,
                height,
                max_dimension,
                texture.width,
                texture.height
            );
        }

        self.texture_bind_group = create_sprite_bind_group(
            &self.device,
            &self.queue,
            &self.texture_bind_group_layout,
            &texture,
        );
        Ok(())
    }

    fn update_uniforms(&mut self, frame: &FrameContext) {
        let viewport = Vec2::new(self.config.width as f32, self.config.height as f32);
        let uniforms = Uniforms::new(
            self.camera.view_proj(),
            frame.spin,
            viewport,
            self.pixel_ratio,
            frame.scaled_time,
            &self.params,
        );
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
    }

    pub fn render(&mut self, frame: &FrameContext) -> Result<(), wgpu::SurfaceError> {
        self.update_uniforms(frame);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_bind_group(1, &self.texture_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.particle_buffer.slice(..));
            render_pass.draw(0..QUAD_VERTICES, 0..self.num_particles);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Reconfigure the surface at its current size, e.g. after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

fn create_sprite_bind_group(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    texture: &TextureConfig,
) -> wgpu::BindGroup {
    let size = wgpu::Extent3d {
        width: texture.width,
        height: texture.height,
        depth_or_array_layers: 1,
    };

    let gpu_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Sprite Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: SPRITE_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &gpu_texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &texture.data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(texture.bytes_per_row()),
            rows_per_image: Some(texture.height),
        },
        size,
    );

    let view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());

    let filter = texture.filter.into();
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Sprite Sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: filter,
        min_filter: filter,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Sprite Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_attributes_fit_stride() {
        let stride = size_of::<Particle>() as u64;
        for attr in &PARTICLE_ATTRIBUTES {
            assert!(attr.offset + attr.format.size() <= stride);
            assert_eq!(attr.offset % 4, 0);
        }
    }

    #[test]
    fn test_shader_locations_unique() {
        let mut locations: Vec<u32> = PARTICLE_ATTRIBUTES.iter().map(|a| a.shader_location).collect();
        locations.sort_unstable();
        locations.dedup();
        assert_eq!(locations, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_surface_format_prefers_linear() {
        use wgpu::TextureFormat::*;
        assert_eq!(pick_surface_format(&[Bgra8UnormSrgb, Bgra8Unorm]), Some(Bgra8Unorm));
        assert_eq!(pick_surface_format(&[Rgba8Unorm, Rgba8UnormSrgb]), Some(Rgba8Unorm));
        // sRGB-only surfaces still work
        assert_eq!(pick_surface_format(&[Bgra8UnormSrgb]), Some(Bgra8UnormSrgb));
        assert_eq!(pick_surface_format(&[]), None);
    }

    #[test]
    fn test_sprite_sampled_without_gamma() {
        assert!(!SPRITE_FORMAT.is_srgb());
    }

    #[test]
    fn test_pixel_ratio() {
        assert_eq!(pixel_ratio(2.0), 2.0);
        assert_eq!(pixel_ratio(1.25), 1.25);
        assert_eq!(pixel_ratio(0.0), 1.0);
        assert_eq!(pixel_ratio(f64::NAN), 1.0);
    }
}
