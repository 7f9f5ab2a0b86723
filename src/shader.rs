//! WGSL program and the uniform block it reads.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

use crate::spiral::{SpiralParams, ELLIPSE_RATIO, SPIRAL_TWIST};

/// Per-frame uniforms, matching `struct Uniforms` in [`shader_source`].
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    pub scaled_time: f32,
    pub base_radius: f32,
    pub angle_increment: f32,
    /// Physical pixels per logical pixel; sprite sizes are logical.
    pub pixel_ratio: f32,
    pub _padding: [f32; 2],
}

impl Uniforms {
    /// Build the uniform block for one frame.
    ///
    /// `spin` rotates the whole galaxy about the z axis.
    pub fn new(
        view_proj: Mat4,
        spin: f32,
        viewport: Vec2,
        pixel_ratio: f32,
        scaled_time: f32,
        params: &SpiralParams,
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: Mat4::from_rotation_z(spin).to_cols_array_2d(),
            viewport: viewport.to_array(),
            scaled_time,
            base_radius: params.base_radius,
            angle_increment: params.angle_increment,
            pixel_ratio,
            _padding: [0.0; 2],
        }
    }
}

/// Render program: spiral transform in `vs_main`, rotated sprite lookup in `fs_main`.
///
/// Each particle is one instance of a six-vertex quad sized in pixels. The
/// transform constants are emitted from [`crate::spiral`] so the GPU and CPU
/// paths share them.
pub fn shader_source() -> String {
    format!(
        "const ELLIPSE_RATIO: f32 = {:?};\nconst SPIRAL_TWIST: f32 = {:?};\n{}",
        ELLIPSE_RATIO, SPIRAL_TWIST, SHADER_BODY
    )
}

const SHADER_BODY: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    viewport: vec2<f32>,
    scaled_time: f32,
    base_radius: f32,
    angle_increment: f32,
    pixel_ratio: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var sprite_texture: texture_2d<f32>;
@group(1) @binding(1)
var sprite_sampler: sampler;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) rotation: f32,
};

fn rotate2d(v: vec2<f32>, angle: f32) -> vec2<f32> {
    let c = cos(angle);
    let s = sin(angle);
    return vec2<f32>(v.x * c - v.y * s, v.x * s + v.y * c);
}

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) base_position: vec3<f32>,
    @location(1) color: vec3<f32>,
    @location(2) size: f32,
    @location(3) rotation: f32,
    @location(4) ring_index: u32,
    @location(5) slot_index: u32,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );
    let quad_pos = quad_vertices[vertex_index];

    let ci = f32(ring_index);
    let cj = f32(slot_index);
    let t = uniforms.scaled_time;

    let radius_x = ci * uniforms.base_radius;
    let radius_y = radius_x * ELLIPSE_RATIO;
    let angle = cj * uniforms.angle_increment + t;

    var world = vec2<f32>(cos(angle) * radius_x, sin(angle) * radius_y) + base_position.xy;
    world = rotate2d(world, ci * SPIRAL_TWIST - t);

    var clip_pos = uniforms.view_proj * uniforms.model * vec4<f32>(world, base_position.z, 1.0);

    // Fixed logical pixel size regardless of depth.
    let size_px = size * uniforms.pixel_ratio;
    clip_pos.x += quad_pos.x * size_px / uniforms.viewport.x * clip_pos.w;
    clip_pos.y += quad_pos.y * size_px / uniforms.viewport.y * clip_pos.w;

    var out: VertexOutput;
    out.clip_position = clip_pos;
    out.color = vec4<f32>(color, 1.0);
    out.uv = vec2<f32>(quad_pos.x * 0.5 + 0.5, 0.5 - quad_pos.y * 0.5);
    out.rotation = rotation;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let uv = rotate2d(in.uv - vec2<f32>(0.5), in.rotation) + vec2<f32>(0.5);
    return in.color * textureSample(sprite_texture, sprite_sampler, uv);
}
"#;
