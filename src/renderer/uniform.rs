//! Uniform buffer utilities for wgpu rendering.
//!
//! This module provides the [`Uniforms`] struct holding the camera and light for the scene
//! pipeline, plus helpers for buffer and bind group creation.

use wgpu::util::DeviceExt;

use crate::game::scene::LookAt;
use crate::math::{Mat4, Vec3};

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW: f32 = 60.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

/// Light position the directional light shines from.
const LIGHT_POSITION: Vec3 = Vec3::new(50.0, 100.0, 50.0);
const AMBIENT: [f32; 4] = [0.2, 0.2, 0.3, 1.0];
const DIFFUSE: [f32; 4] = [0.8, 0.8, 0.9, 1.0];

/// Uniforms for the scene pipeline.
///
/// Vectors are padded to `vec4` to satisfy WGSL uniform alignment.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    /// Projection × view.
    pub view_proj: [[f32; 4]; 4],
    /// Direction towards the light, `w` unused.
    pub light_dir: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
}

impl Default for Uniforms {
    fn default() -> Self {
        Self::new()
    }
}

impl Uniforms {
    /// Identity camera with the scene light.
    pub fn new() -> Self {
        let dir = LIGHT_POSITION.normalize();
        Self {
            view_proj: Mat4::identity().0,
            light_dir: [dir.x, dir.y, dir.z, 0.0],
            ambient: AMBIENT,
            diffuse: DIFFUSE,
        }
    }

    /// Points the camera from a look-at triple and the surface aspect ratio.
    pub fn update_camera(&mut self, camera: &LookAt, aspect: f32) {
        let view = Mat4::look_at(camera.eye, camera.target, camera.up);
        let proj = Mat4::perspective(FIELD_OF_VIEW.to_radians(), aspect, Z_NEAR, Z_FAR);
        self.view_proj = proj.multiply(&view).0;
    }

    /// Returns the raw bytes of the uniform struct for uploading to the GPU.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Creates a GPU buffer containing the uniform data.
    pub fn create_buffer(&self, device: &wgpu::Device) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: self.as_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    /// Creates a bind group for `buffer` against `layout`.
    pub fn create_bind_group(
        buffer: &wgpu::Buffer,
        layout: &wgpu::BindGroupLayout,
        device: &wgpu::Device,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("uniform_bind_group"),
        })
    }
}
