//! WGPU-based renderer for the maze.
//!
//! This module provides [`WgpuRenderer`], which owns every GPU resource and turns each
//! [`Scene`] into a frame. All geometry is one unit cube drawn instanced: stars, ground, walls,
//! items and the avatar each become [`Instance`]s with their own model matrix and colour, so a
//! frame is a single draw call.
//!
//! # Features
//! - Depth buffer recreated on every resize
//! - Instance buffer grown on demand
//! - Lost or outdated surfaces are reconfigured and the frame skipped
//!
//! # Usage
//! Create a [`WgpuRenderer`] via [`WgpuRenderer::new`], pass it to the game loop as its
//! [`SceneSink`], and forward window resizes to [`WgpuRenderer::resize`].

use tracing::{info, warn};
use wgpu::util::DeviceExt;

use crate::background::stars::{STAR_COUNT, Starfield};
use crate::error::RenderError;
use crate::game::scene::{Scene, SceneSink};
use crate::math::Mat4;
use crate::renderer::pipeline_builder::{BindGroupLayoutBuilder, PipelineBuilder};
use crate::renderer::uniform::Uniforms;
use crate::renderer::vertex::{Instance, Vertex};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.05,
    g: 0.05,
    b: 0.15,
    a: 1.0,
};
const WALL_COLOR: [f32; 3] = [0.164, 0.164, 0.243];
const GROUND_COLOR: [f32; 3] = [0.1, 0.1, 0.18];
const ITEM_COLOR: [f32; 3] = [1.0, 0.2, 0.2];
const PLAYER_COLOR: [f32; 3] = [0.2, 0.4, 1.0];

const ITEM_SIZE: f32 = 0.6;

/// Main WGPU renderer.
pub struct WgpuRenderer {
    /// The WGPU surface for presenting rendered frames.
    pub surface: wgpu::Surface<'static>,
    /// The surface configuration (format, size, etc.).
    pub surface_config: wgpu::SurfaceConfiguration,
    /// The WGPU device for resource creation.
    pub device: wgpu::Device,
    /// The WGPU queue for submitting commands.
    pub queue: wgpu::Queue,
    pipeline: wgpu::RenderPipeline,
    uniforms: Uniforms,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    cube_vertex_buffer: wgpu::Buffer,
    cube_index_buffer: wgpu::Buffer,
    cube_index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    instances: Vec<Instance>,
    depth_view: wgpu::TextureView,
    starfield: Starfield,
}

impl WgpuRenderer {
    /// Brings up the adapter, device, surface and scene pipeline.
    ///
    /// # Arguments
    /// * `instance` - The WGPU instance the surface was created from
    /// * `surface` - Surface of the game window
    /// * `width`, `height` - Initial surface size in physical pixels
    ///
    /// # Errors
    /// [`RenderError`] when no adapter, device or usable surface format is available.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(RenderError::NoAdapter)?;
        let adapter_info = adapter.get_info();
        info!(name = %adapter_info.name, backend = ?adapter_info.backend, "graphics adapter selected");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: Default::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_config = Self::create_surface_config(&surface, &adapter, width, height)?;
        surface.configure(&device, &surface_config);
        info!(format = ?surface_config.format, width, height, "surface configured");

        let uniforms = Uniforms::new();
        let uniform_buffer = uniforms.create_buffer(&device);
        let uniform_layout = BindGroupLayoutBuilder::new(&device)
            .with_label("Scene Uniform Layout")
            .with_uniform_buffer(0, wgpu::ShaderStages::VERTEX_FRAGMENT)
            .build();
        let uniform_bind_group = Uniforms::create_bind_group(&uniform_buffer, &uniform_layout, &device);

        let pipeline = PipelineBuilder::new(
            &device,
            surface_config.format,
            include_str!("shaders/scene.wgsl"),
        )
        .with_label("Scene Pipeline")
        .with_vertex_buffer(Vertex::desc())
        .with_vertex_buffer(Instance::desc())
        .with_bind_group_layout(&uniform_layout)
        .with_depth(DEPTH_FORMAT)
        .build();

        let (cube_vertices, cube_indices) = Vertex::unit_cube();
        let cube_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&cube_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cube_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Index Buffer"),
            contents: bytemuck::cast_slice(&cube_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let starfield = Starfield::new(STAR_COUNT, &mut rand::thread_rng());
        let instance_capacity = (starfield.len() + 1024).next_power_of_two();
        let instance_buffer = Self::create_instance_buffer(&device, instance_capacity);
        let depth_view = Self::create_depth_view(&device, &surface_config);

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            pipeline,
            uniforms,
            uniform_buffer,
            uniform_bind_group,
            cube_vertex_buffer,
            cube_index_buffer,
            cube_index_count: cube_indices.len() as u32,
            instance_buffer,
            instance_capacity,
            instances: Vec::with_capacity(instance_capacity),
            depth_view,
            starfield,
        })
    }

    /// Reconfigures the surface and depth buffer. Zero-sized requests are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = Self::create_depth_view(&self.device, &self.surface_config);
    }

    /// Draws one frame.
    ///
    /// # Errors
    /// [`RenderError::OutOfMemory`] if the surface cannot hand out a texture. Lost, outdated and
    /// timed-out surfaces skip the frame instead.
    pub fn render(&mut self, scene: &Scene) -> Result<(), RenderError> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(err) => {
                warn!(%err, "skipping frame");
                return Ok(());
            }
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let aspect = self.surface_config.width as f32 / self.surface_config.height.max(1) as f32;
        self.uniforms.update_camera(&scene.camera, aspect);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, self.uniforms.as_bytes());

        let mut instances = std::mem::take(&mut self.instances);
        build_instances(scene, &self.starfield, &mut instances);
        self.ensure_instance_capacity(instances.len());
        self.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        let instance_count = instances.len() as u32;
        self.instances = instances;

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            pass.set_index_buffer(self.cube_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.cube_index_count, 0, 0..instance_count);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    fn ensure_instance_capacity(&mut self, needed: usize) {
        if needed <= self.instance_capacity {
            return;
        }
        self.instance_capacity = needed.next_power_of_two();
        self.instance_buffer = Self::create_instance_buffer(&self.device, self.instance_capacity);
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (capacity * std::mem::size_of::<Instance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration, RenderError> {
        let capabilities = surface.get_capabilities(adapter);
        let format = capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| capabilities.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;
        let alpha_mode = capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        })
    }

    fn create_depth_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }
}

impl SceneSink for WgpuRenderer {
    type Error = RenderError;

    fn submit(&mut self, scene: &Scene) -> Result<(), Self::Error> {
        self.render(scene)
    }
}

/// Converts a scene into box instances: stars, ground, walls, live items, then the avatar.
///
/// `out` is cleared first so its allocation can be reused across frames.
pub fn build_instances(scene: &Scene, starfield: &Starfield, out: &mut Vec<Instance>) {
    out.clear();
    out.extend(starfield.instances(scene.elapsed));

    out.push(Instance::aabb(scene.ground.center, scene.ground.size, GROUND_COLOR));

    out.extend(
        scene
            .walls
            .iter()
            .map(|wall| Instance::aabb(wall.center, wall.size, WALL_COLOR)),
    );

    out.extend(scene.items.iter().map(|item| {
        let p = item.position;
        let model = Mat4::translation(p.x, p.y, p.z)
            .multiply(&Mat4::rotation_y(item.spin))
            .multiply(&Mat4::scaling(ITEM_SIZE, ITEM_SIZE, ITEM_SIZE));
        Instance::solid(model, ITEM_COLOR)
    }));

    // Body from the ground up to just under the head, turned to face the look direction.
    let p = scene.player;
    let facing = Mat4::rotation_y(-scene.player_yaw);
    let body = Mat4::translation(p.x, p.y - 0.25, p.z)
        .multiply(&facing)
        .multiply(&Mat4::scaling(0.8, 1.5, 0.8));
    let head = Mat4::translation(p.x, p.y + 0.8, p.z)
        .multiply(&facing)
        .multiply(&Mat4::scaling(0.6, 0.6, 0.6));
    out.push(Instance::solid(body, PLAYER_COLOR));
    out.push(Instance::solid(head, PLAYER_COLOR));
}
