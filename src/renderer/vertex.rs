//! Vertex and instance definitions for box rendering.
//!
//! Every solid in the scene is a scaled, rotated, translated unit cube. The cube mesh lives in
//! one vertex buffer; each drawn box is an [`Instance`] with its own model matrix and colour.

use crate::math::{Mat4, Vec3};

/// Vertex of the shared unit cube.
///
/// Each vertex contains:
/// - `position`: corner in model space, within `[-0.5, 0.5]³`
/// - `normal`: outward face normal
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    /// Returns the vertex buffer layout for use in a wgpu pipeline.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }

    /// Builds a unit cube centred on the origin, four vertices per face so normals stay flat.
    ///
    /// # Returns
    /// `(vertices, indices)` with counter-clockwise front faces.
    pub fn unit_cube() -> (Vec<Vertex>, Vec<u16>) {
        // (normal, tangent u, tangent v) with u × v = normal.
        const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u, v) in FACES {
            let n = Vec3::from(normal);
            let u = Vec3::from(u);
            let v = Vec3::from(v);
            let center = n * 0.5;
            let base = vertices.len() as u16;
            for (su, sv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
                let corner = center + u * su + v * sv;
                vertices.push(Vertex {
                    position: corner.to_array(),
                    normal,
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        (vertices, indices)
    }
}

/// Per-box instance data.
///
/// `color.a` selects shading: `1.0` is lit by the scene light, `0.0` is emissive and drawn at
/// full colour.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Instance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl Instance {
    /// A lit box.
    pub fn solid(model: Mat4, color: [f32; 3]) -> Self {
        Self {
            model: model.0,
            color: [color[0], color[1], color[2], 1.0],
        }
    }

    /// An unlit, self-coloured box.
    pub fn emissive(model: Mat4, color: [f32; 3]) -> Self {
        Self {
            model: model.0,
            color: [color[0], color[1], color[2], 0.0],
        }
    }

    /// Axis-aligned box with the given centre and edge lengths.
    pub fn aabb(center: Vec3, size: Vec3, color: [f32; 3]) -> Self {
        let model = Mat4::translation(center.x, center.y, center.z)
            .multiply(&Mat4::scaling(size.x, size.y, size.z));
        Self::solid(model, color)
    }

    /// Returns the instance buffer layout, locations 2 to 6.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x4
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Instance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}
