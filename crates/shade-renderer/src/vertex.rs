//! Vertex attribute utilities
//!
//! This module provides utilities for defining vertex attributes with
//! type-safe offset calculation using `std::mem::offset_of!`.

use bytemuck::{Pod, Zeroable};

/// Creates a vertex attribute with the offset calculated from the struct field.
///
/// # Example
///
/// ```ignore
/// #[repr(C)]
/// struct MyVertex {
///     position: [f32; 3],
///     normal: [f32; 3],
/// }
///
/// const VERTEX_ATTRIBUTES: &[wgpu::VertexAttribute] = &[
///     vertex_attr!(MyVertex, position, 0, Float32x3),
///     vertex_attr!(MyVertex, normal, 1, Float32x3),
/// ];
/// ```
#[macro_export]
macro_rules! vertex_attr {
    ($struct:ty, $field:ident, $location:expr, $format:ident) => {
        wgpu::VertexAttribute {
            offset: std::mem::offset_of!($struct, $field) as u64,
            shader_location: $location,
            format: wgpu::VertexFormat::$format,
        }
    };
}

/// Creates a vertex buffer layout from attributes.
///
/// `T` is the vertex struct type, used to calculate the array stride.
pub fn vertex_buffer_layout<T>(
    attributes: &[wgpu::VertexAttribute],
    step_mode: wgpu::VertexStepMode,
) -> wgpu::VertexBufferLayout<'_> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<T>() as u64,
        step_mode,
        attributes,
    }
}

/// Vertex for mesh rendering with position and normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Vertex position in model space.
    pub position: [f32; 3],
    /// Vertex normal vector. May be zero for degenerate geometry.
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Vertex attribute descriptors for the shader.
    pub const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &[
        vertex_attr!(MeshVertex, position, 0, Float32x3),
        vertex_attr!(MeshVertex, normal, 1, Float32x3),
    ];

    /// Create a vertex from glam vectors.
    pub fn new(position: glam::Vec3, normal: glam::Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }

    /// Returns the vertex buffer layout for this vertex type.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        vertex_buffer_layout::<Self>(Self::ATTRIBUTES, wgpu::VertexStepMode::Vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_vertex_layout() {
        let layout = MeshVertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }
}
