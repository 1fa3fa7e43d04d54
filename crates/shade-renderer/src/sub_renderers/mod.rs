//! Sub-renderers drawn inside the main render pass

pub mod mesh;

pub use mesh::{
    GpuMesh, MeshRenderer, ModelUniform, fit_transform, flat_vertices, smooth_indices,
    smooth_vertices,
};
