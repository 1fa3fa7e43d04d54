//! Shade Core
//!
//! Mesh loading and normal computation for the flat/Phong shading viewer.
//! Everything here is independent of the GPU, so the normal passes can be
//! tested without a rendering context.

pub mod constants;
pub mod mesh;
pub mod shading;

pub use mesh::{
    Mesh, MeshError, MeshFormat, MeshNormals, compute_face_normals, compute_vertex_normals,
    face_normal, load_mesh, load_obj, load_obj_from_bytes, safe_normalize,
};
pub use shading::ShadingMode;
