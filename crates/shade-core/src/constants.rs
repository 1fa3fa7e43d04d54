//! Global constants for shade-core

/// Vectors no longer than this normalize to zero instead of dividing by
/// (almost) nothing. Used by both the face and the vertex normal pass.
pub const NORMAL_EPSILON: f32 = 1e-6;

/// Mesh loaded when no path is configured
pub const DEFAULT_MESH_PATH: &str = "models/bunny.obj";

/// Default object color (RGB)
pub const DEFAULT_OBJECT_COLOR: [f32; 3] = [1.0, 0.5, 0.31];
