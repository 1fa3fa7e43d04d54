//! Shade Renderer
//!
//! wgpu rendering of a single mesh with flat or Phong shading under one
//! point light.

pub mod camera;
pub mod config;
pub mod constants;
pub mod light;
pub mod pipeline;
pub mod renderer;
pub mod sub_renderers;
pub mod vertex;

pub use camera::{Camera, CameraUniform};
pub use config::{CameraConfig, LightingConfig, MaterialConfig, RendererConfig, ViewportConfig};
pub use light::{LightUniform, PointLight};
pub use renderer::{FrameContext, Renderer};
pub use sub_renderers::{GpuMesh, MeshRenderer};
pub use vertex::MeshVertex;

pub use shade_core::ShadingMode;
