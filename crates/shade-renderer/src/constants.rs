//! Rendering constants and configuration
//!
//! This module centralizes the magic numbers used across the renderer.

/// Camera default parameters
pub mod camera {
    /// Default eye position
    pub const DEFAULT_EYE: [f32; 3] = [0.0, 0.0, 3.0];
    /// Default field of view in degrees
    pub const DEFAULT_FOV_DEGREES: f32 = 45.0;
    /// Default near clipping plane
    pub const DEFAULT_NEAR: f32 = 0.1;
    /// Default far clipping plane
    pub const DEFAULT_FAR: f32 = 100.0;
    /// Minimum field of view in degrees
    pub const MIN_FOV_DEGREES: f32 = 10.0;
    /// Maximum field of view in degrees
    pub const MAX_FOV_DEGREES: f32 = 120.0;
}

/// Lighting default parameters
pub mod lighting {
    /// Point light position in world space
    pub const DEFAULT_POSITION: [f32; 3] = [2.0, 4.0, 3.0];
    /// Light color (white)
    pub const DEFAULT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
    /// Ambient term strength
    pub const DEFAULT_AMBIENT_STRENGTH: f32 = 0.1;
    /// Specular term strength
    pub const DEFAULT_SPECULAR_STRENGTH: f32 = 0.5;
    /// Specular exponent
    pub const DEFAULT_SHININESS: f32 = 32.0;
}

/// Viewport rendering constants
pub mod viewport {
    /// Background clear color
    pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
        r: 0.1,
        g: 0.1,
        b: 0.12,
        a: 1.0,
    };
    /// Default MSAA sample count
    pub const SAMPLE_COUNT: u32 = 4;
    /// Depth buffer format
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
}
