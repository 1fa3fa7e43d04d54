//! Renderer configuration structures
//!
//! This module provides configurable settings for the renderer that can be
//! serialized and loaded from configuration files.

use serde::{Deserialize, Serialize};

use shade_core::constants::DEFAULT_OBJECT_COLOR;

use crate::constants::{camera, lighting, viewport};

/// Viewport rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Background clear color (RGBA)
    pub background_color: [f32; 4],
    /// MSAA sample count (1 = disabled, 4)
    pub msaa_sample_count: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        let c = viewport::CLEAR_COLOR;
        Self {
            background_color: [c.r as f32, c.g as f32, c.b as f32, c.a as f32],
            msaa_sample_count: viewport::SAMPLE_COUNT,
        }
    }
}

impl ViewportConfig {
    /// Background color as a wgpu clear color
    pub fn clear_color(&self) -> wgpu::Color {
        wgpu::Color {
            r: self.background_color[0] as f64,
            g: self.background_color[1] as f64,
            b: self.background_color[2] as f64,
            a: self.background_color[3] as f64,
        }
    }

    /// Sample count supported on every adapter: 4 when MSAA is requested, 1 otherwise
    pub fn effective_sample_count(&self) -> u32 {
        if self.msaa_sample_count > 1 { 4 } else { 1 }
    }
}

/// Point light configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    /// Light position in world space
    pub position: [f32; 3],
    /// Light color (RGB)
    pub color: [f32; 3],
    /// Ambient term strength
    pub ambient_strength: f32,
    /// Specular term strength
    pub specular_strength: f32,
    /// Specular exponent
    pub shininess: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            position: lighting::DEFAULT_POSITION,
            color: lighting::DEFAULT_COLOR,
            ambient_strength: lighting::DEFAULT_AMBIENT_STRENGTH,
            specular_strength: lighting::DEFAULT_SPECULAR_STRENGTH,
            shininess: lighting::DEFAULT_SHININESS,
        }
    }
}

/// Surface material configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MaterialConfig {
    /// Object color (RGB)
    pub object_color: [f32; 3],
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            object_color: DEFAULT_OBJECT_COLOR,
        }
    }
}

/// Camera default configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position; the camera looks at the origin
    pub eye: [f32; 3],
    /// Field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near_plane: f32,
    /// Far clipping plane distance
    pub far_plane: f32,
    /// Center the mesh and scale it into the unit sphere before drawing
    pub fit_mesh: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: camera::DEFAULT_EYE,
            fov_degrees: camera::DEFAULT_FOV_DEGREES,
            near_plane: camera::DEFAULT_NEAR,
            far_plane: camera::DEFAULT_FAR,
            fit_mesh: true,
        }
    }
}

/// Complete renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RendererConfig {
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Lighting settings
    #[serde(default)]
    pub lighting: LightingConfig,
    /// Material settings
    #[serde(default)]
    pub material: MaterialConfig,
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
}

impl RendererConfig {
    /// Create a new renderer configuration with default values
    pub fn new() -> Self {
        Self::default()
    }
}
