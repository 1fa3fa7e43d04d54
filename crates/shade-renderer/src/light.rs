//! Point light and material uniforms

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::config::{LightingConfig, MaterialConfig};

/// Light uniform buffer data
///
/// Every field is a `vec4` on the shader side to keep the layout free of
/// implicit padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightUniform {
    /// Light position (w unused)
    pub position: [f32; 4],
    /// Light color (w unused)
    pub color: [f32; 4],
    /// Camera eye position for the specular term (w unused)
    pub view_position: [f32; 4],
    /// Object color (w = alpha)
    pub object_color: [f32; 4],
    /// x = ambient strength, y = specular strength, z = shininess
    pub params: [f32; 4],
}

/// Point light with a single-colored material
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    /// Light position in world space
    pub position: Vec3,
    /// Light color
    pub color: Vec3,
    /// Ambient term strength
    pub ambient_strength: f32,
    /// Specular term strength
    pub specular_strength: f32,
    /// Specular exponent
    pub shininess: f32,
    /// Object color
    pub object_color: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(&LightingConfig::default(), &MaterialConfig::default())
    }
}

impl PointLight {
    /// Create a light from configuration
    pub fn new(lighting: &LightingConfig, material: &MaterialConfig) -> Self {
        let mut light = Self {
            position: Vec3::ZERO,
            color: Vec3::ONE,
            ambient_strength: 0.0,
            specular_strength: 0.0,
            shininess: 1.0,
            object_color: Vec3::ONE,
        };
        light.apply_config(lighting, material);
        light
    }

    fn apply_config(&mut self, lighting: &LightingConfig, material: &MaterialConfig) {
        self.position = Vec3::from_array(lighting.position);
        self.color = Vec3::from_array(lighting.color);
        self.ambient_strength = lighting.ambient_strength.max(0.0);
        self.specular_strength = lighting.specular_strength.max(0.0);
        self.shininess = lighting.shininess.max(1.0);
        self.object_color = Vec3::from_array(material.object_color);
    }

    /// Get light uniform data for a camera at `eye`
    pub fn uniform(&self, eye: Vec3) -> LightUniform {
        LightUniform {
            position: self.position.extend(1.0).to_array(),
            color: self.color.extend(1.0).to_array(),
            view_position: eye.extend(1.0).to_array(),
            object_color: self.object_color.extend(1.0).to_array(),
            params: [
                self.ambient_strength,
                self.specular_strength,
                self.shininess,
                0.0,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<LightUniform>(), 80);
    }

    #[test]
    fn test_uniform_packs_config() {
        let light = PointLight::default();
        let uniform = light.uniform(Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(uniform.position, [2.0, 4.0, 3.0, 1.0]);
        assert_eq!(uniform.view_position, [0.0, 0.0, 3.0, 1.0]);
        assert_eq!(uniform.object_color, [1.0, 0.5, 0.31, 1.0]);
        assert_eq!(uniform.params[2], 32.0);
    }

    #[test]
    fn test_negative_strengths_are_clamped() {
        let lighting = LightingConfig {
            ambient_strength: -1.0,
            shininess: 0.0,
            ..Default::default()
        };
        let light = PointLight::new(&lighting, &MaterialConfig::default());
        assert_eq!(light.ambient_strength, 0.0);
        assert_eq!(light.shininess, 1.0);
    }
}
