//! Look-at camera for the 3D viewport

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::config::CameraConfig;
use crate::constants::camera::{
    DEFAULT_EYE, DEFAULT_FAR, DEFAULT_FOV_DEGREES, DEFAULT_NEAR, MAX_FOV_DEGREES, MIN_FOV_DEGREES,
};

/// Camera uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    /// Projection * view
    pub view_proj: [[f32; 4]; 4],
    /// World to view
    pub view: [[f32; 4]; 4],
    /// View to clip
    pub proj: [[f32; 4]; 4],
    /// Eye position (w = 1)
    pub eye: [f32; 4],
}

/// Fixed camera looking at a target point
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up direction
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width / height
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a new camera with default parameters
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::from_array(DEFAULT_EYE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: DEFAULT_FOV_DEGREES.to_radians(),
            aspect,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }

    /// Create a camera from configuration
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(aspect);
        camera.apply_config(config);
        camera
    }

    fn apply_config(&mut self, config: &CameraConfig) {
        self.position = Vec3::from_array(config.eye);
        self.set_fov_degrees(config.fov_degrees);
        self.set_near(config.near_plane);
        self.set_far(config.far_plane);
    }

    /// Update aspect ratio
    pub fn update_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Set field of view in degrees
    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov = fov_degrees
            .clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES)
            .to_radians();
    }

    /// Set near clipping plane
    pub fn set_near(&mut self, near: f32) {
        self.near = near.max(0.001);
    }

    /// Set far clipping plane
    pub fn set_far(&mut self, far: f32) {
        self.far = far.max(self.near + 1.0);
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Get camera uniform data
    pub fn uniform(&self) -> CameraUniform {
        let view = self.view_matrix();
        let proj = self.projection_matrix();
        let view_proj = proj * view;

        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            eye: [self.position.x, self.position.y, self.position.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let camera = Camera::new(800.0 / 600.0);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert!((camera.fov.to_degrees() - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = Camera::new(1.0);
        let clip = camera.projection_matrix() * camera.view_matrix() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_fov_is_clamped() {
        let mut camera = Camera::new(1.0);
        camera.set_fov_degrees(500.0);
        assert!((camera.fov.to_degrees() - MAX_FOV_DEGREES).abs() < 1e-4);
    }

    #[test]
    fn test_far_stays_beyond_near() {
        let mut camera = Camera::new(1.0);
        camera.set_near(5.0);
        camera.set_far(1.0);
        assert!(camera.far > camera.near);
    }

    #[test]
    fn test_from_config_applies_settings() {
        let config = CameraConfig {
            eye: [1.0, 2.0, 5.0],
            fov_degrees: 60.0,
            near_plane: 0.5,
            far_plane: 0.2,
            fit_mesh: false,
        };
        let camera = Camera::from_config(&config, 2.0);
        assert_eq!(camera.position, Vec3::new(1.0, 2.0, 5.0));
        assert!((camera.fov.to_degrees() - 60.0).abs() < 1e-4);
        assert_eq!(camera.near, 0.5);
        assert!(camera.far > camera.near);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_uniform_eye() {
        let camera = Camera::new(1.0);
        assert_eq!(camera.uniform().eye, [0.0, 0.0, 3.0, 1.0]);
    }
}
