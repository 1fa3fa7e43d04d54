//! Viewer state updated from keyboard input

use glam::{Mat4, Vec3};

use shade_core::ShadingMode;
use shade_renderer::FrameContext;

use crate::config::ViewerConfig;

/// Keyboard state sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// `S` went down this frame (repeats excluded)
    pub toggle_shading: bool,
    /// Up arrow held
    pub rotate_up: bool,
    /// Down arrow held
    pub rotate_down: bool,
    /// Left arrow held
    pub rotate_left: bool,
    /// Right arrow held
    pub rotate_right: bool,
}

impl InputSnapshot {
    /// Sample the keys the viewer reacts to
    pub fn from_egui(input: &egui::InputState) -> Self {
        let toggle_shading = input.events.iter().any(|event| {
            matches!(
                event,
                egui::Event::Key {
                    key: egui::Key::S,
                    pressed: true,
                    repeat: false,
                    ..
                }
            )
        });

        Self {
            toggle_shading,
            rotate_up: input.key_down(egui::Key::ArrowUp),
            rotate_down: input.key_down(egui::Key::ArrowDown),
            rotate_left: input.key_down(egui::Key::ArrowLeft),
            rotate_right: input.key_down(egui::Key::ArrowRight),
        }
    }
}

/// Shading mode and model orientation
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    /// Active shading mode
    pub shading_mode: ShadingMode,
    /// Rotation about X, in degrees
    pub angle_x: f32,
    /// Rotation about Y, in degrees
    pub angle_y: f32,
    /// Uniform model scale
    pub model_scale: f32,
    /// Degrees per frame while an arrow key is held
    pub rotation_step: f32,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}

impl ViewerState {
    /// Initial state: flat shading, no rotation
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            shading_mode: ShadingMode::Flat,
            angle_x: 0.0,
            angle_y: 0.0,
            model_scale: config.model_scale,
            rotation_step: config.rotation_step_degrees,
        }
    }

    /// Apply one frame of input. Returns true if the shading mode changed.
    pub fn handle_input(&mut self, input: &InputSnapshot) -> bool {
        if input.rotate_up {
            self.angle_x += self.rotation_step;
        }
        if input.rotate_down {
            self.angle_x -= self.rotation_step;
        }
        if input.rotate_left {
            self.angle_y -= self.rotation_step;
        }
        if input.rotate_right {
            self.angle_y += self.rotation_step;
        }
        self.angle_x %= 360.0;
        self.angle_y %= 360.0;

        if input.toggle_shading {
            self.toggle_shading();
            return true;
        }
        false
    }

    /// Flip between flat and Phong shading
    pub fn toggle_shading(&mut self) {
        self.shading_mode.toggle();
        tracing::info!("Shading mode: {}", self.shading_mode);
    }

    /// Rotation about X, then Y, then uniform scale
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.angle_x.to_radians())
            * Mat4::from_rotation_y(self.angle_y.to_radians())
            * Mat4::from_scale(Vec3::splat(self.model_scale))
    }

    /// Per-frame data for the renderer
    pub fn frame_context(&self) -> FrameContext {
        FrameContext {
            shading_mode: self.shading_mode,
            model: self.model_matrix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_flat_and_unrotated() {
        let state = ViewerState::default();
        assert_eq!(state.shading_mode, ShadingMode::Flat);
        assert_eq!(state.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_toggle_is_one_flip_per_press() {
        let mut state = ViewerState::default();
        let press = InputSnapshot {
            toggle_shading: true,
            ..Default::default()
        };
        assert!(state.handle_input(&press));
        assert_eq!(state.shading_mode, ShadingMode::Phong);

        // Held key with no new press event
        assert!(!state.handle_input(&InputSnapshot::default()));
        assert_eq!(state.shading_mode, ShadingMode::Phong);

        assert!(state.handle_input(&press));
        assert_eq!(state.shading_mode, ShadingMode::Flat);
    }

    #[test]
    fn test_arrow_keys_rotate() {
        let mut state = ViewerState::default();
        let input = InputSnapshot {
            rotate_up: true,
            rotate_right: true,
            ..Default::default()
        };
        state.handle_input(&input);
        state.handle_input(&input);
        assert_eq!(state.angle_x, 2.0);
        assert_eq!(state.angle_y, 2.0);

        let input = InputSnapshot {
            rotate_down: true,
            rotate_left: true,
            ..Default::default()
        };
        state.handle_input(&input);
        assert_eq!(state.angle_x, 1.0);
        assert_eq!(state.angle_y, 1.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut state = ViewerState::default();
        state.handle_input(&InputSnapshot {
            rotate_up: true,
            rotate_down: true,
            ..Default::default()
        });
        assert_eq!(state.angle_x, 0.0);
    }

    #[test]
    fn test_rotation_step_from_config() {
        let config = ViewerConfig {
            rotation_step_degrees: 5.0,
            model_scale: 0.5,
            ..Default::default()
        };
        let mut state = ViewerState::new(&config);
        state.handle_input(&InputSnapshot {
            rotate_left: true,
            ..Default::default()
        });
        assert_eq!(state.angle_y, -5.0);

        let m = state.model_matrix();
        assert!((m.transform_vector3(Vec3::X).length() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_frame_context_carries_mode_and_model() {
        let mut state = ViewerState::default();
        state.toggle_shading();
        state.angle_y = 90.0;
        let frame = state.frame_context();
        assert_eq!(frame.shading_mode, ShadingMode::Phong);
        assert!(frame.model.transform_vector3(Vec3::X).abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }
}
