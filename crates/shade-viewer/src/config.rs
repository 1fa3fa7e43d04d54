//! Viewer configuration
//!
//! Settings are read from a RON file. Every field has a default, so a partial
//! file (or no file at all) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use shade_core::constants::DEFAULT_MESH_PATH;
use shade_renderer::RendererConfig;

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "shade.ron";

/// Environment variable overriding the config file path
pub const CONFIG_ENV_VAR: &str = "SHADE_CONFIG";

/// Viewer settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// OBJ file to display
    pub mesh_path: PathBuf,
    /// Uniform scale applied to the model
    pub model_scale: f32,
    /// Rotation per frame while an arrow key is held, in degrees
    pub rotation_step_degrees: f32,
    /// Renderer settings
    pub renderer: RendererConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            mesh_path: PathBuf::from(DEFAULT_MESH_PATH),
            model_scale: 1.0,
            rotation_step_degrees: 1.0,
            renderer: RendererConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Load from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_ron(&content)
    }

    /// Parse from a RON string
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Serialize to a pretty RON string
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Resolve the startup configuration.
    ///
    /// `config_path` is the explicit file (from `SHADE_CONFIG`); it must exist.
    /// Otherwise `shade.ron` in the working directory is used when present,
    /// falling back to defaults. `mesh_arg` replaces the mesh path.
    pub fn resolve(
        config_path: Option<PathBuf>,
        mesh_arg: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => {
                tracing::info!("Loading config from {}", path.display());
                Self::load(path)?
            }
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    tracing::info!("Loading config from {}", default_path.display());
                    Self::load(default_path)?
                } else {
                    tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                    Self::default()
                }
            }
        };

        if let Some(mesh_path) = mesh_arg {
            config.mesh_path = mesh_path;
        }
        config.validate()?;
        match config.to_ron() {
            Ok(text) => tracing::debug!("Effective config:\n{}", text),
            Err(e) => tracing::warn!("{}", e),
        }
        Ok(config)
    }

    /// Reject values that would produce a broken transform
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.model_scale.is_finite() || self.model_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "model_scale must be positive, got {}",
                self.model_scale
            )));
        }
        if !self.rotation_step_degrees.is_finite() {
            return Err(ConfigError::Invalid(
                "rotation_step_degrees must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("Failed to parse config: {0}")]
    Deserialize(String),
    #[error("Failed to serialize config: {0}")]
    Serialize(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
