//! Shade Viewer
//!
//! egui application showing a mesh with switchable flat and Phong shading.

pub mod app;
pub mod config;
pub mod state;
pub mod viewport;

pub use app::ShadeViewerApp;
pub use config::{ConfigError, ViewerConfig};
pub use state::{InputSnapshot, ViewerState};
pub use viewport::{SharedViewportState, ViewportState};
