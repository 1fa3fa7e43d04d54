//! Shade viewer entry point

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shade_viewer::app::{WINDOW_SIZE, WINDOW_TITLE};
use shade_viewer::config::CONFIG_ENV_VAR;
use shade_viewer::{ShadeViewerApp, ViewerConfig};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shade_viewer=debug,shade_renderer=debug,shade_core=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting {}", WINDOW_TITLE);

    let config_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let mesh_arg = std::env::args_os().nth(1).map(PathBuf::from);

    let config = match ViewerConfig::resolve(config_path, mesh_arg) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mesh = match shade_core::load_mesh(&config.mesh_path) {
        Ok(mesh) => mesh,
        Err(e) => {
            tracing::error!("Failed to load {}: {}", config.mesh_path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let wgpu_options = egui_wgpu::WgpuConfiguration {
        wgpu_setup: egui_wgpu::WgpuSetup::CreateNew {
            supported_backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::default(),
            device_descriptor: std::sync::Arc::new(|adapter| wgpu::DeviceDescriptor {
                label: Some("shade device"),
                required_features: wgpu::Features::empty(),
                required_limits: adapter.limits(),
                memory_hints: wgpu::MemoryHints::default(),
            }),
        },
        ..Default::default()
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_title(WINDOW_TITLE),
        wgpu_options,
        ..Default::default()
    };

    let result = eframe::run_native(
        "shade-viewer",
        native_options,
        Box::new(move |cc| Ok(Box::new(ShadeViewerApp::new(cc, &config, mesh)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Viewer exited with error: {}", e);
            ExitCode::FAILURE
        }
    }
}
