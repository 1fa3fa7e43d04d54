//! Main application

use shade_core::Mesh;

use crate::config::ViewerConfig;
use crate::state::{InputSnapshot, ViewerState};
use crate::viewport::{SharedViewportState, ViewportState};

/// Window title
pub const WINDOW_TITLE: &str = "Flat and Phong Shading";

/// Initial window size
pub const WINDOW_SIZE: [f32; 2] = [800.0, 600.0];

/// Main application
pub struct ShadeViewerApp {
    state: ViewerState,
    mesh_name: String,
    vertex_count: usize,
    face_count: usize,
    degenerate_count: usize,
    viewport_state: Option<SharedViewportState>,
}

impl ShadeViewerApp {
    /// Create the app and upload the mesh
    pub fn new(cc: &eframe::CreationContext<'_>, config: &ViewerConfig, mesh: Mesh) -> Self {
        let viewport_state = cc.wgpu_render_state.as_ref().map(|render_state| {
            let viewport = ViewportState::shared(
                render_state.device.clone(),
                render_state.queue.clone(),
                render_state.target_format,
                &config.renderer,
            );
            viewport.lock().set_mesh(&mesh);
            viewport
        });

        if viewport_state.is_none() {
            tracing::error!("wgpu render state unavailable, the viewport stays empty");
        }

        Self {
            state: ViewerState::new(config),
            mesh_name: mesh.name.clone(),
            vertex_count: mesh.vertex_count(),
            face_count: mesh.face_count(),
            degenerate_count: mesh.degenerate_face_count(),
            viewport_state,
        }
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Shading: {}", self.state.shading_mode));
                if ui
                    .button(format!("Switch to {}", self.state.shading_mode.toggled()))
                    .clicked()
                {
                    self.state.toggle_shading();
                }

                ui.separator();
                ui.label(format!(
                    "{}: {} vertices, {} faces",
                    self.mesh_name, self.vertex_count, self.face_count
                ));
                if self.degenerate_count > 0 {
                    ui.label(format!("({} degenerate)", self.degenerate_count));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak("S: toggle shading, arrows: rotate");
                });
            });
        });
    }

    fn viewport(&self, ui: &mut egui::Ui, frame: &eframe::Frame) {
        let (Some(render_state), Some(viewport_state)) =
            (frame.wgpu_render_state(), &self.viewport_state)
        else {
            ui.centered_and_justified(|ui| {
                ui.label("WGPU not available");
            });
            return;
        };

        let available_size = ui.available_size();
        let width = available_size.x as u32;
        let height = available_size.y as u32;

        if width == 0 || height == 0 {
            return;
        }

        let texture_id = {
            let mut state = viewport_state.lock();
            let mut egui_renderer = render_state.renderer.write();
            let tex_id = state.ensure_texture(width, height, &mut egui_renderer);
            state.render(&self.state.frame_context());
            tex_id
        };

        ui.add(egui::Image::new(egui::load::SizedTexture::new(
            texture_id,
            [available_size.x, available_size.y],
        )));
    }
}

impl eframe::App for ShadeViewerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let input = ctx.input(InputSnapshot::from_egui);
        self.state.handle_input(&input);

        self.top_bar(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.viewport(ui, frame);
            });

        ctx.request_repaint();
    }
}
