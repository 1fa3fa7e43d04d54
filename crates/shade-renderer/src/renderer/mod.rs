//! Main renderer drawing the loaded mesh.
//!
//! The [`Renderer`] owns the camera, the point light and the mesh pipelines.
//! Each frame it receives a [`FrameContext`] with the shading mode and model
//! rotation chosen by the viewer.

mod gpu_resources;

use glam::Mat4;
use wgpu::util::DeviceExt;

use shade_core::{Mesh, ShadingMode};

use crate::camera::Camera;
use crate::config::RendererConfig;
use crate::constants::viewport::DEPTH_FORMAT;
use crate::light::PointLight;
use crate::pipeline::{create_uniform_bind_group, create_uniform_bind_group_layout};
use crate::sub_renderers::{GpuMesh, MeshRenderer};

/// Per-frame state passed from the viewer to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Active shading mode
    pub shading_mode: ShadingMode,
    /// Model transform applied to the mesh
    pub model: Mat4,
}

impl Default for FrameContext {
    fn default() -> Self {
        Self {
            shading_mode: ShadingMode::default(),
            model: Mat4::IDENTITY,
        }
    }
}

/// Main renderer
pub struct Renderer {
    camera: Camera,
    camera_buffer: wgpu::Buffer,

    light: PointLight,
    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,

    mesh_renderer: MeshRenderer,
    mesh: Option<GpuMesh>,

    // Depth/MSAA resources
    #[allow(dead_code)] // Held for GPU resource lifetime
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    #[allow(dead_code)] // Held for GPU resource lifetime
    msaa_texture: Option<wgpu::Texture>,
    msaa_view: Option<wgpu::TextureView>,

    config: RendererConfig,
    sample_count: u32,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
}

impl Renderer {
    /// Creates a new renderer targeting `format` at the given size.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        config: &RendererConfig,
    ) -> Self {
        let sample_count = config.viewport.effective_sample_count();
        let camera = Camera::from_config(&config.camera, aspect_ratio(width, height));

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera.uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group_layout = create_uniform_bind_group_layout(
            device,
            "Camera",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );

        let mesh_renderer = MeshRenderer::new(
            device,
            format,
            DEPTH_FORMAT,
            sample_count,
            &camera_bind_group_layout,
            &camera_buffer,
        );

        let light = PointLight::new(&config.lighting, &config.material);
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Buffer"),
            contents: bytemuck::cast_slice(&[light.uniform(camera.position)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let light_bind_group = create_uniform_bind_group(
            device,
            mesh_renderer.light_bind_group_layout(),
            &light_buffer,
            "Light",
        );

        let (depth_texture, depth_view) =
            gpu_resources::create_depth_texture(device, width, height, sample_count);
        let (msaa_texture, msaa_view) =
            match gpu_resources::create_msaa_texture(device, format, width, height, sample_count) {
                Some((tex, view)) => (Some(tex), Some(view)),
                None => (None, None),
            };

        tracing::debug!(
            "Renderer created: {}x{}, format {:?}, {}x MSAA",
            width,
            height,
            format,
            sample_count
        );

        Self {
            camera,
            camera_buffer,
            light,
            light_buffer,
            light_bind_group,
            mesh_renderer,
            mesh: None,
            depth_texture,
            depth_view,
            msaa_texture,
            msaa_view,
            config: config.clone(),
            sample_count,
            format,
            width,
            height,
        }
    }

    /// Upload a mesh, replacing the current one
    pub fn set_mesh(&mut self, device: &wgpu::Device, mesh: &Mesh) {
        self.mesh = Some(GpuMesh::new(
            device,
            &self.mesh_renderer,
            mesh,
            self.config.camera.fit_mesh,
        ));
    }

    /// Resize render targets. Zero sizes are ignored.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.camera.update_aspect(aspect_ratio(width, height));
        self.recreate_targets(device);
    }

    fn recreate_targets(&mut self, device: &wgpu::Device) {
        let (depth_texture, depth_view) = gpu_resources::create_depth_texture(
            device,
            self.width,
            self.height,
            self.sample_count,
        );
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;

        let msaa_result = gpu_resources::create_msaa_texture(
            device,
            self.format,
            self.width,
            self.height,
            self.sample_count,
        );
        let (msaa_texture, msaa_view) = match msaa_result {
            Some((tex, view)) => (Some(tex), Some(view)),
            None => (None, None),
        };
        self.msaa_texture = msaa_texture;
        self.msaa_view = msaa_view;
    }

    /// Record the frame into `encoder`, drawing into `view`
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        queue: &wgpu::Queue,
        frame: &FrameContext,
    ) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.uniform()]),
        );
        queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::cast_slice(&[self.light.uniform(self.camera.position)]),
        );
        if let Some(mesh) = &self.mesh {
            mesh.update_transform(queue, frame.model);
        }

        let clear_color = self.config.viewport.clear_color();
        let color_attachment = if let Some(msaa_view) = &self.msaa_view {
            // Render to the multisample texture and resolve to the output
            wgpu::RenderPassColorAttachment {
                view: msaa_view,
                resolve_target: Some(view),
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            }
        } else {
            wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            }
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Main Render Pass"),
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Some(mesh) = &self.mesh {
            self.mesh_renderer.render(
                &mut render_pass,
                frame.shading_mode,
                mesh,
                &self.light_bind_group,
            );
        }
    }

    /// Returns the texture format used by the renderer.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
