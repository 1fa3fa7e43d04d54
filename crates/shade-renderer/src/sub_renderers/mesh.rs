//! Mesh renderer with flat and Phong shading pipelines

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use shade_core::{Mesh, ShadingMode};

use crate::pipeline::{
    PipelineConfig, create_uniform_bind_group, create_uniform_bind_group_layout,
};
use crate::vertex::MeshVertex;

/// Expand a mesh into unindexed triangles carrying their face normal.
///
/// Every face contributes three vertices so no normal is shared across a
/// triangle boundary.
pub fn flat_vertices(mesh: &Mesh) -> Vec<MeshVertex> {
    mesh.faces
        .iter()
        .zip(&mesh.face_normals)
        .flat_map(|(face, &normal)| {
            face.map(|i| MeshVertex::new(mesh.vertices[i as usize], normal))
        })
        .collect()
}

/// One vertex per mesh vertex carrying its averaged normal.
pub fn smooth_vertices(mesh: &Mesh) -> Vec<MeshVertex> {
    mesh.vertices
        .iter()
        .zip(&mesh.vertex_normals)
        .map(|(&position, &normal)| MeshVertex::new(position, normal))
        .collect()
}

/// Triangle list indices into [`smooth_vertices`].
pub fn smooth_indices(mesh: &Mesh) -> Vec<u32> {
    mesh.faces.iter().flatten().copied().collect()
}

/// Transform that centers the mesh and scales it into the unit sphere.
pub fn fit_transform(mesh: &Mesh) -> Mat4 {
    let radius = mesh.radius();
    let scale = if radius > shade_core::constants::NORMAL_EPSILON {
        1.0 / radius
    } else {
        1.0
    };
    Mat4::from_scale(glam::Vec3::splat(scale)) * Mat4::from_translation(-mesh.center())
}

/// Per-mesh model transform
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ModelUniform {
    /// Model to world matrix.
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of the model matrix, rescaled to unit determinant,
    /// for normals.
    pub normal_matrix: [[f32; 4]; 4],
}

impl ModelUniform {
    /// Build the uniform from a model matrix.
    ///
    /// Any invertible model matrix, however small its scale, gets a normal
    /// matrix; only a singular one falls back to the identity.
    pub fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix(model).to_cols_array_2d(),
        }
    }
}

/// Inverse transpose of `model` multiplied by `cbrt(|det|)`.
///
/// The shaders normalize the transformed normal. Dividing out the scale keeps
/// transformed unit normals near unit length, above the shader's zero cutoff.
fn normal_matrix(model: Mat4) -> Mat4 {
    let det = model.determinant();
    if det == 0.0 || !det.is_finite() {
        return Mat4::IDENTITY;
    }
    let matrix = model.inverse().transpose() * det.abs().cbrt();
    if matrix.is_finite() {
        matrix
    } else {
        Mat4::IDENTITY
    }
}

impl Default for ModelUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

/// GPU buffers for both shading variants of one mesh
pub struct GpuMesh {
    flat_vertex_buffer: wgpu::Buffer,
    flat_vertex_count: u32,
    smooth_vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    fit: Mat4,
}

impl GpuMesh {
    /// Upload a mesh
    pub fn new(
        device: &wgpu::Device,
        renderer: &MeshRenderer,
        mesh: &Mesh,
        fit_mesh: bool,
    ) -> Self {
        let flat = flat_vertices(mesh);
        let smooth = smooth_vertices(mesh);
        let indices = smooth_indices(mesh);

        tracing::info!(
            "Uploading mesh '{}': {} flat vertices, {} smooth vertices, {} indices",
            mesh.name,
            flat.len(),
            smooth.len(),
            indices.len()
        );

        let flat_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Flat Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&flat),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let smooth_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Smooth Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&smooth),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let fit = if fit_mesh {
            fit_transform(mesh)
        } else {
            Mat4::IDENTITY
        };

        let model_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Model Buffer"),
            contents: bytemuck::cast_slice(&[ModelUniform::new(fit)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let model_bind_group = create_uniform_bind_group(
            device,
            renderer.model_bind_group_layout(),
            &model_buffer,
            "Mesh Model",
        );

        Self {
            flat_vertex_buffer,
            flat_vertex_count: flat.len() as u32,
            smooth_vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            model_buffer,
            model_bind_group,
            fit,
        }
    }

    /// Write the model transform, applied after the fit transform
    pub fn update_transform(&self, queue: &wgpu::Queue, model: Mat4) {
        let uniform = ModelUniform::new(model * self.fit);
        queue.write_buffer(&self.model_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}

/// Mesh renderer holding one pipeline per shading mode
pub struct MeshRenderer {
    flat_pipeline: wgpu::RenderPipeline,
    phong_pipeline: wgpu::RenderPipeline,
    camera_bind_group: wgpu::BindGroup,
    model_bind_group_layout: wgpu::BindGroupLayout,
    light_bind_group_layout: wgpu::BindGroupLayout,
}

impl MeshRenderer {
    /// Creates the flat and Phong pipelines.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        sample_count: u32,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let camera_bind_group = create_uniform_bind_group(
            device,
            camera_bind_group_layout,
            camera_buffer,
            "Mesh Camera",
        );

        let model_bind_group_layout =
            create_uniform_bind_group_layout(device, "Mesh Model", wgpu::ShaderStages::VERTEX);
        let light_bind_group_layout =
            create_uniform_bind_group_layout(device, "Light", wgpu::ShaderStages::FRAGMENT);

        let layouts = [
            camera_bind_group_layout,
            &model_bind_group_layout,
            &light_bind_group_layout,
        ];

        let flat_pipeline = PipelineConfig::new(
            "Flat Mesh",
            include_str!("../shaders/flat.wgsl"),
            format,
            depth_format,
            &layouts,
        )
        .with_vertex_layouts(vec![MeshVertex::layout()])
        .with_sample_count(sample_count)
        .build(device);

        let phong_pipeline = PipelineConfig::new(
            "Phong Mesh",
            include_str!("../shaders/phong.wgsl"),
            format,
            depth_format,
            &layouts,
        )
        .with_vertex_layouts(vec![MeshVertex::layout()])
        .with_sample_count(sample_count)
        .build(device);

        Self {
            flat_pipeline,
            phong_pipeline,
            camera_bind_group,
            model_bind_group_layout,
            light_bind_group_layout,
        }
    }

    /// Get the model bind group layout
    pub fn model_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.model_bind_group_layout
    }

    /// Get the light bind group layout
    pub fn light_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.light_bind_group_layout
    }

    /// Pipeline used for a shading mode
    pub fn pipeline_for(&self, mode: ShadingMode) -> &wgpu::RenderPipeline {
        match mode {
            ShadingMode::Flat => &self.flat_pipeline,
            ShadingMode::Phong => &self.phong_pipeline,
        }
    }

    /// Draw a mesh with the given shading mode
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        mode: ShadingMode,
        mesh: &'a GpuMesh,
        light_bind_group: &'a wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(self.pipeline_for(mode));
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &mesh.model_bind_group, &[]);
        render_pass.set_bind_group(2, light_bind_group, &[]);
        match mode {
            ShadingMode::Flat => {
                render_pass.set_vertex_buffer(0, mesh.flat_vertex_buffer.slice(..));
                render_pass.draw(0..mesh.flat_vertex_count, 0..1);
            }
            ShadingMode::Phong => {
                render_pass.set_vertex_buffer(0, mesh.smooth_vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn quad() -> Mesh {
        Mesh::from_geometry(
            "quad",
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 1.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn test_flat_vertices_use_face_normals() {
        let mesh = quad();
        let vertices = flat_vertices(&mesh);
        assert_eq!(vertices.len(), 6);
        for (i, vertex) in vertices.iter().enumerate() {
            assert_eq!(vertex.normal, mesh.face_normals[i / 3].to_array());
        }
        assert_eq!(vertices[3].position, mesh.vertices[0].to_array());
        assert_eq!(vertices[5].position, mesh.vertices[3].to_array());
    }

    #[test]
    fn test_smooth_vertices_use_vertex_normals() {
        let mesh = quad();
        let vertices = smooth_vertices(&mesh);
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[2].normal, mesh.vertex_normals[2].to_array());
        assert_eq!(smooth_indices(&mesh), vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_flat_and_smooth_differ_on_shared_vertex() {
        let mesh = quad();
        let flat = flat_vertices(&mesh);
        let smooth = smooth_vertices(&mesh);
        assert_ne!(flat[0].normal, smooth[0].normal);
    }

    #[test]
    fn test_degenerate_face_keeps_zero_normal() {
        let mesh = Mesh::from_geometry(
            "line",
            vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0],
            vec![[0, 1, 2]],
        )
        .unwrap();
        let flat = flat_vertices(&mesh);
        assert!(flat.iter().all(|v| v.normal == [0.0, 0.0, 0.0]));
        assert!(flat.iter().flat_map(|v| v.normal).all(|c| !c.is_nan()));
    }

    #[test]
    fn test_fit_transform_maps_into_unit_sphere() {
        let mesh = Mesh::from_geometry(
            "offset",
            vec![
                Vec3::new(10.0, 10.0, 10.0),
                Vec3::new(14.0, 10.0, 10.0),
                Vec3::new(10.0, 13.0, 10.0),
            ],
            vec![[0, 1, 2]],
        )
        .unwrap();
        let fit = fit_transform(&mesh);
        assert!(fit.transform_point3(mesh.center()).length() < 1e-5);
        for v in &mesh.vertices {
            assert!(fit.transform_point3(*v).length() <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_fit_transform_of_point_mesh_is_finite() {
        let mesh =
            Mesh::from_geometry("point", vec![Vec3::ONE; 3], vec![[0, 1, 2]]).unwrap();
        let fit = fit_transform(&mesh);
        assert!(fit.is_finite());
        assert!(fit.transform_point3(Vec3::ONE).length() < 1e-6);
    }

    #[test]
    fn test_model_uniform_normal_matrix() {
        let rotation = Mat4::from_rotation_y(0.5);
        let uniform = ModelUniform::new(rotation);
        let normal = Mat4::from_cols_array_2d(&uniform.normal_matrix);
        assert!(normal.abs_diff_eq(rotation, 1e-5));

        let singular = ModelUniform::new(Mat4::from_scale(Vec3::ZERO));
        assert_eq!(singular.normal_matrix, Mat4::IDENTITY.to_cols_array_2d());
    }

    fn transformed_normal(model: Mat4, normal: Vec3) -> Vec3 {
        let uniform = ModelUniform::new(model);
        Mat4::from_cols_array_2d(&uniform.normal_matrix).transform_vector3(normal)
    }

    #[test]
    fn test_tiny_uniform_scale_keeps_rotation() {
        let model = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2)
            * Mat4::from_scale(Vec3::splat(1e-3));
        assert!(model.determinant().abs() < f32::EPSILON);

        let normal = transformed_normal(model, Vec3::Z);
        assert!((normal.length() - 1.0).abs() < 1e-3);
        assert!(normal.normalize().abs_diff_eq(Vec3::X, 1e-4));
    }

    #[test]
    fn test_large_mesh_fit_keeps_rotation() {
        let mesh = Mesh::from_geometry(
            "large",
            vec![
                Vec3::new(-1000.0, 0.0, 0.0),
                Vec3::new(1000.0, 0.0, 0.0),
                Vec3::new(0.0, 1000.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
        .unwrap();
        let model = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2) * fit_transform(&mesh);

        let normal = transformed_normal(model, mesh.face_normals[0]);
        assert!(normal.normalize().abs_diff_eq(Vec3::X, 1e-4));
        assert!(normal.length() > shade_core::constants::NORMAL_EPSILON);
    }

    #[test]
    fn test_large_scale_normal_stays_unit() {
        let normal = transformed_normal(Mat4::from_scale(Vec3::splat(1e4)), Vec3::Y);
        assert!(normal.abs_diff_eq(Vec3::Y, 1e-4));
    }
}
