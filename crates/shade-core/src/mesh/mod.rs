//! Triangle meshes: loading and normal computation

mod normals;
mod obj;

use std::path::Path;

use glam::Vec3;

pub use normals::{
    MeshNormals, compute_face_normals, compute_vertex_normals, face_normal, safe_normalize,
};
pub use obj::{load_obj, load_obj_from_bytes};

/// A triangle mesh with derived normals
///
/// Geometry is frozen after construction: normals and bounds are derived once
/// and the renderer only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Display name, the file stem for loaded meshes
    pub name: String,
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Triangles as zero-based indices into `vertices`
    pub faces: Vec<[u32; 3]>,
    /// One normal per face, same order as `faces`
    pub face_normals: Vec<Vec3>,
    /// One normal per vertex, same order as `vertices`
    pub vertex_normals: Vec<Vec3>,
    /// Bounding box min
    pub bbox_min: Vec3,
    /// Bounding box max
    pub bbox_max: Vec3,
}

impl Mesh {
    /// Build a mesh from positions and triangles, deriving normals and bounds
    ///
    /// Fails if the mesh has no faces or a face references a vertex that does
    /// not exist.
    pub fn from_geometry(
        name: impl Into<String>,
        vertices: Vec<Vec3>,
        faces: Vec<[u32; 3]>,
    ) -> Result<Self, MeshError> {
        if faces.is_empty() {
            return Err(MeshError::EmptyMesh);
        }
        validate_indices(vertices.len(), &faces)?;

        let normals = MeshNormals::compute(&vertices, &faces);
        let (bbox_min, bbox_max) = bounding_box(&vertices);

        Ok(Self {
            name: name.into(),
            vertices,
            faces,
            face_normals: normals.face,
            vertex_normals: normals.vertex,
            bbox_min,
            bbox_max,
        })
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of faces whose normal collapsed to zero
    pub fn degenerate_face_count(&self) -> usize {
        self.face_normals.iter().filter(|n| **n == Vec3::ZERO).count()
    }

    /// Get the center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.bbox_min + self.bbox_max) * 0.5
    }

    /// Get the size of the bounding box
    pub fn size(&self) -> Vec3 {
        self.bbox_max - self.bbox_min
    }

    /// Radius of the sphere around [`Mesh::center`] enclosing the bounding box
    pub fn radius(&self) -> f32 {
        self.size().length() * 0.5
    }
}

fn validate_indices(vertex_count: usize, faces: &[[u32; 3]]) -> Result<(), MeshError> {
    for (face, indices) in faces.iter().enumerate() {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange {
                face,
                index,
                vertex_count,
            });
        }
    }
    Ok(())
}

fn bounding_box(vertices: &[Vec3]) -> (Vec3, Vec3) {
    if vertices.is_empty() {
        return (Vec3::ZERO, Vec3::ZERO);
    }

    vertices
        .iter()
        .fold((Vec3::MAX, Vec3::MIN), |(min, max), v| (min.min(*v), max.max(*v)))
}

/// Detect mesh format from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Unknown,
}

impl MeshFormat {
    /// Detect format from file path
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("obj") => MeshFormat::Obj,
            _ => MeshFormat::Unknown,
        }
    }

    /// Get format name
    pub fn name(&self) -> &'static str {
        match self {
            MeshFormat::Obj => "OBJ",
            MeshFormat::Unknown => "Unknown",
        }
    }
}

/// Load any supported mesh format
pub fn load_mesh(path: impl AsRef<Path>) -> Result<Mesh, MeshError> {
    let path = path.as_ref();

    match MeshFormat::from_path(path) {
        MeshFormat::Obj => load_obj(path),
        MeshFormat::Unknown => Err(MeshError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        )),
    }
}

/// Mesh-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty mesh: no geometry found")]
    EmptyMesh,
    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
