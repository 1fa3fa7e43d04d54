//! OBJ mesh file loading

use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use glam::Vec3;

use super::{Mesh, MeshError};

/// Parser settings: polygons are fan-triangulated and position indices are
/// kept separate from texture/normal indices, so `f 1/4/2 ...` contributes
/// position index 0 only. Point records stay enabled for the position
/// anchors added by [`anchored_source`].
fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ignore_points: false,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Load an OBJ file into a [`Mesh`] named after the file stem
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    let file = File::open(path).map_err(|e| MeshError::Io(format!("{}: {}", path.display(), e)))?;
    let mut reader = BufReader::new(file);

    let mesh = load_obj_from_reader(name, &mut reader)?;
    tracing::info!(
        "Loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

/// Load an OBJ from bytes
pub fn load_obj_from_bytes(name: &str, data: &[u8]) -> Result<Mesh, MeshError> {
    let mut cursor = Cursor::new(data);
    load_obj_from_reader(name, &mut cursor)
}

/// Rewrite the OBJ text so tobj returns one model indexed like the file.
///
/// `o`/`g` records are dropped, otherwise tobj splits the file into models
/// that each re-index their own positions. A leading point record per `v`
/// line makes every position referenced in file order, so tobj's index for
/// a position equals its `v` line number minus one. Returns the rewritten
/// text and the number of positions.
fn anchored_source(content: &str) -> (String, usize) {
    let position_count = content
        .lines()
        .filter(|line| line.split_whitespace().next() == Some("v"))
        .count();

    let mut source = String::with_capacity(content.len() + position_count * 8);
    for i in 1..=position_count {
        source.push_str(&format!("f {}\n", i));
    }
    for line in content.lines() {
        if matches!(line.split_whitespace().next(), Some("o") | Some("g")) {
            continue;
        }
        source.push_str(line);
        source.push('\n');
    }

    (source, position_count)
}

fn load_obj_from_reader(name: &str, reader: &mut impl Read) -> Result<Mesh, MeshError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| MeshError::Io(e.to_string()))?;

    let (source, position_count) = anchored_source(&content);
    let (models, _materials) = tobj::load_obj_buf(
        &mut Cursor::new(source.as_bytes()),
        &load_options(),
        |_| Ok(Default::default()),
    )
    .map_err(|e| MeshError::Parse(e.to_string()))?;

    let Some(model) = models.first() else {
        return Err(MeshError::EmptyMesh);
    };
    if models.len() > 1 {
        tracing::warn!("{}: {} OBJ models, using the first", name, models.len());
    }

    let positions = &model.mesh.positions;
    let vertices: Vec<Vec3> = positions
        .chunks_exact(3)
        .map(|p| Vec3::new(p[0], p[1], p[2]))
        .collect();

    // Skip the anchors, then drop point records from the file (a == b == c)
    let faces: Vec<[u32; 3]> = model
        .mesh
        .indices
        .chunks_exact(3)
        .skip(position_count)
        .map(|tri| [tri[0], tri[1], tri[2]])
        .filter(|[a, b, c]| !(a == b && b == c))
        .collect();

    tracing::debug!(
        "OBJ '{}': {} positions, {} triangles",
        name,
        vertices.len(),
        faces.len()
    );

    let mesh = Mesh::from_geometry(name, vertices, faces)?;

    let degenerate = mesh.degenerate_face_count();
    if degenerate > 0 {
        tracing::warn!("{}: {} degenerate faces have zero normals", name, degenerate);
    }

    Ok(mesh)
}
